pub mod canvas;
pub mod gpu_context;
pub mod input_adapter;
pub mod presenter;
pub mod timer;
pub mod wireframe;

pub use canvas::{Canvas, DrawOp, Rgba};
pub use gpu_context::{probe_gpu, GpuContext};
pub use input_adapter::{InputAdapter, NavKey, PageInput};
pub use presenter::CanvasPresenter;
pub use timer::{Countdown, Debounce, Interval, Throttle};
pub use wireframe::WireframeRenderer;
