pub mod cli;
pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod frame;
pub mod page;
pub mod renderer;
pub mod scene;
pub mod ui;

pub use config::EffectsConfig;
pub use error::{EffectsError, Result};
pub use page::LandingPage;
pub use scene::Background;
