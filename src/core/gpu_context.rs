use std::sync::Arc;
use wgpu::{Adapter, Device, DeviceDescriptor, Features, Instance, Limits, Queue, Surface};
use winit::window::Window;

use crate::error::{EffectsError, Result};

/// Adapter, device and queue shared by every render path.
///
/// Device and queue are behind `Arc` so passes can hold them cheaply.
#[derive(Clone)]
pub struct GpuContext {
    instance: Instance,
    adapter: Adapter,
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a context without a surface; used to probe for a GPU
    pub async fn new(force_fallback_adapter: bool) -> Result<Self> {
        let instance = Self::create_instance();
        let adapter = Self::request_adapter(&instance, None, force_fallback_adapter).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Create a context and a surface for `window`, with an adapter that can
    /// present to it
    pub async fn for_window(window: Arc<Window>) -> Result<(Self, Surface<'static>)> {
        let instance = Self::create_instance();
        let surface = instance.create_surface(window)?;
        let adapter = Self::request_adapter(&instance, Some(&surface), false).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let info = adapter.get_info();
        log::info!("Using GPU adapter: {} ({:?})", info.name, info.backend);

        Ok((
            Self {
                instance,
                adapter,
                device: Arc::new(device),
                queue: Arc::new(queue),
            },
            surface,
        ))
    }

    /// Surface configuration for the given size. Picks a non-sRGB format:
    /// page colours and egui output are already sRGB-encoded.
    pub fn surface_config(
        &self,
        surface: &Surface<'_>,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let caps = surface.get_capabilities(&self.adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| EffectsError::Surface("surface reports no formats".into()))?;

        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    fn create_instance() -> Instance {
        Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        })
    }

    async fn request_adapter(
        instance: &Instance,
        surface: Option<&Surface<'_>>,
        force_fallback_adapter: bool,
    ) -> Result<Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: surface,
                force_fallback_adapter,
            })
            .await
            .map_err(|e| EffectsError::Adapter(e.to_string()))
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        adapter
            .request_device(&DeviceDescriptor {
                label: Some("landing-fx device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| EffectsError::Device(e.to_string()))
    }
}

/// Whether any GPU adapter is available at all
pub fn probe_gpu() -> bool {
    match pollster::block_on(GpuContext::new(false)) {
        Ok(gpu) => {
            log::debug!("GPU probe found {}", gpu.adapter_info().name);
            true
        }
        Err(err) => {
            log::warn!("GPU probe failed: {err}");
            false
        }
    }
}
