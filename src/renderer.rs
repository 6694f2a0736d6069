use std::sync::Arc;

use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::gpu_context::GpuContext;
use crate::core::presenter::CanvasPresenter;
use crate::core::wireframe::WireframeRenderer;
use crate::error::{EffectsError, Result};
use crate::page::LandingPage;
use crate::scene::{Background, SceneDriver};

/// Whether an event egui consumed should be kept from the page. The overlay
/// has no pointer widgets, so only keyboard and IME input is withheld.
pub fn withholds_from_page(event: &WindowEvent, consumed: bool) -> bool {
    consumed && matches!(event, WindowEvent::KeyboardInput { .. } | WindowEvent::Ime(_))
}

/// Owns the window surface and draws the background plus the page overlay
pub struct Renderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    wireframe: Option<WireframeRenderer>,
    presenter: CanvasPresenter,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let (gpu, surface) = GpuContext::for_window(window.clone()).await?;

        let config = gpu.surface_config(&surface, size.width, size.height)?;
        surface.configure(gpu.device(), &config);

        let presenter = CanvasPresenter::new(gpu.device(), config.format, config.width, config.height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            gpu.device(),
            config.format,
            egui_wgpu::RendererOptions::default(),
        );

        log::info!(
            "Renderer initialized: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            gpu,
            surface,
            config,
            wireframe: None,
            presenter,
            egui_renderer,
            egui_state,
            egui_ctx,
        })
    }

    /// Build the GPU side of the wireframe scene. On error the caller should
    /// switch the background to its fallback.
    pub fn attach_wireframe(&mut self, driver: &SceneDriver) -> Result<()> {
        let wireframe = WireframeRenderer::new(self.gpu.device(), self.config.format, driver.scene())?;
        self.wireframe = Some(wireframe);
        Ok(())
    }

    /// Let egui track the event; returns true when egui consumed it
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(self.gpu.device(), &self.config);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Draw one frame. `page` is `None` when the overlay is disabled.
    pub fn render(
        &mut self,
        window: &Window,
        background: &Background,
        page: Option<&LandingPage>,
    ) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(self.gpu.device(), &self.config);
                return Ok(());
            }
            Err(err) => return Err(EffectsError::from(err)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = self.gpu.device();
        let queue = self.gpu.queue();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        match background {
            Background::Wireframe(driver) => {
                if let Some(wireframe) = &self.wireframe {
                    wireframe.prepare(queue, driver);
                }
            }
            Background::Fallback(animation) => {
                self.presenter.upload(device, queue, animation.canvas());
            }
            Background::Absent => {}
        }

        // Background pass
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Background Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            match background {
                Background::Wireframe(_) => {
                    if let Some(wireframe) = &self.wireframe {
                        wireframe.draw(&mut render_pass);
                    }
                }
                Background::Fallback(_) => self.presenter.draw(&mut render_pass),
                Background::Absent => {}
            }
        }

        // egui pass - page overlay
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if let Some(page) = page {
                page.draw(ctx);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer
            .update_buffers(device, queue, &mut encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
