use glam::Mat4;
use wgpu::util::DeviceExt;
use wgpu::{BindGroup, Buffer, Device, Queue, RenderPipeline};

use crate::error::{EffectsError, Result};
use crate::scene::{Scene, SceneDriver, SceneNode};

/// Per-node uniform: model-view-projection and RGBA colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl NodeUniform {
    pub fn new(view_projection: Mat4, node: &SceneNode) -> Self {
        Self {
            mvp: (view_projection * node.transform.matrix()).to_cols_array_2d(),
            color: node.color.to_f32(),
        }
    }
}

struct GpuGeometry {
    vertices: Buffer,
    vertex_count: u32,
}

struct GpuNode {
    geometry: usize,
    uniform: Buffer,
    bind_group: BindGroup,
}

/// Draws the scene graph as alpha-blended line lists.
///
/// Geometry is uploaded once when the renderer is built; each frame only
/// rewrites the per-node uniforms.
pub struct WireframeRenderer {
    pipeline: RenderPipeline,
    geometries: Vec<GpuGeometry>,
    nodes: Vec<GpuNode>,
}

impl WireframeRenderer {
    /// Build the pipeline and upload `scene`. Validation errors raised while
    /// compiling the shader or pipeline come back as `SceneConstruction`.
    pub fn new(device: &Device, surface_format: wgpu::TextureFormat, scene: &Scene) -> Result<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wireframe Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../wireframe.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Wireframe Node Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Wireframe Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wireframe Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let geometries = scene
            .geometries()
            .iter()
            .map(|geometry| GpuGeometry {
                vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Wireframe Vertices"),
                    contents: bytemuck::cast_slice(&geometry.vertex_data()),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                vertex_count: geometry.positions().len() as u32,
            })
            .collect();

        let nodes = scene
            .nodes()
            .iter()
            .map(|node| {
                let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(node.name),
                    contents: bytemuck::cast_slice(&[NodeUniform::new(Mat4::IDENTITY, node)]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Wireframe Node Bind Group"),
                    layout: &bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform.as_entire_binding(),
                    }],
                });
                GpuNode {
                    geometry: node.geometry,
                    uniform,
                    bind_group,
                }
            })
            .collect();

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(EffectsError::SceneConstruction(error.to_string()));
        }

        log::debug!("Wireframe pipeline ready");
        Ok(Self {
            pipeline,
            geometries,
            nodes,
        })
    }

    /// Write this frame's transforms
    pub fn prepare(&self, queue: &Queue, driver: &SceneDriver) {
        let view_projection = driver.camera().view_projection();
        for (gpu_node, node) in self.nodes.iter().zip(driver.scene().nodes()) {
            let uniform = NodeUniform::new(view_projection, node);
            queue.write_buffer(&gpu_node.uniform, 0, bytemuck::cast_slice(&[uniform]));
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        for node in &self.nodes {
            let Some(geometry) = self.geometries.get(node.geometry) else {
                continue;
            };
            if geometry.vertex_count == 0 {
                continue;
            }
            pass.set_bind_group(0, &node.bind_group, &[]);
            pass.set_vertex_buffer(0, geometry.vertices.slice(..));
            pass.draw(0..geometry.vertex_count, 0..1);
        }
    }
}
