use crate::camera::FixedCamera;
use crate::context::GpuContext;
use crate::error::GpuError;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use rubik_render::{CubeletInstance, CubeletMesh, Frame, NormalMode, Renderer};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    eye: [f32; 4],
    light_position: [f32; 4],
    light_terms: [f32; 4],
    material: [f32; 4],
    border_color: [f32; 4],
}

impl Uniforms {
    fn from_frame(frame: &Frame<'_>) -> Self {
        let camera = FixedCamera::from(frame.view);
        let light = frame.lighting;
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            model: frame.rotation.matrix().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            light_position: light.position.extend(1.0).to_array(),
            light_terms: [
                light.total_ambient(),
                light.diffuse,
                light.specular,
                0.0,
            ],
            material: [light.material_specular, light.shininess, 0.0, 0.0],
            border_color: frame.view.border_color.to_rgba(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    slot: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct EdgeVertex {
    position: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    colors: [[f32; 4]; 6],
}

fn face_vertices(normals: NormalMode) -> Vec<Vertex> {
    CubeletMesh::new(normals)
        .face_vertices
        .iter()
        .map(|v| Vertex {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            slot: v.slot,
        })
        .collect()
}

/// New instance buffer length when `needed` instances must fit, if the
/// current one is too small.
fn grown_capacity(current: usize, needed: usize) -> Option<usize> {
    (needed > current).then_some(needed)
}

impl From<&CubeletInstance> for InstanceData {
    fn from(inst: &CubeletInstance) -> Self {
        let cols = inst.model_matrix().to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            colors: inst.face_colors.map(|c| c.to_rgba()),
        }
    }
}

/// wgpu-based cube renderer.
///
/// Uploads the unit cubelet mesh once and draws it instanced: lit faces
/// first, then border lines on top. Face normals are rewritten in place when
/// the frame's lighting switches normal mode.
pub struct WgpuRenderer {
    ctx: GpuContext,
    face_pipeline: wgpu::RenderPipeline,
    edge_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    face_vertex_buffer: wgpu::Buffer,
    /// Normal mode the face vertex buffer was last filled with.
    normals: NormalMode,
    face_index_buffer: wgpu::Buffer,
    face_index_count: u32,
    edge_vertex_buffer: wgpu::Buffer,
    edge_vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(ctx: GpuContext) -> Self {
        let device = &ctx.device;
        let surface_format = ctx.format();
        let (width, height) = ctx.size();

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform_buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let color_target = [Some(wgpu::ColorTargetState {
            format: surface_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        // Face pipeline
        let face_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cubelet_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CUBELET_SHADER.into()),
        });

        let face_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("face_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &face_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                            2 => Uint32,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Float32x4,
                            9 => Float32x4,
                            10 => Float32x4,
                            11 => Float32x4,
                            12 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &face_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &color_target,
            }),
            // Both sides of every quad are drawn.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Faces are pushed back slightly so border lines win the depth test.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 1.0,
                    clamp: 0.0,
                },
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Edge pipeline
        let edge_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("edge_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::EDGE_SHADER.into()),
        });

        let edge_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("edge_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &edge_shader,
                entry_point: Some("vs_edge"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<EdgeVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    },
                    // Same instance buffer as the faces; only the matrix is read.
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            1 => Float32x4,
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &edge_shader,
                entry_point: Some("fs_edge"),
                compilation_options: Default::default(),
                targets: &color_target,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Unit cubelet mesh
        let normals = NormalMode::default();
        let mesh = CubeletMesh::new(normals);
        let face_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("face_vertex_buffer"),
            contents: bytemuck::cast_slice(&face_vertices(normals)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let face_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("face_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.face_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let face_index_count = mesh.face_indices.len() as u32;

        let edge_verts: Vec<EdgeVertex> = mesh
            .edge_vertices
            .iter()
            .map(|p| EdgeVertex {
                position: p.to_array(),
            })
            .collect();
        let edge_vertex_count = edge_verts.len() as u32;
        let edge_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge_vertex_buffer"),
            contents: bytemuck::cast_slice(&edge_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        // Instance buffer, grown on demand to fit the scene
        let instance_capacity = 0;
        let instance_buffer = Self::create_instance_buffer(device, instance_capacity);

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            ctx,
            face_pipeline,
            edge_pipeline,
            uniform_buffer,
            uniform_bind_group,
            face_vertex_buffer,
            normals,
            face_index_buffer,
            face_index_count,
            edge_vertex_buffer,
            edge_vertex_count,
            instance_buffer,
            instance_capacity,
            depth_texture,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
        let (width, height) = self.ctx.size();
        self.depth_texture = Self::create_depth_texture(&self.ctx.device, width, height);
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (capacity.max(1) * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Refill the face vertex buffer when the frame asks for other normals.
    fn sync_normals(&mut self, normals: NormalMode) {
        if normals == self.normals {
            return;
        }
        tracing::debug!("face normals switched to {normals:?}");
        self.ctx.queue.write_buffer(
            &self.face_vertex_buffer,
            0,
            bytemuck::cast_slice(&face_vertices(normals)),
        );
        self.normals = normals;
    }

    fn ensure_instance_capacity(&mut self, needed: usize) {
        if let Some(capacity) = grown_capacity(self.instance_capacity, needed) {
            tracing::debug!("instance buffer grown to {capacity} instances");
            self.instance_buffer = Self::create_instance_buffer(&self.ctx.device, capacity);
            self.instance_capacity = capacity;
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

impl Renderer for WgpuRenderer {
    type Output = Result<(), GpuError>;

    /// Render one frame: lit faces, then border lines, then present.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), GpuError> {
        let output = match self.ctx.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                self.ctx.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.sync_normals(frame.lighting.normals);
        self.ensure_instance_capacity(frame.scene.len());

        let queue = &self.ctx.queue;
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_frame(frame)),
        );

        let instances: Vec<InstanceData> = frame
            .scene
            .instances
            .iter()
            .map(InstanceData::from)
            .collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        let instance_count = instances.len() as u32;

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let clear = frame.view.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.r as f64,
                            g: clear.g as f64,
                            b: clear.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if instance_count > 0 {
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

                // Faces
                pass.set_pipeline(&self.face_pipeline);
                pass.set_vertex_buffer(0, self.face_vertex_buffer.slice(..));
                pass.set_index_buffer(self.face_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.face_index_count, 0, 0..instance_count);

                // Borders
                pass.set_pipeline(&self.edge_pipeline);
                pass.set_vertex_buffer(0, self.edge_vertex_buffer.slice(..));
                pass.draw(0..self.edge_vertex_count, 0..instance_count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use rubik_common::{FACE_COLORS, FaceSlot, Rotation};
    use rubik_kernel::{ColorScheme, CubeAssembly};
    use rubik_render::{CubeScene, Lighting, ViewParams};

    #[test]
    fn gpu_structs_have_expected_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        assert_eq!(std::mem::size_of::<InstanceData>(), 160);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn instance_data_carries_translation_and_slot_colors() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let corner = &scene.instances[26];
        let data = InstanceData::from(corner);
        assert_eq!(data.model_3, [1.01, 1.01, 1.01, 1.0]);
        assert_eq!(data.colors[0], FACE_COLORS[0].1.to_rgba());
    }

    #[test]
    fn uniforms_follow_frame() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let view = ViewParams::default();
        let lighting = Lighting::default();
        let rotation = Rotation::new(30.0, -45.0);
        let u = Uniforms::from_frame(&Frame {
            scene: &scene,
            rotation,
            view: &view,
            lighting: &lighting,
        });
        assert_eq!(Mat4::from_cols_array_2d(&u.model), rotation.matrix());
        assert_eq!(u.light_position, [3.0, 3.0, 3.0, 1.0]);
        assert!((u.light_terms[0] - 0.7).abs() < 1e-6);
        assert_eq!(u.eye, [0.0, 0.0, 6.0, 1.0]);
    }

    #[test]
    fn uniform_ambient_follows_lighting() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let view = ViewParams::default();
        let lighting = Lighting {
            scene_ambient: 0.1,
            ambient: 0.3,
            ..Lighting::default()
        };
        let u = Uniforms::from_frame(&Frame {
            scene: &scene,
            rotation: Rotation::default(),
            view: &view,
            lighting: &lighting,
        });
        assert_eq!(u.light_terms[0], lighting.total_ambient());
        assert_eq!(u.light_terms[1], lighting.diffuse);
    }

    #[test]
    fn default_face_vertices_share_the_viewer_normal() {
        let constant = face_vertices(NormalMode::Constant);
        assert_eq!(constant.len(), 24);
        assert!(constant.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));

        let per_face = face_vertices(NormalMode::PerFace);
        let top = per_face
            .iter()
            .find(|v| v.slot == FaceSlot::Top.index() as u32)
            .unwrap();
        assert_eq!(top.normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn instance_buffer_grows_to_fit_the_scene() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        assert_eq!(grown_capacity(0, scene.len()), Some(27));
        assert_eq!(grown_capacity(27, scene.len()), None);
        assert_eq!(grown_capacity(27, 40), Some(40));
    }
}
