//! Instanced, lit slabs for the panel stack.
//!
//! One unit cube is uploaded once; each panel is an instance carrying its
//! slab transform and color. The only per-frame upload is the small scene
//! uniform holding the group transform.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::CameraBinding;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTarget;
use crate::options::LightingOptions;
use crate::scene::{Panel, PanelGroup, PanelStyle};

/// Cube vertex: position and outward face normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position on the unit cube centered at the origin.
    pub position: [f32; 3],
    /// Outward face normal.
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Per-panel instance data.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PanelInstance {
    /// Unit cube → sized slab in group-local space.
    pub model: [[f32; 4]; 4],
    /// Base color in the render target's encoding (alpha unused).
    pub color: [f32; 4],
}

impl PanelInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Uniform shared by every panel: group transform and lights.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    /// Group-local → world transform.
    pub group_model: [[f32; 4]; 4],
    /// Ambient light color × intensity.
    pub ambient: [f32; 4],
    /// Point light world position.
    pub light_position: [f32; 4],
    /// Point light color × intensity.
    pub light_color: [f32; 4],
}

impl SceneUniform {
    /// Build the uniform for the given group state and lights.
    #[must_use]
    pub fn new(group: &PanelGroup, lighting: &LightingOptions) -> Self {
        Self {
            group_model: group.model_matrix().to_cols_array_2d(),
            ambient: [lighting.ambient, lighting.ambient, lighting.ambient, 1.0],
            light_position: Vec3::from_array(lighting.point_position)
                .extend(1.0)
                .to_array(),
            light_color: [
                lighting.point_intensity,
                lighting.point_intensity,
                lighting.point_intensity,
                1.0,
            ],
        }
    }
}

/// Unit cube with per-face normals: 24 vertices, 36 indices,
/// counter-clockwise front faces.
#[must_use]
pub fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, u, v) with u × v = normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (n, u, v) in faces {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * 0.5;
            vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            });
        }
        indices.extend([0, 1, 2, 0, 2, 3].map(|i| base + i));
    }
    (vertices, indices)
}

/// Instance data for `panels`, with colors encoded for `format`.
#[must_use]
pub fn panel_instances(
    panels: &[Panel],
    style: &PanelStyle,
    format: wgpu::TextureFormat,
) -> Vec<PanelInstance> {
    panels
        .iter()
        .map(|panel| {
            let model = Mat4::from_translation(panel.position + style.slab_offset)
                * Mat4::from_scale(style.size);
            let [r, g, b] = panel.color.for_target(format);
            PanelInstance {
                model: model.to_cols_array_2d(),
                color: [r, g, b, 1.0],
            }
        })
        .collect()
}

/// Draws the panel slabs.
pub struct PanelRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
}

impl PanelRenderer {
    /// Build the pipeline and upload the static geometry for `panels`.
    pub fn new(
        context: &RenderContext,
        camera: &CameraBinding,
        panels: &[Panel],
        style: &PanelStyle,
        scene: &SceneUniform,
    ) -> Self {
        let device = &context.device;
        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/panel.wgsl"));

        let scene_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Panel Scene Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let scene_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Panel Scene Buffer"),
                contents: bytemuck::cast_slice(&[*scene]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let scene_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Panel Scene Bind Group"),
                layout: &scene_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                }],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Panel Pipeline Layout"),
                bind_group_layouts: &[&camera.layout, &scene_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Panel Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout(), PanelInstance::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DepthTarget::FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let (vertices, indices) = cube_mesh();
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Panel Cube Vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Panel Cube Indices"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let instances = panel_instances(panels, style, context.format());
        let instance_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Panel Instances"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            instance_buffer,
            instance_count: instances.len() as u32,
            scene_buffer,
            scene_bind_group,
        }
    }

    /// Upload this frame's group transform and lights.
    pub fn update(&self, queue: &wgpu::Queue, scene: &SceneUniform) {
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[*scene]));
    }

    /// Record the draw into a pass that has the depth target attached.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, camera: &CameraBinding) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &camera.bind_group, &[]);
        pass.set_bind_group(1, &self.scene_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DEFAULT_PANELS;

    #[test]
    fn cube_has_outward_ccw_faces() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(vertices[i as usize].position));
            let winding = (b - a).cross(c - a).normalize();
            let normal = Vec3::from_array(vertices[tri[0] as usize].normal);
            assert!((winding - normal).length() < 1e-5);
            // Face sits on the side its normal points to.
            assert!((a.dot(normal) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn instances_place_slab_behind_panel_origin() {
        let style = PanelStyle::DEFAULT;
        let instances = panel_instances(
            &DEFAULT_PANELS,
            &style,
            wgpu::TextureFormat::Bgra8Unorm,
        );
        assert_eq!(instances.len(), DEFAULT_PANELS.len());

        let model = Mat4::from_cols_array_2d(&instances[1].model);
        let center = model.transform_point3(Vec3::ZERO);
        assert_eq!(center, Vec3::new(0.0, -3.0, -0.05));
        let corner = model.transform_point3(Vec3::splat(0.5));
        assert!((corner - Vec3::new(2.0, -2.0, 0.0)).length() < 1e-6);
        assert_eq!(
            instances[0].color,
            [1.0, 107.0 / 255.0, 107.0 / 255.0, 1.0]
        );
    }

    #[test]
    fn scene_uniform_carries_group_and_lights() {
        let mut group = PanelGroup::default();
        group.write(2.0, 0.7);
        let uniform = SceneUniform::new(&group, &LightingOptions::default());
        assert_eq!(
            uniform.group_model,
            group.model_matrix().to_cols_array_2d()
        );
        assert_eq!(uniform.ambient[0], 0.5);
        assert_eq!(uniform.light_position, [10.0, 10.0, 10.0, 1.0]);
    }
}
