use super::helpers;
use super::targets::HDR_FORMAT;
use constellation_core::{
    CameraUniforms, ObjectUniforms, PerspectiveCamera, Scene, MARKER_RADIUS, SCENE_WGSL,
    SPRITE_CORNERS,
};
use glam::Mat4;

struct ObjectSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ObjectSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer =
            helpers::uniform_buffer(device, label, std::mem::size_of::<ObjectUniforms>());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write(&self, queue: &wgpu::Queue, u: ObjectUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&u));
    }
}

struct Geometry {
    buffer: wgpu::Buffer,
    count: u32,
}

impl Geometry {
    fn points(device: &wgpu::Device, label: &str, xyz: &[f32]) -> Self {
        Self {
            buffer: helpers::vertex_buffer(
                device,
                label,
                bytemuck::cast_slice(xyz),
                wgpu::BufferUsages::empty(),
            ),
            count: (xyz.len() / 3) as u32,
        }
    }
}

/// GPU side of a [`Scene`]: one uniform slot per drawable object group, static
/// particle, marker and edge geometry, and a label buffer rewritten each frame
/// as labels turn to face the camera.
pub(crate) struct SceneResources {
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    dim: ObjectSlot,
    bright: ObjectSlot,
    markers: ObjectSlot,
    edges: ObjectSlot,
    labels: ObjectSlot,
    particle_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    quad: wgpu::Buffer,
    dim_points: Geometry,
    bright_points: Geometry,
    marker_points: Geometry,
    edge_lines: Geometry,
    label_lines: Geometry,
    label_scratch: Vec<[f32; 3]>,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device, scene: &Scene) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let camera_bgl = helpers::uniform_layout(device, "camera_bgl");
        let object_bgl = helpers::uniform_layout(device, "object_bgl");
        let camera_buffer =
            helpers::uniform_buffer(device, "camera_uniforms", std::mem::size_of::<CameraUniforms>());
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&camera_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let sprite_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: 8,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![1 => Float32x3],
            },
        ];
        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3],
        }];
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent::OVER,
        };
        let particle_pipeline = make_scene_pipeline(
            device,
            "particle_pipeline",
            &layout,
            &shader,
            ("vs_sprite", &sprite_buffers),
            "fs_particle",
            wgpu::PrimitiveTopology::TriangleList,
            additive,
        );
        let marker_pipeline = make_scene_pipeline(
            device,
            "marker_pipeline",
            &layout,
            &shader,
            ("vs_sprite", &sprite_buffers),
            "fs_marker",
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::BlendState::REPLACE,
        );
        let line_pipeline = make_scene_pipeline(
            device,
            "line_pipeline",
            &layout,
            &shader,
            ("vs_line", &line_buffers),
            "fs_flat",
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        let quad = helpers::vertex_buffer(
            device,
            "sprite_quad",
            bytemuck::cast_slice(&SPRITE_CORNERS),
            wgpu::BufferUsages::empty(),
        );
        let marker_xyz: Vec<f32> = scene
            .markers
            .iter()
            .flat_map(|m| m.position.to_array())
            .collect();
        let edge_xyz: Vec<f32> = scene
            .edge_vertices()
            .into_iter()
            .flat_map(|v| v.to_array())
            .collect();
        let label_vertex_count: usize = scene.labels.iter().map(|l| l.geometry.vertices.len()).sum();
        let label_lines = Geometry {
            buffer: helpers::vertex_buffer(
                device,
                "label_lines",
                &vec![0u8; label_vertex_count * 12],
                wgpu::BufferUsages::COPY_DST,
            ),
            count: label_vertex_count as u32,
        };
        log::info!(
            "[render] scene buffers: {} dim + {} bright particles, {} markers, {} edge verts, {} label verts",
            scene.dim_field.count(),
            scene.bright_field.count(),
            scene.markers.len(),
            edge_xyz.len() / 3,
            label_vertex_count
        );

        Self {
            camera_buffer,
            camera_bind_group,
            dim: ObjectSlot::new(device, &object_bgl, "dim_field_uniforms"),
            bright: ObjectSlot::new(device, &object_bgl, "bright_field_uniforms"),
            markers: ObjectSlot::new(device, &object_bgl, "marker_uniforms"),
            edges: ObjectSlot::new(device, &object_bgl, "edge_uniforms"),
            labels: ObjectSlot::new(device, &object_bgl, "label_uniforms"),
            particle_pipeline,
            marker_pipeline,
            line_pipeline,
            quad,
            dim_points: Geometry::points(device, "dim_points", &scene.dim_field.positions),
            bright_points: Geometry::points(device, "bright_points", &scene.bright_field.positions),
            marker_points: Geometry::points(device, "marker_points", &marker_xyz),
            edge_lines: Geometry::points(device, "edge_lines", &edge_xyz),
            label_lines,
            label_scratch: Vec::with_capacity(label_vertex_count),
        }
    }

    /// Upload the per-frame state: camera, materials, field rotation and
    /// camera-facing label outlines.
    pub(crate) fn update(&mut self, queue: &wgpu::Queue, scene: &Scene, camera: &PerspectiveCamera) {
        let cam = CameraUniforms::new(camera, scene.ambient.radiance());
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&cam));

        self.dim.write(
            queue,
            ObjectUniforms::new(scene.dim_field.model_matrix(), scene.material(scene.dim_field.material)),
        );
        self.bright.write(
            queue,
            ObjectUniforms::new(
                scene.bright_field.model_matrix(),
                scene.material(scene.bright_field.material),
            ),
        );
        let radius = scene.markers.first().map_or(MARKER_RADIUS, |m| m.radius);
        self.markers.write(
            queue,
            ObjectUniforms::new(Mat4::IDENTITY, scene.material(scene.marker_material)).with_size(radius),
        );
        self.edges.write(
            queue,
            ObjectUniforms::new(Mat4::IDENTITY, scene.material(scene.edge_material)),
        );
        self.labels.write(
            queue,
            ObjectUniforms::new(Mat4::IDENTITY, scene.material(scene.label_material)),
        );

        self.label_scratch.clear();
        for label in &scene.labels {
            self.label_scratch
                .extend(label.world_vertices().map(|v| v.to_array()));
        }
        if !self.label_scratch.is_empty() {
            queue.write_buffer(
                &self.label_lines.buffer,
                0,
                bytemuck::cast_slice(&self.label_scratch),
            );
        }
    }

    /// Clear `target` and draw particles, edges, labels, then markers.
    pub(crate) fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        clear: wgpu::Color,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.camera_bind_group, &[]);

        rpass.set_pipeline(&self.particle_pipeline);
        rpass.set_vertex_buffer(0, self.quad.slice(..));
        for (slot, points) in [(&self.dim, &self.dim_points), (&self.bright, &self.bright_points)] {
            if points.count > 0 {
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.set_vertex_buffer(1, points.buffer.slice(..));
                rpass.draw(0..SPRITE_CORNERS.len() as u32, 0..points.count);
            }
        }

        rpass.set_pipeline(&self.line_pipeline);
        for (slot, lines) in [(&self.edges, &self.edge_lines), (&self.labels, &self.label_lines)] {
            if lines.count > 0 {
                rpass.set_bind_group(1, &slot.bind_group, &[]);
                rpass.set_vertex_buffer(0, lines.buffer.slice(..));
                rpass.draw(0..lines.count, 0..1);
            }
        }

        if self.marker_points.count > 0 {
            rpass.set_pipeline(&self.marker_pipeline);
            rpass.set_bind_group(1, &self.markers.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad.slice(..));
            rpass.set_vertex_buffer(1, self.marker_points.buffer.slice(..));
            rpass.draw(0..SPRITE_CORNERS.len() as u32, 0..self.marker_points.count);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn make_scene_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex: (&str, &[wgpu::VertexBufferLayout]),
    frag_entry: &str,
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vertex.0),
            buffers: vertex.1,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(frag_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
