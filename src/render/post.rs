use super::helpers;
use super::targets::{RenderTargets, HDR_FORMAT};
use constellation_core::{Pass, PassKind, PostChain, PostUniforms, Target, POST_WGSL};

/// GPU objects for one fullscreen pass of the chain. Each pass owns its
/// uniform buffer so every pass of a frame reads its own parameters.
pub(crate) struct PostPass {
    pub(crate) pass: Pass,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bg0: Option<wgpu::BindGroup>,
    bg1: Option<wgpu::BindGroup>,
}

impl PostPass {
    pub(crate) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub(crate) fn bind_groups(&self) -> Option<(&wgpu::BindGroup, Option<&wgpu::BindGroup>)> {
        self.bg0.as_ref().map(|bg0| (bg0, self.bg1.as_ref()))
    }
}

pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    plan: Vec<Pass>,
    passes: Vec<Option<PostPass>>,
}

fn fragment_entry(kind: PassKind) -> Option<&'static str> {
    match kind {
        PassKind::Scene => None,
        PassKind::BrightPass => Some("fs_bright"),
        PassKind::BlurHorizontal | PassKind::BlurVertical => Some("fs_blur"),
        PassKind::BloomComposite => Some("fs_composite"),
        PassKind::FilmGrain => Some("fs_film"),
    }
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        plan: Vec<Pass>,
        swap_format: wgpu::TextureFormat,
        targets: &RenderTargets,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        };
        let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("post_linear"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_dual = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });

        let passes = plan
            .iter()
            .map(|pass| {
                let entry = fragment_entry(pass.kind)?;
                let format = if pass.output == Target::Screen {
                    swap_format
                } else {
                    HDR_FORMAT
                };
                let layout = if pass.inputs.len() > 1 { &pl_dual } else { &pl_single };
                let label = format!("post_{:?}", pass.kind);
                Some(PostPass {
                    pass: pass.clone(),
                    pipeline: helpers::make_post_pipeline(device, &label, layout, &shader, entry, format),
                    uniform_buffer: helpers::uniform_buffer(
                        device,
                        &label,
                        std::mem::size_of::<PostUniforms>(),
                    ),
                    bg0: None,
                    bg1: None,
                })
            })
            .collect();

        let mut res = Self {
            bgl0,
            bgl1,
            sampler,
            plan,
            passes,
        };
        res.rebind(device, targets);
        res
    }

    /// Every pass of the plan in execution order; `Scene` passes have no
    /// post resources.
    pub(crate) fn plan(&self) -> &[Pass] {
        &self.plan
    }

    pub(crate) fn pass_for(&self, index: usize) -> Option<&PostPass> {
        self.passes.get(index)?.as_ref()
    }

    /// Point every pass at its input textures. Needed whenever the targets
    /// are recreated.
    pub(crate) fn rebind(&mut self, device: &wgpu::Device, targets: &RenderTargets) {
        for p in self.passes.iter_mut().flatten() {
            let inputs = p.pass.inputs.clone();
            let input = |i: usize| inputs.get(i).and_then(|t| targets.view(*t));
            p.bg0 = input(0).map(|view| {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("post_bg0"),
                    layout: &self.bgl0,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: p.uniform_buffer.as_entire_binding(),
                        },
                    ],
                })
            });
            p.bg1 = input(1).map(|view| {
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("post_bg1"),
                    layout: &self.bgl1,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                    ],
                })
            });
            if p.bg0.is_none() {
                log::warn!("[render] {:?} pass has no sampleable input", p.pass.kind);
            }
        }
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, chain: &PostChain, time: f32) {
        for p in self.passes.iter().flatten() {
            let u = PostUniforms::for_pass(&p.pass, chain, time);
            queue.write_buffer(&p.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }
}

pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
