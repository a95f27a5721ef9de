mod helpers;
mod post;
mod scene;
mod targets;

use crate::constants::CLEAR_COLOR;
use constellation_core::{
    ChainTargets, FrameRenderer, PassKind, PerspectiveCamera, PhysicalSize, PostChain, Scene,
    Target,
};
use instant::Instant;
use post::PostResources;
use scene::SceneResources;
use targets::RenderTargets;
use web_sys as web;

#[derive(Debug)]
pub enum RenderError {
    /// The device ran out of memory; the loop cannot continue.
    OutOfMemory,
    Surface(wgpu::SurfaceError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::OutOfMemory => write!(f, "GPU out of memory"),
            RenderError::Surface(e) => write!(f, "surface error: {e}"),
        }
    }
}

/// Surface and device, acquired before the scene exists.
pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }
}

/// WebGPU renderer for one assembled scene and its post chain.
pub struct GpuState {
    ctx: GpuContext,
    targets: RenderTargets,
    scene: SceneResources,
    post: PostResources,
    clear_color: wgpu::Color,
    started: Instant,
}

impl GpuState {
    pub fn new(ctx: GpuContext, scene: &Scene, chain: &PostChain) -> Self {
        let targets = RenderTargets::new(&ctx.device, chain.targets());
        let scene_res = SceneResources::new(&ctx.device, scene);
        let post = PostResources::new(&ctx.device, chain.passes(), ctx.config.format, &targets);
        let [r, g, b] = CLEAR_COLOR;
        Self {
            ctx,
            targets,
            scene: scene_res,
            post,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            started: Instant::now(),
        }
    }

    /// Reconfigure the surface and rebuild offscreen targets at `size`.
    pub fn resize(&mut self, size: PhysicalSize) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.ctx.config.width = size.width;
        self.ctx.config.height = size.height;
        self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
        self.rebuild_targets(ChainTargets::for_size(size.width, size.height));
    }

    fn rebuild_targets(&mut self, sizes: ChainTargets) {
        self.targets = RenderTargets::new(&self.ctx.device, sizes);
        self.post.rebind(&self.ctx.device, &self.targets);
        log::info!(
            "[render] targets {}x{} (bloom {}x{})",
            sizes.width,
            sizes.height,
            sizes.bloom_width,
            sizes.bloom_height
        );
    }

    /// Next swapchain texture. `Ok(None)` skips this frame.
    fn acquire(&mut self) -> Result<Option<wgpu::SurfaceTexture>, RenderError> {
        match self.ctx.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost or outdated; reconfiguring");
                self.ctx.surface.configure(&self.ctx.device, &self.ctx.config);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => Ok(None),
            Err(wgpu::SurfaceError::OutOfMemory) => Err(RenderError::OutOfMemory),
            Err(e) => Err(RenderError::Surface(e)),
        }
    }
}

impl FrameRenderer for GpuState {
    type Error = RenderError;

    /// Direct render into the scene target, without post-processing.
    fn render_scene(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.scene.update(&self.ctx.queue, scene, camera);
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("direct_encoder"),
            });
        if let Some(view) = self.targets.view(Target::Hdr) {
            self.scene.draw(&mut encoder, view, self.clear_color);
        }
        self.ctx.queue.submit(Some(encoder.finish()));
        Ok(())
    }

    fn render_chain(
        &mut self,
        chain: &PostChain,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError> {
        if chain.targets() != self.targets.sizes() {
            self.rebuild_targets(chain.targets());
        }
        self.scene.update(&self.ctx.queue, scene, camera);
        let time = self.started.elapsed().as_secs_f32();
        self.post.write_uniforms(&self.ctx.queue, chain, time);

        let Some(frame) = self.acquire()? else {
            return Ok(());
        };
        let screen = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("chain_encoder"),
            });
        for (i, pass) in self.post.plan().iter().enumerate() {
            let target = self.targets.view(pass.output).unwrap_or(&screen);
            if pass.kind == PassKind::Scene {
                self.scene.draw(&mut encoder, target, self.clear_color);
                continue;
            }
            let Some(res) = self.post.pass_for(i) else {
                continue;
            };
            if let Some((bg0, bg1)) = res.bind_groups() {
                post::blit(&mut encoder, "post_pass", target, res.pipeline(), bg0, bg1);
            }
        }
        self.ctx.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
