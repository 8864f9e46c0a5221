use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::color::Color;

use super::context::{FrameHandle, GpuContext};
use super::surface::SurfaceErrorAction;

/// Renderer initialization parameters.
///
/// `auto_resize` controls whether the runtime re-syncs the surface to the
/// window on resize events; when off, the surface keeps its configured size
/// until [`Renderer::resize`] is called explicitly. The remaining fields
/// configure the surface itself.
#[derive(Debug, Clone)]
pub struct RendererInit {
    pub auto_resize: bool,

    /// Color every frame starts from.
    pub clear_color: Color,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is broadly supported.
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference; an unsupported request falls back to a
    /// supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for RendererInit {
    fn default() -> Self {
        Self {
            auto_resize: true,
            clear_color: Color::opaque(0.1, 0.1, 0.1),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// What happened to one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderOutcome {
    Presented,
    /// Frame skipped: transient surface error, or no GPU context exists.
    Skipped,
    /// Unrecoverable surface error; the host should shut down.
    Fatal,
}

/// Borrowed handles for recording one frame.
///
/// The clear pass has already run when the draw callback sees this; load ops
/// in subsequent passes should use `Load`.
pub struct FrameTarget<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
    pub surface_format: wgpu::TextureFormat,
    pub size: PhysicalSize<u32>,
}

/// Owns the window binding and at most one GPU context.
///
/// The context is created once by [`Renderer::init`]. When creation fails
/// the renderer stays inert: every frame and resize call is a guarded no-op,
/// and the failure surfaces only through the log. Hosts that need to treat a
/// missing context as fatal can check [`Renderer::has_context`] after init.
pub struct Renderer<'w> {
    window: &'w Window,
    gpu: Option<GpuContext<'w>>,
    auto_resize: bool,
    clear_color: Color,
}

impl<'w> Renderer<'w> {
    /// Creates the renderer and its GPU context for `window`.
    pub fn init(window: &'w Window, init: RendererInit) -> Self {
        let auto_resize = init.auto_resize;
        let clear_color = init.clear_color;

        let gpu = match pollster::block_on(GpuContext::new(window, &init)) {
            Ok(gpu) => Some(gpu),
            Err(err) => {
                log::error!("failed to create GPU context, rendering disabled: {err:#}");
                None
            }
        };

        Self {
            window,
            gpu,
            auto_resize,
            clear_color,
        }
    }

    pub fn window(&self) -> &'w Window {
        self.window
    }

    /// Whether a GPU context exists (init succeeded).
    pub fn has_context(&self) -> bool {
        self.gpu.is_some()
    }

    pub fn context(&self) -> Option<&GpuContext<'w>> {
        self.gpu.as_ref()
    }

    pub fn auto_resize(&self) -> bool {
        self.auto_resize
    }

    pub fn set_auto_resize(&mut self, flag: bool) {
        self.auto_resize = flag;
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Current drawable size, if a context exists.
    pub fn size(&self) -> Option<PhysicalSize<u32>> {
        self.gpu.as_ref().map(GpuContext::size)
    }

    pub fn surface_format(&self) -> Option<wgpu::TextureFormat> {
        self.gpu.as_ref().map(GpuContext::surface_format)
    }

    /// Syncs the surface to the displayed size; no-op when the size is
    /// unchanged or no context exists. Returns whether a reconfigure
    /// happened.
    pub fn resize(&mut self, displayed: PhysicalSize<u32>) -> bool {
        match self.gpu.as_mut() {
            Some(gpu) => gpu.resize(displayed),
            None => false,
        }
    }

    /// Clears the surface, hands a [`FrameTarget`] to `draw`, and presents.
    pub fn render_frame<F>(&mut self, draw: F) -> RenderOutcome
    where
        F: FnOnce(&mut FrameTarget<'_>),
    {
        let Some(gpu) = self.gpu.as_mut() else {
            return RenderOutcome::Skipped;
        };

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("failed to acquire frame: {err}");
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => RenderOutcome::Fatal,
                    _ => RenderOutcome::Skipped,
                };
            }
        };

        clear_pass(&mut frame, gpu.depth_view(), self.clear_color);

        {
            let mut target = FrameTarget {
                device: gpu.device(),
                queue: gpu.queue(),
                encoder: &mut frame.encoder,
                color_view: &frame.view,
                depth_view: gpu.depth_view(),
                surface_format: gpu.surface_format(),
                size: gpu.size(),
            };
            draw(&mut target);
        }

        self.window.pre_present_notify();
        gpu.submit(frame);
        RenderOutcome::Presented
    }
}

/// Clears color and depth; dropped before the encoder moves into submit.
fn clear_pass(frame: &mut FrameHandle, depth_view: &wgpu::TextureView, clear: Color) {
    let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("kestrel clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
