use glam::Mat4;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{DrawCtx, DEFAULT_AMBIENT};
use crate::time::FrameTime;

use super::app::AppControl;

/// Window handle and metadata for the frame being rendered.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Physical surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Begins one render pass with cleared color and depth attachments, calls
    /// `draw` with a ready [`DrawCtx`], then presents the frame.
    ///
    /// Surface errors are mapped through the device layer: lost/outdated
    /// surfaces reconfigure and skip, out-of-memory exits.
    pub fn render<F>(&mut self, clear: wgpu::Color, view_projection: Mat4, draw: F) -> AppControl
    where
        F: FnOnce(&mut DrawCtx<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        // Pass scope — the pass borrows the encoder and must be dropped
        // before submit() takes the frame.
        {
            let pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ember scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.gpu.depth_view(),
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

            let mut ctx = DrawCtx {
                pass,
                queue: self.gpu.queue(),
                view_projection,
                ambient: DEFAULT_AMBIENT,
            };
            draw(&mut ctx);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
