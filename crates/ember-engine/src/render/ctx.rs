use glam::Mat4;

/// Ambient term used until a scene stamps its own: dim white.
pub const DEFAULT_AMBIENT: [f32; 4] = [1.0, 1.0, 1.0, 0.25];

/// Per-pass drawing context handed to each render object.
///
/// The render pass already has the color and depth attachments bound and
/// cleared; objects set their pipeline, upload their uniforms through
/// `queue`, and issue draw calls.
pub struct DrawCtx<'e> {
    pub pass: wgpu::RenderPass<'e>,
    pub queue: &'e wgpu::Queue,

    /// Projection × camera view for this tick, refreshed after the script
    /// host has had its chance to move the camera.
    pub view_projection: Mat4,

    /// Scene-wide ambient light: rgb color, alpha intensity. The running
    /// scene overwrites this before dispatching its chain.
    pub ambient: [f32; 4],
}
