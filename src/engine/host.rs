use glam::Vec2;

use crate::components::Color;
use crate::error::AssetError;

/// Opaque handle to a texture owned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Services the player consumes from the surrounding game: the viewport,
/// the frame clock, texture loading and one drawing primitive.
///
/// The state behaviors only ever see `&mut dyn Host`, so any engine binding
/// (or the headless one in [`super::HeadlessHost`]) can drive them.
pub trait Host {
    /// Viewport width and height in pixels.
    fn screen_size(&self) -> Vec2;

    /// Seconds covered by the current frame.
    fn frame_time(&self) -> f32;

    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError>;

    fn unload_texture(&mut self, texture: TextureHandle);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn screen_center(&self) -> Vec2 {
        self.screen_size() / 2.0
    }
}

/// The host as the state callbacks receive it.
pub type HostEnv = dyn Host + 'static;
