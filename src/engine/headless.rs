use std::collections::HashMap;

use glam::Vec2;
use tracing::trace;

use super::host::{Host, TextureHandle};
use super::time::FrameClock;
use crate::components::Color;
use crate::error::AssetError;

/// A circle the host was asked to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleDraw {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Window-less [`Host`]: fixed-step clock, fixed viewport, textures tracked
/// by path, draw calls recorded for inspection.
pub struct HeadlessHost {
    pub clock: FrameClock,
    screen: Vec2,
    next_texture: u32,
    textures: HashMap<TextureHandle, String>,
    /// Circles drawn since the last [`HeadlessHost::begin_frame`].
    pub circles: Vec<CircleDraw>,
    fail_loads: bool,
}

impl HeadlessHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            clock: FrameClock::default(),
            screen: Vec2::new(width, height),
            next_texture: 1,
            textures: HashMap::new(),
            circles: Vec::new(),
            fail_loads: false,
        }
    }

    /// Make every subsequent texture load fail.
    pub fn failing_loads(mut self) -> Self {
        self.fail_loads = true;
        self
    }

    pub fn with_frame_time(mut self, dt: f32) -> Self {
        self.clock = FrameClock::new(dt);
        self
    }

    /// Start a new frame: tick the clock and clear the draw list.
    pub fn begin_frame(&mut self) {
        self.clock.tick();
        self.circles.clear();
    }

    pub fn loaded_textures(&self) -> usize {
        self.textures.len()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(800.0, 450.0)
    }
}

impl Host for HeadlessHost {
    fn screen_size(&self) -> Vec2 {
        self.screen
    }

    fn frame_time(&self) -> f32 {
        self.clock.dt
    }

    fn load_texture(&mut self, path: &str) -> Result<TextureHandle, AssetError> {
        if self.fail_loads {
            return Err(AssetError::Texture {
                path: path.to_string(),
                reason: "loading disabled".to_string(),
            });
        }
        let handle = TextureHandle(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(handle, path.to_string());
        trace!(?handle, path, "texture loaded");
        Ok(handle)
    }

    fn unload_texture(&mut self, texture: TextureHandle) {
        if let Some(path) = self.textures.remove(&texture) {
            trace!(?texture, %path, "texture unloaded");
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circles.push(CircleDraw { center, radius, color });
    }
}
