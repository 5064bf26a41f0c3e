/// Source rectangle on the sprite sheet, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One horizontal strip of square cells on the sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteRow {
    /// Top edge of the strip.
    pub y: f32,
    /// Width and height of one cell.
    pub cell: f32,
}

impl SpriteRow {
    pub const fn new(y: f32, cell: f32) -> Self {
        Self { y, cell }
    }

    /// Rectangle of the `column`-th cell, counting from the left edge.
    pub fn frame(&self, column: usize) -> Rect {
        Rect {
            x: column as f32 * self.cell,
            y: self.y,
            width: self.cell,
            height: self.cell,
        }
    }
}

/// A playable animation: the first `frames` cells of a row, each held for
/// `frame_duration` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clip {
    pub name: &'static str,
    pub row: SpriteRow,
    pub frames: usize,
    pub frame_duration: f32,
}

/// Playback cursor over a [`Clip`]. Loops back to the first frame after the
/// last one.
#[derive(Clone, Debug)]
pub struct Animation {
    pub clip: Clip,
    pub current_frame: usize,
    /// Seconds accumulated on the current frame.
    pub timer: f32,
}

impl Animation {
    pub fn new(clip: Clip) -> Self {
        Self {
            clip,
            current_frame: 0,
            timer: 0.0,
        }
    }

    /// Replace the clip and rewind.
    pub fn play(&mut self, clip: Clip) {
        *self = Self::new(clip);
    }

    /// Advance the cursor by `dt` seconds, at most one frame per call.
    pub fn advance(&mut self, dt: f32) {
        if self.clip.frames == 0 {
            return;
        }
        self.timer += dt;
        if self.timer >= self.clip.frame_duration {
            self.timer = 0.0;
            self.current_frame = (self.current_frame + 1) % self.clip.frames;
        }
    }

    pub fn is_on_last_frame(&self) -> bool {
        self.current_frame + 1 >= self.clip.frames
    }

    pub fn current_rect(&self) -> Rect {
        self.clip.row.frame(self.current_frame)
    }
}
