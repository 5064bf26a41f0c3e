use rand::{Rng, RngCore};

use crate::components::{Cardinal, Clip, PlayerState, SpriteRow};

// ---------------------------------------------------------------------------
// Sprite sheet layout
// ---------------------------------------------------------------------------

const CELL: f32 = 64.0;
const ATTACK_CELL: f32 = 192.0;

const fn clip(name: &'static str, y: f32, cell: f32, frames: usize, frame_duration: f32) -> Clip {
    Clip {
        name,
        row: SpriteRow::new(y, cell),
        frames,
        frame_duration,
    }
}

/// Idle fidgets. Rows 17-20 hold 13 cells but only the first 8 are played.
pub const IDLE_VARIANTS: [Clip; 7] = [
    clip("idle_1", 320.0, CELL, 8, 0.2),
    clip("idle_2", 384.0, CELL, 8, 0.2),
    clip("idle_3", 448.0, CELL, 8, 0.2),
    clip("idle_4", 1024.0, CELL, 8, 0.2),
    clip("idle_5", 1088.0, CELL, 8, 0.2),
    clip("idle_6", 1152.0, CELL, 8, 0.2),
    clip("idle_7", 1216.0, CELL, 8, 0.2),
];

pub const WALK_UP: Clip = clip("walk_up", 512.0, CELL, 9, 0.1);
pub const WALK_LEFT: Clip = clip("walk_left", 576.0, CELL, 9, 0.1);
pub const WALK_DOWN: Clip = clip("walk_down", 640.0, CELL, 9, 0.1);
pub const WALK_RIGHT: Clip = clip("walk_right", 704.0, CELL, 9, 0.1);

pub const ATTACK_UP: Clip = clip("attack_up", 2994.0, ATTACK_CELL, 6, 0.1);
pub const ATTACK_LEFT: Clip = clip("attack_left", 3136.0, ATTACK_CELL, 6, 0.1);
pub const ATTACK_DOWN: Clip = clip("attack_down", 3328.0, ATTACK_CELL, 6, 0.1);
pub const ATTACK_RIGHT: Clip = clip("attack_right", 3520.0, ATTACK_CELL, 6, 0.1);

pub const DEATH: Clip = clip("death", 1280.0, CELL, 6, 0.2);
pub const RESPAWN: Clip = clip("respawn", 384.0, CELL, 8, 0.1);
pub const SHIELD: Clip = clip("shield", 384.0, CELL, 8, 0.1);

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Uniform draw over the idle variants.
pub fn random_idle(rng: &mut dyn RngCore) -> Clip {
    IDLE_VARIANTS[rng.random_range(0..IDLE_VARIANTS.len())]
}

/// Walk cycle for a movement state. Diagonals reuse the up/down rows;
/// undirected `Walking` uses the up row.
pub fn walk_clip(state: PlayerState) -> Clip {
    match state {
        PlayerState::MovingDown | PlayerState::MovingDownLeft | PlayerState::MovingDownRight => {
            WALK_DOWN
        }
        PlayerState::MovingLeft => WALK_LEFT,
        PlayerState::MovingRight => WALK_RIGHT,
        _ => WALK_UP,
    }
}

/// Attack swing facing the last straight heading, or down if there is none.
pub fn attack_clip(direction: Option<Cardinal>) -> Clip {
    match direction {
        Some(Cardinal::Up) => ATTACK_UP,
        Some(Cardinal::Left) => ATTACK_LEFT,
        Some(Cardinal::Right) => ATTACK_RIGHT,
        Some(Cardinal::Down) | None => ATTACK_DOWN,
    }
}
