mod animation;
mod character;

pub use animation::{Animation, Clip, Rect, SpriteRow};
pub use character::{Cardinal, Event, Player, PlayerFsm, PlayerState};

use glam::Vec2;

/// RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const GREEN: Color = Color::rgba(0, 228, 48, 255);
    /// Translucent green used for the shield bubble.
    pub const SHIELD_GREEN: Color = Color::rgba(0, 255, 128, 128);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Circle collision shape, centered on the owning body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleCollider {
    pub center: Vec2,
    pub radius: f32,
}

/// Axis-aligned box used for boundary checks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            max: center + Vec2::splat(half_extent),
        }
    }
}

/// Generic game-object base: where the entity is, how fast it goes, how much
/// health it has and the shapes other systems collide against.
#[derive(Clone, Debug)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Distance covered per frame along a cardinal axis.
    pub speed: f32,
    pub health: f32,
    pub collider: CircleCollider,
    pub bounds: Aabb,
    pub color: Color,
}

impl Body {
    pub fn new(position: Vec2, speed: f32, health: f32, collider_radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            speed,
            health,
            collider: CircleCollider { center: position, radius: collider_radius },
            bounds: Aabb::around(position, collider_radius),
            color: Color::GREEN,
        }
    }

    /// Move to `position`, dragging the collision shapes along.
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.sync_colliders();
    }

    /// Re-center the collision shapes on the current position.
    pub fn sync_colliders(&mut self) {
        self.collider.center = self.position;
        self.bounds = Aabb::around(self.position, self.collider.radius);
    }
}

/// Shield bubble drawn around the player while shielding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shield {
    pub active: bool,
    pub radius: f32,
    pub color: Color,
}

impl Shield {
    pub const fn lowered() -> Self {
        Self {
            active: false,
            radius: 0.0,
            color: Color::SHIELD_GREEN,
        }
    }
}
