use std::sync::Arc;

use glam::Vec2;
use rand::RngCore;
use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

use super::{Animation, Body, Shield};
use crate::config::PlayerConfig;
use crate::engine::TextureHandle;
use crate::fsm::{FsmState, StateMachine, Stateful};
use crate::systems::PlayerStateTable;

// ---------------------------------------------------------------------------
// Player state machine
// ---------------------------------------------------------------------------

/// All discrete states the player can be in.
///
/// Callbacks and legal transitions live in the table built by
/// `src/systems/player.rs`; this enum stays pure data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum PlayerState {
    Idle,
    /// Undirected movement; plays the upward walk cycle.
    Walking,
    MovingUp,
    MovingDown,
    MovingLeft,
    MovingRight,
    MovingUpLeft,
    MovingUpRight,
    MovingDownLeft,
    MovingDownRight,
    /// Uninterruptible by input; ends on mana depletion or death.
    Attacking,
    Shield,
    /// Plays the death animation, then respawns or resets.
    Dead,
    Respawn,
    /// Reserved slot. Registered inert and never entered.
    Collision,
}

impl PlayerState {
    /// The eight directional movement states.
    pub const DIRECTIONAL: [PlayerState; 8] = [
        PlayerState::MovingUp,
        PlayerState::MovingDown,
        PlayerState::MovingLeft,
        PlayerState::MovingRight,
        PlayerState::MovingUpLeft,
        PlayerState::MovingUpRight,
        PlayerState::MovingDownLeft,
        PlayerState::MovingDownRight,
    ];

    /// Walking or any of the directional states.
    pub fn is_moving(self) -> bool {
        self == PlayerState::Walking || Self::DIRECTIONAL.contains(&self)
    }

    /// The cardinal heading of a straight movement state. Diagonals and
    /// non-movement states have none.
    pub fn cardinal(self) -> Option<Cardinal> {
        match self {
            PlayerState::MovingUp => Some(Cardinal::Up),
            PlayerState::MovingDown => Some(Cardinal::Down),
            PlayerState::MovingLeft => Some(Cardinal::Left),
            PlayerState::MovingRight => Some(Cardinal::Right),
            _ => None,
        }
    }

    /// Unit-speed displacement for one frame of movement in this state.
    /// Diagonals cover half the speed on each axis; `Walking` heads up.
    pub fn heading(self) -> Vec2 {
        match self {
            PlayerState::MovingUp | PlayerState::Walking => Vec2::new(0.0, -1.0),
            PlayerState::MovingDown => Vec2::new(0.0, 1.0),
            PlayerState::MovingLeft => Vec2::new(-1.0, 0.0),
            PlayerState::MovingRight => Vec2::new(1.0, 0.0),
            PlayerState::MovingUpLeft => Vec2::new(-0.5, -0.5),
            PlayerState::MovingUpRight => Vec2::new(0.5, -0.5),
            PlayerState::MovingDownLeft => Vec2::new(-0.5, 0.5),
            PlayerState::MovingDownRight => Vec2::new(0.5, 0.5),
            _ => Vec2::ZERO,
        }
    }
}

impl FsmState for PlayerState {
    fn index(self) -> usize {
        self as usize
    }
}

/// Last straight-line heading, used to orient the attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    Up,
    Down,
    Left,
    Right,
}

/// Semantic input for one frame. Input devices are translated into these
/// upstream; at most one reaches the machine per frame.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumCount, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Event {
    #[default]
    None,
    Move,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveUpLeft,
    MoveUpRight,
    MoveDownLeft,
    MoveDownRight,
    Attack,
    Defend,
    Shield,
    Die,
    Respawn,
    CollisionStart,
    CollisionEnd,
}

impl Event {
    /// The directional movement state this event asks for, if it is one of
    /// the eight directional events.
    pub fn directional_target(self) -> Option<PlayerState> {
        match self {
            Event::MoveUp => Some(PlayerState::MovingUp),
            Event::MoveDown => Some(PlayerState::MovingDown),
            Event::MoveLeft => Some(PlayerState::MovingLeft),
            Event::MoveRight => Some(PlayerState::MovingRight),
            Event::MoveUpLeft => Some(PlayerState::MovingUpLeft),
            Event::MoveUpRight => Some(PlayerState::MovingUpRight),
            Event::MoveDownLeft => Some(PlayerState::MovingDownLeft),
            Event::MoveDownRight => Some(PlayerState::MovingDownRight),
            _ => None,
        }
    }
}

/// FSM runtime attached to the player.
pub type PlayerFsm = StateMachine<PlayerState>;

// ---------------------------------------------------------------------------
// Player entity
// ---------------------------------------------------------------------------

/// The player-controlled entity: generic body plus the resources the state
/// behaviors spend and restore.
///
/// Built by `scene::prefabs::create_player`. Only the callbacks of the
/// current state mutate it.
pub struct Player {
    pub name: String,
    pub fsm: PlayerFsm,
    pub(crate) states: Arc<PlayerStateTable>,
    /// Most recent straight movement. `None` until the player first walks
    /// straight; attacks then face down.
    pub last_direction: Option<Cardinal>,
    pub body: Body,
    pub animation: Animation,
    /// 0..=max_stamina
    pub stamina: f32,
    /// 0..=max_mana
    pub mana: f32,
    pub lives: u8,
    pub shield: Shield,
    pub spawn_point: Vec2,
    pub texture: TextureHandle,
    pub config: PlayerConfig,
    pub(crate) rng: Box<dyn RngCore + Send + Sync>,
}

impl Player {
    pub fn state(&self) -> PlayerState {
        self.fsm.state
    }

    /// Display name of the current state, e.g. `Player_Idle`.
    pub fn state_name(&self) -> &'static str {
        self.states.name(self.fsm.state)
    }

    /// Whether the state table allows moving from `from` to `to`.
    pub fn can_transition(&self, from: PlayerState, to: PlayerState) -> bool {
        self.states.can_transition(from, to)
    }

    /// Lower health, never below zero. Death itself is detected by the
    /// movement update.
    pub fn take_damage(&mut self, amount: f32) {
        self.body.health = (self.body.health - amount).max(0.0);
    }
}

impl Stateful<PlayerState> for Player {
    fn machine(&self) -> &PlayerFsm {
        &self.fsm
    }

    fn machine_mut(&mut self) -> &mut PlayerFsm {
        &mut self.fsm
    }
}
