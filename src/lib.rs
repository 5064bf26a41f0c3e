//! Per-frame behavior of a player-controlled sprite, driven by a guarded,
//! table-driven finite state machine.
//!
//! [`fsm`] holds the entity-agnostic engine. [`components`] is the pure data
//! (states, events, the player entity), [`systems`] the per-state behaviors
//! and frame systems, [`scene::prefabs`] creation and teardown, and
//! [`engine`] the host services the behaviors consume.

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod scene;
pub mod systems;

pub use components::{Cardinal, Event, Player, PlayerState};
pub use config::PlayerConfig;
pub use engine::{HeadlessHost, Host};
pub use error::{AssetError, ConfigError, DespawnError, ScriptError, SpawnError};
pub use scene::prefabs::{create_player, despawn_player, destroy_player, spawn_player};
pub use systems::{handle_event, player_frame_system, step_frame, update_player};
