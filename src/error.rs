//! Error types for the fallible edges of the crate: asset loading, entity
//! creation and removal, configuration and event scripts.
//!
//! Nothing inside a frame step can fail. Illegal transitions are rejected
//! silently and resource underflow is clamped, so these only surface at the
//! boundaries.

use thiserror::Error;

use crate::fsm::FsmError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("texture {path} could not be loaded: {reason}")]
    Texture { path: String, reason: String },
}

/// Creating a player failed; nothing was leaked and the host keeps running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
    #[error("failed to load player sprite sheet")]
    Texture(#[from] AssetError),

    #[error("player state table is incomplete")]
    States(#[from] FsmError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DespawnError {
    #[error("entity {0:?} is not a player in this world")]
    NoSuchPlayer(hecs::Entity),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid player config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    #[error("invalid frame count `{count}` for event `{event}`")]
    BadCount { event: String, count: String },

    #[error("event script is empty")]
    Empty,
}
