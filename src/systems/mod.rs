pub mod animation;
mod player;

pub use player::{
    handle_event, player_frame_system, player_state_table, step_frame, update_player,
    PlayerStateTable,
};
