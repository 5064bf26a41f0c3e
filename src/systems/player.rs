use std::sync::Arc;

use glam::Vec2;
use hecs::World;
use tracing::{debug, info, trace};

use crate::components::{Event, Player, PlayerState};
use crate::engine::HostEnv;
use crate::fsm::{Behavior, FsmError, StateTable};
use crate::systems::animation::{attack_clip, random_idle, walk_clip, DEATH, RESPAWN, SHIELD};

/// State table specialised for the player: callbacks receive the player and
/// the host services.
pub type PlayerStateTable = StateTable<PlayerState, Event, Player, HostEnv>;

type PlayerBehavior = Behavior<PlayerState, Event, Player, HostEnv>;

// ---------------------------------------------------------------------------
// State table
// ---------------------------------------------------------------------------

const IDLE: PlayerBehavior = Behavior {
    on_event: idle_event,
    on_enter: idle_enter,
    on_update: idle_update,
    on_exit: idle_exit,
};

const WALKING: PlayerBehavior = Behavior {
    on_event: walking_event,
    on_enter: walking_enter,
    on_update: walking_update,
    on_exit: walking_exit,
};

const ATTACKING: PlayerBehavior = Behavior {
    on_event: attacking_event,
    on_enter: attacking_enter,
    on_update: attacking_update,
    on_exit: attacking_exit,
};

const SHIELDING: PlayerBehavior = Behavior {
    on_event: shield_event,
    on_enter: shield_enter,
    on_update: shield_update,
    on_exit: shield_exit,
};

const DEAD: PlayerBehavior = Behavior {
    on_event: inert_event,
    on_enter: dead_enter,
    on_update: dead_update,
    on_exit: dead_exit,
};

const RESPAWNING: PlayerBehavior = Behavior {
    on_event: inert_event,
    on_enter: respawn_enter,
    on_update: respawn_update,
    on_exit: respawn_exit,
};

/// Build the player's state table: one slot per [`PlayerState`], each with
/// its callbacks and the states it may hand over to.
pub fn player_state_table() -> Result<PlayerStateTable, FsmError> {
    use PlayerState::*;

    let moving = || [Walking].into_iter().chain(PlayerState::DIRECTIONAL);
    let from_idle = moving().chain([Attacking, Shield, Dead]);
    let from_moving = || moving().chain([Idle, Attacking, Dead]);

    let names = [
        (MovingUp, "Player_Moving_Up"),
        (MovingDown, "Player_Moving_Down"),
        (MovingLeft, "Player_Moving_Left"),
        (MovingRight, "Player_Moving_Right"),
        (MovingUpLeft, "Player_Moving_Up_Left"),
        (MovingUpRight, "Player_Moving_Up_Right"),
        (MovingDownLeft, "Player_Moving_Down_Left"),
        (MovingDownRight, "Player_Moving_Down_Right"),
    ];

    let mut builder = PlayerStateTable::builder()
        .register(Idle, "Player_Idle", IDLE, from_idle)
        .register(Walking, "Player_Walking", WALKING, from_moving());
    for (state, name) in names {
        builder = builder.register(state, name, WALKING, from_moving());
    }
    builder
        .register(Attacking, "Player_Attacking", ATTACKING, [Idle, Dead])
        .register(Shield, "Player_Shield", SHIELDING, [Idle, Dead])
        .register(Dead, "Player_Dead", DEAD, [Respawn, Idle])
        .register(Respawn, "Player_Respawn", RESPAWNING, [Idle])
        .register_inert(Collision, "Player_Collision")
        .build()
}

// ---------------------------------------------------------------------------
// Idle
// ---------------------------------------------------------------------------

fn idle_event(player: &mut Player, _host: &mut HostEnv, event: Event) -> Option<PlayerState> {
    match event {
        Event::Move => Some(PlayerState::Walking),
        Event::Attack => Some(PlayerState::Attacking),
        Event::Defend | Event::Shield => Some(PlayerState::Shield),
        Event::Die => Some(PlayerState::Dead),
        Event::None => {
            // Settled: lets the next entry tell "just arrived" apart.
            player.fsm.previous = player.fsm.state;
            None
        }
        Event::Respawn | Event::CollisionStart | Event::CollisionEnd => None,
        directional => directional.directional_target(),
    }
}

fn idle_enter(player: &mut Player, _host: &mut HostEnv) {
    log_enter(player);
    if player.fsm.previous != player.fsm.state {
        let clip = random_idle(player.rng.as_mut());
        player.animation.play(clip);
    }
}

fn idle_update(player: &mut Player, host: &mut HostEnv) -> Option<PlayerState> {
    let config = &player.config;
    player.stamina = (player.stamina + config.regen_rate).min(config.max_stamina);
    player.mana = (player.mana + config.regen_rate).min(config.max_mana);
    player.animation.advance(host.frame_time());
    None
}

fn idle_exit(player: &mut Player, _host: &mut HostEnv) {
    log_exit(player);
}

// ---------------------------------------------------------------------------
// Walking and the directional states
// ---------------------------------------------------------------------------

fn walking_event(_player: &mut Player, _host: &mut HostEnv, event: Event) -> Option<PlayerState> {
    match event {
        Event::None => Some(PlayerState::Idle),
        Event::Attack => Some(PlayerState::Attacking),
        Event::Die => Some(PlayerState::Dead),
        Event::Move
        | Event::Defend
        | Event::Shield
        | Event::Respawn
        | Event::CollisionStart
        | Event::CollisionEnd => None,
        directional => directional.directional_target(),
    }
}

fn walking_enter(player: &mut Player, _host: &mut HostEnv) {
    log_enter(player);
    player.animation.play(walk_clip(player.fsm.state));
}

fn walking_update(player: &mut Player, host: &mut HostEnv) -> Option<PlayerState> {
    player.stamina -= player.config.move_stamina_cost;
    if player.stamina <= 0.0 {
        player.stamina = 0.0;
        return Some(PlayerState::Idle);
    }

    let state = player.fsm.state;
    if let Some(cardinal) = state.cardinal() {
        player.last_direction = Some(cardinal);
    }

    let step = state.heading() * player.body.speed;
    player.body.velocity = step;
    let margin = Vec2::splat(player.config.body_radius);
    let bounds_max = (host.screen_size() - margin).max(margin);
    let position = (player.body.position + step).clamp(margin, bounds_max);
    player.body.place(position);
    trace!(name = %player.name, x = position.x, y = position.y, stamina = player.stamina, "moved");

    player.animation.advance(host.frame_time());

    if player.body.health <= 0.0 {
        return Some(PlayerState::Dead);
    }
    if player.animation.is_on_last_frame() {
        return Some(PlayerState::Idle);
    }
    None
}

fn walking_exit(player: &mut Player, _host: &mut HostEnv) {
    player.body.velocity = Vec2::ZERO;
    log_exit(player);
}

// ---------------------------------------------------------------------------
// Attacking
// ---------------------------------------------------------------------------

fn attacking_event(_player: &mut Player, _host: &mut HostEnv, event: Event) -> Option<PlayerState> {
    match event {
        Event::Die => Some(PlayerState::Dead),
        _ => None,
    }
}

fn attacking_enter(player: &mut Player, _host: &mut HostEnv) {
    log_enter(player);
    player.animation.play(attack_clip(player.last_direction));
}

fn attacking_update(player: &mut Player, host: &mut HostEnv) -> Option<PlayerState> {
    player.mana -= player.config.attack_mana_cost;
    if player.mana <= 0.0 {
        player.mana = 0.0;
        return Some(PlayerState::Idle);
    }
    player.animation.advance(host.frame_time());
    None
}

fn attacking_exit(player: &mut Player, _host: &mut HostEnv) {
    log_exit(player);
}

// ---------------------------------------------------------------------------
// Shield
// ---------------------------------------------------------------------------

fn shield_event(_player: &mut Player, _host: &mut HostEnv, event: Event) -> Option<PlayerState> {
    match event {
        Event::Die => Some(PlayerState::Dead),
        directional if directional.directional_target().is_some() => Some(PlayerState::Idle),
        _ => None,
    }
}

fn shield_enter(player: &mut Player, _host: &mut HostEnv) {
    log_enter(player);
    player.shield.active = true;
    player.shield.radius = player.config.shield_radius;
    player.shield.color = player.config.shield_color();
    player.animation.play(SHIELD);
}

fn shield_update(player: &mut Player, host: &mut HostEnv) -> Option<PlayerState> {
    player.animation.advance(host.frame_time());

    player.stamina -= player.config.shield_stamina_cost;
    if player.stamina <= 0.0 {
        player.stamina = 0.0;
        return Some(PlayerState::Idle);
    }

    if player.shield.active {
        host.draw_circle(player.body.position, player.shield.radius, player.shield.color);
    }
    None
}

fn shield_exit(player: &mut Player, _host: &mut HostEnv) {
    log_exit(player);
    player.shield.active = false;
}

// ---------------------------------------------------------------------------
// Dead / Respawn
// ---------------------------------------------------------------------------

/// Dead and Respawn only leave when their animation finishes.
fn inert_event(_player: &mut Player, _host: &mut HostEnv, _event: Event) -> Option<PlayerState> {
    None
}

fn dead_enter(player: &mut Player, _host: &mut HostEnv) {
    log_enter(player);
    player.animation.play(DEATH);
}

fn dead_update(player: &mut Player, host: &mut HostEnv) -> Option<PlayerState> {
    player.animation.advance(host.frame_time());
    if !player.animation.is_on_last_frame() {
        return None;
    }

    player.lives = player.lives.saturating_sub(1);
    if player.lives > 0 {
        info!(name = %player.name, lives = player.lives, "life lost");
        Some(PlayerState::Respawn)
    } else {
        // Out of lives: start over from the spawn point.
        info!(name = %player.name, "out of lives, resetting");
        player.lives = player.config.starting_lives;
        let spawn = player.spawn_point;
        player.body.place(spawn);
        Some(PlayerState::Idle)
    }
}

fn dead_exit(player: &mut Player, _host: &mut HostEnv) {
    log_exit(player);
}

fn respawn_enter(player: &mut Player, host: &mut HostEnv) {
    log_enter(player);
    player.body.place(host.screen_center());
    player.body.health = player.config.max_health;
    player.stamina = player.config.max_stamina;
    player.mana = player.config.max_mana;
    player.animation.play(RESPAWN);
}

fn respawn_update(player: &mut Player, host: &mut HostEnv) -> Option<PlayerState> {
    player.animation.advance(host.frame_time());
    player.animation.is_on_last_frame().then_some(PlayerState::Idle)
}

fn respawn_exit(player: &mut Player, _host: &mut HostEnv) {
    log_exit(player);
}

fn log_enter(player: &Player) {
    debug!(
        name = %player.name,
        state = player.state_name(),
        stamina = player.stamina,
        mana = player.mana,
        "enter"
    );
}

fn log_exit(player: &Player) {
    debug!(
        name = %player.name,
        state = player.state_name(),
        stamina = player.stamina,
        mana = player.mana,
        "exit"
    );
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Deliver one event to the current state's handler. Returns `true` if it
/// caused a transition.
pub fn handle_event(player: &mut Player, event: Event, host: &mut HostEnv) -> bool {
    let states = Arc::clone(&player.states);
    states.dispatch(player, host, event)
}

/// Run the current state's per-frame update. Returns `true` if it forced a
/// transition.
pub fn update_player(player: &mut Player, host: &mut HostEnv) -> bool {
    let states = Arc::clone(&player.states);
    states.update(player, host)
}

/// Advance one player by one frame: event handling first, then the update of
/// whichever state is current afterwards.
pub fn step_frame(player: &mut Player, event: Event, host: &mut HostEnv) {
    player.fsm.tick(host.frame_time());
    let states = Arc::clone(&player.states);
    states.step(player, host, event);
}

/// Step every player in the world, one after another, with the same event.
pub fn player_frame_system(world: &mut World, event: Event, host: &mut HostEnv) {
    for (_entity, player) in world.query_mut::<&mut Player>() {
        step_frame(player, event, host);
    }
}
