use std::sync::Arc;

use hecs::{Entity, World};
use rand::RngCore;
use tracing::info;

use crate::components::{Animation, Body, Player, PlayerFsm, PlayerState, Shield};
use crate::config::PlayerConfig;
use crate::engine::Host;
use crate::error::{DespawnError, SpawnError};
use crate::systems::animation::random_idle;
use crate::systems::player_state_table;

/// Build a player standing idle at the center of the screen, with full
/// resources and `starting_lives` lives. The center is also its spawn point.
///
/// `rng` drives the idle animation choice; pass a seeded generator for
/// reproducible runs.
pub fn create_player(
    host: &mut dyn Host,
    name: &str,
    config: PlayerConfig,
    rng: impl RngCore + Send + Sync + 'static,
) -> Result<Player, SpawnError> {
    let states = Arc::new(player_state_table()?);
    let texture = host.load_texture(&config.sprite_sheet)?;

    let mut rng: Box<dyn RngCore + Send + Sync> = Box::new(rng);
    let center = host.screen_center();
    let body = Body::new(center, config.walk_speed, config.max_health, config.collider_radius);
    let animation = Animation::new(random_idle(rng.as_mut()));

    info!(name, x = center.x, y = center.y, "player created");

    Ok(Player {
        name: name.to_string(),
        fsm: PlayerFsm::new(PlayerState::Idle),
        states,
        last_direction: None,
        body,
        animation,
        stamina: config.max_stamina,
        mana: config.max_mana,
        lives: config.starting_lives,
        shield: Shield::lowered(),
        spawn_point: center,
        texture,
        config,
        rng,
    })
}

/// Release what the player owns on the host side.
pub fn destroy_player(player: Player, host: &mut dyn Host) {
    host.unload_texture(player.texture);
    info!(name = %player.name, "player destroyed");
}

/// Create a player and add it to `world`.
pub fn spawn_player(
    world: &mut World,
    host: &mut dyn Host,
    name: &str,
    config: PlayerConfig,
    rng: impl RngCore + Send + Sync + 'static,
) -> Result<Entity, SpawnError> {
    let player = create_player(host, name, config, rng)?;
    Ok(world.spawn((player,)))
}

/// Remove a player entity from `world` and release its resources.
pub fn despawn_player(
    world: &mut World,
    entity: Entity,
    host: &mut dyn Host,
) -> Result<(), DespawnError> {
    let player = world
        .remove_one::<Player>(entity)
        .map_err(|_| DespawnError::NoSuchPlayer(entity))?;
    destroy_player(player, host);
    world
        .despawn(entity)
        .map_err(|_| DespawnError::NoSuchPlayer(entity))
}
