use animated_fsm::components::{Cardinal, Event, Player, PlayerState};
use animated_fsm::engine::HeadlessHost;
use animated_fsm::systems::animation::{ATTACK_DOWN, ATTACK_LEFT, IDLE_VARIANTS, WALK_RIGHT};
use animated_fsm::systems::player_state_table;
use animated_fsm::{
    create_player, despawn_player, handle_event, player_frame_system, spawn_player, step_frame,
    update_player, DespawnError, PlayerConfig, SpawnError,
};
use glam::Vec2;
use hecs::World;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use strum::IntoEnumIterator;

fn setup() -> (Player, HeadlessHost) {
    let mut host = HeadlessHost::default();
    let player = create_player(&mut host, "Tester", PlayerConfig::default(), StdRng::seed_from_u64(42))
        .unwrap();
    (player, host)
}

/// Drive `player` into `state` through ordinary events.
fn enter(player: &mut Player, host: &mut HeadlessHost, event: Event, state: PlayerState) {
    assert!(handle_event(player, event, host));
    assert_eq!(player.state(), state);
}

/// Run updates until the state changes, returning how many it took.
fn update_until_change(player: &mut Player, host: &mut HeadlessHost, limit: usize) -> usize {
    let start = player.state();
    for n in 1..=limit {
        host.begin_frame();
        update_player(player, host);
        if player.state() != start {
            return n;
        }
    }
    panic!("still in {start:?} after {limit} updates");
}

/// Always yields zero, pinning every draw to the lowest value.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
    fn next_u64(&mut self) -> u64 {
        0
    }
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[test]
fn new_player_starts_idle_and_full() {
    let (player, host) = setup();

    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.state_name(), "Player_Idle");
    assert_eq!(player.stamina, 100.0);
    assert_eq!(player.mana, 100.0);
    assert_eq!(player.body.health, 100.0);
    assert_eq!(player.lives, 4);
    assert_eq!(player.body.position, Vec2::new(400.0, 225.0));
    assert_eq!(player.spawn_point, player.body.position);
    assert!(!player.shield.active);
    assert_eq!(host.loaded_textures(), 1);
}

#[test]
fn dispatch_never_leaves_the_legal_set() {
    for state in PlayerState::iter() {
        for event in Event::iter() {
            let (mut player, mut host) = setup();
            player.fsm.commit(state);

            handle_event(&mut player, event, &mut host);

            let after = player.state();
            assert!(
                after == state || player.can_transition(state, after),
                "{state:?} --{event:?}--> {after:?} is not a legal transition"
            );
        }
    }
}

#[test]
fn collision_slot_is_inert() {
    let (mut player, mut host) = setup();
    player.fsm.commit(PlayerState::Collision);

    for event in Event::iter() {
        assert!(!handle_event(&mut player, event, &mut host));
    }
    assert!(!update_player(&mut player, &mut host));
    assert_eq!(player.state(), PlayerState::Collision);
}

#[test]
fn walk_cycle_returns_to_idle() {
    let (mut player, mut host) = setup();
    player.stamina = 50.0;
    player.mana = 50.0;

    host.begin_frame();
    step_frame(&mut player, Event::Move, &mut host);
    assert_eq!(player.state(), PlayerState::Walking);

    let mut stamina = player.stamina;
    let mut frames = 0;
    while player.state() == PlayerState::Walking {
        host.begin_frame();
        step_frame(&mut player, Event::Move, &mut host);
        assert!(player.stamina < stamina, "stamina must drain while walking");
        stamina = player.stamina;
        frames += 1;
        assert!(frames < 200, "walk cycle never completed");
    }
    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.fsm.previous, PlayerState::Walking);

    for _ in 0..200 {
        host.begin_frame();
        step_frame(&mut player, Event::None, &mut host);
        assert!(player.stamina >= stamina);
        stamina = player.stamina;
    }
    assert_eq!(player.stamina, 100.0);
    assert_eq!(player.mana, 100.0);
}

#[test]
fn walking_out_of_stamina_forces_idle_in_one_update() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::MoveRight, PlayerState::MovingRight);
    player.stamina = 0.04;

    assert!(update_player(&mut player, &mut host));
    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.stamina, 0.0);
}

#[test]
fn attacking_out_of_mana_forces_idle_in_one_update() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Attack, PlayerState::Attacking);
    player.mana = 0.5;

    assert!(update_player(&mut player, &mut host));
    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.mana, 0.0);
}

#[test]
fn attacking_drains_mana_every_frame() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Attack, PlayerState::Attacking);

    for _ in 0..10 {
        host.begin_frame();
        step_frame(&mut player, Event::Attack, &mut host);
    }
    assert_eq!(player.mana, 90.0);
    assert_eq!(player.state(), PlayerState::Attacking);
}

#[test]
fn attacking_only_yields_to_death() {
    for event in Event::iter().filter(|&e| e != Event::Die) {
        let (mut player, mut host) = setup();
        enter(&mut player, &mut host, Event::Attack, PlayerState::Attacking);

        assert!(!handle_event(&mut player, event, &mut host), "{event:?} interrupted the attack");
        assert_eq!(player.state(), PlayerState::Attacking);
    }

    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Attack, PlayerState::Attacking);
    enter(&mut player, &mut host, Event::Die, PlayerState::Dead);
}

#[test]
fn last_life_resets_at_spawn_point() {
    let (mut player, mut host) = setup();
    player.spawn_point = Vec2::new(100.0, 120.0);
    enter(&mut player, &mut host, Event::Die, PlayerState::Dead);
    player.lives = 1;
    player.body.place(Vec2::new(600.0, 300.0));

    update_until_change(&mut player, &mut host, 500);

    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.lives, 4);
    assert_eq!(player.body.position, Vec2::new(100.0, 120.0));
    assert_eq!(player.body.collider.center, Vec2::new(100.0, 120.0));
}

#[test]
fn losing_a_life_goes_through_respawn() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Die, PlayerState::Dead);
    player.lives = 3;
    player.body.health = 0.0;
    player.stamina = 5.0;
    player.mana = 7.0;
    player.body.place(Vec2::new(50.0, 60.0));

    update_until_change(&mut player, &mut host, 500);

    assert_eq!(player.state(), PlayerState::Respawn);
    assert_eq!(player.lives, 2);
    assert_eq!(player.body.health, 100.0);
    assert_eq!(player.stamina, 100.0);
    assert_eq!(player.mana, 100.0);
    assert_eq!(player.body.position, Vec2::new(400.0, 225.0));

    update_until_change(&mut player, &mut host, 500);
    assert_eq!(player.state(), PlayerState::Idle);
}

#[test]
fn dead_and_respawn_ignore_events() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Die, PlayerState::Dead);
    for event in Event::iter() {
        assert!(!handle_event(&mut player, event, &mut host));
    }

    player.fsm.commit(PlayerState::Respawn);
    for event in Event::iter() {
        assert!(!handle_event(&mut player, event, &mut host));
    }
    assert_eq!(player.state(), PlayerState::Respawn);
}

#[test]
fn shield_raises_draws_and_drops() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Defend, PlayerState::Shield);
    assert!(player.shield.active);
    assert_eq!(player.shield.radius, 90.0);

    host.begin_frame();
    step_frame(&mut player, Event::Attack, &mut host);
    assert_eq!(player.state(), PlayerState::Shield);
    assert_eq!(host.circles.len(), 1);
    assert_eq!(host.circles[0].center, player.body.position);
    assert_eq!(host.circles[0].radius, 90.0);
    assert!((player.stamina - 99.95).abs() < 1e-4);

    enter(&mut player, &mut host, Event::MoveDownLeft, PlayerState::Idle);
    assert!(!player.shield.active);
}

#[test]
fn shield_collapses_without_stamina() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Shield, PlayerState::Shield);
    player.stamina = 0.01;

    host.begin_frame();
    assert!(update_player(&mut player, &mut host));
    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.stamina, 0.0);
    assert!(!player.shield.active);
    assert!(host.circles.is_empty());
}

#[test]
fn shield_only_leaves_for_idle_or_death() {
    let (player, _host) = setup();
    for target in PlayerState::iter() {
        let legal = player.can_transition(PlayerState::Shield, target);
        assert_eq!(legal, matches!(target, PlayerState::Idle | PlayerState::Dead), "{target:?}");
    }
}

#[test]
fn diagonal_moves_keep_the_last_cardinal_heading() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::MoveLeft, PlayerState::MovingLeft);
    update_player(&mut player, &mut host);
    assert_eq!(player.last_direction, Some(Cardinal::Left));

    enter(&mut player, &mut host, Event::MoveUpRight, PlayerState::MovingUpRight);
    update_player(&mut player, &mut host);
    assert_eq!(player.last_direction, Some(Cardinal::Left));

    enter(&mut player, &mut host, Event::Attack, PlayerState::Attacking);
    assert_eq!(player.animation.clip, ATTACK_LEFT);
}

#[test]
fn attack_faces_down_before_any_straight_move() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::MoveDownRight, PlayerState::MovingDownRight);
    update_player(&mut player, &mut host);
    assert_eq!(player.last_direction, None);

    enter(&mut player, &mut host, Event::Attack, PlayerState::Attacking);
    assert_eq!(player.animation.clip, ATTACK_DOWN);
}

#[test]
fn movement_speed_and_screen_bounds() {
    let (mut player, mut host) = setup();
    let start = player.body.position;

    enter(&mut player, &mut host, Event::MoveRight, PlayerState::MovingRight);
    assert_eq!(player.animation.clip, WALK_RIGHT);
    update_player(&mut player, &mut host);
    assert_eq!(player.body.position, start + Vec2::new(2.0, 0.0));

    enter(&mut player, &mut host, Event::MoveDownRight, PlayerState::MovingDownRight);
    update_player(&mut player, &mut host);
    assert_eq!(player.body.position, start + Vec2::new(3.0, 1.0));

    enter(&mut player, &mut host, Event::MoveLeft, PlayerState::MovingLeft);
    player.body.place(Vec2::new(33.0, 200.0));
    update_player(&mut player, &mut host);
    assert_eq!(player.body.position, Vec2::new(32.0, 200.0));
    assert_eq!(player.body.collider.center, Vec2::new(32.0, 200.0));
}

#[test]
fn directional_states_switch_between_each_other() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::MoveUp, PlayerState::MovingUp);
    for event in [Event::MoveLeft, Event::MoveDownRight, Event::MoveDown, Event::MoveUpLeft] {
        assert!(handle_event(&mut player, event, &mut host));
        assert!(player.state().is_moving());
    }
    enter(&mut player, &mut host, Event::None, PlayerState::Idle);
}

#[test]
fn damage_while_walking_kills() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Move, PlayerState::Walking);
    player.take_damage(250.0);
    assert_eq!(player.body.health, 0.0);

    assert!(update_player(&mut player, &mut host));
    assert_eq!(player.state(), PlayerState::Dead);
}

#[test]
fn idle_none_marks_the_state_as_settled() {
    let (mut player, mut host) = setup();
    enter(&mut player, &mut host, Event::Move, PlayerState::Walking);
    enter(&mut player, &mut host, Event::None, PlayerState::Idle);
    assert_eq!(player.fsm.previous, PlayerState::Walking);

    assert!(!handle_event(&mut player, Event::None, &mut host));
    assert_eq!(player.fsm.previous, PlayerState::Idle);
}

#[test]
fn idle_animation_draw_is_injected() {
    let mut host = HeadlessHost::default();
    let mut player = create_player(&mut host, "Pinned", PlayerConfig::default(), ZeroRng).unwrap();
    assert_eq!(player.animation.clip, IDLE_VARIANTS[0]);

    enter(&mut player, &mut host, Event::Attack, PlayerState::Attacking);
    player.mana = 0.1;
    update_player(&mut player, &mut host);
    assert_eq!(player.state(), PlayerState::Idle);
    assert_eq!(player.animation.clip, IDLE_VARIANTS[0]);
}

#[test]
fn same_seed_same_idle_choices() {
    let run = || {
        let mut host = HeadlessHost::default();
        let mut player =
            create_player(&mut host, "Seeded", PlayerConfig::default(), StdRng::seed_from_u64(9))
                .unwrap();
        let mut clips = vec![player.animation.clip.name];
        for _ in 0..5 {
            enter(&mut player, &mut host, Event::Move, PlayerState::Walking);
            enter(&mut player, &mut host, Event::None, PlayerState::Idle);
            clips.push(player.animation.clip.name);
        }
        clips
    };
    assert_eq!(run(), run());
}

#[test]
fn texture_failure_is_recoverable() {
    let mut host = HeadlessHost::default().failing_loads();
    let result = create_player(&mut host, "Doomed", PlayerConfig::default(), StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(SpawnError::Texture(_))));
    assert_eq!(host.loaded_textures(), 0);
}

#[test]
fn world_steps_each_player_and_despawns_cleanly() {
    let mut host = HeadlessHost::default();
    let mut world = World::new();
    let a = spawn_player(&mut world, &mut host, "A", PlayerConfig::default(), StdRng::seed_from_u64(1))
        .unwrap();
    let b = spawn_player(&mut world, &mut host, "B", PlayerConfig::default(), StdRng::seed_from_u64(2))
        .unwrap();

    host.begin_frame();
    player_frame_system(&mut world, Event::MoveDown, &mut host);
    for entity in [a, b] {
        let player = world.get::<&Player>(entity).unwrap();
        assert_eq!(player.state(), PlayerState::MovingDown);
        assert_eq!(player.last_direction, Some(Cardinal::Down));
    }

    despawn_player(&mut world, a, &mut host).unwrap();
    assert_eq!(host.loaded_textures(), 1);
    assert_eq!(
        despawn_player(&mut world, a, &mut host),
        Err(DespawnError::NoSuchPlayer(a))
    );
    assert!(!world.contains(a));
    assert!(world.get::<&Player>(b).is_ok());
}

#[test]
fn legal_sets_have_the_expected_width() {
    let table = player_state_table().unwrap();
    let width = |state| table.config(state).legal.len();

    assert_eq!(width(PlayerState::Idle), 12);
    assert_eq!(width(PlayerState::Walking), 12);
    for state in PlayerState::DIRECTIONAL {
        assert_eq!(width(state), 12, "{state:?}");
    }
    assert_eq!(width(PlayerState::Attacking), 2);
    assert_eq!(width(PlayerState::Shield), 2);
    assert_eq!(width(PlayerState::Dead), 2);
    assert_eq!(width(PlayerState::Respawn), 1);
    assert!(table.config(PlayerState::Collision).legal.is_empty());
}
