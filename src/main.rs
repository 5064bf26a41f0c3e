use anyhow::Context;
use animated_fsm::engine::{EventScript, HeadlessHost};
use animated_fsm::{despawn_player, player_frame_system, spawn_player, Player, PlayerConfig};
use clap::Parser;
use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "animated_fsm", about = "Headless player state machine runner")]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seed for the idle animation draw
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// TOML file overriding player tuning
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Event script, e.g. "move-right:40,attack:20,none:30"
    #[arg(long, default_value = "move-right:60,attack:30,none:60,defend:40,move-up-left:20,die")]
    script: EventScript,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 450.0)]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PlayerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PlayerConfig::default(),
    };

    let mut host = HeadlessHost::new(args.width, args.height);
    let mut world = World::new();
    let player_entity = spawn_player(
        &mut world,
        &mut host,
        "Player",
        config,
        StdRng::seed_from_u64(args.seed),
    )
    .context("spawning player")?;

    let mut last_state = None;
    for frame in 0..args.frames {
        host.begin_frame();
        let event = args.script.event_at(frame);
        player_frame_system(&mut world, event, &mut host);

        let player = world.get::<&Player>(player_entity)?;
        if last_state != Some(player.state()) {
            info!(
                frame,
                event = <&'static str>::from(event),
                state = player.state_name(),
                "state changed"
            );
            last_state = Some(player.state());
        }
    }

    {
        let player = world.get::<&Player>(player_entity)?;
        info!(
            state = player.state_name(),
            seconds_in_state = player.fsm.elapsed,
            simulated_seconds = host.clock.elapsed,
            stamina = player.stamina,
            mana = player.mana,
            health = player.body.health,
            lives = player.lives,
            x = player.body.position.x,
            y = player.body.position.y,
            "final"
        );
    }

    despawn_player(&mut world, player_entity, &mut host)?;
    info!(textures = host.loaded_textures(), "shut down");
    Ok(())
}
