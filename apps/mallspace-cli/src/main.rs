use clap::{Parser, Subcommand};
use glam::Vec3;
use mallspace_avatar::{
    AvatarInstance, AvatarScene, DebugTextPresenter, Presenter, RemoteSmoother, WalkCycle,
};
use mallspace_common::{AvatarVariant, MoveIntent, ParticipantId};
use mallspace_input::{InputState, Key};
use mallspace_presence::{PresenceConfig, PresenceSession};
use mallspace_shop::{CartService, ProductCatalog, fallback_color};
use mallspace_sim::{DoorConfig, Environment, FacingTracker, FittingRoomDoor, MovementResolver};
use mallspace_store::MemoryStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mallspace-cli", about = "CLI tool for mallspace demos")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info for every workspace member
    Info,
    /// Walk a scripted route through the mall and verify determinism
    Walk {
        /// Number of frames to simulate at 60 fps
        #[arg(short, long, default_value = "240")]
        frames: u32,
        /// Camera yaw in radians
        #[arg(short, long, default_value = "0.0")]
        yaw: f32,
    },
    /// Run several presence sessions against one in-memory store
    Session {
        /// Number of participants
        #[arg(short, long, default_value = "3")]
        participants: usize,
        /// Number of frames to simulate at 60 fps
        #[arg(short, long, default_value = "300")]
        frames: u32,
    },
    /// Seed a catalog, fill a cart, and print the summary
    Shop,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("mallspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("sim: {}", mallspace_sim::crate_info());
            println!("store: {}", mallspace_store::crate_info());
            println!("presence: {}", mallspace_presence::crate_info());
            println!("avatar: {}", mallspace_avatar::crate_info());
            println!("shop: {}", mallspace_shop::crate_info());
            println!("input: {}", mallspace_input::crate_info());
        }
        Commands::Walk { frames, yaw } => run_walk(frames, yaw),
        Commands::Session {
            participants,
            frames,
        } => run_session(participants, frames)?,
        Commands::Shop => run_shop()?,
    }

    Ok(())
}

const DT: f32 = 1.0 / 60.0;

/// Scripted route: forward toward the stairs, with a door interaction
/// partway through. Runs twice and compares traces.
fn run_walk(frames: u32, yaw: f32) {
    let env = Environment::flagship();
    let resolver = MovementResolver::default();

    let run = || {
        let mut input = InputState::default();
        input.key_down(Key::W);
        let mut facing = FacingTracker::new();
        let mut door = FittingRoomDoor::new(DoorConfig::default(), 0.0, 6.0);
        let mut pos = Vec3::new(0.0, 1.7, 12.0);
        let mut trace = Vec::with_capacity(frames as usize);
        for frame in 0..frames {
            let intent = input.intent();
            let dir = resolver.movement_direction(intent, yaw);
            pos = resolver.step(&env, pos, intent, yaw, DT);
            facing.update(intent.any(), dir);
            if frame == frames / 2 {
                input.key_down(Key::E);
            }
            if input.take_interact() {
                door.interact(pos);
            }
            door.update();
            trace.push((pos, facing.current(), door.angle()));
        }
        trace
    };

    println!("Walk demo: frames={frames}, yaw={yaw:.2}");
    let a = run();
    let b = run();
    for (frame, (pos, facing, door_angle)) in a
        .iter()
        .enumerate()
        .step_by((frames as usize / 8).max(1))
    {
        println!(
            "  frame {frame:>4}: pos=({:.2}, {:.2}, {:.2}) facing={} door={:.2}",
            pos.x,
            pos.y,
            pos.z,
            facing.as_str(),
            door_angle
        );
    }
    println!(
        "Deterministic: {}",
        if a == b { "OK" } else { "MISMATCH" }
    );
}

/// Several participants share one store: they join, wander, and leave,
/// while the first participant's view of the mall is presented.
fn run_session(participants: usize, frames: u32) -> anyhow::Result<()> {
    let participants = participants.max(1);
    println!("Session demo: participants={participants}, frames={frames}");

    let env = Environment::flagship();
    let resolver = MovementResolver::default();
    let mut store = MemoryStore::new();

    struct Walker {
        session: PresenceSession,
        position: Vec3,
        facing: FacingTracker,
        intent: MoveIntent,
        cycle: WalkCycle,
    }

    let mut walkers = Vec::with_capacity(participants);
    for i in 0..participants {
        let variant = AvatarVariant::ALL[i % AvatarVariant::ALL.len()];
        let mut session = PresenceSession::new(
            ParticipantId::new(),
            format!("walker-{i}"),
            variant,
            PresenceConfig::default(),
        );
        // Spawn line just south of the central table, clear of fixtures.
        let position = Vec3::new(i as f32 * 3.0 - 3.0, 1.7, 10.0);
        session.join(&mut store, position, 0.0)?;
        walkers.push(Walker {
            session,
            position,
            facing: FacingTracker::new(),
            intent: MoveIntent {
                forward: true,
                left: i % 2 == 1,
                ..MoveIntent::NONE
            },
            cycle: WalkCycle::new(),
        });
    }

    let mut smoothers: std::collections::BTreeMap<ParticipantId, RemoteSmoother> =
        std::collections::BTreeMap::new();
    let mut local_pose = Default::default();

    for frame in 0..frames {
        let now = f64::from(frame) * f64::from(DT);
        for walker in &mut walkers {
            let dir = resolver.movement_direction(walker.intent, 0.0);
            walker.position = resolver.step(&env, walker.position, walker.intent, 0.0, DT);
            let facing = walker.facing.update(walker.intent.any(), dir);
            walker
                .session
                .tick(&mut store, walker.position, facing, walker.intent.any(), now);
        }

        // Smooth the first walker's view of everyone else.
        let local = &mut walkers[0];
        local_pose = local.cycle.advance(DT, local.intent.any());
        for (id, remote) in local.session.roster() {
            let smoother = smoothers.entry(*id).or_default();
            smoother.set_target(remote.state.position, remote.state.facing.yaw_radians());
            smoother.step();
        }
    }

    // Final frame from the first walker's point of view.
    let mut scene = AvatarScene::default();
    let local = &walkers[0];
    scene.avatars.push(AvatarInstance {
        id: local.session.id(),
        username: "walker-0".into(),
        position: local.position,
        yaw: local.facing.current().yaw_radians(),
        variant: AvatarVariant::ALL[0],
        pose: local_pose,
        is_local: true,
    });
    for (id, remote) in local.session.roster() {
        let (position, yaw) = smoothers.entry(*id).or_default().step();
        scene.avatars.push(AvatarInstance {
            id: *id,
            username: remote.state.username.clone(),
            position,
            yaw,
            variant: remote.state.variant,
            pose: Default::default(),
            is_local: false,
        });
    }

    print!("{}", DebugTextPresenter::new().present(&scene));

    for walker in &mut walkers {
        let stats = walker.session.stats();
        println!(
            "  {} publishes={} heartbeats={} roster={}",
            walker.session.id(),
            stats.publishes,
            stats.heartbeats,
            walker.session.roster().len()
        );
        walker.session.leave(&mut store);
    }
    println!("Presence rows after leave: {}", store.presence_count());
    Ok(())
}

const CATALOG_SEED: &str = r#"[
    {"id": "tee-classic", "name": "Classic Tee", "price": 19.99,
     "category": "tops", "position_x": 4.0, "position_y": -6.0,
     "created_at": 1.0},
    {"id": "jeans-slim", "name": "Slim Jeans", "price": 49.99,
     "category": "bottoms", "position_x": 5.5, "position_y": -6.0,
     "created_at": 2.0},
    {"id": "sneaker-low", "name": "Low Sneaker", "price": 79.99,
     "category": "shoes", "position_x": 7.0, "position_y": -6.0,
     "created_at": 3.0}
]"#;

fn run_shop() -> anyhow::Result<()> {
    let mut store = MemoryStore::new();
    let count = ProductCatalog::seed_from_json(&mut store, CATALOG_SEED)?;
    println!("Shop demo: {count} products seeded");
    for product in ProductCatalog::list(&store)? {
        println!(
            "  {} ({}) ${:.2} color={}",
            product.name,
            product.category,
            product.price,
            fallback_color(&product.id)
        );
    }

    let shopper = ParticipantId::new();
    CartService::add(&mut store, shopper, "tee-classic", 2, 0.0)?;
    CartService::add(&mut store, shopper, "sneaker-low", 1, 1.0)?;
    CartService::add(&mut store, shopper, "tee-classic", 1, 2.0)?;

    let summary = CartService::summary(&store, shopper)?;
    println!("Cart: {} items", summary.total_quantity);
    for line in &summary.lines {
        let name = line
            .product
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("(missing)");
        println!("  {name} x{} = ${:.2}", line.item.quantity, line.subtotal());
    }
    println!("Total: ${:.2}", summary.total_price);
    Ok(())
}
