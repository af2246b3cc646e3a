//! Blorp headless runner
//!
//! Runs the simulation without a renderer: loads tuning, plays a fixed
//! number of frames with idle input (restarting after each game over) and
//! reports how the level generator fared.
//!
//! Usage: `blorp [config.json] [seed] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blorp (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => blorp::Config::load(&path),
        None => {
            let config = blorp::Config::default();
            config.validate().map(|_| config)
        }
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid config: {err}");
            std::process::exit(2);
        }
    };

    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let frames: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(60 * 60);

    if let Err(err) = run(config, seed, frames) {
        log::error!("Run aborted: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(config: blorp::Config, seed: u64, frames: u32) -> Result<(), blorp::SimError> {
    use blorp::consts::FRAME_MS;
    use blorp::sim::{Session, TickInput, tick};

    let mut session = Session::new(config, seed)?;
    let idle = TickInput::default();
    let restart = TickInput {
        restart: true,
        ..Default::default()
    };

    let mut games = 1u32;
    let mut rows = 0u64;
    let mut enemies = 0u64;
    for _ in 0..frames {
        if session.is_game_over() {
            rows += session.world.rows_spawned();
            enemies += session.enemy_spawns;
            games += 1;
            tick(&mut session, &restart, FRAME_MS)?;
        } else {
            tick(&mut session, &idle, FRAME_MS)?;
        }
    }
    rows += session.world.rows_spawned();
    enemies += session.enemy_spawns;

    println!(
        "seed {seed}: {frames} frames, {games} games, {rows} rows generated, {enemies} enemy spawns, {} live entities",
        session.entities.len()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}
