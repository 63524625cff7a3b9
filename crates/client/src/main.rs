//! Region map terminal viewer.
//!
//! Hosts one region map session in a terminal: content comes from the
//! built-in tables or a data directory, the overworld and save data are a
//! demo stand-in configured through the environment, and the session draws
//! into a [`VirtualDisplay`] that ratatui renders every frame.
//!
//! # Examples
//!
//! ```bash
//! # Normal map opened from the field in Seashore City
//! cargo run -p region-map-client
//!
//! # Fly map from Goldenrod City
//! REGION_MAP_MODE=fly REGION_MAP_PLAYER_SECTION=0x36 cargo run -p region-map-client
//! ```

mod config;
mod input;
mod logging;
mod presentation;
mod world;

use anyhow::Result;
use region_map_core::{RegionMapError, RegionMapSession, SessionRequest, VirtualDisplay};

use crate::config::CliConfig;
use crate::presentation::{EventLoop, Outcome, terminal};
use crate::world::World;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    logging::setup_logging(config.log_dir.as_deref(), config.session_id.as_deref())?;

    tracing::info!("Starting region map viewer");
    tracing::info!("Mode: {}", config.mode);

    let world = World::load(&config)?;
    let env = world.env();

    let request = SessionRequest::new(config.mode);
    let session = match RegionMapSession::open(request, world.config.clone(), &env) {
        Ok(session) => session,
        Err(error) => {
            tracing::error!(code = error.error_code(), "Failed to open region map: {}", error);
            println!("region map could not open ({error}); resuming {}", error.fallback());
            return Ok(());
        }
    };

    let outcome = {
        let (mut tui, _guard) = terminal::init()?;
        EventLoop::new(session, env, VirtualDisplay::new())
            .run(&mut tui)
            .await?
    };

    match outcome {
        Outcome::Exited(exit) => {
            tracing::info!(?exit, "Region map closed");
            match exit.warp {
                Some(warp) => println!("region map closed: {} with warp {:?}", exit.continuation, warp),
                None => println!("region map closed: {}", exit.continuation),
            }
        }
        Outcome::Aborted(error) => {
            println!("region map aborted ({error}); resuming {}", error.fallback());
        }
        Outcome::Quit => println!("viewer quit"),
    }

    tracing::info!("Viewer shutdown complete");
    Ok(())
}
