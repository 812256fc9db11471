use engine::{resolve_app_paths, LoopConfig, Scene, StartupError};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{
    self, CatalogError, CollisionSettings, GameSession, LevelCatalog, LoggingObserver, Playfield,
    SessionError,
};

const START_LEVEL_ENV_VAR: &str = "BLOCKHOP_START_LEVEL";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Blockhop Startup ===");

    let app_paths = resolve_app_paths()?;
    info!(
        root = %app_paths.root.display(),
        levels_dir = %app_paths.levels_dir.display(),
        "paths_resolved"
    );

    let config = LoopConfig::default();
    let playfield = Playfield::new(config.window_width as f32, config.window_height as f32);
    let catalog = LevelCatalog::discover(&app_paths.levels_dir)?;
    catalog.validate(playfield)?;

    let start_index = std::env::var(START_LEVEL_ENV_VAR)
        .ok()
        .map(|raw| parse_start_level(&raw, catalog.len()))
        .unwrap_or_default();
    let session = GameSession::start(
        catalog,
        start_index,
        playfield,
        CollisionSettings::default(),
        Box::new(LoggingObserver),
    )?;

    Ok(AppWiring {
        config,
        scene: gameplay::build_scene(session),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// 1-based level number to catalog index. Anything unusable falls back to
/// the first level.
fn parse_start_level(raw: &str, level_count: usize) -> usize {
    match raw.trim().parse::<usize>() {
        Ok(level) if (1..=level_count).contains(&level) => level - 1,
        _ => {
            warn!(value = raw, level_count, "invalid_start_level");
            0
        }
    }
}
