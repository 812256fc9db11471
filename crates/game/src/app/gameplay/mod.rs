mod catalog;
mod collision;
mod expr;
mod level;
mod scene_impl;
mod session;

use engine::Scene;

pub(crate) use catalog::{CatalogError, LevelCatalog};
pub(crate) use collision::CollisionSettings;
pub(crate) use level::Playfield;
pub(crate) use session::{GameSession, LoggingObserver, SessionError};

use scene_impl::GameplayScene;

pub(crate) fn build_scene(session: GameSession) -> Box<dyn Scene> {
    Box::new(GameplayScene::new(session))
}
