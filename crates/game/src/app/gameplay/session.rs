use engine::{Color, DrawSurface, Rect, Vec2};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::catalog::LevelCatalog;
use super::collision::{CheckOptions, CollisionEngine, CollisionSettings, Direction, Outcome};
use super::level::{load_level, LevelParseError, LevelScene, ObjectId, ObjectKind, Playfield};

pub const SELECTION_FILL: &str = "purple";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Won { has_next_level: bool },
    Lost,
    Complete,
}

impl PlayState {
    pub fn is_playing(self) -> bool {
        self == PlayState::Playing
    }
}

/// Hooks for whatever presents win/lose screens.
pub trait SessionObserver {
    fn on_level_loaded(&mut self, _index: usize, _name: &str) {}
    fn on_win(&mut self, _has_next_level: bool) {}
    fn on_lose(&mut self) {}
    fn on_game_complete(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl SessionObserver for LoggingObserver {
    fn on_level_loaded(&mut self, index: usize, name: &str) {
        info!(level = index + 1, name, "level_loaded");
    }

    fn on_win(&mut self, has_next_level: bool) {
        info!(has_next_level, "level_won");
    }

    fn on_lose(&mut self) {
        info!("character_died");
    }

    fn on_game_complete(&mut self) {
        info!("game_complete");
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("level index {index} is out of range (catalog holds {count} levels)")]
    NoSuchLevel { index: usize, count: usize },
    #[error(transparent)]
    Level(#[from] LevelParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceResult {
    Loaded(usize),
    GameComplete,
}

#[derive(Debug, Clone, PartialEq)]
struct Selection {
    id: ObjectId,
    restore_fill: String,
}

/// Owns the active level, the selection and the play state.
pub struct GameSession {
    catalog: LevelCatalog,
    level_index: usize,
    playfield: Playfield,
    scene: LevelScene,
    selection: Option<Selection>,
    state: PlayState,
    engine: CollisionEngine,
    observer: Box<dyn SessionObserver>,
}

impl GameSession {
    pub fn start(
        catalog: LevelCatalog,
        start_index: usize,
        playfield: Playfield,
        settings: CollisionSettings,
        mut observer: Box<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        let scene = load_from_catalog(&catalog, start_index, playfield)?;
        if let Some(entry) = catalog.get(start_index) {
            observer.on_level_loaded(start_index, &entry.name);
        }
        Ok(Self {
            catalog,
            level_index: start_index,
            playfield,
            scene,
            selection: None,
            state: PlayState::Playing,
            engine: CollisionEngine::new(settings),
            observer,
        })
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn scene(&self) -> &LevelScene {
        &self.scene
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn level_name(&self) -> &str {
        self.catalog
            .get(self.level_index)
            .map(|entry| entry.name.as_str())
            .unwrap_or_default()
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selection.as_ref().map(|selection| selection.id)
    }

    /// Tracks the live window size. The current geometry stays as loaded;
    /// the next reload resolves expressions against the new size.
    pub fn set_playfield(&mut self, playfield: Playfield) {
        if playfield == self.playfield {
            return;
        }
        debug!(
            width = playfield.width,
            height = playfield.height,
            "playfield_resized"
        );
        self.playfield = playfield;
        self.scene.set_playfield(playfield);
    }

    /// Rebuilds the current level from its source. On failure the previous
    /// scene stays active.
    pub fn reload_level(&mut self) -> Result<(), SessionError> {
        self.load_index(self.level_index)
    }

    pub fn restart_game(&mut self) -> Result<(), SessionError> {
        self.load_index(0)
    }

    pub fn advance_level(&mut self) -> Result<AdvanceResult, SessionError> {
        let next = self.level_index + 1;
        if next >= self.catalog.len() {
            self.state = PlayState::Complete;
            self.clear_selection();
            self.observer.on_game_complete();
            return Ok(AdvanceResult::GameComplete);
        }
        self.load_index(next)?;
        Ok(AdvanceResult::Loaded(next))
    }

    fn load_index(&mut self, index: usize) -> Result<(), SessionError> {
        match load_from_catalog(&self.catalog, index, self.playfield) {
            Ok(scene) => {
                self.scene = scene;
                self.level_index = index;
                self.selection = None;
                self.state = PlayState::Playing;
                let name = self
                    .catalog
                    .get(index)
                    .map(|entry| entry.name.as_str())
                    .unwrap_or_default();
                self.observer.on_level_loaded(index, name);
                Ok(())
            }
            Err(error) => {
                let path = self
                    .catalog
                    .get(index)
                    .map(|entry| entry.path.display().to_string())
                    .unwrap_or_default();
                warn!(level = index + 1, path, error = %error, "level_load_failed");
                Err(error)
            }
        }
    }

    /// Pointer press at `point`. Selects the first moveable object under the
    /// point; a press over nothing just clears the selection.
    pub fn select_at(&mut self, point: Vec2) {
        if !self.state.is_playing() {
            return;
        }
        self.clear_selection();

        let Some(id) = self.scene.moveable_at(point) else {
            return;
        };
        if let Some(object) = self.scene.object_mut(id) {
            let restore_fill = std::mem::replace(&mut object.fill_color, SELECTION_FILL.to_string());
            debug!(id = %id, name = %object.name, "object_selected");
            self.selection = Some(Selection { id, restore_fill });
        }
    }

    fn clear_selection(&mut self) {
        if let Some(selection) = self.selection.take() {
            if let Some(object) = self.scene.object_mut(selection.id) {
                object.fill_color = selection.restore_fill;
            }
        }
    }

    /// Applies one step per held direction, each checked independently.
    pub fn apply_held_moves(&mut self, directions: &[Direction]) {
        for direction in directions {
            self.move_selected(*direction);
        }
    }

    pub fn move_selected(&mut self, direction: Direction) -> Option<Outcome> {
        if !self.state.is_playing() {
            return None;
        }
        let id = self.selected()?;
        let candidate = self.scene.object(id)?;
        let outcome = self
            .engine
            .check_move(&self.scene, candidate, direction, CheckOptions::default());

        if id == self.scene.character_id() {
            self.apply_character_outcome(direction, outcome);
            return Some(outcome);
        }

        let offset = direction.offset(self.engine.settings().step);
        match outcome {
            Outcome::Clear => self.translate(id, offset),
            Outcome::Carry { character } => {
                self.translate(id, offset);
                self.translate(character, offset);
            }
            Outcome::BoundaryHit
            | Outcome::BlockedBy(_)
            | Outcome::Hazard(_)
            | Outcome::SnapTo(_) => {}
        }
        Some(outcome)
    }

    /// One advancement tick for the character: fall if possible, otherwise
    /// walk right.
    pub fn advance_character(&mut self) -> Option<Outcome> {
        if !self.state.is_playing() {
            return None;
        }
        let fall = self.check_character(Direction::Down);
        if self.apply_character_outcome(Direction::Down, fall) {
            return Some(fall);
        }
        let walk = self.check_character(Direction::Right);
        self.apply_character_outcome(Direction::Right, walk);
        Some(walk)
    }

    fn check_character(&self, direction: Direction) -> Outcome {
        self.engine.check_move(
            &self.scene,
            self.scene.character(),
            direction,
            CheckOptions::default(),
        )
    }

    /// Returns whether the outcome changed the character or the play state.
    fn apply_character_outcome(&mut self, direction: Direction, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Clear => {
                let offset = direction.offset(self.engine.settings().step);
                let character = self.scene.character_id();
                self.translate(character, offset);
                true
            }
            Outcome::SnapTo(position) => {
                self.scene.character_mut().position = position;
                true
            }
            Outcome::Hazard(hazard) => {
                debug!(hazard = %hazard, "hazard_contact");
                self.state = PlayState::Lost;
                self.observer.on_lose();
                true
            }
            Outcome::BlockedBy(other) if self.is_goal(other) => {
                let has_next_level = self.level_index + 1 < self.catalog.len();
                self.state = PlayState::Won { has_next_level };
                self.observer.on_win(has_next_level);
                true
            }
            Outcome::BlockedBy(_) | Outcome::BoundaryHit | Outcome::Carry { .. } => false,
        }
    }

    fn is_goal(&self, id: ObjectId) -> bool {
        self.scene
            .object(id)
            .is_some_and(|object| object.kind == ObjectKind::Goal)
    }

    fn translate(&mut self, id: ObjectId, offset: Vec2) {
        if let Some(object) = self.scene.object_mut(id) {
            object.position.x += offset.x;
            object.position.y += offset.y;
        }
    }

    /// Clears the playfield and draws every object in level order.
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        let (width, height) = surface.size();
        surface.clear(Rect::new(0.0, 0.0, width as f32, height as f32));

        for object in self.scene.objects() {
            let rect = object.rect();
            if let Ok(fill) = Color::parse(&object.fill_color) {
                surface.fill_rect(rect, fill);
            }
            if object.stroke_color.is_empty() {
                continue;
            }
            if let Ok(stroke) = Color::parse(&object.stroke_color) {
                surface.stroke_rect(rect, stroke);
            }
        }
    }
}

fn load_from_catalog(
    catalog: &LevelCatalog,
    index: usize,
    playfield: Playfield,
) -> Result<LevelScene, SessionError> {
    let entry = catalog.get(index).ok_or(SessionError::NoSuchLevel {
        index,
        count: catalog.len(),
    })?;
    Ok(load_level(&entry.source, playfield)?)
}
