use engine::{Color, DrawSurface, InputAction, InputSnapshot, Rect, Scene, SceneCommand};
use tracing::{info, warn};

use super::collision::Direction;
use super::level::Playfield;
use super::session::{AdvanceResult, GameSession, PlayState};

const WON_BANNER: Color = Color::rgba(40, 170, 80, 150);
const LOST_BANNER: Color = Color::rgba(200, 40, 40, 150);
const COMPLETE_BANNER: Color = Color::rgba(255, 215, 0, 150);
const BANNER_HEIGHT: f32 = 80.0;

const HELD_MOVES: [(InputAction, Direction); 4] = [
    (InputAction::MoveUp, Direction::Up),
    (InputAction::MoveDown, Direction::Down),
    (InputAction::MoveLeft, Direction::Left),
    (InputAction::MoveRight, Direction::Right),
];

/// Adapts a [`GameSession`] to the engine loop.
pub struct GameplayScene {
    session: GameSession,
}

impl GameplayScene {
    pub fn new(session: GameSession) -> Self {
        Self { session }
    }

    #[cfg(test)]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn restart_level(&mut self) -> SceneCommand {
        match self.session.reload_level() {
            Ok(()) => {
                info!(
                    level = self.session.level_index() + 1,
                    name = self.session.level_name(),
                    "level_restarted"
                );
                SceneCommand::ResetTimers
            }
            Err(_) => SceneCommand::None,
        }
    }

    fn confirm(&mut self) -> SceneCommand {
        match self.session.state() {
            PlayState::Won { .. } => match self.session.advance_level() {
                Ok(AdvanceResult::Loaded(_)) => SceneCommand::ResetTimers,
                Ok(AdvanceResult::GameComplete) => SceneCommand::None,
                Err(error) => {
                    warn!(error = %error, "level_advance_failed");
                    SceneCommand::None
                }
            },
            PlayState::Complete => match self.session.restart_game() {
                Ok(()) => SceneCommand::ResetTimers,
                Err(_) => SceneCommand::None,
            },
            PlayState::Playing | PlayState::Lost => self.restart_level(),
        }
    }

    fn banner_color(&self) -> Option<Color> {
        match self.session.state() {
            PlayState::Playing => None,
            PlayState::Won { .. } => Some(WON_BANNER),
            PlayState::Lost => Some(LOST_BANNER),
            PlayState::Complete => Some(COMPLETE_BANNER),
        }
    }
}

impl Scene for GameplayScene {
    fn update(&mut self, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }
        if let Some(playfield) = Playfield::from_window_size(input.window_size()) {
            self.session.set_playfield(playfield);
        }

        if input.restart_pressed() {
            return self.restart_level();
        }
        if input.confirm_pressed() {
            return self.confirm();
        }

        if input.left_click_pressed() {
            if let Some(cursor) = input.cursor_position_px() {
                self.session.select_at(cursor);
            }
        }

        let held = HELD_MOVES
            .iter()
            .filter(|(action, _)| input.is_down(*action))
            .map(|(_, direction)| *direction)
            .collect::<Vec<_>>();
        self.session.apply_held_moves(&held);

        SceneCommand::None
    }

    fn advance(&mut self) -> SceneCommand {
        self.session.advance_character();
        SceneCommand::None
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        self.session.render(surface);

        if let Some(color) = self.banner_color() {
            let (width, height) = surface.size();
            let top = (height as f32 - BANNER_HEIGHT) / 2.0;
            let banner = Rect::new(0.0, top.max(0.0), width as f32, BANNER_HEIGHT);
            surface.fill_rect(banner, color);
            surface.stroke_rect(banner, Color::WHITE);
        }
    }

    fn title(&self) -> Option<String> {
        let status = match self.session.state() {
            PlayState::Playing => "playing",
            PlayState::Won {
                has_next_level: true,
            } => "won (Enter for next level)",
            PlayState::Won {
                has_next_level: false,
            } => "won (Enter to finish)",
            PlayState::Lost => "lost (R to restart)",
            PlayState::Complete => "all levels complete (Enter to play again)",
        };
        Some(format!(
            "Blockhop - level {}/{} - {}",
            self.session.level_index() + 1,
            self.session.level_count(),
            status
        ))
    }
}
