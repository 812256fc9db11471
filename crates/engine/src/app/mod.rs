mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod timer;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{Color, ColorParseError, DrawSurface, FrameCanvas, Rect, Renderer};
pub use scene::{InputSnapshot, Scene, SceneCommand, Vec2};
pub use timer::IntervalTimer;
