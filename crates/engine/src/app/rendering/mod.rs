mod color;
mod renderer;
mod surface;

pub use color::{Color, ColorParseError};
pub use renderer::Renderer;
pub use surface::{DrawSurface, FrameCanvas, Rect};
