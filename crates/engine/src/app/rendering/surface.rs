use super::Color;

/// Axis-aligned rectangle in playfield pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

pub trait DrawSurface {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, region: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelSpan {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl PixelSpan {
    fn from_rect(rect: Rect) -> Self {
        Self {
            left: rect.x.round() as i32,
            top: rect.y.round() as i32,
            right: rect.right().round() as i32,
            bottom: rect.bottom().round() as i32,
        }
    }

    fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

/// RGBA8 frame buffer view that clips every write to the frame bounds.
pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    clear_color: Color,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32, clear_color: Color) -> Self {
        Self {
            frame,
            width,
            height,
            clear_color,
        }
    }

    fn clipped(&self, span: PixelSpan) -> PixelSpan {
        PixelSpan {
            left: span.left.max(0),
            top: span.top.max(0),
            right: span.right.min(self.width as i32),
            bottom: span.bottom.min(self.height as i32),
        }
    }

    fn fill_span(&mut self, span: PixelSpan, color: Color, blend: bool) {
        let span = self.clipped(span);
        if span.is_empty() {
            return;
        }
        for y in span.top..span.bottom {
            for x in span.left..span.right {
                if blend {
                    blend_pixel_rgba_clipped(self.frame, self.width as usize, x, y, color);
                } else {
                    write_pixel_rgba_clipped(self.frame, self.width as usize, x, y, color);
                }
            }
        }
    }
}

impl DrawSurface for FrameCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, region: Rect) {
        let clear_color = self.clear_color;
        self.fill_span(PixelSpan::from_rect(region), clear_color, false);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.a == 0 {
            return;
        }
        self.fill_span(PixelSpan::from_rect(rect), color, color.a < 255);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let span = PixelSpan::from_rect(rect);
        if span.is_empty() || color.a == 0 {
            return;
        }
        let width = self.width as usize;
        let (last_x, last_y) = (span.right - 1, span.bottom - 1);
        for x in span.left..span.right {
            write_pixel_rgba_clipped(self.frame, width, x, span.top, color);
            write_pixel_rgba_clipped(self.frame, width, x, last_y, color);
        }
        for y in span.top..span.bottom {
            write_pixel_rgba_clipped(self.frame, width, span.left, y, color);
            write_pixel_rgba_clipped(self.frame, width, last_x, y, color);
        }
    }
}

fn pixel_byte_range(frame_len: usize, width: usize, x: i32, y: i32) -> Option<(usize, usize)> {
    if x < 0 || y < 0 || x as usize >= width {
        return None;
    }
    let pixel_offset = (y as usize).checked_mul(width)?.checked_add(x as usize)?;
    let byte_offset = pixel_offset.checked_mul(4)?;
    let end = byte_offset.checked_add(4)?;
    (end <= frame_len).then_some((byte_offset, end))
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: Color) {
    if let Some((start, end)) = pixel_byte_range(frame.len(), width, x, y) {
        frame[start..end].copy_from_slice(&color.to_array());
    }
}

fn blend_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: Color) {
    let Some((start, _)) = pixel_byte_range(frame.len(), width, x, y) else {
        return;
    };
    let alpha = color.a as u32;
    let inverse = 255 - alpha;
    for (channel, source) in [color.r, color.g, color.b].into_iter().enumerate() {
        let dest = frame[start + channel] as u32;
        frame[start + channel] = ((source as u32 * alpha + dest * inverse + 127) / 255) as u8;
    }
    frame[start + 3] = 255;
}
