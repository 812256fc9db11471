use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must not be empty")]
    Empty,
    #[error("hex color '{value}' must have 3, 6 or 8 digits")]
    HexLength { value: String },
    #[error("hex color '{value}' contains a non-hex digit")]
    HexDigit { value: String },
    #[error("unknown color name '{value}'")]
    UnknownName { value: String },
}

const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("darkgray", [169, 169, 169, 255]),
    ("lightgray", [211, 211, 211, 255]),
    ("brown", [165, 42, 42, 255]),
    ("pink", [255, 192, 203, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("navy", [0, 0, 128, 255]),
    ("teal", [0, 128, 128, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("olive", [128, 128, 0, 255]),
    ("silver", [192, 192, 192, 255]),
    ("gold", [255, 215, 0, 255]),
    ("transparent", [0, 0, 0, 0]),
];

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(trimmed, hex);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, [r, g, b, a])| Color::rgba(*r, *g, *b, *a))
            .ok_or_else(|| ColorParseError::UnknownName {
                value: trimmed.to_string(),
            })
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Color::parse(value)
    }
}

fn parse_hex(original: &str, hex: &str) -> Result<Color, ColorParseError> {
    let digits = hex
        .chars()
        .map(|ch| ch.to_digit(16).map(|digit| digit as u8))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ColorParseError::HexDigit {
            value: original.to_string(),
        })?;

    match digits.as_slice() {
        [r, g, b] => Ok(Color::rgba(r * 17, g * 17, b * 17, 255)),
        [r1, r2, g1, g2, b1, b2] => Ok(Color::rgba(
            r1 * 16 + r2,
            g1 * 16 + g2,
            b1 * 16 + b2,
            255,
        )),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Color::rgba(
            r1 * 16 + r2,
            g1 * 16 + g2,
            b1 * 16 + b2,
            a1 * 16 + a2,
        )),
        _ => Err(ColorParseError::HexLength {
            value: original.to_string(),
        }),
    }
}
