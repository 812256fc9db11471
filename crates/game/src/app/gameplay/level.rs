use std::collections::HashSet;
use std::fmt;

use engine::{Color, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::expr::{evaluate, Bindings, ExpressionError, WIN_HEIGHT, WIN_WIDTH};

pub const CHARACTER_NAME: &str = "character";
pub const HAZARD_NAME: &str = "death";
pub const GOAL_NAME: &str = "end";
const DEFAULT_FILL_COLOR: &str = "white";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw geometry field: a JSON number is used as-is, a JSON string goes
/// through the expression evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Literal(f32),
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    pub x: Dimension,
    pub y: Dimension,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSceneObject {
    pub name: String,
    pub id: ObjectId,
    pub pos: RawPosition,
    pub width: Dimension,
    pub height: Dimension,
    #[serde(rename = "strokeColor", default)]
    pub stroke_color: String,
    #[serde(rename = "fillColor", default = "default_fill_color")]
    pub fill_color: String,
    #[serde(default)]
    pub moveable: bool,
}

fn default_fill_color() -> String {
    DEFAULT_FILL_COLOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSource {
    pub scene_data: Vec<RawSceneObject>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Character,
    Hazard,
    Goal,
    Solid,
}

impl ObjectKind {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case(CHARACTER_NAME) {
            ObjectKind::Character
        } else if name.eq_ignore_ascii_case(HAZARD_NAME) {
            ObjectKind::Hazard
        } else if name.eq_ignore_ascii_case(GOAL_NAME) {
            ObjectKind::Goal
        } else {
            ObjectKind::Solid
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub stroke_color: String,
    pub fill_color: String,
    pub moveable: bool,
}

impl SceneObject {
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_window_size((width, height): (u32, u32)) -> Option<Self> {
        (width > 0 && height > 0).then(|| Self::new(width as f32, height as f32))
    }

    pub fn bindings(&self) -> Bindings {
        Bindings::new()
            .with(WIN_WIDTH, self.width as f64)
            .with(WIN_HEIGHT, self.height as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelParseError {
    #[error("malformed level json at {path}: {message}")]
    Json { path: String, message: String },
    #[error("object {id} ('{name}') field {field}: {source}")]
    Expression {
        id: ObjectId,
        name: String,
        field: &'static str,
        #[source]
        source: ExpressionError,
    },
    #[error("object {id} ('{name}') has invalid {field} {value}")]
    InvalidGeometry {
        id: ObjectId,
        name: String,
        field: &'static str,
        value: f32,
    },
    #[error("object {id} ('{name}') has invalid {field} '{value}'")]
    InvalidColor {
        id: ObjectId,
        name: String,
        field: &'static str,
        value: String,
    },
    #[error("duplicate object id {id}")]
    DuplicateId { id: ObjectId },
    #[error("level has no object named 'character'")]
    MissingCharacter,
    #[error("level has more than one object named 'character' (ids {ids:?})")]
    MultipleCharacters { ids: Vec<ObjectId> },
}

pub fn parse_level_json(raw: &str) -> Result<LevelSource, LevelParseError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize::<_, LevelSource>(&mut deserializer).map_err(|error| {
        let path = error.path().to_string();
        let message = error.into_inner().to_string();
        LevelParseError::Json { path, message }
    })
}

/// Fully resolved geometry for one level plus the character reference.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelScene {
    objects: Vec<SceneObject>,
    character_index: usize,
    playfield: Playfield,
}

impl LevelScene {
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    pub fn character_id(&self) -> ObjectId {
        self.objects[self.character_index].id
    }

    pub fn character(&self) -> &SceneObject {
        &self.objects[self.character_index]
    }

    pub fn character_mut(&mut self) -> &mut SceneObject {
        &mut self.objects[self.character_index]
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    pub fn set_playfield(&mut self, playfield: Playfield) {
        self.playfield = playfield;
    }

    /// First moveable object under `point`, in level order.
    pub fn moveable_at(&self, point: Vec2) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|object| object.moveable && object.rect().contains(point.x, point.y))
            .map(|object| object.id)
    }
}

pub fn load_level(
    source: &LevelSource,
    playfield: Playfield,
) -> Result<LevelScene, LevelParseError> {
    let bindings = playfield.bindings();
    let mut seen_ids = HashSet::new();
    let mut objects = Vec::with_capacity(source.scene_data.len());

    for raw in &source.scene_data {
        if !seen_ids.insert(raw.id) {
            return Err(LevelParseError::DuplicateId { id: raw.id });
        }
        objects.push(resolve_object(raw, &bindings)?);
    }

    let character_indices = objects
        .iter()
        .enumerate()
        .filter(|(_, object)| object.kind == ObjectKind::Character)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    let character_index = match character_indices.as_slice() {
        [] => return Err(LevelParseError::MissingCharacter),
        [index] => *index,
        _ => {
            let ids = character_indices
                .iter()
                .map(|index| objects[*index].id)
                .collect();
            return Err(LevelParseError::MultipleCharacters { ids });
        }
    };

    Ok(LevelScene {
        objects,
        character_index,
        playfield,
    })
}

fn resolve_object(
    raw: &RawSceneObject,
    bindings: &Bindings,
) -> Result<SceneObject, LevelParseError> {
    let resolve = |field: &'static str, dimension: &Dimension| -> Result<f32, LevelParseError> {
        let value = match dimension {
            Dimension::Literal(value) => *value,
            Dimension::Expr(expression) => {
                evaluate(expression, bindings).map_err(|source| LevelParseError::Expression {
                    id: raw.id,
                    name: raw.name.clone(),
                    field,
                    source,
                })? as f32
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid_geometry(raw, field, value))
        }
    };

    let x = resolve("pos.x", &raw.pos.x)?;
    let y = resolve("pos.y", &raw.pos.y)?;
    let width = resolve("width", &raw.width)?;
    let height = resolve("height", &raw.height)?;
    if width < 0.0 {
        return Err(invalid_geometry(raw, "width", width));
    }
    if height < 0.0 {
        return Err(invalid_geometry(raw, "height", height));
    }

    if !raw.stroke_color.trim().is_empty() {
        validate_color(raw, "strokeColor", &raw.stroke_color)?;
    }
    validate_color(raw, "fillColor", &raw.fill_color)?;

    Ok(SceneObject {
        id: raw.id,
        name: raw.name.clone(),
        kind: ObjectKind::from_name(&raw.name),
        position: Vec2::new(x, y),
        width,
        height,
        stroke_color: raw.stroke_color.clone(),
        fill_color: raw.fill_color.clone(),
        moveable: raw.moveable,
    })
}

fn invalid_geometry(raw: &RawSceneObject, field: &'static str, value: f32) -> LevelParseError {
    LevelParseError::InvalidGeometry {
        id: raw.id,
        name: raw.name.clone(),
        field,
        value,
    }
}

fn validate_color(
    raw: &RawSceneObject,
    field: &'static str,
    value: &str,
) -> Result<(), LevelParseError> {
    Color::parse(value)
        .map(|_| ())
        .map_err(|_| LevelParseError::InvalidColor {
            id: raw.id,
            name: raw.name.clone(),
            field,
            value: value.to_string(),
        })
}
