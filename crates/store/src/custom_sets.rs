//! User-authored block sets
//!
//! All custom sets live in one JSON array under [`CUSTOM_BLOCK_SETS_KEY`]. The
//! document is hand-editable, so every read normalizes it: bad records are
//! repaired or dropped rather than failing the whole list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use blockfit_core::block_set::{has_shape_collision, shape_key_set};
use blockfit_core::blueprint::{parse_shape_blueprint, shape_to_blueprint, BlueprintError};
use blockfit_core::figure::{extent, normalize, FigureError};
use blockfit_core::rotation::ensure_rotation_angles;
use blockfit_core::shapes::{BlockSetDefinition, ShapeDefinition};
use blockfit_core::{BlockSetRegistry, SimpleRng};
use blockfit_types::{CoordinatePair, BLUEPRINT_MAX_DIMENSION};

use crate::clock::{Clock, SystemClock};
use crate::kv::{KeyValueStore, StoreError};

pub const CUSTOM_BLOCK_SETS_KEY: &str = "blockgame.customBlockSets";
pub const CUSTOM_SET_ID_PREFIX: &str = "custom";
pub const CUSTOM_SHAPE_ID_PREFIX: &str = "shape";
pub const DEFAULT_SET_NAME: &str = "Custom Block Set";
pub const DEFAULT_SHAPE_LABEL: &str = "Custom Shape";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: i32,
    pub y: i32,
}

impl From<CoordinatePair> for PointRecord {
    fn from(p: CoordinatePair) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomShapeRecord {
    pub id: String,
    pub label: String,
    /// Canonical `#`/`.` rendering of `points`
    pub blueprint: String,
    /// Normalized
    pub points: Vec<PointRecord>,
    /// Always contains 0, sorted, at most four entries
    pub rotation_angles: Vec<i32>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl CustomShapeRecord {
    pub fn coordinates(&self) -> Vec<CoordinatePair> {
        self.points
            .iter()
            .map(|p| CoordinatePair::new(p.x, p.y))
            .collect()
    }

    pub fn to_definition(&self) -> ShapeDefinition {
        ShapeDefinition::with_angles(self.coordinates(), self.rotation_angles.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomBlockSetRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub shapes: Vec<CustomShapeRecord>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl CustomBlockSetRecord {
    pub fn to_definition(&self) -> BlockSetDefinition {
        BlockSetDefinition {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            shapes: self.shapes.iter().map(CustomShapeRecord::to_definition).collect(),
        }
    }

    /// Rotation keys of every shape already in the set
    pub fn shape_keys(&self) -> HashSet<String> {
        shape_key_set(&self.to_definition().shapes)
    }
}

/// New shape from the authoring flow. A non-empty blueprint wins over coordinates.
#[derive(Debug, Clone, Default)]
pub struct ShapeInput {
    pub label: String,
    pub blueprint: Option<String>,
    pub coordinates: Option<Vec<CoordinatePair>>,
    /// Defaults to `[0]`
    pub rotation_angles: Option<Vec<i32>>,
}

#[derive(Debug, Error)]
pub enum ShapeInputError {
    #[error("Shape input must include a blueprint or coordinates.")]
    MissingInput,
    #[error(transparent)]
    Blueprint(#[from] BlueprintError),
    #[error(transparent)]
    Figure(#[from] FigureError),
    #[error("Shapes are limited to {max}x{max} cells (got {width}x{height}).")]
    TooLarge { width: u64, height: u64, max: usize },
    #[error("That shape (or one of its rotations) already exists in this set.")]
    Collision,
    #[error("no custom block set with id {0}")]
    UnknownSet(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShapeInputError {
    pub fn code(&self) -> &'static str {
        match self {
            ShapeInputError::MissingInput => "missing_input",
            ShapeInputError::Blueprint(e) => e.code(),
            ShapeInputError::Figure(e) => e.code(),
            ShapeInputError::TooLarge { .. } => "shape_too_large",
            ShapeInputError::Collision => "shape_collision",
            ShapeInputError::UnknownSet(_) => "unknown_set",
            ShapeInputError::Store(e) => e.code(),
        }
    }
}

fn sanitize(raw: Option<&str>, fallback: &str) -> String {
    let trimmed = raw.unwrap_or("").trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// True when the bounding box fits the blueprint grid
fn within_blueprint_bounds(points: &[CoordinatePair]) -> bool {
    let max = BLUEPRINT_MAX_DIMENSION as u64;
    matches!(extent(points), Some((w, h)) if w <= max && h <= max)
}

fn timestamp(value: &Value, fallback: u64) -> u64 {
    match value.as_f64() {
        Some(v) if v.is_finite() && v >= 0.0 => v as u64,
        _ => fallback,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

pub struct CustomSetStore<S, C = SystemClock> {
    store: S,
    clock: C,
    ids: SimpleRng,
}

impl<S: KeyValueStore> CustomSetStore<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> CustomSetStore<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        let ids = SimpleRng::new(clock.now_millis() as u32);
        Self { store, clock, ids }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        format!(
            "{}-{}-{}",
            prefix,
            to_base36(self.clock.now_millis()),
            self.ids.next_range(1_000_000)
        )
    }

    /// All sets, sorted by name
    pub fn list(&mut self) -> Vec<CustomBlockSetRecord> {
        let mut records = self.read_records();
        records.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        records
    }

    pub fn get(&mut self, id: &str) -> Option<CustomBlockSetRecord> {
        self.read_records().into_iter().find(|r| r.id == id)
    }

    pub fn create(&mut self, name: &str, description: &str) -> Result<CustomBlockSetRecord, StoreError> {
        let now = self.clock.now_millis();
        let record = CustomBlockSetRecord {
            id: self.next_id(CUSTOM_SET_ID_PREFIX),
            name: sanitize(Some(name), DEFAULT_SET_NAME),
            description: description.trim().to_string(),
            shapes: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let mut records = self.read_records();
        records.push(record.clone());
        self.write_records(&records)?;
        Ok(record)
    }

    /// Insert or replace by id. The stored copy is normalized and its `updated_at` refreshed.
    pub fn save(&mut self, record: &CustomBlockSetRecord) -> Result<CustomBlockSetRecord, StoreError> {
        let value = serde_json::to_value(record)?;
        let mut normalized = self.normalize_set(&value);
        normalized.updated_at = self.clock.now_millis();

        let mut records = self.read_records();
        match records.iter_mut().find(|r| r.id == normalized.id) {
            Some(existing) => *existing = normalized.clone(),
            None => records.push(normalized.clone()),
        }
        self.write_records(&records)?;
        Ok(normalized)
    }

    /// Returns false when no set had that id
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let records = self.read_records();
        let before = records.len();
        let next: Vec<_> = records.into_iter().filter(|r| r.id != id).collect();
        if next.len() == before {
            return Ok(false);
        }
        self.write_records(&next)?;
        Ok(true)
    }

    /// Parse `input` into a fresh shape record without storing it
    pub fn build_shape_record(&mut self, input: &ShapeInput) -> Result<CustomShapeRecord, ShapeInputError> {
        let (coordinates, blueprint) = match (input.blueprint.as_deref(), input.coordinates.as_ref()) {
            (Some(text), _) if !text.is_empty() => {
                let parsed = parse_shape_blueprint(text)?;
                (parsed.coordinates, parsed.blueprint)
            }
            (_, Some(points)) => {
                let Some((width, height)) = extent(points) else {
                    return Err(FigureError::Empty.into());
                };
                if !within_blueprint_bounds(points) {
                    return Err(ShapeInputError::TooLarge {
                        width,
                        height,
                        max: BLUEPRINT_MAX_DIMENSION,
                    });
                }
                let normalized = normalize(points);
                let blueprint = shape_to_blueprint(&normalized);
                (normalized, blueprint)
            }
            _ => return Err(ShapeInputError::MissingInput),
        };

        let now = self.clock.now_millis();
        let angles = input.rotation_angles.clone().unwrap_or_else(|| vec![0]);
        Ok(CustomShapeRecord {
            id: self.next_id(CUSTOM_SHAPE_ID_PREFIX),
            label: sanitize(Some(input.label.as_str()), DEFAULT_SHAPE_LABEL),
            blueprint,
            points: coordinates.into_iter().map(PointRecord::from).collect(),
            rotation_angles: ensure_rotation_angles(&angles),
            created_at: now,
            updated_at: now,
        })
    }

    /// Append a shape to a set, refusing rotations of shapes already present
    pub fn add_shape(&mut self, set_id: &str, input: &ShapeInput) -> Result<CustomShapeRecord, ShapeInputError> {
        let mut record = self
            .get(set_id)
            .ok_or_else(|| ShapeInputError::UnknownSet(set_id.to_string()))?;
        let shape = self.build_shape_record(input)?;
        if has_shape_collision(&record.shape_keys(), &shape.coordinates()) {
            return Err(ShapeInputError::Collision);
        }
        record.shapes.push(shape.clone());
        self.save(&record)?;
        Ok(shape)
    }

    /// Returns false when the set or the shape does not exist
    pub fn remove_shape(&mut self, set_id: &str, shape_id: &str) -> Result<bool, StoreError> {
        let Some(mut record) = self.get(set_id) else {
            return Ok(false);
        };
        let before = record.shapes.len();
        record.shapes.retain(|s| s.id != shape_id);
        if record.shapes.len() == before {
            return Ok(false);
        }
        self.save(&record)?;
        Ok(true)
    }

    /// Flip one rotation angle of a shape on or off.
    ///
    /// 0° and the last remaining angle can never be switched off. Returns the
    /// resulting angles, or None when the set or shape does not exist.
    pub fn toggle_rotation(
        &mut self,
        set_id: &str,
        shape_id: &str,
        angle: i32,
    ) -> Result<Option<Vec<i32>>, StoreError> {
        let Some(mut record) = self.get(set_id) else {
            return Ok(None);
        };
        let now = self.clock.now_millis();
        let Some(shape) = record.shapes.iter_mut().find(|s| s.id == shape_id) else {
            return Ok(None);
        };

        let deg = angle.rem_euclid(360);
        let mut angles = shape.rotation_angles.clone();
        if angles.contains(&deg) {
            if deg == 0 || angles.len() == 1 {
                return Ok(Some(angles));
            }
            angles.retain(|&a| a != deg);
        } else {
            angles.push(deg);
        }
        shape.rotation_angles = ensure_rotation_angles(&angles);
        shape.updated_at = now;
        let result = shape.rotation_angles.clone();

        self.save(&record)?;
        Ok(Some(result))
    }

    /// Registry definitions of every stored set
    pub fn definitions(&mut self) -> Vec<BlockSetDefinition> {
        self.read_records()
            .iter()
            .map(CustomBlockSetRecord::to_definition)
            .collect()
    }

    /// Replace the registry's custom sets with the stored ones
    pub fn sync_registry(&mut self, registry: &mut BlockSetRegistry) {
        registry.replace_customs(self.definitions());
    }

    fn read_records(&mut self) -> Vec<CustomBlockSetRecord> {
        let raw = match self.store.get(CUSTOM_BLOCK_SETS_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(e) => {
                eprintln!("[Store] failed to read custom block sets: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items.iter().map(|v| self.normalize_set(v)).collect(),
            Ok(_) => {
                eprintln!("[Store] custom block sets document is not an array; ignoring");
                Vec::new()
            }
            Err(e) => {
                eprintln!("[Store] ignoring malformed custom block sets: {}", e);
                Vec::new()
            }
        }
    }

    fn write_records(&mut self, records: &[CustomBlockSetRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.store.set(CUSTOM_BLOCK_SETS_KEY, &json)
    }

    fn normalize_set(&mut self, value: &Value) -> CustomBlockSetRecord {
        let now = self.clock.now_millis();
        let created_at = timestamp(&value["createdAt"], now);
        let updated_at = timestamp(&value["updatedAt"], created_at);
        let shapes: Vec<CustomShapeRecord> = value["shapes"]
            .as_array()
            .map(|items| items.iter().filter_map(|s| self.normalize_shape(s)).collect())
            .unwrap_or_default();
        let id = match non_empty_str(&value["id"]) {
            Some(id) => id.to_string(),
            None => self.next_id(CUSTOM_SET_ID_PREFIX),
        };

        CustomBlockSetRecord {
            id,
            name: sanitize(value["name"].as_str(), DEFAULT_SET_NAME),
            description: value["description"].as_str().unwrap_or("").to_string(),
            shapes,
            created_at,
            updated_at,
        }
    }

    fn normalize_shape(&mut self, value: &Value) -> Option<CustomShapeRecord> {
        let raw_points: Vec<CoordinatePair> = value["points"]
            .as_array()?
            .iter()
            .filter_map(|p| {
                let x = p["x"].as_f64().filter(|v| v.is_finite())?;
                let y = p["y"].as_f64().filter(|v| v.is_finite())?;
                Some(CoordinatePair::new(x.floor() as i32, y.floor() as i32))
            })
            .collect();
        if raw_points.is_empty() {
            return None;
        }
        if !within_blueprint_bounds(&raw_points) {
            eprintln!("[Store] dropping oversized custom shape");
            return None;
        }
        let points = normalize(&raw_points);

        let angles: Vec<i32> = value["rotationAngles"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|a| a.as_f64().filter(|v| v.is_finite()).map(|v| v as i32))
                    .collect()
            })
            .unwrap_or_else(|| vec![0]);

        let now = self.clock.now_millis();
        let created_at = timestamp(&value["createdAt"], now);
        let updated_at = timestamp(&value["updatedAt"], created_at);
        let id = match non_empty_str(&value["id"]) {
            Some(id) => id.to_string(),
            None => self.next_id(CUSTOM_SHAPE_ID_PREFIX),
        };
        let blueprint = match non_empty_str(&value["blueprint"]) {
            Some(b) => b.to_string(),
            None => shape_to_blueprint(&points),
        };

        Some(CustomShapeRecord {
            id,
            label: sanitize(value["label"].as_str(), DEFAULT_SHAPE_LABEL),
            blueprint,
            points: points.into_iter().map(PointRecord::from).collect(),
            rotation_angles: ensure_rotation_angles(&angles),
            created_at,
            updated_at,
        })
    }
}
