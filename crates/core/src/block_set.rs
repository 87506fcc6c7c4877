//! Block set registry - named rosters of playable figures
//!
//! The registry is an explicit value owned by whoever runs a session; there is no
//! global shape table. Built-in sets always win over custom sets with the same id,
//! and any id that cannot be resolved degrades to the default built-in set.

use std::collections::HashSet;

use crate::figure::Figure;
use crate::rng::SimpleRng;
use crate::rotation::{generate_figures, rotation_keys};
use crate::shapes::{built_in_definitions, BlockSetDefinition, ShapeDefinition};
use crate::types::{CoordinatePair, DEFAULT_BLOCK_SET_ID};

/// Expanded block set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSet {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Every distinct rotation variant of every base shape
    pub shapes: Vec<Figure>,
    /// One figure per base shape, for display
    pub preview_shapes: Vec<Figure>,
}

impl BlockSet {
    /// Expand each base shape through the rotation generator
    pub fn from_definition(def: &BlockSetDefinition) -> Self {
        let shapes = def
            .shapes
            .iter()
            .flat_map(|s| generate_figures(&s.coordinates, s.angles.as_deref()))
            .collect();
        let preview_shapes = def
            .shapes
            .iter()
            .filter_map(|s| Figure::from_points(&s.coordinates).ok())
            .collect();
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            shapes,
            preview_shapes,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    definition: BlockSetDefinition,
    set: BlockSet,
}

impl Entry {
    fn new(definition: BlockSetDefinition) -> Self {
        let set = BlockSet::from_definition(&definition);
        Self { definition, set }
    }
}

/// Built-in plus user-defined block sets
#[derive(Debug, Clone)]
pub struct BlockSetRegistry {
    built_ins: Vec<Entry>,
    customs: Vec<Entry>,
    default_index: usize,
}

impl BlockSetRegistry {
    /// Registry with the built-in sets and no custom sets
    pub fn new() -> Self {
        let built_ins: Vec<Entry> = built_in_definitions().into_iter().map(Entry::new).collect();
        let default_index = built_ins
            .iter()
            .position(|e| e.set.id == DEFAULT_BLOCK_SET_ID)
            .unwrap_or(0);
        Self {
            built_ins,
            customs: Vec::new(),
            default_index,
        }
    }

    pub fn default_id(&self) -> &str {
        DEFAULT_BLOCK_SET_ID
    }

    fn default_set(&self) -> &BlockSet {
        &self.built_ins[self.default_index].set
    }

    fn find_custom(&self, id: &str) -> Option<&Entry> {
        self.customs.iter().find(|e| e.set.id == id)
    }

    fn find_built_in(&self, id: &str) -> Option<&Entry> {
        self.built_ins.iter().find(|e| e.set.id == id)
    }

    /// Resolve an id: built-in first, then custom, else the default set.
    ///
    /// A custom set with no playable figures also resolves to the default, so a
    /// session can always draw a piece.
    pub fn resolve(&self, id: &str) -> &BlockSet {
        if id.is_empty() {
            return self.default_set();
        }
        if let Some(entry) = self.find_built_in(id) {
            return &entry.set;
        }
        match self.find_custom(id) {
            Some(entry) if !entry.set.shapes.is_empty() => &entry.set,
            _ => self.default_set(),
        }
    }

    /// Owned copy of the resolved set
    pub fn get(&self, id: &str) -> BlockSet {
        self.resolve(id).clone()
    }

    /// True if `id` names a registered set (no fallback)
    pub fn contains(&self, id: &str) -> bool {
        self.find_built_in(id).is_some() || self.find_custom(id).is_some()
    }

    /// Built-ins in definition order, then customs in registration order
    pub fn block_sets(&self) -> impl Iterator<Item = &BlockSet> {
        self.built_ins
            .iter()
            .chain(self.customs.iter())
            .map(|e| &e.set)
    }

    /// Expanded shape roster of the resolved set
    pub fn roster(&self, id: &str) -> &[Figure] {
        &self.resolve(id).shapes
    }

    /// Uniform pick over the resolved roster. Rotation variants count individually.
    pub fn random_shape_for(&self, id: &str, rng: &mut SimpleRng) -> Figure {
        rng.pick(self.roster(id)).cloned().unwrap_or_else(Figure::unit)
    }

    /// Base shapes of an exactly matching set, empty for unknown ids
    pub fn shape_definitions(&self, id: &str) -> Vec<ShapeDefinition> {
        self.find_built_in(id)
            .or_else(|| self.find_custom(id))
            .map(|e| e.definition.shapes.clone())
            .unwrap_or_default()
    }

    /// Add or replace a custom set
    pub fn register_custom(&mut self, definition: BlockSetDefinition) {
        let entry = Entry::new(definition);
        match self.customs.iter_mut().find(|e| e.set.id == entry.set.id) {
            Some(existing) => *existing = entry,
            None => self.customs.push(entry),
        }
    }

    /// Returns true if a custom set was removed
    pub fn unregister_custom(&mut self, id: &str) -> bool {
        let before = self.customs.len();
        self.customs.retain(|e| e.set.id != id);
        self.customs.len() != before
    }

    /// Drop every custom set and register `definitions` instead
    pub fn replace_customs<I>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = BlockSetDefinition>,
    {
        self.customs.clear();
        for def in definitions {
            self.register_custom(def);
        }
    }
}

impl Default for BlockSetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Union of the rotation keys of every base shape in `definitions`
pub fn shape_key_set(definitions: &[ShapeDefinition]) -> HashSet<String> {
    let mut keys = HashSet::new();
    for def in definitions {
        append_shape_keys(&mut keys, &def.coordinates);
    }
    keys
}

/// True if any rotation of `candidate` is already in `keys`
pub fn has_shape_collision(keys: &HashSet<String>, candidate: &[CoordinatePair]) -> bool {
    rotation_keys(candidate).iter().any(|k| keys.contains(k))
}

/// Add every rotation key of `candidate` to `keys`
pub fn append_shape_keys(keys: &mut HashSet<String>, candidate: &[CoordinatePair]) {
    keys.extend(rotation_keys(candidate));
}
