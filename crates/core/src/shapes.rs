//! Built-in block set definitions
//!
//! Base shapes are stored in one orientation; the registry expands them into
//! their rotation variants. Coordinates are `(x, y)` with y growing downward.

use crate::types::CoordinatePair;

/// A base shape plus the clockwise angles it may be offered at.
///
/// `angles: None` means all four quarter turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub coordinates: Vec<CoordinatePair>,
    pub angles: Option<Vec<i32>>,
}

impl ShapeDefinition {
    pub fn new(coordinates: Vec<CoordinatePair>) -> Self {
        Self {
            coordinates,
            angles: None,
        }
    }

    pub fn with_angles(coordinates: Vec<CoordinatePair>, angles: Vec<i32>) -> Self {
        Self {
            coordinates,
            angles: Some(angles),
        }
    }
}

/// Identity and base shapes of one block set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSetDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub shapes: Vec<ShapeDefinition>,
}

fn pts(raw: &[(i32, i32)]) -> Vec<CoordinatePair> {
    raw.iter().copied().map(CoordinatePair::from).collect()
}

fn classic_shapes() -> Vec<ShapeDefinition> {
    vec![
        // Single
        ShapeDefinition::new(pts(&[(0, 0)])),
        // Lines of 2, 3 and 4
        ShapeDefinition::new(pts(&[(0, 0), (0, 1)])),
        ShapeDefinition::new(pts(&[(0, 0), (0, 1), (0, 2)])),
        ShapeDefinition::new(pts(&[(0, 0), (0, 1), (0, 2), (0, 3)])),
        // 2x2 square
        ShapeDefinition::with_angles(pts(&[(0, 0), (0, 1), (1, 0), (1, 1)]), vec![0]),
        // Corner
        ShapeDefinition::new(pts(&[(0, 0), (0, 1), (1, 1)])),
        // J
        ShapeDefinition::new(pts(&[(0, 0), (0, 1), (1, 1), (2, 1)])),
        // L
        ShapeDefinition::new(pts(&[(0, 0), (0, 1), (0, 2), (1, 2)])),
        // T
        ShapeDefinition::new(pts(&[(0, 1), (1, 1), (2, 1), (1, 0)])),
        // Z
        ShapeDefinition::new(pts(&[(0, 0), (1, 0), (1, 1), (2, 1)])),
    ]
}

fn big_square() -> ShapeDefinition {
    let mut cells = Vec::with_capacity(9);
    for y in 0..3 {
        for x in 0..3 {
            cells.push(CoordinatePair::new(x, y));
        }
    }
    ShapeDefinition::with_angles(cells, vec![0])
}

/// Built-in sets, in display order. The first entry is the default set.
pub fn built_in_definitions() -> Vec<BlockSetDefinition> {
    let classic = classic_shapes();
    let mut expanded = classic.clone();
    expanded.push(big_square());

    vec![
        BlockSetDefinition {
            id: "classic".to_string(),
            name: "Classic".to_string(),
            description: "Balanced starter pieces that keep the board approachable.".to_string(),
            shapes: classic,
        },
        BlockSetDefinition {
            id: "expanded".to_string(),
            name: "Expanded".to_string(),
            description: "Adds a chunky 3x3 block for big clears (and bigger jams).".to_string(),
            shapes: expanded,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_BLOCK_SET_ID;

    #[test]
    fn test_default_set_comes_first() {
        let defs = built_in_definitions();
        assert_eq!(defs[0].id, DEFAULT_BLOCK_SET_ID);
        assert_eq!(defs.len(), 2);
    }

    #[test]
    fn test_expanded_extends_classic() {
        let defs = built_in_definitions();
        assert_eq!(defs[0].shapes.len(), 10);
        assert_eq!(defs[1].shapes.len(), 11);
        assert_eq!(&defs[1].shapes[..10], &defs[0].shapes[..]);
        assert_eq!(defs[1].shapes[10].coordinates.len(), 9);
    }

    #[test]
    fn test_base_shapes_are_normalized() {
        for def in built_in_definitions() {
            for shape in &def.shapes {
                assert_eq!(shape.coordinates.iter().map(|p| p.x).min(), Some(0));
                assert_eq!(shape.coordinates.iter().map(|p| p.y).min(), Some(0));
            }
        }
    }
}
