//! Rotation module - quarter-turn variants of a polyomino
//!
//! One quarter turn maps `p` to `(p.y, width - 1 - p.x)`, with `width` taken from
//! the shape being rotated at each step (not the base shape). Every intermediate
//! result is renormalized, and variants are deduplicated by [`canonical_key`] in
//! angle order 0 -> 90 -> 180 -> 270.

use std::collections::HashSet;

use crate::figure::{normalize, Figure};
use crate::types::{CoordinatePair, QUARTER_TURN_ANGLES};

/// Reduce requested clockwise angles to distinct quarter-turn counts (0..=3).
///
/// `None` or an empty slice means all four angles. Angles that are not multiples
/// of 90 are discarded; if nothing survives the result is `[0]`.
pub fn normalize_angles(angles: Option<&[i32]>) -> Vec<u8> {
    let source = match angles {
        Some(a) if !a.is_empty() => a,
        _ => &QUARTER_TURN_ANGLES[..],
    };

    let mut turns: Vec<u8> = Vec::with_capacity(4);
    for &angle in source {
        let deg = angle.rem_euclid(360);
        if deg % 90 != 0 {
            continue;
        }
        let t = (deg / 90) as u8;
        if !turns.contains(&t) {
            turns.push(t);
        }
    }

    if turns.is_empty() {
        turns.push(0);
    }
    turns
}

/// One quarter turn, not renormalized
pub fn rotate_quarter_turn(points: &[CoordinatePair]) -> Vec<CoordinatePair> {
    let Some(max_x) = points.iter().map(|p| p.x).max() else {
        return Vec::new();
    };
    let width = max_x + 1;
    points
        .iter()
        .map(|p| CoordinatePair::new(p.y, width - 1 - p.x))
        .collect()
}

/// Normalize, turn `turns` times, renormalize
pub fn rotate_turns(points: &[CoordinatePair], turns: u8) -> Vec<CoordinatePair> {
    let mut rotated = normalize(points);
    for _ in 0..turns {
        rotated = rotate_quarter_turn(&rotated);
    }
    normalize(&rotated)
}

/// Sorted `"x,y;x,y;..."` key. Two point sets are equivalent iff their keys match.
///
/// # Examples
///
/// ```
/// use blockfit_core::rotation::canonical_key;
/// use blockfit_core::types::CoordinatePair;
///
/// let a = [CoordinatePair::new(1, 0), CoordinatePair::new(0, 0)];
/// let b = [CoordinatePair::new(0, 0), CoordinatePair::new(1, 0)];
/// assert_eq!(canonical_key(&a), "0,0;1,0");
/// assert_eq!(canonical_key(&a), canonical_key(&b));
/// ```
pub fn canonical_key(points: &[CoordinatePair]) -> String {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| (p.y, p.x));
    sorted
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// Distinct rotation variants of `points` for the requested angles.
///
/// First-seen wins; later angles whose canonical key was already produced are dropped.
pub fn generate_rotations(points: &[CoordinatePair], angles: Option<&[i32]>) -> Vec<Vec<CoordinatePair>> {
    let mut variants = Vec::new();
    let mut seen = HashSet::new();
    for turns in normalize_angles(angles) {
        let rotated = rotate_turns(points, turns);
        if seen.insert(canonical_key(&rotated)) {
            variants.push(rotated);
        }
    }
    variants
}

/// [`generate_rotations`] as figures. Empty input yields no figures.
pub fn generate_figures(points: &[CoordinatePair], angles: Option<&[i32]>) -> Vec<Figure> {
    generate_rotations(points, angles)
        .into_iter()
        .filter_map(|variant| Figure::new(variant).ok())
        .collect()
}

/// Per-angle report used by shape authoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationDescriptor {
    pub angle: i32,
    pub coordinates: Vec<CoordinatePair>,
    pub key: String,
    /// Same shape as 0° (never true for 0° itself)
    pub is_duplicate_of_base: bool,
    /// Same shape as some earlier angle in the 0 -> 270 scan
    pub is_redundant: bool,
}

/// Describe all four angles of `points` without filtering anything.
pub fn describe_shape_rotations(points: &[CoordinatePair]) -> Vec<RotationDescriptor> {
    let base_key = canonical_key(&normalize(points));
    let mut seen = HashSet::new();
    QUARTER_TURN_ANGLES
        .iter()
        .map(|&angle| {
            let coordinates = rotate_turns(points, (angle / 90) as u8);
            let key = canonical_key(&coordinates);
            let is_redundant = !seen.insert(key.clone());
            RotationDescriptor {
                angle,
                is_duplicate_of_base: angle != 0 && key == base_key,
                is_redundant,
                coordinates,
                key,
            }
        })
        .collect()
}

/// Distinct canonical keys of `points` across all four angles, in scan order
pub fn rotation_keys(points: &[CoordinatePair]) -> Vec<String> {
    describe_shape_rotations(points)
        .into_iter()
        .filter(|d| !d.is_redundant)
        .map(|d| d.key)
        .collect()
}

/// Sanitize an author's angle selection.
///
/// Reduces mod 360, keeps multiples of 90, dedups, always includes 0, sorts
/// ascending and caps at four entries.
///
/// # Examples
///
/// ```
/// use blockfit_core::rotation::ensure_rotation_angles;
///
/// assert_eq!(ensure_rotation_angles(&[]), vec![0]);
/// assert_eq!(ensure_rotation_angles(&[450, -90, 45, 90]), vec![0, 90, 270]);
/// ```
pub fn ensure_rotation_angles(angles: &[i32]) -> Vec<i32> {
    let mut out: Vec<i32> = Vec::with_capacity(4);
    for &angle in angles {
        let deg = angle.rem_euclid(360);
        if deg % 90 == 0 && !out.contains(&deg) {
            out.push(deg);
        }
    }
    if !out.contains(&0) {
        out.push(0);
    }
    out.sort_unstable();
    out.truncate(QUARTER_TURN_ANGLES.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<CoordinatePair> {
        raw.iter().copied().map(CoordinatePair::from).collect()
    }

    #[test]
    fn test_normalize_angles() {
        assert_eq!(normalize_angles(None), vec![0, 1, 2, 3]);
        assert_eq!(normalize_angles(Some(&[])), vec![0, 1, 2, 3]);
        assert_eq!(normalize_angles(Some(&[0])), vec![0]);
        assert_eq!(normalize_angles(Some(&[-90, 270, 360, 45])), vec![3, 0]);
        assert_eq!(normalize_angles(Some(&[45, 10])), vec![0]);
    }

    #[test]
    fn test_rotate_quarter_turn_uses_current_width() {
        // Horizontal domino turns vertical
        let out = rotate_quarter_turn(&pts(&[(0, 0), (1, 0)]));
        assert_eq!(out, pts(&[(0, 1), (0, 0)]));

        // J: width 3, so (x, y) -> (y, 2 - x)
        let out = rotate_turns(&pts(&[(0, 0), (0, 1), (1, 1), (2, 1)]), 1);
        assert_eq!(out, pts(&[(0, 2), (1, 2), (1, 1), (1, 0)]));
    }

    #[test]
    fn test_four_turns_is_identity() {
        let shape = pts(&[(0, 0), (0, 1), (0, 2), (1, 2)]);
        assert_eq!(canonical_key(&rotate_turns(&shape, 4)), canonical_key(&shape));
    }

    #[test]
    fn test_square_collapses_to_one_variant() {
        let square = pts(&[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(generate_rotations(&square, None).len(), 1);
        assert_eq!(generate_rotations(&square, Some(&[0, 90, 180, 270])).len(), 1);
    }

    #[test]
    fn test_l_shape_has_four_variants() {
        let l = pts(&[(0, 0), (0, 1), (0, 2), (1, 2)]);
        let variants = generate_rotations(&l, None);
        assert_eq!(variants.len(), 4);
        let keys: HashSet<_> = variants.iter().map(|v| canonical_key(v)).collect();
        assert_eq!(keys.len(), 4);
        // First variant is the 0° shape itself
        assert_eq!(canonical_key(&variants[0]), canonical_key(&l));
    }

    #[test]
    fn test_line_has_two_variants() {
        let line = pts(&[(0, 0), (0, 1), (0, 2)]);
        let variants = generate_rotations(&line, None);
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1], pts(&[(0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn test_describe_flags_symmetry() {
        // S/Z piece maps onto itself under 180°
        let z = pts(&[(0, 0), (1, 0), (1, 1), (2, 1)]);
        let d = describe_shape_rotations(&z);
        assert_eq!(d.len(), 4);
        assert_eq!(d.iter().map(|x| x.angle).collect::<Vec<_>>(), vec![0, 90, 180, 270]);
        assert!(!d[0].is_duplicate_of_base && !d[0].is_redundant);
        assert!(!d[1].is_duplicate_of_base && !d[1].is_redundant);
        assert!(d[2].is_duplicate_of_base && d[2].is_redundant);
        assert!(!d[3].is_duplicate_of_base && d[3].is_redundant);

        assert_eq!(rotation_keys(&z).len(), 2);
    }

    #[test]
    fn test_describe_normalizes_offset_input() {
        let d = describe_shape_rotations(&pts(&[(5, 5), (6, 5)]));
        assert_eq!(d[0].coordinates, pts(&[(0, 0), (1, 0)]));
    }

    #[test]
    fn test_ensure_rotation_angles() {
        assert_eq!(ensure_rotation_angles(&[90]), vec![0, 90]);
        assert_eq!(ensure_rotation_angles(&[180, 0, 180]), vec![0, 180]);
        assert_eq!(ensure_rotation_angles(&[270, 180, 90, 0, 720]), vec![0, 90, 180, 270]);
    }
}
