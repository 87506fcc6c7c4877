//! Blueprint module - ASCII authoring format for custom shapes
//!
//! A blueprint is multi-line text, one board row per line. `#`, `X`, `x`, `1` and `@`
//! mark filled cells; any other character is empty. Tabs count as one space,
//! trailing whitespace is ignored and blank lines are dropped.
//!
//! ```text
//! #..
//! ###
//! ```

use thiserror::Error;

use crate::figure::normalize;
use crate::types::{CoordinatePair, BLUEPRINT_MAX_DIMENSION};

/// Blueprint validation failures, in the order they are checked
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlueprintError {
    #[error("Provide at least one row of characters.")]
    Empty,
    #[error("Blueprints are limited to {max} rows.")]
    TooManyRows { rows: usize, max: usize },
    #[error("Each row is limited to {max} characters.")]
    RowTooWide { row: usize, width: usize, max: usize },
    #[error("Use #, X, or 1 to mark filled cells.")]
    NoFilledCells,
}

impl BlueprintError {
    pub fn code(&self) -> &'static str {
        match self {
            BlueprintError::Empty => "empty_blueprint",
            BlueprintError::TooManyRows { .. } => "too_many_rows",
            BlueprintError::RowTooWide { .. } => "row_too_wide",
            BlueprintError::NoFilledCells => "no_filled_cells",
        }
    }
}

/// Successful parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlueprint {
    /// Canonical `#`/`.` rendering of the normalized shape
    pub blueprint: String,
    /// Normalized filled cells, in reading order
    pub coordinates: Vec<CoordinatePair>,
    /// Widest row of the input, before normalization
    pub width: usize,
    /// Non-blank input rows
    pub height: usize,
}

/// Characters that mark a filled cell
#[inline]
pub fn is_filled_blueprint_char(ch: char) -> bool {
    matches!(ch, '#' | 'X' | 'x' | '1' | '@')
}

/// Parse a blueprint into normalized coordinates plus its canonical re-rendering.
///
/// # Examples
///
/// ```
/// use blockfit_core::blueprint::parse_shape_blueprint;
///
/// let parsed = parse_shape_blueprint("  .X\n  XX\n").unwrap();
/// assert_eq!(parsed.blueprint, ".#\n##");
/// assert_eq!(parsed.coordinates.len(), 3);
/// ```
pub fn parse_shape_blueprint(text: &str) -> Result<ParsedBlueprint, BlueprintError> {
    let rows: Vec<String> = text
        .split('\n')
        .map(|line| line.replace('\t', " ").trim_end().to_string())
        .filter(|line| !line.trim().is_empty())
        .collect();

    if rows.is_empty() {
        return Err(BlueprintError::Empty);
    }
    if rows.len() > BLUEPRINT_MAX_DIMENSION {
        return Err(BlueprintError::TooManyRows {
            rows: rows.len(),
            max: BLUEPRINT_MAX_DIMENSION,
        });
    }

    let mut coordinates = Vec::new();
    let mut width = 0usize;
    for (row_index, row) in rows.iter().enumerate() {
        let row_width = row.chars().count();
        if row_width > BLUEPRINT_MAX_DIMENSION {
            return Err(BlueprintError::RowTooWide {
                row: row_index,
                width: row_width,
                max: BLUEPRINT_MAX_DIMENSION,
            });
        }
        width = width.max(row_width);
        for (col, ch) in row.chars().enumerate() {
            if is_filled_blueprint_char(ch) {
                coordinates.push(CoordinatePair::new(col as i32, row_index as i32));
            }
        }
    }

    if coordinates.is_empty() {
        return Err(BlueprintError::NoFilledCells);
    }

    let coordinates = normalize(&coordinates);
    Ok(ParsedBlueprint {
        blueprint: shape_to_blueprint(&coordinates),
        coordinates,
        width,
        height: rows.len(),
    })
}

/// Render points as a `height x width` grid of `.` with `#` at each point.
///
/// Points are rendered relative to their normalized bounding box. Empty input
/// renders as an empty string.
pub fn shape_to_blueprint(points: &[CoordinatePair]) -> String {
    let points = normalize(points);
    let (Some(max_x), Some(max_y)) = (
        points.iter().map(|p| p.x).max(),
        points.iter().map(|p| p.y).max(),
    ) else {
        return String::new();
    };

    let width = (max_x + 1) as usize;
    let height = (max_y + 1) as usize;
    let mut grid = vec![vec!['.'; width]; height];
    for p in &points {
        grid[p.y as usize][p.x as usize] = '#';
    }

    grid.iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_offsets_and_blank_lines() {
        let parsed = parse_shape_blueprint("\n\n   #\n   ##\n\n").unwrap();
        assert_eq!(parsed.blueprint, "#.\n##");
        assert_eq!(
            parsed.coordinates,
            vec![
                CoordinatePair::new(0, 0),
                CoordinatePair::new(0, 1),
                CoordinatePair::new(1, 1)
            ]
        );
        assert_eq!(parsed.height, 2);
        assert_eq!(parsed.width, 5);
    }

    #[test]
    fn test_parse_accepts_all_fill_chars() {
        let parsed = parse_shape_blueprint("#Xx1@").unwrap();
        assert_eq!(parsed.coordinates.len(), 5);
        assert_eq!(parsed.blueprint, "#####");
    }

    #[test]
    fn test_parse_handles_crlf_and_tabs() {
        let parsed = parse_shape_blueprint("\t#\r\n\t#\r\n").unwrap();
        assert_eq!(parsed.blueprint, "#\n#");
    }

    #[test]
    fn test_parse_errors_in_order() {
        assert_eq!(parse_shape_blueprint(""), Err(BlueprintError::Empty));
        assert_eq!(parse_shape_blueprint("  \n\t\n"), Err(BlueprintError::Empty));

        let tall = "#\n".repeat(9);
        assert_eq!(
            parse_shape_blueprint(&tall),
            Err(BlueprintError::TooManyRows { rows: 9, max: 8 })
        );

        assert_eq!(
            parse_shape_blueprint("#\n.........#"),
            Err(BlueprintError::RowTooWide { row: 1, width: 10, max: 8 })
        );

        assert_eq!(parse_shape_blueprint("...\n.o."), Err(BlueprintError::NoFilledCells));
    }

    #[test]
    fn test_error_messages_and_codes() {
        let err = BlueprintError::TooManyRows { rows: 9, max: 8 };
        assert_eq!(err.to_string(), "Blueprints are limited to 8 rows.");
        assert_eq!(err.code(), "too_many_rows");
        assert_eq!(BlueprintError::NoFilledCells.code(), "no_filled_cells");
    }

    #[test]
    fn test_eight_by_eight_is_allowed() {
        let full = "########\n".repeat(8);
        let parsed = parse_shape_blueprint(&full).unwrap();
        assert_eq!(parsed.coordinates.len(), 64);
    }

    #[test]
    fn test_shape_to_blueprint() {
        let pts = [
            CoordinatePair::new(1, 0),
            CoordinatePair::new(0, 1),
            CoordinatePair::new(1, 1),
            CoordinatePair::new(2, 1),
        ];
        assert_eq!(shape_to_blueprint(&pts), ".#.\n###");
        assert_eq!(shape_to_blueprint(&[]), "");
    }
}
