use serde::{Deserialize, Serialize};
use tilewalk_common::Aabb;

/// Kind of a map tile, as written in the map file.
///
/// Three plain floor colors plus a 3x3 autotile wall set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Red,
    Green,
    Blue,
    Center,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

/// Static properties of a tile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    /// Integer code used in map files.
    pub code: i32,
    /// Structural tiles collide; decorative ones never do.
    pub structural: bool,
    /// Cell of the tile sheet, as (column, row).
    pub sheet_cell: (u8, u8),
}

impl TileKind {
    pub const ALL: [TileKind; 12] = [
        TileKind::Red,
        TileKind::Green,
        TileKind::Blue,
        TileKind::Center,
        TileKind::Top,
        TileKind::TopRight,
        TileKind::Right,
        TileKind::BottomRight,
        TileKind::Bottom,
        TileKind::BottomLeft,
        TileKind::Left,
        TileKind::TopLeft,
    ];

    /// Per-kind properties, independent of variant order.
    pub fn info(self) -> KindInfo {
        let (code, structural, sheet_cell) = match self {
            TileKind::Red => (0, false, (0, 0)),
            TileKind::Green => (1, false, (0, 1)),
            TileKind::Blue => (2, false, (0, 2)),
            TileKind::Center => (3, true, (2, 1)),
            TileKind::Top => (4, true, (2, 0)),
            TileKind::TopRight => (5, true, (3, 0)),
            TileKind::Right => (6, true, (3, 1)),
            TileKind::BottomRight => (7, true, (3, 2)),
            TileKind::Bottom => (8, true, (2, 2)),
            TileKind::BottomLeft => (9, true, (1, 2)),
            TileKind::Left => (10, true, (1, 1)),
            TileKind::TopLeft => (11, true, (1, 0)),
        };
        KindInfo {
            code,
            structural,
            sheet_cell,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.info().code == code)
    }

    pub fn code(self) -> i32 {
        self.info().code
    }

    pub fn is_structural(self) -> bool {
        self.info().structural
    }

    /// Source rectangle of this kind inside a tile sheet of uniform cells.
    pub fn clip_rect(self, tile_width: f32, tile_height: f32) -> Aabb {
        let (col, row) = self.info().sheet_cell;
        Aabb::new(
            f32::from(col) * tile_width,
            f32::from(row) * tile_height,
            tile_width,
            tile_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_round_trip_and_are_unique() {
        let codes: HashSet<i32> = TileKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), TileKind::ALL.len());
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(TileKind::from_code(12), None);
        assert_eq!(TileKind::from_code(-1), None);
    }

    #[test]
    fn three_decorative_nine_structural() {
        let structural = TileKind::ALL.iter().filter(|k| k.is_structural()).count();
        assert_eq!(structural, 9);
        assert!(!TileKind::Red.is_structural());
        assert!(!TileKind::Green.is_structural());
        assert!(!TileKind::Blue.is_structural());
        assert!(TileKind::Center.is_structural());
        assert!(TileKind::TopLeft.is_structural());
    }

    #[test]
    fn clip_rects_follow_sheet_layout() {
        assert_eq!(
            TileKind::Green.clip_rect(80.0, 80.0),
            Aabb::new(0.0, 80.0, 80.0, 80.0)
        );
        assert_eq!(
            TileKind::BottomRight.clip_rect(80.0, 80.0),
            Aabb::new(240.0, 160.0, 80.0, 80.0)
        );
    }

    #[test]
    fn sheet_cells_are_distinct() {
        let cells: HashSet<(u8, u8)> = TileKind::ALL.iter().map(|k| k.info().sheet_cell).collect();
        assert_eq!(cells.len(), 12);
    }
}
