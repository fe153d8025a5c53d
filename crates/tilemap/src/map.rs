use std::path::Path;

use serde::{Deserialize, Serialize};
use tilewalk_common::{Aabb, Vec2};
use tilewalk_geom::{Collider, Penetration, first_hit, overlaps};

use crate::kind::TileKind;

/// Map loading parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Width of one tile in world units.
    pub tile_width: f32,
    /// Height of one tile in world units.
    pub tile_height: f32,
    /// Largest map file accepted, in bytes.
    pub read_capacity: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_width: 80.0,
            tile_height: 80.0,
            read_capacity: 1024,
        }
    }
}

/// Errors from reading or parsing a map. Row and column indices are zero-based.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("map file is {size} bytes, read capacity is {capacity} bytes")]
    TooLarge { size: u64, capacity: usize },
    #[error("tile size {width}x{height} must be positive and finite")]
    BadTileSize { width: f32, height: f32 },
    #[error("map contains no tiles")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} column {column}: {token:?} is not an integer")]
    BadToken {
        row: usize,
        column: usize,
        token: String,
    },
    #[error("row {row} column {column}: unknown tile code {code}")]
    UnknownKind { row: usize, column: usize, code: i32 },
}

/// One placed tile. Immutable once the map is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    kind: TileKind,
    x: f32,
    y: f32,
    bounds: Aabb,
}

impl Tile {
    pub fn new(kind: TileKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind,
            x,
            y,
            bounds: Aabb::new(x, y, width, height),
        }
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn is_structural(&self) -> bool {
        self.kind.is_structural()
    }
}

/// Grid of tiles for one level.
///
/// Tiles are stored row-major. The map exposes no mutation: its tiles and
/// their count are fixed from construction until it is dropped.
#[derive(Debug, Clone)]
pub struct TileMap {
    tiles: Vec<Tile>,
    rows: usize,
    columns: usize,
    tile_width: f32,
    tile_height: f32,
}

impl TileMap {
    /// Build a map from rows of kinds. Every row must have the same length.
    pub fn from_grid(grid: Vec<Vec<TileKind>>, config: &MapConfig) -> Result<Self, MapError> {
        let (width, height) = (config.tile_width, config.tile_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(MapError::BadTileSize { width, height });
        }
        let columns = grid.first().map_or(0, Vec::len);
        if columns == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(grid.len() * columns);
        for (row, kinds) in grid.iter().enumerate() {
            if kinds.len() != columns {
                return Err(MapError::Ragged {
                    row,
                    expected: columns,
                    found: kinds.len(),
                });
            }
            for (column, kind) in kinds.iter().enumerate() {
                tiles.push(Tile::new(
                    *kind,
                    column as f32 * config.tile_width,
                    row as f32 * config.tile_height,
                    config.tile_width,
                    config.tile_height,
                ));
            }
        }

        let map = Self {
            tiles,
            rows: grid.len(),
            columns,
            tile_width: config.tile_width,
            tile_height: config.tile_height,
        };
        tracing::debug!(
            rows = map.rows,
            columns = map.columns,
            structural = map.structural_count(),
            "tile map built"
        );
        Ok(map)
    }

    /// Parse map text: integer tile codes separated by spaces, one row per line.
    /// Blank lines are ignored.
    pub fn parse(text: &str, config: &MapConfig) -> Result<Self, MapError> {
        let mut grid = Vec::new();
        for (row, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            let mut kinds = Vec::new();
            for (column, token) in line.split_whitespace().enumerate() {
                let code: i32 = token.parse().map_err(|_| MapError::BadToken {
                    row,
                    column,
                    token: token.to_string(),
                })?;
                let kind =
                    TileKind::from_code(code).ok_or(MapError::UnknownKind { row, column, code })?;
                kinds.push(kind);
            }
            grid.push(kinds);
        }
        Self::from_grid(grid, config)
    }

    /// Read and parse a map file. Files larger than `config.read_capacity`
    /// are rejected before reading.
    pub fn load(path: impl AsRef<Path>, config: &MapConfig) -> Result<Self, MapError> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        if size > config.read_capacity as u64 {
            return Err(MapError::TooLarge {
                size,
                capacity: config.read_capacity,
            });
        }
        tracing::debug!(path = %path.display(), size, "reading map file");
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, config)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of tiles (`rows * columns`).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width, self.tile_height)
    }

    /// Level width in world units.
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_width
    }

    /// Level height in world units.
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Tile> {
        if row < self.rows && column < self.columns {
            self.tiles.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Tile containing a world-space point.
    pub fn tile_at(&self, point: Vec2) -> Option<&Tile> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / self.tile_width) as usize;
        let row = (point.y / self.tile_height) as usize;
        self.get(row, column)
    }

    pub fn structural_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_structural()).count()
    }

    /// Colliders of all structural tiles, in row-major order.
    pub fn structural_colliders(&self) -> impl Iterator<Item = Collider> + Clone + '_ {
        self.tiles
            .iter()
            .filter(|t| t.is_structural())
            .map(|t| Collider::Rect(t.bounds))
    }

    /// Tiles overlapping a view rectangle.
    pub fn visible<'a>(&'a self, view: &'a Aabb) -> impl Iterator<Item = &'a Tile> + 'a {
        self.tiles.iter().filter(move |t| overlaps(view, &t.bounds))
    }

    /// First structural tile hit by `collider`, row-major order.
    pub fn touch_walls(&self, collider: &Collider) -> Option<Penetration> {
        first_hit(collider, self.structural_colliders()).map(|(_, p)| p)
    }
}
