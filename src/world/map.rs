//! Tile grid for the arena
//!
//! Terrain is static apart from resource tiles, which turn back into land
//! once picked up.

use serde::{Deserialize, Serialize};

use crate::core::types::GridPos;

/// Kind of tile occupying a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Land,
    Wall,
    Tree,
    Water,
    Medkit,
    Ammo,
}

impl TileKind {
    /// Can a unit stand on this tile?
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileKind::Land | TileKind::Medkit | TileKind::Ammo)
    }

    /// Does this tile block line of sight?
    pub fn blocks_sight(&self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Tree)
    }

    pub fn resource(&self) -> Option<ResourceKind> {
        match self {
            TileKind::Medkit => Some(ResourceKind::Medkit),
            TileKind::Ammo => Some(ResourceKind::Ammo),
            _ => None,
        }
    }
}

/// Collectable resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Medkit,
    Ammo,
}

impl ResourceKind {
    pub fn tile(&self) -> TileKind {
        match self {
            ResourceKind::Medkit => TileKind::Medkit,
            ResourceKind::Ammo => TileKind::Ammo,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Medkit => "medkit",
            ResourceKind::Ammo => "ammo",
        }
    }
}

/// The arena map, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    rows: u32,
    cols: u32,
    tiles: Vec<TileKind>,
}

impl GameMap {
    /// Create a map filled with land
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            tiles: vec![TileKind::Land; (rows as usize) * (cols as usize)],
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as u32) < self.rows && (pos.col as u32) < self.cols
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.cols as usize + pos.col as usize)
        } else {
            None
        }
    }

    /// Tile at a position, `None` when out of bounds
    pub fn get(&self, pos: GridPos) -> Option<TileKind> {
        self.index(pos).map(|idx| self.tiles[idx])
    }

    /// Set a tile. Returns `false` if the position is out of bounds.
    pub fn set(&mut self, pos: GridPos, tile: TileKind) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.tiles[idx] = tile;
                true
            }
            None => false,
        }
    }

    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.get(pos).is_some_and(|t| t.is_walkable())
    }

    /// Out-of-bounds cells block sight like walls
    pub fn blocks_sight(&self, pos: GridPos) -> bool {
        self.get(pos).map_or(true, |t| t.blocks_sight())
    }

    /// Iterate over all positions and tiles
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, TileKind)> + '_ {
        let cols = self.cols as usize;
        self.tiles.iter().enumerate().map(move |(idx, tile)| {
            (GridPos::new((idx / cols) as i32, (idx % cols) as i32), *tile)
        })
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| **t == kind).count()
    }
}
