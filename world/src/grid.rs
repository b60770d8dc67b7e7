//! Grid model mapping coordinates to cell contents.

use std::collections::{HashMap, HashSet};

use maze_crawl_core::{CellCoord, CellKind};

/// Fixed-size grid of passable cells and walls.
///
/// Passable cells and walls live in two disjoint collections. A coordinate
/// inside the bounds may belong to neither; such voids are never passable.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    passable: HashMap<CellCoord, CellKind>,
    walls: HashSet<CellCoord>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            passable: HashMap::new(),
            walls: HashSet::new(),
        }
    }

    /// Creates a grid whose border is wall and whose interior is clear floor.
    #[must_use]
    pub fn walled(width: u32, height: u32) -> Self {
        let mut grid = Self::new(width, height);
        for row in 0..height {
            for column in 0..width {
                let on_border =
                    column == 0 || row == 0 || column + 1 == width || row + 1 == height;
                grid.record(CellCoord::new(column, row), on_border);
            }
        }
        grid
    }

    /// Number of columns fixed at generation time.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows fixed at generation time.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the coordinate lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Classifies a cell as wall or clear floor, replacing any earlier record.
    ///
    /// Cells outside the bounds are ignored.
    pub fn record(&mut self, cell: CellCoord, is_wall: bool) {
        if !self.contains(cell) {
            return;
        }

        if is_wall {
            let _ = self.passable.remove(&cell);
            let _ = self.walls.insert(cell);
        } else {
            let _ = self.walls.remove(&cell);
            let _ = self.passable.insert(cell, CellKind::Clear);
        }
    }

    /// Puts an unsearched box on a passable cell.
    ///
    /// Returns `false` when the cell is not passable.
    pub fn place_box(&mut self, cell: CellCoord) -> bool {
        match self.passable.get_mut(&cell) {
            Some(kind) => {
                *kind = CellKind::Box;
                true
            }
            None => false,
        }
    }

    /// Marks the box on the cell as searched.
    ///
    /// Returns `true` only when a full box was emptied by this call.
    pub fn empty_box(&mut self, cell: CellCoord) -> bool {
        match self.passable.get_mut(&cell) {
            Some(kind) if *kind == CellKind::Box => {
                *kind = CellKind::EmptyBox;
                true
            }
            _ => false,
        }
    }

    /// Contents of the cell, or `None` for voids and out-of-bounds coordinates.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> Option<CellKind> {
        if self.walls.contains(&cell) {
            return Some(CellKind::Wall);
        }
        self.passable.get(&cell).copied()
    }

    /// Reports whether an actor may occupy the cell.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.passable.contains_key(&cell)
    }

    /// Reports whether the cell was recorded as a wall.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.walls.contains(&cell)
    }

    /// Number of passable cells.
    #[must_use]
    pub fn passable_count(&self) -> usize {
        self.passable.len()
    }

    /// Passable cells in row-major order.
    #[must_use]
    pub fn passable_cells(&self) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> = self.passable.keys().copied().collect();
        cells.sort_by_key(|cell| (cell.row(), cell.column()));
        cells
    }

    /// Cells currently holding a box, searched or not, in row-major order.
    #[must_use]
    pub fn box_cells(&self) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> = self
            .passable
            .iter()
            .filter(|(_, kind)| matches!(kind, CellKind::Box | CellKind::EmptyBox))
            .map(|(cell, _)| *cell)
            .collect();
        cells.sort_by_key(|cell| (cell.row(), cell.column()));
        cells
    }
}
