use maze_crawl_core::CellCoord;
use maze_crawl_rendering::ScreenCoord;

/// Window of map cells drawn around the player.
///
/// The window is centred on the player and clamped so that it never starts
/// before the map origin nor extends past the far edge when the map is large
/// enough to fill it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

impl Viewport {
    /// Computes the window of the given size centred on `center`.
    #[must_use]
    pub fn centered_on(
        center: CellCoord,
        width: u32,
        height: u32,
        map_width: u32,
        map_height: u32,
    ) -> Self {
        let left = center
            .column()
            .saturating_sub(width / 2)
            .min(map_width.saturating_sub(width));
        let top = center
            .row()
            .saturating_sub(height / 2)
            .min(map_height.saturating_sub(height));
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map column shown in the leftmost screen column.
    #[must_use]
    pub const fn left(&self) -> u32 {
        self.left
    }

    /// Map row shown in the topmost screen row.
    #[must_use]
    pub const fn top(&self) -> u32 {
        self.top
    }

    /// Screen position of a map cell, or `None` when the cell lies outside.
    #[must_use]
    pub fn to_screen(&self, cell: CellCoord) -> Option<ScreenCoord> {
        let column = cell.column().checked_sub(self.left)?;
        let row = cell.row().checked_sub(self.top)?;
        (column < self.width && row < self.height).then(|| ScreenCoord::new(column, row))
    }

    /// Every screen position with the map cell it shows, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (ScreenCoord, CellCoord)> {
        let Self {
            left,
            top,
            width,
            height,
        } = *self;
        (0..height).flat_map(move |row| {
            (0..width).map(move |column| {
                (
                    ScreenCoord::new(column, row),
                    CellCoord::new(left + column, top + row),
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centres_on_player_in_open_space() {
        let viewport = Viewport::centered_on(CellCoord::new(40, 12), 20, 10, 80, 25);
        assert_eq!((viewport.left(), viewport.top()), (30, 7));
        assert_eq!(
            viewport.to_screen(CellCoord::new(40, 12)),
            Some(ScreenCoord::new(10, 5))
        );
    }

    #[test]
    fn clamps_to_map_origin() {
        let viewport = Viewport::centered_on(CellCoord::new(2, 1), 20, 10, 80, 25);
        assert_eq!((viewport.left(), viewport.top()), (0, 0));
    }

    #[test]
    fn clamps_to_far_edge() {
        let viewport = Viewport::centered_on(CellCoord::new(78, 24), 20, 10, 80, 25);
        assert_eq!((viewport.left(), viewport.top()), (60, 15));
        assert_eq!(viewport.to_screen(CellCoord::new(59, 20)), None);
    }

    #[test]
    fn larger_window_than_map_starts_at_origin() {
        let viewport = Viewport::centered_on(CellCoord::new(5, 5), 40, 20, 10, 10);
        assert_eq!((viewport.left(), viewport.top()), (0, 0));
        assert_eq!(viewport.cells().count(), 800);
    }

    #[test]
    fn cells_cover_the_window_row_major() {
        let viewport = Viewport::centered_on(CellCoord::new(3, 3), 2, 2, 10, 10);
        let cells: Vec<(ScreenCoord, CellCoord)> = viewport.cells().collect();
        assert_eq!(
            cells,
            vec![
                (ScreenCoord::new(0, 0), CellCoord::new(2, 2)),
                (ScreenCoord::new(1, 0), CellCoord::new(3, 2)),
                (ScreenCoord::new(0, 1), CellCoord::new(2, 3)),
                (ScreenCoord::new(1, 1), CellCoord::new(3, 3)),
            ]
        );
    }
}
