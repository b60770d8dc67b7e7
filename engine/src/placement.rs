//! Scatters boxes and actors over the free cells of a freshly carved maze.

use maze_crawl_core::CellCoord;
use maze_crawl_system_maze_generation::GenerationError;
use maze_crawl_world::{Grid, Placement};
use rand::Rng;

/// Draws boxes, then the player, then the pursuer from `free_cells`.
///
/// Cells are consumed without replacement, so every placement is distinct.
/// The first box drawn hides the goal item.
pub(crate) fn scatter<R>(
    grid: &mut Grid,
    free_cells: &mut Vec<CellCoord>,
    box_count: usize,
    rng: &mut R,
) -> Result<Placement, GenerationError>
where
    R: Rng + ?Sized,
{
    let box_count = box_count.max(1);
    let required = box_count + 2;
    let available = free_cells.len();
    if available < required {
        return Err(GenerationError::InsufficientFreeCells {
            required,
            available,
        });
    }

    let mut draw = |rng: &mut R| -> Result<CellCoord, GenerationError> {
        if free_cells.is_empty() {
            return Err(GenerationError::InsufficientFreeCells {
                required,
                available,
            });
        }
        let index = rng.gen_range(0..free_cells.len());
        Ok(free_cells.remove(index))
    };

    let goal = draw(rng)?;
    let _ = grid.place_box(goal);
    for _ in 1..box_count {
        let cell = draw(rng)?;
        let _ = grid.place_box(cell);
    }

    let player = draw(rng)?;
    let pursuer = draw(rng)?;

    Ok(Placement {
        player,
        pursuer,
        goal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_crawl_core::CellKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn consumes_cells_without_replacement() {
        let mut grid = Grid::walled(7, 7);
        let mut free_cells = grid.passable_cells();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let placement = scatter(&mut grid, &mut free_cells, 5, &mut rng).expect("enough cells");

        assert_eq!(free_cells.len(), 25 - 7);
        assert_eq!(grid.box_cells().len(), 5);
        assert_eq!(grid.kind(placement.goal), Some(CellKind::Box));
        assert!(!free_cells.contains(&placement.player));
        assert!(!free_cells.contains(&placement.pursuer));
        assert_ne!(placement.player, placement.pursuer);
        assert!(!grid.box_cells().contains(&placement.player));
        assert!(!grid.box_cells().contains(&placement.pursuer));
    }

    #[test]
    fn reports_missing_cells() {
        let mut grid = Grid::walled(4, 4);
        let mut free_cells = grid.passable_cells();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let result = scatter(&mut grid, &mut free_cells, 3, &mut rng);

        assert_eq!(
            result,
            Err(GenerationError::InsufficientFreeCells {
                required: 5,
                available: 4,
            })
        );
        assert!(grid.box_cells().is_empty());
    }
}
