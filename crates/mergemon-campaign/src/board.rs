//! The 5x5 placement grid and its merge routing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mergemon_core::constants::{GRID_COLS, GRID_ROWS};
use mergemon_core::errors::MergeError;
use mergemon_core::unit::{Unit, UnitFactory};

/// Why a grid operation was refused. The board is unchanged on refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
    #[error("cell ({row}, {col}) is empty")]
    CellEmpty { row: usize, col: usize },
    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// The board the player arranges monsters on.
///
/// Each live unit occupies exactly one cell. Battles run on copies of
/// these units; `apply_battle_survivors` folds the outcome back in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Unit>; GRID_COLS]; GRID_ROWS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_bounds(row: usize, col: usize) -> Result<(), GridError> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(())
    }

    /// The unit in a cell, if the cell exists and holds one.
    pub fn unit_at(&self, row: usize, col: usize) -> Option<&Unit> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Put a unit into an empty cell. Occupied cells are never silently
    /// overwritten; route those through `attempt_merge`.
    pub fn place(&mut self, unit: Unit, row: usize, col: usize) -> Result<(), GridError> {
        Self::check_bounds(row, col)?;
        if self.cells[row][col].is_some() {
            return Err(GridError::CellOccupied { row, col });
        }
        self.cells[row][col] = Some(unit);
        Ok(())
    }

    /// Remove and return the unit in a cell.
    pub fn take(&mut self, row: usize, col: usize) -> Result<Unit, GridError> {
        Self::check_bounds(row, col)?;
        self.cells[row][col]
            .take()
            .ok_or(GridError::CellEmpty { row, col })
    }

    /// Merge an incoming unit onto the cell's occupant.
    ///
    /// Eligibility is tier equality only. On success the occupant is
    /// replaced by the factory's merged unit, which is also returned so
    /// the caller can award merge coins. On any rejection the incoming
    /// unit is not consumed and the cell keeps its occupant.
    pub fn attempt_merge(
        &mut self,
        incoming: Unit,
        row: usize,
        col: usize,
        factory: &mut UnitFactory,
    ) -> Result<Unit, GridError> {
        Self::check_bounds(row, col)?;
        let occupant = self.cells[row][col].ok_or(GridError::CellEmpty { row, col })?;
        let merged = factory.merge(&occupant, &incoming)?;
        self.cells[row][col] = Some(merged);
        Ok(merged)
    }

    /// Raw cell write for the save restorer, which rebuilds a board
    /// as persisted rather than through placement rules.
    pub(crate) fn set_cell(&mut self, row: usize, col: usize, unit: Unit) {
        self.cells[row][col] = Some(unit);
    }

    /// First empty cell in row-major order. Purchases always fill the
    /// lowest row-major slot, which keeps test fixtures reproducible.
    pub fn find_empty_cell(&self) -> Option<(usize, usize)> {
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                if self.cells[row][col].is_none() {
                    return Some((row, col));
                }
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.find_empty_cell().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.unit_count() == 0
    }

    pub fn unit_count(&self) -> usize {
        self.iter_units().count()
    }

    /// Every unit on the board with its position, row-major.
    pub fn iter_units(&self) -> impl Iterator<Item = (usize, usize, &Unit)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.as_ref().map(|unit| (row, col, unit)))
        })
    }

    /// Copies of every unit in row-major order — the player battle roster.
    pub fn roster(&self) -> Vec<Unit> {
        self.iter_units().map(|(_, _, unit)| *unit).collect()
    }

    /// Reconcile a finished battle onto the grid: survivors keep their
    /// damaged health, the fallen leave their cells.
    pub fn apply_battle_survivors(&mut self, survivors: &[Unit]) {
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                if let Some(unit) = self.cells[row][col] {
                    match survivors.iter().find(|s| s.id == unit.id) {
                        Some(survivor) => {
                            let mut updated = unit;
                            updated.health = survivor.health.min(unit.max_health);
                            self.cells[row][col] = Some(updated);
                        }
                        None => self.cells[row][col] = None,
                    }
                }
            }
        }
    }
}
