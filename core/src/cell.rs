use serde::{Deserialize, Serialize};

/// Adjacency value marking a cell as a mine.
pub const MINE_VALUE: u8 = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Closed,
    Flagged,
    Open,
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Closed
    }
}

/// One grid position: how many mines surround it (9 meaning the cell itself
/// is a mine) and whether the player has opened or flagged it.
///
/// The adjacency value is fixed once mine placement finishes; only the
/// status changes afterwards, and only through [`Game`](crate::Game)
/// operations so the game counters stay consistent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    adjacent_mines: u8,
    status: CellStatus,
}

impl Cell {
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn status(self) -> CellStatus {
        self.status
    }

    pub const fn is_mine(self) -> bool {
        self.adjacent_mines == MINE_VALUE
    }

    /// Closed -> Open; no-op for flagged or already-open cells.
    pub(crate) fn open(&mut self) {
        if matches!(self.status, CellStatus::Closed) {
            self.status = CellStatus::Open;
        }
    }

    pub(crate) fn place_flag(&mut self) {
        debug_assert_eq!(self.status, CellStatus::Closed);
        self.status = CellStatus::Flagged;
    }

    pub(crate) fn remove_flag(&mut self) {
        debug_assert_eq!(self.status, CellStatus::Flagged);
        self.status = CellStatus::Closed;
    }

    pub(crate) fn set_mine(&mut self) {
        self.adjacent_mines = MINE_VALUE;
    }

    /// Mines keep their sentinel value even when next to another mine.
    pub(crate) fn bump_count(&mut self) {
        if !self.is_mine() {
            self.adjacent_mines += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_only_affects_closed_cells() {
        let mut cell = Cell::default();
        cell.open();
        assert_eq!(cell.status(), CellStatus::Open);

        let mut flagged = Cell::default();
        flagged.place_flag();
        flagged.open();
        assert_eq!(flagged.status(), CellStatus::Flagged);
    }

    #[test]
    fn bump_count_never_touches_mines() {
        let mut cell = Cell::default();
        cell.set_mine();
        cell.bump_count();
        assert!(cell.is_mine());
        assert_eq!(cell.adjacent_mines(), MINE_VALUE);
    }
}
