use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Playing,
    Ended,
}

impl GameMode {
    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
}

/// Outcome of an open action
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Outcome of a flag toggle
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// A single game from first move to win or loss.
///
/// Owns the board and the two counters the win rule is defined over:
/// `flags_left` starts at the mine count and tracks unplaced flags (it can go
/// negative when the player over-flags), `closed_left` starts at the cell
/// count and reaches zero when every cell is open or flagged. The game is won
/// exactly when both counters are zero, i.e. every mine is flagged and every
/// safe cell is open.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    mode: GameMode,
    result: Option<GameResult>,
    flags_left: isize,
    closed_left: CellCount,
}

impl Game {
    /// New game with an entropy-seeded mine layout.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut rng = SmallRng::from_entropy();
        Ok(Self::from_board(Board::generate(config, &mut rng)?))
    }

    /// New game with a reproducible mine layout.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Ok(Self::from_board(Board::generate(config, &mut rng)?))
    }

    pub fn from_board(board: Board) -> Self {
        let flags_left = board.mine_count() as isize;
        let closed_left = board.total_cells();
        Self {
            board,
            mode: GameMode::Playing,
            result: None,
            flags_left,
            closed_left,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// `None` while the game is still in progress.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Board size as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    /// Flags not yet placed; negative when more flags than mines are out.
    pub fn flags_left(&self) -> isize {
        self.flags_left
    }

    /// Cells that are neither open nor flagged.
    pub fn closed_left(&self) -> CellCount {
        self.closed_left
    }

    /// Open the cell at `coords`.
    ///
    /// Out-of-bounds coordinates are an error even once the game has ended;
    /// everything else that cannot proceed (ended game, already-open or
    /// flagged cell) is a silent `NoChange`. Opening a zero-valued cell
    /// cascades through its connected zero region.
    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.mode.is_ended() {
            return Ok(OpenOutcome::NoChange);
        }
        Ok(self.open_cell(coords))
    }

    fn open_cell(&mut self, coords: Coord2) -> OpenOutcome {
        use OpenOutcome::*;

        if self.board[coords].status() != CellStatus::Closed {
            return NoChange;
        }

        self.board.cell_mut(coords).open();
        self.closed_left -= 1;
        let value = self.board[coords].adjacent_mines();
        log::debug!("opened {:?}, value {}", coords, value);

        if self.board[coords].is_mine() {
            self.end_game(GameResult::Loss);
            return Exploded;
        }

        if value == 0 {
            self.flood_fill(coords);
        }

        if self.check_win() {
            Won
        } else {
            Opened
        }
    }

    /// Opens the connected zero region around `start` plus its numbered
    /// border. Iterative so the traversal depth never depends on board size.
    /// A zero cell has no mine neighbors, so the fill can never explode;
    /// flagged cells are left untouched.
    fn flood_fill(&mut self, start: Coord2) {
        let mut visited = HashSet::from([start]);
        let mut to_visit: VecDeque<_> = self
            .board
            .iter_neighbors(start)
            .filter(|&pos| self.board[pos].status() == CellStatus::Closed)
            .collect();
        log::trace!("flood fill from {:?}, initial frontier: {:?}", start, to_visit);

        while let Some(coords) = to_visit.pop_front() {
            if !visited.insert(coords) {
                continue;
            }

            if self.board[coords].status() != CellStatus::Closed {
                continue;
            }

            self.board.cell_mut(coords).open();
            self.closed_left -= 1;
            let value = self.board[coords].adjacent_mines();
            log::trace!("flood opened {:?}, value {}", coords, value);

            if value == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board[pos].status() == CellStatus::Closed)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Toggle a flag at `coords`: Closed <-> Flagged, no-op on open cells.
    ///
    /// Both counters move together here so a double toggle restores them
    /// exactly. The flag budget is deliberately not capped at zero.
    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.board.validate_coords(coords)?;
        if self.mode.is_ended() {
            return Ok(NoChange);
        }

        let outcome = match self.board[coords].status() {
            CellStatus::Closed => {
                self.board.cell_mut(coords).place_flag();
                self.closed_left -= 1;
                self.flags_left -= 1;
                Changed
            }
            CellStatus::Flagged => {
                self.board.cell_mut(coords).remove_flag();
                self.closed_left += 1;
                self.flags_left += 1;
                Changed
            }
            CellStatus::Open => NoChange,
        };

        if outcome.has_update() {
            self.check_win();
        }
        Ok(outcome)
    }

    /// Win test: every mine flagged and every safe cell open, expressed as
    /// both counters hitting exactly zero. Over-flagging makes `flags_left`
    /// negative and the game stays winnable only once the extra flags are
    /// removed. Folded into `open` and `flag`, but public and idempotent so
    /// callers can also invoke it between actions.
    pub fn check_win(&mut self) -> bool {
        if self.mode.is_ended() {
            return self.result == Some(GameResult::Win);
        }
        if self.flags_left == 0 && self.closed_left == 0 {
            self.end_game(GameResult::Win);
            true
        } else {
            false
        }
    }

    fn end_game(&mut self, result: GameResult) {
        if self.mode.is_ended() {
            return;
        }
        log::debug!("game ended: {:?}", result);
        self.mode = GameMode::Ended;
        self.result = Some(result);
    }
}
