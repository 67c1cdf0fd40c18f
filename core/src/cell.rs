use serde::{Deserialize, Serialize};

/// Player-visible marking of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
    Question,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        !matches!(self, Self::Revealed)
    }

    /// Next state of the marking cycle, `None` for revealed cells.
    pub const fn next_mark(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::Flagged),
            Self::Flagged => Some(Self::Question),
            Self::Question => Some(Self::Hidden),
            Self::Revealed => None,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What lies under a cell, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Adjacent(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Numeric encoding: `-1` for a mine, otherwise the adjacent mine count.
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Mine => -1,
            Self::Adjacent(count) => count as i8,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub value: CellValue,
}

impl Cell {
    pub const fn new(value: CellValue) -> Self {
        Self {
            state: CellState::Hidden,
            value,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.value.is_mine()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(CellValue::Adjacent(0))
    }
}
