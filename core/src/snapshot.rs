use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Formats whole seconds as `mm:ss`; minutes keep growing past 99.
pub fn format_clock(secs: Seconds) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// How a renderer should draw a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellAppearance {
    Hidden,
    Flagged,
    Question,
    Revealed(u8),
    Mine,
    TriggeredMine,
    Misflagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub state: CellState,
    /// Only present for revealed cells, or for every cell once the match has ended.
    pub value: Option<CellValue>,
    pub triggered: bool,
}

impl CellSnapshot {
    const BLANK: Self = Self {
        state: CellState::Hidden,
        value: None,
        triggered: false,
    };

    pub fn appearance(&self) -> CellAppearance {
        use CellAppearance::*;

        match (self.state, self.value) {
            (CellState::Revealed, Some(CellValue::Mine)) if self.triggered => TriggeredMine,
            (CellState::Revealed, Some(CellValue::Mine)) => Mine,
            (CellState::Revealed, Some(CellValue::Adjacent(count))) => Revealed(count),
            (CellState::Flagged, Some(CellValue::Adjacent(_))) => Misflagged,
            (CellState::Flagged, _) => Flagged,
            (CellState::Question, _) => Question,
            (CellState::Hidden | CellState::Revealed, _) => Hidden,
        }
    }
}

/// Read-only view of the whole engine for a UI collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: String,
    pub size: Coord2,
    pub state: MatchState,
    pub cells: Array2<CellSnapshot>,
    pub elapsed_secs: Seconds,
    pub elapsed: String,
    pub remaining_mines: CellCount,
    pub best_secs: Option<Seconds>,
    pub best: Option<String>,
}

impl Snapshot {
    pub(crate) fn capture(
        level: &str,
        setting: LevelSetting,
        state: MatchState,
        board: Option<&Board>,
        elapsed_secs: Seconds,
        best_secs: Option<Seconds>,
    ) -> Self {
        let size = setting.size();
        let cells = match board {
            Some(board) => {
                let expose_all = state.is_finished();
                Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
                    let coords = (row as Coord, col as Coord);
                    let cell = board.cell_at(coords);
                    let visible = expose_all || cell.state == CellState::Revealed;
                    CellSnapshot {
                        state: cell.state,
                        value: visible.then_some(cell.value),
                        triggered: board.triggered_mine() == Some(coords),
                    }
                })
            }
            None => Array2::from_elem(size.to_nd_index(), CellSnapshot::BLANK),
        };
        let flags = board.map_or(0, Board::flag_count);

        Self {
            level: level.to_owned(),
            size,
            state,
            cells,
            elapsed_secs,
            elapsed: format_clock(elapsed_secs),
            remaining_mines: setting.mines.saturating_sub(flags),
            best_secs,
            best: best_secs.map(format_clock),
        }
    }

    pub fn cell(&self, coords: Coord2) -> CellSnapshot {
        self.cells[coords.to_nd_index()]
    }

    /// Text rendering, one line per row: `#` hidden, `F` flag, `?` question, `*` mine, `X` triggered mine,
    /// `!` wrong flag, `.` empty, digits for counts.
    pub fn render_text(&self) -> String {
        let (rows, cols) = self.size;
        let mut out = String::with_capacity(usize::from(rows) * (usize::from(cols) + 1));
        for row in 0..rows {
            for col in 0..cols {
                out.push(match self.cell((row, col)).appearance() {
                    CellAppearance::Hidden => '#',
                    CellAppearance::Flagged => 'F',
                    CellAppearance::Question => '?',
                    CellAppearance::Revealed(0) => '.',
                    CellAppearance::Revealed(count) => char::from(b'0' + count),
                    CellAppearance::Mine => '*',
                    CellAppearance::TriggeredMine => 'X',
                    CellAppearance::Misflagged => '!',
                });
            }
            out.push('\n');
        }
        out
    }
}
