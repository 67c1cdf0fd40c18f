use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform rejection sampling over the whole grid, skipping the safe cell.
///
/// Rejecting the safe cell as a candidate gives the same distribution as regenerating until the safe cell is
/// clear, without the retry loop. One generator yields a different board on every call.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, setting: LevelSetting, safe: Coord2) -> Result<Board> {
        let safe = check_request(setting, safe)?;

        let mut mines: Array2<bool> = Array2::default(setting.size().to_nd_index());
        let mut mines_placed: CellCount = 0;

        while mines_placed < setting.mines {
            let coords = (
                self.rng.random_range(0..setting.rows),
                self.rng.random_range(0..setting.cols),
            );
            if coords == safe || mines[coords.to_nd_index()] {
                continue;
            }
            mines[coords.to_nd_index()] = true;
            mines_placed += 1;
        }

        log::debug!(
            "generated {}x{} board with {} mines, safe at {:?}",
            setting.rows,
            setting.cols,
            mines_placed,
            safe
        );
        Ok(Board::from_mine_mask(&mines))
    }
}
