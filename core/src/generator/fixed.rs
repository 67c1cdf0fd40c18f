use ndarray::Array2;

use super::*;

/// Replays a predetermined mine layout.
///
/// If the safe cell holds a mine, that mine moves to the first free cell in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    size: Coord2,
    mines: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(size: Coord2, mines: &[Coord2]) -> Result<Self> {
        if mines.iter().any(|&coords| !in_bounds(coords, size)) {
            return Err(GameError::OutOfBounds);
        }
        let mut mines = mines.to_vec();
        mines.sort_unstable();
        mines.dedup();
        Ok(Self { size, mines })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, setting: LevelSetting, safe: Coord2) -> Result<Board> {
        let safe = check_request(setting, safe)?;
        if setting.size() != self.size || usize::from(setting.mines) != self.mines.len() {
            log::warn!(
                "fixed layout {:?} with {} mines does not match level {:?}",
                self.size,
                self.mines.len(),
                setting
            );
            return Err(GameError::InvalidConfiguration);
        }

        let mut mask: Array2<bool> = Array2::default(self.size.to_nd_index());
        for &coords in &self.mines {
            mask[coords.to_nd_index()] = true;
        }

        if mask[safe.to_nd_index()] {
            // a free cell exists: mines < total cells was validated above
            let relocated = iter_coords(self.size)
                .find(|&coords| coords != safe && !mask[coords.to_nd_index()])
                .ok_or(GameError::InvalidConfiguration)?;
            log::debug!("relocating mine from {:?} to {:?}", safe, relocated);
            mask[safe.to_nd_index()] = false;
            mask[relocated.to_nd_index()] = true;
        }

        Ok(Board::from_mine_mask(&mask))
    }
}
