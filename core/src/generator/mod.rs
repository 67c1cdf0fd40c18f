use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Lays out a fresh board for a level, never placing a mine on `safe`.
pub trait BoardGenerator {
    fn generate(&mut self, setting: LevelSetting, safe: Coord2) -> Result<Board>;
}

impl<G: BoardGenerator + ?Sized> BoardGenerator for Box<G> {
    fn generate(&mut self, setting: LevelSetting, safe: Coord2) -> Result<Board> {
        (**self).generate(setting, safe)
    }
}

fn check_request(setting: LevelSetting, safe: Coord2) -> Result<Coord2> {
    setting.validate()?;
    setting.validate_coords(safe)
}
