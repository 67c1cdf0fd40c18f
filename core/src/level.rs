use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count of a difficulty level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSetting {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl LevelSetting {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(16, 30, 99);

    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let setting = Self::new_unchecked(rows, cols, mines);
        setting.validate()?;
        Ok(setting)
    }

    /// At least one safe cell is required, otherwise no first click can be guaranteed.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfiguration)
        } else {
            Ok(())
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}

/// Table of selectable levels keyed by identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    settings: BTreeMap<String, LevelSetting>,
}

impl Levels {
    pub const BEGINNER: &'static str = "beginner";
    pub const INTERMEDIATE: &'static str = "intermediate";
    pub const EXPERT: &'static str = "expert";

    pub fn empty() -> Self {
        Self {
            settings: BTreeMap::new(),
        }
    }

    pub fn standard() -> Self {
        let mut levels = Self::empty();
        levels.insert(Self::BEGINNER, LevelSetting::BEGINNER);
        levels.insert(Self::INTERMEDIATE, LevelSetting::INTERMEDIATE);
        levels.insert(Self::EXPERT, LevelSetting::EXPERT);
        levels
    }

    /// Registers (or replaces) a level. Validation happens on selection.
    pub fn insert(&mut self, id: impl Into<String>, setting: LevelSetting) -> Option<LevelSetting> {
        self.settings.insert(id.into(), setting)
    }

    pub fn get(&self, id: &str) -> Result<LevelSetting> {
        self.settings.get(id).copied().ok_or(GameError::UnknownLevel)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.settings.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LevelSetting)> {
        self.settings.iter().map(|(id, setting)| (id.as_str(), setting))
    }
}

impl Default for Levels {
    fn default() -> Self {
        Self::standard()
    }
}
