use crate::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed(CellState),
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

impl Board {
    /// Opens a hidden cell, flooding outwards through zero-valued cells.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        let cell = self.cell_at(coords);
        if cell.state != CellState::Hidden {
            return Ok(RevealOutcome::NoChange);
        }

        self.set_state(coords, CellState::Revealed);
        match cell.value {
            CellValue::Mine => {
                self.trigger_mine(coords);
                return Ok(RevealOutcome::HitMine);
            }
            CellValue::Adjacent(0) => {
                self.count_revealed();
                self.flood_reveal(coords);
            }
            CellValue::Adjacent(_) => self.count_revealed(),
        }

        Ok(if self.is_cleared() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Reveals the connected zero region around `origin` plus its bordering numbers.
    ///
    /// A cell is pushed at most once: it is marked revealed before it enters the worklist.
    fn flood_reveal(&mut self, origin: Coord2) {
        let mut to_visit: Vec<Coord2> = vec![origin];

        while let Some(visit_coords) = to_visit.pop() {
            let neighbors: Vec<Coord2> = self.iter_neighbors(visit_coords).collect();
            for pos in neighbors {
                let cell = self.cell_at(pos);
                if cell.state != CellState::Hidden {
                    continue;
                }

                self.set_state(pos, CellState::Revealed);
                self.count_revealed();

                if cell.value == CellValue::Adjacent(0) {
                    to_visit.push(pos);
                }
            }
        }
    }

    /// Advances the marking cycle `hidden → flagged → question → hidden`.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        let current = self.cell_at(coords).state;

        let Some(next) = current.next_mark() else {
            return Ok(MarkOutcome::NoChange);
        };

        match (current, next) {
            (Hidden, Flagged) => self.count_flag(true),
            (Flagged, Question) => self.count_flag(false),
            _ => {}
        }
        self.set_state(coords, next);

        Ok(MarkOutcome::Changed(next))
    }
}
