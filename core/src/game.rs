use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Playing (first reveal or `start`)
/// - Playing -> Win
/// - Playing -> Lose
/// - any -> Idle (reset or level selection)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchState {
    /// No board committed yet
    Idle,
    /// Board laid out, clock running
    Playing,
    /// Every safe cell revealed
    Win,
    /// A mine was revealed
    Lose,
}

impl MatchState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::Idle
    }
}

/// What a reveal does once the match has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishedPress {
    /// Nothing happens until an explicit reset.
    Ignore,
    /// Starts a fresh match with the pressed cell as the first reveal.
    Restart,
}

impl Default for FinishedPress {
    fn default() -> Self {
        Self::Ignore
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub level: String,
    pub finished_press: FinishedPress,
    /// Fixed seed for reproducible boards, random when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            level: Levels::BEGINNER.to_owned(),
            finished_press: FinishedPress::default(),
            seed: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PressOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
}

impl PressOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&Snapshot)>;

/// The game engine: level, board, match state machine, clock and records.
pub struct Game<S: Scheduler = PolledScheduler, R: RecordStore = MemoryRecordStore> {
    levels: Levels,
    level_id: String,
    setting: LevelSetting,
    finished_press: FinishedPress,
    generator: Box<dyn BoardGenerator>,
    scheduler: S,
    records: R,
    best_time: Option<Seconds>,
    board: Option<Board>,
    state: MatchState,
    clock: MatchClock<S::Handle>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl<S: Scheduler, R: RecordStore> Game<S, R> {
    pub fn new(settings: &GameSettings, levels: Levels, scheduler: S, records: R) -> Result<Self> {
        let setting = levels.get(&settings.level)?;
        setting.validate()?;

        let generator = match settings.seed {
            Some(seed) => RandomBoardGenerator::new(seed),
            None => RandomBoardGenerator::from_entropy(),
        };
        log::debug!("board seed: {}", generator.seed());

        let mut game = Self {
            levels,
            level_id: settings.level.clone(),
            setting,
            finished_press: settings.finished_press,
            generator: Box::new(generator),
            scheduler,
            records,
            best_time: None,
            board: None,
            state: MatchState::Idle,
            clock: MatchClock::new(),
            observers: Vec::new(),
            next_observer: 0,
        };
        game.best_time = game.load_record();
        Ok(game)
    }

    /// Replaces the board generator, used from the next match on.
    pub fn with_generator(mut self, generator: impl BoardGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn set_finished_press(&mut self, finished_press: FinishedPress) {
        self.finished_press = finished_press;
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    pub fn level_setting(&self) -> LevelSetting {
        self.setting
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn elapsed_secs(&self) -> Seconds {
        self.clock.elapsed()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn flag_count(&self) -> CellCount {
        self.board.as_ref().map_or(0, Board::flag_count)
    }

    pub fn remaining_mines(&self) -> CellCount {
        self.setting.mines.saturating_sub(self.flag_count())
    }

    pub fn best_time(&self) -> Option<Seconds> {
        self.best_time
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.level_id,
            self.setting,
            self.state,
            self.board.as_ref(),
            self.clock.elapsed(),
            self.best_time,
        )
    }

    /// Registers a callback invoked with a fresh snapshot after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&Snapshot) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Switches difficulty, loads its record and discards any match in progress.
    pub fn select_level(&mut self, level_id: &str) -> Result<()> {
        let setting = self.levels.get(level_id)?;
        if let Err(err) = setting.validate() {
            log::warn!("rejected level {level_id}: {setting:?}");
            return Err(err);
        }

        log::debug!("level selected: {level_id} {setting:?}");
        self.level_id = level_id.to_owned();
        self.setting = setting;
        self.best_time = self.load_record();
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.clear_match();
        self.notify();
    }

    /// Lays out a board with `coords` guaranteed safe, starts the clock and reveals `coords`.
    ///
    /// A match that is not idle is discarded first.
    pub fn start(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.setting.validate_coords(coords)?;
        let board = self.generator.generate(self.setting, coords)?;

        if !self.state.is_idle() {
            log::debug!("discarding {:?} match", self.state);
            self.clear_match();
        }

        log::debug!("match started at {coords:?} on {}", self.level_id);
        self.board = Some(board);
        self.state = MatchState::Playing;
        self.clock.start(&self.scheduler);

        let outcome = self.reveal_on_board(coords)?;
        self.notify();
        Ok(outcome)
    }

    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.setting.validate_coords(coords)?;
        log::trace!("reveal {coords:?} in {:?}", self.state);

        match (self.state, self.finished_press) {
            (MatchState::Idle, _) => self.start(coords),
            (MatchState::Playing, _) => {
                let outcome = self.reveal_on_board(coords)?;
                if outcome.has_update() {
                    self.notify();
                }
                Ok(outcome)
            }
            (MatchState::Win | MatchState::Lose, FinishedPress::Restart) => self.start(coords),
            (MatchState::Win | MatchState::Lose, FinishedPress::Ignore) => {
                Ok(RevealOutcome::NoChange)
            }
        }
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.setting.validate_coords(coords)?;
        log::trace!("mark {coords:?} in {:?}", self.state);

        if !self.state.is_playing() {
            return Ok(MarkOutcome::NoChange);
        }
        let Some(board) = self.board.as_mut() else {
            return Ok(MarkOutcome::NoChange);
        };

        let outcome = board.toggle_mark(coords)?;
        if outcome.has_update() {
            self.check_win();
            self.notify();
        }
        Ok(outcome)
    }

    /// Primary presses reveal, secondary presses cycle the mark.
    pub fn handle_press(&mut self, coords: Coord2, secondary: bool) -> Result<PressOutcome> {
        if secondary {
            self.toggle_mark(coords).map(PressOutcome::Mark)
        } else {
            self.reveal_cell(coords).map(PressOutcome::Reveal)
        }
    }

    fn reveal_on_board(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let Some(board) = self.board.as_mut() else {
            return Ok(RevealOutcome::NoChange);
        };

        Ok(match board.reveal(coords)? {
            RevealOutcome::HitMine => {
                self.finish_lost();
                RevealOutcome::HitMine
            }
            RevealOutcome::NoChange => RevealOutcome::NoChange,
            RevealOutcome::Revealed | RevealOutcome::Won if self.check_win() => RevealOutcome::Won,
            RevealOutcome::Revealed | RevealOutcome::Won => RevealOutcome::Revealed,
        })
    }

    fn check_win(&mut self) -> bool {
        let cleared = self.board.as_ref().is_some_and(Board::is_cleared);
        if self.state.is_playing() && cleared {
            self.finish_won();
            true
        } else {
            false
        }
    }

    fn finish_won(&mut self) {
        self.clock.stop();
        self.state = MatchState::Win;
        let elapsed = self.clock.elapsed();
        log::debug!("match won in {elapsed}s on {}", self.level_id);

        if self.best_time.is_none_or(|best| elapsed < best) {
            log::debug!("new record on {}: {elapsed}s", self.level_id);
            self.best_time = Some(elapsed);
            if let Err(err) = self.records.set(&record_key(&self.level_id), elapsed) {
                log::error!("Could not save record for {}: {err}", self.level_id);
            }
        }
    }

    fn finish_lost(&mut self) {
        self.clock.stop();
        self.state = MatchState::Lose;
        if let Some(board) = self.board.as_mut() {
            log::debug!("match lost at {:?}", board.triggered_mine());
            board.reveal_mines();
        }
    }

    fn clear_match(&mut self) {
        self.clock.reset();
        self.board = None;
        self.state = MatchState::Idle;
    }

    fn load_record(&self) -> Option<Seconds> {
        match self.records.get(&record_key(&self.level_id)) {
            Ok(best) => best,
            Err(err) => {
                log::warn!("Could not load record for {}: {err}", self.level_id);
                None
            }
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, observer) in &mut self.observers {
            observer(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type TestGame = Game<ManualScheduler, MemoryRecordStore>;

    fn tiny_levels() -> Levels {
        let mut levels = Levels::standard();
        levels.insert("tiny", LevelSetting::new(2, 2, 1).unwrap());
        levels.insert("pair", LevelSetting::new(2, 2, 2).unwrap());
        levels.insert("full", LevelSetting::new_unchecked(2, 2, 4));
        levels
    }

    fn fixed_game<R: RecordStore>(
        level: &str,
        mines: &[Coord2],
        finished_press: FinishedPress,
        records: R,
    ) -> (Game<ManualScheduler, R>, ManualScheduler) {
        let settings = GameSettings {
            level: level.to_owned(),
            finished_press,
            seed: Some(1),
        };
        let scheduler = ManualScheduler::new();
        let game = Game::new(&settings, tiny_levels(), scheduler.clone(), records)
            .unwrap()
            .with_generator(FixedBoardGenerator::new((2, 2), mines).unwrap());
        (game, scheduler)
    }

    fn tiny_game(finished_press: FinishedPress) -> (TestGame, ManualScheduler) {
        fixed_game("tiny", &[(0, 0)], finished_press, MemoryRecordStore::new())
    }

    /// Fails every read and write.
    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<Seconds>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("read failed")))
        }

        fn set(&mut self, _key: &str, _secs: Seconds) -> std::result::Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("write failed")))
        }
    }

    fn revealed_cells(game: &TestGame) -> Vec<Coord2> {
        game.board()
            .unwrap()
            .iter_cells()
            .filter(|(_, cell)| cell.state == CellState::Revealed)
            .map(|(coords, _)| coords)
            .collect()
    }

    fn win_tiny(game: &mut TestGame, scheduler: &ManualScheduler, secs: u64) {
        game.reset();
        game.reveal_cell((1, 1)).unwrap();
        scheduler.advance_secs(secs);
        game.reveal_cell((0, 1)).unwrap();
        assert_eq!(game.reveal_cell((1, 0)).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn tiny_board_is_won_by_revealing_every_safe_cell() {
        let (mut game, _) = tiny_game(FinishedPress::Ignore);

        assert_eq!(game.reveal_cell((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.state(), MatchState::Playing);
        assert_eq!(revealed_cells(&game), vec![(1, 1)]);
        assert_eq!(game.board().unwrap().cell_at((1, 1)).value, CellValue::Adjacent(1));

        assert_eq!(game.reveal_cell((0, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(revealed_cells(&game), vec![(0, 1), (1, 1)]);

        assert_eq!(game.reveal_cell((1, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(game.state(), MatchState::Win);
        assert!(!game.is_clock_running());
    }

    #[test]
    fn revealing_a_mine_loses_and_opens_mines() {
        let (mut game, scheduler) = tiny_game(FinishedPress::Ignore);
        game.reveal_cell((1, 1)).unwrap();
        game.toggle_mark((1, 0)).unwrap();
        scheduler.advance_secs(5);

        assert_eq!(game.reveal_cell((0, 0)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(game.state(), MatchState::Lose);
        assert!(!game.is_clock_running());
        assert_eq!(scheduler.active_tasks(), 0);
        scheduler.advance_secs(5);
        assert_eq!(game.elapsed_secs(), 5);

        let board = game.board().unwrap();
        assert_eq!(board.cell_at((0, 0)).state, CellState::Revealed);
        assert_eq!(board.cell_at((1, 0)).state, CellState::Flagged);
        assert_eq!(board.cell_at((0, 1)).state, CellState::Hidden);
        assert_eq!(game.best_time(), None);
    }

    #[test]
    fn losing_opens_flagged_mines_and_keeps_misflags() {
        let (mut game, _) = fixed_game(
            "pair",
            &[(0, 0), (0, 1)],
            FinishedPress::Ignore,
            MemoryRecordStore::new(),
        );
        game.reveal_cell((1, 1)).unwrap();
        game.toggle_mark((0, 1)).unwrap();
        game.toggle_mark((1, 0)).unwrap();

        assert_eq!(game.reveal_cell((0, 0)).unwrap(), RevealOutcome::HitMine);

        let board = game.board().unwrap();
        assert_eq!(board.cell_at((0, 0)).state, CellState::Revealed);
        assert_eq!(board.cell_at((0, 1)).state, CellState::Revealed);
        assert_eq!(board.cell_at((1, 0)).state, CellState::Flagged);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.cell((0, 0)).appearance(), CellAppearance::TriggeredMine);
        assert_eq!(snapshot.cell((0, 1)).appearance(), CellAppearance::Mine);
        assert_eq!(snapshot.cell((1, 0)).appearance(), CellAppearance::Misflagged);
    }

    #[test]
    fn failing_store_still_keeps_the_best_time_in_memory() {
        let (mut game, scheduler) =
            fixed_game("tiny", &[(0, 0)], FinishedPress::Ignore, BrokenStore);
        assert_eq!(game.best_time(), None);

        game.reveal_cell((1, 1)).unwrap();
        scheduler.advance_secs(3);
        game.reveal_cell((0, 1)).unwrap();
        assert_eq!(game.reveal_cell((1, 0)).unwrap(), RevealOutcome::Won);

        assert_eq!(game.best_time(), Some(3));
        assert_eq!(game.snapshot().best, Some("00:03".to_owned()));

        game.select_level("pair").unwrap();
        assert_eq!(game.best_time(), None);
    }

    #[test]
    fn reset_after_loss_returns_to_idle() {
        let (mut game, scheduler) = tiny_game(FinishedPress::Ignore);
        game.reveal_cell((1, 1)).unwrap();
        game.toggle_mark((0, 1)).unwrap();
        scheduler.advance_secs(3);
        game.reveal_cell((0, 0)).unwrap();

        game.reset();

        assert_eq!(game.state(), MatchState::Idle);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.flag_count(), 0);
        assert!(game.board().is_none());

        game.reveal_cell((0, 1)).unwrap();
        assert_eq!(revealed_cells(&game), vec![(0, 1)]);
        assert_eq!(game.flag_count(), 0);
        assert!(game.is_clock_running());
    }

    #[test]
    fn records_keep_the_best_time() {
        let (mut game, scheduler) = tiny_game(FinishedPress::Ignore);

        win_tiny(&mut game, &scheduler, 42);
        assert_eq!(game.best_time(), Some(42));
        assert_eq!(game.records().get("record_tiny").unwrap(), Some(42));

        win_tiny(&mut game, &scheduler, 50);
        assert_eq!(game.best_time(), Some(42));
        assert_eq!(game.records().get("record_tiny").unwrap(), Some(42));

        win_tiny(&mut game, &scheduler, 30);
        assert_eq!(game.best_time(), Some(30));
        assert_eq!(game.records().get("record_tiny").unwrap(), Some(30));
    }

    #[test]
    fn records_are_loaded_per_level() {
        let mut records = MemoryRecordStore::new();
        records.set("record_expert", 120).unwrap();
        let scheduler = ManualScheduler::new();
        let mut game =
            Game::new(&GameSettings::default(), Levels::standard(), scheduler, records).unwrap();

        assert_eq!(game.best_time(), None);
        game.select_level(Levels::EXPERT).unwrap();
        assert_eq!(game.best_time(), Some(120));
        assert_eq!(game.level_setting(), LevelSetting::EXPERT);
        assert_eq!(game.snapshot().best.as_deref(), Some("02:00"));
    }

    #[test]
    fn select_level_discards_match_and_rejects_bad_levels() {
        let (mut game, scheduler) = tiny_game(FinishedPress::Ignore);
        game.reveal_cell((1, 1)).unwrap();

        assert_eq!(game.select_level("nightmare"), Err(GameError::UnknownLevel));
        assert_eq!(game.select_level("full"), Err(GameError::InvalidConfiguration));
        assert_eq!(game.state(), MatchState::Playing);
        assert_eq!(game.level_id(), "tiny");

        game.select_level(Levels::BEGINNER).unwrap();
        assert_eq!(game.state(), MatchState::Idle);
        assert!(game.board().is_none());
        assert_eq!(scheduler.active_tasks(), 0);
        assert_eq!(game.remaining_mines(), 10);
    }

    #[test]
    fn out_of_bounds_input_does_not_mutate() {
        let (mut game, _) = tiny_game(FinishedPress::Ignore);

        assert_eq!(game.reveal_cell((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(game.start((0, 2)), Err(GameError::OutOfBounds));
        assert_eq!(game.state(), MatchState::Idle);

        game.reveal_cell((1, 1)).unwrap();
        let before = game.snapshot();
        assert_eq!(game.toggle_mark((9, 9)), Err(GameError::OutOfBounds));
        assert_eq!(game.handle_press((2, 2), true), Err(GameError::OutOfBounds));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn marks_cycle_only_while_playing() {
        let (mut game, _) = tiny_game(FinishedPress::Ignore);
        assert_eq!(game.toggle_mark((0, 0)).unwrap(), MarkOutcome::NoChange);

        game.reveal_cell((1, 1)).unwrap();
        assert_eq!(
            game.handle_press((0, 0), true).unwrap(),
            PressOutcome::Mark(MarkOutcome::Changed(CellState::Flagged))
        );
        assert_eq!(game.remaining_mines(), 0);
        assert_eq!(game.state(), MatchState::Playing);

        game.toggle_mark((0, 0)).unwrap();
        game.toggle_mark((0, 0)).unwrap();
        assert_eq!(game.board().unwrap().cell_at((0, 0)).state, CellState::Hidden);
        assert_eq!(game.flag_count(), 0);
        assert_eq!(game.toggle_mark((1, 1)).unwrap(), MarkOutcome::NoChange);
    }

    #[test]
    fn finished_press_ignore_keeps_the_result() {
        let (mut game, scheduler) = tiny_game(FinishedPress::Ignore);
        game.reveal_cell((1, 1)).unwrap();
        game.reveal_cell((0, 0)).unwrap();

        assert_eq!(game.reveal_cell((0, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.state(), MatchState::Lose);
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn finished_press_restart_starts_a_new_match() {
        let (mut game, scheduler) = tiny_game(FinishedPress::Restart);
        game.reveal_cell((1, 1)).unwrap();
        scheduler.advance_secs(4);
        game.reveal_cell((0, 0)).unwrap();

        assert_eq!(game.reveal_cell((0, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.state(), MatchState::Playing);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(revealed_cells(&game), vec![(0, 1)]);
        assert_eq!(scheduler.active_tasks(), 1);
    }

    #[test]
    fn clock_runs_only_while_playing() {
        let (mut game, scheduler) = tiny_game(FinishedPress::Ignore);
        scheduler.advance_secs(3);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(scheduler.active_tasks(), 0);

        game.start((1, 1)).unwrap();
        assert_eq!(scheduler.active_tasks(), 1);
        scheduler.advance_secs(2);
        game.start((0, 1)).unwrap();
        assert_eq!(scheduler.active_tasks(), 1);
        assert_eq!(game.elapsed_secs(), 0);

        scheduler.advance_secs(61);
        assert_eq!(game.snapshot().elapsed, "01:01");
        game.reveal_cell((1, 1)).unwrap();
        game.reveal_cell((1, 0)).unwrap();
        assert_eq!(game.state(), MatchState::Win);
        assert_eq!(scheduler.active_tasks(), 0);
        scheduler.advance_secs(10);
        assert_eq!(game.elapsed_secs(), 61);
    }

    #[test]
    fn first_click_is_safe_on_crowded_boards() {
        let mut levels = Levels::standard();
        levels.insert("crowded", LevelSetting::new(3, 3, 8).unwrap());
        let settings = GameSettings {
            level: "crowded".to_owned(),
            ..GameSettings::default()
        };
        let mut game = Game::new(
            &settings,
            levels,
            ManualScheduler::new(),
            MemoryRecordStore::new(),
        )
        .unwrap();

        for coords in iter_coords((3, 3)) {
            assert_eq!(game.start(coords).unwrap(), RevealOutcome::Won);
            assert!(!game.board().unwrap().contains_mine(coords));
        }
    }

    #[test]
    fn observers_receive_snapshots_until_unsubscribed() {
        let (mut game, _) = tiny_game(FinishedPress::Ignore);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = game.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.state));

        game.reveal_cell((1, 1)).unwrap();
        game.reveal_cell((1, 1)).unwrap();
        game.reveal_cell((0, 0)).unwrap();
        assert_eq!(*seen.borrow(), vec![MatchState::Playing, MatchState::Lose]);

        assert!(game.unsubscribe(id));
        assert!(!game.unsubscribe(id));
        game.reset();
        assert_eq!(seen.borrow().len(), 2);
    }
}
