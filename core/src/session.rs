use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotStarted,
    Running,
    Over,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    None,
    Won,
    Lost,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellUpdate {
    pub coords: Coord2,
    pub view: CellView,
}

/// Session-level events for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    /// The clock started, a 1 second tick should be scheduled.
    Started,
    Won,
    Lost,
    /// A new board replaced the old one, every cell is hidden again.
    Reset,
    Timer(u32),
    /// Ask the player for a name to store with `time`.
    RecordRequested { time: u32 },
}

/// Everything that changed during one input event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Render {
    pub cells: Vec<CellUpdate>,
    pub signals: Vec<Signal>,
}

impl Render {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.signals.is_empty()
    }

    pub fn has_signal(&self, signal: Signal) -> bool {
        self.signals.contains(&signal)
    }

    fn push_cells(&mut self, grid: &Grid, coords: impl IntoIterator<Item = Coord2>) {
        self.cells.extend(coords.into_iter().map(|coords| CellUpdate {
            coords,
            view: grid.view_at(coords),
        }));
    }
}

/// One game from first click to reset: owns the grid, the clock and the outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    config: GameConfig,
    grid: Grid,
    state: SessionState,
    outcome: Outcome,
    elapsed_secs: u32,
    epoch: u32,
    record_pending: bool,
}

impl Session {
    pub fn new(config: GameConfig, generator: impl LayoutGenerator) -> Result<Self> {
        let grid = Grid::new_game(config, generator)?;
        Ok(Self::from_grid(grid))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self::with_grid(grid, 0)
    }

    /// The config is taken from the grid, prepared layouts bring their own size.
    fn with_grid(grid: Grid, epoch: u32) -> Self {
        Self {
            config: grid.layout().game_config(),
            grid,
            state: SessionState::NotStarted,
            outcome: Outcome::None,
            elapsed_secs: 0,
            epoch,
            record_pending: false,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::Over
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Identifies the clock of this board; changes on every reset.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn flags_placed(&self) -> CellCount {
        self.grid.flags_placed()
    }

    pub fn mines_left(&self) -> i32 {
        self.grid.mines_left()
    }

    pub fn select_cell(&mut self, coords: Coord2) -> Result<Render> {
        let mut render = Render::default();
        if self.is_over() {
            log::trace!("ignored reveal at {:?}, game is over", coords);
            return Ok(render);
        }

        match self.grid.reveal(coords)? {
            RevealOutcome::AlreadyRevealed => {}
            RevealOutcome::Continue { revealed } => {
                self.start_clock(&mut render);
                render.push_cells(&self.grid, revealed);
                self.check_win(&mut render);
            }
            RevealOutcome::Lost { mines } => {
                self.start_clock(&mut render);
                render
                    .cells
                    .extend(mines.into_iter().map(|coords| CellUpdate {
                        coords,
                        view: CellView::Mine,
                    }));
                self.finish(Outcome::Lost, &mut render);
            }
        }

        Ok(render)
    }

    pub fn flag_cell(&mut self, coords: Coord2) -> Result<Render> {
        let mut render = Render::default();
        if self.is_over() {
            log::trace!("ignored flag at {:?}, game is over", coords);
            return Ok(render);
        }

        if self.grid.toggle_flag(coords)?.has_update() {
            render.push_cells(&self.grid, [coords]);
            self.check_win(&mut render);
        }

        Ok(render)
    }

    /// Advances the clock by one second if `epoch` is current and the game is running.
    pub fn tick(&mut self, epoch: u32) -> Option<u32> {
        if epoch != self.epoch {
            log::trace!("stale tick for epoch {} (current {})", epoch, self.epoch);
            return None;
        }
        if self.state != SessionState::Running {
            return None;
        }

        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Some(self.elapsed_secs)
    }

    /// Replaces the board with a freshly generated one. On error the current game is kept.
    pub fn reset(&mut self, generator: impl LayoutGenerator) -> Result<Render> {
        let grid = Grid::new_game(self.config, generator)?;
        *self = Self::with_grid(grid, self.epoch.wrapping_add(1));
        log::debug!("new game, epoch {}", self.epoch);

        let mut render = Render::default();
        let (rows, cols) = self.grid.size();
        render.push_cells(
            &self.grid,
            (0..rows).flat_map(|row| (0..cols).map(move |col| (row, col))),
        );
        render.signals.extend([Signal::Reset, Signal::Timer(0)]);
        Ok(render)
    }

    /// The leaderboard entry for a won game, handed out once.
    pub fn record_entry(&mut self, name: impl Into<String>) -> Option<LeaderboardEntry> {
        if self.outcome != Outcome::Won || !self.record_pending {
            return None;
        }
        self.record_pending = false;
        Some(LeaderboardEntry::new(name, self.elapsed_secs))
    }

    fn start_clock(&mut self, render: &mut Render) {
        if self.state == SessionState::NotStarted {
            self.state = SessionState::Running;
            render.signals.push(Signal::Started);
            log::debug!("game started");
        }
    }

    fn check_win(&mut self, render: &mut Render) {
        if self.grid.evaluate_win() {
            self.finish(Outcome::Won, render);
        }
    }

    fn finish(&mut self, outcome: Outcome, render: &mut Render) {
        self.state = SessionState::Over;
        self.outcome = outcome;
        log::debug!("game {:?} after {}s", outcome, self.elapsed_secs);

        match outcome {
            Outcome::Won => {
                self.record_pending = true;
                render.signals.push(Signal::Won);
                render.signals.push(Signal::RecordRequested {
                    time: self.elapsed_secs,
                });
            }
            Outcome::Lost => render.signals.push(Signal::Lost),
            Outcome::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        let layout = MineLayout::from_mine_coords(size, mines).unwrap();
        Session::from_grid(Grid::from_layout(layout))
    }

    #[test]
    fn first_reveal_starts_the_clock() {
        let mut session = session((3, 3), &[(2, 2)]);
        assert_eq!(session.tick(0), None);

        let render = session.select_cell((0, 2)).unwrap();

        assert_eq!(render.signals, [Signal::Started]);
        assert_eq!(render.cells.len(), 8);
        assert_eq!(
            render.cells[0],
            CellUpdate {
                coords: (0, 2),
                view: CellView::Blank
            }
        );
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.tick(0), Some(1));
        assert_eq!(session.tick(0), Some(2));
        assert_eq!(session.elapsed_secs(), 2);
    }

    #[test]
    fn flagging_does_not_start_the_clock() {
        let mut session = session((3, 3), &[(2, 2)]);

        let render = session.flag_cell((2, 2)).unwrap();

        assert_eq!(
            render.cells,
            [CellUpdate {
                coords: (2, 2),
                view: CellView::Flag
            }]
        );
        assert!(render.signals.is_empty());
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.tick(0), None);
        assert_eq!(session.flags_placed(), 1);
    }

    #[test]
    fn unflag_reports_hidden_cell() {
        let mut session = session((3, 3), &[(2, 2)]);
        session.flag_cell((1, 1)).unwrap();

        let render = session.flag_cell((1, 1)).unwrap();

        assert_eq!(
            render.cells,
            [CellUpdate {
                coords: (1, 1),
                view: CellView::Hidden
            }]
        );
        assert_eq!(session.flags_placed(), 0);
    }

    #[test]
    fn repeated_reveal_renders_nothing() {
        let mut session = session((3, 3), &[(2, 2)]);
        session.select_cell((0, 0)).unwrap();

        assert!(session.select_cell((0, 0)).unwrap().is_empty());
        assert!(session.flag_cell((0, 0)).unwrap().is_empty());
    }

    #[test]
    fn losing_discloses_mines_and_stops_the_clock() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);
        session.select_cell((0, 2)).unwrap();
        session.tick(0);

        let render = session.select_cell((2, 2)).unwrap();

        assert_eq!(render.signals, [Signal::Lost]);
        assert_eq!(
            render.cells,
            [
                CellUpdate {
                    coords: (0, 0),
                    view: CellView::Mine
                },
                CellUpdate {
                    coords: (2, 2),
                    view: CellView::Mine
                },
            ]
        );
        assert_eq!(session.outcome(), Outcome::Lost);
        assert!(session.is_over());
        assert_eq!(session.tick(0), None);
        assert_eq!(session.elapsed_secs(), 1);
        assert_eq!(session.record_entry("nobody"), None);
    }

    #[test]
    fn losing_on_first_click_starts_and_ends() {
        let mut session = session((2, 2), &[(0, 0)]);

        let render = session.select_cell((0, 0)).unwrap();

        assert_eq!(render.signals, [Signal::Started, Signal::Lost]);
        assert_eq!(session.state(), SessionState::Over);
    }

    #[test]
    fn input_is_ignored_once_over() {
        let mut session = session((2, 2), &[(0, 0)]);
        session.select_cell((0, 0)).unwrap();
        let snapshot = session.clone();

        assert!(session.select_cell((1, 1)).unwrap().is_empty());
        assert!(session.flag_cell((1, 1)).unwrap().is_empty());
        assert!(session.select_cell((9, 9)).unwrap().is_empty());
        assert_eq!(session, snapshot);
    }

    #[test]
    fn winning_by_flag_requests_a_record_once() {
        let mut session = session((1, 3), &[(0, 0)]);
        session.select_cell((0, 1)).unwrap();
        session.select_cell((0, 2)).unwrap();
        session.tick(0);
        session.tick(0);
        assert_eq!(session.state(), SessionState::Running);

        let render = session.flag_cell((0, 0)).unwrap();

        assert_eq!(
            render.signals,
            [Signal::Won, Signal::RecordRequested { time: 2 }]
        );
        assert_eq!(session.outcome(), Outcome::Won);
        assert_eq!(
            session.record_entry("Ada"),
            Some(LeaderboardEntry::new("Ada", 2))
        );
        assert_eq!(session.record_entry("Ada"), None);
    }

    #[test]
    fn winning_by_reveal() {
        let mut session = session((1, 3), &[(0, 0)]);
        session.flag_cell((0, 0)).unwrap();
        session.select_cell((0, 1)).unwrap();

        let render = session.select_cell((0, 2)).unwrap();

        assert!(render.has_signal(Signal::Won));
        assert!(render.has_signal(Signal::RecordRequested { time: 0 }));
        assert!(session.is_over());
    }

    #[test]
    fn reset_returns_to_not_started_with_new_epoch() {
        let mut session = session((2, 2), &[(0, 0)]);
        session.select_cell((1, 1)).unwrap();
        session.tick(0);

        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1)]).unwrap();
        let render = session.reset(layout).unwrap();

        assert_eq!(render.signals, [Signal::Reset, Signal::Timer(0)]);
        assert_eq!(render.cells.len(), 4);
        assert!(render.cells.iter().all(|update| update.view == CellView::Hidden));
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.outcome(), Outcome::None);
        assert_eq!(session.elapsed_secs(), 0);
        assert_eq!(session.epoch(), 1);
        assert!(session.grid().cell_at((1, 1)).is_mine);
    }

    #[test]
    fn config_follows_prepared_layouts() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        let mut session = Session::new(GameConfig::DEFAULT, layout).unwrap();
        assert_eq!(session.config(), GameConfig::new_unchecked((3, 3), 1));

        let layout = MineLayout::from_mine_coords((4, 4), &[(0, 0), (3, 3)]).unwrap();
        session.reset(layout).unwrap();
        assert_eq!(session.config(), GameConfig::new_unchecked((4, 4), 2));
        assert_eq!(session.grid().size(), (4, 4));

        session.reset(RandomLayoutGenerator::new(1)).unwrap();
        assert_eq!(session.config(), GameConfig::new_unchecked((4, 4), 2));
    }

    #[test]
    fn stale_ticks_are_ignored_after_reset() {
        let mut session = session((2, 2), &[(0, 0)]);
        session.select_cell((1, 1)).unwrap();
        let old_epoch = session.epoch();

        session.reset(RandomLayoutGenerator::new(5)).unwrap();
        session.select_cell((0, 0)).ok();

        assert_eq!(session.tick(old_epoch), None);
        assert_eq!(session.elapsed_secs(), 0);
    }

    #[test]
    fn failed_reset_keeps_the_current_game() {
        let mut session = session((2, 2), &[(0, 0)]);
        session.select_cell((1, 1)).unwrap();
        let snapshot = session.clone();

        let full = MineLayout::from_mine_coords((1, 1), &[(0, 0)]).unwrap();
        assert_eq!(session.reset(full), Err(GameError::InvalidConfig));
        assert_eq!(session, snapshot);
    }

    #[test]
    fn out_of_bounds_input_is_an_error() {
        let mut session = session((2, 2), &[(0, 0)]);

        assert_eq!(session.select_cell((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(session.flag_cell((0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(session.state(), SessionState::NotStarted);
    }
}
