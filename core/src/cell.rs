use serde::{Deserialize, Serialize};

/// Player-visible state of a cell; the only source of truth for what is shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    /// Number of mines among the up-to-8 neighbours, unused on mines.
    pub adjacent_mines: u8,
    pub state: CellState,
}

impl Cell {
    /// What the presentation layer should draw for this cell.
    pub const fn view(self) -> CellView {
        match self.state {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flag,
            CellState::Revealed if self.is_mine => CellView::Mine,
            CellState::Revealed if self.adjacent_mines == 0 => CellView::Blank,
            CellState::Revealed => CellView::Number(self.adjacent_mines),
        }
    }
}

/// Display value of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Blank,
    Number(u8),
    Mine,
    Flag,
}
