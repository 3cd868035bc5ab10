use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Mine layout plus the player-visible state of every cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    layout: MineLayout,
    cells: Array2<Cell>,
    flags_placed: CellCount,
}

impl Grid {
    /// Generates a fresh layout for `config` and builds the grid around it.
    pub fn new_game(config: GameConfig, generator: impl LayoutGenerator) -> Result<Self> {
        let layout = generator.generate(config)?;
        Ok(Self::from_layout(layout))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_mine = layout.contains_mine(coords);
            Cell {
                is_mine,
                adjacent_mines: if is_mine {
                    0
                } else {
                    layout.adjacent_mine_count(coords)
                },
                state: CellState::Hidden,
            }
        });

        Self {
            layout,
            cells,
            flags_placed: 0,
        }
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.layout.mine_count()) - i32::from(self.flags_placed)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        self.layout.validate_coords(coords)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self.cell_at(coords).view()
    }

    pub fn mine_positions(&self) -> Vec<Coord2> {
        self.layout.mine_positions()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| !cell.state.is_unrevealed())
            .count() as CellCount
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use CellState::*;

        let coords = self.layout.validate_coords(coords)?;

        match self.cells[coords.to_nd_index()].state {
            Revealed => return Ok(RevealOutcome::AlreadyRevealed),
            Flagged => {
                log::trace!("{:?} unflagged by reveal", coords);
                self.cells[coords.to_nd_index()].state = Hidden;
                self.flags_placed -= 1;
            }
            Hidden => {}
        }

        if self.layout.contains_mine(coords) {
            self.cells[coords.to_nd_index()].state = Revealed;
            log::debug!("mine hit at {:?}", coords);
            return Ok(RevealOutcome::Lost {
                mines: self.layout.mine_positions(),
            });
        }

        let mut revealed = Vec::new();
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            // queued more than once, or flagged by the player
            if cell.state != Hidden {
                continue;
            }

            cell.state = Revealed;
            let adjacent_mines = cell.adjacent_mines;
            revealed.push(visit_coords);

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].state == Hidden),
                );
            }
        }

        log::trace!("{:?} revealed {} cells", coords, revealed.len());
        Ok(RevealOutcome::Continue { revealed })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.layout.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match cell.state {
            Hidden => {
                cell.state = Flagged;
                self.flags_placed += 1;
                FlagOutcome::Toggled {
                    state: Flagged,
                    delta: 1,
                }
            }
            Flagged => {
                cell.state = Hidden;
                self.flags_placed -= 1;
                FlagOutcome::Toggled {
                    state: Hidden,
                    delta: -1,
                }
            }
            Revealed => FlagOutcome::Blocked,
        })
    }

    /// Every mine flagged and every other cell revealed, checked over the whole board.
    pub fn evaluate_win(&self) -> bool {
        self.cells.iter().all(|cell| {
            if cell.is_mine {
                cell.state == CellState::Flagged
            } else {
                !cell.state.is_unrevealed()
            }
        })
    }
}
