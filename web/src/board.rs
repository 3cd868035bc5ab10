use minesweep_core::{CellView, Coord, Coord2, Render, ToNdIndex};
use ndarray::Array2;

/// What is currently drawn, built only from the diffs a session reports.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Board {
    views: Array2<CellView>,
}

impl Board {
    pub(crate) fn new(size: Coord2) -> Self {
        Self {
            views: Array2::from_elem(size.to_nd_index(), CellView::Hidden),
        }
    }

    pub(crate) fn size(&self) -> Coord2 {
        let (rows, cols) = self.views.dim();
        (rows as Coord, cols as Coord)
    }

    pub(crate) fn view_at(&self, coords: Coord2) -> CellView {
        self.views[coords.to_nd_index()]
    }

    /// Applies the cell updates of `render`, returns whether anything was redrawn.
    pub(crate) fn apply(&mut self, render: &Render) -> bool {
        let mut changed = false;
        for update in &render.cells {
            match self.views.get_mut(update.coords.to_nd_index()) {
                Some(view) if *view != update.view => {
                    *view = update.view;
                    changed = true;
                }
                Some(_) => {}
                None => log::warn!("update outside of the board: {:?}", update),
            }
        }
        changed
    }
}
