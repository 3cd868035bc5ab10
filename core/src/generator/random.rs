use super::*;
use ndarray::Array2;

/// Uniform placement by rejection sampling: a drawn position that already holds a mine is drawn again.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        // terminates because at least one cell stays free
        let config = config.validate()?;
        let (rows, cols) = config.size;

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed = 0;
        let mut draws: u32 = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;

            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} in {} draws (seed {})",
            mines_placed,
            rows,
            cols,
            draws,
            self.seed
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}
