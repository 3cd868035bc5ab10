use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// A prepared layout generates itself; its own size and mine count take precedence over `config`.
impl LayoutGenerator for MineLayout {
    fn generate(self, _config: GameConfig) -> Result<MineLayout> {
        self.game_config().validate()?;
        Ok(self)
    }
}
