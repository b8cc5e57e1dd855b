use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2, GameConfig, MineLayout, ToNdIndex};

/// Places the mines for a fresh board. `safe` is the player's first reveal
/// and must never receive a mine.
pub trait MineGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> MineLayout;
}

/// Uniform random placement from a 64-bit seed.
///
/// Draws `mines` distinct linear indices out of the `cells - 1` candidates
/// left after removing the safe cell, then shifts every draw at or past the
/// safe index. Termination does not depend on density, unlike redrawing
/// until enough distinct cells turn up.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> MineLayout {
        let width = config.size.0 as usize;
        let total = config.total_cells() as usize;
        let safe_index = safe.0 as usize + safe.1 as usize * width;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for drawn in rand::seq::index::sample(&mut rng, total - 1, config.mines as usize) {
            let index = if drawn >= safe_index { drawn + 1 } else { drawn };
            let coords = ((index % width) as Coord, (index / width) as Coord);
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        debug_assert_eq!(layout.mine_count(), config.mines);
        debug_assert!(!layout.contains_mine(safe));
        log::debug!(
            "placed {} mines on {}x{} from seed {}",
            layout.mine_count(),
            config.size.0,
            config.size.1,
            self.seed
        );
        layout
    }
}
