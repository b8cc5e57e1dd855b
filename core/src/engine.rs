use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    /// Mines are not placed yet; the first reveal decides where they cannot be.
    AwaitingFirstReveal,
    InPlay,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::AwaitingFirstReveal
    }
}

/// What a renderer sees at one coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Exploded,
}

/// Mine layout plus the per-cell adjacency counts, computed once right after
/// placement and immutable from then on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct PlacedMines {
    layout: MineLayout,
    counts: Array2<u8>,
}

impl PlacedMines {
    fn new(layout: MineLayout) -> Self {
        let mut counts: Array2<u8> = Array2::default(layout.size().to_nd_index());
        let (x_end, y_end) = layout.size();
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                if !layout.contains_mine(coords) {
                    counts[coords.to_nd_index()] = layout.adjacent_mine_count(coords);
                }
            }
        }
        Self { layout, counts }
    }

    fn count_at(&self, coords: Coord2) -> u8 {
        self.counts[coords.to_nd_index()]
    }
}

/// A game from the first reveal to a terminal state.
///
/// Open and mark state are coordinate sets rather than a per-cell enum: a
/// mark may legally sit on an opened zero-count cell, and the open set is the
/// visited check that keeps the flood fill from looping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board<G = RandomMineGenerator> {
    config: GameConfig,
    generator: G,
    placed: Option<PlacedMines>,
    open: BTreeSet<Coord2>,
    marks: BTreeSet<Coord2>,
    state: BoardState,
}

impl Board {
    /// Board with the default seeded generator. Mines are not placed until
    /// the first reveal.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }
}

impl<G: MineGenerator> Board<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            generator,
            placed: None,
            open: BTreeSet::new(),
            marks: BTreeSet::new(),
            state: Default::default(),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, BoardState::Won)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Opens a cell. The very first reveal places the mines, keeping the
    /// target safe, then proceeds as a normal reveal.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_ended()?;

        if self.open.contains(&coords) {
            return Ok(RevealOutcome::AlreadyOpen);
        }

        let config = self.config;
        let generator = &mut self.generator;
        let placed = self.placed.get_or_insert_with(|| {
            log::debug!("first reveal at {:?}, placing mines", coords);
            PlacedMines::new(generator.generate(config, coords))
        });

        if placed.layout.contains_mine(coords) {
            // The exploded mine never enters the open set.
            log::debug!("mine hit at {:?}", coords);
            self.state = BoardState::Lost;
            return Ok(RevealOutcome::HitMine);
        }

        let mut opened = Vec::new();
        let mut worklist = VecDeque::from([coords]);

        while let Some(visit) = worklist.pop_front() {
            // Open-set membership doubles as the visited check; the zero
            // region is a cyclic graph and the worklist holds duplicates.
            if !self.open.insert(visit) {
                continue;
            }
            self.marks.remove(&visit);
            opened.push(visit);

            let count = placed.count_at(visit);
            log::trace!("opened {:?}, adjacent mines: {}", visit, count);
            if count == 0 {
                worklist.extend(placed.layout.iter_neighbors(visit).filter(|pos| {
                    !self.open.contains(pos) && !placed.layout.contains_mine(*pos)
                }));
            }
        }

        if matches!(self.state, BoardState::AwaitingFirstReveal) {
            self.state = BoardState::InPlay;
        }
        self.evaluate_win();
        Ok(RevealOutcome::Opened(opened))
    }

    /// Toggles the suspected-mine mark on a cell. Opened numbered cells
    /// cannot carry marks; anything else, including an opened zero-count
    /// cell, can.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_ended()?;

        if self.open.contains(&coords) && self.count_at(coords) > 0 {
            return Ok(FlagOutcome::RejectedNumberedCell);
        }

        let flagged = if self.marks.remove(&coords) {
            false
        } else {
            self.marks.insert(coords);
            true
        };
        self.evaluate_win();
        Ok(FlagOutcome::Toggled { flagged })
    }

    /// Render-facing view of one cell; `coords` must be in bounds. Marks take
    /// precedence over opened zero cells, and an unopened mine looks exactly
    /// like a hidden cell until the game is lost; the loss screen exposes
    /// every mine and drops the marks.
    pub fn cell_view(&self, coords: Coord2) -> CellView {
        if matches!(self.state, BoardState::Lost) {
            return self.cell_view_lost(coords);
        }

        if self.marks.contains(&coords) {
            CellView::Flagged
        } else if self.open.contains(&coords) {
            CellView::Revealed(self.count_at(coords))
        } else {
            CellView::Hidden
        }
    }

    fn cell_view_lost(&self, coords: Coord2) -> CellView {
        let Some(placed) = &self.placed else {
            return CellView::Hidden;
        };
        if placed.layout.contains_mine(coords) {
            CellView::Exploded
        } else if self.open.contains(&coords) {
            CellView::Revealed(placed.count_at(coords))
        } else {
            CellView::Hidden
        }
    }

    /// A win is exactly-matching marks: as many as there are mines, each one
    /// on a mine. Checked after a command completes, never mid-flood, and
    /// never before the mines exist.
    fn evaluate_win(&mut self) {
        let Some(placed) = &self.placed else {
            return;
        };
        if self.marks.len() == placed.layout.mine_count() as usize
            && self.marks.iter().all(|&pos| placed.layout.contains_mine(pos))
        {
            log::debug!("all {} mines flagged", placed.layout.mine_count());
            self.state = BoardState::Won;
        }
    }

    fn count_at(&self, coords: Coord2) -> u8 {
        self.placed.as_ref().map_or(0, |placed| placed.count_at(coords))
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.config.size;
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    fn check_not_ended(&self) -> Result<()> {
        if self.state.is_terminal() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
