//! Outcome analysis
//!
//! Statistics over a game's most recent play:
//! - Jackpots (rolls where every die shows the same face)
//! - Per-roll face counts
//! - Permutation frequencies (ordered outcome tuples)
//! - Combination frequencies (sorted outcome multisets)
//!
//! Permutation and combination counting enumerate the whole outcome space up
//! front so that outcomes which never came up are still listed. That space is
//! exponential in the number of dice (`faces^dice` permutations,
//! `C(faces + dice - 1, dice)` combinations); spaces above
//! [`LARGE_SPACE_WARN`] members are logged at warn level.

mod space;
mod tables;

pub use space::{combination_space_size, combinations, permutation_space_size, permutations};
pub use tables::{FaceCountTable, FrequencyTable};

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::error::{Result, SimError};
use crate::face::Face;
use crate::game::Game;

/// Space size above which enumeration is logged as expensive
pub const LARGE_SPACE_WARN: usize = 1_000_000;

/// Read-only analyzer over one game
///
/// Every computation reads the game's current last play; the most recent
/// result of each kind is kept on the analyzer.
#[derive(Debug)]
pub struct Analyzer<'a> {
    game: &'a Game,
    face_counts: Option<FaceCountTable>,
    permutations: Option<FrequencyTable>,
    combinations: Option<FrequencyTable>,
}

impl<'a> Analyzer<'a> {
    /// Create an analyzer for a game
    pub fn new(game: &'a Game) -> Self {
        Self {
            game,
            face_counts: None,
            permutations: None,
            combinations: None,
        }
    }

    /// The analyzed game
    pub fn game(&self) -> &'a Game {
        self.game
    }

    /// Faces of the game's first die
    pub fn faces(&self) -> &'a [Face] {
        self.game.faces()
    }

    /// Number of rolls on which every die showed the same face
    ///
    /// Returns 0 when the game has not been played.
    pub fn jackpot_count(&self) -> usize {
        self.game
            .last_play()
            .rows()
            .iter()
            .filter(|row| row.windows(2).all(|pair| pair[0] == pair[1]))
            .count()
    }

    /// Count each face within every roll
    ///
    /// Columns cover the first die's faces plus any other face that came up,
    /// in sorted order. Faces absent from a roll count 0.
    pub fn face_counts_per_roll(&mut self) -> &FaceCountTable {
        let play = self.game.last_play();

        let columns: BTreeSet<&Face> = self
            .game
            .faces()
            .iter()
            .chain(play.rows().iter().flatten())
            .collect();
        let index: BTreeMap<&Face, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, face)| (*face, i))
            .collect();

        let rows = play
            .rows()
            .iter()
            .map(|row| {
                let mut counts = vec![0usize; index.len()];
                for face in row {
                    counts[index[face]] += 1;
                }
                counts
            })
            .collect();

        let faces = columns.into_iter().cloned().collect();
        debug!(rolls = play.num_rolls(), "face counts computed");
        self.face_counts.insert(FaceCountTable::new(faces, rows))
    }

    /// Frequency of every ordered outcome tuple
    ///
    /// The table has `faces^dice` rows built from the first die's faces; die
    /// position matters, so (1, 2) and (2, 1) are separate rows.
    pub fn permutation_count(&mut self) -> Result<&FrequencyTable> {
        let faces = self.game.faces();
        let dice = self.game.dice().len();
        check_space(
            "permutation",
            permutation_space_size(faces.len(), dice),
            faces.len(),
            dice,
        )?;

        let mut table = FrequencyTable::from_space(dice, permutations(faces, dice));
        let unmatched = self
            .game
            .last_play()
            .rows()
            .iter()
            .filter(|row| !table.record(row))
            .count();
        log_unmatched("permutation", unmatched);

        Ok(self.permutations.insert(table))
    }

    /// Frequency of every sorted outcome multiset
    ///
    /// The table has `C(faces + dice - 1, dice)` rows; die position is
    /// ignored, so (1, 2) and (2, 1) both count toward (1, 2).
    pub fn combo_count(&mut self) -> Result<&FrequencyTable> {
        let faces = self.game.faces();
        let dice = self.game.dice().len();
        check_space(
            "combination",
            combination_space_size(faces.len(), dice),
            faces.len(),
            dice,
        )?;

        let mut table = FrequencyTable::from_space(dice, combinations(faces, dice));
        let unmatched = self
            .game
            .last_play()
            .rows()
            .iter()
            .filter(|row| {
                let mut sorted = row.to_vec();
                sorted.sort();
                !table.record(&sorted)
            })
            .count();
        log_unmatched("combination", unmatched);

        Ok(self.combinations.insert(table))
    }

    /// Most recent result of [`Analyzer::face_counts_per_roll`]
    pub fn last_face_counts(&self) -> Option<&FaceCountTable> {
        self.face_counts.as_ref()
    }

    /// Most recent result of [`Analyzer::permutation_count`]
    pub fn last_permutations(&self) -> Option<&FrequencyTable> {
        self.permutations.as_ref()
    }

    /// Most recent result of [`Analyzer::combo_count`]
    pub fn last_combinations(&self) -> Option<&FrequencyTable> {
        self.combinations.as_ref()
    }
}

fn check_space(kind: &str, size: Option<usize>, faces: usize, dice: usize) -> Result<usize> {
    let size = size.ok_or_else(|| {
        SimError::invalid(format!(
            "{} space of {} faces over {} dice is too large to enumerate",
            kind, faces, dice
        ))
    })?;
    if size > LARGE_SPACE_WARN {
        warn!(kind, size, faces, dice, "enumerating a large outcome space");
    }
    Ok(size)
}

fn log_unmatched(kind: &str, unmatched: usize) {
    if unmatched > 0 {
        debug!(
            kind,
            unmatched, "rolls with faces outside the first die were not counted"
        );
    }
}
