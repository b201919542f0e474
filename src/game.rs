//! Multi-die games
//!
//! A game rolls a fixed list of shared dice together and keeps the table of
//! the most recent play. Each play replaces the previous table.

use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::die::Die;
use crate::error::{Result, SimError};
use crate::face::Face;

/// Outcomes of one play: `rows[roll][die]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayTable {
    rows: Vec<Vec<Face>>,
}

impl PlayTable {
    /// Number of rolls (rows)
    pub fn num_rolls(&self) -> usize {
        self.rows.len()
    }

    /// Number of dice (columns), 0 when nothing has been played
    pub fn num_dice(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Outcome of die `die` on roll `roll`, both 1-based
    pub fn get(&self, roll: usize, die: usize) -> Option<&Face> {
        self.rows.get(roll.checked_sub(1)?)?.get(die.checked_sub(1)?)
    }

    /// One row per roll, one entry per die
    pub fn rows(&self) -> &[Vec<Face>] {
        &self.rows
    }

    /// Flatten into (roll, die, face) entries, roll outer and die inner
    pub fn to_narrow(&self) -> Vec<NarrowEntry> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().enumerate().map(move |(d, face)| NarrowEntry {
                    roll: r + 1,
                    die: d + 1,
                    face: face.clone(),
                })
            })
            .collect()
    }
}

impl std::fmt::Display for PlayTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>6}", "roll")?;
        for d in 1..=self.num_dice() {
            write!(f, " {:>8}", d)?;
        }
        writeln!(f)?;
        for (r, row) in self.rows.iter().enumerate() {
            write!(f, "{:>6}", r + 1)?;
            for face in row {
                write!(f, " {:>8}", face.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A single cell of the long-form results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrowEntry {
    pub roll: usize,
    pub die: usize,
    pub face: Face,
}

/// Shape of the table returned by [`Game::results`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Rows are rolls, columns are dice
    #[default]
    Wide,
    /// One (roll, die, face) entry per cell
    Narrow,
}

impl From<bool> for Layout {
    fn from(wide: bool) -> Self {
        if wide {
            Layout::Wide
        } else {
            Layout::Narrow
        }
    }
}

impl FromStr for Layout {
    type Err = SimError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wide" | "true" => Ok(Layout::Wide),
            "narrow" | "long" | "false" => Ok(Layout::Narrow),
            other => Err(SimError::invalid(format!(
                "layout must be wide or narrow, got '{}'",
                other
            ))),
        }
    }
}

/// Results of the most recent play in the requested layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlayResults {
    Wide(PlayTable),
    Narrow(Vec<NarrowEntry>),
}

impl PlayResults {
    /// Number of cells regardless of layout
    pub fn cell_count(&self) -> usize {
        match self {
            PlayResults::Wide(table) => table.num_rolls() * table.num_dice(),
            PlayResults::Narrow(entries) => entries.len(),
        }
    }
}

/// A set of dice rolled together
#[derive(Debug)]
pub struct Game {
    dice: Vec<Arc<Die>>,
    last_play: PlayTable,
}

impl Game {
    /// Create a game over one or more dice
    ///
    /// Dice may have different faces; nothing checks that they match.
    pub fn new(dice: Vec<Arc<Die>>) -> Result<Self> {
        if dice.is_empty() {
            return Err(SimError::invalid("a game needs at least one die"));
        }
        Ok(Self {
            dice,
            last_play: PlayTable::default(),
        })
    }

    /// The dice in play order
    pub fn dice(&self) -> &[Arc<Die>] {
        &self.dice
    }

    /// Roll every die `rolls` times using the thread-local RNG
    pub fn play(&mut self, rolls: usize) -> Result<()> {
        self.play_with(rolls, &mut rand::rng())
    }

    /// Roll every die `rolls` times, replacing the last play
    ///
    /// Each die draws its whole sequence before the next die starts.
    pub fn play_with<R: Rng + ?Sized>(&mut self, rolls: usize, rng: &mut R) -> Result<()> {
        if rolls == 0 {
            return Err(SimError::invalid("number of rolls must be at least 1"));
        }

        let columns = self
            .dice
            .iter()
            .map(|die| die.roll_with(rolls, &mut *rng))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = vec![Vec::with_capacity(self.dice.len()); rolls];
        for column in columns {
            for (row, face) in rows.iter_mut().zip(column) {
                row.push(face);
            }
        }

        self.last_play = PlayTable { rows };
        debug!(rolls, dice = self.dice.len(), "game played");
        Ok(())
    }

    /// Borrow the table of the most recent play
    pub fn last_play(&self) -> &PlayTable {
        &self.last_play
    }

    /// Results of the most recent play in the given layout
    pub fn results(&self, layout: Layout) -> PlayResults {
        match layout {
            Layout::Wide => PlayResults::Wide(self.last_play.clone()),
            Layout::Narrow => PlayResults::Narrow(self.last_play.to_narrow()),
        }
    }

    /// Faces of the first die
    ///
    /// Only representative of the whole game when every die shares a face set.
    pub fn faces(&self) -> &[Face] {
        self.dice[0].faces()
    }
}
