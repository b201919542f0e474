//! Analysis result tables

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::face::Face;

/// Occurrences of each face in each roll
///
/// Columns are faces in sorted order; rows are rolls, 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FaceCountTable {
    faces: Vec<Face>,
    rows: Vec<Vec<usize>>,
}

impl FaceCountTable {
    pub(crate) fn new(faces: Vec<Face>, rows: Vec<Vec<usize>>) -> Self {
        Self { faces, rows }
    }

    /// Column labels
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_rolls(&self) -> usize {
        self.rows.len()
    }

    /// Counts for one roll (1-based), one per column
    pub fn row(&self, roll: usize) -> Option<&[usize]> {
        self.rows.get(roll.checked_sub(1)?).map(Vec::as_slice)
    }

    /// How often `face` came up on roll `roll`
    ///
    /// None if the roll or the face is not part of the table.
    pub fn count(&self, roll: usize, face: &Face) -> Option<usize> {
        let col = self.faces.iter().position(|f| f == face)?;
        self.row(roll).map(|row| row[col])
    }
}

impl std::fmt::Display for FaceCountTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>6}", "roll")?;
        for face in &self.faces {
            write!(f, " {:>8}", face.to_string())?;
        }
        writeln!(f)?;
        for (r, row) in self.rows.iter().enumerate() {
            write!(f, "{:>6}", r + 1)?;
            for count in row {
                write!(f, " {:>8}", count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Observed frequency of every member of an outcome space
///
/// Keys are whole outcome tuples compared structurally, so no two distinct
/// tuples can ever share a slot. Members that never came up count 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    dice: usize,
    counts: BTreeMap<Vec<Face>, usize>,
}

impl FrequencyTable {
    /// Seed a table with every member of the space at count 0
    pub(crate) fn from_space(dice: usize, space: Vec<Vec<Face>>) -> Self {
        let counts = space.into_iter().map(|outcome| (outcome, 0)).collect();
        Self { dice, counts }
    }

    /// Count one observed outcome; false if it is not in the space
    pub(crate) fn record(&mut self, outcome: &[Face]) -> bool {
        match self.counts.get_mut(outcome) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    /// Number of dice per outcome tuple
    pub fn dice(&self) -> usize {
        self.dice
    }

    /// Number of space members (rows)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Frequency of one outcome tuple
    pub fn get(&self, outcome: &[Face]) -> Option<usize> {
        self.counts.get(outcome).copied()
    }

    /// Sum of every frequency
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Outcomes in sorted order with their frequencies
    pub fn iter(&self) -> impl Iterator<Item = (&[Face], usize)> {
        self.counts.iter().map(|(k, &v)| (k.as_slice(), v))
    }
}

#[derive(Serialize)]
struct FrequencyRow<'a> {
    outcome: &'a [Face],
    count: usize,
}

// Tuple keys are not valid JSON object keys, so emit a list of rows.
impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.iter()
                .map(|(outcome, count)| FrequencyRow { outcome, count }),
        )
    }
}

impl std::fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in 1..=self.dice {
            write!(f, "{:>8} ", format!("Die{}", d))?;
        }
        writeln!(f, "{:>8}", "count")?;
        for (outcome, count) in self.iter() {
            for face in outcome {
                write!(f, "{:>8} ", face.to_string())?;
            }
            writeln!(f, "{:>8}", count)?;
        }
        Ok(())
    }
}
