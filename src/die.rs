//! Weighted dice
//!
//! A die has a fixed, ordered set of distinct faces and a mutable weight per
//! face. Weights are relative likelihoods and are never normalized.

use std::collections::HashSet;

use parking_lot::RwLock;
use rand::distr::weighted::WeightedIndex;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SimError};
use crate::face::Face;

/// Weight every face starts with
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A die with arbitrary faces and per-face weights
///
/// Dice are meant to be shared between games through `Arc<Die>`; the weights
/// sit behind a lock so [`Die::set_weight`] works through a shared reference.
#[derive(Debug)]
pub struct Die {
    faces: Vec<Face>,
    weights: RwLock<Vec<f64>>,
}

impl Die {
    /// Create a die from distinct faces, each with weight 1.0
    pub fn new<I, F>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
        F: Into<Face>,
    {
        let faces: Vec<Face> = faces.into_iter().map(Into::into).collect();
        if faces.is_empty() {
            return Err(SimError::invalid("a die needs at least one face"));
        }

        let mut seen = HashSet::with_capacity(faces.len());
        for face in &faces {
            if !face.is_finite() {
                return Err(SimError::invalid(format!("face label must be finite: {}", face)));
            }
            if !seen.insert(face) {
                return Err(SimError::invalid(format!("duplicate face: {}", face)));
            }
        }

        let weights = RwLock::new(vec![DEFAULT_WEIGHT; faces.len()]);
        Ok(Self { faces, weights })
    }

    /// Create a numbered die with faces 1..=sides
    pub fn standard(sides: u32) -> Result<Self> {
        if sides == 0 {
            return Err(SimError::invalid("die sides must be at least 1"));
        }
        Self::new(1..=sides)
    }

    /// Faces in declaration order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of faces
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false: a die cannot be built without faces
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Change the weight of one face
    pub fn set_weight(&self, face: impl Into<Face>, weight: f64) -> Result<()> {
        let face = face.into();
        let idx = self
            .faces
            .iter()
            .position(|f| *f == face)
            .ok_or_else(|| SimError::UnknownFace(face.clone()))?;

        if !weight.is_finite() || weight <= 0.0 {
            return Err(SimError::invalid(format!(
                "weight for face {} must be a positive number, got {}",
                face, weight
            )));
        }

        self.weights.write()[idx] = weight;
        debug!(%face, weight, "die reweighted");
        Ok(())
    }

    /// Roll the die `count` times using the thread-local RNG
    pub fn roll(&self, count: usize) -> Result<Vec<Face>> {
        self.roll_with(count, &mut rand::rng())
    }

    /// Roll the die `count` times with replacement using the given RNG
    ///
    /// Selection probability is weight / sum(weights), read at call time.
    pub fn roll_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<Face>> {
        let dist = {
            let weights = self.weights.read();
            WeightedIndex::<f64>::new(weights.iter())
                .map_err(|e| SimError::invalid(format!("unusable die weights: {}", e)))?
        };

        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            results.push(self.faces[rng.sample(&dist)].clone());
        }
        Ok(results)
    }

    /// Snapshot of every face and its current weight
    pub fn current_state(&self) -> DieState {
        let weights = self.weights.read();
        let entries = self
            .faces
            .iter()
            .zip(weights.iter())
            .map(|(face, &weight)| FaceWeight {
                face: face.clone(),
                weight,
            })
            .collect();
        DieState { entries }
    }
}

/// A face and the weight it had when the snapshot was taken
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceWeight {
    pub face: Face,
    pub weight: f64,
}

/// Read-only view of a die's weights, in face declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DieState {
    entries: Vec<FaceWeight>,
}

impl DieState {
    /// Look up the weight of a face
    pub fn weight(&self, face: &Face) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.face == *face)
            .map(|e| e.weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceWeight> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for DieState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<10} weight", "face")?;
        for entry in &self.entries {
            writeln!(f, "{:<10} {}", entry.face.to_string(), entry.weight)?;
        }
        Ok(())
    }
}
