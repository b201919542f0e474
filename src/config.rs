//! Simulation configuration
//!
//! Layered with figment: built-in defaults, then an optional TOML file, then
//! `MONTECARLO_*` environment variables.
//!
//! ```toml
//! rolls = 1000
//! seed = 42
//!
//! [[dice]]
//! faces = ["H", "T"]
//! weights = { H = 2.0 }
//! copies = 3
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::die::Die;
use crate::error::{Result, SimError};
use crate::face::Face;
use crate::game::Game;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "MONTECARLO_";

/// One kind of die in the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieConfig {
    /// Face labels, numbers or strings
    pub faces: Vec<Face>,
    /// Weights keyed by face label; unlisted faces keep 1.0
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    /// How many of this die the game rolls (all share one die)
    #[serde(default = "default_copies")]
    pub copies: usize,
}

fn default_copies() -> usize {
    1
}

impl DieConfig {
    /// A numbered die with faces 1..=sides
    pub fn standard(sides: u32, copies: usize) -> Self {
        Self {
            faces: (1..=sides).map(Face::from).collect(),
            weights: BTreeMap::new(),
            copies,
        }
    }

    /// Build the die and apply the configured weights
    ///
    /// A weight key must name exactly one face. Faces `1` and `"1"` share
    /// the key "1", so weighting either of them is rejected.
    pub fn build(&self) -> Result<Die> {
        let die = Die::new(self.faces.iter().cloned())?;
        for (label, &weight) in &self.weights {
            let matches: Vec<&Face> = die
                .faces()
                .iter()
                .filter(|f| f.to_string() == *label)
                .collect();
            let face = match matches.as_slice() {
                [face] => (*face).clone(),
                [] => label.parse()?,
                _ => {
                    return Err(SimError::invalid(format!(
                        "weight key {:?} matches {} faces",
                        label,
                        matches.len()
                    )))
                }
            };
            die.set_weight(face, weight)?;
        }
        Ok(die)
    }
}

/// Everything needed to run one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Rolls per play
    pub rolls: usize,
    /// RNG seed for reproducible runs
    pub seed: Option<u64>,
    /// Dice in game order
    pub dice: Vec<DieConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rolls: 1000,
            seed: None,
            dice: vec![DieConfig::standard(6, 2)],
        }
    }
}

impl SimConfig {
    /// The layered provider chain
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(SimConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load and validate configuration
    ///
    /// A path that is given must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(SimError::invalid(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        let config: SimConfig = Self::figment(path)
            .extract()
            .map_err(|e| SimError::invalid(format!("bad configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values figment cannot check for us
    pub fn validate(&self) -> Result<()> {
        if self.rolls == 0 {
            return Err(SimError::invalid("rolls must be at least 1"));
        }
        if self.dice.is_empty() {
            return Err(SimError::invalid("at least one die must be configured"));
        }
        if let Some(i) = self.dice.iter().position(|d| d.copies == 0) {
            return Err(SimError::invalid(format!("die #{} has zero copies", i + 1)));
        }
        Ok(())
    }

    /// Build every die, repeating shared handles for copies
    pub fn build_dice(&self) -> Result<Vec<Arc<Die>>> {
        let mut dice = Vec::new();
        for spec in &self.dice {
            let die = Arc::new(spec.build()?);
            dice.extend(std::iter::repeat(die).take(spec.copies));
        }
        Ok(dice)
    }

    /// Build a game over the configured dice
    pub fn build_game(&self) -> Result<Game> {
        Game::new(self.build_dice()?)
    }
}
