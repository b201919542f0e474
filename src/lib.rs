//! montecarlo - weighted dice simulator
//!
//! Build weighted dice, roll them together in a game, then analyze the most
//! recent play for jackpots, per-roll face counts and permutation and
//! combination frequencies.
//!
//! ```
//! use std::sync::Arc;
//! use montecarlo::{Analyzer, Die, Game};
//!
//! let coin = Arc::new(Die::new(["H", "T"]).unwrap());
//! coin.set_weight("H", 2.0).unwrap();
//!
//! let mut game = Game::new(vec![coin.clone(), coin]).unwrap();
//! game.play(100).unwrap();
//!
//! let mut analyzer = Analyzer::new(&game);
//! assert_eq!(analyzer.combo_count().unwrap().total(), 100);
//! ```

pub mod analyzer;
pub mod config;
pub mod die;
pub mod error;
pub mod face;
pub mod game;

pub use analyzer::{Analyzer, FaceCountTable, FrequencyTable};
pub use config::{DieConfig, SimConfig};
pub use die::{Die, DieState, FaceWeight};
pub use error::{Result, SimError};
pub use face::Face;
pub use game::{Game, Layout, NarrowEntry, PlayResults, PlayTable};
