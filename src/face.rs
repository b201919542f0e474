//! Face labels
//!
//! A die face is either a number (integer or float) or a piece of text.
//! Numbers order first by numeric value, with an integer placed just before
//! a float of the same value; text follows, ordered lexicographically.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// One labeled outcome a die can produce
///
/// Float labels compare bit-for-bit, so `0.0` and `-0.0` are different
/// faces. Dice refuse NaN and infinite labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Face {
    /// Integer label
    Int(i64),
    /// Fractional label
    Float(f64),
    /// Text label
    Text(String),
}

impl Face {
    /// Get the label as text, if it is a text face
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Face::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the label as an integer, if it is an integer face
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Face::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the label as a float, if it is a float face
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Face::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// False only for NaN or infinite float labels
    pub fn is_finite(&self) -> bool {
        match self {
            Face::Float(x) => x.is_finite(),
            _ => true,
        }
    }
}

/// Exact comparison of an integer against a finite float
fn cmp_int_float(n: i64, x: f64) -> Ordering {
    if x.is_nan() {
        return Ordering::Less;
    }
    let floor = x.floor();
    // 2^63 is exactly representable; anything at or above it beats every i64
    if floor >= 9_223_372_036_854_775_808.0 {
        return Ordering::Less;
    }
    if floor < i64::MIN as f64 {
        return Ordering::Greater;
    }
    match n.cmp(&(floor as i64)) {
        Ordering::Equal if x > floor => Ordering::Less,
        // Same value: the integer face goes first
        Ordering::Equal => Ordering::Less,
        other => other,
    }
}

impl Ord for Face {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Face::Int(a), Face::Int(b)) => a.cmp(b),
            (Face::Float(a), Face::Float(b)) => a.total_cmp(b),
            (Face::Int(a), Face::Float(b)) => cmp_int_float(*a, *b),
            (Face::Float(a), Face::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Face::Text(a), Face::Text(b)) => a.cmp(b),
            (Face::Text(_), _) => Ordering::Greater,
            (_, Face::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Face {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Face::Int(a), Face::Int(b)) => a == b,
            (Face::Float(a), Face::Float(b)) => a.to_bits() == b.to_bits(),
            (Face::Text(a), Face::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Face {}

impl Hash for Face {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Face::Int(n) => n.hash(state),
            Face::Float(x) => x.to_bits().hash(state),
            Face::Text(s) => s.hash(state),
        }
    }
}

impl FromStr for Face {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SimError::invalid("face label cannot be empty"));
        }
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Face::Int(n));
        }
        // "nan" and "inf" stay text
        match s.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Face::Float(x)),
            _ => Ok(Face::Text(s.to_string())),
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Int(n) => write!(f, "{}", n),
            // Debug keeps the ".0" so 2.0 never prints like the integer 2
            Face::Float(x) => write!(f, "{:?}", x),
            Face::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Face {
    fn from(s: &str) -> Self {
        Face::Text(s.to_string())
    }
}

impl From<String> for Face {
    fn from(s: String) -> Self {
        Face::Text(s)
    }
}

impl From<i64> for Face {
    fn from(n: i64) -> Self {
        Face::Int(n)
    }
}

impl From<i32> for Face {
    fn from(n: i32) -> Self {
        Face::Int(n as i64)
    }
}

impl From<u32> for Face {
    fn from(n: u32) -> Self {
        Face::Int(n as i64)
    }
}

impl From<f64> for Face {
    fn from(x: f64) -> Self {
        Face::Float(x)
    }
}
