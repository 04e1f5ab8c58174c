use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde_derive::{Deserialize, Serialize};
use winnow::{
    ascii::{dec_int, float},
    combinator::{alt, eof, terminated},
    PResult, Parser,
};

/// Image routines are inconsistent about how they report coordinates.
/// A pixel index is an integer, but a centroid or a fitted peak lands between pixels.
/// This type lets a single point carry either without losing precision.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i),
            Self::Float(_) => None,
        }
    }

    pub fn as_float(self) -> Option<f64> {
        match self {
            Self::Int(_) => None,
            Self::Float(f) => Some(f),
        }
    }

    /// Truncates towards zero for floats.
    pub fn into_int(self) -> i64 {
        match self {
            Self::Int(i) => i,
            Self::Float(f) => f as i64,
        }
    }

    pub fn into_float(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<i32> for Number {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for Number {
    fn from(i: u32) -> Self {
        Self::Int(i.into())
    }
}

impl From<f32> for Number {
    fn from(f: f32) -> Self {
        Self::Float(f.into())
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

// Floats always carry a fractional part or an exponent, so the text form parses back to the same
// variant.
impl Display for Number {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(formatter, "{i}"),
            Self::Float(f) => write!(formatter, "{f:?}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("`{text}` is neither an integer nor a float")]
#[diagnostic(code(jicimage::number::parse))]
pub struct ParseNumberError {
    pub text: String,
}

impl FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_number.parse(s.trim()).map_err(|_| ParseNumberError {
            text: s.to_owned(),
        })
    }
}

fn parse_number(input: &mut &str) -> PResult<Number> {
    alt((
        terminated(dec_int, eof).map(Number::Int),
        terminated(float, eof).map(Number::Float),
    ))
    .parse_next(input)
}
