//! Helpers for working with microscopy images.

pub mod geometry;
pub mod number;

pub use self::{
    geometry::{Point2D, ShapeMismatch},
    number::Number,
};
