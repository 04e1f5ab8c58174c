//! Geometric primitives for locating things in images.

mod parse;
mod point;

use itertools::Itertools;

pub use self::{
    parse::ParsePointError,
    point::{Point2D, ShapeMismatch},
};

/// A coordinate list had a row that was not a coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("Row {row} is not a coordinate pair")]
#[diagnostic(code(jicimage::geometry::invalid_row))]
pub struct InvalidRow {
    pub row: usize,
    #[source]
    pub shape: ShapeMismatch,
}

/// Builds points from an `N x 2` coordinate list, one row per point.
pub fn points_from_rows<T, R, I>(rows: I) -> Result<Vec<Point2D<T>>, InvalidRow>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = T>,
{
    rows.into_iter()
        .enumerate()
        .map(|(row, coords)| {
            Point2D::try_from_iter(coords).map_err(|shape| InvalidRow { row, shape })
        })
        .collect()
}

/// Builds points from interleaved coordinates: `x0, y0, x1, y1, ...`.
pub fn points_from_flat<T, I>(values: I) -> Result<Vec<Point2D<T>>, InvalidRow>
where
    I: IntoIterator<Item = T>,
{
    let mut pairs = values.into_iter().tuples::<(T, T)>();
    let points = pairs.by_ref().map(Point2D::from_pair).collect_vec();

    match pairs.into_buffer().count() {
        0 => Ok(points),
        found => {
            log::debug!("Flat coordinate list ends with {found} unpaired value(s)");
            Err(InvalidRow {
                row: points.len(),
                shape: ShapeMismatch::TooFew { found },
            })
        }
    }
}
