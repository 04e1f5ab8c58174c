use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Sub},
};

use serde_derive::{Deserialize, Serialize};

use crate::Number;

/// A location in the image plane.
///
/// There are two ways in: [`Point2D::new`] takes the two coordinates as separate values, and
/// [`Point2D::from_pair`] (or the `From` impls) takes them as one ordered pair, e.g. a `(row, col)`
/// tuple handed back by an image routine. The constructor is picked by the caller, so
/// `Point2D::new(a, b)` never looks inside `a`, even when `a` is a pair itself.
///
/// Collections whose length is only known at runtime go through [`Point2D::try_from_iter`], which
/// fails with [`ShapeMismatch`] unless it sees exactly two coordinates.
///
/// The fields are private and nothing mutates them after construction.
#[derive(
    Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Clone, Copy, Serialize, Deserialize,
)]
#[serde(
    try_from = "PointRepr<T>",
    bound(deserialize = "T: serde::Deserialize<'de>")
)]
pub struct Point2D<T> {
    x: T,
    y: T,
}

impl<T> Point2D<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn from_pair((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }

    /// Unpacks a sequence of exactly two coordinates.
    ///
    /// At most three elements are pulled from `coords`, so an unbounded iterator is rejected
    /// without being drained.
    pub fn try_from_iter<I>(coords: I) -> Result<Self, ShapeMismatch>
    where
        I: IntoIterator<Item = T>,
    {
        let mut coords = coords.into_iter();
        let result = match (coords.next(), coords.next(), coords.next()) {
            (Some(x), Some(y), None) => Ok(Self::new(x, y)),
            (None, _, _) => Err(ShapeMismatch::TooFew { found: 0 }),
            (Some(_), None, _) => Err(ShapeMismatch::TooFew { found: 1 }),
            (Some(_), Some(_), Some(_)) => {
                let (lower, upper) = coords.size_hint();
                let found = (upper == Some(lower))
                    .then_some(lower)
                    .and_then(|rest| rest.checked_add(3));
                Err(ShapeMismatch::TooMany { found })
            }
        };

        if let Err(err) = &result {
            log::trace!("Rejected coordinate sequence: {err}");
        }
        result
    }

    pub fn x(&self) -> &T {
        &self.x
    }

    pub fn y(&self) -> &T {
        &self.y
    }

    pub fn into_pair(self) -> (T, T) {
        (self.x, self.y)
    }

    pub fn into_array(self) -> [T; 2] {
        [self.x, self.y]
    }

    pub fn map<U, F>(self, mut f: F) -> Point2D<U>
    where
        F: FnMut(T) -> U,
    {
        Point2D::new(f(self.x), f(self.y))
    }

    pub fn cast<U: From<T>>(self) -> Point2D<U> {
        self.map(U::from)
    }

    /// Swaps the coordinates, converting between `(row, col)` and `(x, y)` ordering.
    pub fn transposed(self) -> Self {
        Self::new(self.y, self.x)
    }
}

impl Point2D<Number> {
    pub fn into_float(self) -> Point2D<f64> {
        self.map(Number::into_float)
    }

    /// Whether both coordinates are integer pixel indices.
    pub fn is_integral(&self) -> bool {
        matches!((self.x, self.y), (Number::Int(_), Number::Int(_)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ShapeMismatch {
    #[error("Expected 2 coordinates, found {found}")]
    #[diagnostic(code(jicimage::geometry::too_few_coordinates))]
    TooFew { found: usize },
    #[error("Expected 2 coordinates, found {}", describe_excess(.found))]
    #[diagnostic(
        code(jicimage::geometry::too_many_coordinates),
        help("a point is never built from a truncated sequence")
    )]
    TooMany { found: Option<usize> },
}

fn describe_excess(found: &Option<usize>) -> String {
    match found {
        Some(n) => n.to_string(),
        None => String::from("more than 2"),
    }
}

impl<T> From<(T, T)> for Point2D<T> {
    fn from(pair: (T, T)) -> Self {
        Self::from_pair(pair)
    }
}

impl<T> From<[T; 2]> for Point2D<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<T> TryFrom<Vec<T>> for Point2D<T> {
    type Error = ShapeMismatch;

    fn try_from(coords: Vec<T>) -> Result<Self, Self::Error> {
        Self::try_from_iter(coords)
    }
}

impl<T: Clone> TryFrom<&[T]> for Point2D<T> {
    type Error = ShapeMismatch;

    fn try_from(coords: &[T]) -> Result<Self, Self::Error> {
        Self::try_from_iter(coords.iter().cloned())
    }
}

// Points can be read back either as a map with `x`/`y` or as a plain sequence.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr<T> {
    Pair(Vec<T>),
    Fields { x: T, y: T },
}

impl<T> TryFrom<PointRepr<T>> for Point2D<T> {
    type Error = ShapeMismatch;

    fn try_from(repr: PointRepr<T>) -> Result<Self, Self::Error> {
        match repr {
            PointRepr::Pair(coords) => Self::try_from_iter(coords),
            PointRepr::Fields { x, y } => Ok(Self::new(x, y)),
        }
    }
}

impl<T: Add> Add for Point2D<T> {
    type Output = Point2D<T::Output>;

    fn add(self, other: Self) -> Self::Output {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Sub> Sub for Point2D<T> {
    type Output = Point2D<T::Output>;

    fn sub(self, other: Self) -> Self::Output {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Display> Display for Point2D<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::iter;

    use pretty_assertions::assert_eq;

    #[test]
    fn construction_from_scalars() {
        let p = Point2D::new(3, 4);
        assert_eq!(p.x(), &3);
        assert_eq!(p.y(), &4);
    }

    #[test]
    fn construction_from_pairs() {
        assert_eq!(Point2D::from_pair((5, 6)), Point2D::new(5, 6));
        assert_eq!(Point2D::from((5, 6)), Point2D::new(5, 6));
        assert_eq!(Point2D::from([7, 8]), Point2D::new(7, 8));
        assert_eq!(Point2D::try_from(vec![7, 8]), Ok(Point2D::new(7, 8)));
        assert_eq!(Point2D::try_from(&[1.5, 2.5][..]), Ok(Point2D::new(1.5, 2.5)));
    }

    #[test]
    fn scalar_constructor_never_unpacks() {
        let p = Point2D::new([1, 2], [3, 4]);
        assert_eq!(p.x(), &[1, 2]);
        assert_eq!(p.y(), &[3, 4]);

        let p = Point2D::new((1, 2), (3, 0));
        assert_eq!(p.x(), &(1, 2));
        assert_eq!(p.y(), &(3, 0));
    }

    #[test]
    fn wrong_lengths_are_rejected() {
        assert_eq!(
            Point2D::try_from(vec![1, 2, 3]),
            Err(ShapeMismatch::TooMany { found: Some(3) })
        );
        assert_eq!(
            Point2D::try_from(&[1, 2, 3, 4, 5][..]),
            Err(ShapeMismatch::TooMany { found: Some(5) })
        );
        assert_eq!(
            Point2D::try_from(vec![1]),
            Err(ShapeMismatch::TooFew { found: 1 })
        );
        assert_eq!(
            Point2D::<i32>::try_from(Vec::new()),
            Err(ShapeMismatch::TooFew { found: 0 })
        );
    }

    #[test]
    fn unbounded_sequences_are_rejected_without_draining() {
        assert_eq!(
            Point2D::try_from_iter(iter::repeat(0)),
            Err(ShapeMismatch::TooMany { found: None })
        );
        assert_eq!(
            Point2D::try_from_iter((0..10).filter(|n| n % 2 == 0)),
            Err(ShapeMismatch::TooMany { found: None })
        );
        // Exact, but one past what `usize` can count.
        assert_eq!(
            Point2D::try_from_iter(0..=usize::MAX),
            Err(ShapeMismatch::TooMany { found: None })
        );
        assert_eq!(
            Point2D::try_from_iter(0..usize::MAX),
            Err(ShapeMismatch::TooMany {
                found: Some(usize::MAX)
            })
        );
    }

    #[test]
    fn shape_mismatch_messages() {
        assert_eq!(
            ShapeMismatch::TooFew { found: 1 }.to_string(),
            "Expected 2 coordinates, found 1"
        );
        assert_eq!(
            ShapeMismatch::TooMany { found: Some(3) }.to_string(),
            "Expected 2 coordinates, found 3"
        );
        assert_eq!(
            ShapeMismatch::TooMany { found: None }.to_string(),
            "Expected 2 coordinates, found more than 2"
        );
    }

    #[test]
    fn reads_are_stable() {
        let p = Point2D::new(10, 20);
        for _ in 0..3 {
            assert_eq!((*p.x(), *p.y()), (10, 20));
        }
        assert_eq!(p.into_pair(), (10, 20));
        assert_eq!(p.into_array(), [10, 20]);
    }

    #[test]
    fn row_col_ordering_swaps() {
        let peak = Point2D::from((12, 40));
        assert_eq!(peak.transposed(), Point2D::new(40, 12));
        assert_eq!(peak.transposed().transposed(), peak);
    }

    #[test]
    fn arithmetic_is_component_wise() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(0.5, -1.0);
        assert_eq!(a + b, Point2D::new(1.5, 1.0));
        assert_eq!(a - b, Point2D::new(0.5, 3.0));
    }

    #[test]
    fn mixed_coordinates() {
        let centroid = Point2D::new(Number::from(3i64), Number::from(4.5f64));
        assert!(!centroid.is_integral());
        assert_eq!(centroid.into_float(), Point2D::new(3.0, 4.5));

        let pixel: Point2D<Number> = Point2D::new(3i64, 4).cast();
        assert!(pixel.is_integral());
        assert_eq!(pixel.to_string(), "(3, 4)");
    }

    #[test]
    fn serializes_as_named_fields() {
        let json = serde_json::to_string(&Point2D::new(3, 4)).unwrap();
        assert_eq!(json, r#"{"x":3,"y":4}"#);
    }

    #[test]
    fn deserializes_from_fields_or_sequence() {
        let p: Point2D<i32> = serde_json::from_str(r#"{"x": 3, "y": 4}"#).unwrap();
        assert_eq!(p, Point2D::new(3, 4));

        let p: Point2D<f64> = serde_json::from_str("[5.0, 6.5]").unwrap();
        assert_eq!(p, Point2D::new(5.0, 6.5));

        let err = serde_json::from_str::<Point2D<i32>>("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("Expected 2 coordinates, found 3"));
        assert!(serde_json::from_str::<Point2D<i32>>("[1]").is_err());
    }
}
