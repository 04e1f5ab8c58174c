use std::{fmt::Display, ops::Range, str::FromStr};

use miette::SourceSpan;
use winnow::{
    ascii::multispace0,
    combinator::{alt, delimited, eof, preceded, repeat},
    token::take_while,
    Located, PResult, Parser,
};

use crate::geometry::{Point2D, ShapeMismatch};

type Token<'s> = (&'s str, Range<usize>);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ParsePointError {
    #[error("Malformed point `{input}`")]
    #[diagnostic(
        code(jicimage::geometry::syntax),
        help("write a point as `(x, y)`, `[x, y]` or `x, y`")
    )]
    Syntax {
        #[source_code]
        input: String,
        #[label("unexpected input")]
        at: SourceSpan,
    },
    #[error("Invalid coordinate `{text}`: {reason}")]
    #[diagnostic(code(jicimage::geometry::coordinate))]
    Coordinate {
        #[source_code]
        input: String,
        #[label("not a valid coordinate")]
        span: SourceSpan,
        text: String,
        reason: String,
    },
    #[error(transparent)]
    #[diagnostic(transparent)]
    Shape(#[from] ShapeMismatch),
}

impl<T> FromStr for Point2D<T>
where
    T: FromStr,
    T::Err: Display,
{
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = parse_point_text
            .parse(Located::new(s))
            .map_err(|e| {
                log::debug!("Malformed point text {s:?} at offset {}", e.offset());
                ParsePointError::Syntax {
                    input: s.to_owned(),
                    at: e.offset().into(),
                }
            })?;

        let (x, y) = Point2D::try_from_iter(tokens)?.into_pair();
        Ok(Point2D::new(
            parse_coordinate_token(s, x)?,
            parse_coordinate_token(s, y)?,
        ))
    }
}

fn parse_coordinate_token<T>(input: &str, (text, span): Token<'_>) -> Result<T, ParsePointError>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse().map_err(|e: T::Err| ParsePointError::Coordinate {
        input: input.to_owned(),
        span: span.into(),
        text: text.to_owned(),
        reason: e.to_string(),
    })
}

fn parse_point_text<'s>(input: &mut Located<&'s str>) -> PResult<Vec<Token<'s>>> {
    delimited(
        multispace0,
        alt((
            delimited(('(', multispace0), parse_coordinate_list, (multispace0, ')')),
            delimited(('[', multispace0), parse_coordinate_list, (multispace0, ']')),
            parse_coordinate_list,
        )),
        (multispace0, eof),
    )
    .parse_next(input)
}

fn parse_coordinate_list<'s>(input: &mut Located<&'s str>) -> PResult<Vec<Token<'s>>> {
    let first = parse_coordinate.parse_next(input)?;
    let rest: Vec<Token<'s>> = repeat(
        0..,
        preceded((multispace0, ',', multispace0), parse_coordinate),
    )
    .parse_next(input)?;

    let mut tokens = Vec::with_capacity(rest.len() + 1);
    tokens.push(first);
    tokens.extend(rest);
    Ok(tokens)
}

fn parse_coordinate<'s>(input: &mut Located<&'s str>) -> PResult<Token<'s>> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, ',' | '(' | ')' | '[' | ']')
    })
    .with_span()
    .parse_next(input)
}
