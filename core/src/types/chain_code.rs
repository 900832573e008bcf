use crate::error::{MammoprepError, Result};
use std::fmt;
use std::str::FromStr;

/// Unit step offsets (Δcolumn, Δrow) indexed by direction digit
///
/// Rows grow downward, so "up" is a negative row offset.
pub const DIRECTION_OFFSETS: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// A unit step on the 8-connected grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(into = "u8"))]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
}

impl Direction {
    /// All directions in digit order
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// Returns the chain-code digit for this direction
    pub fn digit(&self) -> u8 {
        *self as u8
    }

    /// Returns the (Δcolumn, Δrow) unit offset
    pub fn offset(&self) -> (i64, i64) {
        DIRECTION_OFFSETS[self.digit() as usize]
    }

    /// Parses a single direction token ("0" through "7")
    fn parse_token(token: &str, position: usize) -> Result<Self> {
        let invalid = || MammoprepError::InvalidDirectionDigit {
            token: token.to_string(),
            position,
        };
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c
                .to_digit(10)
                .and_then(|d| Direction::try_from(d as u8).ok())
                .ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = u8;

    fn try_from(digit: u8) -> std::result::Result<Self, u8> {
        Direction::ALL.get(digit as usize).copied().ok_or(digit)
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.digit()
    }
}

/// An absolute grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Point {
    pub column: i64,
    pub row: i64,
}

impl Point {
    /// Creates a new Point
    pub fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }

    /// Returns the neighbouring point one step in `direction`
    pub fn step(&self, direction: Direction) -> Point {
        let (dc, dr) = direction.offset();
        Point::new(self.column + dc, self.row + dr)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Contour given as an anchor point plus a sequence of unit steps
///
/// A chain code is only meaningful against the image grid it was recorded
/// for. Values are never edited in place: cropping and mirroring produce new
/// chain codes (see [`crate::geometry`]).
///
/// # Example
///
/// ```
/// use mammoprep_core::ChainCode;
///
/// let code: ChainCode = "10 20 2 2 4".parse().unwrap();
/// assert_eq!(code.anchor().column, 10);
/// assert_eq!(code.anchor().row, 20);
/// assert_eq!(code.len(), 3);
/// assert_eq!(code.to_string(), "10 20 2 2 4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ChainCode {
    anchor: Point,
    directions: Vec<Direction>,
}

impl ChainCode {
    /// Creates a chain code from an anchor and already-validated directions
    pub fn new(anchor: Point, directions: Vec<Direction>) -> Self {
        Self { anchor, directions }
    }

    /// Creates a chain code from an anchor and raw direction digits
    ///
    /// # Errors
    ///
    /// Returns `InvalidDirectionDigit` if any digit is outside 0-7
    pub fn from_digits(column: i64, row: i64, digits: &[u8]) -> Result<Self> {
        let directions = digits
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                Direction::try_from(d).map_err(|_| MammoprepError::InvalidDirectionDigit {
                    token: d.to_string(),
                    position: i + 2,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(Point::new(column, row), directions))
    }

    /// Builds a chain code from a token sequence
    ///
    /// The first two tokens are the anchor column and row; every following
    /// token must be a single direction digit.
    ///
    /// # Errors
    ///
    /// - `MalformedChainCodeSource` if fewer than two tokens are given or the
    ///   anchor tokens are not integers
    /// - `InvalidDirectionDigit` for any other token that is not `0`-`7`
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = tokens.into_iter();
        let column = parse_anchor_token(tokens.next(), "column")?;
        let row = parse_anchor_token(tokens.next(), "row")?;

        let directions = tokens
            .enumerate()
            .map(|(i, token)| Direction::parse_token(token.as_ref(), i + 2))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(Point::new(column, row), directions))
    }

    /// Returns the anchor point
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns the direction steps
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Returns the direction digits
    pub fn digits(&self) -> Vec<u8> {
        self.directions.iter().map(Direction::digit).collect()
    }

    /// Number of steps (not counting the anchor)
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// Whether the code has no steps
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Checks that the anchor lies inside a `width` x `height` grid
    ///
    /// # Errors
    ///
    /// Returns `AnchorOutOfRange` if the anchor is negative or past the grid
    pub fn ensure_anchor_within(&self, width: u32, height: u32) -> Result<()> {
        let Point { column, row } = self.anchor;
        if column < 0 || row < 0 {
            return Err(MammoprepError::anchor(column, row, "negative coordinate"));
        }
        if column >= i64::from(width) || row >= i64::from(height) {
            return Err(MammoprepError::anchor(
                column,
                row,
                format!("outside {}x{} grid", width, height),
            ));
        }
        Ok(())
    }
}

fn parse_anchor_token<S: AsRef<str>>(token: Option<S>, axis: &str) -> Result<i64> {
    let token = token.ok_or_else(|| {
        MammoprepError::MalformedChainCodeSource(format!(
            "expected at least 2 tokens, missing anchor {}",
            axis
        ))
    })?;
    let token = token.as_ref();
    token.parse::<i64>().map_err(|e| {
        MammoprepError::MalformedChainCodeSource(format!(
            "anchor {} {:?} is not an integer: {}",
            axis, token, e
        ))
    })
}

impl FromStr for ChainCode {
    type Err = MammoprepError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tokens(s.split_whitespace())
    }
}

impl fmt::Display for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.anchor.column, self.anchor.row)?;
        for direction in &self.directions {
            write!(f, " {}", direction.digit())?;
        }
        Ok(())
    }
}
