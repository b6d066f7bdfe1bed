//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortExpression` is the parsed form of a single comma-separated token, and
//! `PortSet` is the deduplicated, range-checked set of ports handed to the
//! scanner.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values
/// and ensures port numbers are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Create a Port from any raw integer, returning None outside 1-65535.
    #[inline]
    pub fn from_raw(value: i64) -> Option<Self> {
        u16::try_from(value).ok().and_then(Self::new)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port expression parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("not an integer: '{0}'")]
    InvalidNumber(String),
    #[error("malformed range '{0}', must be a range between 2 numbers")]
    MalformedRange(String),
    #[error("invalid port range {low}-{high}, first number must be lower")]
    RangeOrder { low: i64, high: i64 },
}

impl PortError {
    /// Whether this is a format problem (bad number or malformed token)
    /// rather than a range-ordering problem.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidNumber(_) | Self::MalformedRange(_))
    }
}

/// A single parsed token of a port expression.
///
/// Values are kept as wide integers: a token like `70000` is syntactically
/// fine and only gets dropped when the expression is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortExpression {
    /// A single number, e.g. `80`.
    Single(i64),
    /// An inclusive ascending range, e.g. `1-1024`. Always `low < high`.
    Range { low: i64, high: i64 },
}

impl PortExpression {
    /// Iterate over every integer this token expands to, ascending.
    pub fn values(&self) -> impl Iterator<Item = i64> {
        let (low, high) = self.bounds();
        low..=high
    }

    /// Iterate over the expanded values that are legal ports.
    ///
    /// The bounds are clipped to 1-65535 first, so `1-9999999999` costs
    /// the same as `1-65535`.
    pub fn ports(&self) -> impl Iterator<Item = Port> {
        let (low, high) = self.bounds();
        let low = low.max(i64::from(Port::MIN));
        let high = high.min(i64::from(Port::MAX));
        (low..=high).filter_map(Port::from_raw)
    }

    fn bounds(&self) -> (i64, i64) {
        match *self {
            Self::Single(value) => (value, value),
            Self::Range { low, high } => (low, high),
        }
    }
}

impl FromStr for PortExpression {
    type Err = PortError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let bounds: Vec<&str> = token.split('-').collect();
        match bounds.as_slice() {
            [single] => Ok(Self::Single(parse_number(single)?)),
            [low, high] => {
                let low = parse_number(low)?;
                let high = parse_number(high)?;
                if low >= high {
                    return Err(PortError::RangeOrder { low, high });
                }
                Ok(Self::Range { low, high })
            }
            _ => Err(PortError::MalformedRange(token.to_string())),
        }
    }
}

impl fmt::Display for PortExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{}", value),
            Self::Range { low, high } => write!(f, "{}-{}", low, high),
        }
    }
}

fn parse_number(s: &str) -> Result<i64, PortError> {
    s.trim()
        .parse()
        .map_err(|_| PortError::InvalidNumber(s.to_string()))
}

/// Parse a comma-separated port expression into its tokens, in order.
///
/// Supports formats like:
/// - Single port: "80"
/// - Comma-separated: "80,443,8080"
/// - Range: "1-1000"
/// - Mixed: "22,80,443,8000-9000"
///
/// Empty input is not special-cased: it is one empty token and fails.
pub fn parse_expression(s: &str) -> Result<Vec<PortExpression>, PortError> {
    s.split(',').map(str::parse).collect()
}

/// Parse a port expression and expand it into the raw integer sequence,
/// ranges expanded in place, duplicates and out-of-range values kept.
pub fn expand_expression(s: &str) -> Result<Vec<i64>, PortError> {
    Ok(parse_expression(s)?
        .iter()
        .flat_map(PortExpression::values)
        .collect())
}

/// An ordered set of distinct, valid ports.
///
/// Order is first-seen order from the expression; the scanner does not rely
/// on it, but the kickoff preview does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PortSet {
    ports: Vec<Port>,
}

impl PortSet {
    /// Deduplicate raw values and drop anything outside 1-65535.
    pub fn normalize<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self::dedup(values.into_iter().filter_map(Port::from_raw))
    }

    /// Normalize parsed tokens without materializing out-of-range values.
    pub fn from_expressions(expressions: &[PortExpression]) -> Self {
        Self::dedup(expressions.iter().flat_map(PortExpression::ports))
    }

    /// Parse and normalize a textual expression in one step.
    pub fn parse(s: &str) -> Result<Self, PortError> {
        Ok(Self::from_expressions(&parse_expression(s)?))
    }

    /// Every port, 1-65535.
    pub fn full() -> Self {
        Self {
            ports: (Port::MIN..=Port::MAX).map(Port).collect(),
        }
    }

    fn dedup(ports: impl Iterator<Item = Port>) -> Self {
        let mut seen = HashSet::new();
        Self {
            ports: ports.filter(|port| seen.insert(*port)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Port> + '_ {
        self.ports.iter().copied()
    }

    pub fn as_slice(&self) -> &[Port] {
        &self.ports
    }

    /// The first `n` ports, for display before a scan starts.
    pub fn preview(&self, n: usize) -> &[Port] {
        &self.ports[..n.min(self.ports.len())]
    }
}

impl FromStr for PortSet {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl IntoIterator for PortSet {
    type Item = Port;
    type IntoIter = std::vec::IntoIter<Port>;

    fn into_iter(self) -> Self::IntoIter {
        self.ports.into_iter()
    }
}
