use serde::{Deserialize, Serialize};
use std::fmt;

pub const MONTHS: usize = 12;
pub const PERIODS: usize = MONTHS * 2;

/// Half of a calendar month (quincena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Half {
    First,
    Second,
}

impl Half {
    pub const ALL: [Half; 2] = [Half::First, Half::Second];

    pub fn index(self) -> usize {
        match self {
            Half::First => 0,
            Half::Second => 1,
        }
    }
}

/// One of the 24 half-month buckets. Ordered by month, then half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    month: u8,
    half: Half,
}

impl Period {
    pub fn new(month: usize, half: Half) -> FloraResult<Self> {
        if month >= MONTHS {
            return Err(FloraError::Validation(format!(
                "month index {} out of range 0-{}",
                month,
                MONTHS - 1
            )));
        }
        Ok(Self {
            month: month as u8,
            half,
        })
    }

    pub fn month(&self) -> usize {
        self.month as usize
    }

    pub fn half(&self) -> Half {
        self.half
    }

    /// Flat index `month * 2 + half`, 0-23.
    pub fn index(&self) -> usize {
        self.month() * 2 + self.half.index()
    }

    /// All periods in calendar order.
    pub fn all() -> impl Iterator<Item = Period> {
        (0..MONTHS).flat_map(|month| {
            Half::ALL.into_iter().map(move |half| Period {
                month: month as u8,
                half,
            })
        })
    }
}

/// 24-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Color(u32);

impl Color {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0)
    }

    pub fn parse_hex(raw: &str) -> FloraResult<Self> {
        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FloraError::Validation(format!("invalid color {}", raw)));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| FloraError::Validation(format!("invalid color {}", raw)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Common error type for ledger and chart operations.
#[derive(thiserror::Error, Debug)]
pub enum FloraError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("i/o failure: {0}")]
    Io(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type FloraResult<T> = Result<T, FloraError>;

/// Strategy that hands out display colors for newly seen plants.
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}
