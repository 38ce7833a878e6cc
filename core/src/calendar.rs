//! Spanish month names used by the summary list and the chart axis.

use crate::prelude::{FloraError, FloraResult, Half, Period, MONTHS};

pub const MONTH_NAMES: [&str; MONTHS] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

pub const MONTH_ABBREVIATIONS: [&str; MONTHS] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

pub fn month_name(month: usize) -> &'static str {
    MONTH_NAMES.get(month).copied().unwrap_or("?")
}

pub fn month_abbreviation(month: usize) -> &'static str {
    MONTH_ABBREVIATIONS.get(month).copied().unwrap_or("?")
}

/// Short token for a period, e.g. `ene1`; accepted back by [`parse_period`].
pub fn period_token(period: Period) -> String {
    format!(
        "{}{}",
        month_abbreviation(period.month()).to_lowercase(),
        period.half().index() + 1
    )
}

/// Resolves a month from a number (1-12), an abbreviation or a full name.
pub fn parse_month(raw: &str) -> FloraResult<usize> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<usize>() {
        return if (1..=MONTHS).contains(&number) {
            Ok(number - 1)
        } else {
            Err(FloraError::Validation(format!(
                "month number {} out of range 1-12",
                number
            )))
        };
    }

    let lowered = trimmed.to_lowercase();
    MONTH_NAMES
        .iter()
        .zip(MONTH_ABBREVIATIONS.iter())
        .position(|(name, abbreviation)| {
            name.to_lowercase() == lowered || abbreviation.to_lowercase() == lowered
        })
        .ok_or_else(|| FloraError::Validation(format!("unknown month {:?}", raw)))
}

/// Parses a period token such as `ene1`, `mar-2`, `Septiembre2` or `7-1`.
pub fn parse_period(token: &str) -> FloraResult<Period> {
    let trimmed = token.trim();
    let half_char = trimmed
        .chars()
        .last()
        .ok_or_else(|| FloraError::Validation("empty period token".into()))?;
    let half = match half_char {
        '1' => Half::First,
        '2' => Half::Second,
        _ => {
            return Err(FloraError::Validation(format!(
                "period {:?} must end with quincena 1 or 2",
                token
            )))
        }
    };

    let month_part = trimmed[..trimmed.len() - 1].trim_end_matches(&['-', ':', '/'][..]);
    if month_part.is_empty() {
        return Err(FloraError::Validation(format!(
            "period {:?} has no month",
            token
        )));
    }
    Period::new(parse_month(month_part)?, half)
}

/// Parses a comma and/or whitespace separated list of period tokens.
pub fn parse_periods(raw: &str) -> FloraResult<Vec<Period>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_period)
        .collect()
}
