//! Recovery of scraped values that arrive glued to a percentile rank.
//!
//! CBB Analytics renders a 0-100 percentile badge next to every stat, and
//! table text extraction concatenates the two with no separator: percentile
//! `98` + value `128.6` comes through as `"98128.6"`. Recovery never fails;
//! anything that cannot be explained as percentile + value is returned as-is.

use super::policy::PlausibleRange;
use serde::Deserialize;
use std::borrow::Cow;

/// Shortest input that can hold a percentile prefix and a value.
pub const MIN_LENGTH: usize = 4;

const MAX_PREFIX_DIGITS: usize = 3;
const MAX_PERCENTILE: u32 = 100;
/// Upper bound of a percentage stat when the caller's ranges say nothing higher.
const PERCENT_CEILING: f64 = 100.0;

/// Tie-break between competing prefix splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitPreference {
    /// Walk the caller's ranges in order and take the shortest prefix landing
    /// inside one; then any remainder <= 100 for percentages; then the
    /// shortest prefix under the ceiling.
    #[default]
    RangeFirst,
    /// Shortest prefix under the ceiling, ranges ignored.
    ShortestPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    pub min_length: usize,
    pub preference: SplitPreference,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            min_length: MIN_LENGTH,
            preference: SplitPreference::RangeFirst,
        }
    }
}

/// One way of reading the raw text as percentile + remainder.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    remainder: &'a str,
    value: f64,
}

impl Normalizer {
    pub fn new(min_length: usize, preference: SplitPreference) -> Self {
        Self {
            min_length,
            preference,
        }
    }

    /// Best guess at the true value of `raw`.
    ///
    /// Returns `raw` borrowed and byte-for-byte unchanged when it is already
    /// clean or cannot be repaired; otherwise the recovered value with the
    /// percentile digits removed (sign, decimals and `%` suffix preserved).
    pub fn recover<'a>(
        &self,
        raw: &'a str,
        is_percentage: bool,
        ranges: &[PlausibleRange],
    ) -> Cow<'a, str> {
        let text = raw.trim();
        if text.is_empty() || text == "-" || text.chars().count() < self.min_length {
            return Cow::Borrowed(raw);
        }

        let ceiling = ceiling(is_percentage, ranges);

        // Prepending digits only ever grows a value, so a well-formed number
        // at or under the ceiling already is what the site meant.
        if let Some(value) = parse_number(text) {
            if !has_leading_zero_anomaly(text) && value <= ceiling {
                return Cow::Borrowed(raw);
            }
        }

        if let Some(value) = signed_suffix(text, ceiling) {
            return Cow::Owned(value);
        }

        let candidates = split_candidates(text);
        match self.pick(&candidates, is_percentage, ranges, ceiling) {
            Some(winner) => Cow::Owned(trim_leading_zeros(winner.remainder)),
            None => Cow::Borrowed(raw),
        }
    }

    fn pick<'c, 'a>(
        &self,
        candidates: &'c [Candidate<'a>],
        is_percentage: bool,
        ranges: &[PlausibleRange],
        ceiling: f64,
    ) -> Option<&'c Candidate<'a>> {
        // Candidates are ordered by prefix length, so `find` yields the shortest.
        let under_ceiling = || candidates.iter().find(|c| c.value <= ceiling);
        match self.preference {
            SplitPreference::ShortestPrefix => under_ceiling(),
            SplitPreference::RangeFirst => ranges
                .iter()
                .find_map(|range| candidates.iter().find(|c| range.contains(c.value)))
                .or_else(|| {
                    if is_percentage {
                        candidates.iter().find(|c| c.value <= PERCENT_CEILING)
                    } else {
                        None
                    }
                })
                .or_else(under_ceiling),
        }
    }
}

/// Free-function form of [`Normalizer::recover`] with default settings.
///
/// `None` stays `None`.
pub fn normalize_value<'a>(
    raw: Option<&'a str>,
    is_percentage: bool,
    ranges: &[PlausibleRange],
) -> Option<Cow<'a, str>> {
    raw.map(|r| Normalizer::default().recover(r, is_percentage, ranges))
}

/// Largest value the policy accepts; nothing above it is left alone.
fn ceiling(is_percentage: bool, ranges: &[PlausibleRange]) -> f64 {
    let top = ranges
        .iter()
        .map(|r| r.high)
        .fold(f64::NEG_INFINITY, f64::max);
    if is_percentage {
        top.max(PERCENT_CEILING)
    } else {
        top
    }
}

/// A leading `0` followed by more than three characters ("075.2", "0123.4")
/// is itself a sign of a `0` percentile glued on.
fn has_leading_zero_anomaly(text: &str) -> bool {
    text.starts_with('0') && text.chars().count() > 4
}

/// Parses `[+-]digits[.digits][%]`. Rejects exponents, `inf`, `nan` and the
/// other spellings `f64::from_str` would accept.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let body = text.strip_suffix('%').unwrap_or(text);
    let unsigned = body.strip_prefix(['+', '-']).unwrap_or(body);
    if !is_plain_decimal(unsigned) {
        return None;
    }
    body.parse().ok()
}

/// Like [`parse_number`] but the text must start with a digit.
fn parse_unsigned(text: &str) -> Option<f64> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    parse_number(text)
}

fn is_plain_decimal(s: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(s),
    }
}

/// 1-3 ASCII digits naming a rank in 0..=100.
fn percentile(prefix: &str) -> Option<u32> {
    if prefix.is_empty()
        || prefix.len() > MAX_PREFIX_DIGITS
        || !prefix.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    prefix.parse().ok().filter(|&p| p <= MAX_PERCENTILE)
}

/// `"87+17.6"` -> `"17.6"`, `"87-17.6"` -> `"-17.6"`.
///
/// The sign marks where the percentile ends. A minus belongs to the value; a
/// plus is dropped.
fn signed_suffix(text: &str, ceiling: f64) -> Option<String> {
    let sign_at = text.find(['+', '-'])?;
    let (prefix, rest) = text.split_at(sign_at);
    percentile(prefix)?;

    let negative = rest.starts_with('-');
    let magnitude = &rest[1..];
    let value = parse_unsigned(magnitude)?;
    let value = if negative { -value } else { value };
    if value > ceiling {
        return None;
    }

    let digits = trim_leading_zeros(magnitude);
    Some(if negative { format!("-{digits}") } else { digits })
}

fn split_candidates(text: &str) -> Vec<Candidate<'_>> {
    (1..=MAX_PREFIX_DIGITS)
        .filter_map(|len| {
            // `get` refuses non-char-boundary splits on non-ASCII input.
            let prefix = text.get(..len)?;
            let remainder = text.get(len..)?;
            percentile(prefix)?;
            let value = parse_unsigned(remainder)?;
            Some(Candidate { remainder, value })
        })
        .collect()
}

/// `"075.2"` -> `"75.2"`, `"00.5"` -> `"0.5"`, `"000"` -> `"0"`.
fn trim_leading_zeros(s: &str) -> String {
    let trimmed = s.trim_start_matches('0');
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        trimmed.to_string()
    } else {
        format!("0{trimmed}")
    }
}
