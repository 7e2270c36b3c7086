//! Parser for short human-written metric phrases.
//!
//! Case-study copy states its numbers as free text:
//! ```text
//! 8.6/10 (n=7)     ↓ 50%     5 days     0 switch errors
//! ```
//!
//! This parser pulls out one numeric value, the unit suffix it should be
//! displayed with, and how many decimals to show.
//!
//! Patterns are tried in a fixed priority order and the first pattern that
//! matches anywhere in the string wins. With several numbers of different
//! kinds the winner is decided by pattern priority, not by position:
//! `"5 days (+ 50%)"` yields `50%` because percentages outrank day counts.

/// Numeric content extracted from a metric phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMetric {
    /// Always finite.
    pub value: f64,
    /// Suffix the value is displayed with: `"%"`, `"/10"`, `" days"` or `""`.
    pub unit_suffix: &'static str,
    /// 1 when the matched number has a fractional part, else 0.
    pub decimal_precision: u32,
}

/// Which pattern produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricPattern {
    Percentage,
    ScoreOutOfTen,
    DayCount,
    DirectionalPercentage,
    BareNumber,
}

impl MetricPattern {
    /// Patterns in the order they are tried.
    pub const PRIORITY: [MetricPattern; 5] = [
        MetricPattern::Percentage,
        MetricPattern::ScoreOutOfTen,
        MetricPattern::DayCount,
        MetricPattern::DirectionalPercentage,
        MetricPattern::BareNumber,
    ];

    pub fn unit_suffix(self) -> &'static str {
        match self {
            Self::Percentage | Self::DirectionalPercentage => "%",
            Self::ScoreOutOfTen => "/10",
            Self::DayCount => " days",
            Self::BareNumber => "",
        }
    }
}

/// Parse a metric phrase. Returns `None` when no pattern matches.
///
/// # Examples
///
/// ```
/// use casefolio_catalog::metric_parser::parse_metric;
///
/// let m = parse_metric("8.6/10 (n=7)").unwrap();
/// assert_eq!(m.value, 8.6);
/// assert_eq!(m.unit_suffix, "/10");
/// assert_eq!(m.decimal_precision, 1);
///
/// let m = parse_metric("↓ 50%").unwrap();
/// assert_eq!(m.value, 50.0);
/// assert_eq!(m.unit_suffix, "%");
///
/// assert!(parse_metric("no numbers here").is_none());
/// ```
pub fn parse_metric(text: &str) -> Option<ParsedMetric> {
    parse_metric_with_pattern(text).map(|(_, m)| m)
}

/// Like [`parse_metric`], also reporting which pattern matched.
pub fn parse_metric_with_pattern(text: &str) -> Option<(MetricPattern, ParsedMetric)> {
    let chars: Vec<char> = text.chars().collect();

    for pattern in MetricPattern::PRIORITY {
        let Some(number) = find_pattern(&chars, pattern) else {
            continue;
        };
        let Ok(value) = number.parse::<f64>() else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        let decimal_precision = if number.contains('.') { 1 } else { 0 };
        return Some((
            pattern,
            ParsedMetric {
                value,
                unit_suffix: pattern.unit_suffix(),
                decimal_precision,
            },
        ));
    }

    None
}

// ── Internal matching ───────────────────────────────────────────────────────

const ARROWS: &[char] = &['↑', '↓'];

/// Leftmost match of `pattern`, returning the matched number text.
fn find_pattern(chars: &[char], pattern: MetricPattern) -> Option<String> {
    for start in 0..chars.len() {
        let number_start = match pattern {
            MetricPattern::DirectionalPercentage => {
                if !ARROWS.contains(&chars[start]) {
                    continue;
                }
                skip_whitespace(chars, start + 1)
            }
            _ => start,
        };

        // Longest number first, then the shorter alternative without the
        // fractional part, the way a backtracking matcher would.
        for end in number_ends(chars, number_start) {
            if tail_matches(chars, end, pattern) {
                return Some(chars[number_start..end].iter().collect());
            }
        }
    }
    None
}

/// Candidate end offsets for `-?\d+(\.\d+)?` starting at `start`, longest first.
fn number_ends(chars: &[char], start: usize) -> Vec<usize> {
    let mut i = start;
    if chars.get(i) == Some(&'-') {
        i += 1;
    }
    let digits_start = i;
    while chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if i == digits_start {
        return Vec::new();
    }
    let integer_end = i;

    let mut ends = Vec::with_capacity(2);
    if chars.get(i) == Some(&'.') {
        let mut j = i + 1;
        while chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
            j += 1;
        }
        if j > i + 1 {
            ends.push(j);
        }
    }
    ends.push(integer_end);
    ends
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while chars.get(i).is_some_and(|c| c.is_whitespace()) {
        i += 1;
    }
    i
}

/// Does the text after the number satisfy the pattern's tail?
fn tail_matches(chars: &[char], number_end: usize, pattern: MetricPattern) -> bool {
    let i = skip_whitespace(chars, number_end);
    match pattern {
        MetricPattern::Percentage | MetricPattern::DirectionalPercentage => {
            chars.get(i) == Some(&'%')
        }
        MetricPattern::ScoreOutOfTen => {
            if chars.get(i) != Some(&'/') {
                return false;
            }
            let j = skip_whitespace(chars, i + 1);
            chars.get(j) == Some(&'1') && chars.get(j + 1) == Some(&'0')
        }
        MetricPattern::DayCount => "day"
            .chars()
            .enumerate()
            .all(|(k, expected)| {
                chars
                    .get(i + k)
                    .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
            }),
        MetricPattern::BareNumber => true,
    }
}

#[cfg(test)]
#[path = "tests/metric_parser_tests.rs"]
mod tests;
