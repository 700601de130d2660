//! Calendar format strings (`DD-MM-YYYY`, `hh:mm A`, ...) compiled to chrono
//! strftime items, strict parsing against them, and locale resolution.

use std::fmt::Write;

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{Datelike, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::ParseError;

/// Calendar tokens and their strftime counterparts, longest first per letter.
const TOKENS: [(&str, &str); 22] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("dd", "%a"),
    ("d", "%w"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
];

/// Two-letter week day token. chrono only knows the three-letter names.
const MIN_WEEKDAY: &str = "dd";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Strftime(String),
    /// Short week day name cut to two characters
    MinWeekday,
}

/// A compiled calendar format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source:   String,
    strftime: String,
    pieces:   Vec<Piece>,
}

impl Pattern {
    /// Compiles a calendar format. Unknown characters are kept as literals,
    /// `[...]` escapes a literal run.
    pub fn compile(source: &str) -> Self {
        let mut strftime = String::with_capacity(source.len() * 2);
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut rest = source;

        'scan: while let Some(ch) = rest.chars().next() {
            if ch == '[' {
                if let Some(end) = rest.find(']') {
                    push_literal(&mut strftime, &rest[1..end]);
                    push_literal(&mut current, &rest[1..end]);
                    rest = &rest[end + 1..];
                    continue;
                }
            }

            for (token, spec) in TOKENS {
                if let Some(tail) = rest.strip_prefix(token) {
                    strftime.push_str(spec);
                    if token == MIN_WEEKDAY {
                        if !current.is_empty() {
                            pieces.push(Piece::Strftime(std::mem::take(&mut current)));
                        }
                        pieces.push(Piece::MinWeekday);
                    } else {
                        current.push_str(spec);
                    }
                    rest = tail;
                    continue 'scan;
                }
            }

            push_literal(&mut strftime, &rest[..ch.len_utf8()]);
            push_literal(&mut current, &rest[..ch.len_utf8()]);
            rest = &rest[ch.len_utf8()..];
        }

        if !current.is_empty() {
            pieces.push(Piece::Strftime(current));
        }

        Self {
            source: source.to_owned(),
            strftime,
            pieces,
        }
    }

    /// The calendar format this pattern was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders a date-time with the given locale's names.
    pub fn format(&self, value: &NaiveDateTime, locale: Locale) -> String {
        let zoned = Utc.from_utc_datetime(value);
        let mut out = String::new();
        for piece in &self.pieces {
            let written = match piece {
                Piece::Strftime(items) => write!(out, "{}", zoned.format_localized(items, locale)),
                Piece::MinWeekday => {
                    let short = zoned.format_localized("%a", locale).to_string();
                    write!(out, "{}", short.chars().take(2).collect::<String>())
                },
            };
            if written.is_err() {
                tracing::warn!(format = %self.source, "format produced no output");
                return String::new();
            }
        }
        out
    }

    /// Strictly parses `input`: missing date parts are taken from `today`
    /// (a year alone means January 1st), missing time parts are zero, and
    /// the value must format back to exactly `input`.
    ///
    /// # Errors
    /// Returns `ParseError` if the input is empty, does not match the format,
    /// names a non-existent date, or does not round-trip.
    pub fn parse(&self, input: &str, today: NaiveDate) -> Result<NaiveDateTime, ParseError> {
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut parsed = Parsed::default();
        format::parse(&mut parsed, input, StrftimeItems::new(&self.strftime))
            .map_err(|_| self.mismatch(input))?;
        let value = self.resolve(&mut parsed, input, today)?;

        let rendered = self.format(&value, Locale::POSIX);
        if rendered != input {
            return Err(ParseError::NotStrict {
                input: input.to_owned(),
                format: self.source.clone(),
                rendered,
            });
        }

        Ok(value)
    }

    /// Forgiving parse for configured limits: unpadded numbers are accepted,
    /// the input may stop before the format does (the missing parts take the
    /// same defaults as in [`Pattern::parse`]) and trailing text is ignored.
    ///
    /// # Errors
    /// Returns `ParseError` if the input is empty, a part that is present
    /// does not match, or the result names a non-existent date.
    pub fn parse_lenient(&self, input: &str, today: NaiveDate) -> Result<NaiveDateTime, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut parsed = Parsed::default();
        let mut rest = trimmed;
        for item in StrftimeItems::new(&self.strftime) {
            if rest.is_empty() {
                break;
            }
            rest = format::parse_and_remainder(&mut parsed, rest, std::iter::once(item))
                .map_err(|_| self.mismatch(input))?;
        }
        if !rest.is_empty() {
            tracing::debug!(%input, ignored = %rest, format = %self.source, "ignoring trailing text");
        }

        self.resolve(&mut parsed, input, today)
    }

    fn resolve(&self, parsed: &mut Parsed, input: &str, today: NaiveDate) -> Result<NaiveDateTime, ParseError> {
        fill_defaults(parsed, today).map_err(|_| self.mismatch(input))?;

        let date = parsed
            .to_naive_date()
            .map_err(|_| ParseError::OutOfRange(input.to_owned()))?;
        let time = parsed
            .to_naive_time()
            .map_err(|_| ParseError::OutOfRange(input.to_owned()))?;
        Ok(NaiveDateTime::new(date, time))
    }

    fn mismatch(&self, input: &str) -> ParseError {
        ParseError::InvalidFormat {
            input:  input.to_owned(),
            format: self.source.clone(),
        }
    }
}

/// Fills whatever the input left out. A 12-hour clock without a meridiem
/// reads 12 as noon and every other hour as morning.
fn fill_defaults(parsed: &mut Parsed, today: NaiveDate) -> format::ParseResult<()> {
    let has_year = parsed.year().is_some() || parsed.year_mod_100().is_some();
    let has_month = parsed.month().is_some();

    if !has_year {
        parsed.set_year(i64::from(today.year()))?;
    }
    if !has_month {
        let month = if has_year { 1 } else { today.month() };
        parsed.set_month(i64::from(month))?;
    }
    if parsed.day().is_none() {
        let day = if has_year || has_month { 1 } else { today.day() };
        parsed.set_day(i64::from(day))?;
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, Some(hour)) => parsed.set_ampm(hour == 0)?,
        (None, None) => parsed.set_hour(0)?,
        _ => {},
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }

    Ok(())
}

fn push_literal(out: &mut String, literal: &str) {
    for ch in literal.chars() {
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
    }
}

/// Resolves a locale name such as `en`, `fr`, `de-AT` or `pt_BR` to a chrono
/// locale, falling back to POSIX for names chrono does not know.
pub fn resolve_locale(name: &str) -> Locale {
    let normalized = name.trim().replace('-', "_");

    let mut candidates = vec![normalized.clone()];
    if !normalized.contains('_') {
        let language = normalized.to_lowercase();
        let region = match language.as_str() {
            "en" => "US".to_owned(),
            "ja" => "JP".to_owned(),
            "zh" => "CN".to_owned(),
            other => other.to_uppercase(),
        };
        candidates.push(format!("{language}_{region}"));
    }

    for candidate in &candidates {
        if let Ok(locale) = Locale::try_from(candidate.as_str()) {
            return locale;
        }
    }

    tracing::warn!(locale = %name, "unknown locale, falling back to POSIX");
    Locale::POSIX
}
