//! Date format patterns.
//!
//! Field layouts declare date formats with the familiar custom pattern
//! letters (`yyyyMMdd`, `dd/MM/yyyy HH:mm`, ...). [`DateFormat`] compiles
//! such a pattern once into a chrono strftime string and uses it for both
//! rendering and strict parsing. A pattern that already contains `%` is
//! taken to be strftime and is used verbatim.

use chrono::format::{parse, Fixed, Item, Parsed, StrftimeItems};
use chrono::{NaiveDateTime, NaiveTime};

/// A compiled date format.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use fixedwidth::DateFormat;
///
/// let format = DateFormat::compile("yyyyMMdd").unwrap();
/// let date = NaiveDate::from_ymd_opt(1766, 5, 16).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert_eq!(format.render(&date), "17660516");
/// assert_eq!(format.parse("17660516").unwrap(), date);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
}

impl DateFormat {
    /// Compiles a pattern, rejecting anything chrono cannot format with.
    pub fn compile(pattern: &str) -> Result<Self, String> {
        if pattern.is_empty() {
            return Err("date format pattern is empty".to_string());
        }

        let strftime = if pattern.contains('%') {
            pattern.to_string()
        } else {
            translate(pattern)?
        };

        for item in StrftimeItems::new(&strftime) {
            match item {
                Item::Error => {
                    return Err(format!("unsupported date format pattern {:?}", pattern))
                }
                // Naive dates carry no offset to render.
                Item::Fixed(
                    Fixed::TimezoneName
                    | Fixed::TimezoneOffset
                    | Fixed::TimezoneOffsetColon
                    | Fixed::TimezoneOffsetDoubleColon
                    | Fixed::TimezoneOffsetTripleColon
                    | Fixed::TimezoneOffsetColonZ
                    | Fixed::TimezoneOffsetZ
                    | Fixed::RFC2822
                    | Fixed::RFC3339,
                ) => return Err(format!("time zones are not supported in {:?}", pattern)),
                _ => {}
            }
        }

        Ok(DateFormat {
            pattern: pattern.to_string(),
            strftime,
        })
    }

    /// The pattern as declared.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent strftime string.
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Renders a timestamp.
    pub fn render(&self, value: &NaiveDateTime) -> String {
        value.format(&self.strftime).to_string()
    }

    /// Parses `text` strictly against the format.
    ///
    /// Date-only formats produce midnight. An hour without minutes reads as
    /// the top of the hour, and a 12-hour clock without `tt` reads as AM.
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        let mut parsed = Parsed::new();
        parse(&mut parsed, text, StrftimeItems::new(&self.strftime))?;
        let date = parsed.to_naive_date()?;

        let has_time = parsed.hour_div_12().is_some()
            || parsed.hour_mod_12().is_some()
            || parsed.minute().is_some()
            || parsed.second().is_some()
            || parsed.nanosecond().is_some();
        if !has_time {
            return Ok(date.and_time(NaiveTime::MIN));
        }

        if parsed.hour_mod_12().is_some() {
            if parsed.minute().is_none() {
                parsed.set_minute(0)?;
            }
            if parsed.hour_div_12().is_none() {
                parsed.set_ampm(false)?;
            }
        }
        Ok(date.and_time(parsed.to_naive_time()?))
    }
}

/// Translates a custom date pattern into strftime.
fn translate(pattern: &str) -> Result<String, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();

        match c {
            'y' => {
                out.push_str(match run {
                    1 | 2 => "%y",
                    _ => "%Y",
                });
            }
            'M' => {
                out.push_str(match run {
                    1 => "%-m",
                    2 => "%m",
                    3 => "%b",
                    _ => "%B",
                });
            }
            'd' => {
                out.push_str(match run {
                    1 => "%-d",
                    2 => "%d",
                    3 => "%a",
                    _ => "%A",
                });
            }
            'H' => out.push_str(if run == 1 { "%-H" } else { "%H" }),
            'h' => out.push_str(if run == 1 { "%-I" } else { "%I" }),
            'm' => out.push_str(if run == 1 { "%-M" } else { "%M" }),
            's' => out.push_str(if run == 1 { "%-S" } else { "%S" }),
            'f' | 'F' => {
                out.push_str(match run {
                    1..=3 => "%3f",
                    4..=6 => "%6f",
                    7..=9 => "%9f",
                    _ => return Err(format!("too many fraction digits in {:?}", pattern)),
                });
            }
            't' if run == 1 => {
                return Err(format!(
                    "single-letter AM/PM designator in {:?}, use \"tt\"",
                    pattern
                ))
            }
            't' => out.push_str("%p"),
            'z' | 'K' => return Err(format!("time zones are not supported in {:?}", pattern)),
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&x| x == c)
                    .ok_or_else(|| format!("unterminated quoted literal in {:?}", pattern))?;
                for &lit in &chars[i + 1..i + 1 + close] {
                    push_literal(&mut out, lit);
                }
                i += close + 2;
                continue;
            }
            '\\' => {
                let lit = chars
                    .get(i + 1)
                    .ok_or_else(|| format!("dangling escape in {:?}", pattern))?;
                push_literal(&mut out, *lit);
                i += 2;
                continue;
            }
            other => {
                for _ in 0..run {
                    push_literal(&mut out, other);
                }
            }
        }

        i += run;
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[test]
    fn translates_compact_date() {
        assert_eq!(DateFormat::compile("yyyyMMdd").unwrap().strftime(), "%Y%m%d");
    }

    #[test]
    fn translates_date_and_time() {
        let f = DateFormat::compile("dd/MM/yyyy HH:mm:ss").unwrap();
        assert_eq!(f.strftime(), "%d/%m/%Y %H:%M:%S");
    }

    #[test]
    fn quoted_literals_and_escapes() {
        let f = DateFormat::compile("yyyy'T'HH\\hmm").unwrap();
        assert_eq!(f.strftime(), "%YT%Hh%M");
    }

    #[test]
    fn strftime_passthrough() {
        let f = DateFormat::compile("%Y-%m-%d").unwrap();
        assert_eq!(f.strftime(), "%Y-%m-%d");
        assert_eq!(f.pattern(), "%Y-%m-%d");
    }

    #[test]
    fn percent_literal_is_escaped() {
        // No '%' in the pattern means translation; '%' can only arrive via quotes.
        assert_eq!(translate("yyyy'%'").unwrap(), "%Y%%");
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(DateFormat::compile("yyyy'abc").is_err());
    }

    #[test]
    fn rejects_time_zones() {
        let err = DateFormat::compile("yyyy-MM-dd HH:mm zzz").unwrap_err();
        assert!(err.contains("time zones"));
        assert!(DateFormat::compile("%Y-%m-%d %z").is_err());
    }

    #[test]
    fn rejects_empty_pattern() {
        assert!(DateFormat::compile("").is_err());
    }

    #[test]
    fn renders_and_parses_time() {
        let f = DateFormat::compile("yyyyMMddHHmmss").unwrap();
        let ts = at(2024, 2, 29, 13, 5, 9);
        assert_eq!(f.render(&ts), "20240229130509");
        assert_eq!(f.parse("20240229130509").unwrap(), ts);
    }

    #[test]
    fn date_only_parses_to_midnight() {
        let f = DateFormat::compile("yyyyMMdd").unwrap();
        assert_eq!(f.parse("16690717").unwrap(), at(1669, 7, 17, 0, 0, 0));
    }

    #[test]
    fn hour_without_minutes_keeps_the_hour() {
        let f = DateFormat::compile("yyyyMMddHH").unwrap();
        let ts = at(2024, 2, 29, 13, 0, 0);
        assert_eq!(f.render(&ts), "2024022913");
        assert_eq!(f.parse("2024022913").unwrap(), ts);
    }

    #[test]
    fn twelve_hour_clock_without_designator_is_morning() {
        let f = DateFormat::compile("yyyyMMdd hh:mm").unwrap();
        assert_eq!(f.parse("20240229 01:00").unwrap(), at(2024, 2, 29, 1, 0, 0));
        assert_eq!(f.parse("20240229 12:30").unwrap(), at(2024, 2, 29, 0, 30, 0));
    }

    #[test]
    fn twelve_hour_clock_with_designator() {
        let f = DateFormat::compile("yyyyMMdd hh:mm tt").unwrap();
        let ts = at(2024, 2, 29, 13, 5, 0);
        assert_eq!(f.render(&ts), "20240229 01:05 PM");
        assert_eq!(f.parse("20240229 01:05 PM").unwrap(), ts);
    }

    #[test]
    fn incomplete_time_is_an_error() {
        // Minutes with no hour cannot be placed on the clock.
        let f = DateFormat::compile("yyyyMMdd mm").unwrap();
        assert!(f.parse("20240229 30").is_err());
    }

    #[test]
    fn rejects_single_designator() {
        let err = DateFormat::compile("hh:mm t").unwrap_err();
        assert!(err.contains("\"tt\""));
    }

    #[test]
    fn parse_is_strict() {
        let f = DateFormat::compile("yyyyMMdd").unwrap();
        assert!(f.parse("1669-07-17").is_err());
        assert!(f.parse("16691317").is_err());
    }
}
