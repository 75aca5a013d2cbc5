//! `YYYY-MM` → `"Marzo 2021"`.
//!
//! The date is pinned to the first day of the month in UTC, so the result
//! never depends on the host timezone.

use chrono::{Locale, TimeZone, Utc};

const LOCALE: Locale = Locale::es_ES;

/// Formats a `YYYY-MM` (or `YYYY-MM-DD`) string as a capitalised Spanish
/// month name followed by the year.
///
/// Empty input yields an empty string. Input that does not describe a real
/// month is returned unchanged; validating it is the form's job.
pub fn format_month_year(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }

    let mut parts = date.splitn(3, '-');
    let year = parts.next().and_then(|y| y.parse::<i32>().ok());
    let month = parts.next().and_then(|m| m.parse::<u32>().ok());

    let Some(first_of_month) = year
        .zip(month)
        .and_then(|(y, m)| Utc.with_ymd_and_hms(y, m, 1, 0, 0, 0).single())
    else {
        return date.to_string();
    };

    let formatted = first_of_month.format_localized("%B %Y", LOCALE).to_string();
    capitalize_first(&formatted)
}

/// Formats an optional date; `None` behaves like the empty string.
pub fn format_optional(date: Option<&str>) -> String {
    date.map(format_month_year).unwrap_or_default()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_spanish_month_and_year() {
        assert_eq!(format_month_year("2021-03"), "Marzo 2021");
        assert_eq!(format_month_year("2018-06"), "Junio 2018");
        assert_eq!(format_month_year("1999-12"), "Diciembre 1999");
    }

    #[test]
    fn test_every_month_is_capitalised() {
        for m in 1..=12 {
            let out = format_month_year(&format!("2020-{m:02}"));
            let first = out.chars().next().unwrap();
            assert!(first.is_uppercase(), "{out}");
            assert!(out.ends_with(" 2020"), "{out}");
        }
    }

    #[test]
    fn test_january_does_not_shift_to_previous_year() {
        // The classic local-midnight bug turns 2020-01 into December 2019.
        assert_eq!(format_month_year("2020-01"), "Enero 2020");
    }

    #[test]
    fn test_day_component_is_ignored() {
        assert_eq!(format_month_year("2021-03-31"), "Marzo 2021");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_month_year(""), "");
        assert_eq!(format_month_year("   "), "");
        assert_eq!(format_optional(None), "");
    }

    #[test]
    fn test_unusable_input_passes_through() {
        assert_eq!(format_month_year("2021-13"), "2021-13");
        assert_eq!(format_month_year("pronto"), "pronto");
    }

    #[test]
    fn test_month_names_are_fixed() {
        let names = [
            "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto",
            "Septiembre", "Octubre", "Noviembre", "Diciembre",
        ];
        for (i, name) in names.iter().enumerate() {
            let input = format!("2020-{:02}", i + 1);
            assert_eq!(format_month_year(&input), format!("{name} 2020"));
        }
    }
}
