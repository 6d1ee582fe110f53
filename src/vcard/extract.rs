//! Optional fields recovered from free-text page content.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static BLOOD_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bblood(?:\s+(?:type|group))?\s*[:\-]?\s*(AB|A|B|O)\b[ \t]*(\+|-|\x{2212}|pos(?:itive)?\b|neg(?:ative)?\b)",
    )
    .expect("blood type pattern")
});

static BIRTH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:date\s+of\s+birth|birth\s*date|birthday|d\.?o\.?b\.?|born(?:\s+on)?)\s*[:\-]?\s*
        (?P<date>
            [a-z]{3,9}\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}
          | \d{1,2}(?:st|nd|rd|th)?\s+[a-z]{3,9}\.?,?\s+\d{4}
          | \d{4}-\d{1,2}-\d{1,2}
          | \d{1,2}/\d{1,2}/\d{4}
        )",
    )
    .expect("birth date pattern")
});

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d)(?:st|nd|rd|th)\b").expect("ordinal pattern"));

const DATE_FORMATS: &[&str] = &["%B %d %Y", "%d %B %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Blood type mentioned in `text`, normalized to e.g. `AB+` or `O-`
pub fn find_blood_type(text: &str) -> Option<String> {
    let caps = BLOOD_TYPE.captures(text)?;
    let group = caps[1].to_ascii_uppercase();
    let sign = match caps[2].to_ascii_lowercase().as_str() {
        "+" => '+',
        s if s.starts_with("pos") => '+',
        _ => '-',
    };
    Some(format!("{group}{sign}"))
}

/// Date of birth mentioned in `text`, as `YYYYMMDD`
pub fn find_birth_date(text: &str) -> Option<String> {
    BIRTH_DATE
        .captures_iter(text)
        .find_map(|caps| normalize_birth_date(&caps["date"]))
}

/// Normalize a written date such as `May 26, 1999` to `19990526`.
///
/// Returns `None` for strings that are not a valid calendar date.
pub fn normalize_birth_date(raw: &str) -> Option<String> {
    let cleaned = ORDINAL.replace_all(raw, "$1").replace([',', '.'], " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
        .map(|date| date.format("%Y%m%d").to_string())
}
