//! Start/end time input.
//!
//! The backend stores times as `datetime-local` text (`2024-03-20T15:00`).
//! Users may type that directly, a full RFC 3339 timestamp, or something
//! like "fri 6pm", which is resolved with fuzzydate.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Normalize user input to the stored text form. Empty input stays empty
/// and clears the field.
pub fn normalize(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(String::new());
    }

    // Already in a form the backend stores: keep it verbatim.
    if NaiveDateTime::parse_from_str(input, LOCAL_FORMAT).is_ok()
        || NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(input).is_ok()
    {
        return Ok(input.to_string());
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    Ok(dt.format(LOCAL_FORMAT).to_string())
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| (*full).to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
