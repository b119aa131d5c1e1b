//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Uppercases the first letter of each word; inspiration labels are stored
/// lowercase but displayed as headings.
///
/// Usage in templates: `{{ theme|title_case }}`
#[askama::filter_fn]
pub fn title_case(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(title_case_words(&value.to_string()))
}

fn title_case_words(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, word) in raw.split(' ').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::title_case_words;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case_words("outer space"), "Outer Space");
        assert_eq!(title_case_words("ocean"), "Ocean");
        assert_eq!(title_case_words(""), "");
    }
}
