//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use naturindo_core::Rating;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Renders a rating as five filled/empty stars.
///
/// Accepts anything that displays as a number, e.g. a `Rating` or a `u8`.
/// Unparseable input renders as zero stars.
///
/// Usage in templates: `{{ product.rating|stars }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn stars(rating: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(star_string(&rating.to_string()))
}

fn star_string(rating: &str) -> String {
    let filled = rating
        .trim()
        .parse::<f32>()
        .map_or(0, |value| Rating::new(value).stars());
    let filled = usize::from(filled);
    let empty = usize::from(Rating::MAX_STARS).saturating_sub(filled);
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}
