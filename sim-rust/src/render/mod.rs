//! HTML presentation of the form and of a [`crate::SimulationReport`].

pub mod chart;
mod pages;

pub use pages::{
    ChartsView, CostRow, FailedRunPage, FieldView, FormPage, ResultPage, SearchSection, SearchView,
};

use crate::RenderError;
use askama::Template;

/// Render any page template to a string.
pub fn render_page(page: &impl Template) -> Result<String, RenderError> {
    Ok(page.render()?)
}

/// Format `value` with `decimals` fraction digits and comma thousands
/// separators, e.g. `408000.0` with 2 decimals is `408,000.00`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3 + 1);
    if value.is_sign_negative() && formatted.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
