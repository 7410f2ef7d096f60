//! Inline SVG charts for the result page.

use askama::{Html, MarkupDisplay};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;
const Y_TICKS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

/// One line of a [`line_chart`].
#[derive(Debug, Clone, Copy)]
pub struct LineSeries<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
    pub color: &'a str,
    pub marker: Marker,
}

/// Axis titles shared by both chart kinds.
#[derive(Debug, Clone, Copy)]
pub struct Axes<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

pub fn line_chart(axes: Axes<'_>, categories: &[&str], series: &[LineSeries<'_>]) -> String {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let frame = Frame::new(categories.len(), nice_ceiling(max));

    let mut svg = frame.open(axes, categories);
    for (index, line) in series.iter().enumerate() {
        let points = line
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| (frame.center_x(i), frame.y(*value)))
            .collect::<Vec<_>>();

        let path = points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{path}"/>"#,
            color = line.color,
        ));

        for (x, y) in &points {
            svg.push_str(&marker(line.marker, *x, *y, line.color));
        }

        // legend, top-right corner
        let legend_y = MARGIN_TOP + 8.0 + 18.0 * index as f64;
        let legend_x = WIDTH - MARGIN_RIGHT - 170.0;
        svg.push_str(&marker(line.marker, legend_x, legend_y, line.color));
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="12" dominant-baseline="middle">{label}</text>"#,
            x = legend_x + 10.0,
            y = legend_y,
            label = escape(line.label),
        ));
    }
    svg.push_str("</svg>");
    svg
}

pub fn bar_chart(axes: Axes<'_>, categories: &[&str], values: &[f64], color: &str) -> String {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let frame = Frame::new(categories.len(), nice_ceiling(max));

    let mut svg = frame.open(axes, categories);
    let bar_width = frame.slot_width() * 0.6;
    for (i, value) in values.iter().enumerate() {
        let top = frame.y(*value);
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{top:.1}" width="{bar_width:.1}" height="{height:.1}" fill="{color}"/>"#,
            x = frame.center_x(i) - bar_width / 2.0,
            height = frame.y(0.0) - top,
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// Plot area geometry for a chart with evenly spaced categories.
struct Frame {
    slots: usize,
    y_max: f64,
}

impl Frame {
    fn new(slots: usize, y_max: f64) -> Self {
        Self {
            slots: slots.max(1),
            y_max,
        }
    }

    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn slot_width(&self) -> f64 {
        Self::plot_width() / self.slots as f64
    }

    fn center_x(&self, index: usize) -> f64 {
        MARGIN_LEFT + self.slot_width() * (index as f64 + 0.5)
    }

    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + Self::plot_height() * (1.0 - value / self.y_max)
    }

    /// SVG header, title, axes, grid and category labels.
    fn open(&self, axes: Axes<'_>, categories: &[&str]) -> String {
        let bottom = HEIGHT - MARGIN_BOTTOM;
        let right = WIDTH - MARGIN_RIGHT;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}" font-family="sans-serif" role="img">"#
        );
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="22" font-size="15" text-anchor="middle">{title}</text>"#,
            x = WIDTH / 2.0,
            title = escape(axes.title),
        ));

        for tick in 0..=Y_TICKS {
            let value = self.y_max * f64::from(tick) / f64::from(Y_TICKS);
            let y = self.y(value);
            svg.push_str(&format!(
                r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{right}" y2="{y:.1}" stroke="#dddddd"/>"##
            ));
            svg.push_str(&format!(
                r#"<text x="{x:.1}" y="{y:.1}" font-size="11" text-anchor="end" dominant-baseline="middle">{label}</text>"#,
                x = MARGIN_LEFT - 6.0,
                label = super::format_number(value, 0),
            ));
        }

        svg.push_str(&format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="#333333"/>"##
        ));
        svg.push_str(&format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{bottom}" stroke="#333333"/>"##
        ));

        for (i, category) in categories.iter().enumerate() {
            svg.push_str(&format!(
                r#"<text x="{x:.1}" y="{y:.1}" font-size="12" text-anchor="middle">{label}</text>"#,
                x = self.center_x(i),
                y = bottom + 18.0,
                label = escape(category),
            ));
        }

        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" font-size="12" text-anchor="middle">{label}</text>"#,
            x = MARGIN_LEFT + Self::plot_width() / 2.0,
            y = HEIGHT - 10.0,
            label = escape(axes.x_label),
        ));
        svg.push_str(&format!(
            r#"<text x="16" y="{y:.1}" font-size="12" text-anchor="middle" transform="rotate(-90 16 {y:.1})">{label}</text>"#,
            y = MARGIN_TOP + Self::plot_height() / 2.0,
            label = escape(axes.y_label),
        ));

        svg
    }
}

fn marker(kind: Marker, x: f64, y: f64, color: &str) -> String {
    match kind {
        Marker::Circle => format!(r#"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{color}"/>"#),
        Marker::Square => format!(
            r#"<rect x="{left:.1}" y="{top:.1}" width="8" height="8" fill="{color}"/>"#,
            left = x - 4.0,
            top = y - 4.0,
        ),
    }
}

/// Smallest 1, 2 or 5 times a power of ten that is at least `value`.
fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10_f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn escape(text: &str) -> String {
    MarkupDisplay::new_unsafe(text, Html).to_string()
}
