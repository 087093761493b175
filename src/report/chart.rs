//! Grouped bar chart of a result set.
//!
//! The chart is laid out as SVG and rasterized to PNG with resvg. Labels use
//! whatever sans-serif font the system font database provides; without any
//! fonts the bars, grid and legend swatches still render.

use crate::experiment::{ResultSet, CORES_LABEL, LABELS};
use crate::{Error, Result};
use resvg::{tiny_skia, usvg};
use std::fmt::{self, Write as _};
use std::path::Path;

/// Chart width in pixels
pub const WIDTH: u32 = 1000;

/// Chart height in pixels
pub const HEIGHT: u32 = 600;

/// Chart title
pub const TITLE: &str = "Algorithm Performance with Different CPU Core Limits";

/// Y axis label
pub const Y_LABEL: &str = "Execution Time (seconds)";

/// Legend title
pub const LEGEND_TITLE: &str = "Algorithm";

const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const GROUP_FILL: f64 = 0.5;
const TARGET_TICKS: f64 = 5.0;

// matplotlib "tab10" palette
const COLORS: [&str; 3] = ["#1f77b4", "#ff7f0e", "#2ca02c"];

/// Y axis ticks: step and count, starting at zero.
fn axis_ticks(max: f64) -> (f64, usize) {
    let max = if max.is_finite() && max > 0.0 { max } else { 1.0 };
    let raw = max / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (max / step).ceil() as usize;
    (step, count.max(1))
}

fn tick_label(value: f64, step: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize + 1
    };
    format!("{value:.decimals$}")
}

/// Build the SVG document for `results`.
///
/// # Errors
///
/// Returns [`Error::EmptyResults`] for an empty set, or [`Error::Chart`] if
/// the document cannot be formatted.
pub fn chart_svg(results: &ResultSet) -> Result<String> {
    if results.is_empty() {
        return Err(Error::EmptyResults);
    }

    let mut svg = String::new();
    layout(results, &mut svg)
        .map_err(|e| Error::Chart(format!("Failed to lay out chart SVG: {e}")))?;
    Ok(svg)
}

#[allow(clippy::cast_precision_loss)]
fn layout(results: &ResultSet, svg: &mut String) -> fmt::Result {
    let width = f64::from(WIDTH);
    let height = f64::from(HEIGHT);
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;

    let (step, ticks) = axis_ticks(results.max_seconds() * 1.05);
    let y_max = step * ticks as f64;
    let y = |value: f64| bottom - value / y_max * plot_h;

    let groups = results.len() as f64;
    let group_w = plot_w / groups;
    let bar_w = group_w * GROUP_FILL / COLORS.len() as f64;

    write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"##
    )?;
    write!(svg, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;

    // grid + y ticks
    for tick in 0..=ticks {
        let value = step * tick as f64;
        let ty = y(value);
        write!(
            svg,
            r##"<line x1="{MARGIN_LEFT}" y1="{ty:.2}" x2="{:.2}" y2="{ty:.2}" stroke="#b0b0b0" stroke-width="0.8"/>"##,
            MARGIN_LEFT + plot_w
        )?;
        write!(
            svg,
            r##"<text x="{:.2}" y="{:.2}" font-size="12" text-anchor="end">{}</text>"##,
            MARGIN_LEFT - 8.0,
            ty + 4.0,
            tick_label(value, step)
        )?;
    }

    // bars, x grid and x ticks
    for (group, record) in results.records().iter().enumerate() {
        let center = MARGIN_LEFT + group_w * (group as f64 + 0.5);
        write!(
            svg,
            r##"<line x1="{center:.2}" y1="{MARGIN_TOP}" x2="{center:.2}" y2="{bottom:.2}" stroke="#b0b0b0" stroke-width="0.8"/>"##
        )?;

        let first = center - bar_w * COLORS.len() as f64 / 2.0;
        for (index, (seconds, color)) in record.seconds().iter().zip(COLORS).enumerate() {
            let top = y(seconds.max(0.0));
            write!(
                svg,
                r##"<rect x="{:.2}" y="{top:.2}" width="{bar_w:.2}" height="{:.2}" fill="{color}"/>"##,
                first + bar_w * index as f64,
                bottom - top
            )?;
        }

        write!(
            svg,
            r##"<text x="{center:.2}" y="{:.2}" font-size="12" text-anchor="middle">{}</text>"##,
            bottom + 18.0,
            record.cores()
        )?;
    }

    // axes frame
    write!(
        svg,
        r##"<rect x="{MARGIN_LEFT}" y="{MARGIN_TOP}" width="{plot_w:.2}" height="{plot_h:.2}" fill="none" stroke="#000000" stroke-width="1"/>"##
    )?;

    // labels
    write!(
        svg,
        r##"<text x="{:.2}" y="{:.2}" font-size="16" text-anchor="middle">{TITLE}</text>"##,
        MARGIN_LEFT + plot_w / 2.0,
        MARGIN_TOP - 20.0
    )?;
    write!(
        svg,
        r##"<text x="{:.2}" y="{:.2}" font-size="13" text-anchor="middle">{CORES_LABEL}</text>"##,
        MARGIN_LEFT + plot_w / 2.0,
        height - 25.0
    )?;
    write!(
        svg,
        r##"<text x="25" y="{0:.2}" font-size="13" text-anchor="middle" transform="rotate(-90 25 {0:.2})">{Y_LABEL}</text>"##,
        MARGIN_TOP + plot_h / 2.0
    )?;

    // legend
    let legend_x = MARGIN_LEFT + plot_w - 200.0;
    let legend_y = MARGIN_TOP + 10.0;
    write!(
        svg,
        r##"<rect x="{legend_x:.2}" y="{legend_y:.2}" width="190" height="92" fill="#ffffff" fill-opacity="0.8" stroke="#cccccc"/>"##
    )?;
    write!(
        svg,
        r##"<text x="{:.2}" y="{:.2}" font-size="12" text-anchor="middle">{LEGEND_TITLE}</text>"##,
        legend_x + 95.0,
        legend_y + 18.0
    )?;
    for (index, (label, color)) in LABELS[1..].iter().zip(COLORS).enumerate() {
        let row_y = legend_y + 32.0 + 20.0 * index as f64;
        write!(
            svg,
            r##"<rect x="{:.2}" y="{row_y:.2}" width="20" height="10" fill="{color}"/>"##,
            legend_x + 10.0
        )?;
        write!(
            svg,
            r##"<text x="{:.2}" y="{:.2}" font-size="12">{label}</text>"##,
            legend_x + 38.0,
            row_y + 10.0
        )?;
    }

    svg.push_str("</svg>");
    Ok(())
}

/// Rasterize `svg` and write it to `path` as PNG.
///
/// # Errors
///
/// Returns [`Error::Chart`] if the SVG cannot be parsed or the PNG cannot be
/// encoded or written.
pub fn render_png(svg: &str, path: &Path) -> Result<()> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| Error::Chart(format!("Failed to parse chart SVG: {e}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Chart("Chart canvas has zero size".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .save_png(path)
        .map_err(|e| Error::Chart(format!("Failed to write {}: {e}", path.display())))
}

/// Render the chart for `results` to `path`.
///
/// # Errors
///
/// Returns error if the set is empty or rendering fails.
pub fn write_chart(results: &ResultSet, path: &Path) -> Result<()> {
    let svg = chart_svg(results)?;
    render_png(&svg, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::TimingRecord;
    use std::time::Duration;

    fn results() -> ResultSet {
        ResultSet::from_records(vec![
            TimingRecord::new(
                1,
                Duration::from_millis(30),
                Duration::from_millis(900),
                Duration::from_millis(120),
            ),
            TimingRecord::new(
                4,
                Duration::from_millis(31),
                Duration::from_millis(260),
                Duration::from_millis(60),
            ),
        ])
    }

    #[test]
    fn test_axis_ticks_cover_max() {
        for max in [0.0, 0.003, 0.9, 1.0, 7.3, 42.0] {
            let (step, count) = axis_ticks(max);
            assert!(step > 0.0);
            assert!(step * count as f64 >= max, "max {max}");
        }
    }

    #[test]
    fn test_tick_label_decimals() {
        assert_eq!(tick_label(2.0, 1.0), "2");
        assert_eq!(tick_label(0.2, 0.1), "0.20");
    }

    #[test]
    fn test_svg_has_bar_per_workload_and_group() {
        let svg = chart_svg(&results()).unwrap();
        for color in COLORS {
            assert_eq!(svg.matches(&format!(r#"fill="{color}"/>"#)).count(), 3);
        }
        assert!(svg.contains(TITLE));
        assert!(svg.contains(Y_LABEL));
        assert!(svg.contains(LEGEND_TITLE));
    }

    #[test]
    fn test_layout_writes_complete_document() {
        let mut svg = String::new();
        assert!(layout(&results(), &mut svg).is_ok());
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(chart_svg(&results()).unwrap(), svg);
    }

    #[test]
    fn test_svg_parses() {
        let svg = chart_svg(&results()).unwrap();
        assert!(usvg::Tree::from_str(&svg, &usvg::Options::default()).is_ok());
    }

    #[test]
    fn test_empty_results_rejected() {
        assert!(matches!(
            chart_svg(&ResultSet::new()),
            Err(Error::EmptyResults)
        ));
    }
}
