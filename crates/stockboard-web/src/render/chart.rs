//! Inline SVG charts.
//!
//! Both charts share one frame: a fixed viewport, a plot area inset by
//! [`PADDING`], and min/max labels on the value axis plus first/last dates
//! on the time axis. Every sample maps to exactly one mark (a polyline
//! vertex or a `<rect>`).

use stockboard_core::{format_date, ChartSeries};

use super::escape;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 260.0;
const PADDING: f64 = 40.0;

const LINE_COLOR: &str = "#1f77b4";
const BAR_COLOR: &str = "#4c9be8";

/// Closing-price line chart.
pub fn line_svg(series: &ChartSeries) -> String {
    if series.is_empty() {
        return empty_svg(&series.label);
    }

    let (min, max) = bounds(series, false);
    let points = series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            format!(
                "{:.1},{:.1}",
                x_at(i, series.len()),
                y_at(point.value, min, max)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut svg = open_svg(&series.label);
    svg.push_str(&axes(series, min, max));
    svg.push_str(&format!(
        r#"<polyline fill="none" stroke="{LINE_COLOR}" stroke-width="1.5" points="{points}"/>"#
    ));
    svg.push_str("</svg>");
    svg
}

/// Volume bar chart with a zero baseline.
pub fn bar_svg(series: &ChartSeries) -> String {
    if series.is_empty() {
        return empty_svg(&series.label);
    }

    let (min, max) = bounds(series, true);
    let slot = plot_width() / series.len() as f64;
    let bar_width = (slot * 0.8).max(1.0);
    let baseline = y_at(min, min, max);

    let mut svg = open_svg(&series.label);
    svg.push_str(&axes(series, min, max));
    for (i, point) in series.points.iter().enumerate() {
        let top = y_at(point.value, min, max);
        let x = PADDING + slot * i as f64 + (slot - bar_width) / 2.0;
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{top:.1}" width="{bar_width:.1}" height="{:.1}" fill="{BAR_COLOR}"><title>{}: {}</title></rect>"#,
            baseline - top,
            format_date(point.date),
            point.value,
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn open_svg(label: &str) -> String {
    format!(
        r#"<svg class="chart" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img"><title>{}</title>"#,
        escape(label)
    )
}

fn empty_svg(label: &str) -> String {
    let mut svg = open_svg(label);
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">no data</text></svg>"#,
        WIDTH / 2.0,
        HEIGHT / 2.0
    ));
    svg
}

fn axes(series: &ChartSeries, min: f64, max: f64) -> String {
    let bottom = HEIGHT - PADDING;
    let right = WIDTH - PADDING;
    let first = series.points.first().map(|p| format_date(p.date)).unwrap_or_default();
    let last = series.points.last().map(|p| format_date(p.date)).unwrap_or_default();

    format!(
        concat!(
            r##"<g class="axes" stroke="#999" font-size="11">"##,
            r#"<line x1="{p}" y1="{p}" x2="{p}" y2="{b}"/>"#,
            r#"<line x1="{p}" y1="{b}" x2="{r}" y2="{b}"/>"#,
            r#"<text x="{tx}" y="{ty_max}" text-anchor="end" stroke="none">{max}</text>"#,
            r#"<text x="{tx}" y="{ty_min}" text-anchor="end" stroke="none">{min}</text>"#,
            r#"<text x="{p}" y="{tdate}" stroke="none">{first}</text>"#,
            r#"<text x="{r}" y="{tdate}" text-anchor="end" stroke="none">{last}</text>"#,
            "</g>"
        ),
        p = PADDING,
        b = bottom,
        r = right,
        tx = PADDING - 4.0,
        ty_max = PADDING + 4.0,
        ty_min = bottom,
        tdate = bottom + 16.0,
        max = axis_label(max),
        min = axis_label(min),
        first = first,
        last = last,
    )
}

fn axis_label(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value:.2}")
    }
}

fn bounds(series: &ChartSeries, from_zero: bool) -> (f64, f64) {
    let (mut min, mut max) = series
        .points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    if from_zero {
        min = min.min(0.0);
    }
    if max <= min {
        max = min + 1.0;
    }
    (min, max)
}

fn plot_width() -> f64 {
    WIDTH - 2.0 * PADDING
}

fn x_at(index: usize, len: usize) -> f64 {
    if len <= 1 {
        return PADDING + plot_width() / 2.0;
    }
    PADDING + plot_width() * index as f64 / (len - 1) as f64
}

fn y_at(value: f64, min: f64, max: f64) -> f64 {
    let plot_height = HEIGHT - 2.0 * PADDING;
    HEIGHT - PADDING - (value - min) / (max - min) * plot_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockboard_core::ChartPoint;
    use time::macros::date;
    use time::Duration;

    fn series(label: &str, values: &[f64]) -> ChartSeries {
        ChartSeries {
            label: label.to_owned(),
            points: values
                .iter()
                .enumerate()
                .map(|(i, &value)| ChartPoint {
                    date: date!(2023 - 01 - 02) + Duration::days(i as i64),
                    value,
                })
                .collect(),
        }
    }

    fn polyline_vertices(svg: &str) -> usize {
        let start = svg.find("points=\"").expect("polyline present") + "points=\"".len();
        let end = start + svg[start..].find('"').expect("closing quote");
        svg[start..end].split_whitespace().count()
    }

    #[test]
    fn line_chart_has_one_vertex_per_sample() {
        let values: Vec<f64> = (0..100).map(|i| 100.0 + f64::from(i)).collect();
        let svg = line_svg(&series("Close", &values));

        assert_eq!(polyline_vertices(&svg), 100);
        assert!(svg.contains("2023-01-02"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn bar_chart_has_one_rect_per_sample() {
        let svg = bar_svg(&series("Volume", &[1_200_000.0, 800_000.0, 0.0]));

        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("1.2M"));
    }

    #[test]
    fn flat_series_stays_inside_the_frame() {
        let svg = line_svg(&series("Close", &[5.0, 5.0]));
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }

    #[test]
    fn single_sample_is_centered() {
        let svg = line_svg(&series("Close", &[42.0]));
        assert_eq!(polyline_vertices(&svg), 1);
        assert!(svg.contains("points=\"360.0,"));
    }

    #[test]
    fn empty_series_renders_placeholder() {
        let svg = bar_svg(&series("Volume", &[]));
        assert!(svg.contains("no data"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn label_is_escaped() {
        let svg = line_svg(&series("<Close>", &[1.0, 2.0]));
        assert!(svg.contains("<title>&lt;Close&gt;</title>"));
    }
}
