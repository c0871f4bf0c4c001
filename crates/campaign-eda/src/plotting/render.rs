//! PNG rendering of the three charts with [`plotters`].
//!
//! Charts use the bitmap backend at a fixed 1200x800 resolution.

use super::data::HeatmapMatrix;
use crate::error::{AnalysisError, Result};
use crate::types::AgeRange;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Display;
use std::path::Path;

const PLOT_SIZE: (u32, u32) = (1200, 800);
const FONT: &str = "sans-serif";

fn plot_err(e: impl Display) -> AnalysisError {
    AnalysisError::Plot(e.to_string())
}

/// Histogram of customers per age bucket.
pub fn render_age_histogram(counts: &[(AgeRange, usize)], output_path: &Path) -> Result<()> {
    let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let bins = counts.len() as u32;
    let y_max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1) as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Customer age range histogram", (FONT, 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d((0u32..bins).into_segmented(), 0u32..y_max + y_max / 10 + 1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Age range")
        .y_desc("Customers")
        .x_labels(counts.len() + 1)
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => counts
                .get(*idx as usize)
                .map(|(range, _)| range.label().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .label_style((FONT, 25))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(idx, (_, count))| {
            let idx = idx as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0),
                    (SegmentValue::Exact(idx + 1), *count as u32),
                ],
                BLUE.mix(0.7).filled(),
            );
            bar.set_margin(0, 0, 5, 5);
            bar
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Bar chart of mean call duration (seconds) per job, labels rotated.
pub fn render_mean_duration_bars(bars: &[(String, f64)], output_path: &Path) -> Result<()> {
    if bars.is_empty() {
        return Err(AnalysisError::Plot("no job durations to plot".to_string()));
    }

    let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let n = bars.len() as u32;
    let y_max = bars.iter().map(|(_, mean)| *mean).fold(0.0, f64::max).max(1.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Mean call duration per job", (FONT, 40))
        .margin(20)
        .x_label_area_size(160)
        .y_label_area_size(85)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max * 1.1)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Job")
        .y_desc("Seconds")
        .x_labels(bars.len() + 1)
        .x_label_style((FONT, 20).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => bars
                .get(*idx as usize)
                .map(|(job, _)| job.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_style((FONT, 25))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(idx, (_, mean))| {
            let idx = idx as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0.0),
                    (SegmentValue::Exact(idx + 1), *mean),
                ],
                GREEN.mix(0.6).filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Heatmap of duration standard deviation by month (rows) and marital status
/// (columns), each cell annotated with one decimal.
pub fn render_seasonal_heatmap(matrix: &HeatmapMatrix, output_path: &Path) -> Result<()> {
    let Some((lo, hi)) = matrix.value_range() else {
        return Err(AnalysisError::Plot("no defined deviations to plot".to_string()));
    };

    let root = BitMapBackend::new(output_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let rows = matrix.months.len() as u32;
    let cols = matrix.maritals.len() as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Call duration std (seconds) by month and marital status", (FONT, 36))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(
            (0u32..cols).into_segmented(),
            (0u32..rows).into_segmented(),
        )
        .map_err(plot_err)?;

    // The first month is drawn at the top, so y positions run in reverse.
    let month_at = |y: u32| -> Option<String> {
        let row = rows.checked_sub(y + 1)?;
        matrix.months.get(row as usize).map(|m| m.to_string())
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Marital status")
        .y_desc("Month")
        .x_labels(matrix.maritals.len() + 1)
        .y_labels(matrix.months.len() + 1)
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => {
                matrix.maritals.get(*idx as usize).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .y_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => month_at(*idx).unwrap_or_default(),
            _ => String::new(),
        })
        .label_style((FONT, 25))
        .draw()
        .map_err(plot_err)?;

    let mut cells = Vec::new();
    for (row, values) in matrix.values.iter().enumerate() {
        let y = rows - 1 - row as u32;
        for (col, value) in values.iter().enumerate() {
            if let Some(value) = value {
                cells.push((col as u32, y, *value));
            }
        }
    }

    chart
        .draw_series(cells.iter().map(|&(x, y, value)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                ],
                heat_color(normalize(value, lo, hi)).filled(),
            )
        }))
        .map_err(plot_err)?;

    let annotation = TextStyle::from((FONT, 22).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    chart
        .draw_series(cells.iter().map(|&(x, y, value)| {
            Text::new(
                format!("{:.1}", value),
                (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                annotation.clone(),
            )
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Light yellow for low values through dark red for high ones.
fn heat_color(t: f64) -> RGBColor {
    const LOW: (f64, f64, f64) = (255.0, 255.0, 204.0);
    const HIGH: (f64, f64, f64) = (189.0, 0.0, 38.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(LOW.0, HIGH.0), lerp(LOW.1, HIGH.1), lerp(LOW.2, HIGH.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Month, SeasonalStdRow};

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(15.0, 10.0, 20.0), 0.5);
        assert_eq!(normalize(25.0, 10.0, 20.0), 1.0);
        assert_eq!(normalize(7.0, 7.0, 7.0), 0.5);
    }

    #[test]
    fn test_heat_color_endpoints() {
        let RGBColor(r, g, b) = heat_color(0.0);
        assert_eq!((r, g, b), (255, 255, 204));
        let RGBColor(r, g, b) = heat_color(1.0);
        assert_eq!((r, g, b), (189, 0, 38));
    }

    fn assert_png(path: &Path) {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.len() > 8);
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_render_age_histogram() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ages.png");
        let counts = [(AgeRange::Twenties, 3), (AgeRange::Thirties, 5), (AgeRange::Sixties, 0)];

        render_age_histogram(&counts, &path).unwrap();
        assert_png(&path);
    }

    #[test]
    fn test_render_mean_duration_bars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.png");
        let bars = vec![("admin.".to_string(), 215.5), ("blue-collar".to_string(), 98.0)];

        render_mean_duration_bars(&bars, &path).unwrap();
        assert_png(&path);
    }

    #[test]
    fn test_render_seasonal_heatmap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heat.png");
        let matrix = HeatmapMatrix::from_rows(&[
            SeasonalStdRow {
                month: Month::May,
                marital: "married".to_string(),
                std_duration: Some(125.4),
                count: 4,
            },
            SeasonalStdRow {
                month: Month::Jun,
                marital: "single".to_string(),
                std_duration: None,
                count: 1,
            },
        ]);

        render_seasonal_heatmap(&matrix, &path).unwrap();
        assert_png(&path);
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_mean_duration_bars(&[], &dir.path().join("bars.png")).unwrap_err();
        assert_eq!(err.error_code(), "PLOT_ERROR");

        let matrix = HeatmapMatrix::from_rows(&[]);
        let err = render_seasonal_heatmap(&matrix, &dir.path().join("heat.png")).unwrap_err();
        assert_eq!(err.error_code(), "PLOT_ERROR");
    }
}
