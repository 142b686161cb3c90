//! SVG chart rendering for the climate report.

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;
use surfsup_db::models::DatePrecipitation;
use surfsup_utils::{dates, stats};

const CHART_SIZE: (u32, u32) = (1000u32, 600u32);

/// Draw precipitation over time as a line chart.
///
/// Days without a reading break the line instead of dropping to zero.
/// `rows` must be sorted by date.
pub fn precipitation_chart(rows: &[DatePrecipitation], path: &Path) -> anyhow::Result<()> {
    let mut points: Vec<(NaiveDate, Option<f64>)> = Vec::with_capacity(rows.len());
    for row in rows {
        points.push((dates::parse_date(&row.date)?, row.prcp));
    }
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => anyhow::bail!("no precipitation data to chart"),
    };
    let last = if first == last { last + Duration::days(1) } else { last };
    let y_max = points
        .iter()
        .filter_map(|(_, v)| *v)
        .fold(0f64, f64::max)
        .max(1.0)
        * 1.1;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let x_range: RangedDate<NaiveDate> = (first..last).into();
    let mut chart = ChartBuilder::on(&root)
        .caption("Precipitation Analysis", ("sans-serif", 24))
        .margin(20i32)
        .x_label_area_size(40u32)
        .y_label_area_size(50u32)
        .build_cartesian_2d(x_range, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_labels(10usize)
        .x_desc("Date")
        .y_desc("Inches")
        .draw()?;

    for segment in segments(&points) {
        chart.draw_series(LineSeries::new(segment, &BLUE))?;
    }
    root.present()?;
    log::info!("wrote precipitation chart to {}", path.display());
    Ok(())
}

/// Draw a frequency histogram of temperature observations.
pub fn temperature_histogram(values: &[f64], bins: usize, path: &Path) -> anyhow::Result<()> {
    let bins = stats::histogram(values, bins);
    let (lo, hi) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => anyhow::bail!("no temperature observations to chart"),
    };
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as u32;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Temperature Observation Analysis", ("sans-serif", 24))
        .margin(20i32)
        .x_label_area_size(40u32)
        .y_label_area_size(50u32)
        .build_cartesian_2d(lo..hi, 0u32..max_count + 1)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Temperature")
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new(
            [(b.lower, 0u32), (b.upper, b.count as u32)],
            BLUE.mix(0.7).filled(),
        )
    }))?;
    root.present()?;
    log::info!("wrote temperature histogram to {}", path.display());
    Ok(())
}

/// Split a series into runs of consecutive present values.
fn segments(points: &[(NaiveDate, Option<f64>)]) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (date, value) in points {
        match value {
            Some(v) => current.push((*date, *v)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 8, d).unwrap()
    }

    fn row(date: &str, prcp: Option<f64>) -> DatePrecipitation {
        DatePrecipitation {
            date: date.to_string(),
            prcp,
        }
    }

    #[test]
    fn segments_break_on_missing_values() {
        let points = vec![
            (day(1), Some(0.1)),
            (day(2), None),
            (day(3), Some(0.0)),
            (day(4), Some(0.3)),
            (day(5), None),
        ];
        let runs = segments(&points);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(day(1), 0.1)]);
        assert_eq!(runs[1], vec![(day(3), 0.0), (day(4), 0.3)]);
    }

    #[test]
    fn precipitation_chart_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("precipitation.svg");
        let rows = vec![
            row("2017-08-01", Some(0.1)),
            row("2017-08-02", None),
            row("2017-08-23", Some(0.05)),
        ];
        precipitation_chart(&rows, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn precipitation_chart_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        assert!(precipitation_chart(&[], &dir.path().join("empty.svg")).is_err());
    }

    #[test]
    fn temperature_histogram_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tobs.svg");
        temperature_histogram(&[70.0, 72.0, 72.0, 75.0, 80.0], 12, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<rect"));
    }
}
