//! One-shot precipitation and temperature analysis.
//!
//! Every query runs before anything is printed, so a failing query aborts
//! the run without partial output. The trailing year is anchored to the
//! newest observation in the store, not to today's date.

use crate::chart;
use crate::StoreArgs;
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use surfsup_db::models::{DatePrecipitation, DateTemperature, StationActivity, TemperatureSummary};
use surfsup_db::{Database, DbError};
use surfsup_utils::dates;
use surfsup_utils::stats::{self, Summary};

/// Number of bars in the temperature histogram.
pub const HISTOGRAM_BINS: usize = 12;

pub const PRECIPITATION_CHART: &str = "precipitation.svg";
pub const TEMPERATURE_CHART: &str = "temperature_histogram.svg";

/// Everything the report prints and charts.
#[derive(Debug, Clone)]
pub struct ClimateReport {
    pub latest_date: NaiveDate,
    pub window_start: NaiveDate,
    /// Trailing-year precipitation, sorted by date.
    pub precipitation: Vec<DatePrecipitation>,
    /// Statistics over the non-null precipitation values.
    pub precipitation_summary: Option<Summary>,
    pub station_count: i64,
    pub ranking: Vec<StationActivity>,
    pub most_active: StationActivity,
    pub temperature: TemperatureSummary,
    /// Trailing-year observations of the most active station.
    pub temperature_observations: Vec<DateTemperature>,
}

impl ClimateReport {
    /// Run every query the report needs.
    pub fn build(db: &Database) -> anyhow::Result<Self> {
        let latest = db
            .latest_observation_date()?
            .ok_or_else(|| DbError::NoData("the store has no observations".to_string()))?;
        let latest_date = dates::parse_date(&latest).map_err(|e| {
            DbError::MalformedInput(format!("latest observation date {:?}: {}", latest, e))
        })?;
        let window_start = dates::one_year_before(&latest_date).ok_or_else(|| {
            DbError::MalformedInput(format!("latest observation date {:?} is out of range", latest))
        })?;
        let since = dates::format_date(&window_start);

        let mut precipitation = db.precipitation_since(&since)?;
        precipitation.sort_by(|a, b| a.date.cmp(&b.date));
        let values: Vec<f64> = precipitation.iter().filter_map(|r| r.prcp).collect();
        let precipitation_summary = stats::describe(&values);

        let station_count = db.station_count()?;

        let ranking = db.station_activity_ranking()?;
        let most_active = ranking
            .first()
            .cloned()
            .ok_or_else(|| DbError::NoData("no station has observations".to_string()))?;

        let temperature = db.temperature_extremes_and_mean(&most_active.station)?;
        let temperature_observations =
            db.temperature_observations(&most_active.station, &since)?;

        Ok(Self {
            latest_date,
            window_start,
            precipitation,
            precipitation_summary,
            station_count,
            ranking,
            most_active,
            temperature,
            temperature_observations,
        })
    }

    /// Write both charts into `dir`, returning the files written.
    pub fn render_charts(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        if self.precipitation.is_empty() {
            log::warn!("no precipitation rows in the window, skipping chart");
        } else {
            let path = dir.join(PRECIPITATION_CHART);
            chart::precipitation_chart(&self.precipitation, &path)?;
            written.push(path);
        }

        let temps: Vec<f64> = self.temperature_observations.iter().map(|t| t.tobs).collect();
        if temps.is_empty() {
            log::warn!("no temperature observations in the window, skipping histogram");
        } else {
            let path = dir.join(TEMPERATURE_CHART);
            chart::temperature_histogram(&temps, HISTOGRAM_BINS, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}

fn fmt_temp(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

impl fmt::Display for ClimateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Precipitation Analysis ({} to {})",
            dates::format_date(&self.window_start),
            dates::format_date(&self.latest_date)
        )?;
        match &self.precipitation_summary {
            Some(summary) => write!(f, "{}", summary)?,
            None => writeln!(f, "no precipitation readings in this window")?,
        }
        writeln!(f)?;

        writeln!(f, "Total number of stations: {}", self.station_count)?;
        writeln!(f, "Station activity:")?;
        for entry in &self.ranking {
            writeln!(f, "  {:<12} {:>6}", entry.station, entry.count)?;
        }
        writeln!(
            f,
            "The most active station is {} with {} observations.",
            self.most_active.station, self.most_active.count
        )?;
        writeln!(f)?;

        writeln!(f, "Temperature Stats for Station {}:", self.most_active.station)?;
        writeln!(f, "Lowest Temperature: {}", fmt_temp(self.temperature.min))?;
        writeln!(f, "Highest Temperature: {}", fmt_temp(self.temperature.max))?;
        writeln!(f, "Average Temperature: {}", fmt_temp(self.temperature.avg))?;
        writeln!(
            f,
            "Temperature observations in window: {}",
            self.temperature_observations.len()
        )
    }
}

/// Build the report, release the store, print and chart.
pub fn run_report(store: &StoreArgs, output_dir: &Path) -> anyhow::Result<()> {
    let db = store.open()?;
    let report = ClimateReport::build(&db)?;
    drop(db);
    log::info!("released climate store");

    print!("{}", report);
    for path in report.render_charts(output_dir)? {
        println!("Chart written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_db() -> Database {
        let db = Database::new().unwrap();
        db.load_stations("station,name,latitude,longitude,elevation\nS1,One,,,\nS2,Two,,,\n")
            .unwrap();
        db.load_measurements(
            "station,date,prcp,tobs\n\
             S1,2017-08-23,,82\n\
             S1,2017-08-01,0.1,80\n\
             S2,2017-08-23,0.05,79\n\
             S2,2016-08-22,3.0,60\n\
             S1,2016-01-01,0.4,65\n",
        )
        .unwrap();
        db
    }

    fn db_error(err: &anyhow::Error) -> &DbError {
        err.downcast_ref::<DbError>()
            .expect("error should originate from the data layer")
    }

    #[test]
    fn build_anchors_window_to_latest_observation() {
        let report = ClimateReport::build(&scenario_db()).unwrap();
        assert_eq!(report.latest_date, NaiveDate::from_ymd_opt(2017, 8, 23).unwrap());
        assert_eq!(report.window_start, NaiveDate::from_ymd_opt(2016, 8, 23).unwrap());
    }

    #[test]
    fn build_sorts_precipitation_and_ignores_nulls_in_summary() {
        let report = ClimateReport::build(&scenario_db()).unwrap();
        let dates: Vec<&str> = report.precipitation.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2017-08-01", "2017-08-23", "2017-08-23"]);

        let summary = report.precipitation_summary.unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.max, 0.1);
    }

    #[test]
    fn build_picks_most_active_station() {
        let report = ClimateReport::build(&scenario_db()).unwrap();
        assert_eq!(report.station_count, 2);
        assert_eq!(
            report.most_active,
            StationActivity {
                station: "S1".to_string(),
                count: 3
            }
        );
        assert_eq!(report.temperature.min, Some(65.0));
        assert_eq!(report.temperature.max, Some(82.0));
        // only the two in-window S1 rows are histogrammed
        assert_eq!(report.temperature_observations.len(), 2);
    }

    #[test]
    fn build_fails_on_empty_store() {
        let err = ClimateReport::build(&Database::new().unwrap()).unwrap_err();
        assert!(matches!(db_error(&err), DbError::NoData(_)));
    }

    #[test]
    fn build_fails_on_unparsable_latest_date() {
        let db = Database::new().unwrap();
        db.load_measurements("station,date,prcp,tobs\nS1,2017-08-01,0.1,80\nS1,Aug 23 2017,0.1,80\n")
            .unwrap();
        let err = ClimateReport::build(&db).unwrap_err();
        assert!(matches!(db_error(&err), DbError::MalformedInput(_)));
    }

    #[test]
    fn build_fails_when_window_start_is_out_of_range() {
        let db = Database::new().unwrap();
        let earliest = dates::format_date(&NaiveDate::MIN);
        db.load_measurements(&format!("station,date,prcp,tobs\nS1,{},0.1,80\n", earliest))
            .unwrap();
        let err = ClimateReport::build(&db).unwrap_err();
        assert!(matches!(db_error(&err), DbError::MalformedInput(_)));
    }

    #[test]
    fn display_includes_station_summary() {
        let text = ClimateReport::build(&scenario_db()).unwrap().to_string();
        assert!(text.contains("Total number of stations: 2"));
        assert!(text.contains("The most active station is S1 with 3 observations."));
        assert!(text.contains("Lowest Temperature: 65"));
        assert!(text.contains("Highest Temperature: 82"));
    }

    #[test]
    fn render_charts_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let written = ClimateReport::build(&scenario_db())
            .unwrap()
            .render_charts(&out)
            .unwrap();
        assert_eq!(
            written,
            vec![out.join(PRECIPITATION_CHART), out.join(TEMPERATURE_CHART)]
        );
        assert!(written.iter().all(|p| p.exists()));
    }
}
