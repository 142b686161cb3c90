//! Typed query methods over the `measurement` and `station` tables.
//!
//! Dates are stored as `YYYY-MM-DD` text, so SQLite's string comparison
//! orders them chronologically. Caller-supplied dates are bound as-is and
//! compared the same way.

use crate::error::Result;
use crate::models::{
    DatePrecipitation, DateTemperature, StationActivity, TemperatureStats, TemperatureSummary,
};
use crate::Database;
use rusqlite::{params, OptionalExtension, Row};

impl Database {
    // ───────────────────── Precipitation ─────────────────────

    /// Get the most recent observation date in the store.
    ///
    /// Returns `None` when the store holds no observations.
    pub fn latest_observation_date(&self) -> Result<Option<String>> {
        let conn = self.conn()?;
        let date = conn
            .query_row(
                "SELECT date FROM measurement ORDER BY date DESC LIMIT 1",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        log::info!("query: latest_observation_date returned {:?}", date);
        Ok(date)
    }

    /// Get every (date, precipitation) pair on or after `since`.
    ///
    /// Ordered by date; rows sharing a date keep store order.
    pub fn precipitation_since(&self, since: &str) -> Result<Vec<DatePrecipitation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, prcp FROM measurement
             WHERE date >= ?1
             ORDER BY date, rowid",
        )?;
        let rows = stmt
            .query_map(params![since], |row| {
                Ok(DatePrecipitation {
                    date: row.get(0)?,
                    prcp: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        log::info!(
            "query: precipitation_since({}) returned {} records",
            since,
            rows.len()
        );
        Ok(rows)
    }

    // ───────────────────── Stations ─────────────────────

    /// Count the rows of the `station` table.
    pub fn station_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))?;
        log::info!("query: station_count returned {}", count);
        Ok(count)
    }

    /// List every station identifier in store order.
    pub fn all_stations(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT station FROM station ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        log::info!("query: all_stations returned {} records", rows.len());
        Ok(rows)
    }

    /// Rank stations by how many observations reference them.
    ///
    /// Sorted by count descending. Equal counts fall back to the station
    /// identifier ascending so the ranking is deterministic.
    pub fn station_activity_ranking(&self) -> Result<Vec<StationActivity>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT station, COUNT(*) AS observations
             FROM measurement
             GROUP BY station
             ORDER BY observations DESC, station ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationActivity {
                    station: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        log::info!(
            "query: station_activity_ranking returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// The head of [`station_activity_ranking`](Self::station_activity_ranking).
    pub fn most_active_station(&self) -> Result<Option<StationActivity>> {
        Ok(self.station_activity_ranking()?.into_iter().next())
    }

    // ───────────────────── Temperature ─────────────────────

    /// Lowest, highest and mean temperature ever observed at `station`.
    pub fn temperature_extremes_and_mean(&self, station: &str) -> Result<TemperatureSummary> {
        let conn = self.conn()?;
        let summary = conn.query_row(
            "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement WHERE station = ?1",
            params![station],
            |row| {
                Ok(TemperatureSummary {
                    min: row.get(0)?,
                    max: row.get(1)?,
                    avg: row.get(2)?,
                })
            },
        )?;
        log::info!(
            "query: temperature_extremes_and_mean({}) returned {:?}",
            station,
            summary
        );
        Ok(summary)
    }

    /// Temperature observations for `station` on or after `since`, in store order.
    pub fn temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<DateTemperature>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, tobs FROM measurement
             WHERE station = ?1 AND date >= ?2
             ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map(params![station, since], |row| {
                Ok(DateTemperature {
                    date: row.get(0)?,
                    tobs: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        log::info!(
            "query: temperature_observations({}, {}) returned {} records",
            station,
            since,
            rows.len()
        );
        Ok(rows)
    }

    /// Min, mean and max temperature across all stations from `start`
    /// through `end` (inclusive), or open-ended when `end` is `None`.
    pub fn temperature_stats_in_range(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats> {
        let conn = self.conn()?;
        let stats = match end {
            Some(end) => conn.query_row(
                "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                 WHERE date >= ?1 AND date <= ?2",
                params![start, end],
                temperature_stats_from_row,
            )?,
            None => conn.query_row(
                "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
                 WHERE date >= ?1",
                params![start],
                temperature_stats_from_row,
            )?,
        };
        log::info!(
            "query: temperature_stats_in_range({}, {:?}) returned {:?}",
            start,
            end,
            stats
        );
        Ok(stats)
    }
}

fn temperature_stats_from_row(row: &Row<'_>) -> rusqlite::Result<TemperatureStats> {
    Ok(TemperatureStats {
        tmin: row.get(0)?,
        tavg: row.get(1)?,
        tmax: row.get(2)?,
    })
}
