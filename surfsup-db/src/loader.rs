//! CSV loading functions for populating an in-memory climate store.
//!
//! The formats match the CSV exports shipped alongside `hawaii.sqlite`.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `station,name,latitude,longitude,elevation`
//! - **Measurements** (has headers): `station,date(YYYY-MM-DD),prcp,tobs`

use crate::Database;
use rusqlite::params;

impl Database {
    /// Load station metadata from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// station,name,latitude,longitude,elevation
    /// USC00519397,"WAIKIKI 717.2, HI US",21.2716,-157.8168,3.0
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let station = r.get(0).unwrap_or("").trim();
            if station.is_empty() {
                continue;
            }
            let name = r.get(1).map(str::trim).filter(|s| !s.is_empty());
            let latitude: Option<f64> = r.get(2).and_then(|s| s.trim().parse().ok());
            let longitude: Option<f64> = r.get(3).and_then(|s| s.trim().parse().ok());
            let elevation: Option<f64> = r.get(4).and_then(|s| s.trim().parse().ok());

            conn.execute(
                "INSERT OR REPLACE INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![station, name, latitude, longitude, elevation],
            )?;
            count += 1;
        }
        log::info!("loader: loaded {} stations", count);
        Ok(())
    }

    /// Load daily measurements from CSV string.
    ///
    /// An empty `prcp` field is stored as NULL. Rows without a station or
    /// date, or with a non-numeric `tobs`, are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// station,date,prcp,tobs
    /// USC00519397,2010-01-01,0.08,65.0
    /// USC00519397,2010-01-02,,63.0
    /// ```
    pub fn load_measurements(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let station = r.get(0).unwrap_or("").trim();
            let date = r.get(1).unwrap_or("").trim();
            let prcp: Option<f64> = r.get(2).and_then(|s| s.trim().parse().ok());

            let tobs: f64 = match r.get(3).unwrap_or("").trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            if station.is_empty() || date.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT INTO measurement (station, date, prcp, tobs)
                 VALUES (?1, ?2, ?3, ?4)",
                params![station, date, prcp, tobs],
            )?;
            count += 1;
        }
        log::info!(
            "loader: loaded {} measurements, skipped {} incomplete",
            count,
            skipped
        );
        Ok(())
    }
}
