//! Command implementations for the SurfsUp CLI.
//!
//! Provides the `report` and `serve` subcommands and the shared options
//! that choose which climate store they read.

use clap::{Args, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use surfsup_db::Database;

pub mod chart;
pub mod report;
pub mod serve;

/// Where the climate data comes from.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// SQLite climate store, opened read-only
    #[arg(
        short = 'd',
        long,
        env = "SURFSUP_DATABASE",
        default_value = "Resources/hawaii.sqlite"
    )]
    pub database: PathBuf,

    /// Station CSV export; together with --measurements-csv, load an in-memory store instead
    #[arg(long, requires = "measurements_csv")]
    pub stations_csv: Option<PathBuf>,

    /// Measurement CSV export (station,date,prcp,tobs)
    #[arg(long, requires = "stations_csv")]
    pub measurements_csv: Option<PathBuf>,
}

impl StoreArgs {
    /// Open the configured store.
    pub fn open(&self) -> anyhow::Result<Database> {
        match (&self.stations_csv, &self.measurements_csv) {
            (Some(stations), Some(measurements)) => {
                log::info!(
                    "loading climate data from {} and {}",
                    stations.display(),
                    measurements.display()
                );
                let db = Database::new()?;
                db.load_stations(&std::fs::read_to_string(stations)?)?;
                db.load_measurements(&std::fs::read_to_string(measurements)?)?;
                Ok(db)
            }
            _ => Ok(Database::open(&self.database)?),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print precipitation and temperature summaries and render charts
    Report {
        #[command(flatten)]
        store: StoreArgs,

        /// Directory the SVG charts are written to
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Serve the climate queries as a JSON API
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Address to listen on
        #[arg(
            short = 'b',
            long,
            env = "SURFSUP_BIND",
            default_value = "127.0.0.1:5000"
        )]
        bind: SocketAddr,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Report { store, output_dir } => report::run_report(&store, &output_dir),
        Command::Serve { store, bind } => serve::run_serve(&store, bind).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_loads_csv_exports_into_memory() {
        let dir = tempfile::tempdir().unwrap();
        let stations = dir.path().join("hawaii_stations.csv");
        let measurements = dir.path().join("hawaii_measurements.csv");
        std::fs::write(
            &stations,
            "station,name,latitude,longitude,elevation\nS1,One,,,\nS2,Two,,,\n",
        )
        .unwrap();
        std::fs::write(
            &measurements,
            "station,date,prcp,tobs\nS1,2017-08-01,0.1,80\n",
        )
        .unwrap();

        let args = StoreArgs {
            database: dir.path().join("unused.sqlite"),
            stations_csv: Some(stations),
            measurements_csv: Some(measurements),
        };
        let db = args.open().unwrap();
        assert_eq!(db.station_count().unwrap(), 2);
    }

    #[test]
    fn open_missing_database_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = StoreArgs {
            database: dir.path().join("missing.sqlite"),
            stations_csv: None,
            measurements_csv: None,
        };
        assert!(args.open().is_err());
    }
}
