//! Read-only SQLite data access layer for the Hawaii climate dataset.
//!
//! This crate wraps a single SQLite connection and exposes typed query
//! methods used by both the offline report and the JSON API service.
//!
//! # Architecture
//!
//! - `Arc<Mutex<Connection>>` handle, cloned into every consumer and owned
//!   by the report or service root
//! - Existing stores are opened read-only via [`Database::open`]; nothing in
//!   this crate writes to them or checks their schema
//! - In-memory stores built with [`Database::new`] and the CSV loaders back
//!   the tests and CSV-driven runs
//! - Typed query methods return serializable structs from [`models`]
//!
//! # Usage
//!
//! ```rust
//! use surfsup_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_stations("station,name,latitude,longitude,elevation\nUSC00519397,WAIKIKI 717.2,21.2716,-157.8168,3.0\n").unwrap();
//! db.load_measurements("station,date,prcp,tobs\nUSC00519397,2010-01-01,0.08,65.0\n").unwrap();
//!
//! assert_eq!(db.station_count().unwrap(), 1);
//! assert_eq!(db.latest_observation_date().unwrap().as_deref(), Some("2010-01-01"));
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the SQL schema.
//!
//! - `measurement` - Daily precipitation and temperature observations
//! - `station` - Weather station metadata

pub mod error;
mod loader;
pub mod models;
mod queries;
pub mod schema;

pub use error::DbError;

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handle to the climate store.
///
/// Cloning is cheap and every clone talks to the same connection. Each
/// query holds the lock only while it runs.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> error::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self::from_connection(conn))
    }

    /// Open an existing, pre-populated store in read-only mode.
    pub fn open(path: impl AsRef<Path>) -> error::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::info!("opened climate store {} read-only", path.display());
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> error::Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIONS_CSV: &str = "station,name,latitude,longitude,elevation\nS1,One,21.0,-157.0,3.0\n";

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_stations(STATIONS_CSV).unwrap();
        assert_eq!(
            db2.station_count().unwrap(),
            1,
            "Clone should see same data via the shared connection"
        );
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert_eq!(db.station_count().unwrap(), 0);
        assert!(db.latest_observation_date().unwrap().is_none());
    }

    #[test]
    fn database_handle_is_shareable_across_threads() {
        let db = Database::new().unwrap();
        db.load_stations(STATIONS_CSV).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let db = db.clone();
                std::thread::spawn(move || db.all_stations().unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["S1".to_string()]);
        }
    }

    #[test]
    fn open_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawaii.sqlite");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(schema::create_schema()).unwrap();
            conn.execute(
                "INSERT INTO station (station, name) VALUES ('S1', 'One')",
                [],
            )
            .unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.all_stations().unwrap(), vec!["S1".to_string()]);
    }

    #[test]
    fn open_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawaii.sqlite");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(schema::create_schema()).unwrap();
        }

        let db = Database::open(&path).unwrap();
        let err = db.load_stations(STATIONS_CSV);
        assert!(err.is_err(), "Writes through a read-only handle must fail");
    }

    #[test]
    fn open_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = Database::open(dir.path().join("missing.sqlite"))
            .err()
            .expect("opening a missing store should fail");
        assert!(err.is_unavailable());
    }
}
