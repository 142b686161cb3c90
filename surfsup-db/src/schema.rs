//! SQL schema for in-memory climate stores.
//!
//! Mirrors the layout of the published `hawaii.sqlite` dataset so that the
//! same queries run against a file-backed store and a CSV-loaded one.
//! Stores opened with [`crate::Database::open`] are never migrated.

/// Returns the full SQL schema as a single batch string.
///
/// - `measurement` - one row per station per day (station, date, prcp, tobs).
///   `prcp` is nullable; `(station, date)` is deliberately not unique.
/// - `station` - station metadata keyed by the station identifier.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_station ON measurement(station);
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);

    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL UNIQUE,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn count_objects(conn: &Connection, kind: &str, name: &str) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_tables_and_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in ["measurement", "station"] {
            assert_eq!(count_objects(&conn, "table", table), 1, "Table '{}' should exist", table);
        }
        for idx in ["idx_measurement_station", "idx_measurement_date"] {
            assert_eq!(count_objects(&conn, "index", idx), 1, "Index '{}' should exist", idx);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
