use crate::error::ApiError;
use chrono::NaiveDate;
use std::sync::Arc;
use surfsup_db::{Database, DbError};
use surfsup_utils::dates;

/// State shared by every request handler.
///
/// Built once before the listener binds and never mutated afterwards, so
/// handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    most_active_station: Arc<str>,
    today: fn() -> NaiveDate,
}

impl AppState {
    /// Rank the stations once and remember the most active one.
    ///
    /// Fails with [`DbError::NoData`] when the store has no observations.
    pub fn init(db: Database) -> Result<Self, DbError> {
        let top = db
            .most_active_station()?
            .ok_or_else(|| DbError::NoData("no observations to rank stations by".to_string()))?;
        log::info!(
            "most active station is {} ({} observations)",
            top.station,
            top.count
        );
        Ok(Self {
            db,
            most_active_station: top.station.into(),
            today: dates::today,
        })
    }

    /// Replace the wall clock used to anchor the trailing one-year window.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn most_active_station(&self) -> &str {
        &self.most_active_station
    }

    /// First day of the trailing year ending today, as a store date string.
    pub fn window_start(&self) -> Result<String, ApiError> {
        let today = (self.today)();
        let start = dates::one_year_before(&today).ok_or_else(|| {
            DbError::MalformedInput(format!("no trailing year before {}", today))
        })?;
        Ok(dates::format_date(&start))
    }

    /// Run a DAL call on the blocking pool.
    pub(crate) async fn query<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> surfsup_db::error::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        Ok(tokio::task::spawn_blocking(move || f(&db)).await??)
    }
}
