//! SQLite persistence for billable hour planning.
//!
//! Stores the yearly goal, days off, monthly weights, and the daily log of
//! billed hours. All reads come back in ascending key order so callers can
//! fold them straight into the planning maps without re-sorting.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a single `rusqlite::Connection` and is not `Sync`.
//! Open one handle per thread, or serialize access behind a mutex.
//!
//! # Date Format
//!
//! Dates are stored as ISO 8601 `YYYY-MM-DD` text. Zero padding keeps
//! lexicographic order identical to chronological order, so `ORDER BY date`
//! needs no conversion.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors returned by the storage layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// An underlying SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored date did not parse as `YYYY-MM-DD`.
    #[error("invalid date in column {column}: {value}")]
    DateParse {
        column: &'static str,
        value: String,
        #[source]
        source: chrono::format::ParseError,
    },
}

/// A yearly billable hours goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRecord {
    pub year: i32,
    pub total_hours: f64,
}

/// A single non-working day and why it is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOffRecord {
    pub date: NaiveDate,
    pub kind: String,
}

/// A relative weight for one month of one year.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyWeightRecord {
    pub year: i32,
    pub month: u32,
    pub weight: f64,
}

/// Billed hours recorded for one day, with an optional target override.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLogRecord {
    pub date: NaiveDate,
    pub hours_billed: f64,
    pub target_hours_override: Option<f64>,
}

/// Handle to the billable hours database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and applies the schema.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened billable hours database");
        Ok(db)
    }

    /// Opens an in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS goals (
                year INTEGER PRIMARY KEY,
                total_hours REAL NOT NULL
            );

            CREATE TABLE IF NOT EXISTS days_off (
                date TEXT PRIMARY KEY,
                kind TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS monthly_weights (
                year INTEGER NOT NULL,
                month INTEGER NOT NULL,
                weight REAL NOT NULL,
                PRIMARY KEY (year, month)
            );

            CREATE TABLE IF NOT EXISTS daily_logs (
                date TEXT PRIMARY KEY,
                hours_billed REAL NOT NULL,
                target_hours_override REAL
            );",
        )?;
        Ok(())
    }

    /// Sets the goal for `year`, replacing any previous value.
    pub fn set_goal(&self, year: i32, total_hours: f64) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO goals (year, total_hours) VALUES (?1, ?2)
             ON CONFLICT(year) DO UPDATE SET total_hours = excluded.total_hours",
            params![year, total_hours],
        )?;
        Ok(())
    }

    /// Returns the goal for `year`, if one has been set.
    pub fn get_goal(&self, year: i32) -> Result<Option<GoalRecord>, DbError> {
        self.conn
            .query_row(
                "SELECT year, total_hours FROM goals WHERE year = ?1",
                params![year],
                |row| {
                    Ok(GoalRecord {
                        year: row.get(0)?,
                        total_hours: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(DbError::from)
    }

    /// Marks `date` as a day off. Re-adding an existing date updates its kind.
    pub fn add_day_off(&self, date: NaiveDate, kind: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO days_off (date, kind) VALUES (?1, ?2)
             ON CONFLICT(date) DO UPDATE SET kind = excluded.kind",
            params![format_date(date), kind],
        )?;
        Ok(())
    }

    /// Removes a day off. Returns `false` if the date was not marked.
    pub fn remove_day_off(&self, date: NaiveDate) -> Result<bool, DbError> {
        let changed = self.conn.execute(
            "DELETE FROM days_off WHERE date = ?1",
            params![format_date(date)],
        )?;
        Ok(changed > 0)
    }

    /// Lists all days off in ascending date order.
    pub fn list_days_off(&self) -> Result<Vec<DayOffRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, kind FROM days_off ORDER BY date ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (date_text, kind) = row?;
            records.push(DayOffRecord {
                date: parse_date("date", &date_text)?,
                kind,
            });
        }
        Ok(records)
    }

    /// Sets the weight for one month, replacing any previous value.
    pub fn set_monthly_weight(&self, year: i32, month: u32, weight: f64) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO monthly_weights (year, month, weight) VALUES (?1, ?2, ?3)
             ON CONFLICT(year, month) DO UPDATE SET weight = excluded.weight",
            params![year, month, weight],
        )?;
        Ok(())
    }

    /// Lists the weights configured for `year` in ascending month order.
    pub fn list_monthly_weights(&self, year: i32) -> Result<Vec<MonthlyWeightRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT year, month, weight FROM monthly_weights
             WHERE year = ?1 ORDER BY month ASC",
        )?;
        let rows = stmt.query_map(params![year], |row| {
            Ok(MonthlyWeightRecord {
                year: row.get(0)?,
                month: row.get(1)?,
                weight: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Records billed hours for `date`, replacing any previous entry.
    ///
    /// Passing `None` for the override leaves an existing override in place;
    /// only `Some` replaces it.
    pub fn upsert_daily_log(
        &self,
        date: NaiveDate,
        hours_billed: f64,
        target_hours_override: Option<f64>,
    ) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO daily_logs (date, hours_billed, target_hours_override)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(date) DO UPDATE SET
                 hours_billed = excluded.hours_billed,
                 target_hours_override = COALESCE(
                     excluded.target_hours_override,
                     daily_logs.target_hours_override
                 )",
            params![format_date(date), hours_billed, target_hours_override],
        )?;
        Ok(())
    }

    /// Returns the log entry for `date`, if any.
    pub fn get_daily_log(&self, date: NaiveDate) -> Result<Option<DailyLogRecord>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT date, hours_billed, target_hours_override
                 FROM daily_logs WHERE date = ?1",
                params![format_date(date)],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, Option<f64>>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((date_text, hours_billed, target_hours_override)) => Ok(Some(DailyLogRecord {
                date: parse_date("date", &date_text)?,
                hours_billed,
                target_hours_override,
            })),
            None => Ok(None),
        }
    }

    /// Lists all log entries in ascending date order.
    pub fn list_daily_logs(&self) -> Result<Vec<DailyLogRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, hours_billed, target_hours_override
             FROM daily_logs ORDER BY date ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, Option<f64>>(2)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (date_text, hours_billed, target_hours_override) = row?;
            records.push(DailyLogRecord {
                date: parse_date("date", &date_text)?,
                hours_billed,
                target_hours_override,
            });
        }
        Ok(records)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(column: &'static str, value: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| DbError::DateParse {
        column,
        value: value.to_owned(),
        source,
    })
}
