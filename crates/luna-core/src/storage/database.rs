//! SQLite-based reading storage.
//!
//! Provides persistent storage for:
//! - Basal body temperature readings
//! - Retention pruning
//! - Aggregate reading statistics
//!
//! Timestamps are stored as second-precision RFC 3339 UTC strings so
//! range filters can compare them lexically.

use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Timelike, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::{data_dir, migrations};
use crate::cycle::{CycleParams, Reading};
use crate::error::{CoreError, DatabaseError};
use crate::sample::generate_sample_readings;

/// Hour of day (UTC) given to generated sample readings.
const SAMPLE_READING_HOUR: u32 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    pub id: i64,
    pub temperature: f64,
    pub timestamp: DateTime<Utc>,
    pub created_at: Option<String>,
}

impl StoredReading {
    /// Engine view of this row, dated by its UTC calendar day.
    pub fn to_reading(&self) -> Reading {
        Reading::new(self.temperature, self.timestamp.date_naive()).with_id(self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReadingStats {
    pub count: u64,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// SQLite database for reading storage.
pub struct Database {
    conn: Connection,
}

fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

type RawRow = (i64, f64, String, Option<String>);

impl Database {
    /// Open the database at `<data dir>/luna.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("luna.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) a database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Validate and store a reading.
    ///
    /// # Errors
    /// Returns [`CoreError::Analysis`] for an implausible temperature, or a
    /// database error if the insert fails.
    pub fn insert_reading(
        &self,
        temperature: f64,
        timestamp: DateTime<Utc>,
        params: &CycleParams,
    ) -> Result<StoredReading, CoreError> {
        Reading::new(temperature, timestamp.date_naive()).validate(params)?;

        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        self.conn
            .execute(
                "INSERT INTO temperatures (temperature, timestamp) VALUES (?1, ?2)",
                params![temperature, encode_timestamp(timestamp)],
            )
            .map_err(DatabaseError::from)?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, temperature, %timestamp, "reading stored");

        Ok(StoredReading {
            id,
            temperature,
            timestamp,
            created_at: None,
        })
    }

    fn query_readings(
        &self,
        sql: &str,
        args: impl rusqlite::Params,
    ) -> Result<Vec<StoredReading>, DatabaseError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut readings = Vec::new();
        for row in rows {
            readings.push(Self::decode(row?)?);
        }
        Ok(readings)
    }

    fn decode((id, temperature, timestamp, created_at): RawRow) -> Result<StoredReading, DatabaseError> {
        let timestamp = DateTime::parse_from_rfc3339(&timestamp)
            .map_err(|e| DatabaseError::CorruptRow {
                id,
                message: format!("bad timestamp '{timestamp}': {e}"),
            })?
            .with_timezone(&Utc);
        Ok(StoredReading {
            id,
            temperature,
            timestamp,
            created_at,
        })
    }

    /// All readings, oldest first; same-timestamp rows in insertion order.
    pub fn all_readings(&self) -> Result<Vec<StoredReading>, DatabaseError> {
        self.query_readings(
            "SELECT id, temperature, timestamp, created_at
             FROM temperatures
             ORDER BY timestamp ASC, id ASC",
            [],
        )
    }

    /// Engine view of the full history, in submission order per day.
    pub fn analysis_readings(&self) -> Result<Vec<Reading>, DatabaseError> {
        Ok(self
            .all_readings()?
            .iter()
            .map(StoredReading::to_reading)
            .collect())
    }

    /// Readings from the last `days` days before `now`, oldest first.
    pub fn readings_since(
        &self,
        days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<StoredReading>, DatabaseError> {
        let cutoff = now - Duration::days(i64::from(days));
        self.query_readings(
            "SELECT id, temperature, timestamp, created_at
             FROM temperatures
             WHERE timestamp >= ?1
             ORDER BY timestamp ASC, id ASC",
            params![encode_timestamp(cutoff)],
        )
    }

    /// The latest reading on a UTC calendar day.
    pub fn reading_for_date(&self, date: NaiveDate) -> Result<Option<StoredReading>, DatabaseError> {
        let start = start_of_day(date);
        let end = start + Duration::days(1);
        let mut readings = self.query_readings(
            "SELECT id, temperature, timestamp, created_at
             FROM temperatures
             WHERE timestamp >= ?1 AND timestamp < ?2
             ORDER BY timestamp DESC, id DESC
             LIMIT 1",
            params![encode_timestamp(start), encode_timestamp(end)],
        )?;
        Ok(readings.pop())
    }

    /// Readings within a calendar month (`month` is 1-12), oldest first.
    pub fn readings_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<StoredReading>, DatabaseError> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Ok(Vec::new());
        };
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let Some(next) = next else {
            return Ok(Vec::new());
        };
        self.query_readings(
            "SELECT id, temperature, timestamp, created_at
             FROM temperatures
             WHERE timestamp >= ?1 AND timestamp < ?2
             ORDER BY timestamp ASC, id ASC",
            params![
                encode_timestamp(start_of_day(first)),
                encode_timestamp(start_of_day(next))
            ],
        )
    }

    pub fn readings_count(&self) -> Result<u64, DatabaseError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM temperatures", [], |row| row.get(0))?)
    }

    /// Delete readings older than `days_to_keep` days before `now`.
    ///
    /// Returns the number of rows removed.
    pub fn prune_older_than(
        &self,
        days_to_keep: u32,
        now: DateTime<Utc>,
    ) -> Result<usize, DatabaseError> {
        let cutoff = now - Duration::days(i64::from(days_to_keep));
        let removed = self.conn.execute(
            "DELETE FROM temperatures WHERE timestamp < ?1",
            params![encode_timestamp(cutoff)],
        )?;
        if removed > 0 {
            tracing::info!(removed, days_to_keep, "pruned old readings");
        }
        Ok(removed)
    }

    pub fn stats(&self) -> Result<ReadingStats, DatabaseError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*), AVG(temperature), MIN(temperature), MAX(temperature)
             FROM temperatures",
            [],
            |row| {
                Ok(ReadingStats {
                    count: row.get(0)?,
                    average: row.get(1)?,
                    min: row.get(2)?,
                    max: row.get(3)?,
                })
            },
        )?)
    }

    /// Insert demo readings ending on `today`, only into an empty table.
    ///
    /// Returns whether anything was inserted.
    pub fn seed_sample_data(&self, today: NaiveDate, seed: u64) -> Result<bool, DatabaseError> {
        let count = self.readings_count()?;
        if count > 0 {
            tracing::info!(count, "database already has readings, skipping seed");
            return Ok(false);
        }

        let readings = generate_sample_readings(today, seed);
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO temperatures (temperature, timestamp) VALUES (?1, ?2)")?;
            for reading in &readings {
                let at = start_of_day(reading.date) + Duration::hours(i64::from(SAMPLE_READING_HOUR));
                stmt.execute(params![reading.temperature, encode_timestamp(at)])?;
            }
        }
        tx.commit()?;

        tracing::info!(count = readings.len(), "seeded sample readings");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn insert_and_list() {
        let db = Database::open_memory().unwrap();
        let params = CycleParams::default();
        db.insert_reading(36.5, at(2024, 3, 2, 7), &params).unwrap();
        db.insert_reading(36.3, at(2024, 3, 1, 7), &params).unwrap();

        let all = db.all_readings().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].temperature, 36.3);
        assert_eq!(all[1].timestamp, at(2024, 3, 2, 7));
        assert!(all[0].created_at.is_some());
    }

    #[test]
    fn insert_rejects_implausible_temperature() {
        let db = Database::open_memory().unwrap();
        let err = db
            .insert_reading(42.0, at(2024, 3, 1, 7), &CycleParams::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::Analysis(_)));
        assert_eq!(db.readings_count().unwrap(), 0);
    }

    #[test]
    fn reading_for_date_returns_latest_that_day() {
        let db = Database::open_memory().unwrap();
        let params = CycleParams::default();
        db.insert_reading(36.3, at(2024, 3, 1, 6), &params).unwrap();
        db.insert_reading(36.6, at(2024, 3, 1, 9), &params).unwrap();
        db.insert_reading(36.9, at(2024, 3, 2, 6), &params).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(db.reading_for_date(day).unwrap().unwrap().temperature, 36.6);
        let empty = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(db.reading_for_date(empty).unwrap().is_none());
    }

    #[test]
    fn month_filter_excludes_neighbours() {
        let db = Database::open_memory().unwrap();
        let params = CycleParams::default();
        db.insert_reading(36.3, at(2024, 2, 29, 23), &params).unwrap();
        db.insert_reading(36.4, at(2024, 3, 1, 0), &params).unwrap();
        db.insert_reading(36.5, at(2024, 3, 31, 23), &params).unwrap();
        db.insert_reading(36.6, at(2024, 4, 1, 0), &params).unwrap();

        let march = db.readings_for_month(2024, 3).unwrap();
        let temps: Vec<_> = march.iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![36.4, 36.5]);
        assert!(db.readings_for_month(2024, 13).unwrap().is_empty());
        assert_eq!(db.readings_for_month(2024, 12).unwrap().len(), 0);
    }

    #[test]
    fn prune_and_since_use_cutoff() {
        let db = Database::open_memory().unwrap();
        let params = CycleParams::default();
        let now = at(2024, 6, 1, 12);
        db.insert_reading(36.3, now - Duration::days(100), &params).unwrap();
        db.insert_reading(36.4, now - Duration::days(20), &params).unwrap();
        db.insert_reading(36.5, now - Duration::days(2), &params).unwrap();

        assert_eq!(db.readings_since(14, now).unwrap().len(), 1);
        assert_eq!(db.prune_older_than(90, now).unwrap(), 1);
        assert_eq!(db.readings_count().unwrap(), 2);
        assert_eq!(db.prune_older_than(90, now).unwrap(), 0);
    }

    #[test]
    fn stats_on_empty_and_filled_table() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.stats().unwrap(), ReadingStats::default());

        let params = CycleParams::default();
        db.insert_reading(36.2, at(2024, 3, 1, 7), &params).unwrap();
        db.insert_reading(36.6, at(2024, 3, 2, 7), &params).unwrap();
        let stats = db.stats().unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.average.unwrap() - 36.4).abs() < 1e-9);
        assert_eq!(stats.min, Some(36.2));
        assert_eq!(stats.max, Some(36.6));
    }

    #[test]
    fn seed_only_into_empty_table() {
        let db = Database::open_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
        assert!(db.seed_sample_data(today, 1).unwrap());
        assert_eq!(db.readings_count().unwrap(), 14);
        assert!(!db.seed_sample_data(today, 1).unwrap());
        assert_eq!(db.readings_count().unwrap(), 14);

        let last = db.all_readings().unwrap().pop().unwrap();
        assert_eq!(last.timestamp, at(2024, 3, 14, 7));
    }

    #[test]
    fn analysis_readings_carry_ids_and_utc_dates() {
        let db = Database::open_memory().unwrap();
        let stored = db
            .insert_reading(36.4, at(2024, 3, 1, 23), &CycleParams::default())
            .unwrap();
        let readings = db.analysis_readings().unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].id, Some(stored.id));
        assert_eq!(readings[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luna.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.insert_reading(36.4, at(2024, 3, 1, 7), &CycleParams::default())
                .unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.readings_count().unwrap(), 1);
    }
}
