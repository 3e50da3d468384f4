//! SQLite provider.
//!
//! Every user table of the database is one instrument; the table name is the
//! instrument name. Rows carry `year`, `earning_per_share` and
//! `div_per_share`; a NULL figure reads as zero.

use anyhow::Result;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use stockcheck_common::Error;

use super::DataProvider;
use crate::instrument::Instrument;
use crate::series::YearSample;

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
     ORDER BY name";

/// Reads instruments from a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteProvider {
    db_path: PathBuf,
}

impl SqliteProvider {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Get the database path
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Connection> {
        if !self.db_path.exists() {
            return Err(Error::NotFound(format!("database {}", self.db_path.display())).into());
        }

        Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| self.source_error(e).into())
    }

    fn table_names(&self, conn: &Connection) -> Result<Vec<String>> {
        let read = || -> rusqlite::Result<Vec<String>> {
            let mut stmt = conn.prepare(LIST_TABLES_SQL)?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            rows.collect()
        };
        read().map_err(|e| self.source_error(e).into())
    }

    /// The file exists but SQLite cannot read it (corrupt, locked, not a database).
    fn source_error(&self, e: rusqlite::Error) -> Error {
        Error::Source(format!("{}: {}", self.db_path.display(), e))
    }

    fn read_samples(conn: &Connection, table: &str) -> rusqlite::Result<Vec<YearSample>> {
        let sql = format!(
            "SELECT year, earning_per_share, div_per_share FROM {} ORDER BY year",
            quote_identifier(table)
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_sample)?;
        rows.collect()
    }

    fn row_to_sample(row: &rusqlite::Row) -> rusqlite::Result<YearSample> {
        let earning: Option<f64> = row.get(1)?;
        let dividend: Option<f64> = row.get(2)?;
        Ok(YearSample::new(
            row.get(0)?,
            earning.unwrap_or(0.0),
            dividend.unwrap_or(0.0),
        ))
    }

    fn load_table(conn: &Connection, table: &str) -> Instrument {
        let samples = match Self::read_samples(conn, table) {
            Ok(samples) => samples,
            Err(e) => {
                warn!(table, error = %e, "Table unreadable");
                let mut instrument = Instrument::new(table);
                instrument.add_remark(format!("Data not loaded: table unreadable ({})", e));
                return instrument;
            }
        };

        match Instrument::with_samples(table, samples) {
            Ok(instrument) => {
                debug!(table, years = instrument.series.len(), "Loaded instrument");
                instrument
            }
            Err(e) => {
                warn!(table, error = %e, "Invalid history");
                let mut instrument = Instrument::new(table);
                instrument.add_remark(format!("Data not loaded: {}", e));
                instrument
            }
        }
    }
}

impl DataProvider for SqliteProvider {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load_instruments(&self) -> Result<Vec<Instrument>> {
        let conn = self.open()?;
        let tables = self.table_names(&conn)?;

        let instruments: Vec<Instrument> = tables
            .iter()
            .map(|table| Self::load_table(&conn, table))
            .collect();

        info!(
            db_path = %self.db_path.display(),
            count = instruments.len(),
            "Loaded instruments from SQLite"
        );
        Ok(instruments)
    }
}

/// Quote a table name as an SQL identifier.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
