//! Instrument data providers.
//!
//! A provider hands the rating run a collection of named instruments with
//! their yearly history. Evaluation never touches the provider again.
//!
//! # Providers
//! - **sqlite**: one table per instrument in a SQLite file
//! - **memory**: instruments held in memory (tests, embedding)

mod memory;
mod sqlite;

pub use memory::StaticProvider;
pub use sqlite::SqliteProvider;

use anyhow::Result;

use crate::instrument::Instrument;

// ============================================================================
// Data Provider Trait
// ============================================================================

/// Source of instruments to rate.
pub trait DataProvider {
    /// Provider name (e.g., "sqlite", "static")
    fn name(&self) -> &'static str;

    /// Load every instrument with its history.
    ///
    /// Per-instrument problems should be reported as remarks on the
    /// instrument; an error aborts the whole run.
    fn load_instruments(&self) -> Result<Vec<Instrument>>;
}

impl<P: DataProvider + ?Sized> DataProvider for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load_instruments(&self) -> Result<Vec<Instrument>> {
        (**self).load_instruments()
    }
}

impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load_instruments(&self) -> Result<Vec<Instrument>> {
        (**self).load_instruments()
    }
}
