//! In-memory provider.

use anyhow::Result;

use super::DataProvider;
use crate::instrument::Instrument;
use crate::series::YearSample;

/// Serves a fixed set of instruments.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    instruments: Vec<Instrument>,
}

impl StaticProvider {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }

    /// Add an instrument built from raw samples.
    ///
    /// Samples with a repeated year leave the instrument with an empty history
    /// and a remark, the same way the SQLite provider reports bad tables.
    pub fn with_samples(mut self, name: &str, samples: Vec<YearSample>) -> Self {
        let instrument = match Instrument::with_samples(name, samples) {
            Ok(instrument) => instrument,
            Err(e) => {
                let mut instrument = Instrument::new(name);
                instrument.add_remark(format!("Data not loaded: {}", e));
                instrument
            }
        };
        self.instruments.push(instrument);
        self
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl DataProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    fn load_instruments(&self) -> Result<Vec<Instrument>> {
        Ok(self.instruments.clone())
    }
}
