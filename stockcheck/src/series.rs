//! Yearly earnings and dividend history.
//!
//! A `YearSeries` keeps its samples strictly ascending by year at every
//! write, so reads hand out plain slices. Shorter periods are expressed as
//! borrowed sub-slices (`windowed`, `excluding_latest`) rather than by
//! removing and re-inserting samples.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One fiscal year of per-share figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSample {
    /// Fiscal year
    pub year: i32,
    /// Earnings per share
    pub earning: f64,
    /// Dividend per share
    pub dividend: f64,
}

impl YearSample {
    pub fn new(year: i32, earning: f64, dividend: f64) -> Self {
        Self {
            year,
            earning,
            dividend,
        }
    }
}

/// Errors raised when writing to a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("duplicate year {0} in series")]
    DuplicateYear(i32),
}

/// Ordered per-year samples of one instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<YearSample>", into = "Vec<YearSample>")]
pub struct YearSeries {
    samples: Vec<YearSample>,
}

impl YearSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all samples.
    ///
    /// The input may come in any order. A duplicate year rejects the whole
    /// batch and leaves the current samples untouched.
    pub fn set(&mut self, samples: impl IntoIterator<Item = YearSample>) -> Result<(), SeriesError> {
        let mut samples: Vec<YearSample> = samples.into_iter().collect();
        samples.sort_by_key(|s| s.year);

        if let Some(pair) = samples.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(SeriesError::DuplicateYear(pair[1].year));
        }

        self.samples = samples;
        Ok(())
    }

    /// Insert a single sample at its ordered position.
    pub fn push(&mut self, sample: YearSample) -> Result<(), SeriesError> {
        match self.samples.binary_search_by_key(&sample.year, |s| s.year) {
            Ok(_) => Err(SeriesError::DuplicateYear(sample.year)),
            Err(idx) => {
                self.samples.insert(idx, sample);
                Ok(())
            }
        }
    }

    /// All samples, ascending by year.
    pub fn get(&self) -> &[YearSample] {
        &self.samples
    }

    /// The last `n` samples. Empty when `n` exceeds the series length.
    pub fn windowed(&self, n: usize) -> &[YearSample] {
        if n > self.samples.len() {
            return &[];
        }
        &self.samples[self.samples.len() - n..]
    }

    /// The series without its `k` most recent samples. Empty when `k`
    /// exceeds the series length.
    pub fn excluding_latest(&self, k: usize) -> &[YearSample] {
        if k > self.samples.len() {
            return &[];
        }
        &self.samples[..self.samples.len() - k]
    }

    pub fn latest(&self) -> Option<&YearSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, YearSample> {
        self.samples.iter()
    }

    /// First and last year covered, if any.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        }
    }
}

impl TryFrom<Vec<YearSample>> for YearSeries {
    type Error = SeriesError;

    fn try_from(samples: Vec<YearSample>) -> Result<Self, Self::Error> {
        let mut series = Self::new();
        series.set(samples)?;
        Ok(series)
    }
}

impl From<YearSeries> for Vec<YearSample> {
    fn from(series: YearSeries) -> Self {
        series.samples
    }
}

impl<'a> IntoIterator for &'a YearSeries {
    type Item = &'a YearSample;
    type IntoIter = std::slice::Iter<'a, YearSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
