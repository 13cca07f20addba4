//! Wire data model shared by the backend client and the dashboard.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A country as listed by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryRef {
    /// Unique country code (e.g., "USA").
    #[serde(rename = "Country Code", alias = "code")]
    pub code: String,

    /// Display name (e.g., "United States").
    #[serde(rename = "Country Name", alias = "name")]
    pub name: String,
}

impl CountryRef {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for CountryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Inclusive range of years covered by the backend data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

/// Descriptive catalog returned by `/metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// All selectable countries, in backend order.
    pub countries: Vec<CountryRef>,

    /// Year bounds of the dataset.
    pub years: YearBounds,

    /// Metric key -> display label, in backend order.
    pub metrics: IndexMap<String, String>,
}

impl Metadata {
    /// Check the invariants the dashboard relies on.
    pub fn validate(&self) -> Result<()> {
        if self.years.min > self.years.max {
            return Err(Error::InvalidMetadata(format!(
                "year bounds are inverted ({} > {})",
                self.years.min, self.years.max
            )));
        }
        Ok(())
    }
}

/// One country's values for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "countryName")]
    pub country_name: String,
    pub years: Vec<i32>,
    pub values: Vec<f64>,
}

impl Series {
    /// Iterate `(year, value)` pairs. Unpaired trailing entries are ignored.
    pub fn points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of plottable points.
    pub fn len(&self) -> usize {
        self.years.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All series returned for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Display label of the metric.
    pub label: String,
    /// Country code -> series.
    pub series: IndexMap<String, Series>,
}

/// Response of `/data`: metric key -> series for that metric.
pub type ChartResult = IndexMap<String, MetricSeries>;
