use std::path::PathBuf;

use worldmetrics_common::{ChartResult, CountryRef, DataQuery, Metadata};

use crate::request::RequestId;

/// Messages for the WorldMetrics application.
#[derive(Debug, Clone)]
pub enum Message {
    /// Metadata request finished.
    MetadataLoaded(Result<Metadata, String>),

    /// User asked to fetch metadata again after a failure.
    RetryMetadata,

    /// User typed in the country search box.
    CountryFilterChanged(String),

    /// User proposed a new country selection.
    SetCountries(Vec<CountryRef>),

    /// User asked for a random set of countries.
    PickRandomCountries,

    /// User checked or unchecked a metric.
    ToggleMetric(String, bool),

    /// User moved the year range controls.
    SetYearRange(i32, i32),

    /// User pressed "Generate Chart".
    GenerateChart,

    /// Chart data request finished.
    ChartLoaded {
        id: RequestId,
        query: DataQuery,
        result: Result<ChartResult, String>,
    },

    /// User asked to export one metric as CSV.
    DownloadCsv(String),

    /// CSV export finished.
    CsvSaved {
        id: RequestId,
        metric: String,
        result: Result<PathBuf, String>,
    },
}
