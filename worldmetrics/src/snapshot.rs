//! A chart result together with the query that produced it.
//!
//! Both the plotted traces and the CSV export links are derived from the
//! same snapshot, so edits to the selection after a chart was generated do
//! not change what the export links point at.

use worldmetrics_common::{ChartResult, DataQuery, DownloadQuery};

/// A displayed chart: backend result plus the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub query: DataQuery,
    pub result: ChartResult,
}

/// One plotted line: one country's values for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Legend name, `"<country> – <metric label>"`.
    pub name: String,
    pub metric: String,
    pub country_code: String,
    /// `(year, value)` points in backend order.
    pub points: Vec<(i32, f64)>,
}

/// One per-metric CSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadLink {
    pub metric: String,
    pub label: String,
    pub query: DownloadQuery,
}

/// Legend name for a country's series of a metric.
pub fn trace_name(country_name: &str, metric_label: &str) -> String {
    format!("{} \u{2013} {}", country_name, metric_label)
}

impl ChartSnapshot {
    pub fn new(query: DataQuery, result: ChartResult) -> Self {
        Self { query, result }
    }

    /// Whether the backend returned no series at all.
    pub fn is_empty(&self) -> bool {
        self.result.values().all(|m| m.series.is_empty())
    }

    /// Every series of every metric as a trace, metric-major.
    pub fn traces(&self) -> Vec<Trace> {
        self.result
            .iter()
            .flat_map(|(metric, metric_series)| {
                metric_series.series.iter().map(move |(code, series)| Trace {
                    name: trace_name(&series.country_name, &metric_series.label),
                    metric: metric.clone(),
                    country_code: code.clone(),
                    points: series.points().collect(),
                })
            })
            .collect()
    }

    /// One export per metric present in the result.
    pub fn download_links(&self) -> Vec<DownloadLink> {
        self.result
            .iter()
            .map(|(metric, metric_series)| DownloadLink {
                metric: metric.clone(),
                label: metric_series.label.clone(),
                query: self.query.download_query(metric.clone()),
            })
            .collect()
    }

    /// The export for `metric`, if it is part of the result.
    pub fn download_link(&self, metric: &str) -> Option<DownloadLink> {
        self.download_links().into_iter().find(|l| l.metric == metric)
    }

    /// Inclusive `(min, max)` over all plotted years.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        self.traces()
            .iter()
            .flat_map(|t| t.points.iter().map(|(year, _)| *year))
            .fold(None, |acc, year| match acc {
                None => Some((year, year)),
                Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
            })
    }

    /// Inclusive `(min, max)` over all finite plotted values.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        self.traces()
            .iter()
            .flat_map(|t| t.points.iter().map(|(_, value)| *value))
            .filter(|v| v.is_finite())
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn happy_path() -> ChartSnapshot {
        let query = DataQuery {
            countries: vec!["USA".to_string(), "FRA".to_string()],
            metrics: vec![mock::GDP.to_string()],
            start_year: 2000,
            end_year: 2010,
        };
        ChartSnapshot::new(query, mock::chart_result())
    }

    #[test]
    fn test_traces_named_per_country_and_metric() {
        let traces = happy_path().traces();
        let names: Vec<_> = traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["United States – GDP", "France – GDP"]);

        assert_eq!(traces[0].country_code, "USA");
        assert_eq!(traces[0].metric, mock::GDP);
        assert_eq!(traces[1].points[0], (2000, 1.36e12));
        assert_eq!(traces[1].points.len(), 3);
    }

    #[test]
    fn test_download_links_follow_snapshot_query() {
        let links = happy_path().download_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "GDP");
        assert_eq!(
            links[0].query.path_and_query(),
            "/download?countries=USA,FRA&metric=NY.GDP.MKTP.CD&start_year=2000&end_year=2010"
        );
    }

    #[test]
    fn test_empty_result() {
        let snapshot = ChartSnapshot::new(happy_path().query, ChartResult::new());
        assert!(snapshot.is_empty());
        assert!(snapshot.traces().is_empty());
        assert!(snapshot.download_links().is_empty());
        assert!(snapshot.year_extent().is_none());
        assert!(snapshot.value_extent().is_none());
    }

    #[test]
    fn test_extents() {
        let snapshot = happy_path();
        assert_eq!(snapshot.year_extent(), Some((2000, 2010)));
        assert_eq!(snapshot.value_extent(), Some((1.36e12, 15.05e12)));
    }

    #[test]
    fn test_download_link_lookup() {
        let snapshot = happy_path();
        assert!(snapshot.download_link(mock::GDP).is_some());
        assert!(snapshot.download_link("missing").is_none());
    }
}
