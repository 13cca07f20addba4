//! WorldMetrics Iced application.

use std::path::PathBuf;

use iced::{Element, Task, Theme};
use indexmap::IndexMap;

use worldmetrics_common::{BackendClient, ChartResult, DataQuery, Metadata};

use crate::message::Message;
use crate::request::{KeyedRequestTracker, RequestId, RequestState};
use crate::selection::Selection;
use crate::view::chart::ChartPanel;
use crate::view::dashboard::{DashboardView, dashboard_view};

/// The main WorldMetrics application.
pub struct WorldMetrics {
    /// Backend client.
    client: BackendClient,
    /// Directory CSV exports are saved to.
    download_dir: PathBuf,
    /// Metadata request and, once loaded, the catalog.
    metadata: RequestState<Metadata>,
    /// Current user selection.
    selection: Selection,
    /// Country search input.
    country_filter: String,
    /// Displayed chart and its request state.
    chart: ChartPanel,
    /// Export state per metric of the displayed chart.
    exports: IndexMap<String, RequestState<PathBuf>>,
    /// Outstanding export per metric.
    export_requests: KeyedRequestTracker,
}

impl WorldMetrics {
    /// Create the application and start loading metadata.
    pub fn new(client: BackendClient, download_dir: PathBuf) -> (Self, Task<Message>) {
        let mut app = Self {
            client,
            download_dir,
            metadata: RequestState::Idle,
            selection: Selection::default(),
            country_filter: String::new(),
            chart: ChartPanel::default(),
            exports: IndexMap::new(),
            export_requests: KeyedRequestTracker::default(),
        };

        let task = app.load_metadata();
        (app, task)
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        match self.chart.displayed() {
            Some(snapshot) if !snapshot.is_empty() => {
                format!("WorldMetrics - {} series", snapshot.traces().len())
            }
            _ => "WorldMetrics".to_string(),
        }
    }

    pub fn metadata(&self) -> &RequestState<Metadata> {
        &self.metadata
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn chart(&self) -> &ChartPanel {
        &self.chart
    }

    pub fn exports(&self) -> &IndexMap<String, RequestState<PathBuf>> {
        &self.exports
    }

    /// Id of the outstanding export for `metric`, if any.
    pub fn export_request(&self, metric: &str) -> Option<RequestId> {
        self.export_requests.current(metric)
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MetadataLoaded(result) => {
                self.handle_metadata(result);
            }

            Message::RetryMetadata => {
                if !self.metadata.is_pending() {
                    return self.load_metadata();
                }
            }

            Message::CountryFilterChanged(filter) => {
                self.country_filter = filter;
            }

            Message::SetCountries(candidate) => {
                self.selection = self.selection.set_countries(candidate);
            }

            Message::PickRandomCountries => {
                if let Some(metadata) = self.metadata.value() {
                    self.selection = self
                        .selection
                        .pick_random_countries(&metadata.countries, &mut rand::rng());
                }
            }

            Message::ToggleMetric(key, checked) => {
                self.selection = self.selection.toggle_metric(&key, checked);
            }

            Message::SetYearRange(start_year, end_year) => {
                self.selection = self.selection.set_year_range(start_year, end_year);
            }

            Message::GenerateChart => {
                return self.generate_chart();
            }

            Message::ChartLoaded { id, query, result } => {
                self.handle_chart(id, query, result);
            }

            Message::DownloadCsv(metric) => {
                return self.download_csv(metric);
            }

            Message::CsvSaved { id, metric, result } => {
                self.handle_export(id, metric, result);
            }
        }

        Task::none()
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        dashboard_view(DashboardView {
            metadata: &self.metadata,
            selection: &self.selection,
            country_filter: &self.country_filter,
            chart: &self.chart,
            exports: &self.exports,
            base_url: self.client.base_url(),
        })
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Request the metadata catalog.
    fn load_metadata(&mut self) -> Task<Message> {
        self.metadata = RequestState::Pending;
        let client = self.client.clone();

        Task::perform(
            async move { client.fetch_metadata().await.map_err(|e| e.to_string()) },
            Message::MetadataLoaded,
        )
    }

    fn handle_metadata(&mut self, result: Result<Metadata, String>) {
        match result {
            Ok(metadata) => {
                self.selection = Selection::for_metadata(&metadata);
                self.metadata = RequestState::Succeeded(metadata);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load metadata");
                self.metadata = RequestState::Failed(e);
            }
        }
    }

    /// Request chart data for the current selection.
    ///
    /// Sends nothing unless at least one country and one metric are selected.
    fn generate_chart(&mut self) -> Task<Message> {
        let Some(query) = self.selection.data_query() else {
            tracing::debug!("Generate ignored: select at least one country and one metric");
            return Task::none();
        };

        let id = self.chart.begin();
        tracing::info!(
            request = %id,
            countries = ?query.countries,
            metrics = ?query.metrics,
            start_year = query.start_year,
            end_year = query.end_year,
            "Requesting chart data"
        );

        let client = self.client.clone();
        let request = query.clone();
        let (task, handle) = Task::perform(
            async move { client.fetch_data(&request).await.map_err(|e| e.to_string()) },
            move |result| Message::ChartLoaded { id, query, result },
        )
        .abortable();

        self.chart.track(handle);
        task
    }

    fn handle_chart(&mut self, id: RequestId, query: DataQuery, result: Result<ChartResult, String>) {
        let failure = result.as_ref().err().cloned();

        if !self.chart.settle(id, query, result) {
            tracing::debug!(request = %id, "Discarding response of superseded chart request");
            return;
        }

        match failure {
            Some(e) => {
                tracing::error!(request = %id, error = %e, "Chart request failed");
            }
            None => {
                let traces = self.chart.displayed().map_or(0, |s| s.traces().len());
                tracing::info!(request = %id, traces, "Chart updated");
                self.exports.clear();
                self.export_requests.clear();
            }
        }
    }

    /// Save the CSV export of one displayed metric.
    fn download_csv(&mut self, metric: String) -> Task<Message> {
        let Some(link) = self
            .chart
            .displayed()
            .and_then(|snapshot| snapshot.download_link(&metric))
        else {
            return Task::none();
        };

        if self.exports.get(&metric).is_some_and(RequestState::is_pending) {
            return Task::none();
        }
        let id = self.export_requests.begin(&metric);
        self.exports.insert(metric.clone(), RequestState::Pending);
        tracing::info!(request = %id, metric = %metric, "Exporting CSV");

        let client = self.client.clone();
        let dir = self.download_dir.clone();
        Task::perform(
            async move {
                client
                    .download_to(&link.query, &dir)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::CsvSaved { id, metric, result },
        )
    }

    /// Record an export outcome unless a later export or chart superseded it.
    fn handle_export(&mut self, id: RequestId, metric: String, result: Result<PathBuf, String>) {
        if !self.export_requests.finish(&metric, id) {
            tracing::debug!(request = %id, metric = %metric, "Discarding outcome of superseded CSV export");
            return;
        }

        if let Err(ref e) = result {
            tracing::warn!(request = %id, metric = %metric, error = %e, "CSV export failed");
        }
        self.exports.insert(metric, result.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    fn app() -> WorldMetrics {
        let client = BackendClient::new("http://127.0.0.1:9").unwrap();
        let (app, _task) = WorldMetrics::new(client, PathBuf::from("exports"));
        app
    }

    fn ready_app() -> WorldMetrics {
        let mut app = app();
        let _ = app.update(Message::MetadataLoaded(Ok(mock::metadata())));
        app
    }

    fn select_happy_path(app: &mut WorldMetrics) {
        let countries = mock::metadata().countries;
        let _ = app.update(Message::SetCountries(countries));
        let _ = app.update(Message::ToggleMetric(mock::GDP.to_string(), true));
        let _ = app.update(Message::SetYearRange(2000, 2010));
    }

    fn chart_loaded(app: &WorldMetrics, result: ChartResult) -> Message {
        Message::ChartLoaded {
            id: app.chart().current_request().unwrap(),
            query: app.selection().data_query().unwrap(),
            result: Ok(result),
        }
    }

    #[test]
    fn test_boot_is_loading() {
        let app = app();
        assert!(app.metadata().is_pending());
        assert_eq!(app.selection().year_range(), (2000, 2020));
        assert_eq!(app.title(), "WorldMetrics");
    }

    #[test]
    fn test_metadata_initializes_year_range() {
        let app = ready_app();
        assert!(app.metadata().value().is_some());
        assert_eq!(app.selection().year_range(), (1990, 2020));
    }

    #[test]
    fn test_metadata_failure_is_visible_and_retryable() {
        let mut app = app();
        let _ = app.update(Message::MetadataLoaded(Err("connection refused".to_string())));
        assert_eq!(app.metadata().error(), Some("connection refused"));

        let _ = app.update(Message::RetryMetadata);
        assert!(app.metadata().is_pending());
    }

    #[test]
    fn test_random_requires_metadata() {
        let mut app = app();
        let _ = app.update(Message::PickRandomCountries);
        assert!(app.selection().countries().is_empty());

        let mut app = ready_app();
        let _ = app.update(Message::PickRandomCountries);
        assert_eq!(app.selection().countries().len(), 2);
    }

    #[test]
    fn test_generate_without_selection_sends_nothing() {
        let mut app = ready_app();
        let _ = app.update(Message::GenerateChart);
        assert_eq!(app.chart().requests_issued(), 0);
        assert_eq!(app.chart().status(), &RequestState::Idle);
        assert!(app.chart().displayed().is_none());

        let _ = app.update(Message::SetCountries(mock::metadata().countries));
        let _ = app.update(Message::GenerateChart);
        assert_eq!(app.chart().requests_issued(), 0);

        let _ = app.update(Message::SetCountries(Vec::new()));
        let _ = app.update(Message::ToggleMetric(mock::GDP.to_string(), true));
        let _ = app.update(Message::GenerateChart);
        assert_eq!(app.chart().requests_issued(), 0);
    }

    #[test]
    fn test_generate_happy_path() {
        let mut app = ready_app();
        select_happy_path(&mut app);

        let _ = app.update(Message::GenerateChart);
        assert_eq!(app.chart().requests_issued(), 1);
        assert!(app.chart().status().is_pending());

        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);

        let snapshot = app.chart().displayed().unwrap();
        let names: Vec<_> = snapshot.traces().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["United States – GDP", "France – GDP"]);

        let links = snapshot.download_links();
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].query.path_and_query(),
            "/download?countries=USA,FRA&metric=NY.GDP.MKTP.CD&start_year=2000&end_year=2010"
        );
        assert_eq!(app.title(), "WorldMetrics - 2 series");
    }

    #[test]
    fn test_late_response_of_superseded_request_is_discarded() {
        let mut app = ready_app();
        select_happy_path(&mut app);

        let _ = app.update(Message::GenerateChart);
        let stale = chart_loaded(&app, mock::chart_result());

        let _ = app.update(Message::GenerateChart);
        let current = chart_loaded(&app, ChartResult::new());

        let _ = app.update(current);
        let _ = app.update(stale);

        assert_eq!(app.chart().requests_issued(), 2);
        assert!(app.chart().displayed().unwrap().is_empty());
    }

    #[test]
    fn test_download_links_ignore_later_edits() {
        let mut app = ready_app();
        select_happy_path(&mut app);
        let _ = app.update(Message::GenerateChart);
        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);

        // Edit the selection without regenerating.
        let _ = app.update(Message::SetYearRange(1995, 2020));
        let _ = app.update(Message::SetCountries(vec![mock::metadata().countries[1].clone()]));

        let links = app.chart().displayed().unwrap().download_links();
        assert_eq!(links[0].query.countries, vec!["USA", "FRA"]);
        assert_eq!((links[0].query.start_year, links[0].query.end_year), (2000, 2010));
    }

    #[test]
    fn test_download_tracks_export_state() {
        let mut app = ready_app();

        // No chart yet: nothing to export.
        let _ = app.update(Message::DownloadCsv(mock::GDP.to_string()));
        assert!(app.exports().is_empty());

        select_happy_path(&mut app);
        let _ = app.update(Message::GenerateChart);
        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);

        let _ = app.update(Message::DownloadCsv("unknown".to_string()));
        assert!(app.exports().is_empty());

        let _ = app.update(Message::DownloadCsv(mock::GDP.to_string()));
        assert!(app.exports()[mock::GDP].is_pending());
        let id = app.export_request(mock::GDP).unwrap();

        // A second click while pending starts nothing.
        let _ = app.update(Message::DownloadCsv(mock::GDP.to_string()));
        assert_eq!(app.export_request(mock::GDP), Some(id));

        let path = PathBuf::from("exports/NY.GDP.MKTP.CD_2000_2010.csv");
        let _ = app.update(Message::CsvSaved {
            id,
            metric: mock::GDP.to_string(),
            result: Ok(path.clone()),
        });
        assert_eq!(app.exports()[mock::GDP].value(), Some(&path));
        assert_eq!(app.export_request(mock::GDP), None);
    }

    #[test]
    fn test_new_chart_resets_exports() {
        let mut app = ready_app();
        select_happy_path(&mut app);
        let _ = app.update(Message::GenerateChart);
        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);
        let _ = app.update(Message::DownloadCsv(mock::GDP.to_string()));
        let old = app.export_request(mock::GDP).unwrap();

        let _ = app.update(Message::GenerateChart);
        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);
        assert!(app.exports().is_empty());
        assert_eq!(app.export_request(mock::GDP), None);

        // A late export outcome for the replaced chart is ignored.
        let _ = app.update(Message::CsvSaved {
            id: old,
            metric: mock::GDP.to_string(),
            result: Err("timed out".to_string()),
        });
        assert!(app.exports().is_empty());
    }

    #[test]
    fn test_late_export_does_not_overwrite_newer_export() {
        let mut app = ready_app();
        select_happy_path(&mut app);
        let _ = app.update(Message::GenerateChart);
        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);

        // Export GDP for the first chart.
        let _ = app.update(Message::DownloadCsv(mock::GDP.to_string()));
        let first = app.export_request(mock::GDP).unwrap();

        // A second chart with the same metric, and a fresh export of it.
        let _ = app.update(Message::SetYearRange(1995, 2015));
        let _ = app.update(Message::GenerateChart);
        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);
        let _ = app.update(Message::DownloadCsv(mock::GDP.to_string()));
        let second = app.export_request(mock::GDP).unwrap();
        assert_ne!(first, second);

        // The first export finishes late.
        let _ = app.update(Message::CsvSaved {
            id: first,
            metric: mock::GDP.to_string(),
            result: Ok(PathBuf::from("exports/NY.GDP.MKTP.CD_2000_2010.csv")),
        });
        assert!(app.exports()[mock::GDP].is_pending());
        assert_eq!(app.export_request(mock::GDP), Some(second));

        let path = PathBuf::from("exports/NY.GDP.MKTP.CD_1995_2015.csv");
        let _ = app.update(Message::CsvSaved {
            id: second,
            metric: mock::GDP.to_string(),
            result: Ok(path.clone()),
        });
        assert_eq!(app.exports()[mock::GDP].value(), Some(&path));
    }

    #[test]
    fn test_failed_chart_keeps_previous() {
        let mut app = ready_app();
        select_happy_path(&mut app);
        let _ = app.update(Message::GenerateChart);
        let loaded = chart_loaded(&app, mock::chart_result());
        let _ = app.update(loaded);

        let _ = app.update(Message::GenerateChart);
        let failed = Message::ChartLoaded {
            id: app.chart().current_request().unwrap(),
            query: app.selection().data_query().unwrap(),
            result: Err("500 Internal Server Error".to_string()),
        };
        let _ = app.update(failed);

        assert_eq!(app.chart().status().error(), Some("500 Internal Server Error"));
        assert_eq!(app.chart().displayed().unwrap().traces().len(), 2);
    }
}
