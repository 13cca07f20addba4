//! Query builders for the `/data` and `/download` endpoints.
//!
//! List parameters are sent as comma-separated values. Each element is
//! percent-encoded on its own so the separators stay literal, e.g.
//! `countries=USA,FRA&metrics=NY.GDP.MKTP.CD&start_year=2000&end_year=2010`.

/// Path of the metadata endpoint.
pub const METADATA_PATH: &str = "/metadata";
/// Path of the chart data endpoint.
pub const DATA_PATH: &str = "/data";
/// Path of the CSV export endpoint.
pub const DOWNLOAD_PATH: &str = "/download";

/// Parameters of one `/data` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataQuery {
    /// Country codes, in selection order.
    pub countries: Vec<String>,
    /// Metric keys, in selection order.
    pub metrics: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
}

impl DataQuery {
    /// Encode as a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        format!(
            "countries={}&metrics={}&start_year={}&end_year={}",
            join_encoded(&self.countries),
            join_encoded(&self.metrics),
            self.start_year,
            self.end_year
        )
    }

    /// Path and query for this request, relative to the backend root.
    pub fn path_and_query(&self) -> String {
        format!("{}?{}", DATA_PATH, self.to_query_string())
    }

    /// The export request for one metric over the same countries and years.
    pub fn download_query(&self, metric: impl Into<String>) -> DownloadQuery {
        DownloadQuery {
            countries: self.countries.clone(),
            metric: metric.into(),
            start_year: self.start_year,
            end_year: self.end_year,
        }
    }
}

/// Parameters of one `/download` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadQuery {
    pub countries: Vec<String>,
    /// A single metric key.
    pub metric: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl DownloadQuery {
    /// Encode as a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        format!(
            "countries={}&metric={}&start_year={}&end_year={}",
            join_encoded(&self.countries),
            urlencoding::encode(&self.metric),
            self.start_year,
            self.end_year
        )
    }

    /// Path and query for this request, relative to the backend root.
    pub fn path_and_query(&self) -> String {
        format!("{}?{}", DOWNLOAD_PATH, self.to_query_string())
    }

    /// File name the backend attaches to the export.
    pub fn file_name(&self) -> String {
        let metric: String = self
            .metric
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_{}_{}.csv", metric, self.start_year, self.end_year)
    }
}

fn join_encoded(values: &[String]) -> String {
    values
        .iter()
        .map(|v| urlencoding::encode(v).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gdp_query() -> DataQuery {
        DataQuery {
            countries: vec!["USA".to_string(), "FRA".to_string()],
            metrics: vec!["NY.GDP.MKTP.CD".to_string()],
            start_year: 2000,
            end_year: 2010,
        }
    }

    #[test]
    fn test_data_query_string() {
        assert_eq!(
            gdp_query().path_and_query(),
            "/data?countries=USA,FRA&metrics=NY.GDP.MKTP.CD&start_year=2000&end_year=2010"
        );
    }

    #[test]
    fn test_multiple_metrics_joined() {
        let mut query = gdp_query();
        query.metrics.push("net_migration".to_string());
        assert!(
            query
                .to_query_string()
                .contains("metrics=NY.GDP.MKTP.CD,net_migration&")
        );
    }

    #[test]
    fn test_elements_are_encoded() {
        let query = DataQuery {
            countries: vec!["A&B".to_string()],
            metrics: vec!["x y".to_string()],
            start_year: 1990,
            end_year: 1991,
        };
        assert_eq!(
            query.to_query_string(),
            "countries=A%26B&metrics=x%20y&start_year=1990&end_year=1991"
        );
    }

    #[test]
    fn test_download_query() {
        let download = gdp_query().download_query("NY.GDP.MKTP.CD");
        assert_eq!(
            download.path_and_query(),
            "/download?countries=USA,FRA&metric=NY.GDP.MKTP.CD&start_year=2000&end_year=2010"
        );
        assert_eq!(download.file_name(), "NY.GDP.MKTP.CD_2000_2010.csv");
    }

    #[test]
    fn test_file_name_sanitized() {
        let mut download = gdp_query().download_query("../etc/passwd");
        download.start_year = 1990;
        assert_eq!(download.file_name(), ".._etc_passwd_1990_2010.csv");
    }
}
