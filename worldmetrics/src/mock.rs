//! Mock backend payloads for testing.
//!
//! Provides metadata and chart results shaped like the backend's responses
//! without running a backend.

use indexmap::IndexMap;

use worldmetrics_common::{ChartResult, CountryRef, Metadata, MetricSeries, Series, YearBounds};

/// Key of the GDP metric used by the mock payloads.
pub const GDP: &str = "NY.GDP.MKTP.CD";

/// Two countries, 1990-2020, one GDP metric.
pub fn metadata() -> Metadata {
    Metadata {
        countries: vec![
            CountryRef::new("USA", "United States"),
            CountryRef::new("FRA", "France"),
        ],
        years: YearBounds {
            min: 1990,
            max: 2020,
        },
        metrics: IndexMap::from([(GDP.to_string(), "GDP".to_string())]),
    }
}

/// A larger catalog with the indicators the World Bank backend serves.
pub fn world_metadata() -> Metadata {
    let countries = [
        ("ARG", "Argentina"),
        ("AUS", "Australia"),
        ("BRA", "Brazil"),
        ("CAN", "Canada"),
        ("DEU", "Germany"),
        ("FRA", "France"),
        ("IND", "India"),
        ("JPN", "Japan"),
        ("NGA", "Nigeria"),
        ("USA", "United States"),
    ]
    .into_iter()
    .map(|(code, name)| CountryRef::new(code, name))
    .collect();

    let metrics = [
        ("gdp_per_capita", "GDP per Capita (current US$)"),
        ("net_migration", "Net Migration"),
        ("unemployment_rate", "Unemployment Rate (% of labour force)"),
        ("total_population", "Total Population"),
        ("population_growth", "Population Growth (% annual)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Metadata {
        countries,
        years: YearBounds {
            min: 1960,
            max: 2023,
        },
        metrics,
    }
}

/// Build a series from `(year, value)` pairs.
pub fn series(country_name: &str, points: &[(i32, f64)]) -> Series {
    Series {
        country_name: country_name.to_string(),
        years: points.iter().map(|(y, _)| *y).collect(),
        values: points.iter().map(|(_, v)| *v).collect(),
    }
}

/// GDP for the United States and France, 2000-2010.
pub fn chart_result() -> ChartResult {
    let series = IndexMap::from([
        (
            "USA".to_string(),
            series(
                "United States",
                &[(2000, 10.25e12), (2005, 13.04e12), (2010, 15.05e12)],
            ),
        ),
        (
            "FRA".to_string(),
            series("France", &[(2000, 1.36e12), (2005, 2.2e12), (2010, 2.64e12)]),
        ),
    ]);

    IndexMap::from([(
        GDP.to_string(),
        MetricSeries {
            label: "GDP".to_string(),
            series,
        },
    )])
}
