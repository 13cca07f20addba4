//! User selection state and the reducers that transform it.
//!
//! [`Selection`] is an immutable record. Every user event maps to one reducer
//! that returns the next selection, so the cardinality caps are enforced at
//! the point of mutation and can be checked without a UI.

use rand::Rng;
use rand::seq::SliceRandom;

use worldmetrics_common::{CountryRef, DataQuery, Metadata};

/// Maximum number of countries in one chart.
pub const MAX_COUNTRIES: usize = 5;

/// Maximum number of metrics in one chart.
pub const MAX_METRICS: usize = 2;

/// Year range used until metadata provides the real bounds.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2000, 2020);

/// Countries, years and metrics the user has chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    countries: Vec<CountryRef>,
    year_range: (i32, i32),
    metrics: Vec<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            year_range: DEFAULT_YEAR_RANGE,
            metrics: Vec::new(),
        }
    }
}

impl Selection {
    /// Initial selection once metadata is known: nothing picked, full year span.
    pub fn for_metadata(metadata: &Metadata) -> Self {
        Self {
            year_range: (metadata.years.min, metadata.years.max),
            ..Self::default()
        }
    }

    /// Selected countries, in selection order.
    pub fn countries(&self) -> &[CountryRef] {
        &self.countries
    }

    /// Selected metric keys, in selection order.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Selected `(start_year, end_year)`.
    pub fn year_range(&self) -> (i32, i32) {
        self.year_range
    }

    pub fn is_country_selected(&self, code: &str) -> bool {
        self.countries.iter().any(|c| c.code == code)
    }

    pub fn is_metric_selected(&self, key: &str) -> bool {
        self.metrics.iter().any(|m| m == key)
    }

    /// Replace the selected countries.
    ///
    /// A candidate with more than [`MAX_COUNTRIES`] entries, or with a
    /// repeated country code, is rejected as a whole and the current
    /// selection is returned unchanged.
    #[must_use]
    pub fn set_countries(&self, candidate: Vec<CountryRef>) -> Self {
        if candidate.len() > MAX_COUNTRIES {
            tracing::debug!(
                requested = candidate.len(),
                max = MAX_COUNTRIES,
                "Country selection rejected"
            );
            return self.clone();
        }

        let has_duplicate = candidate
            .iter()
            .enumerate()
            .any(|(i, c)| candidate[..i].iter().any(|prev| prev.code == c.code));
        if has_duplicate {
            tracing::debug!("Country selection rejected: duplicate country");
            return self.clone();
        }

        Self {
            countries: candidate,
            ..self.clone()
        }
    }

    /// Candidate country list with `country` added (`include`) or removed.
    ///
    /// Adding may produce a list over the cap; [`Selection::set_countries`]
    /// decides whether to accept it.
    pub fn country_candidate(&self, country: &CountryRef, include: bool) -> Vec<CountryRef> {
        let mut candidate: Vec<CountryRef> = self
            .countries
            .iter()
            .filter(|c| c.code != country.code)
            .cloned()
            .collect();
        if include {
            candidate.push(country.clone());
        }
        candidate
    }

    /// Check or uncheck a metric.
    ///
    /// Checking appends the key unless it is already selected or
    /// [`MAX_METRICS`] are selected. Unchecking always removes it.
    #[must_use]
    pub fn toggle_metric(&self, key: &str, checked: bool) -> Self {
        let mut metrics = self.metrics.clone();

        if checked {
            if metrics.len() >= MAX_METRICS || metrics.iter().any(|m| m == key) {
                return self.clone();
            }
            metrics.push(key.to_string());
        } else {
            metrics.retain(|m| m != key);
        }

        Self {
            metrics,
            ..self.clone()
        }
    }

    /// Replace the year range with the pair provided by the range controls.
    ///
    /// The controls are bounded by the metadata years; no clamping here.
    #[must_use]
    pub fn set_year_range(&self, start_year: i32, end_year: i32) -> Self {
        Self {
            year_range: (start_year, end_year),
            ..self.clone()
        }
    }

    /// Replace the countries with up to [`MAX_COUNTRIES`] random picks.
    #[must_use]
    pub fn pick_random_countries<R: Rng + ?Sized>(
        &self,
        countries: &[CountryRef],
        rng: &mut R,
    ) -> Self {
        let mut shuffled = countries.to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(MAX_COUNTRIES);

        Self {
            countries: shuffled,
            ..self.clone()
        }
    }

    /// The `/data` request for this selection.
    ///
    /// `None` when no country or no metric is selected; nothing is sent then.
    pub fn data_query(&self) -> Option<DataQuery> {
        if self.countries.is_empty() || self.metrics.is_empty() {
            return None;
        }

        Some(DataQuery {
            countries: self.countries.iter().map(|c| c.code.clone()).collect(),
            metrics: self.metrics.clone(),
            start_year: self.year_range.0,
            end_year: self.year_range.1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    fn countries(n: usize) -> Vec<CountryRef> {
        (0..n)
            .map(|i| CountryRef::new(format!("C{:02}", i), format!("Country {}", i)))
            .collect()
    }

    #[test]
    fn test_for_metadata_uses_full_year_span() {
        let selection = Selection::for_metadata(&mock::metadata());
        assert_eq!(selection.year_range(), (1990, 2020));
        assert!(selection.countries().is_empty());
        assert!(selection.metrics().is_empty());
    }

    #[test]
    fn test_default_year_range() {
        assert_eq!(Selection::default().year_range(), (2000, 2020));
    }

    #[test]
    fn test_set_countries_accepts_up_to_five() {
        let selection = Selection::default().set_countries(countries(5));
        assert_eq!(selection.countries().len(), 5);
    }

    #[test]
    fn test_set_countries_rejects_six_in_full() {
        let before = Selection::default().set_countries(countries(2));
        let after = before.set_countries(countries(6));
        assert_eq!(after, before);
        assert_eq!(after.countries().len(), 2);
    }

    #[test]
    fn test_set_countries_rejects_duplicates() {
        let mut candidate = countries(2);
        candidate.push(candidate[0].clone());

        let selection = Selection::default().set_countries(candidate);
        assert!(selection.countries().is_empty());
    }

    #[test]
    fn test_country_candidate() {
        let all = countries(6);
        let selection = Selection::default().set_countries(all[..5].to_vec());

        let grown = selection.country_candidate(&all[5], true);
        assert_eq!(grown.len(), 6);
        assert_eq!(selection.set_countries(grown), selection);

        let shrunk = selection.country_candidate(&all[0], false);
        assert_eq!(shrunk.len(), 4);
        let next = selection.set_countries(shrunk);
        assert!(!next.is_country_selected("C00"));

        // Re-adding an already selected country moves it to the end without duplicating.
        let readded = selection.country_candidate(&all[1], true);
        assert_eq!(readded.len(), 5);
        assert_eq!(readded.last().map(|c| c.code.as_str()), Some("C01"));
    }

    #[test]
    fn test_toggle_metric_cap() {
        let selection = Selection::default()
            .toggle_metric("gdp", true)
            .toggle_metric("pop", true);
        assert_eq!(selection.metrics(), ["gdp", "pop"]);

        let third = selection.toggle_metric("migration", true);
        assert_eq!(third, selection);

        let removed = selection.toggle_metric("gdp", false);
        assert_eq!(removed.metrics(), ["pop"]);

        let added = removed.toggle_metric("migration", true);
        assert_eq!(added.metrics(), ["pop", "migration"]);
    }

    #[test]
    fn test_toggle_metric_already_selected() {
        let selection = Selection::default().toggle_metric("gdp", true);
        assert_eq!(selection.toggle_metric("gdp", true).metrics(), ["gdp"]);
        assert!(selection.toggle_metric("other", false).is_metric_selected("gdp"));
    }

    #[test]
    fn test_set_year_range_does_not_clamp() {
        let selection = Selection::for_metadata(&mock::metadata()).set_year_range(1800, 2100);
        assert_eq!(selection.year_range(), (1800, 2100));
    }

    #[test]
    fn test_pick_random_countries_bound() {
        let mut rng = SmallRng::seed_from_u64(7);

        for n in [0, 1, 3, 5, 6, 40] {
            let pool = countries(n);
            let selection = Selection::default().pick_random_countries(&pool, &mut rng);
            assert_eq!(selection.countries().len(), n.min(MAX_COUNTRIES));

            let codes: HashSet<_> = selection.countries().iter().map(|c| &c.code).collect();
            assert_eq!(codes.len(), selection.countries().len());
            assert!(selection.countries().iter().all(|c| pool.contains(c)));
        }
    }

    #[test]
    fn test_pick_random_keeps_metrics_and_years() {
        let mut rng = SmallRng::seed_from_u64(1);
        let selection = Selection::default()
            .toggle_metric("gdp", true)
            .set_year_range(2001, 2005)
            .pick_random_countries(&countries(10), &mut rng);

        assert_eq!(selection.metrics(), ["gdp"]);
        assert_eq!(selection.year_range(), (2001, 2005));
    }

    #[test]
    fn test_cardinality_holds_for_random_sequences() {
        let mut rng = SmallRng::seed_from_u64(42);
        let pool = countries(12);
        let keys = ["a", "b", "c", "d"];
        let mut selection = Selection::default();

        for _ in 0..2000 {
            selection = match rng.random_range(0..3) {
                0 => {
                    let size = rng.random_range(0..=8);
                    let start = rng.random_range(0..pool.len());
                    let candidate: Vec<_> =
                        pool.iter().cycle().skip(start).take(size).cloned().collect();
                    selection.set_countries(candidate)
                }
                1 => {
                    let key = keys[rng.random_range(0..keys.len())];
                    selection.toggle_metric(key, rng.random_bool(0.6))
                }
                _ => {
                    let country = &pool[rng.random_range(0..pool.len())];
                    let candidate = selection.country_candidate(country, rng.random_bool(0.7));
                    selection.set_countries(candidate)
                }
            };

            assert!(selection.countries().len() <= MAX_COUNTRIES);
            assert!(selection.metrics().len() <= MAX_METRICS);
        }
    }

    #[test]
    fn test_data_query_gating() {
        let base = Selection::default();
        assert!(base.data_query().is_none());

        let with_country = base.set_countries(countries(1));
        assert!(with_country.data_query().is_none());

        let with_metric = base.toggle_metric("gdp", true);
        assert!(with_metric.data_query().is_none());

        let both = with_country.toggle_metric("gdp", true);
        assert!(both.data_query().is_some());
    }

    #[test]
    fn test_data_query_happy_path() {
        let metadata = mock::metadata();
        let selection = Selection::for_metadata(&metadata)
            .set_countries(metadata.countries.clone())
            .toggle_metric("NY.GDP.MKTP.CD", true)
            .set_year_range(2000, 2010);

        let query = selection.data_query().unwrap();
        assert_eq!(
            query.path_and_query(),
            "/data?countries=USA,FRA&metrics=NY.GDP.MKTP.CD&start_year=2000&end_year=2010"
        );
    }
}
