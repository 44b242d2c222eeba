use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// The fixed date-filter vocabulary users pick from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum DateBucket {
    #[strum(serialize = "today")]
    #[serde(rename = "today")]
    Today,
    #[strum(serialize = "tomorrow")]
    #[serde(rename = "tomorrow")]
    Tomorrow,
    #[strum(serialize = "this week")]
    #[serde(rename = "this week")]
    ThisWeek,
    #[strum(serialize = "this weekend")]
    #[serde(rename = "this weekend")]
    ThisWeekend,
    #[strum(serialize = "next week")]
    #[serde(rename = "next week")]
    NextWeek,
    #[strum(serialize = "later")]
    #[serde(rename = "later")]
    Later,
}

impl DateBucket {
    /// Labels outside the vocabulary mean "no date filter", never an error.
    pub fn parse(label: &str) -> Option<Self> {
        Self::from_str(label).ok()
    }
}

/// Inclusive on both ends; a missing `to` makes it the single day `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            from: day,
            to: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to.unwrap_or(self.from)
    }
}

/// The user's current filter selection. Every mutation bumps `revision`,
/// which ties in-flight assembly requests to the state they were computed
/// for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    selected_types: HashSet<String>,
    selected_venues: HashSet<String>,
    date_filter: Option<DateBucket>,
    date_range: Option<DateRange>,
    #[serde(skip)]
    revision: u64,
}

impl FilterState {
    pub fn selected_types(&self) -> &HashSet<String> {
        &self.selected_types
    }

    pub fn selected_venues(&self) -> &HashSet<String> {
        &self.selected_venues
    }

    pub fn date_filter(&self) -> Option<DateBucket> {
        self.date_filter
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn has_active_filters(&self) -> bool {
        !self.selected_types.is_empty()
            || !self.selected_venues.is_empty()
            || self.date_filter.is_some()
            || self.date_range.is_some()
    }

    /// Adds the category if absent, removes it if present.
    pub fn toggle_type(&mut self, category: &str) {
        if !self.selected_types.remove(category) {
            self.selected_types.insert(category.to_string());
        }
        self.revision += 1;
    }

    pub fn set_venues(&mut self, venue_ids: Vec<String>) {
        self.selected_venues = venue_ids.into_iter().collect();
        self.revision += 1;
    }

    /// Picking a named bucket drops any explicit range.
    pub fn set_date_filter(&mut self, bucket: Option<DateBucket>) {
        if bucket.is_some() {
            self.date_range = None;
        }
        self.date_filter = bucket;
        self.revision += 1;
    }

    pub fn set_date_filter_label(&mut self, label: &str) {
        self.set_date_filter(DateBucket::parse(label));
    }

    /// Picking an explicit range drops any named bucket.
    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        if range.is_some() {
            self.date_filter = None;
        }
        self.date_range = range;
        self.revision += 1;
    }

    pub fn reset(&mut self) {
        self.selected_types.clear();
        self.selected_venues.clear();
        self.date_filter = None;
        self.date_range = None;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_log::test]
    fn should_toggle_type_on_and_off() {
        let mut filters = FilterState::default();

        filters.toggle_type("surf");
        assert!(filters.selected_types().contains("surf"));

        filters.toggle_type("surf");
        assert!(filters.selected_types().is_empty());
    }

    #[test_log::test]
    fn when_nothing_is_selected_should_report_no_active_filters() {
        assert!(!FilterState::default().has_active_filters());
    }

    #[test_log::test]
    fn when_any_dimension_is_set_should_report_active_filters() {
        let mut by_type = FilterState::default();
        by_type.toggle_type("music");
        assert!(by_type.has_active_filters());

        let mut by_venue = FilterState::default();
        by_venue.set_venues(vec!["venue-1".to_string()]);
        assert!(by_venue.has_active_filters());

        let mut by_bucket = FilterState::default();
        by_bucket.set_date_filter(Some(DateBucket::Today));
        assert!(by_bucket.has_active_filters());

        let mut by_range = FilterState::default();
        by_range.set_date_range(Some(DateRange::single(day(2026, 8, 10))));
        assert!(by_range.has_active_filters());
    }

    #[test_log::test]
    fn when_a_bucket_is_picked_should_clear_the_range() {
        let mut filters = FilterState::default();

        filters.set_date_range(Some(DateRange::single(day(2026, 8, 10))));
        filters.set_date_filter(Some(DateBucket::ThisWeek));

        assert_eq!(filters.date_filter(), Some(DateBucket::ThisWeek));
        assert_eq!(filters.date_range(), None);
    }

    #[test_log::test]
    fn when_a_range_is_picked_should_clear_the_bucket() {
        let mut filters = FilterState::default();

        filters.set_date_filter(Some(DateBucket::ThisWeek));
        filters.set_date_range(Some(DateRange::new(
            day(2026, 8, 10),
            Some(day(2026, 8, 12)),
        )));

        assert_eq!(filters.date_filter(), None);
        assert!(filters.date_range().is_some());
    }

    #[test_log::test]
    fn when_label_is_outside_the_vocabulary_should_clear_the_date_filter() {
        let mut filters = FilterState::default();

        filters.set_date_filter_label("this week");
        assert_eq!(filters.date_filter(), Some(DateBucket::ThisWeek));

        filters.set_date_filter_label("sometime nice");
        assert_eq!(filters.date_filter(), None);
        assert!(!filters.has_active_filters());
    }

    #[test_log::test]
    fn should_bump_revision_on_every_mutation() {
        let mut filters = FilterState::default();
        let start = filters.revision();

        filters.toggle_type("surf");
        filters.set_venues(vec![]);
        filters.set_date_filter(Some(DateBucket::Later));
        filters.set_date_range(None);
        filters.reset();

        assert_eq!(filters.revision(), start + 5);
    }

    #[test_log::test]
    fn should_reset_every_dimension() {
        let mut filters = FilterState::default();

        filters.toggle_type("surf");
        filters.set_venues(vec!["venue-1".to_string()]);
        filters.set_date_filter(Some(DateBucket::Tomorrow));
        filters.reset();

        assert!(!filters.has_active_filters());
    }

    #[test_log::test]
    fn when_range_has_no_end_should_cover_the_single_day() {
        let range = DateRange::single(day(2026, 8, 10));

        assert!(range.contains(day(2026, 8, 10)));
        assert!(!range.contains(day(2026, 8, 9)));
        assert!(!range.contains(day(2026, 8, 11)));
    }

    #[test_log::test]
    fn should_include_both_range_ends() {
        let range = DateRange::new(day(2026, 8, 10), Some(day(2026, 8, 12)));

        assert!(range.contains(day(2026, 8, 10)));
        assert!(range.contains(day(2026, 8, 12)));
        assert!(!range.contains(day(2026, 8, 13)));
    }
}
