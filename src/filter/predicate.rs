use super::state::{DateBucket, FilterState};
use crate::directory::model::Event;
use chrono::{Datelike, Duration, NaiveDate};

/// Events further out than this never land in the `later` bucket's
/// complement; days 8-13 from today match no named bucket at all.
const LATER_HORIZON_DAYS: i64 = 14;

/// An event passes iff it passes every active dimension. There is no OR
/// semantics anywhere.
pub fn matches(event: &Event, filters: &FilterState, today: NaiveDate) -> bool {
    passes_type(event, filters)
        && passes_venue(event, filters)
        && passes_date(event, filters, today)
}

pub fn passes_type(event: &Event, filters: &FilterState) -> bool {
    if filters.selected_types().is_empty() {
        return true;
    }

    event
        .category
        .as_ref()
        .is_some_and(|category| filters.selected_types().contains(category))
}

pub fn passes_venue(event: &Event, filters: &FilterState) -> bool {
    if filters.selected_venues().is_empty() {
        return true;
    }

    event
        .venue_id
        .as_ref()
        .is_some_and(|venue_id| filters.selected_venues().contains(venue_id))
}

/// A named bucket wins over an explicit range. Undated events fail any
/// active date filter but pass when none is set.
pub fn passes_date(event: &Event, filters: &FilterState, today: NaiveDate) -> bool {
    if let Some(bucket) = filters.date_filter() {
        return event
            .start_date
            .is_some_and(|date| bucket_contains(bucket, date, today));
    }

    if let Some(range) = filters.date_range() {
        return event.start_date.is_some_and(|date| range.contains(date));
    }

    true
}

fn bucket_contains(bucket: DateBucket, date: NaiveDate, today: NaiveDate) -> bool {
    let monday = week_monday(today);

    match bucket {
        DateBucket::Today => date == today,
        DateBucket::Tomorrow => date == today + Duration::days(1),
        DateBucket::ThisWeek => date >= monday && date <= monday + Duration::days(6),
        // Friday through Sunday of the week containing today. On a Friday,
        // Saturday, or Sunday the span still contains today itself, never
        // the following weekend.
        DateBucket::ThisWeekend => {
            date >= monday + Duration::days(4) && date <= monday + Duration::days(6)
        }
        DateBucket::NextWeek => {
            date >= monday + Duration::days(7) && date <= monday + Duration::days(13)
        }
        DateBucket::Later => date >= today + Duration::days(LATER_HORIZON_DAYS),
    }
}

fn week_monday(today: NaiveDate) -> NaiveDate {
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}
