use super::clock::Clock;
use super::predicate;
use super::state::FilterState;
use crate::directory::api::{EventDirectoryAPI, EventQuery};
use crate::directory::model::Event;
use chrono::NaiveDate;
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info};

/// How many suggestions the fallback list carries at most.
pub const SIMILAR_EVENTS_CAP: usize = 5;

/// What the caller renders: exact matches, or suggestions when filters are
/// active and nothing matched. `fetch_failed` means a directory call
/// failed; both lists are empty then and the caller decides whether to
/// re-trigger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventListing {
    pub exact_matches: Vec<Event>,
    pub similar_events: Vec<Event>,
    pub fetch_failed: bool,
}

impl EventListing {
    fn of(exact_matches: Vec<Event>) -> Self {
        Self {
            exact_matches,
            ..Self::default()
        }
    }

    fn failed() -> Self {
        Self {
            fetch_failed: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AssembleOutcome {
    Listing(EventListing),
    /// A newer filter revision was assembled while this one was in flight;
    /// the result must be discarded, not rendered.
    Superseded,
}

pub struct ResultAssembler<C: Clock> {
    directory: EventDirectoryAPI,
    clock: C,
    event_limit: Option<i32>,
    latest_revision: AtomicU64,
}

impl<C: Clock> ResultAssembler<C> {
    pub fn new(directory: EventDirectoryAPI, clock: C, event_limit: Option<i32>) -> Self {
        Self {
            directory,
            clock,
            event_limit,
            latest_revision: AtomicU64::new(0),
        }
    }

    /// Fetches the candidate pool, evaluates the predicate over it, and
    /// falls back to ranked suggestions when active filters match nothing.
    #[tracing::instrument(skip(self, filters), fields(revision = filters.revision()))]
    pub async fn assemble(&self, filters: &FilterState) -> AssembleOutcome {
        let revision = filters.revision();
        self.latest_revision.fetch_max(revision, Ordering::SeqCst);

        let today = self.clock.today();

        let pool = match self.directory.fetch_events(&self.coarse_query(filters, today)).await {
            Ok(events) => events,
            Err(e) => {
                error!("Candidate pool fetch failed: {:?}", e);
                return AssembleOutcome::Listing(EventListing::failed());
            }
        };

        if self.is_superseded(revision) {
            info!("Discarding candidate pool for superseded filters");
            return AssembleOutcome::Superseded;
        }

        let exact_matches = filter_events(&pool, filters, today);

        if !exact_matches.is_empty() || !filters.has_active_filters() {
            return AssembleOutcome::Listing(EventListing::of(exact_matches));
        }

        info!("No exact matches under active filters, assembling suggestions");

        let broader_pool = match self.directory.fetch_events(&self.upcoming_query(today)).await {
            Ok(events) => events,
            Err(e) => {
                error!("Fallback pool fetch failed: {:?}", e);
                return AssembleOutcome::Listing(EventListing::failed());
            }
        };

        if self.is_superseded(revision) {
            info!("Discarding fallback pool for superseded filters");
            return AssembleOutcome::Superseded;
        }

        let similar_events = rank_similar(broader_pool, &exact_matches, filters, today);

        AssembleOutcome::Listing(EventListing {
            exact_matches: Vec::new(),
            similar_events,
            fetch_failed: false,
        })
    }

    /// The directory only understands coarse filters; a single selected
    /// type maps to its category parameter, several types cannot.
    fn coarse_query(&self, filters: &FilterState, today: NaiveDate) -> EventQuery {
        let mut query = self.upcoming_query(today);

        if filters.selected_types().len() == 1 {
            query.category = filters.selected_types().iter().next().cloned();
        }

        query
    }

    fn upcoming_query(&self, today: NaiveDate) -> EventQuery {
        let mut query = EventQuery::upcoming(today);
        query.per_page = self.event_limit;
        query
    }

    fn is_superseded(&self, revision: u64) -> bool {
        self.latest_revision.load(Ordering::SeqCst) > revision
    }
}

/// The synchronous core: evaluates an already fetched collection. Rerun on
/// every filter change.
pub fn assemble_local(events: &[Event], filters: &FilterState, today: NaiveDate) -> EventListing {
    let exact_matches = filter_events(events, filters, today);

    if !exact_matches.is_empty() || !filters.has_active_filters() {
        return EventListing::of(exact_matches);
    }

    let similar_events = rank_similar(events.to_vec(), &exact_matches, filters, today);

    EventListing {
        exact_matches: Vec::new(),
        similar_events,
        fetch_failed: false,
    }
}

pub fn filter_events(events: &[Event], filters: &FilterState, today: NaiveDate) -> Vec<Event> {
    events
        .iter()
        .filter(|event| predicate::matches(event, filters, today))
        .cloned()
        .collect()
}

/// Ranks upcoming candidates by how many of their tags overlap the selected
/// types, descending; the sort is stable so ties keep arrival order. Events
/// already shown as exact matches are not suggested again.
fn rank_similar(
    pool: Vec<Event>,
    shown: &[Event],
    filters: &FilterState,
    today: NaiveDate,
) -> Vec<Event> {
    let shown_ids: HashSet<&str> = shown.iter().map(|event| event.id.as_str()).collect();
    let selected_types: HashSet<String> = filters
        .selected_types()
        .iter()
        .map(|category| category.to_lowercase())
        .collect();

    pool.into_iter()
        .filter(|event| event.is_upcoming(today))
        .filter(|event| !shown_ids.contains(event.id.as_str()))
        .unique_by(|event| event.id.clone())
        .map(|event| (tag_overlap(&event, &selected_types), event))
        .sorted_by_key(|(overlap, _)| Reverse(*overlap))
        .map(|(_, event)| event)
        .take(SIMILAR_EVENTS_CAP)
        .collect()
}

fn tag_overlap(event: &Event, selected_types: &HashSet<String>) -> usize {
    event
        .tags
        .iter()
        .map(|tag| tag.to_lowercase())
        .unique()
        .filter(|tag| selected_types.contains(tag))
        .count()
}
