use crate::filter::state::{DateBucket, DateRange, FilterState};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

pub const FILTER_STATE_KEY: &str = "lineup.filters";

/// Session-scoped key-value storage. Last write wins, no versioning; the
/// host application adapts whatever session mechanism it has.
pub trait SessionStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Option<String> {
        self.as_ref().read(key)
    }

    fn write(&self, key: &str, value: String) {
        self.as_ref().write(key, value)
    }

    fn remove(&self, key: &str) {
        self.as_ref().remove(key)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore for InMemorySessionStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Owns a FilterState and mirrors it into the session store after every
/// mutation, so navigating away and back restores the same selection.
pub struct FilterSession<S: SessionStore> {
    filters: FilterState,
    store: S,
}

impl<S: SessionStore> FilterSession<S> {
    /// Restores the stored snapshot when present and readable, otherwise
    /// starts empty. A corrupt snapshot is dropped, never fatal.
    pub fn restore(store: S) -> Self {
        let filters = match store.read(FILTER_STATE_KEY) {
            Some(snapshot) => serde_json::from_str(&snapshot).unwrap_or_else(|err| {
                warn!("Discarding unreadable filter snapshot. Err: {err}");
                store.remove(FILTER_STATE_KEY);
                FilterState::default()
            }),
            None => FilterState::default(),
        };

        Self { filters, store }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn toggle_type(&mut self, category: &str) {
        self.filters.toggle_type(category);
        self.mirror();
    }

    pub fn set_venues(&mut self, venue_ids: Vec<String>) {
        self.filters.set_venues(venue_ids);
        self.mirror();
    }

    pub fn set_date_filter(&mut self, bucket: Option<DateBucket>) {
        self.filters.set_date_filter(bucket);
        self.mirror();
    }

    pub fn set_date_filter_label(&mut self, label: &str) {
        self.filters.set_date_filter_label(label);
        self.mirror();
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filters.set_date_range(range);
        self.mirror();
    }

    pub fn reset(&mut self) {
        self.filters.reset();
        self.mirror();
    }

    fn mirror(&self) {
        match serde_json::to_string(&self.filters) {
            Ok(snapshot) => self.store.write(FILTER_STATE_KEY, snapshot),
            Err(err) => warn!("Failed to mirror filters into the session. Err: {err}"),
        }
    }
}
