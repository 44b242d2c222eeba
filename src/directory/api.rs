use super::dto::{ResponseEvent, ResponseVenue};
use super::model::{Event, Venue};
use chrono::NaiveDate;
use futures::future;
use lazy_static::lazy_static;
use reqwest::Client;
use tracing::{error, info, warn};

lazy_static! {
    static ref REST_CLIENT: Client = Client::new();
}

/// Coarse server-side filters understood by the event directory. Anything
/// finer grained happens client side on top of what comes back.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub category: Option<String>,
    pub starting_from: Option<NaiveDate>,
    pub search: Option<String>,
    pub per_page: Option<i32>,
}

impl EventQuery {
    pub fn upcoming(today: NaiveDate) -> Self {
        Self {
            starting_from: Some(today),
            ..Self::default()
        }
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(category) = &self.category {
            params.push(("category", category.to_lowercase()));
        }
        if let Some(starting_from) = self.starting_from {
            params.push(("from", starting_from.format("%Y-%m-%d").to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }

        params
    }
}

pub struct EventDirectoryAPI {
    events_url: String,
}

impl EventDirectoryAPI {
    pub fn new(events_url: &str) -> Self {
        Self {
            events_url: events_url.to_string(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>, DirectoryError> {
        info!("Fetching events");

        let json_response = REST_CLIENT
            .get(&self.events_url)
            .query(&query.to_params())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        match serde_json::from_str::<Vec<ResponseEvent>>(&json_response) {
            Ok(parsed_response) => {
                info!("Got {} events", parsed_response.len());

                Ok(parsed_response
                    .into_iter()
                    .map(ResponseEvent::into_model)
                    .collect())
            }
            Err(e) => {
                error!("Response parse failed: {:?}", e);
                Err(DirectoryError::InvalidResponse)
            }
        }
    }
}

pub struct VenueDirectoryAPI {
    venues_url: String,
}

impl VenueDirectoryAPI {
    pub fn new(venues_url: &str) -> Self {
        Self {
            venues_url: venues_url.to_string(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_venue(&self, venue_id: &str) -> Result<Venue, DirectoryError> {
        let json_response = REST_CLIENT
            .get(format!("{}/{}", self.venues_url, venue_id))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        match serde_json::from_str::<ResponseVenue>(&json_response) {
            Ok(venue) => Ok(Venue {
                id: venue.id,
                name: venue.name,
                city: venue.city,
            }),
            Err(e) => {
                error!("Venue response parse failed: {:?}", e);
                Err(DirectoryError::InvalidResponse)
            }
        }
    }

    /// Looks venues up concurrently, dropping the ones that fail. Venue
    /// names are display labels only, so a missing one is not fatal.
    pub async fn fetch_venues(&self, venue_ids: &[String]) -> Vec<Venue> {
        future::join_all(venue_ids.iter().map(|venue_id| self.fetch_venue(venue_id)))
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(venue) => Some(venue),
                Err(e) => {
                    warn!("Skipping venue that failed to resolve: {:?}", e);
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug)]
pub enum DirectoryError {
    RequestFailed(reqwest::Error),
    InvalidResponse,
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        DirectoryError::RequestFailed(err)
    }
}
