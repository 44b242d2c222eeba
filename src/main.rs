use lineup::config::env_loader::load_config;
use lineup::directory::api::EventDirectoryAPI;
use lineup::filter::assembler::{AssembleOutcome, ResultAssembler};
use lineup::filter::clock::SystemClock;
use lineup::session::{FilterSession, InMemorySessionStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let _loki = lineup::tracing::setup_tracing().await;

    let config = load_config();
    let assembler = ResultAssembler::new(
        EventDirectoryAPI::new(&config.events_api_url),
        SystemClock::new(config.reference_offset),
        config.debug_config.event_limit,
    );

    let mut session = FilterSession::restore(InMemorySessionStore::default());
    session.set_date_filter_label("this week");

    match assembler.assemble(session.filters()).await {
        AssembleOutcome::Listing(listing) => {
            if listing.fetch_failed {
                warn!("Event directory unavailable, nothing to show");
                return;
            }

            listing
                .exact_matches
                .iter()
                .for_each(|event| info!("This week: {}", event.title));
            listing
                .similar_events
                .iter()
                .for_each(|event| info!("You might like: {}", event.title));
        }
        AssembleOutcome::Superseded => {}
    }
}
