use crate::config::model::{Config, DebugConfig};
use chrono::FixedOffset;
use lazy_static::lazy_static;
use regex::Regex;
use std::env;

const DEFAULT_REFERENCE_OFFSET: &str = "+00:00";

lazy_static! {
    static ref UTC_OFFSET: Regex =
        Regex::new(r"^([+-])(\d{2}):(\d{2})$").expect("Failed to create offset regex");
}

pub fn load_config() -> Config {
    let events_api_url = load_required_config("EVENTS_API_URL");
    let venues_api_url = load_required_config("VENUES_API_URL");
    let reference_offset = load_offset_config("REFERENCE_UTC_OFFSET");

    let debug_event_limit = load_i32_config("DEBUG_EVENT_LIMIT");

    Config {
        debug_config: DebugConfig {
            event_limit: debug_event_limit,
        },
        events_api_url,
        venues_api_url,
        reference_offset,
    }
}

fn load_required_config(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{} must be set.", name))
}

fn load_offset_config(name: &str) -> FixedOffset {
    let value = env::var(name).unwrap_or_else(|_| DEFAULT_REFERENCE_OFFSET.to_string());

    parse_offset(&value).unwrap_or_else(|| {
        panic!(
            "Invalid config '{}'. Expected a UTC offset like '+01:00'",
            name
        )
    })
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let captures = UTC_OFFSET.captures(value)?;
    let hours: i32 = captures[2].parse().ok()?;
    let minutes: i32 = captures[3].parse().ok()?;
    let seconds = (hours * 60 + minutes) * 60;

    if &captures[1] == "-" {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}

fn load_i32_config(name: &str) -> Option<i32> {
    match env::var(name) {
        Ok(value) => Some(value.parse().unwrap_or_else(|_| {
            panic!("Invalid config '{}'. Expected an integer number.", name)
        })),
        Err(_) => None,
    }
}
