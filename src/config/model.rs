use chrono::FixedOffset;

#[derive(Debug)]
pub struct Config {
    pub debug_config: DebugConfig,
    pub events_api_url: String,
    pub venues_api_url: String,
    /// Reference timezone for all date-bucket math, as a UTC offset.
    pub reference_offset: FixedOffset,
}

#[derive(Debug)]
pub struct DebugConfig {
    pub event_limit: Option<i32>,
}
