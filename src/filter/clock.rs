use chrono::{FixedOffset, NaiveDate, Utc};

/// Source of "today" for all date-bucket math. The evaluator never reads
/// the system clock directly, so tests can pin any calendar day.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the host clock, shifted into the configured reference offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    reference_offset: FixedOffset,
}

impl SystemClock {
    pub fn new(reference_offset: FixedOffset) -> Self {
        Self { reference_offset }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now()
            .with_timezone(&self.reference_offset)
            .date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
