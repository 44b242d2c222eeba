use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub venue_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl Event {
    pub fn new(
        id: String,
        title: String,
        category: Option<String>,
        venue_id: Option<String>,
        start_date: Option<NaiveDate>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            title,
            category,
            venue_id,
            start_date,
            tags,
        }
    }

    /// Undated events are never considered upcoming.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.start_date.is_some_and(|date| date >= today)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub city: String,
}
