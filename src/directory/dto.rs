use super::model::Event;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_either::SingleOrVec;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

// Note: the directory is lax about field shapes, so most fields go through
// a tolerant deserializer instead of failing the whole payload.
#[derive(Debug, Deserialize)]
pub struct ResponseEvent {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default)]
    pub category: Option<SingleOrVec<String>>,
    #[serde(default, rename = "venueId")]
    pub venue_id: Option<String>,
    #[serde(default, rename = "startDate", deserialize_with = "deserialize_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

impl ResponseEvent {
    pub fn into_model(self) -> Event {
        let category = match self.category {
            Some(SingleOrVec::Single(category)) => Some(category),
            Some(SingleOrVec::Vec(categories)) => categories.into_iter().next(),
            None => None,
        };

        Event::new(
            self.id,
            self.title,
            category.filter(|category| !category.is_empty()),
            self.venue_id.filter(|venue_id| !venue_id.is_empty()),
            self.start_date,
            self.tags,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ResponseVenue {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub city: String,
}

#[derive(Debug, Deserialize)]
struct ResponseTag {
    #[serde(default, deserialize_with = "deserialize_str")]
    name: String,
}

/// Ids come back as strings or bare numbers depending on the table.
fn deserialize_id<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn deserialize_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) if !s.is_empty() => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|err| {
                warn!("Failed to parse start date '{s}' (treating as undated). Err: {err}");
            })
            .ok(),
        _ => None,
    })
}

/// Tags arrive either as a plain list of labels or as a slug-keyed map of
/// tag records.
fn deserialize_tags<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(label) => Some(label),
                _ => None,
            })
            .collect(),
        value @ Value::Object(_) => BTreeMap::<String, ResponseTag>::deserialize(value)
            .unwrap_or_default()
            .into_values()
            .map(|tag| tag.name)
            .filter(|name| !name.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_deserialize_event_with_tag_list() {
        let dto = serde_json::from_str::<Vec<ResponseEvent>>(
            r##"
              [{
                "id": "evt-surf-dawn",
                "title": "Dawn Patrol Surf",
                "category": "surf",
                "venueId": "venue-praia-norte",
                "startDate": "2026-08-08",
                "tags": ["surf", "beach", "morning"]
              }]"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let event = dto.unwrap().remove(0).into_model();

        assert_eq!(event.id, "evt-surf-dawn");
        assert_eq!(event.category.as_deref(), Some("surf"));
        assert_eq!(event.venue_id.as_deref(), Some("venue-praia-norte"));
        assert_eq!(
            event.start_date,
            Some(NaiveDate::from_ymd_opt(2026, 8, 8).unwrap())
        );
        assert_eq!(event.tags, vec!["surf", "beach", "morning"]);
    }

    #[test_log::test]
    fn should_deserialize_event_with_tag_map() {
        let dto = serde_json::from_str::<Vec<ResponseEvent>>(
            r##"
              [{
                "id": 4812,
                "title": "Rooftop Jazz",
                "category": ["music", "jazz"],
                "startDate": "2026-09-01",
                "tags": {
                  "jazz": { "id": 11, "slug": "jazz", "name": "jazz" },
                  "live-music": { "id": 12, "slug": "live-music", "name": "live music" }
                }
              }]"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let event = dto.unwrap().remove(0).into_model();

        assert_eq!(event.id, "4812");
        assert_eq!(event.category.as_deref(), Some("music"));
        assert_eq!(event.venue_id, None);
        assert!(event.tags.contains(&"jazz".to_string()));
        assert!(event.tags.contains(&"live music".to_string()));
    }

    #[test_log::test]
    fn when_start_date_is_missing_should_map_to_undated() {
        let dto = serde_json::from_str::<ResponseEvent>(
            r##"{ "id": "evt-undated", "title": "Open Mic" }"##,
        )
        .unwrap();

        assert_eq!(dto.into_model().start_date, None);
    }

    #[test_log::test]
    fn when_start_date_is_garbage_should_map_to_undated() {
        let dto = serde_json::from_str::<ResponseEvent>(
            r##"{ "id": "evt-bad-date", "title": "Open Mic", "startDate": "soonish" }"##,
        )
        .unwrap();

        assert_eq!(dto.into_model().start_date, None);
    }

    #[test_log::test]
    fn when_category_is_empty_should_map_to_none() {
        let dto = serde_json::from_str::<ResponseEvent>(
            r##"{ "id": "evt-blank", "title": "Mystery", "category": "", "venueId": "" }"##,
        )
        .unwrap();

        let event = dto.into_model();

        assert_eq!(event.category, None);
        assert_eq!(event.venue_id, None);
    }

    #[test_log::test]
    fn should_deserialize_venue() {
        let dto = serde_json::from_str::<ResponseVenue>(
            r##"{ "id": 328, "name": "Praia do Norte", "city": "Nazaré" }"##,
        )
        .unwrap();

        assert_eq!(dto.id, "328");
        assert_eq!(dto.name, "Praia do Norte");
        assert_eq!(dto.city, "Nazaré");
    }
}
