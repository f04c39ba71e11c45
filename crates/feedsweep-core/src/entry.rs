//! Feed entry model.

use super::*;

/// One unread item returned by the stream endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque identifier, stable within a fetch.
    pub id: String,
    /// Entry title. Absent for some sources.
    #[serde(default)]
    pub title: Option<String>,
    /// Popularity score attached by the service.
    #[serde(default)]
    pub engagement: i64,
    /// Crawl timestamp, milliseconds since the unix epoch (UTC).
    #[serde(default)]
    pub crawled: i64,
}

impl Entry {
    /// Crawl time as UTC.
    pub fn crawled_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.crawled)
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Crawl time in the local timezone, for display.
    pub fn crawled_local(&self) -> DateTime<Local> {
        self.crawled_utc().with_timezone(&Local)
    }

    /// Title with newlines stripped, for single-line display.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.replace('\n', ""),
            None => String::new(),
        }
    }
}

/// An entry paired with the justification for marking it as read.
#[derive(Clone, Debug)]
pub struct ActionItem {
    pub entry: Entry,
    pub reason: String,
}

impl ActionItem {
    /// Create a new action item.
    pub fn new(entry: Entry, reason: impl Into<String>) -> Self {
        Self {
            entry,
            reason: reason.into(),
        }
    }
}

/// Wire shape of the `streams/contents` response.
#[derive(Clone, Debug, Deserialize)]
pub struct StreamContents {
    /// Stream identifier echoed by the service.
    #[serde(default)]
    pub id: String,
    /// Unread items. Missing or null is treated as an empty stream.
    #[serde(default)]
    pub items: Option<Vec<Entry>>,
}
