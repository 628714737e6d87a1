//! Search result records as returned by the Hacker News search API.
//!
//! An [`Item`] is one hit; a [`SearchResult`] is one page of hits. Decoding is
//! lenient: the API sends `null` for many fields (comments have no title, Ask
//! HN posts have no url), and those map to absent or empty values instead of
//! failing the whole page.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// One search hit.
///
/// Items are immutable once received. `object_id` identifies the item within
/// an accumulated result set, but uniqueness is not enforced across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
    /// Creation time in Unix seconds.
    #[serde(default)]
    pub created_at_i: Option<i64>,
}

/// One page of hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub hits: Vec<Item>,
    pub page: u32,
    /// Total number of pages the API reports for the query.
    #[serde(default, rename = "nbPages")]
    pub nb_pages: Option<u32>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    /// Creates an item with the given identifier and title and empty metadata.
    #[must_use]
    pub fn new(object_id: impl Into<String>, title: Option<&str>) -> Self {
        Self {
            object_id: object_id.into(),
            title: title.map(String::from),
            url: String::new(),
            author: String::new(),
            num_comments: 0,
            points: 0,
            created_at_i: None,
        }
    }

    /// Returns the link to open for this item.
    ///
    /// Falls back to the Hacker News discussion page when the hit carries no
    /// external url (Ask HN, comments).
    #[must_use]
    pub fn link(&self) -> String {
        if self.url.is_empty() {
            format!("https://news.ycombinator.com/item?id={}", self.object_id)
        } else {
            self.url.clone()
        }
    }

    /// Returns a human-readable string describing how long ago the item was posted.
    ///
    /// The format varies based on the time elapsed:
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - 1 day or more: "Xd ago"
    ///
    /// Items without a timestamp return an empty string.
    #[must_use]
    pub fn time_ago(&self) -> String {
        self.time_ago_at(chrono::Utc::now().timestamp())
    }

    fn time_ago_at(&self, now: i64) -> String {
        let Some(created) = self.created_at_i else {
            return String::new();
        };
        let diff = now - created;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}
