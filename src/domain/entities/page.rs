//! Page entity: an external link belonging to one category.

use chrono::{DateTime, Utc};

/// A titled external link, ranked by views.
///
/// `views` and `last_visit` are only ever changed by the counted redirect,
/// never by form submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub url: String,
    pub views: i32,
    pub last_visit: Option<DateTime<Utc>>,
}

impl Page {
    /// Creates a new Page instance.
    pub fn new(
        id: i64,
        category_id: i64,
        title: String,
        url: String,
        views: i32,
        last_visit: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            category_id,
            title,
            url,
            views,
            last_visit,
        }
    }

    /// Returns true if the page has been visited through the counted redirect.
    pub fn was_visited(&self) -> bool {
        self.last_visit.is_some()
    }
}

/// Input data for creating a new page. New pages start with zero views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub category_id: i64,
    pub title: String,
    pub url: String,
}
