//! Home page rankings.

use std::sync::Arc;

use crate::domain::entities::{Category, Page};
use crate::domain::repositories::{CategoryRepository, PageRepository};
use crate::error::AppError;

/// Number of entries in each ranking.
pub const TOP_N: i64 = 5;

/// Most liked categories and most viewed pages.
#[derive(Debug, Clone, Default)]
pub struct Rankings {
    pub categories: Vec<Category>,
    pub pages: Vec<Page>,
}

/// Read-only service producing the home page rankings.
pub struct RankingService {
    categories: Arc<dyn CategoryRepository>,
    pages: Arc<dyn PageRepository>,
}

impl RankingService {
    pub fn new(categories: Arc<dyn CategoryRepository>, pages: Arc<dyn PageRepository>) -> Self {
        Self { categories, pages }
    }

    /// Returns the top [`TOP_N`] categories by likes and pages by views.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn home_rankings(&self) -> Result<Rankings, AppError> {
        let categories = self.categories.top_by_likes(TOP_N).await?;
        let pages = self.pages.top_by_views(TOP_N).await?;

        Ok(Rankings { categories, pages })
    }
}
