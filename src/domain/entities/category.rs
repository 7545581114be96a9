//! Category entity: a named grouping of pages, ranked by likes.

use crate::utils::slug::slugify;

/// A persisted category.
///
/// `slug` is always `slugify(name)`; it is derived when the record is created
/// or renamed and is never set independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub views: i32,
    pub likes: i32,
}

impl Category {
    /// Creates a new Category instance.
    pub fn new(id: i64, name: String, slug: String, views: i32, likes: i32) -> Self {
        Self {
            id,
            name,
            slug,
            views,
            likes,
        }
    }
}

/// Input data for creating a new category.
///
/// Fields are private so the slug can only come from the name and the
/// counters can never start out negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    name: String,
    slug: String,
    views: i32,
    likes: i32,
}

impl NewCategory {
    /// Creates a category with zeroed counters.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        let slug = slugify(&name);
        Self {
            name,
            slug,
            views: 0,
            likes: 0,
        }
    }

    /// Sets initial counters, clamping negative values to zero.
    pub fn with_counters(mut self, views: i32, likes: i32) -> Self {
        self.views = views.max(0);
        self.likes = likes.max(0);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn views(&self) -> i32 {
        self.views
    }

    pub fn likes(&self) -> i32 {
        self.likes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let category = Category::new(1, "Python".to_string(), "python".to_string(), 128, 64);

        assert_eq!(category.id, 1);
        assert_eq!(category.name, "Python");
        assert_eq!(category.slug, "python");
        assert_eq!(category.views, 128);
        assert_eq!(category.likes, 64);
    }

    #[test]
    fn test_new_category_derives_slug() {
        let new_category = NewCategory::new("Random Category String");

        assert_eq!(new_category.name(), "Random Category String");
        assert_eq!(new_category.slug(), "random-category-string");
        assert_eq!(new_category.views(), 0);
        assert_eq!(new_category.likes(), 0);
    }

    #[test]
    fn test_new_category_trims_name() {
        let new_category = NewCategory::new("  Erlang  ");
        assert_eq!(new_category.name(), "Erlang");
        assert_eq!(new_category.slug(), "erlang");
    }

    #[test]
    fn test_negative_counters_are_clamped() {
        let new_category = NewCategory::new("test").with_counters(-1, -5);

        assert_eq!(new_category.views(), 0);
        assert_eq!(new_category.likes(), 0);
    }

    #[test]
    fn test_positive_counters_are_kept() {
        let new_category = NewCategory::new("Django").with_counters(64, 32);

        assert_eq!(new_category.views(), 64);
        assert_eq!(new_category.likes(), 32);
    }
}
