mod common;

use async_trait::async_trait;
use common::{cookie_header, create_test_app, create_test_app_with_search, logged_in_user};
use rango::infrastructure::search::{SearchError, SearchProvider, SearchResult};
use serde_json::json;
use std::sync::Arc;

struct FixedSearch;

#[async_trait]
impl SearchProvider for FixedSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Ok(vec![SearchResult {
            title: format!("All about {query}"),
            link: "http://example.com/result".to_string(),
            summary: "A helpful page".to_string(),
        }])
    }
}

struct BrokenSearch;

#[async_trait]
impl SearchProvider for BrokenSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Status(503))
    }
}

#[tokio::test]
async fn test_show_category_with_pages() {
    let app = create_test_app();
    let category = app.store.add_category("Python", 128, 64);
    app.store
        .add_page(category.id, "Official Python Tutorial", "http://docs.python.org/3/tutorial/", 2);

    let response = app.server.get("/category/python").await;

    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.contains("<h1>Python</h1>"));
    assert!(body.contains("Official Python Tutorial"));
    assert!(body.contains("(2 views)"));
    assert!(body.contains("64"));
}

#[tokio::test]
async fn test_show_category_without_pages() {
    let app = create_test_app();
    app.store.add_category("Erlang", 0, 0);

    let body = app.server.get("/category/erlang").await.text();

    assert!(body.contains("No pages currently in category."));
}

#[tokio::test]
async fn test_unknown_category_renders_message() {
    let app = create_test_app();

    let response = app.server.get("/category/does-not-exist").await;

    assert_eq!(response.status_code(), 200);
    response.assert_text_contains("The specified category does-not-exist does not exist!");
}

#[tokio::test]
async fn test_like_button_only_for_logged_in_users() {
    let app = create_test_app();
    app.store.add_category("Python", 0, 0);

    let anonymous = app.server.get("/category/python").await.text();
    assert!(!anonymous.contains("id=\"likes\""));

    let (_, key) = logged_in_user(&app, "leifos").await;
    let logged_in = app
        .server
        .get("/category/python")
        .add_header("cookie", cookie_header(&key))
        .await
        .text();
    assert!(logged_in.contains("id=\"likes\""));
}

#[tokio::test]
async fn test_search_shows_results() {
    let app = create_test_app_with_search(Arc::new(FixedSearch));
    app.store.add_category("Python", 0, 0);

    let response = app
        .server
        .post("/category/python")
        .form(&json!({ "query": "django" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.contains("All about django"));
    assert!(body.contains("http://example.com/result"));
    assert!(!body.contains("Web search is not configured."));
}

#[tokio::test]
async fn test_search_failure_renders_empty_results() {
    let app = create_test_app_with_search(Arc::new(BrokenSearch));
    app.store.add_category("Python", 0, 0);

    let response = app
        .server
        .post("/category/python")
        .form(&json!({ "query": "django" }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(!response.text().contains("class=\"results\""));
}

#[tokio::test]
async fn test_search_disabled_shows_hint() {
    let app = create_test_app();
    app.store.add_category("Python", 0, 0);

    let body = app.server.get("/category/python").await.text();

    assert!(body.contains("Web search is not configured."));
}

#[tokio::test]
async fn test_add_category_requires_login() {
    let app = create_test_app();

    let response = app.server.get("/add_category").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(
        response.header("location"),
        "/accounts/login/?next=%2Fadd_category"
    );
}

#[tokio::test]
async fn test_add_category_creates_and_redirects() {
    let app = create_test_app();
    let (_, key) = logged_in_user(&app, "leifos").await;

    let response = app
        .server
        .post("/add_category")
        .add_header("cookie", cookie_header(&key))
        .form(&json!({ "name": "  Random Category String  " }))
        .await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "/");

    let shown = app.server.get("/category/random-category-string").await;
    assert!(shown.text().contains("<h1>Random Category String</h1>"));
}

#[tokio::test]
async fn test_add_duplicate_category_shows_error() {
    let app = create_test_app();
    app.store.add_category("Python", 0, 0);
    let (_, key) = logged_in_user(&app, "leifos").await;

    let same_name = app
        .server
        .post("/add_category")
        .add_header("cookie", cookie_header(&key))
        .form(&json!({ "name": "Python" }))
        .await;
    assert_eq!(same_name.status_code(), 200);
    assert!(same_name
        .text()
        .contains("Category with this Name already exists."));

    let same_slug = app
        .server
        .post("/add_category")
        .add_header("cookie", cookie_header(&key))
        .form(&json!({ "name": "python" }))
        .await;
    assert_eq!(same_slug.status_code(), 200);
    assert!(same_slug
        .text()
        .contains("A category with a similar name already exists."));
}

#[tokio::test]
async fn test_add_blank_category_shows_form_again() {
    let app = create_test_app();
    let (_, key) = logged_in_user(&app, "leifos").await;

    let response = app
        .server
        .post("/add_category")
        .add_header("cookie", cookie_header(&key))
        .form(&json!({ "name": "   " }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("id=\"category_form\""));
}

#[tokio::test]
async fn test_accented_name_gets_folded_slug() {
    let app = create_test_app();
    let (_, key) = logged_in_user(&app, "leifos").await;

    for name in ["Café", "Caf"] {
        let response = app
            .server
            .post("/add_category")
            .add_header("cookie", cookie_header(&key))
            .form(&json!({ "name": name }))
            .await;
        assert_eq!(response.status_code(), 302, "{name}");
    }

    let cafe = app.server.get("/category/cafe").await;
    assert!(cafe.text().contains("<h1>Café</h1>"));
    let caf = app.server.get("/category/caf").await;
    assert!(caf.text().contains("<h1>Caf</h1>"));
}
