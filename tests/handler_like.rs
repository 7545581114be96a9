mod common;

use common::{cookie_header, create_test_app, logged_in_user};

#[tokio::test]
async fn test_like_increments_count() {
    let app = create_test_app();
    let category = app.store.add_category("Python", 0, 64);
    let (_, key) = logged_in_user(&app, "leifos").await;

    let response = app
        .server
        .get("/like_category")
        .add_query_param("category_id", category.id)
        .add_header("cookie", cookie_header(&key))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "65");
    assert_eq!(app.store.category(category.id).unwrap().likes, 65);
}

#[tokio::test]
async fn test_like_accepts_surrounding_whitespace() {
    let app = create_test_app();
    let category = app.store.add_category("Python", 0, 0);
    let (_, key) = logged_in_user(&app, "leifos").await;

    let response = app
        .server
        .get("/like_category")
        .add_query_param("category_id", format!(" {} ", category.id))
        .add_header("cookie", cookie_header(&key))
        .await;

    assert_eq!(response.text(), "1");
}

#[tokio::test]
async fn test_like_unknown_or_malformed_id_returns_sentinel() {
    let app = create_test_app();
    app.store.add_category("Python", 0, 0);
    let (_, key) = logged_in_user(&app, "leifos").await;

    for raw in ["99999", "abc", ""] {
        let response = app
            .server
            .get("/like_category")
            .add_query_param("category_id", raw)
            .add_header("cookie", cookie_header(&key))
            .await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.text(), "-1", "category_id={raw:?}");
    }

    let missing = app
        .server
        .get("/like_category")
        .add_header("cookie", cookie_header(&key))
        .await;
    assert_eq!(missing.text(), "-1");
}

#[tokio::test]
async fn test_like_requires_login() {
    let app = create_test_app();
    let category = app.store.add_category("Python", 0, 3);

    let response = app
        .server
        .get(&format!("/like_category?category_id={}", category.id))
        .await;

    assert_eq!(response.status_code(), 302);
    let location = response.header("location");
    assert_eq!(
        location,
        format!(
            "/accounts/login/?next=%2Flike_category%3Fcategory_id%3D{}",
            category.id
        )
        .as_str()
    );
    assert_eq!(app.store.category(category.id).unwrap().likes, 3);
}
