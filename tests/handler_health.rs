mod common;

use common::create_test_app;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_all_checks() {
    let app = create_test_app();
    app.store.add_category("Python", 0, 0);

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["database"]["message"], "Connected, 1 categories");
    assert_eq!(body["checks"]["sessions"]["status"], "ok");
    assert_eq!(body["checks"]["search"]["message"], "Web search disabled");
}
