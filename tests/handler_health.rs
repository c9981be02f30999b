mod common;

use axum_test::TestServer;
use shorturl::routes::app_router;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _repository) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server.get("/healthcheck").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_health_endpoint_does_not_touch_store() {
    let (state, repository) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    server.get("/healthcheck").await.assert_status_ok();

    assert!(repository.is_empty());
}
