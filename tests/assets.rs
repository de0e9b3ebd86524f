use actix_web::http::StatusCode;
use actix_web::{App, test};

use pushkind_store::routes::configure_assets;

#[actix_web::test]
async fn test_uploads_are_served_from_configured_directory() {
    let upload_dir = tempfile::tempdir().unwrap();
    std::fs::write(upload_dir.path().join("mug.png"), b"not really a png").unwrap();

    let app = test::init_service(
        App::new().configure(|cfg| configure_assets(cfg, upload_dir.path())),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/assets/uploads/mug.png")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = test::read_body(response).await;
    assert_eq!(&body[..], b"not really a png");

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/assets/uploads/missing.png")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
