//! Router-level tests driving the API without a network socket

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use geoconvert_api::{create_router, AppState};
use geoconvert_core::config::LayeredConfig;
use tower::ServiceExt;

const BOUNDARY: &str = "geoconvert-test-boundary";

const DECIMAL_CSV: &str = "Nome,Latitude,Longitude\n\
                           Maputo,-25.9692,32.5732\n\
                           Beira,-19.8436,34.8389\n\
                           Invalido,abc,34.0\n";

fn app() -> Router {
    create_router(Arc::new(AppState::new(LayeredConfig::with_defaults())))
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(uri: &str, file_name: &str, file: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n{file}\r\n--{BOUNDARY}--\r\n"
    ));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "geoconvert-api");
}

#[tokio::test]
async fn test_to_utm() {
    let response = app()
        .oneshot(json_request(
            "/api/v1/convert/to-utm",
            serde_json::json!({"latitude": -25.0143, "longitude": 32.5833}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["zone"], 36);
    assert_eq!(body["hemisphere"], "south");
    assert!((body["easting"].as_f64().unwrap() - 457955.55).abs() < 0.1);
    assert!((body["northing"].as_f64().unwrap() - 7233404.18).abs() < 0.1);
    assert_eq!(body["map"]["zoom"], 15);
    assert_eq!(body["map"]["markers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_to_utm_out_of_range_is_bad_request() {
    let response = app()
        .oneshot(json_request(
            "/api/v1/convert/to-utm",
            serde_json::json!({"latitude": 91.0, "longitude": 32.5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid coordinate");
    assert!(body["details"].as_str().unwrap().contains("latitude"));
}

#[tokio::test]
async fn test_to_decimal_with_default_hemisphere() {
    let response = app()
        .oneshot(json_request(
            "/api/v1/convert/to-decimal",
            serde_json::json!({"zone": 36, "easting": 457955.55, "northing": 7233404.18}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!((body["latitude"].as_f64().unwrap() + 25.0143).abs() < 1e-5);
    assert!((body["longitude"].as_f64().unwrap() - 32.5833).abs() < 1e-5);
}

#[tokio::test]
async fn test_to_decimal_invalid_zone() {
    let response = app()
        .oneshot(json_request(
            "/api/v1/convert/to-decimal",
            serde_json::json!({"zone": 61, "easting": 500000.0, "northing": 0.0, "hemisphere": "north"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_to_decimal_zone_beyond_byte_range_is_validation() {
    let response = app()
        .oneshot(json_request(
            "/api/v1/convert/to-decimal",
            serde_json::json!({"zone": 300, "easting": 500000.0, "northing": 0.0, "hemisphere": "north"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid coordinate");
    assert!(body["details"].as_str().unwrap().contains("zone"));
}

#[tokio::test]
async fn test_to_decimal_accepts_hemisphere_letter() {
    let response = app()
        .oneshot(json_request(
            "/api/v1/convert/to-decimal",
            serde_json::json!({"zone": 36, "easting": 457955.55, "northing": 7233404.18, "hemisphere": "s"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!((body["latitude"].as_f64().unwrap() + 25.0143).abs() < 1e-5);
}

#[tokio::test]
async fn test_mistyped_body_is_json_bad_request() {
    let response = app()
        .oneshot(json_request(
            "/api/v1/convert/to-utm",
            serde_json::json!({"latitude": "south of Maputo", "longitude": 32.5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_preview() {
    let response = app()
        .oneshot(multipart_request("/api/v1/batch/preview", "furos.csv", DECIMAL_CSV, &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["file_name"], "furos.csv");
    assert_eq!(body["total_rows"], 3);
    assert_eq!(body["headers"], serde_json::json!(["Nome", "Latitude", "Longitude"]));
    assert_eq!(body["rows"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_preview_unsupported_extension() {
    let response = app()
        .oneshot(multipart_request("/api/v1/batch/preview", "furos.pdf", DECIMAL_CSV, &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unsupported file format");
}

#[tokio::test]
async fn test_batch_json() {
    let response = app()
        .oneshot(multipart_request(
            "/api/v1/batch",
            "furos.csv",
            DECIMAL_CSV,
            &[("direction", "to-utm"), ("lat_col", "Latitude"), ("lon_col", "Longitude")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["direction"], "decimal_to_utm");
    assert_eq!(body["total_rows"], 3);
    assert_eq!(body["converted"], 2);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["failures"][0]["row"], 3);
    assert_eq!(body["failures"][0]["kind"], "parse");
    assert_eq!(
        body["table"]["headers"],
        serde_json::json!(["Nome", "Latitude", "Longitude", "Zone", "Hemisphere", "Easting", "Northing"])
    );
    assert_eq!(body["table"]["rows"][2][3], "Error");
    assert_eq!(body["map"]["markers"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_batch_kml_download() {
    let response = app()
        .oneshot(multipart_request(
            "/api/v1/batch",
            "furos.csv",
            DECIMAL_CSV,
            &[
                ("direction", "to-utm"),
                ("lat_col", "Latitude"),
                ("lon_col", "Longitude"),
                ("format", "kml"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.google-earth.kml+xml"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"result.kml\""
    );

    let kml = body_text(response).await;
    assert!(kml.starts_with("<?xml"));
    assert!(kml.contains("Point 2"));
    assert!(!kml.contains("Point 3"));
}

#[tokio::test]
async fn test_batch_csv_download() {
    let utm_csv = "Furo;Zona;E;N\nF1;36;457955.55;7233404.18\n";
    let mut config = LayeredConfig::with_defaults();
    config.input_delimiter.value = b';';
    let app = create_router(Arc::new(AppState::new(config)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/batch",
            "furos.csv",
            utm_csv,
            &[
                ("direction", "to-decimal"),
                ("zone_col", "Zona"),
                ("easting_col", "E"),
                ("northing_col", "N"),
                ("hemisphere", "south"),
                ("format", "csv"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"result_decimal.csv\""
    );

    let csv = body_text(response).await;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Furo;Zona;E;N;Latitude;Longitude");
    assert!(lines[1].starts_with("F1;36;457955.55;7233404.18;-25.014"));
}

#[tokio::test]
async fn test_batch_unknown_column() {
    let response = app()
        .oneshot(multipart_request(
            "/api/v1/batch",
            "furos.csv",
            DECIMAL_CSV,
            &[("direction", "to-utm"), ("lat_col", "Lat"), ("lon_col", "Longitude")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Column not found");
    assert!(body["details"].as_str().unwrap().contains("Nome, Latitude, Longitude"));
}

#[tokio::test]
async fn test_batch_without_file() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/batch")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"direction\"\r\n\r\nto-utm\r\n--{BOUNDARY}--\r\n"
        )))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
