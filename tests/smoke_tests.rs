use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use restapi::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

const BOUNDARY: &str = "restapi-test-boundary";

async fn spawn_app() -> Router {
    let id = uuid::Uuid::new_v4();
    let tmp = std::env::temp_dir();

    let mut config = Config::default();
    config.general.database_path = format!(
        "sqlite:{}",
        tmp.join(format!("restapi-smoke-{id}.db")).display()
    );
    config.file.upload_dir = tmp
        .join(format!("restapi-smoke-uploads-{id}"))
        .display()
        .to_string();
    config.security.jwt_secret = restapi::config::generate_secret();

    let state = restapi::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    restapi::api::router(state)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

async fn access_token(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/signin")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "username": "leandro", "password": "admin234" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["accessToken"]
        .as_str()
        .unwrap()
        .to_string()
}

fn authorized(token: &str) -> axum::http::request::Builder {
    Request::builder().header(header::AUTHORIZATION, format!("Bearer {token}"))
}

fn multipart_body(field: &str, files: &[(&str, &str)]) -> Body {
    let mut body = String::new();
    for (name, content) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\nContent-Type: text/plain\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Body::from(body)
}

#[tokio::test]
async fn test_xml_and_yaml_negotiation() {
    let app = spawn_app().await;
    let token = access_token(&app).await;

    let xml = "<PersonVO><firstName>Linus</firstName><lastName>Torvalds</lastName>\
               <address>Helsinki, Finland</address><gender>M</gender></PersonVO>";

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .method("POST")
                .uri("/api/person/v1")
                .header(header::CONTENT_TYPE, "application/xml")
                .header(header::ACCEPT, "application/xml")
                .body(Body::from(xml))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
    let body = body_text(response).await;
    assert!(body.starts_with("<PersonVO>"), "{body}");
    assert!(body.contains("<firstName>Linus</firstName>"), "{body}");

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .uri("/api/person/v1/findPersonByName/linus")
                .header(header::ACCEPT, "application/x-yaml")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/x-yaml"
    );
    let body = body_text(response).await;
    assert!(body.contains("firstName: Linus"), "{body}");
    assert!(body.contains("totalElements: 1"), "{body}");

    let yaml = "firstName: Grace\nlastName: Hopper\naddress: Arlington, Virginia\ngender: F\n";
    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .method("POST")
                .uri("/api/person/v1")
                .header(header::CONTENT_TYPE, "application/x-yaml")
                .body(Body::from(yaml))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["lastName"], "Hopper");
}

#[tokio::test]
async fn test_unsupported_media_types() {
    let app = spawn_app().await;
    let token = access_token(&app).await;

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .uri("/api/book/v1")
                .header(header::ACCEPT, "text/html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .method("POST")
                .uri("/api/book/v1")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("a book"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_file_upload_and_download() {
    let app = spawn_app().await;
    let token = access_token(&app).await;

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .method("POST")
                .uri("/api/file/v1/uploadFile")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(multipart_body("file", &[("notes.txt", "hello world")]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded = body_json(response).await;
    assert_eq!(uploaded["fileName"], "notes.txt");
    assert_eq!(uploaded["fileType"], "text/plain");
    assert_eq!(uploaded["size"], 11);
    assert_eq!(
        uploaded["fileDownloadUri"],
        "/api/file/v1/downloadFile/notes.txt"
    );

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .uri("/api/file/v1/downloadFile/notes.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"notes.txt\""
    );
    assert_eq!(body_text(response).await, "hello world");

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .uri("/api/file/v1/downloadFile/missing.pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_multiple_file_upload() {
    let app = spawn_app().await;
    let token = access_token(&app).await;

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .method("POST")
                .uri("/api/file/v1/uploadMultipleFiles")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(multipart_body(
                    "files",
                    &[("a.txt", "first"), ("a.txt", "second")],
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded = body_json(response).await;
    let uploaded = uploaded.as_array().unwrap();
    assert_eq!(uploaded.len(), 2);
    assert_eq!(uploaded[0]["fileName"], "a.txt");
    assert_ne!(uploaded[1]["fileName"], "a.txt");
}

#[tokio::test]
async fn test_math_endpoints() {
    let app = spawn_app().await;
    let token = access_token(&app).await;

    let cases = [
        ("/sum/5/3", 8.0),
        ("/subtraction/5/3", 2.0),
        ("/multiplication/2,5/4", 10.0),
        ("/division/9/3", 3.0),
        ("/average/4/8", 6.0),
        ("/sqrt/81", 9.0),
    ];

    for (uri, expected) in cases {
        let response = app
            .clone()
            .oneshot(authorized(&token).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let value: f64 = body_text(response).await.parse().unwrap();
        assert!((value - expected).abs() < f64::EPSILON, "{uri}: {value}");
    }

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .uri("/sum/five/3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Please set a numeric value"
    );

    let response = app
        .clone()
        .oneshot(
            authorized(&token)
                .uri("/division/1/0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
