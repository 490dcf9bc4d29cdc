use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

/// Drives the router in-process, one request at a time.
pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        TestResponse { response }
    }
}

pub struct TestResponse {
    response: Response,
}

impl TestResponse {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub async fn json(self) -> Value {
        let bytes = hyper::body::to_bytes(self.response.into_body())
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
