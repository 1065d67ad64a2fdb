// tests/common/mod.rs

#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use edutrack::{
    config::{BODY_LIMIT_BYTES, Config},
    routes,
    state::AppState,
    utils::geo::Geofence,
};

pub const FACE_DATA: &str = "data:image/jpeg;base64,aGVsbG8=";

pub struct TestApp {
    pub address: String,
    pub root: PathBuf,
    pub state: AppState,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port with its own temporary data directory.
/// The QR token does not rotate during a test.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Same as [`spawn_app`], with a hook to adjust the config first.
pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let root = std::env::temp_dir().join(format!("edutrack-test-{}", uuid::Uuid::new_v4()));

    let mut config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        data_dir: root.join("data"),
        uploads_dir: root.join("uploads"),
        public_dir: root.join("public"),
        qr_rotation: Duration::from_secs(45),
        geofence: Geofence::default(),
        body_limit: BODY_LIMIT_BYTES,
    };
    configure(&mut config);

    let state = AppState::new(config)
        .await
        .expect("Failed to create app state");

    let app = routes::create_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address,
        root,
        state,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.root.join("data").join(name)
    }

    pub fn uploaded_files(&self) -> usize {
        std::fs::read_dir(self.root.join("uploads"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn get_json(&self, path: &str) -> serde_json::Value {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Response was not JSON")
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn current_token(&self) -> String {
        let body = self.get_json("/get-latest-qr").await;
        body["token"].as_str().expect("token missing").to_string()
    }
}
