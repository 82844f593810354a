//! Common test utilities for E2E tests

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::net::TcpListener;
use trendlab::generator::ContentGenerator;
use trendlab::{AppState, config};

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

pub fn test_config(db_path: PathBuf) -> config::AppConfig {
    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Let OS assign port
            domain: "localhost".to_string(),
            protocol: "http".to_string(),
        },
        database: config::DatabaseConfig { path: db_path },
        auth: config::AuthConfig {
            session_secret: "test-secret-key-32-bytes-long!!!".to_string(),
            session_max_age: 604800,
            // Minimum legal cost keeps hashing fast in tests
            bcrypt_cost: 10,
        },
        store: config::StoreConfig {
            notification_ttl_ms: 5000,
        },
        generator: config::GeneratorConfig {
            // Near-instant simulated generation
            latency_ms: 10,
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}

impl TestServer {
    /// Create a new test server instance with the default
    /// simulated generator.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let state = AppState::new(test_config(db_path)).await.unwrap();
        Self::start(state, temp_dir).await
    }

    /// Create a test server with an injected generator implementation.
    pub async fn with_generator(generator: Arc<dyn ContentGenerator>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let state = AppState::with_generator(test_config(db_path), generator)
            .await
            .unwrap();
        Self::start(state, temp_dir).await
    }

    async fn start(state: AppState, temp_dir: TempDir) -> Self {
        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        // Build router
        let app = trendlab::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait a bit for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Register a user and return the response.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/auth/register"))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .unwrap()
    }

    /// Log in and return the session token from the response body.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200, "login should succeed");

        let body: serde_json::Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    /// Register + login the standard test user, returning a token.
    pub async fn authenticated_token(&self) -> String {
        let response = self.register("Sarah", "sarah@example.com", "pw123").await;
        assert_eq!(response.status(), 201);
        self.login("sarah@example.com", "pw123").await
    }
}
