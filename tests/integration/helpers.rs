//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use chrono::{Duration, Utc};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use dochub_api::AppState;
use dochub_api::router::build_router;
use dochub_core::config::{AppConfig, DatabaseConfig};
use dochub_database::DatabasePool;
use dochub_entity::document::{CreateDocument, Document};
use dochub_entity::folder::FolderInput;
use dochub_service::RequestContext;
use dochub_service::user::NewUser;

const BOUNDARY: &str = "dochub-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Wired application state for direct service and store access
    pub state: AppState,
    /// Token of the `empty` superuser
    pub token: String,
    /// Holds the data root alive for the test
    pub data_dir: TempDir,
}

impl TestApp {
    /// An app over a fresh in-memory database with the groups `my_group`
    /// (id 1) and `other_group` (id 2), and the superuser `empty`.
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");

        let mut config = AppConfig::default();
        config.database = DatabaseConfig::in_memory();
        config.storage.data_root = data_dir.path().to_string_lossy().into_owned();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        dochub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = AppState::build(config, db.into_pool())
            .await
            .expect("Failed to build state");

        state.user_service.create_group("my_group").await.unwrap();
        state.user_service.create_group("other_group").await.unwrap();
        let user = state
            .user_service
            .create_user(NewUser {
                username: "empty".into(),
                password: "empty".into(),
                first_name: String::new(),
                last_name: String::new(),
                is_superuser: true,
            })
            .await
            .unwrap();
        let token = state.auth_service.issue_token(&user).unwrap().access_token;

        Self {
            router: build_router(state.clone()),
            state,
            token,
            data_dir,
        }
    }

    /// [`TestApp::new`] plus the folders `truc1` (viewers 1 and 2,
    /// modifier 2), `truc2` (viewer 2, modifier 2) and `truc2>truc3`.
    pub async fn with_tree() -> Self {
        let app = Self::new().await;
        app.folder("truc1", "blabla", None, &[1, 2], &[2]).await;
        app.folder("truc2", "bouuuuu!", None, &[2], &[2]).await;
        app.folder("truc3", "----", Some(2), &[], &[]).await;
        app
    }

    /// Context of the `empty` superuser.
    pub async fn admin(&self) -> RequestContext {
        self.state.auth_service.authenticate(&self.token).await.unwrap()
    }

    /// Create a folder directly through the service.
    pub async fn folder(
        &self,
        name: &str,
        description: &str,
        parent_id: Option<i64>,
        viewer: &[i64],
        modifier: &[i64],
    ) -> i64 {
        let input = FolderInput {
            name: name.into(),
            description: description.into(),
            parent_id,
            viewer: viewer.to_vec(),
            modifier: modifier.to_vec(),
        };
        self.state
            .folder_service
            .save(&self.admin().await, None, input)
            .await
            .unwrap()
            .folder
            .id
    }

    /// A document created an hour ago in `folder_id`, with stored content.
    pub async fn document(&self, folder_id: i64, name: &str, content: &'static [u8]) -> Document {
        let admin = self.admin().await;
        let repo =
            dochub_database::repositories::DocumentRepository::new(self.state.db.pool().clone());
        let document = repo
            .create(&CreateDocument {
                name: name.into(),
                description: "new doc".into(),
                folder_id: Some(folder_id),
                creator_id: Some(admin.user_id),
                created_at: Utc::now() - Duration::hours(1),
            })
            .await
            .unwrap();
        self.state
            .store
            .save(document.id, bytes::Bytes::from_static(content))
            .await
            .unwrap();
        document
    }

    /// Path of a document slot on disk.
    pub fn slot_path(&self, document_id: i64) -> std::path::PathBuf {
        self.data_dir
            .path()
            .join("usr")
            .join(dochub_storage::slots::document_slot(document_id))
    }

    /// Create a regular user in `groups` and return their token.
    pub async fn user_token(&self, username: &str, groups: &[&str]) -> String {
        let user = self
            .state
            .user_service
            .create_user(NewUser {
                username: username.into(),
                password: "secret".into(),
                first_name: String::new(),
                last_name: String::new(),
                is_superuser: false,
            })
            .await
            .unwrap();
        for group in groups {
            self.state.user_service.join_group(username, group).await.unwrap();
        }
        self.state.auth_service.issue_token(&user).unwrap().access_token
    }

    /// Call a screen endpoint as `empty` with url-encoded parameters.
    pub async fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> TestResponse {
        self.call_as(&self.token, endpoint, params).await
    }

    /// Call a screen endpoint with url-encoded parameters.
    pub async fn call_as(&self, token: &str, endpoint: &str, params: &[(&str, &str)]) -> TestResponse {
        let body = params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/documents/{endpoint}"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Call a screen endpoint as `empty` with a multipart body carrying
    /// `params` and one file part.
    pub async fn call_multipart(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        file: (&str, &str, &[u8]),
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in params {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        let (name, file_name, content) = file;
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/documents/{endpoint}"))
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}

impl TestResponse {
    /// The named component of a screen.
    pub fn component(&self, name: &str) -> &Value {
        self.body["components"]
            .as_array()
            .and_then(|list| list.iter().find(|c| c["name"] == name))
            .unwrap_or_else(|| panic!("No component '{name}' in {}", self.body))
    }

    /// Number of components of a screen.
    pub fn component_count(&self) -> usize {
        self.body["components"].as_array().map_or(0, Vec::len)
    }

    /// `(x, y, colspan, rowspan)` of a component.
    pub fn coords(&self, name: &str) -> (u64, u64, u64, u64) {
        let c = self.component(name);
        let n = |key: &str| c[key].as_u64().unwrap_or_default();
        (n("x"), n("y"), n("colspan"), n("rowspan"))
    }

    /// Number of records in a grid component.
    pub fn record_count(&self, grid: &str) -> usize {
        self.component(grid)["records"].as_array().map_or(0, Vec::len)
    }

    /// `(id, caption)` cases of a select or checklist.
    pub fn cases(&self, name: &str) -> Vec<(String, String)> {
        self.component(name)["cases"]
            .as_array()
            .map(|cases| {
                cases
                    .iter()
                    .map(|c| {
                        (
                            c["id"].as_str().unwrap_or_default().to_string(),
                            c["caption"].as_str().unwrap_or_default().to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Assert the response observer and answering action.
    pub fn assert_observer(&self, observer: &str, action: &str) {
        assert_eq!(self.status, StatusCode::OK, "Unexpected status: {}", self.body);
        assert_eq!(self.body["observer"], observer, "{}", self.body);
        assert_eq!(self.body["extension"], "documents");
        assert_eq!(self.body["action"], action);
    }
}

fn encode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
