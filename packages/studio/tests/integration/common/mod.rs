use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, redirect};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use studio::config::{
    AppConfig, AuthConfig, DatabaseConfig, MailConfig, ServerConfig, SiteConfig,
};
use studio::database::init_db;
use studio::mail::{MailError, Mailer, Notification};
use studio::seed::seed_admin;
use studio::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct-horse";

pub mod routes {
    pub const HOME: &str = "/";
    pub const ABOUT: &str = "/about";
    pub const CONTACT: &str = "/contact";
    pub const LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";
    pub const ADMIN: &str = "/admin";
    pub const SERVICE_WORKER: &str = "/sw.js";

    pub fn project(id: i32) -> String {
        format!("/project/{id}")
    }

    pub fn delete_project(id: i32) -> String {
        format!("/project/delete/{id}")
    }

    pub fn delete_social(id: i32) -> String {
        format!("/social/delete/{id}")
    }
}

/// Keeps every notification instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, notification: Notification) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _notification: Notification) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub static_dir: PathBuf,
    pub outbox: Arc<RecordingMailer>,
    _tmp: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub text: String,
    /// `Location` header of a redirect.
    pub location: Option<String>,
    pub content_type: Option<String>,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let header = |name: &str| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        let location = header("location");
        let content_type = header("content-type");
        let text = res.text().await.unwrap_or_default();
        Self {
            status,
            text,
            location,
            content_type,
        }
    }

    pub fn assert_redirect(&self, to: &str) {
        assert_eq!(self.status, 303, "expected redirect, got: {}", self.text);
        assert_eq!(self.location.as_deref(), Some(to));
    }
}

pub fn test_config(tmp: &TempDir) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_bytes: 1024 * 1024,
        },
        database: DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", tmp.path().join("test.db").display()),
        },
        auth: AuthConfig {
            secret_key: "test-secret-for-integration-tests".to_string(),
            session_ttl_hours: 1,
            secure_cookies: false,
            admin_username: Some(ADMIN_USERNAME.to_string()),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
        },
        mail: MailConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            tls: false,
            username: Some("owner@example.com".to_string()),
            password: Some("app-password".to_string()),
            recipient: None,
            timeout_secs: 2,
        },
        site: SiteConfig {
            owner_name: "Atom De Legend".to_string(),
            static_dir: tmp.path().join("static"),
            app_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let outbox = Arc::new(RecordingMailer::default());
        Self::start(outbox.clone(), outbox).await
    }

    pub async fn spawn_with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self::start(mailer, Arc::new(RecordingMailer::default())).await
    }

    async fn start(mailer: Arc<dyn Mailer>, outbox: Arc<RecordingMailer>) -> Self {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&tmp);

        let db = init_db(&config.database.url)
            .await
            .expect("Failed to initialize test database");
        seed_admin(&db, &config.auth)
            .await
            .expect("Failed to seed admin");

        let static_dir = config.site.static_dir.clone();
        let state = AppState::new(db.clone(), config, mailer)
            .await
            .expect("Failed to build state");
        let app = studio::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: client(true),
            db,
            static_dir,
            outbox,
            _tmp: tmp,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    /// GET with an explicit `Cookie` header and no cookie store.
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> TestResponse {
        let res = client(false)
            .get(self.url(path))
            .header("Cookie", cookie)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send form POST");

        TestResponse::from_response(res).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &[u8])],
    ) -> TestResponse {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name.to_string(), value.to_string());
        }
        for (name, file_name, bytes) in files {
            let part = reqwest::multipart::Part::bytes(bytes.to_vec())
                .file_name(file_name.to_string())
                .mime_str("application/octet-stream")
                .expect("Failed to set MIME type");
            form = form.part(name.to_string(), part);
        }

        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart POST");

        TestResponse::from_response(res).await
    }

    /// Log in as the seeded admin; the session cookie stays in the client.
    pub async fn login(&self) {
        let res = self
            .post_form(
                routes::LOGIN,
                &[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)],
            )
            .await;
        res.assert_redirect(routes::ADMIN);
    }

    /// Submit a project through the dashboard and return its id.
    pub async fn create_project(&self, title: &str) -> i32 {
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
        use studio::entity::project;

        let res = self
            .post_multipart(
                routes::ADMIN,
                &[
                    ("title", title),
                    ("tag", "Systems"),
                    ("desc", "Built for the archive."),
                    ("span", "col-span-2"),
                ],
                &[],
            )
            .await;
        res.assert_redirect(routes::ADMIN);

        project::Entity::find()
            .filter(project::Column::Title.eq(title))
            .one(&self.db)
            .await
            .unwrap()
            .expect("project should have been stored")
            .id
    }
}

fn client(cookie_store: bool) -> Client {
    Client::builder()
        .cookie_store(cookie_store)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to build HTTP client")
}
