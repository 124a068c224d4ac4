use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use chrono::Utc;
use project_service::domain::project::service::ProjectService;
use project_service::domain::user::models::EmailAddress;
use project_service::domain::user::models::User;
use project_service::domain::user::models::UserId;
use project_service::domain::user::models::Username;
use project_service::domain::user::ports::UserRepository;
use project_service::domain::user::service::IdentityService;
use project_service::inbound::http::router::create_router;
use project_service::outbound::repositories::InMemoryProjectRepository;
use project_service::outbound::repositories::InMemoryUserRepository;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "Admin1234";

/// Test application that spawns a real server over in-memory stores.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task with one seeded admin.
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let user_repository = Arc::new(InMemoryUserRepository::new());
        user_repository
            .create(User {
                id: UserId::new(),
                username: Username::new("admin".to_string()).unwrap(),
                email: EmailAddress::new(ADMIN_EMAIL.to_string()).unwrap(),
                password_hash: authenticator
                    .hash_password(ADMIN_PASSWORD)
                    .expect("Failed to hash admin password"),
                admin: true,
                created_at: Utc::now(),
            })
            .await
            .expect("Failed to seed admin");

        let identity_service = Arc::new(IdentityService::new(
            user_repository,
            Arc::clone(&authenticator),
            24,
        ));
        let project_service = Arc::new(ProjectService::new(Arc::new(
            InMemoryProjectRepository::new(),
        )));

        let router = create_router(identity_service, project_service, authenticator, None);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(&format!("{}{}", self.address, path))
    }

    /// Run one operation, optionally with a Bearer credential, and return the body.
    pub async fn operation(&self, token: Option<&str>, operation: &str, arguments: Value) -> Value {
        let mut request = self.post("/api/operations").json(&serde_json::json!({
            "operation": operation,
            "arguments": arguments,
        }));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in as the seeded admin and return the issued credential.
    pub async fn admin_token(&self) -> String {
        let body = self
            .operation(
                None,
                "Login",
                serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            )
            .await;
        body["token"].as_str().expect("Login issued no token").to_string()
    }

    /// Sign a credential whose validity window ended an hour ago.
    pub fn expired_token(&self, email: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims::for_user(email, true, 1).with_window(now - 7200, now - 3600);
        self.jwt_handler.encode(&claims).expect("Failed to sign token")
    }
}
