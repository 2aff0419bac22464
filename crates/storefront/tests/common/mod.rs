//! Shared harness for in-process API tests.
//!
//! Builds the full router over the in-memory catalog and an in-memory
//! session store, then drives it with `tower::ServiceExt::oneshot`. The
//! [`Client`] carries the session cookie across requests the way a browser
//! would.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use supermarket_core::{CatalogStore, MemoryCatalog, ProductDraft};
use supermarket_storefront::config::StorefrontConfig;
use supermarket_storefront::middleware::{ROLE_HEADER, session_layer};
use supermarket_storefront::routes;
use supermarket_storefront::state::AppState;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: secrecy::SecretString::from("postgres://unused/test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
    }
}

/// Standard catalog fixture. Ids are assigned 1..=4 in order.
pub async fn seeded_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    for (name, quantity, price) in [
        ("Apples", 50, "2.50"),
        ("Bananas", 120, "0.60"),
        ("Baguette", 10, "1.80"),
        ("Milk", 40, "1.20"),
    ] {
        catalog
            .create(
                ProductDraft::new(
                    Some(name.to_owned()),
                    None,
                    Some(quantity),
                    Some(price.parse().unwrap()),
                )
                .unwrap(),
            )
            .await
            .unwrap();
    }
    catalog
}

fn build_app(catalog: MemoryCatalog) -> Router {
    let state = AppState::new(test_config(), catalog);
    routes::routes()
        .layer(session_layer(MemoryStore::default(), false))
        .with_state(state)
}

/// One simulated browser session against a fresh application.
pub struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    /// A client over the seeded fixture catalog.
    pub async fn seeded() -> Self {
        Self {
            app: build_app(seeded_catalog().await),
            cookie: None,
        }
    }

    /// A client over an empty catalog.
    pub fn empty() -> Self {
        Self {
            app: build_app(MemoryCatalog::new()),
            cookie: None,
        }
    }

    /// A second session against the same application.
    pub fn fork_session(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        let request = builder.body(body).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            let pair = raw.split(';').next().unwrap().to_owned();
            self.cookie = Some(pair);
        }

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse { status, bytes }
    }

    fn request(method: &str, path: &str, role: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(role) = role {
            builder = builder.header(ROLE_HEADER, role);
        }
        builder
    }

    pub async fn get(&mut self, path: &str, role: Option<&str>) -> TestResponse {
        self.send(Self::request("GET", path, role), Body::empty())
            .await
    }

    pub async fn post_form(
        &mut self,
        path: &str,
        role: Option<&str>,
        form: &str,
    ) -> TestResponse {
        let builder = Self::request("POST", path, role)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_owned())).await
    }

    pub async fn put_form(&mut self, path: &str, role: Option<&str>, form: &str) -> TestResponse {
        let builder = Self::request("PUT", path, role)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_owned())).await
    }

    pub async fn delete(&mut self, path: &str, role: Option<&str>) -> TestResponse {
        self.send(Self::request("DELETE", path, role), Body::empty())
            .await
    }
}

/// A buffered response: status plus body bytes.
pub struct TestResponse {
    pub status: StatusCode,
    bytes: axum::body::Bytes,
}

impl TestResponse {
    /// Deserialize the JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.bytes).unwrap_or_else(|err| {
            panic!(
                "bad JSON body ({err}): {}",
                String::from_utf8_lossy(&self.bytes)
            )
        })
    }

    /// The JSON body as a dynamic value.
    pub fn value(&self) -> serde_json::Value {
        self.json()
    }
}
