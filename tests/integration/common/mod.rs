//! Common test utilities and fixtures for integration tests
//!
//! - `TestApp`: the real router wired to a wiremock Jobber
//! - access token minting
//! - GraphQL page and token grant fixtures
//! - request and response helpers

use std::collections::HashMap;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chrono::Utc;
use jobsheet_common::Config;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/api/oauth/token";
pub const GRAPHQL_PATH: &str = "/api/graphql";
pub const REDIRECT_URI: &str = "https://app.example.com/";

/// Test application backed by a mocked Jobber
pub struct TestApp {
    pub server: MockServer,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// Build the app with extra environment entries layered over the defaults
    pub async fn with_env(overrides: &[(&str, &str)]) -> Self {
        let server = MockServer::start().await;

        let mut env: HashMap<String, String> = HashMap::from([
            ("JOBBER_CLIENT_ID".to_string(), "test-client".to_string()),
            ("JOBBER_CLIENT_SECRET".to_string(), "test-secret".to_string()),
            ("JOBBER_REDIRECT_URI".to_string(), REDIRECT_URI.to_string()),
            (
                "JOBBER_TOKEN_URL".to_string(),
                format!("{}{}", server.uri(), TOKEN_PATH),
            ),
            (
                "JOBBER_GRAPHQL_URL".to_string(),
                format!("{}{}", server.uri(), GRAPHQL_PATH),
            ),
            ("HTTP_TIMEOUT_SECS".to_string(), "5".to_string()),
        ]);
        for (key, value) in overrides {
            env.insert(key.to_string(), value.to_string());
        }

        let config = Config::from_lookup(|key| env.get(key).cloned()).unwrap();
        let router = jobsheet_app::create_app(&config).unwrap();

        Self { server, router }
    }

    pub fn test_router(&self) -> Router {
        self.router.clone()
    }

    async fn requests_to(&self, target: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == target)
            .collect()
    }

    pub async fn token_requests(&self) -> Vec<wiremock::Request> {
        self.requests_to(TOKEN_PATH).await
    }

    pub async fn graphql_requests(&self) -> Vec<wiremock::Request> {
        self.requests_to(GRAPHQL_PATH).await
    }

    /// Answer grants of `grant_type` with `status` and `body`
    pub async fn mount_token_response(&self, grant_type: &str, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains(format!("grant_type={}", grant_type)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve one GraphQL page per entry, chained with cursors `cursor-1`, `cursor-2`, ...
    pub async fn mount_jobs_pages(&self, pages: &[&[&str]]) {
        for (index, ids) in pages.iter().enumerate() {
            let after = (index > 0).then(|| format!("cursor-{}", index));
            let next = (index + 1 < pages.len()).then(|| format!("cursor-{}", index + 1));

            Mock::given(method("POST"))
                .and(path(GRAPHQL_PATH))
                .and(body_partial_json(json!({ "variables": { "after": after } })))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(jobs_page(ids, next.as_deref())),
                )
                .mount(&self.server)
                .await;
        }
    }

    /// Answer every GraphQL request with `status` and `body`
    pub async fn mount_graphql_response(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

/// Access token whose `exp` claim is `secs` from now (negative for expired)
pub fn access_token_expiring_in(secs: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": "jobber-user-1", "exp": Utc::now().timestamp() + secs }),
        &EncodingKey::from_secret(b"jobber-signing-key"),
    )
    .unwrap()
}

pub fn job_node(id: &str) -> Value {
    json!({
        "id": id,
        "jobNumber": 17,
        "title": "Gutter cleaning",
        "jobStatus": "requires_invoicing",
        "jobType": "ONE_OFF",
        "total": 180.0,
        "invoicedTotal": 0.0,
        "uninvoicedTotal": 180.0,
        "completedAt": "2024-03-05T14:30:00-05:00",
        "createdAt": "2024-03-01T09:00:00Z",
        "startAt": null,
        "endAt": null,
        "updatedAt": "2024-03-05T19:30:00Z",
        "client": {
            "id": format!("client-{}", id),
            "name": "Acme Landscaping",
            "firstName": null,
            "lastName": null,
            "companyName": "Acme Landscaping",
            "title": null,
            "isCompany": true,
            "updatedAt": "2024-01-01T00:00:00Z",
            "billingAddress": {
                "street1": "9 Elm St",
                "street2": "",
                "city": "Springfield",
                "province": "IL",
                "postalCode": "62701",
                "country": "United States"
            }
        },
        "property": {
            "address": {
                "street1": "1 Main St",
                "street2": "Apt 4",
                "city": "Springfield",
                "province": "IL",
                "postalCode": "62704",
                "country": "United States"
            }
        }
    })
}

pub fn jobs_page(ids: &[&str], next_cursor: Option<&str>) -> Value {
    let nodes: Vec<Value> = ids.iter().map(|id| job_node(id)).collect();
    json!({
        "data": {
            "jobs": {
                "totalCount": nodes.len(),
                "pageInfo": {
                    "hasNextPage": next_cursor.is_some(),
                    "endCursor": next_cursor
                },
                "nodes": nodes
            }
        }
    })
}

pub fn token_grant(access_token: &str, refresh_token: Option<&str>) -> Value {
    let mut body = json!({ "access_token": access_token, "expires_in": 3600 });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
    }
    body
}

/// JSON request with an optional `Cookie` header
pub fn json_request(method: Method, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn session_cookie(access_token: &str, refresh_token: Option<&str>) -> String {
    match refresh_token {
        Some(refresh_token) => format!(
            "access_token={}; refresh_token={}",
            access_token, refresh_token
        ),
        None => format!("access_token={}", access_token),
    }
}

/// Parse response body as JSON Value
pub async fn parse_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// All `Set-Cookie` header values
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` value for `name`, if any
pub fn set_cookie_for(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    set_cookies(response)
        .into_iter()
        .find(|c| c.starts_with(&prefix))
}

/// Value part of a `Set-Cookie` header
pub fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value)
        .unwrap_or_default()
}
