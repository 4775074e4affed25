//! API client issuing JSON requests against a fixed base URL.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client, Method,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue},
};
use serde_json::Value;

use super::response::{ApiResponse, ResponseBody};

/// Build the underlying reqwest client.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("dfund-smoke/", env!("DFUND_SMOKE_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    Ok(client)
}

/// Shortens a bearer token for log output.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

/// JSON client bound to the API base URL (e.g. `http://localhost:3001/api/v1`).
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends `method path` with an optional JSON body and bearer token.
    ///
    /// Error statuses are returned like any other response. The body is
    /// parsed as JSON when possible, otherwise kept as text.
    #[tracing::instrument(skip(self, body, token))]
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        debug!("{} {}...", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Bearer token is not a valid header value")?;
            auth_value.set_sensitive(true);
            request = request.header(AUTHORIZATION, auth_value);
            debug!("Authenticated with token {}", mask_token(token));
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).context("Failed to serialize request body")?;
            request = request.body(payload);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed: could not reach the API", method, url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?;

        debug!("{} {} -> {}", method, url, status);

        Ok(ApiResponse::new(status, ResponseBody::from_text(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use reqwest::StatusCode;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> ApiClient {
        ApiClient::new(Client::new(), server.url())
    }

    #[tokio::test]
    async fn test_call_get_json() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/opportunities?take=1")
            .match_header("content-type", "application/json")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": [], "total": 0}"#)
            .create_async()
            .await;

        let response = client_for(&server)
            .call(Method::GET, "/opportunities?take=1", None, None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body,
            ResponseBody::Json(json!({"items": [], "total": 0}))
        );
    }

    #[tokio::test]
    async fn test_call_post_with_body_and_token() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/opportunities")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::Json(json!({"name": "Test Opportunity"})))
            .with_status(201)
            .with_body(r#"{"id": "opp-1"}"#)
            .create_async()
            .await;

        let response = client_for(&server)
            .call(
                Method::POST,
                "/opportunities",
                Some(&json!({"name": "Test Opportunity"})),
                Some("secret-token"),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body.id_at("/id"), Some("opp-1".to_string()));
    }

    #[tokio::test]
    async fn test_call_error_status_is_returned() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/auth/register")
            .with_status(409)
            .with_body(r#"{"statusCode": 409, "message": "Email already registered"}"#)
            .create_async()
            .await;

        let response = client_for(&server)
            .call(Method::POST, "/auth/register", Some(&json!({})), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(
            response.body.pointer("/message"),
            Some(&json!("Email already registered"))
        );
    }

    #[tokio::test]
    async fn test_call_plain_text_error_body() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/applications/app-1/submit")
            .with_status(502)
            .with_header("content-type", "text/plain")
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let response = client_for(&server)
            .call(Method::POST, "/applications/app-1/submit", None, Some("t"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::BAD_GATEWAY);
        assert_eq!(response.body, ResponseBody::Text("Bad Gateway".to_string()));
    }

    #[tokio::test]
    async fn test_call_empty_body() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("PUT", "/applications/app-1/review")
            .with_status(204)
            .create_async()
            .await;

        let response = client_for(&server)
            .call(Method::PUT, "/applications/app-1/review", None, None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert_eq!(response.body, ResponseBody::Empty);
    }

    #[tokio::test]
    async fn test_call_unreachable_host_is_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = ApiClient::new(Client::new(), "http://127.0.0.1:9/api/v1");
        let err = client
            .call(Method::GET, "/opportunities?take=1", None, None)
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("could not reach the API"));
    }

    #[tokio::test]
    async fn test_call_invalid_token_is_not_a_send_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/applications/user/u-1")
            .expect(0)
            .create_async()
            .await;

        let err = client_for(&server)
            .call(Method::GET, "/applications/user/u-1", None, Some("bad\ntoken"))
            .await
            .unwrap_err();

        mock.assert_async().await;
        let message = format!("{:#}", err);
        assert!(message.contains("Bearer token is not a valid header value"));
        assert!(!message.contains("could not reach the API"));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("abcdefghijklmnop"), "abcd*********mnop");
    }
}
