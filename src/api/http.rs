//! Reqwest-backed directory client.
//!
//! Owns transport details only: URL construction, request timeout, HTTP
//! status mapping, and JSON decoding into [`UserRecord`]s.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::{ApiError, DirectoryApi};
use crate::models::UserRecord;

/// Directory client talking to `{base_url}/users`.
pub struct HttpDirectory {
    client: Client,
    base_url: Url,
}

impl HttpDirectory {
    /// Build a client for `base_url` with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when `base_url` is not an absolute
    /// http(s) URL, or [`ApiError::Transport`] when the reqwest client cannot
    /// be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("userdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_transport_error)?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// URL of the users collection.
    pub fn users_url(&self) -> String {
        format!("{}/users", self.base_url.as_str().trim_end_matches('/'))
    }

    /// URL of a single user.
    pub fn user_url(&self, id: i64) -> String {
        format!("{}/{id}", self.users_url())
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let url = self.users_url();
        debug!(%url, "fetching users");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), ApiError> {
        let url = self.users_url();
        debug!(%url, id = user.id, "creating user");
        let response = self
            .client
            .post(&url)
            .json(user)
            .send()
            .await
            .map_err(map_transport_error)?;
        ensure_success(response.status())
    }

    async fn update_user(&self, id: i64, user: &UserRecord) -> Result<(), ApiError> {
        let url = self.user_url(id);
        debug!(%url, "updating user");
        let response = self
            .client
            .put(&url)
            .json(user)
            .send()
            .await
            .map_err(map_transport_error)?;
        ensure_success(response.status())
    }

    async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let url = self.user_url(id);
        debug!(%url, "deleting user");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(map_transport_error)?;
        ensure_success(response.status())
    }
}

fn ensure_success(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Transport(format!("request timed out: {error}"));
    }
    ApiError::Transport(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn directory(base: &str) -> HttpDirectory {
        HttpDirectory::new(base, Duration::from_secs(5)).unwrap()
    }

    /// Serve one canned response on a local port.
    ///
    /// Returns the base URL and a handle resolving to the raw request
    /// (request line, headers and body) the server received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    /// True once the headers and the full `content-length` body have arrived.
    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= length
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn sample_user(id: i64) -> UserRecord {
        UserRecord {
            id,
            name: "Ervin Howell".into(),
            username: "Antonette".into(),
            email: "Shanna@melissa.tv".into(),
            company: crate::models::Company {
                name: "Deckow-Crist".into(),
            },
        }
    }

    const USERS_BODY: &str = r#"[{"id": 1, "name": "Leanne Graham", "username": "Bret",
        "email": "Sincere@april.biz", "phone": "1-770-736-8031",
        "company": {"name": "Romaguera-Crona", "bs": "harness real-time e-markets"}}]"#;

    #[tokio::test]
    async fn list_decodes_users_on_200() {
        let (base, server) = serve_once("200 OK", USERS_BODY).await;
        let users = directory(&base).list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].company.name, "Romaguera-Crona");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /users HTTP/1.1\r\n"), "request: {raw}");
    }

    #[tokio::test]
    async fn list_rejects_other_success_statuses() {
        for status in ["201 Created", "203 Non-Authoritative Information"] {
            let (base, server) = serve_once(status, USERS_BODY).await;
            let err = directory(&base).list_users().await.unwrap_err();
            let code: u16 = status[..3].parse().unwrap();
            assert_eq!(err, ApiError::Status(code));
            server.await.unwrap();
        }
    }

    #[tokio::test]
    async fn list_rejects_no_content() {
        let (base, server) = serve_once("204 No Content", "").await;
        let err = directory(&base).list_users().await.unwrap_err();
        assert_eq!(err, ApiError::Status(204));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn list_not_found_message() {
        let (base, server) = serve_once("404 Not Found", "{}").await;
        let err = directory(&base).list_users().await.unwrap_err();
        assert_eq!(err.to_string(), "request failed with status code 404");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn list_non_json_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let err = directory(&base).list_users().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got: {err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn create_posts_record_to_collection() {
        let (base, server) = serve_once("201 Created", r#"{"id": 11}"#).await;
        directory(&base).create_user(&sample_user(11)).await.unwrap();

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /users HTTP/1.1\r\n"), "request: {raw}");
        assert!(raw.to_lowercase().contains("content-type: application/json"));
        let body = request_body(&raw);
        assert_eq!(body["id"], 11);
        assert_eq!(body["company"]["name"], "Deckow-Crist");
    }

    #[tokio::test]
    async fn update_puts_record_to_item() {
        let (base, server) = serve_once("200 OK", r#"{"id": 2}"#).await;
        let mut user = sample_user(2);
        user.email = "a@b.co".into();
        directory(&base).update_user(2, &user).await.unwrap();

        let raw = server.await.unwrap();
        assert!(raw.starts_with("PUT /users/2 HTTP/1.1\r\n"), "request: {raw}");
        assert_eq!(request_body(&raw)["email"], "a@b.co");
    }

    #[tokio::test]
    async fn update_failure_maps_status() {
        let (base, server) = serve_once("500 Internal Server Error", "{}").await;
        let err = directory(&base)
            .update_user(2, &sample_user(2))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Status(500));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn delete_targets_item() {
        let (base, server) = serve_once("200 OK", "{}").await;
        directory(&base).delete_user(3).await.unwrap();

        let raw = server.await.unwrap();
        assert!(raw.starts_with("DELETE /users/3 HTTP/1.1\r\n"), "request: {raw}");
    }

    #[test]
    fn builds_collection_and_item_urls() {
        let dir = directory("https://jsonplaceholder.typicode.com");
        assert_eq!(dir.users_url(), "https://jsonplaceholder.typicode.com/users");
        assert_eq!(dir.user_url(7), "https://jsonplaceholder.typicode.com/users/7");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let dir = directory("http://localhost:3000/");
        assert_eq!(dir.users_url(), "http://localhost:3000/users");
    }

    #[test]
    fn base_path_is_preserved() {
        let dir = directory("http://localhost:3000/api/v1/");
        assert_eq!(dir.user_url(2), "http://localhost:3000/api/v1/users/2");
    }

    #[test]
    fn rejects_relative_url() {
        let err = HttpDirectory::new("not a url", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = HttpDirectory::new("ftp://example.com", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn ensure_success_maps_statuses() {
        assert_eq!(ensure_success(StatusCode::CREATED), Ok(()));
        assert_eq!(ensure_success(StatusCode::NO_CONTENT), Ok(()));
        assert_eq!(
            ensure_success(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ApiError::Status(500))
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is closed on typical hosts.
        let dir = HttpDirectory::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = dir.list_users().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got: {err:?}");
        assert!(!err.to_string().is_empty());
    }
}
