//! Request/response plumbing shared by every domain operation.
//!
//! A [`Transport`] is bound to one API surface ([`Session::User`] or
//! [`Session::Admin`]). Every call sends the session cookies, and every
//! response is decoded once into either the expected success type or an
//! [`ApiError`], so callers never look at raw envelopes.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::{LoginRedirect, Session};
use crate::types::StatusResponse;
use reqwest::cookie::Jar;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Shape of a decoded response body.
#[derive(Debug, PartialEq)]
pub(crate) enum Envelope {
    Success(Value),
    Failure(Option<String>),
}

impl Envelope {
    /// Non-2xx statuses and bodies carrying an `error` field are failures.
    pub(crate) fn classify(status: u16, body: Value) -> Self {
        if let Some(error) = body.get("error") {
            return Envelope::Failure(error.as_str().map(str::to_owned));
        }
        if (200..300).contains(&status) {
            Envelope::Success(body)
        } else {
            Envelope::Failure(None)
        }
    }
}

/// Turn a raw status and body into the success type or an error.
pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::MalformedResponse {
            status,
            reason: e.to_string(),
        })?;

    match Envelope::classify(status, value) {
        Envelope::Success(value) => {
            serde_json::from_value(value).map_err(|e| ApiError::MalformedResponse {
                status,
                reason: e.to_string(),
            })
        }
        Envelope::Failure(message) => Err(ApiError::Server {
            status,
            message: message.filter(|m| !m.is_empty()),
        }),
    }
}

/// HTTP transport for one API surface.
#[derive(Clone)]
pub struct Transport {
    http: Client,
    root: String,
    session: Session,
    redirect: Arc<dyn LoginRedirect>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("root", &self.root)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Create a transport for `session`.
    ///
    /// `redirect` is told about every 401 this transport receives.
    pub fn new(
        config: &ClientConfig,
        session: Session,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self> {
        let config = config.validated()?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session_cookie {
            let url = reqwest::Url::parse(&config.base_url)
                .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
            jar.add_cookie_str(cookie, &url);
        }

        let mut builder = Client::builder()
            .cookie_provider(jar)
            .user_agent(format!("MusicShack/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build()?;

        let root = format!("{}{}", config.base_url, session.prefix(&config));

        Ok(Self {
            http,
            root,
            session,
            redirect,
        })
    }

    /// Transport for the regular user API.
    pub fn user(config: &ClientConfig, redirect: Arc<dyn LoginRedirect>) -> Result<Self> {
        Self::new(config, Session::User, redirect)
    }

    /// Transport for the admin API.
    pub fn admin(config: &ClientConfig, redirect: Arc<dyn LoginRedirect>) -> Result<Self> {
        Self::new(config, Session::Admin, redirect)
    }

    pub fn session(&self) -> Session {
        self.session
    }

    /// Absolute URL every path is appended to.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Send a JSON request without a body.
    pub async fn request<T: DeserializeOwned>(&self, path: &str, method: Method) -> Result<T> {
        let builder = self.json_builder(path, method.clone());
        self.execute(builder, &method, path).await
    }

    /// Send a JSON request with `body` serialized as JSON.
    pub async fn request_with_body<T, B>(&self, path: &str, method: Method, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.json_builder(path, method.clone()).json(body);
        self.execute(builder, &method, path).await
    }

    /// Send a multipart form as-is.
    pub async fn request_form<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        form: Form,
    ) -> Result<T> {
        let builder = self.http.request(method.clone(), self.url(path)).multipart(form);
        self.execute(builder, &method, path).await
    }

    /// Shorthand for a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, Method::GET).await
    }

    /// Send a body-less request to an endpoint that only acknowledges.
    pub async fn acknowledge(&self, path: &str, method: Method) -> Result<()> {
        self.request::<StatusResponse>(path, method).await.map(|_| ())
    }

    /// Like [`acknowledge`](Self::acknowledge), with a JSON body.
    pub async fn acknowledge_with_body<B>(&self, path: &str, method: Method, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.request_with_body::<StatusResponse, B>(path, method, body)
            .await
            .map(|_| ())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    fn json_builder(&self, path: &str, method: Method) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json")
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> Result<T> {
        debug!(method = %method, path = %path, session = ?self.session, "Sending request");

        let response = builder.send().await.map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "Request failed");
            ApiError::Request(e)
        })?;

        let status = response.status().as_u16();

        if status == 401 {
            let login_path = self.session.login_path();
            warn!(path = %path, login_path = %login_path, "Not authenticated");
            self.redirect.redirect(login_path);
            return Err(ApiError::Unauthenticated { login_path });
        }

        let body = response.bytes().await?;
        let decoded = decode(status, &body);

        match &decoded {
            Ok(_) => debug!(path = %path, status = status, "Request succeeded"),
            Err(e) => warn!(path = %path, status = status, error = %e, "Request rejected"),
        }

        decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_classify_success() {
        assert_eq!(
            Envelope::classify(200, json!([1, 2])),
            Envelope::Success(json!([1, 2]))
        );
    }

    #[test]
    fn test_classify_error_field_with_2xx() {
        assert_eq!(
            Envelope::classify(200, json!({"error": "invalid type"})),
            Envelope::Failure(Some("invalid type".into()))
        );
    }

    #[test]
    fn test_classify_non_2xx_without_error_field() {
        assert_eq!(
            Envelope::classify(500, json!({"status": "ok"})),
            Envelope::Failure(None)
        );
    }

    #[test]
    fn test_decode_success() {
        let items: Vec<Item> = decode(200, br#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
    }

    #[test]
    fn test_decode_non_json_is_malformed() {
        match decode::<Vec<Item>>(502, b"<html>Bad Gateway</html>") {
            Err(ApiError::MalformedResponse { status, .. }) => assert_eq!(status, 502),
            other => panic!("Expected MalformedResponse, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_body_is_malformed() {
        assert!(matches!(
            decode::<StatusResponse>(200, b""),
            Err(ApiError::MalformedResponse { status: 200, .. })
        ));
    }

    #[test]
    fn test_decode_wrong_shape_is_malformed() {
        assert!(matches!(
            decode::<Vec<Item>>(200, br#"{"tasks": []}"#),
            Err(ApiError::MalformedResponse { status: 200, .. })
        ));
    }

    #[test]
    fn test_decode_error_envelope_with_ok_status() {
        match decode::<Vec<Item>>(200, br#"{"error": "database locked"}"#) {
            Err(ApiError::Server { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message.as_deref(), Some("database locked"));
            }
            other => panic!("Expected Server error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_failure_without_message_uses_generic_text() {
        match decode::<Vec<Item>>(404, br#"{}"#) {
            Err(e @ ApiError::Server { message: None, .. }) => {
                assert_eq!(e.to_string(), "request failed with status 404");
            }
            other => panic!("Expected Server error, got: {:?}", other),
        }

        match decode::<Vec<Item>>(400, br#"{"error": ""}"#) {
            Err(e @ ApiError::Server { message: None, .. }) => {
                assert_eq!(e.to_string(), "request failed with status 400");
            }
            other => panic!("Expected Server error, got: {:?}", other),
        }
    }

    #[test]
    fn test_root_per_session() {
        let config = ClientConfig::new("https://example.com/");
        let user = Transport::user(&config, Arc::new(crate::session::NoRedirect)).unwrap();
        let admin = Transport::admin(&config, Arc::new(crate::session::NoRedirect)).unwrap();

        assert_eq!(user.root(), "https://example.com/api");
        assert_eq!(admin.root(), "https://example.com/api/admin");
        assert_eq!(admin.session(), Session::Admin);
    }
}
