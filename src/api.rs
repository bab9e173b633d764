//! Authenticated request client. Every screen talks to the backend through an
//! [`ApiClient`] handed down via context; this is the only place that attaches
//! the bearer token and the only place a 401 is handled.

use gloo_net::http::{Method, RequestBuilder, Response};
use thiserror::Error;

use crate::session;

pub const API_BASE_URL: &str = match option_env!("LOCAFLOW_API_URL") {
    Some(url) => url,
    None => "https://api.locaflow.app",
};

/// Only the two exceptional conditions are errors. Ordinary non-2xx statuses
/// come back as a plain `Response` for the caller to inspect.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session expired, please sign in again")]
    SessionExpired,
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Copy shown to the user: connectivity problems should read as "check
    /// your connection", not as a server fault.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::SessionExpired => "Session expired, please sign in again.".to_string(),
            ApiError::Network(_) => {
                "Connection problem. Check your network and try again.".to_string()
            }
        }
    }
}

pub enum ApiBody {
    Empty,
    Json(serde_json::Value),
    Multipart(web_sys::FormData),
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum BodyKind {
    Empty,
    Json,
    Multipart,
}

impl ApiBody {
    fn kind(&self) -> BodyKind {
        match self {
            ApiBody::Empty => BodyKind::Empty,
            ApiBody::Json(_) => BodyKind::Json,
            ApiBody::Multipart(_) => BodyKind::Multipart,
        }
    }
}

/// JSON bodies are announced as such; multipart bodies must stay untouched so
/// the transport supplies the boundary parameter itself.
fn content_type_for(kind: BodyKind) -> Option<&'static str> {
    match kind {
        BodyKind::Json => Some("application/json"),
        BodyKind::Empty | BodyKind::Multipart => None,
    }
}

/// Call sites use both `/relative` paths and fully-qualified URLs.
fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), path)
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path)
    }
}

pub fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/");
    }
}

/// Session requests treat a 401 as an expired session. Public requests are
/// the auth endpoints themselves, where a 401 means bad credentials and must
/// reach the screen as an ordinary failed response.
#[derive(Clone, Copy, PartialEq, Debug)]
enum RequestScope {
    Session,
    Public,
}

fn session_expired(scope: RequestScope, status: u16) -> bool {
    scope == RequestScope::Session && status == 401
}

#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn dispatch(
        &self,
        scope: RequestScope,
        method: Method,
        path: &str,
        body: ApiBody,
    ) -> Result<Response, ApiError> {
        let url = join_url(&self.base_url, path);
        let mut builder = RequestBuilder::new(&url).method(method);

        if scope == RequestScope::Session {
            if let Some(token) = session::token() {
                builder = builder.header("Authorization", &format!("Bearer {}", token));
            }
        }
        if let Some(content_type) = content_type_for(body.kind()) {
            builder = builder.header("Content-Type", content_type);
        }

        let request = match body {
            ApiBody::Empty => builder.build(),
            ApiBody::Json(value) => builder.body(value.to_string()),
            ApiBody::Multipart(form) => builder.body(form),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if session_expired(scope, response.status()) {
            session::clear();
            redirect_to_login();
            return Err(ApiError::SessionExpired);
        }

        Ok(response)
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: ApiBody,
    ) -> Result<Response, ApiError> {
        self.dispatch(RequestScope::Session, method, path, body)
            .await
    }

    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        self.request(Method::GET, path, ApiBody::Empty).await
    }

    pub async fn get_public(&self, path: &str) -> Result<Response, ApiError> {
        self.dispatch(RequestScope::Public, Method::GET, path, ApiBody::Empty)
            .await
    }

    pub async fn post_json_public(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<Response, ApiError> {
        self.dispatch(
            RequestScope::Public,
            Method::POST,
            path,
            ApiBody::Json(payload),
        )
        .await
    }

    pub async fn post_json(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<Response, ApiError> {
        self.request(Method::POST, path, ApiBody::Json(payload)).await
    }

    pub async fn patch_json(
        &self,
        path: &str,
        payload: serde_json::Value,
    ) -> Result<Response, ApiError> {
        self.request(Method::PATCH, path, ApiBody::Json(payload)).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<Response, ApiError> {
        self.request(Method::POST, path, ApiBody::Multipart(form)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, ApiError> {
        self.request(Method::DELETE, path, ApiBody::Empty).await
    }
}

/// Pulls a human-readable message out of a failed response body.
pub async fn error_detail(response: Response, fallback: &str) -> String {
    match response.json::<serde_json::Value>().await {
        Ok(value) => detail_from_value(&value, fallback),
        Err(_) => fallback.to_string(),
    }
}

fn detail_from_value(value: &serde_json::Value, fallback: &str) -> String {
    for key in ["detail", "message", "error"] {
        match value.get(key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
    }
    fallback.to_string()
}

fn object_url(bytes: &[u8], mime: &str) -> Option<String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

/// Opens binary content in a new tab through a transient object URL.
pub fn open_blob(bytes: &[u8], mime: &str) {
    if let Some(url) = object_url(bytes, mime) {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(&url, "_blank");
        }
        let _ = web_sys::Url::revoke_object_url(&url);
    }
}

/// Triggers a save-as download of binary content. The anchor and the object
/// URL are both discarded once the click has fired.
pub fn download_blob(bytes: &[u8], mime: &str, filename: &str) {
    use wasm_bindgen::JsCast;

    let Some(url) = object_url(bytes, mime) else {
        return;
    };
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Ok(node) = document.create_element("a") {
            if let Ok(anchor) = node.dyn_into::<web_sys::HtmlAnchorElement>() {
                anchor.set_href(&url);
                anchor.set_download(filename);
                anchor.click();
                anchor.remove();
            }
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_bodies_carry_json_content_type() {
        assert_eq!(content_type_for(BodyKind::Json), Some("application/json"));
    }

    #[test]
    fn multipart_and_empty_bodies_carry_no_content_type() {
        assert_eq!(content_type_for(BodyKind::Multipart), None);
        assert_eq!(content_type_for(BodyKind::Empty), None);
    }

    #[test]
    fn bad_credentials_do_not_end_the_session() {
        // A 401 from /auth/login is a wrong password, not an expired session.
        assert!(!session_expired(RequestScope::Public, 401));
        assert!(session_expired(RequestScope::Session, 401));
        assert!(!session_expired(RequestScope::Session, 403));
        assert!(!session_expired(RequestScope::Session, 200));
    }

    #[test]
    fn relative_paths_join_onto_base() {
        assert_eq!(
            join_url("https://api.example.com", "/dashboard/stats"),
            "https://api.example.com/dashboard/stats"
        );
        assert_eq!(
            join_url("https://api.example.com/", "settings"),
            "https://api.example.com/settings"
        );
    }

    #[test]
    fn full_urls_pass_through_untouched() {
        assert_eq!(
            join_url("https://api.example.com", "https://other.example.com/x"),
            "https://other.example.com/x"
        );
    }

    #[test]
    fn detail_prefers_server_message() {
        let v = json!({ "detail": "Email pris" });
        assert_eq!(detail_from_value(&v, "server error"), "Email pris");

        let v = json!({ "message": "nope" });
        assert_eq!(detail_from_value(&v, "server error"), "nope");
    }

    #[test]
    fn detail_falls_back_on_opaque_bodies() {
        let v = json!({ "unrelated": true });
        assert_eq!(detail_from_value(&v, "server error"), "server error");
    }

    #[test]
    fn structured_detail_is_stringified() {
        // FastAPI-style 422 bodies put an array under "detail".
        let v = json!({ "detail": [{"loc": ["body", "email"], "msg": "required"}] });
        let msg = detail_from_value(&v, "server error");
        assert!(msg.contains("required"));
    }
}
