//! API utilities for frontend-backend communication
//!
//! Every resource service goes through [`ApiClient`]: it builds the CRUD URL
//! (`ProcessType`, `LoggedUser`, optional `DBServer`), attaches the bearer
//! token, maps HTTP failures to [`ApiError`] and unwraps the response
//! envelope. The transport sits behind [`HttpTransport`] so services can be
//! tested without a browser.

use std::sync::Arc;

use async_trait::async_trait;
use contracts::domain::common::envelope::{self, DecodeError};
use contracts::domain::common::{changed_fields, AggregateRoot, ProcessType};
use gloo_net::http::Request;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::shared::config::AppConfig;
use crate::system::auth::context::SessionContext;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never reached the server
    #[error("No se pudo conectar con el servidor: {0}")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("La sesión ha expirado. Inicie sesión nuevamente.")]
    SessionExpired,

    /// Rejected on the client before any call
    #[error("{0}")]
    Validation(String),

    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),

    /// Some calls of a bulk operation failed; the text lists them
    #[error("{0}")]
    Partial(String),
}

impl From<DecodeError> for ApiError {
    fn from(e: DecodeError) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Run a contract-level `validate()` and lift its message into `ApiError`
pub fn validated(result: Result<(), String>) -> Result<(), ApiError> {
    result.map_err(ApiError::Validation)
}

// ============================================================================
// Transport
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub body: Option<String>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// All backend calls are JSON POSTs
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `fetch` through gloo-net, with cookies included
pub struct BrowserTransport;

#[async_trait(?Send)]
impl HttpTransport for BrowserTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = Request::post(&request.url)
            .header("Content-Type", "application/json")
            .credentials(web_sys::RequestCredentials::Include);
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Client
// ============================================================================

/// Result of a diff-based save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing changed; no request was sent
    Unchanged,
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    Logical,
    Hard,
}

impl DeleteMode {
    fn process(self) -> ProcessType {
        match self {
            DeleteMode::Logical => ProcessType::DeleteLogic,
            DeleteMode::Hard => ProcessType::DeleteHard,
        }
    }
}

/// What a 401 response means for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unauthorized {
    SessionExpired,
    ServerError,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    logged_user: String,
    db_server: Option<String>,
    token: Option<String>,
    transport: Arc<dyn HttpTransport + Send + Sync>,
    on_session_expired: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, Arc::new(BrowserTransport))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn HttpTransport + Send + Sync>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            logged_user: String::new(),
            db_server: None,
            token: None,
            transport,
            on_session_expired: None,
        }
    }

    pub fn acting_as(mut self, user: &str) -> Self {
        self.logged_user = user.to_string();
        self
    }

    pub fn with_db_server(mut self, db_server: Option<String>) -> Self {
        self.db_server = db_server.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn on_session_expired(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_session_expired = Some(Arc::new(f));
        self
    }

    pub fn logged_user(&self) -> &str {
        &self.logged_user
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    /// URL of a CRUD call: operation, acting user, optional store, then the
    /// call-specific parameters.
    pub fn crud_url(&self, endpoint: &str, process: ProcessType, params: &[(&str, &str)]) -> String {
        let mut all: Vec<(&str, &str)> = vec![
            ("ProcessType", process.as_str()),
            ("LoggedUser", self.logged_user.as_str()),
        ];
        if let Some(db) = self.db_server.as_deref() {
            all.push(("DBServer", db));
        }
        all.extend_from_slice(params);
        self.url(endpoint, &all)
    }

    async fn send(&self, url: String, body: Option<Value>, on_unauthorized: Unauthorized) -> Result<Value, ApiError> {
        let request = HttpRequest {
            url,
            body: body.map(|b| b.to_string()),
            bearer: self.token.clone(),
        };
        let response = self.transport.post(request).await?;

        if response.status == 401 && on_unauthorized == Unauthorized::SessionExpired {
            if let Some(notify) = &self.on_session_expired {
                notify();
            }
            return Err(ApiError::SessionExpired);
        }

        let parsed = envelope::parse_body(&response.body);
        if !response.ok() {
            let message = parsed
                .ok()
                .as_ref()
                .and_then(envelope::server_message)
                .unwrap_or_else(|| format!("Error del servidor (HTTP {})", response.status));
            return Err(ApiError::Server {
                status: response.status,
                message,
            });
        }
        Ok(parsed?)
    }

    /// One CRUD call; returns the raw (still wrapped) response body
    pub async fn process(
        &self,
        endpoint: &str,
        process: ProcessType,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.crud_url(endpoint, process, params);
        self.send(url, body, Unauthorized::SessionExpired).await.inspect_err(|e| {
            log::error!("{} {} failed: {}", process, endpoint, e);
        })
    }

    /// POST outside the CRUD convention (composite create)
    pub async fn post_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path, params);
        self.send(url, body, Unauthorized::SessionExpired).await.inspect_err(|e| {
            log::error!("POST {} failed: {}", path, e);
        })
    }

    /// POST to an `/api/auth` route. A 401 there means rejected credentials,
    /// so it comes back as a server error with the backend's message.
    pub async fn post_auth(&self, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let url = self.url(path, &[]);
        self.send(url, body, Unauthorized::ServerError).await.inspect_err(|e| {
            log::error!("POST {} failed: {}", path, e);
        })
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        process: ProcessType,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let body = self.process(endpoint, process, params, None).await?;
        envelope::decode_list(&body).map_err(|e| {
            log::error!("{} {}: {}", process, endpoint, e);
            e.into()
        })
    }

    pub async fn one<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        process: ProcessType,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, ApiError> {
        let body = self.process(endpoint, process, params, None).await?;
        envelope::decode_one(&body).map_err(|e| {
            log::error!("{} {}: {}", process, endpoint, e);
            e.into()
        })
    }

    // ------------------------------------------------------------------------
    // Aggregate-level helpers
    // ------------------------------------------------------------------------

    pub async fn fetch_all<A>(&self, params: &[(&str, &str)]) -> Result<Vec<A>, ApiError>
    where
        A: AggregateRoot + DeserializeOwned,
    {
        self.list(A::endpoint(), ProcessType::GetAll, params).await
    }

    pub async fn fetch_one<A>(&self, key: &str) -> Result<Option<A>, ApiError>
    where
        A: AggregateRoot + DeserializeOwned,
    {
        self.one(A::endpoint(), ProcessType::GetOne, &[(A::key_param(), key)])
            .await
    }

    /// Like `fetch_one`, but a missing record is an error (dialogs need one)
    pub async fn require_one<A>(&self, key: &str) -> Result<A, ApiError>
    where
        A: AggregateRoot + DeserializeOwned,
    {
        self.fetch_one::<A>(key).await?.ok_or_else(|| {
            log::error!("{} {} not found", A::aggregate_index(), key);
            ApiError::Server {
                status: 404,
                message: format!("{} '{}' no encontrado", A::element_name(), key),
            }
        })
    }

    pub async fn add_one<A, T>(&self, payload: &T) -> Result<Value, ApiError>
    where
        A: AggregateRoot,
        T: Serialize,
    {
        let body = serde_json::to_value(payload)?;
        self.process(A::endpoint(), ProcessType::AddOne, &[], Some(body))
            .await
    }

    /// Send only the fields that differ between `original` and `draft`.
    /// With no differences nothing is sent.
    pub async fn update_changed<A, T>(&self, key: &str, original: &T, draft: &T) -> Result<SaveOutcome, ApiError>
    where
        A: AggregateRoot,
        T: Serialize,
    {
        let changes = changed_fields(original, draft)?;
        if changes.is_empty() {
            log::debug!("{}: no changes for {}", A::aggregate_index(), key);
            return Ok(SaveOutcome::Unchanged);
        }
        self.process(
            A::endpoint(),
            ProcessType::UpdateOne,
            &[(A::key_param(), key)],
            Some(Value::Object(changes)),
        )
        .await?;
        Ok(SaveOutcome::Saved)
    }

    /// Switching on activates; switching off is a logical delete
    pub async fn set_active<A: AggregateRoot>(&self, key: &str, active: bool) -> Result<(), ApiError> {
        let process = if active {
            ProcessType::ActivateOne
        } else {
            ProcessType::DeleteLogic
        };
        self.process(A::endpoint(), process, &[(A::key_param(), key)], None)
            .await
            .map(|_| ())
    }

    pub async fn delete<A: AggregateRoot>(&self, key: &str, mode: DeleteMode) -> Result<(), ApiError> {
        self.process(A::endpoint(), mode.process(), &[(A::key_param(), key)], None)
            .await
            .map(|_| ())
    }
}

// ============================================================================
// Leptos wiring
// ============================================================================

/// Copyable handle that builds an [`ApiClient`] from the current session at
/// call time, so a store switch or re-login is picked up without remounting.
#[derive(Clone, Copy)]
pub struct ApiContext {
    config: StoredValue<AppConfig>,
    session: SessionContext,
}

impl ApiContext {
    pub fn new(config: AppConfig, session: SessionContext) -> Self {
        Self {
            config: StoredValue::new(config),
            session,
        }
    }

    pub fn client(&self) -> ApiClient {
        let base_url = self.config.with_value(|c| c.api.base_url.clone());
        let expired = self.session.expired;
        ApiClient::new(&base_url)
            .acting_as(&self.session.logged_user_untracked())
            .with_db_server(Some(self.session.db_server.get_untracked()))
            .with_token(self.session.token_untracked())
            .on_session_expired(move || expired.set(true))
    }
}

pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext context not found")
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Canned responses in order; every request is recorded
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn respond(&self, status: u16, body: Value) -> &Self {
            let body = if body.is_null() { String::new() } else { body.to_string() };
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(HttpResponse { status, body }));
            self
        }

        pub fn fail(&self, error: ApiError) -> &Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_body(&self, index: usize) -> Value {
            let requests = self.requests();
            let body = requests[index].body.clone().unwrap_or_default();
            serde_json::from_str(&body).unwrap()
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn post(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(HttpResponse {
                    status: 200,
                    body: String::new(),
                }))
        }
    }

    pub fn client(mock: &Arc<MockTransport>) -> ApiClient {
        ApiClient::with_transport("http://api.test/", mock.clone())
            .acting_as("USR01")
            .with_db_server(Some("MongoDB".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{client, MockTransport};
    use super::*;
    use contracts::domain::a003_category::{Category, CategoryForm};
    use futures::executor::block_on;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_crud_url_carries_session_params() {
        let mock = MockTransport::new();
        let api = client(&mock);
        let url = api.crud_url("/api/x/xCRUD", ProcessType::GetOne, &[("catid", "CAT A&B")]);
        assert_eq!(
            url,
            "http://api.test/api/x/xCRUD?ProcessType=GetOne&LoggedUser=USR01&DBServer=MongoDB&catid=CAT%20A%26B"
        );
    }

    #[test]
    fn test_list_unwraps_envelope() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            json!({ "value": [ { "data": [ { "dataRes": [ { "CATID": "CAT_A", "Nombre": "A" } ] } ] } ] }),
        );
        let rows: Vec<Category> = block_on(client(&mock).fetch_all::<Category>(&[])).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "CAT_A");
        assert!(mock.requests()[0].url.contains("ProcessType=GetAll"));
    }

    #[test]
    fn test_empty_body_is_empty_list() {
        let mock = MockTransport::new();
        mock.respond(200, Value::Null);
        let rows: Vec<Category> = block_on(client(&mock).fetch_all::<Category>(&[])).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_server_message_is_surfaced() {
        let mock = MockTransport::new();
        mock.respond(400, json!({ "messageUSR": "La categoría ya existe" }));
        mock.respond(500, json!({ "unrelated": true }));

        let api = client(&mock);
        let first = block_on(api.fetch_all::<Category>(&[])).unwrap_err();
        assert_eq!(
            first,
            ApiError::Server {
                status: 400,
                message: "La categoría ya existe".into()
            }
        );
        let second = block_on(api.fetch_all::<Category>(&[])).unwrap_err();
        assert_eq!(second.to_string(), "Error del servidor (HTTP 500)");
    }

    #[test]
    fn test_unauthorized_flags_session() {
        let mock = MockTransport::new();
        mock.respond(401, json!({ "message": "jwt expired" }));
        let flagged = Arc::new(AtomicBool::new(false));
        let flag = flagged.clone();
        let api = client(&mock)
            .with_token(Some("t0k".into()))
            .on_session_expired(move || flag.store(true, Ordering::SeqCst));

        let err = block_on(api.fetch_all::<Category>(&[])).unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
        assert!(flagged.load(Ordering::SeqCst));
        assert_eq!(mock.requests()[0].bearer.as_deref(), Some("t0k"));
    }

    #[test]
    fn test_network_failure_propagates() {
        let mock = MockTransport::new();
        mock.fail(ApiError::Network("offline".into()));
        let err = block_on(client(&mock).delete::<Category>("CAT_A", DeleteMode::Hard)).unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn test_update_without_changes_sends_nothing() {
        let mock = MockTransport::new();
        let form = CategoryForm {
            id: "CAT_A".into(),
            name: "A".into(),
            parent_id: None,
        };
        let outcome =
            block_on(client(&mock).update_changed::<Category, _>("CAT_A", &form, &form.clone())).unwrap();
        assert_eq!(outcome, SaveOutcome::Unchanged);
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_update_sends_only_changed_fields() {
        let mock = MockTransport::new();
        let original = CategoryForm {
            id: "CAT_A".into(),
            name: "A".into(),
            parent_id: Some("CAT_ROOT".into()),
        };
        let mut draft = original.clone();
        draft.rename("Bebidas");

        let outcome =
            block_on(client(&mock).update_changed::<Category, _>("CAT_A", &original, &draft)).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.contains("ProcessType=UpdateOne"));
        assert!(requests[0].url.ends_with("catid=CAT_A"));
        assert_eq!(
            mock.request_body(0),
            json!({ "CATID": "CAT_BEBIDAS", "Nombre": "Bebidas" })
        );
    }

    #[test]
    fn test_status_toggle_process_types() {
        let mock = MockTransport::new();
        let api = client(&mock);
        block_on(api.set_active::<Category>("CAT_A", true)).unwrap();
        block_on(api.set_active::<Category>("CAT_A", false)).unwrap();
        let requests = mock.requests();
        assert!(requests[0].url.contains("ProcessType=ActivateOne"));
        assert!(requests[1].url.contains("ProcessType=DeleteLogic"));
    }
}
