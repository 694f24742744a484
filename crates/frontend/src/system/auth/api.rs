use contracts::domain::common::decode_one;
use contracts::system::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::api_utils::{validated, ApiClient, ApiError};

const LOGIN: &str = "/api/auth/login";
const REGISTER: &str = "/api/auth/register";
const LOGOUT: &str = "/api/auth/logout";

/// Token plus the user it belongs to; persisted between reloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserInfo,
}

impl From<LoginResponse> for AuthSession {
    fn from(r: LoginResponse) -> Self {
        Self {
            token: r.token,
            user: r.user,
        }
    }
}

/// The auth routes answer either with the bare object or wrapped in the CRUD
/// envelope.
fn read_login(body: &Value) -> Result<Option<LoginResponse>, ApiError> {
    if let Ok(direct) = LoginResponse::deserialize(body) {
        return Ok(Some(direct));
    }
    Ok(decode_one::<LoginResponse>(body)?)
}

pub async fn login(api: &ApiClient, request: LoginRequest) -> Result<AuthSession, ApiError> {
    validated(request.validate())?;
    let body = api.post_auth(LOGIN, Some(serde_json::to_value(&request)?)).await?;
    match read_login(&body)? {
        Some(response) if !response.token.is_empty() => {
            log::info!("login as {}", response.user.logged_user());
            Ok(response.into())
        }
        _ => Err(ApiError::Decode("la respuesta no contiene un token".into())),
    }
}

/// Some deployments log the new user in right away; others only confirm
pub async fn register(api: &ApiClient, request: RegisterRequest) -> Result<Option<AuthSession>, ApiError> {
    validated(request.validate())?;
    let body = api.post_auth(REGISTER, Some(serde_json::to_value(&request)?)).await?;
    Ok(read_login(&body)
        .ok()
        .flatten()
        .filter(|r| !r.token.is_empty())
        .map(AuthSession::from))
}

/// Best effort; the local session is dropped whatever the server says
pub async fn logout(api: &ApiClient) {
    if let Err(e) = api.post_auth(LOGOUT, None).await {
        log::warn!("logout: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::testing::{client, MockTransport};
    use futures::executor::block_on;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "ana@x.mx".into(),
            password: "secreto".into(),
        }
    }

    #[test]
    fn test_login_direct_body() {
        let mock = MockTransport::new();
        mock.respond(200, json!({ "token": "jwt", "user": { "_id": "USR01", "email": "ana@x.mx" } }));
        let session = block_on(login(&client(&mock), credentials())).unwrap();
        assert_eq!(session.token, "jwt");
        assert_eq!(session.user.logged_user(), "USR01");

        let requests = mock.requests();
        assert_eq!(requests[0].url, "http://api.test/api/auth/login");
        assert_eq!(mock.request_body(0), json!({ "email": "ana@x.mx", "password": "secreto" }));
    }

    #[test]
    fn test_login_enveloped_body() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            json!({ "value": [ { "data": [ { "dataRes": { "accessToken": "jwt2", "user": { "email": "ana@x.mx" } } } ] } ] }),
        );
        let session = block_on(login(&client(&mock), credentials())).unwrap();
        assert_eq!(session.token, "jwt2");
    }

    #[test]
    fn test_login_rejected() {
        let mock = MockTransport::new();
        mock.respond(400, json!({ "message": "Credenciales inválidas" }));
        let err = block_on(login(&client(&mock), credentials())).unwrap_err();
        assert_eq!(err.to_string(), "Credenciales inválidas");
    }

    #[test]
    fn test_wrong_password_is_not_session_expiry() {
        let mock = MockTransport::new();
        mock.respond(401, json!({ "message": "Credenciales inválidas" }));
        let expired = Arc::new(AtomicBool::new(false));
        let flag = expired.clone();
        let api = client(&mock).on_session_expired(move || flag.store(true, Ordering::SeqCst));

        let err = block_on(login(&api, credentials())).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 401,
                message: "Credenciales inválidas".into()
            }
        );
        assert!(!expired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_invalid_input_sends_nothing() {
        let mock = MockTransport::new();
        let err = block_on(login(
            &client(&mock),
            LoginRequest {
                email: " ".into(),
                password: String::new(),
            },
        ))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_register_without_token() {
        let mock = MockTransport::new();
        mock.respond(201, json!({ "message": "Usuario creado" }));
        let session = block_on(register(
            &client(&mock),
            RegisterRequest {
                name: "Ana".into(),
                email: "ana@x.mx".into(),
                password: "secreto".into(),
            },
        ))
        .unwrap();
        assert_eq!(session, None);
    }
}
