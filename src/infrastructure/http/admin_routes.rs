//! Admin dashboard routes
//!
//! The page route redirects unauthorized visitors; the API routes answer
//! them with 401 instead.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect as HttpRedirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::dto::page_data::EnvironmentDto;
use crate::application::dto::{NoteDto, PageDataDto};
use crate::application::services::{
    check_admin, AdminConfigError, AdminPage, GateDecision, Redirect, ToastQueue,
};
use crate::domain::value_objects::{PlayerId, Session};
use crate::infrastructure::state::AppState;
use crate::infrastructure::websocket::ServerEvent;

pub const ENVIRONMENT_CHANGE_EVENT: &str = "environmentChange";

#[derive(Debug, Clone, Serialize)]
pub struct PropsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
    pub props: PageDataDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValueRequest {
    pub value: String,
}

/// Admin dashboard, composed into its widget tree
pub async fn admin_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let session = current_session(&state, &headers).await?;

    match check_admin(session.as_ref()) {
        GateDecision::Redirect { redirect, .. } => {
            Ok(HttpRedirect::temporary(&redirect.destination).into_response())
        }
        GateDecision::Proceed { actor_id } => {
            let payload = state
                .dashboard_service
                .load(&actor_id)
                .await
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

            let page = AdminPage::new(ToastQueue::new());
            Ok(Json(page.compose(&payload)).into_response())
        }
    }
}

/// Raw page data, or the redirect instruction with an empty payload
pub async fn admin_props(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PropsResponse>, (StatusCode, String)> {
    let session = current_session(&state, &headers).await?;

    let response = match check_admin(session.as_ref()) {
        GateDecision::Redirect { redirect, props } => PropsResponse {
            redirect: Some(redirect),
            props: PageDataDto::from(&props),
        },
        GateDecision::Proceed { actor_id } => {
            let payload = state
                .dashboard_service
                .load(&actor_id)
                .await
                .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
            PropsResponse {
                redirect: None,
                props: PageDataDto::from(&payload),
            }
        }
    };

    Ok(Json(response))
}

/// Switch the global environment and tell every admin client
pub async fn update_environment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ValueRequest>,
) -> Result<Json<EnvironmentDto>, (StatusCode, String)> {
    require_admin(&state, &headers).await?;

    let config = state
        .admin_config_service
        .set_environment(&request.value)
        .await
        .map_err(config_error)?;

    let event = ServerEvent::new(
        ENVIRONMENT_CHANGE_EVENT,
        serde_json::json!({ "value": &config.value }),
    );
    let delivered = state
        .rooms
        .read()
        .await
        .broadcast(&state.config.admin_room, &event);
    tracing::debug!("Environment change delivered to {} clients", delivered);

    Ok(Json(EnvironmentDto::from(&config)))
}

/// Save the annotations of the requesting admin
pub async fn update_notes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ValueRequest>,
) -> Result<Json<NoteDto>, (StatusCode, String)> {
    let actor_id = require_admin(&state, &headers).await?;

    let note = state
        .admin_config_service
        .save_note(&actor_id, &request.value)
        .await
        .map_err(config_error)?;

    Ok(Json(NoteDto::from(&note)))
}

async fn current_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Session>, (StatusCode, String)> {
    let Some(token) = session_token(headers, &state.config.session_cookie) else {
        return Ok(None);
    };
    state
        .sessions
        .get_session(&token)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

async fn require_admin(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<PlayerId, (StatusCode, String)> {
    let session = current_session(state, headers).await?;
    match check_admin(session.as_ref()) {
        GateDecision::Proceed { actor_id } => Ok(actor_id),
        GateDecision::Redirect { .. } => Err((
            StatusCode::UNAUTHORIZED,
            "Admin session required".to_string(),
        )),
    }
}

fn config_error(e: AdminConfigError) -> (StatusCode, String) {
    match e {
        AdminConfigError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        AdminConfigError::Repository(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Value of the named cookie, if the request carries it
fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == cookie_name && !value.is_empty()).then(|| value.to_string())
        })
}
