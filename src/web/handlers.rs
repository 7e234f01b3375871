//! Request handlers for the authentication endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::auth::{
    self,
    auth::{LoginRequest, SecretChangeRequest},
    auth_body::AuthBody,
};
use crate::prelude::*;

use super::{ctx::Ctx, extract::ApiJson, routes::Route, state::AppState};

/// Identity behind the presented token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionBody {
    #[serde(rename = "usuarioId")]
    pub user_id: u64,
    pub exp: i64,
}

/// Routes served by this crate.
pub fn routes() -> Vec<Route> {
    vec![
        Route::public("/health", get(health)),
        Route::public("/login", post(login)),
        Route::authenticated("/sessao", get(session)),
        Route::authenticated(
            "/usuarios/{usuarioId}/atualizar-senha",
            post(change_secret),
        ),
    ]
}

async fn health() -> &'static str {
    "ok"
}

#[axum::debug_handler(state = AppState)]
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthBody>> {
    Ok(Json(auth::auth::login(
        &payload,
        state.store.as_ref(),
        &state.codec,
    )?))
}

#[axum::debug_handler(state = AppState)]
async fn session(ctx: Ctx) -> Json<SessionBody> {
    Json(SessionBody {
        user_id: ctx.user_id,
        exp: ctx.claims.exp,
    })
}

#[axum::debug_handler(state = AppState)]
async fn change_secret(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(user_id): Path<u64>,
    ApiJson(payload): ApiJson<SecretChangeRequest>,
) -> Result<StatusCode> {
    ctx.require_identity(user_id)?;
    auth::auth::change_secret(user_id, &payload, state.store.as_ref())?;
    Ok(StatusCode::NO_CONTENT)
}
