// [apps/submission-service/src/middleware.rs]
//! Guardias de peticion: identidad del invocador y limite de tasa.
//! El guardia de autenticacion replica el patron del teacher (decodificar
//! el payload de un JWT sin validar su firma, delegada al proveedor de
//! OAuth) en lugar de traer una dependencia de verificacion de JWT
//! completa; con `AUTH_ENABLED=false` todo invocador es anonimo.

use crate::state::AppState;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct OwnerIdentity {
    pub owner_id: String,
}

#[derive(Debug, Deserialize)]
struct BearerClaims {
    #[serde(default)]
    oid: Option<String>,
    #[serde(default)]
    sub: Option<String>,
}

pub async fn auth_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, StatusCode> {
    if !state.auth_enabled {
        req.extensions_mut().insert(OwnerIdentity { owner_id: "anonymous".to_string() });
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        warn!("missing bearer token");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let claims = URL_SAFE_NO_PAD
        .decode(segments[1])
        .ok()
        .and_then(|bytes| serde_json::from_slice::<BearerClaims>(&bytes).ok());

    let owner_id = claims.and_then(|c| c.oid.or(c.sub));
    match owner_id {
        Some(owner_id) => {
            req.extensions_mut().insert(OwnerIdentity { owner_id });
            Ok(next.run(req).await)
        }
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

pub async fn rate_limit_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    if let Some(addr) = addr {
        if !state.rate_limiter.try_acquire(addr) {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "RateLimited", "message": "too many submissions from this address" })),
            )
                .into_response();
        }
    }

    next.run(req).await
}
