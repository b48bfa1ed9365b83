//! Middleware de autenticación JWT
//!
//! Resuelve el header `Authorization: Bearer <jwt>` a la identidad del
//! usuario y la inyecta en las extensions. Las rutas públicas siguen
//! funcionando sin token; los servicios deciden qué exige sesión.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use tracing::debug;

use crate::{models::auth::Identity, state::AppState, utils::jwt::extract_token_from_header};

/// Usuario de la request actual, `None` si no hay sesión válida
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<Identity>);

impl CurrentUser {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

/// Middleware opcional de autenticación
///
/// Un token ausente, mal formado o expirado deja la request como anónima.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(extract_token_from_header);

    let identity = match token {
        Some(Ok(token)) => match state.auth.identity_from_token(token).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!("🔒 Token rechazado: {}", e);
                None
            }
        },
        Some(Err(e)) => {
            debug!("🔒 Header Authorization inválido: {}", e);
            None
        }
        None => None,
    };

    request.extensions_mut().insert(CurrentUser(identity));
    next.run(request).await
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().cloned().unwrap_or_default())
    }
}
