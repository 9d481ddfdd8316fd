use axum::{
    extract::Path,
    headers::{authorization::Bearer, Authorization},
    http::Request,
    middleware::Next,
    response::Response,
    Extension, TypedHeader,
};
use tracing::debug;

use crate::{app_state::AppState, error::AppError, models::user::CurrentUser};

/// Resolves a bearer token into a `CurrentUser`. Never rejects: requests
/// without a valid token simply carry no identity.
pub async fn authenticate_jwt<B>(
    Extension(state): Extension<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<B>,
    next: Next<B>,
) -> Response {
    // Extract the token from the request's Authorization header
    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        match state.jwt.validate_token(bearer.token().trim()) {
            Some(username) => {
                debug!("Valid JWT token. Username: {}", username);
                // Downstream stages and handlers read the caller from here
                req.extensions_mut().insert(CurrentUser(username));
            }
            None => debug!("Ignoring invalid JWT token"),
        }
    }

    next.run(req).await
}

/// Rejects requests that carry no `CurrentUser`.
pub async fn ensure_logged_in<B>(req: Request<B>, next: Next<B>) -> Result<Response, AppError> {
    if req.extensions().get::<CurrentUser>().is_none() {
        return Err(AppError::Unauthenticated);
    }

    Ok(next.run(req).await)
}

/// Rejects requests whose `CurrentUser` differs from the `:username` path segment.
pub async fn ensure_correct_user<B>(
    Path(username): Path<String>,
    req: Request<B>,
    next: Next<B>,
) -> Result<Response, AppError> {
    match req.extensions().get::<CurrentUser>() {
        // Path segment and token must name the same user
        Some(CurrentUser(current)) if *current == username => Ok(next.run(req).await),
        _ => Err(AppError::WrongUser),
    }
}
