use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::auth::{LoginRequest, LoginResponse},
    auth::{password, session},
    errors::Error,
};

/// The one message every credential failure maps to. Lookup errors, unknown
/// emails and wrong passwords must be indistinguishable to the caller.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn invalid_credentials() -> Error {
    Error::Unauthenticated {
        message: Some(INVALID_CREDENTIALS.to_string()),
    }
}

/// Login with email and password, returning a signed bearer token.
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, Error> {
    // Find user by email. Fail closed: a store error is logged but reported
    // to the caller exactly like a bad credential.
    let user = match state.users.get_by_email(&request.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(invalid_credentials()),
        Err(err) => {
            tracing::error!("user lookup failed during login: {err:#}");
            return Err(invalid_credentials());
        }
    };

    // Verify password on a blocking thread to avoid blocking the async runtime
    let submitted = request.password;
    let hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&submitted, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(invalid_credentials());
    }

    let token = session::create_session_token(&user, &state.config)?;

    Ok(Json(LoginResponse { token }))
}
