use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use identity_core::{ApiKeyInfo, AuthResponse, Provider, UserProfile};
use identity_core_axum::{AuthPrincipal, IntoResponseError};

#[derive(Deserialize)]
pub(crate) struct RegisterRequest {
    email: String,
    password: String,
    name: Option<String>,
}

pub(crate) async fn register(
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let response = identity_core::register(&body.email, &body.password, body.name.as_deref())
        .await
        .into_response_error()?;
    Ok(Json(response))
}

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

pub(crate) async fn login(
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let response = identity_core::login(&body.email, &body.password)
        .await
        .into_response_error()?;
    Ok(Json(response))
}

#[derive(Deserialize)]
pub(crate) struct SocialLoginRequest {
    provider: String,
    provider_user_id: String,
    email: String,
    name: Option<String>,
    avatar: Option<String>,
}

pub(crate) async fn social_login(
    Json(body): Json<SocialLoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let provider: Provider = body
        .provider
        .parse()
        .map_err(|e: identity_core::SocialAccountError| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let response = identity_core::social_login(
        provider,
        &body.provider_user_id,
        &body.email,
        body.name.as_deref(),
        body.avatar.as_deref(),
    )
    .await
    .into_response_error()?;
    Ok(Json(response))
}

#[derive(Deserialize)]
pub(crate) struct CreateApiKeyRequest {
    name: String,
    expires_at: Option<DateTime<Utc>>,
}

// The full key (secret included) is returned exactly once, at creation.
pub(crate) async fn create_api_key(
    AuthPrincipal(user): AuthPrincipal,
    Json(body): Json<CreateApiKeyRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let key = identity_core::generate_api_key(&user.id, &body.name, body.expires_at)
        .await
        .into_response_error()?;
    Ok((StatusCode::CREATED, Json(key)))
}

pub(crate) async fn list_keys(
    AuthPrincipal(user): AuthPrincipal,
) -> Result<Json<Vec<ApiKeyInfo>>, (StatusCode, String)> {
    let keys = identity_core::list_api_keys(&user.id)
        .await
        .into_response_error()?;
    Ok(Json(keys))
}

pub(crate) async fn revoke_key(
    AuthPrincipal(user): AuthPrincipal,
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Result<Json<ApiKeyInfo>, (StatusCode, String)> {
    // Only the owner may revoke a key
    let owned = identity_core::list_api_keys(&user.id)
        .await
        .into_response_error()?;
    if !owned.iter().any(|key| key.id == id) {
        return Err((StatusCode::NOT_FOUND, format!("ApiKey {id}")));
    }

    let key = identity_core::revoke_api_key(&id).await.into_response_error()?;
    Ok(Json(key))
}

pub(crate) async fn me(AuthPrincipal(user): AuthPrincipal) -> Json<UserProfile> {
    Json(user)
}

pub(crate) async fn service_status(AuthPrincipal(user): AuthPrincipal) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "authenticated_as": user.email,
    }))
}
