// handler/users.rs
use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{
        FilterUserDto, LoginUserDto, RegisterUserDto, UserLoginResponseDto, UserResponseDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::JWTAuthMiddleware,
    utils::{password, token},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn users_handler() -> Router {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/logout", get(logout))
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing_user = app_state
        .db_client
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing_user.is_some() {
        return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(
            body.fullname,
            body.email,
            body.phone_number,
            hashed_password,
            body.role,
            body.preferred_language,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    tracing::info!(user_id = %user.id, role = user.role.to_str(), "registered new user");

    let response = Json(UserResponseDto {
        success: true,
        message: "User registered successfully".to_string(),
        user: FilterUserDto::filter_user(&user),
    });

    Ok((StatusCode::CREATED, response))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .db_client
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let user =
        result.ok_or(HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matched = password::compare(&body.password, &user.password)
        .map_err(|_| HttpError::bad_request(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matched {
        return Err(HttpError::bad_request(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage * 60);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let response = Json(UserLoginResponseDto {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: FilterUserDto::filter_user(&user),
    });

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie.to_string().parse().unwrap());

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn get_profile(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(UserResponseDto {
        success: true,
        message: "Profile retrieved successfully".to_string(),
        user: FilterUserDto::filter_user(&auth.user),
    }))
}

pub async fn logout(
    Extension(_auth): Extension<JWTAuthMiddleware>,
) -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::minutes(-1))
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie.to_string().parse().unwrap());

    let response = Json(serde_json::json!({
        "success": true,
        "message": "Logged out successfully"
    }));

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
