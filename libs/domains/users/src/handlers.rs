//! HTTP handlers for the Auth API

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    JsonBody, JwtAuth, JwtClaims,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    jwt_auth_middleware,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, Role, User, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(RegisterRequest, LoginRequest, AuthResponse, ProfileResponse, UserResponse, Role),
        responses(
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Staff registration and login")
    )
)]
pub struct ApiDoc;

/// Shared state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: Arc<UserService<R>>,
    pub jwt_auth: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            jwt_auth: self.jwt_auth.clone(),
        }
    }
}

impl<R: UserRepository> AuthState<R> {
    pub fn new(service: UserService<R>, jwt_auth: JwtAuth) -> Self {
        Self {
            service: Arc::new(service),
            jwt_auth,
        }
    }

    fn issue(&self, user: User) -> UserResult<AuthResponse> {
        let token = self
            .jwt_auth
            .create_token(
                &user.id.to_string(),
                &user.email,
                &user.full_name(),
                &[user.role.to_string()],
            )
            .map_err(|e| {
                tracing::error!("Failed to create access token: {:?}", e);
                UserError::Internal("Failed to create token".to_string())
            })?;

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }
}

pub fn router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    let protected = Router::new()
        .route("/me", get(me::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .merge(protected)
        .with_state(state)
}

/// Register a staff account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    JsonBody(input): JsonBody<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.register(input).await?;
    Ok((StatusCode::CREATED, Json(state.issue(user)?)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> UserResult<Json<AuthResponse>> {
    let user = state.service.login(input).await?;
    Ok(Json(state.issue(user)?))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = ProfileResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Extension(claims): Extension<JwtClaims>,
) -> UserResult<Json<ProfileResponse>> {
    let id = Uuid::parse_str(&claims.sub).map_err(|_| UserError::InvalidSubject(claims.sub))?;
    let user = state.service.profile(id).await?;
    Ok(Json(ProfileResponse { user }))
}
