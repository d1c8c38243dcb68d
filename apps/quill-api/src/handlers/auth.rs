//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::User;
use quill_core::ports::{PasswordService, TokenService};
use quill_shared::ApiResponse;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserView};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn user_view(user: &User) -> UserView {
    UserView {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Friendly duplicate check; the unique index is the real guarantee.
    let email = User::normalize_email(&req.email);
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user
    let user = User::new(req.name.trim().to_string(), &req.email, password_hash);
    let saved = state.users.insert(user).await?;

    // Generate token
    let token = token_service
        .generate_token(saved.id, &saved.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(AuthResponse {
        token,
        user: user_view(&saved),
    })))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by normalized email
    let user = state
        .users
        .find_by_email(&User::normalize_email(&req.email))
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Verify password
    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    // Generate token
    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(AuthResponse {
        token,
        user: user_view(&user),
    })))
}

/// GET /api/auth/me - the token-verification surface.
/// A valid signature is not enough: the referenced user must still exist.
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_view(&user))))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::handlers::{configure_routes, test_support};

    fn register_body(name: &str, email: &str, password: &str) -> Value {
        json!({ "name": name, "email": email, "password": password })
    }

    #[actix_web::test]
    async fn register_then_login_round_trips() {
        let (state, tokens, passwords) = test_support::app_data(test_support::test_state());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .app_data(passwords)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("Ada", "Ada@Example.com", "password123"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["email"], "ada@example.com");
        assert!(body["data"]["token"].as_str().unwrap().len() > 20);
        assert!(body["data"]["user"].get("passwordHash").is_none());

        // Login with a different email casing still matches.
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ADA@example.COM", "password": "password123" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["user"]["name"], "Ada");
    }

    #[actix_web::test]
    async fn duplicate_email_any_case_conflicts() {
        let (state, tokens, passwords) = test_support::app_data(test_support::test_state());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .app_data(passwords)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("Ada", "ada@example.com", "password123"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("Imposter", "ADA@EXAMPLE.COM", "password456"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthenticated() {
        let (state, tokens, passwords) = test_support::app_data(test_support::test_state());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .app_data(passwords)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("Ada", "ada@example.com", "password123"))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "wrong-password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn me_requires_a_token() {
        let (state, tokens, passwords) = test_support::app_data(test_support::test_state());
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(tokens)
                .app_data(passwords)
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
}
