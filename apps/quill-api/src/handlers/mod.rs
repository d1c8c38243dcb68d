//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod health;
mod posts;
mod uploads;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Category routes
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::put().to(categories::update))
                    .route("/{id}", web::delete().to(categories::remove)),
            )
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::remove))
                    .route("/{id}/comments", web::post().to(posts::add_comment)),
            )
            // Media uploads
            .route("/uploads", web::post().to(uploads::upload)),
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared scaffolding for handler tests: an app over in-memory
    //! repositories with a deterministic token service.

    use std::sync::Arc;

    use actix_web::web;

    use quill_core::ports::{PasswordService, TokenService};
    use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

    use crate::state::AppState;

    pub fn test_state() -> AppState {
        AppState::in_memory()
    }

    pub fn token_service() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "handler-test-secret".to_string(),
            expiration_days: 7,
            issuer: "quill-test".to_string(),
        }))
    }

    pub fn password_service() -> Arc<dyn PasswordService> {
        Arc::new(Argon2PasswordService::new())
    }

    /// App data shared by every handler test.
    pub fn app_data(
        state: AppState,
    ) -> (
        web::Data<AppState>,
        web::Data<Arc<dyn TokenService>>,
        web::Data<Arc<dyn PasswordService>>,
    ) {
        (
            web::Data::new(state),
            web::Data::new(token_service()),
            web::Data::new(password_service()),
        )
    }
}
