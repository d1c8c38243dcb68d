//! Category registry handlers.
//!
//! Any authenticated user may mutate any category - categories have no
//! ownership model.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Category;
use quill_shared::ApiResponse;
use quill_shared::dto::{CategoryRequest, CategoryView};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn category_view(category: &Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name.clone(),
    }
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;
    let views: Vec<CategoryView> = categories.iter().map(category_view).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views)))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = Category::new(&body.name)?;

    // Friendly duplicate check; the unique index on the normalized name is
    // the real guarantee under concurrency.
    if state
        .categories
        .find_by_normalized(&category.name_norm)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Category already exists".to_string()));
    }

    let saved = state.categories.insert(category).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(category_view(&saved))))
}

/// PUT /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let mut category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    category.rename(&body.name)?;

    if let Some(existing) = state
        .categories
        .find_by_normalized(&category.name_norm)
        .await?
    {
        if existing.id != id {
            return Err(AppError::Conflict("Category already exists".to_string()));
        }
    }

    let saved = state.categories.update(category).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category_view(&saved))))
}

/// DELETE /api/categories/{id}
/// Referencing posts are not deleted; their category reference is cleared
/// by the storage layer.
pub async fn remove(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    state.categories.delete(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category_view(&category))))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::handlers::{configure_routes, test_support};

    macro_rules! test_app {
        () => {{
            let (state, tokens, passwords) = test_support::app_data(test_support::test_state());
            test::init_service(
                App::new()
                    .app_data(state)
                    .app_data(tokens)
                    .app_data(passwords)
                    .configure(configure_routes),
            )
            .await
        }};
    }

    /// Register a fresh user and hand back its bearer header value.
    macro_rules! bearer {
        ($app:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(json!({
                    "name": "Ada",
                    "email": format!("{}@example.com", uuid::Uuid::new_v4()),
                    "password": "password123"
                }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            format!("Bearer {}", body["data"]["token"].as_str().unwrap())
        }};
    }

    #[actix_web::test]
    async fn create_requires_auth() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/categories")
            .set_json(json!({ "name": "Tech" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn case_variant_duplicate_is_rejected() {
        let app = test_app!();
        let token = bearer!(app);

        let req = test::TestRequest::post()
            .uri("/api/categories")
            .insert_header(("Authorization", token.clone()))
            .set_json(json!({ "name": "Tech" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::post()
            .uri("/api/categories")
            .insert_header(("Authorization", token))
            .set_json(json!({ "name": "tECH" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn blank_name_is_bad_input() {
        let app = test_app!();
        let token = bearer!(app);

        let req = test::TestRequest::post()
            .uri("/api/categories")
            .insert_header(("Authorization", token))
            .set_json(json!({ "name": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn any_authenticated_user_may_mutate() {
        let app = test_app!();
        let creator = bearer!(app);
        let other = bearer!(app);

        let req = test::TestRequest::post()
            .uri("/api/categories")
            .insert_header(("Authorization", creator))
            .set_json(json!({ "name": "Tech" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        // A different user renames and deletes it - allowed by design.
        let req = test::TestRequest::put()
            .uri(&format!("/api/categories/{id}"))
            .insert_header(("Authorization", other.clone()))
            .set_json(json!({ "name": "Science" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/categories/{id}"))
            .insert_header(("Authorization", other))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn list_is_sorted_by_name() {
        let app = test_app!();
        let token = bearer!(app);

        for name in ["Zebra", "alpha", "Middle"] {
            let req = test::TestRequest::post()
                .uri("/api/categories")
                .insert_header(("Authorization", token.clone()))
                .set_json(json!({ "name": name }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/categories").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["alpha", "Middle", "Zebra"]);
    }
}
