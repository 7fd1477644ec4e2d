// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        notification::notification_handler,
        payment::payment_handler,
        review::{review_handler, review_public_handler},
        users::{auth_handler, users_handler},
        wage::wage_handler,
    },
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "SkillSathi API is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let user_route = auth_handler().merge(
        users_handler().layer(middleware::from_fn(crate::middleware::auth)),
    );

    let api_route = Router::new()
        .nest("/user", user_route)
        .nest(
            "/payment",
            payment_handler().layer(middleware::from_fn(crate::middleware::auth)),
        )
        .nest(
            "/wage",
            wage_handler().layer(middleware::from_fn(crate::middleware::auth)),
        )
        .nest(
            "/review",
            review_public_handler().merge(
                review_handler().layer(middleware::from_fn(crate::middleware::auth)),
            ),
        )
        .nest(
            "/notification",
            notification_handler().layer(middleware::from_fn(crate::middleware::auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_route)
}
