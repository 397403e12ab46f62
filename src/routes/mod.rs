mod health;
mod produits;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/produits/", get(produits::search_produits))
        .route("/produits/add/", post(produits::create_produit))
        .route("/produits/update/{id}/", put(produits::update_produit))
        .route("/produits/delete/{id}/", delete(produits::delete_produit))
}
