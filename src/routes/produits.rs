use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{ImageUpload, Produit, ProduitForm, ProduitQuery},
    queries::produit_queries,
    AppState,
};

pub async fn search_produits(
    State(state): State<AppState>,
    Query(params): Query<ProduitQuery>,
) -> Result<Json<Vec<Produit>>> {
    let produits = produit_queries::search_produits(&state.db, &params).await?;

    Ok(Json(produits))
}

pub async fn create_produit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Produit>> {
    let form = read_produit_form(multipart).await?;
    let (input, upload) = form.validate()?;

    let img = match upload {
        Some(ref upload) => Some(state.media.store(upload).await?),
        None => None,
    };

    let created = match produit_queries::create_produit(&state.db, &input, img.as_deref()).await {
        Ok(produit) => produit,
        Err(e) => {
            // The record write failed, so the image written just above must
            // not be left behind.
            if let Some(ref path) = img {
                discard_media(&state, path).await;
            }
            return Err(e);
        }
    };

    Ok(Json(created))
}

pub async fn update_produit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Produit>> {
    let existing = produit_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Produit with id {} not found", id)))?;

    let form = read_produit_form(multipart).await?;
    let (input, upload) = form.validate()?;

    // Full replacement: a fresh upload supersedes the stored image, otherwise
    // the stored reference is carried over untouched.
    let new_img = match upload {
        Some(ref upload) => Some(state.media.store(upload).await?),
        None => None,
    };
    let img = new_img.as_deref().or(existing.img.as_deref());

    let updated = match produit_queries::update_produit(&state.db, id, &input, img).await {
        Ok(Some(produit)) => produit,
        Ok(None) => {
            if let Some(ref path) = new_img {
                discard_media(&state, path).await;
            }
            return Err(AppError::NotFound(format!(
                "Produit with id {} not found",
                id
            )));
        }
        Err(e) => {
            if let Some(ref path) = new_img {
                discard_media(&state, path).await;
            }
            return Err(e);
        }
    };

    // The old file stops being retrievable once it has been replaced.
    if new_img.is_some() {
        if let Some(ref old) = existing.img {
            discard_media(&state, old).await;
        }
    }

    Ok(Json(updated))
}

pub async fn delete_produit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let existing = produit_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Produit with id {} not found", id)))?;

    produit_queries::delete_produit(&state.db, id).await?;

    if let Some(ref img) = existing.img {
        discard_media(&state, img).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn read_produit_form(mut multipart: Multipart) -> Result<ProduitForm> {
    let mut form = ProduitForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(field.text().await?),
            "desc" => form.description = Some(field.text().await?),
            "price" => form.price = Some(field.text().await?),
            "quantite" => form.quantite = Some(field.text().await?),
            "img" => {
                let content_type = field.content_type().map(str::to_owned);
                let data = field.bytes().await?;

                // Browsers submit an empty part for an untouched file input.
                if !data.is_empty() {
                    form.img = Some(ImageUpload { content_type, data });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn discard_media(state: &AppState, path: &str) {
    if let Err(e) = state.media.remove(path).await {
        tracing::warn!("Failed to remove media file {}: {}", path, e);
    }
}
