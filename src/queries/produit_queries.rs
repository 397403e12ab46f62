use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::Result,
    models::{Produit, ProduitInput, ProduitQuery},
};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Produit>> {
    let produit = sqlx::query_as::<_, Produit>("SELECT * FROM produits WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(produit)
}

/// Name filter is a case-insensitive substring match; rows come back in id
/// order so repeated listings are stable.
pub async fn search_produits(pool: &SqlitePool, params: &ProduitQuery) -> Result<Vec<Produit>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM produits WHERE 1=1");

    if let Some(ref name) = params.name {
        if !name.is_empty() {
            query.push(" AND name LIKE ");
            query.push_bind(format!("%{}%", name));
        }
    }

    query.push(" ORDER BY id ASC");

    let produits = query.build_query_as::<Produit>().fetch_all(pool).await?;

    Ok(produits)
}

pub async fn create_produit(
    pool: &SqlitePool,
    input: &ProduitInput,
    img: Option<&str>,
) -> Result<Produit> {
    let produit = sqlx::query_as::<_, Produit>(
        "INSERT INTO produits (name, description, price, quantite, img)
         VALUES (?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.price)
    .bind(input.quantite)
    .bind(img)
    .fetch_one(pool)
    .await?;

    Ok(produit)
}

pub async fn update_produit(
    pool: &SqlitePool,
    id: i64,
    input: &ProduitInput,
    img: Option<&str>,
) -> Result<Option<Produit>> {
    let produit = sqlx::query_as::<_, Produit>(
        "UPDATE produits
         SET name = ?, description = ?, price = ?, quantite = ?, img = ?
         WHERE id = ?
         RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.price)
    .bind(input.quantite)
    .bind(img)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(produit)
}

pub async fn delete_produit(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM produits WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
