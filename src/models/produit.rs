use axum::body::Bytes;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Catalogue record as stored and as serialized on the wire.
///
/// The JSON field `desc` keeps the name the client screen expects while the
/// column stays `description`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Produit {
    pub id: i64,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub price: String,
    pub img: Option<String>,
    pub quantite: i64,
}

#[derive(Debug, Deserialize)]
pub struct ProduitQuery {
    pub name: Option<String>,
}

/// Raw image part of a multipart submission, before it is written to disk.
#[derive(Debug)]
pub struct ImageUpload {
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Multipart fields as received, every one optional until validation.
#[derive(Debug, Default)]
pub struct ProduitForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub quantite: Option<String>,
    pub img: Option<ImageUpload>,
}

/// Fully validated field set for a create or full-replacement update.
#[derive(Debug)]
pub struct ProduitInput {
    pub name: String,
    pub description: String,
    pub price: String,
    pub quantite: i64,
}

impl ProduitForm {
    pub fn validate(self) -> Result<(ProduitInput, Option<ImageUpload>)> {
        let Some(name) = self.name.filter(|v| !v.trim().is_empty()) else {
            return Err(AppError::BadRequest("name is required".to_string()));
        };

        let Some(description) = self.description else {
            return Err(AppError::BadRequest("desc is required".to_string()));
        };

        let Some(price) = self.price.filter(|v| !v.trim().is_empty()) else {
            return Err(AppError::BadRequest("price is required".to_string()));
        };

        if price.trim().parse::<Decimal>().is_err() {
            return Err(AppError::BadRequest(
                "price must be a decimal number".to_string(),
            ));
        }

        let Some(quantite) = self.quantite.filter(|v| !v.trim().is_empty()) else {
            return Err(AppError::BadRequest("quantite is required".to_string()));
        };

        let quantite: i64 = quantite.trim().parse().map_err(|_| {
            AppError::BadRequest("quantite must be an integer".to_string())
        })?;

        if quantite < 0 {
            return Err(AppError::BadRequest(
                "quantite must not be negative".to_string(),
            ));
        }

        Ok((
            ProduitInput {
                name,
                description,
                price,
                quantite,
            },
            self.img,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProduitForm {
        ProduitForm {
            name: Some("Widget".to_string()),
            description: Some("A widget".to_string()),
            price: Some("9.99".to_string()),
            quantite: Some("5".to_string()),
            img: None,
        }
    }

    #[test]
    fn accepts_complete_form() {
        let (input, img) = form().validate().unwrap();
        assert_eq!(input.name, "Widget");
        assert_eq!(input.description, "A widget");
        assert_eq!(input.price, "9.99");
        assert_eq!(input.quantite, 5);
        assert!(img.is_none());
    }

    #[test]
    fn rejects_missing_name() {
        let mut f = form();
        f.name = None;
        let err = f.validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("name")));
    }

    #[test]
    fn rejects_blank_name() {
        let mut f = form();
        f.name = Some("   ".to_string());
        assert!(f.validate().is_err());
    }

    #[test]
    fn rejects_non_decimal_price() {
        let mut f = form();
        f.price = Some("cheap".to_string());
        let err = f.validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("price")));
    }

    #[test]
    fn rejects_negative_quantite() {
        let mut f = form();
        f.quantite = Some("-1".to_string());
        let err = f.validate().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("quantite")));
    }

    #[test]
    fn rejects_fractional_quantite() {
        let mut f = form();
        f.quantite = Some("2.5".to_string());
        assert!(f.validate().is_err());
    }

    #[test]
    fn allows_empty_description_value() {
        let mut f = form();
        f.description = Some(String::new());
        let (input, _) = f.validate().unwrap();
        assert_eq!(input.description, "");
    }

    #[test]
    fn serializes_description_as_desc() {
        let produit = Produit {
            id: 1,
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: "9.99".to_string(),
            img: None,
            quantite: 5,
        };

        let value = serde_json::to_value(&produit).unwrap();
        assert_eq!(value["desc"], "A widget");
        assert!(value.get("description").is_none());
        assert_eq!(value["img"], serde_json::Value::Null);
    }
}
