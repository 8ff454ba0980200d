//! Seed the catalog from a YAML file.
//!
//! The catalog file declares brands, categories, and products; products
//! reference brands and categories by name. The original catalog lived as
//! per-product JSON descriptors on disk; this command is the batch
//! equivalent for the relational store.
//!
//! # File format
//!
//! ```yaml
//! brands:
//!   - name: Loreak
//!     logo_url: https://cdn.ponsiv.app/logos/loreak.png
//! categories:
//!   - name: Outerwear
//!     icon_name: jacket
//! products:
//!   - title: Wool Coat
//!     brand: Loreak
//!     category: Outerwear
//!     price: "129.00"
//!     image_url: https://cdn.ponsiv.app/p/wool-coat.jpg
//!     sizes: [S, M, L]
//!     stock: 4
//! ```

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use ponsiv_core::CurrencyCode;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A brand entry in the catalog file.
#[derive(Debug, Deserialize)]
struct SeedBrand {
    name: String,
    logo_url: Option<String>,
    #[serde(default = "default_true")]
    is_active: bool,
}

/// A category entry in the catalog file.
#[derive(Debug, Deserialize)]
struct SeedCategory {
    name: String,
    icon_name: Option<String>,
}

/// A product entry in the catalog file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    title: String,
    brand: String,
    category: Option<String>,
    description: Option<String>,
    price: Decimal,
    #[serde(default = "default_currency")]
    currency: String,
    image_url: String,
    #[serde(default)]
    gallery_urls: Vec<String>,
    #[serde(default)]
    sizes: Vec<String>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    stock: i32,
    #[serde(default = "default_true")]
    is_active: bool,
}

/// The whole catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    brands: Vec<SeedBrand>,
    #[serde(default)]
    categories: Vec<SeedCategory>,
    #[serde(default)]
    products: Vec<SeedProduct>,
}

const fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "EUR".to_owned()
}

/// Validate the parsed catalog before touching the database.
fn validate(catalog: &CatalogFile) -> Vec<String> {
    let mut errors = Vec::new();

    let brand_names: Vec<&str> = catalog.brands.iter().map(|b| b.name.as_str()).collect();
    let category_names: Vec<&str> = catalog.categories.iter().map(|c| c.name.as_str()).collect();

    for product in &catalog.products {
        if !brand_names.contains(&product.brand.as_str()) {
            errors.push(format!(
                "product '{}' references unknown brand '{}'",
                product.title, product.brand
            ));
        }
        if let Some(category) = &product.category
            && !category_names.contains(&category.as_str())
        {
            errors.push(format!(
                "product '{}' references unknown category '{category}'",
                product.title
            ));
        }
        if product.price < Decimal::ZERO {
            errors.push(format!("product '{}' has a negative price", product.title));
        }
        if product.currency.parse::<CurrencyCode>().is_err() {
            errors.push(format!(
                "product '{}' has unsupported currency '{}'",
                product.title, product.currency
            ));
        }
    }

    errors
}

/// Serialize a string list for a TEXT column; empty lists stay NULL.
fn list_column(values: &[String]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    serde_json::to_string(values).ok()
}

/// Seed the catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `clear_existing` - If true, delete the existing catalog first
///
/// # Errors
///
/// Returns `SeedError` if the file is missing or malformed, validation
/// fails, or a database operation fails.
pub async fn catalog(file_path: &str, clear_existing: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("PONSIV_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("PONSIV_DATABASE_URL"))?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    let errors = validate(&catalog);
    if !errors.is_empty() {
        for err in &errors {
            tracing::error!("  - {err}");
        }
        return Err(SeedError::Invalid(format!(
            "{} validation errors found",
            errors.len()
        )));
    }

    info!(
        brands = catalog.brands.len(),
        categories = catalog.categories.len(),
        products = catalog.products.len(),
        "Catalog validated"
    );

    let pool = PgPool::connect(&database_url).await?;
    info!("Connected to database");

    let mut tx = pool.begin().await?;

    if clear_existing {
        info!("Clearing existing catalog");
        sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM brands").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM categories").execute(&mut *tx).await?;
    }

    let brand_ids = insert_brands(&mut tx, &catalog.brands).await?;
    let category_ids = insert_categories(&mut tx, &catalog.categories).await?;

    let mut inserted = 0_usize;
    for product in &catalog.products {
        let brand_id = brand_ids.get(product.brand.as_str()).copied();
        let category_id = product
            .category
            .as_deref()
            .and_then(|c| category_ids.get(c).copied());

        sqlx::query(
            r"
            INSERT INTO products (
                brand_id, category_id, title, description, price, currency,
                image_url, gallery_urls, sizes, colors, stock, is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(brand_id)
        .bind(category_id)
        .bind(&product.title)
        .bind(product.description.as_deref())
        .bind(product.price)
        .bind(&product.currency)
        .bind(&product.image_url)
        .bind(list_column(&product.gallery_urls))
        .bind(list_column(&product.sizes))
        .bind(list_column(&product.colors))
        .bind(product.stock)
        .bind(product.is_active)
        .execute(&mut *tx)
        .await?;
        inserted += 1;
    }

    tx.commit().await?;

    info!("Seeding complete!");
    info!("  Brands: {}", brand_ids.len());
    info!("  Categories: {}", category_ids.len());
    info!("  Products: {inserted}");

    Ok(())
}

async fn insert_brands(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    brands: &[SeedBrand],
) -> Result<HashMap<String, i32>, SeedError> {
    let mut ids = HashMap::with_capacity(brands.len());
    for brand in brands {
        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO brands (name, logo_url, is_active)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(&brand.name)
        .bind(brand.logo_url.as_deref())
        .bind(brand.is_active)
        .fetch_one(&mut **tx)
        .await?;
        ids.insert(brand.name.clone(), id);
    }
    Ok(ids)
}

async fn insert_categories(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    categories: &[SeedCategory],
) -> Result<HashMap<String, i32>, SeedError> {
    let mut ids = HashMap::with_capacity(categories.len());
    for category in categories {
        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO categories (name, icon_name)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(&category.name)
        .bind(category.icon_name.as_deref())
        .fetch_one(&mut **tx)
        .await?;
        ids.insert(category.name.clone(), id);
    }
    Ok(ids)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
brands:
  - name: Loreak
    logo_url: https://cdn.ponsiv.app/logos/loreak.png
categories:
  - name: Outerwear
    icon_name: jacket
products:
  - title: Wool Coat
    brand: Loreak
    category: Outerwear
    price: "129.00"
    image_url: https://cdn.ponsiv.app/p/wool-coat.jpg
    sizes: [S, M, L]
    stock: 4
"#;

    #[test]
    fn parses_sample_catalog() {
        let catalog: CatalogFile = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(catalog.brands.len(), 1);
        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.products[0].price, Decimal::new(12900, 2));
        assert!(catalog.products[0].is_active);
        assert!(validate(&catalog).is_empty());
    }

    #[test]
    fn unknown_brand_fails_validation() {
        let catalog: CatalogFile =
            serde_yaml::from_str(&SAMPLE.replace("brand: Loreak", "brand: Nobody")).unwrap();
        let errors = validate(&catalog);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("unknown brand"));
    }

    #[test]
    fn empty_size_list_stays_null() {
        assert_eq!(list_column(&[]), None);
        assert_eq!(
            list_column(&["S".to_owned()]).as_deref(),
            Some(r#"["S"]"#)
        );
    }
}
