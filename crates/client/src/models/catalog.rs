//! Catalog types: public product listings and the admin management payloads.

use base64::Engine as _;
use kiogloss_core::{ColorId, ImageId, Price, ProductId, SizeId, TagId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Paging
// =============================================================================

/// One page of a paged backend listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Total number of pages for the query.
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    /// Total number of items across all pages.
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
    /// Zero-based index of this page.
    pub number: u32,
    /// Requested page size.
    pub size: u32,
}

impl<T> Page<T> {
    /// Whether a page after this one exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }
}

// =============================================================================
// Public catalog
// =============================================================================

/// Published product as it appears in the public listing.
///
/// This is the snapshot the cart store captures when a product is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub image: String,
    pub title: String,
    pub slug: String,
    /// Size option names, first entry is the default variant.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Color option names, first entry is the default variant.
    #[serde(default)]
    pub colors: Vec<String>,
    pub price: Price,
    pub stock: i64,
}

/// Full public product detail, fetched by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductId,
    #[serde(default)]
    pub images: Vec<String>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub price: Price,
    pub stock: i64,
}

/// Product tag (used as the storefront's category).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    #[serde(rename = "imageURL", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Size option managed in the admin console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
}

/// Color option managed in the admin console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
}

/// A stored product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ImageId,
    pub url: String,
}

// =============================================================================
// Admin catalog
// =============================================================================

/// Draft/published lifecycle state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Published,
}

/// Product as seen by the admin console (includes drafts and relations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub description: String,
    pub slug: String,
    pub stock: i64,
    pub status: ProductStatus,
    /// Publication timestamp string as reported by the backend.
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCreateRequest {
    pub title: String,
    /// Sent as a JSON number; the backend parses its decimal from it.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub slug: String,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(rename = "sizeIds", skip_serializing_if = "Option::is_none")]
    pub size_ids: Option<Vec<SizeId>>,
    #[serde(rename = "colorIds", skip_serializing_if = "Option::is_none")]
    pub color_ids: Option<Vec<ColorId>>,
    #[serde(rename = "tagIds", skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<TagId>>,
}

/// Partial update for a product; unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ProductUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(rename = "sizeIds", skip_serializing_if = "Option::is_none")]
    pub size_ids: Option<Vec<SizeId>>,
    #[serde(rename = "colorIds", skip_serializing_if = "Option::is_none")]
    pub color_ids: Option<Vec<ColorId>>,
    #[serde(rename = "tagIds", skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<TagId>>,
}

/// Base64-encoded image upload bound to a product.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUploadRequest {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    #[serde(rename = "imageBase64")]
    pub image_base64: String,
}

impl ImageUploadRequest {
    /// Encode raw image bytes into an upload payload.
    #[must_use]
    pub fn from_bytes(product_id: ProductId, bytes: &[u8]) -> Self {
        Self {
            product_id,
            image_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Payload for creating a tag.
#[derive(Debug, Clone, Serialize)]
pub struct TagCreateRequest {
    pub name: String,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial update for a tag.
#[derive(Debug, Clone, Serialize, Default)]
pub struct TagUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
