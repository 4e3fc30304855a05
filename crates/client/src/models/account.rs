//! Account types: registration, user detail, and favorites.

use kiogloss_core::{AccountId, Email, FavoriteId, Price, ProductId, UserId};
use serde::{Deserialize, Serialize};

use super::catalog::ProductSummary;

// =============================================================================
// Authentication requests
// =============================================================================

/// Login form payload.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: Email,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration payload. The backend signs the new user in and answers with
/// a credential pair, exactly like login.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub email: Email,
    pub name: String,
    pub password: String,
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(rename = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountCreate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Optional account settings supplied at registration.
#[derive(Debug, Clone, Serialize, Default)]
pub struct AccountCreate {
    #[serde(rename = "pointsPerPurchase", skip_serializing_if = "Option::is_none")]
    pub points_per_purchase: Option<i64>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Shipping address.
#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub street: String,
    #[serde(rename = "streetNumber")]
    pub street_number: String,
    // The backend's field is spelled "distric" on the wire.
    #[serde(rename = "distric")]
    pub district: String,
}

/// Partial profile update; unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Default)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(rename = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

// =============================================================================
// User detail
// =============================================================================

/// Extended user record, fetched by subject id after login to resolve the
/// account linkage.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetail {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(rename = "profileImage", default)]
    pub profile_image: Option<String>,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    pub account: AccountInfo,
}

/// The account nested inside [`UserDetail`]. Its `id` is the account id
/// orders and favorites are keyed by, distinct from the user id.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub id: AccountId,
    #[serde(default)]
    pub favorite: Vec<ProductSummary>,
    #[serde(rename = "pointsPerPurchase", default)]
    pub points_per_purchase: i64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

// =============================================================================
// Favorites
// =============================================================================

/// A favorited product as listed for an account.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub slug: String,
    pub image: String,
}

/// Links a favorite record to its product. Removal is keyed by the favorite
/// record id, not the product id.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FavoriteRef {
    pub id: FavoriteId,
    pub product: ProductId,
}

/// The backend sends either the product list or a placeholder string when
/// the account has no favorites.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FavoriteList {
    Products(Vec<FavoriteProduct>),
    Placeholder(String),
}

impl FavoriteList {
    /// The favorited products, empty when the backend sent a placeholder.
    #[must_use]
    pub fn products(&self) -> &[FavoriteProduct] {
        match self {
            Self::Products(products) => products,
            Self::Placeholder(_) => &[],
        }
    }
}

impl Default for FavoriteList {
    fn default() -> Self {
        Self::Products(Vec::new())
    }
}

/// Favorites listing for one account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountFavorites {
    pub id: AccountId,
    #[serde(rename = "favoriteID", default)]
    pub refs: Vec<FavoriteRef>,
    #[serde(default)]
    pub favorite: FavoriteList,
    #[serde(default)]
    pub address: Option<String>,
}

/// Envelope around [`AccountFavorites`].
#[derive(Debug, Clone, Deserialize)]
pub struct AccountFavoritesResponse {
    pub account: AccountFavorites,
}

/// Payload adding a product to an account's favorites.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FavoriteAddRequest {
    pub account: AccountId,
    pub product: ProductId,
}
