//! Account favorites: list, add, remove.
//!
//! Favorites are keyed two ways: products are *added* by product id, but
//! *removed* by the favorite record id the backend assigned, so the listing
//! carries both through [`FavoriteRef`].

use kiogloss_core::{AccountId, FavoriteId, ProductId};

use crate::api::Gateway;
use crate::error::ApiError;
use crate::models::account::{AccountFavorites, AccountFavoritesResponse, FavoriteAddRequest};

#[derive(Clone)]
pub struct FavoritesService {
    gateway: Gateway,
}

impl FavoritesService {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The account's favorites, with the record refs needed for removal.
    pub async fn account_favorites(
        &self,
        account: AccountId,
    ) -> Result<AccountFavorites, ApiError> {
        let response: AccountFavoritesResponse = self
            .gateway
            .get(&format!("/user/account/account_favorites/{account}"))
            .await?;
        Ok(response.account)
    }

    /// Add a product to the account's favorites.
    pub async fn add(&self, account: AccountId, product: ProductId) -> Result<(), ApiError> {
        self.gateway
            .post_unit("/user/favorite", &FavoriteAddRequest { account, product })
            .await
    }

    /// Remove a favorite by its record id.
    pub async fn remove(&self, favorite: FavoriteId) -> Result<(), ApiError> {
        self.gateway
            .delete_unit(&format!("/user/delete/{favorite}"))
            .await
    }

    /// Resolve the favorite record id for `product`, if it is favorited.
    #[must_use]
    pub fn record_for(favorites: &AccountFavorites, product: ProductId) -> Option<FavoriteId> {
        favorites
            .refs
            .iter()
            .find(|r| r.product == product)
            .map(|r| r.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::FavoriteRef;

    #[test]
    fn test_record_for_resolves_by_product() {
        let favorites = AccountFavorites {
            id: AccountId::new(14),
            refs: vec![
                FavoriteRef {
                    id: FavoriteId::new(100),
                    product: ProductId::new(7),
                },
                FavoriteRef {
                    id: FavoriteId::new(101),
                    product: ProductId::new(9),
                },
            ],
            favorite: Default::default(),
            address: None,
        };

        assert_eq!(
            FavoritesService::record_for(&favorites, ProductId::new(9)),
            Some(FavoriteId::new(101))
        );
        assert_eq!(
            FavoritesService::record_for(&favorites, ProductId::new(8)),
            None
        );
    }
}
