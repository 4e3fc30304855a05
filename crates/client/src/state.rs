//! Fully wired client entry point.

use std::sync::Arc;

use crate::api::Gateway;
use crate::auth::{CredentialStore, SessionManager};
use crate::cart::CartStore;
use crate::checkout::Checkout;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::services::{
    AccountService, AdminService, CatalogService, FavoritesService, OrdersService,
};
use crate::storage::{FileStore, KeyValueStore};

/// Everything a storefront frontend needs, assembled from one config.
///
/// All parts share one gateway and one credential store, so a refresh or
/// invalidation in any call is visible everywhere at once.
pub struct Storefront {
    pub session: SessionManager,
    pub cart: CartStore,
    pub checkout: Checkout,
    pub catalog: CatalogService,
    pub orders: OrdersService,
    pub account: AccountService,
    pub favorites: FavoritesService,
    pub admin: AdminService,
}

impl Storefront {
    /// Assemble a client with file-backed persistence under
    /// `config.storage_dir`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage_dir)?);
        Ok(Self::with_storage(config, storage)?)
    }

    /// Like [`Storefront::new`] with the environment's configuration.
    pub fn from_env() -> Result<Self, ClientError> {
        let config = ClientConfig::from_env()?;
        Self::new(&config)
    }

    /// Assemble a client over an explicit storage backend.
    pub fn with_storage(
        config: &ClientConfig,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, crate::error::ApiError> {
        let credentials = Arc::new(CredentialStore::new(Arc::clone(&storage)));
        let gateway = Gateway::new(config, credentials)?;

        Ok(Self {
            session: SessionManager::new(gateway.clone()),
            cart: CartStore::new(storage),
            checkout: Checkout::new(gateway.clone()),
            catalog: CatalogService::new(gateway.clone()),
            orders: OrdersService::new(gateway.clone()),
            account: AccountService::new(gateway.clone()),
            favorites: FavoritesService::new(gateway.clone()),
            admin: AdminService::new(gateway),
        })
    }
}
