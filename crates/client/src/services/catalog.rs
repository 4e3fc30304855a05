//! Public catalog browsing, with a short-lived response cache.

use std::time::Duration;

use moka::future::Cache;

use crate::api::Gateway;
use crate::error::ApiError;
use crate::models::catalog::{Page, ProductDetail, ProductSummary, Tag};

const CACHE_CAPACITY: u64 = 1_000;
const CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Products {
        page: u32,
        page_size: u32,
        search: Option<String>,
    },
    Product {
        slug: String,
    },
    Tags,
}

#[derive(Clone)]
enum CacheValue {
    Products(Page<ProductSummary>),
    Product(ProductDetail),
    Tags(Vec<Tag>),
}

/// Read-only catalog endpoints.
///
/// Listings change rarely relative to how often they are browsed, so
/// responses are cached for a few minutes. Admin mutations should call
/// [`CatalogService::invalidate_cache`] to make their changes visible
/// immediately.
#[derive(Clone)]
pub struct CatalogService {
    gateway: Gateway,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogService {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// One page of published products, optionally filtered by a search term.
    pub async fn published_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<Page<ProductSummary>, ApiError> {
        let key = CacheKey::Products {
            page,
            page_size,
            search: search.map(str::to_owned),
        };
        if let Some(CacheValue::Products(hit)) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let mut query = super::paging_query(page, page_size);
        if let Some(term) = search {
            query.push(("search", term.to_owned()));
        }
        let listing: Page<ProductSummary> = self.gateway.get_with("/products", &query).await?;

        self.cache
            .insert(key, CacheValue::Products(listing.clone()))
            .await;
        Ok(listing)
    }

    /// Full detail of one published product, looked up by slug.
    pub async fn product_by_slug(&self, slug: &str) -> Result<ProductDetail, ApiError> {
        let key = CacheKey::Product {
            slug: slug.to_owned(),
        };
        if let Some(CacheValue::Product(hit)) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let detail: ProductDetail = self.gateway.get(&format!("/article/{slug}")).await?;
        self.cache
            .insert(key, CacheValue::Product(detail.clone()))
            .await;
        Ok(detail)
    }

    /// All tags, which double as the storefront's categories.
    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        if let Some(CacheValue::Tags(hit)) = self.cache.get(&CacheKey::Tags).await {
            return Ok(hit);
        }

        let tags: Vec<Tag> = self.gateway.get("/tags").await?;
        self.cache
            .insert(CacheKey::Tags, CacheValue::Tags(tags.clone()))
            .await;
        Ok(tags)
    }

    /// Drop every cached response.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
