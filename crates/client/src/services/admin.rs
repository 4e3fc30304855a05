//! Admin console endpoints: product, image, tag, size, and color management.
//!
//! Every route here requires the `ROLE_ADMIN` role; the backend enforces it
//! and the gateway's refresh discipline applies as usual.

use kiogloss_core::{ColorId, ImageId, ProductId, SizeId, TagId};
use serde::Serialize;

use crate::api::Gateway;
use crate::error::ApiError;
use crate::models::catalog::{
    AdminProduct, Color, ImageUploadRequest, Page, ProductCreateRequest, ProductImage,
    ProductUpdateRequest, Size, Tag, TagCreateRequest, TagUpdateRequest,
};

/// Name-only payload for size and color creation and renames.
#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Clone)]
pub struct AdminService {
    gateway: Gateway,
}

impl AdminService {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// One page of all products, drafts included.
    pub async fn products(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Page<AdminProduct>, ApiError> {
        let query = super::paging_query(page, page_size);
        self.gateway.get_with("/admin/products", &query).await
    }

    pub async fn product(&self, product: ProductId) -> Result<AdminProduct, ApiError> {
        self.gateway.get(&format!("/admin/products/{product}")).await
    }

    pub async fn create_product(
        &self,
        request: &ProductCreateRequest,
    ) -> Result<AdminProduct, ApiError> {
        self.gateway.post("/admin/products", request).await
    }

    pub async fn update_product(
        &self,
        product: ProductId,
        request: &ProductUpdateRequest,
    ) -> Result<AdminProduct, ApiError> {
        self.gateway
            .put(&format!("/admin/products/{product}"), request)
            .await
    }

    pub async fn delete_product(&self, product: ProductId) -> Result<(), ApiError> {
        self.gateway
            .delete_unit(&format!("/admin/products/{product}"))
            .await
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Upload an image for a product, base64-encoded in the payload.
    pub async fn upload_image(
        &self,
        request: &ImageUploadRequest,
    ) -> Result<ProductImage, ApiError> {
        self.gateway.post("/admin/products/images", request).await
    }

    pub async fn delete_image(&self, image: ImageId) -> Result<(), ApiError> {
        self.gateway
            .delete_unit(&format!("/admin/products/images/{image}"))
            .await
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.gateway.get("/admin/tags").await
    }

    pub async fn create_tag(&self, request: &TagCreateRequest) -> Result<Tag, ApiError> {
        self.gateway.post("/admin/tags", request).await
    }

    pub async fn update_tag(
        &self,
        tag: TagId,
        request: &TagUpdateRequest,
    ) -> Result<Tag, ApiError> {
        self.gateway.put(&format!("/admin/tags/{tag}"), request).await
    }

    pub async fn delete_tag(&self, tag: TagId) -> Result<(), ApiError> {
        self.gateway.delete_unit(&format!("/admin/tags/{tag}")).await
    }

    // ------------------------------------------------------------------
    // Sizes and colors
    // ------------------------------------------------------------------

    pub async fn sizes(&self) -> Result<Vec<Size>, ApiError> {
        self.gateway.get("/admin/sizes").await
    }

    pub async fn create_size(&self, name: &str) -> Result<Size, ApiError> {
        self.gateway.post("/admin/sizes", &NameBody { name }).await
    }

    pub async fn update_size(&self, size: SizeId, name: &str) -> Result<Size, ApiError> {
        self.gateway
            .put(&format!("/admin/sizes/{size}"), &NameBody { name })
            .await
    }

    pub async fn delete_size(&self, size: SizeId) -> Result<(), ApiError> {
        self.gateway.delete_unit(&format!("/admin/sizes/{size}")).await
    }

    pub async fn colors(&self) -> Result<Vec<Color>, ApiError> {
        self.gateway.get("/admin/colors").await
    }

    pub async fn create_color(&self, name: &str) -> Result<Color, ApiError> {
        self.gateway.post("/admin/colors", &NameBody { name }).await
    }

    pub async fn update_color(&self, color: ColorId, name: &str) -> Result<Color, ApiError> {
        self.gateway
            .put(&format!("/admin/colors/{color}"), &NameBody { name })
            .await
    }

    pub async fn delete_color(&self, color: ColorId) -> Result<(), ApiError> {
        self.gateway
            .delete_unit(&format!("/admin/colors/{color}"))
            .await
    }
}
