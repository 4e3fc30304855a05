//! Order history for the signed-in user.

use kiogloss_core::OrderStatus;

use crate::api::Gateway;
use crate::error::ApiError;
use crate::models::catalog::Page;
use crate::models::order::OrderDetail;

#[derive(Clone)]
pub struct OrdersService {
    gateway: Gateway,
}

impl OrdersService {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// One page of the user's orders, newest first, optionally narrowed to
    /// a single status.
    pub async fn user_orders(
        &self,
        page: u32,
        page_size: u32,
        status: Option<&OrderStatus>,
    ) -> Result<Page<OrderDetail>, ApiError> {
        let mut query = super::paging_query(page, page_size);
        if let Some(status) = status {
            query.push(("statusOrder", status.to_string()));
        }
        self.gateway.get_with("/user/orders", &query).await
    }
}
