//! Checkout orchestration: turn a confirmed payment and the local cart into
//! a recorded order.
//!
//! Checkout runs strictly after payment capture. If order recording fails
//! the cart is left untouched so the shopper can retry; the captured payment
//! id travels in the error for support reconciliation.

use rust_decimal::Decimal;
use thiserror::Error;

use kiogloss_core::{AccountId, OrderStatus};

use crate::api::Gateway;
use crate::cart::CartStore;
use crate::error::ApiError;
use crate::models::order::{OrderCreateRequest, OrderDetail, OrderLineRequest};

/// Proof of a captured payment, supplied by the payment provider's
/// approval callback.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    /// Provider-side capture id, kept for reconciliation.
    pub capture_id: String,
    /// Amount the provider captured.
    pub amount: Decimal,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order. Checked before any network traffic.
    #[error("the cart is empty")]
    EmptyCart,

    /// The session has no enriched account id to bill the order to.
    #[error("no account is available for this order")]
    MissingAccount,

    /// Payment was captured but the backend did not record the order.
    /// The cart is preserved; `capture_id` identifies the stranded payment.
    #[error("payment {capture_id} captured but order recording failed: {source}")]
    Reconciliation {
        capture_id: String,
        #[source]
        source: ApiError,
    },
}

/// Submits confirmed purchases as backend orders.
#[derive(Clone)]
pub struct Checkout {
    gateway: Gateway,
}

impl Checkout {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Record the order for a captured payment, then clear the cart.
    ///
    /// Each submitted line carries its extended total, and the order amount
    /// is the cart total. New orders always start as
    /// [`OrderStatus::AwaitingFulfillment`]; fulfillment state belongs to
    /// the backend.
    pub async fn complete(
        &self,
        account: Option<AccountId>,
        cart: &CartStore,
        confirmation: &PaymentConfirmation,
    ) -> Result<OrderDetail, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let Some(account) = account else {
            return Err(CheckoutError::MissingAccount);
        };

        let lines = cart.lines();
        let request = OrderCreateRequest {
            account,
            shopping: lines
                .iter()
                .map(|line| OrderLineRequest {
                    product: line.product_id,
                    quantity: line.quantity,
                    price: line.line_total(),
                })
                .collect(),
            amount: cart.total(),
            status: OrderStatus::AwaitingFulfillment,
        };

        tracing::info!(
            capture_id = %confirmation.capture_id,
            captured = %confirmation.amount,
            lines = request.shopping.len(),
            "recording order"
        );

        let order: OrderDetail = self
            .gateway
            .post("/user/order", &request)
            .await
            .map_err(|source| CheckoutError::Reconciliation {
                capture_id: confirmation.capture_id.clone(),
                source,
            })?;

        cart.clear();
        Ok(order)
    }
}
