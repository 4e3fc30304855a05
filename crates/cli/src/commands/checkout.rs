//! Record an order for an already-captured payment.
//!
//! Payment capture itself happens with the provider, outside this tool;
//! this command submits the resulting order.

use kiogloss_client::{PaymentConfirmation, Storefront};
use rust_decimal::Decimal;

pub async fn run(
    storefront: &Storefront,
    capture_id: String,
    amount: Decimal,
) -> Result<(), Box<dyn std::error::Error>> {
    let confirmation = PaymentConfirmation { capture_id, amount };
    let order = storefront
        .checkout
        .complete(
            storefront.session.account_id(),
            &storefront.cart,
            &confirmation,
        )
        .await?;
    println!("order #{} recorded ({}, {:.2})", order.id, order.status, order.amount);
    Ok(())
}
