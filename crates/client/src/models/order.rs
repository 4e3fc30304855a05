//! Order types: creation payloads and the order history records.

use chrono::NaiveDate;
use kiogloss_core::{AccountId, OrderId, OrderStatus, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of an order-creation request.
///
/// `price` carries the *extended* line total (unit price times quantity),
/// not the unit price; the backend records it as sent.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineRequest {
    pub product: ProductId,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Order-creation payload, submitted once per confirmed payment.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreateRequest {
    pub account: AccountId,
    pub shopping: Vec<OrderLineRequest>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: OrderStatus,
}

/// One purchased item inside an order history record.
#[derive(Debug, Clone, Deserialize)]
pub struct ShoppingItem {
    pub title: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "priceXquantity", with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

/// Buyer snapshot attached to an order record.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCustomer {
    pub name: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A recorded order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDetail {
    pub id: OrderId,
    #[serde(default)]
    pub shopping: Vec<ShoppingItem>,
    #[serde(default)]
    pub user: Option<OrderCustomer>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_create_request_shape() {
        let request = OrderCreateRequest {
            account: AccountId::new(14),
            shopping: vec![OrderLineRequest {
                product: ProductId::new(7),
                quantity: 3,
                price: Decimal::new(3750, 2), // 12.50 x 3
            }],
            amount: Decimal::new(3750, 2),
            status: OrderStatus::AwaitingFulfillment,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["account"], serde_json::json!(14));
        assert_eq!(json["amount"], serde_json::json!(37.5));
        assert_eq!(json["status"], serde_json::json!("awaiting fulfillment"));
        assert_eq!(json["shopping"][0]["price"], serde_json::json!(37.5));
    }

    #[test]
    fn test_order_detail_deserialize() {
        let json = r#"{
            "id": 21,
            "shopping": [{
                "title": "Rose Gloss",
                "price": "12.50",
                "quantity": 2,
                "size": "5ml",
                "color": "rose",
                "priceXquantity": 25.0
            }],
            "user": {"name": "Kio", "phoneNumber": null, "address": "somewhere"},
            "amount": 25.0,
            "date": "2026-08-01",
            "status": "shipped"
        }"#;
        let order: OrderDetail = serde_json::from_str(json).expect("deserialize");
        assert_eq!(order.id, OrderId::new(21));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2026, 8, 1));
        let item = order.shopping.first().expect("one item");
        assert_eq!(item.line_total, Decimal::new(25, 0));
    }
}
