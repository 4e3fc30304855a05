//! Order history commands.

use clap::Subcommand;
use kiogloss_client::Storefront;
use kiogloss_core::OrderStatus;

#[derive(Subcommand)]
pub enum OrdersAction {
    /// List your orders
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 10)]
        size: u32,

        /// Only show orders with this status
        #[arg(long)]
        status: Option<String>,
    },
}

pub async fn run(
    storefront: &Storefront,
    action: OrdersAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrdersAction::List { page, size, status } => {
            let status = status.as_deref().map(OrderStatus::from);
            let listing = storefront
                .orders
                .user_orders(page, size, status.as_ref())
                .await?;
            println!(
                "page {}/{} ({} orders total)",
                listing.number + 1,
                listing.total_pages,
                listing.total_elements
            );
            for order in &listing.content {
                let date = order
                    .date
                    .map_or_else(|| "-".to_owned(), |d| d.to_string());
                println!(
                    "  #{:<6} {date:<12} {:<22} {:.2}",
                    order.id, order.status, order.amount
                );
                for item in &order.shopping {
                    println!("      {} x{} = {:.2}", item.title, item.quantity, item.line_total);
                }
            }
        }
    }
    Ok(())
}
