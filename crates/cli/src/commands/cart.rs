//! Local cart commands.

use clap::Subcommand;
use kiogloss_client::Storefront;
use kiogloss_client::models::catalog::ProductSummary;
use kiogloss_core::ProductId;

#[derive(Subcommand)]
pub enum CartAction {
    /// Add a product by slug
    Add {
        /// Product slug
        slug: String,

        /// Quantity
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Size variant (defaults to the product's first size)
        #[arg(long)]
        size: Option<String>,

        /// Color variant (defaults to the product's first color)
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove every line of a product
    Remove {
        /// Product id
        product: i64,
    },
    /// Set the quantity of a product's lines
    SetQuantity {
        /// Product id
        product: i64,

        /// New quantity; zero removes the lines
        quantity: i64,
    },
    /// Show the cart
    Show,
    /// Empty the cart
    Clear,
}

pub async fn run(
    storefront: &Storefront,
    action: CartAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CartAction::Add {
            slug,
            quantity,
            size,
            color,
        } => {
            let Some(product) = find_by_slug(storefront, &slug).await? else {
                return Err(format!("no published product with slug {slug}").into());
            };
            storefront.cart.add_item(&product, quantity, size, color);
            println!("added {quantity} x {}", product.title);
        }
        CartAction::Remove { product } => {
            storefront.cart.remove_item(ProductId::new(product));
            println!("removed product {product}");
        }
        CartAction::SetQuantity { product, quantity } => {
            storefront
                .cart
                .update_quantity(ProductId::new(product), quantity);
            println!("updated product {product}");
        }
        CartAction::Show => {
            if storefront.cart.is_empty() {
                println!("cart is empty");
                return Ok(());
            }
            for line in storefront.cart.lines() {
                let variant = [line.size.as_deref(), line.color.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join("/");
                println!(
                    "  {:>6}  {:<40} {variant:<16} x{:<3} {}",
                    line.product_id,
                    line.title,
                    line.quantity,
                    line.line_total()
                );
            }
            println!("total: {}", storefront.cart.total());
        }
        CartAction::Clear => {
            storefront.cart.clear();
            println!("cart cleared");
        }
    }
    Ok(())
}

/// Walk the published listing until a product with `slug` turns up.
async fn find_by_slug(
    storefront: &Storefront,
    slug: &str,
) -> Result<Option<ProductSummary>, kiogloss_client::ApiError> {
    let mut page = 0;
    loop {
        let listing = storefront.catalog.published_products(page, 50, None).await?;
        if let Some(product) = listing.content.iter().find(|p| p.slug == slug) {
            return Ok(Some(product.clone()));
        }
        if !listing.has_next() {
            return Ok(None);
        }
        page += 1;
    }
}
