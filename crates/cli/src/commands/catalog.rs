//! Catalog browsing commands.

use clap::Subcommand;
use kiogloss_client::Storefront;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List published products
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(long, default_value_t = 12)]
        size: u32,

        /// Search term
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product by slug
    Show {
        /// Product slug
        slug: String,
    },
    /// List all tags
    Tags,
}

pub async fn run(
    storefront: &Storefront,
    action: CatalogAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List { page, size, search } => {
            let listing = storefront
                .catalog
                .published_products(page, size, search.as_deref())
                .await?;
            println!(
                "page {}/{} ({} products total)",
                listing.number + 1,
                listing.total_pages,
                listing.total_elements
            );
            for product in &listing.content {
                println!(
                    "  {:>6}  {:<40} {:>8}  stock {}",
                    product.id, product.slug, product.price, product.stock
                );
            }
        }
        CatalogAction::Show { slug } => {
            let detail = storefront.catalog.product_by_slug(&slug).await?;
            println!("{} ({})", detail.title, detail.price);
            println!("  stock: {}", detail.stock);
            if !detail.sizes.is_empty() {
                println!("  sizes: {}", detail.sizes.join(", "));
            }
            if !detail.colors.is_empty() {
                println!("  colors: {}", detail.colors.join(", "));
            }
            if !detail.tags.is_empty() {
                println!("  tags: {}", detail.tags.join(", "));
            }
            println!("{}", detail.description);
        }
        CatalogAction::Tags => {
            for tag in storefront.catalog.tags().await? {
                println!("  {:>6}  {}", tag.id, tag.name);
            }
        }
    }
    Ok(())
}
