//! Typed endpoint wrappers over the gateway, one service per backend area.

pub mod account;
pub mod admin;
pub mod catalog;
pub mod favorites;
pub mod orders;

pub use account::AccountService;
pub use admin::AdminService;
pub use catalog::CatalogService;
pub use favorites::FavoritesService;
pub use orders::OrdersService;

/// Query parameters for the backend's paged listings.
///
/// The backend reads `page` and `page_size`; anything else falls back to
/// its defaults, silently.
pub(crate) fn paging_query(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.to_string()),
        ("page_size", page_size.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_query_uses_backend_parameter_names() {
        let query = paging_query(2, 24);
        assert_eq!(
            query,
            vec![
                ("page", "2".to_owned()),
                ("page_size", "24".to_owned()),
            ]
        );
    }
}
