pub mod product;
pub mod menu;
pub mod pricing;

pub use product::{CatalogError, Category, CategoryFilter, DeliveryWindow, MenuItem};
pub use menu::{Menu, MenuQuery, SortOrder};
pub use pricing::{format_amount, FeeSchedule, PriceBreakdown};
pub use feast_shared::ProductId;
