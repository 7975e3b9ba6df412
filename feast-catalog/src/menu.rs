use feast_shared::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::product::{CatalogError, Category, CategoryFilter, DeliveryWindow, MenuItem};

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Catalog order
    #[default]
    Popular,
    PriceLowToHigh,
    PriceHighToLow,
    Rating,
    FastestDelivery,
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortOrder::Popular),
            "price-low" => Ok(SortOrder::PriceLowToHigh),
            "price-high" => Ok(SortOrder::PriceHighToLow),
            "rating" => Ok(SortOrder::Rating),
            "time" => Ok(SortOrder::FastestDelivery),
            other => Err(CatalogError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Search box, category pills and sort dropdown of the menu page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl MenuQuery {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Read-only restaurant catalog
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The storefront's built-in catalog
    pub fn seeded() -> Self {
        Self::new(vec![
            item(1, "Margherita Pizza", Category::Pizza, 1899, 4.8, (25, 35), "Pizza Palace",
                "Classic tomato sauce with mozzarella cheese and fresh basil", true),
            item(2, "Pepperoni Pizza", Category::Pizza, 2099, 4.7, (25, 35), "Pizza Palace",
                "Spicy pepperoni with melted cheese on crispy crust", false),
            item(3, "Classic Burger", Category::Burger, 1299, 4.6, (20, 30), "Burger House",
                "Juicy beef patty with lettuce, tomato, and special sauce", true),
            item(4, "Cheese Burger", Category::Burger, 1499, 4.5, (20, 30), "Burger House",
                "Classic burger topped with melted cheddar cheese", false),
            item(5, "California Roll", Category::Sushi, 1599, 4.7, (30, 40), "Sushi Master",
                "Fresh avocado, cucumber, and crab meat roll", true),
            item(6, "Salmon Nigiri", Category::Sushi, 1399, 4.8, (30, 40), "Sushi Master",
                "Fresh salmon over seasoned rice", false),
            item(7, "Chicken Pasta", Category::Pasta, 1699, 4.5, (25, 35), "Italian Delight",
                "Creamy pasta with grilled chicken and herbs", true),
            item(8, "Caesar Salad", Category::Salad, 1199, 4.4, (15, 25), "Fresh Greens",
                "Fresh romaine lettuce with caesar dressing and croutons", false),
            item(9, "Chocolate Cake", Category::Dessert, 899, 4.9, (20, 30), "Sweet Treats",
                "Rich chocolate cake with chocolate ganache", false),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Like `get`, for callers that treat a missing id as an error
    pub fn require(&self, id: ProductId) -> Result<&MenuItem, CatalogError> {
        self.get(id).ok_or(CatalogError::ProductNotFound(id))
    }

    pub fn featured(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|i| i.featured).collect()
    }

    /// Filter by search text and category, then sort. Ties keep catalog order.
    pub fn query(&self, query: &MenuQuery) -> Vec<&MenuItem> {
        let needle = query.search.trim().to_lowercase();

        let mut found: Vec<&MenuItem> = self
            .items
            .iter()
            .filter(|i| i.matches_search(&needle) && query.category.matches(i.category))
            .collect();

        match query.sort {
            SortOrder::Popular => {}
            SortOrder::PriceLowToHigh => found.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHighToLow => found.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Rating => found.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::FastestDelivery => found.sort_by_key(|i| i.delivery.min_minutes),
        }

        found
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::seeded()
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: u32,
    name: &str,
    category: Category,
    price_cents: i64,
    rating: f32,
    (min, max): (u32, u32),
    restaurant: &str,
    description: &str,
    featured: bool,
) -> MenuItem {
    MenuItem {
        id: ProductId(id),
        name: name.to_string(),
        category,
        price: Decimal::new(price_cents, 2),
        rating,
        delivery: DeliveryWindow::new(min, max),
        restaurant: restaurant.to_string(),
        description: description.to_string(),
        featured,
    }
}
