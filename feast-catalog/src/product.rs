use feast_shared::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Pizza,
    Burger,
    Sushi,
    Pasta,
    Salad,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Pizza,
        Category::Burger,
        Category::Sushi,
        Category::Pasta,
        Category::Salad,
        Category::Dessert,
    ];

    /// Stable identifier used in filters and URLs
    pub fn id(&self) -> &'static str {
        match self {
            Category::Pizza => "pizza",
            Category::Burger => "burger",
            Category::Sushi => "sushi",
            Category::Pasta => "pasta",
            Category::Salad => "salad",
            Category::Dessert => "dessert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Pizza => "Pizza",
            Category::Burger => "Burgers",
            Category::Sushi => "Sushi",
            Category::Pasta => "Pasta",
            Category::Salad => "Salads",
            Category::Dessert => "Desserts",
        }
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Category selection on the menu page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Delivery estimate in minutes, shown as `25-35 min`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryWindow {
    pub min_minutes: u32,
    pub max_minutes: u32,
}

impl DeliveryWindow {
    pub const fn new(min_minutes: u32, max_minutes: u32) -> Self {
        Self { min_minutes, max_minutes }
    }

    /// Smallest window covering both
    pub fn span(&self, other: &DeliveryWindow) -> DeliveryWindow {
        DeliveryWindow {
            min_minutes: self.min_minutes.min(other.min_minutes),
            max_minutes: self.max_minutes.max(other.max_minutes),
        }
    }
}

impl fmt::Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} min", self.min_minutes, self.max_minutes)
    }
}

impl FromStr for DeliveryWindow {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidDeliveryWindow(s.to_string());

        let range = s.trim().strip_suffix("min").ok_or_else(invalid)?.trim();
        let (min, max) = range.split_once('-').ok_or_else(invalid)?;
        let min_minutes: u32 = min.trim().parse().map_err(|_| invalid())?;
        let max_minutes: u32 = max.trim().parse().map_err(|_| invalid())?;

        if min_minutes > max_minutes {
            return Err(invalid());
        }
        Ok(Self { min_minutes, max_minutes })
    }
}

/// A dish offered by one of the partner restaurants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    pub rating: f32,
    pub delivery: DeliveryWindow,
    pub restaurant: String,
    pub description: String,
    /// Shown in the home page's popular section
    pub featured: bool,
}

impl MenuItem {
    /// Case-insensitive match against name or description.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    #[error("Invalid delivery window: {0}")]
    InvalidDeliveryWindow(String),
}
