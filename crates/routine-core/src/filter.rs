//! Filtering of the catalog by category and keyword

use std::str::FromStr;

use crate::catalog::{Category, Product};
use crate::error::UnknownCategory;

/// Shown in place of the product grid while no criterion is active
pub const PLACEHOLDER_MESSAGE: &str = "Select a category or type to view products";

/// Value of the category selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryChoice {
    /// Nothing chosen yet
    #[default]
    Unset,
    All,
    Only(Category),
}

impl CategoryChoice {
    /// Selector entries in display order
    pub fn options() -> Vec<CategoryChoice> {
        let mut options = vec![CategoryChoice::Unset, CategoryChoice::All];
        options.extend(Category::all().into_iter().map(CategoryChoice::Only));
        options
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryChoice::Unset => "Choose a category",
            CategoryChoice::All => "All Products",
            CategoryChoice::Only(category) => category.display_name(),
        }
    }

    pub fn next(&self) -> Self {
        let options = Self::options();
        let i = options.iter().position(|c| c == self).unwrap_or(0);
        options[(i + 1) % options.len()]
    }

    pub fn prev(&self) -> Self {
        let options = Self::options();
        let i = options.iter().position(|c| c == self).unwrap_or(0);
        options[(i + options.len() - 1) % options.len()]
    }
}

impl FromStr for CategoryChoice {
    type Err = UnknownCategory;

    /// Accepts "all", an empty string, or a catalog category name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Ok(CategoryChoice::Unset)
        } else if trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryChoice::All)
        } else {
            trimmed.parse().map(CategoryChoice::Only)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: CategoryChoice,
    pub keyword: String,
}

impl FilterCriteria {
    pub fn new(category: CategoryChoice, keyword: impl Into<String>) -> Self {
        Self {
            category,
            keyword: keyword.into(),
        }
    }

    /// True when neither a category nor a keyword is active. "All" counts as chosen.
    pub fn is_empty(&self) -> bool {
        self.category == CategoryChoice::Unset && self.keyword.trim().is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let CategoryChoice::Only(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        let keyword = self.keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return true;
        }

        product.name.to_lowercase().contains(&keyword)
            || product.brand.to_lowercase().contains(&keyword)
    }
}

/// What the product grid should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Placeholder,
    Products(Vec<Product>),
}

impl Visibility {
    pub fn products(&self) -> &[Product] {
        match self {
            Visibility::Placeholder => &[],
            Visibility::Products(products) => products,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Visibility::Placeholder)
    }
}

pub fn filter_products(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    products
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

/// Filtering needs at least one active criterion; otherwise the grid shows a placeholder.
pub fn visible_products(products: &[Product], criteria: &FilterCriteria) -> Visibility {
    if criteria.is_empty() {
        return Visibility::Placeholder;
    }
    Visibility::Products(filter_products(products, criteria))
}
