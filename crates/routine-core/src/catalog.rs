use std::fmt;
use std::str::FromStr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, UnknownCategory};

pub type ProductId = u32;

/// Product categories as they are spelled in the catalog document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "cleanser")]
    Cleanser,
    #[serde(rename = "moisturizer")]
    Moisturizer,
    #[serde(rename = "haircare")]
    Haircare,
    #[serde(rename = "makeup")]
    Makeup,
    #[serde(rename = "hair color")]
    HairColor,
    #[serde(rename = "hair styling")]
    HairStyling,
    #[serde(rename = "men's grooming")]
    MensGrooming,
    #[serde(rename = "suncare")]
    Suncare,
    #[serde(rename = "fragrance")]
    Fragrance,
}

impl Category {
    pub fn all() -> Vec<Category> {
        vec![
            Category::Cleanser,
            Category::Moisturizer,
            Category::Haircare,
            Category::Makeup,
            Category::HairColor,
            Category::HairStyling,
            Category::MensGrooming,
            Category::Suncare,
            Category::Fragrance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cleanser => "cleanser",
            Category::Moisturizer => "moisturizer",
            Category::Haircare => "haircare",
            Category::Makeup => "makeup",
            Category::HairColor => "hair color",
            Category::HairStyling => "hair styling",
            Category::MensGrooming => "men's grooming",
            Category::Suncare => "suncare",
            Category::Fragrance => "fragrance",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Cleanser => "Cleansers",
            Category::Moisturizer => "Moisturizers & Treatments",
            Category::Haircare => "Haircare",
            Category::Makeup => "Makeup",
            Category::HairColor => "Hair Color",
            Category::HairStyling => "Hair Styling",
            Category::MensGrooming => "Men's Grooming",
            Category::Suncare => "Sunscreen",
            Category::Fragrance => "Fragrance",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive match on the catalog spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub description: String,
    pub image: String,
}

#[derive(Deserialize)]
struct CatalogDocument {
    products: Vec<Product>,
}

/// Where the catalog document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CatalogSource::Url(trimmed.to_string())
        } else {
            CatalogSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Loads the catalog from its source. Every call reads the document again;
/// nothing is cached between calls.
#[derive(Clone)]
pub struct CatalogLoader {
    source: CatalogSource,
    client: Client,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource) -> Self {
        Self::with_client(source, Client::new())
    }

    /// URL fetches give up after `timeout`
    pub fn with_timeout(source: CatalogSource, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(source, client))
    }

    pub fn with_client(source: CatalogSource, client: Client) -> Self {
        Self { source, client }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let content = match &self.source {
            CatalogSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: path.clone(),
                    source,
                })?,
            CatalogSource::Url(url) => {
                let response = self.client.get(url).send().await?;
                if !response.status().is_success() {
                    return Err(CatalogError::Status(response.status()));
                }
                response.text().await?
            }
        };

        let products = parse_catalog(&content)?;
        debug!(source = %self.source, count = products.len(), "loaded catalog");
        Ok(products)
    }
}

pub fn parse_catalog(content: &str) -> Result<Vec<Product>, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(content)?;
    Ok(document.products)
}

pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}
