//! Product catalog model.
//!
//! The catalog is owned by the storefront; search only borrows it. Loading is
//! lenient: optional fields that are missing, `null` or mistyped become empty values
//! instead of failing the whole catalog.

use crate::error::{Result, SearchError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Product identifier as it appears in catalog JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id
    Number(u64),
    /// String id
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Display name
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    /// Category slug, e.g. `audio`
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    /// Human-readable category, e.g. `Audio & Sound`
    #[serde(default, deserialize_with = "lenient")]
    pub category_label: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    /// Short feature bullets
    #[serde(default, deserialize_with = "lenient_strings")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Average rating, 0 to 5
    #[serde(default, deserialize_with = "lenient")]
    pub rating: f64,
    /// Number of reviews
    #[serde(default, deserialize_with = "lenient")]
    pub reviews: u32,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: String,
}

impl Product {
    /// Create a product with only an id and a name.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            category_label: String::new(),
            description: String::new(),
            features: Vec::new(),
            price: 0.0,
            original_price: None,
            rating: 0.0,
            reviews: 0,
            badge: None,
            image: String::new(),
        }
    }

    /// Set the category slug and label.
    pub fn with_category(mut self, category: impl Into<String>, label: impl Into<String>) -> Self {
        self.category = category.into();
        self.category_label = label.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the feature list.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Set the current and (optional) original price.
    pub fn with_price(mut self, price: f64, original_price: Option<f64>) -> Self {
        self.price = price;
        self.original_price = original_price;
        self
    }

    /// Set rating and review count.
    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    /// Set the badge label.
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// Discount in whole percent, when the original price exceeds the current one.
    ///
    /// ```
    /// use glasscart_search::Product;
    ///
    /// let product = Product::new(1u64, "Lamp").with_price(80.0, Some(100.0));
    /// assert_eq!(product.discount_percent(), Some(20));
    /// ```
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original > self.price && original > 0.0 {
            Some(((1.0 - self.price / original) * 100.0).round() as u32)
        } else {
            None
        }
    }
}

/// An owned, read-only product catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap an existing product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SearchError::from)
    }

    /// Parse a catalog from a reader yielding a JSON array of products.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        serde_json::from_reader(reader).map_err(SearchError::from)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

/// Read a field, falling back to its default when it is `null` or has the
/// wrong type.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Feature list: non-string entries are dropped and a lone string becomes a
/// one-item list.
fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}
