//! Multi-field ranking over a product catalog.
//!
//! Every product is scored against a fixed set of weighted fields. The
//! product's score is the best single `field score * weight`, so several weak
//! matches never add up to beat one strong match.

use crate::catalog::Product;
use crate::relevance::{calculate_relevance, MatchTier};
use serde::Serialize;
use std::borrow::Cow;

/// Product fields that take part in search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Name,
    CategoryLabel,
    Category,
    Description,
    /// Feature bullets joined with single spaces
    Features,
}

impl SearchField {
    /// All fields in evaluation order.
    pub const ALL: [SearchField; 5] = [
        SearchField::Name,
        SearchField::CategoryLabel,
        SearchField::Category,
        SearchField::Description,
        SearchField::Features,
    ];

    /// Multiplier applied to this field's match score.
    pub fn weight(self) -> f64 {
        match self {
            SearchField::Name => 3.0,
            SearchField::CategoryLabel => 2.0,
            SearchField::Category => 1.5,
            SearchField::Description => 1.0,
            SearchField::Features => 1.0,
        }
    }

    /// Searchable text of this field for `product`.
    pub fn text(self, product: &Product) -> Cow<'_, str> {
        match self {
            SearchField::Name => Cow::Borrowed(&product.name),
            SearchField::CategoryLabel => Cow::Borrowed(&product.category_label),
            SearchField::Category => Cow::Borrowed(&product.category),
            SearchField::Description => Cow::Borrowed(&product.description),
            SearchField::Features => Cow::Owned(product.features.join(" ")),
        }
    }
}

/// A product that matched a query, with its aggregate score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredProduct<'a> {
    /// The matched product
    pub product: &'a Product,
    /// Best weighted field score
    pub score: f64,
    /// Field that produced the best score
    pub field: SearchField,
    /// Strategy that matched in that field
    pub tier: MatchTier,
}

/// Score one product against `query`.
///
/// Returns `None` when no field matches. Empty fields are skipped.
pub fn score_product<'a>(product: &'a Product, query: &str) -> Option<ScoredProduct<'a>> {
    let mut best: Option<ScoredProduct<'a>> = None;

    for field in SearchField::ALL {
        let text = field.text(product);
        if text.trim().is_empty() {
            continue;
        }

        let result = calculate_relevance(&text, query);
        if !result.matched {
            continue;
        }

        let weighted = result.score * field.weight();
        if best.as_ref().is_none_or(|b| weighted > b.score) {
            best = Some(ScoredProduct {
                product,
                score: weighted,
                field,
                tier: result.tier,
            });
        }
    }

    best.filter(|b| b.score > 0.0)
}

/// Rank `catalog` for `query`, keeping scores.
///
/// Results are ordered by score, best first. Products with equal scores keep
/// their catalog order. An empty or whitespace-only query yields nothing.
pub fn rank_scored<'a>(catalog: &'a [Product], query: &str) -> Vec<ScoredProduct<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    #[cfg(feature = "parallel")]
    let mut scored: Vec<ScoredProduct<'a>> = {
        use rayon::prelude::*;
        catalog
            .par_iter()
            .filter_map(|product| score_product(product, query))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let mut scored: Vec<ScoredProduct<'a>> = catalog
        .iter()
        .filter_map(|product| score_product(product, query))
        .collect();

    // sort_by is stable, so ties stay in catalog order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(
        query = %query,
        candidates = catalog.len(),
        matches = scored.len(),
        "Ranked catalog"
    );

    scored
}

/// Rank `catalog` for `query`, best match first.
///
/// # Example
/// ```
/// use glasscart_search::{rank, Product};
///
/// let catalog = vec![
///     Product::new(1u64, "Desk Lamp"),
///     Product::new(2u64, "Wireless Bluetooth Headphones"),
/// ];
///
/// let results = rank(&catalog, "wireless");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].name, "Wireless Bluetooth Headphones");
/// ```
pub fn rank<'a>(catalog: &'a [Product], query: &str) -> Vec<&'a Product> {
    rank_scored(catalog, query)
        .into_iter()
        .map(|scored| scored.product)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductId;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1u64, "Wireless Bluetooth Headphones")
                .with_category("audio", "Audio")
                .with_description("Over-ear headphones with noise cancelling")
                .with_features(["40h battery", "USB-C charging"]),
            Product::new(2u64, "Smart Watch")
                .with_category("wearables", "Wearables")
                .with_description("Tracks sleep and heart rate")
                .with_features(["Waterproof", "Bluetooth 5.0"]),
            Product::new(3u64, "Desk Lamp")
                .with_category("home", "Home & Living")
                .with_description("Warm light for late nights"),
        ]
    }

    #[test]
    fn test_empty_query() {
        assert!(rank(&catalog(), "").is_empty());
        assert!(rank(&catalog(), "   ").is_empty());
    }

    #[test]
    fn test_name_match_ranks_first() {
        let catalog = catalog();
        let results = rank_scored(&catalog, "bluetooth");

        assert_eq!(results.len(), 2);
        // name: 100 * 3 beats features: 100 * 1
        assert_eq!(results[0].product.id, ProductId::Number(1));
        assert_eq!(results[0].field, SearchField::Name);
        assert_eq!(results[0].score, 300.0);
        assert_eq!(results[1].product.id, ProductId::Number(2));
        assert_eq!(results[1].field, SearchField::Features);
        assert_eq!(results[1].score, 100.0);
    }

    #[test]
    fn test_category_label_weight() {
        let catalog = catalog();
        let results = rank_scored(&catalog, "wearables");

        assert_eq!(results.len(), 1);
        // label (130 * 2) beats the slug (130 * 1.5)
        assert_eq!(results[0].field, SearchField::CategoryLabel);
        assert_eq!(results[0].score, 260.0);
    }

    #[test]
    fn test_no_match_excluded() {
        assert!(rank(&catalog(), "zzzzzz").is_empty());
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let catalog = vec![Product::new(9u64, "Lamp")];
        let results = rank_scored(&catalog, "lamp");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].field, SearchField::Name);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            Product::new(1u64, "Lamp Classic"),
            Product::new(2u64, "Lamp Modern"),
            Product::new(3u64, "Lamp Vintage"),
        ];
        let ids: Vec<String> = rank(&catalog, "lamp").iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_max_not_sum() {
        let catalog = vec![
            // weak matches in two low-weight fields
            Product::new(1u64, "Speaker")
                .with_description("pairs with your phone")
                .with_features(["phone stand included"]),
            // single strong match in the name
            Product::new(2u64, "Phone Case"),
        ];
        let results = rank_scored(&catalog, "phone");

        assert_eq!(results[0].product.id, ProductId::Number(2));
        assert_eq!(results[0].score, 390.0);
        // features lead with "phone" (130 * 1); the description match is later
        assert_eq!(results[1].field, SearchField::Features);
        assert_eq!(results[1].score, 130.0);
    }

    #[test]
    fn test_ranking_does_not_mutate_catalog() {
        let catalog = catalog();
        let before = catalog.clone();
        let _ = rank(&catalog, "lamp");
        assert_eq!(catalog, before);
    }
}
