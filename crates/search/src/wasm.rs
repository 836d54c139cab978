//! WASM bindings for the storefront search box.
//!
//! Catalogs cross the boundary as JSON. Every binding degrades to an empty
//! result instead of throwing: a missing query or an unparseable catalog
//! simply finds nothing.

use crate::{calculate_relevance, rank_scored, render_html, Catalog, Presenter};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Score a single text against a query.
///
/// # Returns
/// JSON object `{ "matched": bool, "score": number, "tier": string }`
#[wasm_bindgen]
pub fn score_text(text: &str, query: Option<String>) -> String {
    let result = calculate_relevance(text, query.as_deref().unwrap_or_default());
    serde_json::to_string(&result).unwrap_or_else(|_| "null".to_string())
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Rank a catalog and return ids with scores.
///
/// # Arguments
/// * `query` - Search query (`null`/`undefined` finds nothing)
/// * `catalog_json` - JSON array of products
/// * `max_results` - Maximum results to return (0 for all)
///
/// # Returns
/// JSON array of `{ "id", "score", "field" }`, best first
#[wasm_bindgen]
pub fn search_products(query: Option<String>, catalog_json: &str, max_results: usize) -> String {
    #[derive(Serialize)]
    struct Hit<'a> {
        id: &'a crate::ProductId,
        score: f64,
        field: crate::SearchField,
    }

    let Some(catalog) = load_catalog(catalog_json) else {
        return "[]".to_string();
    };
    let query = query.unwrap_or_default();

    let mut hits: Vec<Hit<'_>> = rank_scored(catalog.products(), query.trim())
        .into_iter()
        .map(|scored| Hit {
            id: &scored.product.id,
            score: scored.score,
            field: scored.field,
        })
        .collect();

    if max_results > 0 {
        hits.truncate(max_results);
    }

    serde_json::to_string(&hits).unwrap_or_else(|_| "[]".to_string())
}

/// Rank a catalog and render the result list as HTML.
///
/// Returns an empty string when the query is empty, matching a cleared
/// search box.
#[wasm_bindgen]
pub fn render_search_results(query: Option<String>, catalog_json: &str) -> String {
    let query = query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return String::new();
    }

    let catalog = load_catalog(catalog_json).unwrap_or_default();
    let results = crate::rank(catalog.products(), query);
    render_html(&Presenter::default().present(&results, query))
}

/// Full search page link for the activation key.
#[wasm_bindgen]
pub fn search_page_url(query: &str) -> String {
    Presenter::default().search_url(query.trim())
}

fn load_catalog(catalog_json: &str) -> Option<Catalog> {
    Catalog::from_json(catalog_json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Desk Lamp", "categoryLabel": "Home"},
        {"id": 2, "name": "Floor Lamp"},
        {"id": 3, "name": "Smart Watch"}
    ]"#;

    #[test]
    fn test_missing_query_finds_nothing() {
        assert_eq!(search_products(None, CATALOG, 0), "[]");
        assert_eq!(render_search_results(None, CATALOG), "");
        assert_eq!(render_search_results(Some("  ".into()), CATALOG), "");
    }

    #[test]
    fn test_missing_query_never_matches() {
        let result: serde_json::Value = serde_json::from_str(&score_text("x", None)).unwrap();
        assert_eq!(result["matched"], false);
        assert_eq!(result["tier"], "none");
    }

    #[test]
    fn test_bad_catalog_degrades_to_no_results() {
        assert_eq!(search_products(Some("lamp".into()), "{bad", 0), "[]");
        assert!(render_search_results(Some("lamp".into()), "{bad").contains("No products found"));
    }

    #[test]
    fn test_search_products_limits_results() {
        let hits: serde_json::Value =
            serde_json::from_str(&search_products(Some("lamp".into()), CATALOG, 1)).unwrap();
        assert_eq!(hits.as_array().map(Vec::len), Some(1));
        assert_eq!(hits[0]["id"], 1);
        assert_eq!(hits[0]["field"], "name");

        let all: serde_json::Value =
            serde_json::from_str(&search_products(Some("lamp".into()), CATALOG, 0)).unwrap();
        assert_eq!(all.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_edit_distance_and_search_url() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(search_page_url(" desk lamp "), "shop.html?search=desk%20lamp");
    }
}
