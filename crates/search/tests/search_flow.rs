//! End-to-end search over a storefront catalog: load, rank, present, render.

use glasscart_search::{
    calculate_relevance, rank, rank_scored, render_html, Catalog, MatchTier, Presenter, SearchField,
    SearchView,
};

const CATALOG: &str = r#"[
    {
        "id": 1,
        "name": "Wireless Bluetooth Headphones",
        "category": "audio",
        "categoryLabel": "Audio",
        "description": "Over-ear headphones with active noise cancelling",
        "features": ["40h battery", "USB-C fast charging", "Foldable design"],
        "price": 80,
        "originalPrice": 100,
        "rating": 4.5,
        "reviews": 214,
        "badge": "Sale",
        "image": "images/headphones.jpg"
    },
    {
        "id": 2,
        "name": "Smart Fitness Watch",
        "category": "wearables",
        "categoryLabel": "Wearables",
        "description": "Heart rate, sleep tracking and Bluetooth notifications",
        "features": ["Waterproof", "7 day battery"],
        "price": 149.99,
        "rating": 4.2,
        "reviews": 98,
        "image": "images/watch.jpg"
    },
    {
        "id": 3,
        "name": "Portable Speaker",
        "category": "audio",
        "categoryLabel": "Audio",
        "description": "Compact speaker with deep bass",
        "price": 59.5,
        "originalPrice": 70,
        "rating": 3.8,
        "reviews": 51,
        "image": "images/speaker.jpg"
    },
    {
        "id": 4,
        "name": "Ceramic Table Lamp",
        "category": "home",
        "categoryLabel": "Home & Living",
        "description": "Warm ambient light",
        "features": null,
        "price": 45,
        "rating": 4.9,
        "reviews": 12,
        "badge": "New",
        "image": "images/lamp.jpg"
    }
]"#;

fn catalog() -> Catalog {
    Catalog::from_json(CATALOG).expect("fixture catalog parses")
}

#[test]
fn wireless_matches_name_at_start() {
    let result = calculate_relevance("Wireless Bluetooth Headphones", "wireless");
    assert!(result.matched);
    assert_eq!(result.tier, MatchTier::Substring);
    assert!(result.score >= 130.0);

    let catalog = catalog();
    let results = rank(catalog.products(), "wireless");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id.to_string(), "1");
}

#[test]
fn misspelled_query_still_finds_headphones() {
    assert!(calculate_relevance("Wireless Bluetooth Headphones", "hedphones").matched);

    let catalog = catalog();
    let results = rank(catalog.products(), "hedphones");
    assert_eq!(results[0].id.to_string(), "1");
}

#[test]
fn transposed_letters_fall_back_to_typo_tier() {
    let catalog = catalog();
    let results = rank_scored(catalog.products(), "spaeker");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].product.id.to_string(), "3");
    assert_eq!(results[0].field, SearchField::Name);
    assert_eq!(results[0].tier, MatchTier::Typo);
    assert_eq!(results[0].score, 60.0);
}

#[test]
fn empty_query_returns_nothing() {
    let catalog = catalog();
    assert!(rank(catalog.products(), "").is_empty());
}

#[test]
fn strong_name_match_beats_weak_matches_elsewhere() {
    let catalog = catalog();
    let results = rank_scored(catalog.products(), "bluetooth");

    // headphones: name (100 * 3); watch: description only (100 * 1)
    assert_eq!(results[0].product.id.to_string(), "1");
    assert_eq!(results[0].field, SearchField::Name);
    assert_eq!(results[1].product.id.to_string(), "2");
    assert_eq!(results[1].field, SearchField::Description);
}

#[test]
fn category_search_keeps_catalog_order_on_ties() {
    let catalog = catalog();
    let ids: Vec<String> = rank(catalog.products(), "audio")
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn more_than_eight_matches_show_view_all() {
    let json: String = format!(
        "[{}]",
        (1..=11)
            .map(|i| format!(r#"{{"id": {i}, "name": "Lamp model {i}", "price": 10}}"#))
            .collect::<Vec<_>>()
            .join(",")
    );
    let catalog = Catalog::from_json(&json).unwrap();

    let results = rank(catalog.products(), "lamp");
    let view = Presenter::default().present(&results, "lamp");

    let SearchView::Results(list) = &view else {
        panic!("expected results");
    };
    assert_eq!(list.total, 11);
    assert_eq!(list.items.len(), 8);
    assert!(list.view_all.is_some());
    assert!(render_html(&view).contains("See all 11 results"));
}

#[test]
fn discount_is_shown_for_marked_down_products() {
    let catalog = catalog();
    let results = rank(catalog.products(), "headphones");
    let view = Presenter::default().present(&results, "headphones");

    let SearchView::Results(list) = &view else {
        panic!("expected results");
    };
    assert_eq!(list.items[0].discount_percent, Some(20));
    assert!(render_html(&view).contains("20%"));
}

#[test]
fn no_results_view_names_the_query() {
    let catalog = catalog();
    let results = rank(catalog.products(), "xylophone");
    let view = Presenter::default().present(&results, "xylophone");

    assert_eq!(view.total(), 0);
    assert!(render_html(&view).contains("xylophone"));
}
