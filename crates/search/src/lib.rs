//! Client-side product search for the GlassCart storefront.
//!
//! This crate provides:
//! - Tiered relevance scoring (substring, word start, subsequence, typo)
//! - Levenshtein edit distance
//! - Weighted multi-field ranking over a product catalog
//! - Result presentation with highlighting and HTML rendering
//! - Debounced search-as-you-type sessions
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use glasscart_search::{rank, Presenter, Product, SearchView};
//!
//! let catalog = vec![
//!     Product::new(1u64, "Wireless Bluetooth Headphones").with_price(80.0, Some(100.0)),
//!     Product::new(2u64, "Desk Lamp"),
//! ];
//!
//! let results = rank(&catalog, "headphones");
//! let view = Presenter::default().present(&results, "headphones");
//!
//! let SearchView::Results(list) = view else { unreachable!() };
//! assert_eq!(list.items[0].discount_percent, Some(20));
//! ```

mod catalog;
pub mod debounce;
mod error;
mod fuzzy;
pub mod present;
mod rank;
mod relevance;
pub mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use catalog::{Catalog, Product, ProductId};
pub use debounce::Debouncer;
pub use error::{Result, SearchError, SearchErrorCode};
pub use fuzzy::{closest_word_distance, levenshtein_distance, subsequence, Subsequence};
pub use present::{
    render_html, Presenter, PresenterOptions, ResultCard, ResultList, SearchView, Star, TextSpan,
};
pub use rank::{rank, rank_scored, score_product, ScoredProduct, SearchField};
pub use relevance::{calculate_relevance, subsequence_score, MatchResult, MatchTier};
pub use session::{Key, SearchSession, SessionAction, SessionUpdate};
