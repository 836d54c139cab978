//! Presentation of ranked results.
//!
//! [`Presenter::present`] turns ranked products into a [`SearchView`]: plain
//! display data with no knowledge of any UI toolkit. [`render_html`] is the
//! markup adapter used by the browser bindings.

use crate::catalog::{Product, ProductId};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Results shown inline before the "view all" link appears.
pub const DEFAULT_MAX_INLINE_RESULTS: usize = 8;

/// Full search page, receives `?search=<query>`.
pub const DEFAULT_SEARCH_PAGE: &str = "shop.html";

/// Product detail page, receives `?id=<id>`.
pub const DEFAULT_PRODUCT_PAGE: &str = "product.html";

/// Presenter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenterOptions {
    /// Maximum number of inline result cards
    pub max_inline_results: usize,
    /// Base path of the full search page
    pub search_page: String,
    /// Base path of the product detail page
    pub product_page: String,
}

impl Default for PresenterOptions {
    fn default() -> Self {
        Self {
            max_inline_results: DEFAULT_MAX_INLINE_RESULTS,
            search_page: DEFAULT_SEARCH_PAGE.to_string(),
            product_page: DEFAULT_PRODUCT_PAGE.to_string(),
        }
    }
}

/// What the result area should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchView {
    /// Nothing matched the query
    NoResults {
        /// The query exactly as typed
        query: String,
    },
    /// At least one product matched
    Results(ResultList),
}

impl SearchView {
    /// Total number of matching products.
    pub fn total(&self) -> usize {
        match self {
            SearchView::NoResults { .. } => 0,
            SearchView::Results(list) => list.total,
        }
    }
}

/// A bounded list of result cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultList {
    pub query: String,
    /// Number of matches before truncation
    pub total: usize,
    /// Header text, e.g. `12 products found`
    pub summary: String,
    /// Link to the full search page, present only when results were truncated
    pub view_all: Option<String>,
    pub items: Vec<ResultCard>,
}

/// Display data for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub id: ProductId,
    /// Detail page link
    pub url: String,
    /// Name split into plain and highlighted runs
    pub name: Vec<TextSpan>,
    pub category_label: String,
    pub rating: f64,
    /// Rating rounded to one decimal, e.g. `4.5`
    pub rating_display: String,
    pub stars: [Star; 5],
    pub reviews: u32,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount_percent: Option<u32>,
    pub badge: Option<String>,
    pub image: String,
}

/// A run of text, highlighted when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpan {
    pub text: String,
    pub highlighted: bool,
}

impl TextSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn highlighted(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// One position of a five-star rating row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Star {
    Full,
    Half,
    Empty,
}

/// Star row for a 0–5 rating.
pub fn star_row(rating: f64) -> [Star; 5] {
    let full = rating.floor();
    std::array::from_fn(|i| {
        let position = (i + 1) as f64;
        if position <= full {
            Star::Full
        } else if position - 0.5 <= rating {
            Star::Half
        } else {
            Star::Empty
        }
    })
}

/// Split `text` into spans, highlighting every case-insensitive occurrence
/// of `query`.
///
/// ```
/// use glasscart_search::present::highlight;
///
/// let spans = highlight("Lamp and lamp shade", "LAMP");
/// let marked: Vec<&str> = spans.iter().filter(|s| s.highlighted).map(|s| s.text.as_str()).collect();
/// assert_eq!(marked, ["Lamp", "lamp"]);
/// ```
pub fn highlight(text: &str, query: &str) -> Vec<TextSpan> {
    if query.is_empty() {
        return vec![TextSpan::plain(text)];
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return vec![TextSpan::plain(text)],
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            spans.push(TextSpan::plain(&text[last..found.start()]));
        }
        spans.push(TextSpan::highlighted(found.as_str()));
        last = found.end();
    }
    if last < text.len() || spans.is_empty() {
        spans.push(TextSpan::plain(&text[last..]));
    }

    spans
}

/// Link to the full search page for `query`, percent-encoded.
///
/// ```
/// use glasscart_search::present::search_page_url;
///
/// assert_eq!(search_page_url("shop.html", "desk lamp"), "shop.html?search=desk%20lamp");
/// ```
pub fn search_page_url(search_page: &str, query: &str) -> String {
    format!("{}?search={}", search_page, urlencoding::encode(query))
}

/// Link to the detail page of product `id`.
pub fn product_page_url(product_page: &str, id: &ProductId) -> String {
    format!(
        "{}?id={}",
        product_page,
        urlencoding::encode(&id.to_string())
    )
}

/// Format a match count for the result header.
pub fn summary_label(count: usize) -> String {
    if count == 1 {
        "1 product found".to_string()
    } else {
        format!("{} products found", count)
    }
}

/// Builds [`SearchView`]s from ranked products.
#[derive(Debug, Clone, Default)]
pub struct Presenter {
    options: PresenterOptions,
}

impl Presenter {
    pub fn new(options: PresenterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PresenterOptions {
        &self.options
    }

    /// Link to the full search page for `query`.
    pub fn search_url(&self, query: &str) -> String {
        search_page_url(&self.options.search_page, query)
    }

    /// Project ranked `results` (best first) into display data.
    pub fn present(&self, results: &[&Product], query: &str) -> SearchView {
        if results.is_empty() {
            return SearchView::NoResults {
                query: query.to_string(),
            };
        }

        let total = results.len();
        let cap = self.options.max_inline_results;
        let view_all = (total > cap).then(|| self.search_url(query));

        let items = results
            .iter()
            .take(cap)
            .map(|product| self.card(product, query))
            .collect();

        SearchView::Results(ResultList {
            query: query.to_string(),
            total,
            summary: summary_label(total),
            view_all,
            items,
        })
    }

    fn card(&self, product: &Product, query: &str) -> ResultCard {
        let discount_percent = product.discount_percent();

        ResultCard {
            id: product.id.clone(),
            url: product_page_url(&self.options.product_page, &product.id),
            name: highlight(&product.name, query),
            category_label: product.category_label.clone(),
            rating: product.rating,
            rating_display: format!("{:.1}", product.rating),
            stars: star_row(product.rating),
            reviews: product.reviews,
            price: product.price,
            original_price: discount_percent.and(product.original_price),
            discount_percent,
            badge: product.badge.clone(),
            image: product.image.clone(),
        }
    }
}

/// Render a view as HTML markup. All catalog and query text is escaped.
pub fn render_html(view: &SearchView) -> String {
    match view {
        SearchView::NoResults { query } => format!(
            concat!(
                r#"<div class="gc-search__empty">"#,
                r#"<p>No products found for "<strong>{}</strong>"</p>"#,
                r#"<span>Try a different keyword or check the spelling</span>"#,
                "</div>"
            ),
            escape_html(query)
        ),
        SearchView::Results(list) => render_list(list),
    }
}

fn render_list(list: &ResultList) -> String {
    let mut html = String::new();

    html.push_str(r#"<div class="gc-search__header">"#);
    html.push_str(&format!(
        r#"<span class="gc-search__count">{}</span>"#,
        escape_html(&list.summary)
    ));
    if let Some(url) = &list.view_all {
        html.push_str(&format!(
            r#"<a href="{}" class="gc-search__view-all">View all</a>"#,
            escape_html(url)
        ));
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="gc-search__list">"#);
    for card in &list.items {
        html.push_str(&render_card(card));
    }
    html.push_str("</div>");

    if let Some(url) = &list.view_all {
        html.push_str(&format!(
            r#"<a href="{}" class="gc-search__see-all">See all {} results</a>"#,
            escape_html(url),
            list.total
        ));
    }

    html
}

fn render_card(card: &ResultCard) -> String {
    let name_text: String = card.name.iter().map(|span| span.text.as_str()).collect();
    let name_html: String = card
        .name
        .iter()
        .map(|span| {
            if span.highlighted {
                format!("<mark>{}</mark>", escape_html(&span.text))
            } else {
                escape_html(&span.text)
            }
        })
        .collect();

    let stars: String = card
        .stars
        .iter()
        .map(|star| match star {
            Star::Full => r#"<i class="gc-star gc-star--full"></i>"#,
            Star::Half => r#"<i class="gc-star gc-star--half"></i>"#,
            Star::Empty => r#"<i class="gc-star gc-star--empty"></i>"#,
        })
        .collect();

    let badge = card
        .badge
        .as_deref()
        .map(|badge| {
            format!(
                r#"<span class="gc-search__badge gc-badge--{}">{}</span>"#,
                escape_html(&badge.to_lowercase()),
                escape_html(badge)
            )
        })
        .unwrap_or_default();

    let mut prices = format!(r#"<span class="gc-search__price">${:.2}</span>"#, card.price);
    if let (Some(original), Some(discount)) = (card.original_price, card.discount_percent) {
        prices.push_str(&format!(
            r#"<span class="gc-search__original">${:.2}</span><span class="gc-search__discount">-{}%</span>"#,
            original, discount
        ));
    }

    format!(
        concat!(
            r#"<a href="{url}" class="gc-search__item">"#,
            r#"<div class="gc-search__media"><img src="{image}" alt="{alt}" loading="lazy">{badge}</div>"#,
            r#"<div class="gc-search__info">"#,
            "<h4>{name}</h4>",
            r#"<span class="gc-search__category">{category}</span>"#,
            r#"<div class="gc-search__meta">"#,
            r#"<div class="gc-search__rating">{stars} <span>{rating}</span> <span>({reviews})</span></div>"#,
            r#"<div class="gc-search__prices">{prices}</div>"#,
            "</div></div></a>"
        ),
        url = escape_html(&card.url),
        image = escape_html(&card.image),
        alt = escape_html(&name_text),
        badge = badge,
        name = name_html,
        category = escape_html(&card.category_label),
        stars = stars,
        rating = escape_html(&card.rating_display),
        reviews = card.reviews,
        prices = prices,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
