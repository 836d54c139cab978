//! Terminal rendering of search results
//!
//! Mirrors the result dropdown: one card per product with highlighted name,
//! star row, price block and link, followed by the "see all" footer.

use glasscart_search::{ResultCard, ResultList, SearchView, Star};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Renders [`SearchView`]s as terminal text.
#[derive(Debug, Clone, Copy)]
pub struct ResultsPrinter {
    color: bool,
}

impl ResultsPrinter {
    /// `color` enables ANSI styling; disable it when stdout is not a terminal.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print a view to stdout.
    pub fn print(&self, view: &SearchView) {
        print!("{}", self.render(view));
    }

    /// Render a view to a string.
    pub fn render(&self, view: &SearchView) -> String {
        match view {
            SearchView::NoResults { query } => {
                let line = format!("No products found for \"{}\"", query);
                format!("{}\n", self.dim(&line))
            }
            SearchView::Results(list) => self.render_list(list),
        }
    }

    fn render_list(&self, list: &ResultList) -> String {
        let mut out = String::new();
        for (idx, card) in list.items.iter().enumerate() {
            self.render_card(&mut out, idx + 1, card);
        }

        let _ = writeln!(out, "{}", self.dim(&list.summary));
        if let Some(url) = &list.view_all {
            let label = format!("See all {} results", list.total);
            if self.color {
                let _ = writeln!(out, "{} {}", label.cyan(), url.underline());
            } else {
                let _ = writeln!(out, "{} {}", label, url);
            }
        }
        out
    }

    fn render_card(&self, out: &mut String, position: usize, card: &ResultCard) {
        let mut name = String::new();
        for span in &card.name {
            if span.highlighted && self.color {
                name.push_str(&span.text.yellow().bold().to_string());
            } else {
                name.push_str(&span.text);
            }
        }

        let _ = write!(out, "{:>3}. {}", position, name);
        if !card.category_label.is_empty() {
            let _ = write!(out, "  {}", self.dim(&card.category_label));
        }
        if let Some(badge) = &card.badge {
            let tag = format!("[{}]", badge);
            if self.color {
                let _ = write!(out, "  {}", tag.magenta());
            } else {
                let _ = write!(out, "  {}", tag);
            }
        }
        out.push('\n');

        let stars = stars(&card.stars);
        let rating = format!("{} ({})", card.rating_display, card.reviews);
        let price = format!("${:.2}", card.price);
        if self.color {
            let _ = write!(out, "     {} {}  {}", stars.yellow(), rating, price.green().bold());
        } else {
            let _ = write!(out, "     {} {}  {}", stars, rating, price);
        }
        if let (Some(original), Some(percent)) = (card.original_price, card.discount_percent) {
            let was = format!("${:.2}", original);
            let off = format!("-{}%", percent);
            if self.color {
                let _ = write!(out, "  {}  {}", was.strikethrough().dimmed(), off.red());
            } else {
                let _ = write!(out, "  {}  {}", was, off);
            }
        }
        out.push('\n');

        let _ = writeln!(out, "     {}", self.dim(&card.url));
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn stars(row: &[Star; 5]) -> String {
    row.iter()
        .map(|star| match star {
            Star::Full => '★',
            Star::Half => '⯪',
            Star::Empty => '☆',
        })
        .collect()
}
