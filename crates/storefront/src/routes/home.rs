//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use loomline_core::types::Category;

use crate::filters;

/// A category card on the home page.
pub struct CategoryCardView {
    pub href: String,
    pub title: String,
    pub blurb: &'static str,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryCardView>,
}

/// Display the home page.
pub async fn home() -> impl IntoResponse {
    let categories = Category::ALL
        .into_iter()
        .map(|category| CategoryCardView {
            href: format!("/{}", category.slug()),
            title: category.plural_label().to_string(),
            blurb: match category {
                Category::Bags => "Totes and carriers built around a theme.",
                Category::Tshirts => "Hand-finished tees for every inspiration.",
                Category::Hoodies => "Heavyweight hoodies, printed to order.",
            },
        })
        .collect();

    HomeTemplate { categories }
}
