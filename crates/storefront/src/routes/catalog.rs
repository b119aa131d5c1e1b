//! Catalog browsing handlers: category pages grouped by inspiration, and
//! the per-theme item listing with add-to-cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use loomline_core::types::{Category, CategoryFilter, price};
use loomline_core::{CatalogItem, group_by_inspiration, pipeline};

use crate::error::AppError;
use crate::filters;
use crate::routes::ErrorPageTemplate;
use crate::state::AppState;

/// Sizes offered for apparel lines. Bags are one-size.
const APPAREL_SIZES: [&str; 4] = ["S", "M", "L", "XL"];

/// One inspiration card on a category page.
pub struct ThemeCardView {
    pub inspiration: String,
    pub href: String,
    pub image: String,
    pub sample_name: String,
    pub price: String,
}

impl ThemeCardView {
    fn from_representative(item: &CatalogItem) -> Self {
        Self {
            inspiration: item.inspiration.clone(),
            href: format!(
                "/{}/inspiration/{}",
                item.category.slug(),
                urlencoding::encode(&item.inspiration)
            ),
            image: item.image.clone(),
            sample_name: item.name.clone(),
            price: price::display(item.price),
        }
    }
}

/// One item card on a theme page.
pub struct ItemCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub label: &'static str,
}

impl ItemCardView {
    fn from_item(item: &CatalogItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            price: price::display(item.price),
            image: item.image.clone(),
            label: item.category.label(),
        }
    }
}

/// Category browse page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/browse.html")]
pub struct BrowseTemplate {
    pub heading: String,
    pub category: &'static str,
    pub themes: Vec<ThemeCardView>,
    pub query: String,
}

/// Theme listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/inspiration.html")]
pub struct ThemeTemplate {
    pub heading: String,
    pub category: &'static str,
    pub category_label: &'static str,
    pub category_href: String,
    pub inspiration: String,
    pub items: Vec<ItemCardView>,
    pub sizes: Vec<&'static str>,
    pub notice: Option<String>,
}

/// Browse page query parameters.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub q: Option<String>,
}

/// Theme page query parameters.
#[derive(Debug, Deserialize)]
pub struct ThemeQuery {
    /// Set after an add-to-cart redirect to show the confirmation notice.
    pub added: Option<i32>,
}

fn parse_category(slug: &str) -> Result<Category, AppError> {
    slug.parse::<Category>()
        .map_err(|_| AppError::NotFound(format!("category {slug}")))
}

/// Browse a category grouped by inspiration.
#[instrument(skip(state))]
pub async fn browse(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<BrowseQuery>,
) -> Result<Response, AppError> {
    let category = parse_category(&category)?;

    let items = match state.api().products(category).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch {category} listing: {e}");
            return Ok(ErrorPageTemplate {
                message: "We could not load the collection.".to_string(),
                retry_href: format!("/{}", category.slug()),
            }
            .into_response());
        }
    };

    let q = query.q.unwrap_or_default();
    let narrowed = pipeline::search(
        pipeline::filter_by_category(items, CategoryFilter::Only(category)),
        &q,
    );
    let themes = group_by_inspiration(narrowed)
        .iter()
        .map(ThemeCardView::from_representative)
        .collect();

    Ok(BrowseTemplate {
        heading: format!("Browse {} by inspiration", category.plural_label()),
        category: category.slug(),
        themes,
        query: q,
    }
    .into_response())
}

/// Show every item of one inspiration theme.
#[instrument(skip(state))]
pub async fn theme(
    State(state): State<AppState>,
    Path((category, theme)): Path<(String, String)>,
    Query(query): Query<ThemeQuery>,
) -> Result<Response, AppError> {
    let category = parse_category(&category)?;

    let items = match state.api().inspiration_items(category, &theme).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch {category} theme {theme}: {e}");
            return Ok(ErrorPageTemplate {
                message: "We could not load this theme.".to_string(),
                retry_href: format!(
                    "/{}/inspiration/{}",
                    category.slug(),
                    urlencoding::encode(&theme)
                ),
            }
            .into_response());
        }
    };

    let sizes = if category == Category::Bags {
        Vec::new()
    } else {
        APPAREL_SIZES.to_vec()
    };

    Ok(ThemeTemplate {
        heading: format!("{} {}", theme, category.plural_label()),
        category: category.slug(),
        category_label: category.plural_label(),
        category_href: format!("/{}", category.slug()),
        inspiration: theme.clone(),
        items: items.iter().map(ItemCardView::from_item).collect(),
        sizes,
        notice: query.added.map(|_| "Added to cart".to_string()),
    }
    .into_response())
}
