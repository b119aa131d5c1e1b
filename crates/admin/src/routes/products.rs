//! Products manager: the merged catalog with filter/sort/search and CRUD.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use loomline_api::ProductInput;
use loomline_core::types::{Category, CategoryFilter, ProductId, price};
use loomline_core::{CatalogItem, ProductSortField, SortConfig, SortDirection, pipeline};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{SortLink, format_date};

/// One product card in the grid.
pub struct ProductCardView {
    pub name: String,
    pub category_label: &'static str,
    pub inspiration: String,
    pub price: String,
    pub image: String,
    pub added: Option<String>,
    pub edit_href: String,
    pub delete_action: String,
}

impl From<&CatalogItem> for ProductCardView {
    fn from(item: &CatalogItem) -> Self {
        let base = format!("/products/{}/{}", item.category.slug(), item.id);
        Self {
            name: item.name.clone(),
            category_label: item.category.label(),
            inspiration: item.inspiration.clone(),
            price: price::display(item.price),
            image: item.image.clone(),
            added: item.created_at.map(format_date),
            edit_href: format!("{base}/edit"),
            delete_action: format!("{base}/delete"),
        }
    }
}

/// Products list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub count: usize,
    pub query: String,
    pub filter: &'static str,
    pub sort_links: Vec<SortLink>,
}

/// Product form template (create and edit).
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub heading: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub name: String,
    pub category: &'static str,
    pub price: String,
    pub image: String,
    pub inspiration: String,
    pub error: Option<String>,
}

impl ProductFormTemplate {
    fn blank() -> Self {
        Self {
            heading: "Create Product",
            action: "/products".to_string(),
            submit_label: "Create Product",
            name: String::new(),
            category: Category::Bags.slug(),
            price: String::new(),
            image: String::new(),
            inspiration: String::new(),
            error: None,
        }
    }

    fn for_item(item: &CatalogItem) -> Self {
        Self {
            heading: "Edit Product",
            action: format!("/products/{}/{}", item.category.slug(), item.id),
            submit_label: "Update Product",
            name: item.name.clone(),
            category: item.category.slug(),
            price: item.price.to_string(),
            image: item.image.clone(),
            inspiration: item.inspiration.clone(),
            error: None,
        }
    }
}

/// Products list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub filter: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl ProductsQuery {
    /// Resolve the query into a pipeline configuration, falling back to the
    /// screen defaults (all categories, sort by name ascending).
    fn resolve(&self) -> (CategoryFilter, String, SortConfig<ProductSortField>) {
        let filter = self
            .filter
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(CategoryFilter::All);
        let query = self.q.clone().unwrap_or_default();
        let field = self
            .sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let direction = self
            .dir
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SortDirection::Asc);
        (filter, query, SortConfig::new(field, direction))
    }
}

/// Product create/update form data. Price arrives as the raw form string
/// and is parsed here.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub inspiration: String,
}

impl ProductForm {
    fn parse(&self) -> std::result::Result<(Category, ProductInput), String> {
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| e.to_string())?;
        let parsed = self
            .price
            .trim()
            .parse::<Decimal>()
            .map_err(|_| format!("Invalid price: {}", self.price))?;
        if parsed.is_sign_negative() {
            return Err(format!("Price cannot be negative: {}", self.price));
        }
        Ok((
            category,
            ProductInput {
                name: self.name.clone(),
                price: parsed,
                image: self.image.clone(),
                inspiration: self.inspiration.clone(),
            },
        ))
    }

    fn into_template(self, heading: &'static str, action: String, error: String) -> ProductFormTemplate {
        ProductFormTemplate {
            heading,
            action,
            submit_label: heading,
            name: self.name,
            category: Category::ALL
                .into_iter()
                .find(|c| c.slug() == self.category)
                .unwrap_or(Category::Bags)
                .slug(),
            price: self.price,
            image: self.image,
            inspiration: self.inspiration,
            error: Some(error),
        }
    }
}

fn parse_category(slug: &str) -> Result<Category> {
    slug.parse::<Category>()
        .map_err(|_| AppError::NotFound(format!("category {slug}")))
}

fn sort_links(config: SortConfig<ProductSortField>, query: &ProductsQuery) -> Vec<SortLink> {
    let mut extra = String::new();
    if let Some(filter) = &query.filter {
        extra.push_str(&format!("&filter={filter}"));
    }
    if let Some(q) = &query.q {
        extra.push_str(&format!("&q={}", urlencoding_encode(q)));
    }

    [
        ("Name", ProductSortField::Name),
        ("Price", ProductSortField::Price),
        ("Date Added", ProductSortField::CreatedAt),
    ]
    .into_iter()
    .map(|(label, field)| {
        SortLink::build(
            label,
            "/products",
            field,
            ProductSortField::slug,
            config,
            SortDirection::Asc,
            &extra,
        )
    })
    .collect()
}

/// Minimal query-string escaping for the preserved search text.
fn urlencoding_encode(raw: &str) -> String {
    raw.replace('%', "%25").replace('&', "%26").replace(' ', "%20")
}

/// Products list page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Response {
    let items = match state.api().all_products().await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            Vec::new()
        }
    };

    let (filter, q, config) = query.resolve();
    let narrowed = pipeline::apply(items, filter, &q, config);

    ProductsIndexTemplate {
        count: narrowed.len(),
        products: narrowed.iter().map(ProductCardView::from).collect(),
        query: q,
        filter: filter.slug(),
        sort_links: sort_links(config, &query),
    }
    .into_response()
}

/// Blank product form.
pub async fn new() -> impl IntoResponse {
    ProductFormTemplate::blank()
}

/// Create a product, then redirect to the list for a full resync.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let (category, input) = match form.parse() {
        Ok(parsed) => parsed,
        Err(message) => {
            return Ok(form
                .into_template("Create Product", "/products".to_string(), message)
                .into_response());
        }
    };

    match state.api().create_product(category, &input).await {
        Ok(()) => Ok(Redirect::to("/products").into_response()),
        Err(e) => {
            tracing::error!("Create failed: {e}");
            Ok(form
                .into_template(
                    "Create Product",
                    "/products".to_string(),
                    "The product could not be created. Please try again.".to_string(),
                )
                .into_response())
        }
    }
}

/// Pre-filled edit form for an existing product.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i32)>,
) -> Result<Response> {
    let category = parse_category(&category)?;
    let id = ProductId::new(id);

    let items = state.api().products(category).await?;
    let Some(item) = items.iter().find(|item| item.id == id) else {
        return Err(AppError::NotFound(format!("product {id}")));
    };

    Ok(ProductFormTemplate::for_item(item).into_response())
}

/// Update a product, then redirect to the list for a full resync.
///
/// The form's category is the REST discriminator, as in the create path; a
/// changed category re-targets the sub-resource.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i32)>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let action = format!("/products/{category}/{id}");
    parse_category(&category)?;
    let id = ProductId::new(id);

    let (target, input) = match form.parse() {
        Ok(parsed) => parsed,
        Err(message) => {
            return Ok(form
                .into_template("Update Product", action, message)
                .into_response());
        }
    };

    match state.api().update_product(target, id, &input).await {
        Ok(()) => Ok(Redirect::to("/products").into_response()),
        Err(e) => {
            tracing::error!("Update failed: {e}");
            Ok(form
                .into_template(
                    "Update Product",
                    action,
                    "The product could not be updated. Please try again.".to_string(),
                )
                .into_response())
        }
    }
}

/// Delete a product, then redirect to the list.
///
/// The destructive confirmation happens in the template before this request
/// is ever issued; a failed delete is logged and leaves the list unchanged.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path((category, id)): Path<(String, i32)>,
) -> Result<Response> {
    let category = parse_category(&category)?;

    if let Err(e) = state
        .api()
        .delete_product(category, ProductId::new(id))
        .await
    {
        tracing::error!("Delete failed: {e}");
    }
    Ok(Redirect::to("/products").into_response())
}
