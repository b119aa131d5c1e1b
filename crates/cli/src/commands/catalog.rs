//! Catalog browsing commands.

use clap::Subcommand;
use tabled::{Table, Tabled};

use loomline_api::ApiClient;
use loomline_core::types::{Category, CategoryFilter, price};
use loomline_core::{CatalogItem, ProductSortField, SortConfig, SortDirection, group_by_inspiration, pipeline};

use super::CliError;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List catalog items through the filter/search/sort pipeline
    List {
        /// Restrict to one category (bags, tshirts, hoodies)
        #[arg(short, long)]
        category: Option<String>,

        /// Free-text search across name, inspiration, and category
        #[arg(short, long, default_value = "")]
        query: String,

        /// Sort field (name, price, created_at)
        #[arg(short, long, default_value = "name")]
        sort: String,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },
    /// Show one representative item per inspiration theme
    Themes {
        /// Category to group (bags, tshirts, hoodies)
        #[arg(short, long)]
        category: String,
    },
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Inspiration")]
    inspiration: String,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&CatalogItem> for ItemRow {
    fn from(item: &CatalogItem) -> Self {
        Self {
            id: item.id.as_i32(),
            category: item.category.slug(),
            name: item.name.clone(),
            inspiration: item.inspiration.clone(),
            price: price::display(item.price),
        }
    }
}

fn parse_category(slug: &str) -> Result<Category, CliError> {
    slug.parse::<Category>()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))
}

pub async fn run(api: &ApiClient, action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::List {
            category,
            query,
            sort,
            desc,
        } => {
            let (filter, items) = match category.as_deref() {
                Some(slug) => {
                    let category = parse_category(slug)?;
                    (CategoryFilter::Only(category), api.products(category).await?)
                }
                None => (CategoryFilter::All, api.all_products().await?),
            };

            let field = sort
                .parse::<ProductSortField>()
                .map_err(|()| CliError::InvalidArgument(format!("unknown sort field: {sort}")))?;
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };

            let narrowed = pipeline::apply(items, filter, &query, SortConfig::new(field, direction));
            let rows: Vec<ItemRow> = narrowed.iter().map(ItemRow::from).collect();
            println!("{}", Table::new(rows));
            println!("{} items", narrowed.len());
        }
        CatalogAction::Themes { category } => {
            let category = parse_category(&category)?;
            let items = api.products(category).await?;
            let themes = group_by_inspiration(items);
            let rows: Vec<ItemRow> = themes.iter().map(ItemRow::from).collect();
            println!("{}", Table::new(rows));
            println!("{} themes", themes.len());
        }
    }
    Ok(())
}
