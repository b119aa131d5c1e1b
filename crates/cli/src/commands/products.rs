//! Product mutation commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use loomline_api::{ApiClient, ProductInput};
use loomline_core::types::{Category, ProductId};

use super::CliError;

#[derive(Subcommand)]
pub enum ProductAction {
    /// Create a product
    Create {
        /// Category sub-resource (bags, tshirts, hoodies)
        #[arg(short, long)]
        category: String,
        #[arg(short, long)]
        name: String,
        /// Price in Ksh, e.g. 950 or 950.50
        #[arg(short, long)]
        price: String,
        #[arg(short, long, default_value = "")]
        image: String,
        /// Theme label, e.g. "ocean"
        #[arg(long, default_value = "")]
        inspiration: String,
    },
    /// Update an existing product
    Update {
        #[arg(short, long)]
        category: String,
        #[arg(long)]
        id: i32,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        price: String,
        #[arg(short, long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        inspiration: String,
    },
    /// Delete a product (requires --yes)
    Delete {
        #[arg(short, long)]
        category: String,
        #[arg(long)]
        id: i32,
        /// Confirm the destructive action
        #[arg(long)]
        yes: bool,
    },
}

fn parse_category(slug: &str) -> Result<Category, CliError> {
    slug.parse::<Category>()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))
}

fn parse_price(raw: &str) -> Result<Decimal, CliError> {
    let price = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| CliError::InvalidArgument(format!("invalid price: {raw}")))?;
    if price.is_sign_negative() {
        return Err(CliError::InvalidArgument(format!(
            "price cannot be negative: {raw}"
        )));
    }
    Ok(price)
}

pub async fn run(api: &ApiClient, action: ProductAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductAction::Create {
            category,
            name,
            price,
            image,
            inspiration,
        } => {
            let category = parse_category(&category)?;
            let input = ProductInput {
                name,
                price: parse_price(&price)?,
                image,
                inspiration,
            };
            api.create_product(category, &input).await?;
            println!("created {} product \"{}\"", category.slug(), input.name);
        }
        ProductAction::Update {
            category,
            id,
            name,
            price,
            image,
            inspiration,
        } => {
            let category = parse_category(&category)?;
            let input = ProductInput {
                name,
                price: parse_price(&price)?,
                image,
                inspiration,
            };
            api.update_product(category, ProductId::new(id), &input).await?;
            println!("updated {} product #{id}", category.slug());
        }
        ProductAction::Delete { category, id, yes } => {
            if !yes {
                return Err(CliError::NotConfirmed.into());
            }
            let category = parse_category(&category)?;
            api.delete_product(category, ProductId::new(id)).await?;
            println!("deleted {} product #{id}", category.slug());
        }
    }
    Ok(())
}
