//! Order management commands.

use clap::Subcommand;
use tabled::{Table, Tabled};

use loomline_api::ApiClient;
use loomline_core::types::{CategoryFilter, OrderId, price};
use loomline_core::{Order, OrderSortField, SortConfig, SortDirection, StatusFilter, orders, pipeline};

use super::CliError;

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders
    List {
        /// Status filter (all, pending, completed)
        #[arg(short, long, default_value = "all")]
        status: String,

        /// Search by order id, customer name, or email
        #[arg(short, long, default_value = "")]
        query: String,

        /// Sort field (date, total, name)
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Mark an order completed
    Complete {
        #[arg(long)]
        id: i32,
    },
    /// Mark an order pending again
    Uncomplete {
        #[arg(long)]
        id: i32,
    },
    /// Delete an order (requires --yes)
    Delete {
        #[arg(long)]
        id: i32,
        /// Confirm the destructive action
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Order")]
    id: i32,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.order_id.as_i32(),
            customer: order.customer_name.clone(),
            email: order.customer_email.clone(),
            items: order.items.len(),
            total: price::display(order.total()),
            status: if order.completed { "completed" } else { "pending" },
        }
    }
}

pub async fn run(api: &ApiClient, action: OrderAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrderAction::List {
            status,
            query,
            sort,
            asc,
        } => {
            let status = status
                .parse::<StatusFilter>()
                .map_err(|()| CliError::InvalidArgument(format!("unknown status: {status}")))?;
            let field = sort
                .parse::<OrderSortField>()
                .map_err(|()| CliError::InvalidArgument(format!("unknown sort field: {sort}")))?;
            let direction = if asc { SortDirection::Asc } else { SortDirection::Desc };

            let all = api.orders().await?;
            let narrowed = pipeline::apply(
                orders::filter_by_status(all, status),
                CategoryFilter::All,
                &query,
                SortConfig::new(field, direction),
            );
            let rows: Vec<OrderRow> = narrowed.iter().map(OrderRow::from).collect();
            println!("{}", Table::new(rows));
            println!("{} orders", narrowed.len());
        }
        OrderAction::Complete { id } => {
            api.complete_order(OrderId::new(id)).await?;
            println!("order #{id} marked completed");
        }
        OrderAction::Uncomplete { id } => {
            api.uncomplete_order(OrderId::new(id)).await?;
            println!("order #{id} marked pending");
        }
        OrderAction::Delete { id, yes } => {
            if !yes {
                return Err(CliError::NotConfirmed.into());
            }
            api.delete_order(OrderId::new(id)).await?;
            println!("order #{id} deleted");
        }
    }
    Ok(())
}
