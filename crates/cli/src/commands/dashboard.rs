//! Store overview command.

use loomline_api::ApiClient;
use loomline_core::types::price;

pub async fn run(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let stats = api.dashboard_stats().await?;
    println!("products:  {}", stats.total_products);
    println!("orders:    {}", stats.total_orders);
    println!("customers: {}", stats.total_customers);
    println!("revenue:   {}", price::display(stats.revenue));

    let recent = api.recent_orders().await?;
    if !recent.is_empty() {
        println!("\nrecent orders:");
        for order in &recent {
            println!(
                "  #{} {} - {} item(s), {} [{}]",
                order.order_id,
                order.customer_name,
                order.items.len(),
                price::display(order.total()),
                if order.completed { "completed" } else { "pending" }
            );
        }
    }
    Ok(())
}
