//! Custom-order inquiry commands.

use clap::Subcommand;
use tabled::{Table, Tabled};

use loomline_api::ApiClient;
use loomline_core::types::{CategoryFilter, InquiryId};
use loomline_core::{CustomInquiry, InquirySortField, SortConfig, SortDirection, pipeline};

use super::CliError;

#[derive(Subcommand)]
pub enum InquiryAction {
    /// List custom-order inquiries
    List {
        /// Search across id, name, email, phone, project type, and message
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Show inquiry volume counters
    Stats,
    /// Delete an inquiry (requires --yes)
    Delete {
        #[arg(long)]
        id: i32,
        /// Confirm the destructive action
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Tabled)]
struct InquiryRow {
    #[tabled(rename = "ID")]
    id: i32,
    #[tabled(rename = "Client")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Received")]
    received: String,
}

impl From<&CustomInquiry> for InquiryRow {
    fn from(inquiry: &CustomInquiry) -> Self {
        Self {
            id: inquiry.id.as_i32(),
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            project: inquiry.project_type.clone(),
            received: inquiry.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

pub async fn run(api: &ApiClient, action: InquiryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        InquiryAction::List { query } => {
            let all = api.inquiries().await?;
            let narrowed = pipeline::apply(
                all,
                CategoryFilter::All,
                &query,
                SortConfig::new(InquirySortField::default(), SortDirection::Desc),
            );
            let rows: Vec<InquiryRow> = narrowed.iter().map(InquiryRow::from).collect();
            println!("{}", Table::new(rows));
            println!("{} inquiries", narrowed.len());
        }
        InquiryAction::Stats => {
            let stats = api.inquiry_stats().await?;
            println!("total inquiries: {}", stats.total);
            println!("recent (7 days): {}", stats.recent);
        }
        InquiryAction::Delete { id, yes } => {
            if !yes {
                return Err(CliError::NotConfirmed.into());
            }
            api.delete_inquiry(InquiryId::new(id)).await?;
            println!("custom order #{id} deleted");
        }
    }
    Ok(())
}
