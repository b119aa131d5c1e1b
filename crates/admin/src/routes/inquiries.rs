//! Custom-order inquiries manager.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use loomline_core::types::{CategoryFilter, InquiryId};
use loomline_core::{
    CustomInquiry, InquirySortField, InquiryStats, SortConfig, SortDirection, pipeline,
};

use crate::filters;
use crate::state::AppState;
use crate::views::{SortLink, format_date};

/// One row of the inquiries table.
pub struct InquiryRowView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub message: String,
    pub date: String,
    pub delete_action: String,
}

impl From<&CustomInquiry> for InquiryRowView {
    fn from(inquiry: &CustomInquiry) -> Self {
        Self {
            id: inquiry.id.as_i32(),
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            phone: inquiry.phone.clone().unwrap_or_else(|| "-".to_string()),
            project_type: inquiry.project_type.clone(),
            message: inquiry.message.clone(),
            date: format_date(inquiry.created_at),
            delete_action: format!("/custom-orders/{}/delete", inquiry.id),
        }
    }
}

/// Inquiries list template.
#[derive(Template, WebTemplate)]
#[template(path = "inquiries/index.html")]
pub struct InquiriesIndexTemplate {
    pub inquiries: Vec<InquiryRowView>,
    pub count: usize,
    pub query: String,
    pub stats: InquiryStats,
    pub sort_links: Vec<SortLink>,
}

/// Inquiries list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct InquiriesQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl InquiriesQuery {
    /// Resolve into pipeline configuration; defaults to date descending.
    fn resolve(&self) -> (String, SortConfig<InquirySortField>) {
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
            .unwrap_or(SortDirection::Desc);
        (query, SortConfig::new(field, direction))
    }
}

fn sort_links(config: SortConfig<InquirySortField>, query: &InquiriesQuery) -> Vec<SortLink> {
    let extra = query.q.as_ref().map_or_else(String::new, |q| {
        format!("&q={}", q.replace('%', "%25").replace('&', "%26").replace(' ', "%20"))
    });

    [
        ("Date", InquirySortField::Date),
        ("Name", InquirySortField::Name),
        ("Type", InquirySortField::ProjectType),
    ]
    .into_iter()
    .map(|(label, field)| {
        SortLink::build(
            label,
            "/custom-orders",
            field,
            InquirySortField::slug,
            config,
            SortDirection::Desc,
            &extra,
        )
    })
    .collect()
}

/// Inquiries list page with the volume counters on top.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<InquiriesQuery>,
) -> Response {
    let all = match state.api().inquiries().await {
        Ok(inquiries) => inquiries,
        Err(e) => {
            tracing::error!("Failed to fetch custom orders: {e}");
            Vec::new()
        }
    };
    let stats = match state.api().inquiry_stats().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!("Failed to fetch custom order stats: {e}");
            InquiryStats::default()
        }
    };

    let (q, config) = query.resolve();
    let narrowed = pipeline::apply(all, CategoryFilter::All, &q, config);

    InquiriesIndexTemplate {
        count: narrowed.len(),
        inquiries: narrowed.iter().map(InquiryRowView::from).collect(),
        query: q,
        stats,
        sort_links: sort_links(config, &query),
    }
    .into_response()
}

/// Delete an inquiry, then resync (the stats refresh with the redirect).
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    if let Err(e) = state.api().delete_inquiry(InquiryId::new(id)).await {
        tracing::error!("Failed to delete custom order {id}: {e}");
    }
    Redirect::to("/custom-orders").into_response()
}
