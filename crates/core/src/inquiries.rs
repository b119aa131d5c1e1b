//! Custom-project inquiries submitted through the contact form.
//!
//! An inquiry is a request for bespoke work, distinct from a catalog order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::Listable;
use crate::types::InquiryId;

/// A custom-project inquiry, as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomInquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Inquiry volume counters shown above the admin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InquiryStats {
    #[serde(default)]
    pub total: u64,
    /// Inquiries received in the last seven days.
    #[serde(default)]
    pub recent: u64,
}

/// Sort fields for the inquiries screen. Defaults to date, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InquirySortField {
    #[default]
    Date,
    Name,
    ProjectType,
}

impl InquirySortField {
    /// Query-string value for this field.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Name => "name",
            Self::ProjectType => "type",
        }
    }
}

impl std::str::FromStr for InquirySortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "type" => Ok(Self::ProjectType),
            _ => Err(()),
        }
    }
}

impl Listable for CustomInquiry {
    type SortField = InquirySortField;

    fn search_terms(&self) -> Vec<String> {
        let mut terms = vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.project_type.clone(),
            self.message.clone(),
        ];
        if let Some(phone) = &self.phone {
            terms.push(phone.clone());
        }
        terms
    }

    fn compare(&self, other: &Self, field: InquirySortField) -> Ordering {
        match field {
            InquirySortField::Date => self.created_at.cmp(&other.created_at),
            InquirySortField::Name => self.name.cmp(&other.name),
            InquirySortField::ProjectType => self.project_type.cmp(&other.project_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{self, SortConfig, SortDirection};
    use crate::types::CategoryFilter;

    fn inquiry(id: i32, name: &str, project_type: &str, day: u32) -> CustomInquiry {
        CustomInquiry {
            id: InquiryId::new(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: Some("+254700000000".to_string()),
            project_type: project_type.to_string(),
            message: "Looking for a team order".to_string(),
            created_at: format!("2025-03-{day:02}T10:00:00Z")
                .parse()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn test_search_covers_all_fields() {
        let items = vec![inquiry(1, "Ada", "hoodies", 1), inquiry(2, "Grace", "bags", 2)];
        assert_eq!(pipeline::search(items.clone(), "team order").len(), 2);
        assert_eq!(pipeline::search(items.clone(), "+2547").len(), 2);
        assert_eq!(pipeline::search(items.clone(), "hoodies").len(), 1);
        assert_eq!(pipeline::search(items, "grace@").len(), 1);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let items = vec![inquiry(1, "a", "x", 1), inquiry(2, "b", "x", 9)];
        let sorted = pipeline::apply(
            items,
            CategoryFilter::All,
            "",
            SortConfig::new(InquirySortField::default(), SortDirection::Desc),
        );
        let ids: Vec<i32> = sorted.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
