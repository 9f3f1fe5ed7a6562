use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::services::context::WriteAccess;

// Label models
#[derive(Queryable, Selectable, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = crate::schema::labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Label {
    pub id: i64,
    #[diesel(column_name = repo_id)]
    pub repository_id: i64,
    pub name: String,
    pub color: String,
}

impl Label {
    /// Applies the non-empty fields of an edit; empty or missing fields keep
    /// their stored value.
    pub fn merge(&mut self, name: Option<&str>, color: Option<&str>) {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(color) = color.filter(|c| !c.is_empty()) {
            self.color = color.to_string();
        }
    }
}

/// A label that has not been persisted yet. The owning repository comes from
/// a write grant, never from the request body.
#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::labels)]
pub struct NewLabel {
    #[diesel(column_name = repo_id)]
    pub(crate) repository_id: i64,
    pub(crate) name: String,
    pub(crate) color: String,
}

impl NewLabel {
    pub fn new(grant: &WriteAccess<'_>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            repository_id: grant.repository_id(),
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn repository_id(&self) -> i64 {
        self.repository_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Externally visible form of a label.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LabelResponse {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub repository_id: i64,
    pub url: String,
}

impl LabelResponse {
    pub fn from_label(label: &Label, api_base_url: &str) -> Self {
        Self {
            id: label.id,
            name: label.name.clone(),
            color: label.color.clone(),
            repository_id: label.repository_id,
            url: format!(
                "{}/repos/{}/labels/{}",
                api_base_url.trim_end_matches('/'),
                label.repository_id,
                label.id
            ),
        }
    }
}
