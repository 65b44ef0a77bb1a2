//! Maintenance team model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Maintenance team record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub id: i32,
    /// Team name (unique)
    pub name: String,
    /// Comma-separated technician names
    pub members: String,
}

impl Team {
    /// Technician names, trimmed, empty entries dropped
    pub fn member_names(&self) -> Vec<&str> {
        self.members
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect()
    }
}

/// Create team request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTeam {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub members: String,
}

/// Update team request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTeam {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub members: Option<String>,
}
