//! Equipment model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::dates;
use crate::error::{AppError, AppResult};

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Equipment name / description
    pub name: String,
    /// Serial number (unique)
    pub serial_number: String,
    pub department: String,
    pub location: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: Option<NaiveDate>,
    /// Owning maintenance team
    pub maintenance_team_id: i32,
    /// Set once a linked request reaches Scrap; never reset
    pub is_scrapped: bool,
}

/// Equipment with the number of maintenance requests filed against it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentDetails {
    #[serde(flatten)]
    pub equipment: Equipment,
    pub maintenance_count: i64,
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "serial_number is required"))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    /// Purchase date (YYYY-MM-DD)
    pub purchase_date: Option<String>,
    /// Warranty expiry (YYYY-MM-DD)
    pub warranty_expiry: Option<String>,
    #[serde(alias = "team_id")]
    pub maintenance_team_id: i32,
    #[serde(default)]
    pub is_scrapped: bool,
}

/// Update equipment request. Only the fields present are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "serial_number must not be empty"))]
    pub serial_number: Option<String>,
    #[validate(length(min = 1, message = "department must not be empty"))]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,
    /// Purchase date (YYYY-MM-DD); malformed values leave it unchanged
    pub purchase_date: Option<String>,
    /// Warranty expiry (YYYY-MM-DD); null or malformed clears it
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub warranty_expiry: Option<Option<String>>,
    #[serde(alias = "team_id")]
    pub maintenance_team_id: Option<i32>,
    pub is_scrapped: Option<bool>,
}

/// Query parameters for the equipment list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl EquipmentQuery {
    pub const DEFAULT_LIMIT: i64 = 100;
    pub const MAX_LIMIT: i64 = 1000;

    /// (offset, limit) with defaults applied and bounds clamped
    pub fn window(&self) -> (i64, i64) {
        let skip = self.skip.unwrap_or(0).max(0);
        let limit = self
            .limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(0, Self::MAX_LIMIT);
        (skip, limit)
    }
}

/// Validated equipment ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    pub name: String,
    pub serial_number: String,
    pub department: String,
    pub location: String,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: Option<NaiveDate>,
    pub maintenance_team_id: i32,
    pub is_scrapped: bool,
}

impl TryFrom<&CreateEquipment> for NewEquipment {
    type Error = AppError;

    fn try_from(data: &CreateEquipment) -> AppResult<Self> {
        let purchase_date = dates::parse_lenient(data.purchase_date.as_deref())
            .ok_or_else(|| AppError::Validation("purchase_date is required".to_string()))?;

        Ok(Self {
            name: data.name.clone(),
            serial_number: data.serial_number.clone(),
            department: data.department.clone(),
            location: data.location.clone(),
            purchase_date,
            warranty_expiry: dates::parse_lenient(data.warranty_expiry.as_deref()),
            maintenance_team_id: data.maintenance_team_id,
            is_scrapped: data.is_scrapped,
        })
    }
}

/// Resolved column changes for an equipment update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentChanges {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<Option<NaiveDate>>,
    pub maintenance_team_id: Option<i32>,
    pub is_scrapped: Option<bool>,
}

impl From<&UpdateEquipment> for EquipmentChanges {
    fn from(data: &UpdateEquipment) -> Self {
        Self {
            name: data.name.clone(),
            serial_number: data.serial_number.clone(),
            department: data.department.clone(),
            location: data.location.clone(),
            purchase_date: dates::parse_lenient(data.purchase_date.as_deref()),
            warranty_expiry: dates::parse_update(&data.warranty_expiry),
            maintenance_team_id: data.maintenance_team_id,
            is_scrapped: data.is_scrapped,
        }
    }
}

impl EquipmentChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
