//! Maintenance request (work order) model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::dates;
use crate::rules;

/// Kind of maintenance work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Corrective => "Corrective",
            RequestType::Preventive => "Preventive",
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Corrective" => Ok(RequestType::Corrective),
            "Preventive" => Ok(RequestType::Preventive),
            _ => Err(format!("Invalid request type: {}", s)),
        }
    }
}

/// Lifecycle status of a request. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum RequestStatus {
    #[default]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Repaired,
    Scrap,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Repaired,
        RequestStatus::Scrap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "New",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Repaired => "Repaired",
            RequestStatus::Scrap => "Scrap",
        }
    }

    /// Repaired and Scrap end overdue tracking
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Repaired | RequestStatus::Scrap)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(RequestStatus::New),
            "In Progress" => Ok(RequestStatus::InProgress),
            "Repaired" => Ok(RequestStatus::Repaired),
            "Scrap" => Ok(RequestStatus::Scrap),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

// SQLx conversions: both enums are stored as TEXT
macro_rules! text_column {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

text_column!(RequestType);
text_column!(RequestStatus);

/// Maintenance request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub equipment_id: i32,
    /// Copied from the equipment when the request was created
    pub team_id: i32,
    pub technician: Option<String>,
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub scheduled_date: Option<NaiveDate>,
    /// Duration in hours
    pub duration: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        rules::is_overdue(self.scheduled_date, self.status, today)
    }
}

/// Request as returned to clients, with the overdue flag computed for today
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub is_overdue: bool,
}

impl RequestView {
    pub fn new(request: MaintenanceRequest, today: NaiveDate) -> Self {
        let is_overdue = request.is_overdue(today);
        Self { request, is_overdue }
    }
}

/// Create request payload. The team is taken from the equipment.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub equipment_id: i32,
    pub technician: Option<String>,
    pub request_type: RequestType,
    /// Scheduled date (YYYY-MM-DD); malformed values are ignored
    pub scheduled_date: Option<String>,
    /// Duration in hours
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: Option<i32>,
}

/// Update request payload. Only the fields present are changed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub technician: Option<Option<String>>,
    pub request_type: Option<RequestType>,
    pub status: Option<RequestStatus>,
    /// Scheduled date (YYYY-MM-DD); null or malformed clears it
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub scheduled_date: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    #[validate(range(min = 0, message = "duration must not be negative"))]
    pub duration: Option<Option<i32>>,
}

/// Filters for the request list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RequestQuery {
    pub equipment_id: Option<i32>,
    #[param(value_type = Option<String>)]
    pub status: Option<RequestStatus>,
}

/// Validated request ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequest {
    pub title: String,
    pub description: Option<String>,
    pub equipment_id: i32,
    pub team_id: i32,
    pub technician: Option<String>,
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub scheduled_date: Option<NaiveDate>,
    pub duration: Option<i32>,
}

impl NewRequest {
    /// Build the row from the payload and the owning equipment's team
    pub fn new(data: &CreateRequest, team_id: i32) -> Self {
        Self {
            title: data.title.clone(),
            description: data.description.clone(),
            equipment_id: data.equipment_id,
            team_id,
            technician: data.technician.clone(),
            request_type: data.request_type,
            status: RequestStatus::New,
            scheduled_date: dates::parse_lenient(data.scheduled_date.as_deref()),
            duration: data.duration,
        }
    }
}

/// Resolved column changes for a request update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub technician: Option<Option<String>>,
    pub request_type: Option<RequestType>,
    pub status: Option<RequestStatus>,
    pub scheduled_date: Option<Option<NaiveDate>>,
    pub duration: Option<Option<i32>>,
}

impl From<&UpdateRequest> for RequestChanges {
    fn from(data: &UpdateRequest) -> Self {
        Self {
            title: data.title.clone(),
            description: data.description.clone(),
            technician: data.technician.clone(),
            request_type: data.request_type,
            status: data.status,
            scheduled_date: dates::parse_update(&data.scheduled_date),
            duration: data.duration,
        }
    }
}
