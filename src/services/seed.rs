//! Demo data for a fresh installation.
//!
//! Records go through the regular services so every rule (uniqueness, team
//! auto-fill) applies to the sample set as well.

use chrono::{Duration, NaiveDate};

use super::Services;
use crate::{
    error::AppResult,
    models::{
        equipment::CreateEquipment,
        request::{CreateRequest, RequestStatus, RequestType, UpdateRequest},
        team::CreateTeam,
    },
};

/// What a seeding run inserted
#[derive(Debug, Default, PartialEq)]
pub struct SeedReport {
    pub teams: usize,
    pub equipment: usize,
    pub requests: usize,
}

struct SampleEquipment {
    name: &'static str,
    serial_number: &'static str,
    department: &'static str,
    location: &'static str,
    purchase_date: &'static str,
    warranty_expiry: Option<&'static str>,
    team: usize,
}

struct SampleRequest {
    title: &'static str,
    description: &'static str,
    equipment: usize,
    technician: &'static str,
    request_type: RequestType,
    status: RequestStatus,
    scheduled_in_days: i64,
    duration: i32,
}

const TEAMS: [(&str, &str); 3] = [
    ("Electrical Team", "John Smith, Jane Doe, Bob Johnson"),
    ("Mechanical Team", "Alice Williams, Charlie Brown, David Lee"),
    ("HVAC Team", "Emma Davis, Frank Miller, Grace Wilson"),
];

const EQUIPMENT: [SampleEquipment; 4] = [
    SampleEquipment {
        name: "Industrial Generator",
        serial_number: "GEN-001",
        department: "Production",
        location: "Building A - Floor 1",
        purchase_date: "2020-01-15",
        warranty_expiry: Some("2025-01-15"),
        team: 0,
    },
    SampleEquipment {
        name: "Conveyor Belt System",
        serial_number: "CONV-002",
        department: "Manufacturing",
        location: "Building B - Floor 2",
        purchase_date: "2019-06-20",
        warranty_expiry: Some("2024-06-20"),
        team: 1,
    },
    SampleEquipment {
        name: "Central Air Conditioning Unit",
        serial_number: "HVAC-003",
        department: "Facilities",
        location: "Building C - Roof",
        purchase_date: "2021-03-10",
        warranty_expiry: Some("2026-03-10"),
        team: 2,
    },
    SampleEquipment {
        name: "Hydraulic Press",
        serial_number: "HYD-004",
        department: "Production",
        location: "Building A - Floor 2",
        purchase_date: "2018-09-05",
        warranty_expiry: None,
        team: 1,
    },
];

const REQUESTS: [SampleRequest; 5] = [
    SampleRequest {
        title: "Generator Oil Change",
        description: "Routine oil change and filter replacement",
        equipment: 0,
        technician: "John Smith",
        request_type: RequestType::Preventive,
        status: RequestStatus::New,
        scheduled_in_days: 5,
        duration: 2,
    },
    SampleRequest {
        title: "Conveyor Belt Repair",
        description: "Belt is making unusual noise, needs inspection",
        equipment: 1,
        technician: "Alice Williams",
        request_type: RequestType::Corrective,
        status: RequestStatus::InProgress,
        scheduled_in_days: 0,
        duration: 4,
    },
    SampleRequest {
        title: "AC Unit Filter Replacement",
        description: "Monthly filter replacement",
        equipment: 2,
        technician: "Emma Davis",
        request_type: RequestType::Preventive,
        status: RequestStatus::Repaired,
        scheduled_in_days: -3,
        duration: 1,
    },
    SampleRequest {
        title: "Overdue Inspection",
        description: "Quarterly inspection that was missed",
        equipment: 3,
        technician: "Charlie Brown",
        request_type: RequestType::Preventive,
        status: RequestStatus::New,
        scheduled_in_days: -10,
        duration: 3,
    },
    SampleRequest {
        title: "Generator Battery Check",
        description: "Check battery voltage and connections",
        equipment: 0,
        technician: "Jane Doe",
        request_type: RequestType::Preventive,
        status: RequestStatus::New,
        scheduled_in_days: 15,
        duration: 1,
    },
];

/// Insert the sample set unless teams already exist.
/// Returns `None` when the database was left untouched.
pub async fn seed_demo_data(services: &Services, today: NaiveDate) -> AppResult<Option<SeedReport>> {
    if services.store.count_teams().await? > 0 {
        tracing::info!("Database already has data, skipping seed");
        return Ok(None);
    }

    let mut report = SeedReport::default();

    let mut team_ids = Vec::with_capacity(TEAMS.len());
    for (name, members) in TEAMS {
        let team = services
            .teams
            .create(&CreateTeam { name: name.to_string(), members: members.to_string() })
            .await?;
        tracing::debug!(team = %team.name, members = team.member_names().len(), "Seeded team");
        team_ids.push(team.id);
        report.teams += 1;
    }

    let mut equipment_ids = Vec::with_capacity(EQUIPMENT.len());
    for sample in &EQUIPMENT {
        let equipment = services
            .equipment
            .create(&CreateEquipment {
                name: sample.name.to_string(),
                serial_number: sample.serial_number.to_string(),
                department: sample.department.to_string(),
                location: sample.location.to_string(),
                purchase_date: Some(sample.purchase_date.to_string()),
                warranty_expiry: sample.warranty_expiry.map(str::to_string),
                maintenance_team_id: team_ids[sample.team],
                is_scrapped: false,
            })
            .await?;
        equipment_ids.push(equipment.id);
        report.equipment += 1;
    }

    for sample in &REQUESTS {
        let scheduled = today + Duration::days(sample.scheduled_in_days);
        let view = services
            .requests
            .create(
                &CreateRequest {
                    title: sample.title.to_string(),
                    description: Some(sample.description.to_string()),
                    equipment_id: equipment_ids[sample.equipment],
                    technician: Some(sample.technician.to_string()),
                    request_type: sample.request_type,
                    scheduled_date: Some(scheduled.to_string()),
                    duration: Some(sample.duration),
                },
                today,
            )
            .await?;

        if sample.status != RequestStatus::New {
            let update = UpdateRequest { status: Some(sample.status), ..Default::default() };
            services.requests.update(view.request.id, &update, today).await?;
        }
        report.requests += 1;
    }

    tracing::info!(
        teams = report.teams,
        equipment = report.equipment,
        requests = report.requests,
        "Database seeded"
    );
    Ok(Some(report))
}
