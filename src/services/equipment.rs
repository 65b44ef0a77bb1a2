//! Equipment service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentChanges, EquipmentDetails, NewEquipment,
        UpdateEquipment,
    },
    repository::MaintenanceStore,
    rules,
};

const DUPLICATE_SERIAL: &str = "Serial number already exists";

#[derive(Clone)]
pub struct EquipmentService {
    store: Arc<dyn MaintenanceStore>,
}

impl EquipmentService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    /// List a page of equipment with their request counts
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<EquipmentDetails>> {
        let equipment = self.store.list_equipment(skip, limit).await?;
        let mut result = Vec::with_capacity(equipment.len());
        for eq in equipment {
            result.push(self.with_count(eq).await?);
        }
        Ok(result)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.store
            .find_equipment(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        let equipment = self.get_by_id(id).await?;
        self.with_count(equipment).await
    }

    /// Create equipment; the serial number must be free and the team must exist
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;

        let holder = self.store.find_equipment_by_serial(&data.serial_number).await?;
        rules::ensure_unique(holder.map(|e| e.id), None, DUPLICATE_SERIAL)?;

        let new = NewEquipment::try_from(data)?;
        self.ensure_team_exists(new.maintenance_team_id).await?;

        let equipment = self.store.insert_equipment(&new).await?;
        tracing::info!(
            equipment_id = equipment.id,
            serial_number = %equipment.serial_number,
            "Equipment created"
        );
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let current = self.get_by_id(id).await?;
        let changes = EquipmentChanges::from(data);

        if let Some(ref serial) = changes.serial_number {
            if *serial != current.serial_number {
                let holder = self.store.find_equipment_by_serial(serial).await?;
                rules::ensure_unique(holder.map(|e| e.id), Some(id), DUPLICATE_SERIAL)?;
            }
        }
        if let Some(team_id) = changes.maintenance_team_id {
            self.ensure_team_exists(team_id).await?;
        }
        rules::check_scrapped_flag(current.is_scrapped, changes.is_scrapped)?;

        let equipment = self
            .store
            .update_equipment(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
        tracing::info!(equipment_id = id, "Equipment updated");
        Ok(equipment)
    }

    /// Delete equipment and every request filed against it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.store.delete_equipment(id).await? {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        tracing::info!(equipment_id = id, "Equipment deleted");
        Ok(())
    }

    async fn ensure_team_exists(&self, team_id: i32) -> AppResult<()> {
        match self.store.find_team(team_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("Team {} not found", team_id))),
        }
    }

    async fn with_count(&self, equipment: Equipment) -> AppResult<EquipmentDetails> {
        let maintenance_count = self.store.count_requests_for_equipment(equipment.id).await?;
        Ok(EquipmentDetails { equipment, maintenance_count })
    }
}
