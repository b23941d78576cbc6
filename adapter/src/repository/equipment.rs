use async_trait::async_trait;
use derive_new::new;

use kernel::model::{
    equipment::{
        event::{CreateEquipment, UpdateEquipmentCondition},
        FacilityEquipment,
    },
    id::{EquipmentId, FacilityId},
};
use kernel::repository::equipment::EquipmentRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::equipment::EquipmentRow, ConnectionPool};

#[derive(new)]
pub struct EquipmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EquipmentRepository for EquipmentRepositoryImpl {
    async fn create(&self, event: CreateEquipment) -> AppResult<EquipmentId> {
        let equipment_id = EquipmentId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO facility_equipment
                (equipment_id, facility_id, equipment_name, category, quantity, condition)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(equipment_id)
        .bind(event.facility_id)
        .bind(event.equipment_name)
        .bind(event.category)
        .bind(event.quantity)
        .bind(event.condition)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No equipment record has been created".into(),
            ));
        }

        Ok(equipment_id)
    }

    async fn find_by_facility_id(
        &self,
        facility_id: FacilityId,
    ) -> AppResult<Vec<FacilityEquipment>> {
        let rows: Vec<EquipmentRow> = sqlx::query_as(
            r#"
                SELECT
                    equipment_id,
                    facility_id,
                    equipment_name,
                    category,
                    quantity,
                    condition,
                    last_maintenance_date,
                    next_maintenance_date,
                    is_available
                FROM facility_equipment
                WHERE facility_id = $1
                ORDER BY equipment_name ASC
            "#,
        )
        .bind(facility_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(FacilityEquipment::from).collect())
    }

    async fn update_condition(&self, event: UpdateEquipmentCondition) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE facility_equipment
                SET
                    condition = $3,
                    last_maintenance_date = COALESCE($4, last_maintenance_date),
                    next_maintenance_date = COALESCE($5, next_maintenance_date)
                WHERE equipment_id = $1 AND facility_id = $2
            "#,
        )
        .bind(event.equipment_id)
        .bind(event.facility_id)
        .bind(event.condition)
        .bind(event.last_maintenance_date)
        .bind(event.next_maintenance_date)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "備品（{}）が見つかりませんでした。",
                event.equipment_id
            )));
        }

        Ok(())
    }
}
