use async_trait::async_trait;
use derive_new::new;

use kernel::model::{
    facility::{
        event::{CreateFacility, DeactivateFacility, UpdateFacility},
        Facility,
    },
    id::FacilityId,
};
use kernel::repository::facility::FacilityRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::facility::FacilityRow, ConnectionPool};

#[derive(new)]
pub struct FacilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl FacilityRepository for FacilityRepositoryImpl {
    async fn create(&self, event: CreateFacility) -> AppResult<FacilityId> {
        let facility_id = FacilityId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO facilities
                (facility_id, facility_name, facility_type, address, capacity,
                 hourly_rate, amenities)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(facility_id)
        .bind(event.facility_name)
        .bind(event.facility_type)
        .bind(event.address)
        .bind(event.capacity)
        .bind(event.hourly_rate)
        .bind(event.amenities)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No facility record has been created".into(),
            ));
        }

        Ok(facility_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Facility>> {
        let rows: Vec<FacilityRow> = sqlx::query_as(
            r#"
                SELECT
                    facility_id,
                    facility_name,
                    facility_type,
                    address,
                    capacity,
                    hourly_rate,
                    amenities,
                    is_active
                FROM facilities
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Facility::from).collect())
    }

    async fn find_by_id(&self, facility_id: FacilityId) -> AppResult<Option<Facility>> {
        let row: Option<FacilityRow> = sqlx::query_as(
            r#"
                SELECT
                    facility_id,
                    facility_name,
                    facility_type,
                    address,
                    capacity,
                    hourly_rate,
                    amenities,
                    is_active
                FROM facilities
                WHERE facility_id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Facility::from))
    }

    async fn update(&self, event: UpdateFacility) -> AppResult<()> {
        // 指定のなかった項目は既存の値を保つ
        let res = sqlx::query(
            r#"
                UPDATE facilities
                SET
                    facility_name = COALESCE($2, facility_name),
                    facility_type = COALESCE($3, facility_type),
                    address = COALESCE($4, address),
                    capacity = COALESCE($5, capacity),
                    hourly_rate = COALESCE($6, hourly_rate),
                    amenities = COALESCE($7, amenities)
                WHERE facility_id = $1
            "#,
        )
        .bind(event.facility_id)
        .bind(event.facility_name)
        .bind(event.facility_type)
        .bind(event.address)
        .bind(event.capacity)
        .bind(event.hourly_rate)
        .bind(event.amenities)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "施設（{}）が見つかりませんでした。",
                event.facility_id
            )));
        }

        Ok(())
    }

    async fn deactivate(&self, event: DeactivateFacility) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE facilities
                SET is_active = FALSE
                WHERE facility_id = $1
            "#,
        )
        .bind(event.facility_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "施設（{}）が見つかりませんでした。",
                event.facility_id
            )));
        }

        Ok(())
    }
}
