use async_trait::async_trait;
use derive_new::new;

use kernel::model::{
    availability::{
        event::{CreateAvailabilityRule, CreateUnavailability, DeleteUnavailability},
        AvailabilityRule, AvailabilitySchedule, UnavailabilityWindow,
    },
    id::{AvailabilityId, FacilityId, UnavailabilityId},
};
use kernel::repository::availability::AvailabilityRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::availability::{AvailabilityRuleRow, UnavailabilityRow},
    ConnectionPool,
};

#[derive(new)]
pub struct AvailabilityRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AvailabilityRepository for AvailabilityRepositoryImpl {
    async fn create_rule(&self, event: CreateAvailabilityRule) -> AppResult<AvailabilityId> {
        let availability_id = AvailabilityId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO facility_availability
                (availability_id, facility_id, day_of_week, start_time, end_time,
                 is_available, advance_booking_days, minimum_booking_duration,
                 maximum_booking_duration, buffer_time_before, buffer_time_after)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(availability_id)
        .bind(event.facility_id)
        .bind(event.day_of_week)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.is_available)
        .bind(event.advance_booking_days)
        .bind(event.minimum_booking_duration)
        .bind(event.maximum_booking_duration)
        .bind(event.buffer_time_before)
        .bind(event.buffer_time_after)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No availability rule has been created".into(),
            ));
        }

        Ok(availability_id)
    }

    async fn find_rules_by_facility_id(
        &self,
        facility_id: FacilityId,
    ) -> AppResult<Vec<AvailabilityRule>> {
        let rows: Vec<AvailabilityRuleRow> = sqlx::query_as(
            r#"
                SELECT
                    availability_id,
                    facility_id,
                    day_of_week,
                    start_time,
                    end_time,
                    is_available,
                    advance_booking_days,
                    minimum_booking_duration,
                    maximum_booking_duration,
                    buffer_time_before,
                    buffer_time_after
                FROM facility_availability
                WHERE facility_id = $1
                ORDER BY day_of_week ASC, start_time ASC
            "#,
        )
        .bind(facility_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(AvailabilityRule::from).collect())
    }

    async fn create_unavailability(
        &self,
        event: CreateUnavailability,
    ) -> AppResult<UnavailabilityId> {
        let unavailability_id = UnavailabilityId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO facility_unavailability
                (unavailability_id, facility_id, start_time, end_time, reason,
                 description, is_recurring, created_by)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(unavailability_id)
        .bind(event.facility_id)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(event.reason)
        .bind(event.description)
        .bind(event.is_recurring)
        .bind(event.created_by)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No unavailability record has been created".into(),
            ));
        }

        Ok(unavailability_id)
    }

    async fn find_unavailability_by_facility_id(
        &self,
        facility_id: FacilityId,
    ) -> AppResult<Vec<UnavailabilityWindow>> {
        let rows: Vec<UnavailabilityRow> = sqlx::query_as(
            r#"
                SELECT
                    unavailability_id,
                    facility_id,
                    start_time,
                    end_time,
                    reason,
                    description,
                    is_recurring,
                    created_by
                FROM facility_unavailability
                WHERE facility_id = $1
                ORDER BY start_time ASC
            "#,
        )
        .bind(facility_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(UnavailabilityWindow::from).collect())
    }

    async fn delete_unavailability(&self, event: DeleteUnavailability) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM facility_unavailability
                WHERE unavailability_id = $1 AND facility_id = $2
            "#,
        )
        .bind(event.unavailability_id)
        .bind(event.facility_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "ブラックアウト（{}）が見つかりませんでした。",
                event.unavailability_id
            )));
        }

        Ok(())
    }

    async fn load_schedule(&self, facility_id: FacilityId) -> AppResult<AvailabilitySchedule> {
        let rules = self.find_rules_by_facility_id(facility_id).await?;
        let blackouts = self.find_unavailability_by_facility_id(facility_id).await?;
        Ok(AvailabilitySchedule::new(rules, blackouts))
    }
}
