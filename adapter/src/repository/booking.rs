use async_trait::async_trait;
use chrono::{Duration, Utc};
use derive_new::new;
use rust_decimal::Decimal;
use sqlx::types::Json;

use kernel::model::{
    availability::AvailabilitySchedule,
    booking::{
        event::{
            CancelBooking, CheckInBooking, CheckOutBooking, CompleteBooking, ConfirmBooking,
            CreateBooking, RescheduleBooking,
        },
        BookingStatus, BookingWindow, CreatedBooking, FacilityBooking, PaymentStatus,
    },
    booking_update::{broadcast_channels, BookingSnapshot, BookingUpdateType},
    conflict::{
        detect, ActiveBooking, BookingConflict, ConflictType, DetectedConflict, ProposedBooking,
    },
    equipment::FacilityEquipment,
    id::{BookingId, BookingUpdateId, ConflictId, FacilityId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::{
    config::BookingConfig,
    error::{AppError, AppResult},
};

use crate::database::{
    model::{
        booking::{ActiveBookingRow, BookingRow},
        conflict::ConflictRow,
    },
    ConnectionPool,
};

type PgTx<'a> = sqlx::Transaction<'a, sqlx::Postgres>;

// 予約一覧・詳細の SELECT 句。施設情報を JOIN して返す
const BOOKING_SELECT: &str = r#"
    SELECT
        b.booking_id,
        b.facility_id,
        b.team_id,
        b.booked_by,
        b.title,
        b.description,
        b.start_time,
        b.end_time,
        b.status,
        b.payment_status,
        b.attendee_count,
        b.equipment_needed,
        b.cost,
        b.checked_in_at,
        b.checked_out_at,
        f.facility_name,
        f.facility_type,
        f.capacity AS facility_capacity,
        f.is_active AS facility_is_active
    FROM facility_bookings AS b
    INNER JOIN facilities AS f ON b.facility_id = f.facility_id
"#;

#[derive(sqlx::FromRow)]
struct FacilityStateRow {
    capacity: Option<i32>,
    hourly_rate: Option<Decimal>,
    is_active: bool,
}

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
    config: BookingConfig,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateBooking) -> AppResult<CreatedBooking> {
        let now = Utc::now();
        let window = BookingWindow::new(event.start_time, event.end_time);

        let mut tx = self.db.begin().await?;

        // 検証から書き込みまでを直列化するため、
        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // ① 施設が存在し、稼働中であることを確認する
        let facility = Self::find_facility_tx(&mut tx, event.facility_id).await?;
        if !facility.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "施設（{}）は現在利用できません（is_active = false）",
                event.facility_id
            )));
        }

        // ② 営業時間ルールとブラックアウトに照らして判定する
        let schedule = Self::load_schedule_tx(&mut tx, event.facility_id).await?;
        schedule
            .resolve(&window, now)
            .map_err(|reason| AppError::AvailabilityRejected(reason.to_string()))?;

        // ③ 同施設の保留・確定予約と突き合わせて競合を検出する
        let existing =
            Self::load_active_bookings_tx(&mut tx, event.facility_id, &window, None).await?;
        let stock = Self::load_equipment_tx(&mut tx, event.facility_id).await?;
        let proposed = ProposedBooking {
            window,
            attendee_count: event.attendee_count,
            equipment_needed: event.equipment_needed.clone(),
        };
        let detected = detect(&proposed, &existing, &stock, facility.capacity, now);

        // 競合は記録して返すだけで、既定では予約の成立を妨げない。
        // strict モードのときだけ時間帯の重複で中断する
        if self.config.strict_conflicts
            && detected
                .iter()
                .any(|c| c.conflict_type == ConflictType::TimeOverlap)
        {
            return Err(AppError::UnprocessableEntity(format!(
                "施設（{}）は指定時間帯にすでに予約が存在します。",
                event.facility_id
            )));
        }

        // ④ 予約レコードを作成する
        let booking_id = BookingId::new();
        let cost = facility.hourly_rate.map(|rate| {
            (rate * Decimal::from(window.duration_minutes()) / Decimal::from(60)).round_dp(2)
        });
        let res = sqlx::query(
            r#"
                INSERT INTO facility_bookings
                (booking_id, facility_id, team_id, booked_by, title, description,
                 start_time, end_time, status, payment_status, attendee_count,
                 equipment_needed, cost)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(booking_id)
        .bind(event.facility_id)
        .bind(event.team_id)
        .bind(event.booked_by)
        .bind(event.title)
        .bind(event.description)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(BookingStatus::Pending)
        .bind(PaymentStatus::Pending)
        .bind(event.attendee_count)
        .bind(Json(event.equipment_needed))
        .bind(cost)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_operation_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        // ⑤ 検出した競合を記録する
        Self::insert_conflicts_tx(&mut tx, booking_id, &detected).await?;

        // ⑥ 監査ログを追記する
        let booking = Self::find_booking_tx(&mut tx, booking_id).await?;
        Self::append_update_tx(
            &mut tx,
            &booking,
            BookingUpdateType::Created,
            None,
            event.booked_by,
        )
        .await?;

        let conflicts = Self::find_unresolved_conflicts_tx(&mut tx, booking_id).await?;

        tx.commit().await.map_err(Self::map_commit_error)?;

        Ok(CreatedBooking {
            booking_id,
            conflicts,
        })
    }

    // 予約の時間帯を変更する。新しい時間帯で作成時と同じ検証をやり直す
    async fn reschedule(&self, event: RescheduleBooking) -> AppResult<CreatedBooking> {
        let now = Utc::now();
        let window = BookingWindow::new(event.start_time, event.end_time);

        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let booking = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        if booking.booked_by != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if booking.status.is_terminal() {
            return Err(AppError::UnprocessableEntity(format!(
                "予約（{}）はすでに終了しています。",
                event.booking_id
            )));
        }

        let facility_id = booking.facility.facility_id;
        let facility = Self::find_facility_tx(&mut tx, facility_id).await?;

        let schedule = Self::load_schedule_tx(&mut tx, facility_id).await?;
        schedule
            .resolve(&window, now)
            .map_err(|reason| AppError::AvailabilityRejected(reason.to_string()))?;

        // 自分自身は比較対象から除く
        let existing =
            Self::load_active_bookings_tx(&mut tx, facility_id, &window, Some(event.booking_id))
                .await?;
        let stock = Self::load_equipment_tx(&mut tx, facility_id).await?;
        let proposed = ProposedBooking {
            window,
            attendee_count: booking.attendee_count,
            equipment_needed: booking.equipment_needed.clone(),
        };
        let detected = detect(&proposed, &existing, &stock, facility.capacity, now);

        if self.config.strict_conflicts
            && detected
                .iter()
                .any(|c| c.conflict_type == ConflictType::TimeOverlap)
        {
            return Err(AppError::UnprocessableEntity(format!(
                "施設（{}）は指定時間帯にすでに予約が存在します。",
                facility_id
            )));
        }

        let cost = facility.hourly_rate.map(|rate| {
            (rate * Decimal::from(window.duration_minutes()) / Decimal::from(60)).round_dp(2)
        });
        let previous = BookingSnapshot::from(&booking);
        let res = sqlx::query(
            r#"
                UPDATE facility_bookings
                SET start_time = $2, end_time = $3, cost = $4
                WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(cost)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_operation_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        Self::insert_conflicts_tx(&mut tx, event.booking_id, &detected).await?;

        let updated = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        Self::append_update_tx(
            &mut tx,
            &updated,
            BookingUpdateType::Modified,
            Some(previous),
            event.requested_user,
        )
        .await?;

        let conflicts = Self::find_unresolved_conflicts_tx(&mut tx, event.booking_id).await?;

        tx.commit().await.map_err(Self::map_commit_error)?;

        Ok(CreatedBooking {
            booking_id: event.booking_id,
            conflicts,
        })
    }

    async fn confirm(&self, event: ConfirmBooking) -> AppResult<()> {
        let now = Utc::now();
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let booking = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        if booking.booked_by != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if !booking.can_confirm() {
            return Err(AppError::UnprocessableEntity(format!(
                "予約（{}）は確定できる状態ではありません。",
                event.booking_id
            )));
        }

        // 確定の時点でも予約可能なままであることを確認する
        let schedule = Self::load_schedule_tx(&mut tx, booking.facility.facility_id).await?;
        schedule
            .resolve(&booking.window(), now)
            .map_err(|reason| AppError::AvailabilityRejected(reason.to_string()))?;

        let previous = BookingSnapshot::from(&booking);
        Self::update_status_tx(&mut tx, event.booking_id, BookingStatus::Confirmed).await?;

        let updated = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        Self::append_update_tx(
            &mut tx,
            &updated,
            BookingUpdateType::Modified,
            Some(previous),
            event.requested_user,
        )
        .await?;

        tx.commit().await.map_err(Self::map_commit_error)?;
        Ok(())
    }

    async fn cancel(&self, event: CancelBooking) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let booking = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        if booking.booked_by != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if !booking.can_cancel() {
            return Err(AppError::UnprocessableEntity(format!(
                "予約（{}）はすでに終了しています。",
                event.booking_id
            )));
        }

        let previous = BookingSnapshot::from(&booking);
        Self::update_status_tx(&mut tx, event.booking_id, BookingStatus::Cancelled).await?;

        // この予約を参照する未解決の競合をまとめて解決済みにする
        sqlx::query(
            r#"
                UPDATE booking_conflicts
                SET
                    is_resolved = TRUE,
                    resolved_by = $2,
                    resolved_at = $3,
                    resolution = 'booking cancelled'
                WHERE (booking_id = $1 OR conflicting_booking_id = $1)
                  AND is_resolved = FALSE
            "#,
        )
        .bind(event.booking_id)
        .bind(event.requested_user)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(Self::map_operation_error)?;

        let updated = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        Self::append_update_tx(
            &mut tx,
            &updated,
            BookingUpdateType::Cancelled,
            Some(previous),
            event.requested_user,
        )
        .await?;

        tx.commit().await.map_err(Self::map_commit_error)?;
        Ok(())
    }

    async fn complete(&self, event: CompleteBooking) -> AppResult<()> {
        let now = Utc::now();
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let booking = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        if booking.booked_by != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if !booking.can_complete(now) {
            return Err(AppError::UnprocessableEntity(format!(
                "予約（{}）は完了できる状態ではありません。",
                event.booking_id
            )));
        }

        let previous = BookingSnapshot::from(&booking);
        Self::update_status_tx(&mut tx, event.booking_id, BookingStatus::Completed).await?;

        let updated = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        Self::append_update_tx(
            &mut tx,
            &updated,
            BookingUpdateType::Modified,
            Some(previous),
            event.requested_user,
        )
        .await?;

        tx.commit().await.map_err(Self::map_commit_error)?;
        Ok(())
    }

    async fn check_in(&self, event: CheckInBooking) -> AppResult<()> {
        let now = Utc::now();
        let grace = Duration::minutes(self.config.check_in_grace_minutes);

        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let booking = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        if booking.booked_by != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if !booking.can_check_in(now, grace) {
            return Err(AppError::UnprocessableEntity(format!(
                "予約（{}）は現在チェックインできません。",
                event.booking_id
            )));
        }

        let previous = BookingSnapshot::from(&booking);
        let res = sqlx::query(
            r#"
                UPDATE facility_bookings
                SET checked_in_at = $2
                WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_operation_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        let updated = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        Self::append_update_tx(
            &mut tx,
            &updated,
            BookingUpdateType::CheckedIn,
            Some(previous),
            event.requested_user,
        )
        .await?;

        tx.commit().await.map_err(Self::map_commit_error)?;
        Ok(())
    }

    async fn check_out(&self, event: CheckOutBooking) -> AppResult<()> {
        let now = Utc::now();
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let booking = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        if booking.booked_by != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }
        if !booking.can_check_out() {
            return Err(AppError::UnprocessableEntity(format!(
                "予約（{}）はチェックイン済みではないか、すでにチェックアウトしています。",
                event.booking_id
            )));
        }

        let previous = BookingSnapshot::from(&booking);
        let res = sqlx::query(
            r#"
                UPDATE facility_bookings
                SET checked_out_at = $2
                WHERE booking_id = $1
            "#,
        )
        .bind(event.booking_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_operation_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        let updated = Self::find_booking_tx(&mut tx, event.booking_id).await?;
        Self::append_update_tx(
            &mut tx,
            &updated,
            BookingUpdateType::CheckedOut,
            Some(previous),
            event.requested_user,
        )
        .await?;

        tx.commit().await.map_err(Self::map_commit_error)?;
        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<FacilityBooking>> {
        let sql = format!("{BOOKING_SELECT} WHERE b.booking_id = $1");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(booking_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(FacilityBooking::from))
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<FacilityBooking>> {
        let sql = format!("{BOOKING_SELECT} WHERE b.booked_by = $1 ORDER BY b.start_time ASC");
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(FacilityBooking::from).collect())
    }

    async fn find_by_facility_id(
        &self,
        facility_id: FacilityId,
        range: Option<BookingWindow>,
    ) -> AppResult<Vec<FacilityBooking>> {
        let rows: Vec<BookingRow> = match range {
            Some(range) => {
                let sql = format!(
                    "{BOOKING_SELECT}
                     WHERE b.facility_id = $1 AND b.start_time < $3 AND $2 < b.end_time
                     ORDER BY b.start_time ASC"
                );
                sqlx::query_as(&sql)
                    .bind(facility_id)
                    .bind(range.start)
                    .bind(range.end)
                    .fetch_all(self.db.inner_ref())
                    .await
            }
            None => {
                let sql =
                    format!("{BOOKING_SELECT} WHERE b.facility_id = $1 ORDER BY b.start_time ASC");
                sqlx::query_as(&sql)
                    .bind(facility_id)
                    .fetch_all(self.db.inner_ref())
                    .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(FacilityBooking::from).collect())
    }
}

impl BookingRepositoryImpl {
    // 書き込み系メソッドでトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために内部的に使うメソッド
    async fn set_transaction_serializable(&self, tx: &mut PgTx<'_>) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    fn is_serialization_failure(e: &sqlx::Error) -> bool {
        matches!(
            e.as_database_error().and_then(|db| db.code()),
            Some(code) if code == "40001"
        )
    }

    // 直列化に失敗した場合はリトライ可能なエラーとして呼び出し元へ返す
    fn map_operation_error(e: sqlx::Error) -> AppError {
        if Self::is_serialization_failure(&e) {
            AppError::ConcurrentModification(
                "booking was modified concurrently; retry the request".into(),
            )
        } else {
            AppError::SpecificOperationError(e)
        }
    }

    fn map_commit_error(e: sqlx::Error) -> AppError {
        if Self::is_serialization_failure(&e) {
            AppError::ConcurrentModification(
                "booking was modified concurrently; retry the request".into(),
            )
        } else {
            AppError::TransactionError(e)
        }
    }

    async fn find_facility_tx(
        tx: &mut PgTx<'_>,
        facility_id: FacilityId,
    ) -> AppResult<FacilityStateRow> {
        let row: Option<FacilityStateRow> = sqlx::query_as(
            r#"
                SELECT capacity, hourly_rate, is_active
                FROM facilities
                WHERE facility_id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        row.ok_or_else(|| {
            AppError::EntityNotFound(format!("施設（{}）が見つかりませんでした。", facility_id))
        })
    }

    async fn load_schedule_tx(
        tx: &mut PgTx<'_>,
        facility_id: FacilityId,
    ) -> AppResult<AvailabilitySchedule> {
        use crate::database::model::availability::{AvailabilityRuleRow, UnavailabilityRow};

        let rules: Vec<AvailabilityRuleRow> = sqlx::query_as(
            r#"
                SELECT
                    availability_id, facility_id, day_of_week, start_time, end_time,
                    is_available, advance_booking_days, minimum_booking_duration,
                    maximum_booking_duration, buffer_time_before, buffer_time_after
                FROM facility_availability
                WHERE facility_id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        let blackouts: Vec<UnavailabilityRow> = sqlx::query_as(
            r#"
                SELECT
                    unavailability_id, facility_id, start_time, end_time, reason,
                    description, is_recurring, created_by
                FROM facility_unavailability
                WHERE facility_id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        Ok(AvailabilitySchedule::new(
            rules.into_iter().map(Into::into).collect(),
            blackouts.into_iter().map(Into::into).collect(),
        ))
    }

    async fn load_active_bookings_tx(
        tx: &mut PgTx<'_>,
        facility_id: FacilityId,
        window: &BookingWindow,
        exclude: Option<BookingId>,
    ) -> AppResult<Vec<ActiveBooking>> {
        // 重複条件: existing.start < new.end AND new.start < existing.end
        let rows: Vec<ActiveBookingRow> = sqlx::query_as(
            r#"
                SELECT booking_id, start_time, end_time, equipment_needed
                FROM facility_bookings
                WHERE facility_id = $1
                  AND status IN ('pending', 'confirmed')
                  AND start_time < $3
                  AND $2 < end_time
                  AND ($4::uuid IS NULL OR booking_id != $4)
            "#,
        )
        .bind(facility_id)
        .bind(window.start)
        .bind(window.end)
        .bind(exclude)
        .fetch_all(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        Ok(rows.into_iter().map(ActiveBooking::from).collect())
    }

    async fn load_equipment_tx(
        tx: &mut PgTx<'_>,
        facility_id: FacilityId,
    ) -> AppResult<Vec<FacilityEquipment>> {
        use crate::database::model::equipment::EquipmentRow;

        let rows: Vec<EquipmentRow> = sqlx::query_as(
            r#"
                SELECT
                    equipment_id, facility_id, equipment_name, category, quantity,
                    condition, last_maintenance_date, next_maintenance_date, is_available
                FROM facility_equipment
                WHERE facility_id = $1
            "#,
        )
        .bind(facility_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_booking_tx(
        tx: &mut PgTx<'_>,
        booking_id: BookingId,
    ) -> AppResult<FacilityBooking> {
        let sql = format!("{BOOKING_SELECT} WHERE b.booking_id = $1");
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(booking_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Self::map_operation_error)?;

        row.map(FacilityBooking::from).ok_or_else(|| {
            AppError::EntityNotFound(format!("予約（{}）が見つかりませんでした。", booking_id))
        })
    }

    async fn update_status_tx(
        tx: &mut PgTx<'_>,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE facility_bookings
                SET status = $2
                WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .execute(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        Ok(())
    }

    // 同じ競合を二重に記録しないよう、未解決分の一意制約に任せて
    // 重複は黙って読み飛ばす
    async fn insert_conflicts_tx(
        tx: &mut PgTx<'_>,
        booking_id: BookingId,
        detected: &[DetectedConflict],
    ) -> AppResult<()> {
        for conflict in detected {
            sqlx::query(
                r#"
                    INSERT INTO booking_conflicts
                    (conflict_id, booking_id, conflicting_booking_id, conflict_type,
                     severity, description)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT DO NOTHING
                "#,
            )
            .bind(ConflictId::new())
            .bind(booking_id)
            .bind(conflict.conflicting_booking_id)
            .bind(conflict.conflict_type)
            .bind(conflict.severity)
            .bind(conflict.description.as_str())
            .execute(&mut **tx)
            .await
            .map_err(Self::map_operation_error)?;
        }
        Ok(())
    }

    async fn find_unresolved_conflicts_tx(
        tx: &mut PgTx<'_>,
        booking_id: BookingId,
    ) -> AppResult<Vec<BookingConflict>> {
        let rows: Vec<ConflictRow> = sqlx::query_as(
            r#"
                SELECT
                    conflict_id, booking_id, conflicting_booking_id, conflict_type,
                    severity, description, is_resolved, resolved_by, resolved_at,
                    resolution, created_at AS detected_at
                FROM booking_conflicts
                WHERE booking_id = $1 AND is_resolved = FALSE
                ORDER BY created_at ASC
            "#,
        )
        .bind(booking_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        Ok(rows.into_iter().map(BookingConflict::from).collect())
    }

    async fn append_update_tx(
        tx: &mut PgTx<'_>,
        booking: &FacilityBooking,
        update_type: BookingUpdateType,
        previous: Option<BookingSnapshot>,
        updated_by: UserId,
    ) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                INSERT INTO real_time_booking_updates
                (update_id, booking_id, update_type, previous_data, new_data,
                 updated_by, broadcast_channels)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(BookingUpdateId::new())
        .bind(booking.booking_id)
        .bind(update_type)
        .bind(previous.map(Json))
        .bind(Json(BookingSnapshot::from(booking)))
        .bind(updated_by)
        .bind(broadcast_channels(booking))
        .execute(&mut **tx)
        .await
        .map_err(Self::map_operation_error)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking update record has been created".into(),
            ));
        }

        Ok(())
    }
}
