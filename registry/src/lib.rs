use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::redis::RedisClient;
use adapter::repository::auth::AuthRepositoryImpl;
use adapter::repository::availability::AvailabilityRepositoryImpl;
use adapter::repository::booking::BookingRepositoryImpl;
use adapter::repository::booking_update::BookingUpdateRepositoryImpl;
use adapter::repository::conflict::ConflictRepositoryImpl;
use adapter::repository::equipment::EquipmentRepositoryImpl;
use adapter::repository::facility::FacilityRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::user::UserRepositoryImpl;
use kernel::repository::auth::AuthRepository;
use kernel::repository::availability::AvailabilityRepository;
use kernel::repository::booking::BookingRepository;
use kernel::repository::booking_update::BookingUpdateRepository;
use kernel::repository::conflict::ConflictRepository;
use kernel::repository::equipment::EquipmentRepository;
use kernel::repository::facility::FacilityRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::user::UserRepository;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    facility_repository: Arc<dyn FacilityRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
    equipment_repository: Arc<dyn EquipmentRepository>,
    booking_repository: Arc<dyn BookingRepository>,
    conflict_repository: Arc<dyn ConflictRepository>,
    booking_update_repository: Arc<dyn BookingUpdateRepository>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        redis_client: Arc<RedisClient>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let facility_repository = Arc::new(FacilityRepositoryImpl::new(pool.clone()));
        let availability_repository = Arc::new(AvailabilityRepositoryImpl::new(pool.clone()));
        let equipment_repository = Arc::new(EquipmentRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(
            pool.clone(),
            app_config.booking.clone(),
        ));
        let conflict_repository = Arc::new(ConflictRepositoryImpl::new(pool.clone()));
        let booking_update_repository = Arc::new(BookingUpdateRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            auth_repository,
            user_repository,
            facility_repository,
            availability_repository,
            equipment_repository,
            booking_repository,
            conflict_repository,
            booking_update_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn facility_repository(&self) -> Arc<dyn FacilityRepository> {
        self.facility_repository.clone()
    }

    pub fn availability_repository(&self) -> Arc<dyn AvailabilityRepository> {
        self.availability_repository.clone()
    }

    pub fn equipment_repository(&self) -> Arc<dyn EquipmentRepository> {
        self.equipment_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }

    pub fn conflict_repository(&self) -> Arc<dyn ConflictRepository> {
        self.conflict_repository.clone()
    }

    pub fn booking_update_repository(&self) -> Arc<dyn BookingUpdateRepository> {
        self.booking_update_repository.clone()
    }
}
