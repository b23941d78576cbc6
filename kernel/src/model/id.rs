use serde::{Deserialize, Serialize};
use shared::error::AppError;
use std::str::FromStr;

macro_rules! define_id {
    ($id_name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(into = "String", try_from = "String")]
        #[sqlx(transparent)]
        pub struct $id_name(uuid::Uuid);

        impl $id_name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn raw(self) -> uuid::Uuid {
                self.0
            }
        }

        impl Default for $id_name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $id_name {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$id_name> for String {
            fn from(value: $id_name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $id_name {
            type Error = AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                uuid::Uuid::parse_str(&value)
                    .map(Self)
                    .map_err(AppError::from)
            }
        }

        impl FromStr for $id_name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::from_str(s).map(Self).map_err(AppError::from)
            }
        }

        impl std::fmt::Display for $id_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(UserId);
define_id!(TeamId);
define_id!(FacilityId);
define_id!(AvailabilityId);
define_id!(UnavailabilityId);
define_id!(EquipmentId);
define_id!(BookingId);
define_id!(ConflictId);
define_id!(BookingUpdateId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_via_string() {
        let id = BookingId::new();
        let s = String::from(id);
        let parsed = BookingId::try_from(s).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_rejects_non_uuid() {
        assert!(FacilityId::try_from("not-a-uuid".to_string()).is_err());
    }
}
