use strum::{AsRefStr, EnumString};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, sqlx::Type)]
#[sqlx(type_name = "role", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    User,
}
