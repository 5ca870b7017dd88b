use chrono::NaiveTime;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set, SqlErr};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub friendliness_level: f32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::supplier::Entity")]
    Supplier,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Column widths from the schema; exceeding them must read as a
// validation failure, not an opaque database error.
pub const NAME_MAX_LEN: usize = 128;
pub const ADDRESS_MAX_LEN: usize = 512;

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name exceeds {} characters", NAME_MAX_LEN)));
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), errors::ModelError> {
    if address.chars().count() > ADDRESS_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("address exceeds {} characters", ADDRESS_MAX_LEN)));
    }
    Ok(())
}

/// Insert a store. The unique key on `name` is the only uniqueness check;
/// its violation comes back as `ModelError::Conflict`.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    address: &str,
    opening_time: NaiveTime,
    closing_time: NaiveTime,
    friendliness_level: f32,
) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_address(address)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        address: Set(address.to_string()),
        opening_time: Set(opening_time),
        closing_time: Set(closing_time),
        friendliness_level: Set(friendliness_level),
        ..Default::default()
    };
    match am.insert(db).await {
        Ok(m) => Ok(m),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Err(errors::ModelError::Conflict("store name already exists".into()))
            }
            _ => Err(errors::ModelError::Db(e.to_string())),
        },
    }
}
