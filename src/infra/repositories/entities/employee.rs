//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Employee;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub mobile: String,
    pub role: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Employee {
    fn from(model: Model) -> Self {
        Employee {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            mobile: model.mobile,
            role: model.role,
            created_at: model.created_at,
        }
    }
}
