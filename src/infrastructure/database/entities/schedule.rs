//! Weekly schedule entity: one row per user, two `HH:MM` columns per weekday

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub user_id: String,
    pub monday_start: String,
    pub monday_end: String,
    pub tuesday_start: String,
    pub tuesday_end: String,
    pub wednesday_start: String,
    pub wednesday_end: String,
    pub thursday_start: String,
    pub thursday_end: String,
    pub friday_start: String,
    pub friday_end: String,
    pub saturday_start: String,
    pub saturday_end: String,
    pub sunday_start: String,
    pub sunday_end: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
