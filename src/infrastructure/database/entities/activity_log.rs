//! Activity log entity for database

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::ActivityAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Action {
    #[sea_orm(string_value = "address_saved")]
    AddressSaved,
    #[sea_orm(string_value = "address_updated")]
    AddressUpdated,
    #[sea_orm(string_value = "address_deleted")]
    AddressDeleted,
}

impl From<ActivityAction> for Action {
    fn from(action: ActivityAction) -> Self {
        match action {
            ActivityAction::AddressSaved => Self::AddressSaved,
            ActivityAction::AddressUpdated => Self::AddressUpdated,
            ActivityAction::AddressDeleted => Self::AddressDeleted,
        }
    }
}

impl From<Action> for ActivityAction {
    fn from(action: Action) -> Self {
        match action {
            Action::AddressSaved => Self::AddressSaved,
            Action::AddressUpdated => Self::AddressUpdated,
            Action::AddressDeleted => Self::AddressDeleted,
        }
    }
}

/// Append-only; rows leave only with their user
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub action: Action,
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,
    /// JSON object serialized as text
    #[sea_orm(column_type = "Text", nullable)]
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
