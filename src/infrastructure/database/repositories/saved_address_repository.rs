//! SeaORM implementation of SavedAddressRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::{DomainResult, SavedAddress, SavedAddressRepository};
use crate::infrastructure::database::entities::saved_address;

pub struct SeaOrmSavedAddressRepository {
    db: DatabaseConnection,
}

impl SeaOrmSavedAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<saved_address::Model> for SavedAddress {
    fn from(m: saved_address::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            label: m.label,
            street: m.street,
            city: m.city,
            state: m.state,
            postal_code: m.postal_code,
            country: m.country,
            country_code: m.country_code,
            formatted_address: m.formatted_address,
            latitude: m.latitude,
            longitude: m.longitude,
            place_id: m.place_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<SavedAddress> for saved_address::ActiveModel {
    fn from(a: SavedAddress) -> Self {
        Self {
            id: Set(a.id),
            user_id: Set(a.user_id),
            label: Set(a.label),
            street: Set(a.street),
            city: Set(a.city),
            state: Set(a.state),
            postal_code: Set(a.postal_code),
            country: Set(a.country),
            country_code: Set(a.country_code),
            formatted_address: Set(a.formatted_address),
            latitude: Set(a.latitude),
            longitude: Set(a.longitude),
            place_id: Set(a.place_id),
            created_at: Set(a.created_at),
            updated_at: Set(a.updated_at),
        }
    }
}

#[async_trait]
impl SavedAddressRepository for SeaOrmSavedAddressRepository {
    async fn list_for_user(&self, user_id: &str) -> DomainResult<Vec<SavedAddress>> {
        let rows = saved_address::Entity::find()
            .filter(saved_address::Column::UserId.eq(user_id))
            .order_by_asc(saved_address::Column::CreatedAt)
            .order_by_asc(saved_address::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(SavedAddress::from).collect())
    }

    async fn insert(&self, address: SavedAddress) -> DomainResult<SavedAddress> {
        let active: saved_address::ActiveModel = address.into();
        let created = active.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn update_label(
        &self,
        user_id: &str,
        id: &str,
        label: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Option<SavedAddress>> {
        let txn = self.db.begin().await?;

        // The ownership check is the WHERE clause of the write itself.
        let result = saved_address::Entity::update_many()
            .col_expr(saved_address::Column::Label, Expr::value(label))
            .col_expr(saved_address::Column::UpdatedAt, Expr::value(updated_at))
            .filter(saved_address::Column::Id.eq(id))
            .filter(saved_address::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            debug!("Saved address '{}' not found for user '{}'", id, user_id);
            return Ok(None);
        }

        let updated = saved_address::Entity::find()
            .filter(saved_address::Column::Id.eq(id))
            .filter(saved_address::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        txn.commit().await?;
        Ok(updated.map(SavedAddress::from))
    }

    async fn delete(&self, user_id: &str, id: &str) -> DomainResult<Option<SavedAddress>> {
        let txn = self.db.begin().await?;

        let existing = saved_address::Entity::find()
            .filter(saved_address::Column::Id.eq(id))
            .filter(saved_address::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        let Some(existing) = existing else {
            debug!("Saved address '{}' not found for user '{}'", id, user_id);
            return Ok(None);
        };

        let result = saved_address::Entity::delete_many()
            .filter(saved_address::Column::Id.eq(id))
            .filter(saved_address::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        txn.commit().await?;
        Ok(Some(existing.into()))
    }
}
