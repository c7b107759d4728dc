use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a row and return it as stored; the engine assigns `id`.
pub async fn create<C: ConnectionTrait>(db: &C, username: &str, email: &str) -> Result<Model, DbErr> {
    let am = ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    am.insert(db).await
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// All rows, ascending by primary key.
pub async fn list_ordered<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
    Entity::find().order_by_asc(Column::Id).all(db).await
}
