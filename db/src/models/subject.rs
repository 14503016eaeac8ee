use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

/// A subject taught at an institution.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub institution_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::institution::Entity",
        from = "Column::InstitutionId",
        to = "super::institution::Column::Id"
    )]
    Institution,
    #[sea_orm(has_many = "super::class_session::Entity")]
    ClassSessions,
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl Related<super::class_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        institution_id: i64,
        name: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let subject = ActiveModel {
            institution_id: Set(institution_id),
            name: Set(name.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        subject.insert(db).await
    }

    /// All subjects of one institution, alphabetical.
    pub async fn list_for_institution(
        db: &DatabaseConnection,
        institution_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        use sea_orm::QueryOrder;

        Entity::find()
            .filter(Column::InstitutionId.eq(institution_id))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }
}
