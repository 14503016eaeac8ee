use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

/// A named recurring time slot, e.g. "Manhã 1" from 08:00 to 09:40.
///
/// Times are wall-clock `HH:MM` strings; the API validates the format and
/// ordering before anything is stored.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "class_times")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub institution_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// JSON array of weekday numbers, 0 = Sunday .. 6 = Saturday.
    pub weekdays: Json,
    pub active: bool,
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
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        institution_id: i64,
        name: &str,
        start_time: &str,
        end_time: &str,
        weekdays: &[u8],
        active: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let slot = ActiveModel {
            institution_id: Set(institution_id),
            name: Set(name.to_owned()),
            start_time: Set(start_time.to_owned()),
            end_time: Set(end_time.to_owned()),
            weekdays: Set(serde_json::json!(weekdays)),
            active: Set(active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        slot.insert(db).await
    }

    /// All slots of one institution, earliest start first.
    pub async fn list_for_institution(
        db: &DatabaseConnection,
        institution_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        use sea_orm::QueryOrder;

        Entity::find()
            .filter(Column::InstitutionId.eq(institution_id))
            .order_by_asc(Column::StartTime)
            .all(db)
            .await
    }

    /// Weekday numbers out of the JSON column.
    pub fn weekday_numbers(&self) -> Vec<u8> {
        self.weekdays
            .as_array()
            .map(|days| {
                days.iter()
                    .filter_map(|d| d.as_u64())
                    .filter(|d| *d <= 6)
                    .map(|d| d as u8)
                    .collect()
            })
            .unwrap_or_default()
    }
}
