use chrono::{DateTime, NaiveDate, Utc};
use presence::window::ScheduledSession;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::Serialize;

/// A dated class meeting: one subject, one teacher, one time slot.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "class_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub institution_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub class_time_id: i64,
    pub session_date: NaiveDate,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Secret behind the session's rotating attendance code.
    #[serde(skip_serializing)]
    pub code_secret: String,
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
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::class_time::Entity",
        from = "Column::ClassTimeId",
        to = "super::class_time::Column::Id"
    )]
    ClassTime,
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::class_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTime.def()
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a session with a fresh attendance-code secret.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        institution_id: i64,
        subject_id: i64,
        teacher_id: i64,
        class_time_id: i64,
        session_date: NaiveDate,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let session = ActiveModel {
            institution_id: Set(institution_id),
            subject_id: Set(subject_id),
            teacher_id: Set(teacher_id),
            class_time_id: Set(class_time_id),
            session_date: Set(session_date),
            title: Set(title.map(str::to_owned)),
            description: Set(description.map(str::to_owned)),
            code_secret: Set(presence::code::generate_secret()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        session.insert(db).await
    }

    /// Session by id, visible only inside the given institution.
    pub async fn find_in_institution(
        db: &DatabaseConnection,
        institution_id: i64,
        session_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(session_id)
            .filter(Column::InstitutionId.eq(institution_id))
            .one(db)
            .await
    }

    /// The session's wall-clock window: its date joined with the slot times.
    pub async fn scheduled_window(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Option<ScheduledSession>, DbErr> {
        let slot = super::class_time::Entity::find_by_id(self.class_time_id)
            .one(db)
            .await?;

        Ok(slot.map(|slot| {
            ScheduledSession::new(self.session_date, slot.start_time, slot.end_time)
        }))
    }
}
