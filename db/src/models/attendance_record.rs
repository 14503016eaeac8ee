use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One attendance decision per student per session.
///
/// The composite primary key is the uniqueness guarantee: concurrent
/// confirmations race at the insert, and exactly one wins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_session_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,

    pub status: Status,
    pub confirmed_at: DateTime<Utc>,
    /// Who wrote the record: the student themselves, or the teacher on roll
    /// call.
    pub confirmed_by: i64,
    /// Device position at confirmation time; NULL for code and roll-call
    /// records.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Measured distance from the campus at confirmation time.
    pub distance_m: Option<f64>,
    pub notes: Option<String>,
}

/// Attendance status values, stored as strings in the database.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "present")]
    Present,

    #[sea_orm(string_value = "absent")]
    Absent,

    #[sea_orm(string_value = "late")]
    Late,

    #[sea_orm(string_value = "excused")]
    Excused,

    #[sea_orm(string_value = "pending")]
    Pending,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_session::Entity",
        from = "Column::ClassSessionId",
        to = "super::class_session::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::class_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// What a conditional confirmation insert did.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmInsert {
    /// This call created the record.
    Inserted(Model),
    /// Someone got there first; carries the record they wrote.
    AlreadyExists(Model),
}

impl Model {
    /// Record for one student in one session, if any.
    pub async fn find_for(
        db: &DatabaseConnection,
        class_session_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id((class_session_id, student_id)).one(db).await
    }

    /// Student self-confirmation: insert-if-absent, never an update.
    ///
    /// Uniqueness rides on the composite primary key, not on a prior read, so
    /// parallel submissions resolve to exactly one inserted row; every loser
    /// sees [`ConfirmInsert::AlreadyExists`] with the winner's record.
    pub async fn confirm_present(
        db: &DatabaseConnection,
        class_session_id: i64,
        student_id: i64,
        confirmed_at: DateTime<Utc>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        distance_m: Option<f64>,
    ) -> Result<ConfirmInsert, DbErr> {
        let record = ActiveModel {
            class_session_id: Set(class_session_id),
            student_id: Set(student_id),
            status: Set(Status::Present),
            confirmed_at: Set(confirmed_at),
            confirmed_by: Set(student_id),
            latitude: Set(latitude),
            longitude: Set(longitude),
            distance_m: Set(distance_m),
            notes: Set(None),
        };

        let inserted = Entity::insert(record)
            .on_conflict(
                OnConflict::columns([Column::ClassSessionId, Column::StudentId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        let row = Self::find_for(db, class_session_id, student_id)
            .await?
            .ok_or_else(|| DbErr::Custom("attendance record vanished after insert".into()))?;

        if inserted == 0 {
            Ok(ConfirmInsert::AlreadyExists(row))
        } else {
            Ok(ConfirmInsert::Inserted(row))
        }
    }

    /// Roll-call write: inserts or overwrites the student's record.
    pub async fn upsert_status(
        db: &DatabaseConnection,
        class_session_id: i64,
        student_id: i64,
        status: Status,
        notes: Option<&str>,
        confirmed_by: i64,
        confirmed_at: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let record = ActiveModel {
            class_session_id: Set(class_session_id),
            student_id: Set(student_id),
            status: Set(status),
            confirmed_at: Set(confirmed_at),
            confirmed_by: Set(confirmed_by),
            latitude: Set(None),
            longitude: Set(None),
            distance_m: Set(None),
            notes: Set(notes.map(str::to_owned)),
        };

        Entity::insert(record)
            .on_conflict(
                OnConflict::columns([Column::ClassSessionId, Column::StudentId])
                    .update_columns([
                        Column::Status,
                        Column::Notes,
                        Column::ConfirmedBy,
                        Column::ConfirmedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Self::find_for(db, class_session_id, student_id)
            .await?
            .ok_or_else(|| DbErr::Custom("attendance record vanished after upsert".into()))
    }

    /// Every record of one session, stable order for reports.
    pub async fn list_for_session(
        db: &DatabaseConnection,
        class_session_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassSessionId.eq(class_session_id))
            .order_by_asc(Column::StudentId)
            .all(db)
            .await
    }
}
