use chrono::{DateTime, Utc};
use presence::Coordinates;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Attendance policy defaults applied when an institution has no stored row.
pub const DEFAULT_TOLERANCE_MINUTES: i32 = 15;
pub const DEFAULT_RADIUS_M: i32 = 100;

/// Per-institution attendance policy, one row per institution.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "institution_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub institution_id: i64,
    /// How students prove presence.
    pub validation_method: ValidationMethod,
    /// Minutes a student may still confirm after the session's scheduled end.
    pub tolerance_minutes: i32,
    /// Campus latitude; unset until staff pin the campus on the map.
    pub latitude: Option<f64>,
    /// Campus longitude; set and unset together with `latitude`.
    pub longitude: Option<f64>,
    /// Geofence radius in metres.
    pub radius_m: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How an institution validates student attendance confirmations.
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
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "attendance_validation_method"
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ValidationMethod {
    /// Student scans a QR code that encodes the rotating session code.
    #[sea_orm(string_value = "qrcode")]
    Qrcode,

    /// Student's device coordinates must fall inside the campus geofence.
    #[sea_orm(string_value = "geolocation")]
    Geolocation,

    /// Student types the rotating session code from the teacher's screen.
    #[sea_orm(string_value = "code")]
    Code,

    /// Teacher takes roll call; students cannot self-confirm.
    #[sea_orm(string_value = "manual")]
    Manual,
}

impl ValidationMethod {
    /// Both code-bearing methods verify against the same rotating code.
    pub fn uses_code(&self) -> bool {
        matches!(self, ValidationMethod::Qrcode | ValidationMethod::Code)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::institution::Entity",
        from = "Column::InstitutionId",
        to = "super::institution::Column::Id"
    )]
    Institution,
}

impl Related<super::institution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institution.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Stored policy for an institution, if staff have saved one.
    pub async fn for_institution(
        db: &DatabaseConnection,
        institution_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::InstitutionId.eq(institution_id))
            .one(db)
            .await
    }

    /// Writes the policy, inserting or overwriting the institution's row.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        db: &DatabaseConnection,
        institution_id: i64,
        validation_method: ValidationMethod,
        tolerance_minutes: i32,
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_m: i32,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let row = ActiveModel {
            institution_id: Set(institution_id),
            validation_method: Set(validation_method),
            tolerance_minutes: Set(tolerance_minutes),
            latitude: Set(latitude),
            longitude: Set(longitude),
            radius_m: Set(radius_m),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Entity::insert(row)
            .on_conflict(
                OnConflict::column(Column::InstitutionId)
                    .update_columns([
                        Column::ValidationMethod,
                        Column::ToleranceMinutes,
                        Column::Latitude,
                        Column::Longitude,
                        Column::RadiusM,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Self::for_institution(db, institution_id)
            .await?
            .ok_or_else(|| DbErr::Custom("institution settings upsert wrote no row".into()))
    }

    /// Campus coordinates when both halves are pinned.
    ///
    /// Unset coordinates are meaningful (the campus was never pinned) and are
    /// reported as `None`, never as (0.0, 0.0).
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}
