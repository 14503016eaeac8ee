use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
///
/// Admins are platform-wide and carry no institution; everyone else belongs
/// to exactly one institution.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique email address, also the login identifier.
    pub email: String,
    /// Securely hashed password string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Role within the platform.
    pub role: Role,
    /// Owning institution; `None` only for admins.
    pub institution_id: Option<i64>,
    /// Deactivated users cannot sign in.
    pub active: bool,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// User roles, stored as strings in the database.
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
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,

    #[sea_orm(string_value = "coordinator")]
    Coordinator,

    #[sea_orm(string_value = "teacher")]
    Teacher,

    #[sea_orm(string_value = "student")]
    Student,
}

impl Role {
    /// Staff can manage sessions and take roll call.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Coordinator | Role::Teacher)
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
    /// Creates a user with a freshly hashed password.
    pub async fn create(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
        institution_id: Option<i64>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let user = ActiveModel {
            email: Set(email.trim().to_lowercase()),
            password_hash: Set(Self::hash_password(password)?),
            name: Set(name.to_owned()),
            role: Set(role),
            institution_id: Set(institution_id),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(db).await
    }

    /// Looks a user up by email and checks the password.
    ///
    /// Deactivated accounts never verify, regardless of password.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<Option<Model>, DbErr> {
        let user = Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await?;

        if let Some(user) = user {
            if user.active && user.verify_password(password) {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    pub fn hash_password(password: &str) -> Result<String, DbErr> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {e}")))?
            .to_string())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let parsed = match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    /// Active students of one institution, ordered by name. The attendance
    /// report treats this as the session roster.
    pub async fn list_students_for_institution(
        db: &DatabaseConnection,
        institution_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        use sea_orm::QueryOrder;

        Entity::find()
            .filter(Column::InstitutionId.eq(institution_id))
            .filter(Column::Role.eq(Role::Student))
            .filter(Column::Active.eq(true))
            .order_by_asc(Column::Name)
            .all(db)
            .await
    }
}
