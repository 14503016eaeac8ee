use db::models::user;
use serde::Serialize;

/// User payload returned by auth endpoints. Never carries the password hash.
#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub institution_id: Option<i64>,
    pub active: bool,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role.to_string(),
            institution_id: user.institution_id,
            active: user.active,
        }
    }
}
