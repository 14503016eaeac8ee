use db::models::subject;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct SubjectResponse {
    pub id: i64,
    pub institution_id: i64,
    pub name: String,
    pub created_at: String,
}

impl From<subject::Model> for SubjectResponse {
    fn from(m: subject::Model) -> Self {
        Self {
            id: m.id,
            institution_id: m.institution_id,
            name: m.name,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}
