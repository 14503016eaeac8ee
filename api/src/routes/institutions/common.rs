use db::models::institution;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct InstitutionResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<institution::Model> for InstitutionResponse {
    fn from(m: institution::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}
