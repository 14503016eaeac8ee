use chrono::NaiveDate;
use db::models::class_session;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Default)]
pub struct ClassSessionResponse {
    pub id: i64,
    pub institution_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub class_time_id: i64,
    pub session_date: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Filled from the subject row when the handler resolves it.
    pub subject_name: Option<String>,
    /// Filled from the time slot row when the handler resolves it.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub created_at: String,
}

impl From<class_session::Model> for ClassSessionResponse {
    fn from(m: class_session::Model) -> Self {
        Self {
            id: m.id,
            institution_id: m.institution_id,
            subject_id: m.subject_id,
            teacher_id: m.teacher_id,
            class_time_id: m.class_time_id,
            session_date: m.session_date.to_string(),
            title: m.title,
            description: m.description,
            subject_name: None,
            start_time: None,
            end_time: None,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}

impl ClassSessionResponse {
    pub fn with_schedule(
        mut self,
        subject_name: Option<String>,
        start_time: Option<String>,
        end_time: Option<String>,
    ) -> Self {
        self.subject_name = subject_name;
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to sessions on this date (`YYYY-MM-DD`).
    pub date: Option<NaiveDate>,
    pub subject_id: Option<i64>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

#[derive(Debug, Serialize, Default)]
pub struct ListResponse {
    pub classes: Vec<ClassSessionResponse>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}
