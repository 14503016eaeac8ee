use db::models::class_time;
use serde::Serialize;

lazy_static::lazy_static! {
    /// Wall-clock times are zero-padded 24h "HH:MM".
    pub static ref TIME_REGEX: regex::Regex =
        regex::Regex::new("^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

#[derive(Debug, Serialize, Default)]
pub struct ClassTimeResponse {
    pub id: i64,
    pub institution_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub weekdays: Vec<u8>,
    pub active: bool,
}

impl From<class_time::Model> for ClassTimeResponse {
    fn from(m: class_time::Model) -> Self {
        let weekdays = m.weekday_numbers();
        Self {
            id: m.id,
            institution_id: m.institution_id,
            name: m.name,
            start_time: m.start_time,
            end_time: m.end_time,
            weekdays,
            active: m.active,
        }
    }
}
