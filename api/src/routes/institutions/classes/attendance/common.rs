use db::models::attendance_record::Status;
use presence::LocationError;
use serde::{Deserialize, Serialize};

/// Device coordinates as the browser's geolocation API reports them.
#[derive(Debug, Deserialize)]
pub struct LocationBody {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of a student confirmation. Exactly which field matters depends on
/// the institution's validation method; the handler requires at least one
/// proof to be present.
#[derive(Debug, Deserialize)]
pub struct ConfirmAttendanceBody {
    pub location: Option<LocationBody>,
    /// Why the device produced no fix: `denied`, `unavailable` or `timeout`.
    pub location_error: Option<LocationError>,
    /// Rotating attendance code, as read off the teacher's screen.
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RollCallEntry {
    pub student_id: i64,
    pub status: Status,
    pub notes: Option<String>,
}

/// Body of a teacher roll call: one entry per student to write.
#[derive(Debug, Deserialize)]
pub struct RollCallBody {
    pub records: Vec<RollCallEntry>,
}

#[derive(Debug, Serialize, Default)]
pub struct RollCallResponse {
    pub written: usize,
}

/// Current rotating code plus how long it stays valid.
#[derive(Debug, Serialize, Default)]
pub struct CodeResponse {
    pub code: String,
    pub seconds_until_rotation: i64,
}

/// One roster line of the attendance report. Students without a record show
/// up as `pending` with the record fields empty.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub status: String,
    pub confirmed_at: Option<String>,
    pub distance_m: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ReportSummary {
    pub total: i64,
    pub present: i64,
    pub late: i64,
    pub absent: i64,
    pub excused: i64,
    pub pending: i64,
    /// Share of the roster confirmed present or late, 0.0 when empty.
    pub attendance_rate: f64,
}

#[derive(Debug, Serialize, Default)]
pub struct ReportResponse {
    pub records: Vec<ReportRow>,
    pub summary: ReportSummary,
}
