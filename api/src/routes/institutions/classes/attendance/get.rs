//! Attendance read endpoints: rotating code, per-session report, CSV export.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::classes::attendance::common::{
    CodeResponse, ReportResponse, ReportRow, ReportSummary,
};
use db::models::{
    attendance_record::{Model as AttendanceRecord, Status},
    class_session::Model as ClassSession,
    institution_settings::{Model as Settings, ValidationMethod},
    user,
};

/// GET /institutions/{institution_id}/classes/{class_id}/attendance/code
///
/// Current rotating attendance code for the session, for staff to project
/// on screen or render as a QR code. Only meaningful for institutions whose
/// validation method is `qrcode` or `code`.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "code": "483920", "seconds_until_rotation": 41 },
///   "message": "Current code"
/// }
/// ```
///
/// - `400 Bad Request` (institution does not validate by code)
/// - `404 Not Found`
pub async fn get_attendance_code(
    State(app_state): State<AppState>,
    Path((institution_id, class_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<CodeResponse>>) {
    let db = app_state.db();

    let session = match ClassSession::find_in_institution(db, institution_id, class_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Class session not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    let method = match Settings::for_institution(db, institution_id).await {
        Ok(row) => row
            .map(|s| s.validation_method)
            .unwrap_or(ValidationMethod::Qrcode),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };

    if !method.uses_code() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "This institution does not validate attendance by code",
            )),
        );
    }

    let now = Utc::now();
    let resp = CodeResponse {
        code: presence::code::current_code(&session.code_secret, now),
        seconds_until_rotation: presence::code::seconds_until_rotation(now),
    };

    (StatusCode::OK, Json(ApiResponse::success(resp, "Current code")))
}

/// Roster-first merge of institution students with the session's records.
/// Students without a record come back as `pending` rows.
async fn build_report(
    db: &DatabaseConnection,
    institution_id: i64,
    class_id: i64,
) -> Result<ReportResponse, DbErr> {
    let roster = user::Model::list_students_for_institution(db, institution_id).await?;
    let records = AttendanceRecord::list_for_session(db, class_id).await?;

    let mut by_student = HashMap::with_capacity(records.len());
    for record in records {
        by_student.insert(record.student_id, record);
    }

    let mut summary = ReportSummary {
        total: roster.len() as i64,
        ..Default::default()
    };

    let records = roster
        .into_iter()
        .map(|student| {
            let record = by_student.remove(&student.id);
            let status = record.as_ref().map(|r| r.status).unwrap_or(Status::Pending);

            match status {
                Status::Present => summary.present += 1,
                Status::Late => summary.late += 1,
                Status::Absent => summary.absent += 1,
                Status::Excused => summary.excused += 1,
                Status::Pending => summary.pending += 1,
            }

            ReportRow {
                student_id: student.id,
                student_name: student.name,
                student_email: student.email,
                status: status.to_string(),
                confirmed_at: record.as_ref().map(|r| r.confirmed_at.to_rfc3339()),
                distance_m: record.as_ref().and_then(|r| r.distance_m),
                notes: record.and_then(|r| r.notes),
            }
        })
        .collect::<Vec<_>>();

    if summary.total > 0 {
        summary.attendance_rate = (summary.present + summary.late) as f64 / summary.total as f64;
    }

    Ok(ReportResponse { records, summary })
}

/// GET /institutions/{institution_id}/classes/{class_id}/attendance
///
/// Attendance report for the session: one row per enrolled student plus a
/// summary. Staff only.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "records": [
///       {
///         "student_id": 9,
///         "student_name": "Ana Souza",
///         "student_email": "ana@example.com",
///         "status": "present",
///         "confirmed_at": "2026-03-06T17:05:00+00:00",
///         "distance_m": 12.4,
///         "notes": null
///       }
///     ],
///     "summary": {
///       "total": 30, "present": 25, "late": 2, "absent": 1,
///       "excused": 1, "pending": 1, "attendance_rate": 0.9
///     }
///   },
///   "message": "Attendance report retrieved"
/// }
/// ```
pub async fn get_attendance_report(
    State(app_state): State<AppState>,
    Path((institution_id, class_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<ReportResponse>>) {
    let db = app_state.db();

    match ClassSession::find_in_institution(db, institution_id, class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Class session not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    }

    match build_report(db, institution_id, class_id).await {
        Ok(report) => (
            StatusCode::OK,
            Json(ApiResponse::success(report, "Attendance report retrieved")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}

/// GET /institutions/{institution_id}/classes/{class_id}/attendance/export
///
/// Export the attendance report as a CSV attachment. Staff only.
///
/// Columns: `student_id,student_name,student_email,status,confirmed_at,distance_m,notes`
pub async fn export_attendance_csv(
    State(app_state): State<AppState>,
    Path((institution_id, class_id)): Path<(i64, i64)>,
) -> (StatusCode, (HeaderMap, String)) {
    let db = app_state.db();

    let mut headers = HeaderMap::new();

    let session = ClassSession::find_in_institution(db, institution_id, class_id)
        .await
        .ok()
        .flatten();
    if session.is_none() {
        headers.insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        return (
            StatusCode::NOT_FOUND,
            (headers, "class session not found".to_string()),
        );
    }

    let report = match build_report(db, institution_id, class_id).await {
        Ok(r) => r,
        Err(_) => {
            headers.insert(
                axum::http::header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, (headers, "error".to_string()));
        }
    };

    fn esc(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    let mut csv =
        String::from("student_id,student_name,student_email,status,confirmed_at,distance_m,notes\n");
    for row in &report.records {
        let distance = row
            .distance_m
            .map(|d| format!("{:.1}", d))
            .unwrap_or_default();
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            row.student_id,
            esc(&row.student_name),
            esc(&row.student_email),
            row.status,
            esc(row.confirmed_at.as_deref().unwrap_or("")),
            distance,
            esc(row.notes.as_deref().unwrap_or("")),
        ));
    }

    let filename = format!("attendance_class_{}.csv", class_id);

    headers.insert(
        axum::http::header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        axum::http::header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, (headers, csv))
}
