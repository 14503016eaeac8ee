use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use db::models::{class_session, class_time, subject};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::institutions::classes::common::{
    ClassSessionResponse, ListQuery, ListResponse,
};

/// GET /institutions/{institution_id}/classes
///
/// List class sessions for the institution.
///
/// **Query**:
/// - `date` *(optional)*: only sessions on this `YYYY-MM-DD` date
/// - `subject_id` *(optional)*
/// - `page` *(default 1)*
/// - `per_page` *(default 20, max 100)*
///
/// Rows carry the subject name and the slot's start/end for display.
pub async fn list_classes(
    State(app_state): State<AppState>,
    Path(institution_id): Path<i64>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let db = app_state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let mut sel = class_session::Entity::find()
        .filter(class_session::Column::InstitutionId.eq(institution_id));
    if let Some(date) = q.date {
        sel = sel.filter(class_session::Column::SessionDate.eq(date));
    }
    if let Some(subject_id) = q.subject_id {
        sel = sel.filter(class_session::Column::SubjectId.eq(subject_id));
    }
    sel = sel
        .order_by_desc(class_session::Column::SessionDate)
        .order_by_asc(class_session::Column::Id);

    let paginator = sel.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(n) => n as i32,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            );
        }
    };
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    // Resolve subject names and slot times only for the page results.
    let subject_ids: Vec<i64> = rows.iter().map(|r| r.subject_id).collect();
    let slot_ids: Vec<i64> = rows.iter().map(|r| r.class_time_id).collect();

    let mut subject_map = HashMap::<i64, String>::new();
    if !subject_ids.is_empty() {
        let subjects = subject::Entity::find()
            .filter(subject::Column::Id.is_in(subject_ids))
            .all(db)
            .await
            .unwrap_or_default();
        for s in subjects {
            subject_map.insert(s.id, s.name);
        }
    }

    let mut slot_map = HashMap::<i64, (String, String)>::new();
    if !slot_ids.is_empty() {
        let slots = class_time::Entity::find()
            .filter(class_time::Column::Id.is_in(slot_ids))
            .all(db)
            .await
            .unwrap_or_default();
        for t in slots {
            slot_map.insert(t.id, (t.start_time, t.end_time));
        }
    }

    let classes = rows
        .into_iter()
        .map(|r| {
            let subject_name = subject_map.get(&r.subject_id).cloned();
            let (start, end) = slot_map
                .get(&r.class_time_id)
                .map(|(s, e)| (Some(s.clone()), Some(e.clone())))
                .unwrap_or((None, None));
            ClassSessionResponse::from(r).with_schedule(subject_name, start, end)
        })
        .collect::<Vec<_>>();

    let resp = ListResponse {
        classes,
        page: page as i32,
        per_page: per_page as i32,
        total,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Class sessions retrieved")),
    )
}

/// GET /institutions/{institution_id}/classes/{class_id}
///
/// Fetch a single class session with its subject name and slot times.
pub async fn get_class(
    State(app_state): State<AppState>,
    Path((institution_id, class_id)): Path<(i64, i64)>,
) -> (StatusCode, Json<ApiResponse<ClassSessionResponse>>) {
    let db = app_state.db();

    let found = class_session::Model::find_in_institution(db, institution_id, class_id).await;

    match found {
        Ok(Some(row)) => {
            let subject_name = subject::Entity::find_by_id(row.subject_id)
                .one(db)
                .await
                .ok()
                .flatten()
                .map(|s| s.name);
            let slot = class_time::Entity::find_by_id(row.class_time_id)
                .one(db)
                .await
                .ok()
                .flatten();
            let (start, end) = slot
                .map(|t| (Some(t.start_time), Some(t.end_time)))
                .unwrap_or((None, None));

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ClassSessionResponse::from(row).with_schedule(subject_name, start, end),
                    "Class session retrieved",
                )),
            )
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Class session not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Database error: {}", e))),
        ),
    }
}
