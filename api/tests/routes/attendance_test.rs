#[cfg(test)]
mod tests {
    use api::auth::generate_jwt;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::Local;
    use db::models::{
        attendance_record::{Model as AttendanceRecordModel, Status},
        class_session::Model as ClassSessionModel,
        class_time::Model as ClassTimeModel,
        institution::Model as InstitutionModel,
        institution_settings::{Model as SettingsModel, ValidationMethod},
        subject::Model as SubjectModel,
        user::{Model as UserModel, Role},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::helpers::make_test_app;

    // Campus pin used across the suite: central São Paulo.
    const CAMPUS_LAT: f64 = -23.5505;
    const CAMPUS_LON: f64 = -46.6333;
    // Same longitude, roughly 340 m north of the pin.
    const OFF_CAMPUS_LAT: f64 = -23.5474423;

    struct TestCtx {
        institution: InstitutionModel,
        teacher: UserModel,
        ana: UserModel,
        bruno: UserModel,
        carla: UserModel,
        subject: SubjectModel,
        slot: ClassTimeModel,
        session: ClassSessionModel,
    }

    /// Seeds one institution with an all-day slot and a session dated today,
    /// so the confirmation window is open whenever the suite runs.
    async fn setup(db: &sea_orm::DatabaseConnection) -> TestCtx {
        let institution = InstitutionModel::create(db, "Colégio Horizonte")
            .await
            .unwrap();
        let teacher = UserModel::create(
            db,
            "prof@test.com",
            "password123",
            "Professor",
            Role::Teacher,
            Some(institution.id),
        )
        .await
        .unwrap();
        let ana = UserModel::create(
            db,
            "ana@test.com",
            "password123",
            "Ana Souza",
            Role::Student,
            Some(institution.id),
        )
        .await
        .unwrap();
        let bruno = UserModel::create(
            db,
            "bruno@test.com",
            "password123",
            "Bruno Lima",
            Role::Student,
            Some(institution.id),
        )
        .await
        .unwrap();
        let carla = UserModel::create(
            db,
            "carla@test.com",
            "password123",
            "Carla Dias",
            Role::Student,
            Some(institution.id),
        )
        .await
        .unwrap();
        let subject = SubjectModel::create(db, institution.id, "Matemática")
            .await
            .unwrap();
        let slot = ClassTimeModel::create(
            db,
            institution.id,
            "Dia inteiro",
            "00:00",
            "23:59",
            &[0, 1, 2, 3, 4, 5, 6],
            true,
        )
        .await
        .unwrap();
        let session = ClassSessionModel::create(
            db,
            institution.id,
            subject.id,
            teacher.id,
            slot.id,
            Local::now().date_naive(),
            None,
            None,
        )
        .await
        .unwrap();

        TestCtx {
            institution,
            teacher,
            ana,
            bruno,
            carla,
            subject,
            slot,
            session,
        }
    }

    async fn save_policy(
        db: &sea_orm::DatabaseConnection,
        institution_id: i64,
        method: ValidationMethod,
        pinned: bool,
    ) {
        let (lat, lon) = if pinned {
            (Some(CAMPUS_LAT), Some(CAMPUS_LON))
        } else {
            (None, None)
        };
        SettingsModel::upsert(db, institution_id, method, 15, lat, lon, 100)
            .await
            .unwrap();
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        token: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Authorization", format!("Bearer {}", token));
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn confirm_uri(ctx: &TestCtx) -> String {
        format!(
            "/api/institutions/{}/classes/{}/attendance/confirm",
            ctx.institution.id, ctx.session.id
        )
    }

    fn attendance_uri(ctx: &TestCtx) -> String {
        format!(
            "/api/institutions/{}/classes/{}/attendance",
            ctx.institution.id, ctx.session.id
        )
    }

    fn campus_location() -> Value {
        json!({ "location": { "latitude": CAMPUS_LAT, "longitude": CAMPUS_LON } })
    }

    #[tokio::test]
    async fn on_campus_student_confirms() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) =
            send(app, "POST", &confirm_uri(&ctx), &token, Some(campus_location())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Attendance confirmed");
        assert_eq!(body["data"]["result"], "confirmed");
        assert!(body["data"]["distance_m"].as_f64().unwrap() < 1.0);

        let record = AttendanceRecordModel::find_for(state.db(), ctx.session.id, ctx.ana.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, Status::Present);
        assert_eq!(record.confirmed_by, ctx.ana.id);
        assert_eq!(record.latitude, Some(CAMPUS_LAT));
        assert!(record.distance_m.unwrap() < 1.0);
    }

    #[tokio::test]
    async fn confirming_twice_conflicts() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (first, _) = send(
            app.clone(),
            "POST",
            &confirm_uri(&ctx),
            &token,
            Some(campus_location()),
        )
        .await;
        assert_eq!(first, StatusCode::OK);

        let (second, body) =
            send(app, "POST", &confirm_uri(&ctx), &token, Some(campus_location())).await;

        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["result"], "already_confirmed");
        assert!(body["data"]["confirmed_at"].is_string());

        let records = AttendanceRecordModel::list_for_session(state.db(), ctx.session.id)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn wrong_day_session_is_refused() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let yesterday = ClassSessionModel::create(
            state.db(),
            ctx.institution.id,
            ctx.subject.id,
            ctx.teacher.id,
            ctx.slot.id,
            Local::now().date_naive().pred_opt().unwrap(),
            None,
            None,
        )
        .await
        .unwrap();
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let uri = format!(
            "/api/institutions/{}/classes/{}/attendance/confirm",
            ctx.institution.id, yesterday.id
        );
        let (status, body) = send(app, "POST", &uri, &token, Some(campus_location())).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"]["result"], "wrong_date");

        let record = AttendanceRecordModel::find_for(state.db(), yesterday.id, ctx.ana.id)
            .await
            .unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn off_campus_device_is_out_of_range() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) = send(
            app,
            "POST",
            &confirm_uri(&ctx),
            &token,
            Some(json!({ "location": { "latitude": OFF_CAMPUS_LAT, "longitude": CAMPUS_LON } })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["result"], "out_of_range");
        assert!(body["data"]["distance_m"].as_f64().unwrap() > 100.0);
        assert_eq!(body["data"]["allowed_radius_m"], 100.0);

        let record = AttendanceRecordModel::find_for(state.db(), ctx.session.id, ctx.ana.id)
            .await
            .unwrap();
        assert!(record.is_none(), "denied attempts must not write");
    }

    #[tokio::test]
    async fn device_location_failures_surface_the_reason() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) = send(
            app,
            "POST",
            &confirm_uri(&ctx),
            &token,
            Some(json!({ "location_error": "denied" })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"]["result"], "location_unavailable");
        assert_eq!(body["data"]["reason"], "location permission was denied");
    }

    #[tokio::test]
    async fn code_institution_confirms_with_screen_code() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Code, false).await;

        let (teacher_token, _) = generate_jwt(ctx.teacher.id, false);
        let code_uri = format!("{}/code", attendance_uri(&ctx));
        let (status, body) = send(app.clone(), "GET", &code_uri, &teacher_token, None).await;
        assert_eq!(status, StatusCode::OK);
        let code = body["data"]["code"].as_str().unwrap().to_string();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        let remaining = body["data"]["seconds_until_rotation"].as_i64().unwrap();
        assert!((1..=60).contains(&remaining));

        let (token, _) = generate_jwt(ctx.ana.id, false);
        let (status, body) = send(
            app,
            "POST",
            &confirm_uri(&ctx),
            &token,
            Some(json!({ "code": code })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["result"], "confirmed");
        // code confirmations carry no distance
        assert!(body["data"].get("distance_m").is_none());

        let record = AttendanceRecordModel::find_for(state.db(), ctx.session.id, ctx.ana.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.latitude, None);
        assert_eq!(record.distance_m, None);
    }

    #[tokio::test]
    async fn code_against_geolocation_institution_is_wrong_method() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) = send(
            app,
            "POST",
            &confirm_uri(&ctx),
            &token,
            Some(json!({ "code": "123456" })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"]["result"], "wrong_validation_method");
        assert_eq!(body["data"]["method"], "geolocation");
    }

    #[tokio::test]
    async fn garbage_code_is_invalid() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Code, false).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        // letters can never match a six-digit code
        let (status, body) = send(
            app,
            "POST",
            &confirm_uri(&ctx),
            &token,
            Some(json!({ "code": "ABCDEF" })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"]["result"], "invalid_code");
    }

    #[tokio::test]
    async fn manual_institutions_accept_no_self_confirmation() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Manual, false).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) =
            send(app, "POST", &confirm_uri(&ctx), &token, Some(campus_location())).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["data"]["result"], "wrong_validation_method");
        assert_eq!(body["data"]["method"], "manual");
    }

    #[tokio::test]
    async fn geolocation_without_campus_pin_is_a_configuration_error() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, false).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) =
            send(app, "POST", &confirm_uri(&ctx), &token, Some(campus_location())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["result"], "configuration_error");
        assert!(body["data"]["reason"].is_string());
    }

    #[tokio::test]
    async fn staff_cannot_self_confirm() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.teacher.id, false);

        let (status, body) =
            send(app, "POST", &confirm_uri(&ctx), &token, Some(campus_location())).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Only students are allowed to confirm attendance");
    }

    #[tokio::test]
    async fn empty_proof_is_rejected() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) = send(app, "POST", &confirm_uri(&ctx), &token, Some(json!({}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["message"],
            "Provide a location, a location error or an attendance code"
        );
    }

    #[tokio::test]
    async fn unknown_session_returns_not_found() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let uri = format!(
            "/api/institutions/{}/classes/424242/attendance/confirm",
            ctx.institution.id
        );
        let (status, body) = send(app, "POST", &uri, &token, Some(campus_location())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["data"]["result"], "not_found");
    }

    #[tokio::test]
    async fn outsiders_never_reach_the_confirm_flow() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let other = InstitutionModel::create(state.db(), "Outra Escola")
            .await
            .unwrap();
        let outsider = UserModel::create(
            state.db(),
            "fora@test.com",
            "password123",
            "Fora",
            Role::Student,
            Some(other.id),
        )
        .await
        .unwrap();
        let (token, _) = generate_jwt(outsider.id, false);

        let (status, body) =
            send(app, "POST", &confirm_uri(&ctx), &token, Some(campus_location())).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Not a member of this institution");
    }

    #[tokio::test]
    async fn parallel_confirms_write_exactly_one_record() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);
        let uri = confirm_uri(&ctx);

        let attempts = (0..8).map(|_| {
            let app = app.clone();
            let uri = uri.clone();
            let token = token.clone();
            async move { send(app, "POST", &uri, &token, Some(campus_location())).await }
        });
        let outcomes = futures::future::join_all(attempts).await;

        let confirmed = outcomes.iter().filter(|(s, _)| *s == StatusCode::OK).count();
        let conflicted = outcomes
            .iter()
            .filter(|(s, _)| *s == StatusCode::CONFLICT)
            .count();
        assert_eq!(confirmed, 1, "exactly one submission wins");
        assert_eq!(conflicted, 7);

        let records = AttendanceRecordModel::list_for_session(state.db(), ctx.session.id)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn roll_call_writes_and_the_report_reflects_it() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Manual, false).await;
        let (token, _) = generate_jwt(ctx.teacher.id, false);

        let (status, body) = send(
            app.clone(),
            "PUT",
            &attendance_uri(&ctx),
            &token,
            Some(json!({
                "records": [
                    { "student_id": ctx.ana.id, "status": "late", "notes": "chegou 9h20" },
                    { "student_id": ctx.bruno.id, "status": "excused" }
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["written"], 2);

        let (status, body) = send(app, "GET", &attendance_uri(&ctx), &token, None).await;
        assert_eq!(status, StatusCode::OK);

        let records = body["data"]["records"].as_array().unwrap();
        assert_eq!(records.len(), 3, "one row per enrolled student");
        assert_eq!(records[0]["student_name"], "Ana Souza");
        assert_eq!(records[0]["status"], "late");
        assert_eq!(records[0]["notes"], "chegou 9h20");
        assert_eq!(records[1]["student_name"], "Bruno Lima");
        assert_eq!(records[1]["status"], "excused");
        assert_eq!(records[2]["student_name"], "Carla Dias");
        assert_eq!(records[2]["status"], "pending");
        assert!(records[2]["confirmed_at"].is_null());

        let summary = &body["data"]["summary"];
        assert_eq!(summary["total"], 3);
        assert_eq!(summary["late"], 1);
        assert_eq!(summary["excused"], 1);
        assert_eq!(summary["pending"], 1);
        let rate = summary["attendance_rate"].as_f64().unwrap();
        assert!((rate - 1.0 / 3.0).abs() < 1e-9);

        let record = AttendanceRecordModel::find_for(state.db(), ctx.session.id, ctx.ana.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, Status::Late);
        assert_eq!(record.confirmed_by, ctx.teacher.id);
    }

    #[tokio::test]
    async fn roll_call_requires_entries() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.teacher.id, false);

        let (status, body) = send(
            app,
            "PUT",
            &attendance_uri(&ctx),
            &token,
            Some(json!({ "records": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Request must include a non-empty list of records");
    }

    #[tokio::test]
    async fn report_is_for_staff_only() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let (status, body) = send(app, "GET", &attendance_uri(&ctx), &token, None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["message"],
            "Coordinator or teacher access required for this institution"
        );
    }

    #[tokio::test]
    async fn code_endpoint_rejects_non_code_institutions() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;
        let (token, _) = generate_jwt(ctx.teacher.id, false);

        let uri = format!("{}/code", attendance_uri(&ctx));
        let (status, body) = send(app, "GET", &uri, &token, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "This institution does not validate attendance by code"
        );
    }

    #[tokio::test]
    async fn code_endpoint_is_staff_only() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Code, false).await;
        let (token, _) = generate_jwt(ctx.ana.id, false);

        let uri = format!("{}/code", attendance_uri(&ctx));
        let (status, _) = send(app, "GET", &uri, &token, None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn csv_export_downloads_an_attachment() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        save_policy(state.db(), ctx.institution.id, ValidationMethod::Geolocation, true).await;

        let (student_token, _) = generate_jwt(ctx.ana.id, false);
        let (status, _) = send(
            app.clone(),
            "POST",
            &confirm_uri(&ctx),
            &student_token,
            Some(campus_location()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (token, _) = generate_jwt(ctx.teacher.id, false);
        let request = Request::builder()
            .method("GET")
            .uri(format!("{}/export", attendance_uri(&ctx)))
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let disposition = response
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/csv"));
        assert!(disposition.contains("attachment; filename=\"attendance_class_"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "student_id,student_name,student_email,status,confirmed_at,distance_m,notes"
        );
        assert_eq!(lines.clone().count(), 3, "one data line per student");
        assert!(csv.contains("ana@test.com"));
        assert!(csv.contains(",present,"));
    }
}
