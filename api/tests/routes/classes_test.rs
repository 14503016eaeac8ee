#[cfg(test)]
mod tests {
    use api::auth::generate_jwt;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use db::models::{
        class_session::Model as ClassSessionModel,
        class_time::Model as ClassTimeModel,
        institution::Model as InstitutionModel,
        subject::Model as SubjectModel,
        user::{Model as UserModel, Role},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::helpers::make_test_app;

    struct TestCtx {
        teacher: UserModel,
        student: UserModel,
        institution: InstitutionModel,
        subject: SubjectModel,
        slot: ClassTimeModel,
    }

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
        let student = UserModel::create(
            db,
            "aluno@test.com",
            "password123",
            "Aluno",
            Role::Student,
            Some(institution.id),
        )
        .await
        .unwrap();
        let subject = SubjectModel::create(db, institution.id, "Matemática")
            .await
            .unwrap();
        let slot = ClassTimeModel::create(db, institution.id, "Manhã 1", "08:00", "09:40", &[1, 3, 5], true)
            .await
            .unwrap();

        TestCtx {
            teacher,
            student,
            institution,
            subject,
            slot,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
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

    #[tokio::test]
    async fn staff_schedules_a_session() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.teacher.id, false);

        let (status, json) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/classes", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "subject_id": ctx.subject.id,
                "teacher_id": ctx.teacher.id,
                "class_time_id": ctx.slot.id,
                "session_date": "2026-03-06",
                "title": "Revisão de frações"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["session_date"], "2026-03-06");
        assert_eq!(json["data"]["title"], "Revisão de frações");
        // the code secret stays server-side
        assert!(json["data"].get("code_secret").is_none());
    }

    #[tokio::test]
    async fn foreign_subject_is_rejected() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let other = InstitutionModel::create(state.db(), "Outra Escola")
            .await
            .unwrap();
        let foreign_subject = SubjectModel::create(state.db(), other.id, "Química")
            .await
            .unwrap();
        let (token, _) = generate_jwt(ctx.teacher.id, false);

        let (status, json) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/classes", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "subject_id": foreign_subject.id,
                "teacher_id": ctx.teacher.id,
                "class_time_id": ctx.slot.id,
                "session_date": "2026-03-06"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "Subject does not belong to this institution");
    }

    #[tokio::test]
    async fn foreign_slot_is_rejected() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let other = InstitutionModel::create(state.db(), "Outra Escola")
            .await
            .unwrap();
        let foreign_slot =
            ClassTimeModel::create(state.db(), other.id, "Noite", "19:00", "20:40", &[2], true)
                .await
                .unwrap();
        let (token, _) = generate_jwt(ctx.teacher.id, false);

        let (status, json) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/classes", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "subject_id": ctx.subject.id,
                "teacher_id": ctx.teacher.id,
                "class_time_id": foreign_slot.id,
                "session_date": "2026-03-06"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json["message"],
            "Class time does not belong to this institution"
        );
    }

    #[tokio::test]
    async fn list_filters_by_date_and_subject() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let db = state.db();

        let physics = SubjectModel::create(db, ctx.institution.id, "Física")
            .await
            .unwrap();
        ClassSessionModel::create(
            db,
            ctx.institution.id,
            ctx.subject.id,
            ctx.teacher.id,
            ctx.slot.id,
            date(2026, 3, 6),
            Some("Matemática sexta"),
            None,
        )
        .await
        .unwrap();
        ClassSessionModel::create(
            db,
            ctx.institution.id,
            physics.id,
            ctx.teacher.id,
            ctx.slot.id,
            date(2026, 3, 6),
            Some("Física sexta"),
            None,
        )
        .await
        .unwrap();
        ClassSessionModel::create(
            db,
            ctx.institution.id,
            ctx.subject.id,
            ctx.teacher.id,
            ctx.slot.id,
            date(2026, 3, 9),
            Some("Matemática segunda"),
            None,
        )
        .await
        .unwrap();

        let (token, _) = generate_jwt(ctx.student.id, false);

        let (status, json) = send(
            app.clone(),
            "GET",
            &format!(
                "/api/institutions/{}/classes?date=2026-03-06",
                ctx.institution.id
            ),
            &token,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 2);

        let (status, json) = send(
            app,
            "GET",
            &format!(
                "/api/institutions/{}/classes?date=2026-03-06&subject_id={}",
                ctx.institution.id, physics.id
            ),
            &token,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["classes"][0]["title"], "Física sexta");
        assert_eq!(json["data"]["classes"][0]["subject_name"], "Física");
    }

    #[tokio::test]
    async fn listing_paginates() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let db = state.db();

        for day in 1..=5 {
            ClassSessionModel::create(
                db,
                ctx.institution.id,
                ctx.subject.id,
                ctx.teacher.id,
                ctx.slot.id,
                date(2026, 3, day),
                None,
                None,
            )
            .await
            .unwrap();
        }

        let (token, _) = generate_jwt(ctx.student.id, false);
        let (status, json) = send(
            app,
            "GET",
            &format!(
                "/api/institutions/{}/classes?page=2&per_page=2",
                ctx.institution.id
            ),
            &token,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 5);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(json["data"]["classes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fetching_one_session_resolves_the_schedule() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let session = ClassSessionModel::create(
            state.db(),
            ctx.institution.id,
            ctx.subject.id,
            ctx.teacher.id,
            ctx.slot.id,
            date(2026, 3, 6),
            None,
            None,
        )
        .await
        .unwrap();

        let (token, _) = generate_jwt(ctx.student.id, false);
        let (status, json) = send(
            app,
            "GET",
            &format!(
                "/api/institutions/{}/classes/{}",
                ctx.institution.id, session.id
            ),
            &token,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["subject_name"], "Matemática");
        assert_eq!(json["data"]["start_time"], "08:00");
        assert_eq!(json["data"]["end_time"], "09:40");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.student.id, false);

        let (status, _) = send(
            app,
            "GET",
            &format!("/api/institutions/{}/classes/424242", ctx.institution.id),
            &token,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn students_cannot_schedule_sessions() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.student.id, false);

        let (status, _) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/classes", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "subject_id": ctx.subject.id,
                "teacher_id": ctx.teacher.id,
                "class_time_id": ctx.slot.id,
                "session_date": "2026-03-06"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
