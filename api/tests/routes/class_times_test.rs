#[cfg(test)]
mod tests {
    use api::auth::generate_jwt;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::{
        class_time::Model as ClassTimeModel,
        institution::Model as InstitutionModel,
        user::{Model as UserModel, Role},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::helpers::make_test_app;

    struct TestCtx {
        coordinator: UserModel,
        student: UserModel,
        institution: InstitutionModel,
    }

    async fn setup(db: &sea_orm::DatabaseConnection) -> TestCtx {
        let institution = InstitutionModel::create(db, "Cursinho Central")
            .await
            .unwrap();
        let coordinator = UserModel::create(
            db,
            "coord@test.com",
            "password123",
            "Coordenadora",
            Role::Coordinator,
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

        TestCtx {
            coordinator,
            student,
            institution,
        }
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
    async fn staff_creates_a_slot() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.coordinator.id, false);

        let (status, json) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/class-times", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "name": "Manhã 1",
                "start_time": "08:00",
                "end_time": "09:40",
                "weekdays": [1, 3, 5]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["name"], "Manhã 1");
        assert_eq!(json["data"]["weekdays"], serde_json::json!([1, 3, 5]));
        assert_eq!(json["data"]["active"], true);
    }

    #[tokio::test]
    async fn malformed_times_fail_validation() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.coordinator.id, false);
        let uri = format!("/api/institutions/{}/class-times", ctx.institution.id);

        for (start, end) in [("8:00", "09:40"), ("08:00", "25:00"), ("aa:bb", "09:40")] {
            let (status, _) = send(
                app.clone(),
                "POST",
                &uri,
                &token,
                Some(serde_json::json!({
                    "name": "Inválido",
                    "start_time": start,
                    "end_time": end,
                    "weekdays": [1]
                })),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{start}-{end}");
        }
    }

    #[tokio::test]
    async fn start_must_come_before_end() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.coordinator.id, false);

        let (status, json) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/class-times", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "name": "Invertido",
                "start_time": "10:00",
                "end_time": "09:00",
                "weekdays": [2]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["message"], "Start time must be before end time");
    }

    #[tokio::test]
    async fn weekday_numbers_are_bounded() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.coordinator.id, false);

        let (status, _) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/class-times", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "name": "Dia Oito",
                "start_time": "08:00",
                "end_time": "09:00",
                "weekdays": [7]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn members_list_slots_in_start_order() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;

        ClassTimeModel::create(state.db(), ctx.institution.id, "Tarde", "13:30", "15:10", &[1], true)
            .await
            .unwrap();
        ClassTimeModel::create(state.db(), ctx.institution.id, "Manhã", "08:00", "09:40", &[1], true)
            .await
            .unwrap();

        let (token, _) = generate_jwt(ctx.student.id, false);
        let (status, json) = send(
            app,
            "GET",
            &format!("/api/institutions/{}/class-times", ctx.institution.id),
            &token,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Manhã", "Tarde"]);
    }

    #[tokio::test]
    async fn staff_edits_a_slot() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let slot =
            ClassTimeModel::create(state.db(), ctx.institution.id, "Manhã", "08:00", "09:40", &[1], true)
                .await
                .unwrap();
        let (token, _) = generate_jwt(ctx.coordinator.id, false);

        let (status, json) = send(
            app,
            "PUT",
            &format!(
                "/api/institutions/{}/class-times/{}",
                ctx.institution.id, slot.id
            ),
            &token,
            Some(serde_json::json!({ "end_time": "10:00", "active": false })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["end_time"], "10:00");
        assert_eq!(json["data"]["start_time"], "08:00");
        assert_eq!(json["data"]["active"], false);
    }

    #[tokio::test]
    async fn edit_cannot_invert_the_window() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let slot =
            ClassTimeModel::create(state.db(), ctx.institution.id, "Manhã", "08:00", "09:40", &[1], true)
                .await
                .unwrap();
        let (token, _) = generate_jwt(ctx.coordinator.id, false);

        let (status, _) = send(
            app,
            "PUT",
            &format!(
                "/api/institutions/{}/class-times/{}",
                ctx.institution.id, slot.id
            ),
            &token,
            Some(serde_json::json!({ "end_time": "07:00" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn staff_deletes_a_slot() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let slot =
            ClassTimeModel::create(state.db(), ctx.institution.id, "Extinto", "18:00", "19:00", &[4], true)
                .await
                .unwrap();
        let (token, _) = generate_jwt(ctx.coordinator.id, false);
        let uri = format!(
            "/api/institutions/{}/class-times/{}",
            ctx.institution.id, slot.id
        );

        let (status, _) = send(app.clone(), "DELETE", &uri, &token, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(app, "DELETE", &uri, &token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn students_cannot_manage_slots() {
        let (app, state) = make_test_app().await;
        let ctx = setup(state.db()).await;
        let (token, _) = generate_jwt(ctx.student.id, false);

        let (status, _) = send(
            app,
            "POST",
            &format!("/api/institutions/{}/class-times", ctx.institution.id),
            &token,
            Some(serde_json::json!({
                "name": "Não Deveria",
                "start_time": "08:00",
                "end_time": "09:00",
                "weekdays": [1]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
