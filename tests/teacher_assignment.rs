mod test_support;

use academic_records::repositories::GradeSheetRepository;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_support::spawn_app;

#[tokio::test]
async fn reassignment_moves_every_row_without_adding_any() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;
    let first_student = app.add_student(&token, group, "Иванов").await;
    let second_student = app.add_student(&token, group, "Петров").await;
    let first = app.semester_id(&token, 1).await;
    let discipline = app
        .add_discipline(&token, specialty, "Математика", "Экзамен", Some(first))
        .await;

    let teachers = app.get("/teachers/", &token).await;
    let teacher_id = teachers.body[0]["id"].as_i64().expect("teacher id");

    let created = app
        .post(
            "/teachers/",
            &token,
            json!({ "surname": "Сидоров", "first_name": "Алексей", "patronymic": "Николаевич" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);
    let other_id = app
        .get("/teachers/", &token)
        .await
        .body
        .as_array()
        .and_then(|items| items.iter().find(|t| t["surname"] == "Сидоров"))
        .and_then(|t| t["id"].as_i64())
        .expect("second teacher");

    let uri = format!("/assign-teacher/{discipline}/{group}/");
    let assigned = app.post(&uri, &token, json!({ "teacher_id": teacher_id })).await;
    assert_eq!(assigned.status, StatusCode::SEE_OTHER);
    assert_eq!(
        assigned.location.as_deref(),
        Some(format!("/directorate/disciplines/{discipline}/groups/").as_str())
    );

    let repo = GradeSheetRepository::new(&app.db);
    let rows = repo
        .find_by_students(vec![first_student, second_student])
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.teacher_id == Some(teacher_id as i32)));

    app.post(&uri, &token, json!({ "teacher_id": other_id })).await;
    let rows = repo
        .find_by_students(vec![first_student, second_student])
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.teacher_id == Some(other_id as i32)));

    let form = app.get(&uri, &token).await;
    assert_eq!(form.body["current_teacher_id"], other_id);
}

#[tokio::test]
async fn assignment_creates_rows_for_a_discipline_outside_the_specialty() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let own = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let other = app.add_specialty(&token, "09.03.02", "ИСТ").await;
    let group = app.add_group(&token, own, "ИСИб-24-1").await;
    let students = vec![
        app.add_student(&token, group, "Иванов").await,
        app.add_student(&token, group, "Петров").await,
    ];
    let second = app.semester_id(&token, 2).await;
    let elective = app
        .add_discipline(&token, other, "Web-программирование", "Экзамен", Some(second))
        .await;

    let repo = GradeSheetRepository::new(&app.db);
    assert_eq!(repo.find_by_students(students.clone()).await.unwrap().len(), 0);

    let teacher_id = app.get("/teachers/", &token).await.body[0]["id"]
        .as_i64()
        .expect("teacher id") as i32;
    let uri = format!("/assign-teacher/{elective}/{group}/");

    for _ in 0..2 {
        let assigned = app.post(&uri, &token, json!({ "teacher_id": teacher_id })).await;
        assert_eq!(assigned.status, StatusCode::SEE_OTHER);

        let rows = repo.find_by_students(students.clone()).await.unwrap();
        assert_eq!(rows.len(), students.len());
        assert!(rows.iter().all(|row| {
            row.discipline_id == elective
                && row.semester_id == second
                && row.grade == 0
                && row.teacher_id == Some(teacher_id)
        }));
    }
}

#[tokio::test]
async fn teachers_cannot_assign() {
    let app = spawn_app().await;
    let registrar = app.registrar().await;
    let specialty = app.add_specialty(&registrar, "09.03.01", "ИВТ").await;
    let group = app.add_group(&registrar, specialty, "ИСИб-24-1").await;
    let discipline = app
        .add_discipline(&registrar, specialty, "Математика", "Экзамен", None)
        .await;

    let teacher = app.teacher().await;
    let uri = format!("/assign-teacher/{discipline}/{group}/");
    assert_eq!(app.get(&uri, &teacher).await.status, StatusCode::FORBIDDEN);
    assert_eq!(
        app.post(&uri, &teacher, json!({ "teacher_id": 1 })).await.status,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn discipline_without_semester_cannot_get_rows() {
    let app = spawn_app().await;
    let token = app.directorate().await;
    let registrar = app.registrar().await;
    let specialty = app.add_specialty(&registrar, "09.03.01", "ИВТ").await;
    let group = app.add_group(&registrar, specialty, "ИСИб-24-1").await;
    let student = app.add_student(&registrar, group, "Иванов").await;
    let discipline = app
        .add_discipline(&registrar, specialty, "Факультатив", "Зачёт", None)
        .await;
    let teacher_id = app.get("/teachers/", &token).await.body[0]["id"]
        .as_i64()
        .expect("teacher id");

    let response = app
        .post(
            &format!("/assign-teacher/{discipline}/{group}/"),
            &token,
            json!({ "teacher_id": teacher_id }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let repo = GradeSheetRepository::new(&app.db);
    assert_eq!(repo.count_for_student(student).await.unwrap(), 0);
}

#[tokio::test]
async fn teacher_sees_only_assigned_disciplines() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;
    app.add_student(&token, group, "Иванов").await;
    let first = app.semester_id(&token, 1).await;
    let math = app
        .add_discipline(&token, specialty, "Математика", "Экзамен", Some(first))
        .await;
    app.add_discipline(&token, specialty, "Физика", "Зачёт", Some(first)).await;

    let teacher = app.teacher().await;
    let before = app.get("/directorate/disciplines/", &teacher).await;
    assert_eq!(before.body, json!([]));

    // The seeded teacher record shares the teacher account's surname.
    let petrov = app
        .get("/teachers/", &token)
        .await
        .body
        .as_array()
        .and_then(|items| items.iter().find(|t| t["surname"] == "Петров"))
        .and_then(|t| t["id"].as_i64())
        .expect("teacher record");
    app.post(
        &format!("/assign-teacher/{math}/{group}/"),
        &token,
        json!({ "teacher_id": petrov }),
    )
    .await;

    let after = app.get("/directorate/disciplines/", &teacher).await;
    let names: Vec<&str> = after
        .body
        .as_array()
        .map(|items| items.iter().filter_map(|d| d["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["Математика"]);

    let registrar_view = app.get("/directorate/disciplines/", &token).await;
    assert_eq!(registrar_view.body.as_array().map(Vec::len), Some(2));
}
