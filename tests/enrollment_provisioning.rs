mod test_support;

use academic_records::repositories::{GradeSheetRepository, StudentRepository};
use academic_records::services::provisioning::provision_student;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use test_support::spawn_app;

#[tokio::test]
async fn enrolled_student_gets_one_ungraded_row_per_discipline() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(&token, 1).await;
    let third = app.semester_id(&token, 3).await;
    app.add_discipline(&token, specialty, "Математика", "Экзамен", Some(first)).await;
    app.add_discipline(&token, specialty, "Физика", "Зачёт", Some(third)).await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;

    let student = app.add_student(&token, group, "Иванов").await;

    let repo = GradeSheetRepository::new(&app.db);
    assert_eq!(repo.count_for_student(student).await.unwrap(), 2);

    let rows = repo.find_by_students(vec![student]).await.unwrap();
    assert!(rows.iter().all(|row| row.grade == 0 && row.teacher_id.is_none()));
}

#[tokio::test]
async fn provisioning_a_student_twice_adds_nothing() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(&token, 1).await;
    let second = app.semester_id(&token, 2).await;
    app.add_discipline(&token, specialty, "Математика", "Экзамен", Some(first)).await;
    app.add_discipline(&token, specialty, "Физика", "Зачёт", Some(second)).await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;
    let student_id = app.add_student(&token, group, "Иванов").await;

    let student = StudentRepository::new(&app.db)
        .find_by_id(student_id)
        .await
        .unwrap()
        .expect("student");
    let repo = GradeSheetRepository::new(&app.db);
    assert_eq!(repo.count_for_student(student_id).await.unwrap(), 2);

    assert_eq!(provision_student(&app.db, &student).await.unwrap(), 0);
    assert_eq!(provision_student(&app.db, &student).await.unwrap(), 0);
    assert_eq!(repo.count_for_student(student_id).await.unwrap(), 2);
}

#[tokio::test]
async fn disciplines_without_semester_are_skipped() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.02", "ИСТ").await;
    let first = app.semester_id(&token, 1).await;
    app.add_discipline(&token, specialty, "Математика", "Экзамен", Some(first)).await;
    app.add_discipline(&token, specialty, "Факультатив", "Зачёт", None).await;
    let group = app.add_group(&token, specialty, "ИСТб-24-1").await;

    let student = app.add_student(&token, group, "Петров").await;

    let repo = GradeSheetRepository::new(&app.db);
    assert_eq!(repo.count_for_student(student).await.unwrap(), 1);
}

#[tokio::test]
async fn new_discipline_reaches_enrolled_students() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;
    let student = app.add_student(&token, group, "Сидоров").await;

    let repo = GradeSheetRepository::new(&app.db);
    assert_eq!(repo.count_for_student(student).await.unwrap(), 0);

    let second = app.semester_id(&token, 2).await;
    app.add_discipline(&token, specialty, "Базы данных", "Экзамен", Some(second)).await;
    assert_eq!(repo.count_for_student(student).await.unwrap(), 1);
}

#[tokio::test]
async fn opening_the_sheet_twice_creates_no_duplicates() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(&token, 1).await;
    let discipline = app
        .add_discipline(&token, specialty, "Математика", "Экзамен", Some(first))
        .await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;
    app.add_student(&token, group, "Иванов").await;
    app.add_student(&token, group, "Кузнецов").await;

    let uri = format!("/grade-entry/{discipline}/{group}/");
    let first_open = app.get(&uri, &token).await;
    let second_open = app.get(&uri, &token).await;

    assert_eq!(first_open.status, StatusCode::OK);
    assert_eq!(first_open.body["rows"].as_array().map(Vec::len), Some(2));
    assert_eq!(second_open.body["rows"], first_open.body["rows"]);
    assert_eq!(first_open.body["rows"][0]["surname"], "Иванов");
}

#[tokio::test]
async fn deleting_a_student_drops_their_rows() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(&token, 1).await;
    app.add_discipline(&token, specialty, "Математика", "Экзамен", Some(first)).await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;
    let student = app.add_student(&token, group, "Попов").await;

    let response = app
        .send("POST", &format!("/students/{student}/delete/"), Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/groups/{group}/students/").as_str())
    );

    let repo = GradeSheetRepository::new(&app.db);
    assert_eq!(repo.count_for_student(student).await.unwrap(), 0);
}

#[tokio::test]
async fn teachers_cannot_enroll_students() {
    let app = spawn_app().await;
    let registrar = app.registrar().await;
    let specialty = app.add_specialty(&registrar, "09.03.01", "ИВТ").await;
    let group = app.add_group(&registrar, specialty, "ИСИб-24-1").await;

    let teacher = app.teacher().await;
    let response = app
        .post(
            &format!("/groups/{group}/students/"),
            &teacher,
            serde_json::json!({ "surname": "Иванов", "first_name": "Иван" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn roster_import_enrolls_and_provisions_everyone() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(&token, 1).await;
    app.add_discipline(&token, specialty, "Математика", "Экзамен", Some(first)).await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;

    let response = app
        .upload(
            &format!("/groups/{group}/students/import"),
            &token,
            "surname,first_name,patronymic\nИванов,Иван,Иванович\nПетрова,Анна,",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER, "{:?}", response.body);

    let students = app.get(&format!("/groups/{group}/students/"), &token).await;
    let ids: Vec<i32> = students.body["students"]
        .as_array()
        .map(|items| items.iter().filter_map(|s| s["id"].as_i64()).map(|id| id as i32).collect())
        .unwrap_or_default();
    assert_eq!(ids.len(), 2);

    let rows = GradeSheetRepository::new(&app.db)
        .find_by_students(ids)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn malformed_roster_creates_nobody() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let group = app.add_group(&token, specialty, "ИСИб-24-1").await;

    let response = app
        .upload(
            &format!("/groups/{group}/students/import"),
            &token,
            "Иванов,Иван\nСидоров",
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let students = app.get(&format!("/groups/{group}/students/"), &token).await;
    assert_eq!(students.body["students"], serde_json::json!([]));
}
