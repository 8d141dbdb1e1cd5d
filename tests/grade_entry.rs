mod test_support;

use academic_records::repositories::GradeSheetRepository;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use test_support::{TestApp, spawn_app};

struct Sheet {
    discipline: i32,
    group: i32,
    student: i32,
}

async fn sheet_with_one_student(app: &TestApp, token: &str) -> Sheet {
    let specialty = app.add_specialty(token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(token, 1).await;
    let discipline = app
        .add_discipline(token, specialty, "Математика", "Экзамен", Some(first))
        .await;
    let group = app.add_group(token, specialty, "ИСИб-24-1").await;
    let student = app.add_student(token, group, "Иванов").await;
    Sheet {
        discipline,
        group,
        student,
    }
}

fn grade_form(id: i64, grade: Value) -> Value {
    let mut form = Map::new();
    form.insert(id.to_string(), grade);
    Value::Object(form)
}

fn row_id(body: &Value) -> i64 {
    body["rows"][0]["grade_sheet_id"].as_i64().expect("row id")
}

#[tokio::test]
async fn teacher_saves_grades() {
    let app = spawn_app().await;
    let registrar = app.registrar().await;
    let sheet = sheet_with_one_student(&app, &registrar).await;
    let uri = format!("/grade-entry/{}/{}/", sheet.discipline, sheet.group);

    let teacher = app.teacher().await;
    let opened = app.get(&uri, &teacher).await;
    assert_eq!(opened.status, StatusCode::OK);
    assert_eq!(opened.body["can_edit"], true);
    let id = row_id(&opened.body);

    let mut form = grade_form(id, json!("5"));
    form["unrelated"] = json!(4);
    let saved = app.post(&uri, &teacher, form).await;
    assert_eq!(saved.status, StatusCode::SEE_OTHER);
    assert_eq!(saved.location.as_deref(), Some(uri.as_str()));
    assert_eq!(saved.body["level"], "success");

    let rows = GradeSheetRepository::new(&app.db)
        .find_by_students(vec![sheet.student])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].grade, 5);
}

#[tokio::test]
async fn null_grades_leave_rows_untouched() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let sheet = sheet_with_one_student(&app, &token).await;
    let uri = format!("/grade-entry/{}/{}/", sheet.discipline, sheet.group);

    let id = row_id(&app.get(&uri, &token).await.body);
    app.post(&uri, &token, grade_form(id, json!(4))).await;
    app.post(&uri, &token, grade_form(id, Value::Null)).await;

    let opened = app.get(&uri, &token).await;
    assert_eq!(opened.body["rows"][0]["grade"], 4);
}

#[tokio::test]
async fn directorate_can_read_but_not_grade() {
    let app = spawn_app().await;
    let registrar = app.registrar().await;
    let sheet = sheet_with_one_student(&app, &registrar).await;
    let uri = format!("/grade-entry/{}/{}/", sheet.discipline, sheet.group);

    let directorate = app.directorate().await;
    let opened = app.get(&uri, &directorate).await;
    assert_eq!(opened.status, StatusCode::OK);
    assert_eq!(opened.body["can_edit"], false);
    let id = row_id(&opened.body);

    let refused = app
        .post(&uri, &directorate, grade_form(id, json!(5)))
        .await;
    assert_eq!(refused.status, StatusCode::SEE_OTHER);
    assert_eq!(refused.body["level"], "error");

    let rows = GradeSheetRepository::new(&app.db)
        .find_by_students(vec![sheet.student])
        .await
        .unwrap();
    assert_eq!(rows[0].grade, 0);
}

#[tokio::test]
async fn grading_window_is_closed_to_directorate() {
    let app = spawn_app().await;
    let registrar = app.registrar().await;
    let sheet = sheet_with_one_student(&app, &registrar).await;
    let uri = format!("/groups/{}/grades/", sheet.group);

    let directorate = app.directorate().await;
    assert_eq!(app.get(&uri, &directorate).await.status, StatusCode::FORBIDDEN);

    let teacher = app.teacher().await;
    let window = app.get(&uri, &teacher).await;
    assert_eq!(window.status, StatusCode::OK);
    assert_eq!(window.body["students"][0]["surname"], "Иванов");
}

#[tokio::test]
async fn unknown_sheet_is_not_found() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let response = app.get("/grade-entry/999/999/", &token).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
