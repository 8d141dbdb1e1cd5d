mod test_support;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use test_support::{TestApp, spawn_app};

async fn grade_only_row(app: &TestApp, token: &str, discipline: i32, group: i32, grade: i64) {
    let uri = format!("/grade-entry/{discipline}/{group}/");
    let opened = app.get(&uri, token).await;
    let id = opened.body["rows"][0]["grade_sheet_id"]
        .as_i64()
        .expect("row id");

    let mut form = Map::new();
    form.insert(id.to_string(), json!(grade));
    let saved = app.post(&uri, token, Value::Object(form)).await;
    assert_eq!(saved.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn course_report_averages_both_semesters() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let third = app.semester_id(&token, 3).await;
    let fourth = app.semester_id(&token, 4).await;
    let fifth = app.semester_id(&token, 5).await;
    let databases = app
        .add_discipline(&token, specialty, "Базы данных", "Экзамен", Some(third))
        .await;
    let networks = app
        .add_discipline(&token, specialty, "Сети", "Зачёт", Some(fourth))
        .await;
    let algebra = app
        .add_discipline(&token, specialty, "Алгебра", "Экзамен", Some(fourth))
        .await;
    app.add_discipline(&token, specialty, "Правоведение", "Зачёт", Some(fifth))
        .await;
    let group = app.add_group(&token, specialty, "ИСИб-23-1").await;
    let student = app.add_student(&token, group, "Иванов").await;

    grade_only_row(&app, &token, databases, group, 4).await;
    grade_only_row(&app, &token, networks, group, 5).await;
    grade_only_row(&app, &token, algebra, group, 3).await;

    let directorate = app.directorate().await;
    let response = app
        .get(
            &format!("/directorate/students/{student}/report/?course=2"),
            &directorate,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["student"]["surname"], "Иванов");
    assert_eq!(response.body["group"]["name"], "ИСИб-23-1");
    assert_eq!(response.body["report"]["semester_start"], 3);
    assert_eq!(response.body["report"]["semester_end"], 4);
    assert_eq!(response.body["report"]["average_grade"], 4.0);

    let lines: Vec<(i64, &str)> = response.body["report"]["grades"]
        .as_array()
        .expect("grades")
        .iter()
        .map(|row| {
            (
                row["semester_number"].as_i64().unwrap_or_default(),
                row["discipline_name"].as_str().unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        lines,
        vec![(3, "Базы данных"), (4, "Алгебра"), (4, "Сети")]
    );
}

#[tokio::test]
async fn course_beyond_range_reads_as_first() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(&token, 1).await;
    let maths = app
        .add_discipline(&token, specialty, "Математика", "Экзамен", Some(first))
        .await;
    let group = app.add_group(&token, specialty, "ИСИб-23-1").await;
    let student = app.add_student(&token, group, "Иванов").await;
    grade_only_row(&app, &token, maths, group, 5).await;

    for course in ["2000000000", "-2000000000"] {
        let response = app
            .get(
                &format!("/directorate/students/{student}/report/?course={course}"),
                &token,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "course={course}");
        assert_eq!(response.body["report"]["course"], 1);
        assert_eq!(response.body["report"]["semester_start"], 1);
        assert_eq!(response.body["report"]["semester_end"], 2);
        assert_eq!(response.body["report"]["average_grade"], 5.0);
    }
}

#[tokio::test]
async fn malformed_course_reads_as_first() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let group = app.add_group(&token, specialty, "ИСИб-23-1").await;
    let student = app.add_student(&token, group, "Иванов").await;

    let response = app
        .get(&format!("/directorate/students/{student}/report/?course=abc"), &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["report"]["course"], 1);
    assert_eq!(response.body["report"]["average_grade"], Value::Null);

    let courses = app
        .get(&format!("/directorate/students/{student}/course-selection/"), &token)
        .await;
    assert_eq!(courses.body["courses"], json!([1, 2, 3, 4]));
}

#[tokio::test]
async fn control_forms_bucket_by_assessment() {
    let app = spawn_app().await;
    let token = app.registrar().await;

    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let first = app.semester_id(&token, 1).await;
    let second = app.semester_id(&token, 2).await;
    app.add_discipline(&token, specialty, "Математика", "Экзамен", Some(first)).await;
    app.add_discipline(&token, specialty, "Физкультура", "Зачёт", Some(first)).await;
    app.add_discipline(&token, specialty, "Проект", "Курсовая работа", Some(first)).await;
    app.add_discipline(&token, specialty, "Практика", "Отчёт", Some(first)).await;
    app.add_discipline(&token, specialty, "Физика", "Экзамен", Some(second)).await;

    let response = app.get("/control-forms/?semester=1", &token).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["semester"], 1);
    assert_eq!(
        response.body["specialties"]["09.03.01 ИВТ"],
        json!({
            "exams": ["Математика"],
            "tests": ["Физкультура"],
            "course_works": ["Проект"],
        })
    );

    let fallback = app.get("/control-forms/?semester=x", &token).await;
    assert_eq!(fallback.body["semester"], 1);
}

#[tokio::test]
async fn student_card_is_hidden_from_teachers() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let specialty = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    let group = app.add_group(&token, specialty, "ИСИб-23-1").await;
    let student = app.add_student(&token, group, "Иванов").await;
    let uri = format!("/reports/student-card/{student}/");

    let card = app.get(&uri, &token).await;
    assert_eq!(card.status, StatusCode::OK);
    assert_eq!(card.body["specialty"]["code"], "09.03.01");

    let teacher = app.teacher().await;
    assert_eq!(app.get(&uri, &teacher).await.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn curriculum_lists_every_specialty() {
    let app = spawn_app().await;
    let token = app.registrar().await;
    let it = app.add_specialty(&token, "09.03.01", "ИВТ").await;
    app.add_specialty(&token, "09.03.02", "ИСТ").await;
    app.add_discipline(&token, it, "Математика", "Экзамен", None).await;

    let teacher = app.teacher().await;
    let response = app.get("/curriculum-doc/", &teacher).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Учебный план ИРНИТУ");
    assert_eq!(response.body["specialties"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        response.body["specialties"][0]["disciplines"][0]["name"],
        "Математика"
    );
}
