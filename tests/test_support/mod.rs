#![allow(dead_code)]

use academic_records::app::create_app;
use academic_records::bootstrap::initialize_system_data;
use academic_records::config::Config;
use academic_records::database::get_database_connection;
use academic_records::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret";
pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub db: DatabaseConnection,
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

/// Fresh in-memory database with the system accounts in place.
pub async fn spawn_app() -> TestApp {
    let config = Config::in_memory(JWT_SECRET);
    let db = get_database_connection(&config).await.expect("database");
    initialize_system_data(&db, &config)
        .await
        .expect("system data");

    let router = create_app(AppState::new(db.clone(), config));
    TestApp { db, router }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            location,
            body,
        }
    }

    /// Posts `contents` as the `file` field of a multipart form.
    pub async fn upload(&self, uri: &str, token: &str, contents: &str) -> TestResponse {
        let boundary = "roster-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"roster.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {contents}\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request");
        self.dispatch(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.send("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send("POST", uri, Some(token), Some(body)).await
    }

    pub async fn login(&self, username: &str) -> String {
        let response = self
            .send(
                "POST",
                "/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login as {username}");
        response.body["access_token"]
            .as_str()
            .expect("access_token")
            .to_string()
    }

    pub async fn registrar(&self) -> String {
        self.login("registrar").await
    }

    pub async fn directorate(&self) -> String {
        self.login("directorate").await
    }

    pub async fn teacher(&self) -> String {
        self.login("teacher").await
    }

    /// Creates a specialty through the catalog page and returns its id.
    pub async fn add_specialty(&self, token: &str, code: &str, name: &str) -> i32 {
        let response = self
            .post(
                "/specialties/",
                token,
                serde_json::json!({ "add_specialty": { "code": code, "name": name } }),
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);

        let list = self.get("/specialties/", token).await;
        list.body
            .as_array()
            .and_then(|items| items.iter().find(|s| s["code"] == code))
            .and_then(|s| s["id"].as_i64())
            .expect("specialty id") as i32
    }

    pub async fn semester_id(&self, token: &str, number: i32) -> i32 {
        let list = self.get("/disciplines/", token).await;
        list.body["semesters"]
            .as_array()
            .and_then(|items| items.iter().find(|s| s["number"] == number))
            .and_then(|s| s["id"].as_i64())
            .expect("semester id") as i32
    }

    pub async fn add_discipline(
        &self,
        token: &str,
        specialty_id: i32,
        name: &str,
        exam_type: &str,
        semester_id: Option<i32>,
    ) -> i32 {
        let response = self
            .post(
                &format!("/disciplines/?specialty={specialty_id}"),
                token,
                serde_json::json!({
                    "add_discipline": {
                        "name": name,
                        "exam_type": exam_type,
                        "hours": 72,
                        "semester_id": semester_id,
                    }
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{:?}", response.body);

        let list = self
            .get(&format!("/disciplines/?specialty={specialty_id}"), token)
            .await;
        list.body["disciplines"]
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .filter(|d| d["name"] == name && d["exam_type"] == exam_type)
                    .last()
            })
            .and_then(|d| d["id"].as_i64())
            .expect("discipline id") as i32
    }

    pub async fn add_group(&self, token: &str, specialty_id: i32, name: &str) -> i32 {
        let response = self
            .post(
                "/groups/",
                token,
                serde_json::json!({
                    "specialty_id": specialty_id,
                    "name": name,
                    "admission_year": 2024,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);

        let list = self.get("/groups/select/", token).await;
        list.body
            .as_array()
            .and_then(|items| items.iter().find(|g| g["name"] == name))
            .and_then(|g| g["id"].as_i64())
            .expect("group id") as i32
    }

    pub async fn add_student(&self, token: &str, group_id: i32, surname: &str) -> i32 {
        let response = self
            .post(
                &format!("/groups/{group_id}/students/"),
                token,
                serde_json::json!({
                    "surname": surname,
                    "first_name": "Иван",
                    "patronymic": "Иванович",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{:?}", response.body);

        let list = self
            .get(&format!("/groups/{group_id}/students/"), token)
            .await;
        list.body["students"]
            .as_array()
            .and_then(|items| items.iter().find(|s| s["surname"] == surname))
            .and_then(|s| s["id"].as_i64())
            .expect("student id") as i32
    }
}
