use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::students::StudentStore;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_file: std::path::PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // isolated data file per test run
    let data_file = std::env::temp_dir()
        .join(format!("student-registry-e2e-{}", Uuid::new_v4()))
        .join("students.json");
    let students = StudentStore::open(&data_file).await?;

    let app = server::startup::app(students);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_file })
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(dir) = self.data_file.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_student_crud_persists_to_file() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/students", app.base_url))
        .json(&json!({"name": "  Grace Hopper ", "email": "grace@navy.mil", "age": 45, "CGPA": 4}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["name"], "Grace Hopper");
    assert!(created["department"].is_null());
    let id = created["id"].as_str().unwrap_or_default().to_string();

    // the file holds a single array with the stored record
    let raw: Value = serde_json::from_slice(&tokio::fs::read(&app.data_file).await?)?;
    assert_eq!(raw, json!([created.clone()]));

    let res = c.put(format!("{}/students/{}", app.base_url, id))
        .json(&json!({"department": "Navy"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["department"], "Navy");

    let res = c.get(format!("{}/students/stats", app.base_url)).send().await?;
    assert_eq!(
        res.json::<Value>().await?,
        json!({"total_students": 1, "average_age": 45.0, "count_per_department": {"Navy": 1}})
    );

    let res = c.delete(format!("{}/students/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(format!("{}/students/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(format!("{}/students", app.base_url)).send().await?;
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_email_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let body = json!({"name": "Alan", "email": "alan@bletchley.uk", "age": 41, "department": "Math", "CGPA": 4});

    let res = c.post(format!("{}/students", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let mut dup = body.clone();
    dup["email"] = json!("Alan@Bletchley.UK");
    let res = c.post(format!("{}/students", app.base_url)).json(&dup).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["error"], "Duplicate Email");
    Ok(())
}
