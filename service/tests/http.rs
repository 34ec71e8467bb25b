//! [`Http`] remote against a mock of the remote service.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use service::{
    command::{DeleteResidence, RestoreResidence, SaveResidence},
    domain::{
        residence::{Id, Image, Price, Status},
        Draft, EditMode,
    },
    infra::Http,
    query::{ResidenceById, Residences},
    Command as _, Config,
};
use tokio::net::TcpListener;

/// Requests bodies received by the mock.
type Received = Arc<Mutex<Vec<Value>>>;

fn record(id: u64, name: &str, status: u8) -> Value {
    json!({
        "residenceId": id,
        "residenceNom": name,
        "residenceDescription": "Villa",
        "residencePrixDeBase": 15000,
        "residenceAdresse": "1 place du Port",
        "residenceImages": ["a.jpg"],
        "status": status,
    })
}

async fn fetch_all() -> Json<Value> {
    Json(json!({ "data": [record(1, "Alpha", 1), record(2, "Beta", 1)] }))
}

async fn fetch_by_id(Path(id): Path<u64>) -> Result<Json<Value>, StatusCode> {
    if id == 404 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({ "data": [record(id, "Alpha", 1)] })))
}

async fn create(
    State(received): State<Received>,
    Json(body): Json<Value>,
) -> Json<Value> {
    received.lock().unwrap().push(body.clone());
    let name = body["residenceNom"].as_str().unwrap_or_default().to_owned();
    Json(json!({ "data": record(3, &name, 1) }))
}

async fn update(
    State(received): State<Received>,
    Json(body): Json<Value>,
) -> Json<Value> {
    received.lock().unwrap().push(body.clone());
    let id = body["residenceId"].as_u64().unwrap_or_default();
    let name = body["residenceNom"].as_str().unwrap_or_default().to_owned();
    // Bare record, without `data` wrapping.
    Json(record(id, &name, 1))
}

async fn remove(Path(id): Path<u64>) -> StatusCode {
    if id == 500 {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn activate(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({ "data": record(id, "Alpha", 1) }))
}

async fn spawn_server() -> (String, Received) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Received::default();
    let app = Router::new()
        .route("/api/residence/fetchAll", get(fetch_all))
        .route("/api/residence/fetchById/:id", get(fetch_by_id))
        .route("/api/residence/create", post(create))
        .route("/api/residence/update", put(update))
        .route("/api/residence/delete/:id", delete(remove))
        .route("/api/residence/activate/:id", put(activate))
        .with_state(Arc::clone(&received));
    drop(tokio::spawn(async move {
        _ = axum::serve(listener, app).await;
    }));
    (format!("http://{addr}"), received)
}

async fn service() -> (service::Service<Http>, Received) {
    let (url, received) = spawn_server().await;
    let http = Http::new(&url).unwrap();
    (service::Service::new(Config::default(), http), received)
}

#[tokio::test]
async fn fetches_wrapped_collection() {
    let (svc, _) = service().await;

    let all = svc.execute(Residences).await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all[1].name, "Beta");
    assert_eq!(svc.store().residences().len(), 2);
}

#[tokio::test]
async fn fetches_single_record_out_of_list() {
    let (svc, _) = service().await;

    let found = svc.execute(ResidenceById(Id::from(7))).await.unwrap();

    assert_eq!(found.id, Id::from(7));
    assert_eq!(svc.store().current(), Some(found));
}

#[tokio::test]
async fn reports_error_status() {
    let (svc, _) = service().await;

    let err = svc.execute(ResidenceById(Id::from(404))).await.unwrap_err();

    assert!(err.to_string().contains("404"), "{err}");
    assert!(svc.store().error().is_some_and(|e| e.contains("404")));
}

#[tokio::test]
async fn creates_with_draft_body() {
    let (svc, received) = service().await;
    let draft = Draft {
        name: Some("Gamma".into()),
        description: Some("Villa".into()),
        base_price: Some(Price::from(20_000)),
        address: Some("2 rue Haute".into()),
        images: Some(vec![Image::inline("image/png", "AA==")]),
        ..Draft::default()
    };

    let created = svc
        .execute(SaveResidence {
            draft,
            mode: EditMode::Create,
        })
        .await
        .unwrap();

    assert_eq!(created.id, Id::from(3));
    assert_eq!(created.name, "Gamma");
    let body = received.lock().unwrap()[0].clone();
    assert_eq!(body["residenceImages"], json!(["data:image/png;base64,AA=="]));
    assert!(body.get("residenceId").is_none());
}

#[tokio::test]
async fn updates_with_id_and_bare_response() {
    let (svc, received) = service().await;
    _ = svc.execute(Residences).await.unwrap();
    let mut draft = Draft::from(&svc.store().residences()[0]);
    draft.name = Some("Alpha bis".into());

    let updated = svc
        .execute(SaveResidence {
            draft,
            mode: EditMode::Update(Id::from(1)),
        })
        .await
        .unwrap();

    assert_eq!(updated.name, "Alpha bis");
    assert_eq!(received.lock().unwrap()[0]["residenceId"], json!(1));
    assert_eq!(svc.store().residences()[0].name, "Alpha bis");
}

#[tokio::test]
async fn deletes_and_restores() {
    let (svc, _) = service().await;
    _ = svc.execute(Residences).await.unwrap();

    svc.execute(DeleteResidence { id: Id::from(1) }).await.unwrap();
    assert_eq!(svc.store().residences().len(), 1);

    let restored =
        svc.execute(RestoreResidence { id: Id::from(1) }).await.unwrap();
    assert_eq!(restored.status, Status::Active);

    assert!(svc.execute(DeleteResidence { id: Id::from(500) }).await.is_err());
    assert!(!svc.store().flags().is_deleting);
}
