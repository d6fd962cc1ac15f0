//! In-process fake of the tracking service for integration tests.
//!
//! The server runs on its own thread with a current-thread runtime so the
//! blocking client under test can call it from the test thread.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use exptrack_client::{Config, Connection};

#[derive(Debug, Clone)]
pub struct StoredExperiment {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub attributes: Vec<Value>,
    pub date_created: i64,
}

impl StoredExperiment {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "project_id": self.project_id,
            "name": self.name,
            "description": self.description,
            "tags": self.tags.iter().collect::<Vec<_>>(),
            "attributes": self.attributes,
            "date_created": self.date_created.to_string(),
            "date_updated": self.date_created.to_string(),
            "owner": "ada@example.com",
        })
    }
}

/// Shared state behind the fake endpoints.
#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    pub experiments: HashMap<String, StoredExperiment>,
    /// Tag payloads in the order `addExperimentTags` received them.
    pub tag_calls: Vec<Vec<String>>,
    /// Runs keyed by experiment id.
    pub runs: HashMap<String, Vec<Value>>,
}

type SharedStore = Arc<Mutex<Store>>;

pub struct FakeServer {
    pub addr: SocketAddr,
    pub store: SharedStore,
}

impl FakeServer {
    /// Starts the fake service on an ephemeral port.
    pub fn start() -> Self {
        let store = SharedStore::default();
        let app = router(store.clone());
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("build runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind listener");
                tx.send(listener.local_addr().expect("local addr"))
                    .expect("send addr");
                axum::serve(listener, app).await.expect("serve");
            });
        });

        let addr = rx.recv().expect("server address");
        Self { addr, store }
    }

    pub fn connection(&self) -> Connection {
        let config = Config::new(&format!("http://{}", self.addr))
            .expect("valid host")
            .with_credentials("ada@example.com", "key-123");
        Connection::new(&config)
    }

    pub fn tag_calls(&self) -> Vec<Vec<String>> {
        self.store.lock().unwrap().tag_calls.clone()
    }

    pub fn experiment_count(&self) -> usize {
        self.store.lock().unwrap().experiments.len()
    }

    pub fn add_runs(&self, experiment_id: &str, names: &[&str]) {
        let mut store = self.store.lock().unwrap();
        let runs = store.runs.entry(experiment_id.to_string()).or_default();
        for name in names {
            let id = format!("run-{}-{}", experiment_id, runs.len() + 1);
            runs.push(json!({
                "id": id,
                "experiment_id": experiment_id,
                "name": name,
                "date_created": "1718447400000",
            }));
        }
    }
}

fn router(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/api/v1/modeldb/experiment/getExperimentById",
            get(get_experiment_by_id),
        )
        .route(
            "/api/v1/modeldb/experiment/getExperimentByName",
            get(get_experiment_by_name),
        )
        .route(
            "/api/v1/modeldb/experiment/createExperiment",
            post(create_experiment),
        )
        .route(
            "/api/v1/modeldb/experiment/addExperimentTags",
            post(add_experiment_tags),
        )
        .route(
            "/api/v1/modeldb/experiment/getExperimentTags",
            get(get_experiment_tags),
        )
        .route(
            "/api/v1/modeldb/experiment/deleteExperiment",
            delete(delete_experiment),
        )
        .route(
            "/api/v1/modeldb/experiment-run/findExperimentRuns",
            post(find_experiment_runs),
        )
        .with_state(store)
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"code": 5, "message": message}))).into_response()
}

#[derive(Deserialize)]
struct IdQuery {
    id: String,
}

#[derive(Deserialize)]
struct NameQuery {
    project_id: String,
    name: String,
}

async fn get_experiment_by_id(
    State(store): State<SharedStore>,
    Query(query): Query<IdQuery>,
) -> Response {
    let store = store.lock().unwrap();
    match store.experiments.get(&query.id) {
        Some(experiment) => Json(json!({"experiment": experiment.to_json()})).into_response(),
        None => not_found("Experiment not found"),
    }
}

async fn get_experiment_by_name(
    State(store): State<SharedStore>,
    Query(query): Query<NameQuery>,
) -> Response {
    let store = store.lock().unwrap();
    match store
        .experiments
        .values()
        .find(|e| e.project_id == query.project_id && e.name == query.name)
    {
        Some(experiment) => Json(json!({"experiment": experiment.to_json()})).into_response(),
        None => not_found("Experiment not found"),
    }
}

#[derive(Deserialize)]
struct CreateBody {
    project_id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    attributes: Vec<Value>,
    #[serde(default)]
    date_created: Option<String>,
}

async fn create_experiment(
    State(store): State<SharedStore>,
    Json(body): Json<CreateBody>,
) -> Response {
    let mut store = store.lock().unwrap();
    if store
        .experiments
        .values()
        .any(|e| e.project_id == body.project_id && e.name == body.name)
    {
        return (
            StatusCode::CONFLICT,
            Json(json!({"code": 6, "message": "Experiment already exists"})),
        )
            .into_response();
    }

    store.next_id += 1;
    let experiment = StoredExperiment {
        id: format!("exp-{}", store.next_id),
        project_id: body.project_id,
        name: body.name,
        description: body.description,
        tags: body.tags.into_iter().collect(),
        attributes: body.attributes,
        date_created: body
            .date_created
            .and_then(|d| d.parse().ok())
            .unwrap_or(1_718_447_400_000),
    };
    let response = json!({"experiment": experiment.to_json()});
    store.experiments.insert(experiment.id.clone(), experiment);
    Json(response).into_response()
}

#[derive(Deserialize)]
struct TagsBody {
    id: String,
    tags: Vec<String>,
}

async fn add_experiment_tags(
    State(store): State<SharedStore>,
    Json(body): Json<TagsBody>,
) -> Response {
    let mut store = store.lock().unwrap();
    store.tag_calls.push(body.tags.clone());
    match store.experiments.get_mut(&body.id) {
        Some(experiment) => {
            experiment.tags.extend(body.tags);
            Json(json!({"experiment": experiment.to_json()})).into_response()
        }
        None => not_found("Experiment not found"),
    }
}

async fn get_experiment_tags(
    State(store): State<SharedStore>,
    Query(query): Query<IdQuery>,
) -> Response {
    let store = store.lock().unwrap();
    match store.experiments.get(&query.id) {
        Some(experiment) => Json(json!({"tags": experiment.tags})).into_response(),
        None => not_found("Experiment not found"),
    }
}

#[derive(Deserialize)]
struct DeleteBody {
    id: String,
}

async fn delete_experiment(
    State(store): State<SharedStore>,
    Json(body): Json<DeleteBody>,
) -> Response {
    let mut store = store.lock().unwrap();
    match store.experiments.remove(&body.id) {
        Some(_) => Json(json!({"status": true})).into_response(),
        None => not_found("Experiment not found"),
    }
}

#[derive(Deserialize)]
struct FindRunsBody {
    #[serde(default)]
    experiment_id: String,
    #[serde(default)]
    page_number: usize,
    #[serde(default)]
    page_limit: usize,
}

async fn find_experiment_runs(
    State(store): State<SharedStore>,
    Json(body): Json<FindRunsBody>,
) -> Response {
    let store = store.lock().unwrap();
    let runs = store
        .runs
        .get(&body.experiment_id)
        .cloned()
        .unwrap_or_default();
    let limit = body.page_limit.max(1);
    let start = body.page_number.saturating_sub(1) * limit;
    let page: Vec<Value> = runs.iter().skip(start).take(limit).cloned().collect();
    Json(json!({
        "experiment_runs": page,
        "total_records": runs.len().to_string(),
    }))
    .into_response()
}
