//! Reference implementation of the todo API the page talks to.
//!
//! Items live in memory in insertion order; ids are sequential integers.
//! `GET /` serves the page markup and `/pkg` the compiled browser bundle.

pub mod config;

use std::{path::Path as FsPath, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use config::{Config, ConfigError};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default)]
pub struct Store {
    todos: Vec<Todo>,
    last_id: u64,
}

impl Store {
    fn insert(&mut self, text: String) -> Todo {
        self.last_id += 1;
        let todo = Todo {
            id: self.last_id,
            text,
            completed: false,
        };
        self.todos.push(todo.clone());
        todo
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// API routes only.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(db)
}

/// API routes plus the page and its bundle, with request tracing.
pub fn site(assets_dir: &FsPath) -> Router {
    app()
        .route("/", get(index))
        .nest_service("/pkg", ServeDir::new(assets_dir))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, config: &Config) -> Result<(), std::io::Error> {
    axum::serve(listener, site(&config.assets_dir)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = db.write().await.insert(input.text);
    tracing::debug!(id = todo.id, "todo created");
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let store = db.read().await;
    store
        .todos
        .iter()
        .find(|todo| todo.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, (StatusCode, Json<Value>)> {
    let mut store = db.write().await;
    let todo = store.get_mut(id).ok_or_else(not_found)?;
    if let Some(text) = input.text {
        todo.text = text;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

/// Deleting is idempotent: unknown ids answer the same as known ones.
async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> Json<Value> {
    db.write().await.todos.retain(|todo| todo.id != id);
    Json(json!({ "message": "Todo deleted" }))
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Todo not found" })))
}
