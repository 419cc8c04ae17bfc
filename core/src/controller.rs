//! The interaction loop: user action → request → full re-fetch → render.
//!
//! # Design
//! The controller owns the only piece of client state, the active
//! [`Filter`], and reaches the outside world through two seams:
//!
//! - [`Transport`] executes an [`HttpRequest`] and yields the
//!   [`HttpResponse`] (browser fetch, `ureq`, or a test double).
//! - [`View`] is the page: it hands out the input text and displays a
//!   [`ListView`].
//!
//! Every operation is an `async fn` that awaits its own request before it
//! starts the trailing re-fetch. Nothing serializes separate operations, so
//! when two actions overlap the re-fetch that resolves last decides what is
//! displayed. Any error ends the operation early and leaves the page as it
//! was; status codes never change the flow.

use std::cell::Cell;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::{ApiError, ControllerError};
use crate::filter::Filter;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::{render, ListView};
use crate::types::{CreateTodo, Todo, TodoId, UpdateTodo};

/// Executes HTTP requests on behalf of the controller.
///
/// Futures need not be `Send`: the controller runs on a single-threaded
/// event loop.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Resolve to the server's response, whatever its status. Only a
    /// request that never completed is an error.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// The page surface the controller drives.
pub trait View {
    /// Current raw contents of the new-todo input.
    fn input_text(&self) -> String;

    fn clear_input(&self);

    /// Replace the list area and the remaining counter.
    fn show_list(&self, list: &ListView);

    /// Mark `filter`'s control active and every other one inactive.
    fn mark_active_filter(&self, filter: Filter);
}

/// A user intent, as produced by page events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add,
    SetCompleted { id: TodoId, completed: bool },
    Delete { id: TodoId },
    ClearCompleted,
    SelectFilter(Filter),
}

pub struct Controller<T, V> {
    client: TodoClient,
    transport: T,
    view: V,
    filter: Cell<Filter>,
    initialized: Cell<bool>,
}

impl<T: Transport, V: View> Controller<T, V> {
    pub fn new(client: TodoClient, transport: T, view: V) -> Self {
        Self {
            client,
            transport,
            view,
            filter: Cell::new(Filter::default()),
            initialized: Cell::new(false),
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter.get()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// First render after page load. Runs once; later calls fail with
    /// [`ControllerError::AlreadyInitialized`] without touching the network.
    pub async fn init(&self) -> Result<(), ControllerError> {
        if self.initialized.replace(true) {
            return Err(ControllerError::AlreadyInitialized);
        }
        debug!(filter = %self.filter.get(), "initializing todo controller");
        self.view.mark_active_filter(self.filter.get());
        self.refresh().await
    }

    pub async fn dispatch(&self, action: Action) -> Result<(), ControllerError> {
        match action {
            Action::Add => self.add().await,
            Action::SetCompleted { id, completed } => self.set_completed(id, completed).await,
            Action::Delete { id } => self.delete(id).await,
            Action::ClearCompleted => self.clear_completed().await,
            Action::SelectFilter(filter) => self.select_filter(filter).await,
        }
    }

    /// Fetch the full list and redraw it under the filter active when the
    /// response arrives.
    pub async fn refresh(&self) -> Result<(), ControllerError> {
        let todos = self.fetch_todos().await?;
        let list = render(&todos, self.filter.get());
        debug!(total = todos.len(), shown = list.item_rows().count(), "rendering todos");
        self.view.show_list(&list);
        Ok(())
    }

    /// Create a todo from the trimmed input. Blank input is a silent no-op.
    pub async fn add(&self) -> Result<(), ControllerError> {
        let input = self.view.input_text();
        let text = input.trim();
        if text.is_empty() {
            debug!("ignoring blank todo");
            return Ok(());
        }

        debug!(text, "creating todo");
        let request = self.client.build_create_todo(&CreateTodo {
            text: text.to_string(),
        })?;
        let response = self.send("create", request).await?;
        if let Some(created) = self.client.parse_create_todo(response) {
            debug!(id = %created.id, "todo created");
        }
        self.view.clear_input();
        self.refresh().await
    }

    pub async fn set_completed(&self, id: TodoId, completed: bool) -> Result<(), ControllerError> {
        debug!(%id, completed, "updating todo");
        let request = self
            .client
            .build_update_todo(&id, &UpdateTodo::completed(completed))?;
        self.send("update", request).await?;
        self.refresh().await
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), ControllerError> {
        debug!(%id, "deleting todo");
        self.send("delete", self.client.build_delete_todo(&id)).await?;
        self.refresh().await
    }

    /// Delete every completed todo of a freshly fetched list.
    ///
    /// The deletes run concurrently and all of them settle before anything
    /// else happens. If any of them failed the trailing re-fetch is skipped
    /// and the first failure is returned.
    pub async fn clear_completed(&self) -> Result<(), ControllerError> {
        let todos = self.fetch_todos().await?;
        let deletes: Vec<_> = todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| self.send("delete", self.client.build_delete_todo(&todo.id)))
            .collect();
        debug!(count = deletes.len(), "clearing completed todos");

        join_all(deletes)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        self.refresh().await
    }

    pub async fn select_filter(&self, filter: Filter) -> Result<(), ControllerError> {
        debug!(%filter, "selecting filter");
        self.filter.set(filter);
        self.view.mark_active_filter(filter);
        self.refresh().await
    }

    async fn fetch_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send("list", self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn send(&self, operation: &'static str, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!(operation, status = response.status, "server answered with a non-success status");
        }
        Ok(response)
    }
}
