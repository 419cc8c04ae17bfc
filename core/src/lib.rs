//! Deterministic core of the todo list page.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), renders fetched lists into
//! plain display data, and drives the add / toggle / delete / clear / filter
//! loop through the [`Transport`] and [`View`] seams.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each API operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `render` is a pure function of a snapshot and a [`Filter`].
//! - `Controller` owns the filter and re-fetches the whole list after every
//!   mutation; it never edits items locally.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod filter;
pub mod http;
pub mod render;
pub mod types;

pub use client::TodoClient;
pub use controller::{Action, Controller, Transport, View};
pub use error::{ApiError, ControllerError};
pub use filter::{Filter, UnknownFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use render::{items_left_label, remaining_count, render, ItemRow, ListView, Row};
pub use types::{CreateTodo, Todo, TodoId, UpdateTodo};
