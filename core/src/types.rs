//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the reference server's schema but are defined
//! independently of it; the integration tests catch schema drift.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo item.
///
/// Carried exactly as the server sent it, number or string. The client never
/// interprets the value; it only echoes it back in paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(number) => write!(f, "{number}"),
            TodoId::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        TodoId::Number(id.into())
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        TodoId::Text(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        TodoId::Text(id)
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

/// Request payload for creating a new todo. The server sets `completed` to
/// false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Payload that only flips the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }
}
