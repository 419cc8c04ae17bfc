//! Pure rendering of a fetched list into a display model.
//!
//! # Design
//! `render` is a pure function of the fetched snapshot and the active
//! filter. It produces plain data; hosts turn a [`ListView`] into DOM nodes
//! and bind each row's actions. Every call builds a fresh view, so no row
//! outlives the snapshot it was rendered from.

use crate::controller::Action;
use crate::filter::Filter;
use crate::types::{Todo, TodoId};

/// Everything the host needs to redraw the list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub filter: Filter,
    pub rows: Vec<Row>,
    /// Counter text, e.g. `"2 items left"`.
    pub items_left: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Shown alone when the filtered set is empty.
    Placeholder { message: &'static str },
    Item(ItemRow),
}

/// One displayed todo with its bound actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl ItemRow {
    /// Action for the row checkbox after it changed to `checked`.
    pub fn toggle_action(&self, checked: bool) -> Action {
        Action::SetCompleted {
            id: self.id.clone(),
            completed: checked,
        }
    }

    pub fn delete_action(&self) -> Action {
        Action::Delete { id: self.id.clone() }
    }
}

impl ListView {
    pub fn item_rows(&self) -> impl Iterator<Item = &ItemRow> {
        self.rows.iter().filter_map(|row| match row {
            Row::Item(item) => Some(item),
            Row::Placeholder { .. } => None,
        })
    }
}

pub fn render(todos: &[Todo], filter: Filter) -> ListView {
    let mut rows: Vec<Row> = todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .map(|todo| {
            Row::Item(ItemRow {
                id: todo.id.clone(),
                text: todo.text.clone(),
                completed: todo.completed,
            })
        })
        .collect();

    if rows.is_empty() {
        rows.push(Row::Placeholder {
            message: filter.empty_message(),
        });
    }

    ListView {
        filter,
        rows,
        items_left: items_left_label(remaining_count(todos)),
    }
}

/// Incomplete items across the whole list, regardless of filter.
pub fn remaining_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| !todo.completed).count()
}

pub fn items_left_label(count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{count} {noun} left")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, text: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::from(id),
            text: text.to_string(),
            completed,
        }
    }

    fn sample() -> Vec<Todo> {
        vec![
            todo(1, "Buy milk", false),
            todo(2, "Walk dog", true),
            todo(3, "Write report", false),
            todo(4, "Call mom", true),
            todo(5, "Water plants", false),
        ]
    }

    #[test]
    fn row_count_matches_filter_predicate() {
        let todos = sample();
        for filter in Filter::ALL {
            let expected = todos.iter().filter(|t| filter.matches(t)).count();
            let view = render(&todos, filter);
            assert_eq!(view.item_rows().count(), expected, "{filter}");
            assert_eq!(view.rows.len(), expected, "{filter}");
        }
    }

    #[test]
    fn remaining_count_ignores_filter() {
        let todos = sample();
        for filter in Filter::ALL {
            assert_eq!(render(&todos, filter).items_left, "3 items left");
        }
    }

    #[test]
    fn pluralization() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(2), "2 items left");
        assert_eq!(items_left_label(11), "11 items left");
    }

    #[test]
    fn keeps_server_order() {
        let todos = vec![todo(9, "b", false), todo(3, "a", false), todo(5, "c", false)];
        let ids: Vec<String> = render(&todos, Filter::All)
            .item_rows()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["9", "3", "5"]);
    }

    #[test]
    fn empty_list_renders_single_placeholder_per_filter() {
        for (filter, message) in [
            (Filter::All, "No todos yet"),
            (Filter::Active, "No active todos"),
            (Filter::Completed, "No completed todos"),
        ] {
            let view = render(&[], filter);
            assert_eq!(view.rows, vec![Row::Placeholder { message }]);
            assert_eq!(view.items_left, "0 items left");
        }
    }

    #[test]
    fn filter_with_no_matches_renders_placeholder_only() {
        let todos = vec![todo(1, "done", true)];
        let view = render(&todos, Filter::Active);
        assert_eq!(
            view.rows,
            vec![Row::Placeholder {
                message: "No active todos"
            }]
        );
        assert_eq!(view.item_rows().count(), 0);
    }

    #[test]
    fn rows_bind_actions_to_their_own_id() {
        let view = render(&sample(), Filter::Completed);
        let rows: Vec<&ItemRow> = view.item_rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].toggle_action(false),
            Action::SetCompleted {
                id: TodoId::from(2),
                completed: false
            }
        );
        assert_eq!(rows[1].delete_action(), Action::Delete { id: TodoId::from(4) });
        assert!(rows.iter().all(|r| r.completed));
    }
}
