//! The page as a [`View`]: reads the input, rebuilds the list, and moves the
//! `active` class between filter controls.
//!
//! Row listeners are owned by the view and replaced on every render, so a
//! handler never outlives the row it was bound to.

use std::cell::RefCell;
use std::rc::Rc;

use todo_core::{Action, Filter, ItemRow, ListView, Row, View};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

/// Sends a page action to the controller.
pub type Dispatch = Rc<dyn Fn(Action)>;

pub const INPUT_ID: &str = "todo-input";
pub const ADD_BUTTON_ID: &str = "add-btn";
pub const LIST_ID: &str = "todo-list";
pub const ITEMS_LEFT_ID: &str = "items-left";
pub const CLEAR_COMPLETED_ID: &str = "clear-completed";
pub const FILTER_SELECTOR: &str = ".filter-btn";

type Listener = Closure<dyn FnMut(Event)>;

pub struct DomView {
    document: Document,
    input: HtmlInputElement,
    list: Element,
    items_left: Element,
    filter_buttons: Vec<(Filter, Element)>,
    dispatch: RefCell<Option<Dispatch>>,
    row_listeners: RefCell<Vec<Listener>>,
}

impl DomView {
    /// Look up every control the page must provide.
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let input = element_by_id(document, INPUT_ID)?
            .dyn_into::<HtmlInputElement>()
            .map_err(JsValue::from)?;

        Ok(Self {
            document: document.clone(),
            input,
            list: element_by_id(document, LIST_ID)?,
            items_left: element_by_id(document, ITEMS_LEFT_ID)?,
            filter_buttons: filter_buttons(document)?,
            dispatch: RefCell::new(None),
            row_listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn set_dispatch(&self, dispatch: Dispatch) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    pub fn filter_buttons(&self) -> &[(Filter, Element)] {
        &self.filter_buttons
    }

    fn rebuild(&self, list: &ListView) -> Result<(), JsValue> {
        let dispatch = self.dispatch.borrow().clone();
        let mut listeners = self.row_listeners.borrow_mut();

        self.list.set_inner_html("");
        listeners.clear();

        for row in &list.rows {
            let li = match row {
                Row::Placeholder { message } => {
                    let li = self.document.create_element("li")?;
                    li.set_class_name("empty");
                    li.set_text_content(Some(*message));
                    li
                }
                Row::Item(item) => self.item_element(item, dispatch.as_ref(), &mut listeners)?,
            };
            self.list.append_child(&li)?;
        }

        self.items_left.set_text_content(Some(&list.items_left));
        Ok(())
    }

    fn item_element(
        &self,
        item: &ItemRow,
        dispatch: Option<&Dispatch>,
        listeners: &mut Vec<Listener>,
    ) -> Result<Element, JsValue> {
        let li = self.document.create_element("li")?;
        li.set_class_name(if item.completed {
            "todo-item completed"
        } else {
            "todo-item"
        });

        let checkbox = self
            .document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(JsValue::from)?;
        checkbox.set_type("checkbox");
        checkbox.set_class_name("todo-checkbox");
        checkbox.set_checked(item.completed);

        // Text goes in as text content; item text is never parsed as markup.
        let text = self.document.create_element("span")?;
        text.set_class_name("todo-text");
        text.set_text_content(Some(&item.text));

        let delete = self.document.create_element("button")?;
        delete.set_class_name("delete-btn");
        delete.set_text_content(Some("\u{00d7}"));

        if let Some(dispatch) = dispatch {
            let on_change = {
                let dispatch = Rc::clone(dispatch);
                let row = item.clone();
                let checkbox = checkbox.clone();
                Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                    dispatch(row.toggle_action(checkbox.checked()));
                })
            };
            checkbox.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
            listeners.push(on_change);

            let on_delete = {
                let dispatch = Rc::clone(dispatch);
                let action = item.delete_action();
                Closure::<dyn FnMut(Event)>::new(move |_: Event| dispatch(action.clone()))
            };
            delete.add_event_listener_with_callback("click", on_delete.as_ref().unchecked_ref())?;
            listeners.push(on_delete);
        }

        li.append_child(&checkbox)?;
        li.append_child(&text)?;
        li.append_child(&delete)?;
        Ok(li)
    }
}

impl View for DomView {
    fn input_text(&self) -> String {
        self.input.value()
    }

    fn clear_input(&self) {
        self.input.set_value("");
    }

    fn show_list(&self, list: &ListView) {
        if let Err(err) = self.rebuild(list) {
            warn!(?err, "failed to render todo list");
        }
    }

    fn mark_active_filter(&self, filter: Filter) {
        for (candidate, button) in &self.filter_buttons {
            if let Err(err) = button
                .class_list()
                .toggle_with_force("active", *candidate == filter)
            {
                warn!(?err, filter = %candidate, "failed to update filter control");
            }
        }
    }
}

pub fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// Filter controls in page order. Controls with an unknown `data-filter`
/// are skipped.
fn filter_buttons(document: &Document) -> Result<Vec<(Filter, Element)>, JsValue> {
    let nodes = document.query_selector_all(FILTER_SELECTOR)?;
    let mut buttons = Vec::new();
    for index in 0..nodes.length() {
        let Some(element) = nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let value = element.get_attribute("data-filter").unwrap_or_default();
        match value.parse::<Filter>() {
            Ok(filter) => buttons.push((filter, element)),
            Err(err) => warn!(%err, "ignoring filter control"),
        }
    }
    Ok(buttons)
}
