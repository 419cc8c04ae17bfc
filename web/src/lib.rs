//! Browser host for the todo page.
//!
//! # Overview
//! Wires `todo-core`'s [`Controller`] to the page: [`FetchTransport`]
//! performs requests with `fetch`, [`DomView`] reads and redraws the markup,
//! and page events become [`Action`]s.
//!
//! # Design
//! - Each event spawns its action on the page's event loop and returns
//!   immediately, so actions may overlap exactly as fetch callbacks would.
//! - A failed action is logged and otherwise ignored; the page keeps its last
//!   rendered state.
//! - Page-level listeners live as long as the page and are leaked with
//!   `Closure::forget`. Row listeners are owned by [`DomView`].

pub mod dom;
pub mod logging;
pub mod transport;

use std::rc::Rc;

use todo_core::{Action, Controller, TodoClient};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, KeyboardEvent};

pub use dom::{Dispatch, DomView};
pub use transport::FetchTransport;

pub type PageController = Controller<FetchTransport, DomView>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let origin = window.location().origin()?;

    let view = DomView::new(&document)?;
    let controller = Rc::new(Controller::new(TodoClient::new(&origin), FetchTransport, view));
    let dispatch = dispatcher(Rc::clone(&controller));
    controller.view().set_dispatch(Rc::clone(&dispatch));
    bind_page_events(&document, controller.view(), &dispatch)?;

    spawn_local(async move {
        if let Err(err) = controller.init().await {
            warn!(%err, "initial load failed");
        }
    });
    Ok(())
}

/// Run each action to completion in the background.
fn dispatcher(controller: Rc<PageController>) -> Dispatch {
    Rc::new(move |action: Action| {
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            if let Err(err) = controller.dispatch(action.clone()).await {
                warn!(?action, %err, "todo action failed");
            }
        });
    })
}

fn bind_page_events(document: &Document, view: &DomView, dispatch: &Dispatch) -> Result<(), JsValue> {
    let add_button = dom::element_by_id(document, dom::ADD_BUTTON_ID)?;
    on(&add_button, "click", dispatch, |_| Some(Action::Add))?;

    on(view.input(), "keypress", dispatch, |event| {
        let key = event.dyn_ref::<KeyboardEvent>()?.key();
        (key == "Enter").then_some(Action::Add)
    })?;

    let clear_button = dom::element_by_id(document, dom::CLEAR_COMPLETED_ID)?;
    on(&clear_button, "click", dispatch, |_| Some(Action::ClearCompleted))?;

    for (filter, button) in view.filter_buttons() {
        let filter = *filter;
        on(button, "click", dispatch, move |_| Some(Action::SelectFilter(filter)))?;
    }
    Ok(())
}

/// Listen for `event` on `target` for the rest of the page's life.
fn on(
    target: &Element,
    event: &str,
    dispatch: &Dispatch,
    to_action: impl Fn(&Event) -> Option<Action> + 'static,
) -> Result<(), JsValue> {
    let dispatch = Rc::clone(dispatch);
    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(action) = to_action(&event) {
            dispatch(action);
        }
    });
    target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}
