//! Browser bindings.
//!
//! Real-document implementations of the page seams plus the `wasm_bindgen`
//! entry points the documentation page calls after rendering its sections.
//! The entry points route `tracing` diagnostics to the browser console.

mod clock;
mod console;
mod hero;
mod quiz;

pub use clock::PerformanceClock;
pub use console::{init_console_logging, ConsoleMakeWriter, ConsoleWriter, BROWSER_FILTER};
pub use hero::{install_hero, WebHeroView, WebVideo};
pub use quiz::{BrowserQuizEngine, WebQuizPage, WebQuizView};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement};

/// Panic hook plus console logging, once per page
pub(crate) fn install_diagnostics() {
    console_error_panic_hook::set_once();
    // A second entry point finds the subscriber already installed
    let _ = init_console_logging(BROWSER_FILTER);
}

pub(crate) fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub(crate) fn query(scope: &Element, selector: &str) -> Option<Element> {
    scope.query_selector(selector).ok().flatten()
}

pub(crate) fn query_all(scope: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = scope.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub(crate) fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

/// Sets an inline style; an empty value removes the property
pub(crate) fn set_style(el: &Element, property: &str, value: &str) {
    let Some(html) = el.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    if value.is_empty() {
        let _ = style.remove_property(property);
    } else {
        let _ = style.set_property(property, value);
    }
}

/// Registers `handler` for `event` on `target` for the page's lifetime
pub(crate) fn listen<E>(
    target: &EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: JsCast + 'static,
{
    let cb = Closure::wrap(Box::new(move |e: Event| {
        if let Ok(e) = e.dyn_into::<E>() {
            handler(e);
        }
    }) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
