//! Browser entry point.
//!
//! Boots the site once the DOM is parsed, attaches the listeners the widgets
//! asked for, and feeds native events back through [`Site::dispatch`].  The
//! site and its page live in one `Rc<RefCell<_>>` shared by every callback.

pub mod console;
mod page;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use js_sys::Array;
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Element, Event, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
};

pub use page::WebPage;

use crate::app::event::{Binding, EventOutcome, Key, KeyInput, PageEvent, Timer};
use crate::config::SiteConfig;
use crate::core::reveal::IntersectionEntry;
use crate::error::SiteError;
use crate::logging;
use crate::Site;

use page::dom_error;

struct Runtime {
    site: Site<Element>,
    page: WebPage,
}

type Shared = Rc<RefCell<Runtime>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if let Err(err) = logging::init() {
        web_sys::console::warn_1(&err.to_string().into());
    }

    let page = WebPage::new()?;
    let document = page.document().clone();
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = boot(page, SiteConfig::default()) {
                error!("site startup failed: {err}");
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(dom_error("addEventListener"))?;
    } else {
        boot(page, SiteConfig::default())?;
    }
    Ok(())
}

/// Initialise the widgets on `page` and wire every listener.
pub fn boot(mut page: WebPage, config: SiteConfig) -> Result<(), SiteError> {
    let site = Site::init(&mut page, &config);
    let bindings = site.bindings().to_vec();
    let window = page.window().clone();
    let document = page.document().clone();
    let shared: Shared = Rc::new(RefCell::new(Runtime { site, page }));

    install_observer(&shared, &config)?;
    for binding in bindings {
        listen_click(&shared, binding)?;
    }

    let rc = Rc::clone(&shared);
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let input = KeyInput::new(Key::from_dom(&event.key()), event.shift_key());
        if input.key == Key::Other {
            return;
        }
        if dispatch(&rc, PageEvent::KeyDown(input)).prevent_default {
            event.prevent_default();
        }
    });
    document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
        .map_err(dom_error("addEventListener"))?;
    on_key.forget();

    let rc = Rc::clone(&shared);
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        dispatch(&rc, PageEvent::Scroll);
    });
    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
            &passive,
        )
        .map_err(dom_error("addEventListener"))?;
    on_scroll.forget();

    flush_timers(&shared);
    info!("site ready");
    Ok(())
}

fn install_observer(shared: &Shared, config: &SiteConfig) -> Result<(), SiteError> {
    let rc = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionEntry {
                    target: entry.target(),
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                })
                .collect();
            dispatch(&rc, PageEvent::Intersection(entries));
        },
    );

    let options = config.scroll.observer_options();
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin_css());
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(dom_error("IntersectionObserver"))?;
    callback.forget();

    shared.borrow_mut().page.install_observer(observer);
    Ok(())
}

fn listen_click(shared: &Shared, binding: Binding<Element>) -> Result<(), SiteError> {
    let Binding { node, kind } = binding;
    let rc = Rc::clone(shared);
    let target = node.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let outcome = dispatch(
            &rc,
            PageEvent::Click {
                node: target.clone(),
                kind,
            },
        );
        if outcome.prevent_default {
            event.prevent_default();
        }
    });
    node.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(dom_error("addEventListener"))?;
    on_click.forget();
    Ok(())
}

/// Run one event through the site, then arm whatever timers it scheduled.
fn dispatch(shared: &Shared, event: PageEvent<Element>) -> EventOutcome {
    let outcome = match shared.try_borrow_mut() {
        Ok(mut runtime) => {
            let Runtime { site, page } = &mut *runtime;
            site.dispatch(page, event)
        }
        Err(_) => {
            warn!("event arrived during another dispatch, dropped");
            return EventOutcome::IGNORED;
        }
    };
    flush_timers(shared);
    outcome
}

fn flush_timers(shared: &Shared) {
    let timers = match shared.try_borrow_mut() {
        Ok(mut runtime) => runtime.page.take_timers(),
        Err(_) => return,
    };
    for (delay, timer) in timers {
        arm_timer(shared, delay, timer);
    }
}

fn arm_timer(shared: &Shared, delay: Duration, timer: Timer) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let rc = Rc::clone(shared);
    let callback = Closure::once_into_js(move || {
        dispatch(&rc, PageEvent::Timer(timer));
    });
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
        .map_err(dom_error("setTimeout"))
    {
        warn!(?timer, "{err}");
    }
}
