//! `ResultsPage` JS class: the live results table
//!
//! Wires the controller to the page: WebSocket messages, scroll and input
//! events, row hover/click on both the live table and the columns mirror,
//! and an animation-frame loop for the tail-follow scroll and throttled
//! overlay repositioning.

use super::dom::{DomTableView, ROW_INDEX_ATTRIBUTE};
use super::helpers::{deserialize, element_by_id, listen, serialize, to_js_error, window, Listener};
use crate::config::TableConfig;
use crate::controller::LiveTableController;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlElement, HtmlTableElement, KeyboardEvent, MessageEvent, WebSocket, Window};

type SharedController = Rc<RefCell<LiveTableController<DomTableView>>>;

/// Runs at most one pending animation-frame callback
struct FrameLoop {
    window: Window,
    pending: Cell<bool>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    fn new(window: Window, controller: SharedController) -> Rc<Self> {
        let frame_loop = Rc::new(Self {
            window,
            pending: Cell::new(false),
            callback: RefCell::new(None),
        });

        let weak: Weak<FrameLoop> = Rc::downgrade(&frame_loop);
        let callback = Closure::wrap(Box::new(move |now: f64| {
            let Some(frame_loop) = weak.upgrade() else {
                return;
            };
            frame_loop.pending.set(false);

            let Ok(mut controller) = controller.try_borrow_mut() else {
                frame_loop.request();
                return;
            };
            let outcome = controller.animation_frame(now);
            let animating = controller.is_auto_scrolling();
            drop(controller);

            if let Some(step) = outcome.scroll {
                let left = frame_loop.window.scroll_x().unwrap_or(0.0);
                frame_loop.window.scroll_to_with_x_and_y(left, step.top);
            }
            if animating {
                frame_loop.request();
            }
        }) as Box<dyn FnMut(f64)>);
        *frame_loop.callback.borrow_mut() = Some(callback);
        frame_loop
    }

    fn request(&self) {
        if self.pending.replace(true) {
            return;
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            self.pending.set(false);
            return;
        };
        if let Err(err) = self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", err);
            self.pending.set(false);
        }
    }
}

#[wasm_bindgen]
pub struct ResultsPage {
    controller: SharedController,
    socket: Option<WebSocket>,
    _frame_loop: Rc<FrameLoop>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl ResultsPage {
    /// Take over the results table `#table_id` and start listening for rows.
    /// `message_id` names the element showing the connection status.
    #[wasm_bindgen(constructor)]
    pub fn new(table_id: &str, message_id: Option<String>, config: JsValue) -> Result<ResultsPage, JsValue> {
        let config: TableConfig = deserialize(config, "Invalid results configuration")?;
        config.validate().map_err(|e| to_js_error("Invalid results configuration", e))?;

        let window = window()?;
        let table: HtmlTableElement = element_by_id(table_id)?;
        let message = match message_id {
            Some(id) => Some(element_by_id::<HtmlElement>(&id)?),
            None => None,
        };
        let view = DomTableView::new(window.clone(), table, message)?;
        let columns_overlay: EventTarget = view.columns_overlay().clone().into();
        let live_table: EventTarget = view.table().clone().into();

        let controller: SharedController = Rc::new(RefCell::new(
            LiveTableController::new(&config, view).map_err(|e| to_js_error("Results table", e))?,
        ));
        let frame_loop = FrameLoop::new(window.clone(), controller.clone());

        let mut listeners = Vec::new();
        let window_target: &EventTarget = window.as_ref();

        {
            let controller = controller.clone();
            let frame_loop = frame_loop.clone();
            listeners.push(listen(window_target, "scroll", move |_| {
                if let Ok(mut controller) = controller.try_borrow_mut() {
                    controller.on_scroll();
                }
                frame_loop.request();
            })?);
        }
        {
            let controller = controller.clone();
            let frame_loop = frame_loop.clone();
            listeners.push(listen(window_target, "resize", move |_| {
                if let Ok(mut controller) = controller.try_borrow_mut() {
                    controller.resync_widths();
                }
                frame_loop.request();
            })?);
        }
        for kind in ["wheel", "touchstart", "mousedown"] {
            let controller = controller.clone();
            listeners.push(listen(window_target, kind, move |_| {
                if let Ok(mut controller) = controller.try_borrow_mut() {
                    controller.on_user_input();
                }
            })?);
        }
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let controller = controller.clone();
            listeners.push(listen(window_target, kind, move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if let Ok(mut controller) = controller.try_borrow_mut() {
                    controller.key_changed(&event.key(), pressed);
                }
            })?);
        }
        {
            let controller = controller.clone();
            listeners.push(listen(window_target, "blur", move |_| {
                if let Ok(mut controller) = controller.try_borrow_mut() {
                    controller.focus_lost();
                }
            })?);
        }

        for target in [&live_table, &columns_overlay] {
            for (kind, hovered) in [("mouseover", true), ("mouseout", false)] {
                let controller = controller.clone();
                listeners.push(listen(target, kind, move |event: Event| {
                    let Some(index) = row_index(&event) else {
                        return;
                    };
                    if let Ok(mut controller) = controller.try_borrow_mut() {
                        controller.hover_row(index, hovered);
                    }
                })?);
            }
            let controller = controller.clone();
            let window = window.clone();
            listeners.push(listen(target, "click", move |event: Event| {
                let Some(index) = row_index(&event) else {
                    return;
                };
                let url = match controller.try_borrow() {
                    Ok(controller) => controller.click_row(index),
                    Err(_) => None,
                };
                if let Some(url) = url {
                    if let Err(err) = window.open_with_url_and_target(&url, "_blank") {
                        log::error!("could not open {}: {:?}", url, err);
                    }
                }
            })?);
        }

        let socket = match socket_url(&window, &config.websocket_url) {
            Some(url) => Some(connect(&url, &controller, &frame_loop, &mut listeners)?),
            None => {
                log::warn!("no websocket url configured, table stays static");
                None
            }
        };

        frame_loop.request();
        Ok(ResultsPage {
            controller,
            socket,
            _frame_loop: frame_loop,
            _listeners: listeners,
        })
    }

    #[wasm_bindgen(js_name = rowCount)]
    pub fn row_count(&self) -> usize {
        self.controller.borrow().row_count()
    }

    /// Displayed rows, in arrival order
    #[wasm_bindgen(js_name = getRows)]
    pub fn rows(&self) -> Result<JsValue, JsValue> {
        serialize(&self.controller.borrow().rows(), "Rows")
    }

    /// Feed a row message by hand (same path as a WebSocket message)
    #[wasm_bindgen(js_name = pushMessage)]
    pub fn push_message(&self, payload: &str) -> Result<usize, JsValue> {
        self.controller
            .borrow_mut()
            .handle_message(payload)
            .map(|outcome| outcome.index)
            .map_err(|e| to_js_error("Row message", e))
    }

    /// Close the live connection; the table stays interactive
    pub fn close(&self) {
        if let Some(socket) = &self.socket {
            if let Err(err) = socket.close() {
                log::error!("closing websocket: {:?}", err);
            }
        }
        self.controller.borrow_mut().connection_closed();
    }
}

/// Open the live update socket and route its events to the controller
fn connect(
    url: &str,
    controller: &SharedController,
    frame_loop: &Rc<FrameLoop>,
    listeners: &mut Vec<Listener>,
) -> Result<WebSocket, JsValue> {
    let socket = WebSocket::new(url)?;
    let target: &EventTarget = socket.as_ref();

    {
        let controller = controller.clone();
        listeners.push(listen(target, "open", move |_| {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.connection_opened();
            }
        })?);
    }
    {
        let controller = controller.clone();
        let frame_loop = frame_loop.clone();
        listeners.push(listen(target, "message", move |event: Event| {
            let Some(payload) = event
                .dyn_ref::<MessageEvent>()
                .and_then(|m| m.data().as_string())
            else {
                log::warn!("dropping non-text row message");
                return;
            };
            let Ok(mut controller) = controller.try_borrow_mut() else {
                log::error!("row message arrived during another update, dropped");
                return;
            };
            if let Ok(outcome) = controller.handle_message(&payload) {
                if outcome.scroll.is_some() || outcome.widths_resynced {
                    frame_loop.request();
                }
            }
        })?);
    }
    for kind in ["close", "error"] {
        let controller = controller.clone();
        listeners.push(listen(target, kind, move |_| {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.connection_closed();
            }
        })?);
    }

    log::info!("connecting to {}", url);
    Ok(socket)
}

/// Row index of the `tr` an event happened in
fn row_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let row = target.closest(&format!("tr[{}]", ROW_INDEX_ATTRIBUTE)).ok()??;
    row.get_attribute(ROW_INDEX_ATTRIBUTE)?.parse().ok()
}

/// Absolute WebSocket URL for a path served by the page's host
fn socket_url(window: &Window, path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    if path.starts_with("ws://") || path.starts_with("wss://") {
        return Some(path.to_string());
    }
    let location = window.location();
    let scheme = match location.protocol().ok()?.as_str() {
        "https:" => "wss",
        _ => "ws",
    };
    let host = location.hostname().ok()?;
    let port = location.port().ok().filter(|p| !p.is_empty());
    Some(match port {
        Some(port) => format!("{}://{}:{}{}", scheme, host, port, path),
        None => format!("{}://{}{}", scheme, host, path),
    })
}
