//! Browser binding for the page behaviors.
//!
//! Each behavior is exported to JavaScript as a handle that a thin custom
//! element class creates in `connectedCallback` and releases in
//! `disconnectedCallback`:
//!
//! ```js
//! import { KeepInside } from "./keepinside.js";
//!
//! customElements.define("keep-inside", class extends HTMLElement {
//!   connectedCallback() { this.handle = KeepInside.connect(this); }
//!   disconnectedCallback() { this.handle?.free(); this.handle = undefined; }
//! });
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, HtmlElement, MouseEvent, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use crate::adjust::{Config, ContainmentAdjuster, FrameScheduler, Target, Trigger, Viewport};
use crate::geometry::Bounds;
use crate::hue::{SHELL_IMAGES, filter_value};
use crate::scroll::{Align, ScrollBehavior, ScrollCentering, ScrollRequest};

/// Failure talking to the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// `window.document` is missing.
    NoDocument,
    /// A DOM call threw.
    Js(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global window exists"),
            Self::NoDocument => f.write_str("window has no document"),
            Self::Js(msg) => write!(f, "DOM call failed: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Options for the browser `keep-inside` element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebConfig {
    pub adjuster: Config,
    /// Selector, relative to the container's parent, of the toggle whose
    /// clicks trigger a recheck.
    pub toggle_selector: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            adjuster: Config::new(),
            toggle_selector: ".summary".into(),
        }
    }
}

fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

// ============================================================================
// Collaborators
// ============================================================================

/// The `keep-inside` element's parent, whose margin is adjusted.
#[derive(Debug)]
struct Container {
    element: HtmlElement,
}

impl Target for Container {
    fn natural_width(&self) -> Option<f64> {
        Some(f64::from(self.element.offset_width()))
    }

    fn bounding_box(&self) -> Bounds {
        let rect = self.element.get_bounding_client_rect();
        Bounds::new(rect.left(), rect.right())
    }

    fn set_inline_start_margin(&mut self, px: i32) {
        if let Err(err) = self
            .element
            .style()
            .set_property("margin-inline-start", &format!("{px}px"))
        {
            log::warn!("keep-inside: failed to set margin: {err:?}");
        }
    }
}

impl Viewport for Window {
    /// `innerWidth`. If unreadable, right overflow is never corrected.
    fn width(&self) -> f64 {
        self.inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::INFINITY)
    }
}

type SharedAdjuster = Rc<RefCell<ContainmentAdjuster<Container>>>;

/// `requestAnimationFrame`-backed scheduler.
///
/// Every request gets its own one-shot JS callback, so a frame still in
/// flight after the handle is gone finds nothing to upgrade and returns.
struct FrameLoop {
    window: Window,
    adjuster: Weak<RefCell<ContainmentAdjuster<Container>>>,
}

impl FrameScheduler for FrameLoop {
    fn request_frame(&mut self) -> bool {
        let window = self.window.clone();
        let adjuster = self.adjuster.clone();
        let callback = Closure::once_into_js(move || run_frame(window, adjuster));
        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("keep-inside: requestAnimationFrame failed: {err:?}");
                false
            }
        }
    }
}

fn run_frame(window: Window, adjuster: Weak<RefCell<ContainmentAdjuster<Container>>>) {
    let Some(shared) = adjuster.upgrade() else {
        return;
    };
    let mut scheduler = FrameLoop {
        window: window.clone(),
        adjuster,
    };
    shared.borrow_mut().run_pass(&window, &mut scheduler);
}

/// An event listener that is removed when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, WebError> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target,
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        // Removing a listener that is already gone is harmless.
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

fn trigger_listener(
    target: EventTarget,
    event: &'static str,
    trigger: Trigger,
    window: &Window,
    adjuster: &SharedAdjuster,
) -> Result<Listener, WebError> {
    let window = window.clone();
    let weak = Rc::downgrade(adjuster);
    let callback = Closure::wrap(Box::new(move |_event: Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut scheduler = FrameLoop {
            window: window.clone(),
            adjuster: weak.clone(),
        };
        shared.borrow_mut().handle(trigger, &mut scheduler);
    }) as Box<dyn FnMut(Event)>);
    Listener::add(target, event, callback)
}

// ============================================================================
// keep-inside
// ============================================================================

struct Active {
    adjuster: SharedAdjuster,
    // Held for their `Drop`.
    _listeners: Vec<Listener>,
}

/// Handle for one connected `keep-inside` element.
///
/// Keeps the element's parent inside the viewport horizontally. Inert when
/// the element had no parent at connection time.
#[wasm_bindgen]
pub struct KeepInside {
    active: Option<Active>,
}

#[wasm_bindgen]
impl KeepInside {
    /// Start managing `host.parentElement` with the default options.
    pub fn connect(host: &Element) -> Result<KeepInside, JsValue> {
        Ok(Self::connect_with(host, &WebConfig::default())?)
    }

    /// Stop listening for resize and toggle clicks. Frames already requested
    /// do nothing. Calling this more than once is fine.
    pub fn disconnect(&mut self) {
        if let Some(active) = self.active.take() {
            active.adjuster.borrow_mut().detach();
        }
    }

    /// Current inline-start margin of the container, in pixels.
    /// `0` for an inert handle.
    pub fn offset(&self) -> i32 {
        self.active
            .as_ref()
            .map_or(0, |a| a.adjuster.borrow().offset())
    }

    /// Whether the handle is managing a container.
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.active.is_some()
    }
}

impl KeepInside {
    /// Start managing `host.parentElement`.
    ///
    /// A host without an HTML parent yields an inert handle: no style
    /// writes, no frames, no listeners.
    pub fn connect_with(host: &Element, config: &WebConfig) -> Result<Self, WebError> {
        let container = host
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok());
        let Some(container) = container else {
            return Ok(Self { active: None });
        };
        // Resolved before attach so a failure leaves the container untouched.
        let window = window()?;
        let Some(adjuster) =
            ContainmentAdjuster::attach(Some(Container { element: container }), config.adjuster.clone())
        else {
            return Ok(Self { active: None });
        };

        let toggle = adjuster
            .target()
            .element
            .parent_element()
            .and_then(|p| p.query_selector(&config.toggle_selector).ok().flatten());
        let adjuster = Rc::new(RefCell::new(adjuster));

        let mut listeners = vec![trigger_listener(
            window.clone().into(),
            "resize",
            Trigger::Resize,
            &window,
            &adjuster,
        )?];
        if let Some(toggle) = toggle {
            listeners.push(trigger_listener(
                toggle.into(),
                "click",
                Trigger::Recheck,
                &window,
                &adjuster,
            )?);
        }

        Ok(Self {
            active: Some(Active {
                adjuster,
                _listeners: listeners,
            }),
        })
    }
}

impl Drop for KeepInside {
    fn drop(&mut self) {
        self.disconnect();
    }
}

// ============================================================================
// center-me / center-me-horizontally
// ============================================================================

fn scroll_options(request: ScrollRequest) -> ScrollIntoViewOptions {
    let position = |align: Align| match align {
        Align::Start => ScrollLogicalPosition::Start,
        Align::Center => ScrollLogicalPosition::Center,
        Align::End => ScrollLogicalPosition::End,
        Align::Nearest => ScrollLogicalPosition::Nearest,
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(match request.behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    });
    options.set_block(position(request.block));
    options.set_inline(position(request.inline));
    options
}

/// Scroll `element` into view on the next animation frame.
pub fn scroll_into_view_next_frame(
    element: &Element,
    centering: ScrollCentering,
) -> Result<(), WebError> {
    let element = element.clone();
    let options = scroll_options(centering.request());
    let callback = Closure::once_into_js(move || {
        element.scroll_into_view_with_scroll_into_view_options(&options);
    });
    window()?.request_animation_frame(callback.unchecked_ref())?;
    Ok(())
}

/// `connectedCallback` of the scroll-centering elements. The variant is
/// picked from the host's tag name.
#[wasm_bindgen(js_name = centerOnConnect)]
pub fn center_on_connect(host: &Element) -> Result<(), JsValue> {
    let Some(centering) = ScrollCentering::from_tag(&host.tag_name()) else {
        return Err(WebError::Js(format!("not a centering element: {}", host.tag_name())).into());
    };
    Ok(scroll_into_view_next_frame(host, centering)?)
}

// ============================================================================
// Hue rotation
// ============================================================================

/// Installed mouse-driven hue rotation. Removed when freed.
#[wasm_bindgen]
pub struct HueRotate {
    _listener: Listener,
}

#[wasm_bindgen]
impl HueRotate {
    /// Collect the shell images now and rotate their hue on every mouse move.
    pub fn install() -> Result<HueRotate, JsValue> {
        Ok(Self::install_for(SHELL_IMAGES)?)
    }
}

impl HueRotate {
    /// Like [`install`](Self::install) with a custom image selector.
    pub fn install_for(selector: &str) -> Result<Self, WebError> {
        let window = window()?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        let nodes = document.query_selector_all(selector)?;
        let images: Vec<HtmlElement> = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();
        log::debug!("hue-rotate installed on {} images", images.len());

        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let filter = filter_value(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            for image in &images {
                if let Err(err) = image.style().set_property("filter", &filter) {
                    log::warn!("hue-rotate: failed to set filter: {err:?}");
                }
            }
        }) as Box<dyn FnMut(Event)>);

        Ok(Self {
            _listener: Listener::add(window.into(), "mousemove", callback)?,
        })
    }
}
