use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, PointerEvent};
use yew::prelude::*;

use portfolio_core::overlay::{GRID_MASK_RADIUS, WASH_MASK_RADIUS};
use portfolio_core::{
    compose, detect_hover, HoverState, InteractionVariant, OrganicMotion, OverlayFrame, OverlayInputs, Point,
    DEFAULT_THEME, FINE_POINTER_QUERY,
};

use crate::dom::{self, DomElement};
use crate::media;
use crate::shared::{self, use_signal};
use crate::ticker::FrameTicker;

const PRESS_RELEASE_DELAY_MS: u32 = 200;
const GRID_CELL_PX: u32 = 48;

#[derive(Properties, PartialEq)]
pub(crate) struct CursorGlowProps {
    /// Replaces the fine-pointer and device check when set.
    #[prop_or_default]
    pub(crate) gate: Option<bool>,
}

#[cfg(all(test, target_arch = "wasm32"))]
mod counters {
    use std::cell::Cell;

    thread_local! {
        pub(super) static ACTIVE: Cell<i32> = Cell::new(0);
        pub(super) static FRAMES: Cell<u32> = Cell::new(0);
    }

    pub(super) fn bump_active(delta: i32) {
        ACTIVE.with(|active| active.set(active.get() + delta));
    }

    pub(super) fn bump_frames() {
        FRAMES.with(|frames| frames.set(frames.get() + 1));
    }
}

fn motion_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

/// Window/document listeners and the motion ticker, all released on drop.
struct ActiveEffect {
    _listeners: Vec<EventListener>,
    ticker: FrameTicker,
}

impl Drop for ActiveEffect {
    fn drop(&mut self) {
        #[cfg(all(test, target_arch = "wasm32"))]
        counters::bump_active(-1);
        self.ticker.stop();
        dom::set_body_class(dom::CURSOR_ACTIVE_CLASS, false);
    }
}

struct Handles {
    pointer: UseStateHandle<Point>,
    visible: UseStateHandle<bool>,
    pointer_latest: Rc<Cell<Option<Point>>>,
    pressed: UseStateHandle<bool>,
    hover: UseStateHandle<HoverState>,
    glow: UseStateHandle<Point>,
    motion: Rc<RefCell<OrganicMotion>>,
}

fn activate(handles: Handles) -> Option<ActiveEffect> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let mut listeners = Vec::new();

    {
        let pointer = handles.pointer.clone();
        let visible = handles.visible.clone();
        let latest = handles.pointer_latest.clone();
        let hover = handles.hover.clone();
        listeners.push(EventListener::new(&window, "pointermove", move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let position = Point::new(event.client_x() as f64, event.client_y() as f64);
            latest.set(Some(position));
            pointer.set(position);
            visible.set(true);
            // Detached targets and non-elements fall back to the plain dot.
            let next = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|element| detect_hover(&DomElement::new(element)))
                .unwrap_or_default();
            hover.set(next);
        }));
    }

    {
        let pressed = handles.pressed.clone();
        listeners.push(EventListener::new(&window, "pointerdown", move |_event: &Event| {
            pressed.set(true);
        }));
    }

    for name in ["pointerup", "pointercancel"] {
        let pressed = handles.pressed.clone();
        listeners.push(EventListener::new(&window, name, move |_event: &Event| {
            let pressed = pressed.clone();
            Timeout::new(PRESS_RELEASE_DELAY_MS, move || pressed.set(false)).forget();
        }));
    }

    listeners.push(hide_on(&document, "mouseleave", handles.visible.clone()));
    listeners.push(hide_on(&window, "blur", handles.visible.clone()));

    let ticker = FrameTicker::new();
    {
        let latest = handles.pointer_latest.clone();
        let motion = handles.motion.clone();
        let glow = handles.glow.clone();
        latest.set(None);
        motion.borrow_mut().reset();
        ticker.start(move |timestamp| {
            #[cfg(all(test, target_arch = "wasm32"))]
            counters::bump_frames();
            let next = motion.borrow_mut().follow(timestamp, latest.get());
            if let Some(next) = next {
                glow.set(next);
            }
        });
    }

    dom::set_body_class(dom::CURSOR_ACTIVE_CLASS, true);
    gloo::console::log!("cursor effect: active");
    #[cfg(all(test, target_arch = "wasm32"))]
    counters::bump_active(1);
    Some(ActiveEffect {
        _listeners: listeners,
        ticker,
    })
}

fn hide_on(target: &EventTarget, name: &'static str, visible: UseStateHandle<bool>) -> EventListener {
    EventListener::new(target, name, move |_event: &Event| visible.set(false))
}

#[function_component(CursorGlow)]
pub(crate) fn cursor_glow(props: &CursorGlowProps) -> Html {
    let fine_pointer = use_state_eq(|| media::query_matches(FINE_POINTER_QUERY).unwrap_or(false));
    let detected = use_memo(*fine_pointer, |fine_pointer| {
        dom::device_profile(*fine_pointer).cursor_enabled()
    });
    let enabled = props.gate.unwrap_or(*detected);

    let pointer = use_state_eq(|| Point::ZERO);
    let visible = use_state_eq(|| false);
    let pointer_latest = use_memo((), |_| Cell::new(None));
    let pressed = use_state_eq(|| false);
    let hover = use_state_eq(HoverState::default);
    let glow = use_state_eq(|| Point::ZERO);
    let motion = use_mut_ref(|| OrganicMotion::new(motion_seed()));
    let theme = use_signal(shared::theme_signal());
    let nav_open = use_signal(shared::nav_open_signal());

    {
        let fine_pointer = fine_pointer.clone();
        use_effect_with((), move |_| {
            let watch = media::watch_media(FINE_POINTER_QUERY, move |matches| {
                fine_pointer.set(matches);
            });
            move || drop(watch)
        });
    }

    {
        let handles = Handles {
            pointer: pointer.clone(),
            visible: visible.clone(),
            pointer_latest: pointer_latest.clone(),
            pressed: pressed.clone(),
            hover: hover.clone(),
            glow: glow.clone(),
            motion: motion.clone(),
        };
        use_effect_with(enabled, move |enabled| {
            let active = if *enabled {
                activate(handles)
            } else {
                handles.visible.set(false);
                dom::set_body_class(dom::CURSOR_ACTIVE_CLASS, false);
                None
            };
            move || drop(active)
        });
    }

    if !enabled {
        return Html::default();
    }

    let theme = theme
        .or_else(dom::document_theme)
        .unwrap_or(DEFAULT_THEME);
    let frame = compose(&OverlayInputs {
        pointer: *pointer,
        glow: *glow,
        visible: *visible,
        pressed: *pressed,
        nav_open,
        hover: *hover,
        theme,
    });

    render_layers(&frame, *pointer, hover.variant)
}

fn radial_mask(center: Point, radius: f64) -> String {
    let mask = format!(
        "radial-gradient(circle {radius:.0}px at {:.1}px {:.1}px, #000 0%, rgba(0, 0, 0, 0.55) 45%, transparent 100%)",
        center.x, center.y
    );
    format!("mask-image: {mask}; -webkit-mask-image: {mask};")
}

fn render_layers(frame: &OverlayFrame, pointer: Point, variant: InteractionVariant) -> Html {
    let palette = &frame.palette;
    let opacity = frame.opacity;

    let grid_style = format!(
        "position: fixed; inset: 0; pointer-events: none; z-index: 10; opacity: {opacity}; \
         transition: opacity 220ms ease; \
         background-image: linear-gradient({line} 1px, transparent 1px), linear-gradient(90deg, {line} 1px, transparent 1px); \
         background-size: {GRID_CELL_PX}px {GRID_CELL_PX}px; {mask}",
        line = palette.grid_line.rgba(palette.grid_alpha),
        mask = radial_mask(frame.glow, GRID_MASK_RADIUS),
    );

    let wash_style = format!(
        "position: fixed; inset: 0; pointer-events: none; z-index: 11; opacity: {opacity}; \
         transition: opacity 220ms ease; mix-blend-mode: screen; \
         background: linear-gradient(135deg, {from}, {to}); {mask}",
        from = palette.wash_from.rgba(palette.wash_alpha),
        to = palette.wash_to.rgba(palette.wash_alpha),
        mask = radial_mask(frame.glow, WASH_MASK_RADIUS),
    );

    let shape = frame.glow_shape;
    let glow_style = format!(
        "position: fixed; left: {x:.1}px; top: {y:.1}px; width: {d:.0}px; height: {d:.0}px; \
         pointer-events: none; z-index: 20; border-radius: 9999px; opacity: {opacity}; \
         transform: translate3d(-50%, -50%, 0) rotate({angle:.1}deg) scale({sx:.3}, {sy:.3}); \
         background: radial-gradient(circle, {inner} 0%, {outer} 65%); \
         mix-blend-mode: screen; transition: opacity 200ms ease, background 250ms ease;",
        x = frame.glow.x,
        y = frame.glow.y,
        d = palette.glow_diameter,
        angle = shape.angle_deg,
        sx = shape.scale_x,
        sy = shape.scale_y,
        inner = palette.glow.rgba(frame.glow_alpha),
        outer = palette.glow.rgba(0.0),
    );

    let flash_style = format!(
        "position: fixed; left: {x:.1}px; top: {y:.1}px; width: {d:.0}px; height: {d:.0}px; \
         pointer-events: none; z-index: 21; border-radius: 9999px; \
         opacity: {alpha:.3}; transform: translate3d(-50%, -50%, 0) scale({scale:.3}); \
         background: radial-gradient(circle, {color} 0%, transparent 70%); \
         mix-blend-mode: screen; transition: opacity 240ms ease-out, transform 240ms ease-out;",
        x = pointer.x,
        y = pointer.y,
        d = palette.glow_diameter * 0.5,
        alpha = frame.flash_alpha * opacity,
        scale = frame.flash_scale,
        color = palette.glow.rgba(0.9),
    );

    let cursor = frame.cursor;
    let (border_alpha, fill_alpha) = if cursor.outlined {
        (0.85, 0.08)
    } else {
        (0.65, if cursor.scale < 1.0 { 0.4 } else { 0.26 })
    };
    let cursor_style = format!(
        "position: fixed; left: {x:.1}px; top: {y:.1}px; width: {w:.1}px; height: {h:.1}px; \
         pointer-events: none; z-index: 30; border-radius: {r:.1}px; opacity: {opacity}; \
         transform: translate3d(calc(-50% + {dx:.1}px), calc(-50% + {dy:.1}px), 0) scale({scale:.2}); \
         border: 1.4px solid {border}; background-color: {fill}; box-shadow: 0 0 32px {shadow}; \
         mix-blend-mode: screen; \
         transition: transform 120ms ease, width 160ms ease, height 160ms ease, border-radius 160ms ease, opacity 180ms ease;",
        x = pointer.x,
        y = pointer.y,
        w = cursor.width,
        h = cursor.height,
        r = cursor.border_radius,
        dx = cursor.offset.x,
        dy = cursor.offset.y,
        scale = cursor.scale,
        border = palette.cursor.rgba(border_alpha),
        fill = palette.cursor.rgba(fill_alpha),
        shadow = palette.cursor.rgba(0.55),
    );

    html! {
        <div class="cursor-glow" aria-hidden="true" data-variant={variant.as_str()}>
            <div class="cursor-glow__grid" style={grid_style} />
            <div class="cursor-glow__wash" style={wash_style} />
            <div class="cursor-glow__blob" style={glow_style} />
            <div class="cursor-glow__flash" style={flash_style} />
            <div class="cursor-glow__cursor" style={cursor_style} />
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::PointerEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn active_effects() -> i32 {
        counters::ACTIVE.with(|active| active.get())
    }

    fn frames() -> u32 {
        counters::FRAMES.with(|frames| frames.get())
    }

    fn body_marked() -> bool {
        dom::body()
            .expect("body available")
            .class_list()
            .contains(dom::CURSOR_ACTIVE_CLASS)
    }

    fn append_to_body(tag: &str, id: &str) -> Element {
        let element = dom::document()
            .expect("document available")
            .create_element(tag)
            .expect("create element");
        element.set_id(id);
        dom::body()
            .expect("body available")
            .append_child(&element)
            .expect("append element");
        element
    }

    fn mount(gate: bool, id: &str) -> (Element, yew::AppHandle<CursorGlow>) {
        let root = append_to_body("div", id);
        let handle = yew::Renderer::<CursorGlow>::with_root_and_props(
            root.clone(),
            CursorGlowProps { gate: Some(gate) },
        )
        .render();
        (root, handle)
    }

    fn move_over(target: &Element, x: i32, y: i32) {
        let init = PointerEventInit::new();
        init.set_bubbles(true);
        init.set_client_x(x);
        init.set_client_y(y);
        let event = PointerEvent::new_with_event_init_dict("pointermove", &init)
            .expect("pointer event");
        target.dispatch_event(&event).expect("dispatch pointermove");
    }

    fn cursor_style(root: &Element) -> String {
        root.query_selector(".cursor-glow__cursor")
            .ok()
            .flatten()
            .and_then(|layer| layer.get_attribute("style"))
            .expect("cursor layer rendered")
    }

    fn variant(root: &Element) -> Option<String> {
        root.query_selector(".cursor-glow")
            .ok()
            .flatten()
            .and_then(|overlay| overlay.get_attribute("data-variant"))
    }

    #[wasm_bindgen_test(async)]
    async fn closed_gate_renders_nothing_and_registers_nothing() {
        set_panic_hook();
        let active_before = active_effects();
        let (root, handle) = mount(false, "cursor-gate-closed");
        TimeoutFuture::new(30).await;

        let frames_before = frames();
        move_over(&root, 120, 80);
        TimeoutFuture::new(150).await;

        assert_eq!(root.query_selector(".cursor-glow").ok().flatten(), None);
        assert_eq!(root.child_element_count(), 0);
        assert_eq!(active_effects(), active_before);
        assert_eq!(frames(), frames_before);
        assert!(!body_marked());

        handle.destroy();
        root.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn leaving_the_window_hides_but_keeps_variant_and_position() {
        set_panic_hook();
        let (root, handle) = mount(true, "cursor-gate-open");
        let button = append_to_body("button", "cursor-test-button");
        button.set_text_content(Some("Hire me"));
        TimeoutFuture::new(30).await;
        assert!(body_marked());
        let frames_before = frames();

        move_over(&button, 40, 50);
        TimeoutFuture::new(120).await;
        assert!(frames() > frames_before);
        assert_eq!(variant(&root).as_deref(), Some("pointer"));
        let shown = cursor_style(&root);
        assert!(shown.contains("opacity: 1;"), "{shown}");
        assert!(shown.contains("left: 40.0px"), "{shown}");

        web_sys::window()
            .expect("window available")
            .dispatch_event(&Event::new("blur").expect("blur event"))
            .expect("dispatch blur");
        TimeoutFuture::new(50).await;
        let hidden = cursor_style(&root);
        assert!(hidden.contains("opacity: 0;"), "{hidden}");
        assert!(hidden.contains("left: 40.0px"), "{hidden}");
        assert_eq!(variant(&root).as_deref(), Some("pointer"));

        handle.destroy();
        TimeoutFuture::new(20).await;
        assert!(!body_marked());
        button.remove();
        root.remove();
    }
}
