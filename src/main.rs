//! Skyburst entry point
//!
//! Wires the page: countdown readout, scroll-reveal for the letter, the
//! fireworks show, and the spotlight overlay. Native builds run a
//! headless demo show instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use skyburst::renderer::{RenderState, ResolvedPalette, frame_vertices};
    use skyburst::{Director, FrameOutcome, Settings, countdown};

    /// The countdown counts up from this moment
    const START_DATE: &str = "2025-06-09T00:00:00";

    /// Page state shared by the frame loop and every listener
    struct App {
        director: Director,
        render_state: Option<RenderState>,
        palette: ResolvedPalette,
        /// Set on unlock, cleared by the back button; debounces the
        /// unlock button through the pre-show page transition
        celebration_active: bool,
        /// True while a frame callback is scheduled
        animating: bool,
    }

    impl App {
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let Some(state) = self.director.state() else {
                return;
            };

            let vertices = frame_vertices(state, &self.palette);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skyburst starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let palette = ResolvedPalette::new(settings.effective_palette());
        let app = Rc::new(RefCell::new(App {
            director: Director::new(settings),
            render_state: None,
            palette,
            celebration_active: false,
            animating: false,
        }));

        start_countdown(&document);
        setup_scroll_reveal();
        setup_unlock_button(app.clone());
        setup_continue_button(&document);
        setup_back_button(app.clone());
        setup_spotlight(&document);
        setup_resize(app);

        log::info!("Skyburst ready");
    }

    // --- countdown ---------------------------------------------------

    fn start_countdown(document: &Document) {
        let start_ms = js_sys::Date::new(&JsValue::from_str(START_DATE)).get_time();

        let document = document.clone();
        let update = move || {
            let b = countdown::breakdown(js_sys::Date::now() - start_ms);
            set_text(&document, "days", &countdown::pad(b.days));
            set_text(&document, "hours", &countdown::pad(b.hours));
            set_text(&document, "minutes", &countdown::pad(b.minutes));
            set_text(&document, "seconds", &countdown::pad(b.seconds));
        };
        update();

        let closure = Closure::<dyn FnMut()>::new(update);
        let _ = web_sys::window()
            .unwrap()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            );
        closure.forget();
    }

    // --- scroll reveal -----------------------------------------------

    fn reveal_letter_paragraphs() {
        let window = web_sys::window().unwrap();
        let Some(document) = window.document() else {
            return;
        };
        let Ok(paragraphs) = document.query_selector_all(".letter-content p") else {
            return;
        };

        let threshold = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
            * 0.85;

        for i in 0..paragraphs.length() {
            let Some(node) = paragraphs.item(i) else {
                continue;
            };
            let Ok(el) = node.dyn_into::<Element>() else {
                continue;
            };
            if el.get_bounding_client_rect().top() < threshold {
                // Stagger the reveals down the letter
                set_timeout(
                    move || {
                        let _ = el.class_list().add_1("visible");
                    },
                    (i * 150) as i32,
                );
            }
        }
    }

    fn setup_scroll_reveal() {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
            reveal_letter_paragraphs();
        });
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();

        reveal_letter_paragraphs();
    }

    // --- fireworks show ----------------------------------------------

    fn setup_unlock_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id("unlock-btn") else {
            log::warn!("No unlock button on this page");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            {
                let mut a = app.borrow_mut();
                if a.celebration_active {
                    return;
                }
                a.celebration_active = true;
            }

            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            if let Some(body) = document.body() {
                let _ = body.class_list().add_1("celebration-active");
            }
            add_class(&document, "fireworks-page", "visible");
            window.scroll_to_with_x_and_y(0.0, 0.0);

            // Let the page transition settle before the canvas goes live
            let app = app.clone();
            set_timeout(
                move || {
                    wasm_bindgen_futures::spawn_local(start_show(app));
                    set_timeout(
                        || {
                            let document = web_sys::window().unwrap().document().unwrap();
                            add_class(&document, "fireworks-title", "visible");
                            add_class(&document, "fireworks-subtitle", "visible");
                        },
                        500,
                    );
                    set_timeout(
                        || {
                            let document = web_sys::window().unwrap().document().unwrap();
                            add_class(&document, "continue-btn", "visible");
                        },
                        2000,
                    );
                },
                500,
            );
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Size the canvas to the viewport, bring up WebGPU on first use, and
    /// hand the show to the director.
    async fn start_show(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let Some(canvas) = document
            .get_element_by_id("fireworks-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No fireworks canvas on this page");
            return;
        };

        let dpr = window.device_pixel_ratio();
        let css_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let css_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let width = (css_w * dpr) as u32;
        let height = (css_h * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        if app.borrow().render_state.is_none() {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::BROWSER_WEBGPU,
                ..Default::default()
            });

            let surface = instance
                .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
                .expect("Failed to create surface");

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .expect("Failed to get adapter");

            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let render_state = RenderState::new(surface, &adapter, width, height).await;
            app.borrow_mut().render_state = Some(render_state);
        } else if let Some(render_state) = app.borrow_mut().render_state.as_mut() {
            render_state.resize(width, height);
        }

        let seed = js_sys::Date::now() as u64;
        let started = app
            .borrow_mut()
            .director
            .start(width as f32, height as f32, seed);

        if started && !app.borrow().animating {
            app.borrow_mut().animating = true;
            request_frame(app);
        }
    }

    fn request_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            match a.director.frame(time) {
                FrameOutcome::Running => {
                    a.render();
                    true
                }
                FrameOutcome::Finished => {
                    // The last frame's pixels stay on the canvas; the next
                    // show clears them on its first render
                    a.animating = false;
                    false
                }
            }
        };

        if keep_going {
            request_frame(app);
        }
    }

    // --- page transitions --------------------------------------------

    fn setup_continue_button(document: &Document) {
        let Some(btn) = document.get_element_by_id("continue-btn") else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            add_class(&document, "fireworks-page", "fading-out");

            set_timeout(
                || {
                    let window = web_sys::window().unwrap();
                    let document = window.document().unwrap();
                    remove_class(&document, "fireworks-page", "visible");
                    remove_class(&document, "fireworks-page", "fading-out");
                    add_class(&document, "spotlight-page", "visible");

                    let cx = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) / 2.0;
                    let cy = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) / 2.0;
                    update_spotlight_position(&document, cx, cy);
                },
                800,
            );
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_back_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id("back-btn") else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            remove_class(&document, "spotlight-page", "visible");
            remove_class(&document, "fireworks-page", "visible");
            if let Some(body) = document.body() {
                let _ = body.class_list().remove_1("celebration-active");
            }
            remove_class(&document, "fireworks-title", "visible");
            remove_class(&document, "fireworks-subtitle", "visible");
            remove_class(&document, "continue-btn", "visible");
            remove_class(&document, "flashlight-cursor", "active");

            let mut a = app.borrow_mut();
            a.director.stop();
            a.celebration_active = false;

            window.scroll_to_with_x_and_y(0.0, 0.0);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // --- spotlight overlay -------------------------------------------

    fn update_spotlight_position(document: &Document, x: f64, y: f64) {
        if let Some(overlay) = html_element(document, "spotlight-overlay") {
            let style = overlay.style();
            let _ = style.set_property("--mouse-x", &format!("{x}px"));
            let _ = style.set_property("--mouse-y", &format!("{y}px"));
        }
        if let Some(cursor) = html_element(document, "flashlight-cursor") {
            let style = cursor.style();
            let _ = style.set_property("left", &format!("{x}px"));
            let _ = style.set_property("top", &format!("{y}px"));
        }
    }

    fn setup_spotlight(document: &Document) {
        let Some(page) = document.get_element_by_id("spotlight-page") else {
            return;
        };

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                add_class(&document, "flashlight-cursor", "active");
            });
            let _ =
                page.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                remove_class(&document, "flashlight-cursor", "active");
            });
            let _ =
                page.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                update_spotlight_position(
                    &document,
                    event.client_x() as f64,
                    event.client_y() as f64,
                );
            });
            let _ =
                page.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["touchstart", "touchmove"] {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let document = web_sys::window().unwrap().document().unwrap();
                    update_spotlight_position(
                        &document,
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                    );
                }
            });
            let _ =
                page.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    // --- viewport ----------------------------------------------------

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let Some(document) = window.document() else {
                return;
            };
            let Some(canvas) = document
                .get_element_by_id("fireworks-canvas")
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            else {
                return;
            };

            let dpr = window.device_pixel_ratio();
            let css_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let css_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let width = (css_w * dpr) as u32;
            let height = (css_h * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut a = app.borrow_mut();
            if let Some(render_state) = a.render_state.as_mut() {
                render_state.resize(width, height);
            }
            a.director.resize(width as f32, height as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // --- small DOM helpers -------------------------------------------

    fn set_timeout<F: FnOnce() + 'static>(f: F, ms: i32) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn add_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().add_1(class);
        }
    }

    fn remove_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().remove_1(class);
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skyburst (native) starting...");

    // Headless demo: run one full show against a synthetic 60 Hz clock
    let settings = skyburst::Settings::load();
    let mut director = skyburst::Director::new(settings);
    director.start(800.0, 600.0, 0x5eed);

    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut frames = 0u64;
    let mut peak_sparks = 0;
    while director.frame(now) == skyburst::FrameOutcome::Running {
        if let Some(state) = director.state() {
            peak_sparks = peak_sparks.max(state.sparks.len());
        }
        now += frame_ms;
        frames += 1;
    }

    println!("Demo show: {frames} frames, peak {peak_sparks} sparks in flight");
    println!("Run with `trunk serve` for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
