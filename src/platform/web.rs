//! Browser glue: page buttons, input listeners and the animation-frame loop

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, KeyboardEvent};

use super::dom::{self, Anchors};
use super::{AudioStart, StartAction, playfield_size};
use crate::audio::WebAudio;
use crate::config::GameConfig;
use crate::consts::SIM_DT;
use crate::input::{Command, Key, TouchControl};
use crate::renderer::CanvasRenderer;
use crate::session::{Session, SessionPhase};

/// A listener that is attached while the game is open and detached on close.
/// The closure itself lives as long as the page.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    passive: bool,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(&self) {
        let options = AddEventListenerOptions::new();
        options.set_passive(self.passive);
        let _ = self
            .target
            .add_event_listener_with_callback_and_add_event_listener_options(
                self.kind,
                self.closure.as_ref().unchecked_ref(),
                &options,
            );
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Everything the page callbacks share
struct App {
    session: Session,
    dom: Anchors,
    renderer: CanvasRenderer,
    /// Pending animation-frame request; `Some` means the loop is running
    frame_id: Option<i32>,
    last_time: f64,
    audio: AudioStart,
    listeners: Vec<Listener>,
}

impl App {
    /// Size the canvas and the world to the viewport
    fn fit_playfield(&mut self) {
        let (vw, vh) = self.dom.viewport();
        let (width, height) = playfield_size(vw, vh);
        self.renderer.resize(width, height);
        self.session.resize(width as f32, height as f32);
    }

    fn update_score(&self) {
        dom::set_text(&self.dom.score, &self.session.score_text());
    }

    fn show_game_over(&self) {
        dom::set_text(&self.dom.final_score, &self.session.final_score_text());
        dom::set_hidden(&self.dom.message, false);
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.dom.window.cancel_animation_frame(id);
        }
    }
}

fn seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Attach the game to the page. Call once after the DOM is ready.
#[wasm_bindgen(js_name = initGameUI)]
pub fn init_game_ui() {
    console_error_panic_hook::set_once();
    // A second call keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);

    let dom = match Anchors::bind() {
        Ok(dom) => dom,
        Err(e) => {
            log::error!("Game disabled: {e}");
            return;
        }
    };

    let config = GameConfig::load();
    let (width, height) = {
        let (vw, vh) = dom.viewport();
        playfield_size(vw, vh)
    };
    let renderer = CanvasRenderer::new(dom.canvas.clone(), dom.ctx.clone());
    let app = Rc::new(RefCell::new(App {
        session: Session::new(config, width as f32, height as f32),
        dom,
        renderer,
        frame_id: None,
        last_time: 0.0,
        audio: AudioStart::NotRequested,
        listeners: Vec::new(),
    }));

    let listeners = build_listeners(&app);
    app.borrow_mut().listeners = listeners;
    bind_buttons(&app);

    log::info!("Rock Drift ready");
}

fn on_click(target: &EventTarget, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Page buttons stay bound for the page's lifetime
fn bind_buttons(app: &Rc<RefCell<App>>) {
    let a = app.borrow();

    {
        let app = app.clone();
        on_click(&a.dom.play_button, move |_| {
            let mut a = app.borrow_mut();
            if a.session.open_controls() {
                dom::show(&a.dom.controls_modal);
                let _ = a.dom.start_button.focus();
            }
        });
    }

    {
        let app = app.clone();
        on_click(&a.dom.start_button, move |_| start_clicked(&app));
    }

    {
        let app = app.clone();
        on_click(&a.dom.close_button, move |_| close_game(&app));
    }
}

/// First start brings audio up (needs this user gesture), then opens the game
fn start_clicked(app: &Rc<RefCell<App>>) {
    let action = {
        let mut a = app.borrow_mut();
        if a.session.phase() != SessionPhase::ControlsModalOpen {
            return;
        }
        a.audio.on_start_click()
    };

    match action {
        StartAction::Ignore => {}
        StartAction::OpenGame => open_game(app),
        StartAction::RequestAudio => {
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let settings = app.borrow().session.world().config.audio.clone();
                match WebAudio::new(&settings) {
                    Ok(audio) => match audio.resume().await {
                        Ok(()) => {
                            log::info!("Audio ready");
                            app.borrow_mut().session.set_audio(Box::new(audio));
                        }
                        Err(e) => log::warn!("Audio could not start, playing muted: {e:?}"),
                    },
                    Err(e) => log::warn!("Audio unavailable, playing muted: {e:?}"),
                }
                app.borrow_mut().audio.settle();
                open_game(&app);
            });
        }
    }
}

fn open_game(app: &Rc<RefCell<App>>) {
    {
        let mut guard = app.borrow_mut();
        let a = &mut *guard;
        if a.session.phase() != SessionPhase::ControlsModalOpen {
            return;
        }
        // Size first: the run is laid out around the playfield centre
        a.fit_playfield();
        if !a.session.start(seed()) {
            return;
        }
        dom::hide(&a.dom.controls_modal);
        dom::show(&a.dom.overlay);
        dom::set_hidden(&a.dom.message, true);
        a.dom.lock_scroll(true);
        a.update_score();
        a.last_time = 0.0;
        for listener in &a.listeners {
            listener.attach();
        }
    }
    schedule_frame(app);
}

fn restart_game(app: &Rc<RefCell<App>>) {
    {
        let mut a = app.borrow_mut();
        if a.session.phase() != SessionPhase::GameOver {
            return;
        }
        a.fit_playfield();
        if !a.session.restart(seed()) {
            return;
        }
        dom::set_hidden(&a.dom.message, true);
        a.update_score();
        a.last_time = 0.0;
    }
    schedule_frame(app);
}

fn close_game(app: &Rc<RefCell<App>>) {
    let mut guard = app.borrow_mut();
    let a = &mut *guard;
    if !a.session.close() {
        return;
    }
    a.cancel_frame();
    for listener in &a.listeners {
        listener.detach();
    }
    dom::hide(&a.dom.overlay);
    dom::hide(&a.dom.controls_modal);
    a.dom.lock_scroll(false);
    log::info!("Game closed");
}

/// Keyboard, touch and resize listeners; attached only while the game is open
fn build_listeners(app: &Rc<RefCell<App>>) -> Vec<Listener> {
    let a = app.borrow();
    let window: EventTarget = a.dom.window.clone().into();
    let mut listeners = Vec::new();

    {
        let app = app.clone();
        listeners.push(Listener {
            target: window.clone(),
            kind: "keydown",
            passive: false,
            closure: Closure::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(key) = Key::from_key(&event.key()) else {
                    return;
                };
                if key == Key::Fire {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }
                let command = app.borrow_mut().session.key_down(key);
                match command {
                    Some(Command::Restart) => restart_game(&app),
                    Some(Command::Close) => close_game(&app),
                    _ => {}
                }
            }),
        });
    }

    {
        let app = app.clone();
        listeners.push(Listener {
            target: window.clone(),
            kind: "keyup",
            passive: true,
            closure: Closure::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if let Some(key) = Key::from_key(&event.key()) {
                    app.borrow_mut().session.key_up(key);
                }
            }),
        });
    }

    {
        let app = app.clone();
        listeners.push(Listener {
            target: window,
            kind: "resize",
            passive: true,
            closure: Closure::new(move |_event: Event| {
                app.borrow_mut().fit_playfield();
            }),
        });
    }

    for (control, el) in &a.dom.touch {
        let control = *control;
        let target: EventTarget = el.clone().into();

        {
            let app = app.clone();
            listeners.push(Listener {
                target: target.clone(),
                kind: "touchstart",
                passive: false,
                closure: Closure::new(move |event: Event| {
                    event.prevent_default();
                    // Shoot fires inside the session; nothing comes back
                    let _ = app.borrow_mut().session.touch_start(control);
                }),
            });
        }

        for kind in ["touchend", "touchcancel"] {
            let app = app.clone();
            listeners.push(Listener {
                target: target.clone(),
                kind,
                passive: false,
                closure: Closure::new(move |event: Event| {
                    event.prevent_default();
                    app.borrow_mut().session.touch_end(control);
                }),
            });
        }
    }

    log::debug!(
        "Built {} listeners ({} touch controls)",
        listeners.len(),
        a.dom.touch.len()
    );
    listeners
}

/// Request the next animation frame unless one is already pending
fn schedule_frame(app: &Rc<RefCell<App>>) {
    let next = app.clone();
    let mut guard = app.borrow_mut();
    let a = &mut *guard;
    if a.frame_id.is_some() {
        return;
    }
    let closure = Closure::once(move |time: f64| game_loop(next, time));
    a.frame_id = a
        .dom
        .window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

fn game_loop(app: Rc<RefCell<App>>, time: f64) {
    let keep_running = {
        let mut guard = app.borrow_mut();
        let a = &mut *guard;
        a.frame_id = None;
        if !a.session.phase().is_open() {
            return;
        }

        let dt = if a.last_time > 0.0 {
            ((time - a.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        a.last_time = time;

        let report = a.session.advance(dt);
        if let Err(e) = a.renderer.render(a.session.world()) {
            log::warn!("Render error: {e:?}");
        }
        if report.score_changed {
            a.update_score();
        }
        if report.game_over {
            a.show_game_over();
        }
        a.session.phase() == SessionPhase::Playing
    };

    if keep_running {
        schedule_frame(&app);
    }
}
