//! Browser frontend glue
//!
//! The page owns the three.js scene and the GLTF loader. This module owns
//! everything else: the frame loop, keyboard and button wiring, auto-pause,
//! and the DOM score/game-over display. Each frame the page's render callback
//! receives a JSON `FrameSnapshot` to apply to its scene graph.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent};

use crate::Tuning;
use crate::mesh::split_wheel_mesh;
use crate::renderer::{FrameSnapshot, RenderSurface};
use crate::sim::{AssetError, Direction, GamePhase, SimulationState, tick};
use crate::ui::{self, UiSink};

const RIDER_MODEL: &str = "models/cyclist_-_racing_position_-_free_3d_printable/scene.gltf";
const OBSTACLE_MODEL: &str = "models/obstacle_conus/scene.gltf";

#[wasm_bindgen(start)]
pub fn wasm_start() {
    super::init_logging();
    log::info!("Cycling Runner module loaded");
}

/// Passes each frame to the page's render callback as JSON
#[derive(Clone)]
struct JsRenderSurface {
    callback: js_sys::Function,
}

impl RenderSurface for JsRenderSurface {
    fn draw(&mut self, snapshot: &FrameSnapshot) {
        match snapshot.to_json() {
            Ok(json) => {
                if let Err(e) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Render callback failed: {:?}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize frame: {}", e),
        }
    }
}

/// Score and overlays in the page DOM
struct DomUi {
    document: Document,
}

impl DomUi {
    fn set_visible(&self, id: &str, visible: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            if let Err(e) = el.class_list().toggle_with_force("hidden", !visible) {
                log::warn!("Failed to toggle #{}: {:?}", id, e);
            }
        }
    }
}

impl UiSink for DomUi {
    fn update_score(&mut self, score: u32) {
        if let Some(el) = self.document.get_element_by_id("score-display") {
            el.set_text_content(Some(&format!("Score: {}", score)));
        }
    }

    fn notify_game_over(&mut self, final_score: u32) {
        if let Some(el) = self.document.get_element_by_id("final-score") {
            el.set_text_content(Some(&final_score.to_string()));
        }
        self.set_visible("game-over-screen", true);
    }

    fn notify_reset(&mut self) {
        self.set_visible("game-over-screen", false);
    }

    fn notify_assets_ready(&mut self) {
        self.set_visible("loading-screen", false);
    }
}

/// Game instance holding all state
struct Game {
    state: SimulationState,
    surface: JsRenderSurface,
    ui: Option<DomUi>,
}

impl Game {
    /// Run one frame of simulation and flush events to the DOM
    fn advance(&mut self, time: f64) -> FrameSnapshot {
        tick(&mut self.state, time);
        let events = self.state.drain_events();
        if let Some(ui) = self.ui.as_mut() {
            ui::dispatch(&events, ui);
        }
        FrameSnapshot::capture(&self.state)
    }
}

fn js_error(message: &str) -> JsValue {
    JsValue::from_str(message)
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| js_error("no document"))
}

/// Handle the page holds on to
#[wasm_bindgen]
pub struct WebGame {
    game: Rc<RefCell<Game>>,
}

#[wasm_bindgen]
impl WebGame {
    /// `render` is called with a JSON frame snapshot once per animation frame.
    /// `tuning_json` optionally overrides game balance.
    #[wasm_bindgen(constructor)]
    pub fn new(render: js_sys::Function, tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| js_error(&e.to_string()))?,
            None => Tuning::default(),
        };

        let seed = js_sys::Date::now() as u64;
        let ui = document().ok().map(|document| DomUi { document });
        if ui.is_none() {
            log::warn!("No document available, UI updates disabled");
        }

        let game = Game {
            state: SimulationState::with_tuning(seed, tuning),
            surface: JsRenderSurface { callback: render },
            ui,
        };
        log::info!("Game initialized with seed: {}", seed);

        Ok(WebGame {
            game: Rc::new(RefCell::new(game)),
        })
    }

    /// Wire input and start the frame loop
    pub fn run(&self) -> Result<(), JsValue> {
        setup_input_handlers(self.game.clone())?;
        setup_buttons(self.game.clone())?;
        setup_auto_pause(self.game.clone())?;
        request_animation_frame(self.game.clone());
        log::info!("Cycling Runner running!");
        Ok(())
    }

    /// How many obstacle instances the page should load
    #[wasm_bindgen(js_name = obstacleCount)]
    pub fn obstacle_count(&self) -> usize {
        self.game.borrow().state.tuning.obstacle_count
    }

    #[wasm_bindgen(js_name = riderLoaded)]
    pub fn rider_loaded(&self) {
        self.game.borrow_mut().state.rider_loaded(Ok(()));
    }

    #[wasm_bindgen(js_name = riderFailed)]
    pub fn rider_failed(&self, reason: String) {
        self.game.borrow_mut().state.rider_loaded(Err(AssetError::LoadFailed {
            path: RIDER_MODEL.to_string(),
            reason,
        }));
    }

    #[wasm_bindgen(js_name = obstacleLoaded)]
    pub fn obstacle_loaded(&self, index: usize) {
        self.game.borrow_mut().state.obstacle_loaded(index, Ok(()));
    }

    #[wasm_bindgen(js_name = obstacleFailed)]
    pub fn obstacle_failed(&self, index: usize, reason: String) {
        self.game.borrow_mut().state.obstacle_loaded(
            index,
            Err(AssetError::LoadFailed {
                path: OBSTACLE_MODEL.to_string(),
                reason,
            }),
        );
    }

    pub fn start(&self) {
        self.game.borrow_mut().state.start();
    }

    pub fn pause(&self) {
        self.game.borrow_mut().state.pause();
    }

    pub fn reset(&self) {
        self.game.borrow_mut().state.reset();
    }
}

/// Split a combined wheel mesh; returns the `WheelSplit` as JSON
#[wasm_bindgen(js_name = splitWheelMesh)]
pub fn split_wheel_mesh_js(positions: Vec<f32>, indices: Option<Vec<u32>>) -> Result<String, JsValue> {
    let split = split_wheel_mesh(&positions, indices.as_deref()).map_err(|e| js_error(&e.to_string()))?;
    serde_json::to_string(&split).map_err(|e| js_error(&e.to_string()))
}

fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;

    // Key down
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            if let Some(dir) = Direction::from_key(&key) {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
                game.borrow_mut().state.held.press(dir);
            } else if key == "Escape" {
                game.borrow_mut().state.toggle_pause();
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Key up
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(dir) = Direction::from_key(&event.key()) {
                event.prevent_default();
                game.borrow_mut().state.held.release(dir);
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let document = document()?;

    let bindings: [(&str, fn(&mut SimulationState)); 3] = [
        ("play-button", SimulationState::start),
        ("pause-button", SimulationState::pause),
        ("restart-button", SimulationState::reset),
    ];

    for (id, action) in bindings {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("#{} not found, button disabled", id);
            continue;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            action(&mut game.borrow_mut().state);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let document = document()?;

    // Visibility change (tab switch, minimize)
    {
        let game = game.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.state.pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Window blur (click outside)
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            if g.state.phase == GamePhase::Playing {
                g.state.pause();
                // Keys released while unfocused never send keyup
                g.state.held.clear();
                log::info!("Auto-paused (window blur)");
            }
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame(game: Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window, frame loop not started");
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
    // Draw outside the borrow so the page's callback may call back into WebGame
    let (snapshot, mut surface) = {
        let mut g = game.borrow_mut();
        let snapshot = g.advance(time);
        (snapshot, g.surface.clone())
    };
    surface.draw(&snapshot);

    request_animation_frame(game);
}
