// ui.rs - egui driver for the simulation engine
// Paints the grid, turns pointer presses/drags into cell edits and owns the Start/Reset controls

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use conway::{EngineObserver, Grid, SimulationEngine};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Vec2};
use tokio::runtime::Runtime;
use tracing::warn;

pub const CELL_SIZE: f32 = 10.0;
const LIVE_COLOR: Color32 = Color32::from_rgb(0, 128, 0);
const DEAD_COLOR: Color32 = Color32::WHITE;

/// Forwards engine notifications to the egui frame loop.
///
/// The context only exists once eframe has created the window, so it is
/// filled in late; notifications before that just set the flags.
#[derive(Default)]
pub struct UiObserver {
    ctx: OnceLock<egui::Context>,
    stopped: AtomicBool,
    halted: AtomicBool,
}

impl UiObserver {
    pub fn attach(&self, ctx: egui::Context) {
        let _ = self.ctx.set(ctx);
    }

    fn repaint(&self) {
        if let Some(ctx) = self.ctx.get() {
            ctx.request_repaint();
        }
    }
}

impl EngineObserver for UiObserver {
    fn on_change(&self) {
        self.repaint();
    }

    fn on_stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.repaint();
    }

    fn on_halt(&self) {
        self.halted.store(true, Ordering::SeqCst);
        self.repaint();
    }
}

/// Cell under `offset`, measured from the grid's top-left corner.
fn cell_at(offset: Vec2, size: usize) -> Option<(usize, usize)> {
    if offset.x < 0.0 || offset.y < 0.0 {
        return None;
    }
    let x = (offset.x / CELL_SIZE) as usize;
    let y = (offset.y / CELL_SIZE) as usize;
    (x < size && y < size).then_some((x, y))
}

fn status_text(generation: u64, grid: &Grid) -> String {
    format!("Generation: {}    Live cells: {}", generation, grid.live_count())
}

pub struct LifeApp {
    engine: SimulationEngine,
    observer: Arc<UiObserver>,
    // The engine spawns its tick loop here; dropped after the engine.
    _runtime: Runtime,
    /// Whether the Start button currently reads "Stop".
    start_pressed: bool,
    show_halt_message: bool,
}

impl LifeApp {
    pub fn new(engine: SimulationEngine, observer: Arc<UiObserver>, runtime: Runtime) -> Self {
        Self {
            engine,
            observer,
            _runtime: runtime,
            start_pressed: false,
            show_halt_message: false,
        }
    }

    fn on_start_button(&mut self) {
        if self.engine.is_running() {
            self.engine.stop();
            self.start_pressed = false;
        } else {
            self.engine.start();
            self.start_pressed = true;
        }
    }

    fn on_reset_button(&mut self) {
        self.engine.stop();
        self.engine.clear();
        self.start_pressed = false;
    }

    /// Press toggles the cell under the pointer; any motion while held drags cells alive.
    fn handle_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, origin: Pos2, size: usize) {
        if !response.is_pointer_button_down_on() {
            return;
        }
        let (pressed, moved, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.delta() != Vec2::ZERO,
                i.pointer.interact_pos(),
            )
        });
        let extend = match (pressed, moved) {
            (true, _) => false,
            (false, true) => true,
            (false, false) => return,
        };
        let Some((x, y)) = pos.and_then(|pos| cell_at(pos - origin, size)) else {
            return;
        };
        if let Err(err) = self.engine.edit_cell(x, y, extend) {
            warn!(%err, "pointer edit rejected");
        }
    }

    fn draw_grid(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, grid: &Grid) {
        let size = grid.size();
        let total_size = Vec2::splat(CELL_SIZE * size as f32);
        let (response, painter) = ui.allocate_painter(total_size, Sense::click_and_drag());
        let origin = response.rect.min;

        self.handle_pointer(ctx, &response, origin, size);

        painter.rect_filled(response.rect, 0.0, DEAD_COLOR);
        for (x, y) in grid.iter_live() {
            let min = origin + Vec2::new(x as f32, y as f32) * CELL_SIZE;
            painter.rect_filled(Rect::from_min_size(min, Vec2::splat(CELL_SIZE)), 0.0, LIVE_COLOR);
        }
    }

    fn halt_message(&mut self, ctx: &egui::Context) {
        let mut dismissed = false;
        egui::Window::new("The simulation stopped")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Nothing alive or nothing changed");
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.show_halt_message = false;
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.observer.stopped.swap(false, Ordering::SeqCst) {
            self.start_pressed = self.engine.is_running();
        }
        if self.observer.halted.swap(false, Ordering::SeqCst) {
            self.show_halt_message = true;
        }

        // Taken before input is handled, so an edit shows up on the repaint it requests.
        let grid = self.engine.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    let button_text = if self.start_pressed { "Stop" } else { "Start" };
                    if ui.button(button_text).clicked() {
                        self.on_start_button();
                    }
                    if ui.button("Reset").clicked() {
                        self.on_reset_button();
                    }
                });

                ui.separator();

                self.draw_grid(ctx, ui, &grid);
            });

            ui.separator();

            ui.label(status_text(self.engine.generation(), &grid));
        });

        if self.show_halt_message {
            self.halt_message(ctx);
        }
    }
}
