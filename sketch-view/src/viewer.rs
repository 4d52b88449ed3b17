//! Interactive sketch viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns both sketches, the RNG and
//! the live configuration, and implements [`eframe::App`] to drive the
//! active sketch once per egui frame and paint what it recorded.

use eframe::App;
use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};
use sketch_core::{
    canvas::{DrawList, Shape},
    color::Rgba,
    config::{Config, ConfigError},
    particle_system::ParticleSystem,
    sketch::{FrameSummary, Sketch},
    tree::TreeRenderer,
    types::PointerState,
};
use tracing::{debug, warn};

/// Which sketch the viewer is currently driving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSketch {
    Particles,
    Trees,
}

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The sketches: [`ParticleSystem`] and [`TreeRenderer`].
/// - The live [`Config`] plus a draft edited in the side panel.
/// - eframe/egui callbacks for input, stepping and painting.
///
/// The typical per-frame update is:
/// 1. Read the pointer and convert it to canvas coordinates.
/// 2. If `running` is `true`, call [`Viewer::step_once`].
/// 3. Paint the last recorded [`DrawList`] into the canvas rect.
///
/// ### Fields
/// - `particles`, `trees` - Both sketches; only `active` is advanced.
/// - `cfg` - Configuration the sketches currently use.
/// - `draft` - Edited copy of `cfg`, applied after validation.
/// - `cfg_error` - Why the last apply was rejected, if it was.
///
/// - `rng` - Shared RNG, re-seeded on reset when `cfg.seed` is set.
///
/// - `running` - Whether the active sketch advances every frame.
/// - `pointer` - Last pointer state in canvas coordinates.
/// - `frame` - Shapes recorded by the last step; repainted while paused.
/// - `frame_count` - Steps since the last reset.
/// - `last_summary` - What the active sketch reported for `frame`.
pub struct Viewer {
    particles: ParticleSystem,
    trees: TreeRenderer,
    active: ActiveSketch,

    cfg: Config,
    draft: Config,
    cfg_error: Option<ConfigError>,

    rng: StdRng,

    running: bool,
    pointer: PointerState,
    frame: DrawList,
    frame_count: u64,
    last_summary: Option<FrameSummary>,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn to_color32(c: Rgba) -> egui::Color32 {
    let [r, g, b, a] = c.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Viewer {
    /// Creates a running viewer on the particle sketch.
    ///
    /// ### Parameters
    /// - `cfg` - Initial configuration; expected to pass [`Config::validate`].
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to `eframe::run_native`.
    pub fn new(cfg: Config) -> Self {
        let mut viewer = Self {
            particles: ParticleSystem::new(&cfg),
            trees: TreeRenderer::new(&cfg),
            active: ActiveSketch::Particles,
            cfg,
            draft: cfg,
            cfg_error: None,
            rng: make_rng(cfg.seed),
            running: true,
            pointer: PointerState::default(),
            frame: DrawList::new(),
            frame_count: 0,
            last_summary: None,
        };
        viewer.reset();
        viewer
    }

    fn sketch(&self) -> &dyn Sketch {
        match self.active {
            ActiveSketch::Particles => &self.particles,
            ActiveSketch::Trees => &self.trees,
        }
    }

    /// Restarts the active sketch from its `setup` hook.
    ///
    /// With a fixed seed the RNG is re-seeded first, so a reset replays
    /// the same run for the same input.
    fn reset(&mut self) {
        if self.cfg.seed.is_some() {
            self.rng = make_rng(self.cfg.seed);
        }
        let sketch: &mut dyn Sketch = match self.active {
            ActiveSketch::Particles => &mut self.particles,
            ActiveSketch::Trees => &mut self.trees,
        };
        sketch.setup(&mut self.rng);

        self.frame.clear();
        self.frame_count = 0;
        self.last_summary = None;
        debug!(sketch = self.sketch().name(), "sketch reset");
    }

    fn select(&mut self, which: ActiveSketch) {
        if self.active != which {
            self.active = which;
            self.reset();
        }
    }

    /// Advances the active sketch by one frame, recording into `frame`.
    fn step_once(&mut self) {
        self.frame.clear();
        let sketch: &mut dyn Sketch = match self.active {
            ActiveSketch::Particles => &mut self.particles,
            ActiveSketch::Trees => &mut self.trees,
        };
        self.last_summary = Some(sketch.frame(&self.pointer, &mut self.frame, &mut self.rng));
        self.frame_count += 1;
    }

    /// Steps once if the viewer is running.
    ///
    /// ### Returns
    /// `true` if a frame was produced.
    fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.step_once();
        true
    }

    /// Validates the draft and hands it to both sketches.
    ///
    /// On failure the live configuration is left untouched and the error
    /// is kept for display.
    fn apply_draft(&mut self) -> Result<(), ConfigError> {
        if let Err(e) = self.draft.validate() {
            warn!(error = %e, "rejected config");
            self.cfg_error = Some(e);
            return Err(e);
        }

        let reseed = self.draft.seed != self.cfg.seed;
        self.cfg = self.draft;
        self.cfg_error = None;
        self.particles.set_config(&self.cfg);
        self.trees.set_config(&self.cfg);
        if reseed {
            self.rng = make_rng(self.cfg.seed);
        }
        debug!(cfg = ?self.cfg, "config applied");
        Ok(())
    }

    /// Largest rect with the canvas aspect ratio centered in `available`.
    fn canvas_rect(&self, available: egui::Rect) -> egui::Rect {
        let w = self.cfg.canvas.width;
        let h = self.cfg.canvas.height;
        let scale = (available.width() / w).min(available.height() / h);
        egui::Rect::from_center_size(available.center(), egui::vec2(w * scale, h * scale))
    }

    fn scale(&self, rect: egui::Rect) -> f32 {
        rect.width() / self.cfg.canvas.width
    }

    /// Converts a canvas position (origin top-left, y down) to screen-space.
    ///
    /// ### Parameters
    /// - `p` - Canvas-space position.
    /// - `rect` - Screen rect the canvas is drawn into, from [`Viewer::canvas_rect`].
    fn canvas_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let s = self.scale(rect);
        egui::pos2(rect.min.x + p.x * s, rect.min.y + p.y * s)
    }

    /// Inverse of [`Viewer::canvas_to_screen`]. Positions outside `rect`
    /// map outside the canvas.
    fn screen_to_canvas(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let s = self.scale(rect);
        Vec2::new((p.x - rect.min.x) / s, (p.y - rect.min.y) / s)
    }

    /// Paints the recorded frame into `rect`.
    fn paint_frame(&self, painter: &egui::Painter, rect: egui::Rect) {
        let s = self.scale(rect);

        for shape in &self.frame.shapes {
            match shape {
                Shape::Background(c) => {
                    painter.rect_filled(rect, 0.0, to_color32(*c));
                }
                Shape::Rect { min, size, fill } => {
                    let min = self.canvas_to_screen(*min, rect);
                    let r = egui::Rect::from_min_size(min, egui::vec2(size.x * s, size.y * s));
                    painter.rect_filled(r, 0.0, to_color32(*fill));
                }
                Shape::Circle {
                    center,
                    diameter,
                    fill,
                } => {
                    let c = self.canvas_to_screen(*center, rect);
                    painter.circle_filled(c, diameter * 0.5 * s, to_color32(*fill));
                }
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    let a = self.canvas_to_screen(*from, rect);
                    let b = self.canvas_to_screen(*to, rect);
                    painter.line_segment([a, b], egui::Stroke::new(width * s, to_color32(*color)));
                }
                Shape::Text(t) => {
                    painter.text(
                        self.canvas_to_screen(t.pos, rect),
                        egui::Align2::LEFT_BOTTOM,
                        &t.content,
                        egui::FontId::proportional(t.size * s),
                        to_color32(t.color),
                    );
                }
            }
        }
    }

    /// Helper to draw a labeled [`egui::DragValue`].
    fn labeled_drag<N: egui::emath::Numeric>(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut N,
        range: std::ops::RangeInclusive<N>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (sketch selection, run controls).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut which = self.active;
                ui.selectable_value(&mut which, ActiveSketch::Particles, "Particles");
                ui.selectable_value(&mut which, ActiveSketch::Trees, "Trees");
                self.select(which);

                ui.separator();

                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Describes the last frame, or the sketch state before the first one.
    fn status_text(&self) -> String {
        match self.last_summary {
            Some(FrameSummary::Particles(f)) => format!(
                "particles = {} (+{} / -{})",
                f.alive, f.spawned, f.expired
            ),
            Some(FrameSummary::Tree(f)) => {
                format!("season = {}, branches = {}", f.season.name(), f.branches)
            }
            None => match self.active {
                ActiveSketch::Particles => format!("particles = {}", self.particles.len()),
                ActiveSketch::Trees => format!("season = {}", self.trees.season.name()),
            },
        }
    }

    /// Builds the bottom status bar (frame count and per-sketch state).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("frames = {}", self.frame_count));
                ui.separator();
                ui.label(self.status_text());
                ui.label(self.sketch().name());
            });
        });
    }

    /// Builds the right-hand panel editing the draft configuration.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                egui::ScrollArea::vertical().show(ui, |ui| {
                    let d = &mut self.draft;

                    ui.separator();
                    ui.label("Canvas");
                    Self::labeled_drag(ui, "width:", &mut d.canvas.width, 1.0..=4000.0, 1.0);
                    Self::labeled_drag(ui, "height:", &mut d.canvas.height, 1.0..=4000.0, 1.0);

                    ui.separator();
                    ui.label("Particles");
                    let p = &mut d.particles;
                    Self::labeled_drag(ui, "initial_count:", &mut p.initial_count, 0..=10_000, 1.0);
                    Self::labeled_drag(ui, "lifespan:", &mut p.lifespan, 0.0..=1000.0, 1.0);
                    Self::labeled_drag(ui, "decay:", &mut p.decay, 0.0..=50.0, 0.1);
                    Self::labeled_drag(ui, "gravity.x:", &mut p.gravity.x, -2.0..=2.0, 0.01);
                    Self::labeled_drag(ui, "gravity.y:", &mut p.gravity.y, -2.0..=2.0, 0.01);
                    Self::labeled_drag(ui, "min_speed:", &mut p.min_speed, 0.0..=20.0, 0.1);
                    Self::labeled_drag(ui, "max_speed:", &mut p.max_speed, 0.0..=20.0, 0.1);
                    Self::labeled_drag(ui, "diameter:", &mut p.diameter, 0.0..=100.0, 0.5);
                    Self::labeled_drag(ui, "channel_min:", &mut p.channel_min, 0.0..=255.0, 1.0);
                    Self::labeled_drag(ui, "channel_max:", &mut p.channel_max, 0.0..=255.0, 1.0);

                    ui.separator();
                    ui.label("Tree");
                    let t = &mut d.tree;
                    Self::labeled_drag(ui, "trunk_len:", &mut t.trunk_len, 0.0..=300.0, 1.0);
                    Self::labeled_drag(ui, "min_len:", &mut t.min_len, 0.0..=100.0, 0.5);
                    ui.horizontal(|ui| {
                        ui.label("branch_angle:");
                        ui.drag_angle(&mut t.branch_angle);
                    });
                    Self::labeled_drag(ui, "split_factor:", &mut t.split_factor, 0.0..=1.0, 0.01);
                    Self::labeled_drag(ui, "middle_min_len:", &mut t.middle_min_len, 0.0..=300.0, 1.0);
                    Self::labeled_drag(ui, "middle_factor:", &mut t.middle_factor, 0.0..=1.0, 0.01);
                    Self::labeled_drag(
                        ui,
                        "middle_angle_factor:",
                        &mut t.middle_angle_factor,
                        -2.0..=2.0,
                        0.01,
                    );
                    Self::labeled_drag(
                        ui,
                        "decoration_max_len:",
                        &mut t.decoration_max_len,
                        0.0..=300.0,
                        1.0,
                    );
                    Self::labeled_drag(ui, "ground_height:", &mut t.ground_height, 0.0..=1000.0, 1.0);
                    Self::labeled_drag(ui, "snow_chance:", &mut t.snow_chance, 0.0..=1.0, 0.01);
                    Self::labeled_drag(ui, "snow_spread:", &mut t.snow_spread, 0.0..=100.0, 0.5);

                    ui.separator();
                    let mut fixed = d.seed.is_some();
                    ui.checkbox(&mut fixed, "Fixed seed");
                    if fixed {
                        let seed = d.seed.get_or_insert(0);
                        Self::labeled_drag(ui, "seed:", seed, 0..=u64::MAX, 1.0);
                    } else {
                        d.seed = None;
                    }
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        // The error is kept in `cfg_error` and shown below.
                        let _ = self.apply_draft();
                    }
                    if ui.button("Reset cfg to default").clicked() {
                        self.draft = Config::default();
                    }
                });

                if let Some(e) = &self.cfg_error {
                    ui.colored_label(egui::Color32::RED, e.to_string());
                }
            });
    }

    /// Builds the central panel where the active sketch is driven and painted.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = self.canvas_rect(response.rect);
            let painter = ui.painter_at(response.rect);

            // The sketches see the pointer even when it leaves the canvas.
            if let Some(p) = ctx.input(|i| i.pointer.latest_pos()) {
                self.pointer.pos = self.screen_to_canvas(p, rect);
            }
            self.pointer.pressed = response.is_pointer_button_down_on();

            if self.tick() {
                ctx.request_repaint();
            }

            self.paint_frame(&painter, rect);
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
