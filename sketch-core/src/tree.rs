//! Seasonal fractal tree sketch.
//!
//! The tree is re-derived from scratch every frame. Each call to
//! [`TreeRenderer::branch`] draws one segment and recurses into up to three
//! shorter children, carrying its position and heading as a [`Transform`]
//! value instead of a push/pop transform stack.

use crate::{
    canvas::{Canvas, map_range},
    color::Rgba,
    config::{CanvasSize, Config, TreeConfig},
    season::Season,
    sketch::{FrameSummary, Sketch},
    types::PointerState,
};
use glam::Vec2;
use rand::{Rng, RngCore};
use tracing::trace;

const BARK: Rgba = Rgba::rgb(101.0, 67.0, 33.0);
const BLOSSOM: Rgba = Rgba::new(255.0, 200.0, 200.0, 150.0);
const LEAF: Rgba = Rgba::new(0.0, 200.0, 0.0, 150.0);
const DECORATION_ALPHA: f32 = 150.0;

/// Stroke width is mapped linearly from this branch-length range...
const STROKE_LEN_RANGE: (f32, f32) = (10.0, 120.0);
/// ...onto this width range.
const STROKE_WIDTH_RANGE: (f32, f32) = (1.0, 15.0);

const TEXT_SIZE: f32 = 24.0;
const HINT: &str = "Move mouse left/right to change seasons";

/// Position and heading of a branch base.
///
/// `angle` is measured from straight up the canvas (negative y) and grows
/// clockwise on screen, since canvas y points down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub origin: Vec2,
    pub angle: f32,
}

impl Transform {
    pub fn at(origin: Vec2) -> Self {
        Self { origin, angle: 0.0 }
    }

    /// Unit vector along the local "up" axis.
    #[inline]
    pub fn up(self) -> Vec2 {
        Vec2::new(self.angle.sin(), -self.angle.cos())
    }

    pub fn rotated(self, delta: f32) -> Self {
        Self {
            angle: self.angle + delta,
            ..self
        }
    }

    /// Moves the origin `len` along the local up axis.
    pub fn advanced(self, len: f32) -> Self {
        Self {
            origin: self.origin + self.up() * len,
            ..self
        }
    }

    /// Maps a point from local to canvas coordinates.
    pub fn to_canvas(self, local: Vec2) -> Vec2 {
        self.origin + Vec2::from_angle(self.angle).rotate(local)
    }
}

/// Summary of one [`TreeRenderer::frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeFrame {
    pub season: Season,
    pub branches: usize,
}

#[derive(Debug)]
pub struct TreeRenderer {
    pub season: Season,
    cfg: TreeConfig,
    canvas: CanvasSize,
}

impl TreeRenderer {
    pub fn new(cfg: &Config) -> Self {
        Self {
            season: Season::Spring,
            cfg: cfg.tree,
            canvas: cfg.canvas,
        }
    }

    /// Draws one full frame for the pointer at `pointer_x`.
    ///
    /// ### Returns
    /// The season drawn and the number of branch segments.
    pub fn frame<R: Rng + ?Sized>(
        &mut self,
        pointer_x: f32,
        canvas: &mut dyn Canvas,
        rng: &mut R,
    ) -> TreeFrame {
        let CanvasSize { width, height } = self.canvas;
        self.season = Season::from_pointer_x(pointer_x, width);

        canvas.background(self.season.background());

        let ground = self.cfg.ground_height;
        canvas.fill_rect(
            Vec2::new(0.0, height - ground),
            Vec2::new(width, ground),
            self.season.ground(),
        );

        let root = Transform::at(Vec2::new(width / 2.0, height));
        let branches = self.branch(canvas, root, self.cfg.trunk_len, rng);

        canvas.text(
            Vec2::new(20.0, 30.0),
            TEXT_SIZE,
            Rgba::BLACK,
            &format!("Season: {}", self.season.name()),
        );
        canvas.text(Vec2::new(20.0, 60.0), TEXT_SIZE, Rgba::BLACK, HINT);

        let stats = TreeFrame {
            season: self.season,
            branches,
        };
        trace!(?stats, "tree frame");
        stats
    }

    /// Draws the branch of length `len` rooted at `at` and all its children.
    ///
    /// Branches at or below `min_len` end the recursion. Longer ones split
    /// into two side branches, plus a third straighter one above
    /// `middle_min_len`. Decorations are only drawn on branches that split
    /// *and* are shorter than `decoration_max_len`, after their children,
    /// so the leaf-most segments stay bare.
    ///
    /// ### Returns
    /// Number of segments drawn, this one included.
    pub fn branch<R: Rng + ?Sized>(
        &self,
        canvas: &mut dyn Canvas,
        at: Transform,
        len: f32,
        rng: &mut R,
    ) -> usize {
        let cfg = &self.cfg;
        let tip = at.advanced(len);
        canvas.line(at.origin, tip.origin, stroke_width(len), BARK);

        if len <= cfg.min_len {
            return 1;
        }

        let side = len * cfg.split_factor;
        let mut count = 1;
        count += self.branch(canvas, tip.rotated(cfg.branch_angle), side, rng);
        count += self.branch(canvas, tip.rotated(-cfg.branch_angle), side, rng);

        if len > cfg.middle_min_len {
            let turn = cfg.branch_angle * cfg.middle_angle_factor;
            count += self.branch(canvas, tip.rotated(turn), len * cfg.middle_factor, rng);
        }

        if len < cfg.decoration_max_len {
            self.decorate(canvas, tip, rng);
        }

        count
    }

    fn decorate<R: Rng + ?Sized>(&self, canvas: &mut dyn Canvas, at: Transform, rng: &mut R) {
        match self.season {
            Season::Spring => canvas.fill_circle(at.origin, 8.0, BLOSSOM),
            Season::Summer => canvas.fill_circle(at.origin, 10.0, LEAF),
            Season::Fall => {
                let r = rng.random_range(200.0..255.0);
                let g = rng.random_range(100.0..180.0);
                canvas.fill_circle(at.origin, 8.0, Rgba::new(r, g, 0.0, DECORATION_ALPHA));
            }
            Season::Winter => {
                if rng.random_bool(self.cfg.snow_chance) {
                    let s = self.cfg.snow_spread;
                    let offset = Vec2::new(rng.random_range(-s..s), rng.random_range(-s..s));
                    canvas.fill_circle(at.to_canvas(offset), 4.0, Rgba::WHITE);
                }
            }
        }
    }
}

/// Thicker strokes for longer branches; extrapolates outside the mapped range.
#[inline]
pub fn stroke_width(len: f32) -> f32 {
    let (lo, hi) = STROKE_LEN_RANGE;
    let (w_lo, w_hi) = STROKE_WIDTH_RANGE;
    map_range(len, lo, hi, w_lo, w_hi)
}

impl Sketch for TreeRenderer {
    fn name(&self) -> &'static str {
        "Trees"
    }

    fn setup(&mut self, _rng: &mut dyn RngCore) {
        self.season = Season::Spring;
    }

    fn frame(
        &mut self,
        pointer: &PointerState,
        canvas: &mut dyn Canvas,
        rng: &mut dyn RngCore,
    ) -> FrameSummary {
        FrameSummary::Tree(TreeRenderer::frame(self, pointer.pos.x, canvas, rng))
    }

    fn set_config(&mut self, cfg: &Config) {
        self.cfg = cfg.tree;
        self.canvas = cfg.canvas;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawList, Shape};
    use crate::config::MAX_BRANCHES;
    use rand::{SeedableRng, rngs::StdRng};
    use std::f32::consts::FRAC_PI_2;

    /// Segments drawn from the default 120-long trunk.
    const FULL_TREE_BRANCHES: usize = 546;
    /// Nodes with `10 < len < 30` in the default tree.
    const DECORATED_NODES: usize = 233;

    fn renderer(season: Season) -> TreeRenderer {
        let mut tree = TreeRenderer::new(&Config::default());
        tree.season = season;
        tree
    }

    fn pointer_x_for(season: Season) -> f32 {
        season.index() as f32 * 200.0 + 100.0
    }

    #[test]
    fn transform_up_and_rotation() {
        let t = Transform::at(Vec2::new(10.0, 10.0));
        assert_eq!(t.up(), Vec2::new(0.0, -1.0));

        let right = t.rotated(FRAC_PI_2);
        assert!(right.up().abs_diff_eq(Vec2::new(1.0, 0.0), 1e-6));

        let tip = t.advanced(5.0);
        assert_eq!(tip.origin, Vec2::new(10.0, 5.0));
        assert_eq!(tip.angle, 0.0);
    }

    #[test]
    fn to_canvas_rotates_local_offsets_with_heading() {
        let t = Transform::at(Vec2::new(100.0, 100.0)).rotated(FRAC_PI_2);
        // Local up (0, -1) is canvas right after a quarter turn clockwise.
        let p = t.to_canvas(Vec2::new(0.0, -3.0));
        assert!(p.abs_diff_eq(Vec2::new(103.0, 100.0), 1e-4), "{p:?}");
    }

    #[test]
    fn stroke_width_maps_and_extrapolates() {
        assert_eq!(stroke_width(10.0), 1.0);
        assert_eq!(stroke_width(120.0), 15.0);
        assert!(stroke_width(8.0) < 1.0);
        assert!(stroke_width(8.0) > 0.0);
    }

    #[test]
    fn short_branch_draws_one_segment_and_nothing_else() {
        let tree = renderer(Season::Spring);
        let mut list = DrawList::new();
        let mut rng = StdRng::seed_from_u64(0);

        let n = tree.branch(&mut list, Transform::at(Vec2::ZERO), 10.0, &mut rng);

        assert_eq!(n, 1);
        assert_eq!(list.len(), 1);
        let (from, to, _) = list.lines().next().unwrap();
        assert_eq!(from, Vec2::ZERO);
        assert_eq!(to, Vec2::new(0.0, -10.0));
    }

    #[test]
    fn full_tree_terminates_with_fixed_branch_count() {
        let tree = renderer(Season::Summer);
        let mut list = DrawList::new();
        let mut rng = StdRng::seed_from_u64(1);

        let n = tree.branch(&mut list, Transform::at(Vec2::ZERO), 120.0, &mut rng);

        assert_eq!(n, FULL_TREE_BRANCHES);
        assert!(n <= 2000);
        assert_eq!(list.lines().count(), n);
    }

    #[test]
    fn three_children_only_above_middle_threshold() {
        let tree = renderer(Season::Summer);
        let mut rng = StdRng::seed_from_u64(2);

        // branch(12.03)  = 1 + 2 leaves of 8.06 = 3
        // branch(17.956) = 1 + 2 * 3 = 7
        // branch(26.8)   = 1 + 2 * 7 = 15
        // branch(40)     = 1 + 2 * 15 = 31, no middle branch at exactly 40
        let mut list = DrawList::new();
        assert_eq!(tree.branch(&mut list, Transform::at(Vec2::ZERO), 40.0, &mut rng), 31);

        let mut list = DrawList::new();
        let with_middle = tree.branch(&mut list, Transform::at(Vec2::ZERO), 41.0, &mut rng);
        assert!(with_middle > 31, "got {with_middle}");
    }

    #[test]
    fn decorations_only_on_splitting_branches_shorter_than_30() {
        let tree = renderer(Season::Spring);
        let mut rng = StdRng::seed_from_u64(3);

        // Leaf-most segment: no decoration even though it is shorter than 30.
        let mut list = DrawList::new();
        tree.branch(&mut list, Transform::at(Vec2::ZERO), 9.0, &mut rng);
        assert_eq!(list.circles().count(), 0);

        // 12 splits into two 8.04 leaves and carries one blossom.
        let mut list = DrawList::new();
        tree.branch(&mut list, Transform::at(Vec2::ZERO), 12.0, &mut rng);
        assert_eq!(list.circles().count(), 1);

        // 30 is not shorter than 30: only its two children are decorated.
        let mut list = DrawList::new();
        tree.branch(&mut list, Transform::at(Vec2::ZERO), 30.0, &mut rng);
        let (center, diameter, fill) = list.circles().next().unwrap();
        assert_eq!(list.circles().count(), 6);
        assert_eq!(diameter, 8.0);
        assert_eq!(fill, BLOSSOM);
        assert!(center.y < -30.0);
    }

    #[test]
    fn decoration_is_drawn_after_children() {
        let tree = renderer(Season::Summer);
        let mut list = DrawList::new();
        let mut rng = StdRng::seed_from_u64(4);

        tree.branch(&mut list, Transform::at(Vec2::ZERO), 12.0, &mut rng);

        assert!(matches!(list.shapes.last(), Some(Shape::Circle { .. })));
        assert_eq!(list.lines().count(), 3);
    }

    #[test]
    fn summer_and_fall_decorations() {
        let mut rng = StdRng::seed_from_u64(5);

        let mut list = DrawList::new();
        renderer(Season::Summer).branch(&mut list, Transform::at(Vec2::ZERO), 120.0, &mut rng);
        assert_eq!(list.circles().count(), DECORATED_NODES);
        assert!(list.circles().all(|(_, d, c)| d == 10.0 && c == LEAF));

        let mut list = DrawList::new();
        renderer(Season::Fall).branch(&mut list, Transform::at(Vec2::ZERO), 120.0, &mut rng);
        assert_eq!(list.circles().count(), DECORATED_NODES);
        for (_, d, c) in list.circles() {
            assert_eq!(d, 8.0);
            assert!((200.0..255.0).contains(&c.r), "r {}", c.r);
            assert!((100.0..180.0).contains(&c.g), "g {}", c.g);
            assert_eq!(c.b, 0.0);
            assert_eq!(c.a, DECORATION_ALPHA);
        }
    }

    #[test]
    fn winter_snow_lands_on_about_a_fifth_of_nodes() {
        let tree = renderer(Season::Winter);
        let mut rng = StdRng::seed_from_u64(6);
        let runs = 50;

        let mut flakes = 0;
        for _ in 0..runs {
            let mut list = DrawList::new();
            tree.branch(&mut list, Transform::at(Vec2::ZERO), 120.0, &mut rng);
            for (_, d, c) in list.circles() {
                assert_eq!(d, 4.0);
                assert_eq!(c, Rgba::WHITE);
            }
            flakes += list.circles().count();
        }

        let rate = flakes as f64 / (runs * DECORATED_NODES) as f64;
        assert!((rate - 0.2).abs() < 0.03, "rate {rate}");
    }

    #[test]
    fn snow_stays_within_spread_of_its_node() {
        let mut tree = renderer(Season::Winter);
        let mut cfg = Config::default();
        cfg.tree.snow_chance = 1.0;
        tree.set_config(&cfg);
        let mut rng = StdRng::seed_from_u64(7);

        let at = Transform::at(Vec2::new(50.0, 50.0)).rotated(0.7);
        for _ in 0..100 {
            let mut list = DrawList::new();
            tree.decorate(&mut list, at, &mut rng);
            let (center, _, _) = list.circles().next().unwrap();
            // Rotating a point of the [-10, 10) square keeps it within its circumradius.
            assert!(center.distance(at.origin) <= 10.0 * 2f32.sqrt() + 1e-3);
        }
    }

    #[test]
    fn frame_picks_season_from_pointer_and_draws_scene() {
        let mut tree = TreeRenderer::new(&Config::default());
        let mut rng = StdRng::seed_from_u64(8);

        for season in Season::ALL {
            let mut list = DrawList::new();
            let stats = tree.frame(pointer_x_for(season), &mut list, &mut rng);

            assert_eq!(stats.season, season);
            assert_eq!(stats.branches, FULL_TREE_BRANCHES);
            assert_eq!(list.shapes[0], Shape::Background(season.background()));
            assert_eq!(
                list.shapes[1],
                Shape::Rect {
                    min: Vec2::new(0.0, 550.0),
                    size: Vec2::new(800.0, 50.0),
                    fill: season.ground(),
                }
            );

            let trunk = list.lines().next().unwrap();
            assert_eq!(trunk.0, Vec2::new(400.0, 600.0));
            assert_eq!(trunk.1, Vec2::new(400.0, 480.0));
            assert_eq!(trunk.2, 15.0);

            let texts: Vec<_> = list.texts().map(|t| t.content.clone()).collect();
            assert_eq!(texts, [format!("Season: {}", season.name()), HINT.to_owned()]);
        }
    }

    #[test]
    fn spring_frame_shape_count() {
        let mut tree = TreeRenderer::new(&Config::default());
        let mut rng = StdRng::seed_from_u64(9);
        let mut list = DrawList::new();

        tree.frame(0.0, &mut list, &mut rng);

        // background, ground, segments, blossoms, two lines of text
        assert_eq!(list.len(), 2 + FULL_TREE_BRANCHES + DECORATED_NODES + 2);
    }

    #[test]
    fn sketch_frame_uses_pointer_x_only() {
        let mut tree = TreeRenderer::new(&Config::default());
        let mut rng = StdRng::seed_from_u64(10);
        let mut list = DrawList::new();

        let summary = Sketch::frame(
            &mut tree,
            &PointerState::pressed_at(700.0, -300.0),
            &mut list,
            &mut rng,
        );

        assert_eq!(tree.season, Season::Winter);
        assert_eq!(
            summary,
            FrameSummary::Tree(TreeFrame {
                season: Season::Winter,
                branches: FULL_TREE_BRANCHES,
            })
        );
    }

    #[test]
    fn drawn_branches_match_config_branch_count() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut cfg = Config::default();
        cfg.tree.split_factor = 0.7;
        cfg.tree.trunk_len = 90.0;
        assert_eq!(cfg.validate(), Ok(()));

        let mut tree = TreeRenderer::new(&cfg);
        let mut list = DrawList::new();
        let stats = tree.frame(0.0, &mut list, &mut rng);

        assert_eq!(Some(stats.branches), cfg.tree.branch_count(MAX_BRANCHES));
        assert!(stats.branches <= MAX_BRANCHES);
    }
}
