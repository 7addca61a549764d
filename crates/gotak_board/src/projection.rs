//! Maps board cells and stack heights to screen points.
//!
//! The projection is affine in the cell coordinates, so neighbouring cells
//! are always a constant offset apart and the map can be inverted for
//! hit-testing. Stones higher in a stack are lifted towards the top of the
//! screen by a fixed step; above the visible height the step is halved so
//! tall stacks stay strictly ordered without growing off the canvas.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Point on the drawing canvas. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, new)]
pub struct ScreenPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

/// How the board is laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Straight grid: file along x, rank along y.
    Orthogonal,
    /// Diamond layout with shape factors `kx` and `ky`.
    Isometric {
        /// Horizontal shape factor.
        kx: f64,
        /// Vertical shape factor.
        ky: f64,
    },
}

impl ProjectionMode {
    /// The isometric layout used by the board view.
    pub const ISOMETRIC: ProjectionMode = ProjectionMode::Isometric { kx: 0.5, ky: 0.25 };
}

/// Tile geometry for a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct TileMetrics {
    /// Width of one tile.
    tile_width: f64,
    /// Height of one tile.
    tile_height: f64,
    /// Canvas point that cell `a1` maps to.
    origin: ScreenPoint,
    /// Lift applied per stone in a stack.
    stone_height: f64,
    /// Stones drawn at the full lift before the step is compressed.
    max_visible_stack: usize,
}

impl TileMetrics {
    /// Ratio of the canvas one board square takes, leaving a margin.
    const SQUARE_SCALE: f64 = 1.2;
    /// Per-stone lift on a square canvas.
    const STONE_LIFT: f64 = 6.0;
    /// Stones shown at full lift.
    const VISIBLE_STACK: usize = 10;

    /// Metrics for a square canvas of `canvas` units showing a board of
    /// `board_size` cells, origin at the canvas centre.
    #[instrument]
    pub fn for_canvas(canvas: f64, board_size: u8) -> Self {
        let square = canvas / (f64::from(board_size.max(1)) * Self::SQUARE_SCALE);
        Self {
            tile_width: square,
            tile_height: square,
            origin: ScreenPoint::new(canvas / 2.0, canvas / 2.0),
            stone_height: Self::STONE_LIFT,
            max_visible_stack: Self::VISIBLE_STACK,
        }
    }
}

/// Pure cell-to-screen projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct Projector {
    /// Layout mode.
    mode: ProjectionMode,
    /// Tile geometry.
    metrics: TileMetrics,
}

impl Projector {
    /// Screen position of the stone at `stack_index` (0 = bottom) on cell
    /// `(x, y)`.
    #[instrument(level = "trace", skip(self))]
    pub fn project(&self, x: u8, y: u8, stack_index: usize) -> ScreenPoint {
        let base = self.base(f64::from(x), f64::from(y));
        ScreenPoint::new(base.x, base.y - self.lift(stack_index))
    }

    /// Cell under a screen point, treating the point as a stack base.
    ///
    /// Rounds to the nearest cell; `None` if that cell is off a board of
    /// `board_size`.
    #[instrument(level = "trace", skip(self))]
    pub fn pick(&self, point: ScreenPoint, board_size: u8) -> Option<(u8, u8)> {
        let m = &self.metrics;
        let dx = point.x - m.origin.x;
        let dy = point.y - m.origin.y;

        let (fx, fy) = match self.mode {
            ProjectionMode::Orthogonal => (dx / m.tile_width, dy / m.tile_height),
            ProjectionMode::Isometric { kx, ky } => {
                let diff = dx / (m.tile_width * kx);
                let sum = dy / (m.tile_height * ky);
                ((sum + diff) / 2.0, (sum - diff) / 2.0)
            }
        };

        let (x, y) = (fx.round(), fy.round());
        let limit = f64::from(board_size);
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 || x >= limit || y >= limit {
            return None;
        }
        Some((x as u8, y as u8))
    }

    fn base(&self, x: f64, y: f64) -> ScreenPoint {
        let m = &self.metrics;
        match self.mode {
            ProjectionMode::Orthogonal => {
                ScreenPoint::new(m.origin.x + x * m.tile_width, m.origin.y + y * m.tile_height)
            }
            ProjectionMode::Isometric { kx, ky } => ScreenPoint::new(
                m.origin.x + (x - y) * m.tile_width * kx,
                m.origin.y + (x + y) * m.tile_height * ky,
            ),
        }
    }

    /// Total upward offset of a stack position.
    fn lift(&self, stack_index: usize) -> f64 {
        let m = &self.metrics;
        let full = stack_index.min(m.max_visible_stack);
        let compressed = stack_index - full;
        full as f64 * m.stone_height + compressed as f64 * m.stone_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn metrics() -> TileMetrics {
        TileMetrics::new(64.0, 48.0, ScreenPoint::new(200.0, 100.0), 6.0, 4)
    }

    fn projectors() -> [Projector; 3] {
        [
            Projector::new(ProjectionMode::Orthogonal, metrics()),
            Projector::new(ProjectionMode::ISOMETRIC, metrics()),
            Projector::new(ProjectionMode::Isometric { kx: 0.5, ky: 0.5 }, metrics()),
        ]
    }

    fn close(a: ScreenPoint, b: ScreenPoint) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_orthogonal_formula() {
        let p = Projector::new(ProjectionMode::Orthogonal, metrics());
        assert!(close(p.project(0, 0, 0), ScreenPoint::new(200.0, 100.0)));
        assert!(close(p.project(2, 3, 0), ScreenPoint::new(328.0, 244.0)));
    }

    #[test]
    fn test_isometric_formula() {
        let p = Projector::new(ProjectionMode::ISOMETRIC, metrics());
        // (3 - 1) * 64 * 0.5 = 64, (3 + 1) * 48 * 0.25 = 48
        assert!(close(p.project(3, 1, 0), ScreenPoint::new(264.0, 148.0)));
    }

    #[test]
    fn test_neighbour_offsets_are_constant() {
        for p in projectors() {
            let step_x = {
                let a = p.project(0, 0, 0);
                let b = p.project(1, 0, 0);
                (b.x - a.x, b.y - a.y)
            };
            let step_y = {
                let a = p.project(0, 0, 0);
                let b = p.project(0, 1, 0);
                (b.x - a.x, b.y - a.y)
            };
            for x in 0..7u8 {
                for y in 0..7u8 {
                    let here = p.project(x, y, 0);
                    let right = p.project(x + 1, y, 0);
                    let up = p.project(x, y + 1, 0);
                    assert!((right.x - here.x - step_x.0).abs() < EPS);
                    assert!((right.y - here.y - step_x.1).abs() < EPS);
                    assert!((up.x - here.x - step_y.0).abs() < EPS);
                    assert!((up.y - here.y - step_y.1).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn test_stack_rises_strictly() {
        for p in projectors() {
            for (x, y) in [(0, 0), (2, 4), (7, 7)] {
                let mut previous = p.project(x, y, 0);
                for index in 1..20 {
                    let next = p.project(x, y, index);
                    assert!(next.y < previous.y, "stack index {} did not rise", index);
                    assert!((next.x - previous.x).abs() < EPS);
                    previous = next;
                }
            }
        }
    }

    #[test]
    fn test_step_halves_above_visible_height() {
        let p = Projector::new(ProjectionMode::Orthogonal, metrics());
        let at = |i| p.project(1, 1, i).y;
        assert!((at(3) - at(4) - 6.0).abs() < EPS);
        assert!((at(4) - at(5) - 3.0).abs() < EPS);
        assert!((at(9) - at(10) - 3.0).abs() < EPS);
    }

    #[test]
    fn test_projection_is_deterministic() {
        for p in projectors() {
            assert_eq!(p.project(3, 2, 5), p.project(3, 2, 5));
        }
    }

    #[test]
    fn test_pick_inverts_project() {
        for p in projectors() {
            for x in 0..6u8 {
                for y in 0..6u8 {
                    let mut point = p.project(x, y, 0);
                    point.x += 3.0;
                    point.y -= 2.0;
                    assert_eq!(p.pick(point, 6), Some((x, y)));
                }
            }
        }
    }

    #[test]
    fn test_pick_outside_board() {
        let p = Projector::new(ProjectionMode::Orthogonal, metrics());
        assert_eq!(p.pick(p.project(6, 0, 0), 6), None);
        assert_eq!(p.pick(ScreenPoint::new(0.0, 0.0), 6), None);
    }

    #[test]
    fn test_canvas_metrics() {
        let m = TileMetrics::for_canvas(360.0, 5);
        assert!((m.tile_width() - 60.0).abs() < EPS);
        assert_eq!(*m.origin(), ScreenPoint::new(180.0, 180.0));
        assert_eq!(*m.stone_height(), 6.0);
    }
}
