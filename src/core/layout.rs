//! Force-directed (spring) layout
//!
//! Nutrients start on a jittered circle and a spring simulation pulls
//! interacting nutrients together while every pair repels. The result is
//! rescaled into `[-1, 1]²` so the renderer does not depend on simulation units.

use crate::config::LayoutConfig;
use crate::core::models::Network;
use crate::debug;
use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Radius of the starting circle, in simulation units
const INITIAL_RADIUS: f64 = 100.0;
/// Maximum angular jitter of a starting position, in radians
const ANGLE_JITTER: f64 = 0.25;
/// Simulation mass given to every nutrient
const NODE_MASS: f32 = 10.0;

/// A 2-D position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// The origin
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Spring simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Number of simulation steps
    pub iterations: u32,
    /// Simulated seconds per step
    pub time_step: f32,
    /// Repulsion between every pair of nodes
    pub charge: f32,
    /// Spring stiffness along edges
    pub spring: f32,
    /// Cap on the force applied to a node per step
    pub max_force: f32,
    /// Velocity scale
    pub node_speed: f32,
    /// Velocity damping per step
    pub damping: f32,
    /// Seed for the starting positions; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl LayoutParams {
    /// Build parameters from the `[layout]` config section
    #[must_use]
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            iterations: config.iterations,
            time_step: 0.016,
            charge: config.charge,
            spring: config.spring,
            max_force: 100.0,
            node_speed: 3000.0,
            damping: 0.9,
            seed: config.seed,
        }
    }

    /// Same parameters with a fixed seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Node positions, indexed like [`Network::nutrients`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: Vec<Point>,
}

impl Layout {
    /// Wrap positions that are already in layout space
    #[must_use]
    pub const fn from_positions(positions: Vec<Point>) -> Self {
        Self { positions }
    }

    /// Center raw positions on the origin and scale so the farthest coordinate is 1
    ///
    /// Non-finite coordinates collapse to the origin.
    #[must_use]
    pub fn rescaled(raw: Vec<Point>) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        let finite: Vec<Point> = raw
            .into_iter()
            .map(|p| {
                if p.x.is_finite() && p.y.is_finite() {
                    p
                } else {
                    Point::ORIGIN
                }
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let count = finite.len() as f64;
        let cx = finite.iter().map(|p| p.x).sum::<f64>() / count;
        let cy = finite.iter().map(|p| p.y).sum::<f64>() / count;
        let extent = finite
            .iter()
            .map(|p| (p.x - cx).abs().max((p.y - cy).abs()))
            .fold(0.0_f64, f64::max);

        let positions = finite
            .into_iter()
            .map(|p| {
                if extent > f64::EPSILON {
                    Point::new((p.x - cx) / extent, (p.y - cy) / extent)
                } else {
                    Point::ORIGIN
                }
            })
            .collect();
        Self { positions }
    }

    /// Position of the nutrient at `index`
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }

    /// All positions
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Number of positioned nutrients
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when no nutrient was positioned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Spring layout engine backed by `force_graph`
#[derive(Debug, Clone, Default)]
pub struct ForceLayout {
    params: LayoutParams,
}

impl ForceLayout {
    /// Create a layout engine
    #[must_use]
    pub const fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Compute a position for every nutrient in `network`
    #[must_use]
    pub fn compute(&self, network: &Network) -> Layout {
        let count = network.nutrient_count();
        match count {
            0 => return Layout::default(),
            1 => return Layout::from_positions(vec![Point::ORIGIN]),
            _ => {}
        }

        let mut rng = self
            .params
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut graph: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
            force_charge: self.params.charge,
            force_spring: self.params.spring,
            force_max: self.params.max_force,
            node_speed: self.params.node_speed,
            damping_factor: self.params.damping,
        });

        #[allow(clippy::cast_precision_loss)]
        let step = 2.0 * PI / count as f64;
        let mut indices = Vec::with_capacity(count);
        for i in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let angle = (i as f64).mul_add(step, rng.gen_range(-ANGLE_JITTER..ANGLE_JITTER));
            let radius = INITIAL_RADIUS * rng.gen_range(0.85..1.15);
            #[allow(clippy::cast_possible_truncation)]
            let idx = graph.add_node(NodeData {
                x: (radius * angle.cos()) as f32,
                y: (radius * angle.sin()) as f32,
                mass: NODE_MASS,
                is_anchor: false,
                user_data: i,
            });
            indices.push(idx);
        }

        for interaction in network.interactions() {
            if let Some((source, target)) = network.endpoints(interaction) {
                if source != target {
                    graph.add_edge(indices[source], indices[target], EdgeData::default());
                }
            }
        }

        for _ in 0..self.params.iterations {
            graph.update(self.params.time_step);
        }

        let mut raw = vec![Point::ORIGIN; count];
        graph.visit_nodes(|node| {
            raw[node.data.user_data] = Point::new(f64::from(node.x()), f64::from(node.y()));
        });

        debug!(
            "Layout computed for {count} nutrients over {} iterations (seed: {:?})",
            self.params.iterations, self.params.seed
        );

        Layout::rescaled(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;

    fn network() -> Network {
        Dataset::builtin().into_network().unwrap()
    }

    #[test]
    fn test_every_nutrient_is_positioned_in_unit_box() {
        let network = network();
        let layout = ForceLayout::new(LayoutParams::default().with_seed(42)).compute(&network);
        assert_eq!(layout.len(), network.nutrient_count());
        for p in layout.positions() {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert!(p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_positions() {
        let network = network();
        let engine = ForceLayout::new(LayoutParams::default().with_seed(7));
        let first = engine.compute(&network);
        let second = engine.compute(&network);
        for (a, b) in first.positions().iter().zip(second.positions()) {
            assert!(a.distance(*b) < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_networks() {
        let empty = Dataset::default().into_network().unwrap();
        assert!(ForceLayout::default().compute(&empty).is_empty());

        let single = Dataset::from_toml("[[nutrients]]\nname = \"Boron (B)\"\n")
            .unwrap()
            .into_network()
            .unwrap();
        let layout = ForceLayout::default().compute(&single);
        assert_eq!(layout.position(0), Some(Point::ORIGIN));
    }

    #[test]
    fn test_rescaled_handles_non_finite_and_coincident() {
        let layout = Layout::rescaled(vec![
            Point::new(f64::NAN, 1.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(layout.positions(), &[Point::ORIGIN, Point::ORIGIN]);

        let layout = Layout::rescaled(vec![Point::new(-4.0, 0.0), Point::new(4.0, 2.0)]);
        assert!((layout.positions()[0].x + 1.0).abs() < 1e-12);
        assert!((layout.positions()[1].x - 1.0).abs() < 1e-12);
    }
}
