//! Obstacle kinds and their generators.

use rand::Rng;

use super::config::EngineConfig;
use super::constants::{BAND_BOTTOM, BAND_TOP, OBSTACLE_WIDTH, WORLD_WIDTH};

/// Geometry of a question obstacle: a YES slot above a solid divider above a
/// NO slot.
///
/// ```text
///   band_top ┬ solid
///   top_edge ┼ YES slot
///   mid_top  ┼ divider (solid)
/// mid_bottom ┼ NO slot
/// bottom_edge┼ solid
/// band_bottom┴
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionGate {
    pub top_edge: f64,
    pub mid_top: f64,
    pub mid_bottom: f64,
    pub bottom_edge: f64,
    /// Index of the question (within the current chapter) this gate poses.
    pub question_index: usize,
    /// The locked-in answer, `Some(true)` for YES.
    pub answer: Option<bool>,
}

impl QuestionGate {
    pub fn answered(&self) -> bool {
        self.answer.is_some()
    }

    pub fn yes_slot(&self) -> (f64, f64) {
        (self.top_edge, self.mid_top)
    }

    pub fn no_slot(&self) -> (f64, f64) {
        (self.mid_bottom, self.bottom_edge)
    }
}

/// What kind of obstacle this is, with the geometry only that kind has.
#[derive(Debug, Clone, PartialEq)]
pub enum ObstacleKind {
    /// A single corridor between two pipe bodies.
    Plain { gap_top: f64, gap_bottom: f64 },
    /// Two answer slots separated by a divider.
    Question(QuestionGate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f64,
    /// The obstacle is fully behind the bird.
    pub passed: bool,
    /// The pass-through has been credited. Never reset.
    pub scored: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn right(&self) -> f64 {
        self.x + OBSTACLE_WIDTH
    }

    pub fn is_question(&self) -> bool {
        matches!(self.kind, ObstacleKind::Question(_))
    }

    /// A question obstacle whose answer has not been locked in yet.
    pub fn is_unanswered_question(&self) -> bool {
        matches!(&self.kind, ObstacleKind::Question(gate) if !gate.answered())
    }

    pub fn off_screen(&self) -> bool {
        self.right() < 0.0
    }

    /// Vertical extents of the solid parts of this obstacle.
    pub fn solid_spans(&self) -> Vec<(f64, f64)> {
        match &self.kind {
            ObstacleKind::Plain { gap_top, gap_bottom } => {
                vec![(BAND_TOP, *gap_top), (*gap_bottom, BAND_BOTTOM)]
            }
            ObstacleKind::Question(gate) => vec![
                (BAND_TOP, gate.top_edge),
                (gate.mid_top, gate.mid_bottom),
                (gate.bottom_edge, BAND_BOTTOM),
            ],
        }
    }
}

/// A plain obstacle at `x` with its gap placed uniformly at random so the
/// whole gap (plus margin) sits inside the band.
pub fn plain_obstacle<R: Rng>(x: f64, config: &EngineConfig, rng: &mut R) -> Obstacle {
    let min_top = BAND_TOP + config.gap_margin;
    let max_top = (BAND_BOTTOM - config.gap_margin - config.pipe_gap).max(min_top);
    let gap_top = if max_top > min_top {
        rng.gen_range(min_top..=max_top)
    } else {
        min_top
    };
    Obstacle {
        x,
        passed: false,
        scored: false,
        kind: ObstacleKind::Plain {
            gap_top,
            gap_bottom: gap_top + config.pipe_gap,
        },
    }
}

/// A question obstacle at `x`. The layout is deterministic: two equal slots
/// centred in the band around the divider.
pub fn question_obstacle(x: f64, question_index: usize, config: &EngineConfig) -> Obstacle {
    let slot = config.slot_height();
    let top_edge = BAND_TOP + config.question_margin;
    let mid_top = top_edge + slot;
    let mid_bottom = mid_top + config.question_divider;
    let bottom_edge = mid_bottom + slot;
    Obstacle {
        x,
        passed: false,
        scored: false,
        kind: ObstacleKind::Question(QuestionGate {
            top_edge,
            mid_top,
            mid_bottom,
            bottom_edge,
            question_index,
            answer: None,
        }),
    }
}

/// Spawn position for new obstacles: just past the right edge.
pub fn spawn_x() -> f64 {
    WORLD_WIDTH
}

/// Whether the most recently spawned obstacle has moved far enough in for
/// another plain obstacle to follow it.
pub fn spacing_clear(obstacles: &[Obstacle], config: &EngineConfig) -> bool {
    obstacles
        .last()
        .map_or(true, |last| last.x <= spawn_x() - config.obstacle_spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_plain_gap_containment() {
        let config = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let obstacle = plain_obstacle(spawn_x(), &config, &mut rng);
            let ObstacleKind::Plain { gap_top, gap_bottom } = obstacle.kind else {
                panic!("expected plain obstacle");
            };
            assert!((gap_bottom - gap_top - config.pipe_gap).abs() < 1e-9);
            assert!(gap_top >= BAND_TOP);
            assert!(gap_bottom <= BAND_BOTTOM);
        }
    }

    #[test]
    fn test_question_slot_ordering() {
        let config = EngineConfig::default();
        let obstacle = question_obstacle(spawn_x(), 2, &config);
        let ObstacleKind::Question(gate) = obstacle.kind else {
            panic!("expected question obstacle");
        };
        assert!(BAND_TOP <= gate.top_edge);
        assert!(gate.top_edge < gate.mid_top);
        assert!(gate.mid_top < gate.mid_bottom);
        assert!(gate.mid_bottom < gate.bottom_edge);
        assert!(gate.bottom_edge <= BAND_BOTTOM);

        let yes = gate.mid_top - gate.top_edge;
        let no = gate.bottom_edge - gate.mid_bottom;
        assert!((yes - no).abs() < 1e-9);
        assert!(yes > config.pipe_gap);
        assert_eq!(gate.question_index, 2);
        assert!(!gate.answered());
    }

    #[test]
    fn test_solid_spans_cover_everything_but_openings() {
        let config = EngineConfig::default();
        let q = question_obstacle(0.0, 0, &config);
        assert_eq!(q.solid_spans().len(), 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let p = plain_obstacle(0.0, &config, &mut rng);
        assert_eq!(p.solid_spans().len(), 2);
    }

    #[test]
    fn test_spacing_clear() {
        let config = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(spacing_clear(&[], &config));

        let mut fresh = plain_obstacle(spawn_x(), &config, &mut rng);
        assert!(!spacing_clear(std::slice::from_ref(&fresh), &config));

        fresh.x = spawn_x() - config.obstacle_spacing;
        assert!(spacing_clear(&[fresh], &config));
    }

    #[test]
    fn test_off_screen_only_when_fully_left() {
        let config = EngineConfig::default();
        let mut obstacle = question_obstacle(-OBSTACLE_WIDTH + 1.0, 0, &config);
        assert!(!obstacle.off_screen());
        obstacle.x = -OBSTACLE_WIDTH - 1.0;
        assert!(obstacle.off_screen());
    }
}
