//! Animated ASCII-art background renderer.
//!
//! # Responsibility
//! - Render a full-screen text grid from a pluggable scalar field.
//! - Own the frame clock and pattern selection.
//!
//! # Invariants
//! - Rendering is a pure function of (pattern, frame, viewport); the host
//!   drives frames from its own repaint loop.
//! - Unknown pattern names fall back to the `inventory` field rather than
//!   failing.

pub mod patterns;

use crate::geometry::Viewport;
use patterns::{lookup, PatternFn, FALLBACK_PATTERN, PATTERNS};
use rand::Rng;

const DEFAULT_FONT_SIZE: f64 = 14.0;
const DEFAULT_SPEED: f64 = 8.0;
/// Monospace glyphs are narrower than tall.
const CHAR_ASPECT: f64 = 0.6;
/// Extra columns so the grid overshoots the right edge.
const OVERSCAN_COLS: usize = 10;

/// Density ramp from dense to empty.
const RAMP: &[(f64, char)] = &[
    (0.8, '\u{2588}'),
    (0.5, '\u{2593}'),
    (0.2, '\u{2592}'),
    (-0.2, '\u{2591}'),
    (-0.5, '\u{b7}'),
];

/// Character-grid dimensions for a viewport at a given font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

/// Full-screen animated text-grid renderer.
pub struct Backdrop {
    pattern_name: String,
    font_size: f64,
    speed: f64,
    frame: u64,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            pattern_name: FALLBACK_PATTERN.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            speed: DEFAULT_SPEED,
            frame: 0,
        }
    }

    pub fn pattern_name(&self) -> &str {
        &self.pattern_name
    }

    pub fn set_pattern(&mut self, name: impl Into<String>) {
        self.pattern_name = name.into();
    }

    /// Picks a random registered pattern.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        let (name, _) = PATTERNS[rng.random_range(0..PATTERNS.len())];
        self.pattern_name = name.to_string();
    }

    pub fn set_font_size(&mut self, font_size: f64) {
        self.font_size = font_size;
    }

    /// Advances the frame clock by one tick.
    pub fn advance(&mut self) {
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Grid dimensions for the viewport, with right-edge overscan.
    pub fn grid_size(&self, viewport: Viewport) -> GridSize {
        let char_width = self.font_size * CHAR_ASPECT;
        let cols = (viewport.width / char_width).ceil() as usize + OVERSCAN_COLS;
        let rows = (viewport.height / self.font_size).ceil() as usize;
        GridSize { cols, rows }
    }

    fn time(&self) -> f64 {
        (self.frame as f64 * std::f64::consts::PI) / (60.0 * self.speed)
    }

    fn pattern(&self) -> PatternFn {
        lookup(&self.pattern_name)
            .or_else(|| lookup(FALLBACK_PATTERN))
            .expect("fallback pattern is registered")
    }

    /// Renders the current frame as newline-separated rows.
    pub fn render_frame(&self, viewport: Viewport) -> String {
        let GridSize { cols, rows } = self.grid_size(viewport);
        let t = self.time();
        let field = self.pattern();

        let mut out = String::with_capacity((cols + 1) * rows);
        for y in 0..rows {
            for x in 0..cols {
                let value = field(x as f64, y as f64, t, cols as f64, rows as f64);
                out.push(ramp_char(value));
            }
            out.push('\n');
        }
        out
    }
}

fn ramp_char(value: f64) -> char {
    for (threshold, glyph) in RAMP {
        if value > *threshold {
            return *glyph;
        }
    }
    ' '
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VP: Viewport = Viewport {
        width: 840.0,
        height: 280.0,
    };

    #[test]
    fn grid_size_matches_font_metrics() {
        let backdrop = Backdrop::new();
        let size = backdrop.grid_size(VP);
        // 840 / (14 * 0.6) = 100 cols + 10 overscan; 280 / 14 = 20 rows.
        assert_eq!(size.cols, 110);
        assert_eq!(size.rows, 20);
    }

    #[test]
    fn larger_font_coarsens_the_grid() {
        let mut backdrop = Backdrop::new();
        let fine = backdrop.grid_size(VP);
        backdrop.set_font_size(28.0);
        let coarse = backdrop.grid_size(VP);
        // 840 / (28 * 0.6) = 50 cols + 10 overscan; 280 / 28 = 10 rows.
        assert_eq!(coarse.cols, 60);
        assert_eq!(coarse.rows, 10);
        assert!(coarse.cols < fine.cols && coarse.rows < fine.rows);
    }

    #[test]
    fn render_covers_the_whole_grid_with_ramp_glyphs() {
        let backdrop = Backdrop::new();
        let size = backdrop.grid_size(VP);
        let frame = backdrop.render_frame(VP);

        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), size.rows);
        for line in &lines {
            assert_eq!(line.chars().count(), size.cols);
            for glyph in line.chars() {
                assert!(
                    matches!(
                        glyph,
                        '\u{2588}' | '\u{2593}' | '\u{2592}' | '\u{2591}' | '\u{b7}' | ' '
                    ),
                    "unexpected glyph {glyph:?}"
                );
            }
        }
    }

    #[test]
    fn same_frame_renders_identically() {
        let mut backdrop = Backdrop::new();
        backdrop.set_pattern("aether");
        backdrop.advance();
        assert_eq!(backdrop.render_frame(VP), backdrop.render_frame(VP));
    }

    #[test]
    fn advancing_changes_the_animation() {
        let mut backdrop = Backdrop::new();
        backdrop.set_pattern("temporal");
        let before = backdrop.render_frame(VP);
        for _ in 0..30 {
            backdrop.advance();
        }
        assert_ne!(before, backdrop.render_frame(VP));
    }

    #[test]
    fn unknown_pattern_falls_back_to_inventory() {
        let mut named = Backdrop::new();
        named.set_pattern("inventory");
        let mut unknown = Backdrop::new();
        unknown.set_pattern("does-not-exist");
        assert_eq!(named.render_frame(VP), unknown.render_frame(VP));
    }

    #[test]
    fn randomize_picks_a_registered_pattern() {
        let mut backdrop = Backdrop::new();
        let mut rng = StdRng::seed_from_u64(7);
        backdrop.randomize(&mut rng);
        assert!(patterns::lookup(backdrop.pattern_name()).is_some());
    }

    #[test]
    fn ramp_thresholds_are_exclusive() {
        assert_eq!(ramp_char(0.9), '\u{2588}');
        assert_eq!(ramp_char(0.8), '\u{2593}');
        assert_eq!(ramp_char(0.0), '\u{2591}');
        assert_eq!(ramp_char(-0.4), '\u{b7}');
        assert_eq!(ramp_char(-0.9), ' ');
    }
}
