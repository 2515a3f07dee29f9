//! Procedural scalar-field pattern library for the ASCII backdrop.
//!
//! Every pattern is a pure function of `(x, y, t, w, h)` returning a value
//! roughly in `[-1, 1]`; the renderer maps it onto a density ramp. Patterns
//! are swappable: the renderer only ever sees the `PatternFn` type.

/// Pluggable scalar field sampled per character cell.
pub type PatternFn = fn(x: f64, y: f64, t: f64, w: f64, h: f64) -> f64;

/// Named registry in presentation order. Lookup misses fall back to
/// [`FALLBACK_PATTERN`].
pub const PATTERNS: &[(&str, PatternFn)] = &[
    ("museum", museum),
    ("temporal", temporal),
    ("inventory", inventory),
    ("aether", aether),
    ("echoes", echoes),
    ("wraiths", wraiths),
    ("satchel", satchel),
    ("distortion", distortion),
];

pub const FALLBACK_PATTERN: &str = "inventory";

/// Finds a pattern by name.
pub fn lookup(name: &str) -> Option<PatternFn> {
    PATTERNS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, func)| *func)
}

fn museum(x: f64, y: f64, t: f64, _w: f64, _h: f64) -> f64 {
    let tile_x = (x / 8.0).floor();
    let tile_y = (y / 6.0).floor();
    let checkerboard = if (tile_x + tile_y) as i64 % 2 != 0 {
        0.3
    } else {
        -0.3
    };
    let ornament = (tile_x * 0.5 + t * 0.08).sin() * (tile_y * 0.4 + t * 0.06).cos() * 0.4;
    let hum = (x * 0.02 + y * 0.025 + t * 0.03).sin() * 0.15;
    checkerboard + ornament + hum
}

fn temporal(x: f64, y: f64, t: f64, _w: f64, _h: f64) -> f64 {
    let flow_forward = (x * 0.3 - t * 0.8).sin() * (y * 0.2).cos();
    let flow_backward = (x * 0.3 + t * 0.8).sin() * (y * 0.2).cos() * 0.5;
    let time_ripples = ((x + y) * 0.2 + t * 0.4).sin() * 0.3;
    flow_forward * 0.6 + flow_backward + time_ripples
}

fn inventory(x: f64, y: f64, t: f64, _w: f64, _h: f64) -> f64 {
    let soft_motes = (x * 0.15 + t * 0.08).sin() * (y * 0.12 + t * 0.06).sin() * 0.3;
    let distant_drift = (x * 0.07 + t * 0.05).sin() * 0.2;
    let faint_scatter = (y * 0.09 - t * 0.04).sin() * 0.25;
    let whisper = ((x * 0.2 + y * 0.18) + t * 0.03).sin() * 0.15;
    soft_motes + distant_drift + faint_scatter + whisper
}

fn aether(x: f64, y: f64, t: f64, w: f64, h: f64) -> f64 {
    let dx = x - w / 2.0;
    let dy = y - h / 2.0;
    let dist = (dx * dx + dy * dy).sqrt();
    let resonance1 = (dist * 0.3 - t * 1.5).sin() * (-dist * 0.03).exp();
    let resonance2 = (dist * 0.2 - t * 1.2).cos() * (-dist * 0.04).exp();
    let harmonics = (dist * 0.6 - t * 2.0).sin() * 0.3;
    let interference = (dx * 0.4 + t * 0.8).sin() * (dy * 0.4 + t * 0.6).cos();
    resonance1 * 0.6 + resonance2 * 0.4 + harmonics + interference * 0.2
}

fn echoes(x: f64, y: f64, t: f64, w: f64, h: f64) -> f64 {
    let dx = x - w / 2.0;
    let dy = y - h / 2.0;
    let dist = (dx * dx + dy * dy).sqrt();
    let echo1 = (dist * 0.3 - t * 1.5).sin() * (-dist * 0.03).exp();
    let echo2 = (dist * 0.3 - t * 1.5 + 2.0).sin() * (-dist * 0.05).exp() * 0.7;
    let echo3 = (dist * 0.3 - t * 1.5 + 4.0).sin() * (-dist * 0.07).exp() * 0.4;
    let strata = (y * 0.4 + x * 0.1 + t * 0.2).sin() * (y * 0.2 - t * 0.1).cos();
    let interference = (x * 0.2 + t * 0.3).sin() * (y * 0.25 - t * 0.25).cos();
    echo1 + echo2 + echo3 + strata * 0.3 + interference * 0.2
}

fn wraiths(x: f64, y: f64, t: f64, w: f64, h: f64) -> f64 {
    let d1 = (x - w / 3.0).powi(2) + (y - h / 2.0).powi(2);
    let d2 = (x - 2.0 * w / 3.0).powi(2) + (y - h / 3.0).powi(2);
    let drift1 = (x * 0.1 + y * 0.05 + t * 0.4).sin() * (-d1 * 0.001).exp();
    let drift2 = (x * 0.08 - y * 0.06 + t * 0.6).cos() * (-d2 * 0.001).exp();
    let wisp = ((x + y) * 0.3 + t * 0.8).sin() * (t * 0.5).sin() * 0.3;
    drift1 * 0.4 + drift2 * 0.4 + wisp
}

fn satchel(x: f64, y: f64, t: f64, _w: f64, _h: f64) -> f64 {
    let warp = (x * 0.8 + t * 0.1).sin();
    let weft = (y * 0.8 - t * 0.1).cos();
    let sag = (x * 0.1 + y * 0.1 + t * 0.2).sin() * 0.3;
    (warp * weft) * 0.3 + sag - 0.2
}

fn distortion(x: f64, y: f64, t: f64, w: f64, h: f64) -> f64 {
    let dx = x - w / 2.0;
    let dy = y - h / 2.0;
    let dist = (dx * dx + dy * dy).sqrt();
    let warp_x = x + (y * 0.3 + t * 0.8).sin() * 3.0;
    let warp_y = y + (x * 0.2 + t * 0.6).cos() * 2.0;
    let grid = (warp_x * 0.4).sin() * (warp_y * 0.3).cos();
    let vortex = (dist * 0.2 + t * 2.0).sin() * (-dist * 0.08).exp();
    let spiral = (dy.atan2(dx) * 4.0 + dist * 0.1 - t * 1.2).sin();
    let stream1 = (x * 0.15 + y * 0.1 - t * 1.0).sin() * (x * 0.1 - y * 0.2 + t * 0.7).cos();
    let stream2 = (x * 0.12 - y * 0.15 + t * 0.9).cos() * (y * 0.08 + t * 0.5).sin();
    let fracture = ((x + y) * 0.25 + t * 0.4).sin() * ((x - y) * 0.2 - t * 0.3).cos();
    grid * 0.3 + vortex * spiral * 0.4 + stream1 * 0.15 + stream2 * 0.1 + fracture * 0.05
}
