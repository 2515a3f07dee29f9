//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `padboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use padboard_core::{Backdrop, Viewport};

fn main() {
    println!("padboard_core version={}", padboard_core::core_version());

    // Deterministic probe: pattern, frame and viewport are fixed, so the
    // rendered grid is stable across runs.
    let viewport = Viewport {
        width: 480.0,
        height: 112.0,
    };
    let mut backdrop = Backdrop::new();
    backdrop.set_pattern("aether");
    for _ in 0..12 {
        backdrop.advance();
    }
    print!("{}", backdrop.render_frame(viewport));
}
