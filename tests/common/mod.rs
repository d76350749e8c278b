//! Shared setup for integration tests

use std::sync::Once;

use pin_layout::canvas::{Canvas, CanvasConfig, ElementId, Rect};
use tracing_subscriber::EnvFilter;

static TEST_SETUP: Once = Once::new();

/// Install a log subscriber once per test binary; `RUST_LOG` picks the level
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        if let Err(e) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
        {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
    });
}

/// A canvas with a 300 x 200 root at the origin
#[allow(dead_code)]
pub fn canvas_with_root(config: CanvasConfig) -> (Canvas, ElementId) {
    init_test_setup();
    let mut canvas = Canvas::with_config(config);
    let root = canvas.element_with_frame("root", Rect::new(0.0, 0.0, 300.0, 200.0));
    (canvas, root)
}

#[allow(dead_code)]
pub fn assert_frame(canvas: &Canvas, element: ElementId, expected: Rect) {
    let actual = canvas.frame(element);
    assert!(
        actual.approx_eq(&expected, 0.001),
        "{}: expected {}, got {}",
        canvas.name(element),
        expected,
        actual
    );
}
