/*
 * Debug Information Module
 *
 * Performance and population metrics displayed by the debug overlay and
 * the UI panel.
 */

use std::time::Duration;

// Debug information to display
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub live_cells: usize,
    pub projectiles_in_flight: usize,
    pub steps: u64,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            live_cells: 0,
            projectiles_in_flight: 0,
            steps: 0,
        }
    }
}
