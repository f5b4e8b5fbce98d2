/*
 * Simulation Parameters Module
 *
 * Runtime-adjustable parameters for the simulation, modified through the
 * UI panel. Also provides snapshot-based change detection so the app can
 * tell when the flocks need rebuilding versus a plain re-render.
 */

use crate::grid::CellType;

pub struct SimulationParams {
    pub flock_size: usize,
    pub separation_gain: f32,
    pub cohesion_gain: f32,
    pub alignment_gain: f32,
    pub neighbor_radius: f32,
    // Post-step clamp, disabled by default to match the tuned behavior
    pub enforce_speed_limit: bool,
    pub speed_limit: f32,
    pub show_flocks: bool,
    pub group_fire: bool,
    pub paused: bool,
    pub show_debug: bool,
    pub enable_parallel: bool,
    // Species painted by the mouse and the E key
    pub current_cell_type: CellType,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    flock_size: usize,
    separation_gain: f32,
    cohesion_gain: f32,
    alignment_gain: f32,
    neighbor_radius: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            flock_size: 5,
            separation_gain: 1.0,
            cohesion_gain: 1.0,
            alignment_gain: 1.0,
            neighbor_radius: 200.0,
            enforce_speed_limit: false,
            speed_limit: 30.0,
            show_flocks: true,
            group_fire: true,
            paused: true,
            show_debug: false,
            enable_parallel: false,
            current_cell_type: CellType::Red,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            flock_size: self.flock_size,
            separation_gain: self.separation_gain,
            cohesion_gain: self.cohesion_gain,
            alignment_gain: self.alignment_gain,
            neighbor_radius: self.neighbor_radius,
        });
    }

    // Returns (flock_size_changed, gains_changed) since the last snapshot.
    // A size change forces a rebuild; a gain change only needs the flocks
    // reconfigured.
    pub fn detect_changes(&self) -> (bool, bool) {
        let mut size_changed = false;
        let mut gains_changed = false;

        if let Some(prev) = &self.previous_values {
            if self.flock_size != prev.flock_size {
                size_changed = true;
            }

            if self.separation_gain != prev.separation_gain
                || self.cohesion_gain != prev.cohesion_gain
                || self.alignment_gain != prev.alignment_gain
                || self.neighbor_radius != prev.neighbor_radius
            {
                gains_changed = true;
            }
        }

        (size_changed, gains_changed)
    }

    // Parameter ranges for UI sliders
    pub fn get_flock_size_range() -> std::ops::RangeInclusive<usize> {
        1..=200
    }

    pub fn get_gain_range() -> std::ops::RangeInclusive<f32> {
        0.0..=3.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        10.0..=500.0
    }

    pub fn get_speed_limit_range() -> std::ops::RangeInclusive<f32> {
        5.0..=200.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_detection_tracks_size_and_gains() {
        let mut params = SimulationParams::default();

        // No snapshot yet: nothing reported
        assert_eq!(params.detect_changes(), (false, false));

        params.take_snapshot();
        assert_eq!(params.detect_changes(), (false, false));

        params.cohesion_gain = 2.0;
        assert_eq!(params.detect_changes(), (false, true));

        params.flock_size = 10;
        assert_eq!(params.detect_changes(), (true, true));
    }
}
