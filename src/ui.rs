/*
 * UI Module
 *
 * The nannou_egui control panel: flock tuning, grid controls, and
 * performance readouts. Parameter change detection is handled by the
 * SimulationParams snapshot; this module only renders widgets and reports
 * button presses.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::grid::CellType;
use crate::params::SimulationParams;

// Update the UI and return whether the flocks and/or the grid should be reset
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, bool) {
    let mut reset_flocks = false;
    let mut reset_grid = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flock Parameters", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.flock_size,
                        SimulationParams::get_flock_size_range(),
                    )
                    .text("Agents per Flock"),
                );

                if ui.button("Reset Flocks").clicked() {
                    reset_flocks = true;
                }

                ui.add(
                    egui::Slider::new(
                        &mut params.separation_gain,
                        SimulationParams::get_gain_range(),
                    )
                    .text("Separation Gain"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.cohesion_gain,
                        SimulationParams::get_gain_range(),
                    )
                    .text("Cohesion Gain"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.alignment_gain,
                        SimulationParams::get_gain_range(),
                    )
                    .text("Alignment Gain"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.neighbor_radius,
                        SimulationParams::get_radius_range(),
                    )
                    .text("Neighbor Radius"),
                );

                ui.checkbox(&mut params.enforce_speed_limit, "Enforce Speed Limit");
                ui.add(
                    egui::Slider::new(
                        &mut params.speed_limit,
                        SimulationParams::get_speed_limit_range(),
                    )
                    .text("Speed Limit"),
                );
            });

            ui.collapsing("Grid Controls", |ui| {
                ui.label("Painted species:");
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut params.current_cell_type, CellType::Red, "Red");
                    ui.selectable_value(&mut params.current_cell_type, CellType::Blue, "Blue");
                    ui.selectable_value(&mut params.current_cell_type, CellType::Green, "Green");
                    ui.selectable_value(&mut params.current_cell_type, CellType::Yellow, "Yellow");
                });

                if ui.button("Reset Grid").clicked() {
                    reset_grid = true;
                }

                ui.checkbox(&mut params.paused, "Pause Grid");
            });

            ui.collapsing("Performance", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Parallel Pairwise Math");
                ui.separator();
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!(
                    "Frame time: {:.2} ms",
                    debug_info.frame_time.as_secs_f64() * 1000.0
                ));
                ui.label(format!("Live cells: {}", debug_info.live_cells));
                ui.label(format!(
                    "Projectiles: {}",
                    debug_info.projectiles_in_flight
                ));
            });

            ui.checkbox(&mut params.show_flocks, "Show Flocks");
            ui.checkbox(&mut params.group_fire, "Group Fire");
            ui.checkbox(&mut params.show_debug, "Show Debug Info");
        });

    (reset_flocks, reset_grid)
}
