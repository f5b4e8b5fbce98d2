/*
 * Input Module
 *
 * Key and mouse handling for the simulation window:
 * - digits 0-4 select the painted species
 * - R resets the grid, P toggles pause, Q quits, B toggles the flocks
 * - E places/removes a cell at the player's grid position
 * - Space fires a projectile volley
 * - left mouse paints a cell, middle mouse erases one of the selected
 *   species
 *
 * Rejected placements (outside the grid) are logged and dropped; they are
 * never fatal.
 */

use nannou::prelude::*;

use crate::app::{self, Model};
use crate::grid::CellType;

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Key0 => model.params.current_cell_type = CellType::Empty,
        Key::Key1 => model.params.current_cell_type = CellType::Red,
        Key::Key2 => model.params.current_cell_type = CellType::Blue,
        Key::Key3 => model.params.current_cell_type = CellType::Green,
        Key::Key4 => model.params.current_cell_type = CellType::Yellow,
        Key::R => {
            model.grid.reset();
            log::info!("grid reset");
        }
        Key::P => model.params.paused = !model.params.paused,
        Key::B => model.params.show_flocks = !model.params.show_flocks,
        Key::Q => app.quit(),
        Key::E => toggle_cell_at_player(model),
        Key::Space => app::fire(model),
        _ => {}
    }
}

// Place or clear a cell in the grid square the player is standing on:
// empty cells take the selected species, cells of the selected species are
// cleared, and other species are left alone.
fn toggle_cell_at_player(model: &mut Model) {
    let x = (model.player.position.x / model.config.cell_size) as usize;
    let y = (model.player.position.y / model.config.cell_size) as usize;

    let result = match model.grid.cell(x, y) {
        Some(CellType::Empty) => model.grid.place_cell(x, y, model.params.current_cell_type),
        Some(current) if current == model.params.current_cell_type => {
            model.grid.remove_cell(x, y)
        }
        Some(_) => Ok(()),
        None => model.grid.place_cell(x, y, model.params.current_cell_type),
    };

    if let Err(e) = result {
        log::debug!("placement rejected: {}", e);
    }
}

// Mouse pressed event handler: paint with left, erase with middle
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    // Ignore clicks that land on the UI panel
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let window_rect = app.window_rect();
    let mouse = app.mouse.position();

    // Window coordinates are centered; grid coordinates start top-left
    let gx = (mouse.x - window_rect.left()) / model.config.cell_size;
    let gy = (window_rect.top() - mouse.y) / model.config.cell_size;
    if gx < 0.0 || gy < 0.0 {
        return;
    }
    let (x, y) = (gx as usize, gy as usize);

    let result = match button {
        MouseButton::Left => model.grid.place_cell(x, y, model.params.current_cell_type),
        MouseButton::Middle => match model.grid.cell(x, y) {
            Some(current) if current == model.params.current_cell_type => {
                model.grid.remove_cell(x, y)
            }
            _ => Ok(()),
        },
        _ => Ok(()),
    };

    if let Err(e) = result {
        log::debug!("placement rejected: {}", e);
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
