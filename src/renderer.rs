/*
 * Renderer Module
 *
 * View function for the simulation. Runs strictly after the frame's
 * update, so it always observes a fully stepped state: grid cells first,
 * then the flocks, the player, and any projectiles in flight, plus an
 * optional debug overlay.
 */

use nannou::prelude::*;

use crate::app::Model;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(WHITE);

    // The grid fills the window; the paused flag only tints empty cells
    model
        .grid
        .draw(&draw, window_rect, model.config.cell_size, model.params.paused);

    if model.params.show_flocks {
        model.flock_player.draw(&draw, window_rect);
        model.flock_enemy.draw(&draw, window_rect);
        model.player.draw(&draw, window_rect);
    }

    model
        .projectiles
        .draw(&draw, window_rect, model.world_extent);

    if model.params.show_debug {
        draw_debug_overlay(&draw, model, window_rect);
    }

    // Finish drawing
    draw.to_frame(app, &frame).unwrap();

    // Draw the egui UI
    model.egui.draw_to_frame(&frame).unwrap();
}

// Draw performance and population metrics in the top-left corner
fn draw_debug_overlay(draw: &Draw, model: &Model, window_rect: Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let text_x = window_rect.left() + margin + 70.0;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", model.debug_info.fps),
        format!(
            "Frame time: {:.2} ms",
            model.debug_info.frame_time.as_secs_f64() * 1000.0
        ),
        format!("Steps: {}", model.debug_info.steps),
        format!("Live cells: {}", model.debug_info.live_cells),
        format!("Projectiles: {}", model.debug_info.projectiles_in_flight),
        format!(
            "Player flock neighbors: {:?}",
            model.flock_player.neighbor_counts()
        ),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(text_x, y)
            .color(BLACK)
            .font_size(14);
    }
}
