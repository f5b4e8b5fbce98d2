/*
 * Flocklife
 *
 * A competitive cellular automaton sharing its frame loop with two
 * flocking agent squads and projectile fire. The player steers a point
 * agent with WASD, paints automaton cells, and leads a squad that the
 * enemy squad pursues.
 */

use flocklife::app;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}
