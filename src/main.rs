//! Skerry demo binary
//!
//! Builds the sailing scene — ocean, islands, ship, seagulls, bugs — and
//! hands control to the voyage simulation. Model files are loaded from
//! `assets/models/`; a missing file is logged and replaced with procedural
//! geometry so the scene always comes up.

use skerry::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = skerry::default();

    // Materials
    let scene = &mut app.app_state.scene;
    scene.add_material_rgb("ocean", 0.0, 0.12, 0.55, 0.05, 0.25);
    scene.add_material_rgb("hull", 0.42, 0.26, 0.13, 0.0, 0.8);
    scene.add_material_rgb("island", 0.45, 0.55, 0.25, 0.0, 0.95);
    scene.add_material_rgb("gull", 0.92, 0.92, 0.95, 0.0, 0.6);
    scene.add_material_rgb("bug", 0.12, 0.1, 0.08, 0.0, 0.5);

    // The ocean: one big plane under everything
    app.add_plane(400.0, 400.0, 1, 1)
        .with_material("ocean")
        .with_name("ocean");

    // Islands are placed by the simulation at initialize time
    for i in 0..3 {
        app.add_object("assets/models/island.obj")
            .with_material("island")
            .with_name(&format!("island_{i}"));
    }

    // The ship and its entourage
    app.add_object("assets/models/ship.obj")
        .with_material("hull")
        .with_name("ship")
        .with_transform([0.0, 0.0, 0.0], 1.0, 0.0);

    for gi in 0..2 {
        app.add_object("assets/models/seagull.obj")
            .with_material("gull")
            .with_name(&format!("seagull_{gi}"))
            .with_transform([0.0, 0.0, 2.0], 0.4, 0.0);

        for bi in 0..2 {
            app.add_object("assets/models/bug.obj")
                .with_material("bug")
                .with_name(&format!("bug_{gi}_{bi}"))
                .with_transform([0.0, 0.0, 2.0], 0.12, 0.0);
        }
    }

    app.attach_simulation(VoyageSimulation::new());
    app.follow_object("ship");

    app.set_ui(|ui, scene, selected_index| {
        default_transform_panel(ui, scene, selected_index);
    });

    log::info!("setting sail");
    app.run();

    Ok(())
}
