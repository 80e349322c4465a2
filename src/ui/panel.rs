//! Default UI panels
//!
//! Pre-built panels for common operations. The transform panel lists scene
//! objects and exposes position/rotation/scale editing for the selection.

use imgui::Ui;

use crate::gfx::scene::Scene;

/// Object inspector: pick a scene object and edit its transform.
///
/// Edits land in the object's `ui_transform` and reach the GPU on the next
/// frame. Objects driven by a simulation get overwritten each update, which
/// is expected: the simulation owns them.
pub fn default_transform_panel(ui: &Ui, scene: &mut Scene, selected_index: &mut Option<usize>) {
    ui.window("Scene Inspector")
        .size([300.0, 360.0], imgui::Condition::FirstUseEver)
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .build(|| {
            ui.text(format!("Objects: {}", scene.get_object_count()));
            ui.separator();

            let names = scene.get_object_names();
            for (index, name) in names.iter().enumerate() {
                let is_selected = *selected_index == Some(index);
                if ui.selectable_config(name).selected(is_selected).build() {
                    *selected_index = Some(index);
                }
            }

            ui.separator();

            if let Some(index) = *selected_index {
                if let Some(object) = scene.get_object_mut(index) {
                    ui.text(format!("Selected: {}", object.name));

                    ui.checkbox("Visible", &mut object.visible);

                    ui.input_float3("Position", &mut object.ui_transform.position)
                        .build();
                    ui.input_float3("Rotation", &mut object.ui_transform.rotation)
                        .build();
                    ui.slider("Scale", 0.01, 10.0, &mut object.ui_transform.scale);
                }
            } else {
                ui.text("Select an object to edit it");
            }
        });
}
