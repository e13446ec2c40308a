use bevy::prelude::*;

use particle_field::field::FieldPlugin;

fn main() {
    App::new()
        // Solid black background; this is also the per-frame surface clear
        // the repaint contract relies on
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "particle field".into(),
                ..default()
            }),
            ..default()
        }))
        // The ambient particle backdrop
        .add_plugins(FieldPlugin)
        .run();
}
