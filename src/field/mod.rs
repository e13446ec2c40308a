use bevy::prelude::*;

pub mod particle;
pub mod simulation;
pub mod systems;

pub use particle::Particle;
pub use simulation::{Connection, ParticleField, link_alpha};
pub use systems::FieldControl;

use systems::{keyboard_controls, repaint_connections, setup_field, step_field, sync_surface};

/// Plug this into your App with `.add_plugins(FieldPlugin)`.
pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FieldControl>()
            // Build the field from the primary window + spawn its visuals
            .add_systems(Startup, setup_field)
            .add_systems(
                Update,
                (
                    // Rebuild on window resize, then drift, then repaint the
                    // lines from the positions the discs render at.
                    sync_surface,
                    step_field.after(sync_surface),
                    repaint_connections.after(step_field),
                    keyboard_controls,
                ),
            );
    }
}
