use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy::sprite_render::AlphaMode2d;
use bevy::window::PrimaryWindow;
use tracing::debug;

use super::simulation::ParticleField;
use crate::config::{FIELD_COLOR, LINE_Z, PARTICLE_ALPHA, PARTICLE_Z};

/// Marker + index of the disc entity mirroring `field.particles()[i]`.
#[derive(Component)]
pub struct ParticleDot(pub usize);

/// Marker for the single persistent connection-line mesh entity.
#[derive(Component)]
pub struct ConnectionMesh;

/// Gate for the per-frame step: the explicit start/stop seam. The field
/// keeps repainting while paused, it just stops drifting.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FieldControl {
    pub running: bool,
}

impl Default for FieldControl {
    fn default() -> Self {
        Self { running: true }
    }
}

/// Shared handles for the disc visuals: one unit circle scaled per particle,
/// one translucent material.
#[derive(Resource)]
pub struct DotAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<ColorMaterial>,
}

/// Build the field from the primary window and spawn everything it draws
/// with. No window means no field; the app just shows the clear color.
pub fn setup_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    commands.spawn(Camera2d);

    let Ok(win) = windows.single() else {
        return;
    };

    let mut field = ParticleField::new(win.width(), win.height());
    field.init(&mut rand::rng());

    let assets = DotAssets {
        mesh: meshes.add(Circle::new(1.0)),
        material: materials.add(FIELD_COLOR.with_alpha(PARTICLE_ALPHA)),
    };
    spawn_dots(&mut commands, &field, &assets);

    // One persistent line mesh; repaint_connections rewrites its vertex
    // buffers every frame (positions + per-line vertex-color alpha).
    let line_mesh = meshes.add(empty_line_mesh());
    let line_material = materials.add(connection_material());
    commands.spawn((
        ConnectionMesh,
        Mesh2d(line_mesh),
        MeshMaterial2d(line_material),
        Transform::from_xyz(0.0, 0.0, LINE_Z),
    ));

    commands.insert_resource(assets);
    commands.insert_resource(field);
}

/// Keep the surface in step with the window (resizes / DPI changes).
/// A changed size rebuilds the whole population, radii included, so the
/// discs respawn; an unchanged size is a no-op.
pub fn sync_surface(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    field: Option<ResMut<ParticleField>>,
    assets: Option<Res<DotAssets>>,
    dots: Query<Entity, With<ParticleDot>>,
) {
    let (Some(mut field), Some(assets)) = (field, assets) else {
        return;
    };
    let Ok(win) = windows.single() else {
        return;
    };
    if win.size() == field.extent() {
        return;
    }

    field.resize(win.width(), win.height());
    field.init(&mut rand::rng());
    for entity in &dots {
        commands.entity(entity).despawn();
    }
    spawn_dots(&mut commands, &field, &assets);
    debug!(
        width = win.width(),
        height = win.height(),
        "surface resized, field rebuilt"
    );
}

/// Advance the field one frame (unless paused) and mirror the particle
/// positions into the disc transforms.
pub fn step_field(
    control: Res<FieldControl>,
    field: Option<ResMut<ParticleField>>,
    mut dots: Query<(&ParticleDot, &mut Transform)>,
) {
    let Some(mut field) = field else {
        return;
    };
    if control.running {
        field.update();
    }
    let half = 0.5 * field.extent();
    for (dot, mut transform) in &mut dots {
        if let Some(p) = field.particles().get(dot.0) {
            let world = surface_to_world(p.position, half);
            transform.translation.x = world.x;
            transform.translation.y = world.y;
        }
    }
}

/// Rewrite the connection mesh from this frame's pairwise scan. Runs after
/// `step_field` so the lines match the positions the discs render at.
pub fn repaint_connections(
    field: Option<Res<ParticleField>>,
    mut meshes: ResMut<Assets<Mesh>>,
    q_mesh: Query<&Mesh2d, With<ConnectionMesh>>,
) {
    let Some(field) = field else {
        return;
    };
    let Ok(handle) = q_mesh.single() else {
        return;
    };
    let Some(mesh) = meshes.get_mut(&handle.0) else {
        return;
    };

    let half = 0.5 * field.extent();
    let links = field.connections();
    let tint = FIELD_COLOR.to_linear();

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(links.len() * 2);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(links.len() * 2);
    for link in &links {
        for end in [link.a, link.b] {
            let world = surface_to_world(end, half);
            positions.push([world.x, world.y, 0.0]);
            colors.push([tint.red, tint.green, tint.blue, link.alpha]);
        }
    }
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
}

/// Space pauses/resumes the drift; Esc or Q quits (no-op on wasm32).
pub fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut control: ResMut<FieldControl>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Space) {
        control.running = !control.running;
    }
    if cfg!(not(target_arch = "wasm32"))
        && keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ])
    {
        exit.write(AppExit::Success);
    }
}

fn spawn_dots(commands: &mut Commands, field: &ParticleField, assets: &DotAssets) {
    let half = 0.5 * field.extent();
    for (i, p) in field.particles().iter().enumerate() {
        let world = surface_to_world(p.position, half);
        commands.spawn((
            ParticleDot(i),
            Mesh2d(assets.mesh.clone()),
            MeshMaterial2d(assets.material.clone()),
            Transform::from_xyz(world.x, world.y, PARTICLE_Z)
                .with_scale(Vec3::splat(p.radius)),
        ));
    }
}

/// Material for the connection mesh. The white base color leaves the
/// vertex colors in charge; the blend mode must be explicit, because an
/// opaque-alpha `ColorMaterial` defaults to the no-blend opaque phase and
/// the shader would force every vertex alpha back to 1.0, flattening the
/// distance fade.
fn connection_material() -> ColorMaterial {
    ColorMaterial {
        color: Color::WHITE,
        alpha_mode: AlphaMode2d::Blend,
        ..default()
    }
}

/// A LineList mesh with no segments yet; both vertex buffers get rewritten
/// every frame, so it only needs the right topology and attributes.
fn empty_line_mesh() -> Mesh {
    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, Vec::<[f32; 3]>::new())
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, Vec::<[f32; 4]>::new())
}

/// Surface space puts the origin at the top-left with +y down; Bevy's 2D
/// world origin sits at the window center with +y up.
fn surface_to_world(pos: Vec2, half: Vec2) -> Vec2 {
    Vec2::new(pos.x - half.x, half.y - pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_material_blends_vertex_alpha() {
        // An opaque material would discard the per-vertex line alphas, so
        // the fade between 0 and 0.3 never reaches the screen.
        let material = connection_material();
        assert_eq!(material.alpha_mode, AlphaMode2d::Blend);
        assert_eq!(material.color, Color::WHITE);
    }

    #[test]
    fn surface_to_world_centers_and_flips_y() {
        let half = Vec2::new(400.0, 300.0);
        // Top-left corner of the surface is the top-left of the window.
        assert_eq!(surface_to_world(Vec2::ZERO, half), Vec2::new(-400.0, 300.0));
        // Surface center maps to the world origin.
        assert_eq!(surface_to_world(Vec2::new(400.0, 300.0), half), Vec2::ZERO);
        assert_eq!(
            surface_to_world(Vec2::new(800.0, 600.0), half),
            Vec2::new(400.0, -300.0)
        );
    }
}
