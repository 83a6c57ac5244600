//! The yard scene: a zombie, a player and a stack of crates

use fps_engine::foundation::math::{utils::deg_to_rad, Vec3};
use fps_engine::physics::VolumeKind;
use fps_engine::scene::{
    cube_mesh, Material, ModelAsset, ModelNode, NodeId, SceneError, SceneGraph, TransformNode,
};

/// Half extent of the stand-in crate mesh in model units
const CRATE_HALF_EXTENT: f32 = 100.0;

/// Crate scale used for ground clutter
const SMALL_CRATE: f32 = 0.005 / 4.0;

/// Crate scale used for the stacked wall
const WALL_CRATE: f32 = 0.005 * 2.0;

/// Hits a zombie survives before it is destroyed
const ZOMBIE_HEALTH: u32 = 3;

/// Crate placements as (translation, uniform scale)
const CRATES: [([f32; 3], f32); 30] = [
    ([3.0, -1.0, 10.0], SMALL_CRATE),
    ([3.0, -1.0, -5.0], 0.005 / 3.0),
    ([-4.0, -1.0, -6.0], SMALL_CRATE),
    ([0.0, -1.0, 12.0], SMALL_CRATE),
    ([19.0, -1.0, 0.0], WALL_CRATE),
    ([19.0, -1.0, 1.8], WALL_CRATE),
    ([19.0, -1.0, 3.6], WALL_CRATE),
    ([19.0, -1.0, 5.4], WALL_CRATE),
    ([19.0, -1.0, 7.2], WALL_CRATE),
    ([19.0, -1.0, 9.0], WALL_CRATE),
    ([19.0, 0.7, 0.9], WALL_CRATE),
    ([19.0, 0.7, 2.7], WALL_CRATE),
    ([19.0, 0.7, 4.5], WALL_CRATE),
    ([19.0, 0.7, 6.3], WALL_CRATE),
    ([19.0, 0.7, 8.1], WALL_CRATE),
    ([19.0, 2.4, 2.3], WALL_CRATE),
    ([19.0, 2.4, 4.1], WALL_CRATE),
    ([19.0, 2.4, 5.9], WALL_CRATE),
    ([19.0, 4.0, 3.2], WALL_CRATE),
    ([19.0, 4.0, 5.0], WALL_CRATE),
    ([19.0, 5.6, 3.8], WALL_CRATE),
    ([-2.0, -1.0, 4.0], SMALL_CRATE),
    ([9.0, -1.0, 5.0], SMALL_CRATE),
    ([3.0, -1.0, 6.0], SMALL_CRATE),
    ([-5.0, -1.0, 7.0], SMALL_CRATE),
    ([-7.0, -1.0, 8.0], SMALL_CRATE),
    ([-2.0, -1.0, -4.0], SMALL_CRATE),
    ([9.0, -1.0, -8.0], SMALL_CRATE),
    ([3.0, -1.0, -9.0], SMALL_CRATE),
    ([-5.0, -1.0, -2.0], SMALL_CRATE),
];

/// Handles to the interesting nodes of the yard
pub struct Yard {
    pub scene: SceneGraph,
    pub player: NodeId,
    pub zombie: NodeId,
    pub bullet: std::sync::Arc<ModelAsset>,
}

/// Build the yard with every crate placement sharing one crate asset
pub fn build(volume: VolumeKind) -> Result<Yard, SceneError> {
    let crate_asset = ModelAsset::new(
        "crate",
        vec![cube_mesh(CRATE_HALF_EXTENT)],
        Material::default().with_texture("./models/crate/Textures/1024/A.png"),
    )
    .shared();
    let zombie_asset = ModelAsset::new(
        "zombie",
        vec![cube_mesh(8.0)],
        Material::default().with_texture("./models/zombie/zombie.png"),
    )
    .shared();
    let player_asset = ModelAsset::new("player", vec![cube_mesh(0.5)], Material::default()).shared();
    let bullet = ModelAsset::new("bullet", vec![cube_mesh(10.0)], Material::with_shader("bullet")).shared();

    let mut scene = SceneGraph::new("root");
    let root = scene.root();

    let player_transform = scene.add_transform(root, TransformNode::new("player_transf"))?;
    let player = scene.add_model(player_transform, ModelNode::new("player", player_asset))?;

    let zombie_transform = scene.add_transform(
        root,
        TransformNode::new("zombie_transf")
            .with_translation(Vec3::new(1.0, -1.0, 3.0))
            .with_rotation2(Vec3::new(1.0, 0.0, 0.0), deg_to_rad(-90.0))
            .with_rotation(Vec3::new(0.0, 0.0, 1.0), deg_to_rad(-160.0))
            .with_uniform_scale(0.12),
    )?;
    let zombie = scene.add_model(
        zombie_transform,
        ModelNode::with_volume("zombie", zombie_asset, volume).with_health(ZOMBIE_HEALTH),
    )?;

    let crates = scene.add_group(root, "crates")?;
    for (i, (at, scale)) in CRATES.iter().enumerate() {
        let transform = scene.add_transform(
            crates,
            TransformNode::new(format!("crate_transf{}", i + 1))
                .with_translation(Vec3::new(at[0], at[1], at[2]))
                .with_uniform_scale(*scale),
        )?;
        scene.add_model(transform, ModelNode::with_volume("crate", crate_asset.clone(), volume))?;
    }

    log::info!("Yard built with {} nodes", scene.node_count());
    Ok(Yard { scene, player, zombie, bullet })
}
