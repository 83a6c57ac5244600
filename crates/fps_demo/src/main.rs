//! Headless yard demo
//!
//! Runs the frame loop without a window: the player fires a spread of shots at
//! the zombie and the crate wall while the zombie claws at the player until
//! the game ends.

mod yard;

use fps_engine::config::{Config, GameConfig};
use fps_engine::foundation::logging;
use fps_engine::foundation::math::{utils::deg_to_rad, Mat4, Vec3};
use fps_engine::gameplay::{FrameInput, GameState, ShootRequest, World};
use fps_engine::input::{look_at_view, look_direction, screen_center_ray};
use fps_engine::render::LoggingBackend;
use rand::Rng;

const CONFIG_PATH: &str = "fps_demo.toml";
const FRAME_TIME: f32 = 1.0 / 60.0;
const MAX_FRAMES: u64 = 3_600;
const SHOT_INTERVAL: u64 = 15;
const ATTACK_INTERVAL: u64 = 240;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load_or_default(CONFIG_PATH)?;
    logging::init_with_level(&config.log_level);
    log::info!("Starting yard demo");

    let yard = yard::build(config.collision.volume)?;
    let (player, zombie) = (yard.player, yard.zombie);
    let mut world = World::new(config, yard.scene, player, yard.bullet)?;
    let mut backend = LoggingBackend::new();
    let mut rng = rand::thread_rng();

    let projection = Mat4::new_perspective(800.0 / 600.0, deg_to_rad(45.0), 0.1, 100.0);
    let eye = Vec3::zeros();
    world.set_player_position(eye)?;

    let mut shots = 0_u32;
    let mut hits = 0_u32;
    let mut state = GameState::Running;

    while state == GameState::Running && world.frame_count() < MAX_FRAMES {
        let frame = world.frame_count();
        let mut input = FrameInput::default();

        if frame % SHOT_INTERVAL == 0 {
            // Alternate between the zombie and the crate wall
            let (yaw, pitch) = if (frame / SHOT_INTERVAL) % 2 == 0 { (71.6, -17.5) } else { (13.0, 5.0) };
            let yaw = yaw + rng.gen_range(-4.0..4.0);
            let pitch = pitch + rng.gen_range(-3.0..3.0);

            let view = look_at_view(&eye, &look_direction(yaw, pitch));
            if let Some(direction) = screen_center_ray(&view, &projection) {
                input.shoot = Some(ShootRequest { origin: eye, direction, yaw, pitch });
            }
        }

        if frame > 0 && frame % ATTACK_INTERVAL == 0 {
            if let Some(outcome) = world.damage_node(player)? {
                log::info!("Zombie strikes the player: {outcome:?}");
            }
        }

        let shot = input.shoot;
        let fired_before = world.player().ammo();
        state = world.frame(FRAME_TIME, &input, &mut backend)?;

        if shot.is_some() && world.player().ammo() < fired_before {
            shots += 1;
            if let Some(bullet) = world.bullets().bullets().last() {
                if let Some(node) = bullet.struck_node() {
                    hits += 1;
                    let name = world.scene().get(node).map_or("?", |n| n.name());
                    log::debug!("Frame {frame}: shot struck '{name}'");
                }
            }
        }

        if frame % 60 == 0 {
            log::debug!(
                "Frame {frame}: {} live bullets, ammo {}",
                world.bullets().active_count(),
                world.player().ammo()
            );
        }
    }

    let zombie_health = world
        .scene()
        .model(zombie)
        .and_then(|m| m.as_damageable())
        .map_or(0, |d| d.health());
    log::info!(
        "Demo finished after {} frames ({state:?}): {shots} shots, {hits} hits, zombie health {zombie_health}, {} draws",
        world.frame_count(),
        backend.draw_count()
    );
    Ok(())
}
