//! Input helpers turning camera state into world-space shot rays

pub mod picking;

pub use picking::{look_direction, look_at_view, screen_center_ray};
