//! Frame-loop tests driving a whole [`World`](super::World)

mod frame_loop;
mod targeting;
