//! Cover motion model
//!
//! Renderer-independent state of the interactive cover: where the pointer
//! wants the book to face, how far it has got, the idle float and the flip
//! animation. The `engine` module feeds host events and frame times in and
//! copies the resulting [`CoverPose`] onto the book mesh.

pub mod flip;
pub mod input;
pub mod rotation;
pub mod state;
pub mod viewport;

pub use flip::{ease_in_out_cubic, FlipAnimation, FlipSample};
pub use input::CoverInput;
pub use rotation::Rotation;
pub use state::{CoverPose, CoverState};
pub use viewport::Viewport;
