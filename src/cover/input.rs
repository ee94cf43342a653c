//! Host events consumed by the cover

use serde::{Deserialize, Serialize};

/// One event from the host surface. Pointer coordinates are pixels relative
/// to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoverInput {
    PointerEnter,
    PointerLeave,
    PointerMove { x: f32, y: f32 },
    Click,
    Resize { width: u32, height: u32 },
}
