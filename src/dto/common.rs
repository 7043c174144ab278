use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::draw::Point;

/// Screen coordinate supplied by the page (CSS pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PointDto {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

impl From<PointDto> for Point {
    fn from(value: PointDto) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

impl From<Point> for PointDto {
    fn from(value: Point) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

/// Generic action acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl ActionResponse {
    /// Acknowledge with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
