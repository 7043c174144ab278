use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::format_system_time,
    state::wheel::{ResolvedSpin, WheelNames},
};

/// Payload adding a name to the wheel.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddWheelNameRequest {
    /// Name to add; surrounding whitespace is trimmed.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Current wheel names.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WheelNamesResponse {
    /// Every stored name, in order.
    pub names: Vec<String>,
    /// Names drawn as segments (blank entries skipped).
    pub segments: Vec<String>,
}

impl From<&WheelNames> for WheelNamesResponse {
    fn from(names: &WheelNames) -> Self {
        Self {
            names: names.as_slice().to_vec(),
            segments: names.segments(),
        }
    }
}

/// Response to an add request; `added` is false when the name was already present.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddWheelNameResponse {
    /// Whether the name was appended.
    pub added: bool,
    /// Wheel after the request.
    #[serde(flatten)]
    pub wheel: WheelNamesResponse,
}

/// Acknowledgement of a started spin; the page animates to `rotation_degrees`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinStartedResponse {
    /// Identifier of the spin.
    pub spin_id: Uuid,
    /// Final clockwise rotation of the wheel.
    pub rotation_degrees: f64,
    /// Length of the spin animation.
    pub duration_ms: u64,
    /// Segments frozen for this spin.
    pub segments: Vec<String>,
}

/// Winner of a finished spin.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinResultResponse {
    /// Identifier of the spin.
    pub spin_id: Uuid,
    /// Rotation the wheel stopped at.
    pub final_rotation_degrees: f64,
    /// Segment under the pointer.
    pub winning_index: usize,
    /// Label of that segment.
    pub winning_label: String,
    /// RFC 3339 time of the reveal.
    pub resolved_at: String,
}

impl From<ResolvedSpin> for SpinResultResponse {
    fn from(spin: ResolvedSpin) -> Self {
        Self {
            spin_id: spin.spin_id,
            final_rotation_degrees: spin.result.final_rotation_degrees,
            winning_index: spin.result.winning_index,
            winning_label: spin.result.winning_label,
            resolved_at: format_system_time(spin.resolved_at),
        }
    }
}
