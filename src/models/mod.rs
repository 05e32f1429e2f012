//! # Data Models
//!
//! SeaORM entities for the two persisted record collections plus shared
//! response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod elevator_call;
pub mod elevator_state;

pub use elevator_call::Entity as ElevatorCall;
pub use elevator_state::Entity as ElevatorState;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "elevator-backend".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Success payload returned by the mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation message
    #[schema(example = "Elevator set to rest")]
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}
