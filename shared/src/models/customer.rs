//! Customer Trust Directory Models

use serde::{Deserialize, Serialize};

/// Operator action: flag or clear a customer risk marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFlagRequest {
    pub flagged: bool,
    /// Stored only while flagged; cleared on unflag
    pub reason: Option<String>,
}
