use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The decline model family the calculation service should fit.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclineType {
    #[default]
    Exponential,
    Hyperbolic,
    Harmonic,
}

impl DeclineType {
    pub const ALL: [DeclineType; 3] = [
        DeclineType::Exponential,
        DeclineType::Hyperbolic,
        DeclineType::Harmonic,
    ];

    /// Wire identifier sent as `decline_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclineType::Exponential => "exponential",
            DeclineType::Hyperbolic => "hyperbolic",
            DeclineType::Harmonic => "harmonic",
        }
    }

    /// Human readable name for pickers.
    pub fn label(&self) -> &'static str {
        match self {
            DeclineType::Exponential => "Exponential Model",
            DeclineType::Hyperbolic => "Hyperbolic Model",
            DeclineType::Harmonic => "Harmonic Model",
        }
    }
}

impl fmt::Display for DeclineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        DeclineType::ALL
            .into_iter()
            .find(|d| d.as_str() == lowered)
            .ok_or_else(|| {
                format!(
                    "unknown decline type '{}', expected one of: exponential, hyperbolic, harmonic",
                    s
                )
            })
    }
}
