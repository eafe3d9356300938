// ═══════════════════════════════════════════════════════════════════════
// Evaluation request — inbound payload, rejected before any game starts
// ═══════════════════════════════════════════════════════════════════════

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

use arena_engine::types::Role;

pub const DEFAULT_GAMES_PER_ROLE: u32 = 5;
pub const DEFAULT_SEED: u64 = 42;

/// Raw evaluation request: a role-name → endpoint mapping (only one entry
/// is consumed, the external participant under test) and a free-form
/// config block.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalRequest {
    pub participants: HashMap<String, String>,
    #[serde(default)]
    pub config: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no participant provided")]
    NoParticipant,

    #[error("config key `{key}` is invalid: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

/// A request that passed validation, with config defaults applied.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub participant_endpoint: String,
    /// Roles the participant will be evaluated in, in play order.
    pub roles: Vec<Role>,
    pub games_per_role: u32,
    pub turns_to_speak_per_round: u32,
    pub seed: u64,
}

impl EvalRequest {
    pub fn from_json(input: &str) -> Result<EvalRequest, RequestError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn validate(&self) -> Result<ValidatedRequest, RequestError> {
        // Lowest role name wins when several endpoints are supplied; only
        // one participant is ever under test.
        let participant_endpoint = {
            let mut names: Vec<&String> = self.participants.keys().collect();
            names.sort();
            names
                .first()
                .map(|name| self.participants[*name].clone())
                .ok_or(RequestError::NoParticipant)?
        };

        let roles = match self.config.get("role") {
            None => Role::ALL.to_vec(),
            Some(value) => {
                let name = value.as_str().ok_or(RequestError::InvalidConfig {
                    key: "role",
                    reason: "expected a role name string".to_string(),
                })?;
                let role: Role = name.parse().map_err(|reason| RequestError::InvalidConfig {
                    key: "role",
                    reason,
                })?;
                vec![role]
            }
        };

        let games_per_role =
            self.positive_u32("games_per_role", DEFAULT_GAMES_PER_ROLE)?;
        let turns_to_speak_per_round = self.positive_u32("turns_to_speak_per_round", 1)?;

        let seed = match self.config.get("seed") {
            None => DEFAULT_SEED,
            Some(value) => value.as_u64().ok_or(RequestError::InvalidConfig {
                key: "seed",
                reason: "expected an unsigned integer".to_string(),
            })?,
        };

        Ok(ValidatedRequest {
            participant_endpoint,
            roles,
            games_per_role,
            turns_to_speak_per_round,
            seed,
        })
    }

    fn positive_u32(&self, key: &'static str, default: u32) -> Result<u32, RequestError> {
        match self.config.get(key) {
            None => Ok(default),
            Some(value) => match value.as_u64() {
                Some(n) if n >= 1 && n <= u32::MAX as u64 => Ok(n as u32),
                _ => Err(RequestError::InvalidConfig {
                    key,
                    reason: "expected a positive integer".to_string(),
                }),
            },
        }
    }
}
