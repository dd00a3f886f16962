use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::candidates::CandidateOrder;
use super::error::Result;
use crate::utils::serialization;

/// Solver settings, usually read from a JSON file such as
/// `{"order": {"shuffled": {"seed": 7}}, "timeout_ms": 5000}`.
/// Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Order in which candidate words are tried
    pub order: CandidateOrder,
    /// Wall-clock budget for one search
    pub timeout_ms: Option<u64>,
    /// Maximum number of search nodes for one search
    pub max_nodes: Option<u64>,
}

impl SolverConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = serialization::load_from_disk(path.as_ref())?;
        log::debug!("Loaded solver config from {}: {:?}", path.as_ref().display(), config);
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
