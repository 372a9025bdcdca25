use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

use super::CompositeChartSnapshot;

pub const COMPOSITE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeSnapshotJsonContractV1<C> {
    pub schema_version: u32,
    pub snapshot: CompositeChartSnapshot<C>,
}

impl<C> CompositeChartSnapshot<C>
where
    C: Clone + Serialize + DeserializeOwned,
{
    pub fn to_json_contract_v1_pretty(&self) -> OverlayResult<String> {
        let payload = CompositeSnapshotJsonContractV1 {
            schema_version: COMPOSITE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            OverlayError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> OverlayResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<Self>(input) {
            return Ok(snapshot);
        }
        let payload: CompositeSnapshotJsonContractV1<C> =
            serde_json::from_str(input).map_err(|e| {
                OverlayError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != COMPOSITE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(OverlayError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
