//! `nvme_raid-show` JSON output parser.
//! Converts the helper's document into RaidArray records keyed by array name.

use std::collections::BTreeMap;

use crate::error::CollectError;
use crate::raid::RaidArray;

/// Parse the raw helper output.
/// Input:  `{"raid1": {"name": "raid1", "state": ["online"], "devices": [[0, "/dev/nvme0n1", ["online"]]], ...}}`
pub fn parse_raid_info(bytes: &[u8]) -> Result<BTreeMap<String, RaidArray>, CollectError> {
    if bytes.is_empty() {
        return Err(CollectError::EmptyResponse);
    }

    let document: BTreeMap<String, serde_json::Value> = serde_json::from_slice(bytes)
        .map_err(|e| CollectError::Decode(format!("error unmarshalling JSON: {}", e)))?;

    let raids = document
        .into_iter()
        .map(|(key, value)| {
            serde_json::from_value::<RaidArray>(value)
                .map(|raid| (key.clone(), raid))
                .map_err(|e| {
                    CollectError::Decode(format!("error unmarshalling RAID data for {}: {}", key, e))
                })
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    if raids.is_empty() {
        return Err(CollectError::NoArraysFound);
    }

    Ok(raids)
}
