//! Serde structs matching the `nvme_raid-show` JSON document.
//! The document is an object keyed by array name; each value is a `RaidArray`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One RAID array as reported by the helper.
/// Only `name` and `state` feed metrics; everything else is carried for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidArray {
    pub name: String,
    pub state: Vec<String>,

    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub block_size: i64,
    #[serde(default)]
    pub config: bool,
    #[serde(default, deserialize_with = "deserialize_devices")]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub devices_health: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices_wear: Option<Vec<String>>,
    #[serde(default)]
    pub group_size: i64,
    #[serde(default)]
    pub init_depth: i64,
    #[serde(default)]
    pub init_prio: i64,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub memory_limit_mb: i64,
    #[serde(default)]
    pub memory_usage_mb: String,
    #[serde(default)]
    pub merge_max_usecs: i64,
    #[serde(default)]
    pub merge_read_enabled: i64,
    #[serde(default)]
    pub merge_wait_usecs: i64,
    #[serde(default)]
    pub merge_write_enabled: i64,
    #[serde(default)]
    pub recon_depth: i64,
    #[serde(default)]
    pub recon_prio: i64,
    #[serde(default)]
    pub request_limit: i64,
    #[serde(default)]
    pub restripe_prio: i64,
    #[serde(default)]
    pub resync_enabled: i64,
    #[serde(default)]
    pub sched_enabled: i64,
    #[serde(default)]
    pub serials: Vec<String>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub sparepool: String,
    #[serde(default)]
    pub strip_size: i64,
    #[serde(default)]
    pub uuid: String,
}

/// Member device. Encoded on the wire as `[id, "/dev/path", ["status", ...]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: i64,
    pub path: String,
    pub status: Vec<String>,
}

impl Device {
    /// Decode the positional triple at `index`; the error names the offending position.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, String> {
        let items = value
            .as_array()
            .ok_or_else(|| format!("device {}: expected a [id, path, status] array", index))?;

        if items.len() != 3 {
            return Err(format!(
                "device {}: expected 3 elements, got {}",
                index,
                items.len()
            ));
        }

        let id = items[0]
            .as_i64()
            .ok_or_else(|| format!("device {}: id must be an integer, got {}", index, items[0]))?;

        let path = items[1]
            .as_str()
            .ok_or_else(|| format!("device {}: path must be a string, got {}", index, items[1]))?
            .to_string();

        let status = items[2]
            .as_array()
            .ok_or_else(|| format!("device {}: status must be a list, got {}", index, items[2]))?
            .iter()
            .enumerate()
            .map(|(j, s)| {
                s.as_str().map(str::to_string).ok_or_else(|| {
                    format!("device {}: status[{}] must be a string, got {}", index, j, s)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Device { id, path, status })
    }
}

impl Serialize for Device {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.id, &self.path, &self.status).serialize(serializer)
    }
}

fn deserialize_devices<'de, D>(deserializer: D) -> Result<Vec<Device>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Value> = Vec::deserialize(deserializer)?;
    raw.iter()
        .enumerate()
        .map(|(i, v)| Device::from_value(i, v))
        .collect::<Result<Vec<_>, _>>()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_triple_decodes() {
        let dev = Device::from_value(0, &json!([2, "/dev/nvme1n1", ["online", "active"]])).unwrap();
        assert_eq!(dev.id, 2);
        assert_eq!(dev.path, "/dev/nvme1n1");
        assert_eq!(dev.status, vec!["online", "active"]);
    }

    #[test]
    fn test_device_errors_name_position() {
        let err = Device::from_value(3, &json!([1, "/dev/nvme0n1"])).unwrap_err();
        assert!(err.contains("device 3") && err.contains("3 elements"), "{}", err);

        let err = Device::from_value(1, &json!(["x", "/dev/nvme0n1", []])).unwrap_err();
        assert!(err.contains("device 1: id"), "{}", err);

        let err = Device::from_value(0, &json!([0, 7, []])).unwrap_err();
        assert!(err.contains("device 0: path"), "{}", err);

        let err = Device::from_value(0, &json!([0, "/dev/nvme0n1", "online"])).unwrap_err();
        assert!(err.contains("device 0: status"), "{}", err);

        let err = Device::from_value(4, &json!([0, "/dev/nvme0n1", ["online", 5]])).unwrap_err();
        assert!(err.contains("device 4: status[1]"), "{}", err);

        let err = Device::from_value(0, &json!({"id": 0})).unwrap_err();
        assert!(err.contains("device 0"), "{}", err);
    }

    #[test]
    fn test_missing_auxiliary_fields_default() {
        let raid: RaidArray = serde_json::from_value(json!({
            "name": "r0",
            "state": ["online"]
        }))
        .unwrap();
        assert_eq!(raid.name, "r0");
        assert!(raid.devices.is_empty());
        assert!(raid.devices_wear.is_none());
        assert_eq!(raid.strip_size, 0);
    }

    #[test]
    fn test_record_survives_reencoding() {
        let raid: RaidArray = serde_json::from_value(json!({
            "name": "logs",
            "state": ["online", "degraded"],
            "level": "1",
            "devices": [[0, "/dev/nvme0n1", ["online"]], [1, "/dev/nvme1n1", ["offline", "faulty"]]]
        }))
        .unwrap();

        let encoded = serde_json::to_value(&raid).unwrap();
        assert_eq!(encoded["devices"][1], json!([1, "/dev/nvme1n1", ["offline", "faulty"]]));
        assert!(encoded.get("devices_wear").is_none());

        let decoded: RaidArray = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, raid);
    }

    #[test]
    fn test_bad_device_fails_record() {
        let err = serde_json::from_value::<RaidArray>(json!({
            "name": "r0",
            "state": ["online"],
            "devices": [[0, "/dev/nvme0n1", ["online"]], [1, "/dev/nvme1n1"]]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("device 1"), "{}", err);
    }
}
