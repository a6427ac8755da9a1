use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub async fn generate_random_string(n: usize) -> String {
    let rng = rand::thread_rng();
    rng.sample_iter(&Alphanumeric)
        .map(char::from)
        .take(n)
        .collect()
}

/// The single response contract of the service. Serializes to exactly
/// `{"success": true, "instance_id": "..."}` or
/// `{"success": false, "error": "..."}`; the unused field is omitted.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct LaunchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LaunchResult {
    pub fn ok(instance_id: String) -> Self {
        LaunchResult {
            success: true,
            instance_id: Some(instance_id),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        LaunchResult {
            success: false,
            instance_id: None,
            error: Some(error),
        }
    }
}
