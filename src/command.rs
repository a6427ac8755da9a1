use std::collections::HashMap;

// -----------------------------------------------------------------------------
// Parser
// -----------------------------------------------------------------------------

/// Parse a command string like
/// `launch --type=t2.micro --image=ami-12345678 --region=us-east-1 --name=MyInstance`
/// into a map of parameters.
///
/// Only `--key=value` tokens are recognized; the verb and any malformed token
/// are dropped without error. Callers rely on this leniency, so it stays loose.
pub fn parse_command(command: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some(command) = command {
        for part in command.split_whitespace() {
            if let Some(rest) = part.strip_prefix("--") {
                let key_value: Vec<&str> = rest.split('=').collect();
                if key_value.len() == 2 {
                    params.insert(key_value[0].to_string(), key_value[1].to_string());
                }
            }
        }
    }
    params
}

// -----------------------------------------------------------------------------
// Parameter extraction
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchParams {
    pub instance_type: String,
    pub image_id: String,
    pub region: String,
    pub instance_name: Option<String>,
}

impl LaunchParams {
    /// Pull the launch parameters out of a parsed command. Returns `None` when
    /// any of `type`, `image` or `region` is absent or empty; an empty `name`
    /// counts as no name at all.
    pub fn from_params(params: &HashMap<String, String>) -> Option<Self> {
        Some(LaunchParams {
            instance_type: non_empty(params, "type")?,
            image_id: non_empty(params, "image")?,
            region: non_empty(params, "region")?,
            instance_name: non_empty(params, "name"),
        })
    }
}

fn non_empty(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|value| !value.is_empty()).cloned()
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_and_absent_command() {
        assert!(parse_command(None).is_empty());
        assert!(parse_command(Some("")).is_empty());
        assert!(parse_command(Some("   ")).is_empty());
    }

    #[test]
    fn test_parse_full_launch_command() {
        let params = parse_command(Some(
            "launch --type=t2.micro --image=ami-1 --region=us-east-1 --name=X",
        ));

        assert_eq!(params.len(), 4);
        assert_eq!(params["type"], "t2.micro");
        assert_eq!(params["image"], "ami-1");
        assert_eq!(params["region"], "us-east-1");
        assert_eq!(params["name"], "X");
    }

    #[test]
    fn test_parse_drops_malformed_tokens() {
        let params = parse_command(Some("launch --type=t2.micro --bad --region=us-east-1"));

        assert_eq!(params.len(), 2);
        assert_eq!(params["type"], "t2.micro");
        assert_eq!(params["region"], "us-east-1");

        // More than one `=` is also dropped, as is a bare `--`.
        let params = parse_command(Some("--a=b=c --"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let params = parse_command(Some("--k=v1 --k=v2"));

        assert_eq!(params.len(), 1);
        assert_eq!(params["k"], "v2");
    }

    #[test]
    fn test_parse_accepts_empty_key_and_value() {
        let params = parse_command(Some("--=foo --empty="));

        assert_eq!(params[""], "foo");
        assert_eq!(params["empty"], "");
    }

    #[test]
    fn test_from_params_with_all_fields() {
        let params = parse_command(Some(
            "launch --type=t2.micro --image=ami-1 --region=us-east-1 --name=Web1",
        ));
        let launch = LaunchParams::from_params(&params).expect("Failed to extract params");

        assert_eq!(launch.instance_type, "t2.micro");
        assert_eq!(launch.image_id, "ami-1");
        assert_eq!(launch.region, "us-east-1");
        assert_eq!(launch.instance_name, Some("Web1".to_string()));
    }

    #[test]
    fn test_from_params_missing_required_key() {
        let params = parse_command(Some("launch --type=t2.micro --image=ami-1"));
        assert!(LaunchParams::from_params(&params).is_none());
    }

    #[test]
    fn test_from_params_empty_required_value_counts_as_missing() {
        let params = parse_command(Some("launch --type= --image=ami-1 --region=us-east-1"));
        assert!(LaunchParams::from_params(&params).is_none());
    }

    #[test]
    fn test_from_params_empty_name_means_no_name() {
        let params = parse_command(Some(
            "launch --type=t2.micro --image=ami-1 --region=us-east-1 --name=",
        ));
        let launch = LaunchParams::from_params(&params).expect("Failed to extract params");

        assert_eq!(launch.instance_name, None);
    }
}
