use async_trait::async_trait;
use rusoto_core::{HttpClient, RusotoError};
use rusoto_credential::{AwsCredentials, ChainProvider, ProvideAwsCredentials, StaticProvider};
use rusoto_ec2::{CreateTagsRequest, Ec2, Ec2Client, RunInstancesRequest, Tag};
use rusoto_signature::Region;
use std::fmt;

// -----------------------------------------------------------------------------
// Models
// -----------------------------------------------------------------------------

#[derive(Debug)]
pub struct CloudInstance {
    pub id: String,
}

pub struct LaunchCloudInstance {
    pub instance_type: String,
    pub image_id: String,
    pub instance_name: Option<String>,
}

/// Failure taxonomy for a launch. `Provider` carries the provider's own
/// message text unmodified; everything else is wrapped as `Unexpected`.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchError {
    Provider(String),
    Unexpected(String),
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LaunchError::Provider(message) => write!(f, "{}", message),
            LaunchError::Unexpected(message) => write!(f, "Unexpected error: {}", message),
        }
    }
}

impl std::error::Error for LaunchError {}

// -----------------------------------------------------------------------------
// Provider
// -----------------------------------------------------------------------------

/// The two control-plane operations a launch needs. `Ec2Provider` is the real
/// implementation; tests substitute a mock.
#[async_trait]
pub trait ComputeProvider {
    /// Create exactly one instance and return its identifier.
    async fn run_instance(
        &self,
        instance_type: &str,
        image_id: &str,
    ) -> Result<String, LaunchError>;

    /// Attach a human-readable `Name` tag to an instance.
    async fn create_name_tag(&self, instance_id: &str, name: &str) -> Result<(), LaunchError>;
}

pub struct Ec2Provider {
    client: Ec2Client,
}

impl Ec2Provider {
    /// Build a region-scoped EC2 client from explicitly threaded credentials.
    /// An unrecognized region is rejected here, before any network call.
    pub fn new(credentials: AwsCredentials, region: &str) -> Result<Self, LaunchError> {
        let region: Region = region
            .parse()
            .map_err(|_| LaunchError::Provider(format!("Invalid region: {}", region)))?;
        let dispatcher = HttpClient::new().map_err(|err| {
            LaunchError::Unexpected(format!("Failed to create HTTP client: {}", err))
        })?;
        let client = Ec2Client::new_with(dispatcher, StaticProvider::from(credentials), region);

        Ok(Self { client })
    }
}

#[async_trait]
impl ComputeProvider for Ec2Provider {
    async fn run_instance(
        &self,
        instance_type: &str,
        image_id: &str,
    ) -> Result<String, LaunchError> {
        let run_instance_req = RunInstancesRequest {
            image_id: Some(image_id.to_string()),
            instance_type: Some(instance_type.to_string()),
            min_count: 1,
            max_count: 1,
            ..Default::default()
        };

        let reservation = self
            .client
            .run_instances(run_instance_req)
            .await
            .map_err(provider_error)?;

        reservation
            .instances
            .and_then(|instances| instances.into_iter().next())
            .and_then(|instance| instance.instance_id)
            .ok_or_else(|| LaunchError::Unexpected("Instance ID not found".to_string()))
    }

    async fn create_name_tag(&self, instance_id: &str, name: &str) -> Result<(), LaunchError> {
        let create_tags_req = CreateTagsRequest {
            resources: vec![instance_id.to_string()],
            tags: vec![Tag {
                key: Some("Name".to_string()),
                value: Some(name.to_string()),
            }],
            ..Default::default()
        };

        self.client
            .create_tags(create_tags_req)
            .await
            .map_err(provider_error)?;

        Ok(())
    }
}

/// EC2 rejections arrive as `Service` or as an `Unknown` response carrying the
/// error body; both are the provider speaking and pass through unmodified.
/// Credential and dispatch faults fall into the `Unexpected` bucket.
fn provider_error<E: std::error::Error + 'static>(err: RusotoError<E>) -> LaunchError {
    match err {
        RusotoError::Service(err) => LaunchError::Provider(err.to_string()),
        RusotoError::Unknown(response) => {
            LaunchError::Provider(String::from_utf8_lossy(&response.body).into_owned())
        }
        other => LaunchError::Unexpected(other.to_string()),
    }
}

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

/// Resolve credentials once at startup from the default chain (environment,
/// shared credentials file, instance role).
pub async fn resolve_credentials() -> Result<AwsCredentials, LaunchError> {
    let provider = ChainProvider::new();
    let credentials = provider
        .credentials()
        .await
        .map_err(|err| LaunchError::Unexpected(format!("Failed to get credentials: {}", err)))?;

    Ok(credentials)
}

/// Launch a single instance and, when a name was supplied, tag it.
///
/// The tagging call shares the creation call's error handling: if tagging
/// fails the whole launch reports failure even though the instance is already
/// running and its id is lost to the caller. That coupling is inherited
/// behavior, kept until the contract changes.
pub async fn launch_instance<P: ComputeProvider>(
    provider: &P,
    launch: &LaunchCloudInstance,
) -> Result<CloudInstance, LaunchError> {
    let instance_id = provider
        .run_instance(&launch.instance_type, &launch.image_id)
        .await?;

    if let Some(name) = launch.instance_name.as_deref() {
        provider.create_name_tag(&instance_id, name).await?;
    }

    Ok(CloudInstance { id: instance_id })
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
