//! AWS Secrets Manager backend

use async_trait::async_trait;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::ProvideErrorMetadata;
use aws_sdk_secretsmanager::Client;

use super::{SecretError, SecretPayload, SecretStore};

/// Secret store backed by AWS Secrets Manager
///
/// Credentials come from the default AWS provider chain (env vars,
/// profile, instance/task role).
pub struct AwsSecretStore {
    client: Client,
}

impl AwsSecretStore {
    pub async fn connect(region: &str) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn fetch(&self, name: &str) -> Result<Option<SecretPayload>, SecretError> {
        let output = match self.client.get_secret_value().secret_id(name).send().await {
            Ok(output) => output,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_resource_not_found_exception() {
                    return Ok(None);
                }
                return Err(SecretError::Backend {
                    code: service_err.code().unwrap_or("Unknown").to_string(),
                    message: service_err.message().unwrap_or_default().to_string(),
                });
            }
        };

        let raw = output
            .secret_string()
            .ok_or_else(|| SecretError::NotAString {
                name: name.to_string(),
            })?;

        Ok(Some(SecretPayload::parse(raw)))
    }
}
