//! AWS SDK client setup.

use aws_sdk_dynamodb::Client;

use crate::config::DynamoDbConfig;

/// Creates a DynamoDB client with the given configuration.
///
/// Credentials come from the SDK's default provider chain; `endpoint_url`
/// points the client at a local DynamoDB when set.
pub async fn create_client(config: &DynamoDbConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
