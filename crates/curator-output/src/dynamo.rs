//! DynamoDB sink.
//!
//! The import loop is synchronous, so the sink owns a current-thread tokio
//! runtime and blocks on each SDK call.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType, TableStatus,
};
use curator_import::ItemSink;
use curator_model::{NormalizedItem, WriteError};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Inventory table written by default.
pub const DEFAULT_TABLE_NAME: &str = "Devices";

/// DynamoDB Local's default listen address.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

pub const DEFAULT_REGION: &str = "us-east-1";

/// DynamoDB Local accepts any credentials; these are sent when none are configured.
const LOCAL_CREDENTIAL: &str = "local";

const TABLE_WAIT_ATTEMPTS: u32 = 30;
const TABLE_WAIT_INTERVAL: Duration = Duration::from_secs(1);

/// Connection settings for the target table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoConfig {
    /// Table name. Default: `Devices`.
    pub table_name: String,
    /// Endpoint override. Default: DynamoDB Local on `localhost:8000`;
    /// `None` uses the regional AWS endpoint.
    pub endpoint: Option<String>,
    /// Default: `us-east-1`.
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            region: DEFAULT_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl DynamoConfig {
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Explicit keys win; an endpoint override without keys gets the local
    /// placeholder pair; otherwise the SDK's default provider chain is used.
    pub fn static_credentials(&self) -> Option<Credentials> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(key), Some(secret)) => {
                Some(Credentials::new(key, secret, None, None, "curator-import"))
            }
            _ if self.endpoint.is_some() => Some(Credentials::new(
                LOCAL_CREDENTIAL,
                LOCAL_CREDENTIAL,
                None,
                None,
                "curator-import-local",
            )),
            _ => None,
        }
    }
}

/// Whether [`DynamoSink::ensure_table`] found or created the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Existing,
    Created,
}

/// Writes items to a DynamoDB table with one `PutItem` call each.
pub struct DynamoSink {
    runtime: Runtime,
    client: Client,
    config: DynamoConfig,
}

impl DynamoSink {
    /// Builds the SDK client. No request is sent until the first write.
    pub fn connect(config: DynamoConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("start runtime for DynamoDB client")?;

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(credentials) = config.static_credentials() {
            loader = loader.credentials_provider(credentials);
        }
        let sdk_config = runtime.block_on(loader.load());
        let client = Client::new(&sdk_config);

        info!(
            table = %config.table_name,
            endpoint = config.endpoint.as_deref().unwrap_or("aws"),
            region = %config.region,
            "configured DynamoDB client"
        );
        Ok(Self {
            runtime,
            client,
            config,
        })
    }

    pub fn config(&self) -> &DynamoConfig {
        &self.config
    }

    /// Creates the table with `key_field` as its string hash key unless it
    /// already exists, then waits for it to become active.
    pub fn ensure_table(&self, key_field: &str) -> Result<TableState> {
        self.runtime.block_on(self.ensure_table_async(key_field))
    }

    async fn ensure_table_async(&self, key_field: &str) -> Result<TableState> {
        let table = self.config.table_name.as_str();
        match self.client.describe_table().table_name(table).send().await {
            Ok(_) => {
                info!(table, "table already exists, skipping creation");
                return Ok(TableState::Existing);
            }
            Err(err) if is_table_missing(&err) => {}
            Err(err) => bail!("describe table {table}: {}", DisplayErrorContext(&err)),
        }

        info!(table, key_field, "creating table");
        let key_definition = AttributeDefinition::builder()
            .attribute_name(key_field)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .context("build key attribute definition")?;
        let key_schema = KeySchemaElement::builder()
            .attribute_name(key_field)
            .key_type(KeyType::Hash)
            .build()
            .context("build key schema")?;
        self.client
            .create_table()
            .table_name(table)
            .attribute_definitions(key_definition)
            .key_schema(key_schema)
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .map_err(|err| anyhow!("create table {table}: {}", DisplayErrorContext(&err)))?;

        for attempt in 1..=TABLE_WAIT_ATTEMPTS {
            let output = self
                .client
                .describe_table()
                .table_name(table)
                .send()
                .await
                .map_err(|err| anyhow!("describe table {table}: {}", DisplayErrorContext(&err)))?;
            let status = output.table().and_then(|description| description.table_status());
            if status == Some(&TableStatus::Active) {
                info!(table, "table created");
                return Ok(TableState::Created);
            }
            debug!(table, attempt, status = ?status, "waiting for table to become active");
            tokio::time::sleep(TABLE_WAIT_INTERVAL).await;
        }
        bail!(
            "table {table} did not become active after {} attempts",
            TABLE_WAIT_ATTEMPTS
        )
    }
}

impl ItemSink for DynamoSink {
    fn target(&self) -> &str {
        &self.config.table_name
    }

    fn put_item(&mut self, item: &NormalizedItem) -> Result<(), WriteError> {
        let request = self
            .client
            .put_item()
            .table_name(&self.config.table_name)
            .set_item(Some(to_attribute_map(item)));
        self.runtime
            .block_on(request.send())
            .map(|_| ())
            .map_err(|err| classify_put_error(&err))
    }
}

/// Converts an item into a DynamoDB attribute map with every value typed `S`.
pub fn to_attribute_map(item: &NormalizedItem) -> HashMap<String, AttributeValue> {
    item.iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
        .collect()
}

fn is_table_missing(err: &SdkError<DescribeTableError>) -> bool {
    err.as_service_error()
        .is_some_and(DescribeTableError::is_resource_not_found_exception)
}

/// Problems with the item itself are rejections; everything else is the
/// backend being unreachable or unwilling right now.
fn classify_put_error(err: &SdkError<PutItemError>) -> WriteError {
    let Some(service_err) = err.as_service_error() else {
        return WriteError::Unavailable(DisplayErrorContext(err).to_string());
    };
    let code = service_err.code().unwrap_or("Unknown");
    let detail = format!(
        "{code}: {}",
        service_err.message().unwrap_or("no message")
    );
    if code == "ValidationException"
        || service_err.is_conditional_check_failed_exception()
        || service_err.is_item_collection_size_limit_exceeded_exception()
    {
        WriteError::Rejected(detail)
    } else {
        WriteError::Unavailable(detail)
    }
}
