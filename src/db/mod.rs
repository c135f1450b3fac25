pub mod memory;
pub mod source_ip;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lambda_http::tracing;
use serde::{Deserialize, Serialize};

use crate::config::{Backend, Config};
use crate::error::StoreError;

/// The row written for each invocation: the caller address and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRecord {
    pub source_ip: String,
}

impl IpRecord {
    pub fn new(source_ip: impl Into<String>) -> Self {
        Self {
            source_ip: source_ip.into(),
        }
    }
}

/// A scanned row as the table holds it.
///
/// The table is schema-less, so rows are kept as attribute name to rendered
/// value, ordered by name. Nothing is dropped and nothing is required.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoredItem {
    attributes: BTreeMap<String, String>,
}

impl StoredItem {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<(String, String)> for StoredItem {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl From<IpRecord> for StoredItem {
    fn from(record: IpRecord) -> Self {
        [("source_ip".to_string(), record.source_ip)]
            .into_iter()
            .collect()
    }
}

impl fmt::Display for StoredItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .attributes
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

/// Storage backend for recorded source addresses.
#[async_trait]
pub trait Database: Send + Sync {
    /// Backend label used in log lines.
    fn backend(&self) -> &'static str;

    /// Append a record. Duplicates are kept.
    async fn put_source_ip(&self, source_ip: &str) -> Result<(), StoreError>;

    /// Return what a single unpaginated scan yields.
    async fn scan_source_ips(&self) -> Result<Vec<StoredItem>, StoreError>;
}

/// DynamoDB-backed storage for production use.
#[derive(Clone)]
pub struct DynamoDb {
    pub(crate) client: aws_sdk_dynamodb::Client,
    pub table_name: String,
}

impl DynamoDb {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl Database for DynamoDb {
    fn backend(&self) -> &'static str {
        "DynamoDB"
    }

    async fn put_source_ip(&self, source_ip: &str) -> Result<(), StoreError> {
        DynamoDb::put_source_ip(self, source_ip).await
    }

    async fn scan_source_ips(&self) -> Result<Vec<StoredItem>, StoreError> {
        DynamoDb::scan_source_ips(self).await
    }
}

#[async_trait]
impl Database for memory::MemoryDb {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn put_source_ip(&self, source_ip: &str) -> Result<(), StoreError> {
        memory::MemoryDb::put_source_ip(self, source_ip)
    }

    async fn scan_source_ips(&self) -> Result<Vec<StoredItem>, StoreError> {
        memory::MemoryDb::scan_source_ips(self)
    }
}

/// Create a DynamoDB-backed database, loading AWS config from the environment.
pub async fn dynamo(table_name: &str) -> Arc<dyn Database> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&config);
    Arc::new(DynamoDb::new(client, table_name))
}

/// Create an in-memory database for local development and testing.
pub fn memory() -> Arc<dyn Database> {
    Arc::new(memory::MemoryDb::new())
}

/// Build the process-wide storage handle for the configured backend.
pub async fn connect(config: &Config) -> Arc<dyn Database> {
    match config.backend {
        Backend::Memory => {
            tracing::info!("Using in-memory database backend");
            memory()
        }
        Backend::Dynamo => {
            tracing::info!(table = %config.table_name, "Using DynamoDB database backend");
            dynamo(&config.table_name).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        assert_eq!(
            StoredItem::from(IpRecord::new("203.0.113.5")).to_string(),
            "{source_ip: 203.0.113.5}"
        );
    }

    #[test]
    fn test_item_renders_every_attribute_by_name() {
        let item: StoredItem = [
            ("ttl".to_string(), "17".to_string()),
            ("source_ip".to_string(), "1.2.3.4".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(item.to_string(), "{source_ip: 1.2.3.4, ttl: 17}");
        assert_eq!(item.get("ttl"), Some("17"));
        assert_eq!(item.len(), 2);
    }

    #[test]
    fn test_empty_item_display() {
        assert_eq!(StoredItem::default().to_string(), "{}");
    }

    #[test]
    fn test_record_serializes_to_single_attribute() {
        use aws_sdk_dynamodb::types::AttributeValue;
        use serde_dynamo::aws_sdk_dynamodb_1::to_item;
        use std::collections::HashMap;

        let item: HashMap<String, AttributeValue> = to_item(IpRecord::new("10.0.0.1")).unwrap();
        assert_eq!(
            item.get("source_ip"),
            Some(&AttributeValue::S("10.0.0.1".to_string()))
        );
        assert_eq!(item.len(), 1);
    }

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let config = Config {
            table_name: "SourceIps".to_string(),
            backend: Backend::Memory,
        };
        let db = connect(&config).await;
        assert_eq!(db.backend(), "memory");
        db.put_source_ip("1.2.3.4").await.unwrap();
        assert_eq!(
            db.scan_source_ips().await.unwrap(),
            vec![StoredItem::from(IpRecord::new("1.2.3.4"))]
        );
    }
}
