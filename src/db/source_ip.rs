use std::collections::HashMap;

use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue};
use lambda_http::tracing;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;

use crate::error::StoreError;

use super::{DynamoDb, IpRecord, StoredItem};

impl DynamoDb {
    pub async fn put_source_ip(&self, source_ip: &str) -> Result<(), StoreError> {
        let item = to_item(IpRecord::new(source_ip))
            .map_err(|e| StoreError::Put(format!("Failed to serialize record: {e}")))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Put(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    /// Single scan request. Only the first page comes back; a continuation
    /// key is logged and otherwise ignored.
    pub async fn scan_source_ips(&self) -> Result<Vec<StoredItem>, StoreError> {
        let response = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| StoreError::Scan(DisplayErrorContext(&e).to_string()))?;

        if response.last_evaluated_key.is_some() {
            tracing::warn!(
                table = %self.table_name,
                "Scan returned a partial page; remaining records are not shown"
            );
        }

        Ok(response
            .items
            .unwrap_or_default()
            .into_iter()
            .map(stored_item)
            .collect())
    }
}

fn stored_item(item: HashMap<String, AttributeValue>) -> StoredItem {
    item.into_iter()
        .map(|(name, value)| (name, render_attribute(&value)))
        .collect()
}

/// Strings and numbers render bare; containers render their members.
fn render_attribute(value: &AttributeValue) -> String {
    match value {
        AttributeValue::S(s) | AttributeValue::N(s) => s.clone(),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Null(_) => "null".to_string(),
        AttributeValue::B(blob) => format!("<{} bytes>", blob.as_ref().len()),
        AttributeValue::Ss(values) | AttributeValue::Ns(values) => {
            format!("[{}]", values.join(", "))
        }
        AttributeValue::Bs(blobs) => {
            let rendered: Vec<String> = blobs
                .iter()
                .map(|blob| format!("<{} bytes>", blob.as_ref().len()))
                .collect();
            format!("[{}]", rendered.join(", "))
        }
        AttributeValue::L(values) => {
            let rendered: Vec<String> = values.iter().map(render_attribute).collect();
            format!("[{}]", rendered.join(", "))
        }
        AttributeValue::M(map) => stored_item(map.clone()).to_string(),
        _ => "<unknown>".to_string(),
    }
}
