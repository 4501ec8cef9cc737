use crate::{Error, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde_json::Value;

pub fn increment_resource_version(current: &str) -> Result<String> {
    match current {
        "" => Ok("1".to_string()),
        "999" => Ok("1".to_string()), // Special tracker add value
        v => {
            let num: u64 = v
                .parse()
                .map_err(|_| Error::Internal(format!("Invalid resource version: {}", v)))?;
            Ok((num + 1).to_string())
        }
    }
}

pub fn ensure_metadata(meta: &mut ObjectMeta, namespace: &str) {
    // For cluster-scoped resources (empty namespace), ensure namespace is not set
    // For namespaced resources, set namespace if not present
    if namespace.is_empty() {
        meta.namespace = None;
    } else if meta.namespace.is_none() {
        meta.namespace = Some(namespace.to_string());
    }
    if meta.creation_timestamp.is_none() {
        meta.creation_timestamp = Some(k8s_openapi::apimachinery::pkg::apis::meta::v1::Time(
            chrono::Utc::now(),
        ));
    }
}

pub fn extract_metadata(object: &Value) -> Result<ObjectMeta> {
    let meta_value = object
        .get("metadata")
        .ok_or_else(|| Error::MetadataError("Object missing metadata field".to_string()))?;

    serde_json::from_value(meta_value.clone())
        .map_err(|e| Error::MetadataError(format!("Failed to parse metadata: {}", e)))
}

pub fn extract_kind(object: &Value) -> Result<String> {
    object
        .get("kind")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidRequest("Missing kind".to_string()))
}

pub fn extract_namespace(object: &Value) -> String {
    object
        .get("metadata")
        .and_then(|m| m.get("namespace"))
        .and_then(|n| n.as_str())
        .unwrap_or("default")
        .to_string()
}
