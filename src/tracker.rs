use crate::utils::{ensure_metadata, extract_metadata, increment_resource_version};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

// Objects within a namespace keep insertion order so list results and
// delete-collection removals are deterministic.
type ObjectsByName = Vec<(String, Value)>;
type ObjectsByNamespace = HashMap<String, ObjectsByName>;
type ObjectStorage = HashMap<String, ObjectsByNamespace>;

/// In-memory object store standing in for an API server, keyed by resource
/// kind, namespace, and name.
///
/// One tracker is constructed per test case and discarded after the
/// comparison consumes its history; nothing survives across cases.
pub struct ObjectTracker {
    objects: Arc<RwLock<ObjectStorage>>,
}

impl ObjectTracker {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a pre-existing object into the store.
    ///
    /// Unlike `create`, this accepts objects that already carry a resource
    /// version and replaces any object of the same name. Scenario setup
    /// goes through here so seeded objects never look freshly created.
    pub fn add(&self, kind: &str, mut object: Value, namespace: &str) -> Result<Value> {
        trace!("Adding object: {} in namespace: {}", kind, namespace);

        let mut meta = extract_metadata(&object)?;

        let name = meta
            .name
            .clone()
            .ok_or_else(|| Error::InvalidRequest("Object name is required".to_string()))?;

        if meta
            .resource_version
            .as_ref()
            .is_none_or(|rv| rv.is_empty())
        {
            meta.resource_version = Some("999".to_string());
        }

        ensure_metadata(&mut meta, namespace);

        object["metadata"] = serde_json::to_value(&meta)?;

        let mut objects = self.objects.write().unwrap();
        let ns_objects = objects
            .entry(kind.to_string())
            .or_default()
            .entry(namespace.to_string())
            .or_default();
        insert_or_replace(ns_objects, &name, object.clone());

        debug!("Added object: {}/{}", namespace, name);
        Ok(object)
    }

    pub fn create(&self, kind: &str, mut object: Value, namespace: &str) -> Result<Value> {
        trace!("Creating object: {} in namespace: {}", kind, namespace);

        let mut meta = extract_metadata(&object)?;

        let name = meta
            .name
            .clone()
            .ok_or_else(|| Error::InvalidRequest("Object name is required".to_string()))?;

        if meta
            .resource_version
            .as_ref()
            .is_some_and(|rv| !rv.is_empty())
        {
            return Err(Error::InvalidRequest(
                "resourceVersion can not be set for Create requests".to_string(),
            ));
        }

        if self.get(kind, namespace, &name).is_ok() {
            return Err(Error::AlreadyExists {
                kind: kind.to_string(),
                name: name.clone(),
                namespace: namespace.to_string(),
            });
        }

        meta.resource_version = Some("1".to_string());
        ensure_metadata(&mut meta, namespace);

        object["metadata"] = serde_json::to_value(&meta)?;

        let mut objects = self.objects.write().unwrap();
        let ns_objects = objects
            .entry(kind.to_string())
            .or_default()
            .entry(namespace.to_string())
            .or_default();
        insert_or_replace(ns_objects, &name, object.clone());

        debug!("Created object: {}/{}", namespace, name);
        Ok(object)
    }

    pub fn get(&self, kind: &str, namespace: &str, name: &str) -> Result<Value> {
        trace!("Getting object: {} {}/{}", kind, namespace, name);

        let objects = self.objects.read().unwrap();
        objects
            .get(kind)
            .and_then(|ns_objects| ns_objects.get(namespace))
            .and_then(|objs| objs.iter().find(|(n, _)| n == name))
            .map(|(_, obj)| obj.clone())
            .ok_or_else(|| Error::NotFound {
                kind: kind.to_string(),
                name: name.to_string(),
                namespace: namespace.to_string(),
            })
    }

    pub fn update(&self, kind: &str, mut object: Value, namespace: &str) -> Result<Value> {
        trace!("Updating object: {} in namespace: {}", kind, namespace);

        let meta = extract_metadata(&object)?;
        let name = meta
            .name
            .clone()
            .ok_or_else(|| Error::InvalidRequest("Object name is required".to_string()))?;

        let existing = self.get(kind, namespace, &name)?;
        let existing_meta = extract_metadata(&existing)?;

        let new_rv =
            increment_resource_version(existing_meta.resource_version.as_deref().unwrap_or(""))?;

        let mut new_meta = extract_metadata(&object)?;
        new_meta.resource_version = Some(new_rv);
        new_meta.creation_timestamp = existing_meta.creation_timestamp;
        ensure_metadata(&mut new_meta, namespace);

        object["metadata"] = serde_json::to_value(&new_meta)?;

        let mut objects = self.objects.write().unwrap();
        let ns_objects = objects
            .get_mut(kind)
            .and_then(|ns_objects| ns_objects.get_mut(namespace))
            .ok_or_else(|| Error::NotFound {
                kind: kind.to_string(),
                name: name.clone(),
                namespace: namespace.to_string(),
            })?;
        insert_or_replace(ns_objects, &name, object.clone());

        debug!("Updated object: {}/{}", namespace, name);
        Ok(object)
    }

    pub fn delete(&self, kind: &str, namespace: &str, name: &str) -> Result<Value> {
        trace!("Deleting object: {} {}/{}", kind, namespace, name);

        let mut objects = self.objects.write().unwrap();
        let ns_objects = objects
            .get_mut(kind)
            .and_then(|ns_objects| ns_objects.get_mut(namespace))
            .ok_or_else(|| Error::NotFound {
                kind: kind.to_string(),
                name: name.to_string(),
                namespace: namespace.to_string(),
            })?;

        let index = ns_objects
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| Error::NotFound {
                kind: kind.to_string(),
                name: name.to_string(),
                namespace: namespace.to_string(),
            })?;
        let (_, removed) = ns_objects.remove(index);

        debug!("Deleted object: {}/{}", namespace, name);
        Ok(removed)
    }

    /// Remove every object of a kind within a namespace, returning the
    /// removed objects in insertion order. An absent kind or namespace is
    /// an empty collection, not an error.
    pub fn delete_collection(&self, kind: &str, namespace: &str) -> Result<Vec<Value>> {
        trace!("Deleting collection: {} in namespace: {}", kind, namespace);

        let mut objects = self.objects.write().unwrap();
        let removed = objects
            .get_mut(kind)
            .and_then(|ns_objects| ns_objects.remove(namespace))
            .map(|objs| objs.into_iter().map(|(_, obj)| obj).collect())
            .unwrap_or_default();

        debug!("Deleted collection: {} in namespace: {}", kind, namespace);
        Ok(removed)
    }

    /// Apply a JSON merge patch to a stored object.
    pub fn patch(&self, kind: &str, namespace: &str, name: &str, patch: &Value) -> Result<Value> {
        trace!("Patching object: {} {}/{}", kind, namespace, name);

        let existing = self.get(kind, namespace, name)?;
        let mut patched = existing.clone();
        json_patch::merge(&mut patched, patch);

        self.update(kind, patched, namespace)
    }

    pub fn list(&self, kind: &str, namespace: Option<&str>) -> Result<Vec<Value>> {
        trace!("Listing objects: {} in namespace: {:?}", kind, namespace);

        let objects = self.objects.read().unwrap();
        let Some(ns_objects) = objects.get(kind) else {
            return Ok(Vec::new());
        };

        let mut result = Vec::new();
        match namespace {
            Some(ns) => {
                if let Some(objs) = ns_objects.get(ns) {
                    for (_, obj) in objs {
                        result.push(obj.clone());
                    }
                }
            }
            None => {
                for objs in ns_objects.values() {
                    for (_, obj) in objs {
                        result.push(obj.clone());
                    }
                }
            }
        }

        Ok(result)
    }
}

impl Default for ObjectTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ObjectTracker {
    fn clone(&self) -> Self {
        Self {
            objects: Arc::clone(&self.objects),
        }
    }
}

fn insert_or_replace(objects: &mut ObjectsByName, name: &str, object: Value) {
    match objects.iter_mut().find(|(n, _)| n == name) {
        Some((_, existing)) => *existing = object,
        None => objects.push((name.to_string(), object)),
    }
}
