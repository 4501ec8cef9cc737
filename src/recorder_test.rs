#[cfg(test)]
mod tests {
    use crate::action::{ActionPayload, Verb};
    use crate::recorder::{ActionLog, ActionRecorder, ActionRecorderList, RecordingClient};
    use crate::{Action, BackendBuilder};
    use serde_json::json;
    use std::sync::Arc;

    fn image(name: &str) -> serde_json::Value {
        json!({
            "apiVersion": "kpack.io/v1alpha2",
            "kind": "Image",
            "metadata": { "name": name, "namespace": "default" },
            "spec": { "tag": format!("registry.example.com/{}", name) },
        })
    }

    #[test]
    fn test_mutating_calls_are_recorded_in_call_order() {
        let client = RecordingClient::new();

        client.create("default", image("one")).unwrap();
        client.update("default", image("one")).unwrap();
        client.delete("Image", "default", "one").unwrap();

        let actions = client.actions().unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].verb, Verb::Create);
        assert_eq!(actions[1].verb, Verb::Update);
        assert_eq!(actions[2].verb, Verb::Delete);
    }

    #[test]
    fn test_read_only_calls_are_never_recorded() {
        let client = BackendBuilder::new()
            .with_object(image("seeded"))
            .build()
            .unwrap();

        client.get("Image", "default", "seeded").unwrap();
        client.list("Image", Some("default")).unwrap();
        client.list("Image", None).unwrap();

        assert!(client.actions().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_objects_do_not_appear_in_the_log() {
        let client = BackendBuilder::new()
            .with_objects(vec![image("a"), image("b")])
            .build()
            .unwrap();

        assert!(client.actions().unwrap().is_empty());
        assert_eq!(client.list("Image", Some("default")).unwrap().len(), 2);
    }

    #[test]
    fn test_action_recorded_even_when_backend_rejects_the_call() {
        let client = RecordingClient::new();

        // No object named "ghost" exists, so the delete fails.
        assert!(client.delete("Image", "default", "ghost").is_err());

        let actions = client.actions().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].verb, Verb::Delete);
        assert_eq!(actions[0].name(), Some("ghost"));
    }

    #[test]
    fn test_recorded_create_carries_the_object_as_submitted() {
        let client = RecordingClient::new();
        let submitted = image("one");

        let created = client.create("default", submitted.clone()).unwrap();
        // The backend fills server-side metadata on its copy.
        assert_eq!(created["metadata"]["resourceVersion"], "1");

        let actions = client.actions().unwrap();
        assert_eq!(actions[0].object(), Some(&submitted));
    }

    #[test]
    fn test_patch_records_raw_bytes() {
        let client = BackendBuilder::new()
            .with_object(image("one"))
            .build()
            .unwrap();

        let patch = br#"{"spec":{"tag":"registry.example.com/patched"}}"#;
        client.patch("Image", "default", "one", patch).unwrap();

        let actions = client.actions().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].verb, Verb::Patch);
        assert_eq!(actions[0].patch_bytes(), Some(patch.as_slice()));

        let patched = client.get("Image", "default", "one").unwrap();
        assert_eq!(patched["spec"]["tag"], "registry.example.com/patched");
    }

    #[test]
    fn test_delete_collection_recorded_with_no_payload() {
        let client = BackendBuilder::new()
            .with_objects(vec![image("a"), image("b")])
            .build()
            .unwrap();

        let removed = client.delete_collection("Image", "default").unwrap();
        assert_eq!(removed.len(), 2);

        let actions = client.actions().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].verb, Verb::DeleteCollection);
        assert_eq!(actions[0].payload, ActionPayload::Collection);
    }

    #[test]
    fn test_clones_share_the_same_log() {
        let client = RecordingClient::new();
        let other = client.clone();

        client.create("default", image("one")).unwrap();
        other.create("default", image("two")).unwrap();

        assert_eq!(client.actions().unwrap().len(), 2);
        assert_eq!(other.actions().unwrap().len(), 2);
    }

    #[test]
    fn test_action_log_is_append_only() {
        let log = ActionLog::new();
        assert!(log.is_empty());

        log.record(Action::delete("Image", "default", "a"));
        log.record(Action::delete("Image", "default", "a"));

        // Duplicates are kept; nothing is deduplicated or reordered.
        let actions = log.actions().unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], actions[1]);
    }

    #[test]
    fn test_recorder_list_classifies_each_backend_in_order() {
        let kpack = RecordingClient::new();
        let k8s = RecordingClient::new();

        kpack.create("default", image("one")).unwrap();
        k8s.create(
            "default",
            json!({
                "apiVersion": "v1",
                "kind": "Secret",
                "metadata": { "name": "registry-creds", "namespace": "default" },
            }),
        )
        .unwrap();
        kpack.delete("Image", "default", "one").unwrap();

        let list = ActionRecorderList(vec![
            Arc::new(kpack) as Arc<dyn ActionRecorder>,
            Arc::new(k8s) as Arc<dyn ActionRecorder>,
        ]);

        let by_verb = list.actions_by_verb().unwrap();
        assert_eq!(by_verb.creates.len(), 2);
        assert_eq!(by_verb.deletes.len(), 1);
        // Backend order, then call order within each backend.
        assert_eq!(by_verb.creates[0].kind, "Image");
        assert_eq!(by_verb.creates[1].kind, "Secret");
    }
}
