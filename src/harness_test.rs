#[cfg(test)]
mod tests {
    use crate::recorder::ActionRecorder;
    use crate::{
        assert_actions, verify_actions, Action, BackendBuilder, Error, Expectation, Result,
    };
    use serde_json::json;
    use std::panic::AssertUnwindSafe;

    fn image(name: &str, tag: &str) -> serde_json::Value {
        json!({
            "apiVersion": "kpack.io/v1alpha2",
            "kind": "Image",
            "metadata": { "name": name, "namespace": "default" },
            "spec": { "tag": tag },
        })
    }

    #[test]
    fn test_matching_scenario_passes() {
        // A save-style command: update an existing image, create a secret
        // it references, delete a stale one.
        let client = BackendBuilder::new()
            .with_object(image("app", "registry.example.com/app"))
            .build()
            .unwrap();

        let secret = json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": { "name": "registry-creds", "namespace": "default" },
        });
        client.create("default", secret.clone()).unwrap();
        client
            .update("default", image("app", "registry.example.com/app:v2"))
            .unwrap();
        client.delete("Image", "default", "stale").ok();

        let expect = Expectation::new()
            .create(secret)
            .update(image("app", "registry.example.com/app:v2"))
            .delete("stale");

        let discrepancies = verify_actions(&client, &expect).unwrap();
        assert!(discrepancies.is_empty(), "{:?}", discrepancies);
    }

    #[test]
    fn test_under_performing_command_reports_missing() {
        let client = BackendBuilder::new().build().unwrap();
        client
            .create("default", image("a", "registry.example.com/a"))
            .unwrap();

        let expect = Expectation::new()
            .create(image("a", "registry.example.com/a"))
            .create(image("b", "registry.example.com/b"));

        let discrepancies = verify_actions(&client, &expect).unwrap();
        assert_eq!(discrepancies.len(), 1);
        assert!(discrepancies[0].to_string().starts_with("Missing create:"));
    }

    #[test]
    fn test_assert_actions_passes_on_match() {
        let client = BackendBuilder::new().build().unwrap();
        client
            .create("default", image("a", "registry.example.com/a"))
            .unwrap();

        assert_actions(
            &client,
            &Expectation::new().create(image("a", "registry.example.com/a")),
        );
    }

    #[test]
    fn test_assert_actions_reports_every_discrepancy_at_once() {
        let client = BackendBuilder::new()
            .with_object(image("seeded", "registry.example.com/seeded"))
            .build()
            .unwrap();

        client.delete("Image", "default", "seeded").unwrap();
        client
            .patch("Image", "default", "ghost", b"{}")
            .ok();

        let expect = Expectation::new().create(image("a", "registry.example.com/a"));

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            assert_actions(&client, &expect);
        }));

        let err = result.unwrap_err();
        let message = err
            .downcast_ref::<String>()
            .expect("panic payload should be a string");
        assert!(message.contains("Missing create:"), "{}", message);
        assert!(message.contains("Extra delete: seeded"), "{}", message);
        assert!(message.contains("Extra patch:"), "{}", message);
    }

    struct FailingRecorder;

    impl ActionRecorder for FailingRecorder {
        fn actions(&self) -> Result<Vec<Action>> {
            Err(Error::Internal("cannot enumerate actions".to_string()))
        }
    }

    #[test]
    fn test_harness_fault_aborts_instead_of_accumulating() {
        let result = verify_actions(&FailingRecorder, &Expectation::new());
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[test]
    fn test_fresh_backends_are_isolated() {
        let first = BackendBuilder::new().build().unwrap();
        first
            .create("default", image("a", "registry.example.com/a"))
            .unwrap();

        // A second backend never sees the first one's history.
        let second = BackendBuilder::new().build().unwrap();
        assert!(verify_actions(&second, &Expectation::new())
            .unwrap()
            .is_empty());
    }
}
