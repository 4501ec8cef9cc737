#[cfg(test)]
mod tests {
    use crate::recorder::ActionRecorder;
    use crate::BackendBuilder;
    use serde_json::json;
    use std::io::Write;

    fn write_fixture(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("kpack-verify-fixtures");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_fixture_multi_document() {
        let path = write_fixture(
            "builders.yaml",
            "\
apiVersion: kpack.io/v1alpha2
kind: Builder
metadata:
  name: builder-one
---
apiVersion: kpack.io/v1alpha2
kind: Builder
metadata:
  name: builder-two
  namespace: other
",
        );

        let client = BackendBuilder::new()
            .load_fixture(&path)
            .unwrap()
            .build()
            .unwrap();

        // Namespace defaults to "default" when the fixture omits it.
        let one = client.get("Builder", "default", "builder-one").unwrap();
        assert_eq!(one["metadata"]["namespace"], "default");
        assert!(one["metadata"]["creationTimestamp"].is_string());

        let two = client.get("Builder", "other", "builder-two").unwrap();
        assert_eq!(two["metadata"]["name"], "builder-two");

        // Fixture loading seeds the store without recording actions.
        assert!(client.actions().unwrap().is_empty());
    }

    #[test]
    fn test_load_fixture_missing_file_errors() {
        let result = BackendBuilder::new().load_fixture("/nonexistent/fixture.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_fixture_dir_is_prepended() {
        write_fixture("stack.yaml", "\
apiVersion: kpack.io/v1alpha2
kind: Stack
metadata:
  name: base
");

        let client = BackendBuilder::new()
            .with_fixture_dir(std::env::temp_dir().join("kpack-verify-fixtures"))
            .load_fixture("stack.yaml")
            .unwrap()
            .build()
            .unwrap();

        assert!(client.get("Stack", "default", "base").is_ok());
    }

    #[test]
    fn test_build_rejects_object_without_kind() {
        let result = BackendBuilder::new()
            .with_object(json!({ "metadata": { "name": "no-kind" } }))
            .build();
        assert!(result.is_err());
    }
}
