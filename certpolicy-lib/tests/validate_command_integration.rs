//! Integration tests for the `validate` and `init` commands.

use camino::Utf8PathBuf;
use certpolicy_lib::Host;
use std::fs;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
    exit_code: Option<i32>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
            exit_code: None,
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

#[tokio::test]
async fn test_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let config = Utf8PathBuf::from(dir.path().to_string_lossy().to_string()).join("certpolicy.toml");

    let mut host = TestHost::new();
    certpolicy_lib::run(&mut host, ["certpolicy", "init", config.as_str()]).await.unwrap();
    assert!(fs::metadata(&config).is_ok());

    let mut host = TestHost::new();
    certpolicy_lib::run(&mut host, ["certpolicy", "validate", "-c", config.as_str()])
        .await
        .unwrap();

    let output = host.output_str();
    assert!(output.contains("Configuration file is valid"), "got: {output}");
    assert_eq!(host.exit_code, None);
}

#[tokio::test]
async fn test_validate_rejects_unknown_plugin() {
    let dir = tempfile::tempdir().unwrap();
    let config = Utf8PathBuf::from(dir.path().to_string_lossy().to_string()).join("certpolicy.toml");
    fs::write(
        &config,
        r#"
[[policies]]
name = "with-plugin"

[policies.spec.plugins.rego.values]
query = "data.allow"
"#,
    )
    .unwrap();

    let mut host = TestHost::new();
    let result = certpolicy_lib::run(&mut host, ["certpolicy", "validate", "-c", config.as_str()]).await;

    let _ = result.unwrap_err();
    assert_eq!(host.exit_code, Some(1));
    assert!(
        host.output_str()
            .contains("with-plugin: plugins.rego: no evaluator with this name is registered")
    );
}

#[tokio::test]
async fn test_validate_rejects_duplicate_policies() {
    let dir = tempfile::tempdir().unwrap();
    let config = Utf8PathBuf::from(dir.path().to_string_lossy().to_string()).join("certpolicy.toml");
    fs::write(&config, "[[policies]]\nname = \"a\"\n\n[[policies]]\nname = \"a\"\n").unwrap();

    let mut host = TestHost::new();
    let err = certpolicy_lib::run(&mut host, ["certpolicy", "validate", "-c", config.as_str()])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("policy 'a' is defined more than once"));
    assert_eq!(host.exit_code, Some(1));
}
