use form_fill::*;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_options_save_and_load() {
    let temp = NamedTempFile::new().unwrap();
    let options = GenerationOptions {
        output_dir: PathBuf::from("/var/forms"),
        io_timeout_secs: 5,
        ..Default::default()
    };

    options.save(temp.path()).await.unwrap();
    let loaded = GenerationOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_options_file_uses_defaults() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), r#"{"templates_dir": "/opt/templates"}"#).unwrap();

    let loaded = GenerationOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded.templates_dir, PathBuf::from("/opt/templates"));
    assert_eq!(loaded.output_dir, PathBuf::from("./generated_forms"));
    assert_eq!(
        loaded.template_path(FormType::Ibhs),
        PathBuf::from("/opt/templates/ibhs_template.pdf")
    );
}

#[tokio::test]
async fn test_malformed_options_file() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), "{ not json").unwrap();

    match GenerationOptions::load(temp.path()).await {
        Err(FormError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_schema_override_file() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(
        temp.path(),
        r#"{"communityCare": [{"name": "recipient_name", "page": 0, "position": [100.0, 120.0]}]}"#,
    )
    .unwrap();

    let registry = SchemaRegistry::from_json_file(temp.path()).await.unwrap();
    let schema = registry.get(FormType::CommunityCare).unwrap();
    assert_eq!(schema.field_count(), 1);
    let field = schema.field("recipient_name").unwrap();
    assert_eq!(field.mode, RenderMode::Plain);
    assert_eq!(field.size, 10.0);
}

#[tokio::test]
async fn test_invalid_schema_override_rejected() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(
        temp.path(),
        r#"{"ibhs": [{"name": "dob", "page": 0, "position": [900.0, 120.0]}]}"#,
    )
    .unwrap();

    assert!(matches!(
        SchemaRegistry::from_json_file(temp.path()).await,
        Err(FormError::InvalidSchema(_))
    ));
}
