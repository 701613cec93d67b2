use std::path::Path;
use texture_meta::{GeneratorError, MemoryStore, MetadataGenerator, MetadataTemplate};

#[test]
fn write_failure_aborts_scan() {
    let store = MemoryStore::new()
        .with_file("/tex/a.png", "")
        .with_file("/tex/b.png", "");
    store.set_read_only(true);

    let err = MetadataGenerator::new("data:tex", MetadataTemplate::default())
        .with_sorted(true)
        .run(&store, Path::new("/tex"))
        .unwrap_err();
    match err {
        GeneratorError::Write { path, source } => {
            assert_eq!(path, Path::new("/tex/a.yaml"));
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("expected write error, got {other:?}"),
    }
    assert_eq!(store.write_count(), 0);
    assert!(store.read("/tex/b.yaml").is_none());
}

#[test]
fn dry_run_survives_read_only_store() {
    let store = MemoryStore::new().with_file("/tex/a_normal.png", "");
    store.set_read_only(true);

    let report = MetadataGenerator::new("data:tex", MetadataTemplate::default())
        .with_dry_run(true)
        .run(&store, Path::new("/tex"))
        .unwrap();
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].output, "a_normal.yaml");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["written"][0]["usage"], "normal");
    assert_eq!(json["dry_run"], true);
}

#[test]
fn custom_template_receives_both_values() {
    let store = MemoryStore::new().with_file("/tex/floor_roughness.png", "");
    MetadataGenerator::new("data:floor", MetadataTemplate::new("{{usage}} @ {{path}}\n"))
        .run(&store, Path::new("/tex"))
        .unwrap();
    assert_eq!(
        store.read("/tex/floor_roughness.yaml").as_deref(),
        Some("roughness @ data:floor/floor_roughness.png\n")
    );
}
