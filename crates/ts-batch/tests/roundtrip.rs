use ts_batch::schema::*;
use ts_batch::{BatchError, ValidationError, load, load_json, load_yaml, save_json, save_yaml};

fn sample() -> QueryFile {
    QueryFile {
        version: 1,
        fluid: "nitrogen".to_string(),
        points: vec![
            PointDef::new(Some("ambient"), [("T", 273.15), ("P", 101_300.0)]),
            PointDef {
                label: None,
                inputs: [
                    ("T".to_string(), InputValue::from("0 C")),
                    ("P".to_string(), InputValue::from("1 atm")),
                ]
                .into_iter()
                .collect(),
            },
        ],
    }
}

#[test]
fn roundtrip_yaml() {
    let file = sample();
    let path = std::env::temp_dir().join("ts_batch_roundtrip.yaml");

    save_yaml(&path, &file).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(file, loaded);
}

#[test]
fn roundtrip_json() {
    let file = sample();
    let path = std::env::temp_dir().join("ts_batch_roundtrip.json");

    save_json(&path, &file).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(file, loaded);
    assert_eq!(load_json(&path).unwrap(), file);
}

#[test]
fn invalid_file_is_not_saved() {
    let mut file = sample();
    file.points.clear();
    let path = std::env::temp_dir().join("ts_batch_invalid.yaml");

    let err = save_yaml(&path, &file).unwrap_err();
    assert!(matches!(
        err,
        BatchError::Validation(ValidationError::NoPoints)
    ));
}

#[test]
fn malformed_yaml_is_reported() {
    let path = std::env::temp_dir().join("ts_batch_malformed.yaml");
    std::fs::write(&path, "version: [1\nfluid: nitrogen\n").unwrap();

    assert!(matches!(load_yaml(&path), Err(BatchError::Yaml(_))));
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("ts_batch_does_not_exist.yaml");
    assert!(matches!(load_yaml(&path), Err(BatchError::Io(_))));
}
