use std::fs;

use h5viz_io::{
    datasets, json_load, read_stack, read_tree, show_file_tree, write_tree, Error, ShowOptions,
    Tree, WriteMode,
};
use serde_json::Value;
use tempfile::tempdir;

const DOCUMENT: &str = r#"{
    "experiment": {
        "frames": [[[0, 1], [2, 3]], [[4, 5], [6, 7]]],
        "operator": "rh"
    },
    "weights": [0.25, 0.75]
}"#;

#[test]
fn test_json_document_to_hdf5() {
    let dir = tempdir().unwrap();
    let json_path = dir.path().join("doc.json");
    fs::write(&json_path, DOCUMENT).unwrap();
    let doc: Value = json_load(&json_path).unwrap();
    let tree = Tree::from_json(&doc).unwrap();

    let h5_path = dir.path().join("doc.h5");
    write_tree(&h5_path, &tree, WriteMode::Create, true).unwrap();
    assert_eq!(read_tree(&h5_path).unwrap(), tree);

    let mut out = Vec::new();
    show_file_tree(&h5_path, &mut out, &ShowOptions::default()).unwrap();
    let listing = String::from_utf8(out).unwrap();
    assert_eq!(
        listing,
        "\
1. experiment:----------------
  1. frames:   shape=(2, 2, 2) , dtype=int64
  2. operator:   shape=() , dtype=str
2. weights:   shape=(2,) , dtype=float64
"
    );

    let file = hdf5::File::open(&h5_path).unwrap();
    let paths: Vec<String> = datasets(&file)
        .unwrap()
        .map(|item| item.map(|(path, _)| path))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        paths,
        vec!["/experiment/frames", "/experiment/operator", "/weights"]
    );

    let stack = read_stack(&h5_path, "experiment/frames").unwrap();
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.frame_dim(), (2, 2));

    let err = write_tree(&h5_path, &tree, WriteMode::Create, false).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)));
}
