//! Hierarchical trees: printing, writing and reading HDF5 group structure.
//!
//! A [`Tree`] mirrors an HDF5 file one-to-one: nested trees become groups and
//! [`DatasetValue`] leaves become datasets. Both in-memory trees and open HDF5
//! groups implement [`Hierarchy`], so the same printer lists either.

use std::collections::btree_map::{self, BTreeMap};
use std::io::{self, Write};
use std::path::Path;

use hdf5::{Dataset, File, Group};
use log::{debug, info};
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::{dtype_name, format_shape, DatasetValue};
use crate::{Error, Result};

const GROUP_RULE: &str = "----------------";

/// A tree node: a nested tree (group) or a leaf value (dataset).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Tree),
    Dataset(DatasetValue),
}

/// Nested mapping of names to groups and datasets.
///
/// Members enumerate in sorted order, matching HDF5's name-ordered listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    members: BTreeMap<String, Node>,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a leaf value, replacing any existing member of that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<DatasetValue>) -> &mut Self {
        self.members.insert(name.into(), Node::Dataset(value.into()));
        self
    }

    /// Insert a nested tree, replacing any existing member of that name.
    pub fn insert_group(&mut self, name: impl Into<String>, group: Tree) -> &mut Self {
        self.members.insert(name.into(), Node::Group(group));
        self
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<DatasetValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style [`insert_group`](Self::insert_group).
    #[must_use]
    pub fn with_group(mut self, name: impl Into<String>, group: Tree) -> Self {
        self.insert_group(name, group);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.members.get(name)
    }

    /// Look up a member by `/`-separated path.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let mut node = self.members.get(parts.next()?)?;
        for part in parts {
            match node {
                Node::Group(tree) => node = tree.members.get(part)?,
                Node::Dataset(_) => return None,
            }
        }
        Some(node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Node> {
        self.members.iter()
    }

    /// Convert a JSON document into a tree.
    ///
    /// Objects become groups. Booleans, numbers, strings and rectangular
    /// arrays of one element kind become datasets; integer arrays stay
    /// integral, arrays mixing integers and floats become `float64`.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedType`] for a non-object root, `null`,
    /// ragged arrays, or arrays mixing element kinds.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => json_group("", value),
            other => Err(Error::UnsupportedType {
                path: "/".to_string(),
                ty: json_kind(other).to_string(),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a String, &'a Node);
    type IntoIter = btree_map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// A member of a [`Hierarchy`] level.
#[derive(Debug, Clone)]
pub enum Member<G> {
    Group(G),
    Dataset { shape: Vec<usize>, dtype: String },
    /// Anything that is neither a group nor a dataset (named types, dangling links).
    Other { kind: String },
}

/// Something with named members that may nest.
pub trait Hierarchy: Sized {
    /// Members of this level, in listing order.
    ///
    /// # Errors
    /// Returns an error if the members cannot be enumerated.
    fn members(&self) -> Result<Vec<(String, Member<Self>)>>;

    /// Metadata attached to this level.
    ///
    /// # Errors
    /// Returns an error if an attribute cannot be read.
    fn metadata(&self) -> Result<Vec<(String, DatasetValue)>>;
}

impl Hierarchy for Group {
    fn members(&self) -> Result<Vec<(String, Member<Self>)>> {
        let mut members = Vec::new();
        for name in self.member_names()? {
            let member = if let Ok(group) = self.group(&name) {
                Member::Group(group)
            } else if let Ok(dataset) = self.dataset(&name) {
                let dtype = dataset
                    .dtype()
                    .and_then(|t| t.to_descriptor())
                    .map_or_else(|_| "unknown".to_string(), |d| dtype_name(&d));
                Member::Dataset {
                    shape: dataset.shape(),
                    dtype,
                }
            } else {
                Member::Other {
                    kind: "other".to_string(),
                }
            };
            members.push((name, member));
        }
        Ok(members)
    }

    fn metadata(&self) -> Result<Vec<(String, DatasetValue)>> {
        self.attr_names()?
            .into_iter()
            .map(|name| {
                let attr = self.attr(&name)?;
                Ok((name, DatasetValue::read(&attr)?))
            })
            .collect()
    }
}

impl<'a> Hierarchy for &'a Tree {
    fn members(&self) -> Result<Vec<(String, Member<Self>)>> {
        let tree: &'a Tree = *self;
        Ok(tree
            .members
            .iter()
            .map(|(name, node)| {
                let member = match node {
                    Node::Group(tree) => Member::Group(tree),
                    Node::Dataset(value) => Member::Dataset {
                        shape: value.shape(),
                        dtype: value.dtype().to_string(),
                    },
                };
                (name.clone(), member)
            })
            .collect())
    }

    fn metadata(&self) -> Result<Vec<(String, DatasetValue)>> {
        Ok(Vec::new())
    }
}

/// Options for [`show_item_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    /// List each level's metadata before its members.
    pub show_metadata: bool,
    /// Print metadata values rather than their shape and dtype.
    pub print_metadata: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            show_metadata: true,
            print_metadata: false,
        }
    }
}

/// Recursively print every group and dataset of `source`.
///
/// # Errors
/// Returns an error if a level cannot be enumerated or the output fails.
pub fn show_item_tree<H: Hierarchy, W: Write>(
    source: &H,
    out: &mut W,
    options: &ShowOptions,
) -> Result<()> {
    show_level(source, out, options, 0, true)
}

/// Print only the top level of `source`.
///
/// # Errors
/// Returns an error if the level cannot be enumerated or the output fails.
pub fn show_group_items<H: Hierarchy, W: Write>(source: &H, out: &mut W) -> Result<()> {
    let options = ShowOptions {
        show_metadata: false,
        print_metadata: false,
    };
    show_level(source, out, &options, 0, false)
}

/// Open an HDF5 file read-only and print its tree.
///
/// # Errors
/// Returns an error if the file cannot be opened or printed.
pub fn show_file_tree<P: AsRef<Path>, W: Write>(
    path: P,
    out: &mut W,
    options: &ShowOptions,
) -> Result<()> {
    let file = File::open(path)?;
    show_item_tree(&*file, out, options)
}

fn show_level<H: Hierarchy, W: Write>(
    source: &H,
    out: &mut W,
    options: &ShowOptions,
    depth: usize,
    recurse: bool,
) -> Result<()> {
    let indent = "  ".repeat(depth);
    if options.show_metadata {
        for (name, value) in source.metadata()? {
            if options.print_metadata {
                writeln!(out, "{indent}METADATA: {name}: {value}")?;
            } else {
                writeln!(
                    out,
                    "{indent}METADATA: {name}: shape={} , dtype={}",
                    format_shape(&value.shape()),
                    value.dtype()
                )?;
            }
        }
    }

    for (index, (name, member)) in source.members()?.into_iter().enumerate() {
        let number = index + 1;
        match member {
            Member::Group(child) => {
                writeln!(out, "{indent}{number}. {name}:{GROUP_RULE}")?;
                if recurse {
                    show_level(&child, out, options, depth + 1, true)?;
                }
            }
            Member::Dataset { shape, dtype } => {
                writeln!(
                    out,
                    "{indent}{number}. {name}:   shape={} , dtype={dtype}",
                    format_shape(&shape)
                )?;
            }
            Member::Other { kind } => {
                writeln!(out, "{indent}{number}. {name}:   type={kind}")?;
            }
        }
    }
    Ok(())
}

/// How [`write_tree`] treats the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Fail if the file exists.
    #[default]
    Create,
    /// Overwrite an existing file.
    Truncate,
    /// Open read-write (creating if missing) and add to it.
    Append,
}

/// Write `tree` to an HDF5 file.
///
/// With `show_tree`, logs a success banner and prints the resulting hierarchy
/// to stdout.
///
/// # Errors
/// Returns [`Error::AlreadyExists`] if the file exists in
/// [`WriteMode::Create`] or a member already exists in the target group, or
/// an HDF5 error.
pub fn write_tree<P: AsRef<Path>>(
    path: P,
    tree: &Tree,
    mode: WriteMode,
    show_tree: bool,
) -> Result<()> {
    let path = path.as_ref();
    let file = match mode {
        WriteMode::Create => {
            if path.exists() {
                return Err(Error::AlreadyExists(path.display().to_string()));
            }
            File::create_excl(path)?
        }
        WriteMode::Truncate => File::create(path)?,
        WriteMode::Append => File::append(path)?,
    };

    make_tree(&file, tree)?;
    file.flush()?;

    if show_tree {
        info!("==== Successfully wrote h5 file. Displaying h5 hierarchy ====");
        let stdout = io::stdout();
        show_item_tree(&*file, &mut stdout.lock(), &ShowOptions::default())?;
    }
    Ok(())
}

/// Mirror `tree` into `group`: nested trees become groups, leaves datasets.
///
/// # Errors
/// Returns [`Error::AlreadyExists`] if a member name is already taken, or an
/// HDF5 error.
pub fn make_tree(group: &Group, tree: &Tree) -> Result<()> {
    for (name, node) in tree {
        if group.link_exists(name) {
            return Err(Error::AlreadyExists(join_path(&group.name(), name)));
        }
        match node {
            Node::Group(subtree) => {
                debug!("Creating group {}", join_path(&group.name(), name));
                let child = group.create_group(name)?;
                make_tree(&child, subtree)?;
            }
            Node::Dataset(value) => {
                debug!(
                    "Writing dataset {} {} {}",
                    join_path(&group.name(), name),
                    format_shape(&value.shape()),
                    value.dtype()
                );
                value.write(group, name)?;
            }
        }
    }
    Ok(())
}

/// Read an HDF5 file into a tree.
///
/// # Errors
/// Returns an error if the file cannot be opened or a dataset has an
/// unsupported type.
pub fn read_tree<P: AsRef<Path>>(path: P) -> Result<Tree> {
    let file = File::open(path)?;
    read_group(&file)
}

/// Read a group and everything beneath it.
///
/// # Errors
/// Returns [`Error::UnsupportedType`] for datasets without a
/// [`DatasetValue`] counterpart, or an HDF5 error.
pub fn read_group(group: &Group) -> Result<Tree> {
    let mut tree = Tree::new();
    for name in group.member_names()? {
        if let Ok(child) = group.group(&name) {
            let subtree = read_group(&child)?;
            tree.insert_group(name, subtree);
        } else if let Ok(dataset) = group.dataset(&name) {
            let value = DatasetValue::read(&dataset)?;
            tree.insert(name, value);
        } else {
            debug!("Skipping {}", join_path(&group.name(), &name));
        }
    }
    Ok(tree)
}

struct Level {
    prefix: String,
    group: Group,
    names: std::vec::IntoIter<String>,
}

/// Depth-first iterator over every dataset beneath a group.
///
/// Yields `(path, dataset)` with paths of the form `/a/b/c` relative to the
/// starting group.
pub struct DatasetIter {
    stack: Vec<Level>,
}

impl Iterator for DatasetIter {
    type Item = Result<(String, Dataset)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            let Some(name) = level.names.next() else {
                self.stack.pop();
                continue;
            };
            let path = format!("{}/{name}", level.prefix);
            if let Ok(dataset) = level.group.dataset(&name) {
                return Some(Ok((path, dataset)));
            }
            let Ok(child) = level.group.group(&name) else {
                continue;
            };
            match child.member_names() {
                Ok(names) => self.stack.push(Level {
                    prefix: path,
                    group: child,
                    names: names.into_iter(),
                }),
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Iterate over every dataset beneath `group`, depth first.
///
/// # Errors
/// Returns an error if the group's members cannot be listed.
pub fn datasets(group: &Group) -> Result<DatasetIter> {
    let names = group.member_names()?;
    Ok(DatasetIter {
        stack: vec![Level {
            prefix: String::new(),
            group: group.clone(),
            names: names.into_iter(),
        }],
    })
}

fn join_path(parent: &str, name: &str) -> String {
    format!("{}/{name}", parent.trim_end_matches('/'))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn json_group(path: &str, value: &Value) -> Result<Tree> {
    let mut tree = Tree::new();
    if let Value::Object(map) = value {
        for (name, child) in map {
            let child_path = format!("{path}/{name}");
            match child {
                Value::Object(_) => {
                    let subtree = json_group(&child_path, child)?;
                    tree.insert_group(name.clone(), subtree);
                }
                leaf => {
                    let value = json_leaf(&child_path, leaf)?;
                    tree.insert(name.clone(), value);
                }
            }
        }
    }
    Ok(tree)
}

fn json_leaf(path: &str, value: &Value) -> Result<DatasetValue> {
    let unsupported = |ty: &str| Error::UnsupportedType {
        path: path.to_string(),
        ty: ty.to_string(),
    };
    match value {
        Value::Bool(b) => Ok(DatasetValue::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(DatasetValue::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(DatasetValue::from(u))
            } else {
                n.as_f64()
                    .map(DatasetValue::from)
                    .ok_or_else(|| unsupported("number"))
            }
        }
        Value::String(s) => Ok(DatasetValue::from(s.as_str())),
        Value::Array(_) => json_array(value).ok_or_else(|| unsupported("ragged or mixed array")),
        Value::Null | Value::Object(_) => Err(unsupported(json_kind(value))),
    }
}

fn json_array(value: &Value) -> Option<DatasetValue> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }
    let mut scalars = Vec::new();
    if !flatten(value, &shape, &mut scalars) {
        return None;
    }
    let dim = IxDyn(&shape);

    if scalars.is_empty() {
        return ArrayD::<f64>::from_shape_vec(dim, Vec::new()).ok().map(DatasetValue::from);
    }
    if scalars.iter().all(|v| v.is_boolean()) {
        let data = scalars.iter().filter_map(|v| v.as_bool()).collect();
        return ArrayD::from_shape_vec(dim, data).ok().map(DatasetValue::Bool);
    }
    if scalars.iter().all(|v| v.is_string()) {
        if shape.len() != 1 {
            return None;
        }
        let data = scalars
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        return Some(DatasetValue::Strings(data));
    }
    if !scalars.iter().all(|v| v.is_number()) {
        return None;
    }
    if scalars.iter().all(|v| v.is_i64()) {
        let data = scalars.iter().filter_map(|v| v.as_i64()).collect();
        return ArrayD::from_shape_vec(dim, data).ok().map(DatasetValue::I64);
    }
    if scalars.iter().all(|v| v.is_u64()) {
        let data = scalars.iter().filter_map(|v| v.as_u64()).collect();
        return ArrayD::from_shape_vec(dim, data).ok().map(DatasetValue::U64);
    }
    let data = scalars.iter().filter_map(|v| v.as_f64()).collect();
    ArrayD::from_shape_vec(dim, data).ok().map(DatasetValue::F64)
}

/// Collect the scalars of a nested array, checking it is rectangular.
fn flatten<'a>(value: &'a Value, shape: &[usize], out: &mut Vec<&'a Value>) -> bool {
    match (shape.split_first(), value) {
        (None, Value::Array(_)) => false,
        (None, scalar) => {
            out.push(scalar);
            true
        }
        (Some((&len, rest)), Value::Array(items)) if items.len() == len => {
            items.iter().all(|item| flatten(item, rest, out))
        }
        (Some(_), _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_tree() -> Tree {
        Tree::new()
            .with("b_array", array![[1.0, 2.0], [3.0, 4.0]])
            .with_group(
                "a_group",
                Tree::new()
                    .with("label", "cell")
                    .with_group("nested", Tree::new().with("ids", array![1_i32, 2, 3])),
            )
    }

    fn render<H: Hierarchy>(source: &H) -> String {
        let mut out = Vec::new();
        show_item_tree(source, &mut out, &ShowOptions::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_item_tree_format() {
        let tree = sample_tree();
        let expected = "\
1. a_group:----------------
  1. label:   shape=() , dtype=str
  2. nested:----------------
    1. ids:   shape=(3,) , dtype=int32
2. b_array:   shape=(2, 2) , dtype=float64
";
        assert_eq!(render(&&tree), expected);
    }

    #[test]
    fn test_show_group_items_top_level_only() {
        let tree = sample_tree();
        let mut out = Vec::new();
        show_group_items(&&tree, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "1. a_group:----------------\n2. b_array:   shape=(2, 2) , dtype=float64\n"
        );
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.h5");
        let tree = sample_tree();
        write_tree(&path, &tree, WriteMode::Create, false).unwrap();
        assert_eq!(read_tree(&path).unwrap(), tree);

        let file = File::open(&path).unwrap();
        assert_eq!(render(&*file), render(&&tree));
    }

    #[test]
    fn test_create_mode_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.h5");
        write_tree(&path, &sample_tree(), WriteMode::Create, false).unwrap();
        let err = write_tree(&path, &sample_tree(), WriteMode::Create, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        write_tree(&path, &sample_tree(), WriteMode::Truncate, false).unwrap();
    }

    #[test]
    fn test_append_refuses_existing_member() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.h5");
        write_tree(&path, &sample_tree(), WriteMode::Create, false).unwrap();

        let extra = Tree::new().with("c_scalar", 2.5);
        write_tree(&path, &extra, WriteMode::Append, false).unwrap();
        assert_eq!(read_tree(&path).unwrap().len(), 3);

        let err = write_tree(&path, &extra, WriteMode::Append, false).unwrap_err();
        match err {
            Error::AlreadyExists(name) => assert_eq!(name, "/c_scalar"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_dataset_iterator_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.h5");
        write_tree(&path, &sample_tree(), WriteMode::Create, false).unwrap();
        let file = File::open(&path).unwrap();
        let paths: Vec<String> = datasets(&file)
            .unwrap()
            .map(|item| item.unwrap().0)
            .collect();
        assert_eq!(
            paths,
            vec!["/a_group/label", "/a_group/nested/ids", "/b_array"]
        );
    }

    #[test]
    fn test_metadata_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attrs.h5");
        let file = File::create(&path).unwrap();
        file.new_attr::<u32>()
            .create("version")
            .unwrap()
            .write_scalar(&3_u32)
            .unwrap();
        let mut out = Vec::new();
        show_item_tree(
            &*file,
            &mut out,
            &ShowOptions {
                show_metadata: true,
                print_metadata: true,
            },
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "METADATA: version: 3\n");

        let mut out = Vec::new();
        show_item_tree(&*file, &mut out, &ShowOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "METADATA: version: shape=() , dtype=uint32\n"
        );
    }

    #[test]
    fn test_from_json() {
        let doc = json!({
            "meta": {"name": "run1", "ok": true},
            "frames": [[1, 2], [3, 4]],
            "scale": [0.5, 1],
            "tags": ["a", "b"]
        });
        let tree = Tree::from_json(&doc).unwrap();
        assert_eq!(
            tree.get_path("frames"),
            Some(&Node::Dataset(DatasetValue::I64(
                array![[1_i64, 2], [3, 4]].into_dyn()
            )))
        );
        assert_eq!(
            tree.get_path("scale"),
            Some(&Node::Dataset(DatasetValue::F64(array![0.5, 1.0].into_dyn())))
        );
        assert_eq!(
            tree.get_path("/meta/name"),
            Some(&Node::Dataset(DatasetValue::String("run1".to_string())))
        );
        assert!(matches!(tree.get_path("tags"), Some(Node::Dataset(DatasetValue::Strings(_)))));
    }

    #[derive(hdf5::H5Type, Clone, Copy)]
    #[repr(C)]
    struct Pair {
        a: i32,
        b: f64,
    }

    #[test]
    fn test_read_tree_rejects_compound_dataset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("compound.h5");
        let file = File::create(&path).unwrap();
        let pairs = ndarray::arr1(&[Pair { a: 1, b: 0.5 }, Pair { a: 2, b: 1.5 }]);
        file.new_dataset_builder()
            .with_data(&pairs)
            .create("pairs")
            .unwrap();
        drop(file);

        match read_tree(&path).unwrap_err() {
            Error::UnsupportedType { path, .. } => assert_eq!(path, "/pairs"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_dangling_link_lists_as_other() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.h5");
        let file = File::create(&path).unwrap();
        make_tree(&file, &Tree::new().with("data", array![1.0, 2.0])).unwrap();
        file.link_soft("/nowhere", "dangling").unwrap();

        let text = render(&*file);
        assert!(text.contains("1. dangling:   type=other"), "{text}");
        assert!(text.contains("2. data:   shape=(2,) , dtype=float64"), "{text}");
        drop(file);

        let tree = read_tree(&path).unwrap();
        assert!(tree.get("dangling").is_none());
        assert!(tree.get("data").is_some());
    }

    #[test]
    fn test_from_json_rejects_unsupported() {
        let null = json!({"a": {"b": null}});
        match Tree::from_json(&null).unwrap_err() {
            Error::UnsupportedType { path, ty } => {
                assert_eq!(path, "/a/b");
                assert_eq!(ty, "null");
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(matches!(
            Tree::from_json(&json!({"r": [[1, 2], [3]]})),
            Err(Error::UnsupportedType { .. })
        ));
        assert!(matches!(
            Tree::from_json(&json!({"m": [1, "x"]})),
            Err(Error::UnsupportedType { .. })
        ));
        assert!(matches!(
            Tree::from_json(&json!([1, 2])),
            Err(Error::UnsupportedType { .. })
        ));
    }
}
