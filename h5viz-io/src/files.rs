//! File helpers: output path checks, JSON/YAML persistence and zip extraction.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use zip::ZipArchive;

use crate::{Error, Result};

/// Default JSON indentation width.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Validate an output path before writing to it.
///
/// With `mkdir`, missing parent directories are created first.
///
/// # Errors
/// Returns [`Error::AlreadyExists`] if the file exists and overwriting is not
/// allowed, or [`Error::InvalidFormat`] if the parent is missing or is not a
/// directory.
pub fn prepare_filepath_for_saving<P: AsRef<Path>>(
    path: P,
    mkdir: bool,
    allow_overwrite: bool,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if mkdir {
        fs::create_dir_all(&parent)?;
    }
    if !allow_overwrite && path.exists() {
        return Err(Error::AlreadyExists(path.display().to_string()));
    }
    if !parent.exists() {
        return Err(Error::InvalidFormat(format!(
            "{} does not exist",
            parent.display()
        )));
    }
    if !parent.is_dir() {
        return Err(Error::InvalidFormat(format!(
            "{} is not a directory",
            parent.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// Options shared by [`json_save`] and [`yaml_save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveFileOptions {
    pub mkdir: bool,
    pub allow_overwrite: bool,
    /// JSON indentation width; YAML always indents by two spaces.
    pub indent: usize,
}

impl Default for SaveFileOptions {
    fn default() -> Self {
        Self {
            mkdir: false,
            allow_overwrite: true,
            indent: DEFAULT_JSON_INDENT,
        }
    }
}

/// Save a value as pretty-printed JSON.
///
/// # Errors
/// Returns an error if the path is rejected or serialization fails.
pub fn json_save<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
    options: &SaveFileOptions,
) -> Result<()> {
    let path = prepare_filepath_for_saving(path, options.mkdir, options.allow_overwrite)?;
    let indent = " ".repeat(options.indent);
    let mut writer = BufWriter::new(fs::File::create(&path)?);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Load a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn json_load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let reader = BufReader::new(fs::File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Save a value as YAML.
///
/// # Errors
/// Returns an error if the path is rejected or serialization fails.
pub fn yaml_save<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
    options: &SaveFileOptions,
) -> Result<()> {
    let path = prepare_filepath_for_saving(path, options.mkdir, options.allow_overwrite)?;
    let mut writer = BufWriter::new(fs::File::create(&path)?);
    serde_yaml::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Load a YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn yaml_load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let reader = BufReader::new(fs::File::open(path)?);
    Ok(serde_yaml::from_reader(reader)?)
}

/// Load a JSON or YAML file, chosen by suffix (`.json`, `.yaml`, `.yml`).
///
/// # Errors
/// Returns [`Error::InvalidFormat`] for other suffixes, or a parse error.
pub fn load_by_suffix<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => json_load(path),
        Some("yaml" | "yml") => yaml_load(path),
        _ => Err(Error::InvalidFormat(format!(
            "{}: expected a .json, .yaml or .yml file",
            path.display()
        ))),
    }
}

/// Extract a zip archive.
///
/// Extracts next to the archive when `dest` is `None`. Returns the
/// destination directory.
///
/// # Errors
/// Returns an error if the archive cannot be opened or extracted.
pub fn extract_zip<P: AsRef<Path>>(path: P, dest: Option<&Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let dest = match dest {
        Some(d) => d.to_path_buf(),
        None => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    };
    info!("Extracting {} to {}", path.display(), dest.display());
    let mut archive = ZipArchive::new(fs::File::open(path)?)?;
    archive.extract(&dest)?;
    info!("Completed zip extraction ({} entries)", archive.len());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        name: String,
        dpi: u32,
        scale: Vec<f64>,
    }

    fn settings() -> Settings {
        Settings {
            name: "run".to_string(),
            dpi: 150,
            scale: vec![0.5, 2.0],
        }
    }

    #[test]
    fn test_prepare_filepath_rules() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("out.json");
        assert!(matches!(
            prepare_filepath_for_saving(&nested, false, true),
            Err(Error::InvalidFormat(_))
        ));
        prepare_filepath_for_saving(&nested, true, true).unwrap();
        assert!(nested.parent().unwrap().is_dir());

        fs::write(&nested, b"{}").unwrap();
        assert!(matches!(
            prepare_filepath_for_saving(&nested, false, false),
            Err(Error::AlreadyExists(_))
        ));
        assert!(prepare_filepath_for_saving(&nested, false, true).is_ok());
    }

    #[test]
    fn test_json_roundtrip_with_indent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let options = SaveFileOptions {
            indent: 2,
            ..SaveFileOptions::default()
        };
        json_save(&settings(), &path, &options).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"name\": \"run\""));
        let loaded: Settings = json_load(&path).unwrap();
        assert_eq!(loaded, settings());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.yaml");
        let options = SaveFileOptions {
            mkdir: true,
            ..SaveFileOptions::default()
        };
        yaml_save(&settings(), &path, &options).unwrap();
        let loaded: Settings = yaml_load(&path).unwrap();
        assert_eq!(loaded, settings());
        let via_suffix: Settings = load_by_suffix(&path).unwrap();
        assert_eq!(via_suffix, settings());
    }

    #[test]
    fn test_config_suffix_required() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "").unwrap();
        let result: Result<BTreeMap<String, String>> = load_by_suffix(&path);
        assert!(matches!(result, Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_extract_zip_defaults_to_archive_dir() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        {
            let mut zip = ZipWriter::new(fs::File::create(&archive).unwrap());
            zip.start_file("inner/hello.txt", SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"hello").unwrap();
            zip.finish().unwrap();
        }
        let dest = extract_zip(&archive, None).unwrap();
        assert_eq!(dest, dir.path());
        let text = fs::read_to_string(dir.path().join("inner").join("hello.txt")).unwrap();
        assert_eq!(text, "hello");

        let other = tempdir().unwrap();
        extract_zip(&archive, Some(other.path())).unwrap();
        assert!(other.path().join("inner").join("hello.txt").exists());
    }
}
