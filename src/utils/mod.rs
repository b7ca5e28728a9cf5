//! Utility functions for the plugin host

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File names recognised as plugin manifests
pub const MANIFEST_FILE_NAMES: [&str; 2] = ["plugin.yaml", "plugin.yml"];

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(anyhow!("Path exists but is not a directory: {:?}", path));
    }
    Ok(())
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::full(&path_str)
        .map_err(|e| anyhow!("Failed to expand path {}: {}", path_str, e))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Whether a path names a plugin manifest file
pub fn is_manifest_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| MANIFEST_FILE_NAMES.iter().any(|m| name == *m))
        .unwrap_or(false)
}

/// Find all plugin manifests below a directory
pub fn find_manifest_files(dir: &Path) -> Vec<PathBuf> {
    let mut manifests: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_manifest_file(path))
        .collect();

    manifests.sort();
    manifests
}

/// Convert a plugin name to a directory name
pub fn sanitize_dirname(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_dirname() {
        assert_eq!(sanitize_dirname("Sample"), "sample");
        assert_eq!(sanitize_dirname("Sample Plugin"), "sample_plugin");
        assert_eq!(sanitize_dirname("a/b"), "a_b");
    }

    #[test]
    fn test_expand_path_env() {
        std::env::set_var("INVENTREE_PLUGINS_TEST_DIR", "/tmp/inventree");
        let expanded = expand_path(Path::new("$INVENTREE_PLUGINS_TEST_DIR/plugins")).unwrap();
        assert_eq!(expanded, PathBuf::from("/tmp/inventree/plugins"));

        let plain = expand_path(Path::new("./plugins")).unwrap();
        assert_eq!(plain, PathBuf::from("./plugins"));
    }

    #[test]
    fn test_find_manifest_files() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("sample");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("plugin.yaml"), "name: Sample").unwrap();
        fs::write(temp_dir.path().join("plugin.yml"), "name: Other").unwrap();
        fs::write(temp_dir.path().join("notes.yaml"), "x: 1").unwrap();

        let manifests = find_manifest_files(temp_dir.path());
        assert_eq!(manifests.len(), 2);
        assert!(manifests.iter().all(|p| is_manifest_file(p)));
    }

    #[test]
    fn test_ensure_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("b");

        ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());

        let file = temp_dir.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory(&file).is_err());
    }
}
