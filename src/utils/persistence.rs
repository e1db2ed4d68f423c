//! JSON persistence helpers for files under ~/.ballotbird/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.ballotbird/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".ballotbird");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.ballotbird/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir()?.join(filename))
}

/// Load a JSON file from ~/.ballotbird/, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(filename: &str) -> T {
    match save_path(filename) {
        Ok(path) => load_json_at(&path),
        Err(_) => T::default(),
    }
}

/// Load JSON from an explicit path, returning `T::default()` if missing or invalid.
pub fn load_json_at<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    read_json_at(path).ok().flatten().unwrap_or_default()
}

/// Read JSON from an explicit path. `Ok(None)` when the file does not
/// exist; a file that exists but does not parse is `InvalidData`.
pub fn read_json_at<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Save a value as pretty-printed JSON to an explicit path.
pub fn save_json_at<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ballotbird-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_save_path_format() {
        if let Ok(path) = save_path("test.json") {
            assert!(path.to_string_lossy().ends_with(".ballotbird/test.json"));
        }
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_at(&temp_file("nonexistent.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_invalid_returns_default() {
        let path = temp_file("invalid.json");
        fs::write(&path, "{ not json").unwrap();
        let val: Vec<String> = load_json_at(&path);
        assert!(val.is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_read_tells_missing_from_malformed() {
        let missing: io::Result<Option<Vec<String>>> = read_json_at(&temp_file("absent.json"));
        assert!(matches!(missing, Ok(None)));

        let path = temp_file("malformed.json");
        fs::write(&path, "[\"half").unwrap();
        let malformed: io::Result<Option<Vec<String>>> = read_json_at(&path);
        assert_eq!(malformed.unwrap_err().kind(), io::ErrorKind::InvalidData);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_file("persistence.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        save_json_at(&path, &data).expect("save should succeed");

        let loaded: Vec<String> = load_json_at(&path);
        assert_eq!(loaded, data);

        fs::remove_file(path).ok();
    }
}
