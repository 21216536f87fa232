//! File I/O for the best solve time.
//!
//! Format of the best-time file (little endian):
//! - u64: best time in milliseconds

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "cubeplay";
const BEST_TIME_FILE: &str = "best_time.bin";

/// Default location of the best-time file inside the user's data directory.
pub fn default_best_time_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(BEST_TIME_FILE))
}

/// Writes the best time, creating parent directories as needed.
pub fn save_best_time(path: &Path, best: Duration) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let millis = u64::try_from(best.as_millis()).unwrap_or(u64::MAX);
    let mut file = File::create(path)?;
    file.write_all(&millis.to_le_bytes())?;
    Ok(())
}

/// Reads the best time; `None` if the file is missing or truncated, or holds
/// a zero time that no run could ever beat.
pub fn load_best_time(path: &Path) -> Option<Duration> {
    let mut file = File::open(path).ok()?;
    let mut u64_buffer = [0u8; 8];
    file.read_exact(&mut u64_buffer).ok()?;
    match u64::from_le_bytes(u64_buffer) {
        0 => None,
        millis => Some(Duration::from_millis(millis)),
    }
}

/// Deletes the best-time file. A missing file is not an error.
pub fn clear_best_time(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cubeplay-test-{}-{name}", std::process::id()))
            .join(BEST_TIME_FILE)
    }

    #[test]
    fn test_best_time_roundtrip() {
        let path = scratch_path("roundtrip");
        save_best_time(&path, Duration::from_millis(12_340)).unwrap();
        assert_eq!(load_best_time(&path), Some(Duration::from_millis(12_340)));

        clear_best_time(&path).unwrap();
        assert_eq!(load_best_time(&path), None);
        // clearing twice is fine
        clear_best_time(&path).unwrap();
        let _ = fs::remove_dir(path.parent().unwrap());
    }

    #[test]
    fn test_zero_best_time_loads_nothing() {
        let path = scratch_path("zero");
        save_best_time(&path, Duration::ZERO).unwrap();
        assert_eq!(load_best_time(&path), None);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_truncated_file_loads_nothing() {
        let path = scratch_path("truncated");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [1u8, 2, 3]).unwrap();
        assert_eq!(load_best_time(&path), None);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
