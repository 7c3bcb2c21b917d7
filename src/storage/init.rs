//! Storage initialization
//!
//! Handles first-run setup: directories, default settings and empty data
//! files.

use crate::config::paths::HearthPaths;
use crate::config::settings::Settings;
use crate::error::HearthError;

use super::file_io::write_json_atomic;

/// Initialize storage for a new household
///
/// Existing files are left alone, so running this twice is harmless.
pub fn initialize_storage(paths: &HearthPaths, household_name: Option<&str>) -> Result<(), HearthError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        let mut settings = Settings::default();
        if let Some(name) = household_name.map(str::trim).filter(|n| !n.is_empty()) {
            settings.household_name = name.to_string();
        }
        settings.save(paths)?;
    }

    for (file, key) in [
        (paths.members_file(), "members"),
        (paths.expenses_file(), "expenses"),
        (paths.settlements_file(), "settlements"),
        (paths.chores_file(), "chores"),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &serde_json::json!({ key: [] }))?;
        }
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &HearthPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemberRepository;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths, Some("Flat 4")).unwrap();
        assert!(!needs_initialization(&paths));

        assert!(paths.members_file().exists());
        assert!(paths.chores_file().exists());
        assert!(paths.export_dir().exists());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.household_name, "Flat 4");
    }

    #[test]
    fn test_empty_files_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, None).unwrap();

        let repo = MemberRepository::new(paths.members_file());
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, Some("First")).unwrap();
        initialize_storage(&paths, Some("Second")).unwrap();

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.household_name, "First");
    }
}
