use anyhow::Result;
use std::path::PathBuf;

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "BUSTERS_DATA_DIR";
/// Overrides the config file location.
pub const CONFIG_ENV: &str = "BUSTERS_CONFIG";

pub const USER_STORE_FILE: &str = "user_preferences.json";
pub const CATALOG_FILE: &str = "activities.json";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// `~/.busters`, holding the config file and the default data directory.
pub fn busters_home() -> Result<PathBuf> {
    Ok(home_dir()?.join(".busters"))
}

/// Returns the data directory: `BUSTERS_DATA_DIR` or `~/.busters/data`.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(custom) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(custom));
    }
    Ok(busters_home()?.join("data"))
}

pub fn user_store_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(USER_STORE_FILE))
}

pub fn catalog_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(CATALOG_FILE))
}

/// Returns the path to the TOML config file, if one can be located.
pub fn config_file() -> Option<PathBuf> {
    if let Some(custom) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(custom));
    }
    busters_home().ok().map(|h| h.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use busters_test_utils::{env_guard, set_env_var, TestFixture};

    #[test]
    fn data_dir_defaults_under_home() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        let _home = fixture.home_guard();
        let _data = set_env_var(DATA_DIR_ENV, None);

        let expected = fixture.home_path().join(".busters/data");
        assert_eq!(data_dir().unwrap(), expected);
        assert_eq!(user_store_path().unwrap(), expected.join("user_preferences.json"));
        assert_eq!(catalog_path().unwrap(), expected.join("activities.json"));
    }

    #[test]
    fn data_dir_env_override_wins() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        let _data = fixture.data_dir_guard();
        assert_eq!(data_dir().unwrap(), fixture.data_dir);
    }

    #[test]
    fn empty_override_is_ignored() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        let _home = fixture.home_guard();
        let _data = set_env_var(DATA_DIR_ENV, Some(""));
        assert_eq!(data_dir().unwrap(), fixture.home_path().join(".busters/data"));
    }

    #[test]
    fn config_file_honors_override() {
        let _g = env_guard();
        let fixture = TestFixture::new().unwrap();
        let _home = fixture.home_guard();
        let _cfg = set_env_var(CONFIG_ENV, None);
        assert_eq!(
            config_file(),
            Some(fixture.home_path().join(".busters/config.toml"))
        );

        let _cfg = set_env_var(CONFIG_ENV, Some("/etc/busters.toml"));
        assert_eq!(config_file(), Some(PathBuf::from("/etc/busters.toml")));
    }
}
