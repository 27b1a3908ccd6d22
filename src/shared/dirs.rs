use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "desktop-dialogs";

const DEFAULT_DATA_DIRS: [&str; 2] = ["/usr/local/share", "/usr/share"];

/// XDG base directories, resolved once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XdgDirs {
    pub home: Option<PathBuf>,
    pub config_home: Option<PathBuf>,
    pub data_home: Option<PathBuf>,
    pub state_home: Option<PathBuf>,
    pub data_dirs: Vec<PathBuf>,
}

impl XdgDirs {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let home = lookup("HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let base = |var: &str, fallback: &str| -> Option<PathBuf> {
            lookup(var)
                .map(PathBuf::from)
                .filter(|path| path.is_absolute())
                .or_else(|| home.as_ref().map(|home| home.join(fallback)))
        };
        let config_home = base("XDG_CONFIG_HOME", ".config");
        let data_home = base("XDG_DATA_HOME", ".local/share");
        let state_home = base("XDG_STATE_HOME", ".local/state");

        let mut data_dirs: Vec<PathBuf> = lookup("XDG_DATA_DIRS")
            .map(|raw| {
                std::env::split_paths(&raw)
                    .filter(|path| path.is_absolute())
                    .collect()
            })
            .unwrap_or_default();
        if data_dirs.is_empty() {
            data_dirs = DEFAULT_DATA_DIRS.iter().map(PathBuf::from).collect();
        }

        Self {
            home,
            config_home,
            data_home,
            state_home,
            data_dirs,
        }
    }

    pub fn app_config_dir(&self) -> Option<PathBuf> {
        self.config_home.as_ref().map(|dir| dir.join(APP_DIR_NAME))
    }

    pub fn app_state_dir(&self) -> Option<PathBuf> {
        self.state_home.as_ref().map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Per-app data directories, user directory first.
    pub fn app_data_dirs(&self) -> Vec<PathBuf> {
        self.data_home
            .iter()
            .chain(self.data_dirs.iter())
            .map(|dir| dir.join(APP_DIR_NAME))
            .collect()
    }
}

pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn falls_back_to_home_relative_defaults() {
        let dirs = XdgDirs::from_lookup(lookup(&[("HOME", "/home/ada")]));
        assert_eq!(dirs.config_home, Some(PathBuf::from("/home/ada/.config")));
        assert_eq!(dirs.data_home, Some(PathBuf::from("/home/ada/.local/share")));
        assert_eq!(
            dirs.app_state_dir(),
            Some(PathBuf::from("/home/ada/.local/state/desktop-dialogs"))
        );
        assert_eq!(
            dirs.data_dirs,
            vec![PathBuf::from("/usr/local/share"), PathBuf::from("/usr/share")]
        );
    }

    #[test]
    fn ignores_relative_overrides_and_keeps_data_dir_order() {
        let dirs = XdgDirs::from_lookup(lookup(&[
            ("HOME", "/home/ada"),
            ("XDG_CONFIG_HOME", "relative/config"),
            ("XDG_DATA_HOME", "/data/home"),
            ("XDG_DATA_DIRS", "/opt/share:relative:/usr/share"),
        ]));
        assert_eq!(dirs.config_home, Some(PathBuf::from("/home/ada/.config")));
        assert_eq!(
            dirs.app_data_dirs(),
            vec![
                PathBuf::from("/data/home/desktop-dialogs"),
                PathBuf::from("/opt/share/desktop-dialogs"),
                PathBuf::from("/usr/share/desktop-dialogs"),
            ]
        );
    }

    #[test]
    fn missing_home_leaves_user_dirs_unresolved() {
        let dirs = XdgDirs::from_lookup(lookup(&[]));
        assert_eq!(dirs.app_config_dir(), None);
        assert_eq!(dirs.app_state_dir(), None);
    }
}
