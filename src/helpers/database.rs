use super::category::HelperCategory;
use super::registry::{Helper, HelperError, HelperRegistry};
use crate::desktop_entry::{KeyFile, Locale, DESKTOP_GROUP, KEY_ICON, KEY_NAME, KEY_TYPE};
use crate::shared::dirs::{is_executable, XdgDirs};
use crate::shared::fs_atomic::atomic_write_file;
use crate::shared::logging::DialogLog;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub const HELPERS_DIR_NAME: &str = "helpers";
pub const PREFERENCES_FILE_NAME: &str = "helpers.yaml";

const HELPER_TYPE: &str = "X-Helper";
const KEY_CATEGORY: &str = "X-Helper-Category";
const KEY_COMMANDS: &str = "X-Helper-Commands";

/// Chosen helper id per category, persisted as YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperPreferences {
    #[serde(default)]
    pub defaults: BTreeMap<HelperCategory, String>,
}

impl HelperPreferences {
    pub fn load(path: &Path) -> Result<Self, HelperError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| HelperError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| HelperError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), HelperError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| HelperError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let body = serde_yaml::to_string(self).map_err(|source| HelperError::Encode {
            path: path.display().to_string(),
            source,
        })?;
        atomic_write_file(path, body.as_bytes()).map_err(|source| HelperError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Helper definitions found in the data directories plus the user's
/// choices. Only helpers whose program can be found are listed.
#[derive(Debug)]
pub struct HelperDatabase {
    helpers: Vec<Helper>,
    preferences: HelperPreferences,
    preferences_path: Option<PathBuf>,
    log: DialogLog,
}

impl HelperDatabase {
    pub fn load(
        dirs: &XdgDirs,
        locale: Option<&Locale>,
        log: DialogLog,
    ) -> Result<Self, HelperError> {
        let helper_dirs: Vec<PathBuf> = dirs
            .app_data_dirs()
            .into_iter()
            .map(|dir| dir.join(HELPERS_DIR_NAME))
            .collect();
        let preferences_path = dirs
            .app_config_dir()
            .map(|dir| dir.join(PREFERENCES_FILE_NAME));
        let path_var = std::env::var_os("PATH");
        Self::load_from(
            &helper_dirs,
            preferences_path,
            path_var.as_deref(),
            locale,
            log,
        )
    }

    /// Scans `helper_dirs` in order; the first definition of an id wins.
    pub fn load_from(
        helper_dirs: &[PathBuf],
        preferences_path: Option<PathBuf>,
        path_var: Option<&OsStr>,
        locale: Option<&Locale>,
        log: DialogLog,
    ) -> Result<Self, HelperError> {
        let mut seen = HashSet::new();
        let mut helpers = Vec::new();
        for dir in helper_dirs {
            for path in definition_files(dir) {
                let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                if seen.contains(id) {
                    continue;
                }
                let helper = match read_definition(&path, id, locale) {
                    Ok(helper) => helper,
                    Err(reason) => {
                        log.append(
                            "warn",
                            "helpers.skipped",
                            &format!("{}: {reason}", path.display()),
                        );
                        continue;
                    }
                };
                seen.insert(helper.id.clone());
                if is_available(&helper, path_var) {
                    helpers.push(helper);
                } else {
                    log.append(
                        "debug",
                        "helpers.unavailable",
                        &format!("{} has no usable command", helper.id),
                    );
                }
            }
        }
        helpers.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });

        let preferences = match &preferences_path {
            Some(path) => HelperPreferences::load(path)?,
            None => HelperPreferences::default(),
        };
        Ok(Self {
            helpers,
            preferences,
            preferences_path,
            log,
        })
    }

    pub fn preferences(&self) -> &HelperPreferences {
        &self.preferences
    }
}

impl HelperRegistry for HelperDatabase {
    fn helpers(&self, category: HelperCategory) -> Vec<Helper> {
        self.helpers
            .iter()
            .filter(|helper| helper.category == category)
            .cloned()
            .collect()
    }

    fn default_helper(&self, category: HelperCategory) -> Option<Helper> {
        let id = self.preferences.defaults.get(&category)?;
        self.helpers
            .iter()
            .find(|helper| helper.category == category && &helper.id == id)
            .cloned()
    }

    fn set_default(&mut self, category: HelperCategory, id: &str) -> Result<(), HelperError> {
        if !self
            .helpers
            .iter()
            .any(|helper| helper.category == category && helper.id == id)
        {
            return Err(HelperError::UnknownHelper {
                category: category.id(),
                id: id.to_string(),
            });
        }
        let path = self
            .preferences_path
            .as_deref()
            .ok_or(HelperError::ConfigDirUnavailable)?;
        let mut preferences = self.preferences.clone();
        preferences.defaults.insert(category, id.to_string());
        preferences.save(path)?;
        self.preferences = preferences;
        self.log.append(
            "info",
            "helpers.default",
            &format!("{} set to {id}", category.id()),
        );
        Ok(())
    }
}

fn definition_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "desktop"))
        .collect();
    files.sort();
    files
}

fn read_definition(path: &Path, id: &str, locale: Option<&Locale>) -> Result<Helper, String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read: {e}"))?;
    let file = KeyFile::from_bytes(&bytes).map_err(|e| format!("failed to parse: {e}"))?;
    match file.string(DESKTOP_GROUP, KEY_TYPE).as_deref() {
        Some(HELPER_TYPE) => {}
        other => {
            return Err(format!(
                "type `{}` is not {HELPER_TYPE}",
                other.unwrap_or_default()
            ))
        }
    }
    let raw_category = file
        .string(DESKTOP_GROUP, KEY_CATEGORY)
        .unwrap_or_default();
    let category = HelperCategory::parse(&raw_category)
        .ok_or_else(|| format!("unknown helper category `{raw_category}`"))?;
    let commands: Vec<String> = file
        .string(DESKTOP_GROUP, KEY_COMMANDS)
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|command| !command.is_empty())
        .map(str::to_string)
        .collect();
    if commands.is_empty() {
        return Err(format!("missing {KEY_COMMANDS}"));
    }
    let name = file
        .locale_string(DESKTOP_GROUP, KEY_NAME, locale)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.to_string());
    let icon = file
        .string(DESKTOP_GROUP, KEY_ICON)
        .filter(|icon| !icon.is_empty());
    Ok(Helper {
        id: id.to_string(),
        name,
        category,
        commands,
        icon,
    })
}

fn is_available(helper: &Helper, path_var: Option<&OsStr>) -> bool {
    helper.commands.iter().any(|command| {
        let Some(program) = command.split_whitespace().next() else {
            return false;
        };
        let program = Path::new(program);
        if program.components().count() > 1 {
            return program.is_absolute() && is_executable(program);
        }
        path_var
            .map(|paths| std::env::split_paths(paths).any(|dir| is_executable(&dir.join(program))))
            .unwrap_or(false)
    })
}
