//! Default form values read from a YAML file.

use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use passform::{Action, CharacterClass, CharacterClasses};

/// The optional config file. Fields that are left out keep the form's own defaults.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    pub length: Option<LengthValue>,
    pub upper: Option<bool>,
    pub lower: Option<bool>,
    pub digits: Option<bool>,
    pub symbols: Option<bool>,
}

/// `length: 8` and `length: "8"` both work; either way the value goes through the same
/// validation as typed input.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum LengthValue {
    Number(i64),
    Text(String),
}

impl LengthValue {
    fn to_text(&self) -> String {
        match self {
            LengthValue::Number(n) => n.to_string(),
            LengthValue::Text(s) => s.clone(),
        }
    }
}

impl Config {
    /// The actions that take a fresh form, whose classes are `current`, to this config.
    pub(crate) fn actions(&self, current: CharacterClasses) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(length) = &self.length {
            actions.push(Action::SetLength(length.to_text()));
        }
        for class in CharacterClass::ALL {
            let wanted = match class {
                CharacterClass::Upper => self.upper,
                CharacterClass::Lower => self.lower,
                CharacterClass::Digits => self.digits,
                CharacterClass::Symbols => self.symbols,
            };
            if let Some(wanted) = wanted {
                if wanted != current.is_enabled(class) {
                    actions.push(Action::ToggleClass(class));
                }
            }
        }
        actions
    }
}

/// Load the config from `explicit_path`, `$PASSFORM_CONFIG`, or the default location, in that
/// order. Only the default location is allowed to be missing.
pub(crate) fn load(explicit_path: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = explicit_path {
        return read(&path);
    }
    if let Some(path) = env::var_os("PASSFORM_CONFIG") {
        return read(Path::new(&path));
    }
    match default_config_path() {
        Some(path) if path.exists() => read(&path),
        _ => Ok(Config::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".config");
    p.push("passform");
    p.push("config.yaml");
    Some(p)
}

fn read(path: &Path) -> anyhow::Result<Config> {
    log::debug!("reading config from {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("failed to open config file {}", path.display()))?;
    let config = serde_yaml::from_reader(file)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_all_fields() {
        let file = write_config("length: 12\nupper: true\nlower: false\ndigits: true\n");
        let config = load(Some(file.path().to_owned())).unwrap();
        assert_eq!(config.length, Some(LengthValue::Number(12)));
        assert_eq!(config.upper, Some(true));
        assert_eq!(config.lower, Some(false));
        assert_eq!(config.digits, Some(true));
        assert_eq!(config.symbols, None);
    }

    #[test]
    fn length_may_be_text() {
        let file = write_config("length: \"eight\"\n");
        let config = load(Some(file.path().to_owned())).unwrap();
        assert_eq!(config.length, Some(LengthValue::Text("eight".to_owned())));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let file = write_config("lenght: 8\n");
        assert!(load(Some(file.path().to_owned())).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(dir.path().join("nope.yaml"))).is_err());
    }

    #[test]
    fn actions_only_toggle_what_differs() {
        let config = Config {
            length: Some(LengthValue::Number(9)),
            upper: Some(true),
            lower: Some(true),
            digits: Some(false),
            symbols: None,
        };
        let actions = config.actions(CharacterClasses::default());
        assert_eq!(
            actions,
            vec![
                Action::SetLength("9".to_owned()),
                Action::ToggleClass(CharacterClass::Upper),
            ]
        );
    }

    #[test]
    fn empty_config_does_nothing() {
        assert!(Config::default()
            .actions(CharacterClasses::default())
            .is_empty());
    }
}
