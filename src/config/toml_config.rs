use crate::config::NotifierKind;
use crate::core::store::{default_helpers, DataStore};
use crate::domain::geo::Location;
use crate::domain::model::{Capability, Helper};
use crate::utils::error::{AssistError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_SERVICE_NAME: &str = "Onroad Assistance Helper";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    /// Helper roster; the built-in roster is used when empty.
    #[serde(default)]
    pub helpers: Vec<HelperConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: Option<String>,
    pub notifier: Option<NotifierKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperConfig {
    pub id: String,
    pub name: String,
    pub capability: Capability,
    pub lat: f64,
    pub lon: f64,
    pub rating: f64,
}

impl From<&HelperConfig> for Helper {
    fn from(config: &HelperConfig) -> Self {
        Helper::new(
            config.id.clone(),
            config.name.clone(),
            config.capability,
            Location::new(config.lat, config.lon),
            config.rating,
        )
    }
}

impl AssistConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AssistError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HELPER_LAT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AssistError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(name) = &self.service.name {
            validation::validate_non_empty_string("service.name", name)?;
        }

        validation::validate_unique_ids("helpers.id", self.helpers.iter().map(|h| h.id.as_str()))?;

        for (index, helper) in self.helpers.iter().enumerate() {
            let field = |name: &str| format!("helpers[{}].{}", index, name);
            validation::validate_non_empty_string(&field("id"), &helper.id)?;
            validation::validate_non_empty_string(&field("name"), &helper.name)?;
            validation::validate_latitude(&field("lat"), helper.lat)?;
            validation::validate_longitude(&field("lon"), helper.lon)?;
            validation::validate_finite(&field("rating"), helper.rating)?;
            validation::validate_range(&field("rating"), helper.rating, 0.0, 5.0)?;
        }

        Ok(())
    }

    pub fn service_name(&self) -> &str {
        self.service.name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME)
    }

    pub fn notifier_kind(&self) -> NotifierKind {
        self.service.notifier.unwrap_or_default()
    }

    pub fn helpers(&self) -> Vec<Helper> {
        if self.helpers.is_empty() {
            default_helpers()
        } else {
            self.helpers.iter().map(Helper::from).collect()
        }
    }

    pub fn build_store(&self) -> DataStore {
        DataStore::with_helpers(self.helpers())
    }
}

impl Validate for AssistConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AssistConfig::from_toml_str("").unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.service_name(), DEFAULT_SERVICE_NAME);
        assert_eq!(config.notifier_kind(), NotifierKind::Console);
        assert_eq!(config.helpers().len(), 4);
    }

    #[test]
    fn test_parse_helper_roster() {
        let toml_content = r#"
[service]
name = "Night Shift"
notifier = "log"

[[helpers]]
id = "M1"
name = "Lakshmi Motors"
capability = "mechanic"
lat = 12.98
lon = 77.60
rating = 4.9

[[helpers]]
id = "F1"
name = "Tank Runner"
capability = "FUEL"
lat = 12.96
lon = 77.58
rating = 3.8
"#;

        let config = AssistConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.service_name(), "Night Shift");
        assert_eq!(config.notifier_kind(), NotifierKind::Log);

        let helpers = config.helpers();
        assert_eq!(helpers.len(), 2);
        assert_eq!(helpers[0].capability, Capability::Mechanic);
        assert_eq!(helpers[1].capability, Capability::Fuel);
        assert_eq!(config.build_store().helpers()[1].name, "Tank Runner");
    }

    #[test]
    fn test_unknown_capability_is_a_parse_error() {
        let toml_content = r#"
[[helpers]]
id = "X1"
name = "Plumber"
capability = "plumbing"
lat = 0.0
lon = 0.0
rating = 3.0
"#;

        let err = AssistConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, AssistError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let duplicate_ids = r#"
[[helpers]]
id = "H1"
name = "A"
capability = "tow"
lat = 0.0
lon = 0.0
rating = 3.0

[[helpers]]
id = "H1"
name = "B"
capability = "fuel"
lat = 0.0
lon = 0.0
rating = 3.0
"#;
        let config = AssistConfig::from_toml_str(duplicate_ids).unwrap();
        assert!(config.validate().is_err());

        let bad_rating = r#"
[[helpers]]
id = "H1"
name = "A"
capability = "tow"
lat = 0.0
lon = 0.0
rating = 7.5
"#;
        let config = AssistConfig::from_toml_str(bad_rating).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROADSIDE_TEST_HELPER_NAME", "Env Fuel");

        let toml_content = r#"
[[helpers]]
id = "F9"
name = "${ROADSIDE_TEST_HELPER_NAME}"
capability = "fuel"
lat = 1.0
lon = 2.0
rating = 4.0
"#;

        let config = AssistConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.helpers[0].name, "Env Fuel");

        std::env::remove_var("ROADSIDE_TEST_HELPER_NAME");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nname = \"From File\"\n")
            .unwrap();

        let config = AssistConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.service_name(), "From File");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AssistConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, AssistError::IoError(_)));
    }
}
