use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One first-level administrative region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceConfig {
    pub name: String,
    /// Two-digit region code used by the upstream store locator.
    pub code: String,
    pub address_prefixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProvincesFile {
    provinces: Vec<ProvinceConfig>,
}

/// The fixed, ordered set of provinces a selection may name.
#[derive(Debug, Clone, Default)]
pub struct ProvinceCatalog {
    provinces: Vec<ProvinceConfig>,
}

impl ProvinceCatalog {
    /// Build a catalog, validating names, codes, and prefixes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on empty or duplicate names/codes,
    /// malformed codes, or a province without address prefixes.
    pub fn new(provinces: Vec<ProvinceConfig>) -> Result<Self, ConfigError> {
        validate_provinces(&provinces)?;
        Ok(Self { provinces })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProvinceConfig> {
        self.provinces.iter().find(|p| p.name == name)
    }

    /// Province names in selector order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.provinces.iter().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn provinces(&self) -> &[ProvinceConfig] {
        &self.provinces
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.provinces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }

    /// Resolve the province of a street address by its leading token.
    ///
    /// Long official forms (`충청북도`) resolve to the short catalog name (`충북`).
    #[must_use]
    pub fn province_for_address(&self, address: &str) -> Option<&str> {
        let address = address.trim_start();
        self.provinces
            .iter()
            .find(|p| {
                p.address_prefixes
                    .iter()
                    .any(|prefix| address.starts_with(prefix.as_str()))
            })
            .map(|p| p.name.as_str())
    }
}

/// Load and validate the province catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_provinces(path: &Path) -> Result<ProvinceCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProvincesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: ProvincesFile = serde_yaml::from_str(&content)?;

    ProvinceCatalog::new(file.provinces)
}

fn validate_provinces(provinces: &[ProvinceConfig]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_codes = HashSet::new();

    for province in provinces {
        if province.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "province name must be non-empty".to_string(),
            ));
        }

        if province.code.len() != 2 || !province.code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "province '{}' has invalid code '{}'; must be two digits",
                province.name, province.code
            )));
        }

        if province
            .address_prefixes
            .iter()
            .all(|p| p.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "province '{}' needs at least one address prefix",
                province.name
            )));
        }

        if !seen_names.insert(province.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate province name: '{}'",
                province.name
            )));
        }

        if !seen_codes.insert(province.code.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate province code: '{}' (from province '{}')",
                province.code, province.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn province(name: &str, code: &str, prefixes: &[&str]) -> ProvinceConfig {
        ProvinceConfig {
            name: name.to_string(),
            code: code.to_string(),
            address_prefixes: prefixes.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    #[test]
    fn validate_rejects_empty_name() {
        let err = ProvinceCatalog::new(vec![province(" ", "01", &["서울"])]).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_bad_code() {
        let err = ProvinceCatalog::new(vec![province("서울", "1", &["서울"])]).unwrap_err();
        assert!(err.to_string().contains("invalid code"));
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let err = ProvinceCatalog::new(vec![
            province("서울", "01", &["서울"]),
            province("서울", "02", &["서울"]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate province name"));
    }

    #[test]
    fn validate_rejects_duplicate_code() {
        let err = ProvinceCatalog::new(vec![
            province("서울", "01", &["서울"]),
            province("부산", "01", &["부산"]),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("duplicate province code"));
    }

    #[test]
    fn validate_rejects_missing_prefixes() {
        let err = ProvinceCatalog::new(vec![province("서울", "01", &[])]).unwrap_err();
        assert!(err.to_string().contains("address prefix"));
    }

    #[test]
    fn province_for_address_maps_long_form() {
        let catalog = ProvinceCatalog::new(vec![
            province("서울", "01", &["서울"]),
            province("충북", "15", &["충북", "충청북도"]),
        ])
        .unwrap();
        assert_eq!(
            catalog.province_for_address("충청북도 청주시 상당구 상당로 1"),
            Some("충북")
        );
        assert_eq!(
            catalog.province_for_address("  서울특별시 강남구 테헤란로 1"),
            Some("서울")
        );
        assert_eq!(catalog.province_for_address("Tokyo"), None);
    }

    #[test]
    fn load_provinces_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("provinces.yaml");
        let catalog = load_provinces(&path).expect("provinces.yaml should load");
        assert_eq!(catalog.len(), 17);
        assert_eq!(catalog.names().next(), Some("서울"));
        assert!(catalog.contains("세종"));
        assert_eq!(catalog.get("제주").map(|p| p.code.as_str()), Some("16"));
    }
}
