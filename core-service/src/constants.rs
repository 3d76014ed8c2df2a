//! Configuration constants copied from the external module.
//!
//! Each constant is bound once, during façade initialization, and is
//! read-only afterwards. A constant the module does not publish keeps its
//! documented default; a constant published with the wrong kind means the
//! module is incompatible.

use bridge_traits::diagnostics::Severity;
use bridge_traits::module::{ConstantValue, ModuleSurface, ValueKind};
use core_runtime::diagnostics::{self, TAG};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default for the minimum compatible version code when unavailable.
pub const UNAVAILABLE_VERSION_CODE: i32 = -1;

/// The constants the façade exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstantKey {
    /// Package name of the services application
    ServicesPackage,
    /// Minimum services version compatible with this client
    ServicesVersionCode,
    /// Package name of the store application
    StorePackage,
}

impl ConstantKey {
    pub const ALL: [ConstantKey; 3] = [
        ConstantKey::ServicesPackage,
        ConstantKey::ServicesVersionCode,
        ConstantKey::StorePackage,
    ];

    /// Name the module publishes the constant under.
    pub fn name(self) -> &'static str {
        match self {
            ConstantKey::ServicesPackage => "GOOGLE_PLAY_SERVICES_PACKAGE",
            ConstantKey::ServicesVersionCode => "GOOGLE_PLAY_SERVICES_VERSION_CODE",
            ConstantKey::StorePackage => "GOOGLE_PLAY_STORE_PACKAGE",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ConstantKey::ServicesVersionCode => ValueKind::Int,
            ConstantKey::ServicesPackage | ConstantKey::StorePackage => ValueKind::Text,
        }
    }

    /// Documented value when the module does not publish the constant.
    pub fn default_value(self) -> Option<ConstantValue> {
        match self {
            ConstantKey::ServicesVersionCode => {
                Some(ConstantValue::Int(UNAVAILABLE_VERSION_CODE))
            }
            ConstantKey::ServicesPackage | ConstantKey::StorePackage => None,
        }
    }
}

impl fmt::Display for ConstantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a constant's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Module,
    Default,
}

/// One bound constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationConstant {
    pub key: ConstantKey,
    pub value: Option<ConstantValue>,
    pub provenance: Provenance,
}

impl ConfigurationConstant {
    fn from_module(key: ConstantKey, value: ConstantValue) -> Self {
        Self {
            key,
            value: Some(value),
            provenance: Provenance::Module,
        }
    }

    fn unavailable(key: ConstantKey) -> Self {
        Self {
            key,
            value: key.default_value(),
            provenance: Provenance::Default,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Some(ConstantValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.value {
            Some(ConstantValue::Int(value)) => Some(value),
            _ => None,
        }
    }
}

/// All constants, bound together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConstants {
    services_package: ConfigurationConstant,
    services_version_code: ConfigurationConstant,
    store_package: ConfigurationConstant,
}

impl ModuleConstants {
    /// Every constant at its documented default.
    pub fn unavailable() -> Self {
        Self {
            services_package: ConfigurationConstant::unavailable(ConstantKey::ServicesPackage),
            services_version_code: ConfigurationConstant::unavailable(
                ConstantKey::ServicesVersionCode,
            ),
            store_package: ConfigurationConstant::unavailable(ConstantKey::StorePackage),
        }
    }

    /// Copy constants from `surface`.
    ///
    /// Returns the reason as `Err` when a constant is published with the
    /// wrong kind.
    pub(crate) fn bind(module_name: &str, surface: &ModuleSurface) -> Result<Self, String> {
        let mut constants = Self::unavailable();

        for key in ConstantKey::ALL {
            let bound = match surface.constant(key.name()) {
                Some(value) if value.kind() == key.kind() => {
                    diagnostics::log(
                        Severity::Debug,
                        TAG,
                        &format!("Setting {}.{} to {}", module_name, key, value),
                    );
                    ConfigurationConstant::from_module(key, value.clone())
                }
                Some(value) => {
                    return Err(format!(
                        "constant {} is published as {} but {} is required",
                        key,
                        value.kind(),
                        key.kind()
                    ));
                }
                None => {
                    diagnostics::log(
                        Severity::Debug,
                        TAG,
                        &format!("{}.{} is not published, keeping the default", module_name, key),
                    );
                    ConfigurationConstant::unavailable(key)
                }
            };
            *constants.slot_mut(key) = bound;
        }

        Ok(constants)
    }

    fn slot_mut(&mut self, key: ConstantKey) -> &mut ConfigurationConstant {
        match key {
            ConstantKey::ServicesPackage => &mut self.services_package,
            ConstantKey::ServicesVersionCode => &mut self.services_version_code,
            ConstantKey::StorePackage => &mut self.store_package,
        }
    }

    pub fn get(&self, key: ConstantKey) -> &ConfigurationConstant {
        match key {
            ConstantKey::ServicesPackage => &self.services_package,
            ConstantKey::ServicesVersionCode => &self.services_version_code,
            ConstantKey::StorePackage => &self.store_package,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationConstant> {
        ConstantKey::ALL.into_iter().map(move |key| self.get(key))
    }

    /// Package name for the services application; `None` when unavailable.
    pub fn services_package(&self) -> Option<&str> {
        self.services_package.as_text()
    }

    /// Minimum compatible services version; `-1` when unavailable.
    pub fn services_version_code(&self) -> i32 {
        self.services_version_code
            .as_int()
            .unwrap_or(UNAVAILABLE_VERSION_CODE)
    }

    /// Package name for the store application; `None` when unavailable.
    pub fn store_package(&self) -> Option<&str> {
        self.store_package.as_text()
    }
}
