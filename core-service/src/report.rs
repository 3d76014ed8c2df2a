//! Serializable snapshot of what a façade bound.

use bridge_traits::module::ConstantValue;
use serde::{Deserialize, Serialize};

use crate::constants::{ModuleConstants, Provenance};
use crate::error::Result;
use crate::resolution::{Operation, ResolutionTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantReport {
    pub name: String,
    pub value: Option<ConstantValue>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReport {
    pub operation: Operation,
    pub signature: String,
    pub bound: bool,
}

/// Constants with their provenance and operations with their bound state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingReport {
    pub module: String,
    pub constants: Vec<ConstantReport>,
    pub operations: Vec<OperationReport>,
}

impl BindingReport {
    pub fn new(module: &str, constants: &ModuleConstants, resolution: &ResolutionTable) -> Self {
        Self {
            module: module.to_string(),
            constants: constants
                .iter()
                .map(|constant| ConstantReport {
                    name: constant.key.name().to_string(),
                    value: constant.value.clone(),
                    provenance: constant.provenance,
                })
                .collect(),
            operations: resolution
                .iter()
                .map(|entry| OperationReport {
                    operation: entry.operation,
                    signature: entry.signature.to_string(),
                    bound: entry.bound,
                })
                .collect(),
        }
    }

    pub fn unbound(&self) -> impl Iterator<Item = Operation> + '_ {
        self.operations
            .iter()
            .filter(|entry| !entry.bound)
            .map(|entry| entry.operation)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::module::{ModuleSurface, ValueKind};

    #[test]
    fn test_report_lists_defaults_and_absent_operations() {
        let surface = ModuleSurface::new()
            .with_constant("GOOGLE_PLAY_STORE_PACKAGE", "com.android.vending")
            .with_operation("getErrorString", vec![ValueKind::Int], ValueKind::Text);
        let constants = ModuleConstants::bind("Services", &surface).unwrap();
        let resolution = ResolutionTable::resolve("Services", &surface).unwrap();

        let report = BindingReport::new("Services", &constants, &resolution);

        assert_eq!(report.constants.len(), 3);
        assert_eq!(report.operations.len(), Operation::ALL.len());
        assert_eq!(report.unbound().count(), Operation::ALL.len() - 1);
        assert!(!report.unbound().any(|op| op == Operation::ErrorString));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["module"], "Services");
        assert_eq!(json["constants"][1]["name"], "GOOGLE_PLAY_SERVICES_VERSION_CODE");
        assert_eq!(json["constants"][1]["value"], -1);
        assert_eq!(json["constants"][1]["provenance"], "default");
        assert_eq!(json["constants"][2]["value"], "com.android.vending");
        assert_eq!(json["constants"][2]["provenance"], "module");
        assert_eq!(json["operations"][3]["operation"], "error_string");
        assert_eq!(json["operations"][3]["signature"], "getErrorString(int) -> text");
        assert_eq!(json["operations"][3]["bound"], true);
    }
}
