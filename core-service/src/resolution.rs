//! One-time resolution of the proxied operations against a module surface.

use bridge_traits::diagnostics::Severity;
use bridge_traits::module::{ModuleSurface, OperationSignature, ValueKind};
use core_runtime::diagnostics::{self, TAG};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operations the façade proxies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ErrorDialogWithListener,
    ErrorDialog,
    ErrorPendingIntent,
    ErrorString,
    OpenSourceSoftwareLicenseInfo,
    RemoteContext,
    RemoteResource,
    IsServicesAvailable,
    IsUserRecoverableError,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::ErrorDialogWithListener,
        Operation::ErrorDialog,
        Operation::ErrorPendingIntent,
        Operation::ErrorString,
        Operation::OpenSourceSoftwareLicenseInfo,
        Operation::RemoteContext,
        Operation::RemoteResource,
        Operation::IsServicesAvailable,
        Operation::IsUserRecoverableError,
    ];

    /// Name of the operation on the external module. The two error dialog
    /// overloads share a name.
    pub fn name(self) -> &'static str {
        match self {
            Operation::ErrorDialogWithListener | Operation::ErrorDialog => "getErrorDialog",
            Operation::ErrorPendingIntent => "getErrorPendingIntent",
            Operation::ErrorString => "getErrorString",
            Operation::OpenSourceSoftwareLicenseInfo => "getOpenSourceSoftwareLicenseInfo",
            Operation::RemoteContext => "getRemoteContext",
            Operation::RemoteResource => "getRemoteResource",
            Operation::IsServicesAvailable => "isGooglePlayServicesAvailable",
            Operation::IsUserRecoverableError => "isUserRecoverableError",
        }
    }

    /// Expected signature on the external module.
    pub fn signature(self) -> OperationSignature {
        use ValueKind as K;

        let (params, returns) = match self {
            Operation::ErrorDialogWithListener => (
                vec![K::Int, K::Activity, K::Int, K::CancelListener],
                K::Dialog,
            ),
            Operation::ErrorDialog => (vec![K::Int, K::Activity, K::Int], K::Dialog),
            Operation::ErrorPendingIntent => (vec![K::Int, K::Context, K::Int], K::PendingIntent),
            Operation::ErrorString => (vec![K::Int], K::Text),
            Operation::OpenSourceSoftwareLicenseInfo => (vec![K::Context], K::Text),
            Operation::RemoteContext => (vec![K::Context], K::Context),
            Operation::RemoteResource => (vec![K::Context], K::Resources),
            Operation::IsServicesAvailable => (vec![K::Context], K::Int),
            Operation::IsUserRecoverableError => (vec![K::Int], K::Bool),
        };

        OperationSignature::new(self.name(), params, returns)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signature = self.signature();
        let params = signature
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", signature.name, params)
    }
}

/// Outcome of resolving one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOperation {
    pub operation: Operation,
    pub signature: OperationSignature,
    pub bound: bool,
}

/// Bound-or-absent state of every proxied operation.
///
/// Built once from a module surface and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTable {
    entries: Vec<ResolvedOperation>,
}

impl ResolutionTable {
    /// Resolve every operation against `surface`.
    ///
    /// A missing operation is recorded as absent. A declared operation whose
    /// return shape differs from the expected one makes the module
    /// incompatible, reported as `Err` with the reason.
    pub(crate) fn resolve(module_name: &str, surface: &ModuleSurface) -> Result<Self, String> {
        let mut entries = Vec::with_capacity(Operation::ALL.len());

        for operation in Operation::ALL {
            let expected = operation.signature();
            let bound = match surface.find_operation(&expected.name, &expected.params) {
                Some(declared) if declared.returns == expected.returns => true,
                Some(declared) => {
                    return Err(format!(
                        "{} returns {} but {} is required",
                        operation, declared.returns, expected.returns
                    ));
                }
                None => {
                    diagnostics::log(
                        Severity::Warn,
                        TAG,
                        &format!(
                            "{}.{} is not available, calls will return the default",
                            module_name, operation
                        ),
                    );
                    false
                }
            };

            entries.push(ResolvedOperation {
                operation,
                signature: expected,
                bound,
            });
        }

        Ok(Self { entries })
    }

    pub fn get(&self, operation: Operation) -> Option<&ResolvedOperation> {
        self.entries
            .iter()
            .find(|entry| entry.operation == operation)
    }

    pub fn is_bound(&self, operation: Operation) -> bool {
        self.get(operation).is_some_and(|entry| entry.bound)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedOperation> {
        self.entries.iter()
    }

    pub fn bound_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.bound).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_surface() -> ModuleSurface {
        Operation::ALL
            .into_iter()
            .map(Operation::signature)
            .fold(ModuleSurface::new(), |surface, signature| {
                surface.with_operation(signature.name, signature.params, signature.returns)
            })
    }

    #[test]
    fn test_resolve_full_surface() {
        let table = ResolutionTable::resolve("Services", &full_surface()).unwrap();
        assert_eq!(table.bound_count(), Operation::ALL.len());
        assert!(Operation::ALL.iter().all(|op| table.is_bound(*op)));
    }

    #[test]
    fn test_missing_operation_is_absent() {
        let mut surface = full_surface();
        surface
            .operations
            .retain(|signature| signature.name != "getErrorString");

        let table = ResolutionTable::resolve("Services", &surface).unwrap();
        assert!(!table.is_bound(Operation::ErrorString));
        assert_eq!(table.bound_count(), Operation::ALL.len() - 1);

        let entry = table.get(Operation::ErrorString).unwrap();
        assert_eq!(entry.signature.params, vec![ValueKind::Int]);
    }

    #[test]
    fn test_overloads_resolve_independently() {
        let mut surface = full_surface();
        surface
            .operations
            .retain(|signature| !(signature.name == "getErrorDialog" && signature.params.len() == 4));

        let table = ResolutionTable::resolve("Services", &surface).unwrap();
        assert!(table.is_bound(Operation::ErrorDialog));
        assert!(!table.is_bound(Operation::ErrorDialogWithListener));
    }

    #[test]
    fn test_parameter_mismatch_is_absent() {
        let surface = ModuleSurface::new().with_operation(
            "isUserRecoverableError",
            vec![ValueKind::Text],
            ValueKind::Bool,
        );

        let table = ResolutionTable::resolve("Services", &surface).unwrap();
        assert!(!table.is_bound(Operation::IsUserRecoverableError));
    }

    #[test]
    fn test_return_mismatch_is_incompatible() {
        let surface = ModuleSurface::new().with_operation(
            "isGooglePlayServicesAvailable",
            vec![ValueKind::Context],
            ValueKind::Bool,
        );

        let reason = ResolutionTable::resolve("Services", &surface).unwrap_err();
        assert!(reason.contains("isGooglePlayServicesAvailable(Context)"));
        assert!(reason.contains("returns bool"));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(
            Operation::ErrorDialogWithListener.to_string(),
            "getErrorDialog(int, Activity, int, CancelListener)"
        );
        assert_eq!(Operation::ErrorString.to_string(), "getErrorString(int)");
    }
}
