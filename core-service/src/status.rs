//! Typed view of the services availability code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned by `is_services_available` when the operation is not resolved.
pub const UNAVAILABLE_STATUS: i32 = -1;

/// Availability of the services application, as reported by
/// `isGooglePlayServicesAvailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Success,
    ServiceMissing,
    ServiceVersionUpdateRequired,
    ServiceDisabled,
    SignInRequired,
    InvalidAccount,
    ResolutionRequired,
    NetworkError,
    InternalError,
    ServiceInvalid,
    DeveloperError,
    LicenseCheckFailed,
    /// The availability check itself could not be resolved.
    Unavailable,
    /// A code this version does not know about.
    Other(i32),
}

impl ServiceStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            UNAVAILABLE_STATUS => ServiceStatus::Unavailable,
            0 => ServiceStatus::Success,
            1 => ServiceStatus::ServiceMissing,
            2 => ServiceStatus::ServiceVersionUpdateRequired,
            3 => ServiceStatus::ServiceDisabled,
            4 => ServiceStatus::SignInRequired,
            5 => ServiceStatus::InvalidAccount,
            6 => ServiceStatus::ResolutionRequired,
            7 => ServiceStatus::NetworkError,
            8 => ServiceStatus::InternalError,
            9 => ServiceStatus::ServiceInvalid,
            10 => ServiceStatus::DeveloperError,
            11 => ServiceStatus::LicenseCheckFailed,
            other => ServiceStatus::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ServiceStatus::Unavailable => UNAVAILABLE_STATUS,
            ServiceStatus::Success => 0,
            ServiceStatus::ServiceMissing => 1,
            ServiceStatus::ServiceVersionUpdateRequired => 2,
            ServiceStatus::ServiceDisabled => 3,
            ServiceStatus::SignInRequired => 4,
            ServiceStatus::InvalidAccount => 5,
            ServiceStatus::ResolutionRequired => 6,
            ServiceStatus::NetworkError => 7,
            ServiceStatus::InternalError => 8,
            ServiceStatus::ServiceInvalid => 9,
            ServiceStatus::DeveloperError => 10,
            ServiceStatus::LicenseCheckFailed => 11,
            ServiceStatus::Other(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == ServiceStatus::Success
    }
}

impl From<i32> for ServiceStatus {
    fn from(code: i32) -> Self {
        ServiceStatus::from_code(code)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceStatus::Success => "SUCCESS",
            ServiceStatus::ServiceMissing => "SERVICE_MISSING",
            ServiceStatus::ServiceVersionUpdateRequired => "SERVICE_VERSION_UPDATE_REQUIRED",
            ServiceStatus::ServiceDisabled => "SERVICE_DISABLED",
            ServiceStatus::SignInRequired => "SIGN_IN_REQUIRED",
            ServiceStatus::InvalidAccount => "INVALID_ACCOUNT",
            ServiceStatus::ResolutionRequired => "RESOLUTION_REQUIRED",
            ServiceStatus::NetworkError => "NETWORK_ERROR",
            ServiceStatus::InternalError => "INTERNAL_ERROR",
            ServiceStatus::ServiceInvalid => "SERVICE_INVALID",
            ServiceStatus::DeveloperError => "DEVELOPER_ERROR",
            ServiceStatus::LicenseCheckFailed => "LICENSE_CHECK_FAILED",
            ServiceStatus::Unavailable => "UNAVAILABLE",
            ServiceStatus::Other(code) => return write!(f, "UNKNOWN({code})"),
        };
        f.write_str(name)
    }
}
