//! Domain error types
//!
//! `CatalogError` covers catalog assembly and price reconciliation.
//! `UpstreamFault` is the closed set of exchange error codes.

use std::fmt;
use thiserror::Error;

// =============================================================================
// CatalogError
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Malformed record for market {market_id}: missing '{field}'")]
    MalformedRecord { market_id: String, field: &'static str },

    #[error("Failed to parse {field} '{value}': {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Market {market_id} listed under events {first_event_id} and {second_event_id}")]
    ConflictingMarket {
        market_id: String,
        first_event_id: u64,
        second_event_id: u64,
    },

    #[error("Price book references unknown market {market_id}")]
    UnknownMarket { market_id: String },

    #[error("Price book references unknown runner {runner_id} in market {market_id}")]
    UnknownRunner { market_id: String, runner_id: u64 },
}

impl CatalogError {
    /// True for the reconciliation lookup failures
    pub fn is_reconciliation(&self) -> bool {
        matches!(
            self,
            CatalogError::UnknownMarket { .. } | CatalogError::UnknownRunner { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

// =============================================================================
// UpstreamFault
// =============================================================================

/// Coarse grouping of upstream faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCategory {
    Credentials,
    Permission,
    Volume,
    Timeout,
    Service,
}

/// Error reported by the exchange, mapped from its error code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamFault {
    #[error("JSON parse failure")]
    JsonParseFailure,
    #[error("Invalid format for parameter")]
    InvalidFormatForParameter,
    #[error("Security exception")]
    SecurityException,
    #[error("Parameter not defined")]
    ParameterNotDefined,
    #[error("Upstream timeout")]
    Timeout,
    #[error("No such operation")]
    NoSuchOperation,
    #[error("No such service")]
    NoSuchService,
    #[error("Deserialisation failure")]
    DeserialisationFailure,
    #[error("Unknown caller")]
    UnknownCaller,
    #[error("Unrecognised credentials")]
    UnrecognisedCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Subscription required")]
    SubscriptionRequired,
    #[error("Operation forbidden")]
    OperationForbidden,
    #[error("Too much data requested")]
    TooMuchData,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Unknown upstream error code: {0}")]
    Unknown(String),
}

const FAULT_CODES: &[(&str, UpstreamFault)] = &[
    ("DSC-0008", UpstreamFault::JsonParseFailure),
    ("DSC-0009", UpstreamFault::InvalidFormatForParameter),
    ("DSC-0015", UpstreamFault::SecurityException),
    ("DSC-0018", UpstreamFault::ParameterNotDefined),
    ("DSC-0019", UpstreamFault::Timeout),
    ("DSC-0021", UpstreamFault::NoSuchOperation),
    ("DSC-0023", UpstreamFault::NoSuchService),
    ("DSC-0024", UpstreamFault::DeserialisationFailure),
    ("DSC-0034", UpstreamFault::UnknownCaller),
    ("DSC-0035", UpstreamFault::UnrecognisedCredentials),
    ("DSC-0036", UpstreamFault::InvalidCredentials),
    ("DSC-0037", UpstreamFault::SubscriptionRequired),
    ("DSC-0038", UpstreamFault::OperationForbidden),
    ("ANGX-0001", UpstreamFault::TooMuchData),
    ("INSUFFICIENT_FUNDS", UpstreamFault::InsufficientFunds),
];

impl UpstreamFault {
    /// Map an upstream error code to its fault. Unmapped codes become `Unknown`.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        FAULT_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, fault)| fault.clone())
            .unwrap_or_else(|| UpstreamFault::Unknown(code.to_string()))
    }

    /// True when `code` is one of the mapped upstream codes
    pub fn is_known_code(code: &str) -> bool {
        FAULT_CODES.iter().any(|(c, _)| *c == code.trim())
    }

    /// Upstream code for this fault
    pub fn code(&self) -> &str {
        match self {
            UpstreamFault::Unknown(code) => code,
            known => FAULT_CODES
                .iter()
                .find(|(_, fault)| fault == known)
                .map(|(c, _)| *c)
                .unwrap_or_default(),
        }
    }

    pub fn category(&self) -> FaultCategory {
        match self {
            UpstreamFault::SecurityException
            | UpstreamFault::UnknownCaller
            | UpstreamFault::UnrecognisedCredentials
            | UpstreamFault::InvalidCredentials => FaultCategory::Credentials,
            UpstreamFault::SubscriptionRequired
            | UpstreamFault::OperationForbidden
            | UpstreamFault::InsufficientFunds => FaultCategory::Permission,
            UpstreamFault::TooMuchData => FaultCategory::Volume,
            UpstreamFault::Timeout => FaultCategory::Timeout,
            UpstreamFault::JsonParseFailure
            | UpstreamFault::InvalidFormatForParameter
            | UpstreamFault::ParameterNotDefined
            | UpstreamFault::NoSuchOperation
            | UpstreamFault::NoSuchService
            | UpstreamFault::DeserialisationFailure
            | UpstreamFault::Unknown(_) => FaultCategory::Service,
        }
    }
}

impl fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FaultCategory::Credentials => "credentials",
            FaultCategory::Permission => "permission",
            FaultCategory::Volume => "volume",
            FaultCategory::Timeout => "timeout",
            FaultCategory::Service => "service",
        };
        f.write_str(label)
    }
}
