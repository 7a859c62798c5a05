//! Status vocabulary reported for every update
//!
//! The codes follow the dyndns2 return codes understood by NAS DDNS clients
//! (Synology in particular), so the `Display` text is a wire contract.

use crate::error::Error;
use crate::traits::UpdateResult;
use std::fmt;
use std::str::FromStr;

/// Final outcome of one update invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateStatus {
    /// Record created or updated
    Good,
    /// Record already held the desired address
    NoChg,
    /// No zone found, or hostname has no registrable domain
    NoHost,
    /// More than one zone matched the registrable domain
    NotFqdn,
    /// Credentials missing or rejected
    BadAuth,
    /// Any other provider or transport failure
    ServerError,
    /// Fallthrough code. The decision table is exhaustive, so seeing this
    /// means a code path was missed.
    BadAgent,
}

impl UpdateStatus {
    /// Wire text of the status code
    pub const fn as_str(&self) -> &'static str {
        match self {
            UpdateStatus::Good => "good",
            UpdateStatus::NoChg => "nochg",
            UpdateStatus::NoHost => "nohost",
            UpdateStatus::NotFqdn => "notfqdn",
            UpdateStatus::BadAuth => "badauth",
            UpdateStatus::ServerError => "911",
            UpdateStatus::BadAgent => "badagent",
        }
    }

    /// `good` and `nochg` are success, everything else is failure
    pub const fn is_success(&self) -> bool {
        matches!(self, UpdateStatus::Good | UpdateStatus::NoChg)
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(UpdateStatus::Good),
            "nochg" => Ok(UpdateStatus::NoChg),
            "nohost" => Ok(UpdateStatus::NoHost),
            "notfqdn" => Ok(UpdateStatus::NotFqdn),
            "badauth" => Ok(UpdateStatus::BadAuth),
            "911" => Ok(UpdateStatus::ServerError),
            "badagent" => Ok(UpdateStatus::BadAgent),
            other => Err(Error::invalid_input(format!("unknown status code: {}", other))),
        }
    }
}

impl From<&UpdateResult> for UpdateStatus {
    fn from(result: &UpdateResult) -> Self {
        match result {
            UpdateResult::Created { .. } | UpdateResult::Updated { .. } => UpdateStatus::Good,
            UpdateResult::Unchanged { .. } => UpdateStatus::NoChg,
        }
    }
}

impl From<&Error> for UpdateStatus {
    fn from(err: &Error) -> Self {
        match err {
            Error::Authentication(_) => UpdateStatus::BadAuth,
            Error::UnresolvableDomain(_) | Error::ZoneNotFound(_) => UpdateStatus::NoHost,
            Error::AmbiguousZone { .. } => UpdateStatus::NotFqdn,
            Error::AmbiguousRecords { .. }
            | Error::InvalidInput(_)
            | Error::Config(_)
            | Error::IpSource(_)
            | Error::Provider { .. }
            | Error::Json(_) => UpdateStatus::ServerError,
        }
    }
}
