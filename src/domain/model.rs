use crate::domain::geo::Location;
use crate::utils::error::AssistError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HelperId(String);

impl HelperId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HelperId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for HelperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of assistance a helper can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Capability {
    Mechanic,
    Tow,
    Fuel,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Mechanic => "MECHANIC",
            Capability::Tow => "TOW",
            Capability::Fuel => "FUEL",
        }
    }
}

impl FromStr for Capability {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MECHANIC" => Ok(Capability::Mechanic),
            "TOW" => Ok(Capability::Tow),
            "FUEL" => Ok(Capability::Fuel),
            _ => Err(AssistError::invalid_input(
                "capability",
                s,
                "expected one of MECHANIC, TOW, FUEL",
            )),
        }
    }
}

impl TryFrom<String> for Capability {
    type Error = AssistError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Capability> for String {
    fn from(capability: Capability) -> Self {
        capability.as_str().to_string()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Breakdown,
    Fuel,
}

impl RequestType {
    /// Capability a helper needs to serve this request type.
    ///
    /// Nothing maps to `Capability::Tow`, so tow helpers are never dispatched.
    pub fn required_capability(&self) -> Capability {
        match self {
            RequestType::Breakdown => Capability::Mechanic,
            RequestType::Fuel => Capability::Fuel,
        }
    }
}

impl FromStr for RequestType {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BREAKDOWN" => Ok(RequestType::Breakdown),
            "FUEL" => Ok(RequestType::Fuel),
            _ => Err(AssistError::invalid_input(
                "request type",
                s,
                "expected BREAKDOWN or FUEL",
            )),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestType::Breakdown => f.write_str("BREAKDOWN"),
            RequestType::Fuel => f.write_str("FUEL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Dispatched,
    Resolved,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => f.write_str("PENDING"),
            RequestStatus::Dispatched => f.write_str("DISPATCHED"),
            RequestStatus::Resolved => f.write_str("RESOLVED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub reg_no: String,
    pub model: String,
    /// Free text, e.g. Petrol or Diesel.
    pub fuel_type: String,
}

impl Vehicle {
    pub fn new(
        reg_no: impl Into<String>,
        model: impl Into<String>,
        fuel_type: impl Into<String>,
    ) -> Self {
        Self {
            reg_no: reg_no.into(),
            model: model.into(),
            fuel_type: fuel_type.into(),
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.reg_no, self.model, self.fuel_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Helper {
    pub id: HelperId,
    pub name: String,
    pub capability: Capability,
    pub location: Location,
    pub rating: f64,
}

impl Helper {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capability: Capability,
        location: Location,
        rating: f64,
    ) -> Self {
        Self {
            id: HelperId::new(id),
            name: name.into(),
            capability,
            location,
            rating,
        }
    }
}

impl fmt::Display for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) @ {} r={:.1}",
            self.name, self.capability, self.location, self.rating
        )
    }
}

#[derive(Debug, Clone)]
pub struct AssistanceRequest {
    id: RequestId,
    request_type: RequestType,
    vehicle: Vehicle,
    location: Location,
    status: RequestStatus,
    assigned_helper: Option<HelperId>,
    liters_needed: f64,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl AssistanceRequest {
    pub fn new(
        id: RequestId,
        request_type: RequestType,
        vehicle: Vehicle,
        location: Location,
        liters_needed: f64,
    ) -> Self {
        Self {
            id,
            request_type,
            vehicle,
            location,
            status: RequestStatus::Pending,
            assigned_helper: None,
            liters_needed,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn assigned_helper(&self) -> Option<&HelperId> {
        self.assigned_helper.as_ref()
    }

    /// Only meaningful for fuel requests; stored as given otherwise.
    pub fn liters_needed(&self) -> f64 {
        self.liters_needed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    // 呼叫端負責擋下已 RESOLVED 的請求
    pub(crate) fn mark_dispatched(&mut self, helper: HelperId) {
        self.assigned_helper = Some(helper);
        self.status = RequestStatus::Dispatched;
    }

    pub(crate) fn mark_resolved(&mut self) {
        if self.resolved_at.is_none() {
            self.resolved_at = Some(Utc::now());
        }
        self.status = RequestStatus::Resolved;
    }

    /// One-line summary, e.g. `Req#1 [FUEL] KA01 | Swift | Petrol at (..) -> DISPATCHED | Helper: FuelBuddy`.
    pub fn summary(&self, helper_name: Option<&str>) -> String {
        let helper = helper_name
            .map(|name| format!(" | Helper: {}", name))
            .unwrap_or_default();
        format!(
            "Req#{} [{}] {} at {} -> {}{}",
            self.id, self.request_type, self.vehicle, self.location, self.status, helper
        )
    }
}
