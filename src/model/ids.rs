// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Identifier of one vehicle (and therefore one route) in a solved plan.
///
/// Solvers usually hand out small integers (`"0"`, `"1"`, ...), but any non-blank string is
/// accepted. Ordering is natural: purely numeric ids sort by value and before every
/// non-numeric id, which sort lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VehicleId(SmolStr);

impl VehicleId {
    pub fn new(value: impl AsRef<str>) -> Result<Self, VehicleIdError> {
        let value = value.as_ref();
        validate_vehicle_id(value)?;
        Ok(Self(SmolStr::new(value)))
    }

    pub fn from_index(index: u32) -> Self {
        Self(SmolStr::new(index.to_string()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Numeric value of the id when it is made of ASCII digits only.
    pub fn numeric(&self) -> Option<u64> {
        let value = self.0.as_str();
        if !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        value.parse().ok()
    }
}

impl Ord for VehicleId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(left), Some(right)) => left.cmp(&right).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for VehicleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for VehicleId {
    type Err = VehicleIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for VehicleId {
    type Error = VehicleIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VehicleId> for String {
    fn from(value: VehicleId) -> Self {
        value.0.to_string()
    }
}

impl From<u32> for VehicleId {
    fn from(index: u32) -> Self {
        Self::from_index(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleIdError {
    #[error("vehicle id must not be empty")]
    Empty,
    #[error("vehicle id must not contain whitespace or control characters")]
    InvalidCharacter,
}

fn validate_vehicle_id(value: &str) -> Result<(), VehicleIdError> {
    if value.is_empty() {
        return Err(VehicleIdError::Empty);
    }
    if value.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(VehicleIdError::InvalidCharacter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{VehicleId, VehicleIdError};

    fn id(value: &str) -> VehicleId {
        VehicleId::new(value).expect("vehicle id")
    }

    #[test]
    fn vehicle_id_rejects_empty() {
        assert_eq!(VehicleId::new(""), Err(VehicleIdError::Empty));
    }

    #[test]
    fn vehicle_id_rejects_whitespace() {
        assert_eq!(VehicleId::new("truck 1"), Err(VehicleIdError::InvalidCharacter));
    }

    #[test]
    fn numeric_ids_sort_by_value_before_names() {
        let mut ids = vec![id("van"), id("10"), id("2"), id("alpha"), id("0")];
        ids.sort();
        let sorted = ids.iter().map(VehicleId::as_str).collect::<Vec<_>>();
        assert_eq!(sorted, vec!["0", "2", "10", "alpha", "van"]);
    }

    #[test]
    fn leading_zeros_keep_a_total_order() {
        assert!(id("7") < id("07") || id("07") < id("7"));
        assert_ne!(id("7"), id("07"));
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let json = serde_json::to_string(&id("3")).expect("serialize");
        assert_eq!(json, "\"3\"");
        let parsed: VehicleId = serde_json::from_str("\"truck-a\"").expect("deserialize");
        assert_eq!(parsed, id("truck-a"));
        assert!(serde_json::from_str::<VehicleId>("\"\"").is_err());
    }
}
