use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// selects which of the four per-edge weights a query minimizes.
///
/// the source dataset stores one scalar per mode on every edge; an
/// enumerated tag avoids both the lookup overhead and the string-typo bugs
/// of a dynamic attribute key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Optimization {
    /// minimize total length in meters
    Distance,
    /// minimize the summed composite risk score
    Risk,
    /// minimize the blended distance+risk cost
    Combined,
    /// minimize the number of traffic incidents along the route
    Incidents,
}

impl Optimization {
    pub fn label(&self) -> &'static str {
        match self {
            Optimization::Distance => "distance",
            Optimization::Risk => "risk",
            Optimization::Combined => "combined",
            Optimization::Incidents => "incidents",
        }
    }
}

impl Display for Optimization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Optimization {
    type Err = String;

    /// accepts the optimization labels of the query API, including the
    /// spanish spellings of "incidents" used by existing clients.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distance" => Ok(Optimization::Distance),
            "risk" => Ok(Optimization::Risk),
            "combined" => Ok(Optimization::Combined),
            "incidents" | "incident" | "incidentes" => Ok(Optimization::Incidents),
            other => Err(format!("unknown optimization '{}'", other)),
        }
    }
}
