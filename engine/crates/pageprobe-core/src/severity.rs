//! Risk levels attached to issues

use serde::{Deserialize, Serialize};

/// Risk level for issues, ordered `None < Low < Medium < High`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Placeholder risk for "nothing found"
    #[default]
    None,
    /// Low risk, hardening recommendation
    Low,
    /// Medium risk, exploitable under some conditions
    Medium,
    /// High risk, likely exploitable
    High,
}

impl RiskLevel {
    /// Get wire/display string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Color used when rendering an issue of this risk
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::High => "red",
            RiskLevel::Medium => "orange",
            RiskLevel::Low => "green",
            RiskLevel::None => "gray",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(RiskLevel::None),
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert!(RiskLevel::Low > RiskLevel::None);
    }

    #[test]
    fn test_risk_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&RiskLevel::None).unwrap(), "\"none\"");
        let parsed: RiskLevel = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(parsed, RiskLevel::Medium);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("HIGH".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert_eq!(" Low ".parse::<RiskLevel>(), Ok(RiskLevel::Low));
        assert!("critical".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_colors() {
        assert_eq!(RiskLevel::High.color(), "red");
        assert_eq!(RiskLevel::Medium.color(), "orange");
        assert_eq!(RiskLevel::Low.color(), "green");
        assert_eq!(RiskLevel::None.color(), "gray");
    }
}
