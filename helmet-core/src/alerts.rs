//! Helmet alerts (mock feed) and the alerts page filter

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Crucial,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::Crucial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
            Severity::Crucial => "Crucial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    /// Whether the alert needs attention (drives the red/green colouring)
    pub fn is_elevated(&self) -> bool {
        matches!(self, Severity::High | Severity::Crucial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: u32,
    pub name: String,
    pub time: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// The alert feed shown on the alerts page
pub fn mock_alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: 1,
            name: "Mohamed Abdelaty".to_string(),
            time: "4:18".to_string(),
            severity: Severity::High,
            kind: "Blood Pressure".to_string(),
            details: Some("Systolic reading above threshold (185 mmHg).".to_string()),
            location: Some("Sector 7 Bridge".to_string()),
        },
        Alert {
            id: 2,
            name: "Mohamed Abdelaty".to_string(),
            time: "4:18".to_string(),
            severity: Severity::Moderate,
            kind: "Blood Pressure".to_string(),
            details: Some("Diastolic reading elevated (95 mmHg).".to_string()),
            location: Some("Main St & 2nd Ave".to_string()),
        },
        Alert {
            id: 3,
            name: "Rider Alpha".to_string(),
            time: "5:02".to_string(),
            severity: Severity::Moderate,
            kind: "Heart Rate".to_string(),
            details: Some("Heart rate exceeded 150 bpm during ride.".to_string()),
            location: Some("Highway 101 Exit 5".to_string()),
        },
        Alert {
            id: 4,
            name: "Driver Beta".to_string(),
            time: "5:15".to_string(),
            severity: Severity::High,
            kind: "Impact Detected".to_string(),
            details: Some("Significant G-force detected (8g). Possible fall.".to_string()),
            location: Some("Industrial Park Rd".to_string()),
        },
        Alert {
            id: 5,
            name: "Mohamed Abdelaty".to_string(),
            time: "5:30".to_string(),
            severity: Severity::High,
            kind: "Blood Pressure".to_string(),
            details: Some("Sustained high systolic pressure.".to_string()),
            location: Some("Downtown Tunnel".to_string()),
        },
        Alert {
            id: 6,
            name: "Rider Gamma".to_string(),
            time: "5:31".to_string(),
            severity: Severity::Crucial,
            kind: "SOS Button".to_string(),
            details: Some("Manual SOS button activated by rider.".to_string()),
            location: Some("Near Lake View Point".to_string()),
        },
        Alert {
            id: 7,
            name: "Driver Delta".to_string(),
            time: "5:45".to_string(),
            severity: Severity::Low,
            kind: "Low Battery".to_string(),
            details: Some("Helmet battery below 15%.".to_string()),
            location: Some("City Center Plaza".to_string()),
        },
    ]
}

/// Search box plus severity selector
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    pub search: String,
    /// `None` means all severities
    pub severity: Option<Severity>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        let needle = self.search.to_lowercase();
        let search_match = alert.name.to_lowercase().contains(&needle)
            || alert.id.to_string().contains(&self.search)
            || alert.kind.to_lowercase().contains(&needle);
        let severity_match = self.severity.map_or(true, |s| alert.severity == s);
        search_match && severity_match
    }

    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        alerts.iter().filter(|a| self.matches(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_search() {
        let alerts = mock_alerts();
        let filter = AlertFilter {
            search: "blood".into(),
            severity: None,
        };
        assert_eq!(filter.apply(&alerts).len(), 3);

        let filter = AlertFilter {
            search: "6".into(),
            severity: None,
        };
        let hits = filter.apply(&alerts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, "SOS Button");
    }

    #[test]
    fn test_filter_by_severity() {
        let alerts = mock_alerts();
        let filter = AlertFilter {
            search: "abdelaty".into(),
            severity: Severity::from_str("High"),
        };
        assert_eq!(filter.apply(&alerts).len(), 2);
        assert!(Severity::Crucial.is_elevated());
        assert!(!Severity::Moderate.is_elevated());
    }
}
