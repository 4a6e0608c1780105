use serde::{Deserialize, Serialize};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub sms: bool,
    pub urgent_alerts: bool,
    pub daily_reports: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            urgent_alerts: true,
            daily_reports: true,
        }
    }
}

/// System-wide settings managed by administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub system_name: String,
    pub categories: Vec<String>,
    pub technicians: Vec<String>,
    pub departments: Vec<String>,
    pub locations: Vec<String>,
    /// Days after which resolved tickets are considered stale
    pub auto_close_days: u32,
    pub notification_settings: NotificationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            system_name: "Campus IT Support System".to_string(),
            categories: strings(&["laptop", "printer", "networking", "software", "hardware", "other"]),
            technicians: strings(&["John", "Sarah", "Mike", "Priya", "David"]),
            departments: strings(&[
                "cse", "it", "ece", "mech", "civil", "science", "management", "admin",
            ]),
            locations: strings(&["lab1", "lab2", "library", "hostel", "office", "admin_block"]),
            auto_close_days: 30,
            notification_settings: NotificationSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"systemName": "Lab Desk"}"#).unwrap();
        assert_eq!(settings.system_name, "Lab Desk");
        assert_eq!(settings.auto_close_days, 30);
        assert_eq!(settings.categories.len(), 6);
    }
}
