//! Data model shared by the roster, the credential check and the session

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::EMAIL_PATTERN;
use crate::Error;

/// Image shown for drivers that have no picture of their own
pub const DEFAULT_IMAGE_URL: &str = "/images/man.png";

/// Reported when a driver form leaves a mandatory field empty
pub const REQUIRED_DRIVER_FIELDS: &str =
    "Please fill in all required fields: Name, ID, Phone Number, Email, Age, and Blood Type.";

static IMAGE_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(http|https)://[^ "]+$"#).expect("valid image URL pattern"));

/// ABO/Rh blood group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Whether a driver's helmet is currently connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DriverStatus {
    Online,
    #[default]
    Offline,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Online => "Online",
            DriverStatus::Offline => "Offline",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Online" => Some(DriverStatus::Online),
            "Offline" => Some(DriverStatus::Offline),
            _ => None,
        }
    }
}

/// A driver in the roster
///
/// Records created through registration also carry a plaintext password
/// and double as login credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub phone_number: String,
    pub age: u32,
    pub blood_type: BloodType,
    pub status: DriverStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Record {
    /// Whether this record can be used to log in
    pub fn is_credential(&self) -> bool {
        self.password.is_some()
    }

    /// The stored password, if this record is a credential
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Picture to display, falling back to the placeholder
    pub fn image_url(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_IMAGE_URL,
        }
    }

    /// Validate the fields a driver form must supply
    ///
    /// Checks run in form order: required fields, age, image URL, email.
    pub fn validate(&self) -> crate::Result<()> {
        let required = [&self.id, &self.name, &self.phone_number, &self.email];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(Error::Validation(REQUIRED_DRIVER_FIELDS.into()));
        }
        if self.age == 0 {
            return Err(Error::Validation(
                "Please enter a valid positive number for age.".into(),
            ));
        }
        if let Some(url) = self.custom_image_url() {
            if !IMAGE_URL_PATTERN.is_match(url) {
                return Err(Error::Validation(
                    "Please enter a valid image URL or leave blank.".into(),
                ));
            }
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(Error::Validation(
                "Please enter a valid email address.".into(),
            ));
        }
        Ok(())
    }

    /// The stored image URL unless it is blank or the placeholder
    fn custom_image_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty() && *url != DEFAULT_IMAGE_URL)
    }
}

/// The identity of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub name: String,
    pub email: String,
}

impl AuthUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Both fields must be non-empty for a session to be valid
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

/// The mock roster shown before anything has been saved
pub fn default_drivers() -> Vec<Record> {
    let driver = |id: &str, n: u32, status, age, blood_type| Record {
        id: id.to_string(),
        name: format!("Name {}", n),
        email: format!("name{}@example.com", n),
        password: None,
        phone_number: format!("555-010{}", n),
        age,
        blood_type,
        status,
        image_url: Some(DEFAULT_IMAGE_URL.to_string()),
    };

    vec![
        driver("#1122589", 1, DriverStatus::Online, 30, BloodType::APositive),
        driver("#1122590", 2, DriverStatus::Offline, 25, BloodType::ONegative),
        driver("#1122591", 3, DriverStatus::Online, 41, BloodType::BPositive),
        driver("#1122592", 4, DriverStatus::Online, 29, BloodType::AbPositive),
    ]
}
