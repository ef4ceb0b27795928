//! Credential check and registration
//!
//! Both cross-reference the roster: registered users are stored as roster
//! records that carry a password.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::models::{AuthUser, BloodType, DriverStatus, Record, DEFAULT_IMAGE_URL};
use crate::records::{check_login_email, RecordStore};
use crate::session::SessionStore;
use crate::storage::KeyValueStorage;
use crate::{Error, Result};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub(crate) static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Check `email`/`password` against the roster and log the match in
///
/// Every kind of mismatch reports the same `AuthenticationFailure`.
pub fn authenticate<R, S>(
    records: &RecordStore<R>,
    session: &mut SessionStore<S>,
    email: &str,
    password: &str,
) -> Result<AuthUser>
where
    R: KeyValueStorage,
    S: KeyValueStorage,
{
    let email = email.trim().to_lowercase();
    let user = records
        .load()?
        .into_iter()
        .find(|r| r.email.to_lowercase() == email && r.password() == Some(password))
        .map(|r| AuthUser::new(r.name, r.email));

    let Some(user) = user else {
        tracing::debug!("Login rejected");
        return Err(Error::AuthenticationFailure);
    };

    session.login(user.clone())?;
    Ok(user)
}

/// The registration form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub license_number: String,
    pub helmet_id: String,
    pub age: String,
    pub blood_type: String,
    pub phone_number: String,
    pub relative_phone_number: String,
}

impl Registration {
    /// Check the form, reporting the first problem found
    pub fn validate(&self) -> Result<()> {
        self.parse_fields().map(|_| ())
    }

    fn parse_fields(&self) -> Result<(BloodType, u32)> {
        let required = [
            ("Name", &self.name),
            ("License number", &self.license_number),
            ("Helmet ID", &self.helmet_id),
            ("Phone number", &self.phone_number),
            ("Relative's phone number", &self.relative_phone_number),
        ];
        if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(Error::Validation(format!("{} is required.", label)));
        }

        let blood_type = BloodType::from_str(&self.blood_type)
            .ok_or_else(|| Error::Validation("Please select a blood type.".into()))?;

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::Validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LENGTH
            )));
        }

        let age = match self.age.trim().parse::<u32>() {
            Ok(age) if age > 0 => age,
            _ => {
                return Err(Error::Validation(
                    "Please enter a valid positive age.".into(),
                ))
            }
        };

        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(Error::Validation(
                "Please enter a valid email address.".into(),
            ));
        }

        Ok((blood_type, age))
    }

    /// Validate the form and build the record it describes
    pub fn into_record(self, id: String) -> Result<Record> {
        let (blood_type, age) = self.parse_fields()?;

        Ok(Record {
            id,
            name: self.name,
            email: self.email,
            password: Some(self.password),
            phone_number: self.phone_number,
            age,
            blood_type,
            status: DriverStatus::Offline,
            image_url: Some(DEFAULT_IMAGE_URL.to_string()),
        })
    }
}

/// Display id for a newly registered driver: `#` and the last six
/// digits of the millisecond timestamp
pub fn generate_record_id(now: DateTime<Utc>) -> String {
    format!("#{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

/// Validate `form` and add the new credential record to the roster
pub fn register<R: KeyValueStorage>(
    records: &RecordStore<R>,
    form: Registration,
    now: DateTime<Utc>,
) -> Result<Record> {
    let record = form.into_record(generate_record_id(now))?;

    // The email is checked ahead of the id
    check_login_email(&records.load()?, &record, None)?;
    records.insert(record.clone())?;
    tracing::info!(id = %record.id, name = %record.name, "Registered user");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form() -> Registration {
        Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            license_number: "L-1".into(),
            helmet_id: "H-1".into(),
            age: "36".into(),
            blood_type: "O+".into(),
            phone_number: "555-0100".into(),
            relative_phone_number: "555-0199".into(),
        }
    }

    #[test]
    fn test_generate_record_id() {
        let now = Utc.timestamp_millis_opt(1_700_000_012_345).unwrap();
        assert_eq!(generate_record_id(now), "#012345");
    }

    #[test]
    fn test_valid_form() {
        let record = form().into_record("#1".into()).unwrap();
        assert_eq!(record.password(), Some("secret1"));
        assert_eq!(record.age, 36);
        assert_eq!(record.status, DriverStatus::Offline);
        assert_eq!(record.image_url(), DEFAULT_IMAGE_URL);
    }

    #[test]
    fn test_form_validation_messages() {
        let cases: [(fn(&mut Registration), &str); 4] = [
            (|f| f.blood_type.clear(), "Please select a blood type."),
            (|f| f.password = "12345".into(), "Password must be at least 6 characters."),
            (|f| f.age = "0".into(), "Please enter a valid positive age."),
            (|f| f.email = "ada@example".into(), "Please enter a valid email address."),
        ];

        for (mutate, expected) in cases {
            let mut f = form();
            mutate(&mut f);
            match f.into_record("#1".into()) {
                Err(Error::Validation(msg)) => assert_eq!(msg, expected),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }
}
