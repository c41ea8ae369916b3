//! Forms of the admin dashboard.

use serde::Deserialize;
use validator::Validate;

use crate::calc::format::parse_number;
use crate::domain::types::UserRole;
use crate::domain::user::{CounterUpdate, NewUser, PasswordChange, ProfileUpdate};
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct NewUserForm {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl TryFrom<NewUserForm> for NewUser {
    type Error = FormError;

    fn try_from(mut form: NewUserForm) -> Result<Self, Self::Error> {
        form.email = form.email.trim().to_lowercase();
        form.username = form.username.trim().to_string();
        form.validate()?;

        Ok(Self {
            email: form.email,
            username: form.username,
            password: form.password,
            role: UserRole::from(form.role.as_str()),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PasswordForm {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

impl TryFrom<PasswordForm> for PasswordChange {
    type Error = FormError;

    fn try_from(form: PasswordForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            old_password: form.old_password,
            new_password: form.new_password,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub email: String,
}

impl TryFrom<ProfileForm> for ProfileUpdate {
    type Error = FormError;

    fn try_from(mut form: ProfileForm) -> Result<Self, Self::Error> {
        form.username = form.username.trim().to_string();
        form.email = form.email.trim().to_string();
        form.validate()?;
        Ok(Self {
            username: form.username,
            email: form.email,
        })
    }
}

/// Document numbering settings.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CounterForm {
    /// Period the counter applies to, e.g. `2024-05`.
    #[validate(length(min = 1))]
    pub year_month: String,
    pub next_seq: String,
}

impl TryFrom<CounterForm> for CounterUpdate {
    type Error = FormError;

    fn try_from(mut form: CounterForm) -> Result<Self, Self::Error> {
        form.year_month = form.year_month.trim().to_string();
        form.validate()?;

        let next_seq = form.next_seq.trim();
        if next_seq.is_empty() || parse_number(next_seq).is_none() {
            return Err(FormError::NotNumeric("next sequence"));
        }

        Ok(Self {
            year_month: form.year_month,
            next_seq: next_seq.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_requires_numeric_sequence() {
        let form = CounterForm {
            year_month: "2024-05".into(),
            next_seq: "twelve".into(),
        };
        assert!(matches!(
            CounterUpdate::try_from(form),
            Err(FormError::NotNumeric(_))
        ));

        let form = CounterForm {
            year_month: "2024-05".into(),
            next_seq: " 12 ".into(),
        };
        let update = CounterUpdate::try_from(form).unwrap();
        assert_eq!(update.next_seq, "12");
    }

    #[test]
    fn counter_requires_period() {
        let form = CounterForm {
            year_month: " ".into(),
            next_seq: "1".into(),
        };
        assert!(matches!(
            CounterUpdate::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn new_user_role_defaults_to_user() {
        let user = NewUser::try_from(NewUserForm {
            email: " Sara@Example.com".into(),
            username: "sara".into(),
            password: "pw".into(),
            role: "manager".into(),
        })
        .unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.email, "sara@example.com");
    }
}
