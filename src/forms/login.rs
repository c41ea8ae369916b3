use serde::Deserialize;
use validator::Validate;

use crate::domain::user::Credentials;
use crate::forms::FormError;

#[derive(Debug, Default, Deserialize, Validate)]
/// Sign-in form.
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(mut form: LoginForm) -> Result<Self, Self::Error> {
        form.email = form.email.trim().to_string();
        form.validate()?;
        Ok(Self {
            email: form.email,
            password: form.password,
        })
    }
}
