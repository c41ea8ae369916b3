//! Admin dashboard workflows: stats, team members, account settings and export.

use chrono::NaiveDate;

use crate::domain::user::{
    CounterUpdate, DashboardStats, NewUser, PasswordChange, ProfileUpdate, User, UserProfile,
};
use crate::dto::admin::{ExportFile, UserEntry};
use crate::forms::admin::{CounterForm, NewUserForm, PasswordForm, ProfileForm};
use crate::repository::{AccountWriter, AdminReader, AdminWriter};
use crate::services::{Confirm, ServiceError, ServiceResult, ensure_confirmed};
use crate::session::{EMAIL_KEY, SessionStore, USERNAME_KEY};

pub async fn load_dashboard<R>(repo: &R) -> ServiceResult<DashboardStats>
where
    R: AdminReader + ?Sized,
{
    repo.dashboard_stats().await.map_err(|err| {
        log::error!("Failed to load dashboard data: {err}");
        ServiceError::from(err)
    })
}

/// Lists team members, flagging the protected account.
pub async fn list_users<R>(repo: &R, protected_email: Option<&str>) -> ServiceResult<Vec<UserEntry>>
where
    R: AdminReader + ?Sized,
{
    let users = repo.list_users().await.map_err(|err| {
        log::error!("Failed to list users: {err}");
        ServiceError::from(err)
    })?;

    Ok(users
        .into_iter()
        .map(|user| UserEntry {
            protected: is_protected(&user, protected_email),
            user,
        })
        .collect())
}

fn is_protected(user: &User, protected_email: Option<&str>) -> bool {
    protected_email.is_some_and(|email| user.email.eq_ignore_ascii_case(email.trim()))
}

pub async fn create_user<R>(repo: &R, form: NewUserForm) -> ServiceResult<()>
where
    R: AdminWriter + ?Sized,
{
    let new_user = NewUser::try_from(form)?;

    repo.register_user(&new_user).await.map_err(|err| {
        log::error!("Failed to create user {}: {err}", new_user.email);
        ServiceError::from(err)
    })
}

/// Deletes a team member after confirmation. The protected account is refused
/// without a request.
pub async fn delete_user<R, C>(
    repo: &R,
    user: &User,
    protected_email: Option<&str>,
    confirm: &C,
) -> ServiceResult<()>
where
    R: AdminWriter + ?Sized,
    C: Confirm + ?Sized,
{
    if is_protected(user, protected_email) {
        return Err(ServiceError::Form("This account is protected".to_string()));
    }

    ensure_confirmed(confirm, "Delete user?")?;

    repo.delete_user(&user.id).await.map_err(|err| {
        log::error!("Failed to delete user {}: {err}", user.email);
        ServiceError::from(err)
    })
}

pub async fn change_password<R>(repo: &R, form: PasswordForm) -> ServiceResult<()>
where
    R: AccountWriter + ?Sized,
{
    let change = PasswordChange::try_from(form)?;

    repo.change_password(&change).await.map_err(|err| {
        log::error!("Failed to change password: {err}");
        ServiceError::from(err)
    })
}

/// Updates the profile and refreshes the stored username and email from the
/// server's answer.
pub async fn update_profile<R, S>(repo: &R, store: &S, form: ProfileForm) -> ServiceResult<UserProfile>
where
    R: AccountWriter + ?Sized,
    S: SessionStore + ?Sized,
{
    let update = ProfileUpdate::try_from(form)?;

    let profile = repo.update_profile(&update).await.map_err(|err| {
        log::error!("Failed to update profile: {err}");
        ServiceError::from(err)
    })?;

    store.set(EMAIL_KEY, &profile.email)?;
    store.set(USERNAME_KEY, &profile.username)?;

    Ok(profile)
}

/// Sets where document numbering restarts. Returns the server's message.
pub async fn update_counter<R, C>(repo: &R, form: CounterForm, confirm: &C) -> ServiceResult<Option<String>>
where
    R: AdminWriter + ?Sized,
    C: Confirm + ?Sized,
{
    let counter = CounterUpdate::try_from(form)?;

    ensure_confirmed(
        confirm,
        &format!(
            "Are you sure you want to set the counter for {} to start at {}?",
            counter.year_month, counter.next_seq
        ),
    )?;

    repo.update_counter(&counter).await.map_err(|err| {
        log::error!("Failed to update counter: {err}");
        ServiceError::from(err)
    })
}

pub async fn export_data<R>(repo: &R, today: NaiveDate) -> ServiceResult<ExportFile>
where
    R: AdminReader + ?Sized,
{
    let bytes = repo.export_data().await.map_err(|err| {
        log::error!("Export failed: {err}");
        ServiceError::from(err)
    })?;

    Ok(ExportFile::new(today, bytes))
}
