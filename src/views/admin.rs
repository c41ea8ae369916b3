//! Admin dashboard page.

use chrono::Local;

use crate::domain::types::UserId;
use crate::domain::user::{DashboardStats, User};
use crate::dto::admin::{ExportFile, UserEntry};
use crate::forms::admin::{CounterForm, NewUserForm, PasswordForm, ProfileForm};
use crate::repository::{AccountWriter, AdminReader, AdminWriter};
use crate::services::{Confirm, admin as admin_service};
use crate::session::SessionStore;
use crate::views::{Notice, Outcome};

#[derive(Debug, Default)]
pub struct AdminPage {
    stats: Option<DashboardStats>,
    users: Vec<UserEntry>,
    user_filter: String,
    protected_email: Option<String>,
}

impl AdminPage {
    pub fn new(protected_email: Option<String>) -> Self {
        Self {
            protected_email,
            ..Self::default()
        }
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn users(&self) -> &[UserEntry] {
        &self.users
    }

    pub fn set_user_filter(&mut self, term: &str) {
        self.user_filter = term.to_string();
    }

    /// Users whose name or email contains the filter.
    pub fn visible_users(&self) -> Vec<&UserEntry> {
        let term = self.user_filter.trim();
        self.users
            .iter()
            .filter(|entry| term.is_empty() || entry.user.matches(term))
            .collect()
    }

    pub async fn load_dashboard<R>(&mut self, repo: &R) -> Outcome
    where
        R: AdminReader + ?Sized,
    {
        match admin_service::load_dashboard(repo).await {
            Ok(stats) => {
                self.stats = Some(stats);
                Outcome::none()
            }
            Err(err) => Outcome::from_error(err, "Error loading dashboard data"),
        }
    }

    pub async fn load_users<R>(&mut self, repo: &R) -> Outcome
    where
        R: AdminReader + ?Sized,
    {
        match admin_service::list_users(repo, self.protected_email.as_deref()).await {
            Ok(users) => {
                self.users = users;
                Outcome::none()
            }
            Err(err) => Outcome::from_error(err, "Failed to load users"),
        }
    }

    pub async fn create_user<R>(&mut self, repo: &R, form: NewUserForm) -> Outcome
    where
        R: AdminReader + AdminWriter + ?Sized,
    {
        match admin_service::create_user(repo, form).await {
            Ok(()) => {
                let reload = self.load_users(repo).await;
                if reload.navigation.is_some() {
                    return reload;
                }
                Outcome::notice(Notice::success("User created successfully"))
            }
            Err(err) => Outcome::from_error(err, "Failed to create user"),
        }
    }

    pub async fn delete_user<R, C>(&mut self, repo: &R, id: &UserId, confirm: &C) -> Outcome
    where
        R: AdminReader + AdminWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        let Some(user) = self.find_user(id).cloned() else {
            return Outcome::notice(Notice::error("User not found"));
        };

        match admin_service::delete_user(repo, &user, self.protected_email.as_deref(), confirm).await
        {
            Ok(()) => {
                let reload = self.load_users(repo).await;
                if reload.navigation.is_some() {
                    return reload;
                }
                Outcome::notice(Notice::warning("User deleted"))
            }
            Err(err) => Outcome::from_error(err, "Failed to delete user"),
        }
    }

    fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users
            .iter()
            .map(|entry| &entry.user)
            .find(|user| &user.id == id)
    }

    pub async fn change_password<R>(&self, repo: &R, form: PasswordForm) -> Outcome
    where
        R: AccountWriter + ?Sized,
    {
        match admin_service::change_password(repo, form).await {
            Ok(()) => Outcome::notice(Notice::success("Password changed successfully")),
            Err(err) => Outcome::from_error(err, "Failed to change password"),
        }
    }

    pub async fn update_profile<R, S>(&self, repo: &R, store: &S, form: ProfileForm) -> Outcome
    where
        R: AccountWriter + ?Sized,
        S: SessionStore + ?Sized,
    {
        match admin_service::update_profile(repo, store, form).await {
            Ok(_) => Outcome::notice(Notice::success("Profile updated successfully")),
            Err(err) => Outcome::from_error(err, "Failed to update profile"),
        }
    }

    pub async fn update_counter<R, C>(&self, repo: &R, form: CounterForm, confirm: &C) -> Outcome
    where
        R: AdminWriter + ?Sized,
        C: Confirm + ?Sized,
    {
        match admin_service::update_counter(repo, form, confirm).await {
            Ok(message) => Outcome::notice(Notice::success(
                message.unwrap_or_else(|| "Counter updated".to_string()),
            )),
            Err(err) => Outcome::from_error(err, "Failed to update counter"),
        }
    }

    /// Downloads the backup named after today's date.
    pub async fn export<R>(&self, repo: &R) -> (Outcome, Option<ExportFile>)
    where
        R: AdminReader + ?Sized,
    {
        match admin_service::export_data(repo, Local::now().date_naive()).await {
            Ok(file) => (
                Outcome::notice(Notice::success("Backup downloaded")),
                Some(file),
            ),
            Err(err) => (Outcome::from_error(err, "Export failed"), None),
        }
    }
}
