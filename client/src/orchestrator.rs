//! Client state orchestrator
//!
//! Owns the [`ClientState`] and runs the request sequences behind each user
//! action. Every step of an action is awaited before the next one starts,
//! and every failure is caught here: background loads only log, everything
//! else also puts a message on the banner. Nothing is retried and nothing is
//! rolled back, so an action that fails half way keeps its earlier effects.

use std::time::Duration;

use chrono::NaiveDate;
use nutrilog_shared::{
    BannerMessage, ClientState, DailyRecord, DatePick, StateError, SubmissionPlan, UserId,
};
use tracing::{debug, error, info, warn};

use crate::api::NutritionApi;
use crate::banner::Banner;
use crate::confirm::OverwriteConfirm;
use crate::error::{ClientError, ClientResult};
use crate::storage::{LocalStore, ACTIVE_USER_KEY};

/// Drives [`ClientState`] against the nutrition API
pub struct Orchestrator<A, S> {
    state: ClientState,
    api: A,
    store: S,
    confirm: Box<dyn OverwriteConfirm>,
    banner: Banner,
}

impl<A, S> Orchestrator<A, S>
where
    A: NutritionApi,
    S: LocalStore,
{
    /// Create an orchestrator with a fresh state dated today
    pub fn new(
        api: A,
        store: S,
        confirm: Box<dyn OverwriteConfirm>,
        dismiss_after: Option<Duration>,
    ) -> Self {
        Self {
            state: ClientState::new(chrono::Local::now().date_naive()),
            api,
            store,
            confirm,
            banner: Banner::new(dismiss_after),
        }
    }

    /// Replace the starting state
    pub fn with_state(mut self, state: ClientState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Mutable access for form edits
    pub fn state_mut(&mut self) -> &mut ClientState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Message currently on the banner
    pub fn banner(&self) -> Option<BannerMessage> {
        self.banner.current()
    }

    pub fn toggle_profile_form(&mut self) {
        self.state.toggle_profile_form();
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Load the user list and restore the persisted user, if any
    pub async fn activate(&mut self) {
        self.load_users().await;

        if let Some(id) = self.stored_user_id() {
            info!(user_id = %id, "Restoring persisted user");
            self.select_user(Some(id)).await;
        }
    }

    fn stored_user_id(&self) -> Option<UserId> {
        let raw = match self.store.get(ACTIVE_USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "Could not read persisted user id");
                return None;
            }
        };

        match raw.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(value = %raw, "Discarding unparsable persisted user id");
                self.forget_persisted_user();
                None
            }
        }
    }

    fn forget_persisted_user(&self) {
        if let Err(err) = self.store.remove(ACTIVE_USER_KEY) {
            warn!(error = %err, "Could not remove persisted user id");
        }
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Refresh the user picker. Failures are logged only.
    pub async fn load_users(&mut self) {
        match self.api.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "User list loaded");
                self.state.set_users(users);
            }
            Err(err) => warn!(error = %err, "Failed to load user list"),
        }
    }

    /// Switch to a user, or to no user with `None`
    pub async fn select_user(&mut self, id: Option<UserId>) {
        let Some(id) = id else {
            self.state.clear_active_user();
            info!("Active user cleared");
            return;
        };

        self.state.begin_user_switch(id);
        if self.load_profile(id).await {
            self.load_filled_dates().await;
        }
    }

    /// Fetch a profile and make it active. A profile that cannot be loaded
    /// also drops the persisted id so the next start does not retry it.
    async fn load_profile(&mut self, id: UserId) -> bool {
        self.state.loading.user = true;
        let result = self.api.get_user(id).await;
        self.state.loading.user = false;

        match result {
            Ok(profile) => {
                self.state.activate_user(&profile);
                info!(user_id = %id, "Profile loaded");
                self.banner.success("Profile loaded");
                true
            }
            Err(err) => {
                error!(user_id = %id, error = %err, "Failed to load profile");
                self.forget_persisted_user();
                self.state.clear_active_user();
                self.banner
                    .error(format!("Load failed: {}", err.user_message()));
                false
            }
        }
    }

    /// Create the profile when no user is active, update it otherwise
    pub async fn save_profile(&mut self) {
        self.state.loading.user = true;
        let outcome = self.try_save_profile().await;
        self.state.loading.user = false;

        match outcome {
            Ok(true) => self.banner.success("Profile saved"),
            Ok(false) => self.banner.success("Profile updated"),
            Err(err) => {
                error!(error = %err, "Failed to save profile");
                self.banner
                    .error(format!("Save failed: {}", err.user_message()));
            }
        }
    }

    /// Returns whether a new user was created
    async fn try_save_profile(&mut self) -> ClientResult<bool> {
        let payload = self
            .state
            .profile_form
            .to_payload()
            .map_err(StateError::from)?;

        let created = match self.state.active_user_id() {
            Some(id) => {
                let profile = self.api.update_user(id, &payload).await?;
                self.state.apply_profile(&profile);
                info!(user_id = %id, "Profile updated");
                false
            }
            None => {
                let profile = self.api.create_user(&payload).await?;
                let id = profile.id;
                self.state.activate_user(&profile);
                if let Err(err) = self.store.set(ACTIVE_USER_KEY, &id.to_string()) {
                    warn!(user_id = %id, error = %err, "Could not persist user id");
                }
                info!(user_id = %id, "Profile created");

                self.load_users().await;
                self.state.selected_user_id = Some(id);
                true
            }
        };

        self.load_filled_dates().await;
        Ok(created)
    }

    // ========================================================================
    // Dates and Records
    // ========================================================================

    /// Refresh the filled-dates index. Failures are logged only.
    pub async fn load_filled_dates(&mut self) {
        let Some(id) = self.state.active_user_id() else {
            return;
        };

        match self.api.list_filled_dates(id).await {
            Ok(dates) => {
                debug!(user_id = %id, count = dates.len(), "Filled dates loaded");
                self.state.set_filled_dates(dates);
            }
            Err(err) => warn!(user_id = %id, error = %err, "Failed to load filled dates"),
        }
    }

    /// Select a calendar date given as `YYYY-MM-DD`
    pub async fn pick_date(&mut self, date: &str) {
        match self.state.pick_date_str(date) {
            Ok(DatePick::Filled(date)) => {
                self.load_record(date).await;
                self.fetch_summary(date).await;
            }
            Ok(DatePick::Empty(date)) => debug!(%date, "Picked a date without a record"),
            Err(err) => {
                warn!(error = %err, "Rejected date");
                self.banner.error(err.to_string());
            }
        }
    }

    /// Load a stored record into the form. A missing record is logged only.
    async fn load_record(&mut self, date: NaiveDate) {
        let Some(id) = self.state.active_user_id() else {
            return;
        };

        match self.api.get_daily_record(id, date).await {
            Ok(Some(record)) => self.state.apply_record(&record),
            Ok(None) => warn!(user_id = %id, %date, "No record stored for date"),
            Err(err) => warn!(user_id = %id, %date, error = %err, "Failed to load record"),
        }
    }

    /// Submit the record form, asking first when it would overwrite a record
    pub async fn submit_record(&mut self) {
        let plan = match self.state.plan_submission() {
            Ok(plan) => plan,
            Err(err) => {
                warn!(error = %err, "Record not submitted");
                self.banner.error(err.to_string());
                return;
            }
        };

        let payload = match self.state.record_form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                let err = ClientError::from(StateError::from(err));
                warn!(error = %err, "Record form invalid");
                self.banner
                    .error(format!("Submit failed: {}", err.user_message()));
                return;
            }
        };

        if let SubmissionPlan::NeedsConfirmation(date) = plan {
            if !self.confirm.confirm_overwrite(date).await {
                info!(%date, "Overwrite declined");
                return;
            }
        }

        self.state.loading.record = true;
        let outcome = self.try_submit_record(plan.date(), &payload).await;
        self.state.loading.record = false;

        if let Err(err) = outcome {
            error!(error = %err, "Failed to submit record");
            self.banner
                .error(format!("Submit failed: {}", err.user_message()));
        }
    }

    async fn try_submit_record(
        &mut self,
        date: NaiveDate,
        payload: &nutrilog_shared::DailyRecordPayload,
    ) -> ClientResult<()> {
        let id = self
            .state
            .active_user_id()
            .ok_or(StateError::NoActiveUser)?;

        self.api.submit_daily_record(id, payload).await?;
        info!(user_id = %id, %date, "Record submitted");
        self.banner.success("Submitted, analysing...");

        self.fetch_summary(date).await;
        self.load_filled_dates().await;
        Ok(())
    }

    /// Load the summary for a date. On failure the previous summary stays.
    pub async fn fetch_summary(&mut self, date: NaiveDate) {
        let Some(id) = self.state.active_user_id() else {
            return;
        };

        self.state.loading.summary = true;
        let result = self.api.get_daily_summary(id, date).await;
        self.state.loading.summary = false;

        match result {
            Ok(summary) => self.state.apply_summary(&summary),
            Err(err) => {
                error!(user_id = %id, %date, error = %err, "Failed to load summary");
                self.banner
                    .error(format!("Analysis failed: {}", err.user_message()));
            }
        }
    }

    /// Every stored record of the active user, oldest first
    pub async fn list_records(&mut self) -> Vec<DailyRecord> {
        let Some(id) = self.state.active_user_id() else {
            self.banner.error(StateError::NoActiveUser.to_string());
            return Vec::new();
        };

        match self.api.list_daily_records(id).await {
            Ok(mut records) => {
                records.sort_by_key(|r| r.record_date);
                records
            }
            Err(err) => {
                error!(user_id = %id, error = %err, "Failed to load records");
                self.banner
                    .error(format!("Load failed: {}", err.user_message()));
                Vec::new()
            }
        }
    }
}
