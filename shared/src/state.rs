//! Client state and its transitions
//!
//! `ClientState` is the whole UI state of the nutrition client held as a
//! plain owned value. Every change goes through one of the transition
//! methods below; none of them perform I/O. Callers that talk to the API
//! apply the results they receive through the same methods, which keeps the
//! state rules testable without a server.
//!
//! # States
//!
//! - **NoUser**: `active_user_id` is `None`. Date-scoped fields are empty.
//! - **UserActive**: a profile has been loaded. Within it the record form is
//!   either for an empty date or for a date in `filled_dates`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::StateError;
use crate::models::{DailyRecord, DailySummary, UserId, UserProfile};
use crate::types::{CalendarMarker, ProfileForm, RecordForm, SummaryView};
use crate::validation::parse_record_date;

/// Which request sequences are currently running
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoadingFlags {
    pub user: bool,
    pub record: bool,
    pub summary: bool,
}


/// Outcome of picking a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePick {
    /// The date already has a record; load it and its summary
    Filled(NaiveDate),
    /// The date has no record; the form was reset locally
    Empty(NaiveDate),
}

/// What submitting the current record form requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPlan {
    /// Nothing recorded for the date yet
    Ready(NaiveDate),
    /// A record exists for the date; the user must agree to overwrite it
    NeedsConfirmation(NaiveDate),
}

impl SubmissionPlan {
    pub fn date(&self) -> NaiveDate {
        match self {
            SubmissionPlan::Ready(date) | SubmissionPlan::NeedsConfirmation(date) => *date,
        }
    }
}

/// Complete client-side state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientState {
    /// Known profiles for the user picker
    pub users: Vec<UserProfile>,
    /// Picker selection; may run ahead of `active_user_id` while loading
    pub selected_user_id: Option<UserId>,
    /// Profile referenced by every date-scoped request
    pub active_user_id: Option<UserId>,
    pub profile_form: ProfileForm,
    pub record_form: RecordForm,
    pub summary: SummaryView,
    /// Dates with a stored record for the active user
    pub filled_dates: BTreeSet<NaiveDate>,
    pub calendar_markers: Vec<CalendarMarker>,
    pub loading: LoadingFlags,
    pub show_profile_form: bool,
}

impl ClientState {
    /// Initial state with the record form set to `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            users: Vec::new(),
            selected_user_id: None,
            active_user_id: None,
            profile_form: ProfileForm::default(),
            record_form: RecordForm::empty(today),
            summary: SummaryView::default(),
            filled_dates: BTreeSet::new(),
            calendar_markers: Vec::new(),
            loading: LoadingFlags::default(),
            show_profile_form: true,
        }
    }

    pub fn active_user_id(&self) -> Option<UserId> {
        self.active_user_id
    }

    pub fn is_filled(&self, date: NaiveDate) -> bool {
        self.filled_dates.contains(&date)
    }

    /// Profile currently loaded, if it is in the user list
    pub fn active_profile(&self) -> Option<&UserProfile> {
        let id = self.active_user_id?;
        self.users.iter().find(|u| u.id == id)
    }

    // ========================================================================
    // User Transitions
    // ========================================================================

    /// Move to NoUser: forget the active user and everything scoped to it
    pub fn clear_active_user(&mut self) {
        self.active_user_id = None;
        self.selected_user_id = None;
        self.profile_form = ProfileForm::default();
        self.clear_date_scoped();
    }

    /// Start switching to `id`. The user is not active until its profile
    /// has loaded, and data of a previous user is dropped straight away.
    pub fn begin_user_switch(&mut self, id: UserId) {
        self.selected_user_id = Some(id);
        if self.active_user_id != Some(id) {
            self.active_user_id = None;
            self.clear_date_scoped();
        }
    }

    /// Profile load succeeded: `profile` becomes the active user
    pub fn activate_user(&mut self, profile: &UserProfile) {
        self.active_user_id = Some(profile.id);
        self.selected_user_id = Some(profile.id);
        self.apply_profile(profile);
    }

    /// Replace the picker list
    pub fn set_users(&mut self, users: Vec<UserProfile>) {
        self.users = users;
    }

    /// Refresh the profile form from the server representation
    pub fn apply_profile(&mut self, profile: &UserProfile) {
        self.profile_form.fill_from(profile);
        if let Some(existing) = self.users.iter_mut().find(|u| u.id == profile.id) {
            *existing = profile.clone();
        }
    }

    pub fn toggle_profile_form(&mut self) {
        self.show_profile_form = !self.show_profile_form;
    }

    // ========================================================================
    // Date Transitions
    // ========================================================================

    /// Replace the filled-dates index and recompute the calendar markers
    pub fn set_filled_dates<I>(&mut self, dates: I)
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.filled_dates = dates.into_iter().collect();
        self.calendar_markers = vec![CalendarMarker::filled(
            self.filled_dates.iter().copied().collect(),
        )];
    }

    /// Select a calendar date. The form is always reset for the new date;
    /// an empty date also clears the summary, a filled date is left for the
    /// caller to load.
    pub fn pick_date(&mut self, date: NaiveDate) -> DatePick {
        self.reset_record_form(date);
        if self.is_filled(date) {
            DatePick::Filled(date)
        } else {
            self.clear_summary();
            DatePick::Empty(date)
        }
    }

    /// Parse an ISO date string and pick it
    pub fn pick_date_str(&mut self, date: &str) -> Result<DatePick, StateError> {
        let parsed =
            parse_record_date(date).map_err(|_| StateError::InvalidDate(date.to_string()))?;
        Ok(self.pick_date(parsed))
    }

    /// Empty record form for `date`
    pub fn reset_record_form(&mut self, date: NaiveDate) {
        self.record_form = RecordForm::empty(date);
    }

    /// Load a stored record into the form
    pub fn apply_record(&mut self, record: &DailyRecord) {
        self.record_form = RecordForm::from(record);
    }

    /// Replace all summary fields at once
    pub fn apply_summary(&mut self, summary: &DailySummary) {
        self.summary = SummaryView::from(summary);
    }

    pub fn clear_summary(&mut self) {
        self.summary = SummaryView::default();
    }

    /// Decide what submitting the record form needs
    pub fn plan_submission(&self) -> Result<SubmissionPlan, StateError> {
        if self.active_user_id.is_none() {
            return Err(StateError::NoActiveUser);
        }
        let date = self.record_form.record_date;
        if self.is_filled(date) {
            Ok(SubmissionPlan::NeedsConfirmation(date))
        } else {
            Ok(SubmissionPlan::Ready(date))
        }
    }

    fn clear_date_scoped(&mut self) {
        self.clear_summary();
        self.filled_dates.clear();
        self.calendar_markers.clear();
        let date = self.record_form.record_date;
        self.reset_record_form(date);
    }
}
