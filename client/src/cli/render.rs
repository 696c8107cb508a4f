//! Plain-text views of the client state

use std::fmt::Write;

use nutrilog_shared::{BannerKind, BannerMessage, ClientState, DailyRecord};

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn kcal(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0} kcal", v))
        .unwrap_or_else(|| "-".to_string())
}

pub fn banner(message: &BannerMessage) -> String {
    match message.kind {
        BannerKind::Success => format!("[ok] {}\n", message.text),
        BannerKind::Error => format!("[error] {}\n", message.text),
    }
}

pub fn users(state: &ClientState) -> String {
    if state.users.is_empty() {
        return "No users yet. Fill in the profile and run `profile save`.".to_string();
    }

    let mut out = String::new();
    for user in &state.users {
        let marker = if Some(user.id) == state.active_user_id() {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, "{} {}", marker, user.display_name());
    }
    out.trim_end().to_string()
}

pub fn profile(state: &ClientState) -> String {
    if !state.show_profile_form {
        return "Profile form hidden (`profile toggle` to show)".to_string();
    }

    let form = &state.profile_form;
    let heading = match (state.active_profile(), state.active_user_id()) {
        (Some(profile), _) => format!("Profile {}", profile.display_name()),
        (None, Some(id)) => format!("Profile #{}", id),
        (None, None) => "New profile".to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "  nickname: {}", or_dash(form.nickname.as_deref()));
    let _ = writeln!(out, "  height:   {} cm", or_dash(form.height_cm));
    let _ = writeln!(out, "  weight:   {} kg", or_dash(form.weight_kg));
    let _ = writeln!(out, "  age:      {}", or_dash(form.age));
    let _ = writeln!(out, "  gender:   {}", form.gender);
    let _ = write!(out, "  goal:     {}", form.goal);
    out
}

pub fn record(state: &ClientState) -> String {
    let form = &state.record_form;
    let status = if state.is_filled(form.record_date) {
        "recorded"
    } else {
        "empty"
    };

    let mut out = String::new();
    let _ = writeln!(out, "Record for {} ({})", form.record_date, status);
    let _ = writeln!(out, "  calories: {}", or_dash(form.calories_consumed));
    let _ = writeln!(out, "  protein:  {} g", or_dash(form.protein_g));
    let _ = writeln!(out, "  fat:      {} g", or_dash(form.fat_g));
    let _ = writeln!(out, "  carbs:    {} g", or_dash(form.carbs_g));
    let _ = write!(out, "  exercise: {} kcal", form.calories_burned_exercise);
    out
}

pub fn summary(state: &ClientState) -> String {
    let summary = &state.summary;
    if summary.is_empty() {
        return "No summary for this date".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  BMR:         {}", kcal(summary.bmr));
    let _ = writeln!(out, "  recommended: {}", kcal(summary.recommended_daily_calories));
    let _ = write!(out, "  balance:     {}", kcal(summary.calorie_balance));
    if let Some(ref feedback) = summary.llm_feedback {
        let _ = write!(out, "\n\n{}", feedback);
    }
    out
}

pub fn calendar(state: &ClientState) -> String {
    if state.filled_dates.is_empty() {
        return "No recorded dates".to_string();
    }
    let dates: Vec<String> = state.filled_dates.iter().map(|d| d.to_string()).collect();
    format!("Recorded dates: {}", dates.join(", "))
}

/// Record form, summary and calendar together
pub fn day(state: &ClientState) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        record(state),
        summary(state),
        calendar(state)
    )
}

pub fn overview(state: &ClientState) -> String {
    let mut sections = vec![profile(state)];
    if state.active_user_id().is_some() {
        sections.push(day(state));
    }
    sections.join("\n\n")
}

pub fn history(records: &[DailyRecord]) -> String {
    if records.is_empty() {
        return "No records".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>8} {:>8} {:>8} {:>8} {:>9}",
        "date", "kcal", "protein", "fat", "carbs", "exercise"
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:<12} {:>8} {:>8.1} {:>8.1} {:>8.1} {:>9}",
            r.record_date.to_string(),
            r.calories_consumed,
            r.protein_g,
            r.fat_g,
            r.carbs_g,
            r.calories_burned_exercise.unwrap_or(0)
        );
    }
    out.trim_end().to_string()
}
