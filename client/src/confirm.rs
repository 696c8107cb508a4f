//! Overwrite confirmation
//!
//! Resubmitting a date that already has a record needs the user's explicit
//! agreement. The orchestrator asks through this trait so the terminal
//! front-end can prompt while tests answer with a fixed value.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

/// Asks whether an existing record may be overwritten
#[async_trait]
pub trait OverwriteConfirm: Send + Sync {
    async fn confirm_overwrite(&self, date: NaiveDate) -> bool;
}

/// Always agrees
pub struct AlwaysConfirm;

#[async_trait]
impl OverwriteConfirm for AlwaysConfirm {
    async fn confirm_overwrite(&self, _date: NaiveDate) -> bool {
        true
    }
}

/// Always declines
pub struct NeverConfirm;

#[async_trait]
impl OverwriteConfirm for NeverConfirm {
    async fn confirm_overwrite(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Prompts on stdout and reads a yes/no answer from stdin
pub struct PromptConfirm;

#[async_trait]
impl OverwriteConfirm for PromptConfirm {
    async fn confirm_overwrite(&self, date: NaiveDate) -> bool {
        let question = format!(
            "A record for {} already exists. Overwrite it? [y/N] ",
            date.format("%Y-%m-%d")
        );
        tokio::task::spawn_blocking(move || {
            let mut stdout = io::stdout();
            let _ = write!(stdout, "{}", question);
            let _ = stdout.flush();

            let mut answer = String::new();
            match io::stdin().lock().read_line(&mut answer) {
                Ok(_) => is_yes(&answer),
                Err(_) => false,
            }
        })
        .await
        .unwrap_or(false)
    }
}

/// Accepts `y` / `yes` in any case; anything else declines
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES", true)]
    #[case(" yes ", true)]
    #[case("n", false)]
    #[case("", false)]
    #[case("yep", false)]
    fn test_is_yes(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_yes(answer), expected);
    }

    #[tokio::test]
    async fn test_fixed_answers() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        assert!(AlwaysConfirm.confirm_overwrite(date).await);
        assert!(!NeverConfirm.confirm_overwrite(date).await);
    }
}
