//! Credential check and the login activity log
//!
//! Every attempt, successful or not, is appended to a plain-text file that is
//! kept read-only between writes.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::{Result, SchedulerError};
use crate::format;
use crate::i18n::Locale;
use crate::model::User;
use crate::service::UserService;

pub const DEFAULT_ACTIVITY_LOG: &str = "login_activity.txt";

/// Look up `username` and compare passwords. Error messages are in `locale`.
pub fn authenticate<'a>(
    users: &'a UserService,
    username: &str,
    password: &str,
    locale: Locale,
) -> Result<&'a User> {
    let messages = locale.messages();
    let user = users
        .by_username(username)
        .ok_or_else(|| SchedulerError::UserNotFound {
            message: messages.user_not_found.to_string(),
        })?;

    if user.password != password {
        return Err(SchedulerError::PasswordIncorrect {
            message: messages.password_incorrect.to_string(),
        });
    }
    Ok(user)
}

/// Append-only record of login attempts
#[derive(Debug, Clone)]
pub struct LoginActivityLog {
    path: PathBuf,
}

impl LoginActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line for one attempt; `failure_cause` is `None` on success.
    pub fn line(username: &str, failure_cause: Option<&str>, at: &DateTime<Tz>) -> String {
        let outcome = match failure_cause {
            None => "Success".to_string(),
            Some(cause) => format!("Failed | Cause: {}", cause),
        };
        format!(
            "User: {} | {} | {}",
            username,
            format::attempt_display(at),
            outcome
        )
    }

    /// Append one attempt, unlocking the file first and locking it again after.
    pub fn record(&self, username: &str, failure_cause: Option<&str>, at: &DateTime<Tz>) -> Result<()> {
        if self.path.exists() {
            set_writable(&self.path, true).map_err(|e| {
                tracing::error!(path = %self.path.display(), error = %e, "unlock failed");
                SchedulerError::FilePermission {
                    path: self.path.clone(),
                    reason: "writable",
                }
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", Self::line(username, failure_cause, at))?;
        drop(file);

        set_writable(&self.path, false).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "lock failed");
            SchedulerError::FilePermission {
                path: self.path.clone(),
                reason: "read-only",
            }
        })?;

        tracing::debug!(username, success = failure_cause.is_none(), "login attempt recorded");
        Ok(())
    }
}

impl Default for LoginActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_LOG)
    }
}

#[cfg(unix)]
fn set_writable(path: &Path, writable: bool) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    let mode = perms.mode();
    // owner write bit only when unlocking; all write bits off when locking
    perms.set_mode(if writable { mode | 0o200 } else { mode & !0o222 });
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_writable(path: &Path, writable: bool) -> std::io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(!writable);
    fs::set_permissions(path, perms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Audit;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn users() -> UserService {
        UserService::from_rows(vec![User {
            id: 1,
            username: "test".into(),
            password: "test".into(),
            audit: Audit::stamped(Utc::now()),
        }])
    }

    fn eastern(h: u32, m: u32) -> DateTime<Tz> {
        chrono_tz::America::New_York
            .with_ymd_and_hms(2024, 3, 4, h, m, 0)
            .unwrap()
    }

    #[test]
    fn good_credentials() {
        let users = users();
        let user = authenticate(&users, "test", "test", Locale::En).unwrap();
        assert_eq!(user.id, 1);
    }

    #[test]
    fn unknown_user_in_french() {
        let users = users();
        let err = authenticate(&users, "nobody", "test", Locale::Fr).unwrap_err();
        match err {
            SchedulerError::UserNotFound { message } => {
                assert_eq!(message, Locale::Fr.messages().user_not_found)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_password() {
        let users = users();
        let err = authenticate(&users, "test", "nope", Locale::En).unwrap_err();
        assert!(matches!(err, SchedulerError::PasswordIncorrect { .. }));
    }

    #[test]
    fn line_formats() {
        assert_eq!(
            LoginActivityLog::line("test", None, &eastern(9, 5)),
            "User: test | 03/04/2024 at 09:05 AM EST | Success"
        );
        assert_eq!(
            LoginActivityLog::line("bob", Some("User not found."), &eastern(13, 30)),
            "User: bob | 03/04/2024 at 01:30 PM EST | Failed | Cause: User not found."
        );
    }

    #[test]
    fn appends_across_attempts() {
        let dir = TempDir::new().unwrap();
        let log = LoginActivityLog::new(dir.path().join("login_activity.txt"));

        log.record("test", None, &eastern(9, 0)).unwrap();
        log.record("test", Some("Incorrect password."), &eastern(9, 1)).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("| Success"));
        assert!(lines[1].ends_with("| Failed | Cause: Incorrect password."));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_left_read_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let log = LoginActivityLog::new(dir.path().join("activity.txt"));
        log.record("test", None, &eastern(10, 0)).unwrap();

        let mode = fs::metadata(log.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o222, 0);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let log = LoginActivityLog::new(dir.path().join("nope").join("activity.txt"));

        let err = log.record("test", None, &eastern(10, 0)).unwrap_err();
        assert!(matches!(err, SchedulerError::Io { .. }));
    }
}
