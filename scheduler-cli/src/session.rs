//! Authenticated session: loaded services plus the signed-in user

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use inquire::{Password, PasswordDisplayMode, Text};
use scheduler_core::model::User;
use scheduler_core::{authenticate, Locale, LoginActivityLog, SchedulerConfig, Services};
use scheduler_store::{connect, DbCredentials};
use tracing::info;

#[derive(Debug, Default)]
pub struct LoginArgs {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct Session {
    pub services: Services,
    pub user: User,
    pub zone: Tz,
    pub json: bool,
    pub upcoming_minutes: i64,
}

impl Session {
    /// Connect, load every cache, then sign in. Each attempt is written to
    /// the login activity log whether or not it succeeds.
    pub async fn open(settings: &SchedulerConfig, login: LoginArgs, json: bool) -> Result<Self> {
        let zone = settings.display_zone()?;

        let credentials = DbCredentials::from_env()
            .context("Database credentials missing; set MYSQL_SCHEDULER_DB_PORT/USERNAME/PASSWORD")?;
        let pool = connect(&credentials)
            .await
            .context("Failed to connect to client_schedule")?;
        let services = Services::load(scheduler_store::daos(&pool), zone)
            .await
            .context("Failed to load scheduling data")?;

        let locale = Locale::from_env();
        let (username, password) = credentials_from(login, locale, zone)?;

        let log = LoginActivityLog::new(&settings.login.activity_log);
        let attempted_at = Utc::now().with_timezone(&zone);

        let user = match authenticate(&services.users, &username, &password, locale) {
            Ok(user) => user.clone(),
            Err(e) => {
                log.record(&username, Some(&e.to_string()), &attempted_at)
                    .context("Failed to record login attempt")?;
                return Err(e.into());
            }
        };
        log.record(&username, None, &attempted_at)
            .context("Failed to record login attempt")?;
        info!(user = %user.username, zone = %zone, "signed in");

        Ok(Self {
            services,
            user,
            zone,
            json,
            upcoming_minutes: settings.alerts.upcoming_minutes,
        })
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.zone)
    }
}

fn credentials_from(login: LoginArgs, locale: Locale, zone: Tz) -> Result<(String, String)> {
    let messages = locale.messages();

    let username = match login.username {
        Some(name) => name,
        None => {
            eprintln!("{}", messages.banner(zone));
            Text::new(&format!("{}:", messages.username))
                .prompt()
                .context("Failed to get username")?
        }
    };

    let password = match login.password {
        Some(password) => password,
        None => Password::new(&format!("{}:", messages.password))
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()
            .context("Failed to get password")?,
    };

    Ok((username.trim().to_string(), password))
}
