//! `scheduler login` - sign in and show the upcoming-appointment alert

use anyhow::Result;
use chrono::Utc;
use scheduler_core::format::to_display;
use serde_json::json;

use crate::output;
use crate::session::Session;

pub fn run_login(session: &Session) -> Result<()> {
    let now = session.now();
    let upcoming = session
        .services
        .appointments
        .starting_within(session.upcoming_minutes, Utc::now());

    let value = json!({
        "user": session.user.username,
        "zone": session.zone.name(),
        "upcoming": upcoming,
    });

    output::emit(session.json, &value, || {
        println!("Signed in as {} ({})", session.user.username, session.zone);
        if upcoming.is_empty() {
            println!(
                "No upcoming appointments in the next {} minutes.",
                session.upcoming_minutes
            );
            return;
        }
        for appointment in &upcoming {
            println!(
                "Upcoming appointment: ID {} \"{}\" {}",
                appointment.id(),
                appointment.record.title,
                to_display(&appointment.local_start, &now)
            );
        }
    })
}
