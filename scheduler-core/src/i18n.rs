//! Login screen strings in English and French

use serde::{Deserialize, Serialize};

/// Language for user-facing login messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Pick a locale from a POSIX tag such as `fr_CA.UTF-8`; anything not French is English.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("fr") {
            Locale::Fr
        } else {
            Locale::En
        }
    }

    /// Locale from `LC_ALL`, then `LANG`
    pub fn from_env() -> Self {
        std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .map(|tag| Self::from_tag(&tag))
            .unwrap_or_default()
    }

    pub fn messages(self) -> &'static LoginMessages {
        match self {
            Locale::En => &EN,
            Locale::Fr => &FR,
        }
    }
}

pub struct LoginMessages {
    pub greeting: &'static str,
    pub username: &'static str,
    pub password: &'static str,
    pub sign_in: &'static str,
    pub user_not_found: &'static str,
    pub password_incorrect: &'static str,
    pub zone: &'static str,
}

impl LoginMessages {
    /// Heading shown before the credential prompts
    pub fn banner(&self, zone: impl std::fmt::Display) -> String {
        format!("{}\n{}\n{}{}", self.sign_in, self.greeting, self.zone, zone)
    }
}

static EN: LoginMessages = LoginMessages {
    greeting: "Welcome! Please sign in.",
    username: "Username",
    password: "Password",
    sign_in: "Sign in",
    user_not_found: "User not found.",
    password_incorrect: "Incorrect password.",
    zone: "Time zone: ",
};

static FR: LoginMessages = LoginMessages {
    greeting: "Bienvenue ! Veuillez vous connecter.",
    username: "Nom d'utilisateur",
    password: "Mot de passe",
    sign_in: "Se connecter",
    user_not_found: "Utilisateur introuvable.",
    password_incorrect: "Mot de passe incorrect.",
    zone: "Fuseau horaire : ",
};
