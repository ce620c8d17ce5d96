//! Settings (`/settings`): dashboard preferences.
//!
//! The form is echoed back on save and nothing else happens: values are not
//! persisted and the API client keeps using the configured base URL.

/// Accepted range of the auto-refresh interval, in seconds.
pub const REFRESH_INTERVAL_RANGE: (u32, u32) = (10, 3600);

pub const THEMES: [(&str, &str); 3] = [
    ("light", "Light"),
    ("dark", "Dark"),
    ("system", "System Default"),
];

pub const SAVED_MESSAGE: &str = "Settings saved successfully!";

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    pub api_url: String,
    pub auto_refresh: bool,
    pub refresh_interval: u32,
    pub notifications: bool,
    pub theme: String,
    /// Set after a save so the view can confirm it.
    pub saved: bool,
}

impl SettingsForm {
    /// Fresh form showing the given API base URL.
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            auto_refresh: false,
            refresh_interval: 60,
            notifications: true,
            theme: "light".to_string(),
            saved: false,
        }
    }

    /// Rebuild the form from a submission.
    ///
    /// Unchecked checkboxes are absent from a form post, so both toggles start
    /// off and only turn on when their field is present.
    pub fn from_fields<'a>(
        api_url: &str,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut form = Self {
            auto_refresh: false,
            notifications: false,
            ..Self::new(api_url)
        };
        for (name, value) in fields {
            match name {
                "api_url" => form.api_url = value.trim().to_string(),
                "auto_refresh" => form.auto_refresh = true,
                "notifications" => form.notifications = true,
                "refresh_interval" => {
                    if let Ok(secs) = value.trim().parse::<u32>() {
                        let (min, max) = REFRESH_INTERVAL_RANGE;
                        form.refresh_interval = secs.clamp(min, max);
                    }
                }
                "theme" if THEMES.iter().any(|(v, _)| *v == value) => {
                    form.theme = value.to_string();
                }
                _ => {}
            }
        }
        form.saved = true;
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_defaults() {
        let form = SettingsForm::new("http://localhost:5000/api");
        assert_eq!(form.refresh_interval, 60);
        assert!(form.notifications);
        assert!(!form.auto_refresh);
        assert!(!form.saved);
    }

    #[test]
    fn submission_echoes_values() {
        let form = SettingsForm::from_fields(
            "http://localhost:5000/api",
            [
                ("api_url", " http://models:9000/api "),
                ("auto_refresh", "on"),
                ("refresh_interval", "5"),
                ("theme", "dark"),
            ],
        );
        assert_eq!(form.api_url, "http://models:9000/api");
        assert!(form.auto_refresh);
        assert!(!form.notifications);
        assert_eq!(form.refresh_interval, 10);
        assert_eq!(form.theme, "dark");
        assert!(form.saved);
    }

    #[test]
    fn unknown_theme_is_ignored() {
        let form = SettingsForm::from_fields("u", [("theme", "neon")]);
        assert_eq!(form.theme, "light");
    }
}
