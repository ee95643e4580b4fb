//! Navigation shell: the current page plus an optional selected record.
//!
//! Mirrors the client's routing rules: signed-out users only reach the
//! auth pages, and the record-detail page needs a selected record or it
//! falls back to the dashboard.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The named views of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Login,
    Signup,
    ForgotPassword,
    Dashboard,
    Upload,
    Records,
    RecordDetail,
    Timeline,
    Reminders,
    AiAnalysis,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::ForgotPassword => "forgot-password",
            Self::Dashboard => "dashboard",
            Self::Upload => "upload",
            Self::Records => "records",
            Self::RecordDetail => "record-detail",
            Self::Timeline => "timeline",
            Self::Reminders => "reminders",
            Self::AiAnalysis => "ai-analysis",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "login" => Some(Self::Login),
            "signup" => Some(Self::Signup),
            "forgot-password" => Some(Self::ForgotPassword),
            "dashboard" => Some(Self::Dashboard),
            "upload" => Some(Self::Upload),
            "records" => Some(Self::Records),
            "record-detail" => Some(Self::RecordDetail),
            "timeline" => Some(Self::Timeline),
            "reminders" => Some(Self::Reminders),
            "ai-analysis" => Some(Self::AiAnalysis),
            _ => None,
        }
    }

    /// Pages reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Signup | Self::ForgotPassword)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single currently-active-page variable plus the selected record.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Page,
    selected_record: Option<Uuid>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            current: Page::Login,
            selected_record: None,
        }
    }

    /// Route a transition request. A record id, when given, becomes the
    /// selected record; otherwise the previous selection is kept.
    pub fn navigate(&mut self, page: Page, record_id: Option<Uuid>) {
        self.current = page;
        if let Some(id) = record_id {
            self.selected_record = Some(id);
        }
    }

    pub fn selected_record(&self) -> Option<Uuid> {
        self.selected_record
    }

    /// The page actually rendered for the current state: signed-out
    /// sessions land on the auth pages, and record-detail without a
    /// selection falls back to the dashboard.
    pub fn resolved(&self, signed_in: bool) -> Page {
        if !signed_in {
            return if self.current.is_public() {
                self.current
            } else {
                Page::Login
            };
        }
        match self.current {
            Page::RecordDetail if self.selected_record.is_none() => Page::Dashboard,
            page => page,
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_names_round_trip() {
        for page in [
            Page::Login,
            Page::Signup,
            Page::ForgotPassword,
            Page::Dashboard,
            Page::Upload,
            Page::Records,
            Page::RecordDetail,
            Page::Timeline,
            Page::Reminders,
            Page::AiAnalysis,
        ] {
            assert_eq!(Page::from_str(page.as_str()), Some(page));
        }
        assert_eq!(Page::from_str("settings"), None);
    }

    #[test]
    fn starts_on_login() {
        let nav = Navigator::new();
        assert_eq!(nav.resolved(false), Page::Login);
    }

    #[test]
    fn signed_out_users_only_reach_auth_pages() {
        let mut nav = Navigator::new();
        nav.navigate(Page::Dashboard, None);
        assert_eq!(nav.resolved(false), Page::Login);

        nav.navigate(Page::ForgotPassword, None);
        assert_eq!(nav.resolved(false), Page::ForgotPassword);

        nav.navigate(Page::Signup, None);
        assert_eq!(nav.resolved(false), Page::Signup);
    }

    #[test]
    fn record_detail_requires_a_selection() {
        let mut nav = Navigator::new();
        nav.navigate(Page::RecordDetail, None);
        assert_eq!(nav.resolved(true), Page::Dashboard);

        let id = Uuid::new_v4();
        nav.navigate(Page::RecordDetail, Some(id));
        assert_eq!(nav.resolved(true), Page::RecordDetail);
        assert_eq!(nav.selected_record(), Some(id));
    }

    #[test]
    fn selection_is_kept_across_pages() {
        let mut nav = Navigator::new();
        let id = Uuid::new_v4();
        nav.navigate(Page::RecordDetail, Some(id));
        nav.navigate(Page::Timeline, None);
        nav.navigate(Page::RecordDetail, None);
        // The earlier selection still applies.
        assert_eq!(nav.resolved(true), Page::RecordDetail);
        assert_eq!(nav.selected_record(), Some(id));
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Page::AiAnalysis).unwrap();
        assert_eq!(json, "\"ai-analysis\"");
        let parsed: Page = serde_json::from_str("\"forgot-password\"").unwrap();
        assert_eq!(parsed, Page::ForgotPassword);
    }
}
