use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;
use crate::model::{CalendarEvent, EventCategory, User};

use super::slice::{Slice, SliceAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub locale: Locale,
    pub theme: Theme,
    pub sidebar_open: bool,
}

impl UiState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            theme: Theme::default(),
            sidebar_open: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum UiAction {
    SetLocale(Locale),
    SetTheme(Theme),
    ToggleSidebar,
    SetSidebar(bool),
}

impl UiState {
    pub fn reduce(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::SetLocale(locale) => {
                let changed = self.locale != locale;
                self.locale = locale;
                changed
            }
            UiAction::SetTheme(theme) => {
                let changed = self.theme != theme;
                self.theme = theme;
                changed
            }
            UiAction::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
                true
            }
            UiAction::SetSidebar(open) => {
                let changed = self.sidebar_open != open;
                self.sidebar_open = open;
                changed
            }
        }
    }
}

/// Signed-in user and the login request flags.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AuthAction {
    Started,
    SignedIn(User),
    Failed(String),
    SignedOut,
}

impl AuthState {
    pub fn reduce(&mut self, action: AuthAction) -> bool {
        match action {
            AuthAction::Started => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::SignedIn(user) => {
                self.user = Some(user);
                self.loading = false;
                self.error = None;
            }
            AuthAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            AuthAction::SignedOut => {
                *self = AuthState::default();
            }
        }
        true
    }
}

/// Events plus the set of categories the user has switched off.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarState {
    pub events: Slice<CalendarEvent>,
    pub hidden: BTreeSet<EventCategory>,
}

#[derive(Debug, Clone)]
pub enum CalendarAction {
    Events(SliceAction<CalendarEvent>),
    ToggleCategory(EventCategory),
    ShowAll,
}

impl CalendarState {
    pub fn is_visible(&self, category: EventCategory) -> bool {
        !self.hidden.contains(&category)
    }

    pub fn reduce(&mut self, action: CalendarAction) -> bool {
        match action {
            CalendarAction::Events(a) => self.events.reduce(a),
            CalendarAction::ToggleCategory(category) => {
                if !self.hidden.remove(&category) {
                    self.hidden.insert(category);
                }
                true
            }
            CalendarAction::ShowAll => {
                let changed = !self.hidden.is_empty();
                self.hidden.clear();
                changed
            }
        }
    }
}
