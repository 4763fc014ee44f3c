use serde::Serialize;

use crate::session::SessionIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
	Greeting,
	Login,
	Places,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
	/// The greeting's start button.
	Start,
	SignedIn,
	SignedOut,
}

/// Where the app opens: straight into the place list when someone is already signed in.
pub fn initial_screen(identity: Option<&SessionIdentity>) -> Screen {
	match identity {
		Some(_) => Screen::Places,
		None => Screen::Greeting,
	}
}

impl Screen {
	/// Events that make no sense on the current screen leave it unchanged.
	#[must_use]
	pub fn on(self, event: NavEvent) -> Self {
		match (self, event) {
			(Self::Greeting, NavEvent::Start) => Self::Login,
			(Self::Login, NavEvent::SignedIn) => Self::Places,
			(Self::Places, NavEvent::SignedOut) => Self::Greeting,
			(screen, _) => screen,
		}
	}
}
