//! The place list screen's state: the list itself, the add form and user notices.

mod form;
mod notice;
mod view_model;

pub use form::{AddPlaceForm, FormId};
pub use notice::{Notice, NoticeLevel};
pub use view_model::{AddPolicy, ListState, Outcome, PlaceListViewModel};
