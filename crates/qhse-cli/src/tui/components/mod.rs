use ratatui::{layout::Rect, Frame};

use super::app::AppState;

pub(crate) trait Component {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState);
}

pub(crate) mod confirm;
pub(crate) mod detail;
pub(crate) mod form;
pub(crate) mod list_screen;
pub(crate) mod stats;
pub(crate) mod status_bar;

pub(crate) use confirm::ConfirmComponent;
pub(crate) use detail::DetailComponent;
pub(crate) use form::FormComponent;
pub(crate) use list_screen::ListScreenComponent;
pub(crate) use stats::StatsComponent;
pub(crate) use status_bar::StatusBarComponent;
