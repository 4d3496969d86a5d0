/// egui rendering of a [`View`](crate::view::View).
///
/// Drawing never mutates dashboard state; widgets report what the user did
/// as a [`UiAction`] and the app applies it after the frame is laid out.
pub mod panels;
pub mod plot;

use crate::state::{Control, TabId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SelectTab(TabId),
    SetField(Control, String),
}
