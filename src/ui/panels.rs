use eframe::egui::{self, Color32, RichText, Ui};

use super::{plot, UiAction};
use crate::charts::kpi::KpiCard;
use crate::state::DashboardState;
use crate::view::{Content, Dashboard, Dropdown, Panel, View};

const ACCENT: Color32 = Color32::from_rgb(0x4F, 0x46, 0xE5);
const SUBTITLE: Color32 = Color32::from_rgb(0xE2, 0xEE, 0xFF);
const MUTED: Color32 = Color32::from_rgb(0x4B, 0x55, 0x63);
const CARD_FILL: Color32 = Color32::from_rgb(0x1D, 0x1C, 0x74);

// ---------------------------------------------------------------------------
// Header: title + tab bar
// ---------------------------------------------------------------------------

/// Render the page title and the tab bar.
pub fn header(ui: &mut Ui, view: &View) -> Option<UiAction> {
    let mut action = None;

    ui.add_space(8.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&view.title).size(36.0).strong().color(ACCENT));
    });
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for header in &view.tabs {
            let text = RichText::new(header.label).size(16.0).strong();
            if ui.selectable_label(header.selected, text).clicked() && !header.selected {
                action = Some(UiAction::SelectTab(header.tab));
            }
        }
    });
    ui.add_space(4.0);

    action
}

// ---------------------------------------------------------------------------
// Content region
// ---------------------------------------------------------------------------

/// Render the content block of the selected tab.
pub fn content(ui: &mut Ui, view: &View) -> Option<UiAction> {
    match &view.content {
        Content::Kpis { heading, cards } => {
            subtitle(ui, heading);
            kpi_grid(ui, cards);
            None
        }
        Content::Panel(panel) => chart_panel(ui, panel),
        Content::NotFound { tab_id } => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(
                    RichText::new(format!("Pestaña no encontrada: {tab_id}")).color(Color32::RED),
                );
            });
            None
        }
    }
}

fn subtitle(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(28.0).strong().color(SUBTITLE));
    ui.add_space(8.0);
}

fn kpi_grid(ui: &mut Ui, cards: &[KpiCard]) {
    for row in cards.chunks(3) {
        ui.columns(3, |columns: &mut [Ui]| {
            for (col, card) in columns.iter_mut().zip(row) {
                kpi_card(col, card);
            }
        });
        ui.add_space(12.0);
    }
}

fn kpi_card(ui: &mut Ui, card: &KpiCard) {
    egui::Frame::group(ui.style())
        .fill(Color32::WHITE)
        .inner_margin(16.0)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(&card.title)
                        .size(18.0)
                        .strong()
                        .color(Color32::BLACK),
                );
                ui.label(RichText::new(&card.value).size(34.0).strong().color(ACCENT));
                ui.label(RichText::new(&card.description).size(13.0).color(MUTED));
            });
        });
}

fn chart_panel(ui: &mut Ui, panel: &Panel) -> Option<UiAction> {
    let mut action = None;
    egui::Frame::group(ui.style())
        .fill(CARD_FILL)
        .inner_margin(20.0)
        .show(ui, |ui: &mut Ui| {
            subtitle(ui, &panel.heading);
            for control in &panel.controls {
                if let Some(a) = dropdown(ui, control) {
                    action = Some(a);
                }
                ui.add_space(10.0);
            }
            plot::chart_output(ui, &panel.output);
        });
    action
}

fn dropdown(ui: &mut Ui, dropdown: &Dropdown) -> Option<UiAction> {
    let mut action = None;
    if let Some(label) = &dropdown.label {
        ui.label(RichText::new(label).size(18.0).strong().color(SUBTITLE));
    }
    egui::ComboBox::from_id_salt(dropdown.control.id())
        .selected_text(&dropdown.selected)
        .width(280.0)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &dropdown.options {
                if ui
                    .selectable_label(dropdown.selected == *option, option)
                    .clicked()
                {
                    action = Some(UiAction::SetField(dropdown.control, option.clone()));
                }
            }
        });
    action
}

// ---------------------------------------------------------------------------
// Status bar (debug mode)
// ---------------------------------------------------------------------------

/// Row count and the raw selection, shown in debug mode only.
pub fn status_bar(ui: &mut Ui, dashboard: &Dashboard, state: &DashboardState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} rows · target '{}' · {} numeric · {} categorical",
            dashboard.dataset().len(),
            dashboard.config().target,
            dashboard.schema().numeric.len(),
            dashboard.schema().categorical.len()
        ));
        ui.separator();
        ui.label(RichText::new(format!("{:?}", state.selection())).monospace());
    });
}
