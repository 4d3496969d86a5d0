use eframe::egui;

use crate::config::RunMode;
use crate::state::DashboardState;
use crate::ui::{panels, UiAction};
use crate::view::{Dashboard, View};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DiabetesDashboardApp {
    dashboard: Dashboard,
    state: DashboardState,
    /// Last rendered view; rebuilt only when `state` changes.
    view: View,
    mode: RunMode,
}

impl DiabetesDashboardApp {
    pub fn new(dashboard: Dashboard, mode: RunMode) -> Self {
        let state = dashboard.initial_state();
        let view = dashboard.render(&state);
        Self {
            dashboard,
            state,
            view,
            mode,
        }
    }

    fn apply(&mut self, action: UiAction) {
        let changed = match action {
            UiAction::SelectTab(tab) => self.state.select_tab(tab, self.dashboard.schema()),
            UiAction::SetField(control, value) => self.state.set_field(control, value),
        };
        if changed {
            self.view = self.dashboard.render(&self.state);
            if self.mode == RunMode::Debug {
                let selection = self.state.selection();
                log::debug!("Rendered {} {:?}", selection.tab().id(), selection);
            }
        }
    }
}

impl eframe::App for DiabetesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions: Vec<UiAction> = Vec::new();

        // ---- Top panel: title + tabs ----
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            actions.extend(panels::header(ui, &self.view));
        });

        // ---- Bottom panel: status (debug only) ----
        if self.mode == RunMode::Debug {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                panels::status_bar(ui, &self.dashboard, &self.state);
            });
        }

        // ---- Central panel: tab content ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    actions.extend(panels::content(ui, &self.view));
                });
        });

        for action in actions {
            self.apply(action);
        }
    }
}
