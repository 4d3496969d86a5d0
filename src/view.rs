//! The page model: one pure `render(state) -> View` over the immutable
//! dataset. The egui layer only draws a `View` and reports user actions.

use std::sync::Arc;

use serde::Serialize;

use crate::charts::kpi::{kpi_cards, KpiCard};
use crate::charts::{bivariate, correlation, imbalance, univariate, Chart};
use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::data::schema::Schema;
use crate::error::{DashboardError, Result};
use crate::state::{Control, DashboardState, TabId, TabSelection};

pub const PAGE_TITLE: &str = "ANALISIS EXPLORATORIO - DIABETES";

// ---------------------------------------------------------------------------
// View tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub title: String,
    pub tabs: Vec<TabHeader>,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabHeader {
    pub tab: TabId,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Content {
    Kpis { heading: String, cards: Vec<KpiCard> },
    Panel(Panel),
    NotFound { tab_id: String },
}

/// A card with optional dropdowns above one chart region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub heading: String,
    pub controls: Vec<Dropdown>,
    pub output: ChartOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub control: Control,
    pub label: Option<String>,
    pub options: Vec<String>,
    pub selected: String,
}

/// What fills a chart region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartOutput {
    Chart(Chart),
    Error { message: String },
    InsufficientData { message: String },
}

impl From<Result<Chart>> for ChartOutput {
    fn from(result: Result<Chart>) -> Self {
        match result {
            Ok(chart) => ChartOutput::Chart(chart),
            Err(DashboardError::InsufficientData(message)) => {
                log::warn!("Insufficient data: {message}");
                ChartOutput::InsufficientData { message }
            }
            Err(err) => {
                log::warn!("Chart failed: {err}");
                ChartOutput::Error {
                    message: err.to_string(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard – dataset, schema and config bound together
// ---------------------------------------------------------------------------

pub struct Dashboard {
    dataset: Arc<Dataset>,
    schema: Schema,
    config: DashboardConfig,
}

impl Dashboard {
    /// Validate the declared columns and derive the feature lists.
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Result<Self> {
        Schema::validate(&dataset, &config.required_columns())?;
        let schema = Schema::inspect(&dataset, &config.target)?;
        Ok(Self::from_parts(dataset, schema, config))
    }

    pub fn from_parts(dataset: Arc<Dataset>, schema: Schema, config: DashboardConfig) -> Self {
        Dashboard {
            dataset,
            schema,
            config,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn initial_state(&self) -> DashboardState {
        DashboardState::initial(&self.schema)
    }

    /// Build the full page for a state.
    pub fn render(&self, state: &DashboardState) -> View {
        View {
            title: PAGE_TITLE.to_string(),
            tabs: tab_headers(Some(state.tab)),
            content: self.route(&state.selection()),
        }
    }

    /// Build the page for a raw tab identifier, keeping the stored field
    /// values. Unknown identifiers render the not-found state.
    pub fn render_tab_id(&self, tab_id: &str, state: &DashboardState) -> View {
        match TabId::parse(tab_id) {
            Some(tab) => self.render(&DashboardState {
                tab,
                fields: state.fields.clone(),
            }),
            None => {
                log::warn!("Unknown tab '{tab_id}'");
                View {
                    title: PAGE_TITLE.to_string(),
                    tabs: tab_headers(None),
                    content: Content::NotFound {
                        tab_id: tab_id.to_string(),
                    },
                }
            }
        }
    }

    /// Tab router: content block for one selection.
    pub fn route(&self, selection: &TabSelection) -> Content {
        let ds = self.dataset.as_ref();
        let schema = &self.schema;
        match selection {
            TabSelection::Kpi => match kpi_cards(ds, &self.config) {
                Ok(cards) => Content::Kpis {
                    heading: "Indicadores Globales".to_string(),
                    cards,
                },
                Err(err) => panel("Indicadores Globales", Vec::new(), Err(err)),
            },
            TabSelection::Numeric { column } => panel(
                "Distribución Numérica",
                vec![self.dropdown(Control::UniNumeric, None, column)],
                univariate::numeric_histogram(ds, schema, column),
            ),
            TabSelection::Categorical { column } => panel(
                "Distribución Categórica",
                vec![self.dropdown(Control::UniCategorical, None, column)],
                univariate::categorical_bars(ds, schema, column),
            ),
            TabSelection::Imbalance => panel(
                "Desbalance de Clases",
                Vec::new(),
                imbalance::class_imbalance(ds, schema),
            ),
            TabSelection::Correlation => panel(
                "Matriz de Correlación",
                Vec::new(),
                correlation::correlation_heatmap(ds, schema),
            ),
            TabSelection::Bivariate {
                numeric,
                categorical,
            } => panel(
                "EDA Bivariado",
                vec![
                    self.dropdown(Control::BivNumeric, Some("Variable Numérica"), numeric),
                    self.dropdown(
                        Control::BivCategorical,
                        Some("Variable Categórica"),
                        categorical,
                    ),
                ],
                bivariate::box_plot(ds, schema, numeric, categorical),
            ),
        }
    }

    fn dropdown(&self, control: Control, label: Option<&str>, selected: &str) -> Dropdown {
        Dropdown {
            control,
            label: label.map(str::to_string),
            options: self.schema.features(control.kind()).to_vec(),
            selected: selected.to_string(),
        }
    }
}

fn tab_headers(selected: Option<TabId>) -> Vec<TabHeader> {
    TabId::ALL
        .into_iter()
        .map(|tab| TabHeader {
            tab,
            label: tab.label(),
            selected: Some(tab) == selected,
        })
        .collect()
}

fn panel(heading: &str, controls: Vec<Dropdown>, chart: Result<Chart>) -> Content {
    Content::Panel(Panel {
        heading: heading.to_string(),
        controls,
        output: chart.into(),
    })
}
