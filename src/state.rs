use serde::{Serialize, Serializer};

use crate::data::model::ColumnKind;
use crate::data::schema::Schema;

// ---------------------------------------------------------------------------
// Tabs and controls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabId {
    Kpi,
    Numeric,
    Categorical,
    Imbalance,
    Correlation,
    Bivariate,
}

impl TabId {
    pub const ALL: [TabId; 6] = [
        TabId::Kpi,
        TabId::Numeric,
        TabId::Categorical,
        TabId::Imbalance,
        TabId::Correlation,
        TabId::Bivariate,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TabId::Kpi => "tab-kpi",
            TabId::Numeric => "tab-uni",
            TabId::Categorical => "tab-cat",
            TabId::Imbalance => "tab-desb",
            TabId::Correlation => "tab-corr",
            TabId::Bivariate => "tab-biv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TabId::Kpi => "KPIs Globales",
            TabId::Numeric => "Univariado Numérico",
            TabId::Categorical => "Univariado Categórico",
            TabId::Imbalance => "Desbalance",
            TabId::Correlation => "Correlación",
            TabId::Bivariate => "EDA Bivariado",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == id)
    }

    /// Dropdowns shown on this tab.
    pub fn controls(self) -> &'static [Control] {
        match self {
            TabId::Numeric => &[Control::UniNumeric],
            TabId::Categorical => &[Control::UniCategorical],
            TabId::Bivariate => &[Control::BivNumeric, Control::BivCategorical],
            TabId::Kpi | TabId::Imbalance | TabId::Correlation => &[],
        }
    }
}

impl Serialize for TabId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// A dropdown whose value is a column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    UniNumeric,
    UniCategorical,
    BivNumeric,
    BivCategorical,
}

impl Control {
    pub fn id(self) -> &'static str {
        match self {
            Control::UniNumeric => "uni-num",
            Control::UniCategorical => "uni-cat",
            Control::BivNumeric => "biv-num",
            Control::BivCategorical => "biv-cat",
        }
    }

    /// The feature list this control draws its options from.
    pub fn kind(self) -> ColumnKind {
        match self {
            Control::UniNumeric | Control::BivNumeric => ColumnKind::Numeric,
            Control::UniCategorical | Control::BivCategorical => ColumnKind::Categorical,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Current column of every dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelections {
    pub uni_numeric: String,
    pub uni_categorical: String,
    pub biv_numeric: String,
    pub biv_categorical: String,
}

impl FieldSelections {
    /// First entry of each feature list.
    pub fn defaults(schema: &Schema) -> Self {
        let numeric = schema.default_feature(ColumnKind::Numeric);
        let categorical = schema.default_feature(ColumnKind::Categorical);
        Self {
            uni_numeric: numeric.clone(),
            uni_categorical: categorical.clone(),
            biv_numeric: numeric,
            biv_categorical: categorical,
        }
    }

    pub fn get(&self, control: Control) -> &str {
        match control {
            Control::UniNumeric => &self.uni_numeric,
            Control::UniCategorical => &self.uni_categorical,
            Control::BivNumeric => &self.biv_numeric,
            Control::BivCategorical => &self.biv_categorical,
        }
    }

    fn slot(&mut self, control: Control) -> &mut String {
        match control {
            Control::UniNumeric => &mut self.uni_numeric,
            Control::UniCategorical => &mut self.uni_categorical,
            Control::BivNumeric => &mut self.biv_numeric,
            Control::BivCategorical => &mut self.biv_categorical,
        }
    }
}

/// The whole UI state: selected tab plus dropdown values.
///
/// Owned by the hosting layer and passed by reference into the pure
/// renderer; nothing else in the crate keeps UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub tab: TabId,
    pub fields: FieldSelections,
}

impl DashboardState {
    /// First tab, first entry of each feature list.
    pub fn initial(schema: &Schema) -> Self {
        Self {
            tab: TabId::ALL[0],
            fields: FieldSelections::defaults(schema),
        }
    }

    /// Switch tabs. The new tab's dropdowns start from their defaults.
    /// Returns whether anything changed.
    pub fn select_tab(&mut self, tab: TabId, schema: &Schema) -> bool {
        if tab == self.tab {
            return false;
        }
        log::debug!("Tab {} -> {}", self.tab.id(), tab.id());
        let defaults = FieldSelections::defaults(schema);
        for &control in tab.controls() {
            *self.fields.slot(control) = defaults.get(control).to_string();
        }
        self.tab = tab;
        true
    }

    /// Change one dropdown. Returns whether the value changed.
    pub fn set_field(&mut self, control: Control, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = self.fields.slot(control);
        if *slot == value {
            return false;
        }
        log::debug!("Field {} = {value}", control.id());
        *slot = value;
        true
    }

    /// The tagged variant the renderer dispatches on.
    pub fn selection(&self) -> TabSelection {
        let f = &self.fields;
        match self.tab {
            TabId::Kpi => TabSelection::Kpi,
            TabId::Numeric => TabSelection::Numeric {
                column: f.uni_numeric.clone(),
            },
            TabId::Categorical => TabSelection::Categorical {
                column: f.uni_categorical.clone(),
            },
            TabId::Imbalance => TabSelection::Imbalance,
            TabId::Correlation => TabSelection::Correlation,
            TabId::Bivariate => TabSelection::Bivariate {
                numeric: f.biv_numeric.clone(),
                categorical: f.biv_categorical.clone(),
            },
        }
    }
}

/// A tab together with the field values its chart depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSelection {
    Kpi,
    Numeric { column: String },
    Categorical { column: String },
    Imbalance,
    Correlation,
    Bivariate { numeric: String, categorical: String },
}

impl TabSelection {
    pub fn tab(&self) -> TabId {
        match self {
            TabSelection::Kpi => TabId::Kpi,
            TabSelection::Numeric { .. } => TabId::Numeric,
            TabSelection::Categorical { .. } => TabId::Categorical,
            TabSelection::Imbalance => TabId::Imbalance,
            TabSelection::Correlation => TabId::Correlation,
            TabSelection::Bivariate { .. } => TabId::Bivariate,
        }
    }
}
