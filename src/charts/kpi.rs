use serde::Serialize;

use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::data::stats::mean;
use crate::error::{DashboardError, Result};

/// One labelled scalar summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub description: String,
}

impl KpiCard {
    fn new(title: &str, value: String, description: &str) -> Self {
        KpiCard {
            title: title.to_string(),
            value,
            description: description.to_string(),
        }
    }
}

/// The six global indicators, in display order (two rows of three).
pub fn kpi_cards(dataset: &Dataset, config: &DashboardConfig) -> Result<Vec<KpiCard>> {
    let column_mean = |name: &str| -> Result<Option<f64>> {
        dataset
            .numeric(name)
            .map(mean)
            .ok_or_else(|| DashboardError::MissingColumn {
                column: name.to_string(),
            })
    };

    let diabetes_rate = column_mean(&config.target)?.map(|m| m * 100.0);
    let bmi = column_mean(&config.bmi_column)?;
    let physical = column_mean(&config.physical_column)?;
    let mental = column_mean(&config.mental_column)?;
    let sleep = column_mean(&config.sleep_column)?;

    Ok(vec![
        KpiCard::new(
            "Población Total",
            format_thousands(dataset.len()),
            "Total de personas encuestadas en el estudio.",
        ),
        KpiCard::new(
            "% Diabetes",
            diabetes_rate
                .map(|r| format!("{r:.2}%"))
                .unwrap_or_else(not_available),
            "Proporción de participantes con diagnóstico de diabetes.",
        ),
        KpiCard::new(
            "BMI Promedio",
            format_decimal(bmi, 2),
            "Promedio del índice de masa corporal.",
        ),
        KpiCard::new(
            "Salud Física",
            format_decimal(physical, 1),
            "Promedio de días con mala salud física en el último mes.",
        ),
        KpiCard::new(
            "Salud Mental",
            format_decimal(mental, 1),
            "Promedio de días con mala salud mental en el último mes.",
        ),
        KpiCard::new(
            "Horas de Sueño",
            format_decimal(sleep, 1),
            "Promedio de horas de sueño por noche.",
        ),
    ])
}

fn not_available() -> String {
    "n/a".to_string()
}

fn format_decimal(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_else(not_available)
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::survey;

    fn value_of<'a>(cards: &'a [KpiCard], title: &str) -> &'a str {
        &cards.iter().find(|c| c.title == title).unwrap().value
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(100), "100");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(253_680), "253,680");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn hundred_rows_twenty_positive() {
        let ds = survey(100, 20);
        let cards = kpi_cards(&ds, &DashboardConfig::default()).unwrap();
        assert_eq!(cards.len(), 6);
        assert_eq!(value_of(&cards, "Población Total"), "100");
        assert_eq!(value_of(&cards, "% Diabetes"), "20.00%");
    }

    #[test]
    fn rate_follows_the_target_distribution() {
        let config = DashboardConfig::default();
        let low = kpi_cards(&survey(200, 30), &config).unwrap();
        let high = kpi_cards(&survey(200, 130), &config).unwrap();
        assert_eq!(value_of(&low, "% Diabetes"), "15.00%");
        assert_eq!(value_of(&high, "% Diabetes"), "65.00%");
    }

    #[test]
    fn means_use_their_configured_precision() {
        // Rows 0..4: bmi 20..23, physical 0..3, mental 0..3, sleep 5..8.
        let cards = kpi_cards(&survey(4, 1), &DashboardConfig::default()).unwrap();
        assert_eq!(value_of(&cards, "BMI Promedio"), "21.50");
        assert_eq!(value_of(&cards, "Salud Física"), "1.5");
        assert_eq!(value_of(&cards, "Salud Mental"), "1.5");
        assert_eq!(value_of(&cards, "Horas de Sueño"), "6.5");
    }

    #[test]
    fn empty_dataset_renders_not_available() {
        let cards = kpi_cards(&survey(0, 0), &DashboardConfig::default()).unwrap();
        assert_eq!(value_of(&cards, "Población Total"), "0");
        assert_eq!(value_of(&cards, "% Diabetes"), "n/a");
    }

    #[test]
    fn missing_column_is_reported() {
        let config = DashboardConfig {
            sleep_column: "sueño".into(),
            ..DashboardConfig::default()
        };
        assert_eq!(
            kpi_cards(&survey(10, 1), &config),
            Err(DashboardError::MissingColumn {
                column: "sueño".into()
            })
        );
    }
}
