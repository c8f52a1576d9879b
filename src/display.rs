/*
 * This file is part of EcoSense.
 *
 * Copyright (C) 2025 EcoSense contributors
 *
 * EcoSense is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * EcoSense is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with EcoSense. If not, see <https://www.gnu.org/licenses/>.
 */

//! Text, table and card content of the named display regions.

use crate::classifier::ZoneCard;
use crate::model::{DailyMetrics, DecisionLogEntry, SimulationResult, StatusSummary};
use crate::projector::ScheduleRow;

pub const RETRAIN_LABEL: &str = "🔄 Retrain Model";
pub const RETRAIN_BUSY_LABEL: &str = "⏳ Training...";

/// Placeholder shown in a text field that has not been filled yet.
pub const EMPTY_FIELD: &str = "--";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
}

impl ButtonState {
    pub fn new(label: &str) -> Self {
        Self { label: label.to_string(), enabled: true }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug)]
pub struct Display {
    pub ml_status: String,
    pub ml_accuracy: String,
    pub ml_samples: String,
    pub energy_current: String,
    pub co2_saved: String,
    pub occupancy_pred: String,
    pub savings_percent: String,
    pub schedule_rows: Vec<ScheduleRow>,
    pub zone_cards: Vec<ZoneCard>,
    pub decision_log: Vec<DecisionLogEntry>,
    pub retrain_button: ButtonState,
    pub modal: Option<Modal>,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            ml_status: EMPTY_FIELD.to_string(),
            ml_accuracy: EMPTY_FIELD.to_string(),
            ml_samples: EMPTY_FIELD.to_string(),
            energy_current: EMPTY_FIELD.to_string(),
            co2_saved: EMPTY_FIELD.to_string(),
            occupancy_pred: EMPTY_FIELD.to_string(),
            savings_percent: EMPTY_FIELD.to_string(),
            schedule_rows: Vec::new(),
            zone_cards: Vec::new(),
            decision_log: Vec::new(),
            retrain_button: ButtonState::new(RETRAIN_LABEL),
            modal: None,
        }
    }
}

impl Display {
    pub fn show_status(&mut self, status: &StatusSummary) {
        self.ml_status = if status.model_trained() { "Trained ✓" } else { "Training..." }.to_string();
        self.ml_accuracy = format_percent(status.model_accuracy);
        self.ml_samples = group_thousands(status.training_sample_count());
    }

    pub fn show_metrics(&mut self, metrics: &DailyMetrics) {
        self.energy_current = format!("{} kW", metrics.optimized_energy_kw);
        self.co2_saved = format!("{} kg", metrics.co2_saved_kg);
        self.occupancy_pred = whole_percent(metrics.occupancy_avg);
        self.savings_percent = format_percent(metrics.savings_percent);
    }

    pub fn set_retrain_busy(&mut self, busy: bool) {
        self.retrain_button.enabled = !busy;
        self.retrain_button.label = if busy { RETRAIN_BUSY_LABEL } else { RETRAIN_LABEL }.to_string();
    }

    pub fn open_modal(&mut self, title: &str, lines: Vec<String>) {
        self.modal = Some(Modal { title: title.to_string(), lines });
    }

    pub fn dismiss_modal(&mut self) -> bool {
        self.modal.take().is_some()
    }
}

/// One decimal place, ties rounded away from zero (`12.25` -> `12.3`).
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// One decimal place with a percent sign, e.g. `87.3%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", one_decimal(value))
}

/// A 0..1 fraction as a whole percent, ties rounded up: `0.125` -> `13%`.
pub fn whole_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round())
}

/// Retrain metrics report accuracy as a fraction of one.
pub fn format_retrained_accuracy(accuracy: f64) -> String {
    format_percent(accuracy * 100.0)
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn simulation_summary(result: &SimulationResult) -> Vec<String> {
    vec![
        format!("- Occupancy: {}", whole_percent(result.occupancy)),
        format!("- HVAC: {}", result.hvac_mode),
        format!("- Lights: {}", result.lights_mode),
        format!("- Savings: {}%", result.savings_percent),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HvacMode, LightsMode};

    #[test]
    fn test_defaults_are_placeholders() {
        let display = Display::default();
        assert_eq!(display.ml_accuracy, EMPTY_FIELD);
        assert!(display.schedule_rows.is_empty());
        assert!(display.retrain_button.enabled);
        assert_eq!(display.retrain_button.label, RETRAIN_LABEL);
        assert!(display.modal.is_none());
    }

    #[test]
    fn test_show_status() {
        let mut display = Display::default();
        display.show_status(&StatusSummary {
            model_status: "trained".to_string(),
            model_accuracy: 91.234,
            training_samples: None,
            timestamp: None,
        });
        assert_eq!(display.ml_status, "Trained ✓");
        assert_eq!(display.ml_accuracy, "91.2%");
        assert_eq!(display.ml_samples, "1,440");
    }

    #[test]
    fn test_show_metrics() {
        let mut display = Display::default();
        display.show_metrics(&DailyMetrics {
            optimized_energy_kw: 5.8,
            co2_saved_kg: 5.6,
            occupancy_avg: 0.38,
            savings_percent: 6.7,
            total_energy_kwh: None,
            baseline_kwh: None,
            energy_saved_kwh: None,
            cost_saved_rupees: None,
            temperature_avg: None,
        });
        assert_eq!(display.energy_current, "5.8 kW");
        assert_eq!(display.co2_saved, "5.6 kg");
        assert_eq!(display.occupancy_pred, "38%");
        assert_eq!(display.savings_percent, "6.7%");
    }

    #[test]
    fn test_retrain_busy_toggle() {
        let mut display = Display::default();
        display.set_retrain_busy(true);
        assert!(!display.retrain_button.enabled);
        assert_eq!(display.retrain_button.label, RETRAIN_BUSY_LABEL);
        display.set_retrain_busy(false);
        assert!(display.retrain_button.enabled);
        assert_eq!(display.retrain_button.label, RETRAIN_LABEL);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(86400), "86,400");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_retrained_accuracy() {
        assert_eq!(format_retrained_accuracy(0.8734), "87.3%");
        assert_eq!(format_retrained_accuracy(1.0), "100.0%");
    }

    #[test]
    fn test_ties_round_half_up() {
        assert_eq!(whole_percent(0.125), "13%");
        assert_eq!(whole_percent(0.38), "38%");
        assert_eq!(one_decimal(18.25), "18.3");
        assert_eq!(format_percent(12.25), "12.3%");
        assert_eq!(format_retrained_accuracy(0.8125), "81.3%");
    }

    #[test]
    fn test_simulation_summary() {
        let lines = simulation_summary(&SimulationResult {
            occupancy: 0.42,
            hvac_mode: HvacMode::Full,
            lights_mode: LightsMode::Full,
            savings_percent: 0.0,
            confidence: Some(0.97),
            hvac_power: None,
            lights_power: None,
            total_energy: None,
        });
        assert_eq!(lines[0], "- Occupancy: 42%");
        assert_eq!(lines[1], "- HVAC: FULL");
        assert_eq!(lines[2], "- Lights: FULL");
        assert_eq!(lines[3], "- Savings: 0%");
    }

    #[test]
    fn test_modal_dismiss() {
        let mut display = Display::default();
        assert!(!display.dismiss_modal());
        display.open_modal("Title", vec!["line".to_string()]);
        assert!(display.dismiss_modal());
        assert!(display.modal.is_none());
    }
}
