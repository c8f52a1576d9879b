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

//! Payload types exchanged with the optimization backend.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Sample count shown when the backend omits `training_samples`.
pub const DEFAULT_TRAINING_SAMPLES: u64 = 1440;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub model_status: String,
    pub model_accuracy: f64,
    #[serde(default)]
    pub training_samples: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl StatusSummary {
    pub fn model_trained(&self) -> bool {
        self.model_status == "trained"
    }

    pub fn training_sample_count(&self) -> u64 {
        match self.training_samples {
            Some(n) if n > 0 => n,
            _ => DEFAULT_TRAINING_SAMPLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    #[serde(rename = "optimized_energy")]
    pub optimized_energy_kw: f64,
    pub co2_saved_kg: f64,
    pub occupancy_avg: f64,
    pub savings_percent: f64,
    #[serde(default)]
    pub total_energy_kwh: Option<f64>,
    #[serde(default)]
    pub baseline_kwh: Option<f64>,
    #[serde(default)]
    pub energy_saved_kwh: Option<f64>,
    #[serde(default)]
    pub cost_saved_rupees: Option<f64>,
    #[serde(default)]
    pub temperature_avg: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HvacMode {
    Off,
    Eco,
    Full,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LightsMode {
    Off,
    Dim,
    Full,
}

impl HvacMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HvacMode::Off => "OFF",
            HvacMode::Eco => "ECO",
            HvacMode::Full => "FULL",
        }
    }
}

impl LightsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightsMode::Off => "OFF",
            LightsMode::Dim => "DIM",
            LightsMode::Full => "FULL",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LightsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimization strategy requested from the backend. Unknown names are
/// passed through untouched so the backend can define new modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    #[default]
    Normal,
    Eco,
    Weekend,
    Peak,
    Other(String),
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Normal => "normal",
            Mode::Eco => "eco",
            Mode::Weekend => "weekend",
            Mode::Peak => "peak",
            Mode::Other(name) => name,
        }
    }
}

impl From<&str> for Mode {
    fn from(s: &str) -> Self {
        match s {
            "normal" => Mode::Normal,
            "eco" => Mode::Eco,
            "weekend" => Mode::Weekend,
            "peak" => Mode::Peak,
            other => Mode::Other(other.to_string()),
        }
    }
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        Mode::from(s.as_str())
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prediction bucket of the schedule horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub time_slot: String,
    pub hour: u8,
    pub predicted_occupancy: f64,
    pub hvac_mode: HvacMode,
    pub lights_mode: LightsMode,
    #[serde(rename = "total_energy")]
    pub total_energy_kw: f64,
    pub savings_percent: f64,
    #[serde(default)]
    pub hvac_power: Option<f64>,
    #[serde(default)]
    pub lights_power: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySummary {
    pub baseline_energy: f64,
    pub optimized_energy: f64,
    pub energy_saved_kwh: f64,
    pub savings_percent: f64,
    pub co2_saved_kg: f64,
    #[serde(default)]
    pub cost_saved_rupees: Option<f64>,
}

/// Hourly baseline vs optimized consumption. Index `i` is hour `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyComparison {
    pub baseline_24h: Vec<f64>,
    pub optimized_24h: Vec<f64>,
    #[serde(default)]
    pub comparison: Option<EnergySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub occupancy: f64,
    pub temperature: f64,
    pub hvac: String,
}

/// Feature name to percentage weight, kept in the order the backend sent it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureImportance(pub Vec<(String, f64)>);

impl FeatureImportance {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|(_, w)| *w)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct FeatureImportanceVisitor;

impl<'de> Visitor<'de> for FeatureImportanceVisitor {
    type Value = FeatureImportance;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of feature name to weight")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, weight)) = access.next_entry::<String, f64>()? {
            entries.push((name, weight));
        }
        Ok(FeatureImportance(entries))
    }
}

impl<'de> Deserialize<'de> for FeatureImportance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FeatureImportanceVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLogEntry {
    pub time: String,
    pub decision: String,
}

impl DecisionLogEntry {
    pub fn new(time: &str, decision: &str) -> Self {
        Self { time: time.to_string(), decision: decision.to_string() }
    }
}

/// Illustrative decision feed shown until the backend exposes a real one.
pub fn default_decision_log() -> Vec<DecisionLogEntry> {
    vec![
        DecisionLogEntry::new("09:15 AM", "ML predicted 12% occupancy → Conference A HVAC OFF (Save: 0.8 kW)"),
        DecisionLogEntry::new("09:30 AM", "Occupancy rising to 45% → Open Office HVAC ON"),
        DecisionLogEntry::new("10:00 AM", "Detected pattern: typical Monday surge → Pre-cooling initiated"),
        DecisionLogEntry::new("12:00 PM", "Lunch hour detected: Lights DIM in 3 zones (Save: 0.6 kW)"),
        DecisionLogEntry::new("12:30 PM", "Occupancy prediction: ↓ 30% → HVAC ECO mode"),
        DecisionLogEntry::new("01:00 PM", "Conference B empty for 45 min → All systems OFF (Save: 1.2 kW)"),
        DecisionLogEntry::new("04:00 PM", "Evening occupancy spike predicted → Server room cooling +5%"),
        DecisionLogEntry::new("05:30 PM", "End of day detected → Gradual shutdown sequence initiated"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationContext {
    pub hour: u8,
    /// 0 = Sunday
    pub day_of_week: u8,
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub occupancy: f64,
    pub hvac_mode: HvacMode,
    pub lights_mode: LightsMode,
    pub savings_percent: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub hvac_power: Option<f64>,
    #[serde(default)]
    pub lights_power: Option<f64>,
    #[serde(default)]
    pub total_energy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrainMetrics {
    pub accuracy: f64,
    #[serde(default)]
    pub mse: Option<f64>,
    #[serde(default)]
    pub mae: Option<f64>,
    #[serde(default)]
    pub r2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrainResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metrics: Option<RetrainMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = r#"{"model_status":"trained","model_accuracy":87.25,"training_samples":2880,"timestamp":"2025-01-01T10:00:00"}"#;
        let status: StatusSummary = serde_json::from_str(json).unwrap();
        assert!(status.model_trained());
        assert_eq!(status.model_accuracy, 87.25);
        assert_eq!(status.training_sample_count(), 2880);
    }

    #[test]
    fn test_status_sample_count_fallback() {
        let json = r#"{"model_status":"untrained","model_accuracy":0}"#;
        let status: StatusSummary = serde_json::from_str(json).unwrap();
        assert!(!status.model_trained());
        assert_eq!(status.training_sample_count(), DEFAULT_TRAINING_SAMPLES);

        let zero = StatusSummary { training_samples: Some(0), ..status };
        assert_eq!(zero.training_sample_count(), DEFAULT_TRAINING_SAMPLES);
    }

    #[test]
    fn test_daily_metrics_ignores_extra_fields() {
        let json = r#"{"total_energy_kwh":156.8,"baseline_kwh":168.0,"energy_saved_kwh":11.2,
            "savings_percent":6.7,"co2_saved_kg":5.6,"cost_saved_rupees":84.0,
            "occupancy_avg":0.38,"temperature_avg":21.8,"optimized_energy":5.8}"#;
        let metrics: DailyMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.optimized_energy_kw, 5.8);
        assert_eq!(metrics.occupancy_avg, 0.38);
        assert_eq!(metrics.cost_saved_rupees, Some(84.0));
    }

    #[test]
    fn test_schedule_slot_wire_names() {
        let json = r#"{"hour":3,"time_slot":"03:00 - 04:00","predicted_occupancy":0.1,
            "hvac_mode":"OFF","hvac_power":0.1,"lights_mode":"DIM","lights_power":0.4,
            "total_energy":2.15,"savings_percent":30}"#;
        let slot: ScheduleSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.hour, 3);
        assert_eq!(slot.hvac_mode, HvacMode::Off);
        assert_eq!(slot.lights_mode, LightsMode::Dim);
        assert_eq!(slot.total_energy_kw, 2.15);
    }

    #[test]
    fn test_schedule_slot_rejects_unknown_mode() {
        let json = r#"{"hour":3,"time_slot":"03:00 - 04:00","predicted_occupancy":0.1,
            "hvac_mode":"TURBO","lights_mode":"DIM","total_energy":2.15,"savings_percent":30}"#;
        assert!(serde_json::from_str::<ScheduleSlot>(json).is_err());
    }

    #[test]
    fn test_mode_names_round_trip() {
        for name in ["normal", "eco", "weekend", "peak", "night-setback"] {
            assert_eq!(Mode::from(name).as_str(), name);
        }
        assert_eq!(Mode::from("eco"), Mode::Eco);
        assert_eq!(Mode::from("holiday"), Mode::Other("holiday".to_string()));
        assert_eq!(Mode::default(), Mode::Normal);
    }

    #[test]
    fn test_mode_serializes_as_plain_string() {
        let json = serde_json::to_string(&Mode::Weekend).unwrap();
        assert_eq!(json, "\"weekend\"");
        let mode: Mode = serde_json::from_str("\"peak\"").unwrap();
        assert_eq!(mode, Mode::Peak);
    }

    #[test]
    fn test_feature_importance_preserves_wire_order() {
        let json = r#"{"temperature":12.5,"hour":61.0,"humidity":4.5,"day_of_week":22.0}"#;
        let features: FeatureImportance = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = features.names().collect();
        assert_eq!(names, vec!["temperature", "hour", "humidity", "day_of_week"]);
        let weights: Vec<f64> = features.weights().collect();
        assert_eq!(weights, vec![12.5, 61.0, 4.5, 22.0]);
    }

    #[test]
    fn test_feature_importance_empty() {
        let features: FeatureImportance = serde_json::from_str("{}").unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn test_retrain_result_without_metrics() {
        let result: RetrainResult = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_default_decision_log() {
        let log = default_decision_log();
        assert_eq!(log.len(), 8);
        assert_eq!(log[0].time, "09:15 AM");
        assert!(log[7].decision.contains("shutdown"));
    }
}
