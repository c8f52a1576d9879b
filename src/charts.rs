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

//! Chart registry and chart specs.
//!
//! The registry owns at most one live chart instance per [`ChartKey`]. Rendering
//! under a key that already holds an instance destroys the old instance before
//! the new one is constructed, so repeated refreshes never stack up hidden charts.

use std::collections::HashMap;

use tracing::trace;

use crate::model::{EnergyComparison, FeatureImportance};
use crate::projector::OccupancySeries;
use crate::view::Region;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChartKey {
    OccupancyTrend,
    EnergyComparison,
    FeatureImportance,
    SavingsBreakdown,
    WeeklyTrend,
}

impl ChartKey {
    pub const ALL: [ChartKey; 5] = [
        ChartKey::OccupancyTrend,
        ChartKey::EnergyComparison,
        ChartKey::FeatureImportance,
        ChartKey::SavingsBreakdown,
        ChartKey::WeeklyTrend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKey::OccupancyTrend => "occupancy-trend",
            ChartKey::EnergyComparison => "energy-comparison",
            ChartKey::FeatureImportance => "feature-importance",
            ChartKey::SavingsBreakdown => "savings-breakdown",
            ChartKey::WeeklyTrend => "weekly-trend",
        }
    }

    /// Display region that hosts this chart.
    pub fn region(&self) -> Region {
        match self {
            ChartKey::OccupancyTrend => Region::OccupancyChart,
            ChartKey::EnergyComparison => Region::EnergyChart,
            ChartKey::FeatureImportance => Region::FeatureChart,
            ChartKey::SavingsBreakdown => Region::SavingsChart,
            ChartKey::WeeklyTrend => Region::TrendChart,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    HorizontalBar,
    Doughnut,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSpec {
    pub label: String,
    pub values: Vec<f64>,
    /// `#rrggbb`; per-value colours for doughnut/bar slices use `slice_colors`.
    pub color: String,
    pub slice_colors: Vec<String>,
}

impl DatasetSpec {
    pub fn new(label: &str, values: Vec<f64>, color: &str) -> Self {
        Self {
            label: label.to_string(),
            values,
            color: color.to_string(),
            slice_colors: Vec::new(),
        }
    }

    pub fn with_slice_colors(mut self, colors: &[&str]) -> Self {
        self.slice_colors = colors.iter().map(|c| c.to_string()).collect();
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetSpec>,
    /// Fixed value axis; `None` lets the renderer fit the data.
    pub value_range: Option<(f64, f64)>,
}

impl ChartSpec {
    /// Smallest and largest value across datasets, padded to include zero.
    pub fn value_bounds(&self) -> (f64, f64) {
        if let Some(range) = self.value_range {
            return range;
        }
        let mut min = 0.0_f64;
        let mut max = 0.0_f64;
        for v in self.datasets.iter().flat_map(|d| d.values.iter()) {
            min = min.min(*v);
            max = max.max(*v);
        }
        if max <= min {
            max = min + 1.0;
        }
        (min, max)
    }
}

const CYAN: &str = "#00d4ff";
const GREEN: &str = "#10b981";
const YELLOW: &str = "#ffd93d";
const RED: &str = "#ff6b6b";
const STEEL: &str = "#7ca3c0";

pub fn occupancy_chart(series: &OccupancySeries) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        title: "Occupancy Prediction".to_string(),
        labels: series.labels.clone(),
        datasets: vec![DatasetSpec::new("ML Predicted Occupancy", series.values.clone(), CYAN)],
        value_range: Some((0.0, 100.0)),
    }
}

pub fn energy_chart(comparison: &EnergyComparison) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        title: "Energy: Baseline vs Optimized".to_string(),
        labels: (0..24).map(|h| format!("{h}:00")).collect(),
        datasets: vec![
            DatasetSpec::new("Baseline", comparison.baseline_24h.clone(), RED),
            DatasetSpec::new("ML Optimized", comparison.optimized_24h.clone(), GREEN),
        ],
        value_range: None,
    }
}

pub fn feature_chart(features: &FeatureImportance) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::HorizontalBar,
        title: "Feature Importance".to_string(),
        labels: features.names().map(str::to_string).collect(),
        datasets: vec![DatasetSpec::new("Feature Importance (%)", features.weights().collect(), CYAN)
            .with_slice_colors(&[CYAN, GREEN, YELLOW, RED, STEEL])],
        value_range: None,
    }
}

pub fn savings_chart() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Doughnut,
        title: "Savings Breakdown".to_string(),
        labels: vec!["HVAC".to_string(), "Lighting".to_string(), "Predictive".to_string()],
        datasets: vec![DatasetSpec::new("Share", vec![60.0, 30.0, 10.0], CYAN)
            .with_slice_colors(&[CYAN, GREEN, YELLOW])],
        value_range: Some((0.0, 100.0)),
    }
}

pub fn trend_chart() -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Weekly Trend".to_string(),
        labels: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].iter().map(|d| d.to_string()).collect(),
        datasets: vec![
            DatasetSpec::new("Baseline", vec![168.0, 165.0, 170.0, 172.0, 168.0, 140.0, 120.0], RED),
            DatasetSpec::new("Optimized", vec![157.0, 155.0, 159.0, 160.0, 157.0, 130.0, 110.0], GREEN),
        ],
        value_range: None,
    }
}

/// A constructed chart. Consumed by [`ChartInstance::destroy`].
#[derive(Debug)]
pub struct ChartInstance {
    id: u64,
    key: ChartKey,
    spec: ChartSpec,
}

impl ChartInstance {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn key(&self) -> ChartKey {
        self.key
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    fn destroy(self) {
        trace!(chart = self.key.as_str(), id = self.id, "chart destroyed");
    }
}

#[derive(Debug, Default)]
pub struct ChartRegistry {
    live: HashMap<ChartKey, ChartInstance>,
    next_id: u64,
    destroyed: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chart under `key`, destroying any previous instance first.
    pub fn render(&mut self, key: ChartKey, spec: ChartSpec) -> u64 {
        if let Some(previous) = self.live.remove(&key) {
            previous.destroy();
            self.destroyed += 1;
        }
        self.next_id += 1;
        let id = self.next_id;
        trace!(chart = key.as_str(), id, "chart created");
        self.live.insert(key, ChartInstance { id, key, spec });
        id
    }

    pub fn get(&self, key: ChartKey) -> Option<&ChartInstance> {
        self.live.get(&key)
    }

    pub fn contains(&self, key: ChartKey) -> bool {
        self.live.contains_key(&key)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn created_total(&self) -> u64 {
        self.next_id
    }

    pub fn destroyed_total(&self) -> u64 {
        self.destroyed
    }
}
