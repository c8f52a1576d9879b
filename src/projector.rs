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

//! Schedule projections: a decimated preview table and a full-resolution
//! occupancy series.

use crate::display::whole_percent;
use crate::model::{HvacMode, LightsMode, ScheduleSlot};

/// Every `TABLE_STRIDE`-th slot goes into the preview table.
pub const TABLE_STRIDE: usize = 2;
pub const TABLE_MAX_ROWS: usize = 12;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Off,
    Eco,
    Full,
}

impl From<HvacMode> for StatusClass {
    fn from(mode: HvacMode) -> Self {
        match mode {
            HvacMode::Off => StatusClass::Off,
            HvacMode::Eco => StatusClass::Eco,
            HvacMode::Full => StatusClass::Full,
        }
    }
}

impl From<LightsMode> for StatusClass {
    fn from(mode: LightsMode) -> Self {
        match mode {
            LightsMode::Off => StatusClass::Off,
            LightsMode::Dim => StatusClass::Eco,
            LightsMode::Full => StatusClass::Full,
        }
    }
}

/// One formatted row of the schedule table.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleRow {
    pub time_slot: String,
    pub occupancy: String,
    pub hvac: String,
    pub hvac_class: StatusClass,
    pub lights: String,
    pub lights_class: StatusClass,
    pub energy: String,
    pub savings: String,
}

impl ScheduleRow {
    pub fn from_slot(slot: &ScheduleSlot) -> Self {
        Self {
            time_slot: slot.time_slot.clone(),
            occupancy: whole_percent(slot.predicted_occupancy),
            hvac: slot.hvac_mode.to_string(),
            hvac_class: slot.hvac_mode.into(),
            lights: slot.lights_mode.to_string(),
            lights_class: slot.lights_mode.into(),
            energy: format!("{} kW", slot.total_energy_kw),
            savings: format!("{}%", slot.savings_percent),
        }
    }
}

/// Slots at even indices, capped at twelve. A display-density cut, not a sample.
pub fn decimate(schedule: &[ScheduleSlot]) -> Vec<&ScheduleSlot> {
    schedule.iter().step_by(TABLE_STRIDE).take(TABLE_MAX_ROWS).collect()
}

pub fn project_table(schedule: &[ScheduleSlot]) -> Vec<ScheduleRow> {
    decimate(schedule).into_iter().map(ScheduleRow::from_slot).collect()
}

/// Hour-labelled occupancy series in percent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OccupancySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl OccupancySeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn project_chart(schedule: &[ScheduleSlot]) -> OccupancySeries {
    OccupancySeries {
        labels: schedule.iter().map(|s| s.hour.to_string()).collect(),
        values: schedule.iter().map(|s| s.predicted_occupancy * 100.0).collect(),
    }
}
