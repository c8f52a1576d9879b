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

use crate::display::{one_decimal, whole_percent};
use crate::model::Room;

pub const COLD_BELOW_C: f64 = 19.0;
pub const HOT_ABOVE_C: f64 = 24.0;
pub const EMPTY_BELOW_OCCUPANCY: f64 = 0.10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ZoneClass {
    Cold,
    Hot,
    Empty,
    Optimal,
}

impl ZoneClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneClass::Cold => "cold",
            ZoneClass::Hot => "hot",
            ZoneClass::Empty => "empty",
            ZoneClass::Optimal => "optimal",
        }
    }
}

/// Temperature checks run before occupancy: a cold empty room is cold.
pub fn classify(room: &Room) -> ZoneClass {
    classify_reading(room.temperature, room.occupancy)
}

pub fn classify_reading(temperature: f64, occupancy: f64) -> ZoneClass {
    if temperature < COLD_BELOW_C {
        ZoneClass::Cold
    } else if temperature > HOT_ABOVE_C {
        ZoneClass::Hot
    } else if occupancy < EMPTY_BELOW_OCCUPANCY {
        ZoneClass::Empty
    } else {
        ZoneClass::Optimal
    }
}

/// Display card for one room in the zone grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneCard {
    pub name: String,
    pub class: ZoneClass,
    pub occupancy: String,
    pub temperature: String,
    pub hvac: String,
}

impl ZoneCard {
    pub fn from_room(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            class: classify(room),
            occupancy: format!("Occupancy: {}", whole_percent(room.occupancy)),
            temperature: format!("Temp: {}°C", one_decimal(room.temperature)),
            hvac: format!("HVAC: {}", room.hvac),
        }
    }
}
