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

//! EcoSense - terminal dashboard for an ML-driven building optimization backend
//!
//! This library provides the backend gateway, the schedule/zone projections,
//! the chart registry and the dashboard controller that ties them together.

pub mod model;
pub mod gateway;
pub mod projector;
pub mod classifier;
pub mod charts;
pub mod view;
pub mod display;
pub mod controller;
pub mod config;
pub mod events;
pub mod ui;
pub mod logger;

#[cfg(test)]
pub mod test_utils;
