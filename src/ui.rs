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

mod ui_charts;
mod ui_components;
mod ui_main;

use ratatui::Frame;

use crate::controller::Dashboard;

pub fn ui(f: &mut Frame, dash: &Dashboard) {
    let size = f.area();
    ui_main::render_main_view(f, dash, size);

    if let Some(modal) = &dash.display().modal {
        ui_components::render_modal(f, modal, size);
    }
}
