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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Dashboard;
use crate::view::Tab;

/// Main event handler. Returns `Ok(true)` when the user asked to quit.
pub fn handle_key_event(dash: &mut Dashboard, key_event: KeyEvent) -> anyhow::Result<bool> {
    let KeyEvent { code, modifiers, .. } = key_event;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    // A modal swallows everything else except its own dismissal.
    if dash.display().modal.is_some() {
        if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
            dash.dismiss_modal();
        }
        return Ok(false);
    }

    handle_global_events(dash, code, modifiers)
}

fn handle_global_events(dash: &mut Dashboard, code: KeyCode, modifiers: KeyModifiers) -> anyhow::Result<bool> {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => return Ok(true),
        (KeyCode::Char(c @ '1'..='4'), _) => {
            let idx = (c as usize) - ('1' as usize);
            dash.switch_tab(Tab::ALL[idx]);
        }
        (KeyCode::Tab, _) | (KeyCode::Right, _) => {
            let next = dash.view().active_tab().next();
            dash.switch_tab(next);
        }
        (KeyCode::BackTab, _) | (KeyCode::Left, _) => {
            let prev = dash.view().active_tab().prev();
            dash.switch_tab(prev);
        }
        (KeyCode::Char('m'), _) => dash.cycle_mode(),
        (KeyCode::Char('o'), _) => dash.toggle_optimization(),
        (KeyCode::Char('s'), _) => dash.run_simulation(),
        (KeyCode::Char('t'), _) => {
            dash.trigger_retrain();
        }
        (KeyCode::Char('R'), _) | (KeyCode::F(5), _) => dash.refresh(),
        _ => {}
    }
    Ok(false)
}
