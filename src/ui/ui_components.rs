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

use std::str::FromStr;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::classifier::{ZoneCard, ZoneClass};
use crate::display::Modal;
use crate::projector::StatusClass;

/// Helper function to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// `#rrggbb` to a terminal colour; anything unparseable falls back to white.
pub fn hex_color(hex: &str) -> Color {
    Color::from_str(hex).unwrap_or(Color::White)
}

pub fn status_color(class: StatusClass) -> Color {
    match class {
        StatusClass::Off => Color::DarkGray,
        StatusClass::Eco => Color::Yellow,
        StatusClass::Full => Color::Green,
    }
}

pub fn zone_color(class: ZoneClass) -> Color {
    match class {
        ZoneClass::Cold => Color::LightBlue,
        ZoneClass::Hot => Color::LightRed,
        ZoneClass::Empty => Color::DarkGray,
        ZoneClass::Optimal => Color::Green,
    }
}

/// Render a modal summary over whatever is on screen.
pub fn render_modal(f: &mut Frame, modal: &Modal, size: Rect) {
    let popup_area = centered_rect(50, 40, size);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", modal.title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let lines: Vec<Line> = modal.lines.iter().map(|l| Line::from(l.as_str())).collect();
    let body = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(body, chunks[0]);

    let instructions = Paragraph::new("Press Enter to dismiss")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(instructions, chunks[1]);
}

pub fn render_zone_card(f: &mut Frame, card: &ZoneCard, area: Rect) {
    let color = zone_color(card.class);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", card.name))
        .title_bottom(Line::from(format!(" {} ", card.class.as_str())).right_aligned());

    let text = vec![
        Line::from(card.occupancy.as_str()),
        Line::from(card.temperature.as_str()),
        Line::from(card.hvac.as_str()),
    ];
    let body = Paragraph::new(text).block(block).style(Style::default().fg(color));
    f.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(50, 40, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#00d4ff"), Color::Rgb(0x00, 0xd4, 0xff));
        assert_eq!(hex_color("nonsense"), Color::White);
    }
}
