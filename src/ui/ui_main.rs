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

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Cell, List, ListItem, Paragraph, Row, Table, Tabs};

use super::ui_charts::render_chart;
use super::ui_components::{render_zone_card, status_color};
use crate::charts::ChartKey;
use crate::controller::Dashboard;
use crate::view::Tab;

const ZONE_COLUMNS: usize = 3;
const ZONE_CARD_HEIGHT: u16 = 5;

/// Render the main view: header, tab bar, active tab, status bar.
pub fn render_main_view(f: &mut Frame, dash: &Dashboard, size: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, dash, chunks[0]);
    render_tabs(f, dash, chunks[1]);

    match dash.view().active_tab() {
        Tab::Overview => render_overview(f, dash, chunks[2]),
        Tab::Schedule => render_schedule(f, dash, chunks[2]),
        Tab::Zones => render_zones(f, dash, chunks[2]),
        Tab::Analytics => render_analytics(f, dash, chunks[2]),
    }

    render_status_bar(f, dash, chunks[3]);
}

fn render_header(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let display = dash.display();
    let header_text = format!(
        " EcoSense    |    Model: {}    |    Accuracy: {}    |    Samples: {} ",
        display.ml_status, display.ml_accuracy, display.ml_samples
    );
    let header = Paragraph::new(header_text).style(Style::default().fg(Color::Yellow));
    f.render_widget(header, header_cols[0]);

    let optimization = if dash.view().optimization_enabled { "ON" } else { "OFF" };
    let right = Paragraph::new(format!("Mode: {}  Optimization: {} ", dash.view().mode(), optimization))
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(right, header_cols[1]);
}

fn render_tabs(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .select(dash.view().active_tab().index())
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn render_overview(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);
    render_metrics(f, dash, rows[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_chart(f, dash.charts(), ChartKey::OccupancyTrend, charts[0]);
    render_chart(f, dash.charts(), ChartKey::EnergyComparison, charts[1]);
}

fn render_metrics(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let display = dash.display();
    let tiles = [
        ("Current Energy", &display.energy_current),
        ("CO₂ Saved", &display.co2_saved),
        ("Predicted Occupancy", &display.occupancy_pred),
        ("Savings", &display.savings_percent),
    ];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), col) in tiles.iter().zip(cols.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {title} "));
        let tile = Paragraph::new(value.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .block(block);
        f.render_widget(tile, *col);
    }
}

fn render_schedule(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let header = Row::new(["Time", "Occupancy", "HVAC", "Lights", "Energy", "Savings"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = dash
        .display()
        .schedule_rows
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.time_slot.as_str()),
                Cell::from(r.occupancy.as_str()),
                Cell::from(r.hvac.as_str()).style(Style::default().fg(status_color(r.hvac_class))),
                Cell::from(r.lights.as_str()).style(Style::default().fg(status_color(r.lights_class))),
                Cell::from(r.energy.as_str()),
                Cell::from(r.savings.as_str()),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(15),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Schedule ({}) ", dash.view().mode())),
    );
    f.render_widget(table, cols[0]);

    let items: Vec<ListItem> = dash
        .display()
        .decision_log
        .iter()
        .map(|e| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<9}", e.time), Style::default().fg(Color::Cyan)),
                Span::raw(e.decision.as_str()),
            ]))
        })
        .collect();
    let log = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Decision Log "),
    );
    f.render_widget(log, cols[1]);
}

fn render_zones(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let cards = &dash.display().zone_cards;
    if cards.is_empty() {
        let empty = Paragraph::new("No zones reported yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded).title(" Zones "));
        f.render_widget(empty, area);
        return;
    }

    let row_count = cards.len().div_ceil(ZONE_COLUMNS);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(ZONE_CARD_HEIGHT); row_count])
        .split(area);

    for (row_area, chunk) in rows.iter().zip(cards.chunks(ZONE_COLUMNS)) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, ZONE_COLUMNS as u32); ZONE_COLUMNS])
            .split(*row_area);
        for (card, col) in chunk.iter().zip(cols.iter()) {
            render_zone_card(f, card, *col);
        }
    }
}

fn render_analytics(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_chart(f, dash.charts(), ChartKey::FeatureImportance, rows[0]);
    render_chart(f, dash.charts(), ChartKey::SavingsBreakdown, bottom[0]);
    render_chart(f, dash.charts(), ChartKey::WeeklyTrend, bottom[1]);
}

fn render_status_bar(f: &mut Frame, dash: &Dashboard, area: Rect) {
    let retrain = &dash.display().retrain_button;
    let mut status_text = String::from(
        " 1-4 tabs | m mode | o optimization | s simulate | R refresh | q quit | t ",
    );
    status_text.push_str(&retrain.label);
    if dash.has_pending() {
        status_text.push_str(&format!(" | {} request(s) in flight", dash.pending()));
    }
    let style = if retrain.enabled {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    f.render_widget(Paragraph::new(status_text).style(style), area);
}
