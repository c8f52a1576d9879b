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

//! Terminal rendering of registry charts.

use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};

use super::ui_components::hex_color;
use crate::charts::{ChartKey, ChartKind, ChartRegistry, ChartSpec};

fn chart_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
}

/// Draw the live chart under `key`, or a placeholder until one exists.
pub fn render_chart(f: &mut Frame, charts: &ChartRegistry, key: ChartKey, area: Rect) {
    let Some(instance) = charts.get(key) else {
        let placeholder = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(chart_block(key.as_str()));
        f.render_widget(placeholder, area);
        return;
    };

    let spec = instance.spec();
    match spec.kind {
        ChartKind::Line => render_line(f, spec, area),
        ChartKind::Bar => render_grouped_bars(f, spec, area),
        ChartKind::HorizontalBar | ChartKind::Doughnut => render_share_bars(f, spec, area),
    }
}

/// First, middle and last category labels; a full axis does not fit in a cell grid.
fn sparse_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 | 2 => labels.to_vec(),
        n => vec![labels[0].clone(), labels[n / 2].clone(), labels[n - 1].clone()],
    }
}

fn render_line(f: &mut Frame, spec: &ChartSpec, area: Rect) {
    let points: Vec<Vec<(f64, f64)>> = spec
        .datasets
        .iter()
        .map(|d| d.values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect())
        .collect();

    let datasets: Vec<Dataset> = spec
        .datasets
        .iter()
        .zip(points.iter())
        .map(|(d, data)| {
            Dataset::default()
                .name(d.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(hex_color(&d.color)))
                .data(data)
        })
        .collect();

    let x_max = spec.labels.len().saturating_sub(1).max(1) as f64;
    let (lo, hi) = spec.value_bounds();
    let y_labels = vec![format!("{lo:.0}"), format!("{:.0}", (lo + hi) / 2.0), format!("{hi:.0}")];

    let chart = Chart::new(datasets)
        .block(chart_block(&spec.title))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(sparse_labels(&spec.labels)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([lo, hi])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

fn render_grouped_bars(f: &mut Frame, spec: &ChartSpec, area: Rect) {
    let (_, hi) = spec.value_bounds();
    let mut chart = BarChart::default()
        .block(chart_block(&spec.title))
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2)
        .max(hi.ceil() as u64);

    for (i, label) in spec.labels.iter().enumerate() {
        let bars: Vec<Bar> = spec
            .datasets
            .iter()
            .filter_map(|d| d.values.get(i).map(|v| (d, *v)))
            .map(|(d, v)| {
                Bar::default()
                    .value(v.max(0.0).round() as u64)
                    .text_value(format!("{v:.0}"))
                    .style(Style::default().fg(hex_color(&d.color)))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(label.as_str())).bars(&bars));
    }
    f.render_widget(chart, area);
}

/// One horizontal bar per category, coloured per slice.
fn render_share_bars(f: &mut Frame, spec: &ChartSpec, area: Rect) {
    let Some(dataset) = spec.datasets.first() else {
        f.render_widget(chart_block(&spec.title), area);
        return;
    };
    let suffix = if spec.kind == ChartKind::Doughnut { "%" } else { "" };

    let bars: Vec<Bar> = spec
        .labels
        .iter()
        .zip(dataset.values.iter())
        .enumerate()
        .map(|(i, (label, v))| {
            let color = dataset
                .slice_colors
                .get(i % dataset.slice_colors.len().max(1))
                .map(|c| hex_color(c))
                .unwrap_or_else(|| hex_color(&dataset.color));
            Bar::default()
                .label(Line::from(label.as_str()))
                .value(v.max(0.0).round() as u64)
                .text_value(format!("{v:.1}{suffix}"))
                .style(Style::default().fg(color))
        })
        .collect();

    let (_, hi) = spec.value_bounds();
    let chart = BarChart::default()
        .block(chart_block(&spec.title))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(hi.ceil() as u64)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}
