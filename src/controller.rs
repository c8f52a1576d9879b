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

//! Dashboard controller.
//!
//! Requests are dispatched into an unordered in-flight set and complete in
//! whatever order the backend answers. Each completion comes back as an
//! [`Update`] and is applied through `&mut self`, so exactly one handler
//! mutates the view at a time. Mode-dependent responses carry the generation
//! issued when they were sent; anything older than the latest issue for its
//! resource is dropped on arrival.

use std::future::Future;
use std::sync::Arc;

use chrono::{Datelike, Local, Timelike};
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::charts::{self, ChartKey, ChartRegistry, ChartSpec};
use crate::classifier::ZoneCard;
use crate::config::DashboardConfig;
use crate::display::{format_retrained_accuracy, simulation_summary, Display};
use crate::gateway::{Gateway, GatewayError};
use crate::model::{
    DailyMetrics, DecisionLogEntry, EnergyComparison, FeatureImportance, Mode, RetrainResult, Room,
    ScheduleSlot, SimulationContext, SimulationResult, StatusSummary,
};
use crate::projector::{project_chart, project_table};
use crate::view::{Generation, Resource, Tab, ViewState};

/// A completed request, waiting to be applied to the view.
#[derive(Debug)]
pub enum Update {
    Status(Result<StatusSummary, GatewayError>),
    DailyMetrics(Result<DailyMetrics, GatewayError>),
    Schedule {
        generation: Generation,
        result: Result<Vec<ScheduleSlot>, GatewayError>,
    },
    EnergyComparison {
        generation: Generation,
        result: Result<EnergyComparison, GatewayError>,
    },
    Rooms(Result<Vec<Room>, GatewayError>),
    Features(Result<FeatureImportance, GatewayError>),
    Optimization {
        enabled: bool,
        result: Result<(), GatewayError>,
    },
    Simulation(Result<SimulationResult, GatewayError>),
    Retrain(Result<RetrainResult, GatewayError>),
}

pub struct Dashboard {
    gateway: Arc<dyn Gateway>,
    view: ViewState,
    display: Display,
    charts: ChartRegistry,
    modes: Vec<Mode>,
    decision_log: Vec<DecisionLogEntry>,
    in_flight: FuturesUnordered<BoxFuture<'static, Update>>,
}

impl Dashboard {
    pub fn new(gateway: Arc<dyn Gateway>, config: &DashboardConfig) -> Self {
        Self {
            gateway,
            view: ViewState::new(config.default_mode()),
            display: Display::default(),
            charts: ChartRegistry::new(),
            modes: config.modes(),
            decision_log: config.decision_log.clone(),
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    fn dispatch<F>(&mut self, request: F)
    where
        F: Future<Output = Update> + Send + 'static,
    {
        self.in_flight.push(request.boxed());
    }

    /// Startup: model status plus the full dashboard load, all concurrent.
    pub fn start(&mut self) {
        info!(mode = %self.view.mode(), "starting dashboard");
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move { Update::Status(gateway.status().await) });
        self.load_dashboard();
    }

    /// Metrics, schedule, energy comparison and rooms, plus the local decision log.
    pub fn load_dashboard(&mut self) {
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move { Update::DailyMetrics(gateway.daily_metrics().await) });
        self.request_mode_dependent();
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move { Update::Rooms(gateway.rooms().await) });
        self.display.decision_log = self.decision_log.clone();
    }

    pub fn refresh(&mut self) {
        debug!("manual refresh");
        self.load_dashboard();
    }

    fn request_mode_dependent(&mut self) {
        let mode = self.view.mode().clone();

        let generation = self.view.issue(Resource::Schedule);
        let gateway = Arc::clone(&self.gateway);
        let schedule_mode = mode.clone();
        self.dispatch(async move {
            let result = gateway.schedule(&schedule_mode).await;
            Update::Schedule { generation, result }
        });

        let generation = self.view.issue(Resource::EnergyComparison);
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move {
            let result = gateway.energy_comparison(&mode).await;
            Update::EnergyComparison { generation, result }
        });
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.view.activate(tab);
        if tab == Tab::Analytics {
            self.load_analytics();
        }
    }

    fn load_analytics(&mut self) {
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move { Update::Features(gateway.feature_importance().await) });
        self.render_analytics(ChartKey::SavingsBreakdown, charts::savings_chart());
        self.render_analytics(ChartKey::WeeklyTrend, charts::trend_chart());
    }

    fn render_analytics(&mut self, key: ChartKey, spec: ChartSpec) {
        if !self.view.is_mounted(key.region()) {
            debug!(chart = key.as_str(), "region not mounted, skipping render");
            return;
        }
        self.charts.render(key, spec);
    }

    /// Only schedule and energy comparison depend on the mode.
    pub fn change_mode(&mut self, mode: Mode) {
        info!(from = %self.view.mode(), to = %mode, "mode change");
        self.view.set_mode(mode);
        self.request_mode_dependent();
    }

    pub fn cycle_mode(&mut self) {
        if self.modes.is_empty() {
            return;
        }
        let next = match self.modes.iter().position(|m| m == self.view.mode()) {
            Some(i) => self.modes[(i + 1) % self.modes.len()].clone(),
            None => self.modes[0].clone(),
        };
        self.change_mode(next);
    }

    pub fn set_optimization(&mut self, enabled: bool) {
        self.view.optimization_enabled = enabled;
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move {
            let result = gateway.set_optimization(enabled).await;
            Update::Optimization { enabled, result }
        });
    }

    pub fn toggle_optimization(&mut self) {
        let enabled = !self.view.optimization_enabled;
        self.set_optimization(enabled);
    }

    pub fn run_simulation(&mut self) {
        self.run_simulation_with(current_simulation_context());
    }

    pub fn run_simulation_with(&mut self, context: SimulationContext) {
        debug!(?context, "running simulation");
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move { Update::Simulation(gateway.run_simulation(context).await) });
    }

    /// Returns `false` while a retrain is already in flight.
    pub fn trigger_retrain(&mut self) -> bool {
        if !self.display.retrain_button.enabled {
            return false;
        }
        info!("retrain requested");
        self.display.set_retrain_busy(true);
        let gateway = Arc::clone(&self.gateway);
        self.dispatch(async move { Update::Retrain(gateway.trigger_retrain().await) });
        true
    }

    pub fn dismiss_modal(&mut self) -> bool {
        self.display.dismiss_modal()
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Next completed request, in completion order. `None` when nothing is in flight.
    pub async fn next_update(&mut self) -> Option<Update> {
        self.in_flight.next().await
    }

    /// Apply completions until nothing is left in flight.
    pub async fn settle(&mut self) {
        while let Some(update) = self.next_update().await {
            self.apply(update);
        }
    }

    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Status(result) => match result {
                Ok(status) => self.display.show_status(&status),
                Err(e) => report_failure("status", &e),
            },
            Update::DailyMetrics(result) => match result {
                Ok(metrics) => self.display.show_metrics(&metrics),
                Err(e) => report_failure("daily metrics", &e),
            },
            Update::Schedule { generation, result } => {
                if !self.accept(Resource::Schedule, generation) {
                    return;
                }
                match result {
                    Ok(schedule) => self.show_schedule(&schedule),
                    Err(e) => report_failure("schedule", &e),
                }
            }
            Update::EnergyComparison { generation, result } => {
                if !self.accept(Resource::EnergyComparison, generation) {
                    return;
                }
                match result {
                    Ok(comparison) => {
                        self.charts.render(ChartKey::EnergyComparison, charts::energy_chart(&comparison));
                    }
                    Err(e) => report_failure("energy comparison", &e),
                }
            }
            Update::Rooms(result) => match result {
                Ok(rooms) => self.display.zone_cards = rooms.iter().map(ZoneCard::from_room).collect(),
                Err(e) => report_failure("rooms", &e),
            },
            Update::Features(result) => match result {
                Ok(features) => self.render_analytics(ChartKey::FeatureImportance, charts::feature_chart(&features)),
                Err(e) => report_failure("feature importance", &e),
            },
            Update::Optimization { enabled, result } => match result {
                Ok(()) => debug!(enabled, "optimization flag sent"),
                Err(e) => report_failure("optimization toggle", &e),
            },
            Update::Simulation(result) => match result {
                Ok(prediction) => self.display.open_modal("ML Prediction", simulation_summary(&prediction)),
                Err(e) => report_failure("simulation", &e),
            },
            Update::Retrain(result) => {
                self.display.set_retrain_busy(false);
                match result {
                    Ok(RetrainResult { metrics: Some(metrics), .. }) => {
                        let accuracy = format_retrained_accuracy(metrics.accuracy);
                        info!(%accuracy, "model retrained");
                        self.display.ml_accuracy = accuracy.clone();
                        self.display.open_modal(
                            "✓ Model retrained!",
                            vec![format!("New Accuracy: {accuracy}")],
                        );
                    }
                    Ok(other) => warn!(status = ?other.status, "retrain response carried no metrics"),
                    Err(e) => report_failure("retrain", &e),
                }
            }
        }
    }

    fn accept(&self, resource: Resource, generation: Generation) -> bool {
        let current = self.view.is_current(resource, generation);
        if !current {
            debug!(
                ?resource,
                received = generation.0,
                latest = self.view.latest(resource).0,
                "discarding stale response"
            );
        }
        current
    }

    fn show_schedule(&mut self, schedule: &[ScheduleSlot]) {
        self.display.schedule_rows = project_table(schedule);
        self.charts.render(ChartKey::OccupancyTrend, charts::occupancy_chart(&project_chart(schedule)));
    }
}

/// Failed requests leave the widget as it was; nothing is surfaced to the user.
fn report_failure(resource: &str, error: &GatewayError) {
    warn!(resource, error = %error, "request failed, keeping previous content");
}

/// Local clock hour/weekday with a randomized indoor climate reading.
pub fn current_simulation_context() -> SimulationContext {
    let now = Local::now();
    let mut rng = rand::thread_rng();
    SimulationContext {
        hour: now.hour() as u8,
        day_of_week: now.weekday().num_days_from_sunday() as u8,
        temperature: 22.0 + rng.gen::<f64>() * 4.0,
        humidity: 40.0 + rng.gen::<f64>() * 20.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{RETRAIN_BUSY_LABEL, RETRAIN_LABEL};
    use crate::gateway::MockGateway;
    use crate::model::{RetrainMetrics, HvacMode, LightsMode};
    use crate::test_utils::test_utils::*;

    fn dashboard(mock: MockGateway) -> Dashboard {
        Dashboard::new(Arc::new(mock), &DashboardConfig::default())
    }

    fn expect_initial_load(mock: &mut MockGateway) {
        mock.expect_status().times(1).returning(|| Ok(create_mock_status()));
        mock.expect_daily_metrics().times(1).returning(|| Ok(create_mock_daily_metrics()));
        mock.expect_schedule().times(1).returning(|_| Ok(create_mock_schedule(24)));
        mock.expect_energy_comparison().times(1).returning(|_| Ok(create_mock_energy_comparison()));
        mock.expect_rooms().times(1).returning(|| Ok(create_mock_rooms()));
    }

    #[tokio::test]
    async fn test_start_dispatches_five_concurrent_requests() {
        let mut mock = MockGateway::new();
        expect_initial_load(&mut mock);
        mock.expect_feature_importance().never();

        let mut dash = dashboard(mock);
        dash.start();
        assert_eq!(dash.pending(), 5);
        // Decision log is local and shows up before any response.
        assert_eq!(dash.display().decision_log.len(), 8);

        dash.settle().await;
        assert!(!dash.has_pending());
        assert_eq!(dash.display().ml_status, "Trained ✓");
        assert_eq!(dash.display().ml_accuracy, "87.5%");
        assert_eq!(dash.display().energy_current, "5.8 kW");
        assert_eq!(dash.display().schedule_rows.len(), 12);
        assert_eq!(dash.display().zone_cards.len(), 6);
        assert!(dash.charts().contains(ChartKey::OccupancyTrend));
        assert!(dash.charts().contains(ChartKey::EnergyComparison));
        assert!(!dash.charts().contains(ChartKey::FeatureImportance));
    }

    #[tokio::test]
    async fn test_schedule_request_uses_current_mode() {
        let mut mock = MockGateway::new();
        mock.expect_schedule()
            .withf(|mode: &Mode| *mode == Mode::Weekend)
            .times(1)
            .returning(|_| Ok(create_mock_schedule(24)));
        mock.expect_energy_comparison()
            .withf(|mode: &Mode| *mode == Mode::Weekend)
            .times(1)
            .returning(|_| Ok(create_mock_energy_comparison()));

        let mut dash = dashboard(mock);
        dash.change_mode(Mode::Weekend);
        assert_eq!(dash.view().mode(), &Mode::Weekend);
        dash.settle().await;
        assert_eq!(dash.display().schedule_rows.len(), 12);
    }

    #[tokio::test]
    async fn test_mode_change_touches_only_mode_dependent_resources() {
        let mut mock = MockGateway::new();
        expect_initial_load(&mut mock);
        // A second round of schedule/energy, nothing else.
        mock.expect_schedule().times(1).returning(|_| Ok(create_mock_schedule(8)));
        mock.expect_energy_comparison().times(1).returning(|_| Ok(create_mock_energy_comparison()));

        let mut dash = dashboard(mock);
        dash.start();
        dash.settle().await;
        let metrics_before = dash.display().energy_current.clone();
        let zones_before = dash.display().zone_cards.clone();

        dash.change_mode(Mode::Eco);
        assert_eq!(dash.pending(), 2);
        dash.settle().await;

        assert_eq!(dash.display().schedule_rows.len(), 4);
        assert_eq!(dash.display().energy_current, metrics_before);
        assert_eq!(dash.display().zone_cards, zones_before);
    }

    #[tokio::test]
    async fn test_analytics_loaded_only_on_analytics_tab() {
        let mut mock = MockGateway::new();
        mock.expect_feature_importance().times(2).returning(|| Ok(create_mock_features()));

        let mut dash = dashboard(mock);
        dash.switch_tab(Tab::Schedule);
        dash.switch_tab(Tab::Zones);
        assert_eq!(dash.pending(), 0);
        assert!(!dash.charts().contains(ChartKey::SavingsBreakdown));

        dash.switch_tab(Tab::Analytics);
        assert_eq!(dash.pending(), 1);
        dash.settle().await;
        assert!(dash.charts().contains(ChartKey::FeatureImportance));
        assert!(dash.charts().contains(ChartKey::SavingsBreakdown));
        assert!(dash.charts().contains(ChartKey::WeeklyTrend));

        // Re-entering reloads and replaces, never stacks.
        dash.switch_tab(Tab::Overview);
        dash.switch_tab(Tab::Analytics);
        dash.settle().await;
        assert_eq!(dash.charts().live_count(), 3);
        assert_eq!(dash.charts().destroyed_total(), 3);
    }

    #[test]
    fn test_feature_response_skipped_without_region() {
        let mut dash = dashboard(MockGateway::new());
        dash.apply(Update::Features(Ok(create_mock_features())));
        assert!(!dash.charts().contains(ChartKey::FeatureImportance));
    }

    #[test]
    fn test_stale_schedule_is_discarded() {
        let mut dash = dashboard(MockGateway::new());
        let old = dash.view.issue(Resource::Schedule);
        let new = dash.view.issue(Resource::Schedule);

        dash.apply(Update::Schedule { generation: new, result: Ok(create_mock_schedule(4)) });
        dash.apply(Update::Schedule { generation: old, result: Ok(create_mock_schedule(24)) });

        assert_eq!(dash.display().schedule_rows.len(), 2);
        let chart = dash.charts().get(ChartKey::OccupancyTrend).unwrap();
        assert_eq!(chart.spec().datasets[0].values.len(), 4);
    }

    #[test]
    fn test_failed_schedule_keeps_previous_rows() {
        let mut dash = dashboard(MockGateway::new());
        let first = dash.view.issue(Resource::Schedule);
        dash.apply(Update::Schedule { generation: first, result: Ok(create_mock_schedule(24)) });

        let second = dash.view.issue(Resource::Schedule);
        dash.apply(Update::Schedule { generation: second, result: Err(create_mock_gateway_error()) });

        assert_eq!(dash.display().schedule_rows.len(), 12);
        assert_eq!(dash.charts().created_total(), 1);
    }

    #[test]
    fn test_failed_metrics_leave_placeholders() {
        let mut dash = dashboard(MockGateway::new());
        dash.apply(Update::DailyMetrics(Err(create_mock_gateway_error())));
        assert_eq!(dash.display().energy_current, crate::display::EMPTY_FIELD);
    }

    #[tokio::test]
    async fn test_retrain_busy_state_and_accuracy() {
        let mut mock = MockGateway::new();
        mock.expect_trigger_retrain().times(1).returning(|| {
            Ok(RetrainResult {
                status: Some("success".to_string()),
                message: Some("Model retrained".to_string()),
                metrics: Some(RetrainMetrics { accuracy: 0.9123, mse: None, mae: None, r2: None }),
            })
        });

        let mut dash = dashboard(mock);
        assert!(dash.trigger_retrain());
        assert!(!dash.display().retrain_button.enabled);
        assert_eq!(dash.display().retrain_button.label, RETRAIN_BUSY_LABEL);
        // Non-interactive while busy.
        assert!(!dash.trigger_retrain());
        assert_eq!(dash.pending(), 1);

        dash.settle().await;
        assert!(dash.display().retrain_button.enabled);
        assert_eq!(dash.display().retrain_button.label, RETRAIN_LABEL);
        assert_eq!(dash.display().ml_accuracy, "91.2%");
        let modal = dash.display().modal.as_ref().unwrap();
        assert_eq!(modal.lines, vec!["New Accuracy: 91.2%".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_retrain_restores_control_without_modal() {
        let mut mock = MockGateway::new();
        mock.expect_trigger_retrain().times(1).returning(|| Err(create_mock_gateway_error()));

        let mut dash = dashboard(mock);
        dash.trigger_retrain();
        dash.settle().await;
        assert!(dash.display().retrain_button.enabled);
        assert!(dash.display().modal.is_none());
        assert_eq!(dash.display().ml_accuracy, crate::display::EMPTY_FIELD);
    }

    #[tokio::test]
    async fn test_simulation_success_opens_modal() {
        let mut mock = MockGateway::new();
        mock.expect_run_simulation()
            .withf(|ctx: &SimulationContext| ctx.hour == 9 && ctx.day_of_week == 1)
            .times(1)
            .returning(|_| {
                Ok(SimulationResult {
                    occupancy: 0.7,
                    hvac_mode: HvacMode::Full,
                    lights_mode: LightsMode::Full,
                    savings_percent: 0.0,
                    confidence: None,
                    hvac_power: None,
                    lights_power: None,
                    total_energy: None,
                })
            });

        let mut dash = dashboard(mock);
        dash.run_simulation_with(SimulationContext { hour: 9, day_of_week: 1, temperature: 23.0, humidity: 45.0 });
        dash.settle().await;
        let modal = dash.display().modal.as_ref().unwrap();
        assert_eq!(modal.title, "ML Prediction");
        assert_eq!(modal.lines[0], "- Occupancy: 70%");
        assert!(dash.dismiss_modal());
    }

    #[tokio::test]
    async fn test_simulation_failure_is_silent() {
        let mut mock = MockGateway::new();
        mock.expect_run_simulation().times(1).returning(|_| Err(create_mock_gateway_error()));

        let mut dash = dashboard(mock);
        dash.run_simulation();
        dash.settle().await;
        assert!(dash.display().modal.is_none());
    }

    #[tokio::test]
    async fn test_toggle_optimization_sends_flag() {
        let mut mock = MockGateway::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_set_optimization()
            .withf(|enabled: &bool| !*enabled)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        mock.expect_set_optimization()
            .withf(|enabled: &bool| *enabled)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut dash = dashboard(mock);
        assert!(dash.view().optimization_enabled);
        dash.toggle_optimization();
        assert!(!dash.view().optimization_enabled);
        dash.settle().await;
        dash.toggle_optimization();
        assert!(dash.view().optimization_enabled);
        dash.settle().await;
    }

    #[tokio::test]
    async fn test_cycle_mode_walks_configured_modes() {
        let mut mock = MockGateway::new();
        mock.expect_schedule().returning(|_| Ok(create_mock_schedule(2)));
        mock.expect_energy_comparison().returning(|_| Ok(create_mock_energy_comparison()));

        let mut dash = dashboard(mock);
        let expected = [Mode::Eco, Mode::Weekend, Mode::Peak, Mode::Normal];
        for mode in expected {
            dash.cycle_mode();
            assert_eq!(dash.view().mode(), &mode);
        }
        dash.settle().await;
    }

    #[test]
    fn test_simulation_context_ranges() {
        for _ in 0..100 {
            let ctx = current_simulation_context();
            assert!(ctx.hour < 24);
            assert!(ctx.day_of_week < 7);
            assert!((22.0..=26.0).contains(&ctx.temperature));
            assert!((40.0..=60.0).contains(&ctx.humidity));
        }
    }
}
