/*
 * Test utilities and fixtures for EcoSense
 *
 * Canned backend payloads shared by the unit test modules.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::gateway::{GatewayError, STATUS_PATH};
    use crate::model::{
        DailyMetrics, EnergyComparison, FeatureImportance, HvacMode, LightsMode, Room, ScheduleSlot,
        SimulationResult, StatusSummary,
    };

    pub fn create_mock_status() -> StatusSummary {
        StatusSummary {
            model_status: "trained".to_string(),
            model_accuracy: 87.5,
            training_samples: Some(1440),
            timestamp: Some("2025-01-06T09:00:00".to_string()),
        }
    }

    pub fn create_mock_daily_metrics() -> DailyMetrics {
        DailyMetrics {
            optimized_energy_kw: 5.8,
            co2_saved_kg: 5.6,
            occupancy_avg: 0.38,
            savings_percent: 6.7,
            total_energy_kwh: Some(139.2),
            baseline_kwh: Some(149.2),
            energy_saved_kwh: Some(10.0),
            cost_saved_rupees: Some(80.0),
            temperature_avg: Some(23.4),
        }
    }

    /// `n` consecutive slots; hours wrap at 24 and occupancy stays within 0.1..0.9.
    pub fn create_mock_schedule(n: usize) -> Vec<ScheduleSlot> {
        (0..n)
            .map(|i| {
                let hour = (i % 24) as u8;
                let occupancy = 0.1 + 0.8 * ((i * 7) % 11) as f64 / 10.0;
                let (hvac_mode, lights_mode) = if occupancy < 0.2 {
                    (HvacMode::Off, LightsMode::Off)
                } else if occupancy < 0.5 {
                    (HvacMode::Eco, LightsMode::Dim)
                } else {
                    (HvacMode::Full, LightsMode::Full)
                };
                ScheduleSlot {
                    time_slot: format!("{:02}:00 - {:02}:00", hour, (hour + 1) % 24),
                    hour,
                    predicted_occupancy: occupancy,
                    hvac_mode,
                    lights_mode,
                    total_energy_kw: 2.0 + occupancy * 5.0,
                    savings_percent: ((1.0 - occupancy) * 20.0).round(),
                    hvac_power: None,
                    lights_power: None,
                }
            })
            .collect()
    }

    pub fn create_mock_energy_comparison() -> EnergyComparison {
        EnergyComparison {
            baseline_24h: (0..24).map(|h| if (9..18).contains(&h) { 7.0 } else { 4.0 }).collect(),
            optimized_24h: (0..24).map(|h| if (9..18).contains(&h) { 6.2 } else { 3.1 }).collect(),
            comparison: None,
        }
    }

    pub fn create_mock_room(name: &str, temperature: f64, occupancy: f64) -> Room {
        Room {
            id: None,
            name: name.to_string(),
            occupancy,
            temperature,
            hvac: "ECO".to_string(),
        }
    }

    /// Six rooms covering every zone class.
    pub fn create_mock_rooms() -> Vec<Room> {
        vec![
            create_mock_room("Conference A", 18.5, 0.5),
            create_mock_room("Conference B", 21.0, 0.05),
            create_mock_room("Open Office", 22.0, 0.65),
            create_mock_room("Server Room", 26.0, 0.1),
            create_mock_room("Lobby", 23.0, 0.3),
            create_mock_room("Cafeteria", 22.5, 0.0),
        ]
    }

    pub fn create_mock_features() -> FeatureImportance {
        FeatureImportance(vec![
            ("hour".to_string(), 42.0),
            ("day_of_week".to_string(), 28.0),
            ("temperature".to_string(), 18.0),
            ("humidity".to_string(), 12.0),
        ])
    }

    pub fn create_mock_simulation_result() -> SimulationResult {
        SimulationResult {
            occupancy: 0.42,
            hvac_mode: HvacMode::Eco,
            lights_mode: LightsMode::Dim,
            savings_percent: 15.0,
            confidence: Some(0.91),
            hvac_power: None,
            lights_power: None,
            total_energy: None,
        }
    }

    pub fn create_mock_gateway_error() -> GatewayError {
        GatewayError::Status { path: STATUS_PATH.to_string(), status: 503 }
    }
}
