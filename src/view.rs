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

use std::collections::{HashMap, HashSet};

use crate::model::Mode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Overview,
    Schedule,
    Zones,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Schedule, Tab::Zones, Tab::Analytics];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Schedule => "Schedule",
            Tab::Zones => "Zones",
            Tab::Analytics => "Analytics",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// Chart regions drawn inside this tab's content area.
    pub fn regions(&self) -> &'static [Region] {
        match self {
            Tab::Overview => &[Region::EnergyChart, Region::OccupancyChart],
            Tab::Schedule | Tab::Zones => &[],
            Tab::Analytics => &[Region::FeatureChart, Region::SavingsChart, Region::TrendChart],
        }
    }
}

/// Chart containers. Text, table and card regions always exist, so only
/// charts are tracked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    OccupancyChart,
    EnergyChart,
    FeatureChart,
    SavingsChart,
    TrendChart,
}

/// Backend resources whose responses depend on the selected mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Schedule,
    EnergyComparison,
}

/// Tag attached to a mode-dependent request when it is dispatched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

#[derive(Debug)]
pub struct ViewState {
    mode: Mode,
    active_tab: Tab,
    mounted: HashSet<Region>,
    issued: HashMap<Resource, Generation>,
    pub optimization_enabled: bool,
}

impl ViewState {
    pub fn new(mode: Mode) -> Self {
        let mut mounted: HashSet<Region> = HashSet::new();
        for tab in [Tab::Overview, Tab::Schedule, Tab::Zones] {
            mounted.extend(tab.regions().iter().copied());
        }
        Self {
            mode,
            active_tab: Tab::Overview,
            mounted,
            issued: HashMap::new(),
            optimization_enabled: true,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Deactivate every tab, then activate `tab` and mount its regions.
    pub fn activate(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.mounted.extend(tab.regions().iter().copied());
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active_tab == tab
    }

    pub fn is_mounted(&self, region: Region) -> bool {
        self.mounted.contains(&region)
    }

    /// Issue a fresh generation for `resource`; older in-flight ones become stale.
    pub fn issue(&mut self, resource: Resource) -> Generation {
        let next = Generation(self.latest(resource).0 + 1);
        self.issued.insert(resource, next);
        next
    }

    pub fn latest(&self, resource: Resource) -> Generation {
        self.issued.get(&resource).copied().unwrap_or_default()
    }

    pub fn is_current(&self, resource: Resource, generation: Generation) -> bool {
        self.latest(resource) == generation
    }
}
