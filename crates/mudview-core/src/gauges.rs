//! Health, mana and energy gauges.

use crate::protocol::StatSnapshot;

/// Maximum assumed when the server omits it or sends zero.
pub const DEFAULT_GAUGE_MAX: i64 = 100;

/// One numeric gauge as last reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeReading {
    pub current: i64,
    pub max: i64,
}

impl GaugeReading {
    fn new(current: i64, max: Option<i64>) -> Self {
        let max = match max {
            Some(m) if m != 0 => m,
            _ => DEFAULT_GAUGE_MAX,
        };
        Self { current, max }
    }

    /// `"{current}/{max}"`
    pub fn text(&self) -> String {
        format!("{}/{}", self.current, self.max)
    }

    /// Fill as a percentage of max. Not clamped: overheal reads above 100.
    pub fn fill_percent(&self) -> f64 {
        self.current as f64 / self.max as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatGauges {
    pub health: Option<GaugeReading>,
    pub mana: Option<GaugeReading>,
    pub energy: Option<i64>,
}

impl StatGauges {
    /// Overwrites the gauges the snapshot carries; the rest stay as they were.
    pub fn apply(&mut self, snapshot: &StatSnapshot) {
        if let Some(hp) = snapshot.hp {
            self.health = Some(GaugeReading::new(hp, snapshot.max_hp));
        }
        if let Some(mp) = snapshot.mp {
            self.mana = Some(GaugeReading::new(mp, snapshot.max_mp));
        }
        if let Some(energy) = snapshot.energy {
            self.energy = Some(energy);
        }
    }

    /// Energy as shown in the status line, e.g. `"40%"`.
    pub fn energy_text(&self) -> Option<String> {
        self.energy.map(|e| format!("{e}%"))
    }
}
