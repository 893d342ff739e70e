/// The three independent preference sliders shown next to the context
/// panel. Plain numeric controls in `[0.0, 1.0]`; nothing observes them and
/// they observe nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PreferenceSliders {
    time_constraint: f64,
    risk: f64,
    importance: f64,
}

impl PreferenceSliders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn time_constraint(&self) -> f64 {
        self.time_constraint
    }

    #[must_use]
    pub fn risk(&self) -> f64 {
        self.risk
    }

    #[must_use]
    pub fn importance(&self) -> f64 {
        self.importance
    }

    pub fn set_time_constraint(&mut self, value: f64) {
        self.time_constraint = value.clamp(0.0, 1.0);
    }

    pub fn set_risk(&mut self, value: f64) {
        self.risk = value.clamp(0.0, 1.0);
    }

    pub fn set_importance(&mut self, value: f64) {
        self.importance = value.clamp(0.0, 1.0);
    }
}
