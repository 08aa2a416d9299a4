use crate::coords::ColorRgba;
use crate::time::Rates;

/// Loop configuration.
///
/// Rates are given in Hz and go through the same normalization as the
/// runtime setters (`0` uncaps the frame phase and disables the fixed phase).
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub update_rate: f32,
    pub fixed_update_rate: f32,
    pub fluctuation_tolerance: f32,
    /// Color the surface is cleared with before every draw.
    pub clear_color: ColorRgba,
}

impl RuntimeConfig {
    pub(crate) fn rates(&self) -> Rates {
        let mut rates = Rates::default();
        rates.set_update_rate(self.update_rate);
        rates.set_fixed_update_rate(self.fixed_update_rate);
        rates.set_fluctuation_tolerance(self.fluctuation_tolerance);
        rates
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            update_rate: 1.0 / Rates::DEFAULT_FRAME_INTERVAL,
            fixed_update_rate: 1.0 / Rates::DEFAULT_FIXED_INTERVAL,
            fluctuation_tolerance: Rates::DEFAULT_FLUCTUATION_TOLERANCE,
            clear_color: ColorRgba::black(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_default_rates() {
        let rates = RuntimeConfig::default().rates();
        let defaults = Rates::default();
        assert!((rates.frame_interval() - defaults.frame_interval()).abs() < 1e-7);
        assert!((rates.fixed_interval() - defaults.fixed_interval()).abs() < 1e-7);
        assert_eq!(rates.fluctuation_tolerance(), defaults.fluctuation_tolerance());
    }

    #[test]
    fn config_values_are_normalized() {
        let config = RuntimeConfig {
            update_rate: 0.0,
            fixed_update_rate: -10.0,
            fluctuation_tolerance: -1.0,
            ..RuntimeConfig::default()
        };
        let rates = config.rates();
        assert_eq!(rates.frame_interval(), 0.0);
        assert!((rates.fixed_interval() - 0.1).abs() < 1e-7);
        assert_eq!(rates.fluctuation_tolerance(), 0.0);
    }
}
