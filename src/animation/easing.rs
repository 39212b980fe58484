//! Easing curves mapping linear progress in [0, 1] to eased progress

use std::f32::consts::TAU;

/// Easing function applied to animation progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out
    Power1Out,
    /// Cubic ease-in
    Power2In,
    /// Cubic ease-out
    Power2Out,
    /// Decaying oscillation that overshoots and settles on 1
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// Elastic-out with amplitude 1 and period 0.5, used for tree growth
    pub const GROW: Easing = Easing::ElasticOut { amplitude: 1.0, period: 0.5 };

    /// Evaluate at progress `t`; input is clamped to [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::Power2In => t * t * t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::ElasticOut { amplitude, period } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let amplitude = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let shift = period / TAU * (1.0 / amplitude).asin();
                amplitude * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power1Out,
        Easing::Power2In,
        Easing::Power2Out,
        Easing::GROW,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?}", easing);
        }
    }

    #[test]
    fn test_clamps_input() {
        for easing in ALL {
            assert_eq!(easing.apply(-1.0), easing.apply(0.0));
            assert_eq!(easing.apply(2.0), easing.apply(1.0));
        }
    }

    #[test]
    fn test_in_vs_out() {
        assert!(Easing::Power2In.apply(0.5) < 0.5);
        assert!(Easing::Power2Out.apply(0.5) > 0.5);
        assert!(Easing::Power1Out.apply(0.5) > 0.5);
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
    }

    #[test]
    fn test_elastic_overshoots() {
        let peak = (1..100)
            .map(|i| Easing::GROW.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
        assert!((Easing::GROW.apply(0.95) - 1.0).abs() < 0.01);
    }
}
