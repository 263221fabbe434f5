// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Moon phase gate.
//!
//! The phase angle is sampled once per day. Angles within `half_width` of
//! the 0°/360° boundary are *bright*; everything strictly inside
//! `(half_width, 360° − half_width)` is *crescent*. Only crescent-phase moon
//! time is subtracted from Surya time.

use qtty::Degrees;

use crate::period::DayInterval;

const FULL_TURN: f64 = 360.0;

/// Phase regime of the moon for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    Crescent,
    Bright,
}

/// Classifies phase angles into [`MoonPhase`] regimes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseGate {
    /// Width of the bright window on each side of 0°/360°. Default: 30°.
    ///
    /// Meaningful values lie in `[0°, 180°]`: 0° makes every angle but 0°
    /// crescent, 180° makes none crescent.
    pub half_width: Degrees,
}

impl Default for PhaseGate {
    fn default() -> Self {
        Self {
            half_width: Degrees::new(30.0),
        }
    }
}

impl PhaseGate {
    /// A gate with the given half-width, clamped into `[0°, 180°]`.
    /// `NaN` falls back to 0°.
    pub fn new(half_width: Degrees) -> Self {
        let width = half_width.value().max(0.0).min(FULL_TURN / 2.0);
        Self {
            half_width: Degrees::new(width),
        }
    }

    /// `true` iff the angle lies strictly inside the crescent window.
    ///
    /// Angles outside `[0, 360)` are wrapped first. `NaN` is never crescent.
    ///
    /// ```
    /// use skyday::PhaseGate;
    /// use qtty::Degrees;
    ///
    /// let gate = PhaseGate::default();
    /// assert!(!gate.is_crescent(Degrees::new(30.0)));
    /// assert!(gate.is_crescent(Degrees::new(30.0001)));
    /// assert!(gate.is_crescent(Degrees::new(329.9999)));
    /// assert!(!gate.is_crescent(Degrees::new(330.0)));
    /// ```
    pub fn is_crescent(&self, phase: Degrees) -> bool {
        let theta = phase.value().rem_euclid(FULL_TURN);
        let width = self.half_width.value();
        theta > width && theta < FULL_TURN - width
    }

    pub fn classify(&self, phase: Degrees) -> MoonPhase {
        if self.is_crescent(phase) {
            MoonPhase::Crescent
        } else {
            MoonPhase::Bright
        }
    }

    /// The moon intervals if the phase is crescent, otherwise nothing.
    pub fn crescent_visible(&self, phase: Degrees, moon: &[DayInterval]) -> Vec<DayInterval> {
        match self.classify(phase) {
            MoonPhase::Crescent => moon.to_vec(),
            MoonPhase::Bright => Vec::new(),
        }
    }
}
