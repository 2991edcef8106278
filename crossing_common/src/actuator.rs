//! Actuator output flags for a single crossing.

use bitflags::bitflags;

bitflags! {
    /// Outputs driven by one crossing controller in one tick.
    ///
    /// The empty set is the fail-safe default: barrier up, lights dark, alarm silent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Actuators: u8 {
        /// Barrier lowered across the road.
        const BARRIER_DOWN = 0x01;
        /// Red road light.
        const RED_LIGHT    = 0x02;
        /// Yellow road light.
        const YELLOW_LIGHT = 0x04;
        /// Audible alarm.
        const ALARM        = 0x08;
    }
}

impl Default for Actuators {
    fn default() -> Self {
        Self::empty()
    }
}

impl Actuators {
    #[inline]
    pub const fn barrier_down(self) -> bool {
        self.contains(Self::BARRIER_DOWN)
    }

    #[inline]
    pub const fn red_light(self) -> bool {
        self.contains(Self::RED_LIGHT)
    }

    #[inline]
    pub const fn yellow_light(self) -> bool {
        self.contains(Self::YELLOW_LIGHT)
    }

    #[inline]
    pub const fn alarm_sound(self) -> bool {
        self.contains(Self::ALARM)
    }
}
