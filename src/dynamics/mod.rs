//! Rotational dynamics of solenoid-driven flipper arms.

pub use self::flipper::{Flipper, FlipperSettings, FlipperState, FlipperStatics};
pub use self::set::{FlipperHandle, FlipperSet};

mod flipper;
mod set;
