use crate::collider::ItemId;
use crate::constants::{ANGLE_SPEED_DEAD_BAND, END_STOP_SLACK, MIN_ANGLE_SEPARATION};
use crate::events::{Event, EventSender};
use crate::math::Real;

/// Authored flipper parameters, as they come out of the table definition.
///
/// Angles are in degrees here; [`FlipperStatics::derive`] converts everything
/// into simulation units once at setup time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipperSettings {
    /// Radius of the round base of the arm.
    pub base_radius: Real,
    /// Radius of the round tip of the arm.
    pub end_radius: Real,
    /// Shortest authored center-to-center arm length.
    pub flipper_radius_min: Real,
    /// Longest authored center-to-center arm length.
    pub flipper_radius_max: Real,
    /// Rest angle in degrees.
    pub start_angle: Real,
    /// Fully stroked angle in degrees.
    pub end_angle: Real,
    /// Mass of the arm.
    pub mass: Real,
    /// Peak solenoid torque.
    pub strength: Real,
    /// Fraction of the strength pulling the arm back once released.
    pub return_ratio: Real,
    /// Torque multiplier applied inside the damping zone near the end angle.
    pub torque_damping: Real,
    /// Width of the damping zone in degrees.
    pub torque_damping_angle: Real,
    /// Time the coil takes to reach full torque; zero or less responds instantly.
    pub ramp_up_speed: Real,
}

impl Default for FlipperSettings {
    fn default() -> Self {
        FlipperSettings {
            base_radius: 21.5,
            end_radius: 13.0,
            flipper_radius_min: 0.0,
            flipper_radius_max: 130.0,
            start_angle: 121.0,
            end_angle: 70.0,
            mass: 1.0,
            strength: 2200.0,
            return_ratio: 0.058,
            torque_damping: 0.75,
            torque_damping_angle: 6.0,
            ramp_up_speed: 3.0,
        }
    }
}

/// Flipper parameters derived once at setup time, in radians and simulation units.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipperStatics {
    /// Radius of the round base of the arm.
    pub base_radius: Real,
    /// Radius of the round tip of the arm.
    pub end_radius: Real,
    /// Effective center-to-center arm length.
    pub flipper_radius: Real,
    /// Rest angle in radians.
    pub angle_start: Real,
    /// Fully stroked angle in radians.
    pub angle_end: Real,
    /// True when the stroke increases the angle.
    pub direction: bool,
    /// Rotational inertia of the arm around its base.
    pub inertia: Real,
    /// Peak solenoid torque.
    pub strength: Real,
    /// Fraction of the strength pulling the arm back once released.
    pub return_ratio: Real,
    /// Torque multiplier applied inside the damping zone near the end angle.
    pub torque_damping: Real,
    /// Width of the damping zone in radians.
    pub torque_damping_angle: Real,
    /// Time the coil takes to reach full torque; zero or less responds instantly.
    pub ramp_up_speed: Real,
}

impl FlipperStatics {
    /// Derives the simulation parameters from authored settings.
    ///
    /// `difficulty` in `[0, 1]` shortens the arm between the authored maximum
    /// and minimum radius; a degenerate authored range falls back to the
    /// maximum. Radii are floored so the swept shape never degenerates.
    pub fn derive(settings: &FlipperSettings, difficulty: Real) -> Self {
        let flipper_radius = if settings.flipper_radius_min > 0.0
            && settings.flipper_radius_max > settings.flipper_radius_min
        {
            settings.flipper_radius_max
                - (settings.flipper_radius_max - settings.flipper_radius_min) * difficulty
        } else {
            settings.flipper_radius_max
        };

        let end_radius = settings.end_radius.max(0.01);
        // the floor also keeps the face tilt angle solvable
        let flipper_radius = flipper_radius
            .max(settings.base_radius - settings.end_radius + 0.05)
            .max(0.01);

        let angle_start = settings.start_angle.to_radians();
        let mut angle_end = settings.end_angle.to_radians();
        if angle_end == angle_start {
            // otherwise the arm never sweeps anywhere
            angle_end += MIN_ANGLE_SEPARATION;
        }

        // inertia of a uniform rod of the arm's length, spun around its end
        let inertia = settings.mass * flipper_radius * flipper_radius * (1.0 / 3.0);

        FlipperStatics {
            base_radius: settings.base_radius,
            end_radius,
            flipper_radius,
            angle_start,
            angle_end,
            direction: angle_end >= angle_start,
            inertia,
            strength: settings.strength,
            return_ratio: settings.return_ratio,
            torque_damping: settings.torque_damping,
            torque_damping_angle: settings.torque_damping_angle.to_radians(),
            ramp_up_speed: settings.ramp_up_speed,
        }
    }
}

/// Live rotational state of a flipper arm.
#[derive(Clone, Debug)]
pub struct FlipperState {
    /// Current arm angle in radians.
    pub angle: Real,
    /// Current angular velocity.
    pub angle_speed: Real,
    /// Current angular momentum.
    pub angular_momentum: Real,
    /// Acceleration integrated last tick, for animation readback.
    pub angular_acceleration: Real,
    /// Drive torque after the coil ramp hysteresis.
    pub current_torque: Real,
    /// Torque the end stop absorbs while the arm rests against it.
    pub contact_torque: Real,
    /// Torque contributed by ball impacts since the last integration.
    pub impact_torque: Real,
    /// True while the arm rests against either end stop.
    pub is_in_contact: bool,
    /// Commanded coil state.
    pub solenoid: bool,
    // Pending stroke event: +1 fires end-of-stroke, -1 begin-of-stroke.
    enable_rotate_event: i8,
}

impl FlipperState {
    /// Initial state of an arm parked at its start angle.
    pub fn new(statics: &FlipperStatics) -> Self {
        FlipperState {
            angle: statics.angle_start,
            angle_speed: 0.0,
            angular_momentum: 0.0,
            angular_acceleration: 0.0,
            current_torque: 0.0,
            contact_torque: 0.0,
            impact_torque: 0.0,
            is_in_contact: false,
            solenoid: false,
            enable_rotate_event: 0,
        }
    }
}

/// A flipper arm: derived parameters plus live rotational state.
#[derive(Clone, Debug)]
pub struct Flipper {
    /// Parameters derived at setup time.
    pub statics: FlipperStatics,
    /// Live rotational state.
    pub state: FlipperState,
    /// The table item the arm belongs to, reported in stroke events.
    pub item: ItemId,
}

impl Flipper {
    /// Builds an arm parked at its start angle.
    pub fn new(item: ItemId, statics: FlipperStatics) -> Self {
        let state = FlipperState::new(&statics);
        Flipper {
            statics,
            state,
            item,
        }
    }

    /// Energizes or releases the solenoid coil.
    pub fn set_solenoid(&mut self, energized: bool) {
        if self.state.solenoid != energized {
            self.state.solenoid = energized;
            self.state.enable_rotate_event = if energized { 1 } else { -1 };
        }
    }

    /// Advances the arm by one tick and reports stroke events.
    ///
    /// Ball impacts resolved since the previous call are folded into the net
    /// torque here, so the pipeline runs collision resolution first and the
    /// integration afterwards.
    pub fn integrate(&mut self, d_time: Real, events: &EventSender) {
        self.update_velocities(d_time);
        self.update_displacements(d_time, events);
    }

    fn update_velocities(&mut self, d_time: Real) {
        let statics = &self.statics;
        let state = &mut self.state;

        let mut desired_torque = statics.strength;
        if !state.solenoid {
            // released, the return spring pulls the arm back
            desired_torque *= -statics.return_ratio;
        }

        // the hold coil is weaker near the end of the stroke
        let eos_angle = statics.torque_damping_angle;
        if (state.angle - statics.angle_end).abs() < eos_angle {
            // fade the damping in depending on the distance to the end stop
            let t = (state.angle - statics.angle_end).abs() / eos_angle;
            let lerp = t * t * t * t;
            desired_torque *= lerp + statics.torque_damping * (1.0 - lerp);
        }

        if !statics.direction {
            desired_torque = -desired_torque;
        }

        let ramp_up_speed = if statics.ramp_up_speed <= 0.0 {
            // instant coil response
            1.0e6
        } else {
            (statics.strength / statics.ramp_up_speed).min(1.0e6)
        };

        // track the desired torque linearly, a simple model for coil hysteresis
        state.current_torque = if state.current_torque < desired_torque {
            (state.current_torque + ramp_up_speed * d_time).min(desired_torque)
        } else {
            (state.current_torque - ramp_up_speed * d_time).max(desired_torque)
        };

        // resolve contact with the end stops
        let mut torque = state.current_torque;
        state.is_in_contact = false;
        state.contact_torque = 0.0;
        if state.angle_speed.abs() <= END_STOP_SLACK {
            let angle_min = statics.angle_start.min(statics.angle_end);
            let angle_max = statics.angle_start.max(statics.angle_end);

            if state.angle >= angle_max - END_STOP_SLACK && torque > 0.0 {
                state.angle = angle_max;
                state.is_in_contact = true;
                state.contact_torque = torque;
                state.angular_momentum = 0.0;
                torque = 0.0;
            } else if state.angle <= angle_min + END_STOP_SLACK && torque < 0.0 {
                state.angle = angle_min;
                state.is_in_contact = true;
                state.contact_torque = torque;
                state.angular_momentum = 0.0;
                torque = 0.0;
            }
        }

        // ball impacts from the last resolution pass enter the net torque here,
        // after the stop handling so a hit can knock the arm off its stop
        torque += state.impact_torque;
        state.impact_torque = 0.0;

        state.angular_momentum += torque * d_time;
        state.angle_speed = state.angular_momentum / statics.inertia;
        state.angular_acceleration = torque / statics.inertia;
    }

    fn update_displacements(&mut self, d_time: Real, events: &EventSender) {
        let statics = &self.statics;
        let state = &mut self.state;

        state.angle += state.angle_speed * d_time;

        let angle_min = statics.angle_start.min(statics.angle_end);
        let angle_max = statics.angle_start.max(statics.angle_end);
        state.angle = state.angle.clamp(angle_min, angle_max);

        if state.angle_speed.abs() < ANGLE_SPEED_DEAD_BAND {
            // avoids jittering balls resting on the arm
            return;
        }

        let hit_stop = (state.angle == angle_max && state.angle_speed > 0.0)
            || (state.angle == angle_min && state.angle_speed < 0.0);
        if !hit_stop {
            return;
        }

        // hosts read the arrival speed in degrees, like the authored angles
        let angle_speed = state.angle_speed.abs().to_degrees();
        state.angular_momentum = 0.0;
        state.angle_speed = 0.0;

        if state.enable_rotate_event > 0 {
            events.push(Event::stroke(self.item, true, angle_speed));
        } else if state.enable_rotate_event < 0 {
            events.push(Event::stroke(self.item, false, angle_speed));
        }
        state.enable_rotate_event = 0;
    }
}
