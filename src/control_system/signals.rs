use crate::simulation_engine::directions::Direction;
use crate::simulation_engine::junctions::ProceedFn;
use crate::simulation_engine::lanes::Lane;

/// Traffic signal that alternates between admitting north-south and
/// east-west traffic.
///
/// The phase advances on every evaluation. Because junctions evaluate their
/// predicate once per entering lane per tick, the phase moves per lane
/// examined, not per tick (see [`ProceedFn`]).
pub struct AlternatingSignal {
    north_south: bool,
}

impl AlternatingSignal {
    /// Creates a signal; `north_south` picks the phase used for the first
    /// evaluation.
    pub fn new(north_south: bool) -> Self {
        Self { north_south }
    }

    /// Evaluates the signal for one lane and advances the phase.
    pub fn proceed(&mut self, lane: &dyn Lane) -> bool {
        let north_south = self.north_south;
        self.north_south = !self.north_south;
        if north_south {
            matches!(lane.direction(), Direction::N | Direction::S)
        } else {
            matches!(lane.direction(), Direction::E | Direction::W)
        }
    }

    /// Converts the signal into an admission predicate for a junction,
    /// moving the phase state into the closure.
    pub fn into_proceed(mut self) -> ProceedFn {
        Box::new(move |lane| self.proceed(lane))
    }
}
