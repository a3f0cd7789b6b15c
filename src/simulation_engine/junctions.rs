use crate::simulation_engine::lanes::{Lane, LaneRef};

use std::rc::Rc;

/// Admission predicate deciding whether a lane may release traffic.
///
/// Called once per entering lane per tick, in lane insertion order — not once
/// per tick for the whole junction. A stateful predicate (such as an
/// alternating signal) therefore advances once per lane examined, so the
/// admitted directions can change within a single tick. That per-call
/// granularity is the contract.
pub type ProceedFn = Box<dyn FnMut(&dyn Lane) -> bool>;

/// A junction of multiple entering lanes, governed by one admission policy.
pub struct Junction {
    identifier: String,
    entering_lanes: Vec<LaneRef>,
    proceed: ProceedFn,
}

impl Junction {
    /// Creates a junction with its admission predicate.
    pub fn new(identifier: impl Into<String>, proceed: impl FnMut(&dyn Lane) -> bool + 'static) -> Self {
        Self {
            identifier: identifier.into(),
            entering_lanes: Vec::new(),
            proceed: Box::new(proceed),
        }
    }

    /// Appends entering lanes. Lanes are examined each tick in the order they
    /// were added; there is no removal.
    pub fn add_entering_lanes(&mut self, lanes: &[LaneRef]) {
        for lane in lanes {
            self.entering_lanes.push(Rc::clone(lane));
        }
    }

    /// The lanes entering this junction, in insertion order.
    pub fn entering_lanes(&self) -> &[LaneRef] {
        &self.entering_lanes
    }

    /// Evaluates the admission predicate for one lane.
    pub fn proceed(&mut self, lane: &dyn Lane) -> bool {
        (self.proceed)(lane)
    }

    /// The junction's identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}
