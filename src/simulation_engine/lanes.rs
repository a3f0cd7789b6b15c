use crate::simulation_engine::directions::Direction;
use crate::simulation_engine::vehicles::Vehicle;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Shared handle to a lane. Junctions hold entering lanes through this, and
/// lanes hold their destination edges through it, so one lane can be entered
/// from several junctions and fed by several sources.
pub type LaneRef = Rc<RefCell<dyn Lane>>;

/// A lane on a road, which can release and (optionally) receive traffic.
///
/// Implementations decide the queueing discipline; [`FifoLane`] is the
/// standard first-in first-out variant.
pub trait Lane {
    /// Pops the longest-waiting vehicle, or `None` if the lane is empty.
    fn get_departure(&mut self) -> Option<Box<dyn Vehicle>>;

    /// Pushes an arriving vehicle to the back of the queue.
    fn give_arrival(&mut self, vehicle: Box<dyn Vehicle>);

    /// Seeds the queue before a simulation starts.
    fn add_initial_vehicles(&mut self, vehicles: Vec<Box<dyn Vehicle>>);

    /// Number of vehicles currently waiting in this lane.
    fn queue_size(&self) -> usize;

    /// Whether this is a turn lane.
    fn is_turn_lane(&self) -> bool;

    /// The direction this lane permits traffic.
    fn direction(&self) -> Direction;

    /// The lanes this lane feeds into, in insertion order.
    fn destination_lanes(&self) -> &[LaneRef];

    /// Appends outbound edges. Duplicates are allowed and no cycle check is
    /// performed; wiring happens before the simulation starts.
    fn add_destination(&mut self, lanes: &[LaneRef]);

    /// Does the lane point to at least one receiving lane? A lane without a
    /// destination can receive traffic but never releases any.
    fn has_destination(&self) -> bool;

    /// The lane's identifier.
    fn identify(&self) -> &str;
}

/// A standard first-in first-out lane.
pub struct FifoLane {
    name: String,
    direction: Direction,
    turn_lane: bool,
    queue: VecDeque<Box<dyn Vehicle>>,
    destinations: Vec<LaneRef>,
}

impl FifoLane {
    /// Creates a new FIFO lane.
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            turn_lane: false,
            queue: VecDeque::new(),
            destinations: Vec::new(),
        }
    }

    /// Creates a new FIFO turn lane.
    pub fn new_turn_lane(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            turn_lane: true,
            ..Self::new(name, direction)
        }
    }

    /// Creates a FIFO lane already wrapped in a [`LaneRef`], ready to be
    /// wired into a topology.
    pub fn create(name: impl Into<String>, direction: Direction) -> LaneRef {
        Rc::new(RefCell::new(Self::new(name, direction)))
    }

    /// Turn-lane counterpart of [`FifoLane::create`].
    pub fn create_turn_lane(name: impl Into<String>, direction: Direction) -> LaneRef {
        Rc::new(RefCell::new(Self::new_turn_lane(name, direction)))
    }
}

impl Lane for FifoLane {
    fn get_departure(&mut self) -> Option<Box<dyn Vehicle>> {
        self.queue.pop_front()
    }

    fn give_arrival(&mut self, vehicle: Box<dyn Vehicle>) {
        self.queue.push_back(vehicle);
    }

    fn add_initial_vehicles(&mut self, vehicles: Vec<Box<dyn Vehicle>>) {
        for vehicle in vehicles {
            self.queue.push_back(vehicle);
        }
    }

    fn queue_size(&self) -> usize {
        self.queue.len()
    }

    fn is_turn_lane(&self) -> bool {
        self.turn_lane
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn destination_lanes(&self) -> &[LaneRef] {
        &self.destinations
    }

    fn add_destination(&mut self, lanes: &[LaneRef]) {
        for lane in lanes {
            self.destinations.push(Rc::clone(lane));
        }
    }

    fn has_destination(&self) -> bool {
        !self.destinations.is_empty()
    }

    fn identify(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation_engine::vehicles::VehicleFactory;

    #[test]
    fn departures_follow_arrival_order() {
        let mut factory = VehicleFactory::with_seed(7);
        let mut lane = FifoLane::new("northbound", Direction::N);
        lane.add_initial_vehicles(factory.make_vehicles(3));

        let first = lane.get_departure().unwrap();
        let second = lane.get_departure().unwrap();

        // Interleave an arrival; it must queue behind the remaining vehicle.
        lane.give_arrival(first);
        let third = lane.get_departure().unwrap();
        let fourth = lane.get_departure().unwrap();

        assert_eq!(second.identify(), 2);
        assert_eq!(third.identify(), 3);
        assert_eq!(fourth.identify(), 1);
        assert!(lane.get_departure().is_none());
    }

    #[test]
    fn empty_lane_yields_no_departure() {
        let mut lane = FifoLane::new("empty", Direction::E);
        assert_eq!(lane.queue_size(), 0);
        assert!(lane.get_departure().is_none());
    }

    #[test]
    fn queue_size_tracks_arrivals_and_departures() {
        let mut factory = VehicleFactory::with_seed(7);
        let mut lane = FifoLane::new("eastbound", Direction::E);
        lane.add_initial_vehicles(factory.make_vehicles(5));
        assert_eq!(lane.queue_size(), 5);

        lane.get_departure();
        assert_eq!(lane.queue_size(), 4);
    }

    #[test]
    fn destinations_keep_insertion_order_and_duplicates() {
        let a = FifoLane::create("a", Direction::N);
        let b = FifoLane::create("b", Direction::E);
        let mut lane = FifoLane::new("source", Direction::S);

        assert!(!lane.has_destination());
        lane.add_destination(&[Rc::clone(&a), Rc::clone(&b), Rc::clone(&a)]);

        assert!(lane.has_destination());
        let dests = lane.destination_lanes();
        assert_eq!(dests.len(), 3);
        assert!(Rc::ptr_eq(&dests[0], &a));
        assert!(Rc::ptr_eq(&dests[1], &b));
        assert!(Rc::ptr_eq(&dests[2], &a));
    }

    #[test]
    fn turn_lane_flag() {
        let plain = FifoLane::new("plain", Direction::W);
        let turn = FifoLane::new_turn_lane("turn", Direction::W);
        assert!(!plain.is_turn_lane());
        assert!(turn.is_turn_lane());
    }
}
