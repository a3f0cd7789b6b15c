use crate::simulation_engine::lanes::LaneRef;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::rc::Rc;

/// A vehicle in traffic.
///
/// The engine moves vehicles between lanes; implementations decide how a
/// vehicle picks its next lane when the topology offers a choice.
pub trait Vehicle {
    /// Records the vehicle's crossing of a junction.
    fn do_visit(&mut self, junction_id: &str);

    /// The vehicle's unique identity.
    fn identify(&self) -> u64;

    /// Picks one lane out of a non-empty set of candidate destination lanes.
    /// The returned lane must be a member of `candidates`.
    fn select_lane(&mut self, candidates: &[LaneRef]) -> LaneRef;

    /// Identifiers of the junctions this vehicle has crossed, in visit order.
    fn visited_junctions(&self) -> &[String];
}

/// The default [`Vehicle`] implementation: picks destination lanes uniformly
/// at random from the rng supplied by its [`VehicleFactory`].
pub struct DefaultVehicle {
    id: u64,
    junction_history: Vec<String>,
    rng: Rc<RefCell<SmallRng>>,
}

impl Vehicle for DefaultVehicle {
    fn do_visit(&mut self, junction_id: &str) {
        self.junction_history.push(junction_id.to_string());
    }

    fn identify(&self) -> u64 {
        self.id
    }

    fn select_lane(&mut self, candidates: &[LaneRef]) -> LaneRef {
        let i = self.rng.borrow_mut().random_range(0..candidates.len());
        Rc::clone(&candidates[i])
    }

    fn visited_junctions(&self) -> &[String] {
        &self.junction_history
    }
}

/// Creates vehicles with unique, monotonically increasing identities.
///
/// The factory owns the id counter, so identities are sequential per factory
/// and never reused. All vehicles from one factory share its rng; seeding the
/// factory makes a whole run reproducible.
pub struct VehicleFactory {
    next_id: u64,
    rng: Rc<RefCell<SmallRng>>,
}

impl VehicleFactory {
    /// Creates a factory seeded from the thread rng.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Creates a factory with a fixed seed for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            next_id: 1,
            rng: Rc::new(RefCell::new(rng)),
        }
    }

    /// Makes a batch of `n` default vehicles with fresh sequential identities
    /// and empty visit histories.
    pub fn make_vehicles(&mut self, n: usize) -> Vec<Box<dyn Vehicle>> {
        let mut all: Vec<Box<dyn Vehicle>> = Vec::with_capacity(n);
        for _ in 0..n {
            all.push(Box::new(DefaultVehicle {
                id: self.next_id,
                junction_history: Vec::new(),
                rng: Rc::clone(&self.rng),
            }));
            self.next_id += 1;
        }
        all
    }

    /// Random count in `0..=max`, drawn from the factory rng. Demos use this
    /// to vary how many vehicles seed each lane.
    pub fn random_count(&mut self, max: usize) -> usize {
        self.rng.borrow_mut().random_range(0..=max)
    }
}

impl Default for VehicleFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation_engine::directions::Direction;
    use crate::simulation_engine::lanes::FifoLane;

    #[test]
    fn factory_assigns_sequential_ids_across_batches() {
        let mut factory = VehicleFactory::with_seed(1);
        let first = factory.make_vehicles(3);
        let second = factory.make_vehicles(2);

        let ids: Vec<u64> = first
            .iter()
            .chain(second.iter())
            .map(|v| v.identify())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn visit_history_grows_in_order() {
        let mut factory = VehicleFactory::with_seed(1);
        let mut vehicle = factory.make_vehicles(1).remove(0);
        assert!(vehicle.visited_junctions().is_empty());

        vehicle.do_visit("first");
        vehicle.do_visit("second");
        vehicle.do_visit("first");

        assert_eq!(vehicle.visited_junctions(), ["first", "second", "first"]);
    }

    #[test]
    fn selected_lane_is_always_a_candidate() {
        let mut factory = VehicleFactory::with_seed(42);
        let mut vehicle = factory.make_vehicles(1).remove(0);
        let candidates = vec![
            FifoLane::create("a", Direction::N),
            FifoLane::create("b", Direction::E),
            FifoLane::create("c", Direction::S),
        ];

        for _ in 0..100 {
            let chosen = vehicle.select_lane(&candidates);
            assert!(candidates.iter().any(|c| Rc::ptr_eq(c, &chosen)));
        }
    }

    #[test]
    fn single_candidate_is_always_selected() {
        let mut factory = VehicleFactory::with_seed(42);
        let mut vehicle = factory.make_vehicles(1).remove(0);
        let only = FifoLane::create("only", Direction::W);

        let chosen = vehicle.select_lane(std::slice::from_ref(&only));
        assert!(Rc::ptr_eq(&chosen, &only));
    }
}
