use crate::simulation_engine::junctions::Junction;
use crate::simulation_engine::lanes::LaneRef;
use crate::simulation_engine::report::{SimulationReport, VehicleMovement};

use log::{debug, info};

/// Runs a traffic simulation over one or more junctions.
///
/// Each tick the engine walks junctions in insertion order, and each
/// junction's entering lanes in insertion order. A lane releases vehicles
/// only when the junction's admission predicate allows it and the lane has
/// somewhere to send them, and never more than `vehicles_per_tick` in one
/// tick. Unused quota is forfeited, not carried over.
pub struct Simulation {
    name: String,
    junctions: Vec<Junction>,
    vehicles_per_tick: usize,
    ticks: usize,
}

impl Simulation {
    /// Creates a new simulation.
    pub fn new(name: impl Into<String>, vehicles_per_tick: usize, ticks: usize) -> Self {
        Self {
            name: name.into(),
            junctions: Vec::new(),
            vehicles_per_tick,
            ticks,
        }
    }

    /// Adds junctions to the simulation, processed each tick in the order
    /// they were added.
    pub fn add_junctions(&mut self, junctions: impl IntoIterator<Item = Junction>) {
        self.junctions.extend(junctions);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the simulation as configured and returns the movement log.
    ///
    /// The admission predicate is evaluated exactly once per entering lane
    /// per tick, before the destination check, so stateful predicates advance
    /// even for lanes that end up releasing nothing.
    pub fn run(&mut self) -> SimulationReport {
        info!(
            "running simulation '{}': {} ticks, {} vehicles per lane per tick",
            self.name, self.ticks, self.vehicles_per_tick
        );

        let mut report = SimulationReport::new();
        for tick in 0..self.ticks {
            for junction in &mut self.junctions {
                let entering: Vec<LaneRef> = junction.entering_lanes().to_vec();
                for lane in entering {
                    let admitted = junction.proceed(&*lane.borrow());
                    if !admitted || !lane.borrow().has_destination() {
                        continue;
                    }

                    for _ in 0..self.vehicles_per_tick {
                        let (mut vehicle, destinations) = {
                            let mut source = lane.borrow_mut();
                            match source.get_departure() {
                                Some(v) => (v, source.destination_lanes().to_vec()),
                                // Lane drained; the rest of its quota is forfeited.
                                None => break,
                            }
                        };

                        vehicle.do_visit(junction.identifier());
                        let target = vehicle.select_lane(&destinations);

                        let movement = {
                            let source = lane.borrow();
                            let dest = target.borrow();
                            VehicleMovement {
                                tick,
                                vehicle: vehicle.identify(),
                                junction: junction.identifier().to_string(),
                                from_lane: source.identify().to_string(),
                                from_direction: source.direction(),
                                to_lane: dest.identify().to_string(),
                                to_direction: dest.direction(),
                            }
                        };
                        target.borrow_mut().give_arrival(vehicle);

                        debug!("{movement}");
                        report.push(movement);
                    }
                }
            }
        }

        info!(
            "simulation '{}' finished: {} movements logged",
            self.name,
            report.len()
        );
        report
    }
}
