//! Tick-driven traffic simulation engine.
//!
//! A [`Simulation`](simulation_engine::simulation::Simulation) owns a set of
//! junctions; each junction gates its entering lanes with a pluggable
//! admission predicate, and lanes form a directed graph of FIFO queues that
//! vehicles move through one tick at a time. A run produces a chronological
//! [`SimulationReport`](simulation_engine::report::SimulationReport) of every
//! movement.

pub mod control_system;
pub mod simulation_engine;

pub use control_system::signals::AlternatingSignal;
pub use simulation_engine::directions::Direction;
pub use simulation_engine::junctions::{Junction, ProceedFn};
pub use simulation_engine::lanes::{FifoLane, Lane, LaneRef};
pub use simulation_engine::report::{SimulationReport, VehicleMovement};
pub use simulation_engine::simulation::Simulation;
pub use simulation_engine::vehicles::{DefaultVehicle, Vehicle, VehicleFactory};
