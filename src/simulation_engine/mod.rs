// simulation_engine/mod.rs
pub mod directions;
pub mod junctions;
pub mod lanes;
pub mod report;
pub mod simulation;
pub mod vehicles;
