// demo_main.rs
use traffic_sim::simulation_engine::directions::Direction;
use traffic_sim::simulation_engine::junctions::Junction;
use traffic_sim::simulation_engine::lanes::{FifoLane, Lane, LaneRef};
use traffic_sim::simulation_engine::simulation::Simulation;
use traffic_sim::simulation_engine::vehicles::VehicleFactory;
use traffic_sim::AlternatingSignal;

use std::io;
use std::rc::Rc;

/// Simple intersection with one one-way input and three one-way outputs:
/// input from the south, outputs to the west, north and east.
fn simple_intersection() -> io::Result<()> {
    let input = FifoLane::create("northbound input", Direction::N);
    let output_north = FifoLane::create("northbound output", Direction::N);
    let output_west = FifoLane::create("westbound output", Direction::W);
    let output_east = FifoLane::create("eastbound output", Direction::E);

    input.borrow_mut().add_destination(&[
        Rc::clone(&output_north),
        Rc::clone(&output_west),
        Rc::clone(&output_east),
    ]);

    let mut factory = VehicleFactory::new();
    input
        .borrow_mut()
        .add_initial_vehicles(factory.make_vehicles(100));

    // The north input is the only input lane, always allow it to proceed.
    let mut junction = Junction::new("Simple Intersection", |lane: &dyn Lane| {
        lane.direction() == Direction::N
    });
    junction.add_entering_lanes(&[
        Rc::clone(&input),
        Rc::clone(&output_north),
        Rc::clone(&output_west),
        Rc::clone(&output_east),
    ]);

    let mut sim = Simulation::new("Simple intersection", 5, 5);
    sim.add_junctions([junction]);
    sim.run().write_to(io::stdout().lock())
}

/// Two-lane, four-way intersection with each lane permitting either straight
/// or turning traffic, governed by an alternating north-south / east-west
/// signal.
fn four_way_intersection() -> io::Result<()> {
    let eastbound_in_n = FifoLane::create("eastbound north", Direction::E);
    let eastbound_in_s = FifoLane::create("eastbound south", Direction::E);
    let eastbound_out_n = FifoLane::create("eastbound north", Direction::E);
    let eastbound_out_s = FifoLane::create("eastbound south", Direction::E);

    let westbound_in_n = FifoLane::create("westbound north", Direction::W);
    let westbound_in_s = FifoLane::create("westbound south", Direction::W);
    let westbound_out_n = FifoLane::create("westbound north", Direction::W);
    let westbound_out_s = FifoLane::create("westbound south", Direction::W);

    let northbound_in_e = FifoLane::create("northbound east", Direction::N);
    let northbound_in_w = FifoLane::create("northbound west", Direction::N);
    let northbound_out_e = FifoLane::create("northbound east", Direction::N);
    let northbound_out_w = FifoLane::create("northbound west", Direction::N);

    let southbound_in_e = FifoLane::create("southbound east", Direction::S);
    let southbound_in_w = FifoLane::create("southbound west", Direction::S);
    let southbound_out_e = FifoLane::create("southbound east", Direction::S);
    let southbound_out_w = FifoLane::create("southbound west", Direction::S);

    let incoming: Vec<LaneRef> = vec![
        Rc::clone(&eastbound_in_n),
        Rc::clone(&eastbound_in_s),
        Rc::clone(&westbound_in_n),
        Rc::clone(&westbound_in_s),
        Rc::clone(&northbound_in_e),
        Rc::clone(&northbound_in_w),
        Rc::clone(&southbound_in_e),
        Rc::clone(&southbound_in_w),
    ];

    // Link inbound lanes to outbound lanes.
    eastbound_in_n
        .borrow_mut()
        .add_destination(&[Rc::clone(&northbound_out_w), Rc::clone(&eastbound_out_n)]);
    eastbound_in_s
        .borrow_mut()
        .add_destination(&[Rc::clone(&eastbound_out_s), Rc::clone(&southbound_out_w)]);

    westbound_in_n
        .borrow_mut()
        .add_destination(&[Rc::clone(&westbound_out_n), Rc::clone(&northbound_out_e)]);
    westbound_in_s
        .borrow_mut()
        .add_destination(&[Rc::clone(&westbound_out_s), Rc::clone(&southbound_out_e)]);

    northbound_in_e
        .borrow_mut()
        .add_destination(&[Rc::clone(&northbound_out_e), Rc::clone(&eastbound_out_s)]);
    northbound_in_w
        .borrow_mut()
        .add_destination(&[Rc::clone(&northbound_out_w), Rc::clone(&westbound_out_s)]);

    southbound_in_e
        .borrow_mut()
        .add_destination(&[Rc::clone(&southbound_out_e), Rc::clone(&eastbound_out_n)]);
    southbound_in_w
        .borrow_mut()
        .add_destination(&[Rc::clone(&southbound_out_w), Rc::clone(&westbound_out_n)]);

    // Seed each incoming lane with a random number of vehicles.
    let mut factory = VehicleFactory::new();
    let max_per_lane = 15;
    for lane in &incoming {
        let n = factory.random_count(max_per_lane);
        lane.borrow_mut().add_initial_vehicles(factory.make_vehicles(n));
    }

    let signal = AlternatingSignal::new(false);
    let mut intersection = Junction::new("four-way", signal.into_proceed());
    intersection.add_entering_lanes(&incoming);

    let mut sim = Simulation::new("Four-way Intersection Simulation", 3, 10);
    sim.add_junctions([intersection]);
    sim.run().write_to(io::stdout().lock())
}

/// Straight single-lane eastbound road leading to an intersection, with a
/// turn lane added ahead of the turn.
fn turning_lane() -> io::Result<()> {
    let eastbound_pre_turn = FifoLane::create("eastbound, before turn lane", Direction::E);
    let eastbound_north_turn = FifoLane::create_turn_lane("eastbound, north turn lane", Direction::E);
    let eastbound_post_turn = FifoLane::create("eastbound, after turn lane", Direction::E);

    // Eastbound splits into the turn lane and the straight lane.
    eastbound_pre_turn.borrow_mut().add_destination(&[
        Rc::clone(&eastbound_north_turn),
        Rc::clone(&eastbound_post_turn),
    ]);

    // Turn lane junction always allows traffic through.
    let mut turn_lane_jxn = Junction::new("eastbound north turn lane", |_: &dyn Lane| true);
    turn_lane_jxn.add_entering_lanes(&[Rc::clone(&eastbound_pre_turn)]);

    let northbound = FifoLane::create("northbound", Direction::N);
    let eastbound_post_intersection =
        FifoLane::create("eastbound, after intersection", Direction::E);

    eastbound_north_turn
        .borrow_mut()
        .add_destination(&[Rc::clone(&northbound)]);
    eastbound_post_turn
        .borrow_mut()
        .add_destination(&[Rc::clone(&eastbound_post_intersection)]);

    let mut jxn = Junction::new("simple junction", |lane: &dyn Lane| {
        lane.direction() == Direction::E
    });
    jxn.add_entering_lanes(&[
        Rc::clone(&eastbound_north_turn),
        Rc::clone(&eastbound_post_turn),
    ]);

    let mut factory = VehicleFactory::new();
    eastbound_pre_turn
        .borrow_mut()
        .add_initial_vehicles(factory.make_vehicles(20));

    let mut sim = Simulation::new("Turn lane", 2, 10);
    sim.add_junctions([turn_lane_jxn, jxn]);
    sim.run().write_to(io::stdout().lock())
}

fn usage(demos: &[(&str, fn() -> io::Result<()>)]) {
    println!("usage: demo_main [demoname]");
    println!("demos available:");
    for (name, _) in demos {
        println!("    {name}");
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let demos: [(&str, fn() -> io::Result<()>); 3] = [
        ("intersection:simple", simple_intersection),
        ("intersection:fourway", four_way_intersection),
        ("turnlane:simple", turning_lane),
    ];

    let name = match std::env::args().nth(1) {
        Some(name) => name,
        None => {
            usage(&demos);
            return Ok(());
        }
    };

    match demos.iter().find(|(key, _)| *key == name) {
        Some((_, demo)) => demo(),
        None => {
            usage(&demos);
            Ok(())
        }
    }
}
