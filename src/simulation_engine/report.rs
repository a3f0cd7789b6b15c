use crate::simulation_engine::directions::Direction;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

/// A record of one vehicle's movement in one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleMovement {
    pub tick: usize,
    pub vehicle: u64,
    pub junction: String,
    pub from_lane: String,
    pub from_direction: Direction,
    pub to_lane: String,
    pub to_direction: Direction,
}

impl fmt::Display for VehicleMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Vehicle {} in '{}' :: lane '{}' ({}) => '{}' ({})",
            self.tick,
            self.vehicle,
            self.junction,
            self.from_lane,
            self.from_direction,
            self.to_lane,
            self.to_direction,
        )
    }
}

/// Chronological, append-only log of vehicle movements produced by one
/// simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationReport {
    movements: Vec<VehicleMovement>,
}

impl SimulationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, movement: VehicleMovement) {
        self.movements.push(movement);
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn movements(&self) -> &[VehicleMovement] {
        &self.movements
    }

    pub fn iter(&self) -> impl Iterator<Item = &VehicleMovement> {
        self.movements.iter()
    }

    /// Writes the report to a text sink, one line per movement.
    ///
    /// Takes the sink by value so it is closed when writing finishes; the
    /// first write error aborts the remaining output and is returned.
    pub fn write_to<W: Write>(&self, mut sink: W) -> io::Result<()> {
        for movement in &self.movements {
            writeln!(sink, "{movement}")?;
        }
        sink.flush()
    }

    /// Writes the report as CSV, one record per movement, headers included.
    pub fn write_csv<W: Write>(&self, sink: W) -> csv::Result<()> {
        let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(sink);
        for movement in &self.movements {
            wtr.serialize(movement)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Renders the report as a JSON array of movement records.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a SimulationReport {
    type Item = &'a VehicleMovement;
    type IntoIter = std::slice::Iter<'a, VehicleMovement>;

    fn into_iter(self) -> Self::IntoIter {
        self.movements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement() -> VehicleMovement {
        VehicleMovement {
            tick: 3,
            vehicle: 17,
            junction: "four-way".to_string(),
            from_lane: "eastbound in".to_string(),
            from_direction: Direction::E,
            to_lane: "northbound out".to_string(),
            to_direction: Direction::N,
        }
    }

    #[test]
    fn line_format_matches_report_contract() {
        let line = movement().to_string();
        assert_eq!(
            line,
            "[3] Vehicle 17 in 'four-way' :: lane 'eastbound in' (East) => 'northbound out' (North)"
        );
    }

    #[test]
    fn write_to_emits_one_line_per_movement() {
        let mut report = SimulationReport::new();
        report.push(movement());
        report.push(movement());

        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.starts_with("[3] Vehicle 17")));
    }

    #[test]
    fn write_error_is_surfaced_and_aborts() {
        struct FailingSink {
            writes: usize,
        }

        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                self.writes += 1;
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut report = SimulationReport::new();
        report.push(movement());
        report.push(movement());

        let mut sink = FailingSink { writes: 0 };
        let err = report.write_to(&mut sink).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        // The loop must stop at the first failed line.
        assert_eq!(sink.writes, 1);
    }

    #[test]
    fn csv_has_header_and_rows() {
        let mut report = SimulationReport::new();
        report.push(movement());

        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "tick,vehicle,junction,from_lane,from_direction,to_lane,to_direction"
        );
        assert_eq!(
            lines.next().unwrap(),
            "3,17,four-way,eastbound in,E,northbound out,N"
        );
    }

    #[test]
    fn json_round_trips() {
        let mut report = SimulationReport::new();
        report.push(movement());

        let json = report.to_json().unwrap();
        let parsed: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.movements(), report.movements());
    }
}
