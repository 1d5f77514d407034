//! Exercises the pipeline end to end with an in-memory reader/writer
//! instead of real XML/GML I/O, which this crate leaves to the host.

use std::path::{Path, PathBuf};

use roadspaces_citygml::citygml::CityModel;
use roadspaces_citygml::config::Configuration;
use roadspaces_citygml::opendrive::geometry::{GeometryRecord, GeometryShape};
use roadspaces_citygml::opendrive::lane::{Lane, LaneSection, LaneType, Width};
use roadspaces_citygml::opendrive::road::{Link, Road, TrafficRule};
use roadspaces_citygml::opendrive::OpenDriveModel;
use roadspaces_citygml::pipeline::{process_file, CityGmlWriter, NeverCancelled, OpenDriveReader, ReadError, WriteError};

use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

/// Stands in for a real OpenDRIVE parser: always returns the same
/// one-lane, ten-metre straight road.
struct FixedReader;

impl OpenDriveReader for FixedReader {
    fn read(&self, _path: &Path) -> Result<OpenDriveModel, ReadError> {
        let road = Road {
            id: "1".to_string(),
            name: None,
            length: Length::new::<meter>(10.0),
            junction: None,
            rule: TrafficRule::RightHandTraffic,
            link: Link::default(),
            plan_view: vec![GeometryRecord {
                s: Length::new::<meter>(0.0),
                x: Length::new::<meter>(0.0),
                y: Length::new::<meter>(0.0),
                hdg: Angle::new::<radian>(0.0),
                length: Length::new::<meter>(10.0),
                shape: GeometryShape::Line,
            }],
            elevation_profile: None,
            lateral_profile: None,
            lane_offset: Vec::new(),
            lane_section: vec![LaneSection {
                s: Length::new::<meter>(0.0),
                single_side: false,
                left: Vec::new(),
                center: Lane {
                    id: 0,
                    lane_type: LaneType::None,
                    level: false,
                    predecessor: None,
                    successor: None,
                    width: Vec::new(),
                    road_mark: Vec::new(),
                },
                right: vec![Lane {
                    id: -1,
                    lane_type: LaneType::Driving,
                    level: false,
                    predecessor: None,
                    successor: None,
                    width: vec![Width {
                        s_offset: Length::new::<meter>(0.0),
                        a: 3.5,
                        b: 0.0,
                        c: 0.0,
                        d: 0.0,
                    }],
                    road_mark: Vec::new(),
                }],
            }],
            object: Vec::new(),
            signal: Vec::new(),
        };
        Ok(OpenDriveModel {
            header: None,
            road: vec![road],
            junction: Vec::new(),
        })
    }
}

/// Stands in for a real CityGML writer: reports the feature counts it
/// would have serialised instead of writing bytes anywhere.
struct PrintingWriter;

impl CityGmlWriter for PrintingWriter {
    fn write(&self, model: &CityModel, target: &Path) -> Result<PathBuf, WriteError> {
        for road in &model.roads {
            println!(
                "road {}: {} traffic space(s), {} auxiliary, {} marking(s), {} object(s)",
                road.id,
                road.traffic_spaces.len(),
                road.auxiliary_traffic_spaces.len(),
                road.markings.len(),
                road.road_objects.len(),
            );
        }
        Ok(target.to_path_buf())
    }
}

fn main() {
    let report = process_file(
        Path::new("demo.xodr"),
        Path::new("demo.gml"),
        &FixedReader,
        &PrintingWriter,
        &Configuration::default(),
        &NeverCancelled,
    );

    println!("{:?}: {} message(s)", report.outcome, report.messages.len());
}
