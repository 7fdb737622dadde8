use super::*;
use crate::helpers::models::*;
use crate::models::{EquipmentAttr, VesselAssignment, VesselAttr};
use std::sync::Arc;

fn create_test_solution() -> Solution {
    create_solution(
        test_vessel("v1", "jack-up", &[(VesselAttr::TransitSpeed, 10.), (VesselAttr::MaxHs, 3.)]),
        vec![test_equipment("e1", "piling", &[(EquipmentAttr::MaxHs, 2.5), (EquipmentAttr::MaxWs, 12.)])],
        test_port("p1", &[]),
    )
}

#[test]
fn can_estimate_operation_times() {
    let estimator = TabularDurations::new(vec![durations(
        12.,
        vec![sea_leg(30., Olc::new(2.8, 10., 0., 0.)), sea_leg(20., Olc::new(0., 0., 15., 1.))],
        185.2,
    )]);

    let times = estimator.estimate(0, &create_test_solution()).expect("estimated");

    assert_eq!(times.prep_time, 12.);
    assert_eq!(times.sea_time, 50.);
    assert_close!(times.transit_time, 10.);
    assert_eq!(times.leg_olcs, vec![Olc::new(2.5, 10., 12., 0.), Olc::new(2.5, 0., 12., 1.)]);
    assert_eq!(times.olc, Olc::new(2.5, 10., 12., 1.));
}

#[test]
fn can_use_slowest_vessel_for_transit() {
    let mut solution = create_test_solution();
    solution.vessels.push(VesselAssignment {
        vessel: Arc::new(test_vessel("v2", "tug", &[(VesselAttr::TransitSpeed, 5.)])),
        quantity: 1,
    });
    let estimator = TabularDurations::new(vec![durations(0., vec![], 185.2)]);

    let times = estimator.estimate(0, &solution).expect("estimated");

    assert_close!(times.transit_time, 20.);
}

#[test]
fn can_skip_transit_without_distance() {
    let solution = create_solution(test_vessel("v1", "tug", &[]), vec![], test_port("p1", &[]));
    let estimator = TabularDurations::new(vec![durations(5., vec![], 0.)]);

    let times = estimator.estimate(0, &solution).expect("estimated");

    assert_eq!(times.transit_time, 0.);
    assert!(times.olc.is_unrestricted());
}

#[test]
fn can_fail_on_missing_data() {
    let no_speed = create_solution(test_vessel("v1", "tug", &[]), vec![], test_port("p1", &[]));
    let estimator = TabularDurations::new(vec![durations(5., vec![], 100.)]);

    assert!(estimator.estimate(0, &no_speed).is_err());
    assert!(estimator.estimate(1, &create_test_solution()).is_err());
}
