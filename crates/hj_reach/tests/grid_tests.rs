// crates/hj_reach/tests/grid_tests.rs

//! 网格构造与初始值函数的集成测试

use hj_reach::prelude::*;
use ndarray::array;
use std::f64::consts::TAU;

#[test]
fn test_three_by_three_coordinates() {
    let domain = BoxSet::new(vec![-1.0, -1.0], vec![1.0, 1.0]).unwrap();
    let grid = Grid::from_lattice_parameters_and_boundary_conditions(domain, &[3, 3], &[]).unwrap();
    assert_eq!(grid.coordinate_vectors()[0], array![-1.0, 0.0, 1.0]);
    assert_eq!(grid.coordinate_vectors()[1], array![-1.0, 0.0, 1.0]);
    assert_eq!(grid.states().dim(), (9, 2));
}

#[test]
fn test_air3d_scenario_grid() {
    let domain = BoxSet::new(vec![-6.0, -10.0, 0.0], vec![20.0, 10.0, TAU]).unwrap();
    let grid =
        Grid::from_lattice_parameters_and_boundary_conditions(domain, &[51, 40, 50], &[2]).unwrap();

    assert_eq!(grid.shape(), &[51, 40, 50]);
    assert_eq!(grid.len(), 51 * 40 * 50);
    assert!((grid.spacings()[0] - 26.0 / 50.0).abs() < 1e-12);
    assert!((grid.spacings()[1] - 20.0 / 39.0).abs() < 1e-12);
    assert!((grid.spacings()[2] - TAU / 50.0).abs() < 1e-12);

    // 非周期轴包含上界，周期轴不包含
    assert_eq!(grid.coordinate_vectors()[0][50], 20.0);
    assert_eq!(grid.coordinate_vectors()[1][39], 10.0);
    let last_heading = grid.coordinate_vectors()[2][49];
    assert!((last_heading - TAU * 49.0 / 50.0).abs() < 1e-12);
    assert_eq!(grid.periodic_dims(), vec![2]);
}

#[test]
fn test_initial_values_match_grid() {
    let domain = BoxSet::new(vec![-6.0, -10.0, 0.0], vec![20.0, 10.0, TAU]).unwrap();
    let grid =
        Grid::from_lattice_parameters_and_boundary_conditions(domain, &[14, 11, 8], &[2]).unwrap();
    let values = shapes::cylinder(&grid, &[2], &[0.0, 0.0, 0.0], 5.0).unwrap();
    assert_eq!(values.shape(), grid.shape());

    let by_hand = grid.map_states(|s| (s[0] * s[0] + s[1] * s[1]).sqrt() - 5.0);
    for (a, b) in values.iter().zip(by_hand.iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}
