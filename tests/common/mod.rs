#![allow(dead_code)]

use network_distance::input::{load_matrix, Format, InputOptions};
use network_distance::WeightMatrix;
use ndarray::Array2;

pub const SAMPLE_DISTANCE: f64 = 2.120263536200091;

pub fn load_graph(graph_file: &str, absent_weight: f64) -> WeightMatrix {
    let options = InputOptions {
        format: Format::Gml,
        absent_weight,
    };
    load_matrix(graph_file, options).unwrap()
}

pub fn matrix(rows: &[&[f64]]) -> WeightMatrix {
    WeightMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

/// A weight matrix of `n` nodes filled row by row from `weights`.
pub fn square(n: usize, weights: Vec<f64>) -> WeightMatrix {
    WeightMatrix::new(Array2::from_shape_vec((n, n), weights).unwrap()).unwrap()
}

pub fn sample_x() -> WeightMatrix {
    matrix(&[&[2.0, 4.0, 8.0], &[5.0, 6.0, 3.0], &[10.0, 3.0, 6.0]])
}

pub fn sample_y() -> WeightMatrix {
    matrix(&[&[7.0, 6.0, 3.0], &[9.0, 2.0, 9.0], &[10.0, 2.0, 3.0]])
}
