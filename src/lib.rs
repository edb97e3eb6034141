// Do this because numerics calls for a lot of non-standard names
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]
pub mod antenna;
pub mod cache;
pub mod closed_form;
pub mod complex_vec;
pub mod config;
pub mod current;
pub mod cut;
pub mod engine;
pub mod error;
pub mod gain;
pub mod geodesic_polyhedron;
pub mod geometry;
pub mod helper;
pub mod helper_traits;
pub mod integrator;
pub mod logging;
pub mod mesh;
