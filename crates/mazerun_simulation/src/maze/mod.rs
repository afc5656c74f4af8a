//! Maze Graph Generator
//!
//! Логический граф лабиринта (клетки + стены). Геометрия уровня строится
//! поверх него в `crate::level`.

pub mod generator;

#[cfg(test)]
mod generator_tests;

pub use generator::{Direction, MazeCell, MazeGraph, Walls};
