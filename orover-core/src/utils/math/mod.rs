//! Math utilities for the oRover actor.
//!
//! This module provides the linear mapping from command percentages to motor
//! driver magnitudes.

pub mod scale;
