//! Property-based testing for calendar bucketing invariants
//!
//! This module provides property test generators and invariant
//! verification for the period calculator and the bucket generator.

pub mod calendar_invariants;
