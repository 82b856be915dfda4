//! Share sacrifice model
//!
//! This crate estimates the effect of trading part of a monthly gross salary
//! for company shares across a year. It splits the salary according to a
//! reduction tier, converts the sacrificed cash into whole shares, and asks a
//! net salary lookup for the net pay of each month.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
