//! CLI command implementations

pub mod params;
pub mod prime;
pub mod run;
