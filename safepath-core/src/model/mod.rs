pub mod dataset;
pub mod map;
pub mod network;
pub mod optimization;
pub mod termination;
