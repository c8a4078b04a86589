pub mod collector;
pub mod kill;
pub mod platform;
pub mod process;
pub mod sample;
pub mod sampler;
pub mod snapshot;
