pub mod states;
pub mod params;
pub mod stepper;
pub mod scenario;
pub mod scheduler;
