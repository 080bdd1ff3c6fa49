pub mod simulation;
pub mod configuration;
pub mod sampling;
pub mod visualization;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Frame, NVec2, Particle, Recording, Segment, World};
pub use simulation::params::Parameters;
pub use simulation::stepper::{EulerStepper, WorldStep};
pub use simulation::scenario::Scenario;
pub use simulation::scheduler::{phase_ticks, run, simulate, Phase};

pub use configuration::config::{ImageConfig, OutputConfig, ParametersConfig, SimConfig, WorldConfig};

pub use sampling::sampler::{load_image, pixelate, sample_grid, PixelSample};

pub use error::SimError;

pub use visualization::frame_png::write_frames;

pub use benchmark::benchmark::{bench_full_run, bench_step};
