use pixelfall::{load_image, simulate, write_frames, SimConfig};
use pixelfall::{bench_full_run, bench_step};

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "example.yaml")]
    file_name: String,

    /// Run the timing benchmarks instead of a simulation
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_config(file_name: &str) -> Result<SimConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let cfg: SimConfig = serde_yaml::from_reader(reader)?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.bench {
        bench_step();
        bench_full_run();
        return Ok(());
    }

    let cfg = load_config(&args.file_name)?;
    let img = load_image(&cfg.image.path)?;
    let recording = simulate(&cfg, &img)?;

    println!(
        "simulated {} particles over {} frames",
        recording.colors.len(),
        recording.frames.len()
    );

    if let Some(out) = &cfg.output {
        write_frames(
            &recording,
            cfg.world.width,
            cfg.world.height,
            out.scale,
            PathBuf::from(&out.dir).as_path(),
            out.every,
        )?;
        println!("wrote frames to {}", out.dir);
    }

    Ok(())
}
