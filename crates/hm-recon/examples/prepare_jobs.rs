use std::env;
use std::error::Error;
use std::path::PathBuf;

use hm_recon::{centre_sweep, plan_chunks, write_sweep, JobOverrides, ReconSettings};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let out = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("hm-jobs"));

    let mut settings = ReconSettings::blueprint()?;
    JobOverrides::new()
        .sinogram_folder("/dls/i12/data/2013/ee0000-1/processing/sinograms")
        .image_folder("/dls/i12/data/2013/ee0000-1/processing/reconstruction")
        .flat_dir("/dls/i12/data/2013/ee0000-1/flat")
        .dark_dir("/dls/i12/data/2013/ee0000-1/dark")
        .centre(1283.5)
        .apply(&mut settings)?;

    let plan = plan_chunks(0, 2160, 16)?;
    let files = plan.write(&settings, &out.join("chunks"))?;
    print!("{}", plan.chunk_list());
    println!("{} chunk files in {}", files.len(), out.join("chunks").display());

    let trials = centre_sweep(1283.5, 0.5, 11)?;
    let files = write_sweep(&settings, &trials, &out.join("centres"))?;
    for (trial, file) in trials.iter().zip(&files) {
        println!("centre {:>8.2} -> {}", trial.centre, file.display());
    }
    Ok(())
}
