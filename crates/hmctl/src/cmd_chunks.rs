use std::path::PathBuf;

use anyhow::{Context, Result};
use hm_recon::{plan_chunks, JobOverrides};
use serde::Serialize;
use tracing::info;

use crate::common;

/// Inputs of the `chunks` subcommand.
#[derive(Debug)]
pub struct ChunksArgs {
    pub settings: PathBuf,
    pub out: PathBuf,
    pub first: i32,
    pub last: i32,
    pub chunks: u32,
    pub step: i32,
    pub overrides: JobOverrides,
}

#[derive(Serialize)]
struct ChunkEntry {
    chunk: u32,
    task: u32,
    start: i32,
    end: i32,
    num: i64,
    file: String,
}

pub fn run(args: ChunksArgs, json: bool) -> Result<()> {
    let mut settings = common::load_settings(&args.settings)?;
    args.overrides
        .apply(&mut settings)
        .context("apply job overrides")?;

    let plan = plan_chunks(args.first, args.last, args.chunks)?.with_step(args.step);
    let files = plan
        .write(&settings, &args.out)
        .with_context(|| format!("write chunks to {}", args.out.display()))?;
    info!(chunks = files.len(), out = %args.out.display(), "chunks ready");

    if json {
        let entries: Vec<ChunkEntry> = plan
            .chunks()
            .iter()
            .zip(&files)
            .map(|(chunk, file)| ChunkEntry {
                chunk: chunk.index,
                task: chunk.task,
                start: chunk.start,
                end: chunk.end,
                num: chunk.len(),
                file: file.display().to_string(),
            })
            .collect();
        common::print_json(&entries)?;
    } else {
        print!("{}", plan.chunk_list());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_recon::chunks::CHUNK_LIST;
    use hm_recon::ReconSettings;

    #[test]
    fn chunks_apply_overrides_before_splitting() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.xml");
        ReconSettings::blueprint().unwrap().save(&settings).unwrap();
        let out = dir.path().join("jobs");

        let args = ChunksArgs {
            settings,
            out: out.clone(),
            first: 0,
            last: 100,
            chunks: 4,
            step: 1,
            overrides: JobOverrides::new().sinogram_folder("/scan/sino").centre(1300.0),
        };
        run(args, false).unwrap();

        let list = std::fs::read_to_string(out.join(CHUNK_LIST)).unwrap();
        assert_eq!(list.lines().last(), Some("chunk 3 sge-task 4 start 75 end 99 num 25"));
        let chunk = ReconSettings::load(out.join("chunk_004.xml")).unwrap();
        assert_eq!(chunk.image_centre(), Some(1300.0));
        assert_eq!(
            chunk.document().get("FBP/InputData/Folder").unwrap().as_deref(),
            Some("/scan/sino")
        );
    }
}
