use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use hm_recon::JobOverrides;
use tracing_subscriber::EnvFilter;

use hmctl::cmd_centres;
use hmctl::cmd_chunks::{self, ChunksArgs};
use hmctl::cmd_get;
use hmctl::cmd_schema;
use hmctl::cmd_set;
use hmctl::cmd_show;
use hmctl::cmd_unset;
use hmctl::cmd_validate;

#[derive(Parser, Debug)]
#[command(name = "hmctl", version, about = "hm reconstruction parameter CLI")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Output JSON where applicable
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Check that parameter files parse against the schema
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the set fields of a parameter file
    Show { file: PathBuf },
    /// Read one field, e.g. FBP/Backprojection/ImageCentre
    Get { file: PathBuf, path: String },
    /// Write one field, creating records on the way
    Set {
        file: PathBuf,
        path: String,
        value: String,
        /// Write the result here instead of back to FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Clear one field, or drop a whole record with --record
    Unset {
        file: PathBuf,
        path: String,
        #[arg(long)]
        record: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Dump the schema class table
    Schema {
        /// Only this class, e.g. FBPType
        #[arg(long)]
        class: Option<String>,
    },
    /// Split a slice range into per-task parameter files
    Chunks {
        settings: PathBuf,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long)]
        first: i32,
        #[arg(long)]
        last: i32,
        #[arg(short = 'n', long, default_value_t = 16)]
        chunks: u32,
        #[arg(long, default_value_t = 1)]
        step: i32,
        #[command(flatten)]
        job: JobArgs,
    },
    /// Write one parameter file per trial centre of rotation
    Centres {
        settings: PathBuf,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Middle of the sweep; defaults to the file's ImageCentre
        #[arg(long)]
        centre: Option<f64>,
        #[arg(long, default_value_t = 0.5)]
        step: f64,
        #[arg(long, default_value_t = 11)]
        total: u32,
    },
}

/// Per-job overrides shared by the job preparation commands.
#[derive(Args, Debug, Default)]
struct JobArgs {
    /// Sinogram folder (input prefix becomes sino_)
    #[arg(long)]
    sino_dir: Option<String>,
    /// Output image folder (output prefix becomes image_)
    #[arg(long)]
    image_dir: Option<String>,
    /// Directory holding flat.tif
    #[arg(long)]
    flat_dir: Option<String>,
    /// Directory holding dark.tif
    #[arg(long)]
    dark_dir: Option<String>,
    #[arg(long)]
    centre: Option<f64>,
}

impl From<JobArgs> for JobOverrides {
    fn from(args: JobArgs) -> Self {
        JobOverrides {
            sinogram_folder: args.sino_dir,
            image_folder: args.image_dir,
            flat_dir: args.flat_dir,
            dark_dir: args.dark_dir,
            centre: args.centre,
        }
    }
}

fn main() -> Result<()> {
    let Cli { verbose, json, cmd } = Cli::parse();

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cmd {
        Cmd::Validate { files } => cmd_validate::run(files, json)?,
        Cmd::Show { file } => cmd_show::run(file, json)?,
        Cmd::Get { file, path } => cmd_get::run(file, path, json)?,
        Cmd::Set {
            file,
            path,
            value,
            output,
        } => cmd_set::run(file, path, value, output, json)?,
        Cmd::Unset {
            file,
            path,
            record,
            output,
        } => cmd_unset::run(file, path, record, output, json)?,
        Cmd::Schema { class } => cmd_schema::run(class, json)?,
        Cmd::Chunks {
            settings,
            out,
            first,
            last,
            chunks,
            step,
            job,
        } => {
            let args = ChunksArgs {
                settings,
                out,
                first,
                last,
                chunks,
                step,
                overrides: job.into(),
            };
            cmd_chunks::run(args, json)?
        }
        Cmd::Centres {
            settings,
            out,
            centre,
            step,
            total,
        } => cmd_centres::run(settings, out, centre, step, total, json)?,
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_validate_takes_many_files() {
        let cli = Cli::parse_from(["hmctl", "validate", "a.xml", "b.xml"]);
        match cli.cmd {
            Cmd::Validate { files } => {
                assert_eq!(files, [PathBuf::from("a.xml"), PathBuf::from("b.xml")])
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(Cli::try_parse_from(["hmctl", "validate"]).is_err());
    }

    #[test]
    fn parse_set_with_output() {
        let cli = Cli::parse_from([
            "hmctl",
            "--json",
            "set",
            "settings.xml",
            "FBP/GPUDeviceNumber",
            "0",
            "-o",
            "out.xml",
        ]);
        assert!(cli.json);
        match cli.cmd {
            Cmd::Set {
                path,
                value,
                output,
                ..
            } => {
                assert_eq!(path, "FBP/GPUDeviceNumber");
                assert_eq!(value, "0");
                assert_eq!(output, Some(PathBuf::from("out.xml")));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn parse_chunks_defaults_and_overrides() {
        let cli = Cli::parse_from([
            "hmctl",
            "-vv",
            "chunks",
            "settings.xml",
            "--first",
            "0",
            "--last",
            "2160",
            "--sino-dir",
            "/scan/sino",
            "--centre",
            "1283.5",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.cmd {
            Cmd::Chunks {
                chunks, step, job, out, ..
            } => {
                assert_eq!(chunks, 16);
                assert_eq!(step, 1);
                assert_eq!(out, PathBuf::from("."));
                let overrides = JobOverrides::from(job);
                assert_eq!(overrides.sinogram_folder.as_deref(), Some("/scan/sino"));
                assert_eq!(overrides.centre, Some(1283.5));
                assert!(overrides.image_folder.is_none());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn parse_centres_defaults() {
        let cli = Cli::parse_from(["hmctl", "centres", "settings.xml", "--out", "sweep"]);
        match cli.cmd {
            Cmd::Centres {
                centre, step, total, out, ..
            } => {
                assert_eq!(centre, None);
                assert_eq!(step, 0.5);
                assert_eq!(total, 11);
                assert_eq!(out, PathBuf::from("sweep"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
