use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cisterns_tools::{init_tracing, list_images, run_stages, ClassificationStore, PrepConfig, Stage};

#[derive(Parser, Debug)]
#[command(
    name = "cisterns_prep",
    about = "Copy cisterns images, write ground truth and render labeled copies"
)]
struct Args {
    /// First entry id (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u32,
    /// Last entry id (inclusive).
    #[arg(long, default_value_t = 20)]
    end: u32,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Copy segment images into the destination tree.
    Copy,
    /// Append right/left horn classifications to ground-truth.csv.
    GroundTruth,
    /// Render labeled copies of previously copied images.
    Label,
    /// copy, ground-truth, then label.
    All,
    /// List `<id>/<image>` keys under a prepared tree (default: the labeled tree).
    Images {
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Record a human classification for an image key; omit the label to clear it.
    Mark { image: String, label: Option<String> },
    /// Remove every recorded human classification.
    ResetMarks,
}

fn run_pipeline(cfg: &PrepConfig, stages: &[Stage], args: &Args) -> Result<()> {
    let reports = run_stages(cfg, stages, args.start..=args.end)
        .with_context(|| format!("prepare ids {}..={}", args.start, args.end))?;
    for report in reports {
        println!("{report}");
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let cfg = PrepConfig::load();

    match args.command.clone().unwrap_or(Command::All) {
        Command::Copy => run_pipeline(&cfg, &[Stage::Copy], &args),
        Command::GroundTruth => run_pipeline(&cfg, &[Stage::GroundTruth], &args),
        Command::Label => run_pipeline(&cfg, &[Stage::Label], &args),
        Command::All => run_pipeline(&cfg, &Stage::ALL, &args),
        Command::Images { root } => {
            let root = root.unwrap_or_else(|| cfg.labeled_dest_root.clone());
            let store = ClassificationStore::open(&cfg.classifications_file)
                .context("open classification store")?;
            for key in list_images(&root).context("list images")? {
                match store.get(&key) {
                    Some(label) => println!("{key}\t{label}"),
                    None => println!("{key}"),
                }
            }
            Ok(())
        }
        Command::Mark { image, label } => {
            let mut store = ClassificationStore::open(&cfg.classifications_file)
                .context("open classification store")?;
            store
                .set(&image, label.as_deref())
                .with_context(|| format!("mark {image}"))?;
            println!("{} classifications in {}", store.len(), store.path().display());
            Ok(())
        }
        Command::ResetMarks => {
            let mut store = ClassificationStore::open(&cfg.classifications_file)
                .context("open classification store")?;
            store.reset().context("reset classifications")?;
            println!("Cleared {}", store.path().display());
            Ok(())
        }
    }
}
