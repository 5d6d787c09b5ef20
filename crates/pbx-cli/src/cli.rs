use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pbx_store::TargetKind;

#[derive(Parser)]
#[command(
    name = "pbxedit",
    about = "Inspect and edit project description graphs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Graph snapshot to read and update.
    #[arg(short, long, global = true, default_value = "project.pbxgraph.json")]
    pub project: PathBuf,

    /// TOML settings file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new, empty project graph
    Init(InitArgs),
    /// Add a target with default configurations
    AddTarget(AddTargetArgs),
    /// List targets with a given name
    Targets(TargetsArgs),
    /// List the source files compiled by a target
    Sources(SourcesArgs),
    /// Create a nested group path under the main group
    AddGroup(AddGroupArgs),
    /// Register a file, optionally linking it into a group and a target
    AddFile(AddFileArgs),
    /// Classify a build phase or build file reference
    Phase(PhaseArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TargetKindArg {
    Native,
    Legacy,
    Aggregate,
}

impl From<TargetKindArg> for TargetKind {
    fn from(arg: TargetKindArg) -> Self {
        match arg {
            TargetKindArg::Native => TargetKind::Native,
            TargetKindArg::Legacy => TargetKind::Legacy,
            TargetKindArg::Aggregate => TargetKind::Aggregate,
        }
    }
}

#[derive(Args)]
pub struct InitArgs {
    pub name: String,
    /// Overwrite an existing snapshot.
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct AddTargetArgs {
    pub name: String,
    #[arg(long, value_enum, default_value = "native")]
    pub kind: TargetKindArg,
}

#[derive(Args)]
pub struct TargetsArgs {
    pub name: String,
}

#[derive(Args)]
pub struct SourcesArgs {
    pub target: String,
}

#[derive(Args)]
pub struct AddGroupArgs {
    /// Slash-separated group path, e.g. `Sources/Models`.
    pub path: String,
    #[arg(long)]
    pub without_folder: bool,
}

#[derive(Args)]
pub struct AddFileArgs {
    pub path: PathBuf,
    /// Group path under the main group to link the file into.
    #[arg(short, long)]
    pub group: Option<String>,
    /// Target whose sources phase should compile the file.
    #[arg(short, long)]
    pub target: Option<String>,
    #[arg(long)]
    pub without_folder: bool,
}

#[derive(Args)]
pub struct PhaseArgs {
    pub reference: String,
}
