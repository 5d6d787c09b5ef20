use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use pbx_project::{Project, ProjectConfig};
use pbx_store::{FileElement, ObjectStore};
use pbx_types::Reference;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ProjectConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ProjectConfig::default(),
    };
    let snapshot = cli.project.as_path();
    match cli.command {
        Command::Init(args) => cmd_init(snapshot, config, args),
        Command::AddTarget(args) => {
            let mut project = load(snapshot, config)?;
            cmd_add_target(&mut project, args)?;
            save(snapshot, &project)
        }
        Command::Targets(args) => cmd_targets(&load(snapshot, config)?, args),
        Command::Sources(args) => cmd_sources(&load(snapshot, config)?, args),
        Command::AddGroup(args) => {
            let mut project = load(snapshot, config)?;
            cmd_add_group(&mut project, args)?;
            save(snapshot, &project)
        }
        Command::AddFile(args) => {
            let mut project = load(snapshot, config)?;
            // Earlier steps stay applied even if a later one fails.
            let result = cmd_add_file(&mut project, args);
            save(snapshot, &project)?;
            result
        }
        Command::Phase(args) => cmd_phase(&load(snapshot, config)?, args),
    }
}

fn load(path: &Path, config: ProjectConfig) -> anyhow::Result<Project> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}; run `pbxedit init` first", path.display()))?;
    let store = ObjectStore::from_json(&json)?;
    Ok(Project::open(store, config))
}

fn save(path: &Path, project: &Project) -> anyhow::Result<()> {
    let json = project.store().to_json()?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main_group(project: &Project) -> anyhow::Result<Reference> {
    match project.main_group() {
        Some(group) => Ok(group.clone()),
        None => bail!("graph has no project record"),
    }
}

fn cmd_init(path: &Path, config: ProjectConfig, args: InitArgs) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let project = Project::init(&args.name, config)?;
    save(path, &project)?;
    println!(
        "{} Initialized project {} in {}",
        "✓".green().bold(),
        args.name.bold(),
        path.display()
    );
    Ok(())
}

fn cmd_add_target(project: &mut Project, args: AddTargetArgs) -> anyhow::Result<()> {
    let reference = project.add_target(&args.name, args.kind.into())?;
    println!(
        "{} Added {:?} target {} ({})",
        "✓".green().bold(),
        args.kind,
        args.name.bold(),
        reference.to_string().yellow()
    );
    Ok(())
}

fn cmd_targets(project: &Project, args: TargetsArgs) -> anyhow::Result<()> {
    let store = project.store();
    let targets = store.targets_named(&args.name);
    if targets.is_empty() {
        println!("No targets named {}.", args.name.bold());
        return Ok(());
    }
    for (reference, target) in targets {
        println!(
            "{}  {}  {:?}",
            reference.to_string().yellow(),
            target.name.bold(),
            target.kind()
        );
        for (phase, _) in store.build_phase_kinds(target) {
            let label = store.display_name_of_phase(phase).unwrap_or("?");
            println!("    {} {}", phase.short().dimmed(), label);
        }
    }
    Ok(())
}

fn cmd_sources(project: &Project, args: SourcesArgs) -> anyhow::Result<()> {
    let store = project.store();
    let targets = store.targets_named(&args.target);
    if targets.is_empty() {
        bail!("no target named {}", args.target);
    }
    for (reference, target) in targets {
        println!("{} ({})", target.name.bold(), reference.short().dimmed());
        let files = store.source_files(target);
        if files.is_empty() {
            println!("  (no source files)");
        }
        for (file_ref, element) in files {
            println!("  {}  {}", file_ref.short().dimmed(), describe(&element));
        }
    }
    Ok(())
}

/// `path (sourceTree, fileType)` for one source listing line.
fn describe(element: &FileElement<'_>) -> String {
    let file_type = element
        .as_file_reference()
        .and_then(|file| file.last_known_file_type.as_ref())
        .map(|file_type| format!(", {file_type}"))
        .unwrap_or_default();
    format!(
        "{} ({}{})",
        element.path().unwrap_or_default(),
        element.source_tree(),
        file_type
    )
}

fn cmd_add_group(project: &mut Project, args: AddGroupArgs) -> anyhow::Result<()> {
    let main = main_group(project)?;
    let without_folder = args.without_folder || project.config().without_folder;
    let chain = project.add_group_path(&args.path, &main, without_folder)?;
    for (reference, group) in &chain {
        println!(
            "  {} {}",
            reference.to_string().yellow(),
            group.name.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

fn cmd_add_file(project: &mut Project, args: AddFileArgs) -> anyhow::Result<()> {
    let (file_ref, file) = project.add_file(&args.path)?;
    println!(
        "{} {} ({})",
        "added:".green(),
        file.path,
        file_ref.to_string().yellow()
    );

    if let Some(group_path) = &args.group {
        let main = main_group(project)?;
        let without_folder = args.without_folder || project.config().without_folder;
        let chain = project.add_group_path(group_path, &main, without_folder)?;
        let group = chain
            .last()
            .map(|(reference, _)| reference.clone())
            .unwrap_or(main);
        project.add_file_to_group(&group, &file_ref);
        println!("  {} {}", "group:".green(), group_path);
    }

    if let Some(target_name) = &args.target {
        let targets: Vec<Reference> = project
            .store()
            .targets_named(target_name)
            .into_iter()
            .map(|(reference, _)| reference.clone())
            .collect();
        if targets.is_empty() {
            bail!("no target named {target_name}");
        }
        if let Some(file_type) = file
            .last_known_file_type
            .as_ref()
            .filter(|file_type| !file_type.is_compilable())
        {
            println!(
                "  {} {} is not compiled by a sources phase",
                "note:".yellow(),
                file_type
            );
        }
        for target in targets {
            match project.add_build_file(&target, &file_ref)? {
                Some((build_ref, _)) => println!(
                    "  {} {} ({})",
                    "target:".green(),
                    target_name,
                    build_ref.to_string().yellow()
                ),
                None => println!(
                    "  {} {} has no sources phase",
                    "skipped:".yellow(),
                    target_name
                ),
            }
        }
    }
    Ok(())
}

fn cmd_phase(project: &Project, args: PhaseArgs) -> anyhow::Result<()> {
    let reference: Reference = args.reference.parse()?;
    let store = project.store();
    if let Some(kind) = store.phase_kind_of_phase(&reference) {
        let name = store.display_name_of_phase(&reference).unwrap_or(kind.label());
        println!("{} build phase {:?} ({})", reference, kind, name.bold());
    } else if let Some(kind) = store.phase_kind_of_build_file(&reference) {
        let name = store
            .display_name_of_build_file(&reference)
            .unwrap_or(kind.label());
        println!("{} build file in {:?} phase ({})", reference, kind, name.bold());
    } else {
        println!("{} is not a build phase or a phase member", reference);
    }
    Ok(())
}
