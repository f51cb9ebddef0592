//! Command dispatch

use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{
    DirectorySource, RenderOptions, SubTreeLoader, TreeFileService, TreeRender, TreeSession,
};
use crate::cli::args::{Cli, Commands, ConfigCommands, MutateArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::NodePath;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// A loaded tree plus, for directory sources, the loader that fills it lazily.
struct Workspace {
    session: TreeSession,
    loader: Option<SubTreeLoader<DirectorySource>>,
    label: String,
}

impl Workspace {
    /// Expand or collapse one node, loading directory children on first expansion.
    fn set_expanded(&mut self, path: &NodePath, expanded: bool) {
        if self.session.find(path).is_none() {
            output::warning(&format!("no such node: {}", path));
        }
        match self.loader.as_mut() {
            Some(loader) => {
                loader.on_expanded_change(&mut self.session, path, expanded);
            }
            None => self.session.set_expanded(path, expanded),
        }
    }

    /// Expand every node; directory sources are loaded completely first.
    fn expand_all(&mut self) {
        if let Some(loader) = self.loader.as_mut() {
            loader.expand_to_depth(&mut self.session, usize::MAX);
        }
        self.session.expand_all();
    }

    fn collapse_all(&mut self) {
        self.session.collapse_all();
    }

    fn report_load_errors(&self) {
        if let Some(loader) = &self.loader {
            for (path, message) in loader.errors() {
                output::warning(&format!("{}: {}", path, message));
            }
        }
    }
}

/// Run a command, printing results to stdout.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    execute_command_to(cli, &mut io::stdout().lock())
}

/// Run a command, writing trees, TOML and config listings to `out`.
/// Warnings and errors still go to stderr.
pub fn execute_command_to(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, out);
        return Ok(());
    }

    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load(Some(&project_dir))?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Show {
            source,
            all,
            select,
            depth,
        } => cmd_show(&container, out, source, *all, select.as_deref(), *depth),
        Commands::Expand(args) => cmd_mutate(&container, out, args, true),
        Commands::Collapse(args) => cmd_mutate(&container, out, args, false),
        Commands::Toggle { source, path, toml } => {
            cmd_toggle(&container, out, source, path, *toml)
        }
        Commands::Generate { breadth, depth } => cmd_generate(&container, out, *breadth, *depth),
        Commands::Config { command } => cmd_config(&container, out, &project_dir, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn resolve_project_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("resolve working directory", e).into()),
    }
}

/// Load a TOML tree file, or scan a directory `depth` levels deep.
#[instrument(level = "debug", skip(container))]
fn open_source(
    container: &ServiceContainer,
    source: &Path,
    depth: Option<usize>,
) -> CliResult<Workspace> {
    if container.fs.is_dir(source) {
        let mut loader = container.directory_loader(source);
        let mut session = loader.load_root()?;
        loader.expand_to_depth(&mut session, depth.unwrap_or(container.settings.scan_depth));
        let workspace = Workspace {
            session,
            loader: Some(loader),
            label: source.display().to_string(),
        };
        workspace.report_load_errors();
        return Ok(workspace);
    }

    let tree = container.tree_files().load(source)?;
    debug!("opened tree file with {} top-level nodes", tree.len());
    Ok(Workspace {
        session: TreeSession::new(tree),
        loader: None,
        label: container.settings.label.clone(),
    })
}

fn emit(out: &mut dyn Write, text: &dyn Display) -> CliResult<()> {
    writeln!(out, "{}", text).map_err(|e| InfraError::io("write output", e).into())
}

fn print_workspace(
    container: &ServiceContainer,
    out: &mut dyn Write,
    workspace: &Workspace,
    show_all: bool,
    as_toml: bool,
) -> CliResult<()> {
    if as_toml {
        return emit(out, &TreeFileService::to_toml(workspace.session.tree())?);
    }
    let options = RenderOptions {
        show_all,
        show_status: container.settings.show_status,
        current: None,
        unloaded: workspace
            .loader
            .as_ref()
            .map(|loader| loader.unloaded())
            .unwrap_or_default(),
    };
    emit(out, &workspace.session.to_term_tree(&workspace.label, &options))
}

#[instrument(skip(container, out))]
fn cmd_show(
    container: &ServiceContainer,
    out: &mut dyn Write,
    source: &Path,
    all: bool,
    select: Option<&str>,
    depth: Option<usize>,
) -> CliResult<()> {
    let mut workspace = open_source(container, source, depth)?;
    if let Some(select) = select {
        let path = NodePath::parse(select);
        for ancestor in path.ancestors() {
            workspace.set_expanded(&ancestor, true);
        }
        if !workspace.session.select(&path) {
            return Err(CliError::InvalidArgs(format!("no such node: {}", path)));
        }
    }
    print_workspace(container, out, &workspace, all, false)
}

#[instrument(skip(container, out))]
fn cmd_mutate(
    container: &ServiceContainer,
    out: &mut dyn Write,
    args: &MutateArgs,
    expanded: bool,
) -> CliResult<()> {
    let mut workspace = open_source(container, &args.source, args.depth)?;
    if args.paths.is_empty() {
        if expanded {
            workspace.expand_all();
        } else {
            workspace.collapse_all();
        }
    } else {
        for raw in &args.paths {
            workspace.set_expanded(&NodePath::parse(raw), expanded);
        }
    }
    workspace.report_load_errors();
    print_workspace(container, out, &workspace, false, args.toml)
}

#[instrument(skip(container, out))]
fn cmd_toggle(
    container: &ServiceContainer,
    out: &mut dyn Write,
    source: &Path,
    path: &str,
    toml: bool,
) -> CliResult<()> {
    let mut workspace = open_source(container, source, None)?;
    let path = NodePath::parse(path);
    let Some(node) = workspace.session.find(&path) else {
        return Err(CliError::InvalidArgs(format!("no such node: {}", path)));
    };
    let expanded = !node.expanded;
    workspace.set_expanded(&path, expanded);
    workspace.report_load_errors();
    print_workspace(container, out, &workspace, false, toml)
}

#[instrument(skip(container, out))]
fn cmd_generate(
    container: &ServiceContainer,
    out: &mut dyn Write,
    breadth: Option<usize>,
    depth: Option<usize>,
) -> CliResult<()> {
    let mut builder = container.settings.generate.builder();
    if let Some(breadth) = breadth {
        builder = builder.with_breadth(breadth);
    }
    if let Some(depth) = depth {
        builder = builder.with_depth(depth);
    }
    emit(out, &TreeFileService::to_toml(&builder.generate())?)
}

fn cmd_config(
    container: &ServiceContainer,
    out: &mut dyn Write,
    project_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => emit(out, &container.settings.to_toml()?),
        ConfigCommands::Path => {
            let global = match global_config_path() {
                Some(path) => describe_config(container, &path),
                None => "<no config directory>".to_string(),
            };
            let local = describe_config(container, &local_config_path(project_dir));
            emit(out, &format!("global: {global}"))?;
            emit(out, &format!("local: {local}"))
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path()
                    .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                container
                    .fs
                    .create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}

fn describe_config(container: &ServiceContainer, path: &Path) -> String {
    if container.fs.exists(path) {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}
