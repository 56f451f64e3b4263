//! gowork CLI - find projects under GOPATH and print where they live
//!
//! The process cannot change its parent shell's directory, so `workon` only
//! prints the resolved path. A shell function is expected to `cd` into it:
//!
//! ```sh
//! workon() { local dir; dir="$(gowork workon "$@")" && cd "$dir"; }
//! ```

use clap::{Parser, Subcommand};
use gowork_core::{Author, Config, Distributor, GoworkError, MatchMode, Workspace};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gowork")]
#[command(about = "Jump into projects under GOPATH", long_about = None)]
struct Cli {
    /// Root of the tree (projects live in <root>/src/<distro>/<author>/<project>)
    #[arg(long, global = true, env = "GOPATH")]
    root: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long, global = true, env = "GOWORK_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Turn on verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all distributors
    Distros,

    /// List the authors on a distributor
    Authors {
        /// Distributor name (e.g. github.com)
        distro: String,
    },

    /// List the projects of an author
    Projects {
        /// Author as distro/name, or a bare name to look up
        author: String,
    },

    /// Look up an author by exact name and print its path
    Author {
        /// Author name (case-insensitive)
        name: String,

        /// Only look on this distributor
        #[arg(long = "in")]
        distro: Option<String>,
    },

    /// Show every project matching a term
    Search {
        /// Search term (case-insensitive)
        term: String,

        /// Require the term to equal a level's name
        #[arg(short, long)]
        exact: bool,
    },

    /// Resolve a term to one project and print its path
    Workon {
        /// Search term (case-insensitive)
        term: String,

        /// Require the term to equal a level's name
        #[arg(short, long)]
        exact: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(&cli);

    if let Err(e) = result {
        if cli.json {
            match serde_json::to_string_pretty(&e.envelope()) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", e),
            }
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Log to stderr at warn, or debug with --verbose. RUST_LOG overrides both.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

fn run(cli: &Cli) -> gowork_core::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let workspace = Workspace::from_config(&config, cli.root.clone())?;
    tracing::debug!(root = %workspace.root().display(), "Using workspace");

    match &cli.command {
        Commands::Distros => cmd_distros(&workspace, cli.json),
        Commands::Authors { distro } => cmd_authors(&workspace, distro, cli.json),
        Commands::Projects { author } => cmd_projects(&workspace, author, cli.json),
        Commands::Author { name, distro } => {
            cmd_author(&workspace, name, distro.as_deref(), cli.json)
        }
        Commands::Search { term, exact } => {
            cmd_search(&workspace, term, match_mode(&config, *exact), cli.json)
        }
        Commands::Workon { term, exact } => {
            cmd_workon(&workspace, term, match_mode(&config, *exact), cli.json)
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> gowork_core::Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn match_mode(config: &Config, exact: bool) -> MatchMode {
    if exact {
        MatchMode::Exact
    } else {
        config.search.mode
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> gowork_core::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| GoworkError::Io(e.into()))?;
    println!("{}", json);
    Ok(())
}

fn cmd_distros(workspace: &Workspace, json: bool) -> gowork_core::Result<()> {
    let distros = workspace.distributors()?;

    if json {
        return print_json(&distros);
    }

    let names: Vec<&str> = distros.iter().map(|d| d.name()).collect();
    println!("All available repos: {}", names.join(", "));
    Ok(())
}

fn cmd_authors(workspace: &Workspace, distro: &str, json: bool) -> gowork_core::Result<()> {
    use colored::Colorize;

    let distro: Distributor = distro.parse()?;
    let authors = workspace.authors(&distro)?;

    if json {
        return print_json(&authors);
    }

    for author in &authors {
        println!("{}", author.to_string().cyan());
    }
    println!("({} authors)", authors.len());
    Ok(())
}

fn cmd_projects(workspace: &Workspace, author: &str, json: bool) -> gowork_core::Result<()> {
    use colored::Colorize;

    let projects = if author.contains('/') {
        let author: Author = author.parse()?;
        workspace.projects(&author)?
    } else {
        workspace.projects_of_author(author)?
    };

    if json {
        return print_json(&projects);
    }

    for project in &projects {
        println!(
            "{} {}",
            project.to_string().cyan(),
            workspace.project_path(project).display().to_string().dimmed()
        );
    }
    println!("({} projects)", projects.len());
    Ok(())
}

fn cmd_author(
    workspace: &Workspace,
    name: &str,
    distro: Option<&str>,
    json: bool,
) -> gowork_core::Result<()> {
    let author = match distro {
        Some(distro) => workspace.find_author_in(name, &distro.parse::<Distributor>()?)?,
        None => workspace.find_author(name)?,
    };
    let path = workspace.author_path(&author);

    if json {
        return print_json(&serde_json::json!({
            "author": author,
            "path": path,
        }));
    }

    println!("{}", path.display());
    Ok(())
}

fn cmd_search(
    workspace: &Workspace,
    term: &str,
    mode: MatchMode,
    json: bool,
) -> gowork_core::Result<()> {
    use colored::Colorize;

    if json {
        let matches = workspace.search(term, mode)?.collect_matches()?;
        return print_json(&matches);
    }

    // Print as results arrive; stop at the first error
    let mut count = 0usize;
    for found in workspace.search(term, mode)? {
        let found = found?;
        let kind = match found.kind {
            gowork_core::MatchKind::Project => found.kind.as_str().green(),
            gowork_core::MatchKind::Author => found.kind.as_str().yellow(),
            gowork_core::MatchKind::Distro => found.kind.as_str().blue(),
        };
        println!(
            "{:>7}: {} {}",
            kind,
            found.project.to_string().cyan(),
            workspace
                .project_path(&found.project)
                .display()
                .to_string()
                .dimmed()
        );
        count += 1;
    }
    println!("({} matches)", count);
    Ok(())
}

fn cmd_workon(
    workspace: &Workspace,
    term: &str,
    mode: MatchMode,
    json: bool,
) -> gowork_core::Result<()> {
    let project = workspace.locate(term, mode)?;
    let path = workspace.project_path(&project);

    if json {
        return print_json(&serde_json::json!({
            "project": project,
            "path": path,
        }));
    }

    // Bare path only, for the shell wrapper
    println!("{}", path.display());
    Ok(())
}
