//! SK-017: CLI subcommands: run, tasks, init, locate, validate, completions.

use crate::core::{engine, parser, types};
use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "sake",
    version,
    about = "Tasks as code: compile and run your Sakefile with forwarded arguments"
)]
pub struct Cli {
    /// Show toolchain diagnostics and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Sakefile, forwarding ARGS (the first usually names the task)
    Run {
        /// Directory containing the Sakefile
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Print the toolchain command instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Arguments forwarded verbatim to the script
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the tasks the Sakefile declares
    Tasks {
        /// Directory containing the Sakefile
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Create a starter Sakefile
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Show the resolved script, library and toolchain command
    Locate {
        /// Directory containing the Sakefile
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate sake.yaml
    Validate {
        /// Directory containing sake.yaml
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, verbose: bool) -> Result<(), String> {
    match cmd {
        Commands::Run {
            path,
            dry_run,
            args,
        } => cmd_run(&path, &args, verbose, dry_run),
        Commands::Tasks { path } => cmd_run(&path, &["tasks".to_string()], verbose, false),
        Commands::Init { path } => cmd_init(&path),
        Commands::Locate { path, json } => cmd_locate(&path, json),
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sake", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn cmd_run(path: &Path, args: &[String], verbose: bool, dry_run: bool) -> Result<(), String> {
    let config = parser::load_config(path)?;

    if dry_run {
        let plan = engine::plan(&config, path, args, verbose)?;
        println!("{}", plan.invocation);
        return Ok(());
    }

    engine::execute(&config, path, args, verbose)?;
    Ok(())
}

const SAKEFILE_TEMPLATE: &str = r#"import SakefileDescription

let sake = Sake(tasks: [
    Task("build", description: "Builds the project") {
        try Utils.shell.runAndPrint(bash: "swift build")
    },
    Task("test", description: "Runs tests") {
        try Utils.shell.runAndPrint(bash: "swift test")
    },
])
"#;

fn cmd_init(path: &Path) -> Result<(), String> {
    let config = parser::load_config(path)?;
    let script_path = path.join(&config.script);
    if script_path.exists() {
        return Err(format!("{} already exists", script_path.display()));
    }

    std::fs::create_dir_all(path).map_err(|e| format!("cannot create {}: {}", path.display(), e))?;
    std::fs::write(&script_path, SAKEFILE_TEMPLATE)
        .map_err(|e| format!("cannot write {}: {}", script_path.display(), e))?;

    println!("Initialized sake project at {}", path.display());
    println!("  Created: {}", script_path.display());
    Ok(())
}

/// What `locate` reports.
#[derive(Debug, Serialize)]
struct LocateReport {
    script: PathBuf,
    library: PathBuf,
    command: types::Invocation,
}

fn locate_report(path: &Path) -> Result<LocateReport, String> {
    let config = parser::load_config(path)?;
    let plan = engine::plan(&config, path, &[], false)?;
    Ok(LocateReport {
        script: plan.script,
        library: plan.library,
        command: plan.invocation,
    })
}

fn cmd_locate(path: &Path, json: bool) -> Result<(), String> {
    let report = locate_report(path)?;
    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("serialize error: {}", e))?;
        println!("{}", out);
    } else {
        println!("Script:  {}", report.script.display());
        println!("Library: {}", report.library.display());
        println!("Command: {}", report.command);
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<(), String> {
    let file = path.join(types::CONFIG_FILE_NAME);
    if !file.exists() {
        println!("OK: no {} (defaults)", types::CONFIG_FILE_NAME);
        return Ok(());
    }

    let config = parser::parse_config_file(&file)?;
    let errors = parser::validate_config(&config);
    if errors.is_empty() {
        println!(
            "OK: {} (script {}, toolchain {}, library {})",
            file.display(),
            config.script,
            config.toolchain.program,
            config.library.name
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}
