use clap::{Parser, Subcommand};
use mist_codegen::{component_name, is_mist_file, output_path};
use mist_extract::{AttributeKind, ComponentDescriptor};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mist")]
#[command(about = "MistCSS: typed React components from plain CSS")]
#[command(version)]
struct Cli {
    /// Log progress (set MIST_LOG for finer control)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a .tsx component next to each .mist.css file
    Build {
        /// .mist.css files, or directories to search
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Check .mist.css files for errors without writing output
    Check {
        /// .mist.css files, or directories to search
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the component extracted from a .mist.css file
    Inspect {
        /// Input .mist.css file
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let ok = match cli.command {
        Command::Build { paths } => cmd_build(&paths),
        Command::Check { paths } => cmd_check(&paths),
        Command::Inspect { path, json } => cmd_inspect(&path, json),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("MIST_LOG", default))
        .format_timestamp(None)
        .init();
}

/// Expand directories into the stylesheets they contain, sorted.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut files)?;
        } else if path.exists() {
            files.push(path.clone());
        } else {
            return Err(format!("file not found: {}", path.display()));
        }
    }
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("reading {}: {e}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("reading {}: {e}", dir.display()))?;
        paths.push(entry.path());
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            walk(&path, files)?;
        } else if is_mist_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))
}

/// Compile one stylesheet to TSX.
fn compile_file(path: &Path) -> Result<String, String> {
    let name = component_name(path).ok_or_else(|| {
        format!(
            "{}: not a {} file",
            path.display(),
            mist_codegen::EXTENSION
        )
    })?;
    let source = read_source(path)?;

    log::info!("compiling {} as {name}", path.display());
    mist_codegen::compile(name, &source).map_err(|e| format!("{}: {e}", path.display()))
}

/// Run `action` over every file, reporting each failure. Returns whether all succeeded.
fn for_each_file(paths: &[PathBuf], action: impl Fn(&Path) -> Result<(), String>) -> bool {
    let files = match collect_files(paths) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };

    if files.is_empty() {
        log::warn!("no {} files found", mist_codegen::EXTENSION);
    }

    let mut failures = 0;
    for file in &files {
        if let Err(e) = action(file) {
            eprintln!("Error: {e}");
            failures += 1;
        }
    }

    if failures > 0 {
        eprintln!("{failures} of {} file(s) failed", files.len());
    }
    failures == 0
}

fn cmd_build(paths: &[PathBuf]) -> bool {
    for_each_file(paths, |path| {
        let tsx = compile_file(path)?;
        let output = output_path(path);
        std::fs::write(&output, tsx)
            .map_err(|e| format!("writing {}: {e}", output.display()))?;
        eprintln!("Built: {}", output.display());
        Ok(())
    })
}

fn cmd_check(paths: &[PathBuf]) -> bool {
    for_each_file(paths, |path| {
        compile_file(path)?;
        eprintln!("OK: {}", path.display());
        Ok(())
    })
}

fn cmd_inspect(path: &Path, json: bool) -> bool {
    let result = read_source(path).and_then(|source| {
        mist_extract::parse_input(&source).map_err(|e| format!("{}: {e}", path.display()))
    });

    let descriptor = match result {
        Ok(descriptor) => descriptor,
        Err(e) => {
            eprintln!("Error: {e}");
            return false;
        }
    };

    if json {
        match serde_json::to_string_pretty(&descriptor) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return false;
            }
        }
    } else {
        print!("{}", describe(&descriptor));
    }
    true
}

/// Human readable descriptor listing.
fn describe(descriptor: &ComponentDescriptor) -> String {
    let mut out = String::new();
    out.push_str(&format!("class:  {}\n", or_none(&descriptor.class_name)));
    out.push_str(&format!("tag:    {}\n", or_none(&descriptor.tag_name)));

    if descriptor.attributes.is_empty() {
        out.push_str("attributes: (none)\n");
        return out;
    }

    out.push_str("attributes:\n");
    for (name, kind) in &descriptor.attributes {
        match kind {
            AttributeKind::Boolean => out.push_str(&format!("  data-{name}: boolean\n")),
            AttributeKind::Enum(values) => {
                out.push_str(&format!("  data-{name}: {}\n", values.join(" | ")))
            }
        }
    }
    out
}

fn or_none(value: &str) -> &str {
    if value.is_empty() {
        "(none)"
    } else {
        value
    }
}
