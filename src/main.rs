//! CLI entry point for scriptdoc

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use scriptdoc::file_utils::{read_text, set_max_file_size};
use scriptdoc::{
    DocConfig, DocWalker, Language, extract_header, print_json, resolve, write_tree,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scriptdoc")]
#[command(about = "Generate Sphinx pages from the header comments of R, MATLAB, Stata, Julia and Python scripts")]
#[command(version)]
struct Args {
    /// Directory of scripts to document (a single file with --header)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Directory the .rst pages are written to
    #[arg(short, long, default_value = "docs")]
    output: PathBuf,

    /// Title of the root index page (default: the directory name)
    #[arg(short, long)]
    title: Option<String>,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Skip a directory entirely (can be used multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "DIR")]
    exclude: Vec<PathBuf>,

    /// Include hidden entries and entries ignored by .gitignore
    #[arg(short, long)]
    all: bool,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Root that Python module paths are relative to
    /// (default: the parent of the documented directory)
    #[arg(long = "package-root", value_name = "DIR")]
    package_root: Option<PathBuf>,

    /// Number of parallel workers for header extraction
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Maximum file size for header extraction (default: 1MB)
    /// Files larger than this are skipped. Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Remove previously generated pages for this title before writing
    #[arg(long)]
    clean: bool,

    /// Print the page plan as JSON instead of writing pages
    #[arg(long = "json", conflicts_with_all = ["header", "clean"])]
    json: bool,

    /// Print the header comment of a single file
    #[arg(long = "header")]
    header: bool,

    /// Comment rules to use with --header: r, matlab, stata, python, julia
    #[arg(long = "lang", value_name = "LANG", requires = "header")]
    lang: Option<Language>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        eprintln!("scriptdoc: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(ref size_str) = args.max_file_size {
        let size = parse_file_size(size_str)
            .map_err(|e| anyhow!("invalid --max-file-size '{}': {}", size_str, e))?;
        set_max_file_size(size);
    }

    if args.header {
        return print_header(&args.path, args.lang);
    }

    let config = DocConfig {
        show_all: args.all,
        max_depth: args.level,
        ignore_patterns: args.ignore,
        exclude_dirs: args.exclude,
        output_dir: args.output,
        title: args.title,
        package_root: args.package_root,
        parallel_workers: args.jobs,
        clean: args.clean,
    };
    debug!("{:?}", config);

    let walker = DocWalker::new(config);
    let tree = walker
        .walk(&args.path)
        .with_context(|| format!("cannot document '{}'", args.path.display()))?;

    if args.json {
        return print_json(&tree).context("error writing output");
    }

    let config = walker.config();
    let summary = write_tree(&tree, &config.output_dir, config.clean)
        .with_context(|| format!("cannot write pages to '{}'", config.output_dir.display()))?;
    println!("{} directories, {} files", summary.dirs, summary.files);
    Ok(())
}

fn print_header(path: &Path, lang: Option<Language>) -> Result<()> {
    let language = match lang {
        Some(language) => language,
        None => resolve(path)?,
    };
    let text = read_text(path)?;
    let header = extract_header(&text, language.rules());
    if !header.is_empty() {
        println!("{}", header);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_size() {
        assert_eq!(parse_file_size("100").unwrap(), 100);
        assert_eq!(parse_file_size("5K").unwrap(), 5 * 1024);
        assert_eq!(parse_file_size("2mb").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_file_size(" 1G ").unwrap(), 1024 * 1024 * 1024);
        assert!(parse_file_size("lots").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["scriptdoc", "src", "-o", "out", "-I", "*.tmp", "-vv"])
            .unwrap();
        assert_eq!(args.path, PathBuf::from("src"));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.ignore, vec!["*.tmp".to_string()]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_lang_requires_header() {
        assert!(Args::try_parse_from(["scriptdoc", "a.txt", "--lang", "stata"]).is_err());
        let args =
            Args::try_parse_from(["scriptdoc", "a.txt", "--header", "--lang", "stata"]).unwrap();
        assert_eq!(args.lang, Some(Language::Stata));
    }
}
