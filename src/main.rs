use clap::{Parser, Subcommand};
use infopress::config::{self, Layout};
use infopress::{output, parse, publish};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("INFOPRESS_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("INFOPRESS_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "infopress")]
#[command(about = "Generate WordPress content from .info software descriptions")]
#[command(long_about = "\
Generate WordPress content from .info software descriptions

Each configs/<name>.info file produces three files named after its title:

  output/<title>.html               content-only HTML (h3, p, ol, short-codes)
  previews/<title>_preview.html     standalone page for checking in a browser
  contents/<title>_wordpress.txt    the same content, for the text editor

Config format:

  [软件信息]
  标题 = 软件标题           # used for file names
  名称 = 软件完整名称
  版本 = 1.0.0
  描述 = 第一段||第二段

  [功能介绍]
  1 = 功能一

  [软件截图]
  1 = 标题|来源|https://example.com/a.png

  [下载链接]
  https://pan.example.com/s/abc 提取码

  [额外信息]
  任意文本，逐行保留

Run without a command to build every config.
Run 'infopress gen-config' to print a documented infopress.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project directory (holds infopress.toml and configs/)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Show debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every config in the configs directory (default)
    Build,
    /// Generate a single config by name (file stem)
    Gen {
        /// Config name, e.g. `pastebar` for configs/pastebar.info
        name: String,
    },
    /// List configs and whether their files have been generated
    List,
    /// Delete generated files
    Clean,
    /// Print the parsed record of a config as JSON
    Show {
        /// Config name, e.g. `pastebar` for configs/pastebar.info
        name: String,
    },
    /// Print a stock infopress.toml with all options documented
    GenConfig,
}

/// Install the log subscriber. `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let layout = Layout::load(&cli.root)?;
            let report = publish::generate_all(&layout)?;
            output::print_build_output(&report, &layout);
            if !report.failed.is_empty() {
                return Err(format!("{} configs failed", report.failed.len()).into());
            }
        }
        Command::Gen { name } => {
            let layout = Layout::load(&cli.root)?;
            let generated = publish::generate_named(&name, &layout)?;
            output::print_single_output(&generated, &layout);
        }
        Command::List => {
            let layout = Layout::load(&cli.root)?;
            let entries = publish::list(&layout)?;
            output::print_list_output(&entries, &layout);
        }
        Command::Clean => {
            let layout = Layout::load(&cli.root)?;
            let cleaned = publish::clean(&layout)?;
            output::print_clean_output(&cleaned, &layout);
        }
        Command::Show { name } => {
            let layout = Layout::load(&cli.root)?;
            let path = layout.config_path(&name);
            if !path.is_file() {
                return Err(publish::PublishError::MissingConfig(path).into());
            }
            let record = parse::parse_file(&path);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
