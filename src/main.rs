use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use pip_helpers::commands::{self, Config, ConfigOptions, ReleaseFormat};
use pip_helpers::{OutputMode, ReleaseQuery, SortKey};

/// pip-helpers - install, remove and query Python packages
///
/// Wraps `python -m pip` for install, uninstall, upgrade and freeze, and
/// queries the package index for releases matching a descriptor.
///
/// Examples:
///   pip-helpers releases "requests>=2.0,<3.0"   # Matching releases, oldest first
///   pip-helpers install requests==2.31.0         # Install through pip
#[derive(Parser, Debug)]
#[command(author, version = env!("PIP_HELPERS_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Package index JSON URL; `{name}` is replaced by the package name
    #[arg(
        long = "index-url",
        env = "PIP_HELPERS_INDEX_URL",
        value_name = "URL",
        global = true
    )]
    pub index_url: Option<String>,

    /// Python interpreter used to run pip
    #[arg(
        long = "python",
        env = "PIP_HELPERS_PYTHON",
        value_name = "PATH",
        global = true
    )]
    pub python: Option<PathBuf>,

    /// Timeout for package index requests, in seconds
    #[arg(long = "timeout", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Let pip write directly to the terminal instead of capturing its output
    #[arg(long = "no-capture", global = true)]
    pub no_capture: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Install packages
    Install(PackagesArgs),

    /// Uninstall packages
    Uninstall(PackagesArgs),

    /// Upgrade packages
    Upgrade(PackagesArgs),

    /// List installed packages
    Freeze,

    /// List releases on the package index matching a descriptor
    Releases(ReleasesArgs),
}

#[derive(clap::Args, Debug)]
pub struct PackagesArgs {
    /// Requirement strings passed to pip (e.g. "foo", "foo==1.0")
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ReleasesArgs {
    /// Package descriptor (e.g. "foo", "foo==1.0", "foo>=1.0,<2.0")
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor: String,

    /// Include pre-releases (versions containing ".dev" or ".pre")
    #[arg(long)]
    pub pre: bool,

    /// Include releases whose files have all been yanked
    #[arg(long = "include-yanked")]
    pub include_yanked: bool,

    /// Order of the listed releases
    #[arg(long, value_enum, default_value_t = SortArg::Version)]
    pub sort: SortArg,

    /// Print only the last release
    #[arg(long)]
    pub latest: bool,

    /// Print releases as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    /// Natural version order
    Version,
    /// Upload time
    UploadTime,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Version => SortKey::Version,
            SortArg::UploadTime => SortKey::UploadTime,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = Config::new(ConfigOptions {
        index_url: cli.index_url,
        python: cli.python,
        timeout: cli.timeout.map(Duration::from_secs),
    })?;
    let mode = if cli.no_capture {
        OutputMode::Inherit
    } else {
        OutputMode::Capture
    };

    match cli.command {
        Commands::Install(args) => {
            print_output(commands::install(&config.runner, &args.packages, mode).await?)
        }
        Commands::Uninstall(args) => {
            print_output(commands::uninstall(&config.runner, &args.packages, mode).await?)
        }
        Commands::Upgrade(args) => {
            print_output(commands::upgrade(&config.runner, &args.packages, mode).await?)
        }
        Commands::Freeze => {
            if let Some(lines) = commands::freeze(&config.runner, mode).await? {
                for line in lines {
                    println!("{}", line);
                }
            }
        }
        Commands::Releases(args) => {
            let query = ReleaseQuery {
                include_prerelease: args.pre,
                include_yanked: args.include_yanked,
                sort: args.sort.into(),
            };
            let (_, releases) = commands::releases(&config.index, &args.descriptor, &query).await?;
            let format = ReleaseFormat {
                latest: args.latest,
                json: args.json,
            };
            println!("{}", commands::render_releases(&releases, format)?);
        }
    }
    Ok(())
}

fn print_output(output: Option<String>) {
    if let Some(text) = output {
        print!("{}", text);
    }
}
