//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hostprep - scraper host provisioner and launcher
///
/// Gets a clean host into a runnable state for the GeoCentralis scraper, then
/// launches the scraper under an external service supervisor.
#[derive(Parser, Debug)]
#[command(
    name = "hostprep",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Scraper host provisioner and launcher",
    long_about = "hostprep provisions a host to run the GeoCentralis scraper (OS packages, \
                  headless browser, isolated Python environment) and launches the scraper \
                  via process replacement so a service supervisor observes the real \
                  application lifecycle.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  hostprep provision\n    \
                  hostprep launch\n    \
                  hostprep launch -- --auto-start\n    \
                  hostprep service-unit > /etc/systemd/system/scraper.service\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/geocentralis/hostprep"
)]
pub struct Cli {
    /// Application directory holding the manifest and isolated environment
    /// (defaults to current directory)
    #[arg(long, short = 'd', global = true)]
    pub app_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the host: OS packages, headless browser, isolated environment
    Provision(ProvisionArgs),

    /// Activate the isolated environment and hand off to the application
    Launch(LaunchArgs),

    /// Print a systemd unit definition for the launcher
    ServiceUnit,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the provision command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Provision the current directory:\n    hostprep provision\n\n\
                  Provision a deployed checkout:\n    hostprep provision --app-dir /srv/scraper\n\n\
                  Provisioning is idempotent: re-running after success is a no-op.")]
pub struct ProvisionArgs {}

/// Arguments for the launch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Launch the application:\n    hostprep launch\n\n\
                  Import data and start workers on boot:\n    hostprep launch -- --auto-start\n\n\
                  Extra arguments are forwarded verbatim to the application; the bind \
                  address is always forced to all interfaces on the fixed port.")]
pub struct LaunchArgs {
    /// Extra arguments forwarded unchanged to the application
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    hostprep completions --shell bash > ~/.bash_completion.d/hostprep\n\n\
                  Generate zsh completions:\n    hostprep completions --shell zsh > ~/.zfunc/_hostprep\n\n\
                  Generate fish completions:\n    hostprep completions --shell fish > ~/.config/fish/completions/hostprep.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
