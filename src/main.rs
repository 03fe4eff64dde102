use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Convert a directory of Markdown files to a static HTML site")]
struct Cli {
    /// Prefix for root-relative links (defaults to the config value, usually "/")
    base_path: Option<String>,

    /// Site config file
    #[arg(short, long, default_value = "site.toml")]
    config: PathBuf,

    /// Directory of Markdown content
    #[arg(long)]
    content: Option<PathBuf>,

    /// Directory of static assets copied verbatim
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// Output directory (cleared before each build)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML template containing {{ Title }} and {{ Content }}
    #[arg(short, long)]
    template: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = Config::load(&self.config)
            .with_context(|| format!("loading {}", self.config.display()))?;
        if let Some(base_path) = self.base_path {
            config.base_path = base_path;
        }
        if let Some(content) = self.content {
            config.content_dir = content;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(template) = self.template {
            config.template = template;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.into_config()?;
    let report = mdsite::site::build_site(&config)
        .with_context(|| format!("building site into {}", config.output_dir.display()))?;

    log::info!(
        "copied {} static files, generated {} pages",
        report.assets_copied,
        report.pages.len()
    );
    println!("Created {}", config.output_dir.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
