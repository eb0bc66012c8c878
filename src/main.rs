use clap::{Parser, Subcommand};
use folio::page::{self, BuildOptions};
use folio::publish::{self, GitCli, PublishRequest};
use folio::{config, output};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Build a single-page portfolio from templates and project markdown")]
#[command(long_about = "\
Build a single-page portfolio from templates and project markdown

Site structure:

  site/
  ├── folio.toml               # Optional config (run 'folio gen-config')
  ├── presentation.md          # Hero text
  ├── cv.pdf                   # Résumé (used with --resume / --publish)
  ├── templates/               # index, hero, projects, modal + css/ + js/
  └── projects/
      ├── 1.md                 # gh:<url>, tech:<list>, yt:<url>, # Title, body
      ├── 1-1.png              # Cover image and first section image
      └── 1-2.jpg              # Next section image

Project images are copied to public/projects/ and the page is written to
index.html. With --publish, both are copied into the website repository
and committed there (not pushed).")]
#[command(version)]
struct Cli {
    /// Site root containing templates/ and projects/
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Add the résumé download button to the hero block
    #[arg(long, global = true)]
    resume: bool,

    /// Copy the result into the website repository and commit it
    #[arg(long, global = true)]
    publish: bool,

    /// Website repository to publish into, relative to the current directory
    /// (overrides publish.target, which is relative to --root)
    #[arg(long, global = true)]
    target: Option<PathBuf>,

    /// Log debug details (image probes, copied files, git commands)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Copy assets, assemble and write the page (default)
    Build,
    /// Validate inputs and report placeholders without writing anything
    Check,
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command.unwrap_or(Command::Build) {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            println!("==> Checking {}", cli.root.display());
            let report = page::check(&site_config, &cli.root)?;
            output::print_check_output(&report, &cli.root);
            if !report.missing.is_empty() {
                return Err(format!("{} required inputs missing", report.missing.len()).into());
            }
            println!("==> Site is valid");
        }
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            // The flag is relative to where folio runs, the config key to the site root
            let target = cli
                .target
                .clone()
                .or_else(|| site_config.publish.target.as_ref().map(|t| cli.root.join(t)));
            if cli.publish && target.is_none() {
                return Err(
                    "--publish needs a target: pass --target or set publish.target in folio.toml"
                        .into(),
                );
            }

            let options = BuildOptions { resume: cli.resume };
            let report = page::build(&site_config, &cli.root, options)?;
            output::print_build_output(&report, &cli.root, &site_config.output.assets_dir);

            if let Some(target) = target.filter(|_| cli.publish) {
                let assets_dir = cli.root.join(&site_config.output.assets_dir);
                let resume = cli.root.join(&site_config.resume.file);
                let request = PublishRequest {
                    page: &report.output,
                    assets_dir: &assets_dir,
                    resume: Some(&resume),
                    target: &target,
                };
                let published = publish::publish(&request, &site_config.publish, &GitCli)?;
                output::print_publish_output(&published, &target);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()
}
