use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use release_version::config::{self, Config};
use release_version::git::{Git2TagSource, InMemoryTags, TagSource};
use release_version::manifest::{detect_manifest, read_manifest_version};
use release_version::{logging, ui, ReleaseVersionError, VersionResolver};

#[derive(clap::Parser)]
#[command(
    name = "release-version",
    version,
    about = "Compute the next release version from git tags and the project manifest"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v, -vv, -vvv)"
    )]
    verbose: u8,

    #[arg(short, long, global = true, help = "Only print the result")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the next release version
    Next {
        #[command(flatten)]
        source: TagArgs,

        #[arg(
            long,
            value_name = "VERSION",
            conflicts_with_all = ["manifest", "no_manifest"],
            help = "Current project version instead of reading the manifest"
        )]
        current_version: Option<String>,

        #[arg(long, value_name = "FILE", help = "Manifest to read the current version from")]
        manifest: Option<PathBuf>,

        #[arg(long, conflicts_with = "manifest", help = "Do not read any manifest")]
        no_manifest: bool,
    },

    /// List tags in version order, oldest first
    Tags {
        #[command(flatten)]
        source: TagArgs,
    },
}

#[derive(clap::Args)]
struct TagArgs {
    #[arg(long, default_value = ".", help = "Repository to read tags from")]
    repo: PathBuf,

    #[arg(
        short,
        long = "tag",
        value_name = "TAG",
        conflicts_with = "fetch",
        help = "Use these tags instead of reading the repository"
    )]
    tags: Vec<String>,

    #[arg(long, help = "Fetch tags from the remote before reading them")]
    fetch: bool,

    #[arg(long, requires = "fetch", help = "Remote to fetch from [default: origin]")]
    remote: Option<String>,

    #[arg(long, requires = "fetch", help = "Delete local tags before fetching")]
    replace_tags: bool,
}

fn main() {
    let args = Args::parse();
    logging::init_logging(logging::level_for_verbosity(args.verbose));

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));

        let invalid_tag = e
            .downcast_ref::<ReleaseVersionError>()
            .is_some_and(ReleaseVersionError::is_invalid_tag);
        if invalid_tag {
            ui::display_status(
                "Set the latest tag to major.minor.patch to calculate the next release version",
            );
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let resolver = VersionResolver::new(&config.resolver)?;

    match args.command {
        Command::Next {
            source,
            current_version,
            manifest,
            no_manifest,
        } => {
            let (tag_source, base_dir) = open_tag_source(&source, &config, args.quiet)?;
            let tags = tag_source.list_tags()?;

            let current_version = match current_version {
                Some(version) => Some(version),
                None if no_manifest => None,
                None => manifest_version(manifest, &config, &base_dir)?,
            };

            let resolution = resolver.resolve(&tags, current_version.as_deref())?;
            if !args.quiet {
                ui::display_resolution(&resolution);
            }
            println!("{}", resolution.version);
        }
        Command::Tags { source } => {
            let (tag_source, _) = open_tag_source(&source, &config, args.quiet)?;
            let mut tags = tag_source.list_tags()?;
            resolver.version_sort().sort(&mut tags);

            for tag in tags {
                println!("{}", tag);
            }
        }
    }

    Ok(())
}

/// Pick the tag source and the directory manifests are looked up in
fn open_tag_source(
    source: &TagArgs,
    config: &Config,
    quiet: bool,
) -> Result<(Box<dyn TagSource>, PathBuf)> {
    if !source.tags.is_empty() {
        return Ok((
            Box::new(InMemoryTags::new(source.tags.iter().cloned())),
            source.repo.clone(),
        ));
    }

    let repo = Git2TagSource::open(&source.repo)
        .with_context(|| format!("Git repository error in {}", source.repo.display()))?;

    if source.fetch {
        let remote = source
            .remote
            .clone()
            .or_else(|| config.git.remote.clone())
            .unwrap_or_else(|| "origin".to_string());

        if !quiet {
            ui::display_status(&format!("Fetching tags from remote '{}'...", remote));
        }
        repo.fetch_tags(&remote, source.replace_tags)?;
    }

    let base_dir = repo.workdir()?.unwrap_or_else(|| source.repo.clone());
    Ok((Box::new(repo), base_dir))
}

fn manifest_version(
    explicit: Option<PathBuf>,
    config: &Config,
    base_dir: &Path,
) -> Result<Option<String>> {
    let path = explicit
        .or_else(|| config.manifest.path.as_ref().map(|p| base_dir.join(p)))
        .or_else(|| detect_manifest(base_dir));

    match path {
        Some(path) => Ok(read_manifest_version(&path)?),
        None => Ok(None),
    }
}
