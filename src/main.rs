use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use festival_pkg::archive;
use festival_pkg::config::{self, ArchiverKind, Config, VersionSource};
use festival_pkg::package::{self, PackageArgs};
use festival_pkg::ui::{self, Reporter};

#[derive(clap::Parser)]
#[command(
    name = "festival-pkg",
    version,
    about = "Package the pre-built Festival.app bundle into a versioned archive"
)]
struct Args {
    #[arg(short, long, help = "Directory to start from [default: current directory]")]
    root: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Manifest path, relative to the project directory")]
    manifest: Option<PathBuf>,

    #[arg(long, help = "Read the version by line pattern instead of parsing TOML")]
    pattern: bool,

    #[arg(long, help = "Name of the project directory")]
    project_dir: Option<String>,

    #[arg(long, help = "Bundle name without the .app suffix")]
    app_name: Option<String>,

    #[arg(short, long, help = "Directory to write the archive to")]
    output_dir: Option<PathBuf>,

    #[arg(short, long, help = "Archiver to use: auto, hdiutil or zip")]
    archiver: Option<ArchiverKind>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Only print notices, errors and the archive path")]
    quiet: bool,
}

impl Args {
    /// Command-line values take precedence over the configuration file.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(manifest) = &self.manifest {
            config.project.manifest = manifest.clone();
        }
        if self.pattern {
            config.version.source = VersionSource::Pattern;
        }
        if let Some(dir) = &self.project_dir {
            config.project.dir_name = dir.clone();
        }
        if let Some(name) = &self.app_name {
            config.project.app_name = name.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.archive.output_dir = Some(dir.clone());
        }
        if let Some(kind) = self.archiver {
            config.archive.archiver = kind;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let reporter = Reporter::new(args.quiet);

    let start_dir = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let mut config = match config::load_config(args.config.as_deref(), &start_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    args.apply_overrides(&mut config);

    let archiver = archive::archiver_for(config.archive.archiver);
    reporter.status(&format!(
        "Packaging {}.app with {}",
        config.project.app_name,
        archiver.name()
    ));

    let package_args = PackageArgs {
        start_dir,
        dry_run: args.dry_run,
    };

    match package::run_package(&package_args, &config, archiver.as_ref()) {
        Ok(result) => {
            reporter.finish(&result);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
