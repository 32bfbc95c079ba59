use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use rirekisho::{build_basic, build_detailed, LocalizationMode, RenderConfig, Renderer, Resume};

/// Generates rirekisho and shokumu-keirekisho PDFs from a JSON résumé.
///
/// Fonts are looked up in `RIREKISHO_FONTS_DIR`, `assets/fonts` next to the
/// binary and the usual system font directories.
#[derive(Parser)]
#[command(author, version, about = "Japanese résumé PDF generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render both documents for a résumé.
    Render(RenderArgs),

    /// Print both document trees as JSON without rendering.
    #[command(aliases = ["show"])]
    Preview(PreviewArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Résumé JSON file.
    input: PathBuf,

    /// Directory the PDFs are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Photo placed in the rirekisho photo box.
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Use ASCII file names instead of `{title}_履歴書.pdf`.
    #[arg(long)]
    ascii_names: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON render configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Localization mode: `plain` or `japanese`.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<LocalizationMode>,

    /// Extra font directory searched before the defaults.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Date printed in the generation stamp (YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Print page numbers in the footer.
    #[arg(long)]
    page_numbers: bool,

    /// Keep non-ASCII text as is.
    #[arg(long)]
    no_sanitize: bool,
}

impl ConfigArgs {
    fn load(&self) -> Result<RenderConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_path(path)?,
            None => RenderConfig::from_env()?,
        };
        if let Some(mode) = self.mode {
            config = config.with_mode(mode);
        }
        if let Some(dir) = &self.fonts_dir {
            config.fonts.prepend_search_dir(dir);
        }
        if let Some(date) = self.date {
            config = config.with_generated_on(date);
        }
        if self.page_numbers {
            config = config.with_page_numbers(true);
        }
        if self.no_sanitize {
            config = config.with_sanitize(false);
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args)]
struct PreviewArgs {
    /// Résumé JSON file.
    input: PathBuf,

    /// Localization mode: `plain` or `japanese`.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<LocalizationMode>,
}

fn parse_mode(value: &str) -> Result<LocalizationMode, String> {
    value.parse().map_err(|err: rirekisho::Error| err.to_string())
}

fn read_resume(path: &Path) -> Result<Resume, Box<dyn Error>> {
    let json = fs::read_to_string(path)?;
    Ok(Resume::from_json_str(&json)?)
}

fn render(args: RenderArgs) -> Result<(), Box<dyn Error>> {
    let mut resume = read_resume(&args.input)?;
    if let Some(photo) = &args.photo {
        resume.photo = Some(fs::read(photo)?);
    }

    let renderer = Renderer::new(args.config.load()?)?;
    fs::create_dir_all(&args.out_dir)?;

    for pdf in renderer.render_resume(&resume)? {
        let path = pdf.write_to_dir(&args.out_dir, args.ascii_names)?;
        println!("{} ({} bytes)", path.display(), pdf.bytes.len());
    }
    Ok(())
}

fn preview(args: PreviewArgs) -> Result<(), Box<dyn Error>> {
    let resume = read_resume(&args.input)?;
    let mode = match args.mode {
        Some(mode) => mode,
        None => RenderConfig::from_env()?.mode,
    };
    info!("Previewing '{}' in {} mode", resume.title, mode);

    let trees = serde_json::json!({
        "rirekisho": build_basic(&resume, mode),
        "shokumu_keirekisho": build_detailed(&resume, mode),
    });
    println!("{}", serde_json::to_string_pretty(&trees)?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => render(args),
        Commands::Preview(args) => preview(args),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
