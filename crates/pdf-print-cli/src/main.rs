use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use pdf_print::{
    Dpi, HardMargins, JobSummary, MarginMode, PageStatus, PrintOptions, PrintSequencer,
    ScalingMode, SheetWriter, SpoolDocument, VirtualPrinter,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfp", about = "Print PDF pages onto printer sheets", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a PDF to a virtual printer and write the sheets as a PDF
    Print {
        #[command(flatten)]
        job: JobArgs,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show where every page would land without writing anything
    Plan {
        #[command(flatten)]
        job: JobArgs,
    },
}

#[derive(Args)]
struct JobArgs {
    /// Input PDF file
    #[arg(short, long)]
    input: PathBuf,

    /// Job options JSON; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paper loaded in the printer
    #[arg(long, default_value = "letter", value_enum)]
    paper: PaperArg,

    /// Start the printer in landscape
    #[arg(long)]
    landscape: bool,

    /// Horizontal hard margin in hundredths of an inch
    #[arg(long, default_value = "0")]
    hard_margin_x: f64,

    /// Vertical hard margin in hundredths of an inch
    #[arg(long, default_value = "0")]
    hard_margin_y: f64,

    /// Horizontal device resolution
    #[arg(long, default_value = "600", value_parser = parse_dpi)]
    dpi_x: f64,

    /// Vertical device resolution
    #[arg(long, default_value = "600", value_parser = parse_dpi)]
    dpi_y: f64,

    /// Printer comes out in the opposite orientation from its landscape flag
    #[arg(long)]
    misreports_landscape: bool,

    /// Scaling mode
    #[arg(long, value_enum)]
    scaling: Option<ScalingArg>,

    /// Percentage for custom scaling (default 100)
    #[arg(long)]
    scale_percent: Option<u32>,

    /// Margin mode
    #[arg(long, value_enum)]
    margin_mode: Option<MarginArg>,

    /// Turn the sheet to match each page
    #[arg(long)]
    auto_orientation: bool,

    /// First page to print (1-based)
    #[arg(long)]
    from: Option<u32>,

    /// Last page to print (1-based)
    #[arg(long)]
    to: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalingArg {
    Fit,
    Actual,
    Shrink,
    Custom,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarginArg {
    Shrink,
    Hard,
}

impl From<PaperArg> for pdf_print::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<MarginArg> for MarginMode {
    fn from(arg: MarginArg) -> Self {
        match arg {
            MarginArg::Shrink => Self::ShrinkToMargin,
            MarginArg::Hard => Self::UseHardMargin,
        }
    }
}

fn parse_dpi(value: &str) -> std::result::Result<f64, String> {
    let dpi: f64 = value.parse().map_err(|e| format!("{}", e))?;
    if dpi.is_finite() && dpi > 0.0 {
        Ok(dpi)
    } else {
        Err(format!("resolution must be positive, got {}", value))
    }
}

fn scaling_mode(arg: ScalingArg, percent: u32) -> ScalingMode {
    match arg {
        ScalingArg::Fit => ScalingMode::FitSize,
        ScalingArg::Actual => ScalingMode::ActualSize,
        ScalingArg::Shrink => ScalingMode::ShrinkOversized,
        ScalingArg::Custom => ScalingMode::CustomScale(percent),
    }
}

impl JobArgs {
    async fn options(&self) -> Result<PrintOptions> {
        let options = match &self.config {
            Some(path) => PrintOptions::load(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => PrintOptions::default(),
        };
        Ok(self.apply_overrides(options))
    }

    /// Layer the command-line flags over options from a config file
    fn apply_overrides(&self, mut options: PrintOptions) -> PrintOptions {
        if let Some(scaling) = self.scaling {
            let percent = match options.scaling {
                ScalingMode::CustomScale(percent) => percent,
                _ => 100,
            };
            options.scaling = scaling_mode(scaling, percent);
        }
        if let Some(percent) = self.scale_percent {
            match options.scaling {
                ScalingMode::CustomScale(_) => {
                    options.scaling = ScalingMode::CustomScale(percent);
                }
                _ => warn!("--scale-percent only applies to custom scaling; ignoring"),
            }
        }
        if let Some(margin_mode) = self.margin_mode {
            options.margin_mode = margin_mode.into();
        }
        if self.auto_orientation {
            options.auto_orientation = true;
        }
        if let Some(from) = self.from {
            options.from_page = from;
        }
        if let Some(to) = self.to {
            options.to_page = to;
        }
        options
    }

    fn printer(&self) -> VirtualPrinter {
        VirtualPrinter::new(self.paper.into())
            .with_landscape(self.landscape)
            .with_hard_margins(HardMargins::new(self.hard_margin_x, self.hard_margin_y))
            .with_dpi(Dpi::new(self.dpi_x, self.dpi_y))
            .with_misreported_landscape(self.misreports_landscape)
    }

    async fn run(&self) -> Result<(JobSummary, SheetWriter)> {
        let options = self.options().await?;
        let source = pdf_print::load_pdf(&self.input)
            .await
            .with_context(|| format!("Failed to load {}", self.input.display()))?;
        let document = SpoolDocument::new(source)?;

        let mut sequencer = PrintSequencer::new(&document, options)?;
        let mut printer = self.printer();
        let mut writer = SheetWriter::new();
        let summary = pdf_print::run_print_job(&mut sequencer, &mut printer, &mut writer);

        Ok((summary, writer))
    }
}

fn print_plan(input: &Path, summary: &JobSummary) {
    println!("Print plan for {}:", input.display());
    for report in &summary.pages {
        let page = report.page_index + 1;
        match &report.status {
            PageStatus::Rendered {
                destination,
                pixels,
                fallback,
            } => {
                println!(
                    "  Page {}: {:.1},{:.1} {:.1}x{:.1} (1/100\") -> {},{} {}x{} px{}",
                    page,
                    destination.left,
                    destination.top,
                    destination.width,
                    destination.height,
                    pixels.x,
                    pixels.y,
                    pixels.width,
                    pixels.height,
                    if *fallback { " [full sheet]" } else { "" }
                );
            }
            PageStatus::OutOfRange => println!("  Page {}: outside the document", page),
            PageStatus::Degenerate(e) => println!("  Page {}: skipped ({})", page, e),
            PageStatus::RenderFailed(e) => println!("  Page {}: failed ({})", page, e),
            PageStatus::Inactive => println!("  Page {}: job not running", page),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Print { job, output } => {
            let (summary, writer) = job.run().await?;
            let sheets = writer.sheet_count();
            if sheets == 0 {
                return Err(pdf_print::PrintError::NoPages.into());
            }
            pdf_print::save_pdf(writer.finish(), &output).await?;

            info!(
                "{} of {} pages rendered ({} on the full sheet, {} failed)",
                summary.rendered_count(),
                summary.pages.len(),
                summary.fallback_count(),
                summary.failed_count()
            );
            println!("Printed {} sheets → {}", sheets, output.display());
        }

        Commands::Plan { job } => {
            let (summary, _) = job.run().await?;
            print_plan(&job.input, &summary);
        }
    }

    Ok(())
}
