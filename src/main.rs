use anyhow::Result;
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;
use voiceit_icons::{
    error::IconError,
    icon_gen::{self, Layout, APP_ICON_SIZE},
};

#[derive(Debug, Parser)]
#[clap(
    name = "voiceit-icons",
    about = "Render the VoiceIt app icon and its stealth-mode alternates"
)]
struct Args {
    /// Xcode project folder the icons are written into.
    #[clap(long, value_name = "DIR", default_value = "VoiceIt", global = true)]
    project_dir: PathBuf,

    /// Generate only one group of icons. Without a subcommand everything is generated.
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the primary waveform app icon (opaque RGB PNG)
    AppIcon {
        /// Output file. Defaults to the app icon set inside the project folder.
        #[clap(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Edge length in pixels.
        #[clap(long, default_value_t = APP_ICON_SIZE)]
        size: u32,

        /// Also write the asset catalog Contents.json next to the icon.
        #[clap(long)]
        contents_json: bool,
    },

    /// Generate the alternate icons at @2x and @3x (RGBA PNG)
    Alternates {
        /// Output directory. Defaults to Icons/ inside the project folder.
        #[clap(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Icons to generate. Defaults to Calculator, Weather, Notes and Wellness.
        #[clap(long, value_delimiter = ',', value_name = "NAMES")]
        icons: Option<Vec<String>>,
    },
}

fn run(args: Args) -> Result<()> {
    let layout = Layout::for_project(&args.project_dir);

    match args.command {
        None => icon_gen::generate_all(&layout),
        Some(Command::AppIcon {
            output,
            size,
            contents_json,
        }) => {
            let path = output.unwrap_or(layout.app_icon);
            icon_gen::generate_app_icon(&path, size)?;
            if contents_json {
                icon_gen::write_app_icon_contents(&path, size)?;
            }
            println!("\n🎉 App icon generated successfully!");
            println!("📱 The icon will appear when you build the app.");
            Ok(())
        }
        Some(Command::Alternates { output, icons }) => {
            let out_dir = output.unwrap_or(layout.alternates_dir);
            let names = icons.unwrap_or_else(|| {
                icon_gen::alternate_names()
                    .into_iter()
                    .map(String::from)
                    .collect()
            });
            icon_gen::generate_alternate_icons(&names, &out_dir)?;
            icon_gen::print_alternate_summary(&out_dir);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ Error: {err}");
            if let Some(IconError::CanvasUnavailable { .. }) = err.downcast_ref::<IconError>() {
                eprintln!("\n💡 Pass a --size between 1 and 8192.");
            }
            for cause in err.chain().skip(1) {
                eprintln!("   Caused by: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}
