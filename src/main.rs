use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{Level, info};

use vga_testpattern::host::logging::{setup_logging_file, setup_logging_stdio};
use vga_testpattern::host::screen::headless;
use vga_testpattern::{ChannelWidths, Config, HeadlessPlatform, TimingGenerator};

/// VGA test pattern generator
/// Clocks a 640x480@60Hz color block pattern into a simulated monitor
#[derive(Parser)]
#[command(name = "vga-testpattern")]
#[command(about = "A cycle-accurate VGA timing and test pattern generator")]
struct Args {
    /// Pixel clock in Hz, at least 25.2 MHz
    #[arg(long, default_value_t = 25.2e6)]
    clock_hz: f64,

    /// Name of the VGA resource to bind to
    #[arg(long, default_value = "vga")]
    resource: String,

    /// Index of the VGA resource to bind to
    #[arg(long, default_value_t = 0)]
    index: u32,

    /// Number of frames to generate
    #[arg(long, default_value_t = 2)]
    frames: u64,

    /// Width of the red output in bits
    #[arg(long, default_value_t = 8)]
    red_bits: u8,

    /// Width of the green output in bits
    #[arg(long, default_value_t = 8)]
    green_bits: u8,

    /// Width of the blue output in bits
    #[arg(long, default_value_t = 8)]
    blue_bits: u8,

    /// Save the last captured frame as a PNG
    #[cfg(feature = "screenshot")]
    #[arg(long, value_name = "PATH")]
    screenshot: Option<PathBuf>,

    /// Write the log to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    if let Some(log_file) = &args.log_file {
        setup_logging_file(level, log_file)?;
    } else {
        setup_logging_stdio(level);
    }

    let widths = ChannelWidths {
        r: args.red_bits,
        g: args.green_bits,
        b: args.blue_bits,
    };
    let config = Config::from_args(Some(args.resource), Some(args.index), Some(args.clock_hz));
    let mut platform = HeadlessPlatform::new().with_vga(
        config.resource.name.clone(),
        config.resource.index,
        widths,
    );

    info!("VGA test pattern starting...");
    let (mut generator, mut monitor) = TimingGenerator::build(&config, &mut platform)?;
    let timing = *generator.timing();
    info!("Resource: {}", generator.resource());
    info!(
        "Horizontal: {} active, {} front porch, {} sync, {} back porch",
        timing.h.active, timing.h.fp, timing.h.sync, timing.h.bp
    );
    info!(
        "Vertical: {} active, {} front porch, {} sync, {} back porch",
        timing.v.active, timing.v.fp, timing.v.sync, timing.v.bp
    );

    let start_time = Instant::now();
    let stats = headless::run(&mut generator, &mut monitor, args.frames);
    let elapsed = start_time.elapsed();

    info!("Run completed:");
    info!("  Clock cycles: {}", stats.cycles);
    info!("  Frames generated: {}", stats.frames);
    info!("  Frames displayed: {}", monitor.frames_completed());
    info!("  HSYNC pulses: {}", stats.hsync_pulses);
    info!("  VSYNC pulses: {}", stats.vsync_pulses);
    info!("  Time elapsed: {:?}", elapsed);
    if elapsed.as_secs_f64() > 0.0 {
        info!(
            "  Cycles per second: {:.0}",
            stats.cycles as f64 / elapsed.as_secs_f64()
        );
    }

    #[cfg(feature = "screenshot")]
    if let Some(path) = &args.screenshot {
        if monitor.frames_completed() == 0 {
            tracing::warn!("No complete frame captured, the monitor needs at least 2 frames");
        }
        vga_testpattern::host::screen::screenshot::save_png(&monitor, path)?;
        info!("Screenshot saved to {}", path.display());
    }

    Ok(())
}
