use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use hwdash::{commands, DashError};

fn per_core_arg() -> Arg {
    Arg::new("per-core")
        .long("per-core")
        .help("Show CPU usage as the sum over cores (0-400%) instead of 0-100%")
        .action(ArgAction::SetTrue)
}

fn run_command() -> Command {
    Command::new("run")
        .about("Drive the LCD dashboard until interrupted (default)")
        .arg(per_core_arg())
        .arg(
            Arg::new("sink")
                .long("sink")
                .value_name("KIND")
                .help("Display back end: spi, framebuffer or png")
                .default_value("spi"),
        )
        .arg(
            Arg::new("device")
                .long("device")
                .value_name("PATH")
                .help("spidev node, framebuffer device or PNG output path (default: /dev/spidev0.0, /dev/fb1 or ./frame.png)"),
        )
        .arg(
            Arg::new("backlight")
                .long("backlight")
                .value_name("DIR")
                .help("sysfs backlight directory for the framebuffer sink, e.g. /sys/class/backlight/fb_st7789v"),
        )
        .arg(
            Arg::new("no-splash")
                .long("no-splash")
                .help("Skip the splash screen")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("skip-checks")
                .long("skip-checks")
                .help("Do not verify Raspberry Pi / SPI / sensor support before starting")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    hwdash::init_logging();

    let matches = Command::new("hwdash")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hardware monitor dashboard for SPI-attached LCD panels")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .subcommand(run_command())
        .subcommand(Command::new("check").about("Verify the host can drive the dashboard"))
        .subcommand(
            Command::new("snapshot")
                .about("Collect every metric once and print it as JSON")
                .arg(per_core_arg()),
        )
        .subcommand(Command::new("version").about("Shows version information"))
        .get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    let result = match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches),
        Some(("check", _)) => commands::check(),
        Some(("snapshot", sub_matches)) => commands::snapshot(sub_matches),
        Some(("version", _)) => commands::version(),
        _ => commands::run::run_with(commands::run::RunOptions::default()),
    };

    if let Err(e) = &result {
        match e.downcast_ref::<DashError>() {
            Some(kind) => log::error!("{:#} ({})", e, kind.classification()),
            None => log::error!("{:#}", e),
        }
    }
    result
}
