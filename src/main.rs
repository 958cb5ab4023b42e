use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::*;
use rand::Rng;

use gyro::{Gyro, GyroCommand, GyroConfig, SoftwareCanvas, WindowConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Roll and pitch through -180..180 degrees, over and over
    Sweep,
    /// Jump between random attitudes
    Random,
    /// Show the rest position
    Still,
}

#[derive(Debug, Parser)]
#[clap(author, version, about = "Attitude indicator dial", long_about = None)]
struct Cli {
    #[clap(long, value_enum, default_value = "sweep")]
    mode: Mode,
    #[clap(long, default_value_t = 100)]
    posx: i32,
    #[clap(long, default_value_t = 100)]
    posy: i32,
    #[clap(long, default_value_t = 50)]
    radius: i32,
    #[clap(long, default_value_t = 10)]
    padding: i32,
    #[clap(long, default_value_t = 10)]
    tick_height: i32,
    #[clap(long, default_value_t = 320)]
    width: usize,
    #[clap(long, default_value_t = 240)]
    height: usize,
    #[clap(long, default_value_t = 60.0)]
    fps: f64,
    #[clap(long, help = "Use the 0.017 degree factor and ceiling rounding")]
    legacy: bool,
}

fn sweep(sender: Sender<GyroCommand>) {
    loop {
        for angle in -180..180 {
            let commands = [
                GyroCommand::SetRoll(angle as f64),
                GyroCommand::SetPitch(angle as f64),
            ];
            if commands.iter().any(|cmd| sender.send(*cmd).is_err()) {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

fn random(sender: Sender<GyroCommand>) {
    let mut rng = rand::rng();
    loop {
        let command = GyroCommand::SetAttitude {
            pitch: rng.random_range(-45.0..45.0),
            roll: rng.random_range(-30.0..30.0),
            tilt: rng.random_range(-10.0..10.0),
        };
        if sender.send(command).is_err() {
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Cli::parse();
    debug!("{args:?}");

    let mut config = if args.legacy {
        GyroConfig::legacy()
    } else {
        GyroConfig::default()
    };
    config.posx = args.posx;
    config.posy = args.posy;
    config.radius = args.radius;
    config.padding = args.padding;
    config.tick_height = args.tick_height;

    let window = WindowConfig::builder()
        .title(format!("Gyro ({:?})", args.mode))
        .width(args.width)
        .height(args.height)
        .max_framerate(args.fps)
        .build();

    let mut gyro = Gyro::new(config, &mut SoftwareCanvas)?;

    let (sender, receiver) = mpsc::channel();
    match args.mode {
        Mode::Sweep => {
            thread::spawn(move || sweep(sender));
        }
        Mode::Random => {
            thread::spawn(move || random(sender));
        }
        Mode::Still => drop(sender),
    }

    info!("showing gyro in {:?} mode, close the window to exit", args.mode);
    gyro.show_with_commands(&window, receiver)?;
    Ok(())
}
