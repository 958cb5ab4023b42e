use gyro::{Gyro, GyroCommand, GyroConfig, SoftwareCanvas, WindowConfig};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut gyro = Gyro::new(GyroConfig::default(), &mut SoftwareCanvas)?;

    let (sender, receiver) = mpsc::channel();

    // Lift the level bar, then roll one way while pitching the other
    thread::spawn(move || {
        for i in (-9..=0).rev() {
            if sender.send(GyroCommand::SetTilt(i as f64)).is_err() {
                return;
            }
            thread::sleep(Duration::from_millis(100));
        }
        for i in (-14..=0).rev() {
            let commands = [
                GyroCommand::SetRoll(i as f64),
                GyroCommand::SetPitch(-i as f64),
            ];
            if commands.iter().any(|cmd| sender.send(*cmd).is_err()) {
                return;
            }
            thread::sleep(Duration::from_millis(100));
        }
    });

    println!("Tilting the level bar, then rolling and pitching the dial");
    println!("Close the window to exit");

    gyro.show_with_commands(&WindowConfig::default(), receiver)?;
    Ok(())
}
