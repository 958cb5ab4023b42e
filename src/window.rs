use std::sync::mpsc::Receiver;
use std::time::Instant;

use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::config::WindowConfig;
use crate::error::GyroError;
use crate::gyro::{Gyro, GyroCommand};
use crate::scene::{Display, Scene};

/// Presents scenes on a `pixels` surface with a fixed size frame buffer
struct PixelsDisplay<'win> {
    pixels: Pixels<'win>,
    width: usize,
    height: usize,
}

impl Display for PixelsDisplay<'_> {
    fn show(&mut self, scene: &Scene<'_>) -> Result<(), GyroError> {
        scene.render(self.pixels.frame_mut(), self.width, self.height);
        Ok(self.pixels.render()?)
    }
}

impl Gyro {
    /// Open a window and show the dial until it is closed
    pub fn show(&mut self, window: &WindowConfig) -> Result<(), GyroError> {
        self.run_window(window, None)
    }

    /// Like [`Gyro::show`], applying commands from `receiver` before every frame
    pub fn show_with_commands(
        &mut self,
        window: &WindowConfig,
        receiver: Receiver<GyroCommand>,
    ) -> Result<(), GyroError> {
        self.run_window(window, Some(receiver))
    }

    fn drain_commands(&mut self, receiver: &Receiver<GyroCommand>) {
        while let Ok(command) = receiver.try_recv() {
            if let Err(err) = self.apply(command) {
                warn!("dropping {command:?}: {err}");
            }
        }
    }

    fn run_window(
        &mut self,
        config: &WindowConfig,
        receiver: Option<Receiver<GyroCommand>>,
    ) -> Result<(), GyroError> {
        if config.width == 0 || config.height == 0 || config.max_framerate <= 0.0 {
            return Err(GyroError::InvalidConfiguration(format!(
                "window {}x{} at {} fps",
                config.width, config.height, config.max_framerate
            )));
        }

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let pixels = Pixels::new(config.width as u32, config.height as u32, surface_texture)?;
        let mut display = PixelsDisplay {
            pixels,
            width: config.width,
            height: config.height,
        };
        info!(
            "presenting {}x{} frame on a {}x{} surface",
            config.width, config.height, size.width, size.height
        );

        let frame_duration = std::time::Duration::from_secs_f64(1.0 / config.max_framerate);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        info!("window closed");
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(err) = display
                            .pixels
                            .resize_surface(new_size.width, new_size.height)
                        {
                            error!("resizing surface failed: {err}");
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            self.drain_commands(receiver);
                        }
                        if let Err(err) = display.show(&self.scene()) {
                            error!("{err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
