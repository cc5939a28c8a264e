use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::{
    Device, DeviceDescriptor, PollType, Queue, RequestAdapterOptions, Surface,
    SurfaceConfiguration, SurfaceError, TextureFormat, TextureViewDescriptor,
};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::game::{AppStatus, Game};

#[derive(Debug, Clone, Copy)]
pub struct GameContext<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: TextureFormat,
}

#[derive(Debug)]
pub enum GameEvent {
    CloseRequested,
}

/// Runs the frame loop until the window is closed.
///
/// Initialization failures end the loop and come back as the error.
pub fn run() -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut runner = Runner::Uninit;
    event_loop.run_app(&mut runner).context("failed to run app")?;

    match runner {
        Runner::Failed(error) => Err(error),
        _ => Ok(()),
    }
}

enum Runner {
    Uninit,
    Init(InitRunner),
    Failed(anyhow::Error),
}

struct InitRunner {
    window: Arc<Window>,
    device: Device,
    queue: Queue,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    game: Game,
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self, Runner::Uninit) {
            return;
        }

        match InitRunner::new(event_loop) {
            Ok(runner) => *self = Runner::Init(runner),
            Err(error) => {
                log::error!("initialization failed: {error:#}");
                *self = Runner::Failed(error);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if let Runner::Init(runner) = self {
            runner.window_event(event);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Runner::Init(runner) = self {
            runner.about_to_wait(event_loop);
        }
    }
}

impl InitRunner {
    fn new(event_loop: &ActiveEventLoop) -> Result<Self> {
        let window = {
            let window = event_loop
                .create_window(Game::window_attributes())
                .context("failed to create window")?;

            Arc::new(window)
        };

        log::info!("created window {:?}", window.inner_size());

        let device;
        let queue;
        let surface;
        let surface_config;
        {
            let instance = wgpu::Instance::default();

            let adapter = instance.request_adapter(&RequestAdapterOptions::default());
            let adapter = pollster::block_on(adapter).context("failed to get adapter")?;

            let info = adapter.get_info();
            log::info!("using adapter {} ({:?})", info.name, info.backend);

            let device_queue = adapter.request_device(&DeviceDescriptor::default());
            let device_queue = pollster::block_on(device_queue).context("failed to get device")?;
            device = device_queue.0;
            queue = device_queue.1;

            surface = instance
                .create_surface(window.clone())
                .context("failed to create surface")?;

            let size = window.inner_size();
            surface_config = surface
                .get_default_config(&adapter, size.width.max(1), size.height.max(1))
                .context("surface is not supported by the adapter")?;

            surface.configure(&device, &surface_config);
        }

        let game = Game::new(GameContext {
            device: &device,
            queue: &queue,
            surface_format: surface_config.format,
        })?;

        Ok(Self {
            window,
            device,
            queue,
            surface,
            surface_config,
            game,
        })
    }

    fn window_event(&mut self, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                let ctx = GameContext {
                    device: &self.device,
                    queue: &self.queue,
                    surface_format: self.surface_config.format,
                };

                self.game.event(&GameEvent::CloseRequested, ctx);
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::Resized(new_size) => {
                if new_size.width == 0 || new_size.height == 0 {
                    return;
                }

                self.surface_config.width = new_size.width;
                self.surface_config.height = new_size.height;
                self.surface.configure(&self.device, &self.surface_config);
            }

            _ => {}
        }
    }

    fn redraw(&mut self) {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(error) => {
                if needs_reconfigure(&error) {
                    log::warn!("skipping frame, reconfiguring surface: {error}");
                    self.surface.configure(&self.device, &self.surface_config);
                } else {
                    log::warn!("skipping frame: {error}");
                }
                return;
            }
        };

        let ctx = GameContext {
            device: &self.device,
            queue: &self.queue,
            surface_format: self.surface_config.format,
        };

        self.game.render(
            &surface_texture
                .texture
                .create_view(&TextureViewDescriptor::default()),
            ctx,
        );

        self.window.pre_present_notify();
        surface_texture.present();

        if let Err(error) = self.device.poll(PollType::Poll) {
            log::warn!("failed to poll device: {error}");
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let ctx = GameContext {
            device: &self.device,
            queue: &self.queue,
            surface_format: self.surface_config.format,
        };

        self.game.update(ctx);

        match next_step(self.game.status()) {
            LoopStep::RequestRedraw => self.window.request_redraw(),
            LoopStep::PresentAndExit => {
                self.redraw();

                let ctx = GameContext {
                    device: &self.device,
                    queue: &self.queue,
                    surface_format: self.surface_config.format,
                };

                self.game.end(ctx);
                event_loop.exit();
            }
        }
    }
}

/// Lost and outdated surfaces fail every acquire until configured again.
fn needs_reconfigure(error: &SurfaceError) -> bool {
    matches!(error, SurfaceError::Lost | SurfaceError::Outdated)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopStep {
    RequestRedraw,
    /// Draws the last update once, then leaves the loop.
    PresentAndExit,
}

fn next_step(status: AppStatus) -> LoopStep {
    match status {
        AppStatus::Running => LoopStep::RequestRedraw,
        AppStatus::Terminated => LoopStep::PresentAndExit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_surfaces_are_reconfigured() {
        assert!(needs_reconfigure(&SurfaceError::Lost));
        assert!(needs_reconfigure(&SurfaceError::Outdated));
    }

    #[test]
    fn transient_surface_errors_only_skip_the_frame() {
        assert!(!needs_reconfigure(&SurfaceError::Timeout));
        assert!(!needs_reconfigure(&SurfaceError::Other));
        assert!(!needs_reconfigure(&SurfaceError::OutOfMemory));
    }

    #[test]
    fn running_loop_requests_another_redraw() {
        assert_eq!(next_step(AppStatus::Running), LoopStep::RequestRedraw);
    }

    #[test]
    fn terminated_loop_presents_the_last_update_before_exit() {
        assert_eq!(next_step(AppStatus::Terminated), LoopStep::PresentAndExit);
    }
}
