use anyhow::Result;
use glam::Mat4;
use wgpu::TextureView;
use winit::{
    dpi::PhysicalSize,
    window::{Window, WindowAttributes},
};

use crate::{
    asset::{ORBITER_TEXTURE, PULSER_TEXTURE},
    game::{AnimationState, Clock, GameContext, GameEvent, transform},
    renderer::{Renderer, Sprite, Texture, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Running,
    Terminated,
}

impl AppStatus {
    pub fn after(self, event: &GameEvent) -> Self {
        match event {
            GameEvent::CloseRequested => AppStatus::Terminated,
        }
    }
}

#[derive(Debug)]
pub struct Game {
    status: AppStatus,
    clock: Clock,
    animation: AnimationState,
    renderer: Renderer,
    orbiter: Object,
    pulser: Object,
}

#[derive(Debug)]
struct Object {
    sprite: Sprite,
    model: Mat4,
}

impl Game {
    pub fn window_attributes() -> WindowAttributes {
        Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false)
    }

    pub fn new(ctx: GameContext) -> Result<Self> {
        let clock = Clock::new();
        let animation = AnimationState::new();

        let renderer = Renderer::new(ctx.into())?;

        let orbiter_texture = Texture::load(ORBITER_TEXTURE, ctx.into())?;
        let pulser_texture = Texture::load(PULSER_TEXTURE, ctx.into())?;

        let orbiter = Object {
            sprite: Sprite::new(&orbiter_texture, &renderer, ctx.into()),
            model: transform::orbiter_model(&animation),
        };

        let pulser = Object {
            sprite: Sprite::new(&pulser_texture, &renderer, ctx.into()),
            model: transform::pulser_model(&animation),
        };

        Ok(Self {
            status: AppStatus::Running,
            clock,
            animation,
            renderer,
            orbiter,
            pulser,
        })
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn update(&mut self, _: GameContext) {
        let delta_time = self.clock.tick();
        self.animation.advance(delta_time);

        self.orbiter.model = transform::orbiter_model(&self.animation);
        self.pulser.model = transform::pulser_model(&self.animation);

        log::trace!(
            "frame {} dt {delta_time:.4}s, growing {} at {} (not applied), pulse scale {}",
            self.animation.frame_counter(),
            self.animation.is_growing(),
            self.animation.growth_scale(),
            self.animation.pulse_scale(),
        );
    }

    pub fn render(&mut self, output: &TextureView, ctx: GameContext) {
        self.renderer.render_frame(
            |frame| {
                frame.draw_sprite(&self.orbiter.sprite, self.orbiter.model);
                frame.draw_sprite(&self.pulser.sprite, self.pulser.model);
            },
            output,
            ctx.into(),
        );
    }

    pub fn event(&mut self, event: &GameEvent, _: GameContext) {
        match event {
            GameEvent::CloseRequested => log::info!("close requested"),
        }

        self.status = self.status.after(event);
    }

    pub fn end(&mut self, _: GameContext) {
        log::info!("shutting down after {:.1}s", self.clock.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_terminates() {
        assert_eq!(
            AppStatus::Running.after(&GameEvent::CloseRequested),
            AppStatus::Terminated
        );
    }

    #[test]
    fn terminated_stays_terminated() {
        assert_eq!(
            AppStatus::Terminated.after(&GameEvent::CloseRequested),
            AppStatus::Terminated
        );
    }
}
