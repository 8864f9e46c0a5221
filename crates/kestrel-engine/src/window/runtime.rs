use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, Engine, EngineConfig, FrameCtx, UpdateCtx};
use crate::render::{Renderer, RendererInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "kestrel".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Scheduling model: every redraw callback requests the next one while the
/// engine is running; `Engine::stop` simply lets scheduling lapse, which is
/// the loop's only termination path.
pub struct Runtime;

impl Runtime {
    /// Runs the loop until the app exits or the window closes.
    ///
    /// Blocks the calling thread. Asynchronous setup (shader sources,
    /// resources) must complete before this is called — the loop never
    /// awaits.
    pub fn run<A>(
        config: RuntimeConfig,
        renderer_init: RendererInit,
        engine_config: EngineConfig,
        app: A,
    ) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState {
            config,
            renderer_init,
            engine: Engine::new(engine_config),
            app,
            entry: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    renderer: Renderer<'this>,
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    renderer_init: RendererInit,
    engine: Engine,
    app: A,
    entry: Option<WindowEntry>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let renderer_init = self.renderer_init.clone();

        let entry = WindowEntryBuilder {
            window,
            renderer_builder: |w| Renderer::init(w, renderer_init),
        }
        .build();

        if !entry.with_renderer(|r| r.has_context()) {
            log::warn!("renderer has no GPU context; frames will be skipped");
        }

        self.entry = Some(entry);
        Ok(id)
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.engine.stop();
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_window(event_loop) {
            Ok(_) => {
                self.engine.start();
                if let Some(entry) = &self.entry {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.shutdown(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.engine.is_running() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: each callback schedules the next, in the style
        // of an animation-frame loop.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        // Split borrows so the app and engine stay reachable while the
        // entry's self-referencing closures run.
        let (app, engine, entry) = (&mut self.app, &mut self.engine, self.entry.as_mut());

        let Some(entry) = entry else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }

            // The host window's focus state is the pause input: time spent
            // unfocused is absorbed, not simulated.
            WindowEvent::Focused(focused) => {
                engine.set_focused(*focused);
            }

            WindowEvent::Resized(new_size) => {
                entry.with_renderer_mut(|r| {
                    if r.auto_resize() {
                        r.resize(*new_size);
                    }
                });
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_renderer_mut(|r| {
                    if r.auto_resize() {
                        r.resize(new_size);
                    }
                });
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let plan = engine.step(Instant::now());
                let tick_interval = engine.tick_interval();
                let base_tick = engine.tick_count() - u64::from(plan.updates);

                for i in 0..plan.updates {
                    let ctx = UpdateCtx {
                        delta: plan.remainder + f64::from(plan.updates - i),
                        tick: base_tick + u64::from(i),
                        tick_interval,
                    };
                    app.update(&ctx);
                }

                if plan.render {
                    let fps = engine.fps();
                    let tps = engine.tps();
                    let control = entry.with_renderer_mut(|renderer| {
                        let mut ctx = FrameCtx { renderer, fps, tps };
                        app.render(&mut ctx)
                    });

                    if control == AppControl::Exit {
                        self.shutdown(event_loop);
                    }
                }
            }

            _ => {}
        }
    }
}
