use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, MouseScrollDelta, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::HeroConfig;
use crate::error::Result;
use crate::gfx::{
    assets::{load_model, load_video},
    backdrop_animates, backdrop_color, intro_backdrop, AssetHandle, FrameDesc, GpuModel,
    HeroCamera, HeroUniform, ModelData, RenderEngine, VideoAsset,
};
use crate::page::{Page, PageInput, ScrollKey};
use crate::ui::{hero_debug_panel, OverlayInfo, UiManager};

pub struct HeroApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: HeroConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    camera: HeroCamera,
    page: Page,
    model: AssetHandle<ModelData>,
    gpu_model: Option<GpuModel>,
    video: AssetHandle<VideoAsset>,
    show_overlay: bool,
    started: Instant,
}

impl HeroApp {
    /// Loads the assets and mounts the hero. The window and GPU are created
    /// once the event loop resumes.
    pub fn new(config: HeroConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let model = AssetHandle::from_result("model", load_model(&config.assets.model_path));
        if let Some(model) = model.get() {
            log::info!(
                "loaded model {:?} ({} meshes, {} triangles)",
                model.name,
                model.meshes.len(),
                model.triangle_count()
            );
        }
        let video = AssetHandle::from_result("video", load_video(&config.assets.video_path));

        let mut page = Page::new(&config.page, config.window.height as f32);
        page.mount_hero(&config);

        Ok(Self {
            event_loop,
            app_state: AppState {
                camera: HeroCamera::new(config.window.width, config.window.height),
                show_overlay: config.window.show_overlay,
                window: None,
                render_engine: None,
                ui_manager: None,
                page,
                model,
                gpu_model: None,
                video,
                started: Instant::now(),
                config,
            },
        })
    }

    /// Runs the event loop until the window closes.
    pub fn run(mut self) -> Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Wait);
        self.event_loop.run_app(&mut self.app_state)?;
        self.app_state.page.unmount_hero();
        Ok(())
    }
}

impl AppState {
    fn request_redraw(&self) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    /// Converts a winit wheel delta to page pixels, positive = scroll down.
    fn wheel_pixels(&self, delta: MouseScrollDelta) -> f32 {
        match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * self.config.page.pixels_per_line,
            MouseScrollDelta::PixelDelta(position) => -position.y as f32,
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode) -> bool {
        let scroll_key = match key_code {
            KeyCode::Escape => {
                event_loop.exit();
                return false;
            }
            KeyCode::F1 => {
                self.show_overlay = !self.show_overlay;
                log::debug!("debug overlay {}", if self.show_overlay { "on" } else { "off" });
                return true;
            }
            KeyCode::ArrowUp => ScrollKey::LineUp,
            KeyCode::ArrowDown | KeyCode::Space => ScrollKey::LineDown,
            KeyCode::PageUp => ScrollKey::PageUp,
            KeyCode::PageDown => ScrollKey::PageDown,
            KeyCode::Home => ScrollKey::Home,
            KeyCode::End => ScrollKey::End,
            _ => return false,
        };
        self.page.dispatch(PageInput::Key(scroll_key))
    }

    fn overlay_info(&self) -> OverlayInfo {
        OverlayInfo {
            hero: self.page.hero_snapshot(),
            scroll_y: self.page.scroll_y(),
            max_scroll: self.page.max_scroll(),
            scroll_locked: self.page.scroll_locked(),
            section: self.page.current_section().map(|section| section.name.clone()),
            last_input: self
                .page
                .hero()
                .and_then(|hero| hero.controller().state().last_input_at())
                .map(|at| at.elapsed()),
            model_ready: self.model.is_ready(),
            video_ready: self.video.is_ready(),
        }
    }

    fn redraw(&mut self) {
        self.page.frame();

        let snapshot = self.page.hero_snapshot();
        let video_ready = self.video.is_ready();
        let backdrop = match &snapshot {
            Some(snapshot) => {
                backdrop_color(snapshot, video_ready, self.started.elapsed().as_secs_f64())
            }
            None => intro_backdrop(),
        };

        let visible_model = match (&snapshot, self.gpu_model.as_ref(), self.page.hero()) {
            (Some(snapshot), Some(model), Some(hero)) if snapshot.model_visible => {
                Some((model, hero.visual().transform(), snapshot.model_opacity))
            }
            _ => None,
        };

        let overlay_info = self.overlay_info();
        let show_overlay = self.show_overlay;
        let (Some(render_engine), Some(window)) = (self.render_engine.as_mut(), self.window.as_ref())
        else {
            return;
        };

        if let Some((model, transform, opacity)) = visible_model {
            render_engine.update(HeroUniform::new(
                &self.camera,
                transform,
                model.base_color,
                opacity,
            ));
        }

        let frame = FrameDesc {
            backdrop,
            model: visible_model.map(|(model, _, _)| model),
        };
        let ui_manager = self.ui_manager.as_mut().filter(|_| show_overlay);
        let result = render_engine.render_frame(&frame, |device, queue, encoder, view| {
            if let Some(ui_manager) = ui_manager {
                ui_manager.draw(device, queue, encoder, window, view, |ui| {
                    hero_debug_panel(ui, &overlay_info);
                });
            }
        });
        if let Err(err) = result {
            log::warn!("Dropped frame: {err}");
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let (width, height): (u32, u32) = window.inner_size().into();
        let window_clone = window.clone();
        let renderer = match pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height).await
        }) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("Failed to initialise rendering: {err}");
                event_loop.exit();
                return;
            }
        };

        self.gpu_model = self
            .model
            .get()
            .map(|model| GpuModel::new(renderer.device(), model));

        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );

        self.camera.resize(width, height);
        self.page.resize(height as f32);
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window);
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if self.show_overlay {
            if let Some(ui_manager) = self.ui_manager.as_mut() {
                let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                    window_id,
                    event: event.clone(),
                };
                if ui_manager.handle_input(&window, &ui_event) {
                    window.request_redraw();
                    return;
                }
            }
        }

        let changed = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                false
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                self.camera.resize(width, height);
                self.page.resize(height as f32);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = self.wheel_pixels(delta);
                self.page.dispatch(PageInput::Wheel { delta_y })
            }
            WindowEvent::Touch(Touch {
                phase, location, ..
            }) => {
                let y = location.y as f32;
                let input = match phase {
                    TouchPhase::Started => PageInput::TouchStart { y },
                    TouchPhase::Moved => PageInput::TouchMove { y },
                    TouchPhase::Ended | TouchPhase::Cancelled => PageInput::TouchEnd,
                };
                self.page.dispatch(input)
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key_code),
            WindowEvent::RedrawRequested => {
                self.redraw();
                false
            }
            _ => false,
        };

        if changed {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Frames are only driven while something on screen animates.
        let pulsing = self
            .page
            .hero_snapshot()
            .is_some_and(|snapshot| backdrop_animates(&snapshot, self.video.is_ready()));
        if self.page.needs_frame() || self.show_overlay || pulsing {
            self.request_redraw();
        }
    }
}
