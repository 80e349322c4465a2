//! Application shell
//!
//! Owns the winit event loop and wires the pieces together each frame:
//! keyboard events flow to the simulation (unless the UI captures them),
//! the simulation drives scene transforms, the camera optionally re-targets
//! a followed object, and the render engine draws the result with the UI
//! overlay on top.

use std::sync::Arc;
use std::time::Instant;

use cgmath::{Vector3, Zero};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    rendering::render_engine::RenderEngine,
    scene::{ObjectBuilder, Scene},
};
use crate::sim::{Simulation, SimulationManager};
use crate::ui::UiManager;

/// UI callback: builds overlay panels with access to the scene and the
/// currently selected object.
pub type UiCallback = Box<dyn FnMut(&imgui::Ui, &mut Scene, &mut Option<usize>)>;

pub struct SkerryApp {
    event_loop: Option<EventLoop<()>>,
    pub app_state: AppState,
    ui_callback: Option<UiCallback>,
}

pub struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    pub scene: Scene,
    pub simulation_manager: SimulationManager,
    ui_callback: Option<UiCallback>,
    selected_object: Option<usize>,
    last_frame: Instant,
    follow_target: Option<String>,
    follow_enabled: bool,
}

impl SkerryApp {
    /// Create a new application with default camera settings
    pub async fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let mut camera = OrbitCamera::new(14.0, 0.45, 0.6, Vector3::zero(), 1.5);
        camera.bounds.min_distance = Some(2.0);
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                simulation_manager: SimulationManager::new(),
                ui_callback: None,
                selected_object: None,
                last_frame: Instant::now(),
                follow_target: None,
                follow_enabled: false,
            },
            ui_callback: None,
        }
    }

    /// Set the UI callback run every frame
    pub fn set_ui<F>(&mut self, ui_fn: F)
    where
        F: FnMut(&imgui::Ui, &mut Scene, &mut Option<usize>) + 'static,
    {
        self.ui_callback = Some(Box::new(ui_fn));
    }

    /// Attach a simulation that drives the scene
    pub fn attach_simulation<S: Simulation + 'static>(&mut self, simulation: S) {
        self.app_state
            .simulation_manager
            .attach_simulation(Box::new(simulation), &mut self.app_state.scene);
    }

    /// Keep the camera focused on the named object (toggled with C)
    pub fn follow_object(&mut self, name: &str) {
        self.app_state.follow_target = Some(name.to_string());
        self.app_state.follow_enabled = true;
    }

    /// Loads an OBJ model into the scene (placeholder cube on failure)
    pub fn add_object(&mut self, object_path: &str) -> ObjectBuilder<'_> {
        self.app_state.scene.add_object(object_path)
    }

    /// Adds a procedural unit cube
    pub fn add_cube(&mut self) -> ObjectBuilder<'_> {
        self.app_state.scene.add_cube()
    }

    /// Adds a procedural unit sphere
    pub fn add_sphere(&mut self, longitude_segments: u32, latitude_segments: u32) -> ObjectBuilder<'_> {
        self.app_state
            .scene
            .add_sphere(longitude_segments, latitude_segments)
    }

    /// Adds a procedural plane (normal +Z)
    pub fn add_plane(
        &mut self,
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> ObjectBuilder<'_> {
        self.app_state
            .scene
            .add_plane(width, height, width_segments, height_segments)
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        self.app_state.ui_callback = self.ui_callback.take();

        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl AppState {
    fn frame(&mut self) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let now = Instant::now();
        // Clamp pathological frame gaps (window drags, suspends)
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        self.simulation_manager.update(dt, &mut self.scene);

        if self.follow_enabled {
            let target = self
                .follow_target
                .as_deref()
                .and_then(|name| self.scene.find_object(name))
                .map(|index| self.scene.objects[index].ui_transform.position);
            if let Some(p) = target {
                self.scene
                    .camera_manager
                    .camera
                    .set_target(Vector3::new(p[0], p[1], p[2]));
            }
        }

        self.scene.update();
        render_engine.update(self.scene.camera_manager.camera.uniform);
        self.scene
            .apply_ui_transforms_and_update_gpu(render_engine.queue());

        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let scene = &mut self.scene;
            let simulation_manager = &mut self.simulation_manager;
            let selected_object = &mut self.selected_object;
            let mut ui_callback = self.ui_callback.as_mut();

            ui_manager.update_logic(window, |ui| {
                simulation_manager.render_ui(ui, scene);
                if let Some(callback) = ui_callback.as_mut() {
                    callback(ui, scene, selected_object);
                }
            });

            render_engine.render_frame(
                &self.scene,
                Some(
                    |device: &wgpu::Device,
                     queue: &wgpu::Queue,
                     encoder: &mut wgpu::CommandEncoder,
                     view: &wgpu::TextureView| {
                        ui_manager.render_display_only(device, queue, encoder, view);
                    },
                ),
            );
        } else {
            render_engine.render_frame_simple(&self.scene);
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Skerry - let's sail")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let renderer =
                pollster::block_on(
                    async move { RenderEngine::new(window_clone, width, height).await },
                );

            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue());

            let ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
            self.last_frame = Instant::now();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Give the UI first refusal on input
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let PhysicalKey::Code(key_code) = key_event.physical_key {
                    match key_code {
                        KeyCode::Escape => {
                            event_loop.exit();
                            return;
                        }
                        KeyCode::KeyC => {
                            if key_event.state == ElementState::Pressed && !key_event.repeat {
                                self.follow_enabled = !self.follow_enabled;
                            }
                        }
                        KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                            self.scene
                                .camera_manager
                                .controller
                                .set_shift_held(key_event.state == ElementState::Pressed);
                        }
                        _ => {}
                    }
                }

                self.simulation_manager.process_keyboard(&key_event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.frame();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Don't fight the UI over the mouse
        if let Some(ui_manager) = self.ui_manager.as_ref() {
            let io = ui_manager.context.io();
            if io.want_capture_mouse || io.want_capture_keyboard {
                return;
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
