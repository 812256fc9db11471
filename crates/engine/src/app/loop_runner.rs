use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{debug, info, warn};
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::metrics::MetricsAccumulator;
use super::timer::IntervalTimer;
use super::{InputAction, InputSnapshot, Renderer, Scene, SceneCommand};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub render_interval: Duration,
    pub advance_interval: Duration,
    pub advance_start_delay: Duration,
    pub max_ticks_per_wake: u32,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Blockhop".to_string(),
            window_width: 800,
            window_height: 600,
            render_interval: Duration::from_millis(100),
            advance_interval: Duration::from_millis(100),
            advance_start_delay: Duration::from_millis(1000),
            max_ticks_per_wake: 5,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, mut scene: Box<dyn Scene>) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(PhysicalSize::new(config.window_width, config.window_height))
            .with_resizable(false)
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;

    let max_ticks_per_wake = config.max_ticks_per_wake.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let inner_size = window.inner_size();
    let mut input_collector = InputCollector::new(inner_size.width, inner_size.height);
    let mut schedule = TickSchedule::new(&config, Instant::now());
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval, Instant::now());
    let mut last_applied_title: Option<String> = None;

    info!(
        render_interval_ms = schedule.render.period().as_millis() as u64,
        advance_interval_ms = schedule.advance.period().as_millis() as u64,
        advance_start_delay_ms = config.advance_start_delay.as_millis() as u64,
        max_ticks_per_wake,
        width = inner_size.width,
        height = inner_size.height,
        "loop_config"
    );

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    input_collector.set_window_size(new_size.width, new_size.height);
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input_collector.set_cursor_position_px(position.x as f32, position.y as f32);
                }
                WindowEvent::CursorLeft { .. } => {
                    input_collector.clear_cursor_position();
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let is_pressed = event.state == ElementState::Pressed;
                    input_collector.handle_physical_key(event.physical_key, is_pressed);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let frame_start = Instant::now();
                    if let Err(error) = renderer.render_scene(scene.as_ref()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    metrics_accumulator.record_frame(frame_start.elapsed());

                    let next_title = scene.title();
                    if next_title != last_applied_title {
                        window.set_title(next_title.as_deref().unwrap_or(&config.window_title));
                        last_applied_title = next_title;
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();

                let render_due = schedule.render.take_due(now, max_ticks_per_wake);
                warn_dropped_ticks("render", render_due.dropped);
                let mut redraw = false;
                for _ in 0..render_due.ticks {
                    let input_snapshot = input_collector.snapshot_for_tick();
                    let command = scene.update(&input_snapshot);
                    redraw = true;
                    if apply_scene_command(command, &mut schedule, now) == LoopAction::Stop {
                        window_target.exit();
                        return;
                    }
                    if command == SceneCommand::ResetTimers {
                        break;
                    }
                }

                let advance_due = schedule.advance.take_due(now, max_ticks_per_wake);
                warn_dropped_ticks("advance", advance_due.dropped);
                for _ in 0..advance_due.ticks {
                    let command = scene.advance();
                    metrics_accumulator.record_advance_tick();
                    redraw = true;
                    if apply_scene_command(command, &mut schedule, now) == LoopAction::Stop {
                        window_target.exit();
                        return;
                    }
                    if command == SceneCommand::ResetTimers {
                        break;
                    }
                }

                if redraw {
                    window.request_redraw();
                }

                if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                    info!(
                        render_fps = snapshot.render_fps,
                        advance_tps = snapshot.advance_tps,
                        frame_time_ms = snapshot.frame_time_ms,
                        "loop_metrics"
                    );
                }

                window_target.set_control_flow(ControlFlow::WaitUntil(schedule.next_deadline()));
            }
            Event::LoopExiting => {
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopAction {
    Continue,
    Stop,
}

fn apply_scene_command(
    command: SceneCommand,
    schedule: &mut TickSchedule,
    now: Instant,
) -> LoopAction {
    match command {
        SceneCommand::None => LoopAction::Continue,
        SceneCommand::ResetTimers => {
            schedule.reset(now);
            debug!("timers_reset");
            LoopAction::Continue
        }
        SceneCommand::Quit => {
            info!(reason = "scene_quit", "shutdown_requested");
            LoopAction::Stop
        }
    }
}

fn warn_dropped_ticks(timer: &'static str, dropped: u32) {
    if dropped > 0 {
        warn!(timer, dropped, "tick_backlog_dropped");
    }
}

/// The render timer and the later-starting advancement timer.
#[derive(Debug, Clone, Copy)]
struct TickSchedule {
    render: IntervalTimer,
    advance: IntervalTimer,
    advance_start_delay: Duration,
}

impl TickSchedule {
    fn new(config: &LoopConfig, now: Instant) -> Self {
        Self {
            render: IntervalTimer::new(config.render_interval, now),
            advance: IntervalTimer::delayed(
                config.advance_interval,
                config.advance_start_delay,
                now,
            ),
            advance_start_delay: config.advance_start_delay,
        }
    }

    fn reset(&mut self, now: Instant) {
        let render_period = self.render.period();
        self.render.rearm(render_period, now);
        self.advance.rearm(self.advance_start_delay, now);
    }

    fn next_deadline(&self) -> Instant {
        self.render.next_due().min(self.advance.next_due())
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    restart_key_is_down: bool,
    restart_pressed_edge: bool,
    confirm_key_is_down: bool,
    confirm_pressed_edge: bool,
    action_states: super::input::ActionStates,
    cursor_position_px: Option<super::Vec2>,
    left_mouse_is_down: bool,
    left_click_pressed_edge: bool,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Self::default()
        }
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot::new(
            self.quit_requested,
            self.restart_pressed_edge,
            self.confirm_pressed_edge,
            self.action_states,
            self.cursor_position_px,
            self.left_click_pressed_edge,
            self.window_width,
            self.window_height,
        );
        self.restart_pressed_edge = false;
        self.confirm_pressed_edge = false;
        self.left_click_pressed_edge = false;
        snapshot
    }

    fn handle_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        match key {
            PhysicalKey::Code(KeyCode::KeyW) | PhysicalKey::Code(KeyCode::ArrowUp) => {
                self.action_states.set(InputAction::MoveUp, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyS) | PhysicalKey::Code(KeyCode::ArrowDown) => {
                self.action_states.set(InputAction::MoveDown, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyA) | PhysicalKey::Code(KeyCode::ArrowLeft) => {
                self.action_states.set(InputAction::MoveLeft, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyD) | PhysicalKey::Code(KeyCode::ArrowRight) => {
                self.action_states.set(InputAction::MoveRight, is_pressed);
            }
            PhysicalKey::Code(KeyCode::KeyR) => {
                edge_triggered(
                    &mut self.restart_key_is_down,
                    &mut self.restart_pressed_edge,
                    is_pressed,
                );
            }
            PhysicalKey::Code(KeyCode::Enter) | PhysicalKey::Code(KeyCode::NumpadEnter) => {
                edge_triggered(
                    &mut self.confirm_key_is_down,
                    &mut self.confirm_pressed_edge,
                    is_pressed,
                );
            }
            PhysicalKey::Code(KeyCode::Escape) => {
                if is_pressed {
                    self.quit_requested = true;
                }
            }
            _ => {}
        }
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    fn set_cursor_position_px(&mut self, x: f32, y: f32) {
        self.cursor_position_px = Some(super::Vec2 { x, y });
    }

    fn clear_cursor_position(&mut self) {
        self.cursor_position_px = None;
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            edge_triggered(
                &mut self.left_mouse_is_down,
                &mut self.left_click_pressed_edge,
                state == ElementState::Pressed,
            );
        }
    }
}

fn edge_triggered(is_down: &mut bool, pressed_edge: &mut bool, is_pressed: bool) {
    if is_pressed {
        if !*is_down {
            *pressed_edge = true;
        }
        *is_down = true;
    } else {
        *is_down = false;
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
