use std::time::Instant;

use log::{error, info};
use winit::{
    event::{Event, KeyboardInput, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
};

mod analysis;
mod app;
mod commands;
mod errors;
mod frame;
mod geometry;
mod gui;
mod input_manager;
mod loaders;
mod session;
mod settings;

use app::{ApplicationContext, Platform};
use errors::Error;
use geometry::ScreenBounds;
use session::Session;
use settings::Settings;

async fn setup(
    event_loop: &EventLoop<()>,
    settings: &Settings,
) -> Result<(Platform, ScreenBounds), Error> {
    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())
        .ok_or(Error::NoMonitor)?;
    let monitor_size = monitor.size();
    let bounds = ScreenBounds::from_display(
        monitor_size.width,
        monitor_size.height,
        settings.screen_fraction,
    );

    let (width, height) = settings.placeholder_size;
    let window = winit::window::WindowBuilder::new()
        .with_title(settings.window_title)
        .with_inner_size(winit::dpi::PhysicalSize::new(width, height))
        .with_resizable(false)
        .build(event_loop)?;

    let instance = wgpu::Instance::new(wgpu::Backends::PRIMARY);
    let surface = unsafe { instance.create_surface(&window) };
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or(Error::NoAdapter)?;
    info!("Adapter: {}", adapter.get_info().name);

    let trace_dir = std::env::var("WGPU_TRACE");
    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: None,
                features: wgpu::Features::empty(),
                limits: adapter.limits(),
            },
            trace_dir.ok().as_ref().map(std::path::Path::new),
        )
        .await?;

    let size = window.inner_size();
    let format = surface
        .get_preferred_format(&adapter)
        .ok_or(Error::IncompatibleSurface)?;
    let surface_config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::Fifo,
    };
    surface.configure(&device, &surface_config);

    Ok((
        Platform {
            device,
            window,
            surface,
            queue,
            surface_config,
        },
        bounds,
    ))
}

fn run(event_loop: EventLoop<()>, mut app_context: ApplicationContext) -> ! {
    event_loop.run(move |event, _, control_flow| {
        app_context.gui.handle_event(&event);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => app_context.resize(size.width, size.height),
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    app_context.resize(new_inner_size.width, new_inner_size.height)
                }
                WindowEvent::CloseRequested => app_context.request_exit(),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(keycode),
                            state,
                            ..
                        },
                    ..
                } => {
                    if let Some(command) = app_context
                        .input_manager
                        .process_keyboard_input(&keycode, &state)
                    {
                        app_context.run_command(command);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => app_context.platform.window.request_redraw(),
            Event::RedrawRequested(_) => {
                if let Err(e) = app_context.redraw() {
                    error!("{}", e);
                }
            }
            Event::LoopDestroyed => app_context.teardown(),
            _ => {}
        }

        *control_flow = if app_context.is_exiting() {
            ControlFlow::Exit
        } else {
            ControlFlow::WaitUntil(Instant::now() + app_context.settings.poll_interval)
        };
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("============================================================");
    info!("                     Spectrum Analyser                      ");
    info!("============================================================");

    let settings = Settings::new();
    let event_loop = EventLoop::new();
    let (platform, bounds) = match pollster::block_on(setup(&event_loop, &settings)) {
        Ok(setup) => setup,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    let session = Session::new(bounds, settings.rotation_step);
    info!(
        "Images are shrunk to fit {}x{}",
        session.bounds().max_width,
        session.bounds().max_height
    );

    let app_context = ApplicationContext::new(platform, settings, session);
    run(event_loop, app_context);
}
