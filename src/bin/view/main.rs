use std::num::NonZeroU32;
use std::time::Instant;

use raw_window_handle::HasRawWindowHandle;
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::event::{Event, WindowEvent};
use winit::window::{Window, WindowBuilder};

use glutin_winit::DisplayBuilder;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{Version, ContextApi, ContextAttributesBuilder};
use glutin::context::{NotCurrentGlContext, PossiblyCurrentContext};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin::display::{GetGlDisplay, GlDisplay};

use glow::Context as GlowContext;

use adclog::{Configuration, Samples, Statistics};
use adclog::plot::{self, Bounds, Layout};

mod chart;

use chart::ChartRenderer;

const X_LABEL: &str = "Sample index";
const Y_LABEL: &str = "ADC value";
const X_TICK_COUNT: usize = 10;
const Y_TICK_COUNT: usize = 8;
const TICK_LENGTH: f32 = 5.0;
const AXIS_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Draw the plot frame, tick marks, tick labels, and axis labels around the plot area.
fn draw_axes(ui: &imgui::Ui, layout: &Layout, bounds: &Bounds) {
    let draw_list = ui.get_background_draw_list();
    let (left, right) = (layout.plot_left(), layout.plot_right());
    let (top, bottom) = (layout.plot_top(), layout.plot_bottom());
    draw_list.add_rect([left, top], [right, bottom], AXIS_COLOR).build();

    let line_height = ui.text_line_height();
    for x in plot::ticks(bounds.x, X_TICK_COUNT) {
        let [tick_x, _] = layout.to_window(bounds, x, bounds.y.lo);
        draw_list.add_line([tick_x, bottom], [tick_x, bottom + TICK_LENGTH], AXIS_COLOR).build();
        let label = plot::tick_label(x);
        let [label_width, _] = ui.calc_text_size(&label);
        draw_list.add_text([tick_x - label_width / 2.0, bottom + TICK_LENGTH], AXIS_COLOR, &label);
    }
    for y in plot::ticks(bounds.y, Y_TICK_COUNT) {
        let [_, tick_y] = layout.to_window(bounds, bounds.x.lo, y);
        draw_list.add_line([left - TICK_LENGTH, tick_y], [left, tick_y], AXIS_COLOR).build();
        let label = plot::tick_label(y);
        let [label_width, _] = ui.calc_text_size(&label);
        draw_list.add_text([left - TICK_LENGTH * 2.0 - label_width, tick_y - line_height / 2.0],
            AXIS_COLOR, &label);
    }

    let [x_label_width, _] = ui.calc_text_size(X_LABEL);
    draw_list.add_text(
        [(left + right - x_label_width) / 2.0, bottom + TICK_LENGTH + line_height * 1.5],
        AXIS_COLOR, X_LABEL);
    draw_list.add_text([left - TICK_LENGTH, top - line_height * 1.5], AXIS_COLOR, Y_LABEL);
}

struct Application {
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    gl_library: GlowContext,
    chart_renderer: ChartRenderer,
    imgui_context: imgui::Context,
    imgui_platform: imgui_winit_support::WinitPlatform,
    imgui_texture_map: imgui_glow_renderer::SimpleTextureMap,
    imgui_renderer: imgui_glow_renderer::Renderer,
    window: Window,
    font_size: f32,
    last_frame: Instant,
}

impl Application {
    fn layout(&self) -> Layout {
        let size = self.window.inner_size();
        Layout::new(size.width as f32, size.height as f32, self.font_size)
    }

    fn process_event<T>(&mut self, event: Event<T>, window_target: &EventLoopWindowTarget<T>) {
        match event {
            Event::NewEvents(_) => {
                let now = Instant::now();
                self.imgui_context.io_mut().update_delta_time(now.duration_since(self.last_frame));
                self.last_frame = now;
            }
            Event::AboutToWait => (),
            Event::WindowEvent { event: WindowEvent::RedrawRequested, .. } => {
                self.window.pre_present_notify();
                let layout = self.layout();
                // handle chart
                self.chart_renderer.render(&self.gl_library, &layout);
                // handle axes
                self.imgui_platform.prepare_frame(self.imgui_context.io_mut(), &self.window)
                    .expect("failed to prepare UI frame");
                let ui = self.imgui_context.frame();
                draw_axes(ui, &layout, self.chart_renderer.bounds());
                self.imgui_platform.prepare_render(ui, &self.window);
                let draw_list = self.imgui_context.render();
                self.imgui_renderer.render(&self.gl_library, &self.imgui_texture_map, &draw_list)
                    .expect("failed to render UI");
                // handle OpenGL
                self.gl_surface.swap_buffers(&self.gl_context)
                    .expect("failed to swap buffers");
            }
            Event::WindowEvent { event: WindowEvent::Resized(size), .. }
                    if size.width != 0 && size.height != 0 => {
                // handle UI
                self.imgui_platform.handle_event(self.imgui_context.io_mut(), &self.window, &event);
                // handle OpenGL
                self.gl_surface.resize(&self.gl_context,
                    NonZeroU32::new(size.width).unwrap(),
                    NonZeroU32::new(size.height).unwrap(),
                );
                self.window.request_redraw();
            }
            Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
                log::debug!("viewer: window closed");
                window_target.exit();
            }
            Event::LoopExiting => {
                self.chart_renderer.destroy(&self.gl_library);
                self.imgui_renderer.destroy(&self.gl_library);
            }
            event => {
                self.imgui_platform.handle_event(self.imgui_context.io_mut(), &self.window, &event);
                if let Event::WindowEvent { .. } = event {
                    self.window.request_redraw();
                }
            }
        }
    }
}

/// Show `samples` as a line chart in a new window and block until the window is closed.
fn render(samples: &Samples, title: &str) {
    // create a window
    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);
    let window_builder = WindowBuilder::new()
        .with_title(title);
    let config_template_builder = ConfigTemplateBuilder::new()
        .prefer_hardware_accelerated(Some(true));
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_builder(Some(window_builder))
        .build(&event_loop, config_template_builder, |mut configs|
            configs.next().expect("no GL configurations available"))
        .expect("failed to create window");
    let window = window.expect("failed to create window");
    let (width, height) = window.inner_size().into();
    // create an OpenGL context
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
        .build(Some(window.raw_window_handle()));
    let gl_context = unsafe {
        gl_config.display().create_context(&gl_config, &context_attributes)
            .expect("failed to create GL context")
    };
    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new()
        .build(window.raw_window_handle(),
            NonZeroU32::new(width).expect("window has zero width"),
            NonZeroU32::new(height).expect("window has zero height"),
        );
    let gl_surface = unsafe {
        gl_config.display().create_window_surface(&gl_config, &surface_attributes)
            .expect("failed to create GL surface")
    };
    let gl_context = gl_context.make_current(&gl_surface)
        .expect("failed to make GL context current");
    let gl_library = unsafe {
        GlowContext::from_loader_function_cstr(|func|
            gl_config.display().get_proc_address(func).cast())
    };
    // create an ImGui context and connect it to the window
    let mut imgui_context = imgui::Context::create();
    imgui_context.set_ini_filename(None); // disable ini autosaving
    let mut imgui_platform = imgui_winit_support::WinitPlatform::init(&mut imgui_context);
    let dpi_scale = window.scale_factor() as f32;
    let font_size = 13.0 * dpi_scale;
    imgui_platform.attach_window(imgui_context.io_mut(), &window,
        imgui_winit_support::HiDpiMode::Locked(1.0));
    imgui_context.fonts().add_font(&[
        imgui::FontSource::DefaultFontData {
            config: Some(imgui::FontConfig {
                size_pixels: font_size,
                ..Default::default()
            })
        }
    ]);
    imgui_context.style_mut().scale_all_sizes(dpi_scale);
    let mut imgui_texture_map = imgui_glow_renderer::SimpleTextureMap::default();
    let imgui_renderer = imgui_glow_renderer::Renderer::initialize(&gl_library,
            &mut imgui_context, &mut imgui_texture_map, /*output_srgb=*/true)
        .expect("failed to create UI renderer");
    // set up the chart
    let chart_renderer = ChartRenderer::new(&gl_library, samples);
    // run the application
    let mut application = Application {
        gl_context,
        gl_surface,
        gl_library,
        chart_renderer,
        imgui_context,
        imgui_platform,
        imgui_texture_map,
        imgui_renderer,
        window,
        font_size,
        last_frame: Instant::now(),
    };
    application.window.request_redraw();
    event_loop.run(|event, window_target|
        application.process_event(event, window_target))
        .expect("failed to run application");
}

fn main() -> adclog::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let config = Configuration::from_args("adclog-view");
    let samples = adclog::load(&config.path, config.byte_order)?;
    adclog::report(&adclog::summarize(&samples), std::io::stdout().lock())?;
    if let Some(stats) = Statistics::compute(&samples) {
        log::info!("{} ({:.3} s at {} Hz)", stats,
            Statistics::duration(samples.len(), config.sample_rate).as_secs_f64(),
            config.sample_rate);
    }
    render(&samples, &format!("{}", config.path.display()));
    Ok(())
}
