use glow::HasContext;

use adclog::Samples;
use adclog::plot::{Bounds, Layout};

const LINE_WIDTH: f32 = 1.5;
const LINE_COLOR: [f32; 3] = [0.12, 0.47, 0.71];
pub const BACKGROUND_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

pub struct ChartRenderer {
    program: <glow::Context as HasContext>::Program,
    vertex_array: <glow::Context as HasContext>::VertexArray,
    sample_array: <glow::Context as HasContext>::Buffer,
    sample_count: usize,
    bounds: Bounds,
}

impl ChartRenderer {
    pub fn new(gl: &glow::Context, samples: &Samples) -> Self {
        let shaders = [
            (glow::VERTEX_SHADER,   include_str!("chart_vert.glsl")),
            (glow::FRAGMENT_SHADER, include_str!("chart_frag.glsl")),
        ];

        unsafe {
            let program = gl.create_program().expect("failed to create program");
            let mut native_shaders = Vec::new();
            for (kind, source) in shaders {
                let shader = gl.create_shader(kind).expect("failed to create shader");
                gl.shader_source(shader, source);
                gl.compile_shader(shader);
                if !gl.get_shader_compile_status(shader) {
                    panic!("could not compile shader: {}", gl.get_shader_info_log(shader));
                }
                gl.attach_shader(program, shader);
                native_shaders.push(shader);
            }
            gl.link_program(program);
            if !gl.get_program_link_status(program) {
                panic!("{}", gl.get_program_info_log(program));
            }
            for shader in native_shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            let vertex_array = gl.create_vertex_array().expect("failed to create vertex array");
            let sample_array = gl.create_buffer().expect("failed to create buffer");
            // The samples never change, so they are uploaded once. A lone sample is doubled
            // so that it can be drawn as a zero-length segment.
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(sample_array));
            match samples.len() {
                0 => (),
                1 => gl.buffer_data_u8_slice(glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(&[samples[0], samples[0]]), glow::STATIC_DRAW),
                _ => gl.buffer_data_u8_slice(glow::ARRAY_BUFFER,
                    samples.as_bytes(), glow::STATIC_DRAW),
            }
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            log::debug!("renderer: uploaded {} samples", samples.len());

            Self {
                program,
                vertex_array,
                sample_array,
                sample_count: samples.len(),
                bounds: Bounds::of(samples),
            }
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn render(&self, gl: &glow::Context, layout: &Layout) {
        unsafe {
            gl.viewport(0, 0, layout.width as i32, layout.height as i32);
            gl.clear_color(BACKGROUND_COLOR[0], BACKGROUND_COLOR[1], BACKGROUND_COLOR[2],
                BACKGROUND_COLOR[3]);
            gl.clear(glow::COLOR_BUFFER_BIT);

            let viewport = layout.viewport();
            if self.sample_count == 0 || viewport.width <= 0 || viewport.height <= 0 {
                return
            }
            gl.viewport(viewport.x, viewport.y, viewport.width, viewport.height);

            let resolution_loc = gl.get_uniform_location(self.program, "resolution");
            let index_range_loc = gl.get_uniform_location(self.program, "index_range");
            let value_range_loc = gl.get_uniform_location(self.program, "value_range");
            let segment_span_loc = gl.get_uniform_location(self.program, "segment_span");
            let line_width_loc = gl.get_uniform_location(self.program, "line_width");
            let line_color_loc = gl.get_uniform_location(self.program, "line_color");
            let sample_value0_loc = gl.get_attrib_location(self.program, "sample_value0")
                .expect("could not retrieve attribute location");
            let sample_value1_loc = gl.get_attrib_location(self.program, "sample_value1")
                .expect("could not retrieve attribute location");

            gl.use_program(Some(self.program));
            gl.uniform_2_f32(resolution_loc.as_ref(),
                viewport.width as f32, viewport.height as f32);
            gl.uniform_2_f32(index_range_loc.as_ref(), self.bounds.x.lo, self.bounds.x.hi);
            gl.uniform_2_f32(value_range_loc.as_ref(), self.bounds.y.lo, self.bounds.y.hi);
            gl.uniform_1_f32(segment_span_loc.as_ref(),
                if self.sample_count == 1 { 0.0 } else { 1.0 });
            gl.uniform_1_f32(line_width_loc.as_ref(), LINE_WIDTH);
            gl.uniform_3_f32(line_color_loc.as_ref(), LINE_COLOR[0], LINE_COLOR[1], LINE_COLOR[2]);
            gl.bind_vertex_array(Some(self.vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.sample_array));
            gl.enable_vertex_attrib_array(sample_value0_loc);
            gl.vertex_attrib_pointer_f32(sample_value0_loc, 1, glow::UNSIGNED_SHORT, false, 2, 0);
            gl.vertex_attrib_divisor(sample_value0_loc, 1);
            gl.enable_vertex_attrib_array(sample_value1_loc);
            gl.vertex_attrib_pointer_f32(sample_value1_loc, 1, glow::UNSIGNED_SHORT, false, 2, 2);
            gl.vertex_attrib_divisor(sample_value1_loc, 1);
            let segment_count = self.sample_count.saturating_sub(1).max(1);
            gl.draw_arrays_instanced(glow::TRIANGLE_STRIP, 0, 4, segment_count as i32);
            gl.disable_vertex_attrib_array(sample_value0_loc);
            gl.disable_vertex_attrib_array(sample_value1_loc);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            gl.viewport(0, 0, layout.width as i32, layout.height as i32);
        }
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vertex_array);
            gl.delete_buffer(self.sample_array);
        }
        log::debug!("renderer: destroyed");
    }
}
