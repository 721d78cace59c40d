use std::io::{self, Write};
use std::process;
use std::time::Duration;

use argparse::{ArgumentParser, Store, StoreFalse, StoreOption, StoreTrue};

use crate::renderer::RenderConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub frame_delay_ms: u64,
    pub paused: bool,
    pub strict_gl_checks: bool,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            width: 640,
            height: 480,
            title: "OpenGL Test".to_string(),
            vertex_shader: "shaders/cube.vert".to_string(),
            fragment_shader: "shaders/cube.frag".to_string(),
            frame_delay_ms: 16,
            paused: false,
            strict_gl_checks: cfg!(debug_assertions),
            log_filter: None,
        }
    }
}

impl Config {
    /// Parses `args` (program name first). `Err` carries the exit status;
    /// 0 means help was printed.
    pub fn parse_from(args: Vec<String>, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<Config, i32> {
        let mut cfg = Config::default();
        {
            let mut ap = ArgumentParser::new();
            ap.set_description("Render a rotating, lit cube.");
            ap.refer(&mut cfg.width)
                .add_option(&["--width"], Store, "Window width in pixels");
            ap.refer(&mut cfg.height)
                .add_option(&["--height"], Store, "Window height in pixels");
            ap.refer(&mut cfg.title)
                .add_option(&["--title"], Store, "Window title");
            ap.refer(&mut cfg.vertex_shader)
                .add_option(&["--vertex-shader"], Store, "Path to the vertex shader source");
            ap.refer(&mut cfg.fragment_shader)
                .add_option(&["--fragment-shader"], Store, "Path to the fragment shader source");
            ap.refer(&mut cfg.frame_delay_ms)
                .add_option(&["--frame-delay"], Store, "Delay between frames in milliseconds");
            ap.refer(&mut cfg.paused)
                .add_option(&["--paused"], StoreTrue, "Start with rotation disabled");
            ap.refer(&mut cfg.strict_gl_checks)
                .add_option(&["--strict-gl-checks"], StoreTrue, "Check for GL errors after every state change")
                .add_option(&["--no-strict-gl-checks"], StoreFalse, "Skip GL error checks");
            ap.refer(&mut cfg.log_filter)
                .add_option(&["--log"], StoreOption, "Log filter, e.g. \"debug\" or \"spincube=trace\"");
            ap.parse(args, stdout, stderr)?;
        }
        if cfg.width == 0 || cfg.height == 0 {
            let _ = writeln!(stderr, "window size must be non-zero, got {}x{}", cfg.width, cfg.height);
            return Err(2);
        }
        Ok(cfg)
    }

    pub fn from_env() -> Config {
        let args = std::env::args().collect();
        match Config::parse_from(args, &mut io::stdout(), &mut io::stderr()) {
            Ok(cfg) => cfg,
            Err(code) => process::exit(code),
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            strict_error_checking: self.strict_gl_checks,
        }
    }
}
