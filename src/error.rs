use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Failure to turn the two shader sources into a usable program.
///
/// `log` is the driver's info log, unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
    Unsupported(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{} shader failed to compile:\n{}", stage, log)
            }
            ShaderError::Link { log } => write!(f, "shader program failed to link:\n{}", log),
            ShaderError::Unsupported(msg) => write!(f, "shader program not supported: {}", msg),
        }
    }
}

impl Error for ShaderError {}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsError {
    Buffer(String),
    Draw(String),
    Present(String),
    NoFrame,
    /// Reported by the explicit error poll after a state change.
    State { hint: String, message: String },
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::Buffer(msg) => write!(f, "buffer creation failed: {}", msg),
            GraphicsError::Draw(msg) => write!(f, "draw failed: {}", msg),
            GraphicsError::Present(msg) => write!(f, "swapping buffers failed: {}", msg),
            GraphicsError::NoFrame => write!(f, "draw issued outside of a frame"),
            GraphicsError::State { hint, message } => write!(f, "error at {}: {}", hint, message),
        }
    }
}

impl Error for GraphicsError {}

/// Either kind of setup failure; the host treats them differently.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Shader(ShaderError),
    Graphics(GraphicsError),
}

impl From<ShaderError> for RenderError {
    fn from(e: ShaderError) -> RenderError {
        RenderError::Shader(e)
    }
}

impl From<GraphicsError> for RenderError {
    fn from(e: GraphicsError) -> RenderError {
        RenderError::Graphics(e)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Shader(e) => e.fmt(f),
            RenderError::Graphics(e) => e.fmt(f),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RenderError::Shader(e) => Some(e),
            RenderError::Graphics(e) => Some(e),
        }
    }
}
