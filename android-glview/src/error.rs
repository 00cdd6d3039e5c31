use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlueError {
    #[error("EGL framebuffer config query failed")]
    ConfigQueryFailed,

    #[error("no EGL framebuffer config matches the requested attributes")]
    NoMatchingConfigs,

    #[error("no EGL framebuffer config with an acceptable depth size (24 or 16)")]
    NoAcceptableDepth,

    #[error("render thread is no longer running")]
    RenderThreadGone,
}

pub type Result<T> = std::result::Result<T, GlueError>;
