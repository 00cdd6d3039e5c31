//! EGL framebuffer configuration selection.
//!
//! The chooser asks for 8888 color with a GLES2-renderable surface and then
//! scans the matching configs for the best depth buffer it can find: the
//! first 24-bit config wins outright, otherwise the first 16-bit one, and if
//! neither exists surface initialization fails.
//!
//! Which EGL binding is linked (glutin, a khronos loader, a vendor blob) is
//! the embedder's business, so the chooser is written against the small
//! [`ConfigQuery`] seam instead of a concrete EGL API.

use bitflags::bitflags;
use log::{debug, trace};

use crate::error::{GlueError, Result};

/// `EGL_RED_SIZE`
pub const RED_SIZE: i32 = 0x3024;
/// `EGL_GREEN_SIZE`
pub const GREEN_SIZE: i32 = 0x3023;
/// `EGL_BLUE_SIZE`
pub const BLUE_SIZE: i32 = 0x3022;
/// `EGL_ALPHA_SIZE`
pub const ALPHA_SIZE: i32 = 0x3021;
/// `EGL_DEPTH_SIZE`
pub const DEPTH_SIZE: i32 = 0x3025;
/// `EGL_RENDERABLE_TYPE`
pub const RENDERABLE_TYPE: i32 = 0x3040;
/// `EGL_NONE`
pub const NONE: i32 = 0x3038;

const COLOR_CHANNEL_BIT_DEPTH: i32 = 8;

bitflags! {
    /// The `EGL_RENDERABLE_TYPE` bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RenderableType: i32 {
        const GLES = 0x0001;
        const OPENVG = 0x0002;
        const GLES2 = 0x0004;
        const OPENGL = 0x0008;
    }
}

/// The slice of the EGL API the config chooser needs: the two call forms of
/// `eglChooseConfig` and per-config attribute queries.
pub trait ConfigQuery {
    /// An opaque framebuffer config handle.
    type Config: Copy;

    /// The counting form of `eglChooseConfig` (no output buffer).
    /// `Err(())` corresponds to the EGL call returning false.
    fn count_configs(&self, attribs: &[i32]) -> std::result::Result<usize, ()>;

    /// The filling form of `eglChooseConfig`, enumerating up to `count`
    /// matching configs.
    fn list_configs(
        &self,
        attribs: &[i32],
        count: usize,
    ) -> std::result::Result<Vec<Self::Config>, ()>;

    /// `eglGetConfigAttrib`. `None` when the attribute cannot be queried for
    /// this config.
    fn config_attrib(&self, config: Self::Config, attrib: i32) -> Option<i32>;
}

fn config_attrib_or<Q: ConfigQuery>(
    query: &Q,
    config: Q::Config,
    attrib: i32,
    default: i32,
) -> i32 {
    query.config_attrib(config, attrib).unwrap_or(default)
}

/// Selects the framebuffer configuration for the surface.
///
/// Requests 8888 color with a GLES2-renderable type, then picks the first
/// config with a 24-bit depth buffer, falling back to the first with a 16-bit
/// one.
///
/// # Errors
///
/// All three failures are fatal to surface initialization; no retry or
/// degraded mode is attempted:
/// - [`GlueError::ConfigQueryFailed`] if the underlying choose call fails,
/// - [`GlueError::NoMatchingConfigs`] if nothing matches the attribute list,
/// - [`GlueError::NoAcceptableDepth`] if no match has a 24- or 16-bit depth.
pub fn choose_framebuffer_config<Q: ConfigQuery>(query: &Q) -> Result<Q::Config> {
    let attribs = [
        RED_SIZE,
        COLOR_CHANNEL_BIT_DEPTH,
        GREEN_SIZE,
        COLOR_CHANNEL_BIT_DEPTH,
        BLUE_SIZE,
        COLOR_CHANNEL_BIT_DEPTH,
        ALPHA_SIZE,
        COLOR_CHANNEL_BIT_DEPTH,
        RENDERABLE_TYPE,
        RenderableType::GLES2.bits(),
        NONE,
    ];

    let count = query
        .count_configs(&attribs)
        .map_err(|()| GlueError::ConfigQueryFailed)?;
    if count == 0 {
        return Err(GlueError::NoMatchingConfigs);
    }

    let configs = query
        .list_configs(&attribs, count)
        .map_err(|()| GlueError::ConfigQueryFailed)?;
    if configs.is_empty() {
        return Err(GlueError::NoMatchingConfigs);
    }

    // We're just looking for the best depth we can find.
    let mut best: Option<Q::Config> = None;
    for config in configs {
        let depth = config_attrib_or(query, config, DEPTH_SIZE, 0);
        trace!("candidate config with depth size {depth}");
        if depth == 24 {
            best = Some(config);
            break;
        }
        if depth == 16 && best.is_none() {
            best = Some(config);
        }
    }

    match best {
        Some(config) => {
            let depth = config_attrib_or(query, config, DEPTH_SIZE, 0);
            debug!("chose framebuffer config with depth size {depth}");
            Ok(config)
        }
        None => Err(GlueError::NoAcceptableDepth),
    }
}
