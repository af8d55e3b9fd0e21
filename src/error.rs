//! Error types for marquee.
//!
//! The effects themselves have no error paths: every operation is a pure
//! numeric computation over trusted inputs, and the one division hazard (the
//! force calculations) is handled by skipping zero-distance contributions.
//! Errors only arise when standing up the demo runner's window and GPU
//! surface.

use std::fmt;

/// Errors that can occur while initializing the GPU blit.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the demo window.
#[derive(Debug)]
pub enum RunnerError {
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunnerError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunnerError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunnerError::EventLoop(e) => Some(e),
            RunnerError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for RunnerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunnerError::EventLoop(e)
    }
}

impl From<GpuError> for RunnerError {
    fn from(e: GpuError) -> Self {
        RunnerError::Gpu(e)
    }
}
