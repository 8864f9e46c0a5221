use winit::dpi::PhysicalSize;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface must be reconfigured; rendering may resume next frame.
    Reconfigure,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

pub(crate) fn classify_surface_error(err: wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for format in preferred {
            if formats.contains(&format) {
                return Some(format);
            }
        }
    }

    formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|mode| supported.contains(mode))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Returns the size the surface must be reconfigured to.
///
/// `None` means no reconfigure is needed: the displayed size already matches
/// the configuration, or the target currently has no area (wgpu cannot
/// configure a 0x0 surface; configuration is deferred until it grows).
pub(crate) fn plan_resize(
    configured: PhysicalSize<u32>,
    displayed: PhysicalSize<u32>,
) -> Option<PhysicalSize<u32>> {
    if displayed.width == 0 || displayed.height == 0 {
        return None;
    }
    if displayed == configured {
        return None;
    }
    Some(displayed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── format selection ──────────────────────────────────────────────────

    #[test]
    fn srgb_preferred_when_available() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn first_format_when_srgb_not_preferred() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(wgpu::TextureFormat::Rgba8Unorm)
        );
    }

    #[test]
    fn no_formats_yields_none() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha mode selection ──────────────────────────────────────────────

    #[test]
    fn requested_alpha_mode_used_when_supported() {
        let supported = [
            wgpu::CompositeAlphaMode::Opaque,
            wgpu::CompositeAlphaMode::PreMultiplied,
        ];
        assert_eq!(
            choose_alpha_mode(&supported, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn unsupported_request_falls_back_to_first_supported() {
        let supported = [wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(wgpu::CompositeAlphaMode::PostMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    // ── resize planning ───────────────────────────────────────────────────

    #[test]
    fn unchanged_size_skips_reconfigure() {
        let size = PhysicalSize::new(800, 600);
        assert_eq!(plan_resize(size, size), None);
    }

    #[test]
    fn changed_size_reconfigures() {
        assert_eq!(
            plan_resize(PhysicalSize::new(800, 600), PhysicalSize::new(1024, 768)),
            Some(PhysicalSize::new(1024, 768))
        );
    }

    #[test]
    fn zero_area_defers_reconfigure() {
        assert_eq!(
            plan_resize(PhysicalSize::new(800, 600), PhysicalSize::new(0, 600)),
            None
        );
        assert_eq!(
            plan_resize(PhysicalSize::new(800, 600), PhysicalSize::new(800, 0)),
            None
        );
    }

    // ── error classification ──────────────────────────────────────────────

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(
            classify_surface_error(wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigure
        );
        assert_eq!(
            classify_surface_error(wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigure
        );
        assert_eq!(
            classify_surface_error(wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
        assert_eq!(
            classify_surface_error(wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
    }
}
