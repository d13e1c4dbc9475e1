//! Layout environment supplied by the host.
//!
//! The environment describes the container the surface is laid out into:
//! its size and a coarse size class. It is published by the host (typically
//! on first layout and again on rotation or window resize) and is immutable
//! for the duration of one layout pass. Every geometry in a pass is derived
//! from the same environment, which is what makes per-section layout a pure
//! function.

use horizon_mosaic_core::Size;

/// Width below which a container is considered [`SizeClass::Compact`].
pub const REGULAR_MIN_WIDTH: f32 = 600.0;

/// Coarse horizontal size class of the container.
///
/// Layout strategies may pick different column counts or spans per class.
/// The class is derived from the container width by default but can be
/// overridden by the host via [`LayoutEnvironment::with_size_class`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// Narrow container (phones, split-screen panes).
    Compact,
    /// Wide container (tablets, desktop windows).
    Regular,
}

impl SizeClass {
    /// Derive the size class from a container width.
    pub fn from_width(width: f32) -> Self {
        if width < REGULAR_MIN_WIDTH {
            Self::Compact
        } else {
            Self::Regular
        }
    }
}

/// The container description every layout pass reads.
///
/// # Example
///
/// ```
/// use horizon_mosaic::{LayoutEnvironment, Size, SizeClass};
///
/// let env = LayoutEnvironment::new(Size::new(320.0, 640.0));
/// assert_eq!(env.size_class, SizeClass::Compact);
///
/// let env = LayoutEnvironment::new(Size::new(768.0, 1024.0));
/// assert_eq!(env.size_class, SizeClass::Regular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEnvironment {
    /// Size of the container the sections are laid out into.
    pub container: Size,
    /// Coarse size class, derived from width unless overridden.
    pub size_class: SizeClass,
}

impl LayoutEnvironment {
    /// Create an environment with the size class derived from the width.
    pub fn new(container: Size) -> Self {
        Self {
            container,
            size_class: SizeClass::from_width(container.width),
        }
    }

    /// Create an environment with an explicit size class.
    pub fn with_size_class(container: Size, size_class: SizeClass) -> Self {
        Self {
            container,
            size_class,
        }
    }

    /// Style hints handed to renderers for this environment.
    pub fn style_hints(&self) -> StyleHints {
        StyleHints {
            container: self.container,
            size_class: self.size_class,
        }
    }
}

/// Environment-derived hints passed to item and decoration renderers.
///
/// Renderers receive these instead of the full environment so the render
/// contract stays a pure function of the item and the container traits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleHints {
    /// Size of the container the visual will live in.
    pub container: Size,
    /// Coarse size class of the container.
    pub size_class: SizeClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_from_width() {
        assert_eq!(SizeClass::from_width(320.0), SizeClass::Compact);
        assert_eq!(SizeClass::from_width(599.0), SizeClass::Compact);
        assert_eq!(SizeClass::from_width(600.0), SizeClass::Regular);
        assert_eq!(SizeClass::from_width(768.0), SizeClass::Regular);
    }

    #[test]
    fn test_environment_derives_class() {
        let env = LayoutEnvironment::new(Size::new(414.0, 896.0));
        assert_eq!(env.size_class, SizeClass::Compact);
    }

    #[test]
    fn test_environment_class_override() {
        let env = LayoutEnvironment::with_size_class(Size::new(414.0, 896.0), SizeClass::Regular);
        assert_eq!(env.size_class, SizeClass::Regular);
    }

    #[test]
    fn test_style_hints_copy_environment_traits() {
        let env = LayoutEnvironment::new(Size::new(768.0, 1024.0));
        let hints = env.style_hints();
        assert_eq!(hints.container, env.container);
        assert_eq!(hints.size_class, env.size_class);
    }
}
