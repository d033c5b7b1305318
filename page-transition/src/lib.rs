//! Page transition render plan.
//!
//! Decides whether page content is wrapped in an animated container or
//! rendered as-is, based on the visitor's reduced-motion preference. The
//! motion curves themselves live in the client-side `pageTransition` variant
//! set; this crate only names the states to run.

use serde::Serialize;

/// Name of the variant set driving page transitions.
pub const PAGE_TRANSITION: &str = "pageTransition";

/// Client hint carrying the reduced-motion preference.
pub const REDUCED_MOTION_HINT: &str = "Sec-CH-Prefers-Reduced-Motion";

/// Source of the reduced-motion accessibility preference.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

impl MotionPreference for bool {
    fn prefers_reduced_motion(&self) -> bool {
        *self
    }
}

/// Value of the `Sec-CH-Prefers-Reduced-Motion` client hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReducedMotionHint {
    Reduce,
    #[default]
    NoPreference,
}

impl ReducedMotionHint {
    /// Parse the header value. Absent or unrecognized values mean no preference.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().trim_matches('"')) {
            Some(v) if v.eq_ignore_ascii_case("reduce") => ReducedMotionHint::Reduce,
            _ => ReducedMotionHint::NoPreference,
        }
    }
}

impl MotionPreference for ReducedMotionHint {
    fn prefers_reduced_motion(&self) -> bool {
        *self == ReducedMotionHint::Reduce
    }
}

/// Props handed to the animated container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotionProps {
    pub variants: &'static str,
    pub initial: &'static str,
    pub animate: &'static str,
    pub exit: &'static str,
}

impl Default for MotionProps {
    fn default() -> Self {
        Self {
            variants: PAGE_TRANSITION,
            initial: "initial",
            animate: "animate",
            exit: "exit",
        }
    }
}

/// How a page's children are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan<C> {
    /// Children as-is, no wrapper.
    Plain(C),
    /// Children inside an animated container.
    Animated { motion: MotionProps, children: C },
}

impl<C> RenderPlan<C> {
    pub fn is_animated(&self) -> bool {
        matches!(self, RenderPlan::Animated { .. })
    }

    pub fn children(&self) -> &C {
        match self {
            RenderPlan::Plain(children) | RenderPlan::Animated { children, .. } => children,
        }
    }

    pub fn into_children(self) -> C {
        match self {
            RenderPlan::Plain(children) | RenderPlan::Animated { children, .. } => children,
        }
    }
}

impl RenderPlan<String> {
    /// Server-rendered markup. The client-side motion library picks up the
    /// `data-motion-*` attributes on hydration.
    pub fn to_html(&self) -> String {
        match self {
            RenderPlan::Plain(children) => children.clone(),
            RenderPlan::Animated { motion, children } => format!(
                r#"<div data-motion-variants="{}" data-motion-initial="{}" data-motion-animate="{}" data-motion-exit="{}">{}</div>"#,
                motion.variants, motion.initial, motion.animate, motion.exit, children
            ),
        }
    }
}

/// Plan one render. The preference is read exactly once.
pub fn plan<P, C>(preference: &P, children: C) -> RenderPlan<C>
where
    P: MotionPreference + ?Sized,
{
    if preference.prefers_reduced_motion() {
        RenderPlan::Plain(children)
    } else {
        RenderPlan::Animated {
            motion: MotionProps::default(),
            children,
        }
    }
}
