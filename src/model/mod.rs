//! Core annotation model for marginalia.
//!
//! Annotations attach to heterogeneous document types through a single
//! polymorphic [`AnnotationTarget`]; geometry is tagged with its coordinate
//! space at the type level so values from different spaces cannot be mixed.

mod geometry;
mod item;
mod space;
mod target;

pub use geometry::{Point, Rect};
pub use item::{
    now_millis, AnnotationFile, AnnotationItem, AnnotationStyle, FileType, StyleKind, TimestampMs,
    CURRENT_VERSION,
};
pub use space::{Canvas, Normalized, PagePoint, Percent};
pub use target::AnnotationTarget;

pub(crate) use item::non_empty;
