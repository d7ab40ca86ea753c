//! Method-visitor state machines that rewrite method bodies and synthesize new ones.
//!
//! Each submodule implements one component from the design: [`lifecycle`] wraps a lifecycle
//! method's existing body (component G), [`track`] absorbs `@Track`/`@Param` metadata and builds
//! the tracking prelude (component H), and [`helper`] synthesizes the screen-tracking helper
//! method's body (component I). All three are generic over [`crate::bytecode::InsnFactory`] so
//! they can be unit-tested without a real class-file library.

pub mod helper;
pub mod lifecycle;
pub mod track;
