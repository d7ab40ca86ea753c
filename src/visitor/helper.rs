//! Synthesizes the private `__injectAnalyticsTracking()V` method body (component I).

use crate::bytecode::InsnFactory;
use crate::constants::{TRACK_SCREEN_HELPER_CLASS, TRACK_SCREEN_HELPER_DESCRIPTOR, TRACK_SCREEN_HELPER_METHOD};

/// Stack depth the synthesized method body requires (`this`, screen name, screen class all live
/// on the operand stack at once, just before the `invokestatic`).
pub const HELPER_METHOD_MAX_STACK: u16 = 3;
/// Local-variable slots the synthesized method body requires (`this` only).
pub const HELPER_METHOD_MAX_LOCALS: u16 = 1;

/// Builds the body of `__injectAnalyticsTracking()V`:
/// `aload_0; ldc <screen_name>; ldc <screen_class>; invokestatic TrackScreenHelper.trackScreen; return`.
///
/// Fails if the factory can't intern a constant-pool entry the body needs; the caller must not
/// synthesize the helper method in that case.
pub fn build_helper_method_body<F: InsnFactory>(
    factory: &mut F,
    screen_name: &str,
    screen_class: &str,
) -> Result<Vec<F::Insn>, F::Error> {
    Ok(vec![
        factory.aload0()?,
        factory.ldc_string(screen_name)?,
        factory.ldc_string(screen_class)?,
        factory.invoke_static(TRACK_SCREEN_HELPER_CLASS, TRACK_SCREEN_HELPER_METHOD, TRACK_SCREEN_HELPER_DESCRIPTOR)?,
        factory.return_void()?,
    ])
}
