//! Streams a lifecycle method body unchanged except for one injected call, immediately after the
//! super-constructor invocation (component G).

use crate::bytecode::InsnFactory;
use crate::constants::HELPER_METHOD_DESCRIPTOR;
use crate::constants::HELPER_METHOD_NAME;

/// Rewrites `body` in place, injecting a call to `owner_internal_name`'s
/// `__injectAnalyticsTracking()V` immediately after the first `invokespecial` instruction for
/// which `is_super_call` returns `true`.
///
/// `is_super_call` should match the method being overridden's own `(name, descriptor)` against
/// the `invokespecial` target, i.e. `onCreate(Bundle)V` matches `onCreate(Bundle)V` when called
/// from inside a method of that same name and descriptor.
///
/// Returns the rewritten body and whether an injection occurred. If the super call never
/// appears, `body` is returned unchanged and the second value is `false`: a user who didn't
/// call `super` gets no injection, deliberately.
///
/// Fails if the factory can't intern the constant-pool entries the injected call needs (the
/// constant pool is full); callers must abandon the injection for this method in that case,
/// not panic.
pub fn inject_after_super_call<F: InsnFactory>(
    factory: &mut F,
    owner_internal_name: &str,
    body: &[F::Insn],
    is_super_call: impl Fn(&F::Insn) -> bool,
) -> Result<(Vec<F::Insn>, bool), F::Error> {
    let mut out = Vec::with_capacity(body.len() + 2);
    let mut injected = false;

    for insn in body {
        out.push(insn.clone());
        if !injected && is_super_call(insn) {
            out.push(factory.aload0()?);
            out.push(factory.invoke_special(owner_internal_name, HELPER_METHOD_NAME, HELPER_METHOD_DESCRIPTOR)?);
            injected = true;
        }
    }

    Ok((out, injected))
}
