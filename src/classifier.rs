//! Classifies a class as `Activity`, `Fragment`, or `Other` from its immediate superclass
//! (component D).
//!
//! This is deliberately shallow: only the immediate super is consulted. A class extending a
//! user-written intermediate base class (e.g. `BaseActivity`) is classified [`ClassType::Other`]
//! and is not instrumented. That is an accepted conservative default, not a bug.

use crate::constants::{ACTIVITY_SUPERS, FRAGMENT_SUPERS};
use crate::model::ClassType;

/// Classifies a class from its immediate superclass's internal name.
pub fn classify(super_internal_name: Option<&str>) -> ClassType {
    let Some(super_name) = super_internal_name else {
        return ClassType::Other;
    };
    if ACTIVITY_SUPERS.contains(&super_name) {
        ClassType::Activity
    } else if FRAGMENT_SUPERS.contains(&super_name) {
        ClassType::Fragment
    } else {
        ClassType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_activity_super() {
        for super_name in ACTIVITY_SUPERS {
            assert_eq!(classify(Some(super_name)), ClassType::Activity);
        }
    }

    #[test]
    fn recognizes_every_fragment_super() {
        for super_name in FRAGMENT_SUPERS {
            assert_eq!(classify(Some(super_name)), ClassType::Fragment);
        }
    }

    #[test]
    fn anything_else_is_other() {
        assert_eq!(classify(Some("java/lang/Object")), ClassType::Other);
        assert_eq!(classify(Some("com/x/BaseActivity")), ClassType::Other);
        assert_eq!(classify(None), ClassType::Other);
    }
}
