use thiserror::Error;

/// A callback asked a protocol for something the current position does not allow.
///
/// These are programmer errors, not misses: a key that is simply absent is reported through
/// `Option`/`bool` results instead. Every check happens before the tree is touched, so a
/// violation never leaves a partial mutation behind.
///
/// The `try_` protocol entry points ([`Visit::try_visit`](crate::Visit::try_visit),
/// [`Walk::try_walk`](crate::Walk::try_walk)) return the violation; the plain entry points panic
/// with its message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Violation {
    /// `Insert` was requested for a key that is already present.
    #[error("illegal action '{action}' when visiting found key")]
    VisitFound {
        /// Name of the rejected action.
        action: &'static str,
    },
    /// `Replace` or `Remove` was requested for a key that is absent.
    #[error("illegal action '{action}' when visiting non-found key")]
    VisitNotFound {
        /// Name of the rejected action.
        action: &'static str,
    },
    #[error("cannot walk left when hasLeft() == false")]
    WalkLeft,
    #[error("cannot walk right when hasRight() == false")]
    WalkRight,
    #[error("cannot walk prev when hasPrev() == false")]
    WalkPrev,
    #[error("cannot walk next when hasNext() == false")]
    WalkNext,
    #[error("cannot walk parent when hasParent() == false")]
    WalkParent,
}

/// Escalates a contract violation into a panic.
#[cold]
#[track_caller]
pub(crate) fn violation(violation: Violation) -> ! {
    tracing::error!(%violation, "protocol contract violated");
    panic!("{violation}")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_action() {
        assert_eq!(
            Violation::VisitFound { action: "INSERT" }.to_string(),
            "illegal action 'INSERT' when visiting found key"
        );
        assert_eq!(
            Violation::VisitNotFound { action: "REMOVE" }.to_string(),
            "illegal action 'REMOVE' when visiting non-found key"
        );
        assert_eq!(Violation::WalkPrev.to_string(), "cannot walk prev when hasPrev() == false");
    }

    #[test]
    #[should_panic(expected = "cannot walk parent when hasParent() == false")]
    fn violation_panics_with_message() {
        violation(Violation::WalkParent);
    }
}
