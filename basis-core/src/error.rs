use thiserror::Error;

/// Errors raised by the library itself, as opposed to the rejection payloads
/// carried by promises.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation needing at least one element ran on an empty sequence.
    #[error("tried to get the {op} value of an empty sequence")]
    EmptySequence {
        /// Name of the operation, e.g. `head`.
        op: &'static str,
    },

    /// The scheduler behind a [`Spawner`](crate::Spawner) has been dropped.
    #[error("the scheduler has shut down")]
    Shutdown,
}

/// A promise was rejected while nothing was listening for its rejection.
///
/// These are handed to [`Schedule::report_unhandled`](crate::Schedule), the
/// scheduler's top-level error channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unhandled rejection at {at}ms: {reason}")]
pub struct UnhandledRejection {
    reason: String,
    at: u64,
}

impl UnhandledRejection {
    /// Records a rejection, rendered as `reason`, that happened at the
    /// scheduler timestamp `at`.
    pub fn new(reason: impl Into<String>, at: u64) -> Self {
        UnhandledRejection { reason: reason.into(), at }
    }

    /// The rendered rejection reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Scheduler timestamp, in milliseconds, of the rejection.
    pub fn at(&self) -> u64 {
        self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = Error::EmptySequence { op: "head" };
        assert_eq!(err.to_string(), "tried to get the head value of an empty sequence");
        let unhandled = UnhandledRejection::new("\"boom\"", 42);
        assert_eq!(unhandled.to_string(), "unhandled rejection at 42ms: \"boom\"");
        assert_eq!(unhandled.reason(), "\"boom\"");
        assert_eq!(unhandled.at(), 42);
    }
}
