/// Classification of a per-symbol failure.
///
/// Used by the aggregation pass to tag an omitted symbol. Neither class is
/// retried within the same pass.
///
/// | Class | Cause | Counts toward total outage? |
/// |-------|-------|-----------------------------|
/// | `Transport` | upstream unreachable, timeout, non-success status | Yes |
/// | `Parse` | payload shape or history not usable | Yes |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OmissionClass {
    /// The upstream could not be reached or refused the request.
    Transport,

    /// The upstream answered, but the payload could not be used.
    Parse,
}

impl std::fmt::Display for OmissionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Parse => write!(f, "parse"),
        }
    }
}
