use serde::Deserialize;

/// How much of the declared body has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStatus {
    /// Exactly the declared number of bytes is present.
    Complete,
    /// Fewer bytes than declared; keep reading.
    Incomplete,
    /// More bytes than declared.
    Overflow,
}

/// What the session does when more body bytes arrive than were declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlongBody {
    /// Keep waiting; the request never dispatches and the transport's idle
    /// timeout eventually closes the connection.
    #[default]
    Wait,
    /// Answer 400 and close.
    Reject,
}

/// Compares the bytes present after the header terminator with the
/// declared length. A missing declaration means an empty body, complete
/// no matter what follows the terminator.
pub fn check(declared: Option<usize>, present: usize) -> BodyStatus {
    let Some(declared) = declared else {
        return BodyStatus::Complete;
    };

    if present == declared {
        BodyStatus::Complete
    } else if present < declared {
        BodyStatus::Incomplete
    } else {
        BodyStatus::Overflow
    }
}
