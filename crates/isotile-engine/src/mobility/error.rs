use core::fmt;

use crate::iso::EntityId;
use crate::stage::MoverId;

/// Errors surfaced by [`Mobility`](super::Mobility) requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobilityError {
    /// The target entity is not (or no longer) in the store.
    UnknownEntity(EntityId),
    /// No mover is attached under this handle.
    UnknownMover(MoverId),
    /// The request needs a ground provider and none was supplied.
    Ungrounded,
    /// The operation exists on the interface but has no implementation.
    Unimplemented { operation: &'static str },
}

impl fmt::Display for MobilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MobilityError::UnknownEntity(id) => write!(f, "unknown entity {id}"),
            MobilityError::UnknownMover(id) => write!(f, "unknown mover {id}"),
            MobilityError::Ungrounded => f.write_str("operation requires ground"),
            MobilityError::Unimplemented { operation } => {
                write!(f, "`{operation}` is not implemented")
            }
        }
    }
}

impl std::error::Error for MobilityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_operation() {
        let err = MobilityError::Unimplemented { operation: "reach" };
        assert_eq!(err.to_string(), "`reach` is not implemented");
    }
}
