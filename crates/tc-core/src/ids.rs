//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are dense indices (`0..len`) into the `Vec` that owns the
//! corresponding records.  There is no "invalid" sentinel:
//! absence is always spelled `Option<Id>`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a stop in the catalogue, in insertion order.
    pub struct StopId(u32);
}

typed_id! {
    /// Index of a bus in the catalogue, in insertion order.
    pub struct BusId(u32);
}

typed_id! {
    /// Index of a routing-graph vertex.  One per stop served by a bus.
    pub struct VertexId(u32);
}

typed_id! {
    /// Index of a directed routing-graph edge, in insertion order.
    pub struct EdgeId(u32);
}
