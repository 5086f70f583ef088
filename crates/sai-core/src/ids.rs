//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so hosts
//! can map their own guid/entry numbers straight across.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `false` only for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// Raw integer value, for numeric event arguments.
            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Runtime identity of one spawned creature (unique per zone).
    pub struct CreatureId(u64);
}

typed_id! {
    /// Runtime identity of any unit the controller may reference: players,
    /// creatures, summons.  Always looked up again before use.
    pub struct ActorId(u64);
}

typed_id! {
    /// Identifier of a waypoint path in the waypoint store.
    pub struct PathId(u32);
}

typed_id! {
    /// Identifier of a quest whose progress an escort or follow settles.
    pub struct QuestId(u32);
}

typed_id! {
    /// Runtime identity of one spawned game object (chest, door, lever).
    pub struct GameObjectId(u64);
}

typed_id! {
    /// Template entry of a creature (shared by every spawn of that kind).
    pub struct CreatureEntry(u32);
}

impl From<CreatureId> for ActorId {
    /// Creatures are actors too; the numeric space is shared.
    #[inline(always)]
    fn from(id: CreatureId) -> ActorId {
        ActorId(id.0)
    }
}
