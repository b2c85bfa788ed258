//! Strongly typed identifiers.
//!
//! Chat platform identifiers are 64-bit snowflakes; record identifiers are
//! database serials.

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[display("{}", _0)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }
        }
    };
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[display("{}", _0)]
        pub struct $name(pub i32);

        impl $name {
            /// Raw database value.
            pub fn get(self) -> i32 {
                self.0
            }
        }
    };
}

snowflake!(
    /// Discord server.
    GuildId
);
snowflake!(
    /// Discord user.
    UserId
);
snowflake!(
    /// Discord role.
    RoleId
);
snowflake!(
    /// Discord channel or thread.
    ChannelId
);
snowflake!(
    /// Discord message.
    MessageId
);

record_id!(
    /// Project record.
    ProjectId
);
record_id!(
    /// Curator record.
    CuratorId
);
record_id!(
    /// Employee record.
    EmployeeId
);
record_id!(
    /// Platform record.
    PlatformId
);
