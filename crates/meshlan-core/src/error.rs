//! Core error types.

use crate::address::AddressFamily;

#[derive(Debug, thiserror::Error)]
pub enum PrefixError {
    #[error("invalid network prefix '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: ipnet::AddrParseError,
    },

    #[error("prefix length {len} out of range for {family:?}")]
    LengthOutOfRange { len: u8, family: AddressFamily },
}
