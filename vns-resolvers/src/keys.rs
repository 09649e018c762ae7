//! Well-known 22-byte text keys. The resolver's text store takes any
//! caller-supplied key rather than a closed enum, so these constants
//! just give the common ones a name instead of a magic byte string.

const fn pad(label: &[u8]) -> [u8; 22] {
    let mut buf = [0u8; 22];
    let mut i = 0;
    while i < label.len() && i < 22 {
        buf[i] = label[i];
        i += 1;
    }
    buf
}

pub const EMAIL: [u8; 22] = pad(b"email");
pub const URL: [u8; 22] = pad(b"url");
pub const AVATAR: [u8; 22] = pad(b"avatar");
pub const DESCRIPTION: [u8; 22] = pad(b"description");
pub const NOTICE: [u8; 22] = pad(b"notice");
pub const KEYWORDS: [u8; 22] = pad(b"keywords");
pub const TWITTER: [u8; 22] = pad(b"com.twitter");
pub const GITHUB: [u8; 22] = pad(b"com.github");

/// The default coin type for `set_addr`/`addr_of`'s sibling call,
/// `set_address`/`address_of` with an explicit `coin_type` of 0.
pub const COIN_NATIVE: u64 = 0;
