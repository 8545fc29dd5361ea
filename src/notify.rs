//! Notification icon identifiers understood by the console's notify feature.

pub const XBOX_LOGO: u32 = 0;
pub const NEW_MESSAGE_LOGO: u32 = 1;
pub const FRIEND_REQUEST_LOGO: u32 = 2;
pub const UPDATING: u32 = 76;
