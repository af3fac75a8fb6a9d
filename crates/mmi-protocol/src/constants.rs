//! Small fixed command/reply identifiers carried as opaque `u8` payload
//! bytes inside several fixed-length objects.
//!
//! These are not wire framing — the tag, length, and bit-packing rules
//! that define wire compatibility are pinned exactly by [`crate::asn1`],
//! [`mmi_core::Tag`], and the graphics bit layout in [`crate::encoders`].
//! The values below are the conventional EN 50221 / TS 101 699 assignments
//! also used by the dvb-apps family of implementations this core is
//! compatible with.

/// `close_mmi` / `close()` command identifiers.
pub const CLOSE_CMD_ID_IMMEDIATE: u8 = 0x00;
pub const CLOSE_CMD_ID_DELAY: u8 = 0x01;

/// `display_control` command identifiers.
pub const DISPLAY_CONTROL_CMD_ID_SET_MMI_MODE: u8 = 0x01;
pub const DISPLAY_CONTROL_CMD_ID_DISPLAY_CHARACTER_TABLE_LIST: u8 = 0x02;
pub const DISPLAY_CONTROL_CMD_ID_INPUT_CHARACTER_TABLE_LIST: u8 = 0x03;
pub const DISPLAY_CONTROL_CMD_ID_GET_OVERLAY_GFX_CHARACTERISTICS: u8 = 0x04;
pub const DISPLAY_CONTROL_CMD_ID_GET_FULLSCREEN_GFX_CHARACTERISTICS: u8 = 0x05;

/// `display_reply` reply identifiers — these select which payload shape
/// the encoder builds (see [`crate::encoders::display_reply`]).
pub const DISPLAY_REPLY_ID_MMI_MODE_ACK: u8 = 0x00;
pub const DISPLAY_REPLY_ID_LIST_DISPLAY_CHAR_TABLES: u8 = 0x01;
pub const DISPLAY_REPLY_ID_LIST_INPUT_CHAR_TABLES: u8 = 0x02;
pub const DISPLAY_REPLY_ID_LIST_OVERLAY_GFX_CHARACTERISTICS: u8 = 0x03;
pub const DISPLAY_REPLY_ID_LIST_FULLSCREEN_GFX_CHARACTERISTICS: u8 = 0x04;
pub const DISPLAY_REPLY_ID_UNKNOWN_CMD_ID: u8 = 0xF0;
pub const DISPLAY_REPLY_ID_UNKNOWN_MMI_MODE: u8 = 0xF1;
pub const DISPLAY_REPLY_ID_UNKNOWN_CHAR_TABLE: u8 = 0xF2;

/// `answ` identifiers.
pub const ANSW_ID_CANCEL: u8 = 0x00;
pub const ANSW_ID_ANSWER: u8 = 0x01;
