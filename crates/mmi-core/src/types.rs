use std::fmt;

/// Identifies the Common Interface slot a session belongs to.
///
/// Opaque to this core beyond being threaded through to callbacks; slot
/// assignment is the transport layer's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u8);

impl SlotId {
    #[must_use]
    pub fn new(id: u8) -> Self {
        SlotId(id)
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for SlotId {
    fn from(id: u8) -> Self {
        SlotId(id)
    }
}

/// A session-layer assigned channel number, unique while the session is open.
///
/// The session layer may reuse numbers after a session closes; this core
/// never infers identity across a `clear_session` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionNumber(u16);

impl SessionNumber {
    #[must_use]
    pub fn new(number: u16) -> Self {
        SessionNumber(number)
    }

    #[must_use]
    pub fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for SessionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for SessionNumber {
    fn from(number: u16) -> Self {
        SessionNumber(number)
    }
}

/// The four independent fragment-reassembly streams a session carries.
///
/// Each session entry owns one buffer per variant; a `menu_more` never
/// touches the `list`/`subtitle_segment`/`subtitle_download` buffers of the
/// same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Menu,
    List,
    SubtitleSegment,
    SubtitleDownload,
}

/// The complete 24-value MMI object set, `0x9F8800..=0x9F8817`.
///
/// Any 24-bit value outside this set is an `UnexpectedTag` error at the
/// dispatch boundary; there is no room in this enum for an "other" variant
/// because the protocol does not permit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Tag {
    CloseMmi = 0x9F8800,
    DisplayControl = 0x9F8801,
    DisplayReply = 0x9F8802,
    TextLast = 0x9F8803,
    TextMore = 0x9F8804,
    KeypadControl = 0x9F8805,
    Keypress = 0x9F8806,
    Enq = 0x9F8807,
    Answ = 0x9F8808,
    MenuLast = 0x9F8809,
    MenuMore = 0x9F880A,
    MenuAnsw = 0x9F880B,
    ListLast = 0x9F880C,
    ListMore = 0x9F880D,
    SubtitleSegmentLast = 0x9F880E,
    SubtitleSegmentMore = 0x9F880F,
    DisplayMessage = 0x9F8810,
    SceneEndMark = 0x9F8811,
    SceneDone = 0x9F8812,
    SceneControl = 0x9F8813,
    SubtitleDownloadLast = 0x9F8814,
    SubtitleDownloadMore = 0x9F8815,
    FlushDownload = 0x9F8816,
    DownloadReply = 0x9F8817,
}

impl Tag {
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Decodes a big-endian 24-bit tag from the first three bytes of a PDU.
    ///
    /// Returns `None` for any value not in the MMI object set, including
    /// values outside the `0x9F88xx` range; callers turn that into
    /// `Error::UnexpectedTag`.
    #[must_use]
    pub fn from_u32(value: u32) -> Option<Self> {
        use Tag::*;
        Some(match value {
            0x9F8800 => CloseMmi,
            0x9F8801 => DisplayControl,
            0x9F8802 => DisplayReply,
            0x9F8803 => TextLast,
            0x9F8804 => TextMore,
            0x9F8805 => KeypadControl,
            0x9F8806 => Keypress,
            0x9F8807 => Enq,
            0x9F8808 => Answ,
            0x9F8809 => MenuLast,
            0x9F880A => MenuMore,
            0x9F880B => MenuAnsw,
            0x9F880C => ListLast,
            0x9F880D => ListMore,
            0x9F880E => SubtitleSegmentLast,
            0x9F880F => SubtitleSegmentMore,
            0x9F8810 => DisplayMessage,
            0x9F8811 => SceneEndMark,
            0x9F8812 => SceneDone,
            0x9F8813 => SceneControl,
            0x9F8814 => SubtitleDownloadLast,
            0x9F8815 => SubtitleDownloadMore,
            0x9F8816 => FlushDownload,
            0x9F8817 => DownloadReply,
            _ => return None,
        })
    }

    /// The fragment stream this tag belongs to, if it is fragmentable.
    #[must_use]
    pub fn stream(self) -> Option<Stream> {
        match self {
            Tag::MenuLast | Tag::MenuMore => Some(Stream::Menu),
            Tag::ListLast | Tag::ListMore => Some(Stream::List),
            Tag::SubtitleSegmentLast | Tag::SubtitleSegmentMore => Some(Stream::SubtitleSegment),
            Tag::SubtitleDownloadLast | Tag::SubtitleDownloadMore => {
                Some(Stream::SubtitleDownload)
            }
            _ => None,
        }
    }

    /// Whether this tag is the terminating fragment of its stream (`true`)
    /// or a continuation (`false`). Only meaningful when `stream()` is `Some`.
    #[must_use]
    pub fn is_last(self) -> bool {
        matches!(
            self,
            Tag::MenuLast | Tag::ListLast | Tag::SubtitleSegmentLast | Tag::SubtitleDownloadLast
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x9F8800, Tag::CloseMmi)]
    #[case(0x9F8809, Tag::MenuLast)]
    #[case(0x9F8817, Tag::DownloadReply)]
    fn round_trips_known_tags(#[case] raw: u32, #[case] expected: Tag) {
        let tag = Tag::from_u32(raw).expect("known tag");
        assert_eq!(tag, expected);
        assert_eq!(tag.as_u32(), raw);
    }

    #[rstest]
    #[case(0x9F88FF)]
    #[case(0x000000)]
    #[case(0xFFFFFF)]
    fn rejects_unknown_tags(#[case] raw: u32) {
        assert!(Tag::from_u32(raw).is_none());
    }

    #[test]
    fn stream_membership_matches_fragmentable_set() {
        assert_eq!(Tag::MenuMore.stream(), Some(Stream::Menu));
        assert_eq!(Tag::ListLast.stream(), Some(Stream::List));
        assert_eq!(Tag::CloseMmi.stream(), None);
        assert!(!Tag::MenuMore.is_last());
        assert!(Tag::MenuLast.is_last());
    }
}
