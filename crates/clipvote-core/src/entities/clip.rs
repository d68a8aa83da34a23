//! Clip entity - a votable clip owned by a channel

use crate::value_objects::Handle;

/// Clip entity
///
/// `clip_id` is the stable external identifier assigned by the
/// streaming platform; `seq` is the channel-scoped display number
/// shown to viewers. Blocked clips are not votable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub channel_login: Handle,
    pub clip_id: String,
    pub seq: i64,
    pub title: String,
    pub blocked: bool,
}

impl Clip {
    /// Create a new, unblocked clip
    pub fn new(channel_login: Handle, clip_id: String, seq: i64, title: String) -> Self {
        Self {
            channel_login,
            clip_id,
            seq,
            title,
            blocked: false,
        }
    }

    /// Whether viewers may currently vote on this clip
    #[inline]
    pub fn is_votable(&self) -> bool {
        !self.blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clip_is_votable() {
        let clip = Clip::new(
            Handle::parse("streamer").unwrap(),
            "ExternalClipId".to_string(),
            1,
            "Big play".to_string(),
        );
        assert!(clip.is_votable());
    }

    #[test]
    fn test_blocked_clip_not_votable() {
        let mut clip = Clip::new(
            Handle::parse("streamer").unwrap(),
            "ExternalClipId".to_string(),
            1,
            "Big play".to_string(),
        );
        clip.blocked = true;
        assert!(!clip.is_votable());
    }
}
