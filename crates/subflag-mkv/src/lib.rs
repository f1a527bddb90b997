//! # subflag-mkv
//!
//! MediaInfo and MKVToolNix integration for subtitle track work.
//!
//! This crate provides functionality for:
//! - Listing subtitle tracks with element counts via mediainfo
//! - Reconciling mediainfo track IDs with mkvmerge track IDs via mkvinfo
//! - Setting the forced flag on a track via mkvpropedit
//!
//! All three tools are driven as subprocesses; nothing here links against
//! libmatroska.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use subflag_mkv::{mediainfo, mkvinfo};
//!
//! let path = Path::new("/path/to/movie.mkv");
//! let tracks = mediainfo::list_subtitle_tracks(path)?;
//! let identity = mkvinfo::TrackIdentityMap::parse(&mkvinfo::read_track_dump(path)?);
//! for track in &tracks {
//!     let merge_id = track.id.as_deref().and_then(|id| identity.merge_id(id));
//!     println!("{} -> {:?}", track.id_label(), merge_id);
//! }
//! # Ok::<(), subflag_mkv::Error>(())
//! ```

mod error;
pub mod mediainfo;
pub mod mkvinfo;
pub mod propedit;
pub mod tools;
mod types;

// Re-exports
pub use error::{Error, Result};
pub use mkvinfo::TrackIdentityMap;
pub use tools::{check_tool, check_tools, require_tool, ToolInfo, REQUIRED_TOOLS};
pub use types::SubtitleTrackInfo;
