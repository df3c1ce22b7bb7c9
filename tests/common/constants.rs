//! Shared constants for end-to-end tests
//!
//! When the seeded settings change, update only this file.

// ============================================================================
// Catalog Settings
// ============================================================================

/// Account created together with the `user` table
pub const ADMIN_USER: &str = "admin";

pub const ADMIN_PASS: &str = "adminpass123";

/// Folder registered together with the `music_folder` table
pub const MUSIC_FOLDER: &str = "/srv/test-music";

// ============================================================================
// Expected Contents
// ============================================================================

/// Roles 1-5 are seeded with the `role` table, 6-11 arrive one step each
pub const ROLE_COUNT: i64 = 11;

/// A sample of the tables a fully evolved database must have
pub const CORE_TABLES: &[&str] = &[
    "version",
    "role",
    "user",
    "user_role",
    "music_folder",
    "user_settings",
    "system_avatar",
    "transcoding2",
    "player_transcoding2",
    "media_file",
    "album",
    "artist",
    "playlist",
    "play_queue",
    "play_queue_file",
];
