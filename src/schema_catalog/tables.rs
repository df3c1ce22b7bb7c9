//! Table and column definitions of the music server database.
//!
//! Every table is described in the shape it had when it was first
//! introduced. Columns that arrived later live in their own lists and are
//! added by dedicated steps, so a freshly created table and an upgraded one
//! end up identical.

use super::defaults::{AlbumListType, TranscodeScheme};
use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, ForeignKeyOnChange, SqlType, Table};

// `*_FK` references cascade on delete, `*_REF` ones do not.
const USER_FK: ForeignKey = ForeignKey {
    foreign_table: "user",
    foreign_column: "username",
    on_delete: ForeignKeyOnChange::Cascade,
};

const MEDIA_FILE_FK: ForeignKey = ForeignKey {
    foreign_table: "media_file",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const PLAYER_FK: ForeignKey = ForeignKey {
    foreign_table: "player",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const PLAYLIST_FK: ForeignKey = ForeignKey {
    foreign_table: "playlist",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const USER_REF: ForeignKey = ForeignKey {
    foreign_table: "user",
    foreign_column: "username",
    on_delete: ForeignKeyOnChange::NoAction,
};

const ROLE_REF: ForeignKey = ForeignKey {
    foreign_table: "role",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const MUSIC_FOLDER_FK: ForeignKey = ForeignKey {
    foreign_table: "music_folder",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const SYSTEM_AVATAR_REF: ForeignKey = ForeignKey {
    foreign_table: "system_avatar",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::NoAction,
};

const TRANSCODING_FK: ForeignKey = ForeignKey {
    foreign_table: "transcoding",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const TRANSCODING2_FK: ForeignKey = ForeignKey {
    foreign_table: "transcoding2",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const PODCAST_CHANNEL_FK: ForeignKey = ForeignKey {
    foreign_table: "podcast_channel",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const SHARE_FK: ForeignKey = ForeignKey {
    foreign_table: "share",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const ALBUM_FK: ForeignKey = ForeignKey {
    foreign_table: "album",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artist",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const PLAY_QUEUE_FK: ForeignKey = ForeignKey {
    foreign_table: "play_queue",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

// =============================================================================
// Users and roles
// =============================================================================

pub const VERSION_TABLE: Table = Table {
    name: "version",
    columns: &[sqlite_column!("version", &SqlType::Integer, non_null = true)],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const ROLE_TABLE: Table = Table {
    name: "role",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const USER_TABLE: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!(
            "username",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("password", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const USER_BYTES_COLUMNS: &[Column] = &[
    sqlite_column!(
        "bytes_streamed",
        &SqlType::Integer,
        non_null = true,
        default_value = Some("0")
    ),
    sqlite_column!(
        "bytes_downloaded",
        &SqlType::Integer,
        non_null = true,
        default_value = Some("0")
    ),
    sqlite_column!(
        "bytes_uploaded",
        &SqlType::Integer,
        non_null = true,
        default_value = Some("0")
    ),
];

pub const USER_LDAP_AUTHENTICATED_COLUMNS: &[Column] = &[sqlite_column!(
    "ldap_authenticated",
    &SqlType::Integer,
    non_null = true,
    default_value = Some("0")
)];

pub const USER_EMAIL_COLUMNS: &[Column] = &[sqlite_column!("email", &SqlType::Text)];

pub const USER_ROLE_TABLE: Table = Table {
    name: "user_role",
    columns: &[
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_REF)
        ),
        sqlite_column!(
            "role_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ROLE_REF)
        ),
    ],
    primary_key: &["username", "role_id"],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Music folders, radios and players
// =============================================================================

const CHANGED_COLUMNS: &[Column] = &[sqlite_column!(
    "changed",
    &SqlType::Text,
    non_null = true,
    default_value = Some("0")
)];

pub const MUSIC_FOLDER_TABLE: Table = Table {
    name: "music_folder",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("path", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("enabled", &SqlType::Integer, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const MUSIC_FOLDER_CHANGED_COLUMNS: &[Column] = CHANGED_COLUMNS;

pub const MUSIC_FILE_INFO_TABLE: Table = Table {
    name: "music_file_info",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("path", &SqlType::Text, non_null = true),
        sqlite_column!("rating", &SqlType::Integer),
        sqlite_column!("comment", &SqlType::Text),
        sqlite_column!("play_count", &SqlType::Integer),
        sqlite_column!("last_played", &SqlType::Text),
    ],
    primary_key: &[],
    indices: &[("idx_music_file_info_path", "path")],
    unique_constraints: &[],
};

pub const MUSIC_FILE_INFO_ENABLED_COLUMNS: &[Column] = &[sqlite_column!(
    "enabled",
    &SqlType::Integer,
    non_null = true,
    default_value = Some("1")
)];

pub const INTERNET_RADIO_TABLE: Table = Table {
    name: "internet_radio",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("stream_url", &SqlType::Text, non_null = true),
        sqlite_column!("homepage_url", &SqlType::Text),
        sqlite_column!("enabled", &SqlType::Integer, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const INTERNET_RADIO_CHANGED_COLUMNS: &[Column] = CHANGED_COLUMNS;

pub const PLAYER_TABLE: Table = Table {
    name: "player",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("type", &SqlType::Text),
        sqlite_column!("username", &SqlType::Text),
        sqlite_column!("ip_address", &SqlType::Text),
        sqlite_column!("auto_control_enabled", &SqlType::Integer, non_null = true),
        sqlite_column!("last_seen", &SqlType::Text),
        sqlite_column!("cover_art_scheme", &SqlType::Text, non_null = true),
        sqlite_column!("transcode_scheme", &SqlType::Text, non_null = true),
        sqlite_column!(
            "dynamic_ip",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
        sqlite_column!(
            "client_side_playlist",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "jukebox",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "technology",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'WEB'")
        ),
        sqlite_column!("client_id", &SqlType::Text),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const MUSIC_FOLDER_USER_TABLE: Table = Table {
    name: "music_folder_user",
    columns: &[
        sqlite_column!(
            "music_folder_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&MUSIC_FOLDER_FK)
        ),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
    ],
    primary_key: &[],
    indices: &[("idx_music_folder_user_username", "username")],
    unique_constraints: &[],
};

// =============================================================================
// User settings
// =============================================================================

macro_rules! integer_default {
    ($name:expr, $default:expr) => {
        sqlite_column!(
            $name,
            &SqlType::Integer,
            non_null = true,
            default_value = Some($default)
        )
    };
}

pub const USER_SETTINGS_TABLE: Table = Table {
    name: "user_settings",
    columns: &[
        sqlite_column!(
            "username",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("locale", &SqlType::Text),
        sqlite_column!("theme_id", &SqlType::Text),
        integer_default!("final_version_notification", "1"),
        integer_default!("beta_version_notification", "0"),
        integer_default!("main_caption_cutoff", "35"),
        integer_default!("main_track_number", "1"),
        integer_default!("main_artist", "1"),
        integer_default!("main_album", "0"),
        integer_default!("main_genre", "0"),
        integer_default!("main_year", "0"),
        integer_default!("main_bit_rate", "0"),
        integer_default!("main_duration", "1"),
        integer_default!("main_format", "0"),
        integer_default!("main_file_size", "0"),
        integer_default!("playlist_caption_cutoff", "35"),
        integer_default!("playlist_track_number", "0"),
        integer_default!("playlist_artist", "1"),
        integer_default!("playlist_album", "1"),
        integer_default!("playlist_genre", "0"),
        integer_default!("playlist_year", "1"),
        integer_default!("playlist_bit_rate", "0"),
        integer_default!("playlist_duration", "1"),
        integer_default!("playlist_format", "1"),
        integer_default!("playlist_file_size", "1"),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const USER_SETTINGS_LAST_FM_COLUMNS: &[Column] = &[
    integer_default!("last_fm_enabled", "0"),
    sqlite_column!("last_fm_username", &SqlType::Text),
    sqlite_column!("last_fm_password", &SqlType::Text),
];

pub const USER_SETTINGS_TRANSCODE_SCHEME_COLUMNS: &[Column] = &[sqlite_column!(
    "transcode_scheme",
    &SqlType::Text,
    non_null = true,
    default_value = Some(TranscodeScheme::Off.sql_default())
)];

pub const USER_SETTINGS_SHOW_NOW_PLAYING_COLUMNS: &[Column] = &[integer_default!("show_now_playing", "1")];

pub const USER_SETTINGS_SELECTED_MUSIC_FOLDER_COLUMNS: &[Column] =
    &[integer_default!("selected_music_folder_id", "-1")];

pub const USER_SETTINGS_PARTY_MODE_COLUMNS: &[Column] = &[integer_default!("party_mode_enabled", "0")];

pub const USER_SETTINGS_NOW_PLAYING_ALLOWED_COLUMNS: &[Column] =
    &[integer_default!("now_playing_allowed", "1")];

pub const USER_SETTINGS_WEB_PLAYER_DEFAULT_COLUMNS: &[Column] =
    &[integer_default!("web_player_default", "0")];

pub const USER_SETTINGS_AVATAR_SCHEME_COLUMNS: &[Column] = &[sqlite_column!(
    "avatar_scheme",
    &SqlType::Text,
    non_null = true,
    default_value = Some("'NONE'")
)];

/// SQLite cannot add a foreign key constraint to an existing table, the
/// reference is declared on the new column instead.
pub const USER_SETTINGS_SYSTEM_AVATAR_COLUMNS: &[Column] = &[sqlite_column!(
    "system_avatar_id",
    &SqlType::Integer,
    foreign_key = Some(&SYSTEM_AVATAR_REF)
)];

pub const USER_SETTINGS_CHANGED_COLUMNS: &[Column] = CHANGED_COLUMNS;

pub const USER_SETTINGS_SHOW_CHAT_COLUMNS: &[Column] = &[integer_default!("show_chat", "1")];

pub const USER_SETTINGS_SONG_NOTIFICATION_COLUMNS: &[Column] = &[integer_default!("song_notification", "1")];

pub const USER_SETTINGS_SHOW_ARTIST_INFO_COLUMNS: &[Column] = &[integer_default!("show_artist_info", "1")];

pub const USER_SETTINGS_AUTO_HIDE_PLAY_QUEUE_COLUMNS: &[Column] =
    &[integer_default!("auto_hide_play_queue", "1")];

pub const USER_SETTINGS_VIEW_AS_LIST_COLUMNS: &[Column] = &[integer_default!("view_as_list", "0")];

pub const USER_SETTINGS_DEFAULT_ALBUM_LIST_COLUMNS: &[Column] = &[sqlite_column!(
    "default_album_list",
    &SqlType::Text,
    non_null = true,
    default_value = Some(AlbumListType::Random.sql_default())
)];

pub const USER_SETTINGS_QUEUE_FOLLOWING_SONGS_COLUMNS: &[Column] =
    &[integer_default!("queue_following_songs", "1")];

pub const USER_SETTINGS_SHOW_SIDE_BAR_COLUMNS: &[Column] = &[integer_default!("show_side_bar", "1")];

pub const USER_RATING_TABLE: Table = Table {
    name: "user_rating",
    columns: &[
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("path", &SqlType::Text, non_null = true),
        sqlite_column!("rating", &SqlType::Real, non_null = true),
    ],
    primary_key: &["username", "path"],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Transcoding
// =============================================================================

pub const TRANSCODING_TABLE: Table = Table {
    name: "transcoding",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("source_format", &SqlType::Text, non_null = true),
        sqlite_column!("target_format", &SqlType::Text, non_null = true),
        sqlite_column!("step1", &SqlType::Text, non_null = true),
        sqlite_column!("step2", &SqlType::Text),
        sqlite_column!("step3", &SqlType::Text),
        sqlite_column!("enabled", &SqlType::Integer, non_null = true),
        integer_default!("default_active", "1"),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const PLAYER_TRANSCODING_TABLE: Table = Table {
    name: "player_transcoding",
    columns: &[
        sqlite_column!(
            "player_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PLAYER_FK)
        ),
        sqlite_column!(
            "transcoding_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&TRANSCODING_FK)
        ),
    ],
    primary_key: &["player_id", "transcoding_id"],
    indices: &[],
    unique_constraints: &[],
};

pub const TRANSCODING2_TABLE: Table = Table {
    name: "transcoding2",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("source_formats", &SqlType::Text, non_null = true),
        sqlite_column!("target_format", &SqlType::Text, non_null = true),
        sqlite_column!("step1", &SqlType::Text, non_null = true),
        sqlite_column!("step2", &SqlType::Text),
        sqlite_column!("step3", &SqlType::Text),
        integer_default!("default_active", "1"),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const PLAYER_TRANSCODING2_TABLE: Table = Table {
    name: "player_transcoding2",
    columns: &[
        sqlite_column!(
            "player_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PLAYER_FK)
        ),
        sqlite_column!(
            "transcoding_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&TRANSCODING2_FK)
        ),
    ],
    primary_key: &["player_id", "transcoding_id"],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Podcasts
// =============================================================================

pub const PODCAST_CHANNEL_TABLE: Table = Table {
    name: "podcast_channel",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("url", &SqlType::Text, non_null = true),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("status", &SqlType::Text, non_null = true),
        sqlite_column!("error_message", &SqlType::Text),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const PODCAST_CHANNEL_IMAGE_URL_COLUMNS: &[Column] =
    &[sqlite_column!("image_url", &SqlType::Text)];

pub const PODCAST_EPISODE_TABLE: Table = Table {
    name: "podcast_episode",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "channel_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PODCAST_CHANNEL_FK)
        ),
        sqlite_column!("url", &SqlType::Text, non_null = true),
        sqlite_column!("path", &SqlType::Text),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("publish_date", &SqlType::Text),
        sqlite_column!("duration", &SqlType::Text),
        sqlite_column!("bytes_total", &SqlType::Integer),
        sqlite_column!("bytes_downloaded", &SqlType::Integer),
        sqlite_column!("status", &SqlType::Text, non_null = true),
        sqlite_column!("error_message", &SqlType::Text),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Avatars
// =============================================================================

pub const SYSTEM_AVATAR_TABLE: Table = Table {
    name: "system_avatar",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("created_date", &SqlType::Text, non_null = true),
        sqlite_column!("mime_type", &SqlType::Text, non_null = true),
        sqlite_column!("width", &SqlType::Integer, non_null = true),
        sqlite_column!("height", &SqlType::Integer, non_null = true),
        sqlite_column!("data", &SqlType::Blob, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const CUSTOM_AVATAR_TABLE: Table = Table {
    name: "custom_avatar",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("created_date", &SqlType::Text, non_null = true),
        sqlite_column!("mime_type", &SqlType::Text, non_null = true),
        sqlite_column!("width", &SqlType::Integer, non_null = true),
        sqlite_column!("height", &SqlType::Integer, non_null = true),
        sqlite_column!("data", &SqlType::Blob, non_null = true),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Shares
// =============================================================================

pub const SHARE_TABLE: Table = Table {
    name: "share",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("created", &SqlType::Text, non_null = true),
        sqlite_column!("expires", &SqlType::Text),
        sqlite_column!("last_visited", &SqlType::Text),
        integer_default!("visit_count", "0"),
    ],
    primary_key: &[],
    indices: &[("idx_share_name", "name")],
    unique_constraints: &[],
};

pub const SHARE_FILE_TABLE: Table = Table {
    name: "share_file",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "share_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&SHARE_FK)
        ),
        sqlite_column!("path", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Media library
// =============================================================================

pub const MEDIA_FILE_TABLE: Table = Table {
    name: "media_file",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("path", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("folder", &SqlType::Text),
        sqlite_column!("type", &SqlType::Text, non_null = true),
        sqlite_column!("format", &SqlType::Text),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("album", &SqlType::Text),
        sqlite_column!("artist", &SqlType::Text),
        sqlite_column!("album_artist", &SqlType::Text),
        sqlite_column!("disc_number", &SqlType::Integer),
        sqlite_column!("track_number", &SqlType::Integer),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("genre", &SqlType::Text),
        sqlite_column!("bit_rate", &SqlType::Integer),
        sqlite_column!("variable_bit_rate", &SqlType::Integer, non_null = true),
        sqlite_column!("duration_seconds", &SqlType::Integer),
        sqlite_column!("file_size", &SqlType::Integer),
        sqlite_column!("width", &SqlType::Integer),
        sqlite_column!("height", &SqlType::Integer),
        sqlite_column!("cover_art_path", &SqlType::Text),
        sqlite_column!("parent_path", &SqlType::Text),
        sqlite_column!("play_count", &SqlType::Integer, non_null = true),
        sqlite_column!("last_played", &SqlType::Text),
        sqlite_column!("comment", &SqlType::Text),
        sqlite_column!("created", &SqlType::Text, non_null = true),
        sqlite_column!("changed", &SqlType::Text, non_null = true),
        sqlite_column!("last_scanned", &SqlType::Text, non_null = true),
        sqlite_column!("children_last_updated", &SqlType::Text, non_null = true),
        sqlite_column!("present", &SqlType::Integer, non_null = true),
        sqlite_column!("version", &SqlType::Integer, non_null = true),
    ],
    primary_key: &[],
    indices: &[
        ("idx_media_file_path", "path"),
        ("idx_media_file_parent_path", "parent_path"),
        ("idx_media_file_type", "type"),
        ("idx_media_file_album", "album"),
        ("idx_media_file_artist", "artist"),
        ("idx_media_file_album_artist", "album_artist"),
        ("idx_media_file_present", "present"),
        ("idx_media_file_genre", "genre"),
        ("idx_media_file_play_count", "play_count"),
        ("idx_media_file_created", "created"),
        ("idx_media_file_last_played", "last_played"),
    ],
    unique_constraints: &[],
};

pub const ARTIST_TABLE: Table = Table {
    name: "artist",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("cover_art_path", &SqlType::Text),
        integer_default!("album_count", "0"),
        sqlite_column!("last_scanned", &SqlType::Text, non_null = true),
        sqlite_column!("present", &SqlType::Integer, non_null = true),
    ],
    primary_key: &[],
    indices: &[
        ("idx_artist_name", "name"),
        ("idx_artist_present", "present"),
    ],
    unique_constraints: &[],
};

pub const ARTIST_FOLDER_ID_COLUMNS: &[Column] =
    &[sqlite_column!("folder_id", &SqlType::Integer)];

pub const ALBUM_TABLE: Table = Table {
    name: "album",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("path", &SqlType::Text, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        integer_default!("song_count", "0"),
        integer_default!("duration_seconds", "0"),
        sqlite_column!("cover_art_path", &SqlType::Text),
        integer_default!("play_count", "0"),
        sqlite_column!("last_played", &SqlType::Text),
        sqlite_column!("comment", &SqlType::Text),
        sqlite_column!("created", &SqlType::Text, non_null = true),
        sqlite_column!("last_scanned", &SqlType::Text, non_null = true),
        sqlite_column!("present", &SqlType::Integer, non_null = true),
    ],
    primary_key: &[],
    indices: &[
        ("idx_album_artist_name", "artist, name"),
        ("idx_album_play_count", "play_count"),
        ("idx_album_last_played", "last_played"),
        ("idx_album_present", "present"),
    ],
    unique_constraints: &[&["artist", "name"]],
};

pub const ALBUM_YEAR_COLUMNS: &[Column] = &[sqlite_column!("year", &SqlType::Integer)];

pub const ALBUM_GENRE_COLUMNS: &[Column] = &[sqlite_column!("genre", &SqlType::Text)];

pub const ALBUM_FOLDER_ID_COLUMNS: &[Column] = &[sqlite_column!("folder_id", &SqlType::Integer)];

pub const GENRE_TABLE: Table = Table {
    name: "genre",
    columns: &[
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("song_count", &SqlType::Integer, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const GENRE_ALBUM_COUNT_COLUMNS: &[Column] = &[integer_default!("album_count", "0")];

// =============================================================================
// Stars, playlists, bookmarks and play queues
// =============================================================================

pub const STARRED_MEDIA_FILE_TABLE: Table = Table {
    name: "starred_media_file",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "media_file_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&MEDIA_FILE_FK)
        ),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("created", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[
        ("idx_starred_media_file_media_file_id", "media_file_id"),
        ("idx_starred_media_file_username", "username"),
    ],
    unique_constraints: &[&["media_file_id", "username"]],
};

pub const STARRED_ALBUM_TABLE: Table = Table {
    name: "starred_album",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ALBUM_FK)
        ),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("created", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[
        ("idx_starred_album_album_id", "album_id"),
        ("idx_starred_album_username", "username"),
    ],
    unique_constraints: &[&["album_id", "username"]],
};

pub const STARRED_ARTIST_TABLE: Table = Table {
    name: "starred_artist",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("created", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[
        ("idx_starred_artist_artist_id", "artist_id"),
        ("idx_starred_artist_username", "username"),
    ],
    unique_constraints: &[&["artist_id", "username"]],
};

pub const PLAYLIST_TABLE: Table = Table {
    name: "playlist",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("is_public", &SqlType::Integer, non_null = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("comment", &SqlType::Text),
        integer_default!("file_count", "0"),
        integer_default!("duration_seconds", "0"),
        sqlite_column!("created", &SqlType::Text, non_null = true),
        sqlite_column!("changed", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const PLAYLIST_IMPORTED_FROM_COLUMNS: &[Column] =
    &[sqlite_column!("imported_from", &SqlType::Text)];

pub const PLAYLIST_FILE_TABLE: Table = Table {
    name: "playlist_file",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "playlist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PLAYLIST_FK)
        ),
        sqlite_column!(
            "media_file_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&MEDIA_FILE_FK)
        ),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const PLAYLIST_USER_TABLE: Table = Table {
    name: "playlist_user",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "playlist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PLAYLIST_FK)
        ),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[&["playlist_id", "username"]],
};

pub const BOOKMARK_TABLE: Table = Table {
    name: "bookmark",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "media_file_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&MEDIA_FILE_FK)
        ),
        sqlite_column!("position_millis", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("comment", &SqlType::Text),
        sqlite_column!("created", &SqlType::Text, non_null = true),
        sqlite_column!("changed", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[
        ("idx_bookmark_media_file_id", "media_file_id"),
        ("idx_bookmark_username", "username"),
    ],
    unique_constraints: &[&["media_file_id", "username"]],
};

pub const PLAY_QUEUE_TABLE: Table = Table {
    name: "play_queue",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "username",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        // keyword in window frame clauses
        sqlite_column!("\"current\"", &SqlType::Integer),
        sqlite_column!("position_millis", &SqlType::Integer),
        sqlite_column!("changed", &SqlType::Text, non_null = true),
        sqlite_column!("changed_by", &SqlType::Text, non_null = true),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

pub const PLAY_QUEUE_FILE_TABLE: Table = Table {
    name: "play_queue_file",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "play_queue_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PLAY_QUEUE_FK)
        ),
        sqlite_column!(
            "media_file_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&MEDIA_FILE_FK)
        ),
    ],
    primary_key: &[],
    indices: &[],
    unique_constraints: &[],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_defaults_are_rendered_as_literals() {
        assert_eq!(
            USER_SETTINGS_TRANSCODE_SCHEME_COLUMNS[0].add_column_sql("user_settings"),
            "ALTER TABLE user_settings ADD COLUMN transcode_scheme TEXT NOT NULL DEFAULT 'OFF'"
        );
        assert_eq!(
            USER_SETTINGS_DEFAULT_ALBUM_LIST_COLUMNS[0].add_column_sql("user_settings"),
            "ALTER TABLE user_settings ADD COLUMN default_album_list TEXT NOT NULL DEFAULT 'random'"
        );
    }

    #[test]
    fn test_user_role_has_composite_key_and_references() {
        let sql = USER_ROLE_TABLE.create_table_sql();
        assert!(sql.contains("PRIMARY KEY (username, role_id)"));
        assert!(sql.contains("REFERENCES role(id)"));
    }
}
