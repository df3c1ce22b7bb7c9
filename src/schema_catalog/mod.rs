//! The music server schema, as an append-only list of guarded steps.
//!
//! New steps go at the end. Existing steps are never edited, reordered or
//! removed: a database last touched years ago must still pass through every
//! guard on its way to the current shape.

mod avatars;
mod defaults;
mod tables;
mod transcoding;

pub use avatars::{bundled_avatars, AVATARS, AVATAR_MIME_TYPE, AVATAR_SIZE};
pub use defaults::{AlbumListType, TranscodeScheme};
pub use tables::*;
pub use transcoding::LEGACY_VIDEO_FORMATS;

use crate::evolution::{Catalog, CatalogError, Guard, MigrationStep, Statement};
use rusqlite::types::Value;

pub const MUSIC_FOLDER_ENV_VAR: &str = "MUSIC_FOLDER";

/// Owner of the ratings kept in `music_file_info` before per-user ratings
/// existed. They are copied only if this account is still there.
const LEGACY_ADMIN_USERNAME: &str = "admin";

#[cfg(windows)]
const OS_DEFAULT_MUSIC_FOLDER: &str = "c:\\music";
#[cfg(not(windows))]
const OS_DEFAULT_MUSIC_FOLDER: &str = "/var/music";

/// Runtime values the catalog writes into seeded rows. They are always bound
/// as statement parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub default_music_folder: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl CatalogSettings {
    /// `MUSIC_FOLDER` from the environment, else the platform default.
    pub fn default_music_folder() -> String {
        std::env::var(MUSIC_FOLDER_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| OS_DEFAULT_MUSIC_FOLDER.to_string())
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_music_folder: Self::default_music_folder(),
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
        }
    }
}

/// Who receives a newly introduced role.
enum Grantees {
    /// Users already holding one of these role ids.
    RoleHolders(&'static str),
    AllUsers,
}

fn role_step(id: i64, name: &'static str, grantees: Grantees) -> MigrationStep {
    let grant_sql = match grantees {
        Grantees::RoleHolders(role_ids) => format!(
            "INSERT OR IGNORE INTO user_role (username, role_id)
             SELECT DISTINCT u.username, ?1 FROM user u, user_role ur
             WHERE u.username = ur.username AND ur.role_id IN ({})",
            role_ids
        ),
        Grantees::AllUsers => "INSERT OR IGNORE INTO user_role (username, role_id)
             SELECT DISTINCT u.username, ?1 FROM user u"
            .to_string(),
    };
    MigrationStep::schema(
        format!("role:{}", name),
        Guard::RowExists {
            relation: "role",
            predicate: "id = ?1",
            params: vec![Value::Integer(id)],
        },
        vec![
            Statement::update(
                "INSERT INTO role (id, name) VALUES (?1, ?2)",
                vec![Value::Integer(id), Value::Text(name.to_string())],
            ),
            Statement::update(grant_sql, vec![Value::Integer(id)]),
        ],
    )
}

/// Creates `index` unless some index on `table` already starts with `column`.
fn leading_index_step(
    table: &'static str,
    column: &'static str,
    relation: &'static str,
    index: &'static str,
) -> MigrationStep {
    MigrationStep::schema(
        format!("index:{}.{}", table, column),
        Guard::RowExists {
            relation,
            predicate: "i.seqno = 0 AND i.name = ?1 COLLATE NOCASE",
            params: vec![Value::Text(column.to_string())],
        },
        vec![Statement::execute(format!(
            "CREATE INDEX {} ON {}({})",
            index, table, column
        ))],
    )
}

/// Every step, in the order it must run.
pub fn steps(settings: &CatalogSettings) -> Vec<MigrationStep> {
    let admin = Value::Text(settings.admin_username.clone());
    let mut steps = vec![
        MigrationStep::create_table(
            &VERSION_TABLE,
            vec![Statement::execute("INSERT INTO version (version) VALUES (1)")],
        ),
        MigrationStep::create_table(
            &ROLE_TABLE,
            vec![Statement::execute(
                "INSERT INTO role (id, name) VALUES
                 (1, 'admin'), (2, 'download'), (3, 'upload'), (4, 'playlist'), (5, 'coverart')",
            )],
        ),
        MigrationStep::create_table(
            &USER_TABLE,
            vec![Statement::update(
                "INSERT INTO user (username, password) VALUES (?1, ?2)",
                vec![
                    admin.clone(),
                    Value::Text(settings.admin_password.clone()),
                ],
            )],
        ),
        MigrationStep::create_table(
            &USER_ROLE_TABLE,
            vec![Statement::update(
                "INSERT INTO user_role (username, role_id) SELECT ?1, id FROM role WHERE id BETWEEN 1 AND 5",
                vec![admin],
            )],
        ),
        MigrationStep::create_table(
            &MUSIC_FOLDER_TABLE,
            vec![Statement::update(
                "INSERT INTO music_folder (path, name, enabled) VALUES (?1, 'Music', 1)",
                vec![Value::Text(settings.default_music_folder.clone())],
            )],
        ),
        MigrationStep::create_table(&MUSIC_FILE_INFO_TABLE, vec![]),
        MigrationStep::create_table(&INTERNET_RADIO_TABLE, vec![]),
        MigrationStep::create_table(&PLAYER_TABLE, vec![]),
        role_step(6, "comment", Grantees::RoleHolders("1, 5")),
        MigrationStep::add_columns("user", USER_BYTES_COLUMNS),
        MigrationStep::create_table(&USER_SETTINGS_TABLE, vec![]),
        MigrationStep::create_table(&TRANSCODING_TABLE, vec![]),
        MigrationStep::create_table(&PLAYER_TRANSCODING_TABLE, vec![]),
        MigrationStep::create_table(
            &USER_RATING_TABLE,
            vec![Statement::update(
                "INSERT INTO user_rating (username, path, rating)
                 SELECT u.username, f.path, f.rating FROM music_file_info f, user u
                 WHERE u.username = ?1 AND f.rating IS NOT NULL AND f.rating > 0",
                vec![Value::Text(LEGACY_ADMIN_USERNAME.to_string())],
            )],
        ),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_LAST_FM_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_TRANSCODE_SCHEME_COLUMNS),
        MigrationStep::add_columns("music_file_info", MUSIC_FILE_INFO_ENABLED_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_SHOW_NOW_PLAYING_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_SELECTED_MUSIC_FOLDER_COLUMNS),
        MigrationStep::create_table(&PODCAST_CHANNEL_TABLE, vec![]),
        MigrationStep::create_table(&PODCAST_EPISODE_TABLE, vec![]),
        role_step(7, "podcast", Grantees::RoleHolders("1")),
        MigrationStep::add_columns("user", USER_LDAP_AUTHENTICATED_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_PARTY_MODE_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_NOW_PLAYING_ALLOWED_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_WEB_PLAYER_DEFAULT_COLUMNS),
        role_step(8, "stream", Grantees::AllUsers),
        MigrationStep::create_table(&SYSTEM_AVATAR_TABLE, vec![]),
    ];

    steps.extend(avatars::avatar_steps());

    steps.extend([
        MigrationStep::create_table(&CUSTOM_AVATAR_TABLE, vec![]),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_AVATAR_SCHEME_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_SYSTEM_AVATAR_COLUMNS),
        role_step(9, "settings", Grantees::AllUsers),
        role_step(10, "jukebox", Grantees::RoleHolders("1")),
        MigrationStep::add_columns("music_folder", MUSIC_FOLDER_CHANGED_COLUMNS),
        MigrationStep::add_columns("internet_radio", INTERNET_RADIO_CHANGED_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_CHANGED_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_SHOW_CHAT_COLUMNS),
    ]);

    steps.extend(
        LEGACY_VIDEO_FORMATS
            .iter()
            .map(|&format| transcoding::legacy_video_step(format)),
    );

    steps.extend([
        MigrationStep::add_columns("user", USER_EMAIL_COLUMNS),
        role_step(11, "share", Grantees::RoleHolders("1")),
        MigrationStep::create_table(&SHARE_TABLE, vec![]),
        MigrationStep::create_table(&SHARE_FILE_TABLE, vec![]),
        transcoding::transcoding2_step(),
        transcoding::player_transcoding2_step(),
        MigrationStep::create_table(&MEDIA_FILE_TABLE, vec![]),
        MigrationStep::create_table(&ARTIST_TABLE, vec![]),
        MigrationStep::create_table(&ALBUM_TABLE, vec![]),
        leading_index_step(
            "album",
            "name",
            "pragma_index_list('album') AS l, pragma_index_info(l.name) AS i",
            "idx_album_name",
        ),
        MigrationStep::create_table(&STARRED_MEDIA_FILE_TABLE, vec![]),
        MigrationStep::create_table(&STARRED_ALBUM_TABLE, vec![]),
        MigrationStep::create_table(&STARRED_ARTIST_TABLE, vec![]),
        MigrationStep::create_table(&PLAYLIST_TABLE, vec![]),
        MigrationStep::add_columns("playlist", PLAYLIST_IMPORTED_FROM_COLUMNS),
        MigrationStep::create_table(&PLAYLIST_FILE_TABLE, vec![]),
        MigrationStep::create_table(&PLAYLIST_USER_TABLE, vec![]),
        MigrationStep::create_table(&BOOKMARK_TABLE, vec![]),
        MigrationStep::add_columns("album", ALBUM_YEAR_COLUMNS),
        MigrationStep::add_columns("album", ALBUM_GENRE_COLUMNS),
        MigrationStep::create_table(&GENRE_TABLE, vec![]),
        MigrationStep::add_columns("genre", GENRE_ALBUM_COUNT_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_SONG_NOTIFICATION_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_SHOW_ARTIST_INFO_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_AUTO_HIDE_PLAY_QUEUE_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_VIEW_AS_LIST_COLUMNS),
        MigrationStep::create_table(
            &MUSIC_FOLDER_USER_TABLE,
            vec![Statement::execute(
                "INSERT INTO music_folder_user (music_folder_id, username)
                 SELECT music_folder.id, user.username FROM music_folder, user",
            )],
        ),
        MigrationStep::add_columns("album", ALBUM_FOLDER_ID_COLUMNS),
        MigrationStep::create_table(&PLAY_QUEUE_TABLE, vec![]),
        MigrationStep::create_table(&PLAY_QUEUE_FILE_TABLE, vec![]),
        leading_index_step(
            "podcast_episode",
            "url",
            "pragma_index_list('podcast_episode') AS l, pragma_index_info(l.name) AS i",
            "idx_podcast_episode_url",
        ),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_DEFAULT_ALBUM_LIST_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_QUEUE_FOLLOWING_SONGS_COLUMNS),
        MigrationStep::add_columns("podcast_channel", PODCAST_CHANNEL_IMAGE_URL_COLUMNS),
        MigrationStep::add_columns("user_settings", USER_SETTINGS_SHOW_SIDE_BAR_COLUMNS),
        MigrationStep::add_columns("artist", ARTIST_FOLDER_ID_COLUMNS),
    ]);

    steps
}

pub fn schema_catalog(settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    Catalog::new(steps(settings))
}
