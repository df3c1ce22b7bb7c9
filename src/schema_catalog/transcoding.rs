//! Seed rows of the two transcoding tables.

use crate::evolution::{Guard, MigrationStep, Statement};
use rusqlite::types::Value;

use super::tables::{PLAYER_TRANSCODING2_TABLE, TRANSCODING2_TABLE};

pub const LEGACY_VIDEO_FORMATS: &[&str] = &[
    "avi", "mpg", "mpeg", "mp4", "m4v", "mkv", "mov", "wmv", "ogv",
];

const LEGACY_VIDEO_COMMAND: &str =
    "ffmpeg -ss %o -i %s -async 1 -b %bk -s %wx%h -ar 44100 -ac 2 -v 0 -f flv -";

/// One `<format> > flv` row in `transcoding`, linked to every player.
///
/// Older rows for the same conversion are replaced, and the new row id is
/// read back to link players to it.
pub fn legacy_video_step(format: &'static str) -> MigrationStep {
    let name = format!("{} > flv", format);
    MigrationStep::schema(
        format!("transcoding:{}>flv", format),
        Guard::RowExists {
            relation: "transcoding",
            predicate: "name = ?1",
            params: vec![Value::Text(name.clone())],
        },
        vec![Statement::procedure(move |executor| {
            executor.update(
                "DELETE FROM transcoding WHERE source_format = ?1 AND target_format = 'flv'",
                &[Value::Text(format.to_string())],
            )?;
            executor.update(
                "INSERT INTO transcoding (name, source_format, target_format, step1, enabled, default_active)
                 VALUES (?1, ?2, 'flv', ?3, 1, 1)",
                &[
                    Value::Text(name.clone()),
                    Value::Text(format.to_string()),
                    Value::Text(LEGACY_VIDEO_COMMAND.to_string()),
                ],
            )?;
            let transcoding_id = executor.query_scalar("SELECT last_insert_rowid()", &[])?;
            executor.update(
                "INSERT INTO player_transcoding (player_id, transcoding_id) SELECT id, ?1 FROM player",
                &[transcoding_id],
            )?;
            Ok(())
        })],
    )
}

struct Transcoding {
    name: &'static str,
    source_formats: &'static str,
    target_format: &'static str,
    step1: &'static str,
    default_active: bool,
}

const VIDEO_SOURCES: &str = "avi mpg mpeg mp4 m4v mkv mov wmv ogv divx m2ts";

const TRANSCODINGS: &[Transcoding] = &[
    Transcoding {
        name: "mp3 audio",
        source_formats: "ogg oga aac m4a flac wav wma aif aiff ape mpc shn",
        target_format: "mp3",
        step1: "ffmpeg -i %s -map 0:0 -b:a %bk -v 0 -f mp3 -",
        default_active: true,
    },
    Transcoding {
        name: "flv/h264 video",
        source_formats: VIDEO_SOURCES,
        target_format: "flv",
        step1: "ffmpeg -ss %o -i %s -async 1 -b %bk -s %wx%h -ar 44100 -ac 2 -v 0 -f flv -vcodec libx264 -preset superfast -threads 0 -",
        default_active: true,
    },
    Transcoding {
        name: "mkv video",
        source_formats: VIDEO_SOURCES,
        target_format: "mkv",
        step1: "ffmpeg -ss %o -i %s -c:v libx264 -preset superfast -b:v %bk -c:a libvorbis -f matroska -threads 0 -",
        default_active: true,
    },
];

pub fn transcoding2_step() -> MigrationStep {
    let inserts = TRANSCODINGS.iter().map(|t| {
        Statement::update(
            "INSERT INTO transcoding2 (name, source_formats, target_format, step1, default_active)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            vec![
                Value::Text(t.name.to_string()),
                Value::Text(t.source_formats.to_string()),
                Value::Text(t.target_format.to_string()),
                Value::Text(t.step1.to_string()),
                Value::Integer(i64::from(t.default_active)),
            ],
        )
    });
    MigrationStep::create_table(&TRANSCODING2_TABLE, inserts.collect())
}

pub fn player_transcoding2_step() -> MigrationStep {
    MigrationStep::create_table(
        &PLAYER_TRANSCODING2_TABLE,
        vec![Statement::execute(
            "INSERT INTO player_transcoding2 (player_id, transcoding_id)
             SELECT DISTINCT p.id, t.id FROM player p, transcoding2 t",
        )],
    )
}
