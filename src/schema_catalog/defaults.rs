//! Enumerated values whose canonical names end up as column defaults.
//!
//! SQLite does not bind parameters inside `ALTER TABLE`, so the default is
//! rendered from the enum at compile time instead of being spliced in at run
//! time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscodeScheme {
    Off,
    Max32,
    Max64,
    Max96,
    Max128,
    Max160,
    Max192,
    Max256,
    Max320,
}

impl TranscodeScheme {
    pub const fn name(self) -> &'static str {
        match self {
            TranscodeScheme::Off => "OFF",
            TranscodeScheme::Max32 => "MAX_32",
            TranscodeScheme::Max64 => "MAX_64",
            TranscodeScheme::Max96 => "MAX_96",
            TranscodeScheme::Max128 => "MAX_128",
            TranscodeScheme::Max160 => "MAX_160",
            TranscodeScheme::Max192 => "MAX_192",
            TranscodeScheme::Max256 => "MAX_256",
            TranscodeScheme::Max320 => "MAX_320",
        }
    }

    /// Quoted SQL literal of [`Self::name`].
    pub const fn sql_default(self) -> &'static str {
        match self {
            TranscodeScheme::Off => "'OFF'",
            TranscodeScheme::Max32 => "'MAX_32'",
            TranscodeScheme::Max64 => "'MAX_64'",
            TranscodeScheme::Max96 => "'MAX_96'",
            TranscodeScheme::Max128 => "'MAX_128'",
            TranscodeScheme::Max160 => "'MAX_160'",
            TranscodeScheme::Max192 => "'MAX_192'",
            TranscodeScheme::Max256 => "'MAX_256'",
            TranscodeScheme::Max320 => "'MAX_320'",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumListType {
    Random,
    Newest,
    Starred,
    Highest,
    Frequent,
    Recent,
    Decade,
    Genre,
    Alphabetical,
    Index,
}

impl AlbumListType {
    pub const fn id(self) -> &'static str {
        match self {
            AlbumListType::Random => "random",
            AlbumListType::Newest => "newest",
            AlbumListType::Starred => "starred",
            AlbumListType::Highest => "highest",
            AlbumListType::Frequent => "frequent",
            AlbumListType::Recent => "recent",
            AlbumListType::Decade => "decade",
            AlbumListType::Genre => "genre",
            AlbumListType::Alphabetical => "alphabetical",
            AlbumListType::Index => "index",
        }
    }

    pub const fn sql_default(self) -> &'static str {
        match self {
            AlbumListType::Random => "'random'",
            AlbumListType::Newest => "'newest'",
            AlbumListType::Starred => "'starred'",
            AlbumListType::Highest => "'highest'",
            AlbumListType::Frequent => "'frequent'",
            AlbumListType::Recent => "'recent'",
            AlbumListType::Decade => "'decade'",
            AlbumListType::Genre => "'genre'",
            AlbumListType::Alphabetical => "'alphabetical'",
            AlbumListType::Index => "'index'",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_default_quotes_the_name() {
        for scheme in [TranscodeScheme::Off, TranscodeScheme::Max128] {
            assert_eq!(scheme.sql_default(), format!("'{}'", scheme.name()));
        }
        for list in [AlbumListType::Random, AlbumListType::Alphabetical] {
            assert_eq!(list.sql_default(), format!("'{}'", list.id()));
        }
    }
}
