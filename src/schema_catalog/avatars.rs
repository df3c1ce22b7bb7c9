use crate::evolution::{AssetSeed, EmbeddedAssetSource, MigrationStep};

use super::tables::SYSTEM_AVATAR_TABLE;

pub const AVATAR_MIME_TYPE: &str = "image/png";
pub const AVATAR_SIZE: u32 = 48;

/// Declares the avatar names and their payloads, read from
/// `assets/avatars/<name>.png` at compile time.
macro_rules! declare_avatars {
    ($($name:literal),* $(,)?) => {
        /// Bundled system avatars, seeded in this order.
        pub const AVATARS: &[&str] = &[$($name),*];

        const AVATAR_PAYLOADS: &[(&str, &[u8])] = &[$((
            $name,
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/avatars/", $name, ".png")),
        )),*];
    };
}

declare_avatars![
    "Formal",
    "Engineer",
    "Footballer",
    "Green-Boy",
    "Linux-Zealot",
    "Mac-Zealot",
    "Windows-Zealot",
    "Army-Officer",
    "Beatnik",
    "All-Caps",
    "Clown",
    "Commie-Pinko",
    "Forum-Flirt",
    "Gamer",
    "Hopelessly-Addicted",
    "Jekyll-And-Hyde",
    "Joker",
    "Lurker",
    "Moderator",
    "Newbie",
    "No-Dissent",
    "Performer",
    "Push-My-Button",
    "Ray-Of-Sunshine",
    "Red-Hot-Chili-Peppers-1",
    "Red-Hot-Chili-Peppers-2",
    "Red-Hot-Chili-Peppers-3",
    "Red-Hot-Chili-Peppers-4",
    "Ringmaster",
    "Rumor-Junkie",
    "Sozzled-Surfer",
    "Statistician",
    "Tech-Support",
    "The-Guru",
    "The-Referee",
    "Troll",
    "Uptight",
    "Fire-Guitar",
    "Drum",
    "Headphones",
    "Mic",
    "Turntable",
    "Vinyl",
    "Cool",
    "Laugh",
    "Study",
];

/// The avatar images compiled into the binary.
pub fn bundled_avatars() -> EmbeddedAssetSource {
    EmbeddedAssetSource::new(AVATAR_PAYLOADS)
}

pub fn avatar_steps() -> impl Iterator<Item = MigrationStep> {
    AVATARS.iter().map(|&name| {
        MigrationStep::Asset(AssetSeed::new(
            SYSTEM_AVATAR_TABLE.name,
            name,
            AVATAR_MIME_TYPE,
            AVATAR_SIZE,
            AVATAR_SIZE,
        ))
    })
}
