//! The demo catalog the player ships with.

use crate::player::Track;

pub fn demo_tracks() -> Vec<Track> {
    let raw: [(u32, &str, &str, &str, &str, u16, f64, &str); 10] = [
        (
            1,
            "Midnight Dreams",
            "Luna Eclipse",
            "Nocturnal Vibes",
            "Electronic",
            2023,
            225.0,
            "#6366f1",
        ),
        (
            2,
            "Ocean Waves",
            "Coastal Sounds",
            "Nature's Symphony",
            "Ambient",
            2023,
            252.0,
            "#0ea5e9",
        ),
        (
            3,
            "Urban Pulse",
            "City Lights",
            "Metropolitan",
            "Hip Hop",
            2023,
            208.0,
            "#f59e0b",
        ),
        (
            4,
            "Forest Whispers",
            "Nature's Call",
            "Wilderness",
            "Ambient",
            2022,
            303.0,
            "#10b981",
        ),
        (
            5,
            "Neon Nights",
            "Synthwave Collective",
            "Retro Future",
            "Synthwave",
            2023,
            275.0,
            "#ec4899",
        ),
        (
            6,
            "Mountain High",
            "Peak Performers",
            "Summit Sessions",
            "Rock",
            2023,
            232.0,
            "#8b5cf6",
        ),
        (
            7,
            "Desert Storm",
            "Sandstorm",
            "Mirage",
            "Electronic",
            2022,
            258.0,
            "#f97316",
        ),
        (
            8,
            "City Rain",
            "Downtown Echo",
            "Wet Streets",
            "Lo-Fi",
            2023,
            241.0,
            "#14b8a6",
        ),
        (
            9,
            "Starlight Sonata",
            "Cosmic Strings",
            "Celestial",
            "Classical",
            2022,
            312.0,
            "#a855f7",
        ),
        (
            10,
            "Electric Sunrise",
            "Voltage",
            "Power Grid",
            "Electronic",
            2023,
            198.0,
            "#ef4444",
        ),
    ];

    raw.into_iter()
        .map(
            |(id, title, artist, album, genre, year, duration, color)| Track {
                id,
                title: title.to_string(),
                artist: artist.to_string(),
                album: Some(album.to_string()),
                genre: Some(genre.to_string()),
                year: Some(year),
                duration_seconds: duration,
                src: format!("/audio/{}.mp3", slug(title)),
                cover: None,
                color: color.to_string(),
            },
        )
        .collect()
}

fn slug(title: &str) -> String {
    title
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let tracks = demo_tracks();
        let mut ids: Vec<u32> = tracks.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tracks.len());
    }

    #[test]
    fn slugs_are_url_safe() {
        assert_eq!(slug("Midnight Dreams"), "midnight-dreams");
        assert_eq!(slug("Nature's Call"), "natures-call");
    }
}
