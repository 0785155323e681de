//! Game settings and cosmetics
//!
//! Persisted as JSON in LocalStorage. Stored values are free-form strings, so
//! loading goes through a lenient raw form: missing fields keep their
//! defaults and unknown values fall back to the documented default for that
//! field. The rest of the game only ever sees the closed enums below.

use serde::{Deserialize, Serialize};

use crate::wallet::Unlocks;

/// Declares a closed string-tagged enum with `as_str`/`parse` and a default
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $tag:literal),+ $(,)? } default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $tag)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Parse, falling back to the default on unknown input
            pub fn parse_or_default(s: &str) -> Self {
                Self::parse(s).unwrap_or_else(|| {
                    log::warn!(
                        "Unknown {} '{}', using '{}'",
                        stringify!($name),
                        s,
                        $name::default().as_str()
                    );
                    $name::default()
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Backdrop theme
    Background {
        CityDay => "city_day",
        CityNight => "city_night",
        Cloudy => "cloudy",
        Rainy => "rainy",
    } default CityDay
}

string_enum! {
    /// Background music loop
    MusicTrack {
        None => "none",
        Chill => "chill",
        Arcade => "arcade",
        Night => "night",
    } default Chill
}

string_enum! {
    /// Sound effect tone set
    SfxPack {
        Classic => "classic",
        Heroic => "heroic",
        Robot => "robot",
    } default Classic
}

string_enum! {
    /// Hero body shape
    Body {
        Classic => "classic",
        Armored => "armored",
        Speed => "speed",
    } default Classic
}

string_enum! {
    /// Hero head shape
    Head {
        Classic => "classic",
        Helmet => "helmet",
        Hood => "hood",
    } default Classic
}

string_enum! {
    /// Trail drawn behind the hero; everything but `None` must be bought
    Trail {
        None => "none",
        Spark => "spark",
        Neon => "neon",
    } default None
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub sound_on: bool,
    pub music_on: bool,
    pub background: Background,
    pub music: MusicTrack,
    pub sfx_pack: SfxPack,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_on: true,
            background: Background::CityDay,
            music: MusicTrack::Chill,
            sfx_pack: SfxPack::Classic,
        }
    }
}

/// Stored form of [`Settings`]; any field may be missing or bogus
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    sound_on: Option<bool>,
    music_on: Option<bool>,
    background: Option<String>,
    music: Option<String>,
    sfx_pack: Option<String>,
}

impl Settings {
    /// Lenient load: merge stored fields over defaults, then validate
    pub fn from_json(json: &str) -> Self {
        let raw: RawSettings = serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Unreadable settings ({}), using defaults", e);
            RawSettings::default()
        });
        let defaults = Self::default();
        Self {
            sound_on: raw.sound_on.unwrap_or(defaults.sound_on),
            music_on: raw.music_on.unwrap_or(defaults.music_on),
            background: raw
                .background
                .map_or(defaults.background, |s| Background::parse_or_default(&s)),
            music: raw
                .music
                .map_or(defaults.music, |s| MusicTrack::parse_or_default(&s)),
            sfx_pack: raw
                .sfx_pack
                .map_or(defaults.sfx_pack, |s| SfxPack::parse_or_default(&s)),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Whether music should play during gameplay
    pub fn music_enabled(&self) -> bool {
        self.sound_on && self.music_on && self.music != MusicTrack::None
    }
}

/// Hero appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cosmetics {
    /// CSS hex colors
    pub suit: String,
    pub cape: String,
    pub mask: String,
    pub trail: Trail,
    pub body: Body,
    pub head: Head,
}

impl Default for Cosmetics {
    fn default() -> Self {
        Self {
            suit: "#1f4bff".to_string(),
            cape: "#d10000".to_string(),
            mask: "#111111".to_string(),
            trail: Trail::None,
            body: Body::Classic,
            head: Head::Classic,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawCosmetics {
    suit: Option<String>,
    cape: Option<String>,
    mask: Option<String>,
    trail: Option<String>,
    body: Option<String>,
    head: Option<String>,
}

/// Accepts `#rgb` and `#rrggbb`
fn valid_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

impl Cosmetics {
    /// Lenient load: merge over defaults, validate enums and colors, and
    /// drop a trail the player has not unlocked
    pub fn from_json(json: &str, unlocks: &Unlocks) -> Self {
        let raw: RawCosmetics = serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Unreadable cosmetics ({}), using defaults", e);
            RawCosmetics::default()
        });
        let defaults = Self::default();
        let color = |value: Option<String>, fallback: String| match value {
            Some(c) if valid_color(&c) => c,
            Some(c) => {
                log::warn!("Invalid color '{}', using '{}'", c, fallback);
                fallback
            }
            None => fallback,
        };

        let mut cosmetics = Self {
            suit: color(raw.suit, defaults.suit),
            cape: color(raw.cape, defaults.cape),
            mask: color(raw.mask, defaults.mask),
            trail: raw
                .trail
                .map_or(defaults.trail, |s| Trail::parse_or_default(&s)),
            body: raw.body.map_or(defaults.body, |s| Body::parse_or_default(&s)),
            head: raw.head.map_or(defaults.head, |s| Head::parse_or_default(&s)),
        };
        cosmetics.enforce_unlocks(unlocks);
        cosmetics
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reset a locked trail back to none
    pub fn enforce_unlocks(&mut self, unlocks: &Unlocks) {
        if !unlocks.has_trail(self.trail) {
            log::warn!("Trail '{}' is locked, using 'none'", self.trail);
            self.trail = Trail::None;
        }
    }

    /// Select a trail if it is unlocked. Returns whether it was applied.
    pub fn select_trail(&mut self, trail: Trail, unlocks: &Unlocks) -> bool {
        if unlocks.has_trail(trail) {
            self.trail = trail;
            true
        } else {
            false
        }
    }

    /// Set one of the color slots; rejects anything but hex colors
    pub fn set_color(&mut self, slot: ColorSlot, value: &str) -> bool {
        if !valid_color(value) {
            return false;
        }
        let target = match slot {
            ColorSlot::Suit => &mut self.suit,
            ColorSlot::Cape => &mut self.cape,
            ColorSlot::Mask => &mut self.mask,
        };
        *target = value.to_string();
        true
    }
}

/// Recolorable parts of the hero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Suit,
    Cape,
    Mask,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trip_and_fallback() {
        for bg in Background::ALL {
            assert_eq!(Background::parse(bg.as_str()), Some(*bg));
        }
        assert_eq!(Background::parse("space"), None);
        assert_eq!(Background::parse_or_default("space"), Background::CityDay);
        assert_eq!(MusicTrack::parse_or_default("polka"), MusicTrack::Chill);
        assert_eq!(SfxPack::parse_or_default(""), SfxPack::Classic);
        assert_eq!(Trail::parse_or_default("rainbow"), Trail::None);
    }

    #[test]
    fn test_settings_partial_merge() {
        let settings = Settings::from_json(r#"{"soundOn": false, "background": "rainy"}"#);
        assert!(!settings.sound_on);
        assert!(settings.music_on);
        assert_eq!(settings.background, Background::Rainy);
        assert_eq!(settings.music, MusicTrack::Chill);
    }

    #[test]
    fn test_settings_invalid_values_fall_back() {
        let settings = Settings::from_json(
            r#"{"background": "mars", "music": "dubstep", "sfxPack": "robot"}"#,
        );
        assert_eq!(settings.background, Background::CityDay);
        assert_eq!(settings.music, MusicTrack::Chill);
        assert_eq!(settings.sfx_pack, SfxPack::Robot);

        assert_eq!(Settings::from_json("{{{"), Settings::default());
    }

    #[test]
    fn test_settings_json_uses_stored_tags() {
        let json = Settings::default().to_json().unwrap();
        assert!(json.contains(r#""background":"city_day""#));
        assert!(json.contains(r#""sfxPack":"classic""#));
        assert_eq!(Settings::from_json(&json), Settings::default());
    }

    #[test]
    fn test_music_enabled() {
        let mut settings = Settings::default();
        assert!(settings.music_enabled());
        settings.music = MusicTrack::None;
        assert!(!settings.music_enabled());
        settings.music = MusicTrack::Night;
        settings.sound_on = false;
        assert!(!settings.music_enabled());
    }

    #[test]
    fn test_cosmetics_locked_trail_falls_back() {
        let locked = Unlocks::default();
        let cosmetics = Cosmetics::from_json(r#"{"trail": "neon", "body": "armored"}"#, &locked);
        assert_eq!(cosmetics.trail, Trail::None);
        assert_eq!(cosmetics.body, Body::Armored);

        let unlocked = Unlocks {
            spark: false,
            neon: true,
        };
        let cosmetics = Cosmetics::from_json(r#"{"trail": "neon"}"#, &unlocked);
        assert_eq!(cosmetics.trail, Trail::Neon);
    }

    #[test]
    fn test_cosmetics_invalid_fields() {
        let cosmetics = Cosmetics::from_json(
            r##"{"suit": "blue", "cape": "#00ff00", "head": "crown"}"##,
            &Unlocks::default(),
        );
        assert_eq!(cosmetics.suit, "#1f4bff");
        assert_eq!(cosmetics.cape, "#00ff00");
        assert_eq!(cosmetics.head, Head::Classic);
    }

    #[test]
    fn test_select_trail_and_colors() {
        let mut cosmetics = Cosmetics::default();
        let mut unlocks = Unlocks::default();
        assert!(!cosmetics.select_trail(Trail::Spark, &unlocks));
        unlocks.spark = true;
        assert!(cosmetics.select_trail(Trail::Spark, &unlocks));
        assert_eq!(cosmetics.trail, Trail::Spark);

        assert!(cosmetics.set_color(ColorSlot::Mask, "#abc"));
        assert_eq!(cosmetics.mask, "#abc");
        assert!(!cosmetics.set_color(ColorSlot::Mask, "#abcd"));
        assert_eq!(cosmetics.mask, "#abc");
    }
}
