use serde::{Deserialize, Serialize};

/// Condition icons the widget knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherIcon {
    ClearSky,
    ClearSkyNight,
    Cloudy,
    Rain,
    Storm,
    Snow,
    Mist,
}

/// Condition code -> icon. Codes missing here resolve to [`WeatherIcon::ClearSky`].
const ICON_CODES: [(&str, WeatherIcon); 19] = [
    ("01d", WeatherIcon::ClearSky),
    ("01n", WeatherIcon::ClearSkyNight),
    ("02d", WeatherIcon::ClearSky),
    ("02n", WeatherIcon::ClearSkyNight),
    ("03d", WeatherIcon::Cloudy),
    ("03n", WeatherIcon::Cloudy),
    ("04d", WeatherIcon::Cloudy),
    ("04n", WeatherIcon::Cloudy),
    ("09d", WeatherIcon::Rain),
    ("09n", WeatherIcon::Rain),
    ("10d", WeatherIcon::Rain),
    ("10n", WeatherIcon::Rain),
    ("11d", WeatherIcon::Storm),
    ("11n", WeatherIcon::Storm),
    ("13d", WeatherIcon::Snow),
    ("13n", WeatherIcon::Snow),
    ("15n", WeatherIcon::Snow),
    ("50d", WeatherIcon::Mist),
    ("50n", WeatherIcon::Mist),
];

/// Resolve an upstream condition code such as `"10n"` to an icon.
pub fn resolve_icon(code: &str) -> WeatherIcon {
    ICON_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, icon)| *icon)
        .unwrap_or(WeatherIcon::ClearSky)
}

impl WeatherIcon {
    /// Asset file name for the icon.
    pub fn asset(&self) -> &'static str {
        match self {
            WeatherIcon::ClearSky => "clearsky.png",
            WeatherIcon::ClearSkyNight => "clearSkyNight.png",
            WeatherIcon::Cloudy => "cloudy.png",
            WeatherIcon::Rain => "heavy-rain.png",
            WeatherIcon::Storm => "storm.png",
            WeatherIcon::Snow => "snow.png",
            WeatherIcon::Mist => "mist.png",
        }
    }

    /// Single-glyph rendering for terminals.
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::ClearSky => "☀",
            WeatherIcon::ClearSkyNight => "☾",
            WeatherIcon::Cloudy => "☁",
            WeatherIcon::Rain => "☂",
            WeatherIcon::Storm => "⚡",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Mist => "≋",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.asset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_maps_to_its_asset() {
        let expected = [
            ("01d", "clearsky.png"),
            ("01n", "clearSkyNight.png"),
            ("02d", "clearsky.png"),
            ("02n", "clearSkyNight.png"),
            ("03d", "cloudy.png"),
            ("03n", "cloudy.png"),
            ("04d", "cloudy.png"),
            ("04n", "cloudy.png"),
            ("09d", "heavy-rain.png"),
            ("09n", "heavy-rain.png"),
            ("10d", "heavy-rain.png"),
            ("10n", "heavy-rain.png"),
            ("11d", "storm.png"),
            ("11n", "storm.png"),
            ("13d", "snow.png"),
            ("13n", "snow.png"),
            ("15n", "snow.png"),
            ("50d", "mist.png"),
            ("50n", "mist.png"),
        ];

        for (code, asset) in expected {
            assert_eq!(resolve_icon(code).asset(), asset, "code {code}");
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_clear_sky() {
        for code in ["", "15d", "99x", "01D", " 01d"] {
            assert_eq!(resolve_icon(code), WeatherIcon::ClearSky, "code {code:?}");
        }
    }

    #[test]
    fn table_has_no_duplicate_codes() {
        let mut codes: Vec<_> = ICON_CODES.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ICON_CODES.len());
    }
}
