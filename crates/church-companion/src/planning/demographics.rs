use serde::Serialize;

/// ZIP prefix served by the known-city branch.
const KNOWN_CITY_PREFIX: &str = "741";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Demographics {
    pub locale: &'static str,
    pub summary: &'static str,
    pub ministry_implications: &'static str,
}

const KNOWN_CITY: Demographics = Demographics {
    locale: "Tulsa",
    summary: "Tulsa is a mid-sized city with many working-age adults, young families, and \
              significant economic diversity.",
    ministry_implications: "A strong focus on next-gen (youth and young adults), small groups, \
                            family discipleship, and compassionate outreach to those in need.",
};

const GENERIC: Demographics = Demographics {
    locale: "your community",
    summary: "This area likely includes a mix of families, workers, and students with varied \
              spiritual backgrounds.",
    ministry_implications: "Build bridges through relationships, small groups, youth ministry, \
                            and consistent community presence.",
};

/// Canned locale description for a ZIP code. Only the leading three characters
/// of the trimmed input matter; the ZIP is not otherwise validated.
pub fn classify(zip: &str) -> Demographics {
    if zip.trim().starts_with(KNOWN_CITY_PREFIX) {
        KNOWN_CITY
    } else {
        GENERIC
    }
}
