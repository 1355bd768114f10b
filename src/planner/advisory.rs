use crate::airport::CandidateAirport;
use crate::flight_control::coord::Coordinate;
use async_trait::async_trait;
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;

/// Strips ```json / ``` fences the model likes to wrap replies in.
static FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?:json)?\s*").unwrap()
});
/// Grabs the outermost `{ … }` block, greedily, across newlines.
static BRACE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{.*\}").unwrap()
});
/// Raw control characters that break JSON parsing when embedded in strings.
static CTRL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x1F]+").unwrap()
});
/// Trailing comma before a closing brace or bracket.
static TRAILING_COMMA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",(\s*[}\]])").unwrap()
});

/// A source of diversion verdicts, typically a remote language model.
///
/// The planner only needs the raw reply text back. Scrubbing and parsing
/// happen on this side of the seam so every advisor backend gets the same
/// tolerance for sloppy output.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn request_verdict(&self, prompt: &str) -> Result<String, AdvisoryError>;
}

#[derive(Debug, strum_macros::Display)]
pub enum AdvisoryError {
    #[strum(to_string = "Advisory service unreachable: {0}")]
    Unreachable(String),
    #[strum(to_string = "Advisory reply not usable: {0}")]
    MalformedReply(String),
}

impl std::error::Error for AdvisoryError {}

/// The parsed shape of an advisory reply. Only the chosen airport is
/// mandatory; everything else is backfilled downstream when absent.
#[derive(Debug, serde::Deserialize)]
pub struct AdvisoryVerdict {
    #[serde(rename = "chosenAirport")]
    chosen_airport: VerdictAirport,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    checklist: Vec<String>,
    #[serde(rename = "flightPathCoordinates", default)]
    flight_path: Vec<[f64; 2]>,
    #[serde(rename = "atcCall", default)]
    radio_call: String,
}

#[derive(Debug, serde::Deserialize)]
struct VerdictAirport {
    name: String,
    #[serde(default)]
    code: Option<String>,
    lat: f64,
    lon: f64,
}

impl AdvisoryVerdict {
    pub fn airport_name(&self) -> &str { &self.chosen_airport.name }
    pub fn airport_code(&self) -> Option<&str> { self.chosen_airport.code.as_deref() }
    pub fn airport_position(&self) -> Coordinate {
        Coordinate::new(self.chosen_airport.lat, self.chosen_airport.lon)
    }
    pub fn reasoning(&self) -> &str { &self.reasoning }
    pub fn checklist(&self) -> &[String] { &self.checklist }
    pub fn flight_path(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.flight_path.iter().map(|p| Coordinate::new(p[0], p[1]))
    }
    pub fn radio_call(&self) -> &str { &self.radio_call }
}

/// Scrubs a raw model reply down to parseable JSON and deserializes it.
///
/// Strips markdown fences, cuts out the outermost brace block, drops raw
/// control characters and repairs trailing commas before parsing. Replies
/// missing a usable chosen airport are rejected here.
pub fn parse_verdict(raw: &str) -> Result<AdvisoryVerdict, AdvisoryError> {
    let unfenced = FENCE_REGEX.replace_all(raw, "");
    let block = BRACE_REGEX
        .find(unfenced.trim())
        .ok_or_else(|| AdvisoryError::MalformedReply("no JSON object in reply".to_string()))?
        .as_str();
    let cleaned = CTRL_REGEX.replace_all(block, "");
    let repaired = TRAILING_COMMA_REGEX.replace_all(&cleaned, "$1");

    let verdict: AdvisoryVerdict = serde_json::from_str(&repaired)
        .map_err(|e| AdvisoryError::MalformedReply(e.to_string()))?;
    if verdict.chosen_airport.name.trim().is_empty() {
        return Err(AdvisoryError::MalformedReply(
            "chosen airport has no name".to_string(),
        ));
    }
    if !verdict.airport_position().is_valid() {
        return Err(AdvisoryError::MalformedReply(
            "chosen airport position out of range".to_string(),
        ));
    }
    Ok(verdict)
}

/// Builds the structured prompt an advisor answers. The reply contract is
/// spelled out inline so the scrubber sees a predictable shape.
pub fn build_prompt(
    origin: Coordinate,
    altitude_ft: f64,
    emergency_type: &str,
    candidates: &[CandidateAirport],
) -> String {
    let listing = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{num}. {name} ({code})\n   - Distance: {dist:.1} km\n   - Runway: {rwy} ft\n   - Location: {lat:.4}°N, {lon:.4}°E",
                num = i + 1,
                name = c.airport().name(),
                code = c.airport().code(),
                dist = c.distance_km(),
                rwy = c.airport().runway_ft(),
                lat = c.airport().position().lat(),
                lon = c.airport().position().lon(),
            )
        })
        .join("\n");
    format!(
        "You are an expert aviation emergency response AI. A critical emergency has occurred.\n\
        \n\
        **EMERGENCY DETAILS:**\n\
        - Type: {emergency_type}\n\
        - Current Position: Latitude {lat:.4}°, Longitude {lon:.4}°\n\
        - Altitude: {altitude_ft:.0} feet\n\
        - Situation: CRITICAL - Immediate diversion required\n\
        \n\
        **NEARBY AIRPORTS (sorted by distance):**\n\
        {listing}\n\
        \n\
        **SELECTION CRITERIA:**\n\
        1. Distance (closer is better for critical emergencies)\n\
        2. Runway length (minimum 8000 ft preferred for commercial jets)\n\
        3. DO NOT always choose the same airport\n\
        4. Consider the severity: \"{emergency_type}\" - if critical, prioritize distance over runway length\n\
        \n\
        **IMPORTANT:** Analyze the emergency type and location. Choose the MOST APPROPRIATE airport, not always the first entry.\n\
        \n\
        Provide a detailed emergency checklist with 8-10 specific steps for handling \"{emergency_type}\".\n\
        \n\
        **RESPOND WITH ONLY THIS EXACT JSON FORMAT:**\n\
        {{\n\
        \x20 \"chosenAirport\": {{\n\
        \x20   \"name\": \"Full Airport Name\",\n\
        \x20   \"code\": \"IATA Code\",\n\
        \x20   \"lat\": latitude_number,\n\
        \x20   \"lon\": longitude_number\n\
        \x20 }},\n\
        \x20 \"reasoning\": \"Why this airport was chosen (1 line, mention distance and runway)\",\n\
        \x20 \"checklist\": [\n\
        \x20   \"1. Immediate action for {emergency_type}\",\n\
        \x20   \"2. Emergency declaration - squawk 7700\",\n\
        \x20   \"3. Aircraft configuration\",\n\
        \x20   \"4. Descent procedure\",\n\
        \x20   \"5. Speed management\",\n\
        \x20   \"6. ATC coordination\",\n\
        \x20   \"7. Approach preparation\",\n\
        \x20   \"8. Landing configuration\"\n\
        \x20 ],\n\
        \x20 \"flightPathCoordinates\": [\n\
        \x20   [{lat}, {lon}],\n\
        \x20   [destination_lat, destination_lon]\n\
        \x20 ],\n\
        \x20 \"atcCall\": \"Professional emergency radio call\"\n\
        }}",
        lat = origin.lat(),
        lon = origin.lon(),
    )
}
