//! A Rust library for resolving a DASH MPD manifest into a normalized presentation description,
//! as consumed by a playback engine. The manifest (XML format) is deserialized to Rust structs,
//! remote resources it references are resolved through an explicit suspend/resume protocol, and
//! the completed tree is assembled into a [`Manifest`](assemble::Manifest) with fully derived
//! timing information.
//!
//! [DASH](https://en.wikipedia.org/wiki/Dynamic_Adaptive_Streaming_over_HTTP) (dynamic adaptive
//! streaming over HTTP), also called MPEG-DASH, is a technology used for media streaming over the
//! web. The Media Presentation Description (MPD) is a description of the resources (manifest or
//! “playlist”) forming a streaming service. An MPD may be incomplete as served: Period elements
//! can be "remote elements" referenced through a simplified profile of XLink, and UTCTiming
//! clock-synchronization sources can name an endpoint that must be interrogated over HTTP. This
//! library never performs network requests itself. Instead, resolution suspends with an ordered
//! batch of [`Resource`](resolve::Resource) requests that the caller loads however it likes
//! (synchronously, concurrently, with retries...), then resumes with the response bodies. The
//! loop converges once no unresolved references remain.
//!
//! ## Features supported
//!
//! - VOD (static) and live (dynamic) manifests, multi-period content
//! - XLink remote Period elements with actuate=onLoad semantics, resolve-to-zero supported,
//!   including remote fragments that themselves contain further remote references
//! - UTCTiming clock synchronization (urn:mpeg:dash:utc:direct:2014 and http-iso:2014 schemes)
//! - Derivation of presentation duration, clock offset and live presentation gap
//!
//! ## Limitations / unsupported features
//!
//! - XLink with actuate=onRequest (left in place for the application to resolve later)
//! - Fetching of media segments, muxing, DRM: this library only produces the structured
//!   description that a downloader or playback engine consumes

#![allow(non_snake_case)]

pub mod assemble;
pub mod periods;
pub mod resolve;
pub mod urls;
mod validate;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer, Deserialize};
use serde::de;
use serde_with::skip_serializing_none;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use chrono::DateTime;

use crate::assemble::{assemble, Manifest};
use crate::resolve::{Resolution, Resource, Suspended};


/// Type representing an xs:dateTime, as per <https://www.w3.org/TR/xmlschema-2/#dateTime>
// Something like 2021-06-03T13:00:00Z
pub type XsDatetime = DateTime<chrono::offset::Utc>;

/// The UTCTiming scheme whose value is a literal timestamp, usable without any network access.
pub const UTC_TIMING_SCHEME_DIRECT: &str = "urn:mpeg:dash:utc:direct:2014";

/// The UTCTiming scheme whose value is the URL of an endpoint returning an ISO 8601 timestamp.
pub const UTC_TIMING_SCHEME_HTTP_ISO: &str = "urn:mpeg:dash:utc:http-iso:2014";


#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    #[error("parse error {0}")]
    Parsing(String),
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// A remote XLink fragment body was empty or did not parse as XML.
    #[error("invalid external resource: {0}")]
    InvalidExternalResource(String),
    /// `resume` was invoked with a body list whose length does not match the outstanding
    /// resource batch. The pending tree is left untouched.
    #[error("wrong number of loaded resources: expected {expected}, got {got}")]
    ResourceCountMismatch { expected: usize, got: usize },
    #[error("duplicate id {0}")]
    DuplicateId(String),
}


/// A source of monotonically increasing integers, used to synthesize identifiers for entities
/// the manifest leaves anonymous. One instance exists per identifier family for the lifetime of
/// the process; values are never persisted, so synthesized identities are not stable across
/// restarts.
#[derive(Debug, Default)]
pub struct IdGenerator(AtomicU64);

impl IdGenerator {
    pub const fn new() -> IdGenerator {
        IdGenerator(AtomicU64::new(0))
    }

    /// The next value in the sequence. Unique for this generator, including across threads.
    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}


lazy_static! {
    // The lexical representation for an xs:duration is the ISO 8601 extended format
    // PnYnMnDTnHnMnS. The number of seconds can include decimal digits to arbitrary precision,
    // and the week form PnW is also admitted. Examples: "PT0H0M30.030S", "P2Y6M5DT12H35M30S",
    // "P23DT23H", "P26W".
    static ref XS_DURATION: Regex = Regex::new(concat!(
        r"^(?P<sign>[+-])?P",
        r"(?:(?P<years>\d+)Y)?",
        r"(?:(?P<months>\d+)M)?",
        r"(?:(?P<weeks>\d+)W)?",
        r"(?:(?P<days>\d+)D)?",
        r"(?:(?P<hastime>T)", // time part must begin with a T
        r"(?:(?P<hours>\d+)H)?",
        r"(?:(?P<minutes>\d+)M)?",
        r"(?:(?P<seconds>\d+)(?:(?P<subsecs>[.,]\d+)?)S)?",
        r")?")).unwrap();
}

fn duration_component(m: &regex::Captures, name: &str) -> Result<u64, ManifestError> {
    match m.name(name) {
        Some(v) => v.as_str().parse::<u64>()
            .map_err(|_| ManifestError::InvalidDuration(format!("{name} component out of range"))),
        None => Ok(0),
    }
}

// Parse an XML duration string, as per https://www.w3.org/TR/xmlschema-2/#duration
//
// Limitations: negative durations (leading "-" character) are rejected due to the choice of a
// std::time::Duration, and only the seconds component may carry a fractional part (we reject for
// example "P0.5Y" and "PT2.3H"). A month is counted as 30 days, a year as 365.
pub(crate) fn parse_xs_duration(s: &str) -> Result<Duration, ManifestError> {
    let m = XS_DURATION.captures(s)
        .ok_or_else(|| ManifestError::InvalidDuration(format!("couldn't parse {s}")))?;
    if m.name("hastime").is_none() &&
        m.name("years").is_none() &&
        m.name("months").is_none() &&
        m.name("weeks").is_none() &&
        m.name("days").is_none() {
            return Err(ManifestError::InvalidDuration("empty".to_string()));
    }
    if let Some(sign) = m.name("sign") {
        if sign.as_str() == "-" {
            return Err(ManifestError::InvalidDuration(
                "can't represent negative durations".to_string()));
        }
    }
    let mut nsecs: u32 = 0;
    if let Some(sub) = m.name("subsecs") {
        let mut sub = &sub.as_str()[1..]; // drop initial "." or ","
        if sub.len() > 9 {
            sub = &sub[..9];
        }
        let padded = format!("{sub:0<9}");
        nsecs = padded.parse::<u32>()
            .map_err(|_| ManifestError::InvalidDuration("fractional seconds".to_string()))?;
    }
    let mut secs = duration_component(&m, "seconds")?;
    secs += duration_component(&m, "minutes")? * 60;
    secs += duration_component(&m, "hours")? * 60 * 60;
    secs += duration_component(&m, "days")? * 60 * 60 * 24;
    secs += duration_component(&m, "weeks")? * 60 * 60 * 24 * 7;
    secs += duration_component(&m, "months")? * 60 * 60 * 24 * 30;
    secs += duration_component(&m, "years")? * 60 * 60 * 24 * 365;
    Ok(Duration::new(secs, nsecs))
}

// Deserialize an optional XML duration string to an Option<Duration>. This is a little trickier
// than deserializing a required field with serde.
fn deserialize_xs_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: de::Deserializer<'de>,
{
    match <Option<String>>::deserialize(deserializer) {
        Ok(optstring) => match optstring {
            Some(xs) => match parse_xs_duration(&xs) {
                Ok(d) => Ok(Some(d)),
                Err(e) => Err(de::Error::custom(e)),
            },
            None => Ok(None),
        },
        // the field isn't present, return an Ok(None)
        Err(_) => Ok(None),
    }
}

fn serialize_xs_duration<S>(oxs: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // a simple-minded conversion to an ISO 8601 duration
    if let Some(xs) = oxs {
        let secs = xs.as_secs();
        let ms = xs.subsec_millis();
        serializer.serialize_str(&format!("PT{secs}.{ms:03}S"))
    } else {
        // in fact this won't be called because of the #[skip_serializing_none] annotation
        serializer.serialize_none()
    }
}


// The MPD format is documented by ISO using an XML Schema at
// https://standards.iso.org/ittf/PubliclyAvailableStandards/MPEG-DASH_schema_files/DASH-MPD-edition2.xsd
// We are using the quick_xml + serde crates to deserialize the XML content to Rust structs. Note
// that serde ignores unknown fields when deserializing, so we don't need to cover every possible
// element of the schema, only the subset involved in building the resolved presentation
// description.

/// A URI string to which a new request for an updated manifest should be made. This feature is
/// intended for servers and clients that can't use sticky HTTP redirects.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Location {
    #[serde(rename = "$text")]
    pub url: String,
}

/// A URI string that specifies one or more common locations for Segments and other resources.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct BaseURL {
    #[serde(rename = "$text")]
    pub base: String,
    /// Elements with the same `@serviceLocation` value are likely to have their URLs resolve to
    /// services at a common network location, for example the same CDN.
    #[serde(rename = "@serviceLocation")]
    pub serviceLocation: Option<String>,
}

/// A declared mechanism for synchronizing the local playback clock with the server's reference
/// clock, either as a literal timestamp or as an endpoint to interrogate.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UTCTiming {
    // prefixed with urn:mpeg:dash:utc, one of http-xsdate:2014, http-iso:2014,
    // http-ntp:2014, ntp:2014, http-head:2014, direct:2014
    #[serde(rename = "@schemeIdUri")]
    pub schemeIdUri: Option<String>,
    #[serde(rename = "@value")]
    pub value: Option<String>,
}

/// Describes a sequence of contiguous Segments with identical duration.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct S {
    /// time
    #[serde(rename = "@t")]
    pub t: Option<i64>,
    /// the duration (shall not exceed the value of MPD@maxSegmentDuration)
    #[serde(rename = "@d")]
    pub d: i64,
    /// the repeat count (number of contiguous Segments with identical MPD duration minus one),
    /// defaulting to zero if not present
    #[serde(rename = "@r")]
    pub r: Option<i64>,
}

/// Contains a sequence of `S` elements, each of which describes a sequence of contiguous segments
/// of identical duration.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SegmentTimeline {
    #[serde(rename = "S")]
    pub segments: Vec<S>,
}

/// Allows template-based `SegmentURL` construction. Specifies various substitution rules using
/// dynamic values such as `$Time$` and `$Number$` that map to a sequence of Segments.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SegmentTemplate {
    #[serde(rename = "@initialization")]
    pub initialization: Option<String>,
    #[serde(rename = "@media")]
    pub media: Option<String>,
    #[serde(rename = "@index")]
    pub index: Option<String>,
    pub SegmentTimeline: Option<SegmentTimeline>,
    #[serde(rename = "@startNumber")]
    pub startNumber: Option<u64>,
    // note: the spec says this is an unsigned int, not an xs:duration. In practice, some manifests
    // use a floating point value.
    #[serde(rename = "@duration")]
    pub duration: Option<f64>,
    #[serde(rename = "@timescale")]
    pub timescale: Option<u64>,
    #[serde(rename = "@presentationTimeOffset")]
    pub presentationTimeOffset: Option<u64>,
}

/// A representation describes a version of the content, using a specific encoding and bitrate.
/// Streams often have multiple representations with different bitrates, to allow the client to
/// select that most suitable to its network conditions.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Representation {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    // The specification says that @mimeType is mandatory, but it's not always present in
    // manifests seen in the wild
    #[serde(rename = "@mimeType")]
    pub mimeType: Option<String>,
    /// An RFC6381 string, <https://tools.ietf.org/html/rfc6381>
    #[serde(rename = "@codecs")]
    pub codecs: Option<String>,
    #[serde(rename = "@contentType")]
    pub contentType: Option<String>,
    #[serde(rename = "@frameRate")]
    pub frameRate: Option<String>, // can be something like "15/2"
    #[serde(rename = "@bandwidth")]
    pub bandwidth: Option<u64>,
    #[serde(rename = "@audioSamplingRate")]
    pub audioSamplingRate: Option<u64>,
    #[serde(rename = "@width")]
    pub width: Option<u64>,
    #[serde(rename = "@height")]
    pub height: Option<u64>,
    pub BaseURL: Vec<BaseURL>,
    pub SegmentTemplate: Option<SegmentTemplate>,
}

/// Contains a set of Representations. For example, if multiple language streams are available for
/// the audio content, each one can be in its own AdaptationSet.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AdaptationSet {
    #[serde(rename = "@id")]
    pub id: Option<i64>,
    pub BaseURL: Vec<BaseURL>,
    #[serde(rename = "@group")]
    pub group: Option<i64>,
    // eg "audio", "video", "text"
    #[serde(rename = "@contentType")]
    pub contentType: Option<String>,
    /// Content language, in RFC 5646 format
    #[serde(rename = "@lang")]
    pub lang: Option<String>,
    // eg "video/mp4"
    #[serde(rename = "@mimeType")]
    pub mimeType: Option<String>,
    /// An RFC6381 string, <https://tools.ietf.org/html/rfc6381> (eg. "avc1.4D400C")
    #[serde(rename = "@codecs")]
    pub codecs: Option<String>,
    #[serde(rename = "@frameRate")]
    pub frameRate: Option<String>,
    #[serde(rename = "@segmentAlignment")]
    pub segmentAlignment: Option<bool>,
    pub SegmentTemplate: Option<SegmentTemplate>,
    #[serde(rename = "Representation")]
    pub representations: Vec<Representation>,
}

/// Describes a chunk of the content with a start time and a duration. Content can be split up
/// into multiple periods (such as chapters, advertising segments). A Period may also be a "remote
/// element": a placeholder carrying an `xlink:href` attribute naming externally hosted content
/// that is substituted for the placeholder during resolution.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Period {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    // note: the spec says Period@start and Period@duration are xs:durations, not unsigned ints as
    // for other "duration" fields
    #[serde(rename = "@start")]
    #[serde(deserialize_with = "deserialize_xs_duration", default)]
    #[serde(serialize_with = "serialize_xs_duration")]
    pub start: Option<Duration>,
    #[serde(rename = "@duration")]
    #[serde(deserialize_with = "deserialize_xs_duration", default)]
    #[serde(serialize_with = "serialize_xs_duration")]
    pub duration: Option<Duration>,
    pub BaseURL: Vec<BaseURL>,
    /// A "remote resource", following the XML Linking Language (XLink) specification.
    #[serde(rename = "@xlink:href", alias = "@href")]
    pub href: Option<String>,
    #[serde(rename = "@xlink:actuate", alias = "@actuate")]
    pub actuate: Option<String>,
    pub SegmentTemplate: Option<SegmentTemplate>,
    #[serde(rename = "AdaptationSet")]
    pub adaptations: Vec<AdaptationSet>,
}

/// The root node of a parsed DASH MPD manifest, before resolution and assembly.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MPD {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    /// The Presentation Type, either "static" or "dynamic" (a live stream for which segments
    /// become available over time).
    #[serde(rename = "@type")]
    pub mpdtype: Option<String>,
    #[serde(rename = "@xmlns")]
    pub xmlns: Option<String>,
    #[serde(rename = "@xmlns:xlink")]
    pub xlink: Option<String>,
    #[serde(rename = "@profiles")]
    pub profiles: Option<String>,
    #[serde(rename = "@minBufferTime")]
    #[serde(deserialize_with = "deserialize_xs_duration", default)]
    #[serde(serialize_with = "serialize_xs_duration")]
    pub minBufferTime: Option<Duration>,
    #[serde(rename = "@minimumUpdatePeriod")]
    #[serde(deserialize_with = "deserialize_xs_duration", default)]
    #[serde(serialize_with = "serialize_xs_duration")]
    pub minimumUpdatePeriod: Option<Duration>,
    #[serde(rename = "@timeShiftBufferDepth")]
    #[serde(deserialize_with = "deserialize_xs_duration", default)]
    #[serde(serialize_with = "serialize_xs_duration")]
    pub timeShiftBufferDepth: Option<Duration>,
    #[serde(rename = "@mediaPresentationDuration")]
    #[serde(deserialize_with = "deserialize_xs_duration", default)]
    #[serde(serialize_with = "serialize_xs_duration")]
    pub mediaPresentationDuration: Option<Duration>,
    /// A suggested delay of the presentation compared to the Live edge.
    #[serde(rename = "@suggestedPresentationDelay")]
    #[serde(deserialize_with = "deserialize_xs_duration", default)]
    #[serde(serialize_with = "serialize_xs_duration")]
    pub suggestedPresentationDelay: Option<Duration>,
    #[serde(rename = "@publishTime")]
    pub publishTime: Option<XsDatetime>,
    #[serde(rename = "@availabilityStartTime")]
    pub availabilityStartTime: Option<XsDatetime>,
    #[serde(rename = "@availabilityEndTime")]
    pub availabilityEndTime: Option<XsDatetime>,
    #[serde(rename = "Period", default)]
    pub periods: Vec<Period>,
    /// There may be several BaseURLs, for redundancy (for example multiple CDNs)
    #[serde(rename = "BaseURL")]
    pub base_url: Vec<BaseURL>,
    #[serde(rename = "Location")]
    pub locations: Vec<Location>,
    pub UTCTiming: Vec<UTCTiming>,
}


/// Parse an MPD manifest, provided as an XML string, returning an `MPD` node.
pub fn parse(xml: &str) -> Result<MPD, ManifestError> {
    let mpd: Result<MPD, quick_xml::DeError> = quick_xml::de::from_str(xml);
    match mpd {
        Ok(mpd) => Ok(mpd),
        Err(e) => Err(ManifestError::Parsing(e.to_string())),
    }
}


/// Caller-supplied context for parsing and resolution.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// The URI the manifest document was retrieved from, against which relative URLs (BaseURL,
    /// XLink references) are resolved.
    pub source_uri: String,
    /// Whether UTCTiming elements using an HTTP scheme should be loaded. When false, such
    /// elements are ignored and clock synchronization relies on direct schemes only.
    pub load_external_clock: bool,
}

/// Outcome of a [`parse_mpd`] call or of resuming a [`PendingManifest`].
#[derive(Debug)]
pub enum ParserResponse {
    /// Resolution converged and assembly succeeded.
    Done(Box<Manifest>),
    /// External resources must be loaded before parsing can complete.
    NeedsResources(PendingManifest),
}

/// A parse that is suspended awaiting external resource bodies. Load each resource named by
/// [`resources`](PendingManifest::resources), in order, and hand the bodies to
/// [`resume`](PendingManifest::resume). Dropping this value abandons the parse; nothing needs to
/// be torn down.
#[derive(Debug)]
pub struct PendingManifest {
    suspended: Suspended,
    source_uri: String,
}

impl PendingManifest {
    /// The outstanding resource batch: XLink period fragments first, then clock endpoints, each
    /// group in document order. Order is the only correlation key between requests and the bodies
    /// passed to [`resume`](PendingManifest::resume).
    pub fn resources(&self) -> &[Resource] {
        self.suspended.resources()
    }

    /// Splice the loaded bodies into the pending tree and continue parsing. Fails if the number
    /// of bodies differs from the number of outstanding resources, or if an XLink body is not a
    /// sequence of Period elements.
    pub fn resume(self, loaded: &[String]) -> Result<ParserResponse, ManifestError> {
        let source_uri = self.source_uri;
        match self.suspended.resume(loaded)? {
            Resolution::Complete(mpd) => {
                let manifest = assemble(&mpd, &source_uri)?;
                Ok(ParserResponse::Done(Box::new(manifest)))
            },
            Resolution::Suspended(suspended) => {
                Ok(ParserResponse::NeedsResources(PendingManifest { suspended, source_uri }))
            },
        }
    }
}

/// Parse an MPD document into a resolved, assembled [`Manifest`], suspending whenever remote
/// resources (XLink period fragments, UTCTiming endpoints) are required.
pub fn parse_mpd(xml: &str, options: ParseOptions) -> Result<ParserResponse, ManifestError> {
    let mpd = parse(xml)?;
    match resolve::resolve(mpd, &options) {
        Resolution::Complete(mpd) => {
            let manifest = assemble(&mpd, &options.source_uri)?;
            Ok(ParserResponse::Done(Box::new(manifest)))
        },
        Resolution::Suspended(suspended) => {
            Ok(ParserResponse::NeedsResources(PendingManifest {
                suspended,
                source_uri: options.source_uri,
            }))
        },
    }
}


#[cfg(test)]
mod tests {
    #[test]
    fn test_parse_xs_duration() {
        use std::time::Duration;
        use super::parse_xs_duration;

        assert!(parse_xs_duration("").is_err());
        assert!(parse_xs_duration("foobles").is_err());
        assert!(parse_xs_duration("P").is_err());
        assert!(parse_xs_duration("1Y2M3DT4H5M6S").is_err()); // missing initial P
        assert!(parse_xs_duration("-PT30S").is_err()); // negative durations unrepresentable
        assert_eq!(parse_xs_duration("PT3H11M53S").ok(), Some(Duration::new(11513, 0)));
        assert_eq!(parse_xs_duration("PT42M30S").ok(), Some(Duration::new(2550, 0)));
        assert_eq!(parse_xs_duration("PT0H10M0.00S").ok(), Some(Duration::new(600, 0)));
        assert_eq!(parse_xs_duration("PT1.5S").ok(), Some(Duration::new(1, 500_000_000)));
        assert_eq!(parse_xs_duration("PT0S").ok(), Some(Duration::new(0, 0)));
        assert_eq!(parse_xs_duration("PT0.001S").ok(), Some(Duration::new(0, 1_000_000)));
        assert_eq!(parse_xs_duration("PT344S").ok(), Some(Duration::new(344, 0)));
        assert_eq!(parse_xs_duration("PT72H").ok(), Some(Duration::new(72*60*60, 0)));
        assert_eq!(parse_xs_duration("PT0H0M30.030S").ok(), Some(Duration::new(30, 30_000_000)));
        assert_eq!(parse_xs_duration("PT1004199059S").ok(), Some(Duration::new(1004199059, 0)));
        assert_eq!(parse_xs_duration("P0Y20M0D").ok(), Some(Duration::new(51840000, 0)));
        assert_eq!(parse_xs_duration("PT1M30.5S").ok(), Some(Duration::new(90, 500_000_000)));
        assert!(parse_xs_duration("PW").is_err());
        assert_eq!(parse_xs_duration("P26W").ok(), Some(Duration::new(15724800, 0)));
        assert_eq!(parse_xs_duration("P1Y").ok(), Some(Duration::new(31536000, 0)));
        assert_eq!(parse_xs_duration("+PT4H").ok(), Some(Duration::new(14400, 0)));
        assert_eq!(parse_xs_duration("P23DT23H").ok(), Some(Duration::new(2070000, 0)));
        assert_eq!(parse_xs_duration("P1Y2M3DT4H5M6.7S").ok(), Some(Duration::new(36993906, 700_000_000)));
        assert_eq!(parse_xs_duration("P1Y2M3DT4H5M6,7S").ok(), Some(Duration::new(36993906, 700_000_000)));
    }
}
