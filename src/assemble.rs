//! Assembly of a fully-resolved MPD tree into the final [`Manifest`].
//!
//! Assembly is a pure derivation over the resolved tree, except for its dependence on wall-clock
//! "now" (the clock offset and live presentation gap are distances from the current instant).
//! [`assemble`] reads the system clock; [`assemble_at`] takes the instant explicitly and is the
//! entry point deterministic tests should use.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;
use tracing::warn;

use crate::{IdGenerator, ManifestError, MPD, UTCTiming, XsDatetime,
            UTC_TIMING_SCHEME_DIRECT, validate, urls};
use crate::periods::{parse_periods, ParsedPeriod, PeriodContext};


/// Suggested distance to the live edge, in seconds, when the manifest doesn't carry a
/// suggestedPresentationDelay attribute.
pub const DEFAULT_SUGGESTED_PRESENTATION_DELAY: f64 = 10.0;

static MANIFEST_IDS: IdGenerator = IdGenerator::new();

/// The normalized description of a presentation, ready for consumption by a playback engine.
/// Immutable once produced: assembly either yields a complete manifest or fails, never a
/// partially-populated one. Optional fields are genuinely absent rather than defaulted.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    /// The root id attribute, or a process-unique synthesized identity.
    pub id: String,
    pub base_url: String,
    pub is_live: bool,
    /// Unix epoch seconds from which availability is measured; 0 for static presentations.
    pub availability_start_time: f64,
    /// Total duration of the presentation in seconds; absent for an open-ended live stream.
    pub duration: Option<f64>,
    pub periods: Vec<ParsedPeriod>,
    /// The source URI followed by the alternate Location entries, in document order.
    pub uris: Vec<String>,
    pub suggested_presentation_delay: f64,
    /// `local now - server now` in milliseconds, from a direct UTCTiming record.
    pub clock_offset: Option<i64>,
    /// Unix epoch seconds after which the presentation is no longer available (dynamic only).
    pub availability_end_time: Option<f64>,
    pub time_shift_buffer_depth: Option<f64>,
    /// Seconds this description remains valid before a refetch (the minimum update period).
    pub lifetime: Option<f64>,
    /// Distance in seconds between "now" and the live edge (dynamic only).
    pub presentation_live_gap: Option<f64>,
}

fn epoch_secs(t: XsDatetime) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}

// The first direct-scheme UTCTiming record with a non-empty value gives the server's notion of
// "now"; the offset is how far the local clock is ahead of it. An unparseable value degrades to
// no offset, it does not fail assembly.
fn clock_offset_from_utc_timings(timings: &[UTCTiming], now: XsDatetime) -> Option<i64> {
    let direct = timings.iter().find(|t| {
        t.schemeIdUri.as_deref() == Some(UTC_TIMING_SCHEME_DIRECT)
            && t.value.as_deref().is_some_and(|v| !v.is_empty())
    })?;
    let value = direct.value.as_deref()?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(server_now) => Some(now.timestamp_millis() - server_now.timestamp_millis()),
        Err(e) => {
            warn!("failed to parse direct UTCTiming value {value}: {e}");
            None
        },
    }
}

// Distance in seconds between now and the live edge, taken as the end of the last period (its
// start, if open-ended).
fn presentation_live_gap(manifest: &Manifest, now: XsDatetime) -> f64 {
    let last_position = manifest.periods.last()
        .map(|p| p.end.unwrap_or(p.start))
        .unwrap_or(0.0);
    now.timestamp_millis() as f64 / 1000.0 - (manifest.availability_start_time + last_position)
}

/// Assemble a resolved MPD tree into a [`Manifest`], reading the system clock for the
/// time-dependent derivations.
///
/// The tree must no longer contain unresolved references (see [`crate::resolve`]); any that
/// remain are treated as ordinary absent content.
pub fn assemble(mpd: &MPD, source_uri: &str) -> Result<Manifest, ManifestError> {
    assemble_at(mpd, source_uri, Utc::now())
}

/// [`assemble`] with an explicit "now", for deterministic derivation of the clock offset and
/// live presentation gap.
pub fn assemble_at(mpd: &MPD, source_uri: &str, now: XsDatetime)
                   -> Result<Manifest, ManifestError>
{
    let base_url = urls::resolve_url(
        &urls::normalize_base_url(source_uri)?,
        mpd.base_url.first().map(|b| b.base.as_str()).unwrap_or(""))?;

    let is_dynamic = mpd.mpdtype.as_deref() == Some("dynamic");
    let availability_start_time = match mpd.availabilityStartTime {
        Some(t) if mpd.mpdtype.as_deref() != Some("static") => epoch_secs(t),
        _ => 0.0,
    };

    let parsed_periods = parse_periods(&mpd.periods, &PeriodContext {
        availability_start_time,
        duration: mpd.mediaPresentationDuration.map(|d| d.as_secs_f64()),
        is_dynamic,
        base_url: base_url.clone(),
    })?;

    // An explicit root duration always wins. A dynamic presentation without one is open-ended.
    // Otherwise the last period bounds the presentation, when it is itself bounded.
    let duration = if let Some(d) = mpd.mediaPresentationDuration {
        Some(d.as_secs_f64())
    } else if is_dynamic {
        None
    } else if let Some(last) = parsed_periods.last() {
        match last.end {
            Some(end) => Some(end),
            None => last.duration.map(|d| last.start + d),
        }
    } else {
        None
    };

    let mut uris = vec![source_uri.to_string()];
    uris.extend(mpd.locations.iter().map(|l| l.url.clone()));

    let mut manifest = Manifest {
        id: match &mpd.id {
            Some(id) => id.clone(),
            None => format!("gen-dash-manifest-{}", MANIFEST_IDS.next_id()),
        },
        base_url,
        is_live: is_dynamic,
        availability_start_time,
        duration,
        periods: parsed_periods,
        uris,
        suggested_presentation_delay: mpd.suggestedPresentationDelay
            .map(|d| d.as_secs_f64())
            .unwrap_or(DEFAULT_SUGGESTED_PRESENTATION_DELAY),
        clock_offset: clock_offset_from_utc_timings(&mpd.UTCTiming, now),
        availability_end_time: if is_dynamic {
            mpd.availabilityEndTime.map(epoch_secs)
        } else {
            None
        },
        time_shift_buffer_depth: mpd.timeShiftBufferDepth.map(|d| d.as_secs_f64()),
        lifetime: mpd.minimumUpdatePeriod
            .map(|d| d.as_secs_f64())
            .filter(|d| *d > 0.0),
        presentation_live_gap: None,
    };

    validate::check_manifest_ids(&manifest)?;
    if manifest.is_live {
        manifest.presentation_live_gap = Some(presentation_live_gap(&manifest, now));
    }
    Ok(manifest)
}
