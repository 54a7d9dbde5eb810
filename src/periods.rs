//! Turning resolved Period records into the time-addressed periods of the final manifest.

use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{AdaptationSet, IdGenerator, ManifestError, Period, urls};


static PERIOD_IDS: IdGenerator = IdGenerator::new();

/// A period of the presentation, positioned on the presentation timeline.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct ParsedPeriod {
    pub id: String,
    /// Offset in seconds from the start of the presentation.
    pub start: f64,
    /// Duration in seconds; absent for an open-ended final period of a live presentation.
    pub duration: Option<f64>,
    /// `start + duration` when the duration is known.
    pub end: Option<f64>,
    pub base_url: String,
    pub adaptations: Vec<AdaptationSet>,
}

/// Manifest-level context the period timeline is computed against.
#[derive(Debug, Clone)]
pub struct PeriodContext {
    /// Unix epoch seconds from which availability is measured (0 for static presentations).
    pub availability_start_time: f64,
    /// The root mediaPresentationDuration in seconds, when present.
    pub duration: Option<f64>,
    pub is_dynamic: bool,
    pub base_url: String,
}

/// Position each period on the presentation timeline.
///
/// An explicit `start` attribute wins; the first period otherwise starts at 0, and later periods
/// chain from the previous period's end. The duration comes from the explicit attribute, else
/// from the next period's explicit start, else (for the final period) from the manifest-wide
/// duration. A period whose start cannot be determined from any of these is a fatal parse error.
pub fn parse_periods(
    periods: &[Period],
    ctx: &PeriodContext) -> Result<Vec<ParsedPeriod>, ManifestError>
{
    let mut parsed: Vec<ParsedPeriod> = Vec::with_capacity(periods.len());
    for (i, period) in periods.iter().enumerate() {
        let start = match period.start {
            Some(s) => s.as_secs_f64(),
            None if i == 0 => 0.0,
            None => match parsed[i - 1].end {
                Some(end) => end,
                None => return Err(ManifestError::Parsing(
                    format!("can't determine the start of the Period at position {i}"))),
            },
        };
        let next_explicit_start = periods.get(i + 1)
            .and_then(|p| p.start)
            .map(|s| s.as_secs_f64());
        let duration = period.duration.map(|d| d.as_secs_f64())
            .or_else(|| next_explicit_start.map(|next| next - start))
            .or_else(|| {
                if i + 1 == periods.len() {
                    ctx.duration.map(|total| total - start)
                } else {
                    None
                }
            });
        let id = match &period.id {
            Some(id) => id.clone(),
            None => format!("gen-dash-period-{}", PERIOD_IDS.next_id()),
        };
        let reference = period.BaseURL.first().map(|b| b.base.as_str()).unwrap_or("");
        parsed.push(ParsedPeriod {
            id,
            start,
            duration,
            end: duration.map(|d| start + d),
            base_url: urls::resolve_url(&ctx.base_url, reference)?,
            adaptations: period.adaptations.clone(),
        });
    }
    Ok(parsed)
}
