//! Resolution of the remote resources referenced by an MPD manifest.
//!
//! From the DASH IF specification: DASH "remote elements" are elements that are not fully
//! contained in the MPD document but are referenced in the MPD with an HTTP URL using a
//! simplified profile of XLink. A Period carrying an `xlink:href` with actuate=onLoad semantics
//! must be dereferenced before the manifest is usable, and the fetched fragment may contain
//! zero, one or several Period elements that take the place of the referencing one. Similarly, a
//! UTCTiming element using the http-iso scheme names an endpoint whose response body is the
//! reference timestamp.
//!
//! This module performs no network access. [`resolve`] either completes immediately or suspends
//! with the ordered batch of [`Resource`]s still needed; the caller loads them (with whatever
//! transport, concurrency and retry policy it likes) and hands the bodies to
//! [`Suspended::resume`], which splices them into the tree and re-scans. A fragment spliced in
//! this way may itself reference further remote elements, so several suspensions can occur
//! before resolution converges.

use serde::Deserialize;
use tracing::debug;

use crate::{ManifestError, MPD, ParseOptions, Period, UTC_TIMING_SCHEME_DIRECT,
            UTC_TIMING_SCHEME_HTTP_ISO};


/// The XLink actuation mode requiring a remote element to be dereferenced before use.
pub const XLINK_ACTUATE_ONLOAD: &str = "onLoad";

/// From the DASH-IF-IOP-v4.0 specification, "If the value of the @xlink:href attribute is
/// urn:mpeg:dash:resolve-to-zero:2013, HTTP GET request is not issued, and the in-MPD element
/// shall be removed from the MPD."
pub const XLINK_RESOLVE_TO_ZERO: &str = "urn:mpeg:dash:resolve-to-zero:2013";

fn fetchable_xlink_href(href: &str) -> bool {
    (!href.is_empty()) && href.ne(XLINK_RESOLVE_TO_ZERO)
}

/// What kind of external content a [`Resource`] points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// An XML fragment holding the Period elements that replace a remote Period placeholder.
    XlinkFragment,
    /// An endpoint returning an ISO 8601 timestamp for clock synchronization.
    ClockEndpoint,
}

/// One unit of outstanding work for the caller: fetch `url` and pass the response body to
/// [`Suspended::resume`]. No identifier is attached; position in the batch is the correlation
/// key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub kind: ResourceKind,
    pub url: String,
}

/// Outcome of a resolution pass over the manifest tree.
#[derive(Debug)]
pub enum Resolution {
    /// No unresolved references remain; the tree is ready for assembly.
    Complete(MPD),
    /// External resources are needed. The pending tree travels inside the [`Suspended`] value;
    /// dropping it abandons resolution.
    Suspended(Suspended),
}

/// A resolution pass suspended on external resources. Holds the pending tree and the scan
/// results the resource batch was derived from.
#[derive(Debug)]
pub struct Suspended {
    mpd: MPD,
    options: ParseOptions,
    resources: Vec<Resource>,
    // tree positions of the unresolved periods, in ascending order
    xlink_indices: Vec<usize>,
    // positions of the UTCTiming records awaiting a fetched timestamp
    clock_indices: Vec<usize>,
}

// An XLink fragment body is not a well-formed document: it is a sequence of sibling Period
// elements. Wrapping it in a synthetic root element lets quick-xml deserialize the sequence.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PeriodFragment {
    #[serde(rename = "Period")]
    periods: Vec<Period>,
}

fn parse_period_fragment(body: &str) -> Result<Vec<Period>, ManifestError> {
    if body.trim().is_empty() {
        return Err(ManifestError::InvalidExternalResource(
            "empty XLink fragment body".to_string()));
    }
    let wrapped = format!("<fragment>{body}</fragment>");
    let fragment: PeriodFragment = quick_xml::de::from_str(&wrapped)
        .map_err(|e| ManifestError::InvalidExternalResource(format!("XLink fragment: {e}")))?;
    Ok(fragment.periods)
}

/// Scan the manifest tree for unresolved references and either complete or suspend.
///
/// Periods whose `xlink:href` is the resolve-to-zero URN are removed here, without any request
/// being emitted. Periods with a fetchable href and onLoad actuation, and (only when
/// `options.load_external_clock` is set) UTCTiming records with the http-iso scheme, produce the
/// suspension batch: period fragments first, then clock endpoints, each group in tree order.
/// Scanning an already-resolved tree always completes with an empty batch.
pub fn resolve(mut mpd: MPD, options: &ParseOptions) -> Resolution {
    mpd.periods.retain(|p| {
        p.href.as_deref() != Some(XLINK_RESOLVE_TO_ZERO)
    });

    let mut xlink_indices = Vec::new();
    let mut xlink_urls = Vec::new();
    for (i, period) in mpd.periods.iter().enumerate() {
        if let (Some(href), Some(actuate)) = (&period.href, &period.actuate) {
            if fetchable_xlink_href(href) && actuate == XLINK_ACTUATE_ONLOAD {
                xlink_indices.push(i);
                xlink_urls.push(href.clone());
            }
        }
    }

    let clock_indices: Vec<usize> = if options.load_external_clock {
        mpd.UTCTiming.iter().enumerate()
            .filter(|(_, t)| t.schemeIdUri.as_deref() == Some(UTC_TIMING_SCHEME_HTTP_ISO))
            .map(|(i, _)| i)
            .collect()
    } else {
        Vec::new()
    };

    if xlink_indices.is_empty() && clock_indices.is_empty() {
        return Resolution::Complete(mpd);
    }

    let mut resources: Vec<Resource> = xlink_urls.into_iter()
        .map(|url| Resource { kind: ResourceKind::XlinkFragment, url })
        .collect();
    resources.extend(clock_indices.iter().map(|&i| Resource {
        kind: ResourceKind::ClockEndpoint,
        url: mpd.UTCTiming[i].value.clone().unwrap_or_default(),
    }));
    debug!("manifest resolution suspended on {} external resources", resources.len());

    Resolution::Suspended(Suspended {
        mpd,
        options: options.clone(),
        resources,
        xlink_indices,
        clock_indices,
    })
}

impl Suspended {
    /// The outstanding resource batch, in the order the bodies must be supplied to
    /// [`resume`](Suspended::resume).
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Splice the loaded resource bodies into the pending tree and re-scan.
    ///
    /// `loaded` must hold exactly one body per outstanding resource, in batch order; any other
    /// length is a [`ManifestError::ResourceCountMismatch`] and the tree is not touched. Each
    /// period fragment replaces the placeholder at its recorded position with the Periods it
    /// parses into; fragments are applied from the last position to the first so that the
    /// positions of fragments not yet applied stay valid while the period list grows or shrinks.
    /// Each clock body rewrites its UTCTiming record to the direct scheme, carrying the fetched
    /// timestamp as a literal value. Since a spliced fragment may contain further remote
    /// references, the result is again a [`Resolution`].
    pub fn resume(mut self, loaded: &[String]) -> Result<Resolution, ManifestError> {
        if loaded.len() != self.resources.len() {
            return Err(ManifestError::ResourceCountMismatch {
                expected: self.resources.len(),
                got: loaded.len(),
            });
        }

        for i in (0..self.xlink_indices.len()).rev() {
            let index = self.xlink_indices[i];
            let replacement = parse_period_fragment(&loaded[i])?;
            debug!("XLink placeholder at period position {index} resolved to {} Periods",
                   replacement.len());
            drop(self.mpd.periods.splice(index..=index, replacement));
        }

        for (j, &index) in self.clock_indices.iter().enumerate() {
            let timing = &mut self.mpd.UTCTiming[index];
            timing.schemeIdUri = Some(UTC_TIMING_SCHEME_DIRECT.to_string());
            timing.value = Some(loaded[self.xlink_indices.len() + j].clone());
        }

        Ok(resolve(self.mpd, &self.options))
    }
}
