// Testing that we correctly drive the suspend/resume resolution of remote resources
//
// From the DASH IF specification: DASH "remote elements" are elements that are not fully
// contained in the MPD document but are referenced in the MPD with an HTTP URL using a
// simplified profile of XLink. This library never fetches anything itself: resolution suspends
// with an ordered resource batch, and the caller feeds the loaded bodies back in. These tests
// play the caller, supplying fragment bodies by hand and checking where they land in the tree.
//
// To run tests while enabling printing to stdout/stderr
//
//    RUST_LOG=debug cargo test --test resolving -- --show-output

pub mod common;
use std::time::Duration;
use dash_manifest::{MPD, ManifestError, ParseOptions, Period, UTCTiming};
use dash_manifest::{UTC_TIMING_SCHEME_DIRECT, UTC_TIMING_SCHEME_HTTP_ISO};
use dash_manifest::resolve::{resolve, Resolution, ResourceKind, Suspended, XLINK_RESOLVE_TO_ZERO};
use common::setup_logging;


fn options() -> ParseOptions {
    ParseOptions {
        source_uri: "http://localhost:6666/manifest.mpd".to_string(),
        load_external_clock: true,
    }
}

fn plain_period(id: &str, duration_secs: u64) -> Period {
    Period {
        id: Some(id.to_string()),
        duration: Some(Duration::new(duration_secs, 0)),
        ..Default::default()
    }
}

fn remote_period(id: &str, href: &str) -> Period {
    Period {
        id: Some(id.to_string()),
        href: Some(href.to_string()),
        actuate: Some("onLoad".to_string()),
        ..Default::default()
    }
}

fn expect_suspended(r: Resolution) -> Suspended {
    match r {
        Resolution::Suspended(s) => s,
        Resolution::Complete(_) => panic!("expected a suspension, resolution completed"),
    }
}

fn expect_complete(r: Resolution) -> MPD {
    match r {
        Resolution::Complete(mpd) => mpd,
        Resolution::Suspended(s) => panic!("expected completion, suspended on {:?}", s.resources()),
    }
}


#[test]
fn test_terminal_scan_is_idempotent() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(plain_period("1", 5), plain_period("2", 5)),
        UTCTiming: vec!(UTCTiming {
            schemeIdUri: Some(UTC_TIMING_SCHEME_DIRECT.to_string()),
            value: Some("2021-06-03T13:00:00Z".to_string()),
        }),
        ..Default::default()
    };
    let mpd = expect_complete(resolve(mpd, &options()));
    assert_eq!(mpd.periods.len(), 2);
    // scanning an already-resolved tree resolves again, with nothing to do
    let mpd = expect_complete(resolve(mpd, &options()));
    assert_eq!(mpd.periods.len(), 2);
}

#[test]
fn test_batch_ordering() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("dynamic".to_string()),
        periods: vec!(
            plain_period("1", 5),
            remote_period("2", "http://localhost:6666/remote/a.xml"),
            remote_period("3", "http://localhost:6666/remote/b.xml"),
        ),
        UTCTiming: vec!(
            UTCTiming {
                schemeIdUri: Some(UTC_TIMING_SCHEME_HTTP_ISO.to_string()),
                value: Some("http://localhost:6666/time.iso".to_string()),
            },
            UTCTiming {
                schemeIdUri: Some(UTC_TIMING_SCHEME_DIRECT.to_string()),
                value: Some("2021-06-03T13:00:00Z".to_string()),
            },
        ),
        ..Default::default()
    };
    let suspended = expect_suspended(resolve(mpd, &options()));
    let resources = suspended.resources();
    // period fragments first, in tree order, then clock endpoints
    assert_eq!(resources.len(), 3);
    assert_eq!(resources[0].kind, ResourceKind::XlinkFragment);
    assert_eq!(resources[0].url, "http://localhost:6666/remote/a.xml");
    assert_eq!(resources[1].kind, ResourceKind::XlinkFragment);
    assert_eq!(resources[1].url, "http://localhost:6666/remote/b.xml");
    assert_eq!(resources[2].kind, ResourceKind::ClockEndpoint);
    assert_eq!(resources[2].url, "http://localhost:6666/time.iso");
}

// Only the onLoad actuation participates in eager resolution; onRequest placeholders stay in the
// tree for the application to deal with later.
#[test]
fn test_on_request_not_resolved() {
    setup_logging();
    let on_request = Period {
        id: Some("later".to_string()),
        href: Some("http://localhost:6666/remote/later.xml".to_string()),
        actuate: Some("onRequest".to_string()),
        ..Default::default()
    };
    let mpd = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(plain_period("1", 5), on_request),
        ..Default::default()
    };
    let mpd = expect_complete(resolve(mpd, &options()));
    assert_eq!(mpd.periods.len(), 2);
    assert!(mpd.periods[1].href.is_some());
}

#[test]
fn test_clock_not_loaded_when_disabled() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("dynamic".to_string()),
        periods: vec!(remote_period("1", "http://localhost:6666/remote/a.xml")),
        UTCTiming: vec!(UTCTiming {
            schemeIdUri: Some(UTC_TIMING_SCHEME_HTTP_ISO.to_string()),
            value: Some("http://localhost:6666/time.iso".to_string()),
        }),
        ..Default::default()
    };
    let opts = ParseOptions { load_external_clock: false, ..options() };
    let suspended = expect_suspended(resolve(mpd, &opts));
    assert_eq!(suspended.resources().len(), 1);
    assert_eq!(suspended.resources()[0].kind, ResourceKind::XlinkFragment);
}

#[test]
fn test_resolve_to_zero_removes_period() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(
            plain_period("1", 5),
            Period {
                id: Some("2".to_string()),
                href: Some(XLINK_RESOLVE_TO_ZERO.to_string()),
                ..Default::default()
            },
            plain_period("3", 5),
        ),
        ..Default::default()
    };
    // no request may be issued for the resolve-to-zero URN
    let mpd = expect_complete(resolve(mpd, &options()));
    assert_eq!(mpd.periods.len(), 2);
    assert_eq!(mpd.periods[1].id.as_ref().unwrap(), "3");
}

// An XLink fragment may resolve to several sibling Periods. Splicing two of them in place of the
// placeholder at position 0 of a three-period tree must leave the original trailing periods at
// positions 2 and 3.
#[test]
fn test_splice_positions() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(
            remote_period("1", "http://localhost:6666/remote/two-periods.xml"),
            plain_period("2", 5),
            plain_period("3", 5),
        ),
        ..Default::default()
    };
    let suspended = expect_suspended(resolve(mpd, &options()));
    assert_eq!(suspended.resources().len(), 1);
    let fragment = r#"<Period id="r1" duration="PT5S"></Period>
                      <Period id="r2" duration="PT5S"></Period>"#;
    let mpd = expect_complete(suspended.resume(&[fragment.to_string()]).unwrap());
    let ids: Vec<&str> = mpd.periods.iter().map(|p| p.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!("r1", "r2", "2", "3"));
}

// A well-formed fragment containing no Period elements is a legal zero-replacement splice.
#[test]
fn test_splice_to_nothing() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(
            plain_period("1", 5),
            remote_period("2", "http://localhost:6666/remote/empty.xml"),
            plain_period("3", 5),
        ),
        ..Default::default()
    };
    let suspended = expect_suspended(resolve(mpd, &options()));
    let fragment = r#"<SupplementalProperty schemeIdUri="urn:example:nothing"/>"#;
    let mpd = expect_complete(suspended.resume(&[fragment.to_string()]).unwrap());
    let ids: Vec<&str> = mpd.periods.iter().map(|p| p.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!("1", "3"));
}

// A fetched fragment can itself contain a further remote reference, leading to a second
// suspension before resolution converges.
#[test]
fn test_chained_remote_fragments() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(remote_period("1", "http://localhost:6666/remote/outer.xml")),
        ..Default::default()
    };
    let suspended = expect_suspended(resolve(mpd, &options()));
    let outer = concat!(
        r#"<Period id="o1" duration="PT5S"></Period>"#,
        r#"<Period id="o2" xlink:href="http://localhost:6666/remote/inner.xml" "#,
        r#"xlink:actuate="onLoad"></Period>"#);
    let suspended = expect_suspended(suspended.resume(&[outer.to_string()]).unwrap());
    assert_eq!(suspended.resources().len(), 1);
    assert_eq!(suspended.resources()[0].url, "http://localhost:6666/remote/inner.xml");
    let inner = r#"<Period id="i1" duration="PT5S"></Period>"#;
    let mpd = expect_complete(suspended.resume(&[inner.to_string()]).unwrap());
    let ids: Vec<&str> = mpd.periods.iter().map(|p| p.id.as_deref().unwrap()).collect();
    assert_eq!(ids, vec!("o1", "i1"));
}

#[test]
fn test_clock_body_rewrites_scheme() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("dynamic".to_string()),
        periods: vec!(plain_period("1", 5)),
        UTCTiming: vec!(UTCTiming {
            schemeIdUri: Some(UTC_TIMING_SCHEME_HTTP_ISO.to_string()),
            value: Some("http://localhost:6666/time.iso".to_string()),
        }),
        ..Default::default()
    };
    let suspended = expect_suspended(resolve(mpd, &options()));
    assert_eq!(suspended.resources().len(), 1);
    assert_eq!(suspended.resources()[0].kind, ResourceKind::ClockEndpoint);
    let mpd = expect_complete(suspended.resume(&["2021-06-03T13:00:00Z".to_string()]).unwrap());
    let timing = &mpd.UTCTiming[0];
    assert_eq!(timing.schemeIdUri.as_ref().unwrap(), UTC_TIMING_SCHEME_DIRECT);
    assert_eq!(timing.value.as_ref().unwrap(), "2021-06-03T13:00:00Z");
}

#[test]
fn test_resume_arity_mismatch_is_fatal() {
    setup_logging();
    let mpd = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(remote_period("1", "http://localhost:6666/remote/a.xml")),
        ..Default::default()
    };
    let suspended = expect_suspended(resolve(mpd, &options()));
    let err = suspended.resume(&[]).unwrap_err();
    assert!(matches!(err, ManifestError::ResourceCountMismatch { expected: 1, got: 0 }),
            "unexpected error {err}");
}

#[test]
fn test_invalid_fragment_bodies_are_fatal() {
    setup_logging();
    let remote = MPD {
        mpdtype: Some("static".to_string()),
        periods: vec!(remote_period("1", "http://localhost:6666/remote/a.xml")),
        ..Default::default()
    };
    let suspended = expect_suspended(resolve(remote.clone(), &options()));
    let err = suspended.resume(&["<Period".to_string()]).unwrap_err();
    assert!(matches!(err, ManifestError::InvalidExternalResource(_)),
            "unexpected error {err}");

    let suspended = expect_suspended(resolve(remote, &options()));
    let err = suspended.resume(&["   ".to_string()]).unwrap_err();
    assert!(matches!(err, ManifestError::InvalidExternalResource(_)),
            "unexpected error {err}");
}
