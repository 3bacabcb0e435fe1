//! Picks the current locale for a request.

use std::cmp::Reverse;

use unic_langid::LanguageIdentifier;

use crate::config::Configuration;

/// One source of locale information, tried in order by [`detect_locale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detector {
    /// First path segment, e.g. `/fi/about`.
    PathSegment,
    /// A previously chosen locale (cookie, local storage).
    StoredPreference,
    /// Browser preferences from `Accept-Language`.
    AcceptLanguage,
}

pub const DEFAULT_DETECTORS: [Detector; 3] =
    [Detector::PathSegment, Detector::StoredPreference, Detector::AcceptLanguage];

/// Request data the detectors look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionInput<'a> {
    pub path: &'a str,
    pub stored: Option<&'a str>,
    /// Language tags, most preferred first.
    pub accept_languages: &'a [String],
}

impl Detector {
    /// Supported locale code found by this detector, if any.
    #[must_use]
    pub fn detect<'c>(self, config: &'c Configuration, input: &DetectionInput<'_>) -> Option<&'c str> {
        match self {
            Self::PathSegment => from_path(config, input.path),
            Self::StoredPreference => {
                input.stored.and_then(|code| config.find_locale(code.trim())).map(|l| l.code.as_str())
            }
            Self::AcceptLanguage => negotiate(config, input.accept_languages),
        }
    }
}

/// Runs `detectors` in order and returns the first match, or the default locale.
#[must_use]
pub fn detect_locale<'c>(
    config: &'c Configuration,
    input: &DetectionInput<'_>,
    detectors: &[Detector],
) -> &'c str {
    detectors
        .iter()
        .find_map(|detector| {
            let code = detector.detect(config, input)?;
            tracing::trace!(?detector, code, "Locale detected");
            Some(code)
        })
        .unwrap_or(config.default.as_str())
}

fn from_path<'c>(config: &'c Configuration, path: &str) -> Option<&'c str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let first = path.trim_start_matches('/').split('/').next()?;
    config.find_locale(first).map(|l| l.code.as_str())
}

/// Matches accepted tags against the configured locales.
///
/// Each tag is tried exactly (ignoring case) and then by language subtag, so
/// `fi-FI` selects `fi` and `pt` selects `pt-BR`. Tags that are not valid
/// language identifiers only take part in the exact match.
#[must_use]
pub fn negotiate<'c>(config: &'c Configuration, accepted: &[String]) -> Option<&'c str> {
    accepted.iter().filter(|tag| tag.as_str() != "*").find_map(|tag| {
        let exact = config.locales.iter().find(|l| l.code.eq_ignore_ascii_case(tag));
        exact
            .or_else(|| {
                let wanted: LanguageIdentifier = tag.parse().ok()?;
                config.locales.iter().find(|l| {
                    l.code
                        .parse::<LanguageIdentifier>()
                        .is_ok_and(|supported| supported.language == wanted.language)
                })
            })
            .map(|l| l.code.as_str())
    })
}

/// Parses an `Accept-Language` header into tags ordered by quality.
///
/// Tags with `q=0` or a malformed weight are dropped. Equal weights keep
/// header order.
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, u16)> = header
        .split(',')
        .filter_map(|item| {
            let mut parts = item.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let mut quality = 1000;
            for param in parts {
                if let Some((name, value)) = param.split_once('=')
                    && name.trim().eq_ignore_ascii_case("q")
                {
                    quality = parse_quality(value.trim())?;
                }
            }
            (quality > 0).then(|| (tag.to_string(), quality))
        })
        .collect();

    weighted.sort_by_key(|(_, quality)| Reverse(*quality));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

/// `q` value in thousandths.
fn parse_quality(value: &str) -> Option<u16> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() || fraction.len() > 3 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let whole: u16 = whole.parse().ok()?;
    let fraction: u16 = format!("{fraction:0<3}").parse().ok()?;
    let quality = whole.checked_mul(1000)?.checked_add(fraction)?;
    (quality <= 1000).then_some(quality)
}
