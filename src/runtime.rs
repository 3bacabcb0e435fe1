//! Page-rendering helpers: the current-locale accessor and locale detection.
pub mod detect;
pub mod locale;

pub use detect::{
    DEFAULT_DETECTORS,
    DetectionInput,
    Detector,
    detect_locale,
    negotiate,
    parse_accept_language,
};
pub use locale::{
    Locale,
    interpolate,
    localize_path,
    strip_locale_prefix,
};
