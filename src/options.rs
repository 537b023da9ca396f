//! Abstract configuration-options interface consumed by [`crate::pipeline::build`].

use crate::error::PipelineError;

/// The five resample method names recognized by configuration, matched
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleMethod {
    SincBestQuality,
    SincMediumQuality,
    SincFastest,
    ZeroOrderHold,
    Linear,
}

impl ResampleMethod {
    /// Parse a configured method name, case-insensitively.
    pub fn from_str_ci(name: &str) -> Result<Self, PipelineError> {
        match name.to_ascii_lowercase().as_str() {
            "sincbestquality" => Ok(Self::SincBestQuality),
            "sincmediumquality" => Ok(Self::SincMediumQuality),
            "sincfastest" => Ok(Self::SincFastest),
            "zeroorderhold" => Ok(Self::ZeroOrderHold),
            "linear" => Ok(Self::Linear),
            _ => Err(PipelineError::UnknownResampleMethod(name.to_string())),
        }
    }
}

/// Options the pipeline reads once at `build` time. Implementations may
/// wrap a larger host configuration object; the pipeline never re-reads
/// options after construction.
pub trait ResampleOptions {
    /// `EnableResample`: if `false` and rates differ, `build` fails with
    /// [`PipelineError::ResamplingDisabled`].
    fn enable_resample(&self) -> bool;

    /// `ResampleMethod`: the rubato-backed method name.
    fn resample_method(&self) -> &str;

    /// `ZitaResampleQuality`: when `Some`, selects the alternative
    /// polyphase resampler backend at the given quality level instead of
    /// the method named by `resample_method`.
    fn zita_resample_quality(&self) -> Option<u32>;
}

/// A plain in-process implementation of [`ResampleOptions`], for callers
/// that already parsed their own configuration.
#[derive(Debug, Clone)]
pub struct StaticResampleOptions {
    pub enable_resample: bool,
    pub resample_method: String,
    pub zita_resample_quality: Option<u32>,
}

impl Default for StaticResampleOptions {
    fn default() -> Self {
        Self {
            enable_resample: true,
            resample_method: "SincMediumQuality".to_string(),
            zita_resample_quality: None,
        }
    }
}

impl ResampleOptions for StaticResampleOptions {
    fn enable_resample(&self) -> bool {
        self.enable_resample
    }

    fn resample_method(&self) -> &str {
        &self.resample_method
    }

    fn zita_resample_quality(&self) -> Option<u32> {
        self.zita_resample_quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_case_insensitive() {
        assert_eq!(
            ResampleMethod::from_str_ci("sincbestquality").unwrap(),
            ResampleMethod::SincBestQuality
        );
        assert_eq!(
            ResampleMethod::from_str_ci("SincBestQuality").unwrap(),
            ResampleMethod::SincBestQuality
        );
        assert_eq!(
            ResampleMethod::from_str_ci("LINEAR").unwrap(),
            ResampleMethod::Linear
        );
    }

    #[test]
    fn unknown_method_is_fatal() {
        assert!(ResampleMethod::from_str_ci("turbo").is_err());
    }

    #[test]
    fn static_options_default_enables_resampling() {
        let opts = StaticResampleOptions::default();
        assert!(opts.enable_resample());
        assert!(opts.zita_resample_quality().is_none());
    }
}
