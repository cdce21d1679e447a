//! Daemon version negotiation.
//!
//! A client may declare the daemon version it talks to. From that single
//! string this module derives an immutable [`Capabilities`] value:
//! whether the daemon accepts named (object-style) parameters, and which
//! catalog methods and features the version serves. Derivation happens
//! once, at client construction; nothing here is consulted again per
//! call except through the derived map.

use std::collections::HashMap;

use regex::Regex;
use semver::{Version, VersionReq};

use crate::catalog::MethodDescriptor;
use crate::error::Error;

/// Daemon versions from which named parameters are accepted.
const NAMED_PARAMS_RANGE: &str = ">=0.14.0";

/// Extract the authoritative `MAJOR.MINOR.PATCH` from a declared version
/// string. Oddly formatted daemon versions such as `0.15.0.1` carry a
/// fourth component; the first three-part match wins and the rest is
/// discarded.
pub(crate) fn extract_version(raw: &str) -> Result<Version, Error> {
    let pattern = Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+").expect("version pattern is valid");
    let matched = pattern
        .find(raw)
        .ok_or_else(|| Error::InvalidVersion(raw.to_owned()))?;
    matched
        .as_str()
        .parse()
        .map_err(|_| Error::InvalidVersion(raw.to_owned()))
}

#[derive(Debug, Clone)]
struct MethodSupport {
    supported: bool,
    features: HashMap<String, bool>,
}

/// What the daemon behind this client is able to serve.
///
/// Without a declared version every method and feature is treated as
/// supported while named parameters stay disabled; support checks only
/// become meaningful once a version is declared.
#[derive(Debug, Clone)]
pub struct Capabilities {
    version: Option<String>,
    named_params: bool,
    methods: HashMap<String, MethodSupport>,
}

impl Capabilities {
    pub(crate) fn derive(
        catalog: &[MethodDescriptor],
        declared: Option<&str>,
    ) -> Result<Self, Error> {
        let version = declared.map(extract_version).transpose()?;

        let named_params = match &version {
            Some(v) => range(NAMED_PARAMS_RANGE).matches(v),
            None => false,
        };

        let mut methods = HashMap::with_capacity(catalog.len());
        for descriptor in catalog {
            let supported = match &version {
                Some(v) => range(descriptor.min_version).matches(v),
                None => true,
            };
            let features = descriptor
                .features
                .iter()
                .map(|feature| {
                    let supported = match &version {
                        Some(v) => range(feature.constraint).matches(v),
                        None => true,
                    };
                    (feature.name.to_owned(), supported)
                })
                .collect();
            methods.insert(
                descriptor.name.to_owned(),
                MethodSupport { supported, features },
            );
        }

        Ok(Self {
            version: version.map(|v| v.to_string()),
            named_params,
            methods,
        })
    }

    /// The normalized `MAJOR.MINOR.PATCH` the client was constructed
    /// with, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn named_params_supported(&self) -> bool {
        self.named_params
    }

    /// Whether the declared version serves `method` (case-insensitive).
    /// Always true when no version was declared.
    pub fn method_supported(&self, method: &str) -> bool {
        if self.version.is_none() {
            return true;
        }
        self.methods
            .get(&method.to_ascii_lowercase())
            .is_some_and(|support| support.supported)
    }

    /// Whether the declared version serves `feature` of `method`.
    /// Always true when no version was declared; unknown methods and
    /// features count as unsupported once a version is declared.
    pub fn feature_supported(&self, method: &str, feature: &str) -> bool {
        if self.version.is_none() {
            return true;
        }
        self.methods
            .get(&method.to_ascii_lowercase())
            .and_then(|support| support.features.get(feature))
            .copied()
            .unwrap_or(false)
    }

    /// Fail fast before any network round trip when `method` (already
    /// canonical lower-case) is outside the declared version.
    pub(crate) fn ensure_method(&self, method: &str) -> Result<(), Error> {
        let Some(version) = &self.version else {
            return Ok(());
        };
        if self.methods.get(method).is_some_and(|m| m.supported) {
            Ok(())
        } else {
            Err(Error::UnsupportedMethod {
                method: method.to_owned(),
                version: version.clone(),
            })
        }
    }

    /// Fail fast when a feature-gated parameter is outside the declared
    /// version. Callers check this before building requests that rely on
    /// the feature.
    pub fn ensure_feature(&self, method: &str, feature: &str) -> Result<(), Error> {
        let Some(version) = &self.version else {
            return Ok(());
        };
        if self.feature_supported(method, feature) {
            Ok(())
        } else {
            Err(Error::UnsupportedFeature {
                method: method.to_ascii_lowercase(),
                feature: feature.to_owned(),
                version: version.clone(),
            })
        }
    }
}

fn range(constraint: &str) -> VersionReq {
    VersionReq::parse(constraint).expect("catalog version ranges are valid semver")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, Category, Feature};

    #[test]
    fn extract_discards_trailing_components() {
        let version = extract_version("2.1.0.1").expect("version must parse");
        assert_eq!(version.to_string(), "2.1.0");
    }

    #[test]
    fn extract_rejects_two_part_versions() {
        let err = extract_version("0.12").expect_err("must reject 0.12");
        assert!(matches!(err, Error::InvalidVersion(raw) if raw == "0.12"));
    }

    #[test]
    fn extract_accepts_embedded_pattern() {
        let version = extract_version("v0.15.0-rc1").expect("version must parse");
        assert_eq!(version.to_string(), "0.15.0");
    }

    #[test]
    fn named_params_gated_on_0_14() {
        let old = Capabilities::derive(catalog::METHODS, Some("0.13.2")).expect("must derive");
        assert!(!old.named_params_supported());

        let new = Capabilities::derive(catalog::METHODS, Some("0.14.0")).expect("must derive");
        assert!(new.named_params_supported());
    }

    #[test]
    fn no_declared_version_supports_everything_but_named_params() {
        let caps = Capabilities::derive(catalog::METHODS, None).expect("must derive");
        assert!(!caps.named_params_supported());
        assert!(caps.method_supported("getnetworkinfo"));
        assert!(caps.method_supported("foobar"));
        assert!(caps.ensure_method("foobar").is_ok());
        assert_eq!(caps.version(), None);
    }

    #[test]
    fn method_support_follows_catalog_ranges() {
        let caps = Capabilities::derive(catalog::METHODS, Some("2.0.0")).expect("must derive");
        assert!(caps.method_supported("getbalance"));
        assert!(!caps.method_supported("getnetworkinfo"));
        assert!(!caps.method_supported("getBlockchainInfo"));

        let newer = Capabilities::derive(catalog::METHODS, Some("2.1.0")).expect("must derive");
        assert!(newer.method_supported("getnetworkinfo"));
    }

    #[test]
    fn unknown_method_is_unsupported_once_version_declared() {
        let caps = Capabilities::derive(catalog::METHODS, Some("2.1.0")).expect("must derive");
        assert!(!caps.method_supported("foobar"));
        let err = caps.ensure_method("foobar").expect_err("must fail fast");
        assert!(matches!(err, Error::UnsupportedMethod { method, version }
            if method == "foobar" && version == "2.1.0"));
    }

    #[test]
    fn feature_support_checked_independently_of_method_floor() {
        const GATED: &[MethodDescriptor] = &[MethodDescriptor {
            name: "getbalance",
            category: Category::Wallet,
            min_version: ">=0.0.0",
            features: &[Feature {
                name: "minconf",
                constraint: ">=1.2.0",
            }],
            obfuscate_request: None,
            obfuscate_response: None,
        }];

        let old = Capabilities::derive(GATED, Some("1.1.0")).expect("must derive");
        assert!(old.method_supported("getbalance"));
        assert!(!old.feature_supported("getbalance", "minconf"));
        let err = old
            .ensure_feature("getbalance", "minconf")
            .expect_err("feature must be gated");
        assert!(matches!(err, Error::UnsupportedFeature { feature, .. } if feature == "minconf"));

        let new = Capabilities::derive(GATED, Some("1.2.0")).expect("must derive");
        assert!(new.feature_supported("getbalance", "minconf"));
        assert!(new.ensure_feature("getbalance", "minconf").is_ok());

        let unversioned = Capabilities::derive(GATED, None).expect("must derive");
        assert!(unversioned.feature_supported("getbalance", "minconf"));
    }

    #[test]
    fn unknown_feature_is_unsupported_once_version_declared() {
        let caps = Capabilities::derive(catalog::METHODS, Some("2.1.0")).expect("must derive");
        assert!(!caps.feature_supported("getbalance", "minconf"));
    }

    #[test]
    fn every_catalog_range_parses() {
        for descriptor in catalog::METHODS {
            let _ = range(descriptor.min_version);
            for feature in descriptor.features {
                let _ = range(feature.constraint);
            }
        }
    }
}
