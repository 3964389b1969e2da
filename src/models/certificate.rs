//! Decoded certificate types
//!
//! These are the owned, serializable shapes emitted as JSON. Field names are
//! the document keys the search index sees, so renaming one is a schema
//! change for downstream consumers.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A distinguished name, both as a string and split into common attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistinguishedName {
    /// RFC 4514-style rendering, e.g. `C=AU, O=Example, CN=example.com`
    pub dn: String,
    pub common_name: Vec<String>,
    pub organization: Vec<String>,
    pub organizational_unit: Vec<String>,
    pub country: Vec<String>,
    pub locality: Vec<String>,
    pub state_or_province: Vec<String>,
}

/// Validity window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validity {
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

/// Subject public key summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyInfo {
    /// Dotted OID of the key algorithm
    pub algorithm: String,
    pub algorithm_name: String,
    /// Key size in bits; 0 when the key type is not recognised
    pub key_size_bits: u32,
}

/// Signature algorithm identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureAlgorithm {
    pub oid: String,
    pub name: String,
}

/// Subject Alternative Name entries, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectAltNames {
    pub dns_names: Vec<String>,
    pub email_addresses: Vec<String>,
    pub ip_addresses: Vec<String>,
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicConstraints {
    pub ca: bool,
    pub path_len_constraint: Option<u32>,
}

/// Presence and criticality of one extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionSummary {
    pub oid: String,
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fingerprints {
    pub sha1: String,
    pub sha256: String,
}

/// A decoded X.509 certificate.
///
/// Immutable once built; serialized exactly once per pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCertificate {
    /// X.509 version (1-based)
    pub version: u32,
    /// Serial number as colon-separated hex
    pub serial_number: String,
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    pub validity: Validity,
    pub public_key: PublicKeyInfo,
    pub signature_algorithm: SignatureAlgorithm,
    /// Signature bits, hex
    pub signature: String,
    pub subject_alternative_names: SubjectAltNames,
    pub key_usage: Vec<String>,
    pub extended_key_usage: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_constraints: Option<BasicConstraints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_key_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority_key_identifier: Option<String>,
    pub ocsp_servers: Vec<String>,
    pub issuing_certificate_urls: Vec<String>,
    pub crl_distribution_points: Vec<String>,
    pub policies: Vec<String>,
    pub extensions: Vec<ExtensionSummary>,
    pub is_self_issued: bool,
    pub fingerprints: Fingerprints,
}

impl ParsedCertificate {
    /// First common name of the subject, or the full DN if there is none
    pub fn display_name(&self) -> &str {
        self.subject
            .common_name
            .first()
            .map(String::as_str)
            .unwrap_or(&self.subject.dn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ParsedCertificate {
        ParsedCertificate {
            version: 3,
            serial_number: "01:02".to_string(),
            subject: DistinguishedName {
                dn: "O=Example".to_string(),
                organization: vec!["Example".to_string()],
                ..Default::default()
            },
            issuer: DistinguishedName::default(),
            validity: Validity {
                not_before: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                not_after: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
            public_key: PublicKeyInfo {
                algorithm: "1.2.840.113549.1.1.1".to_string(),
                algorithm_name: "RSA".to_string(),
                key_size_bits: 2048,
            },
            signature_algorithm: SignatureAlgorithm {
                oid: "1.2.840.113549.1.1.11".to_string(),
                name: "SHA256-RSA".to_string(),
            },
            signature: "00ff".to_string(),
            subject_alternative_names: SubjectAltNames::default(),
            key_usage: vec![],
            extended_key_usage: vec![],
            basic_constraints: None,
            subject_key_identifier: None,
            authority_key_identifier: None,
            ocsp_servers: vec![],
            issuing_certificate_urls: vec![],
            crl_distribution_points: vec![],
            policies: vec![],
            extensions: vec![],
            is_self_issued: false,
            fingerprints: Fingerprints {
                sha1: String::new(),
                sha256: String::new(),
            },
        }
    }

    #[test]
    fn test_display_name_falls_back_to_dn() {
        assert_eq!(sample().display_name(), "O=Example");
    }

    #[test]
    fn test_optional_extensions_are_omitted() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("basic_constraints").is_none());
        assert_eq!(json["validity"]["not_before"], "2024-01-01T00:00:00Z");
        assert_eq!(json["subject"]["organization"][0], "Example");
    }
}
