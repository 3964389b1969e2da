//! Certificate decoding
//!
//! Turns DER bytes into a [`ParsedCertificate`] using x509-parser.

use crate::certificate::oids;
use crate::models::{
    BasicConstraints, DistinguishedName, ExtensionSummary, Fingerprints, ParsedCertificate,
    PublicKeyInfo, SignatureAlgorithm, SubjectAltNames, Validity,
};
use crate::utils::CertificateError;
use chrono::{DateTime, TimeZone, Utc};
use sha2::Digest;
use std::net::IpAddr;
use x509_parser::extensions::{DistributionPointName, ParsedExtension};
use x509_parser::prelude::*;

const ACCESS_METHOD_OCSP: &str = "1.3.6.1.5.5.7.48.1";
const ACCESS_METHOD_CA_ISSUERS: &str = "1.3.6.1.5.5.7.48.2";

/// Stateless X.509 decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateDecoder;

impl CertificateDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a single DER-encoded certificate
    pub fn decode(&self, der: &[u8]) -> Result<ParsedCertificate, CertificateError> {
        let (rem, cert) =
            X509Certificate::from_der(der).map_err(|e| CertificateError::ParseError {
                message: e.to_string(),
            })?;
        if !rem.is_empty() {
            return Err(CertificateError::TrailingData { len: rem.len() });
        }

        let validity = Validity {
            not_before: asn1_time_to_datetime(cert.validity().not_before, "notBefore")?,
            not_after: asn1_time_to_datetime(cert.validity().not_after, "notAfter")?,
        };

        let signature_oid = cert.signature_algorithm.algorithm.to_string();

        let mut parsed = ParsedCertificate {
            version: cert.version().0 + 1,
            serial_number: hex_colon(&cert.serial.to_bytes_be()),
            subject: distinguished_name(cert.subject()),
            issuer: distinguished_name(cert.issuer()),
            validity,
            public_key: self.extract_public_key_info(&cert),
            signature_algorithm: SignatureAlgorithm {
                name: oids::signature_algorithm_name(&signature_oid),
                oid: signature_oid,
            },
            signature: hex_plain(&cert.signature_value.data),
            subject_alternative_names: SubjectAltNames::default(),
            key_usage: Vec::new(),
            extended_key_usage: Vec::new(),
            basic_constraints: None,
            subject_key_identifier: None,
            authority_key_identifier: None,
            ocsp_servers: Vec::new(),
            issuing_certificate_urls: Vec::new(),
            crl_distribution_points: Vec::new(),
            policies: Vec::new(),
            extensions: Vec::new(),
            is_self_issued: cert.subject() == cert.issuer(),
            fingerprints: fingerprints(der),
        };

        for ext in cert.extensions() {
            parsed.extensions.push(ExtensionSummary {
                oid: ext.oid.to_string(),
                critical: ext.critical,
            });
            self.apply_extension(ext.parsed_extension(), &mut parsed);
        }

        Ok(parsed)
    }

    fn extract_public_key_info(&self, cert: &X509Certificate) -> PublicKeyInfo {
        let pk = cert.public_key();
        let algorithm = pk.algorithm.algorithm.to_string();

        let key_size_bits = match pk.parsed().map(|key| key.key_size() as u32) {
            Ok(bits) if bits > 0 => bits,
            _ => oids::fixed_key_size_bits(&algorithm).unwrap_or(0),
        };

        PublicKeyInfo {
            algorithm_name: oids::public_key_algorithm_name(&algorithm),
            algorithm,
            key_size_bits,
        }
    }

    fn apply_extension(&self, ext: &ParsedExtension, parsed: &mut ParsedCertificate) {
        match ext {
            ParsedExtension::SubjectAlternativeName(san) => {
                let names = &mut parsed.subject_alternative_names;
                for name in &san.general_names {
                    match name {
                        GeneralName::DNSName(dns) => names.dns_names.push(dns.to_string()),
                        GeneralName::RFC822Name(email) => {
                            names.email_addresses.push(email.to_string())
                        }
                        GeneralName::URI(uri) => names.uris.push(uri.to_string()),
                        GeneralName::IPAddress(ip) => {
                            if let Some(ip) = ip_from_bytes(ip) {
                                names.ip_addresses.push(ip.to_string());
                            }
                        }
                        _ => {}
                    }
                }
            }
            ParsedExtension::KeyUsage(ku) => parsed.key_usage = key_usage_names(ku),
            ParsedExtension::ExtendedKeyUsage(eku) => {
                parsed.extended_key_usage = extended_key_usage_names(eku)
            }
            ParsedExtension::BasicConstraints(bc) => {
                parsed.basic_constraints = Some(BasicConstraints {
                    ca: bc.ca,
                    path_len_constraint: bc.path_len_constraint,
                })
            }
            ParsedExtension::SubjectKeyIdentifier(ski) => {
                parsed.subject_key_identifier = Some(hex_colon(ski.0))
            }
            ParsedExtension::AuthorityKeyIdentifier(aki) => {
                parsed.authority_key_identifier =
                    aki.key_identifier.as_ref().map(|id| hex_colon(id.0))
            }
            ParsedExtension::AuthorityInfoAccess(aia) => {
                for desc in aia.accessdescs.iter() {
                    let GeneralName::URI(uri) = desc.access_location else {
                        continue;
                    };
                    match desc.access_method.to_string().as_str() {
                        ACCESS_METHOD_OCSP => parsed.ocsp_servers.push(uri.to_string()),
                        ACCESS_METHOD_CA_ISSUERS => {
                            parsed.issuing_certificate_urls.push(uri.to_string())
                        }
                        _ => {}
                    }
                }
            }
            ParsedExtension::CRLDistributionPoints(cdp) => {
                for dp in cdp.iter() {
                    if let Some(DistributionPointName::FullName(names)) = &dp.distribution_point {
                        for name in names {
                            if let GeneralName::URI(uri) = name {
                                parsed.crl_distribution_points.push(uri.to_string());
                            }
                        }
                    }
                }
            }
            ParsedExtension::CertificatePolicies(policies) => {
                parsed.policies = policies
                    .iter()
                    .map(|policy| policy.policy_id.to_string())
                    .collect();
            }
            _ => {}
        }
    }
}

fn distinguished_name(name: &X509Name) -> DistinguishedName {
    fn values<'a, 'b: 'a>(
        attrs: impl Iterator<Item = &'a AttributeTypeAndValue<'b>>,
    ) -> Vec<String> {
        attrs
            .filter_map(|attr| attr.as_str().ok())
            .map(str::to_string)
            .collect()
    }

    DistinguishedName {
        dn: name.to_string(),
        common_name: values(name.iter_common_name()),
        organization: values(name.iter_organization()),
        organizational_unit: values(name.iter_organizational_unit()),
        country: values(name.iter_country()),
        locality: values(name.iter_locality()),
        state_or_province: values(name.iter_state_or_province()),
    }
}

fn key_usage_names(ku: &KeyUsage) -> Vec<String> {
    let flags = [
        (ku.digital_signature(), "Digital Signature"),
        (ku.non_repudiation(), "Non-Repudiation"),
        (ku.key_encipherment(), "Key Encipherment"),
        (ku.data_encipherment(), "Data Encipherment"),
        (ku.key_agreement(), "Key Agreement"),
        (ku.key_cert_sign(), "Certificate Sign"),
        (ku.crl_sign(), "CRL Sign"),
        (ku.encipher_only(), "Encipher Only"),
        (ku.decipher_only(), "Decipher Only"),
    ];
    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn extended_key_usage_names(eku: &ExtendedKeyUsage) -> Vec<String> {
    let flags = [
        (eku.any, "Any"),
        (eku.server_auth, "Server Authentication"),
        (eku.client_auth, "Client Authentication"),
        (eku.code_signing, "Code Signing"),
        (eku.email_protection, "Email Protection"),
        (eku.time_stamping, "Time Stamping"),
        (eku.ocsp_signing, "OCSP Signing"),
    ];
    let mut usages: Vec<String> = flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| name.to_string())
        .collect();
    usages.extend(eku.other.iter().map(|oid| oid.to_string()));
    usages
}

fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    match bytes.len() {
        4 => <[u8; 4]>::try_from(bytes).ok().map(IpAddr::from),
        16 => <[u8; 16]>::try_from(bytes).ok().map(IpAddr::from),
        _ => None,
    }
}

fn fingerprints(der: &[u8]) -> Fingerprints {
    Fingerprints {
        sha1: hex_colon(&sha1::Sha1::digest(der)),
        sha256: hex_colon(&sha2::Sha256::digest(der)),
    }
}

/// Convert ASN.1 time to chrono DateTime
fn asn1_time_to_datetime(
    time: ASN1Time,
    field: &'static str,
) -> Result<DateTime<Utc>, CertificateError> {
    Utc.timestamp_opt(time.timestamp(), 0)
        .single()
        .ok_or(CertificateError::InvalidTime { field })
}

fn hex_colon(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

fn hex_plain(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
