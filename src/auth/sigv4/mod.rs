//! AWS Signature Version 4 request signing.
//!
//! [`sign`] is the entry point used by the delivery pipeline. The canonical
//! request helpers are public so callers can debug signature mismatches
//! against what AWS reports in its error responses.

mod canonical;
mod error;
mod signer;

pub use canonical::{
    build_canonical_request, canonical_headers, canonical_query, canonical_uri, hash_payload,
    signed_headers,
};
pub use error::SigningError;
pub use signer::{
    build_string_to_sign, compute_signature, derive_signing_key, sign, sign_at,
    SIGNING_ALGORITHM, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};
