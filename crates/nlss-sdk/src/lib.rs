//! High-level share operations over image files.
//!
//! Decodes DID, public and private share images with `nlss-codec`, runs the
//! share algorithms from `nlss-crypto`, and resolves node-layout paths from
//! [`NlssConfig`].

pub mod config;
pub mod error;
pub mod share;

pub use config::NlssConfig;
pub use error::{ConfigError, SdkError, SdkResult};
pub use nlss_crypto::Signature;
pub use share::{
    parse_did_list, read_did_list, reconstruct_for_did, reconstruct_private_share,
    sign_private_share, verify_signature,
};
