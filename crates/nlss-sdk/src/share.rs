use std::path::{Path, PathBuf};

use nlss_crypto::Signature;
use tracing::{debug, info};

use crate::config::NlssConfig;
use crate::error::{SdkError, SdkResult};

/// Rebuild the private share for a DID image and public share image, check
/// it, and write it as a PNG on the share canvas.
///
/// Nothing is written at `out_path` unless every stage succeeds.
pub fn reconstruct_private_share(
    did_path: impl AsRef<Path>,
    pub_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
) -> SdkResult<()> {
    let (did_path, pub_path, out_path) = (did_path.as_ref(), pub_path.as_ref(), out_path.as_ref());

    let did = nlss_codec::decode(did_path)?;
    let public = nlss_codec::decode(pub_path)?;
    info!(
        did = %did_path.display(),
        did_bits = did.len() * 8,
        public_bytes = public.len(),
        "reconstructing private share"
    );

    let private = nlss_crypto::reconstruct(&did, &public)?;
    nlss_crypto::reconstruct::verify(&did, &public, &private)
        .map_err(SdkError::VerificationFailed)?;
    nlss_codec::encode_share(&private, out_path)?;

    info!(path = %out_path.display(), "private share written");
    Ok(())
}

/// Sign a transaction hash with the private share stored at `path`.
pub fn sign_private_share(path: impl AsRef<Path>, hash: &str) -> SdkResult<Signature> {
    let private = nlss_codec::decode(path)?;
    let signature = nlss_crypto::sign(&private, hash)?;
    Ok(signature)
}

/// Check a signature against the DID and public share images it claims.
pub fn verify_signature(
    did_path: impl AsRef<Path>,
    pub_path: impl AsRef<Path>,
    hash: &str,
    signature: &Signature,
) -> SdkResult<()> {
    let did = nlss_codec::decode(did_path)?;
    let public = nlss_codec::decode(pub_path)?;
    nlss_crypto::verify(&did, &public, hash, signature)?;
    Ok(())
}

/// Reconstruct the private share of a DID in the node layout.
///
/// Reads the images resolved by [`NlssConfig::image_paths`] and writes to
/// [`NlssConfig::output_path`], creating its directory. Returns the path
/// written.
pub fn reconstruct_for_did(config: &NlssConfig, did: &str) -> SdkResult<PathBuf> {
    let (did_path, pub_path) = config.image_paths(did)?;
    let out_path = config.output_path(did);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    debug!(did, out = %out_path.display(), "resolved node layout");
    reconstruct_private_share(&did_path, &pub_path, &out_path)?;
    Ok(out_path)
}

/// DIDs listed one per line. Blank lines and `#` comments are skipped.
pub fn parse_did_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

pub fn read_did_list(path: impl AsRef<Path>) -> SdkResult<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_did_list(&contents))
}
