//! NLSS share cryptography.
//!
//! - [`reconstruct`] rebuilds a private share from a DID and public share and
//!   checks the parity relation between the three.
//! - [`positions`] derives the hash-chained signing positions shared by
//!   signer and verifier.
//! - [`signature`] signs a private share and verifies a signature against the
//!   DID and public share.
//!
//! All operations are pure functions over byte buffers; image I/O lives in
//! `nlss-codec`. Outputs are bit-compatible with deployed NLSS signers and
//! verifiers.

pub mod error;
mod hash;
pub mod positions;
pub mod reconstruct;
pub mod signature;

pub use error::{NlssError, NlssResult};
pub use positions::{derive, random_position, RandPos, Role, POSITION_COUNT, SIGN_POSITION_COUNT};
pub use reconstruct::{is_valid, parity, reconstruct};
pub use signature::{combine, sign, verify, Signature, SIGNATURE_LEN};
