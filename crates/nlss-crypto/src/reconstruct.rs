use nlss_codec::BitSequence;
use tracing::debug;

use crate::error::{NlssError, NlssResult};

const PROGRESS_INTERVAL: usize = 50_000;

/// The parity operator: `popcount(public & private) mod 2`.
pub fn parity(public: u8, private: u8) -> u8 {
    ((public & private).count_ones() % 2) as u8
}

/// Rebuild a private share from a DID and its public share.
///
/// Every bit `i` of the DID constrains byte `i` of the shares:
/// `parity(public[i], private[i]) == did_bit[i]`. For each bit the search
/// starts from a seed (the public byte when the bit is 1, zero otherwise) and
/// walks upward, wrapping at 256, until the constraint holds.
///
/// The result has the same length as `public`; bytes past the number of DID
/// bits are left zero.
///
/// # Errors
///
/// - [`NlssError::InsufficientPublicData`] if `public` has fewer bytes than
///   the DID has bits.
/// - [`NlssError::UnsatisfiableConstraint`] if a DID bit is 1 where the public
///   byte is 0; no private byte can satisfy that.
pub fn reconstruct(did: &[u8], public: &[u8]) -> NlssResult<Vec<u8>> {
    let did_bits = BitSequence::from_bytes(did);
    ensure_public_covers(did_bits.len(), public)?;

    let total = did_bits.len();
    let mut private = vec![0u8; public.len()];
    for (i, &did_bit) in did_bits.iter().enumerate() {
        if i > 0 && i % PROGRESS_INTERVAL == 0 {
            debug!(done = i, total, "reconstructing private share");
        }
        private[i] = solve_byte(i, did_bit, public[i])?;
    }

    debug!(bits = total, bytes = private.len(), "private share reconstructed");
    Ok(private)
}

/// Check that `private` satisfies the parity constraint for every DID bit.
///
/// # Errors
///
/// [`NlssError::ParityMismatch`] at the first failing index. Buffers too
/// short to cover the DID fail with [`NlssError::InsufficientPublicData`] or
/// [`NlssError::LengthMismatch`].
pub fn verify(did: &[u8], public: &[u8], private: &[u8]) -> NlssResult<()> {
    let did_bits = BitSequence::from_bytes(did);
    ensure_public_covers(did_bits.len(), public)?;
    if private.len() < did_bits.len() {
        return Err(NlssError::LengthMismatch {
            expected: did_bits.len(),
            actual: private.len(),
        });
    }

    for (index, &expected) in did_bits.iter().enumerate() {
        let actual = parity(public[index], private[index]);
        if actual != expected {
            return Err(NlssError::ParityMismatch {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Boolean form of [`verify`].
pub fn is_valid(did: &[u8], public: &[u8], private: &[u8]) -> bool {
    verify(did, public, private).is_ok()
}

fn ensure_public_covers(did_bit_count: usize, public: &[u8]) -> NlssResult<()> {
    let required = did_bit_count * 8;
    let actual = public.len() * 8;
    if actual < required {
        return Err(NlssError::InsufficientPublicData { required, actual });
    }
    Ok(())
}

fn solve_byte(index: usize, did_bit: u8, public: u8) -> NlssResult<u8> {
    // The DID bit ANDed into each of the public byte's bits, repacked.
    let seed = if did_bit == 1 { public } else { 0 };
    (0..=u8::MAX)
        .map(|step| seed.wrapping_add(step))
        .find(|&candidate| parity(public, candidate) == did_bit)
        .ok_or(NlssError::UnsatisfiableConstraint { index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parity_operator() {
        assert_eq!(parity(0xFF, 0x01), 1);
        assert_eq!(parity(0xFF, 0x03), 0);
        assert_eq!(parity(0x0F, 0xF0), 0);
        assert_eq!(parity(0x00, 0xFF), 0);
    }

    #[test]
    fn known_solutions() {
        // DID 0b1000_0000: first bit 1, the rest 0.
        let did = [0x80];
        let public = [0xFF, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE];
        let private = reconstruct(&did, &public).unwrap();

        // Bit 1 on 0xFF: seed 0xFF has even parity, 0x00 too, 0x01 is first odd.
        assert_eq!(private[0], 0x01);
        // Zero bits take the zero seed, which already has even parity.
        assert!(private[1..].iter().all(|&b| b == 0));
        verify(&did, &public, &private).unwrap();
    }

    #[test]
    fn seed_is_the_public_byte_when_it_already_fits() {
        // 0x07 has odd parity with itself, so the seed is the answer.
        let private = reconstruct(&[0xFF], &[0x07; 8]).unwrap();
        assert_eq!(private, vec![0x07; 8]);
    }

    #[test]
    fn output_sized_to_public_share() {
        let did = [0xA5];
        let public = vec![0x5Au8; 20];
        let private = reconstruct(&did, &public).unwrap();
        assert_eq!(private.len(), 20);
        assert!(private[8..].iter().all(|&b| b == 0));
        assert!(is_valid(&did, &public, &private));
    }

    #[test]
    fn unsatisfiable_bit_is_reported() {
        let did = [0x80];
        let public = [0x00; 8];
        let err = reconstruct(&did, &public).unwrap_err();
        assert!(matches!(err, NlssError::UnsatisfiableConstraint { index: 0 }));
    }

    #[test]
    fn first_unsatisfiable_index_wins() {
        let did = [0b0010_0100];
        let public = [0x11, 0x11, 0x00, 0x11, 0x11, 0x00, 0x11, 0x11];
        let err = reconstruct(&did, &public).unwrap_err();
        assert!(matches!(err, NlssError::UnsatisfiableConstraint { index: 2 }));
    }

    #[test]
    fn zero_public_byte_is_fine_for_zero_bit() {
        let private = reconstruct(&[0x00], &[0x00; 8]).unwrap();
        assert_eq!(private, vec![0; 8]);
    }

    #[test]
    fn public_share_too_small() {
        let err = reconstruct(&[0xFF, 0xFF], &[0x01; 15]).unwrap_err();
        assert!(matches!(
            err,
            NlssError::InsufficientPublicData { required: 128, actual: 120 }
        ));
    }

    #[test]
    fn verify_reports_first_mismatch() {
        let did = [0xFF];
        let public = [0x01; 8];
        let mut private = reconstruct(&did, &public).unwrap();
        private[3] ^= 0x01;
        private[6] ^= 0x01;
        let err = verify(&did, &public, &private).unwrap_err();
        assert!(matches!(
            err,
            NlssError::ParityMismatch { index: 3, expected: 1, actual: 0 }
        ));
        assert!(!is_valid(&did, &public, &private));
    }

    #[test]
    fn verify_rejects_short_private_share() {
        let err = verify(&[0x00], &[0x00; 8], &[0x00; 7]).unwrap_err();
        assert!(matches!(err, NlssError::LengthMismatch { expected: 8, actual: 7 }));
    }

    proptest! {
        #[test]
        fn reconstruction_always_verifies(
            did in proptest::collection::vec(any::<u8>(), 1..16),
            fill in proptest::collection::vec(1u8..=255, 128..256),
        ) {
            let public: Vec<u8> = fill.iter().cycle().take(did.len() * 8 + 5).copied().collect();
            let private = reconstruct(&did, &public).unwrap();
            prop_assert_eq!(private.len(), public.len());
            prop_assert!(verify(&did, &public, &private).is_ok());
        }
    }
}
