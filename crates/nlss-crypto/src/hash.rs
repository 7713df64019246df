use sha3::{Digest, Sha3_256};

/// Lowercase hex SHA3-256 of the concatenation of `parts`.
///
/// Every link of the signing-position chain is carried in this form.
pub(crate) fn sha3_256_hex(parts: &[&str]) -> String {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_vector() {
        assert_eq!(
            sha3_256_hex(&[]),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn hello_world_vector() {
        assert_eq!(
            sha3_256_hex(&["Hello World"]),
            "e167f68d6563d75bb25f3aa49c29ef612d41352dc00606de7cbd630bb2665f51"
        );
    }

    #[test]
    fn parts_match_concatenation() {
        assert_eq!(
            sha3_256_hex(&["abc0000000011"]),
            sha3_256_hex(&["abc", "00000000", "", "11"])
        );
    }

    #[test]
    fn hex_is_lowercase_and_64_chars() {
        let h = sha3_256_hex(&["data"]);
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
