//! Move-to-front transform.
//!
//! Each byte is replaced by its rank in a 256-entry list, and the byte is
//! then moved to the front of the list. Runs of a repeated byte become runs
//! of zeros. The list starts as the identity permutation on every call.

fn identity() -> [u8; 256] {
    std::array::from_fn(|i| i as u8)
}

/// Perform the move-to-front transform.
pub fn transform(data: &[u8]) -> Vec<u8> {
    let mut list = identity();
    let mut result = Vec::with_capacity(data.len());

    for &byte in data {
        // Shift entries down until the byte is found, then put it in front.
        let mut rank = 0;
        let mut carried = list[0];
        while carried != byte {
            rank += 1;
            std::mem::swap(&mut list[rank], &mut carried);
        }
        list[0] = byte;
        result.push(rank as u8);
    }

    result
}

/// Perform the inverse move-to-front transform.
pub fn inverse_transform(data: &[u8]) -> Vec<u8> {
    let mut list = identity();
    let mut result = Vec::with_capacity(data.len());

    for &rank in data {
        let rank = rank as usize;
        let byte = list[rank];
        list.copy_within(0..rank, 1);
        list[0] = byte;
        result.push(byte);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mtf_empty() {
        assert!(transform(b"").is_empty());
        assert!(inverse_transform(b"").is_empty());
    }

    #[test]
    fn test_mtf_repeated() {
        assert_eq!(transform(b"aaaa"), vec![b'a', 0, 0, 0]);
    }

    #[test]
    fn test_mtf_known_ranks() {
        // b is at 98; a moved down to 98 after b comes to the front
        assert_eq!(transform(b"aba"), vec![97, 98, 1]);
        assert_eq!(transform(&[255, 0, 255]), vec![255, 1, 1]);
    }

    #[test]
    fn test_inverse_known_ranks() {
        assert_eq!(inverse_transform(&[2, 2, 0, 1]), vec![2, 1, 1, 2]);
    }

    #[test]
    fn test_mtf_roundtrip() {
        let test_cases = [
            b"hello".as_slice(),
            b"banana",
            b"abracadabra",
            b"the quick brown fox",
        ];

        for data in test_cases {
            let transformed = transform(data);
            assert_eq!(inverse_transform(&transformed), data, "Failed for: {:?}", data);
        }

        let all: Vec<u8> = (0..=255).rev().chain(0..=255).collect();
        assert_eq!(inverse_transform(&transform(&all)), all);
    }

    #[test]
    fn test_alphabet_resets_per_call() {
        let first = transform(b"zzz");
        let second = transform(b"zzz");
        assert_eq!(first, second);
        assert_eq!(inverse_transform(&[0]), vec![0]);
    }
}
